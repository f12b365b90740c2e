// Reachline - LinkedIn post pipeline backend
//
// Manages AI-drafted LinkedIn posts through an approve -> schedule -> publish
// lifecycle. Actual page automation is performed by a separately-maintained
// browser extension; this server only validates, records, and hands posts to
// the extension relay.
//
// Architecture follows domain-driven design:
// - domains/*/machines: pure decision logic (no IO)
// - domains/*/models:   persistence (all SQL lives here)
// - domains/*/actions:  entry points called from HTTP routes
// - domains/*/effects:  IO side effects (relay dispatch)

pub mod common;
pub mod config;
pub mod domains;
pub mod server;

pub use config::*;
