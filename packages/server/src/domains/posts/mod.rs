//! Posts domain - the LinkedIn post publication pipeline
//!
//! Components:
//! - machines: pure lifecycle + preflight decision logic (no IO)
//! - models: the Post record and all SQL queries
//! - data: request/response types for the HTTP edges
//! - actions: entry-point functions called from HTTP routes
//! - effects: IO side effects (hand-off to the extension relay)

pub mod actions;
pub mod data;
pub mod effects;
pub mod machines;
pub mod models;

pub use data::*;
pub use machines::preflight::{PreflightPost, PreflightReport};
pub use machines::InvalidTransition;
pub use models::{Post, PostStatus};
