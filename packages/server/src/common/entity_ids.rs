//! Typed ID definitions for all domain entities.
//!
//! This module defines type aliases for each domain entity, providing
//! compile-time type safety for ID usage throughout the application.
//!
//! # Example
//!
//! ```rust
//! use server_core::common::{MemberId, PostId};
//!
//! // These are incompatible types - compiler prevents mixing them up
//! let member_id: MemberId = MemberId::new();
//! let post_id: PostId = PostId::new();
//!
//! // This would be a compile error:
//! // let wrong: PostId = member_id;
//! ```

// Re-export the core Id type
pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for Member entities (dashboard users).
pub struct Member;

/// Marker type for Post entities (LinkedIn posts in the pipeline).
pub struct Post;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for Member entities.
pub type MemberId = Id<Member>;

/// Typed ID for Post entities.
pub type PostId = Id<Post>;
