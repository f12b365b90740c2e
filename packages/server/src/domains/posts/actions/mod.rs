//! Post actions - entry-point functions for post operations
//!
//! Actions are self-contained: they take raw input, load the record, ask the
//! lifecycle machine for a verdict, and apply it. The machine never touches
//! the database; actions never decide legality themselves.

pub mod core;

pub use core::*;

use thiserror::Error;

use crate::common::PostId;
use crate::domains::posts::machines::preflight::PreflightReport;
use crate::domains::posts::machines::InvalidTransition;

/// Failure modes of post actions, mapped to HTTP responses at the edge.
#[derive(Debug, Error)]
pub enum PostActionError {
    #[error("post not found")]
    NotFound,

    /// Preflight gate failed; the report carries the complete checklist.
    #[error("preflight validation failed")]
    Preflight(PreflightReport),

    #[error(transparent)]
    Transition(#[from] InvalidTransition),

    /// The post's current status does not allow this operation
    /// (edit/delete gates, bad retry targets).
    #[error("{0}")]
    InvalidState(String),

    /// Content fingerprint matches a post this member already published.
    #[error("content matches already-published post {existing_id}")]
    DuplicateContent { existing_id: PostId },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
