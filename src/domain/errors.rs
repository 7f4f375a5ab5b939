//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Precondition failed before any request was sent. The message is user-facing.
    #[error("{0}")]
    Validation(String),

    /// Transport failure, non-success status, or undecodable response body.
    #[error("Analysis service request failed: {0}")]
    Request(String),

    /// Upload already in flight; the upload action is disabled until it settles.
    #[error("An upload is already in progress")]
    Busy,

    #[error("File error: {0}")]
    File(String),

    #[error("UI error: {0}")]
    Ui(String),
}
