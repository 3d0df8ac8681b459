//! Domain error shared by every layer.
//!
//! Display text of every variant except [`CoreError::Internal`] is written
//! for the client and is returned verbatim in error responses.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The row does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// A field or cross-field rule was broken (bad CPF, missing justification, ...).
    #[error("{0}")]
    Validation(String),

    /// A uniqueness rule was broken.
    #[error("{0}")]
    Conflict(String),

    /// Missing, expired or wrong credentials.
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated, but neither the record's owner nor an admin.
    #[error("{0}")]
    Forbidden(String),

    #[error("internal error: {0}")]
    Internal(String),
}
