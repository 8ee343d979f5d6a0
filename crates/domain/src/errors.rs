use thiserror::Error;
use uuid::Uuid;

use crate::services::DraftError;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    InvalidDraft(#[from] DraftError),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Property not found with id: {0}")]
    PropertyNotFound(Uuid),

    #[error("Request failed ({status}): {message}")]
    Gateway { status: u16, message: String },

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Session store error: {0}")]
    SessionStoreError(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}
