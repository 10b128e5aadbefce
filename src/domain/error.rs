use thiserror::Error;

/// Rejections raised synchronously at the store boundary. Nothing is applied
/// when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Sample text is empty")]
    EmptyText,

    #[error("Sample text is {length} characters, limit is {max}")]
    TooLong { length: usize, max: usize },

    #[error("Unknown lane: '{0}'. Use dialogue, narration, interiority or action")]
    UnknownLane(String),

    #[error("Unknown category kind: '{0}'. Use 'voice' or 'style'")]
    UnknownKind(String),

    #[error("Category name is empty")]
    EmptyCategoryName,

    #[error("Category already exists: {0}")]
    CategoryExists(String),
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            DomainError::Validation(v) => Some(v),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for DomainError {
    fn from(e: rusqlite::Error) -> Self {
        DomainError::Database(e.to_string())
    }
}
