use thiserror::Error;

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsersError {
    #[error("user not found: {id}")]
    NotFound { id: String },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Reserved for external uniqueness constraints; no operation
    /// produces it today.
    #[error("user already exists: {key}")]
    AlreadyExists { key: String },
}

impl UsersError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn already_exists(key: impl Into<String>) -> Self {
        Self::AlreadyExists { key: key.into() }
    }
}
