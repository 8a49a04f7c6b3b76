use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("user not found: {id}")]
    UserNotFound { id: String },

    #[error("username cannot be empty")]
    EmptyUsername,

    #[error("email cannot be empty")]
    EmptyEmail,
}

impl DomainError {
    pub fn user_not_found(id: impl Into<String>) -> Self {
        Self::UserNotFound { id: id.into() }
    }

    pub fn empty_username() -> Self {
        Self::EmptyUsername
    }

    pub fn empty_email() -> Self {
        Self::EmptyEmail
    }
}
