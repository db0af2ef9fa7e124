//! Authentication error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Registration with an email already on file.
    #[error("email already registered")]
    DuplicateEmail,

    /// No user matches the email and password pair.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Registry or session marker could not be written.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl AuthError {
    /// Message shown at the form boundary.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::DuplicateEmail => "Cet email est déjà utilisé.",
            Self::InvalidCredentials => "Email ou mot de passe incorrect.",
            Self::Storage(_) => "Une erreur est survenue. Veuillez réessayer.",
        }
    }
}
