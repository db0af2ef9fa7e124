//! Authentication service.
//!
//! Mock accounts: users live in the shared registry with their password in
//! clear, and "being logged in" means the visitor's session marker holds a
//! user record. Register and login wait out a fixed latency before touching
//! storage, the way a remote call would.
//!
//! Passwords are compared as exact strings. There is no hashing and no
//! normalization; this module makes no security claim.

mod error;

pub use error::AuthError;

use std::time::Duration;

use sunbag_core::{Email, User};
use tracing::instrument;

use crate::storage::users::{SessionMarker, UserRepository};
use crate::storage::{KeyValueStore, RepositoryError, SharedStore};

/// Latency applied to register and login.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(800);

/// Authentication service for one visitor.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    session: SessionMarker<'a>,
    latency: Duration,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(
        registry: &'a SharedStore,
        visitor: &'a dyn KeyValueStore,
        latency: Duration,
    ) -> Self {
        Self {
            users: UserRepository::new(registry),
            session: SessionMarker::new(visitor),
            latency,
        }
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    /// Register a new user and log them in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::DuplicateEmail` if the email is already registered;
    /// the current session is left untouched in that case.
    /// Returns `AuthError::Storage` if the registry or marker cannot be written.
    #[instrument(skip(self, email, password), fields(email = %email))]
    pub async fn register(
        &self,
        name: &str,
        email: Email,
        password: &str,
    ) -> Result<User, AuthError> {
        tokio::time::sleep(self.latency).await;

        let user = self
            .users
            .create(name, email, password)
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::DuplicateEmail,
                RepositoryError::Storage(e) => AuthError::Storage(e),
            })?;
        self.session.set(&user)?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Log in with an exact email and password pair.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if no registered user matches.
    /// Returns `AuthError::Storage` if the marker cannot be written.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        tokio::time::sleep(self.latency).await;

        let user = self
            .users
            .find_by_credentials(email, password)
            .ok_or(AuthError::InvalidCredentials)?;
        self.session.set(&user)?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(user)
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Forget the logged-in user. The registry is not touched.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the marker cannot be removed.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.session.clear()?;
        Ok(())
    }

    /// The user restored from the session marker, if any.
    #[must_use]
    pub fn get_session(&self) -> Option<User> {
        self.session.get()
    }
}
