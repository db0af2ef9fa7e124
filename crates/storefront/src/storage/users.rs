//! User registry and session marker.
//!
//! The registry is one JSON array under [`keys::USERS`], shared by every
//! visitor and rewritten whole on each registration. The session marker is a
//! single user record under [`keys::SESSION`] in the visitor's own store.

use sunbag_core::{Email, User, UserId};

use super::{
    KeyValueStore, RepositoryError, SharedStore, StorageError, keys, load_json,
    load_json_or_default, save_json,
};

/// Repository over the shared user registry.
pub struct UserRepository<'a> {
    registry: &'a SharedStore,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(registry: &'a SharedStore) -> Self {
        Self { registry }
    }

    /// Every registered user, in registration order.
    ///
    /// A malformed registry reads as empty.
    #[must_use]
    pub fn all(&self) -> Vec<User> {
        load_json_or_default(self.registry.store(), keys::USERS)
    }

    /// Find a user by exact (case-sensitive) email.
    #[must_use]
    pub fn find_by_email(&self, email: &str) -> Option<User> {
        self.all().into_iter().find(|u| u.email.as_str() == email)
    }

    /// Find the user matching both email and password exactly.
    #[must_use]
    pub fn find_by_credentials(&self, email: &str, password: &str) -> Option<User> {
        self.all()
            .into_iter()
            .find(|u| u.has_credentials(email, password))
    }

    /// Register a new user with a fresh random id.
    ///
    /// The duplicate check, append and rewrite happen under the registry lock.
    /// A malformed registry is replaced; one that cannot be read at all is
    /// left untouched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already registered.
    /// Returns `RepositoryError::Storage` if the registry cannot be read or
    /// written.
    pub fn create(
        &self,
        name: &str,
        email: Email,
        password: &str,
    ) -> Result<User, RepositoryError> {
        self.registry.transaction(|store| {
            let mut users: Vec<User> = match load_json(store, keys::USERS) {
                Ok(users) => users.unwrap_or_default(),
                Err(e @ StorageError::Malformed { .. }) => {
                    tracing::warn!(error = %e, "Replacing malformed user registry");
                    Vec::new()
                }
                Err(e) => return Err(RepositoryError::Storage(e)),
            };
            if users.iter().any(|u| u.email == email) {
                return Err(RepositoryError::Conflict("email already exists".to_owned()));
            }

            let user = User {
                id: UserId::generate(),
                name: name.to_owned(),
                email,
                password: Some(password.to_owned()),
            };
            users.push(user.clone());
            save_json(store, keys::USERS, &users)?;
            Ok(user)
        })?
    }
}

/// The visitor's "who is logged in" marker.
pub struct SessionMarker<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> SessionMarker<'a> {
    #[must_use]
    pub const fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// The logged-in user, if any. A malformed marker reads as absent.
    #[must_use]
    pub fn get(&self) -> Option<User> {
        load_json_or_default(self.store, keys::SESSION)
    }

    /// Record `user` as logged in.
    ///
    /// # Errors
    ///
    /// Returns an error if the marker cannot be written.
    pub fn set(&self, user: &User) -> Result<(), StorageError> {
        save_json(self.store, keys::SESSION, user)
    }

    /// Forget the logged-in user.
    ///
    /// # Errors
    ///
    /// Returns an error if the marker cannot be removed.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(keys::SESSION)
    }
}
