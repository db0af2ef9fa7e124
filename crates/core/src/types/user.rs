//! Registered users.

use serde::{Deserialize, Serialize};

use super::email::Email;
use super::id::UserId;

/// A registered user, as stored in the user registry.
///
/// The password is stored and compared verbatim. There is no hashing in
/// this storefront's account model; treat it as a demo credential, never as
/// a security boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl User {
    /// Whether this record matches the `(email, password)` pair exactly.
    #[must_use]
    pub fn has_credentials(&self, email: &str, password: &str) -> bool {
        self.email.as_str() == email && self.password.as_deref() == Some(password)
    }
}

/// A user without the credential, safe to hand to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: UserId,
    pub name: String,
    pub email: Email,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn marie() -> User {
        User {
            id: UserId::new("k3j9x0a2b"),
            name: "Marie".to_owned(),
            email: Email::parse("marie@sunbag.be").unwrap(),
            password: Some("gr20-2025".to_owned()),
        }
    }

    #[test]
    fn test_credentials_are_exact() {
        let user = marie();
        assert!(user.has_credentials("marie@sunbag.be", "gr20-2025"));
        assert!(!user.has_credentials("Marie@sunbag.be", "gr20-2025"));
        assert!(!user.has_credentials("marie@sunbag.be", "gr20-2025 "));
    }

    #[test]
    fn test_record_without_password_never_matches() {
        let user = User {
            password: None,
            ..marie()
        };
        assert!(!user.has_credentials("marie@sunbag.be", ""));
    }

    #[test]
    fn test_public_user_drops_password() {
        let json = serde_json::to_value(PublicUser::from(&marie())).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "marie@sunbag.be");
    }

    #[test]
    fn test_stored_shape() {
        let json = serde_json::to_value(marie()).unwrap();
        assert_eq!(json["id"], "k3j9x0a2b");
        assert_eq!(json["password"], "gr20-2025");
    }
}
