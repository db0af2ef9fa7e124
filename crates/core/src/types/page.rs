//! Storefront pages.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Every page the storefront can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    Home,
    Shop,
    Story,
    Contact,
    /// Product details; needs a selected product.
    Details,
    Login,
    Register,
    /// Account overview; needs an active session.
    Account,
    /// Order confirmation after checkout.
    Success,
}

impl Page {
    /// Wire name of the page.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Shop => "shop",
            Self::Story => "story",
            Self::Contact => "contact",
            Self::Details => "details",
            Self::Login => "login",
            Self::Register => "register",
            Self::Account => "account",
            Self::Success => "success",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a [`Page`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown page: {0}")]
pub struct PageParseError(pub String);

impl FromStr for Page {
    type Err = PageParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "home" => Ok(Self::Home),
            "shop" => Ok(Self::Shop),
            "story" => Ok(Self::Story),
            "contact" => Ok(Self::Contact),
            "details" => Ok(Self::Details),
            "login" => Ok(Self::Login),
            "register" => Ok(Self::Register),
            "account" => Ok(Self::Account),
            "success" => Ok(Self::Success),
            other => Err(PageParseError(other.to_owned())),
        }
    }
}
