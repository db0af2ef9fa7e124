//! Navigation/view controller.
//!
//! [`NavigationState`] is a pure reducer: `state.apply(event)` returns the
//! next state. Leaving `details` drops the selected product and leaving
//! `shop` drops the global search. Which view is actually rendered is decided
//! by [`resolve`], which applies the page guards.

use serde::Serialize;
use sunbag_core::{Page, Product, User};

/// Something the visitor did that moves between pages.
#[derive(Debug, Clone)]
pub enum NavEvent {
    Navigate(Page),
    /// Open a product's details page.
    View(Product),
    /// Header search submission.
    Search(String),
}

/// Current page plus transient selection data.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NavigationState {
    pub page: Page,
    pub selected: Option<Product>,
    pub search_query: String,
}

impl NavigationState {
    /// Start state: home, nothing selected, no search.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Next state after `event`.
    #[must_use]
    pub fn apply(self, event: NavEvent) -> Self {
        match event {
            NavEvent::Navigate(page) => self.navigate(page),
            NavEvent::View(product) => Self {
                selected: Some(product),
                ..self
            }
            .navigate(Page::Details),
            NavEvent::Search(query) => {
                if query.trim().is_empty() {
                    return self;
                }
                Self {
                    search_query: query,
                    ..self
                }
                .navigate(Page::Shop)
            }
        }
    }

    fn navigate(mut self, page: Page) -> Self {
        self.page = page;
        if page != Page::Details {
            self.selected = None;
        }
        if page != Page::Shop {
            self.search_query.clear();
        }
        self
    }
}

/// The view actually rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View<'a> {
    Home,
    Shop { query: &'a str },
    Story,
    Contact,
    Details(&'a Product),
    Login,
    Register,
    Account(&'a User),
    Success,
}

impl View<'_> {
    #[must_use]
    pub const fn page(&self) -> Page {
        match self {
            Self::Home => Page::Home,
            Self::Shop { .. } => Page::Shop,
            Self::Story => Page::Story,
            Self::Contact => Page::Contact,
            Self::Details(_) => Page::Details,
            Self::Login => Page::Login,
            Self::Register => Page::Register,
            Self::Account(_) => Page::Account,
            Self::Success => Page::Success,
        }
    }
}

/// Apply the page guards.
///
/// `details` without a selection falls back to the shop, and `account`
/// without a logged-in user falls back to the login form.
#[must_use]
pub fn resolve<'a>(state: &'a NavigationState, user: Option<&'a User>) -> View<'a> {
    let shop = View::Shop {
        query: &state.search_query,
    };
    match state.page {
        Page::Home => View::Home,
        Page::Shop => shop,
        Page::Story => View::Story,
        Page::Contact => View::Contact,
        Page::Details => state.selected.as_ref().map_or(shop, View::Details),
        Page::Login => View::Login,
        Page::Register => View::Register,
        Page::Account => user.map_or(View::Login, View::Account),
        Page::Success => View::Success,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use sunbag_core::{Email, ProductId, UserId};

    use super::*;
    use crate::catalog::Catalog;

    fn product(id: &str) -> Product {
        Catalog::builtin()
            .get(&ProductId::new(id))
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_navigate_clears_selection_and_search() {
        let state = NavigationState::new()
            .apply(NavEvent::Search("batterie".to_owned()))
            .apply(NavEvent::View(product("batt-fr")));
        assert_eq!(state.page, Page::Details);
        assert!(state.selected.is_some());
        assert_eq!(state.search_query, "");

        let state = state.apply(NavEvent::Navigate(Page::Shop));
        assert!(state.selected.is_none());
    }

    #[test]
    fn test_search_sets_query_and_goes_to_shop() {
        let state = NavigationState::new().apply(NavEvent::Search("Kit".to_owned()));
        assert_eq!(state.page, Page::Shop);
        assert_eq!(state.search_query, "Kit");

        // staying on shop keeps it
        let state = state.apply(NavEvent::Navigate(Page::Shop));
        assert_eq!(state.search_query, "Kit");

        let state = state.apply(NavEvent::Navigate(Page::Contact));
        assert_eq!(state.search_query, "");
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let before = NavigationState::new().apply(NavEvent::Navigate(Page::Story));
        let after = before.clone().apply(NavEvent::Search("   ".to_owned()));
        assert_eq!(after, before);
    }

    #[test]
    fn test_details_without_selection_renders_shop() {
        let state = NavigationState::new().apply(NavEvent::Navigate(Page::Details));
        assert_eq!(state.page, Page::Details);
        assert_eq!(resolve(&state, None), View::Shop { query: "" });
    }

    #[test]
    fn test_details_with_selection() {
        let state = NavigationState::new().apply(NavEvent::View(product("sunbag-one")));
        match resolve(&state, None) {
            View::Details(p) => assert_eq!(p.id.as_str(), "sunbag-one"),
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn test_account_requires_user() {
        let state = NavigationState::new().apply(NavEvent::Navigate(Page::Account));
        assert_eq!(resolve(&state, None), View::Login);

        let user = User {
            id: UserId::new("abc"),
            name: "Marie".to_owned(),
            email: Email::parse("marie@sunbag.be").unwrap(),
            password: None,
        };
        assert_eq!(resolve(&state, Some(&user)), View::Account(&user));
        assert_eq!(resolve(&state, Some(&user)).page(), Page::Account);
    }
}
