//! Per-visitor application state.
//!
//! A [`Storefront`] is everything one browser tab would hold: cart, logged-in
//! user, navigation, cart drawer, chat and carousels. Handlers mutate it
//! through the methods below and read it back with [`Storefront::snapshot`].

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Serialize;
use sunbag_core::{Page, Product, PublicUser, User};

use crate::cart::{CartEngine, CartSummary};
use crate::chat::{self, ChatSession, Message};
use crate::gallery::{self, AUTOPLAY_PERIOD, Autoplay, Carousel, SharedCarousel};
use crate::navigation::{NavEvent, NavigationState, View, resolve};
use crate::services::auth::{self, AuthError, AuthService};
use crate::storage::{KeyValueStore, SharedStore};

/// Timing knobs for simulated latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// Delay before register/login resolve.
    pub auth_latency: Duration,
    /// Delay before a chat reply appears.
    pub chat_delay: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            auth_latency: auth::DEFAULT_LATENCY,
            chat_delay: chat::DEFAULT_REPLY_DELAY,
        }
    }
}

/// Application state of one visitor.
pub struct Storefront {
    store: Arc<dyn KeyValueStore>,
    registry: Arc<SharedStore>,
    timings: Timings,
    cart: CartEngine,
    navigation: NavigationState,
    user: Option<User>,
    cart_open: bool,
    chat: ChatSession,
    product_gallery: Option<Carousel>,
    showcase: SharedCarousel,
    showcase_autoplay: Option<Autoplay>,
}

impl Storefront {
    /// Application start: rehydrate cart and session, land on home.
    ///
    /// Must be called within a tokio runtime (the home showcase starts
    /// playing immediately).
    pub fn boot(
        store: Arc<dyn KeyValueStore>,
        registry: Arc<SharedStore>,
        timings: Timings,
    ) -> Self {
        let cart = CartEngine::load(Arc::clone(&store));
        let user = AuthService::new(&registry, store.as_ref(), timings.auth_latency).get_session();

        let mut storefront = Self {
            store,
            registry,
            timings,
            cart,
            navigation: NavigationState::new(),
            user,
            cart_open: false,
            chat: ChatSession::new(timings.chat_delay),
            product_gallery: None,
            showcase: Arc::new(Mutex::new(Carousel::showcase())),
            showcase_autoplay: None,
        };
        storefront.sync_views();
        storefront
    }

    // =========================================================================
    // Collaborators
    // =========================================================================

    /// The visitor's own store.
    #[must_use]
    pub fn store(&self) -> Arc<dyn KeyValueStore> {
        Arc::clone(&self.store)
    }

    /// The registry shared by all visitors.
    #[must_use]
    pub fn registry(&self) -> Arc<SharedStore> {
        Arc::clone(&self.registry)
    }

    #[must_use]
    pub const fn timings(&self) -> Timings {
        self.timings
    }

    /// Identity service bound to this visitor.
    #[must_use]
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(&self.registry, self.store.as_ref(), self.timings.auth_latency)
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    pub fn navigate(&mut self, page: Page) {
        self.apply(NavEvent::Navigate(page));
    }

    /// Open the details page of `product` with a fresh gallery.
    pub fn view_product(&mut self, product: Product) {
        self.product_gallery = Some(Carousel::new(product.images.clone()));
        self.apply(NavEvent::View(product));
    }

    /// Header search. Blank queries are ignored.
    pub fn search(&mut self, query: String) {
        self.apply(NavEvent::Search(query));
    }

    #[must_use]
    pub const fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    /// The view the visitor actually sees.
    #[must_use]
    pub fn view(&self) -> View<'_> {
        resolve(&self.navigation, self.user.as_ref())
    }

    fn apply(&mut self, event: NavEvent) {
        let navigation = std::mem::take(&mut self.navigation);
        self.navigation = navigation.apply(event);
        self.sync_views();
    }

    /// Keep per-page components in step with the current page: the product
    /// gallery exists only while a product is selected, and the showcase
    /// only plays while home is on screen.
    fn sync_views(&mut self) {
        if self.navigation.selected.is_none() {
            self.product_gallery = None;
        }

        let on_home = self.view().page() == Page::Home;
        match (on_home, self.showcase_autoplay.is_some()) {
            (true, false) => {
                self.showcase_autoplay = Some(Autoplay::start(
                    Arc::clone(&self.showcase),
                    AUTOPLAY_PERIOD,
                ));
            }
            (false, true) => self.showcase_autoplay = None,
            _ => {}
        }
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add one unit and open the cart drawer.
    pub fn add_to_cart(&mut self, product: &Product) {
        self.cart.add(product);
        self.cart_open = true;
    }

    pub fn remove_from_cart(&mut self, index: usize) {
        self.cart.remove(index);
    }

    pub const fn open_cart(&mut self) {
        self.cart_open = true;
    }

    pub const fn close_cart(&mut self) {
        self.cart_open = false;
    }

    /// Simulated checkout: empty the cart, close the drawer, show success.
    pub fn checkout(&mut self) {
        self.cart.clear();
        self.cart_open = false;
        self.navigate(Page::Success);
    }

    #[must_use]
    pub const fn cart(&self) -> &CartEngine {
        &self.cart
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Register or login resolved: remember the user and show the account.
    pub fn login_succeeded(&mut self, user: User) {
        self.user = Some(user);
        self.navigate(Page::Account);
    }

    /// Clear the session marker, forget the user and go home.
    ///
    /// The in-memory state is reset even if the marker cannot be removed.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the marker removal fails.
    pub fn logout(&mut self) -> Result<(), AuthError> {
        let result = self.auth().logout();
        self.user = None;
        self.navigate(Page::Home);
        result
    }

    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    // =========================================================================
    // Widgets
    // =========================================================================

    pub const fn chat(&mut self) -> &mut ChatSession {
        &mut self.chat
    }

    /// Run `f` on the carousel of the current view, if it has one.
    ///
    /// Returns `false` when the current view shows no carousel.
    pub fn with_gallery(&mut self, f: impl FnOnce(&mut Carousel)) -> bool {
        match self.view().page() {
            Page::Details => self.product_gallery.as_mut().map(f).is_some(),
            Page::Home => {
                let mut showcase = gallery::lock(&self.showcase);
                let was_playing = showcase.is_playing();
                f(&mut showcase);
                let resumed = !was_playing && showcase.is_playing();
                drop(showcase);

                if resumed {
                    if let Some(autoplay) = &self.showcase_autoplay {
                        autoplay.restart();
                    }
                }
                true
            }
            _ => false,
        }
    }

    fn gallery_snapshot(&self) -> Option<Carousel> {
        match self.view().page() {
            Page::Details => self.product_gallery.clone(),
            Page::Home => Some(gallery::lock(&self.showcase).clone()),
            _ => None,
        }
    }

    // =========================================================================
    // Presentation
    // =========================================================================

    /// Everything the presentation layer needs to render.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let view = self.view();
        Snapshot {
            page: view.page(),
            requested_page: self.navigation.page,
            selected: match view {
                View::Details(product) => Some(product.clone()),
                _ => None,
            },
            search_query: self.navigation.search_query.clone(),
            user: self.user.as_ref().map(PublicUser::from),
            cart: self.cart.summary(),
            cart_open: self.cart_open,
            chat: ChatSnapshot::from(&self.chat),
            gallery: self.gallery_snapshot(),
        }
    }
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("navigation", &self.navigation)
            .field("cart", &self.cart)
            .field("user", &self.user.as_ref().map(|u| &u.id))
            .field("cart_open", &self.cart_open)
            .finish_non_exhaustive()
    }
}

/// Serializable view of a [`Storefront`].
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    /// Page actually rendered, after guards.
    pub page: Page,
    /// Page last navigated to.
    pub requested_page: Page,
    pub selected: Option<Product>,
    pub search_query: String,
    pub user: Option<PublicUser>,
    pub cart: CartSummary,
    pub cart_open: bool,
    pub chat: ChatSnapshot,
    /// Carousel of the rendered page, if it shows one.
    pub gallery: Option<Carousel>,
}

/// Chat widget state.
#[derive(Debug, Clone, Serialize)]
pub struct ChatSnapshot {
    pub messages: Vec<Message>,
    pub loading: bool,
    pub suggestions: [&'static str; 4],
}

impl From<&ChatSession> for ChatSnapshot {
    fn from(chat: &ChatSession) -> Self {
        Self {
            messages: chat.messages(),
            loading: chat.is_loading(),
            suggestions: chat::SUGGESTIONS,
        }
    }
}
