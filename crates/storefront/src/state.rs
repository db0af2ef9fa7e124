//! Application state shared across handlers.

use std::sync::Arc;

use moka::future::Cache;
use sunbag_core::VisitorId;
use tokio::sync::Mutex;

use crate::app::Storefront;
use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::error::AppError;
use crate::storage::{FileStore, SharedStore, StorageError};

/// Upper bound on visitors kept in memory at once.
const MAX_LIVE_VISITORS: u64 = 10_000;

/// Live state of one visitor, locked for the duration of a request.
pub type VisitorHandle = Arc<Mutex<Storefront>>;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the catalog, the stores and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: &'static Catalog,
    registry: Arc<SharedStore>,
    visitor_root: FileStore,
    visitors: Cache<VisitorId, VisitorHandle>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The user registry lives directly in `config.data_dir`, visitor state
    /// under `config.data_dir/visitors/<visitor id>/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directories cannot be created.
    pub fn new(config: StorefrontConfig) -> Result<Self, StorageError> {
        let data = FileStore::open(&config.data_dir)?;
        let visitor_root = data.namespace("visitors")?;
        let registry = Arc::new(SharedStore::new(Arc::new(data)));

        let visitors = Cache::builder()
            .max_capacity(MAX_LIVE_VISITORS)
            .time_to_idle(config.visitor_idle)
            .build();

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog: Catalog::builtin(),
                registry,
                visitor_root,
                visitors,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &'static Catalog {
        self.inner.catalog
    }

    /// Get the user registry shared by all visitors.
    #[must_use]
    pub fn registry(&self) -> Arc<SharedStore> {
        Arc::clone(&self.inner.registry)
    }

    /// Live state of `id`, booted from storage if it is not in memory.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if the visitor's store cannot be opened.
    pub async fn visitor(&self, id: VisitorId) -> Result<VisitorHandle, AppError> {
        self.inner
            .visitors
            .try_get_with(id, async {
                let store = self.inner.visitor_root.namespace(&id.to_string())?;
                tracing::debug!(visitor_id = %id, "Booting visitor from storage");
                let storefront = Storefront::boot(
                    Arc::new(store),
                    self.registry(),
                    self.inner.config.timings,
                );
                Ok::<_, StorageError>(Arc::new(Mutex::new(storefront)))
            })
            .await
            .map_err(|e| AppError::Internal(format!("failed to load visitor {id}: {e}")))
    }
}
