//! Integration tests for the SUNBAG storefront.
//!
//! Each test spawns the real router on an ephemeral port, backed by its own
//! scratch data directory, and drives it over HTTP with `reqwest`. Simulated
//! latencies are zeroed so tests run at full speed.
//!
//! ```rust,ignore
//! #[tokio::test]
//! async fn test_health() {
//!     let ctx = TestContext::spawn().await;
//!     let resp = ctx.get("/health").await;
//!     assert_eq!(resp.status(), 200);
//! }
//! ```
//!
//! The auth rate limiter allows a burst of 5 register/login calls per IP, and
//! every test client connects from 127.0.0.1. Keep each test under that, or
//! spawn a fresh server.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::{Client, Response};
use serde_json::Value;
use sunbag_storefront::app::Timings;
use sunbag_storefront::config::StorefrontConfig;
use sunbag_storefront::state::AppState;
use tokio::task::JoinHandle;

/// A running storefront plus a cookie-keeping client (one visitor).
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
    data_dir: PathBuf,
    owns_data_dir: bool,
    server: JoinHandle<()>,
}

impl TestContext {
    /// Start a server on a fresh scratch directory.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot be started.
    pub async fn spawn() -> Self {
        let data_dir = scratch_dir();
        let mut ctx = Self::spawn_in(&data_dir).await;
        ctx.owns_data_dir = true;
        ctx
    }

    /// Start a server over an existing data directory (a "restart").
    ///
    /// The directory is left in place when the context is dropped.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot be started.
    pub async fn spawn_in(data_dir: &Path) -> Self {
        let config = StorefrontConfig {
            data_dir: data_dir.to_path_buf(),
            timings: Timings {
                auth_latency: Duration::ZERO,
                chat_delay: Duration::ZERO,
            },
            ..StorefrontConfig::default()
        };
        let state = AppState::new(config).expect("Failed to open data directory");
        let app = sunbag_storefront::app(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        let server = tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .ok();
        });

        Self {
            client: visitor_client(),
            base_url: format!("http://{addr}"),
            data_dir: data_dir.to_path_buf(),
            owns_data_dir: false,
            server,
        }
    }

    /// Data directory backing this server.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// A second browser: same server, no cookies.
    #[must_use]
    pub fn other_visitor(&self) -> Client {
        visitor_client()
    }

    /// GET `path` as this context's visitor.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request failed")
    }

    /// POST `path` with no body.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn post(&self, path: &str) -> Response {
        self.client
            .post(self.url(path))
            .send()
            .await
            .expect("POST request failed")
    }

    /// POST `path` with a JSON body.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn post_json(&self, path: &str, body: &Value) -> Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("POST request failed")
    }

    /// The visitor's full snapshot.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the body is not JSON.
    pub async fn snapshot(&self) -> Value {
        json_body(self.get("/api/state").await).await
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        self.server.abort();
        if self.owns_data_dir {
            std::fs::remove_dir_all(&self.data_dir).ok();
        }
    }
}

/// Parse a response body as JSON.
///
/// # Panics
///
/// Panics if the body is not JSON.
pub async fn json_body(resp: Response) -> Value {
    resp.json().await.expect("Response body is not JSON")
}

/// A unique, not yet existing directory under the system temp dir.
#[must_use]
pub fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join(format!("sunbag-it-{}", uuid::Uuid::new_v4().simple()))
}

fn visitor_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}
