//! Integration tests for Threadline.
//!
//! The storefront router is driven in-process with `tower::ServiceExt::oneshot`,
//! so no server or port is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p threadline-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_pages` - Page rendering, 404s and response headers
//! - `storefront_cart` - Cart and wishlist forms
//! - `storefront_checkout` - Checkout and newsletter forms
//! - `storefront_sessions` - Session store capacity and the notice queue
//!
//! # Example
//!
//! ```rust,no_run
//! # async fn run() {
//! use threadline_integration_tests::TestContext;
//!
//! let mut ctx = TestContext::new();
//! let resp = ctx.get("/health").await;
//! assert_eq!(resp.status, 200);
//! # }
//! ```

#![allow(clippy::missing_panics_doc)]

use std::path::PathBuf;
use std::str::FromStr;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Request, StatusCode, header},
};
use threadline_storefront::config::StorefrontConfig;
use threadline_storefront::middleware::SessionMemoryStore;
use threadline_storefront::state::AppState;
use tower::ServiceExt;
use tower_sessions::session::Id;
use tower_sessions::session_store::SessionStore;

/// Largest response body read by the harness.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// A storefront router plus the session cookie of one visitor.
///
/// Every request goes through a clone of the same router, so the in-memory
/// session store is shared between requests.
pub struct TestContext {
    app: Router,
    store: SessionMemoryStore,
    cookie: Option<String>,
}

/// Status, headers and body of a finished request.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Target of a redirect, if any.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }

    /// Value of a response header as text.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// Build the storefront with the built-in catalog and default config.
    #[must_use]
    pub fn new() -> Self {
        Self::with_session_store(SessionMemoryStore::default())
    }

    /// Build the storefront around a given session store.
    #[must_use]
    pub fn with_session_store(store: SessionMemoryStore) -> Self {
        let config = StorefrontConfig {
            static_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../storefront/static"),
            ..StorefrontConfig::default()
        };
        let state = AppState::new(config).expect("built-in catalog should load");

        Self {
            app: threadline_storefront::app_with_session_store(state, store.clone()),
            store,
            cookie: None,
        }
    }

    /// The session store shared by every request of this context.
    #[must_use]
    pub const fn session_store(&self) -> &SessionMemoryStore {
        &self.store
    }

    /// Drop the session cookie, so the next request comes from a new visitor.
    pub fn forget_session(&mut self) {
        self.cookie = None;
    }

    /// Overwrite one value in this visitor's stored session, bypassing the
    /// storefront's own serialization.
    pub async fn set_session_value(&self, key: &str, value: serde_json::Value) {
        let cookie = self.cookie.as_deref().expect("visitor should have a session");
        let raw_id = cookie.split_once('=').map_or(cookie, |(_, id)| id);
        let id = Id::from_str(raw_id).expect("session cookie should hold a session id");

        let mut record = self
            .store
            .load(&id)
            .await
            .expect("session store should be readable")
            .expect("session should exist");
        record.data.insert(key.to_string(), value);
        self.store
            .save(&record)
            .await
            .expect("session store should be writable");
    }

    /// Whether the storefront has issued this visitor a session cookie.
    #[must_use]
    pub const fn has_session(&self) -> bool {
        self.cookie.is_some()
    }

    /// Send a GET request.
    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = self.request("GET", uri).body(Body::empty());
        self.send(request.expect("valid GET request")).await
    }

    /// Send a URL-encoded form POST.
    pub async fn post_form(&mut self, uri: &str, body: &str) -> TestResponse {
        let request = self
            .request("POST", uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()));
        self.send(request.expect("valid POST request")).await
    }

    /// Send a form POST and follow its redirect with a GET, the way a
    /// browser does. Returns the page the redirect lands on.
    pub async fn submit(&mut self, uri: &str, body: &str) -> TestResponse {
        let resp = self.post_form(uri, body).await;
        match resp.location() {
            Some(location) if resp.status.is_redirection() => {
                let location = location.to_string();
                self.get(&location).await
            }
            _ => resp,
        }
    }

    fn request(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(uri);
        match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .unwrap_or_else(|never| match never {});

        // An emptied session comes back as a removal cookie with no value
        if let Some(cookie) = session_cookie(response.headers()) {
            self.cookie = cookie
                .split_once('=')
                .is_some_and(|(_, value)| !value.is_empty())
                .then_some(cookie);
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), MAX_BODY_BYTES)
            .await
            .expect("response body should be readable");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

/// The `name=value` pair of a `Set-Cookie` header.
fn session_cookie(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::SET_COOKIE)?.to_str().ok()?;
    value.split(';').next().map(|pair| pair.trim().to_string())
}
