//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (added by the binary)
//! 2. Rate limiting on form posts (added by the binary)
//! 3. `TraceLayer` (request span, see [`make_request_span`])
//! 4. Request ID (recorded into the span)
//! 5. Security headers (CSP, frame and referrer policy)
//! 6. Session layer (tower-sessions with a bounded in-memory store)

pub mod page_context;
pub mod rate_limit;
pub mod request_id;
pub mod security_headers;
pub mod session;

use axum::http::Request;
use tracing::Span;

pub use page_context::PageContext;
pub use rate_limit::form_rate_limiter;
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::{SessionMemoryStore, create_session_layer, spawn_expired_session_sweep};

/// Build the per-request tracing span.
///
/// `request_id` starts empty and is filled in by [`request_id_middleware`].
pub fn make_request_span<B>(request: &Request<B>) -> Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = tracing::field::Empty,
    )
}
