//! Error pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use crate::filters;
use crate::middleware::PageContext;

/// Not-found page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/not_found.html")]
pub struct NotFoundTemplate {
    pub page: PageContext,
    pub heading: &'static str,
    pub message: &'static str,
}

/// Render the not-found page with a 404 status.
#[must_use]
pub fn not_found_page(page: PageContext, heading: &'static str, message: &'static str) -> Response {
    (
        StatusCode::NOT_FOUND,
        NotFoundTemplate {
            page,
            heading,
            message,
        },
    )
        .into_response()
}

/// Fallback for unmatched paths.
#[instrument(skip(page), fields(path = %page.current_path))]
pub async fn not_found(page: PageContext) -> Response {
    tracing::debug!("No route matched");
    not_found_page(
        page,
        "Page Not Found",
        "Sorry, the page you are looking for does not exist.",
    )
}
