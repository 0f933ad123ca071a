//! Page chrome shared by every rendered page.

use axum::{extract::FromRequestParts, http::request::Parts};
use threadline_core::{Cart, Category, Wishlist};
use tower_sessions::Session;

use crate::error::AppError;
use crate::models::Notice;
use crate::state::AppState;
use crate::stores;
use crate::views::CategoryLinkView;

/// Header badges, navigation and pending notices for the page being rendered.
///
/// Extracting this drains the visitor's notice queue, so only handlers that
/// render a full page should ask for it.
///
/// # Example
///
/// ```rust,ignore
/// async fn show(page: PageContext) -> impl IntoResponse {
///     ShowTemplate { page }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PageContext {
    /// Units in the cart.
    pub cart_count: u32,
    /// Products in the wishlist.
    pub wishlist_count: usize,
    pub notices: Vec<Notice>,
    pub categories: Vec<CategoryLinkView>,
    /// Path and query of the current request, used as `return_to` by forms.
    pub current_path: String,
}

impl FromRequestParts<AppState> for PageContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("session layer missing".to_string()))?;

        let current_path = parts
            .uri
            .path_and_query()
            .map_or_else(|| "/".to_string(), ToString::to_string);

        Self::load(state, &session, current_path).await
    }
}

impl PageContext {
    /// Build the page context for `session`, draining its notice queue.
    ///
    /// Handlers that may redirect instead of rendering call this only once
    /// they know a page will be shown, so queued notices survive the redirect.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be read or modified.
    pub async fn load(
        state: &AppState,
        session: &Session,
        current_path: String,
    ) -> Result<Self, AppError> {
        let cart: Cart = stores::load(session).await?;
        let wishlist: Wishlist = stores::load(session).await?;
        let notices = stores::take_notices(session).await?;

        let categories = Category::ALL
            .into_iter()
            .map(|category| {
                let count = state.catalog().by_category(category.slug()).len();
                CategoryLinkView::new(category, count)
            })
            .collect();

        Ok(Self {
            cart_count: cart.item_count(),
            wishlist_count: wishlist.len(),
            notices,
            categories,
            current_path,
        })
    }
}
