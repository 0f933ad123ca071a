//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use threadline_core::{RecentlyViewed, Wishlist};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::PageContext;
use crate::state::AppState;
use crate::stores;
use crate::views::ProductCardView;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub page: PageContext,
    /// New arrivals.
    pub featured: Vec<ProductCardView>,
    pub on_sale: Vec<ProductCardView>,
    /// Empty for first-time visitors, which hides the section.
    pub recently_viewed: Vec<ProductCardView>,
}

/// Display the home page.
#[instrument(skip(state, session, page))]
pub async fn home(
    State(state): State<AppState>,
    session: Session,
    page: PageContext,
) -> Result<impl IntoResponse> {
    let catalog = state.catalog();
    let wishlist: Wishlist = stores::load(&session).await?;
    let recent: RecentlyViewed = stores::load(&session).await?;

    Ok(HomeTemplate {
        page,
        featured: ProductCardView::list(catalog.featured(), &wishlist),
        on_sale: ProductCardView::list(catalog.discounted(), &wishlist),
        recently_viewed: ProductCardView::list(recent.resolve(catalog), &wishlist),
    })
}
