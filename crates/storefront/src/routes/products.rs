//! Product detail route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use threadline_core::{ProductId, RecentlyViewed, Wishlist};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::PageContext;
use crate::routes::pages::not_found_page;
use crate::state::AppState;
use crate::stores;
use crate::views::{ProductCardView, ProductDetailView, RELATED_LIMIT};

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub page: PageContext,
    pub card: ProductCardView,
    pub product: ProductDetailView,
    /// Other products from the same category.
    pub related: Vec<ProductCardView>,
}

/// Display a product and record it as recently viewed.
///
/// An id that isn't a number, or names no product, renders the not-found page.
#[instrument(skip(state, session, page))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
    session: Session,
    page: PageContext,
) -> Result<Response> {
    let Some(product) = id
        .parse::<ProductId>()
        .ok()
        .and_then(|id| state.catalog().get(id))
    else {
        tracing::debug!(id = %id, "Unknown product requested");
        return Ok(not_found_page(
            page,
            "Product Not Found",
            "Sorry, the product you are looking for does not exist.",
        ));
    };

    let mut recent: RecentlyViewed = stores::load(&session).await?;
    recent.record(product.id);
    stores::save(&session, &recent).await?;

    let wishlist: Wishlist = stores::load(&session).await?;
    let related = state
        .catalog()
        .by_category(product.category.slug())
        .into_iter()
        .filter(|other| other.id != product.id)
        .take(RELATED_LIMIT);

    Ok(ProductShowTemplate {
        page,
        card: ProductCardView::new(product, &wishlist),
        product: ProductDetailView::new(product),
        related: ProductCardView::list(related, &wishlist),
    }
    .into_response())
}
