//! Wishlist route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use threadline_core::{ProductId, Wishlist};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::PageContext;
use crate::models::Notice;
use crate::routes::safe_return_path;
use crate::state::AppState;
use crate::stores;
use crate::views::ProductCardView;

/// Wishlist form data, shared by add and remove.
#[derive(Debug, Deserialize)]
pub struct WishlistForm {
    pub product_id: ProductId,
    pub return_to: Option<String>,
}

/// Wishlist page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/wishlist.html")]
pub struct WishlistTemplate {
    pub page: PageContext,
    pub products: Vec<ProductCardView>,
}

/// Display the wishlist, in the order products were saved.
#[instrument(skip(session, page))]
pub async fn show(session: Session, page: PageContext) -> Result<impl IntoResponse> {
    let wishlist: Wishlist = stores::load(&session).await?;

    Ok(WishlistTemplate {
        page,
        products: ProductCardView::list(wishlist.products(), &wishlist),
    })
}

/// Save a product to the wishlist. Saving it twice leaves one entry and a
/// warning notice.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<WishlistForm>,
) -> Result<Redirect> {
    let return_to = safe_return_path(form.return_to.as_deref(), "/wishlist");

    let Some(product) = state.catalog().get(form.product_id) else {
        tracing::warn!("Wishlist add for unknown product");
        stores::push_notice(&session, Notice::unknown_product()).await?;
        return Ok(Redirect::to(&return_to));
    };

    let mut wishlist: Wishlist = stores::load(&session).await?;
    let outcome = wishlist.add(product.clone());
    stores::save(&session, &wishlist).await?;
    stores::push_notice(&session, Notice::wishlist_add(outcome, &product.name)).await?;

    Ok(Redirect::to(&return_to))
}

/// Drop a product from the wishlist.
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<WishlistForm>) -> Result<Redirect> {
    let return_to = safe_return_path(form.return_to.as_deref(), "/wishlist");

    let mut wishlist: Wishlist = stores::load(&session).await?;
    if wishlist.remove(form.product_id) {
        stores::save(&session, &wishlist).await?;
        stores::push_notice(&session, Notice::wishlist_removed()).await?;
    }

    Ok(Redirect::to(&return_to))
}
