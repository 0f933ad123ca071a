//! Cart route handlers.
//!
//! The cart lives in the visitor's session. Product data always comes from
//! the catalog; a form only names the product id and the shopper's choices.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use threadline_core::{Cart, CartItem, LineKey, ProductId};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::middleware::PageContext;
use crate::models::Notice;
use crate::routes::{blank_as_none, safe_return_path};
use crate::state::AppState;
use crate::stores;
use crate::views::CartLineView;

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
    /// Blank or missing means one.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub quantity: Option<u32>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub return_to: Option<String>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: ProductId,
    pub size: Option<String>,
    pub color: Option<String>,
    /// Blank leaves the line unchanged.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub quantity: Option<i64>,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: ProductId,
    pub size: Option<String>,
    pub color: Option<String>,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub page: PageContext,
    pub lines: Vec<CartLineView>,
    /// Shipping and tax are only added at checkout, so this is also the total.
    pub subtotal: String,
}

/// Build a line key from form fields. Blank size or color means none.
fn line_key(product_id: ProductId, size: Option<String>, color: Option<String>) -> LineKey {
    let present = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
    LineKey::new(product_id, present(size), present(color))
}

/// Display cart page.
#[instrument(skip(session, page))]
pub async fn show(session: Session, page: PageContext) -> Result<impl IntoResponse> {
    let cart: Cart = stores::load(&session).await?;

    Ok(CartShowTemplate {
        page,
        lines: cart.items().iter().map(CartLineView::from).collect(),
        subtotal: cart.total_amount().display(),
    })
}

/// Add item to cart.
///
/// Products that offer sizes or colors need one of each; a missing or unknown
/// choice leaves the cart alone and queues a notice instead. Adding a line
/// that already exists increases its quantity.
#[instrument(skip(state, session), fields(product_id = %form.product_id))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let fallback = format!("/product/{}", form.product_id);
    let return_to = safe_return_path(form.return_to.as_deref(), &fallback);

    let Some(product) = state.catalog().get(form.product_id) else {
        tracing::warn!("Add to cart for unknown product");
        stores::push_notice(&session, Notice::unknown_product()).await?;
        return Ok(Redirect::to(&return_to));
    };

    let selection = match product.resolve_selection(form.size.as_deref(), form.color.as_deref())
    {
        Ok(selection) => selection,
        Err(e) => {
            tracing::debug!(error = %e, "Rejected size/color choice");
            stores::push_notice(&session, Notice::selection(&e)).await?;
            return Ok(Redirect::to(&return_to));
        }
    };

    let quantity = form.quantity.unwrap_or(1).max(1);
    let mut cart: Cart = stores::load(&session).await?;
    let outcome = cart.add(CartItem::new(product.clone(), quantity, selection));
    stores::save(&session, &cart).await?;

    let product_id = form.product_id.to_string();
    add_breadcrumb("cart", "Added to cart", Some(&[("product_id", product_id.as_str())]));
    tracing::info!(quantity, items = cart.item_count(), "Added to cart");
    stores::push_notice(&session, Notice::cart_add(outcome, &product.name)).await?;

    Ok(Redirect::to(&return_to))
}

/// Update cart item quantity. Zero or less removes the line.
#[instrument(skip(session))]
pub async fn update(session: Session, Form(form): Form<UpdateCartForm>) -> Result<Redirect> {
    let Some(quantity) = form.quantity else {
        return Ok(Redirect::to("/cart"));
    };
    let key = line_key(form.product_id, form.size, form.color);
    let mut cart: Cart = stores::load(&session).await?;

    if cart.update_quantity(&key, quantity) {
        stores::save(&session, &cart).await?;
        if quantity <= 0 {
            stores::push_notice(&session, Notice::cart_removed()).await?;
        }
    }

    Ok(Redirect::to("/cart"))
}

/// Remove item from cart.
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<RemoveFromCartForm>) -> Result<Redirect> {
    let key = line_key(form.product_id, form.size, form.color);
    let mut cart: Cart = stores::load(&session).await?;

    if cart.remove(&key) {
        stores::save(&session, &cart).await?;
        stores::push_notice(&session, Notice::cart_removed()).await?;
    }

    Ok(Redirect::to("/cart"))
}

/// Empty the cart.
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Result<Redirect> {
    let mut cart: Cart = stores::load(&session).await?;
    cart.clear();
    stores::save(&session, &cart).await?;
    stores::push_notice(&session, Notice::cart_cleared()).await?;

    Ok(Redirect::to("/cart"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_key_treats_blank_as_none() {
        let key = line_key(
            ProductId::new(4),
            Some(String::new()),
            Some("#000000".to_string()),
        );
        assert_eq!(
            key,
            LineKey::new(ProductId::new(4), None, Some("#000000".to_string()))
        );
    }
}
