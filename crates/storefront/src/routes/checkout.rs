//! Checkout route handlers.
//!
//! Placing an order validates the shipping form, empties the cart and sends
//! the shopper home with a confirmation notice. Nothing is charged and no
//! order record is kept beyond the log line.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use threadline_core::{Cart, OrderSummary, PaymentMethod, ShippingDetails};
use tower_sessions::Session;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::middleware::PageContext;
use crate::models::Notice;
use crate::state::AppState;
use crate::stores::{self, Persisted};
use crate::views::{PaymentOptionView, SummaryView};

const CHECKOUT_PATH: &str = "/checkout";

/// Checkout form data.
///
/// Field names match the stored shipping details (`firstName`, `zipCode`, ...).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    #[serde(flatten)]
    pub shipping: ShippingDetails,
    #[serde(default)]
    pub payment_method: Option<String>,
    /// Checkbox: present (`on`) when ticked.
    #[serde(default)]
    pub save_info: Option<String>,
}

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/checkout.html")]
pub struct CheckoutTemplate {
    pub page: PageContext,
    pub form: ShippingDetails,
    pub payment_options: Vec<PaymentOptionView>,
    pub save_info: bool,
    pub summary: SummaryView,
}

/// Display the checkout form, prefilled from remembered shipping details.
///
/// An empty cart has nothing to check out and redirects to the cart page
/// with any queued notices left for that page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Response> {
    let cart: Cart = stores::load(&session).await?;
    if cart.is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }

    let page = PageContext::load(&state, &session, CHECKOUT_PATH.to_string()).await?;

    let remembered = session.get_value(ShippingDetails::KEY).await?.is_some();
    let form: ShippingDetails = stores::load(&session).await?;

    Ok(CheckoutTemplate {
        page,
        form,
        payment_options: PaymentOptionView::all(PaymentMethod::default()),
        save_info: remembered,
        summary: SummaryView::from(&cart),
    }
    .into_response())
}

/// Place the order.
///
/// A form missing required fields is rendered again with what the shopper
/// entered and a destructive notice.
#[instrument(skip(state, session, form))]
pub async fn place_order(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CheckoutForm>,
) -> Result<Response> {
    let mut cart: Cart = stores::load(&session).await?;
    if cart.is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }

    let payment_method = form
        .payment_method
        .as_deref()
        .map(str::parse::<PaymentMethod>)
        .transpose()
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Unknown payment method, using default");
            None
        })
        .unwrap_or_default();
    let save_info = form.save_info.is_some();

    if let Err(e) = form.shipping.validate() {
        tracing::info!(error = %e, "Checkout rejected");
        let mut page = PageContext::load(&state, &session, CHECKOUT_PATH.to_string()).await?;
        page.notices.push(Notice::checkout_invalid(&e));
        return Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            CheckoutTemplate {
                page,
                form: form.shipping,
                payment_options: PaymentOptionView::all(payment_method),
                save_info,
                summary: SummaryView::from(&cart),
            },
        )
            .into_response());
    }

    if save_info {
        stores::save(&session, &form.shipping).await?;
    }

    let summary = OrderSummary::from_cart(&cart);
    let order_id = Uuid::new_v4().to_string();
    tracing::info!(
        order_id = %order_id,
        items = cart.item_count(),
        total = %summary.total,
        payment_method = payment_method.as_str(),
        "Order placed"
    );
    add_breadcrumb(
        "checkout",
        "Order placed",
        Some(&[("order_id", order_id.as_str())]),
    );

    cart.clear();
    stores::save(&session, &cart).await?;
    stores::push_notice(&session, Notice::order_placed()).await?;

    Ok(Redirect::to("/").into_response())
}
