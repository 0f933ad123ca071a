//! Newsletter subscription route handler.
//!
//! There is no mailing list behind the form: a valid address is logged and
//! acknowledged.

use axum::{Form, response::Redirect};
use serde::Deserialize;
use threadline_core::Email;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::models::Notice;
use crate::routes::safe_return_path;
use crate::stores;

/// Newsletter subscription form data.
#[derive(Debug, Deserialize)]
pub struct SubscribeForm {
    #[serde(default)]
    pub email: String,
    pub return_to: Option<String>,
}

/// Subscribe to the newsletter.
#[instrument(skip(session, form))]
pub async fn subscribe(session: Session, Form(form): Form<SubscribeForm>) -> Result<Redirect> {
    let return_to = safe_return_path(form.return_to.as_deref(), "/");

    let notice = if form.email.trim().is_empty() {
        Notice::newsletter_error("Please enter your email address")
    } else {
        match Email::parse(&form.email) {
            Ok(email) => {
                tracing::info!(domain = email.domain(), "Newsletter subscription");
                Notice::subscribed()
            }
            Err(e) => {
                tracing::debug!(error = %e, "Rejected newsletter address");
                Notice::newsletter_error("Please enter a valid email address")
            }
        }
    };
    stores::push_notice(&session, notice).await?;

    Ok(Redirect::to(&return_to))
}
