//! Per-visitor stores kept in the session.
//!
//! Each store is a plain core type serialized as JSON under a fixed session
//! key. Handlers load a store, apply a core operation and save it back; there
//! is no merging between concurrent requests, so the last write wins.

use serde::Serialize;
use serde::de::DeserializeOwned;
use threadline_core::{Cart, RecentlyViewed, ShippingDetails, Wishlist};
use tower_sessions::Session;
use tower_sessions::session::Error as SessionError;

use crate::models::{Notice, Notices, session_keys};

/// Most notices kept in the queue; older ones are dropped first.
pub const MAX_QUEUED_NOTICES: usize = 5;

/// A value stored in the session under a fixed key.
pub trait Persisted: Serialize + DeserializeOwned + Default {
    /// Session key the value lives under.
    const KEY: &'static str;
}

impl Persisted for Cart {
    const KEY: &'static str = session_keys::CART;
}

impl Persisted for Wishlist {
    const KEY: &'static str = session_keys::WISHLIST;
}

impl Persisted for RecentlyViewed {
    const KEY: &'static str = session_keys::RECENTLY_VIEWED;
}

impl Persisted for ShippingDetails {
    const KEY: &'static str = session_keys::SAVED_SHIPPING;
}

impl Persisted for Notices {
    const KEY: &'static str = session_keys::NOTICES;
}

/// Load a store, falling back to its default when absent.
///
/// A stored value that no longer deserializes is logged and treated as
/// absent; the next [`save`] overwrites it.
///
/// # Errors
///
/// Returns an error if the session store itself cannot be read.
pub async fn load<T: Persisted>(session: &Session) -> Result<T, SessionError> {
    let Some(value) = session.get_value(T::KEY).await? else {
        return Ok(T::default());
    };

    match serde_json::from_value(value) {
        Ok(store) => Ok(store),
        Err(e) => {
            tracing::warn!(key = T::KEY, error = %e, "Discarding malformed session value");
            Ok(T::default())
        }
    }
}

/// Write a store back to the session.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized or the session cannot
/// be modified.
pub async fn save<T: Persisted>(session: &Session, store: &T) -> Result<(), SessionError> {
    session.insert(T::KEY, store).await
}

/// Queue a notice for the next rendered page.
///
/// Only the newest [`MAX_QUEUED_NOTICES`] are kept.
///
/// # Errors
///
/// Returns an error if the session cannot be read or modified.
pub async fn push_notice(session: &Session, notice: Notice) -> Result<(), SessionError> {
    let mut notices: Notices = load(session).await?;
    notices.0.push(notice);
    let excess = notices.0.len().saturating_sub(MAX_QUEUED_NOTICES);
    notices.0.drain(..excess);
    save(session, &notices).await
}

/// Drain queued notices.
///
/// # Errors
///
/// Returns an error if the session cannot be read or modified.
pub async fn take_notices(session: &Session) -> Result<Vec<Notice>, SessionError> {
    let notices: Notices = load(session).await?;
    if !notices.0.is_empty() {
        session.remove_value(Notices::KEY).await?;
    }
    Ok(notices.0)
}
