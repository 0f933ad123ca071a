//! Session middleware configuration.
//!
//! Sessions hold each visitor's cart, wishlist and recently viewed products.
//! They live in process memory and are lost on restart.
//!
//! The store is bounded: expired sessions are swept on a timer, and once
//! [`MAX_SESSIONS`] are held the least recently active session is evicted to
//! make room for a new one.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tower_sessions::cookie::time::OffsetDateTime;
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store::{self, ExpiredDeletion, SessionStore};
use tower_sessions::{Expiry, SessionManagerLayer};

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "threadline_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Most sessions held at once.
pub const MAX_SESSIONS: usize = 100_000;

/// How often expired sessions are swept.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// In-memory session store with expiry sweeping and a capacity bound.
#[derive(Clone, Debug)]
pub struct SessionMemoryStore {
    records: Arc<Mutex<HashMap<Id, Record>>>,
    capacity: usize,
}

impl Default for SessionMemoryStore {
    fn default() -> Self {
        Self::with_capacity(MAX_SESSIONS)
    }
}

impl SessionMemoryStore {
    /// Create a store holding at most `capacity` sessions.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
            capacity: capacity.max(1),
        }
    }

    /// Number of sessions currently held, expired ones included.
    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    /// Whether the store holds no sessions.
    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

fn is_active(expiry_date: OffsetDateTime) -> bool {
    expiry_date > OffsetDateTime::now_utc()
}

/// Drop expired records, then the least recently active ones until a new
/// record fits.
fn make_room(records: &mut HashMap<Id, Record>, capacity: usize) {
    if records.len() < capacity {
        return;
    }
    records.retain(|_, record| is_active(record.expiry_date));

    while records.len() >= capacity {
        let Some(oldest) = records
            .values()
            .min_by_key(|record| record.expiry_date)
            .map(|record| record.id)
        else {
            break;
        };
        records.remove(&oldest);
        tracing::debug!("Evicted least recently active session");
    }
}

#[async_trait]
impl SessionStore for SessionMemoryStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        let mut records = self.records.lock().await;
        while records.contains_key(&record.id) {
            record.id = Id::default();
        }
        make_room(&mut records, self.capacity);
        records.insert(record.id, record.clone());
        Ok(())
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        let mut records = self.records.lock().await;
        if !records.contains_key(&record.id) {
            make_room(&mut records, self.capacity);
        }
        records.insert(record.id, record.clone());
        Ok(())
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        Ok(self
            .records
            .lock()
            .await
            .get(session_id)
            .filter(|record| is_active(record.expiry_date))
            .cloned())
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        self.records.lock().await.remove(session_id);
        Ok(())
    }
}

#[async_trait]
impl ExpiredDeletion for SessionMemoryStore {
    async fn delete_expired(&self) -> session_store::Result<()> {
        let mut records = self.records.lock().await;
        let before = records.len();
        records.retain(|_, record| is_active(record.expiry_date));
        let removed = before - records.len();
        if removed > 0 {
            tracing::debug!(removed, "Deleted expired sessions");
        }
        Ok(())
    }
}

/// Spawn a background task that deletes expired sessions every `period`.
pub fn spawn_expired_session_sweep(
    store: SessionMemoryStore,
    period: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            if let Err(e) = store.delete_expired().await {
                tracing::warn!(error = %e, "Failed to delete expired sessions");
            }
        }
    })
}

/// Create the session layer around `store`.
///
/// The cookie is `Secure` when the configured base URL is `https`.
#[must_use]
pub fn create_session_layer(
    config: &StorefrontConfig,
    store: SessionMemoryStore,
) -> SessionManagerLayer<SessionMemoryStore> {
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use tower_sessions::cookie::time::Duration as TimeDuration;

    use super::*;

    fn record(expires_in: TimeDuration) -> Record {
        Record {
            id: Id::default(),
            data: HashMap::new(),
            expiry_date: OffsetDateTime::now_utc() + expires_in,
        }
    }

    #[tokio::test]
    async fn test_load_skips_expired_records() {
        let store = SessionMemoryStore::default();
        let mut live = record(TimeDuration::minutes(30));
        let mut stale = record(TimeDuration::minutes(-1));
        store.create(&mut live).await.unwrap();
        store.create(&mut stale).await.unwrap();

        assert!(store.load(&live.id).await.unwrap().is_some());
        assert!(store.load(&stale.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_expired_removes_only_expired() {
        let store = SessionMemoryStore::default();
        let mut live = record(TimeDuration::minutes(30));
        store.create(&mut live).await.unwrap();
        for _ in 0..3 {
            store
                .create(&mut record(TimeDuration::seconds(-5)))
                .await
                .unwrap();
        }
        assert_eq!(store.len().await, 4);

        store.delete_expired().await.unwrap();
        assert_eq!(store.len().await, 1);
        assert!(store.load(&live.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_full_store_evicts_least_recently_active() {
        let store = SessionMemoryStore::with_capacity(3);
        let mut oldest = record(TimeDuration::minutes(10));
        store.create(&mut oldest).await.unwrap();
        let mut kept = Vec::new();
        for minutes in [20, 30] {
            let mut r = record(TimeDuration::minutes(minutes));
            store.create(&mut r).await.unwrap();
            kept.push(r.id);
        }

        let mut newest = record(TimeDuration::minutes(40));
        store.create(&mut newest).await.unwrap();

        assert_eq!(store.len().await, 3);
        assert!(store.load(&oldest.id).await.unwrap().is_none());
        assert!(store.load(&newest.id).await.unwrap().is_some());
        for id in kept {
            assert!(store.load(&id).await.unwrap().is_some());
        }
    }

    #[tokio::test]
    async fn test_full_store_drops_expired_before_evicting() {
        let store = SessionMemoryStore::with_capacity(2);
        let mut live = record(TimeDuration::minutes(5));
        store.create(&mut live).await.unwrap();
        store
            .create(&mut record(TimeDuration::minutes(-5)))
            .await
            .unwrap();

        let mut fresh = record(TimeDuration::minutes(60));
        store.create(&mut fresh).await.unwrap();

        assert_eq!(store.len().await, 2);
        assert!(store.load(&live.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_save_of_known_record_never_evicts() {
        let store = SessionMemoryStore::with_capacity(1);
        let mut only = record(TimeDuration::minutes(5));
        store.create(&mut only).await.unwrap();

        only.expiry_date = OffsetDateTime::now_utc() + TimeDuration::minutes(50);
        store.save(&only).await.unwrap();

        assert_eq!(store.len().await, 1);
        assert!(store.load(&only.id).await.unwrap().is_some());
    }
}
