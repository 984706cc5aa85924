//! Entry repository
//!
//! Thin facade over the entry store. Forwards every operation unchanged —
//! no retries, no validation, no caching. View-state holders and sessions
//! depend on this type rather than on the store directly.

use super::models::Entry;
use super::store::EntryStore;
use crate::error::Result;
use tokio::sync::broadcast;

#[derive(Clone)]
pub struct EntryRepository {
    store: EntryStore,
}

impl EntryRepository {
    pub fn new(store: EntryStore) -> Self {
        Self { store }
    }

    pub fn observe_all(&self) -> broadcast::Receiver<Vec<Entry>> {
        self.store.observe_all()
    }

    pub async fn list(&self) -> Result<Vec<Entry>> {
        self.store.list().await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Entry>> {
        self.store.get_by_id(id).await
    }

    pub async fn insert(&self, entry: &Entry) -> Result<i64> {
        self.store.insert(entry).await
    }

    pub async fn update(&self, entry: &Entry) -> Result<bool> {
        self.store.update(entry).await
    }

    pub async fn delete(&self, entry: &Entry) -> Result<bool> {
        self.store.delete(entry).await
    }
}
