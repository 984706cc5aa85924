//! Entry store
//!
//! CRUD operations for diary entries plus the live "all entries" query.
//! Every successful mutation pushes one fresh, ordered snapshot to all
//! active subscribers; subscribers detach by dropping their receiver.

use super::models::Entry;
use crate::config;
use crate::error::Result;
use sqlx::SqlitePool;
use tokio::sync::broadcast;

/// Store for diary entries. One instance per process; cloning shares the
/// pool and the snapshot channel.
#[derive(Clone)]
pub struct EntryStore {
    pool: SqlitePool,
    snapshots: broadcast::Sender<Vec<Entry>>,
}

impl EntryStore {
    pub fn new(pool: SqlitePool) -> Self {
        let (snapshots, _) = broadcast::channel(config::SNAPSHOT_CHANNEL_CAPACITY);
        Self { pool, snapshots }
    }

    /// Subscribe to the live "all entries" query. The receiver gets one
    /// snapshot per mutation, ordered by timestamp descending. A receiver
    /// that lags past the channel capacity should fall back to `list`.
    pub fn observe_all(&self) -> broadcast::Receiver<Vec<Entry>> {
        self.snapshots.subscribe()
    }

    /// All entries, newest save first. Ties on timestamp break by most
    /// recent insert first.
    pub async fn list(&self) -> Result<Vec<Entry>> {
        let entries = sqlx::query_as::<_, Entry>(
            r#"
            SELECT * FROM diary_entries
            ORDER BY timestamp DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Get an entry by id. A miss is silent.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Entry>> {
        let entry = sqlx::query_as::<_, Entry>(
            r#"
            SELECT * FROM diary_entries WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entry)
    }

    /// Insert an entry and return the assigned id.
    ///
    /// An unsaved entry (id 0) binds NULL so SQLite assigns a fresh id. A
    /// caller-provided id that already exists replaces the old row rather
    /// than duplicating it.
    pub async fn insert(&self, entry: &Entry) -> Result<i64> {
        let id = if entry.is_unsaved() {
            None
        } else {
            Some(entry.id)
        };

        let assigned: i64 = sqlx::query_scalar(
            r#"
            INSERT OR REPLACE INTO diary_entries
                (id, title, content, location, photo_uri, audio_uri, timestamp)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(&entry.title)
        .bind(&entry.content)
        .bind(&entry.location)
        .bind(&entry.photo_uri)
        .bind(&entry.audio_uri)
        .bind(entry.timestamp)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Inserted entry: {}", assigned);
        self.publish_snapshot().await;
        Ok(assigned)
    }

    /// Update an existing entry in place. Returns false (and writes nothing)
    /// when the id does not exist; the id itself never changes.
    pub async fn update(&self, entry: &Entry) -> Result<bool> {
        let rows = sqlx::query(
            r#"
            UPDATE diary_entries
            SET title = ?, content = ?, location = ?, photo_uri = ?,
                audio_uri = ?, timestamp = ?
            WHERE id = ?
            "#,
        )
        .bind(&entry.title)
        .bind(&entry.content)
        .bind(&entry.location)
        .bind(&entry.photo_uri)
        .bind(&entry.audio_uri)
        .bind(entry.timestamp)
        .bind(entry.id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if rows == 0 {
            tracing::warn!("Update targeted missing entry: {}", entry.id);
            return Ok(false);
        }

        tracing::debug!("Updated entry: {}", entry.id);
        self.publish_snapshot().await;
        Ok(true)
    }

    /// Delete an entry by identity (its id). Returns false if absent.
    pub async fn delete(&self, entry: &Entry) -> Result<bool> {
        let rows = sqlx::query("DELETE FROM diary_entries WHERE id = ?")
            .bind(entry.id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows == 0 {
            return Ok(false);
        }

        tracing::debug!("Deleted entry: {}", entry.id);
        self.publish_snapshot().await;
        Ok(true)
    }

    /// Push one ordered snapshot to all subscribers. A publish failure only
    /// means nobody is listening.
    async fn publish_snapshot(&self) {
        match self.list().await {
            Ok(entries) => {
                let _ = self.snapshots.send(entries);
            }
            Err(e) => {
                tracing::warn!("Failed to build entry snapshot: {}", e);
            }
        }
    }
}
