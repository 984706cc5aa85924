//! Entry list view-state
//!
//! Projects the store's live query into a display list and forwards
//! deletes. All ordering is the store's; there is no local filtering,
//! sorting, or pagination.

use crate::database::{Entry, EntryRepository};
use crate::error::Result;
use tokio::sync::broadcast;

pub struct EntryListViewState {
    repository: EntryRepository,
    snapshots: broadcast::Receiver<Vec<Entry>>,
    entries: Vec<Entry>,
}

impl EntryListViewState {
    /// Subscribe to the live query and seed the list with the current
    /// snapshot.
    pub async fn new(repository: EntryRepository) -> Result<Self> {
        let snapshots = repository.observe_all();
        let entries = repository.list().await?;
        Ok(Self {
            repository,
            snapshots,
            entries,
        })
    }

    /// The most recently received snapshot, newest entry first.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Wait for the next store mutation and adopt its snapshot. A receiver
    /// that lagged past the channel capacity re-lists from the store
    /// instead of replaying missed snapshots.
    pub async fn next_snapshot(&mut self) -> Result<&[Entry]> {
        match self.snapshots.recv().await {
            Ok(snapshot) => {
                self.entries = snapshot;
            }
            Err(broadcast::error::RecvError::Lagged(missed)) => {
                tracing::warn!("Entry list lagged {} snapshots, re-listing", missed);
                self.entries = self.repository.list().await?;
            }
            Err(broadcast::error::RecvError::Closed) => {
                tracing::debug!("Entry store closed, keeping last snapshot");
            }
        }
        Ok(&self.entries)
    }

    /// Delete an entry. The resulting snapshot arrives through
    /// `next_snapshot` like any other mutation.
    pub async fn delete(&mut self, entry: &Entry) -> Result<()> {
        self.repository.delete(entry).await?;
        Ok(())
    }
}
