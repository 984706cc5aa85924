//! Application state and initialization
//!
//! Wires the diary core together once at startup: one store per process,
//! injected into every consumer by reference, no ambient/static access.

use crate::config;
use crate::database::{self, EntryRepository, EntryStore};
use crate::error::Result;
use crate::media::Collaborators;
use crate::preferences::PreferenceStore;
use crate::services::{AuthGate, EntryDetailSession, EntryListViewState};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Central application state holding the store, preference file and the
/// collaborator bundle provided by the host.
pub struct DiaryApp {
    data_dir: PathBuf,
    repository: EntryRepository,
    preferences: PreferenceStore,
    auth: AuthGate,
    collaborators: Collaborators,
}

impl DiaryApp {
    /// Initialize the diary core under the given data directory: create
    /// directories, open and migrate the database, and activate the
    /// authentication gate (which lands in SetupRequired on first run).
    pub async fn init(data_dir: PathBuf, collaborators: Collaborators) -> Result<Self> {
        tracing::info!("Initializing diary core at {:?}", data_dir);

        std::fs::create_dir_all(&data_dir)?;
        std::fs::create_dir_all(data_dir.join(config::AUDIO_CACHE_DIR))?;

        let pool = database::create_pool(&data_dir.join(config::DB_FILE_NAME)).await?;
        let repository = EntryRepository::new(EntryStore::new(pool));

        let preferences = PreferenceStore::new(data_dir.join(config::PREFERENCES_FILE_NAME));
        let mut auth = AuthGate::new(preferences.clone());
        auth.activate().await?;

        tracing::info!("Diary core initialized");

        Ok(Self {
            data_dir,
            repository,
            preferences,
            auth,
            collaborators,
        })
    }

    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }

    /// Directory recorded audio notes are written into.
    pub fn audio_cache_dir(&self) -> PathBuf {
        self.data_dir.join(config::AUDIO_CACHE_DIR)
    }

    pub fn repository(&self) -> EntryRepository {
        self.repository.clone()
    }

    pub fn preferences(&self) -> PreferenceStore {
        self.preferences.clone()
    }

    pub fn auth(&mut self) -> &mut AuthGate {
        &mut self.auth
    }

    /// Build the view-state backing the entry list screen.
    pub async fn entry_list(&self) -> Result<EntryListViewState> {
        EntryListViewState::new(self.repository.clone()).await
    }

    /// Open an editing session: None for a new entry, an id to edit an
    /// existing one.
    pub async fn open_entry(&self, entry_id: Option<i64>) -> Result<EntryDetailSession> {
        EntryDetailSession::open(
            self.repository.clone(),
            self.collaborators.clone(),
            entry_id,
        )
        .await
    }
}

/// Initialize logging for a host binary. Library consumers embedding the
/// core in their own subscriber setup skip this.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "digital_diary=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
