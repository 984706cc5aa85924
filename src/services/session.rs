//! Entry detail session
//!
//! The transient editable draft backing one entry-editing screen
//! activation: draft copies of every entry field, the recording/playback/
//! location-fetch flags, and field-level validation errors. Discarded
//! drafts are never persisted; closing the screen drops the session, which
//! stops any playback still running.

use crate::config;
use crate::database::{Entry, EntryRepository, UNSAVED_ENTRY_ID};
use crate::error::{AppError, Result};
use crate::media::{CanvasTransform, Collaborators, PlaybackHandle, Stroke};
use chrono::Utc;

/// Result of a validate-and-save pass. `Invalid` means field errors were
/// set and nothing was written; database failures surface as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(i64),
    Invalid,
}

pub struct EntryDetailSession {
    repository: EntryRepository,
    collaborators: Collaborators,

    entry_id: Option<i64>,
    pub title: String,
    pub content: String,
    location: Option<String>,
    photo_uri: Option<String>,
    audio_uri: Option<String>,

    is_recording: bool,
    is_location_loading: bool,

    title_error: Option<String>,
    content_error: Option<String>,

    playback: Option<Box<dyn PlaybackHandle>>,
}

impl EntryDetailSession {
    /// Open a session, loading the draft from an existing entry when an id
    /// is given. A lookup miss opens a blank create-mode draft instead.
    pub async fn open(
        repository: EntryRepository,
        collaborators: Collaborators,
        entry_id: Option<i64>,
    ) -> Result<Self> {
        let mut session = Self {
            repository,
            collaborators,
            entry_id: None,
            title: String::new(),
            content: String::new(),
            location: None,
            photo_uri: None,
            audio_uri: None,
            is_recording: false,
            is_location_loading: false,
            title_error: None,
            content_error: None,
            playback: None,
        };

        if let Some(id) = entry_id {
            if id != UNSAVED_ENTRY_ID {
                match session.repository.get_by_id(id).await? {
                    Some(entry) => {
                        session.entry_id = Some(entry.id);
                        session.title = entry.title;
                        session.content = entry.content;
                        session.location = entry.location;
                        session.photo_uri = entry.photo_uri;
                        session.audio_uri = entry.audio_uri;
                    }
                    None => {
                        tracing::debug!("Entry {} not found, opening blank draft", id);
                    }
                }
            }
        }

        Ok(session)
    }

    pub fn entry_id(&self) -> Option<i64> {
        self.entry_id
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn photo_uri(&self) -> Option<&str> {
        self.photo_uri.as_deref()
    }

    pub fn audio_uri(&self) -> Option<&str> {
        self.audio_uri.as_deref()
    }

    pub fn is_recording(&self) -> bool {
        self.is_recording
    }

    pub fn is_location_loading(&self) -> bool {
        self.is_location_loading
    }

    /// Derived from the playback handle so the flag clears on its own when
    /// a track finishes naturally, not only on an explicit stop.
    pub fn is_playing_audio(&self) -> bool {
        self.playback
            .as_ref()
            .is_some_and(|handle| handle.is_playing())
    }

    pub fn title_error(&self) -> Option<&str> {
        self.title_error.as_deref()
    }

    pub fn content_error(&self) -> Option<&str> {
        self.content_error.as_deref()
    }

    pub fn clear_errors(&mut self) {
        self.title_error = None;
        self.content_error = None;
    }

    /// Validate the draft and persist it. Blank or whitespace-only title or
    /// content sets the matching field error and writes nothing. A valid
    /// draft gets a fresh timestamp and is inserted (create mode) or
    /// updated in place; a successful insert records the assigned id so a
    /// later save updates instead of duplicating.
    pub async fn save_entry(&mut self) -> Result<SaveOutcome> {
        self.clear_errors();

        if self.title.trim().is_empty() {
            self.title_error = Some(config::TITLE_REQUIRED_MESSAGE.to_string());
        }
        if self.content.trim().is_empty() {
            self.content_error = Some(config::CONTENT_REQUIRED_MESSAGE.to_string());
        }
        if self.title_error.is_some() || self.content_error.is_some() {
            return Ok(SaveOutcome::Invalid);
        }

        let entry = Entry {
            id: self.entry_id.unwrap_or(UNSAVED_ENTRY_ID),
            title: self.title.clone(),
            content: self.content.clone(),
            location: self.location.clone(),
            photo_uri: self.photo_uri.clone(),
            audio_uri: self.audio_uri.clone(),
            timestamp: Utc::now().timestamp_millis(),
        };

        match self.entry_id {
            Some(id) if id != UNSAVED_ENTRY_ID => {
                self.repository.update(&entry).await?;
                Ok(SaveOutcome::Saved(id))
            }
            _ => {
                let id = self.repository.insert(&entry).await?;
                self.entry_id = Some(id);
                Ok(SaveOutcome::Saved(id))
            }
        }
    }

    // ===== Photo lifecycle =====

    pub fn set_photo_uri(&mut self, uri: Option<String>) {
        self.photo_uri = uri;
    }

    /// Stale photo files are never cleaned up, only the reference is
    /// dropped.
    pub fn delete_photo(&mut self) {
        self.photo_uri = None;
    }

    /// Drive the camera collaborator and store the captured reference.
    pub async fn capture_photo(&mut self) -> Result<()> {
        let uri = self.collaborators.camera.capture_photo().await?;
        self.photo_uri = Some(uri);
        Ok(())
    }

    /// Composite freehand strokes onto the current photo and replace the
    /// stored reference with the annotated copy. Without a photo this does
    /// nothing.
    pub async fn annotate_photo(
        &mut self,
        strokes: &[Stroke],
        transform: &CanvasTransform,
    ) -> Result<()> {
        let Some(uri) = self.photo_uri.clone() else {
            tracing::debug!("Annotation requested without a photo");
            return Ok(());
        };

        let annotated = self
            .collaborators
            .annotator
            .compose(&uri, strokes, transform)
            .await?;
        self.photo_uri = Some(annotated);
        Ok(())
    }

    // ===== Audio lifecycle =====

    /// Start recording an audio note. Stores the output path immediately so
    /// the draft references the file even if the user saves mid-recording.
    pub async fn start_recording(&mut self) -> Result<()> {
        if !self.collaborators.recorder.has_permission() {
            return Err(AppError::PermissionDenied("microphone"));
        }

        let path = self.collaborators.recorder.start_recording().await?;
        self.audio_uri = Some(path);
        self.is_recording = true;
        Ok(())
    }

    /// Stop and finalize the active recording. Collaborator failures only
    /// get logged; the flag clears regardless.
    pub async fn stop_recording(&mut self) {
        if let Err(e) = self.collaborators.recorder.stop_recording().await {
            tracing::warn!("Failed to finalize recording: {}", e);
        }
        self.is_recording = false;
    }

    /// Start or resume playback of the recorded audio note. Only one
    /// playback handle exists at a time; calling this while a paused handle
    /// is held resumes it rather than restarting from the top. Any failure
    /// tears the handle down.
    pub async fn play_audio(&mut self) -> Result<()> {
        let Some(uri) = self.audio_uri.clone() else {
            return Ok(());
        };

        if let Some(mut handle) = self.playback.take() {
            if handle.is_playing() {
                self.playback = Some(handle);
            } else if let Err(e) = handle.start() {
                handle.stop();
                return Err(e);
            } else {
                self.playback = Some(handle);
            }
            return Ok(());
        }

        let mut handle = match self.collaborators.player.open(&uri).await {
            Ok(handle) => handle,
            Err(e) => {
                self.stop_audio();
                return Err(e);
            }
        };
        if let Err(e) = handle.start() {
            handle.stop();
            return Err(e);
        }

        self.playback = Some(handle);
        Ok(())
    }

    /// Stop playback and release the handle. Safe to call with no playback
    /// active.
    pub fn stop_audio(&mut self) {
        if let Some(mut handle) = self.playback.take() {
            handle.stop();
        }
    }

    /// Stop any playback, then drop the audio reference. The recorded file
    /// itself is never cleaned up.
    pub fn delete_audio(&mut self) {
        self.stop_audio();
        self.audio_uri = None;
    }

    // ===== Location lifecycle =====

    /// Request one location fix and resolve it to a place name. Any
    /// failure or timeout along the way stores None; the loading flag
    /// clears on every path. Concurrent fetches are not deduplicated.
    pub async fn fetch_current_location(&mut self) -> Result<()> {
        if !self.collaborators.locator.has_permission() {
            self.location = None;
            return Err(AppError::PermissionDenied("location"));
        }

        self.is_location_loading = true;
        let resolved = resolve_place(&self.collaborators).await;
        self.location = resolved;
        self.is_location_loading = false;
        Ok(())
    }
}

async fn resolve_place(collaborators: &Collaborators) -> Option<String> {
    let fix = match collaborators.locator.current_location().await {
        Ok(Some(fix)) => fix,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!("Location fix failed: {}", e);
            return None;
        }
    };

    match collaborators.locator.reverse_geocode(&fix).await {
        Ok(place) => place,
        Err(e) => {
            tracing::warn!("Reverse geocoding failed: {}", e);
            None
        }
    }
}

impl Drop for EntryDetailSession {
    /// Closing the editing screen tears down playback. In-flight saves,
    /// recordings and location fetches already dispatched to their
    /// collaborators complete independently.
    fn drop(&mut self) {
        self.stop_audio();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{initialize_database, EntryStore};
    use crate::media::{
        AudioPlayer, AudioRecorder, CameraCapture, ImageAnnotator, LocationFix, LocationResolver,
    };
    use async_trait::async_trait;
    use sqlx::sqlite::SqlitePoolOptions;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;

    struct TestRecorder {
        permission: bool,
    }

    #[async_trait]
    impl AudioRecorder for TestRecorder {
        fn has_permission(&self) -> bool {
            self.permission
        }

        async fn start_recording(&self) -> crate::error::Result<String> {
            Ok("file:///cache/audio_1.m4a".to_string())
        }

        async fn stop_recording(&self) -> crate::error::Result<()> {
            Ok(())
        }
    }

    /// Shared counters so tests can observe handle lifecycles after the
    /// session has consumed the boxed handle.
    #[derive(Default)]
    struct PlayerProbe {
        opens: AtomicUsize,
        starts: AtomicUsize,
        stops: AtomicUsize,
        playing: AtomicBool,
    }

    struct TestPlayer {
        probe: Arc<PlayerProbe>,
        fail_open: bool,
    }

    #[async_trait]
    impl AudioPlayer for TestPlayer {
        async fn open(&self, _uri: &str) -> crate::error::Result<Box<dyn PlaybackHandle>> {
            if self.fail_open {
                return Err(AppError::Media("cannot prepare data source".to_string()));
            }
            self.probe.opens.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(TestHandle {
                probe: self.probe.clone(),
            }))
        }
    }

    struct TestHandle {
        probe: Arc<PlayerProbe>,
    }

    impl PlaybackHandle for TestHandle {
        fn start(&mut self) -> crate::error::Result<()> {
            self.probe.starts.fetch_add(1, Ordering::SeqCst);
            self.probe.playing.store(true, Ordering::SeqCst);
            Ok(())
        }

        fn is_playing(&self) -> bool {
            self.probe.playing.load(Ordering::SeqCst)
        }

        fn stop(&mut self) {
            self.probe.stops.fetch_add(1, Ordering::SeqCst);
            self.probe.playing.store(false, Ordering::SeqCst);
        }
    }

    struct TestCamera;

    #[async_trait]
    impl CameraCapture for TestCamera {
        async fn capture_photo(&self) -> crate::error::Result<String> {
            Ok("file:///photos/capture_1.jpg".to_string())
        }
    }

    struct TestAnnotator;

    #[async_trait]
    impl ImageAnnotator for TestAnnotator {
        async fn compose(
            &self,
            photo_uri: &str,
            _strokes: &[Stroke],
            _transform: &CanvasTransform,
        ) -> crate::error::Result<String> {
            Ok(format!("{}.annotated", photo_uri))
        }
    }

    struct TestLocator {
        permission: bool,
        fix: Option<LocationFix>,
        place: Option<String>,
        fail_fix: bool,
    }

    #[async_trait]
    impl LocationResolver for TestLocator {
        fn has_permission(&self) -> bool {
            self.permission
        }

        async fn current_location(&self) -> crate::error::Result<Option<LocationFix>> {
            if self.fail_fix {
                return Err(AppError::LocationUnavailable("fix timed out".to_string()));
            }
            Ok(self.fix)
        }

        async fn reverse_geocode(
            &self,
            _fix: &LocationFix,
        ) -> crate::error::Result<Option<String>> {
            Ok(self.place.clone())
        }
    }

    fn test_collaborators(probe: Arc<PlayerProbe>) -> Collaborators {
        Collaborators {
            recorder: Arc::new(TestRecorder { permission: true }),
            player: Arc::new(TestPlayer {
                probe,
                fail_open: false,
            }),
            camera: Arc::new(TestCamera),
            annotator: Arc::new(TestAnnotator),
            locator: Arc::new(TestLocator {
                permission: true,
                fix: Some(LocationFix {
                    latitude: 52.23,
                    longitude: 21.01,
                }),
                place: Some("Warsaw".to_string()),
                fail_fix: false,
            }),
        }
    }

    async fn create_test_repository() -> EntryRepository {
        let pool = SqlitePoolOptions::new()
            .connect("sqlite::memory:")
            .await
            .unwrap();
        initialize_database(&pool).await.unwrap();
        EntryRepository::new(EntryStore::new(pool))
    }

    async fn open_blank_session() -> EntryDetailSession {
        let repo = create_test_repository().await;
        let collaborators = test_collaborators(Arc::new(PlayerProbe::default()));
        EntryDetailSession::open(repo, collaborators, None)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_save_valid_draft_inserts_row() {
        let repo = create_test_repository().await;
        let collaborators = test_collaborators(Arc::new(PlayerProbe::default()));
        let mut session = EntryDetailSession::open(repo.clone(), collaborators, None)
            .await
            .unwrap();

        session.title = "Trip".to_string();
        session.content = "Nice day".to_string();

        let outcome = session.save_entry().await.unwrap();
        let SaveOutcome::Saved(id) = outcome else {
            panic!("expected a saved entry");
        };

        let entries = repo.list().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, id);
        assert_eq!(entries[0].title, "Trip");
        assert_eq!(entries[0].content, "Nice day");
        assert_eq!(entries[0].location, None);
        assert!(entries[0].timestamp > 0);
    }

    #[tokio::test]
    async fn test_save_blank_title_sets_field_error_and_writes_nothing() {
        let repo = create_test_repository().await;
        let collaborators = test_collaborators(Arc::new(PlayerProbe::default()));
        let mut session = EntryDetailSession::open(repo.clone(), collaborators, None)
            .await
            .unwrap();

        session.title = "   ".to_string();
        session.content = "Something".to_string();

        assert_eq!(session.save_entry().await.unwrap(), SaveOutcome::Invalid);
        assert_eq!(session.title_error(), Some(config::TITLE_REQUIRED_MESSAGE));
        assert_eq!(session.content_error(), None);
        assert!(repo.list().await.unwrap().is_empty());

        session.clear_errors();
        assert_eq!(session.title_error(), None);
    }

    #[tokio::test]
    async fn test_save_blank_content_sets_field_error() {
        let mut session = open_blank_session().await;

        session.title = "Trip".to_string();

        assert_eq!(session.save_entry().await.unwrap(), SaveOutcome::Invalid);
        assert_eq!(
            session.content_error(),
            Some(config::CONTENT_REQUIRED_MESSAGE)
        );
    }

    #[tokio::test]
    async fn test_second_save_updates_instead_of_duplicating() {
        let repo = create_test_repository().await;
        let collaborators = test_collaborators(Arc::new(PlayerProbe::default()));
        let mut session = EntryDetailSession::open(repo.clone(), collaborators, None)
            .await
            .unwrap();

        session.title = "Trip".to_string();
        session.content = "Nice day".to_string();
        let SaveOutcome::Saved(first_id) = session.save_entry().await.unwrap() else {
            panic!("expected a saved entry");
        };

        session.title = "Trip, revised".to_string();
        let SaveOutcome::Saved(second_id) = session.save_entry().await.unwrap() else {
            panic!("expected a saved entry");
        };

        assert_eq!(first_id, second_id);
        let entries = repo.list().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Trip, revised");
    }

    #[tokio::test]
    async fn test_open_existing_entry_populates_draft() {
        let repo = create_test_repository().await;

        let id = repo
            .insert(&Entry {
                id: UNSAVED_ENTRY_ID,
                title: "Existing".to_string(),
                content: "Body".to_string(),
                location: Some("Warsaw".to_string()),
                photo_uri: Some("file:///p.jpg".to_string()),
                audio_uri: None,
                timestamp: 1_000,
            })
            .await
            .unwrap();

        let collaborators = test_collaborators(Arc::new(PlayerProbe::default()));
        let session = EntryDetailSession::open(repo, collaborators, Some(id))
            .await
            .unwrap();

        assert_eq!(session.entry_id(), Some(id));
        assert_eq!(session.title, "Existing");
        assert_eq!(session.content, "Body");
        assert_eq!(session.location(), Some("Warsaw"));
        assert_eq!(session.photo_uri(), Some("file:///p.jpg"));
        assert_eq!(session.audio_uri(), None);
    }

    #[tokio::test]
    async fn test_open_missing_entry_leaves_blank_create_draft() {
        let repo = create_test_repository().await;
        let collaborators = test_collaborators(Arc::new(PlayerProbe::default()));

        let mut session = EntryDetailSession::open(repo.clone(), collaborators, Some(404))
            .await
            .unwrap();

        assert_eq!(session.entry_id(), None);
        assert!(session.title.is_empty());

        // Saving the blank-opened draft creates a new entry rather than
        // silently targeting the missing id.
        session.title = "Fresh".to_string();
        session.content = "Start".to_string();
        session.save_entry().await.unwrap();
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_recording_lifecycle() {
        let mut session = open_blank_session().await;

        session.start_recording().await.unwrap();
        assert!(session.is_recording());
        assert_eq!(session.audio_uri(), Some("file:///cache/audio_1.m4a"));

        session.stop_recording().await;
        assert!(!session.is_recording());
        assert_eq!(session.audio_uri(), Some("file:///cache/audio_1.m4a"));
    }

    #[tokio::test]
    async fn test_recording_without_permission_fails() {
        let repo = create_test_repository().await;
        let mut collaborators = test_collaborators(Arc::new(PlayerProbe::default()));
        collaborators.recorder = Arc::new(TestRecorder { permission: false });

        let mut session = EntryDetailSession::open(repo, collaborators, None)
            .await
            .unwrap();

        let result = session.start_recording().await;
        assert!(matches!(result, Err(AppError::PermissionDenied(_))));
        assert!(!session.is_recording());
        assert_eq!(session.audio_uri(), None);
    }

    #[tokio::test]
    async fn test_play_resumes_rather_than_restarts() {
        let repo = create_test_repository().await;
        let probe = Arc::new(PlayerProbe::default());
        let collaborators = test_collaborators(probe.clone());
        let mut session = EntryDetailSession::open(repo, collaborators, None)
            .await
            .unwrap();

        session.start_recording().await.unwrap();
        session.stop_recording().await;

        session.play_audio().await.unwrap();
        assert!(session.is_playing_audio());
        assert_eq!(probe.opens.load(Ordering::SeqCst), 1);
        assert_eq!(probe.starts.load(Ordering::SeqCst), 1);

        // Already playing: another call leaves the handle alone.
        session.play_audio().await.unwrap();
        assert_eq!(probe.starts.load(Ordering::SeqCst), 1);

        // Playback paused underneath (track finished a segment): the same
        // handle is restarted, no second open.
        probe.playing.store(false, Ordering::SeqCst);
        session.play_audio().await.unwrap();
        assert_eq!(probe.opens.load(Ordering::SeqCst), 1);
        assert_eq!(probe.starts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_playing_flag_clears_when_track_finishes() {
        let repo = create_test_repository().await;
        let probe = Arc::new(PlayerProbe::default());
        let collaborators = test_collaborators(probe.clone());
        let mut session = EntryDetailSession::open(repo, collaborators, None)
            .await
            .unwrap();

        session.start_recording().await.unwrap();
        session.stop_recording().await;
        session.play_audio().await.unwrap();
        assert!(session.is_playing_audio());

        // The track runs out on its own, with no explicit stop call.
        probe.playing.store(false, Ordering::SeqCst);
        assert!(!session.is_playing_audio());

        // The held handle can still resume from where it left off.
        session.play_audio().await.unwrap();
        assert!(session.is_playing_audio());
        assert_eq!(probe.opens.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_playback_failure_tears_down_handle() {
        let repo = create_test_repository().await;
        let probe = Arc::new(PlayerProbe::default());
        let mut collaborators = test_collaborators(probe.clone());
        collaborators.player = Arc::new(TestPlayer {
            probe: probe.clone(),
            fail_open: true,
        });

        let mut session = EntryDetailSession::open(repo, collaborators, None)
            .await
            .unwrap();
        session.start_recording().await.unwrap();
        session.stop_recording().await;

        let result = session.play_audio().await;
        assert!(matches!(result, Err(AppError::Media(_))));
        assert!(!session.is_playing_audio());
    }

    #[tokio::test]
    async fn test_play_without_audio_is_noop() {
        let mut session = open_blank_session().await;

        session.play_audio().await.unwrap();
        assert!(!session.is_playing_audio());
    }

    #[tokio::test]
    async fn test_delete_audio_stops_playback_and_clears_reference() {
        let repo = create_test_repository().await;
        let probe = Arc::new(PlayerProbe::default());
        let collaborators = test_collaborators(probe.clone());
        let mut session = EntryDetailSession::open(repo, collaborators, None)
            .await
            .unwrap();

        session.start_recording().await.unwrap();
        session.stop_recording().await;
        session.play_audio().await.unwrap();

        session.delete_audio();
        assert!(!session.is_playing_audio());
        assert_eq!(session.audio_uri(), None);
        assert_eq!(probe.stops.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_drop_stops_playback() {
        let repo = create_test_repository().await;
        let probe = Arc::new(PlayerProbe::default());
        let collaborators = test_collaborators(probe.clone());

        {
            let mut session = EntryDetailSession::open(repo, collaborators, None)
                .await
                .unwrap();
            session.start_recording().await.unwrap();
            session.stop_recording().await;
            session.play_audio().await.unwrap();
        }

        assert_eq!(probe.stops.load(Ordering::SeqCst), 1);
        assert!(!probe.playing.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_photo_lifecycle() {
        let mut session = open_blank_session().await;

        session.capture_photo().await.unwrap();
        assert_eq!(session.photo_uri(), Some("file:///photos/capture_1.jpg"));

        let strokes = [Stroke {
            points: vec![(0.0, 0.0), (10.0, 10.0)],
            color: 0xFF00_0000,
            width: 4.0,
        }];
        let transform = CanvasTransform {
            scale: 0.5,
            offset_x: 12.0,
            offset_y: 30.0,
        };
        session.annotate_photo(&strokes, &transform).await.unwrap();
        assert_eq!(
            session.photo_uri(),
            Some("file:///photos/capture_1.jpg.annotated")
        );

        session.delete_photo();
        assert_eq!(session.photo_uri(), None);

        // Annotating without a photo does nothing.
        session.annotate_photo(&strokes, &transform).await.unwrap();
        assert_eq!(session.photo_uri(), None);
    }

    #[tokio::test]
    async fn test_fetch_location_stores_place_name() {
        let mut session = open_blank_session().await;

        session.fetch_current_location().await.unwrap();
        assert_eq!(session.location(), Some("Warsaw"));
        assert!(!session.is_location_loading());
    }

    #[tokio::test]
    async fn test_fetch_location_without_permission() {
        let repo = create_test_repository().await;
        let mut collaborators = test_collaborators(Arc::new(PlayerProbe::default()));
        collaborators.locator = Arc::new(TestLocator {
            permission: false,
            fix: None,
            place: None,
            fail_fix: false,
        });

        let mut session = EntryDetailSession::open(repo, collaborators, None)
            .await
            .unwrap();

        let result = session.fetch_current_location().await;
        assert!(matches!(result, Err(AppError::PermissionDenied(_))));
        assert_eq!(session.location(), None);
        assert!(!session.is_location_loading());
    }

    #[tokio::test]
    async fn test_fetch_location_failure_stores_none() {
        let repo = create_test_repository().await;
        let mut collaborators = test_collaborators(Arc::new(PlayerProbe::default()));
        collaborators.locator = Arc::new(TestLocator {
            permission: true,
            fix: None,
            place: None,
            fail_fix: true,
        });

        let mut session = EntryDetailSession::open(repo, collaborators, None)
            .await
            .unwrap();

        session.fetch_current_location().await.unwrap();
        assert_eq!(session.location(), None);
        assert!(!session.is_location_loading());
    }

    #[tokio::test]
    async fn test_fetch_location_empty_fix_stores_none() {
        let repo = create_test_repository().await;
        let mut collaborators = test_collaborators(Arc::new(PlayerProbe::default()));
        collaborators.locator = Arc::new(TestLocator {
            permission: true,
            fix: None,
            place: None,
            fail_fix: false,
        });

        let mut session = EntryDetailSession::open(repo, collaborators, None)
            .await
            .unwrap();

        session.fetch_current_location().await.unwrap();
        assert_eq!(session.location(), None);
    }
}
