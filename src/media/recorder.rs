//! Filesystem-backed audio recorder
//!
//! Stands in for the platform capture API on hosts that hand the core a raw
//! audio stream: the recorder owns output file naming and the one-active-
//! recording guard, the host appends encoded audio to the returned path.

use super::AudioRecorder;
use crate::config;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::path::PathBuf;
use std::sync::Mutex;
use tokio::fs;

pub struct FsAudioRecorder {
    cache_dir: PathBuf,
    permission_granted: bool,
    active: Mutex<Option<PathBuf>>,
}

impl FsAudioRecorder {
    pub fn new(cache_dir: PathBuf, permission_granted: bool) -> Self {
        Self {
            cache_dir,
            permission_granted,
            active: Mutex::new(None),
        }
    }
}

#[async_trait]
impl AudioRecorder for FsAudioRecorder {
    fn has_permission(&self) -> bool {
        self.permission_granted
    }

    async fn start_recording(&self) -> Result<String> {
        if !self.permission_granted {
            return Err(AppError::PermissionDenied("microphone"));
        }

        let file_name = format!(
            "{}{}.{}",
            config::AUDIO_FILE_PREFIX,
            Utc::now().timestamp_millis(),
            config::AUDIO_FILE_EXT
        );
        let path = self.cache_dir.join(file_name);

        {
            let mut active = self.active.lock().unwrap();
            if active.is_some() {
                return Err(AppError::Media("recording already in progress".to_string()));
            }
            *active = Some(path.clone());
        }

        // A failed start must release the slot, otherwise one I/O error
        // would wedge the recorder for the rest of the process.
        let created = async {
            fs::create_dir_all(&self.cache_dir).await?;
            fs::write(&path, b"").await?;
            Ok(())
        }
        .await;

        if let Err(e) = created {
            self.active.lock().unwrap().take();
            return Err(e);
        }

        tracing::debug!("Recording started: {:?}", path);
        Ok(path.display().to_string())
    }

    async fn stop_recording(&self) -> Result<()> {
        let finished = self.active.lock().unwrap().take();
        if let Some(path) = finished {
            tracing::debug!("Recording finalized: {:?}", path);
        }
        Ok(())
    }
}
