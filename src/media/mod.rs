//! Media capture collaborators
//!
//! Trait boundaries for the platform capabilities the diary core depends on
//! but does not implement: audio capture and playback, camera capture, image
//! annotation, and location resolution. Host applications provide the
//! implementations; the entry detail session drives them and stores whatever
//! they return verbatim.

pub mod recorder;

pub use recorder::FsAudioRecorder;

use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Records at most one audio note at a time, process-wide. The permission
/// check belongs to the implementation, not to callers.
#[async_trait]
pub trait AudioRecorder: Send + Sync {
    /// Whether the host has granted microphone access.
    fn has_permission(&self) -> bool;

    /// Start a new recording and return the output path it will be written
    /// to. Fails if a recording is already in progress.
    async fn start_recording(&self) -> Result<String>;

    /// Stop and finalize the active recording, if any.
    async fn stop_recording(&self) -> Result<()>;
}

/// A single playback handle. At most one exists per editing session;
/// stopping releases the underlying resources.
pub trait PlaybackHandle: Send {
    /// Start or resume playback.
    fn start(&mut self) -> Result<()>;

    fn is_playing(&self) -> bool;

    /// Stop playback and release the handle's resources. Idempotent.
    fn stop(&mut self);
}

/// Opens playback handles for recorded audio notes.
#[async_trait]
pub trait AudioPlayer: Send + Sync {
    /// Prepare a handle for the given audio reference. Does not start it.
    async fn open(&self, uri: &str) -> Result<Box<dyn PlaybackHandle>>;
}

/// Produces a file reference on successful capture or a `Media` failure.
#[async_trait]
pub trait CameraCapture: Send + Sync {
    async fn capture_photo(&self) -> Result<String>;
}

/// One freehand stroke drawn over a photo.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    /// Canvas-space points in draw order
    pub points: Vec<(f32, f32)>,
    /// Packed ARGB color
    pub color: u32,
    /// Stroke width in canvas pixels
    pub width: f32,
}

/// The on-screen transform used to fit the image to the canvas. The
/// annotator inverts this to map strokes back to image resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasTransform {
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

/// Composites freehand strokes onto the original-resolution image and
/// returns a new image reference. The source image is left untouched.
#[async_trait]
pub trait ImageAnnotator: Send + Sync {
    async fn compose(
        &self,
        photo_uri: &str,
        strokes: &[Stroke],
        transform: &CanvasTransform,
    ) -> Result<String>;
}

/// A raw location fix from the platform location service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationFix {
    pub latitude: f64,
    pub longitude: f64,
}

/// Single-shot location fix plus reverse geocoding. The permission check
/// belongs to the implementation.
#[async_trait]
pub trait LocationResolver: Send + Sync {
    /// Whether the host has granted location access.
    fn has_permission(&self) -> bool;

    /// Request exactly one location fix. Resolves with None when the
    /// platform reports no position; may fail with `LocationUnavailable`.
    async fn current_location(&self) -> Result<Option<LocationFix>>;

    /// Resolve a fix to a place name (city). None when geocoding finds
    /// nothing.
    async fn reverse_geocode(&self, fix: &LocationFix) -> Result<Option<String>>;
}

/// The bundle of collaborator handles injected at startup and shared by
/// every editing session.
#[derive(Clone)]
pub struct Collaborators {
    pub recorder: Arc<dyn AudioRecorder>,
    pub player: Arc<dyn AudioPlayer>,
    pub camera: Arc<dyn CameraCapture>,
    pub annotator: Arc<dyn ImageAnnotator>,
    pub locator: Arc<dyn LocationResolver>,
}
