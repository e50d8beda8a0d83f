//! Live interview recording.
//!
//! The microphone itself lives with the client; this module owns the session
//! around it: device lease, chunk buffering, elapsed time, assembly of the
//! finished audio and the playback handle that exposes it.

use bytes::{Bytes, BytesMut};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::services::capture_service::MAX_MEDIA_BYTES;

/// Container/codec tag of every assembled recording.
pub const RECORDING_MIME_TYPE: &str = "audio/webm";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CaptureError {
    #[error("Audio recording is not supported on this device. Please upload a file instead.")]
    Unsupported,
    #[error("Microphone permission was denied. Allow microphone access in the browser prompt or system settings.")]
    PermissionDenied,
    #[error("No microphone was found. Make sure a microphone is connected.")]
    DeviceNotFound,
    #[error("The microphone is in use by another application or failed to start.")]
    DeviceBusy,
    #[error("{0}")]
    Other(String),
}

impl CaptureError {
    /// Maps a media-device failure reported by the client (DOMException name
    /// plus message) onto the capture taxonomy.
    pub fn from_platform(name: &str, message: &str) -> Self {
        match name {
            "NotFoundError" | "DevicesNotFoundError" => CaptureError::DeviceNotFound,
            _ if message.contains("Requested device not found") => CaptureError::DeviceNotFound,
            "NotAllowedError" | "PermissionDeniedError" | "SecurityError" => {
                CaptureError::PermissionDenied
            }
            "NotReadableError" | "TrackStartError" | "AbortError" => CaptureError::DeviceBusy,
            "NotSupportedError" | "UnsupportedError" => CaptureError::Unsupported,
            _ if !message.trim().is_empty() => CaptureError::Other(message.trim().to_string()),
            _ => CaptureError::Other("Failed to access the microphone.".to_string()),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            CaptureError::Unsupported => "capture_unsupported",
            CaptureError::PermissionDenied => "capture_permission_denied",
            CaptureError::DeviceNotFound => "capture_device_not_found",
            CaptureError::DeviceBusy => "capture_device_busy",
            CaptureError::Other(_) => "capture_failed",
        }
    }
}

/// A claimed recording device. Releasing stops every underlying track.
pub trait DeviceHandle: Send {
    fn release(&mut self);
}

pub trait CaptureDevice: Send + Sync {
    fn acquire(&self) -> std::result::Result<Box<dyn DeviceHandle>, CaptureError>;
}

/// Exclusive lease over the client's microphone.
#[derive(Clone, Debug, Default)]
pub struct ClientMicrophone {
    in_use: Arc<AtomicBool>,
}

impl ClientMicrophone {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_use(&self) -> bool {
        self.in_use.load(Ordering::SeqCst)
    }
}

impl CaptureDevice for ClientMicrophone {
    fn acquire(&self) -> std::result::Result<Box<dyn DeviceHandle>, CaptureError> {
        if self.in_use.swap(true, Ordering::SeqCst) {
            return Err(CaptureError::DeviceBusy);
        }
        Ok(Box::new(MicrophoneLease {
            in_use: Some(self.in_use.clone()),
        }))
    }
}

struct MicrophoneLease {
    in_use: Option<Arc<AtomicBool>>,
}

impl DeviceHandle for MicrophoneLease {
    fn release(&mut self) {
        if let Some(flag) = self.in_use.take() {
            flag.store(false, Ordering::SeqCst);
        }
    }
}

impl Drop for MicrophoneLease {
    fn drop(&mut self) {
        self.release();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordingState {
    Idle,
    Recording,
    Recorded,
}

#[derive(Debug, Clone)]
pub struct RecordedAudio {
    pub data: Bytes,
    pub mime_type: &'static str,
    pub elapsed_seconds: u64,
}

/// Opaque token under which a finished recording can be played back.
/// Replaced on every new recording, revoked on delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackHandle(pub Uuid);

pub struct Recorder {
    state: RecordingState,
    session: Option<Uuid>,
    chunks: Vec<Bytes>,
    elapsed_seconds: u64,
    device: Option<Box<dyn DeviceHandle>>,
    recorded: Option<RecordedAudio>,
    playback: Option<PlaybackHandle>,
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new()
    }
}

impl Recorder {
    pub fn new() -> Self {
        Self {
            state: RecordingState::Idle,
            session: None,
            chunks: Vec::new(),
            elapsed_seconds: 0,
            device: None,
            recorded: None,
            playback: None,
        }
    }

    pub fn state(&self) -> RecordingState {
        self.state
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn recorded(&self) -> Option<&RecordedAudio> {
        self.recorded.as_ref()
    }

    pub fn playback(&self) -> Option<PlaybackHandle> {
        self.playback
    }

    pub fn buffered_bytes(&self) -> usize {
        self.chunks.iter().map(Bytes::len).sum()
    }

    /// `Idle -> Recording`. Returns the id of the new session, which the
    /// timer uses to know when to stop ticking.
    pub fn start(&mut self, device: &dyn CaptureDevice) -> Result<Uuid> {
        match self.state {
            RecordingState::Idle => {}
            RecordingState::Recording => {
                return Err(Error::Conflict("A recording is already in progress".to_string()))
            }
            RecordingState::Recorded => {
                return Err(Error::Conflict(
                    "Delete the current recording before starting a new one".to_string(),
                ))
            }
        }

        let handle = device.acquire()?;
        let session = Uuid::new_v4();
        self.device = Some(handle);
        self.chunks.clear();
        self.elapsed_seconds = 0;
        self.session = Some(session);
        self.state = RecordingState::Recording;
        tracing::info!(%session, "Recording started");
        Ok(session)
    }

    /// Buffers one data chunk. Empty chunks are dropped. A chunk that would
    /// take the recording past the media ceiling is refused and the buffer
    /// is left as it was.
    pub fn push_chunk(&mut self, chunk: Bytes) -> Result<()> {
        if self.state != RecordingState::Recording {
            return Err(Error::Conflict("No recording is in progress".to_string()));
        }
        if self.buffered_bytes() + chunk.len() > MAX_MEDIA_BYTES {
            tracing::warn!(
                buffered = self.buffered_bytes(),
                chunk = chunk.len(),
                "Rejected chunk past the recording size limit"
            );
            return Err(Error::PayloadTooLarge(format!(
                "Recording is too large. Please keep it under {} MB.",
                MAX_MEDIA_BYTES / (1024 * 1024)
            )));
        }
        if !chunk.is_empty() {
            self.chunks.push(chunk);
        }
        Ok(())
    }

    /// Advances the elapsed counter by one second while recording.
    pub fn tick(&mut self) {
        if self.state == RecordingState::Recording {
            self.elapsed_seconds += 1;
        }
    }

    /// Ticks only if `session` is still the live one; returns whether it was.
    pub fn tick_session(&mut self, session: Uuid) -> bool {
        if self.state == RecordingState::Recording && self.session == Some(session) {
            self.tick();
            true
        } else {
            false
        }
    }

    /// `Recording -> Recorded`. A no-op in any other state.
    pub fn stop(&mut self) -> Option<&RecordedAudio> {
        if self.state != RecordingState::Recording {
            return None;
        }

        let mut buffer = BytesMut::with_capacity(self.buffered_bytes());
        for chunk in self.chunks.drain(..) {
            buffer.extend_from_slice(&chunk);
        }
        self.release_device();
        self.session = None;
        self.recorded = Some(RecordedAudio {
            data: buffer.freeze(),
            mime_type: RECORDING_MIME_TYPE,
            elapsed_seconds: self.elapsed_seconds,
        });
        self.playback = Some(PlaybackHandle(Uuid::new_v4()));
        self.state = RecordingState::Recorded;
        tracing::info!(
            elapsed_seconds = self.elapsed_seconds,
            bytes = self.recorded.as_ref().map(|r| r.data.len()).unwrap_or(0),
            "Recording stopped"
        );
        self.recorded.as_ref()
    }

    /// Back to `Idle` from any state, discarding audio and releasing the
    /// device and playback handle.
    pub fn delete(&mut self) {
        self.release_device();
        self.chunks.clear();
        self.recorded = None;
        self.playback = None;
        self.session = None;
        self.elapsed_seconds = 0;
        self.state = RecordingState::Idle;
    }

    fn release_device(&mut self) {
        if let Some(mut handle) = self.device.take() {
            handle.release();
        }
    }
}

impl Drop for Recorder {
    fn drop(&mut self) {
        self.release_device();
    }
}
