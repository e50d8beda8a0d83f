//! Media capture workflow: picks the single interview media source (uploaded
//! file or live recording), the optional résumé, and turns them into
//! transport-encoded parts for the analysis request.

use bytes::Bytes;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::services::recording_service::{
    CaptureDevice, PlaybackHandle, RecordedAudio, Recorder, RecordingState,
};
use crate::utils::encoding::to_base64;
use crate::utils::time::format_elapsed;

pub const MAX_MEDIA_BYTES: usize = 20 * 1024 * 1024;
pub const MAX_CV_BYTES: usize = 5 * 1024 * 1024;

const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

#[derive(Debug, Clone)]
pub struct MediaPayload {
    pub file_name: Option<String>,
    pub mime_type: String,
    pub data: Bytes,
}

impl MediaPayload {
    pub fn new(file_name: Option<String>, mime_type: Option<String>, data: Bytes) -> Self {
        let mime_type = mime_type
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_MIME_TYPE.to_string());
        Self {
            file_name,
            mime_type,
            data,
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Base64 form of the payload. Fails when there is nothing to read.
    pub fn encode(&self) -> Result<EncodedMedia> {
        if self.data.is_empty() {
            return Err(Error::Encoding(format!(
                "{} is empty",
                self.file_name.as_deref().unwrap_or("media payload")
            )));
        }
        Ok(EncodedMedia {
            mime_type: self.mime_type.clone(),
            data: to_base64(&self.data),
        })
    }
}

impl From<&RecordedAudio> for MediaPayload {
    fn from(audio: &RecordedAudio) -> Self {
        Self {
            file_name: None,
            mime_type: audio.mime_type.to_string(),
            data: audio.data.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedMedia {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaSource {
    Upload,
    Recording,
}

/// Cheap clones of the selected payloads, taken under the workflow lock and
/// encoded after it is released.
#[derive(Debug, Clone)]
pub struct SubmissionSources {
    pub media: MediaPayload,
    pub source: MediaSource,
    pub cv: Option<MediaPayload>,
}

impl SubmissionSources {
    pub fn encode(&self) -> Result<PreparedMedia> {
        let media = self.media.encode()?;
        let cv = self.cv.as_ref().map(MediaPayload::encode).transpose()?;
        Ok(PreparedMedia {
            media,
            cv,
            cv_file_name: self.cv.as_ref().and_then(|c| c.file_name.clone()),
        })
    }
}

#[derive(Debug, Clone)]
pub struct PreparedMedia {
    pub media: EncodedMedia,
    pub cv: Option<EncodedMedia>,
    pub cv_file_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileSummary {
    pub file_name: Option<String>,
    pub mime_type: String,
    pub size: usize,
}

impl From<&MediaPayload> for FileSummary {
    fn from(p: &MediaPayload) -> Self {
        Self {
            file_name: p.file_name.clone(),
            mime_type: p.mime_type.clone(),
            size: p.size(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordingSummary {
    pub state: RecordingState,
    pub elapsed_seconds: u64,
    pub elapsed: String,
    pub size: usize,
    pub mime_type: Option<String>,
    pub playback_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CaptureSummary {
    pub active_source: Option<MediaSource>,
    pub upload: Option<FileSummary>,
    pub cv: Option<FileSummary>,
    pub recording: RecordingSummary,
}

#[derive(Default)]
pub struct CaptureWorkflow {
    upload: Option<MediaPayload>,
    cv: Option<MediaPayload>,
    recorder: Recorder,
}

impl CaptureWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects an uploaded media file. An oversized file is rejected and
    /// clears any previous upload; an accepted one discards the recording.
    pub fn select_upload(&mut self, payload: MediaPayload) -> Result<()> {
        if payload.size() > MAX_MEDIA_BYTES {
            self.upload = None;
            tracing::warn!(size = payload.size(), "Rejected oversized interview media");
            return Err(Error::PayloadTooLarge(format!(
                "Media file is too large. Please use a file under {} MB.",
                MAX_MEDIA_BYTES / (1024 * 1024)
            )));
        }
        self.recorder.delete();
        self.upload = Some(payload);
        Ok(())
    }

    pub fn select_cv(&mut self, payload: MediaPayload) -> Result<()> {
        if payload.size() > MAX_CV_BYTES {
            self.cv = None;
            tracing::warn!(size = payload.size(), "Rejected oversized CV");
            return Err(Error::PayloadTooLarge(format!(
                "CV is too large. Maximum size is {} MB.",
                MAX_CV_BYTES / (1024 * 1024)
            )));
        }
        self.cv = Some(payload);
        Ok(())
    }

    pub fn clear_cv(&mut self) {
        self.cv = None;
    }

    /// Starts a live recording; a previously selected upload is dropped.
    pub fn start_recording(&mut self, device: &dyn CaptureDevice) -> Result<Uuid> {
        let session = self.recorder.start(device)?;
        self.upload = None;
        Ok(session)
    }

    pub fn push_chunk(&mut self, chunk: Bytes) -> Result<()> {
        self.recorder.push_chunk(chunk)
    }

    pub fn tick_session(&mut self, session: Uuid) -> bool {
        self.recorder.tick_session(session)
    }

    pub fn stop_recording(&mut self) -> Option<&RecordedAudio> {
        self.recorder.stop()
    }

    pub fn delete_recording(&mut self) {
        self.recorder.delete();
    }

    pub fn recorder(&self) -> &Recorder {
        &self.recorder
    }

    /// Finished recording behind `handle`, if the handle is still current.
    pub fn playback(&self, handle: PlaybackHandle) -> Option<&RecordedAudio> {
        if self.recorder.playback() == Some(handle) {
            self.recorder.recorded()
        } else {
            None
        }
    }

    pub fn active_source(&self) -> Option<MediaSource> {
        if self.upload.is_some() {
            Some(MediaSource::Upload)
        } else if self.recorder.recorded().is_some() {
            Some(MediaSource::Recording)
        } else {
            None
        }
    }

    pub fn submission_sources(&self) -> Result<SubmissionSources> {
        let (media, source) = match (&self.upload, self.recorder.recorded()) {
            (Some(upload), _) => (upload.clone(), MediaSource::Upload),
            (None, Some(audio)) => (MediaPayload::from(audio), MediaSource::Recording),
            (None, None) if self.recorder.state() == RecordingState::Recording => {
                return Err(Error::BadRequest(
                    "Stop the recording before submitting.".to_string(),
                ))
            }
            (None, None) => {
                return Err(Error::BadRequest(
                    "Please upload or record the interview first.".to_string(),
                ))
            }
        };
        Ok(SubmissionSources {
            media,
            source,
            cv: self.cv.clone(),
        })
    }

    /// Drops every selection and releases the device and playback handle.
    pub fn reset(&mut self) {
        self.upload = None;
        self.cv = None;
        self.recorder.delete();
    }

    pub fn summary(&self) -> CaptureSummary {
        let recorder = &self.recorder;
        let recorded = recorder.recorded();
        CaptureSummary {
            active_source: self.active_source(),
            upload: self.upload.as_ref().map(FileSummary::from),
            cv: self.cv.as_ref().map(FileSummary::from),
            recording: RecordingSummary {
                state: recorder.state(),
                elapsed_seconds: recorder.elapsed_seconds(),
                elapsed: format_elapsed(recorder.elapsed_seconds()),
                size: recorded
                    .map(|r| r.data.len())
                    .unwrap_or_else(|| recorder.buffered_bytes()),
                mime_type: recorded.map(|r| r.mime_type.to_string()),
                playback_url: recorder
                    .playback()
                    .map(|PlaybackHandle(token)| format!("/api/recording/playback/{}", token)),
            },
        }
    }
}
