use std::io;
use std::path::Path;

use bytes::Bytes;
use thiserror::Error;
use tracing::{info, warn};

use crate::api_client::{ApiError, RoastApi};

/// Maximum accepted resume size in bytes (5 MB).
pub const MAX_FILE_BYTES: u64 = 5_242_880;

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOC: &str = "application/msword";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const ALLOWED_MEDIA_TYPES: &[&str] = &[MIME_PDF, MIME_DOC, MIME_DOCX];

/// Why a selected file was rejected. The `Display` text is the user-facing
/// notification; callers surface it directly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectError {
    #[error("Please upload a PDF or DOC file")]
    UnsupportedType,

    #[error("File is too large. Maximum 5MB")]
    TooLarge,
}

/// A user-selected resume held client-side prior to upload.
#[derive(Debug, Clone)]
pub struct CandidateFile {
    pub name: String,
    /// Declared media type, checked against the allow-list on selection.
    pub media_type: String,
    pub size: u64,
    pub payload: Bytes,
}

impl CandidateFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, payload: Bytes) -> Self {
        let size = payload.len() as u64;
        Self {
            name: name.into(),
            media_type: media_type.into(),
            size,
            payload,
        }
    }

    /// Reads a local file and derives its declared media type from the
    /// extension, matching the web picker's `.pdf,.doc,.docx` accept list.
    /// Unknown extensions map to `application/octet-stream`, which the
    /// acceptance rules then reject.
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let payload = Bytes::from(std::fs::read(path)?);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "resume".to_string());
        Ok(Self::new(name, media_type_for(path), payload))
    }
}

fn media_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => MIME_PDF,
        "doc" => MIME_DOC,
        "docx" => MIME_DOCX,
        _ => "application/octet-stream",
    }
}

/// Result of one upload attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success { roast_id: String },
    Failure { message: String },
}

/// Owns the selected-file state and drives a one-shot upload.
///
/// Holds at most one [`CandidateFile`] at a time. A file is only stored if
/// it passes the acceptance rules; a rejected selection leaves the prior
/// candidate untouched. On upload failure the candidate is retained so the
/// user can retry without reselecting.
#[derive(Debug, Default)]
pub struct SubmissionController {
    candidate: Option<CandidateFile>,
    uploading: bool,
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn candidate(&self) -> Option<&CandidateFile> {
        self.candidate.as_ref()
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    /// Whether the submit action should be enabled in the UI. Gating on
    /// this keeps a second in-flight upload unreachable.
    pub fn can_submit(&self) -> bool {
        self.candidate.is_some() && !self.uploading
    }

    /// Validates and stores a selection. Rules run in order and the first
    /// failure wins: media type against the allow-list, then size against
    /// [`MAX_FILE_BYTES`]. On success the new file replaces any existing
    /// candidate atomically.
    pub fn select_file(&mut self, file: CandidateFile) -> Result<(), SelectError> {
        if !ALLOWED_MEDIA_TYPES.contains(&file.media_type.as_str()) {
            warn!(media_type = %file.media_type, "rejected selection: unsupported type");
            return Err(SelectError::UnsupportedType);
        }
        if file.size > MAX_FILE_BYTES {
            warn!(size = file.size, "rejected selection: over size ceiling");
            return Err(SelectError::TooLarge);
        }
        info!(name = %file.name, size = file.size, "candidate selected");
        self.candidate = Some(file);
        Ok(())
    }

    /// Discards the current candidate. Idempotent.
    pub fn clear_file(&mut self) {
        self.candidate = None;
    }

    /// Performs exactly one upload attempt for the current candidate.
    /// Returns `None` when no candidate is present: no network call is
    /// made and no state changes.
    ///
    /// All failure outcomes leave the candidate in place.
    pub async fn submit(&mut self, api: &dyn RoastApi) -> Option<SubmissionOutcome> {
        let file = self.candidate.as_ref()?;

        self.uploading = true;
        let result = api.upload_resume(file).await;
        self.uploading = false;

        Some(match result {
            Ok(ack) => {
                info!(roast_id = %ack.roast_id, "resume uploaded");
                SubmissionOutcome::Success {
                    roast_id: ack.roast_id,
                }
            }
            Err(err) => {
                warn!("upload failed: {err}");
                SubmissionOutcome::Failure {
                    message: failure_message(&err),
                }
            }
        })
    }
}

fn failure_message(err: &ApiError) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        "Upload failed".to_string()
    } else {
        message
    }
}
