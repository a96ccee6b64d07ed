//! Error types for oci-transcribe.

use crate::oci::ServiceError;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Library-level error type for transcription runs.
#[derive(Error, Debug)]
pub enum TranscribeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Audio file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    DependencyMissing(String),

    #[error("Audio conversion failed: {0}")]
    TranscodeFailed(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Bucket '{bucket}' not found: {message}")]
    BucketNotFound {
        bucket: String,
        compartment: String,
        message: String,
    },

    #[error("Failed to create transcription job: {0}")]
    JobSubmitFailed(String),

    #[error("Failed to create transcription job: {0}")]
    AuthorizationOrServiceDisabled(String),

    #[error("Failed to fetch transcription job status: {0}")]
    JobStatusFailed(String),

    #[error("Transcription failed: {0}")]
    TranscriptionFailed(String),

    #[error("Transcription was canceled")]
    TranscriptionCanceled,

    #[error("Timed out after {} minutes waiting for transcription", .0.as_secs() / 60)]
    PollTimeout(Duration),

    #[error("Failed to retrieve transcription results: {0}")]
    ResultFetchFailed(String),

    #[error("OCI service error: {0}")]
    Service(#[from] ServiceError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl TranscribeError {
    /// Remediation advice to print alongside the error, if any applies.
    pub fn hint(&self) -> Option<String> {
        match self {
            TranscribeError::Config(_) => Some(
                "Please ensure you have configured the OCI CLI:\n  \
                 1. Install OCI CLI: brew install oci-cli\n  \
                 2. Run: oci setup config\n  \
                 3. Or set up ~/.oci/config manually"
                    .to_string(),
            ),
            TranscribeError::DependencyMissing(tool) => Some(format!(
                "Install {tool} (e.g. 'brew install {tool}' or 'apt install {tool}') to convert unsupported audio formats"
            )),
            TranscribeError::BucketNotFound {
                bucket,
                compartment,
                ..
            } => Some(format!(
                "Please create it first:\n  oci os bucket create -c {compartment} --name {bucket}"
            )),
            TranscribeError::AuthorizationOrServiceDisabled(_) => Some(
                "Please ensure the Speech service is enabled in your tenancy\n  \
                 and you have proper IAM policies configured."
                    .to_string(),
            ),
            _ => None,
        }
    }
}

/// Result type alias for oci-transcribe operations.
pub type Result<T> = std::result::Result<T, TranscribeError>;
