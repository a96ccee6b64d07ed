//! Uploading audio to Object Storage.

use crate::audio::extension_of;
use crate::config::RunConfig;
use crate::error::{Result, TranscribeError};
use crate::oci::ObjectStore;
use std::path::Path;
use tracing::{info, instrument};

/// Content type for an audio extension; unknown extensions are sent as WAV.
pub fn content_type_for(extension: &str) -> &'static str {
    match extension.to_lowercase().as_str() {
        "wav" => "audio/wav",
        "mp3" => "audio/mpeg",
        "flac" => "audio/flac",
        "ogg" => "audio/ogg",
        "m4a" => "audio/mp4",
        "webm" => "audio/webm",
        _ => "audio/wav",
    }
}

/// An object that now exists in the bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedObject {
    /// `oci://{bucket}@{namespace}/{object}`
    pub uri: String,
    pub object_name: String,
}

/// Upload `file` to the configured bucket under its basename.
///
/// The whole file is read into memory and sent in one request. A 404 from the
/// service means the bucket does not exist.
#[instrument(skip(store, config), fields(file = %file.display()))]
pub async fn upload_audio(
    store: &dyn ObjectStore,
    config: &RunConfig,
    file: &Path,
) -> Result<UploadedObject> {
    let object_name = file
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            TranscribeError::InvalidInput(format!("Invalid file name: {}", file.display()))
        })?
        .to_string();
    let content_type = content_type_for(&extension_of(file));
    let body = tokio::fs::read(file).await?;

    info!(
        "Uploading {} ({} bytes, {}) to bucket {}",
        object_name,
        body.len(),
        content_type,
        config.bucket
    );

    store
        .put_object(
            &config.namespace,
            &config.bucket,
            &object_name,
            body,
            content_type,
        )
        .await
        .map_err(|e| match e {
            TranscribeError::Service(err) if err.status == 404 => TranscribeError::BucketNotFound {
                bucket: config.bucket.clone(),
                compartment: config.compartment_id.clone(),
                message: err.message,
            },
            TranscribeError::Service(err) => TranscribeError::UploadFailed(err.message),
            other => TranscribeError::UploadFailed(other.to_string()),
        })?;

    Ok(UploadedObject {
        uri: format!("oci://{}@{}/{}", config.bucket, config.namespace, object_name),
        object_name,
    })
}
