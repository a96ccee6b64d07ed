//! Building and submitting transcription jobs.

use super::OUTPUT_PREFIX;
use crate::config::RunConfig;
use crate::error::{Result, TranscribeError};
use crate::oci::{
    CreateTranscriptionJobDetails, InputLocation, ModelDetails, ObjectLocation, OutputLocation,
    SpeechService, TranscriptionJob,
};
use chrono::{DateTime, Local};
use tracing::{info, instrument};

/// Display name for a job created at `now`.
pub fn display_name(now: DateTime<Local>) -> String {
    format!("Transcription_{}", now.format("%Y%m%d_%H%M%S"))
}

/// Job request for a single uploaded object.
pub fn job_details(
    config: &RunConfig,
    object_name: &str,
    display_name: String,
) -> CreateTranscriptionJobDetails {
    CreateTranscriptionJobDetails {
        compartment_id: config.compartment_id.clone(),
        display_name,
        input_location: InputLocation::ObjectListInlineInputLocation {
            object_locations: vec![ObjectLocation {
                namespace_name: config.namespace.clone(),
                bucket_name: config.bucket.clone(),
                object_names: vec![object_name.to_string()],
            }],
        },
        output_location: OutputLocation {
            namespace_name: config.namespace.clone(),
            bucket_name: config.bucket.clone(),
            prefix: Some(OUTPUT_PREFIX.to_string()),
        },
        model_details: ModelDetails {
            domain: config.domain.clone(),
            language_code: config.language_code.clone(),
        },
    }
}

/// Submit a transcription job for `object_name`. One attempt, no retry.
#[instrument(skip(speech, config))]
pub async fn submit_job(
    speech: &dyn SpeechService,
    config: &RunConfig,
    object_name: &str,
) -> Result<TranscriptionJob> {
    let details = job_details(config, object_name, display_name(Local::now()));

    let job = speech
        .create_transcription_job(&details)
        .await
        .map_err(classify_submit_error)?;

    info!("Transcription job created: {} ({})", job.id, job.lifecycle_state);
    Ok(job)
}

fn classify_submit_error(err: TranscribeError) -> TranscribeError {
    let (text, message) = match err {
        TranscribeError::Service(service) => {
            (format!("{} {}", service.code, service.message), service.message)
        }
        other => {
            let text = other.to_string();
            (text.clone(), text)
        }
    };

    if text.contains("NotAuthorizedOrNotFound") {
        TranscribeError::AuthorizationOrServiceDisabled(message)
    } else {
        TranscribeError::JobSubmitFailed(message)
    }
}
