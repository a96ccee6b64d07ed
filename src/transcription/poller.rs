//! Waiting for a transcription job to finish.

use crate::clock::Clock;
use crate::error::{Result, TranscribeError};
use crate::oci::{JobState, SpeechService, TranscriptionJob};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Fixed delay between status checks.
pub const POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Default time to wait for a job before giving up.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Poll `job_id` until it succeeds, fails, is canceled, or `timeout` passes.
///
/// `on_status` sees every observed state. The poller only observes; it never
/// asks the service to cancel the job.
#[instrument(skip(speech, clock, on_status))]
pub async fn wait_for_completion(
    speech: &dyn SpeechService,
    clock: &dyn Clock,
    job_id: &str,
    timeout: Duration,
    on_status: &(dyn Fn(JobState) + Send + Sync),
) -> Result<TranscriptionJob> {
    let start = clock.now();

    loop {
        let job = speech
            .get_transcription_job(job_id)
            .await
            .map_err(|e| TranscribeError::JobStatusFailed(e.to_string()))?;
        debug!("Job {} is {}", job_id, job.lifecycle_state);
        on_status(job.lifecycle_state);

        match job.lifecycle_state {
            JobState::Succeeded => {
                info!("Transcription job {} succeeded", job_id);
                return Ok(job);
            }
            JobState::Failed => {
                let details = job
                    .lifecycle_details
                    .unwrap_or_else(|| "no details reported".to_string());
                return Err(TranscribeError::TranscriptionFailed(details));
            }
            JobState::Canceled => return Err(TranscribeError::TranscriptionCanceled),
            JobState::Unknown => warn!("Job {} reported an unrecognized state", job_id),
            _ => {}
        }

        if clock.now().saturating_sub(start) > timeout {
            return Err(TranscribeError::PollTimeout(timeout));
        }

        clock.sleep(POLL_INTERVAL).await;
    }
}
