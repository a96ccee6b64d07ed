//! Transcription job lifecycle: submit, wait, collect, write.

mod job;
mod poller;
mod results;
mod writer;

pub use job::{display_name, job_details, submit_job};
pub use poller::{wait_for_completion, DEFAULT_TIMEOUT, POLL_INTERVAL};
pub use results::{collect_transcript, output_prefix_for, parse_fragments};
pub use writer::{transcript_path, write_transcript};

/// Prefix passed to the service for job output. Result lookup derives its
/// folder from this same value.
pub const OUTPUT_PREFIX: &str = "transcription_output/";
