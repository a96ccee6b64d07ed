//! In-memory fakes for the pipeline's service seams.

use crate::audio::{AudioConverter, FfmpegConverter};
use crate::clock::Clock;
use crate::config::{OciProfile, RunConfig};
use crate::error::{Result, TranscribeError};
use crate::oci::{
    CreateTranscriptionJobDetails, JobState, ObjectStore, ServiceError, SpeechService,
    TranscriptionJob,
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

pub const TEST_JOB_ID: &str = "ocid1.aispeechtranscriptionjob.oc1.iad.amaaaaaajob";

pub fn run_config() -> RunConfig {
    RunConfig {
        profile: OciProfile {
            name: "DEFAULT".to_string(),
            user: "ocid1.user.oc1..user".to_string(),
            fingerprint: "20:3b:97:13:55:1c:5b:0d:d3:37:d8:50:4e:c5:3a:34".to_string(),
            key_file: PathBuf::from("/keys/key.pem"),
            tenancy: "ocid1.tenancy.oc1..tenancy".to_string(),
            region: "us-ashburn-1".to_string(),
        },
        namespace: "testns".to_string(),
        bucket: "speech-audio-bucket".to_string(),
        compartment_id: "ocid1.tenancy.oc1..tenancy".to_string(),
        domain: "GENERIC".to_string(),
        language_code: "en-US".to_string(),
        timeout: Duration::from_secs(30 * 60),
    }
}

pub fn job(state: JobState) -> TranscriptionJob {
    TranscriptionJob {
        id: TEST_JOB_ID.to_string(),
        lifecycle_state: state,
        lifecycle_details: None,
        display_name: None,
        output_location: None,
    }
}

#[derive(Debug, Clone)]
pub struct PutCall {
    pub object_name: String,
    pub content_type: String,
    pub body: Vec<u8>,
}

/// Object store holding objects in a fixed listing order.
#[derive(Default)]
pub struct FakeObjectStore {
    objects: Mutex<Vec<(String, Vec<u8>)>>,
    puts: Mutex<Vec<PutCall>>,
    put_error: Option<ServiceError>,
}

impl FakeObjectStore {
    pub fn with_object(self, name: &str, body: &[u8]) -> Self {
        self.objects
            .lock()
            .unwrap()
            .push((name.to_string(), body.to_vec()));
        self
    }

    pub fn failing_put(mut self, error: ServiceError) -> Self {
        self.put_error = Some(error);
        self
    }

    pub fn puts(&self) -> Vec<PutCall> {
        self.puts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for FakeObjectStore {
    async fn namespace(&self) -> Result<String> {
        Ok("testns".to_string())
    }

    async fn put_object(
        &self,
        _namespace: &str,
        _bucket: &str,
        object_name: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        if let Some(err) = &self.put_error {
            return Err(err.clone().into());
        }
        self.puts.lock().unwrap().push(PutCall {
            object_name: object_name.to_string(),
            content_type: content_type.to_string(),
            body,
        });
        Ok(())
    }

    async fn list_objects(&self, _namespace: &str, _bucket: &str, prefix: &str) -> Result<Vec<String>> {
        Ok(self
            .objects
            .lock()
            .unwrap()
            .iter()
            .filter(|(name, _)| name.starts_with(prefix))
            .map(|(name, _)| name.clone())
            .collect())
    }

    async fn get_object(&self, _namespace: &str, _bucket: &str, object_name: &str) -> Result<Vec<u8>> {
        self.objects
            .lock()
            .unwrap()
            .iter()
            .find(|(name, _)| name == object_name)
            .map(|(_, body)| body.clone())
            .ok_or_else(|| {
                ServiceError {
                    status: 404,
                    code: "ObjectNotFound".to_string(),
                    message: format!("{} not found", object_name),
                    request_id: None,
                }
                .into()
            })
    }
}

/// Speech service replaying a scripted sequence of job snapshots.
pub struct FakeSpeechService {
    created: Mutex<Vec<CreateTranscriptionJobDetails>>,
    polls: Mutex<VecDeque<TranscriptionJob>>,
    poll_count: Mutex<usize>,
    create_error: Option<ServiceError>,
}

impl FakeSpeechService {
    pub fn with_states(states: &[JobState]) -> Self {
        Self::with_jobs(states.iter().map(|s| job(*s)).collect())
    }

    pub fn with_jobs(jobs: Vec<TranscriptionJob>) -> Self {
        Self {
            created: Mutex::new(Vec::new()),
            polls: Mutex::new(jobs.into()),
            poll_count: Mutex::new(0),
            create_error: None,
        }
    }

    pub fn failing_create(mut self, error: ServiceError) -> Self {
        self.create_error = Some(error);
        self
    }

    pub fn created(&self) -> Vec<CreateTranscriptionJobDetails> {
        self.created.lock().unwrap().clone()
    }

    pub fn poll_count(&self) -> usize {
        *self.poll_count.lock().unwrap()
    }
}

#[async_trait]
impl SpeechService for FakeSpeechService {
    async fn create_transcription_job(
        &self,
        details: &CreateTranscriptionJobDetails,
    ) -> Result<TranscriptionJob> {
        if let Some(err) = &self.create_error {
            return Err(err.clone().into());
        }
        self.created.lock().unwrap().push(details.clone());
        Ok(job(JobState::Accepted))
    }

    async fn get_transcription_job(&self, job_id: &str) -> Result<TranscriptionJob> {
        assert_eq!(job_id, TEST_JOB_ID);
        *self.poll_count.lock().unwrap() += 1;
        let mut polls = self.polls.lock().unwrap();
        match polls.len() {
            0 => Err(TranscribeError::InvalidInput("no scripted job state left".to_string())),
            // The last scripted snapshot repeats forever.
            1 => Ok(polls[0].clone()),
            _ => Ok(polls.pop_front().unwrap()),
        }
    }
}

/// Clock that only moves when slept on.
#[derive(Default)]
pub struct FakeClock {
    elapsed: Mutex<Duration>,
    sleeps: Mutex<Vec<Duration>>,
}

impl FakeClock {
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

#[async_trait]
impl Clock for FakeClock {
    fn now(&self) -> Duration {
        *self.elapsed.lock().unwrap()
    }

    async fn sleep(&self, duration: Duration) {
        *self.elapsed.lock().unwrap() += duration;
        self.sleeps.lock().unwrap().push(duration);
    }
}

/// Converter that writes a placeholder WAV and records where it wrote it.
#[derive(Default)]
pub struct RecordingConverter {
    outputs: Mutex<Vec<PathBuf>>,
}

impl RecordingConverter {
    pub fn outputs(&self) -> Vec<PathBuf> {
        self.outputs.lock().unwrap().clone()
    }
}

#[async_trait]
impl AudioConverter for RecordingConverter {
    async fn probe(&self) -> Result<()> {
        Ok(())
    }

    async fn convert(&self, input: &Path, output_dir: &Path) -> Result<PathBuf> {
        let out = FfmpegConverter::output_path(input, output_dir);
        std::fs::write(&out, b"RIFF....WAVE")?;
        self.outputs.lock().unwrap().push(out.clone());
        Ok(out)
    }
}
