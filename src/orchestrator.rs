//! Pipeline orchestrator for oci-transcribe.
//!
//! Coordinates the run from the local audio file to the transcript on disk.

use crate::audio::{transcode, AudioConverter, AudioSource, TranscodedAudio};
use crate::clock::Clock;
use crate::config::RunConfig;
use crate::error::Result;
use crate::oci::{JobState, ObjectStore, SpeechService};
use crate::storage::{upload_audio, UploadedObject};
use crate::transcription::{collect_transcript, submit_job, wait_for_completion, write_transcript};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument};

/// Progress notifications emitted while a run advances.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    Transcoding { input: PathBuf },
    Transcoded { output: PathBuf },
    Uploading { object_name: String, bucket: String },
    Uploaded { uri: String },
    JobSubmitted { job_id: String, state: JobState },
    JobStatus { state: JobState },
    CollectingResults { job_id: String },
    Saved { path: PathBuf },
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct TranscriptionOutcome {
    pub job_id: String,
    pub object: UploadedObject,
    pub text: String,
    pub output_path: PathBuf,
    /// Whether the audio was converted before upload.
    pub transcoded: bool,
}

type Observer = Box<dyn Fn(&PipelineEvent) + Send + Sync>;

/// The main orchestrator for the transcription pipeline.
pub struct Orchestrator {
    config: RunConfig,
    store: Arc<dyn ObjectStore>,
    speech: Arc<dyn SpeechService>,
    converter: Arc<dyn AudioConverter>,
    clock: Arc<dyn Clock>,
    observer: Observer,
}

impl Orchestrator {
    /// Create an orchestrator from its collaborators.
    pub fn new(
        config: RunConfig,
        store: Arc<dyn ObjectStore>,
        speech: Arc<dyn SpeechService>,
        converter: Arc<dyn AudioConverter>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            store,
            speech,
            converter,
            clock,
            observer: Box::new(|_| {}),
        }
    }

    /// Receive [`PipelineEvent`]s as the run progresses.
    pub fn with_observer(mut self, observer: impl Fn(&PipelineEvent) + Send + Sync + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    fn emit(&self, event: PipelineEvent) {
        (self.observer)(&event);
    }

    /// Transcribe `source` and write the transcript beside it.
    ///
    /// Any scratch directory created for conversion is removed before this
    /// returns, whether the run succeeded or not.
    #[instrument(skip(self, source), fields(input = %source.path.display()))]
    pub async fn run(&self, source: &AudioSource, output: Option<&Path>) -> Result<TranscriptionOutcome> {
        let transcoded = self.prepare_audio(source).await?;
        let upload_path = transcoded
            .as_ref()
            .map(|t| t.path().to_path_buf())
            .unwrap_or_else(|| source.path.clone());

        let result = self.process(source, &upload_path, output).await;

        // Scratch audio lives exactly as long as the remote steps need it.
        drop(transcoded);

        let (job_id, object, text, output_path) = result?;
        Ok(TranscriptionOutcome {
            job_id,
            object,
            text,
            output_path,
            transcoded: source.needs_transcode(),
        })
    }

    /// Convert the source if the service can't take it as-is.
    async fn prepare_audio(&self, source: &AudioSource) -> Result<Option<TranscodedAudio>> {
        if !source.needs_transcode() {
            return Ok(None);
        }

        info!("Converting .{} audio before upload", source.extension);
        self.emit(PipelineEvent::Transcoding {
            input: source.path.clone(),
        });
        let transcoded = transcode(self.converter.as_ref(), source).await?;
        self.emit(PipelineEvent::Transcoded {
            output: transcoded.path().to_path_buf(),
        });
        Ok(Some(transcoded))
    }

    async fn process(
        &self,
        source: &AudioSource,
        upload_path: &Path,
        output: Option<&Path>,
    ) -> Result<(String, UploadedObject, String, PathBuf)> {
        self.emit(PipelineEvent::Uploading {
            object_name: upload_path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
            bucket: self.config.bucket.clone(),
        });
        let object = upload_audio(self.store.as_ref(), &self.config, upload_path).await?;
        self.emit(PipelineEvent::Uploaded {
            uri: object.uri.clone(),
        });

        let job = submit_job(self.speech.as_ref(), &self.config, &object.object_name).await?;
        self.emit(PipelineEvent::JobSubmitted {
            job_id: job.id.clone(),
            state: job.lifecycle_state,
        });

        let on_status = |state: JobState| self.emit(PipelineEvent::JobStatus { state });
        let finished = wait_for_completion(
            self.speech.as_ref(),
            self.clock.as_ref(),
            &job.id,
            self.config.timeout,
            &on_status,
        )
        .await?;

        self.emit(PipelineEvent::CollectingResults {
            job_id: finished.id.clone(),
        });
        let text = collect_transcript(self.store.as_ref(), &self.config, &finished.id).await?;

        // Named after the original input, never the converted file.
        let output_path = write_transcript(&source.path, output, &text)?;
        self.emit(PipelineEvent::Saved {
            path: output_path.clone(),
        });

        Ok((finished.id, object, text, output_path))
    }
}
