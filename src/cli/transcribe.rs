//! Transcribe command implementation.

use super::output::format_kb;
use super::{Cli, Output};
use crate::audio::{AudioSource, FfmpegConverter};
use crate::clock::SystemClock;
use crate::config::{OciProfile, RunConfig, Settings};
use crate::oci::{
    create_http_client, ObjectStorageClient, ObjectStore, OciHttpClient, RequestSigner,
    SpeechClient,
};
use crate::orchestrator::{Orchestrator, PipelineEvent};
use anyhow::Result;
use indicatif::ProgressBar;
use std::sync::{Arc, Mutex};

/// Run the full upload → transcribe → download pipeline for one file.
pub async fn run_transcribe(cli: &Cli, settings: Settings) -> Result<()> {
    Output::header("OCI Speech-to-Text");

    let source = AudioSource::resolve(&cli.audio_file)?;
    Output::kv("Audio file", &source.path.display().to_string());
    Output::kv("File size", &format_kb(source.size_bytes));

    let overrides = cli.overrides();
    let profile = OciProfile::load(
        &overrides.oci_config_path(&settings),
        overrides.profile_name(&settings),
    )?;
    Output::kv("OCI profile", &profile.name);
    Output::kv("Region", &profile.region);

    let signer = RequestSigner::from_pem(profile.key_id(), &profile.read_private_key()?)?;
    let client = OciHttpClient::new(create_http_client()?, signer);
    let store = Arc::new(ObjectStorageClient::for_region(client.clone(), &profile.region)?);
    let speech = Arc::new(SpeechClient::for_region(client, &profile.region)?);

    let namespace = store.namespace().await?;
    Output::kv("Namespace", &namespace);

    let config = RunConfig::resolve(&settings, &overrides, profile, namespace);
    if config.uses_tenancy_compartment() {
        Output::kv("Compartment", &format!("{} (tenancy)", config.compartment_id));
    } else {
        Output::kv("Compartment", &config.compartment_id);
    }
    Output::kv("Bucket", &config.bucket);
    println!();

    let timeout_minutes = config.timeout.as_secs() / 60;
    let spinner: Arc<Mutex<Option<ProgressBar>>> = Arc::new(Mutex::new(None));
    let observer_spinner = spinner.clone();

    let orchestrator = Orchestrator::new(
        config,
        store,
        speech,
        Arc::new(FfmpegConverter::new()),
        Arc::new(SystemClock::new()),
    )
    .with_observer(move |event| report(event, &observer_spinner, timeout_minutes));

    let result = orchestrator.run(&source, cli.output.as_deref()).await;

    if let Some(pb) = spinner.lock().ok().and_then(|mut s| s.take()) {
        pb.finish_and_clear();
    }
    let outcome = result?;

    if outcome.text.is_empty() {
        Output::warning("The job finished but no transcription text was found in its output");
    }
    Output::framed("TRANSCRIPTION RESULT", &outcome.text);
    println!();
    Output::success(&format!(
        "Transcription saved to: {}",
        outcome.output_path.display()
    ));
    Output::success("Process completed successfully!");

    Ok(())
}

/// Render a pipeline event for the terminal.
fn report(event: &PipelineEvent, spinner: &Mutex<Option<ProgressBar>>, timeout_minutes: u64) {
    match event {
        PipelineEvent::Transcoding { input } => Output::info(&format!(
            "Converting {} to 16kHz mono WAV...",
            input.display()
        )),
        PipelineEvent::Transcoded { output } => {
            Output::success(&format!("Converted to {}", output.display()))
        }
        PipelineEvent::Uploading {
            object_name,
            bucket,
        } => Output::info(&format!(
            "Uploading {} to bucket {}...",
            object_name, bucket
        )),
        PipelineEvent::Uploaded { uri } => Output::success(&format!("Uploaded {}", uri)),
        PipelineEvent::JobSubmitted { job_id, state } => {
            Output::success(&format!("Transcription job created: {}", job_id));
            Output::kv("Status", &state.to_string());
            if let Ok(mut slot) = spinner.lock() {
                *slot = Some(Output::spinner(&format!(
                    "Waiting for transcription (timeout: {} min)...",
                    timeout_minutes
                )));
            }
        }
        PipelineEvent::JobStatus { state } => {
            if let Ok(slot) = spinner.lock() {
                if let Some(pb) = slot.as_ref() {
                    pb.set_message(format!("Status: {}", state));
                }
            }
        }
        PipelineEvent::CollectingResults { .. } => {
            if let Some(pb) = spinner.lock().ok().and_then(|mut s| s.take()) {
                pb.finish_and_clear();
            }
            Output::success("Transcription completed successfully!");
            Output::info("Retrieving transcription results...");
        }
        PipelineEvent::Saved { .. } => {}
    }
}
