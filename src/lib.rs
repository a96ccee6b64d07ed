//! oci-transcribe - Audio transcription with OCI Speech
//!
//! A CLI tool that turns a local audio file into text using Oracle Cloud
//! Infrastructure's managed speech-recognition service.
//!
//! # Overview
//!
//! A run goes through these steps in order:
//! - Resolve the input file and decide whether it needs conversion
//! - Convert unsupported formats to mono 16 kHz WAV with ffmpeg
//! - Upload the audio to an Object Storage bucket
//! - Submit an asynchronous transcription job and poll it to completion
//! - Download the JSON result fragments and save the text beside the input
//!
//! # Architecture
//!
//! - `config` - Settings file, OCI credential profiles, resolved run config
//! - `audio` - Input resolution and format conversion
//! - `oci` - Signed REST clients for Object Storage and Speech
//! - `storage` - Audio upload
//! - `transcription` - Job submission, polling, result collection and output
//! - `clock` - Injectable time source for polling
//! - `orchestrator` - Pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use oci_transcribe::audio::{AudioSource, FfmpegConverter};
//! use oci_transcribe::clock::SystemClock;
//! use oci_transcribe::config::{OciProfile, Overrides, RunConfig, Settings};
//! use oci_transcribe::oci::{create_http_client, ObjectStorageClient, ObjectStore, OciHttpClient, RequestSigner, SpeechClient};
//! use oci_transcribe::orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let profile = OciProfile::load(&settings.oci_config_path(), "DEFAULT")?;
//!     let signer = RequestSigner::from_pem(profile.key_id(), &profile.read_private_key()?)?;
//!     let client = OciHttpClient::new(create_http_client()?, signer);
//!     let store = Arc::new(ObjectStorageClient::for_region(client.clone(), &profile.region)?);
//!     let speech = Arc::new(SpeechClient::for_region(client, &profile.region)?);
//!
//!     let namespace = store.namespace().await?;
//!     let config = RunConfig::resolve(&settings, &Overrides::default(), profile, namespace);
//!     let orchestrator = Orchestrator::new(
//!         config,
//!         store,
//!         speech,
//!         Arc::new(FfmpegConverter::new()),
//!         Arc::new(SystemClock::new()),
//!     );
//!
//!     let source = AudioSource::resolve("meeting.caf")?;
//!     let outcome = orchestrator.run(&source, None).await?;
//!     println!("Saved {}", outcome.output_path.display());
//!     Ok(())
//! }
//! ```

pub mod audio;
pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod oci;
pub mod orchestrator;
pub mod storage;
pub mod transcription;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{Result, TranscribeError};
