//! Audio conversion to the Speech service's preferred input.
//!
//! Unsupported containers are converted with ffmpeg into mono 16 kHz 16-bit
//! PCM WAV inside a scratch directory owned by [`TranscodedAudio`].

use super::AudioSource;
use crate::error::{Result, TranscribeError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tempfile::TempDir;
use tokio::process::Command;
use tracing::{debug, info, instrument};

/// Converts audio files into speech-ready WAV.
#[async_trait]
pub trait AudioConverter: Send + Sync {
    /// Verify the converter is installed and runnable.
    async fn probe(&self) -> Result<()>;

    /// Convert `input` into a WAV file inside `output_dir`, returning its path.
    async fn convert(&self, input: &Path, output_dir: &Path) -> Result<PathBuf>;
}

/// A converted file and the scratch directory holding it.
///
/// Dropping this value removes the directory, on success and error paths alike.
#[derive(Debug)]
pub struct TranscodedAudio {
    dir: TempDir,
    path: PathBuf,
}

impl TranscodedAudio {
    /// Path of the converted file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The scratch directory.
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}

/// Probe the converter, then convert `source` into a fresh scratch directory.
#[instrument(skip(converter, source), fields(input = %source.path.display()))]
pub async fn transcode(converter: &dyn AudioConverter, source: &AudioSource) -> Result<TranscodedAudio> {
    converter.probe().await?;

    let dir = tempfile::Builder::new().prefix("oci-transcribe-").tempdir()?;
    debug!("Created scratch directory {}", dir.path().display());

    let path = converter.convert(&source.path, dir.path()).await?;
    info!("Converted audio to {}", path.display());

    Ok(TranscodedAudio { dir, path })
}

/// ffmpeg-backed converter.
#[derive(Debug, Clone)]
pub struct FfmpegConverter {
    program: String,
}

impl FfmpegConverter {
    pub fn new() -> Self {
        Self::with_program("ffmpeg")
    }

    /// Use a specific ffmpeg binary.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Output path for a given input: same stem, `.wav`, inside `output_dir`.
    pub fn output_path(input: &Path, output_dir: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("audio");
        output_dir.join(format!("{}.wav", stem))
    }

    /// Arguments for a conversion to mono 16 kHz 16-bit PCM.
    pub fn conversion_args(input: &Path, output: &Path) -> Vec<String> {
        vec![
            "-y".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            "-i".to_string(),
            input.to_string_lossy().to_string(),
            "-vn".to_string(),
            "-ac".to_string(),
            "1".to_string(),
            "-ar".to_string(),
            "16000".to_string(),
            "-acodec".to_string(),
            "pcm_s16le".to_string(),
            output.to_string_lossy().to_string(),
        ]
    }
}

impl Default for FfmpegConverter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioConverter for FfmpegConverter {
    async fn probe(&self) -> Result<()> {
        let result = Command::new(&self.program)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        match result {
            Ok(status) if status.success() => Ok(()),
            Ok(_) => Err(TranscribeError::DependencyMissing(format!(
                "{} is installed but not working correctly",
                self.program
            ))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(TranscribeError::DependencyMissing(self.program.clone()))
            }
            Err(e) => Err(TranscribeError::DependencyMissing(format!(
                "{}: {}",
                self.program, e
            ))),
        }
    }

    async fn convert(&self, input: &Path, output_dir: &Path) -> Result<PathBuf> {
        let output = Self::output_path(input, output_dir);
        debug!("Converting {:?} to {:?}", input, output);

        let result = Command::new(&self.program)
            .args(Self::conversion_args(input, &output))
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await;

        match result {
            Ok(out) if out.status.success() => Ok(output),
            Ok(out) => {
                let err = String::from_utf8_lossy(&out.stderr);
                Err(TranscribeError::TranscodeFailed(err.trim().to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(TranscribeError::DependencyMissing(self.program.clone()))
            }
            Err(e) => Err(TranscribeError::TranscodeFailed(format!("ffmpeg error: {e}"))),
        }
    }
}
