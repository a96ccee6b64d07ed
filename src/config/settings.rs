//! Configuration settings for oci-transcribe.

use crate::transcription::DEFAULT_TIMEOUT;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default bucket used when none is configured.
pub const DEFAULT_BUCKET: &str = "speech-audio-bucket";

/// Placeholder compartment value that means "use the tenancy".
pub const COMPARTMENT_PLACEHOLDER: &str = "YOUR_COMPARTMENT_OCID";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub oci: OciSettings,
    pub storage: StorageSettings,
    pub speech: SpeechSettings,
    pub transcription: TranscriptionSettings,
}

/// Where to find OCI credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OciSettings {
    /// Path to the OCI CLI config file.
    pub config_file: String,
    /// Profile (section) to read from the config file.
    pub profile: String,
}

impl Default for OciSettings {
    fn default() -> Self {
        Self {
            config_file: "~/.oci/config".to_string(),
            profile: "DEFAULT".to_string(),
        }
    }
}

/// Object Storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Bucket that receives the audio and the transcription output.
    pub bucket: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            bucket: DEFAULT_BUCKET.to_string(),
        }
    }
}

/// Speech service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechSettings {
    /// Compartment for the transcription job. Falls back to the tenancy.
    pub compartment_id: Option<String>,
    /// Model domain.
    pub domain: String,
    /// Language of the audio.
    pub language_code: String,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            compartment_id: None,
            domain: "GENERIC".to_string(),
            language_code: "en-US".to_string(),
        }
    }
}

/// Job polling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionSettings {
    /// How long to wait for the job before giving up.
    pub timeout_minutes: u64,
}

impl Default for TranscriptionSettings {
    fn default() -> Self {
        Self {
            timeout_minutes: DEFAULT_TIMEOUT.as_secs() / 60,
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else if path.is_some() {
            Err(crate::error::TranscribeError::Config(format!(
                "settings file not found: {}",
                config_path.display()
            )))
        } else {
            Ok(Settings::default())
        }
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("oci-transcribe")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded OCI config file path.
    pub fn oci_config_path(&self) -> PathBuf {
        Self::expand_path(&self.oci.config_file)
    }
}
