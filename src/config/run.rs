//! The resolved, immutable configuration for one transcription run.

use super::settings::COMPARTMENT_PLACEHOLDER;
use super::{OciProfile, Settings};
use std::path::PathBuf;
use std::time::Duration;

/// Values supplied on the command line or through the environment.
///
/// Each one, when present, wins over the settings file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub oci_config: Option<PathBuf>,
    pub profile: Option<String>,
    pub bucket: Option<String>,
    pub compartment_id: Option<String>,
    pub timeout_minutes: Option<u64>,
}

impl Overrides {
    /// OCI config file path after applying overrides.
    pub fn oci_config_path(&self, settings: &Settings) -> PathBuf {
        match &self.oci_config {
            Some(path) => Settings::expand_path(&path.to_string_lossy()),
            None => settings.oci_config_path(),
        }
    }

    /// Profile name after applying overrides.
    pub fn profile_name<'a>(&'a self, settings: &'a Settings) -> &'a str {
        self.profile.as_deref().unwrap_or(&settings.oci.profile)
    }
}

/// Everything a run needs, built once at startup and passed by reference.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub profile: OciProfile,
    pub namespace: String,
    pub bucket: String,
    pub compartment_id: String,
    pub domain: String,
    pub language_code: String,
    pub timeout: Duration,
}

impl RunConfig {
    /// Merge settings, overrides, the loaded profile and the detected namespace.
    pub fn resolve(
        settings: &Settings,
        overrides: &Overrides,
        profile: OciProfile,
        namespace: String,
    ) -> Self {
        let candidate = overrides
            .compartment_id
            .as_deref()
            .or(settings.speech.compartment_id.as_deref());
        let compartment_id = resolve_compartment(candidate, &profile.tenancy);

        let bucket = overrides
            .bucket
            .clone()
            .filter(|b| !b.trim().is_empty())
            .unwrap_or_else(|| settings.storage.bucket.clone());

        let timeout_minutes = overrides
            .timeout_minutes
            .unwrap_or(settings.transcription.timeout_minutes);

        Self {
            profile,
            namespace,
            bucket,
            compartment_id,
            domain: settings.speech.domain.clone(),
            language_code: settings.speech.language_code.clone(),
            timeout: Duration::from_secs(timeout_minutes.saturating_mul(60)),
        }
    }

    /// Whether the compartment fell back to the tenancy.
    pub fn uses_tenancy_compartment(&self) -> bool {
        self.compartment_id == self.profile.tenancy
    }
}

/// Pick the compartment, falling back to the tenancy for unset or placeholder values.
pub fn resolve_compartment(candidate: Option<&str>, tenancy: &str) -> String {
    match candidate.map(str::trim) {
        Some(c) if !c.is_empty() && c != COMPARTMENT_PLACEHOLDER => c.to_string(),
        _ => tenancy.to_string(),
    }
}
