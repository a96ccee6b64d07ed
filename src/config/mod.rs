//! Configuration module for oci-transcribe.
//!
//! Handles the optional settings file, OCI credential profiles, and the
//! resolved per-run configuration.

mod profile;
mod run;
mod settings;

pub use profile::OciProfile;
pub use run::{resolve_compartment, Overrides, RunConfig};
pub use settings::{
    OciSettings, Settings, SpeechSettings, StorageSettings, TranscriptionSettings,
    COMPARTMENT_PLACEHOLDER, DEFAULT_BUCKET,
};
