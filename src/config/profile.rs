//! OCI CLI config file (`~/.oci/config`) loading and validation.

use crate::error::{Result, TranscribeError};
use crate::config::Settings;
use ini::{Ini, ParseOption};
use std::path::{Path, PathBuf};

const REQUIRED_KEYS: &[&str] = &["user", "fingerprint", "key_file", "tenancy", "region"];

/// Backslashes are literal, as in Windows `key_file` paths.
fn parse_options() -> ParseOption {
    ParseOption {
        enabled_escape: false,
        ..Default::default()
    }
}

fn parse_error(e: impl std::fmt::Display) -> TranscribeError {
    TranscribeError::Config(format!("could not parse OCI config: {}", e))
}

/// Credentials and region of one profile in the OCI config file.
#[derive(Debug, Clone, PartialEq)]
pub struct OciProfile {
    pub name: String,
    pub user: String,
    pub fingerprint: String,
    pub key_file: PathBuf,
    pub tenancy: String,
    pub region: String,
}

impl OciProfile {
    /// Load and validate a profile from a config file.
    pub fn load(path: &Path, profile: &str) -> Result<Self> {
        if !path.exists() {
            return Err(TranscribeError::Config(format!(
                "OCI config file not found: {}",
                path.display()
            )));
        }
        let ini = Ini::load_from_file_opt(path, parse_options()).map_err(parse_error)?;
        Self::from_ini(&ini, profile)
    }

    /// Parse and validate a profile from config file contents.
    pub fn parse(content: &str, profile: &str) -> Result<Self> {
        let ini = Ini::load_from_str_opt(content, parse_options()).map_err(parse_error)?;
        Self::from_ini(&ini, profile)
    }

    fn from_ini(ini: &Ini, profile: &str) -> Result<Self> {
        let section = ini.section(Some(profile));
        let defaults = ini.section(Some("DEFAULT"));
        if section.is_none() && profile != "DEFAULT" {
            return Err(TranscribeError::Config(format!(
                "profile '{}' not found in OCI config",
                profile
            )));
        }

        // Named profiles inherit any key they don't set from [DEFAULT].
        let lookup = |key: &str| -> Option<String> {
            section
                .and_then(|s| s.get(key))
                .or_else(|| defaults.and_then(|d| d.get(key)))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let missing: Vec<&str> = REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|k| lookup(*k).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(TranscribeError::Config(format!(
                "profile '{}' is missing required keys: {}",
                profile,
                missing.join(", ")
            )));
        }

        if lookup("pass_phrase").is_some() {
            return Err(TranscribeError::Config(
                "encrypted API signing keys (pass_phrase) are not supported".to_string(),
            ));
        }

        let value = |key: &str| lookup(key).unwrap_or_default();
        let parsed = Self {
            name: profile.to_string(),
            user: value("user"),
            fingerprint: value("fingerprint"),
            key_file: Settings::expand_path(&value("key_file")),
            tenancy: value("tenancy"),
            region: value("region"),
        };
        parsed.validate()?;
        Ok(parsed)
    }

    /// Check value formats the way the OCI SDKs do.
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();
        if !is_ocid(&self.user) {
            problems.push("user is not a valid OCID");
        }
        if !is_ocid(&self.tenancy) {
            problems.push("tenancy is not a valid OCID");
        }
        if !is_fingerprint(&self.fingerprint) {
            problems.push("fingerprint is malformed");
        }
        if self.region.contains(char::is_whitespace) {
            problems.push("region is malformed");
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(TranscribeError::Config(format!(
                "invalid OCI config profile '{}': {}",
                self.name,
                problems.join(", ")
            )))
        }
    }

    /// `keyId` used when signing requests.
    pub fn key_id(&self) -> String {
        format!("{}/{}/{}", self.tenancy, self.user, self.fingerprint)
    }

    /// Read the PEM private key referenced by `key_file`.
    pub fn read_private_key(&self) -> Result<String> {
        std::fs::read_to_string(&self.key_file).map_err(|e| {
            TranscribeError::Config(format!(
                "cannot read key_file {}: {}",
                self.key_file.display(),
                e
            ))
        })
    }
}

fn is_ocid(value: &str) -> bool {
    value.starts_with("ocid1.") && value.split('.').count() >= 4
}

fn is_fingerprint(value: &str) -> bool {
    let pairs: Vec<&str> = value.split(':').collect();
    pairs.len() == 16
        && pairs
            .iter()
            .all(|p| p.len() == 2 && p.chars().all(|c| c.is_ascii_hexdigit()))
}
