//! Local audio file resolution.

use crate::error::{Result, TranscribeError};
use std::path::{Path, PathBuf};

/// Extensions the Speech service accepts as-is.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["wav", "flac", "ogg", "mp3", "m4a", "webm"];

/// A validated local audio file.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioSource {
    /// Path as given by the user.
    pub path: PathBuf,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Lowercase extension, empty if the file has none.
    pub extension: String,
}

impl AudioSource {
    /// Check that `path` is an existing file and record its format.
    pub fn resolve(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(TranscribeError::FileNotFound(path.to_path_buf()));
        }

        let metadata = std::fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(TranscribeError::InvalidInput(format!(
                "Not a file: {}",
                path.display()
            )));
        }

        Ok(Self {
            path: path.to_path_buf(),
            size_bytes: metadata.len(),
            extension: extension_of(path),
        })
    }

    /// Whether the file must be converted before upload.
    pub fn needs_transcode(&self) -> bool {
        !is_supported_extension(&self.extension)
    }
}

/// Lowercase extension of a path, or an empty string.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default()
}

/// Check an extension against the supported set (case-insensitive).
pub fn is_supported_extension(ext: &str) -> bool {
    SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_extensions() {
        for ext in ["wav", "flac", "ogg", "mp3", "m4a", "webm", "MP3", "Wav"] {
            assert!(is_supported_extension(ext), "{ext} should be supported");
        }
        for ext in ["caf", "aac", "mp4", "opus", ""] {
            assert!(!is_supported_extension(ext), "{ext} should need conversion");
        }
    }

    #[test]
    fn test_resolve_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.wav");
        match AudioSource::resolve(&missing) {
            Err(TranscribeError::FileNotFound(p)) => assert_eq!(p, missing),
            other => panic!("expected FileNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_directory_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            AudioSource::resolve(dir.path()),
            Err(TranscribeError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_resolve_records_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Clip.CAF");
        std::fs::write(&path, vec![0u8; 2048]).unwrap();

        let source = AudioSource::resolve(&path).unwrap();
        assert_eq!(source.extension, "caf");
        assert_eq!(source.size_bytes, 2048);
        assert!(source.needs_transcode());
    }

    #[test]
    fn test_supported_file_skips_transcode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("New Recording.m4a");
        std::fs::write(&path, b"data").unwrap();
        assert!(!AudioSource::resolve(&path).unwrap().needs_transcode());
    }
}
