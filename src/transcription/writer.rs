//! Writing the transcript next to the original audio file.

use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::info;

/// Where the transcript for `original` goes.
///
/// Defaults to `{stem}_transcription.txt` in the input's directory. A relative
/// `explicit` name is placed in that same directory; an absolute one is kept.
pub fn transcript_path(original: &Path, explicit: Option<&Path>) -> PathBuf {
    let dir = original.parent().unwrap_or_else(|| Path::new(""));
    match explicit {
        Some(name) if name.is_absolute() => name.to_path_buf(),
        Some(name) => dir.join(name),
        None => {
            let stem = original
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("audio");
            dir.join(format!("{}_transcription.txt", stem))
        }
    }
}

/// Write `text` to the transcript path, replacing any existing file.
pub fn write_transcript(original: &Path, explicit: Option<&Path>, text: &str) -> Result<PathBuf> {
    let path = transcript_path(original, explicit);
    std::fs::write(&path, text)?;
    info!("Transcription saved to: {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_name_beside_input() {
        assert_eq!(
            transcript_path(Path::new("/rec/clip.caf"), None),
            PathBuf::from("/rec/clip_transcription.txt")
        );
        assert_eq!(
            transcript_path(Path::new("New Recording.m4a"), None),
            PathBuf::from("New Recording_transcription.txt")
        );
    }

    #[test]
    fn test_explicit_relative_name_stays_in_input_dir() {
        assert_eq!(
            transcript_path(Path::new("/rec/clip.caf"), Some(Path::new("notes.txt"))),
            PathBuf::from("/rec/notes.txt")
        );
        assert_eq!(
            transcript_path(Path::new("/rec/clip.caf"), Some(Path::new("/out/notes.txt"))),
            PathBuf::from("/out/notes.txt")
        );
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("clip.wav");
        let target = dir.path().join("clip_transcription.txt");
        std::fs::write(&target, "old contents that are longer").unwrap();

        let written = write_transcript(&input, None, "new").unwrap();
        assert_eq!(written, target);
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "new");
    }
}
