//! CLI module for oci-transcribe.

mod output;
mod transcribe;

pub use output::Output;
pub use transcribe::run_transcribe;

use crate::config::Overrides;
use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;

/// Transcribe a local audio file with the OCI Speech service.
///
/// The audio is uploaded to Object Storage, transcribed by an asynchronous
/// job, and the text is saved next to the input file.
#[derive(Parser, Debug)]
#[command(name = "oci-transcribe")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Audio file to transcribe (wav, flac, ogg, mp3, m4a, webm; others are converted with ffmpeg)
    pub audio_file: PathBuf,

    /// Output file name, placed beside the audio file when relative
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Minutes to wait for the transcription job
    #[arg(long)]
    pub timeout_minutes: Option<u64>,

    /// Object Storage bucket for audio and results
    #[arg(long, env = "OCI_BUCKET_NAME")]
    pub bucket: Option<String>,

    /// Compartment OCID for the transcription job (defaults to the tenancy)
    #[arg(long, env = "OCI_COMPARTMENT_ID")]
    pub compartment: Option<String>,

    /// Profile in the OCI config file
    #[arg(long, env = "OCI_CLI_PROFILE")]
    pub profile: Option<String>,

    /// Path to the OCI config file
    #[arg(long, env = "OCI_CONFIG_FILE")]
    pub oci_config: Option<PathBuf>,

    /// Path to the settings file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Values from flags and environment that override the settings file.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            oci_config: self.oci_config.clone(),
            profile: self.profile.clone(),
            bucket: self.bucket.clone(),
            compartment_id: self.compartment.clone(),
            timeout_minutes: self.timeout_minutes,
        }
    }
}

/// Process exit code for a failed argument parse.
///
/// Help and version requests are successful exits; every usage error exits 1.
pub fn parse_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_positional_and_flags() {
        let cli = Cli::try_parse_from([
            "oci-transcribe",
            "clip.caf",
            "-o",
            "notes.txt",
            "--timeout-minutes",
            "5",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.audio_file, PathBuf::from("clip.caf"));
        assert_eq!(cli.output, Some(PathBuf::from("notes.txt")));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.overrides().timeout_minutes, Some(5));
    }

    #[test]
    fn test_audio_file_is_required() {
        let err = Cli::try_parse_from(["oci-transcribe"]).unwrap_err();
        assert_eq!(parse_exit_code(err.kind()), 1);
    }

    #[test]
    fn test_unknown_flag_exits_one() {
        let err = Cli::try_parse_from(["oci-transcribe", "clip.wav", "--nope"]).unwrap_err();
        assert_eq!(parse_exit_code(err.kind()), 1);
    }

    #[test]
    fn test_help_and_version_exit_zero() {
        let help = Cli::try_parse_from(["oci-transcribe", "--help"]).unwrap_err();
        assert_eq!(help.kind(), ErrorKind::DisplayHelp);
        assert_eq!(parse_exit_code(help.kind()), 0);

        let version = Cli::try_parse_from(["oci-transcribe", "--version"]).unwrap_err();
        assert_eq!(version.kind(), ErrorKind::DisplayVersion);
        assert_eq!(parse_exit_code(version.kind()), 0);
    }
}
