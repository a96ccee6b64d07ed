//! Audio input handling: resolving the source file and converting formats
//! the Speech service does not accept.

mod source;
mod transcoder;

pub use source::{extension_of, is_supported_extension, AudioSource, SUPPORTED_EXTENSIONS};
pub use transcoder::{transcode, AudioConverter, FfmpegConverter, TranscodedAudio};
