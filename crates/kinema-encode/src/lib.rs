//! # kinema-encode
//!
//! Encoding: converts raw frame buffers to output files. MP4 shells out
//! to FFmpeg for H.264; GIF and PNG sequences are encoded natively.

pub mod ffmpeg;
pub mod gif;
pub mod png_seq;

pub use ffmpeg::FfmpegEncoder;
pub use gif::GifEncoder;
pub use png_seq::PngSequenceEncoder;

use std::str::FromStr;

use kinema_core::KinemaError;

/// Output container format, selected by the CLI `--format` flag or the
/// `output.format` config key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Mp4,
    Gif,
    Png,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Mp4 => "mp4",
            OutputFormat::Gif => "gif",
            OutputFormat::Png => "png",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = KinemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mp4" => Ok(OutputFormat::Mp4),
            "gif" => Ok(OutputFormat::Gif),
            "png" => Ok(OutputFormat::Png),
            other => Err(KinemaError::Encode(format!(
                "unknown output format '{}' (expected mp4, gif, or png)",
                other
            ))),
        }
    }
}
