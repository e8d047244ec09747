//! Configuration structures and constants for the retrovert-core library.
//!
//! Everything the conversion pipeline needs — output directory, external
//! binary locations and the fixed MPEG-1 target parameters — travels in an
//! explicit [`CoreConfig`] value instead of process-wide globals, so tests
//! and callers can run isolated configurations side by side.

use std::path::{Path, PathBuf};

// Default constants

/// Output frame size of the legacy target format.
pub const DEFAULT_VIDEO_SIZE: &str = "320x240";

/// Video codec of the legacy target format.
pub const DEFAULT_VIDEO_CODEC: &str = "mpeg1video";

/// Video bitrate of the legacy target format.
pub const DEFAULT_VIDEO_BITRATE: &str = "600k";

/// Audio codec of the legacy target format (MPEG-1 Layer II).
pub const DEFAULT_AUDIO_CODEC: &str = "mp2";

/// Audio sample rate in Hz.
pub const DEFAULT_AUDIO_SAMPLE_RATE: u32 = 44_100;

/// Audio channel count.
pub const DEFAULT_AUDIO_CHANNELS: u32 = 2;

/// Audio bitrate of the legacy target format.
pub const DEFAULT_AUDIO_BITRATE: &str = "128k";

/// File extension of produced output files.
pub const OUTPUT_EXTENSION: &str = "mpg";

/// Suffix inserted between the input stem and the output extension.
pub const OUTPUT_SUFFIX: &str = "_converted";

/// Recognized video file extensions (matched case-insensitively).
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "avi", "mov", "flv", "wmv", "mpg"];

/// Fixed parameters of the conversion target.
///
/// The target is deliberately rigid: one container, one resolution, one
/// bitrate ladder. Overriding individual fields is supported so tests and
/// unusual playback devices can deviate without forking the pipeline.
#[derive(Debug, Clone)]
pub struct TargetFormat {
    /// Output frame size passed to `-s` (e.g. "320x240")
    pub video_size: String,

    /// Video codec passed to `-c:v`
    pub video_codec: String,

    /// Video bitrate passed to `-b:v`
    pub video_bitrate: String,

    /// Audio codec passed to `-c:a`
    pub audio_codec: String,

    /// Audio sample rate in Hz passed to `-ar`
    pub audio_sample_rate: u32,

    /// Audio channel count passed to `-ac`
    pub audio_channels: u32,

    /// Audio bitrate passed to `-b:a`
    pub audio_bitrate: String,
}

impl Default for TargetFormat {
    fn default() -> Self {
        Self {
            video_size: DEFAULT_VIDEO_SIZE.to_string(),
            video_codec: DEFAULT_VIDEO_CODEC.to_string(),
            video_bitrate: DEFAULT_VIDEO_BITRATE.to_string(),
            audio_codec: DEFAULT_AUDIO_CODEC.to_string(),
            audio_sample_rate: DEFAULT_AUDIO_SAMPLE_RATE,
            audio_channels: DEFAULT_AUDIO_CHANNELS,
            audio_bitrate: DEFAULT_AUDIO_BITRATE.to_string(),
        }
    }
}

/// Main configuration structure for the retrovert-core library.
///
/// Created by the consumer (e.g. retrovert-cli) and passed into
/// [`crate::processing::process_videos`].
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Directory where converted files and per-job temporaries are written
    pub output_dir: PathBuf,

    /// Explicit path to the ffmpeg binary; `None` resolves via PATH
    pub ffmpeg_path: Option<PathBuf>,

    /// Explicit path to the ffprobe binary; `None` resolves via PATH
    pub ffprobe_path: Option<PathBuf>,

    /// Recognized input extensions, lowercase without leading dot
    pub video_extensions: Vec<String>,

    /// Fixed parameters of the conversion target
    pub target: TargetFormat,
}

impl CoreConfig {
    /// Creates a configuration with default target parameters and the
    /// default extension allow-list.
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            ffmpeg_path: None,
            ffprobe_path: None,
            video_extensions: VIDEO_EXTENSIONS.iter().map(|s| (*s).to_string()).collect(),
            target: TargetFormat::default(),
        }
    }

    /// The ffprobe binary to invoke.
    pub fn ffprobe_bin(&self) -> &Path {
        self.ffprobe_path.as_deref().unwrap_or(Path::new("ffprobe"))
    }

    /// The ffmpeg binary to invoke.
    pub fn ffmpeg_bin(&self) -> &Path {
        self.ffmpeg_path.as_deref().unwrap_or(Path::new("ffmpeg"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bins_resolve_via_path() {
        let config = CoreConfig::new(PathBuf::from("/tmp/out"));
        assert_eq!(config.ffmpeg_bin(), Path::new("ffmpeg"));
        assert_eq!(config.ffprobe_bin(), Path::new("ffprobe"));
    }

    #[test]
    fn explicit_bins_take_precedence() {
        let mut config = CoreConfig::new(PathBuf::from("/tmp/out"));
        config.ffmpeg_path = Some(PathBuf::from("/opt/ffmpeg/bin/ffmpeg"));
        assert_eq!(config.ffmpeg_bin(), Path::new("/opt/ffmpeg/bin/ffmpeg"));
    }
}
