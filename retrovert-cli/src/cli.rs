// retrovert-cli/src/cli.rs
//
// Defines the command-line argument structure using clap.

use clap::Parser;
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Retrovert: batch video to MPEG-1 converter",
    long_about = "Converts video files to legacy MPEG-1, optionally burning a chosen \
subtitle track into the picture first. All transcoding is delegated to ffmpeg."
)]
pub struct Cli {
    /// Files or directories to convert (directories are searched recursively)
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Directory where converted files are written (default: ~/Converted)
    #[arg(short = 'o', long = "output-dir", value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Path to the ffmpeg binary (default: resolve via PATH)
    #[arg(long, value_name = "FFMPEG_BIN", env = "RETROVERT_FFMPEG")]
    pub ffmpeg: Option<PathBuf>,

    /// Path to the ffprobe binary (default: resolve via PATH)
    #[arg(long, value_name = "FFPROBE_BIN", env = "RETROVERT_FFPROBE")]
    pub ffprobe: Option<PathBuf>,

    /// Never prompt; always take the first audio/subtitle candidate
    #[arg(long, default_value_t = false)]
    pub non_interactive: bool,

    /// Exit 0 even when individual conversions fail
    #[arg(long, default_value_t = false)]
    pub ignore_failures: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_paths() {
        let cli = Cli::parse_from(["retrovert", "movie.mkv", "/data/videos"]);
        assert_eq!(
            cli.paths,
            vec![PathBuf::from("movie.mkv"), PathBuf::from("/data/videos")]
        );
        assert!(cli.output_dir.is_none());
        assert!(!cli.non_interactive);
        assert!(!cli.ignore_failures);
    }

    #[test]
    fn test_parse_no_paths_is_allowed() {
        // No arguments prints a hint and exits 0; parsing must not fail.
        let cli = Cli::parse_from(["retrovert"]);
        assert!(cli.paths.is_empty());
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from([
            "retrovert",
            "-o",
            "out",
            "--ffmpeg",
            "/opt/ffmpeg/bin/ffmpeg",
            "--non-interactive",
            "--ignore-failures",
            "input.mp4",
        ]);
        assert_eq!(cli.output_dir, Some(PathBuf::from("out")));
        assert_eq!(cli.ffmpeg, Some(PathBuf::from("/opt/ffmpeg/bin/ffmpeg")));
        assert!(cli.ffprobe.is_none());
        assert!(cli.non_interactive);
        assert!(cli.ignore_failures);
        assert_eq!(cli.paths, vec![PathBuf::from("input.mp4")]);
    }
}
