// ============================================================================
// retrovert-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with ffmpeg and ffprobe
//
// Everything that spawns an external process lives under this module. The
// probing side (ffprobe) is a plain `std::process::Command` invocation with
// JSON output; the transcoding side (ffmpeg) goes through ffmpeg-sidecar so
// its diagnostic output can be consumed as a typed event stream while the
// process runs.

use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{CoreError, CoreResult, command_start_error};

pub mod ffmpeg;

pub use ffmpeg::{burn_subtitles, escape_filter_path, transcode_to_target};

/// Checks that a required external binary is reachable and executable.
///
/// Runs `<bin> -version` with output discarded. A missing binary is a
/// [`CoreError::DependencyNotFound`], fatal to the whole run at first use.
pub fn check_dependency(bin: &Path, display_name: &str) -> CoreResult<()> {
    let result = Command::new(bin)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {}", bin.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{}' not found.", bin.display());
            Err(CoreError::DependencyNotFound(format!(
                "{} ({})",
                display_name,
                bin.display()
            )))
        }
        Err(e) => Err(command_start_error(display_name, e)),
    }
}
