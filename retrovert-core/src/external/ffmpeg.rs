//! ffmpeg command construction and progress-tracked execution.
//!
//! Builds the three ffmpeg invocations the pipeline needs — stream-copy
//! extraction, subtitle burn-in and the final MPEG-1 transcode — and runs
//! them through ffmpeg-sidecar, feeding diagnostic output into a
//! [`ProgressTracker`] as it streams and finishing with the process's real
//! exit status.

use std::path::Path;
use std::process::ExitStatus;

use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::{FfmpegEvent, LogLevel};

use crate::config::CoreConfig;
use crate::error::{CoreResult, command_failed_error, command_start_error, command_wait_error};
use crate::events::{Event, EventDispatcher, Stage};
use crate::progress::{ProgressSnapshot, ProgressTracker};
use crate::utils::parse_ffmpeg_time;

/// Lines of diagnostic output kept for the error report of a failed run.
const STDERR_TAIL_LINES: usize = 12;

/// Escapes a path for embedding inside an ffmpeg filter expression.
///
/// The filter grammar uses `:` as an option separator and `'` as a quote,
/// so backslashes are doubled and colons and single quotes are
/// backslash-escaped. Getting this wrong silently corrupts the filter graph,
/// most visibly on Windows where drive letters put a colon in every path.
#[must_use]
pub fn escape_filter_path(path: &Path) -> String {
    let raw = path.to_string_lossy();
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            ':' => escaped.push_str("\\:"),
            '\'' => escaped.push_str("\\'"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Starts an ffmpeg command against the configured binary.
fn base_command(config: &CoreConfig) -> FfmpegCommand {
    match &config.ffmpeg_path {
        Some(path) => FfmpegCommand::new_with_path(path),
        None => FfmpegCommand::new(),
    }
}

/// Re-encodes `input` with the chosen subtitle file rendered onto the
/// picture, writing a temporary container at `dest`. Audio is passed
/// through untouched in this pass; the format conversion happens later.
pub fn burn_subtitles(
    config: &CoreConfig,
    dispatcher: &EventDispatcher,
    input: &Path,
    srt_file: &Path,
    fonts_dir: &Path,
    dest: &Path,
) -> CoreResult<()> {
    let vf = format!(
        "subtitles='{}':fontsdir='{}'",
        escape_filter_path(srt_file),
        escape_filter_path(fonts_dir)
    );

    let mut cmd = base_command(config);
    cmd.overwrite()
        .input(input.to_string_lossy().as_ref())
        .args(["-vf", vf.as_str(), "-c:v", "libx264", "-c:a", "copy"])
        .output(dest.to_string_lossy().as_ref());

    run_ffmpeg(cmd, "ffmpeg (subtitle burn-in)", |snapshot| {
        emit_progress(dispatcher, Stage::BurnSubtitles, snapshot);
    })
}

/// Re-encodes `source` into the fixed legacy target format at `dest`.
///
/// `audio_position` is the relative index of the chosen audio track and is
/// only given when the source is the original input: a burned-in
/// intermediate has already been narrowed to one video and one audio
/// stream, while the original container still needs `-map 0:v:0` and
/// `-map 0:a:{n}` to pin down exactly which streams go out.
pub fn transcode_to_target(
    config: &CoreConfig,
    dispatcher: &EventDispatcher,
    source: &Path,
    dest: &Path,
    audio_position: Option<usize>,
) -> CoreResult<()> {
    let target = &config.target;

    let audio_map = audio_position.map(|position| format!("0:a:{position}"));
    let sample_rate = target.audio_sample_rate.to_string();
    let channels = target.audio_channels.to_string();

    let mut cmd = base_command(config);
    cmd.overwrite().input(source.to_string_lossy().as_ref());
    if let Some(audio_map) = &audio_map {
        cmd.args(["-map", "0:v:0", "-map", audio_map.as_str()]);
    }
    cmd.args([
        "-s",
        target.video_size.as_str(),
        "-c:v",
        target.video_codec.as_str(),
        "-b:v",
        target.video_bitrate.as_str(),
        "-c:a",
        target.audio_codec.as_str(),
        "-ar",
        sample_rate.as_str(),
        "-ac",
        channels.as_str(),
        "-b:a",
        target.audio_bitrate.as_str(),
    ])
    .output(dest.to_string_lossy().as_ref());

    run_ffmpeg(cmd, "ffmpeg (format transcode)", |snapshot| {
        emit_progress(dispatcher, Stage::Transcode, snapshot);
    })
}

/// Extracts one stream of `input` to `dest`, letting ffmpeg pick the output
/// codec from the destination extension. Used for subtitle extraction.
pub(crate) fn extract_stream(
    config: &CoreConfig,
    input: &Path,
    stream_index: u32,
    dest: &Path,
) -> CoreResult<()> {
    let map = format!("0:{stream_index}");
    let mut cmd = base_command(config);
    cmd.overwrite()
        .input(input.to_string_lossy().as_ref())
        .args(["-map", map.as_str()])
        .output(dest.to_string_lossy().as_ref());

    run_ffmpeg(cmd, "ffmpeg (subtitle extraction)", |_| {})
}

/// Extracts one stream of `input` as raw bytes to `dest` (`-c copy -f
/// data`). Used for font attachments, which must not be transcoded.
pub(crate) fn extract_attachment(
    config: &CoreConfig,
    input: &Path,
    stream_index: u32,
    dest: &Path,
) -> CoreResult<()> {
    let map = format!("0:{stream_index}");
    let mut cmd = base_command(config);
    cmd.overwrite()
        .input(input.to_string_lossy().as_ref())
        .args(["-map", map.as_str(), "-c", "copy", "-f", "data"])
        .output(dest.to_string_lossy().as_ref());

    run_ffmpeg(cmd, "ffmpeg (attachment extraction)", |_| {})
}

fn emit_progress(dispatcher: &EventDispatcher, stage: Stage, snapshot: ProgressSnapshot) {
    dispatcher.emit(Event::StageProgress {
        stage,
        percent: snapshot.percent,
        position_secs: snapshot.position_secs,
        total_secs: snapshot.total_secs,
        eta: snapshot.eta,
    });
}

/// Spawns `cmd`, streams its events through a fresh [`ProgressTracker`] and
/// waits for completion. A non-zero exit status is an error carrying the
/// tail of the diagnostic output.
fn run_ffmpeg<F>(mut cmd: FfmpegCommand, name: &str, mut on_progress: F) -> CoreResult<()>
where
    F: FnMut(ProgressSnapshot),
{
    log::debug!("Running {name}: {cmd:?}");

    let mut child = cmd.spawn().map_err(|e| command_start_error(name, e))?;

    let mut tracker = ProgressTracker::new();
    let mut stderr_tail: Vec<String> = Vec::new();
    fn push_tail(line: String, tail: &mut Vec<String>) {
        if tail.len() >= STDERR_TAIL_LINES {
            tail.remove(0);
        }
        tail.push(line);
    }

    let events = child.iter().map_err(|e| {
        command_failed_error(name, ExitStatus::default(), format!(
            "Failed to get event iterator: {e}"
        ))
    })?;

    for event in events {
        match event {
            FfmpegEvent::ParsedDuration(duration) => {
                tracker.observe_duration(duration.duration);
            }
            FfmpegEvent::Progress(progress) => {
                if let Some(position) = parse_ffmpeg_time(&progress.time) {
                    if let Some(snapshot) = tracker.observe_position(position) {
                        on_progress(snapshot);
                    }
                }
            }
            FfmpegEvent::Log(level, line) => {
                if let Some(snapshot) = tracker.observe_line(&line) {
                    on_progress(snapshot);
                }
                match level {
                    LogLevel::Error | LogLevel::Fatal => {
                        log::warn!(target: "ffmpeg", "{line}");
                        push_tail(line, &mut stderr_tail);
                    }
                    _ => log::debug!(target: "ffmpeg", "{line}"),
                }
            }
            FfmpegEvent::Error(error) => {
                log::warn!(target: "ffmpeg", "{error}");
                push_tail(error, &mut stderr_tail);
            }
            _ => {}
        }
    }

    let status = child.wait().map_err(|e| command_wait_error(name, e))?;
    if status.success() {
        Ok(())
    } else {
        Err(command_failed_error(name, status, stderr_tail.join("\n")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn plain_paths_pass_through() {
        assert_eq!(
            escape_filter_path(Path::new("/home/user/subs.srt")),
            "/home/user/subs.srt"
        );
    }

    #[test]
    fn filter_delimiters_are_escaped() {
        assert_eq!(
            escape_filter_path(&PathBuf::from("C:\\videos\\subs.srt")),
            "C\\:\\\\videos\\\\subs.srt"
        );
        assert_eq!(
            escape_filter_path(Path::new("/tmp/it's a file.srt")),
            "/tmp/it\\'s a file.srt"
        );
    }
}
