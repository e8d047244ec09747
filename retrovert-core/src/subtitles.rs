//! Subtitle extraction and format conversion.
//!
//! The chosen subtitle stream is extracted to an intermediate Advanced
//! SubStation (.ass) file by ffmpeg, converted to plain SubRip here, and
//! the intermediate is deleted. Conversion keeps cue timing at the source
//! format's centisecond resolution and strips ASS styling: `{\…}` override
//! blocks are dropped, `\N`/`\n` become line breaks and `\h` becomes a
//! space.

use std::path::Path;

use crate::config::CoreConfig;
use crate::error::{CoreError, CoreResult};
use crate::external::ffmpeg::extract_stream;

/// Default event field order when a `[Events]` section carries no Format line.
const DEFAULT_EVENT_FORMAT: &[&str] = &[
    "layer", "start", "end", "style", "name", "marginl", "marginr", "marginv", "effect", "text",
];

/// One timed text cue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleCue {
    pub start_ms: u64,
    pub end_ms: u64,
    pub text: String,
}

/// Extracts stream `stream_index` of `input` as SubRip at `srt_path`,
/// using `intermediate_ass` as scratch space for the styled extraction.
///
/// Fails when the stream does not exist on the input or when it yields no
/// readable cues. The intermediate file is removed in both cases.
pub fn extract_subtitle(
    config: &CoreConfig,
    input: &Path,
    stream_index: u32,
    intermediate_ass: &Path,
    srt_path: &Path,
) -> CoreResult<()> {
    extract_stream(config, input, stream_index, intermediate_ass)?;

    let bytes = std::fs::read(intermediate_ass)?;
    if let Err(err) = std::fs::remove_file(intermediate_ass) {
        log::warn!(
            "Failed to remove intermediate subtitle file {}: {}",
            intermediate_ass.display(),
            err
        );
    }

    let cues = parse_ass(&String::from_utf8_lossy(&bytes));
    if cues.is_empty() {
        return Err(CoreError::NoSubtitleData {
            path: input.display().to_string(),
            index: stream_index,
        });
    }

    log::debug!(
        "Converted {} subtitle cues to {}",
        cues.len(),
        srt_path.display()
    );
    std::fs::write(srt_path, render_srt(&cues))?;
    Ok(())
}

/// Parses the `[Events]` section of an ASS document into cues, sorted by
/// start time. Malformed dialogue lines are skipped.
#[must_use]
pub fn parse_ass(content: &str) -> Vec<SubtitleCue> {
    let mut cues = Vec::new();
    let mut in_events = false;
    let mut fields: Vec<String> = DEFAULT_EVENT_FORMAT
        .iter()
        .map(|f| (*f).to_string())
        .collect();

    for raw_line in content.lines() {
        let line = raw_line.trim_start_matches('\u{feff}').trim();

        if line.starts_with('[') {
            in_events = line.eq_ignore_ascii_case("[events]");
            continue;
        }
        if !in_events {
            continue;
        }

        if let Some(rest) = line.strip_prefix("Format:") {
            fields = rest
                .split(',')
                .map(|f| f.trim().to_ascii_lowercase())
                .collect();
            continue;
        }

        let Some(rest) = line.strip_prefix("Dialogue:") else {
            continue;
        };
        // The text field is last, so splitting into exactly `fields.len()`
        // pieces keeps commas inside the dialogue text intact.
        let parts: Vec<&str> = rest.splitn(fields.len(), ',').collect();
        if parts.len() != fields.len() {
            continue;
        }
        let field = |name: &str| fields.iter().position(|f| f == name).map(|i| parts[i]);

        let (Some(start), Some(end), Some(text)) = (field("start"), field("end"), field("text"))
        else {
            continue;
        };
        let (Some(start_ms), Some(end_ms)) = (
            parse_ass_timestamp(start.trim()),
            parse_ass_timestamp(end.trim()),
        ) else {
            continue;
        };

        let text = clean_dialogue_text(text);
        if text.is_empty() {
            continue;
        }
        cues.push(SubtitleCue {
            start_ms,
            end_ms,
            text,
        });
    }

    cues.sort_by_key(|cue| (cue.start_ms, cue.end_ms));
    cues
}

/// Renders cues as a SubRip document: 1-based cue numbers and
/// `HH:MM:SS,mmm --> HH:MM:SS,mmm` time lines.
#[must_use]
pub fn render_srt(cues: &[SubtitleCue]) -> String {
    use std::fmt::Write as _;

    let mut out = String::new();
    for (i, cue) in cues.iter().enumerate() {
        let _ = writeln!(out, "{}", i + 1);
        let _ = writeln!(
            out,
            "{} --> {}",
            format_srt_timestamp(cue.start_ms),
            format_srt_timestamp(cue.end_ms)
        );
        let _ = writeln!(out, "{}", cue.text);
        let _ = writeln!(out);
    }
    out
}

/// Parses an ASS timestamp (`H:MM:SS.cc`) to milliseconds.
fn parse_ass_timestamp(value: &str) -> Option<u64> {
    let mut parts = value.split(':');
    let hours: u64 = parts.next()?.trim().parse().ok()?;
    let minutes: u64 = parts.next()?.trim().parse().ok()?;
    let seconds: f64 = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() || !seconds.is_finite() || seconds < 0.0 {
        return None;
    }
    Some(hours * 3_600_000 + minutes * 60_000 + (seconds * 1000.0).round() as u64)
}

fn format_srt_timestamp(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1000;
    let millis = ms % 1000;
    format!("{hours:02}:{minutes:02}:{seconds:02},{millis:03}")
}

/// Strips ASS override blocks and resolves escape sequences in dialogue text.
fn clean_dialogue_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    let mut in_tag = false;

    while let Some(c) = chars.next() {
        if in_tag {
            if c == '}' {
                in_tag = false;
            }
            continue;
        }
        match c {
            '{' => in_tag = true,
            '\\' => match chars.peek() {
                Some('N') | Some('n') => {
                    chars.next();
                    out.push('\n');
                }
                Some('h') => {
                    chars.next();
                    out.push(' ');
                }
                _ => out.push('\\'),
            },
            _ => out.push(c),
        }
    }

    out.trim().to_string()
}
