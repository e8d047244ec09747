//! Stream probing via ffprobe.
//!
//! Runs ffprobe with a stream-type filter and machine-readable JSON output,
//! then parses the per-stream index and language/title/filename tags into
//! [`StreamDescriptor`] values. Only the fields the pipeline needs are
//! requested; everything else stays inside ffprobe.

use std::path::Path;
use std::process::Command;

use serde::Deserialize;

use crate::config::CoreConfig;
use crate::error::{CoreResult, command_failed_error, command_start_error};

/// The stream categories the pipeline cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Audio,
    Subtitle,
    Attachment,
}

impl StreamKind {
    /// The ffprobe `-select_streams` specifier for this kind.
    pub(crate) fn selector(self) -> &'static str {
        match self {
            StreamKind::Audio => "a",
            StreamKind::Subtitle => "s",
            StreamKind::Attachment => "t",
        }
    }

    /// Human-readable label used in prompts and messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            StreamKind::Audio => "audio",
            StreamKind::Subtitle => "subtitle",
            StreamKind::Attachment => "attachment",
        }
    }
}

/// Metadata for a single stream inside a container file.
///
/// Read-only; produced by probing and discarded after selection.
#[derive(Debug, Clone)]
pub struct StreamDescriptor {
    /// Absolute stream index within the container
    pub index: u32,

    /// Stream category
    pub kind: StreamKind,

    /// Declared language tag, if any
    pub language: Option<String>,

    /// Declared title tag, if any
    pub title: Option<String>,

    /// Declared filename tag (attachments only)
    pub filename: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    index: u32,
    #[serde(default)]
    tags: Option<ProbeTags>,
}

#[derive(Debug, Default, Deserialize)]
struct ProbeTags {
    language: Option<String>,
    title: Option<String>,
    filename: Option<String>,
}

/// Probes `input` for streams of the given kind.
///
/// A non-zero ffprobe exit or unparseable output is an error; an empty
/// stream list is a valid outcome left to the caller's selection policy.
pub fn probe_streams(
    config: &CoreConfig,
    input: &Path,
    kind: StreamKind,
) -> CoreResult<Vec<StreamDescriptor>> {
    log::debug!(
        "Probing {} streams of {}",
        kind.label(),
        input.display()
    );

    let output = Command::new(config.ffprobe_bin())
        .args([
            "-v",
            "error",
            "-select_streams",
            kind.selector(),
            "-show_entries",
            "stream=index:stream_tags=language,title,filename",
            "-of",
            "json",
        ])
        .arg(input)
        .output()
        .map_err(|e| command_start_error("ffprobe", e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        return Err(command_failed_error("ffprobe", output.status, stderr));
    }

    parse_probe_output(kind, &output.stdout)
}

fn parse_probe_output(kind: StreamKind, stdout: &[u8]) -> CoreResult<Vec<StreamDescriptor>> {
    let parsed: ProbeOutput = serde_json::from_slice(stdout)?;

    Ok(parsed
        .streams
        .into_iter()
        .map(|stream| {
            let tags = stream.tags.unwrap_or_default();
            StreamDescriptor {
                index: stream.index,
                kind,
                language: tags.language,
                title: tags.title,
                filename: tags.filename,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_streams_with_tags() {
        let json = br#"{
            "programs": [],
            "streams": [
                {"index": 1, "tags": {"language": "eng", "title": "Stereo"}},
                {"index": 2, "tags": {"language": "jpn"}}
            ]
        }"#;
        let streams = parse_probe_output(StreamKind::Audio, json).unwrap();
        assert_eq!(streams.len(), 2);
        assert_eq!(streams[0].index, 1);
        assert_eq!(streams[0].language.as_deref(), Some("eng"));
        assert_eq!(streams[0].title.as_deref(), Some("Stereo"));
        assert_eq!(streams[1].index, 2);
        assert!(streams[1].title.is_none());
        assert_eq!(streams[1].kind, StreamKind::Audio);
    }

    #[test]
    fn parses_attachment_filenames() {
        let json = br#"{"streams": [{"index": 4, "tags": {"filename": "OpenSans.ttf"}}]}"#;
        let streams = parse_probe_output(StreamKind::Attachment, json).unwrap();
        assert_eq!(streams[0].filename.as_deref(), Some("OpenSans.ttf"));
    }

    #[test]
    fn missing_streams_key_is_empty() {
        let streams = parse_probe_output(StreamKind::Subtitle, b"{}").unwrap();
        assert!(streams.is_empty());
    }

    #[test]
    fn missing_tags_object_is_tolerated() {
        let json = br#"{"streams": [{"index": 0}]}"#;
        let streams = parse_probe_output(StreamKind::Subtitle, json).unwrap();
        assert_eq!(streams[0].index, 0);
        assert!(streams[0].language.is_none());
    }

    #[test]
    fn garbage_output_is_an_error() {
        assert!(parse_probe_output(StreamKind::Audio, b"not json").is_err());
    }
}
