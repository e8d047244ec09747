//! Font attachment extraction.
//!
//! Subtitle burn-in needs the fonts that styled subtitles reference, so
//! every attachment stream is extracted losslessly into a per-job fonts
//! directory. Declared attachment filenames come from untrusted container
//! metadata and are sanitized down to `[A-Za-z0-9 ._-]` before touching the
//! filesystem; name collisions get an incrementing suffix before the
//! extension.

use std::path::{Path, PathBuf};

use crate::config::CoreConfig;
use crate::error::CoreResult;
use crate::external::ffmpeg::extract_attachment;
use crate::probe::{StreamKind, probe_streams};

/// Reduces a declared attachment filename to the permitted character set.
///
/// Retains alphanumerics, space, dot, underscore and hyphen; everything
/// else is stripped. The result is trimmed and may be empty, in which case
/// the caller substitutes a stream-index based fallback.
#[must_use]
pub fn sanitize_attachment_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '.' | '_' | '-'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Resolves `filename` to a path in `dir` that does not exist yet,
/// inserting `_1`, `_2`, … before the extension on collision.
#[must_use]
pub fn unique_destination(dir: &Path, filename: &str) -> PathBuf {
    let candidate = dir.join(filename);
    if !candidate.exists() {
        return candidate;
    }

    let (stem, extension) = match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (filename, None),
    };

    let mut counter = 1u32;
    loop {
        let name = match extension {
            Some(ext) => format!("{stem}_{counter}.{ext}"),
            None => format!("{stem}_{counter}"),
        };
        let candidate = dir.join(name);
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Extracts every attachment stream of `input` into `fonts_dir` (created if
/// absent). Returns the number of attachments written.
///
/// A failed extraction propagates and fails the job; attachments are not
/// skipped individually.
pub fn extract_fonts(config: &CoreConfig, input: &Path, fonts_dir: &Path) -> CoreResult<usize> {
    std::fs::create_dir_all(fonts_dir)?;

    let attachments = probe_streams(config, input, StreamKind::Attachment)?;
    for attachment in &attachments {
        let declared = attachment
            .filename
            .as_deref()
            .map(sanitize_attachment_name)
            .unwrap_or_default();
        let filename = if declared.is_empty() {
            format!("font_{}", attachment.index)
        } else {
            declared
        };

        let dest = unique_destination(fonts_dir, &filename);
        log::debug!(
            "Extracting attachment stream {} to {}",
            attachment.index,
            dest.display()
        );
        extract_attachment(config, input, attachment.index, &dest)?;
    }

    Ok(attachments.len())
}
