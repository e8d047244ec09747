//! Collision-free output path allocation.
//!
//! Converted files are named `{stem}_converted.{ext}`; when that name is
//! taken an incrementing counter is appended (`_converted_1`, `_converted_2`,
//! …) until a free path is found. The allocator is called once per job,
//! immediately before transcoding, and never returns a path that exists at
//! call time. No cross-process locking is attempted — the pipeline runs
//! jobs strictly one at a time in a single process.

use std::path::{Path, PathBuf};

use crate::config::OUTPUT_SUFFIX;
use crate::error::CoreResult;

/// Reserves a destination path for a converted file, creating the output
/// directory if absent.
pub fn reserve_output_path(output_dir: &Path, stem: &str, extension: &str) -> CoreResult<PathBuf> {
    std::fs::create_dir_all(output_dir)?;

    let mut candidate = output_dir.join(format!("{stem}{OUTPUT_SUFFIX}.{extension}"));
    let mut counter = 1u32;
    while candidate.exists() {
        candidate = output_dir.join(format!("{stem}{OUTPUT_SUFFIX}_{counter}.{extension}"));
        counter += 1;
    }

    log::debug!("Reserved output path: {}", candidate.display());
    Ok(candidate)
}
