//! File discovery module for finding video files to convert.
//!
//! Walks the paths given on the command line: file arguments are included
//! when their extension matches the configured allow-list, directory
//! arguments are searched recursively for matching files. Inaccessible
//! entries are skipped with a warning rather than aborting the walk.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::CoreConfig;

/// Returns true when `path` carries one of the recognized video extensions
/// (case-insensitive).
#[must_use]
pub fn has_video_extension(config: &CoreConfig, path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext_str| {
            config
                .video_extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext_str))
        })
        .unwrap_or(false)
}

/// Finds video files under the given paths, in argument order then
/// directory-walk order. Duplicates reachable through overlapping roots are
/// kept; an empty result is a valid outcome.
#[must_use]
pub fn find_video_files(config: &CoreConfig, paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            if has_video_extension(config, path) {
                files.push(path.clone());
            }
        } else if path.is_dir() {
            for entry in WalkDir::new(path) {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(err) => {
                        log::warn!("Skipping inaccessible entry under {}: {}", path.display(), err);
                        continue;
                    }
                };
                if entry.file_type().is_file() && has_video_extension(config, entry.path()) {
                    files.push(entry.into_path());
                }
            }
        } else {
            log::warn!("Skipping inaccessible path: {}", path.display());
        }
    }

    files
}
