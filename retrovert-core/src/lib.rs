//! Core library for batch conversion of video files to legacy MPEG-1 using
//! ffmpeg and ffprobe.
//!
//! This crate provides video file discovery, stream probing, interactive
//! track selection, subtitle extraction and burn-in, progress-tracked
//! transcoding and collision-free output naming.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use retrovert_core::{CoreConfig, EventDispatcher, FirstPicker, process_videos};
//! use std::path::PathBuf;
//!
//! let config = CoreConfig::new(PathBuf::from("/home/user/Converted"));
//! let files = retrovert_core::find_video_files(&config, &[PathBuf::from("/home/user/videos")]);
//!
//! let dispatcher = EventDispatcher::new();
//! let mut picker = FirstPicker;
//! let report = process_videos(&config, &files, &mut picker, &dispatcher).unwrap();
//! println!("{} converted, {} failed", report.succeeded.len(), report.failed.len());
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod events;
pub mod external;
pub mod fonts;
pub mod output_path;
pub mod probe;
pub mod processing;
pub mod progress;
pub mod selection;
pub mod subtitles;
pub mod utils;

// Re-exports for public API
pub use config::{CoreConfig, TargetFormat};
pub use discovery::find_video_files;
pub use error::{CoreError, CoreResult};
pub use events::{Event, EventDispatcher, EventHandler, Stage};
pub use output_path::reserve_output_path;
pub use probe::{StreamDescriptor, StreamKind, probe_streams};
pub use processing::{ConversionRecord, ConversionReport, FailedJob, process_videos};
pub use progress::{ProgressSnapshot, ProgressTracker};
pub use selection::{FirstPicker, StdinPicker, StreamPicker};
pub use utils::{format_bytes, format_duration_seconds, parse_ffmpeg_time};
