//! Conversion pipeline orchestration.

pub mod pipeline;

pub use pipeline::{ConversionRecord, ConversionReport, FailedJob, process_videos};
