// ============================================================================
// retrovert-core/src/processing/pipeline.rs
// ============================================================================
//
// PIPELINE: Batch conversion orchestration
//
// Drives each input file through the conversion sequence: probe streams,
// consult the picker, then either [extract fonts -> extract subtitle ->
// burn-in -> transcode] or [transcode directly with explicit stream
// mapping]. Jobs run strictly one at a time; a failed job is reported and
// the batch moves on to the next file. Per-job temporaries live in a
// scratch value whose Drop removes them, so cleanup happens on success and
// on every early error return alike.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::config::{CoreConfig, OUTPUT_EXTENSION};
use crate::error::CoreResult;
use crate::events::{Event, EventDispatcher, Stage};
use crate::external::check_dependency;
use crate::external::ffmpeg::{burn_subtitles, transcode_to_target};
use crate::fonts::extract_fonts;
use crate::output_path::reserve_output_path;
use crate::probe::{StreamKind, probe_streams};
use crate::selection::StreamPicker;
use crate::subtitles::extract_subtitle;
use crate::utils::get_filename_stem;

/// A successfully converted file.
#[derive(Debug, Clone)]
pub struct ConversionRecord {
    pub input: PathBuf,
    pub output: PathBuf,
    pub input_size: u64,
    pub output_size: u64,
    pub elapsed: Duration,
}

/// A job that failed, with the error that stopped it.
#[derive(Debug)]
pub struct FailedJob {
    pub input: PathBuf,
    pub error: crate::error::CoreError,
}

/// Outcome of one batch run.
#[derive(Debug, Default)]
pub struct ConversionReport {
    pub succeeded: Vec<ConversionRecord>,
    pub failed: Vec<FailedJob>,
}

impl ConversionReport {
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Per-job temporary artifacts, all inside the output directory.
///
/// Removal happens in Drop and is idempotent, so it covers success, early
/// error returns and double cleanup equally.
struct JobScratch {
    ass_file: PathBuf,
    srt_file: PathBuf,
    fonts_dir: PathBuf,
    temp_container: PathBuf,
}

impl JobScratch {
    fn new(output_dir: &Path, stem: &str) -> Self {
        Self {
            ass_file: output_dir.join(format!("{stem}_temp.ass")),
            srt_file: output_dir.join(format!("{stem}.srt")),
            fonts_dir: output_dir.join(format!("{stem}_fonts")),
            temp_container: output_dir.join(format!("{stem}_temp.mkv")),
        }
    }

    fn cleanup(&self) {
        for file in [&self.ass_file, &self.srt_file, &self.temp_container] {
            if file.exists() {
                if let Err(err) = std::fs::remove_file(file) {
                    log::warn!("Failed to remove temporary {}: {}", file.display(), err);
                }
            }
        }
        if self.fonts_dir.exists() {
            if let Err(err) = std::fs::remove_dir_all(&self.fonts_dir) {
                log::warn!(
                    "Failed to remove fonts directory {}: {}",
                    self.fonts_dir.display(),
                    err
                );
            }
        }
    }
}

impl Drop for JobScratch {
    fn drop(&mut self) {
        self.cleanup();
    }
}

/// Processes a batch of video files according to `config`.
///
/// The dependency check runs once up front and is fatal to the whole run;
/// everything after that is per-job. Individual job failures are reported
/// through the dispatcher and collected in the returned report without
/// aborting the batch.
pub fn process_videos(
    config: &CoreConfig,
    files: &[PathBuf],
    picker: &mut dyn StreamPicker,
    dispatcher: &EventDispatcher,
) -> CoreResult<ConversionReport> {
    check_dependency(config.ffmpeg_bin(), "ffmpeg")?;
    check_dependency(config.ffprobe_bin(), "ffprobe")?;
    std::fs::create_dir_all(&config.output_dir)?;

    let batch_start = Instant::now();
    dispatcher.emit(Event::BatchStarted {
        total_files: files.len(),
        output_dir: config.output_dir.clone(),
    });

    let mut report = ConversionReport::default();
    for (i, input) in files.iter().enumerate() {
        dispatcher.emit(Event::JobStarted {
            current_file: i + 1,
            total_files: files.len(),
            input: input.clone(),
        });

        let job_start = Instant::now();
        match convert_one(config, input, picker, dispatcher) {
            Ok(output) => {
                let record = ConversionRecord {
                    input: input.clone(),
                    input_size: file_size(input),
                    output_size: file_size(&output),
                    output,
                    elapsed: job_start.elapsed(),
                };
                dispatcher.emit(Event::JobSucceeded {
                    input: record.input.clone(),
                    output: record.output.clone(),
                    input_size: record.input_size,
                    output_size: record.output_size,
                    elapsed: record.elapsed,
                });
                report.succeeded.push(record);
            }
            Err(error) => {
                log::warn!("Conversion failed for {}: {}", input.display(), error);
                dispatcher.emit(Event::JobFailed {
                    input: input.clone(),
                    message: error.to_string(),
                });
                report.failed.push(FailedJob {
                    input: input.clone(),
                    error,
                });
            }
        }
    }

    dispatcher.emit(Event::BatchComplete {
        succeeded: report.succeeded.len(),
        failed: report.failed.len(),
        total_files: files.len(),
        elapsed: batch_start.elapsed(),
    });

    Ok(report)
}

/// Converts a single file, returning the final output path.
fn convert_one(
    config: &CoreConfig,
    input: &Path,
    picker: &mut dyn StreamPicker,
    dispatcher: &EventDispatcher,
) -> CoreResult<PathBuf> {
    let stem = get_filename_stem(input)?;

    let audio_streams = probe_streams(config, input, StreamKind::Audio)?;
    let audio_position = if audio_streams.is_empty() {
        dispatcher.emit(Event::Warning {
            message: "No audio streams found, defaulting to the first track.".to_string(),
        });
        0
    } else {
        picker.pick(StreamKind::Audio, &audio_streams)
    };

    let subtitle_streams = probe_streams(config, input, StreamKind::Subtitle)?;
    if subtitle_streams.is_empty() {
        dispatcher.emit(Event::Warning {
            message: "No subtitle streams found; converting without burn-in.".to_string(),
        });
        dispatcher.emit(Event::StageStarted {
            stage: Stage::Transcode,
        });
        let output = reserve_output_path(&config.output_dir, &stem, OUTPUT_EXTENSION)?;
        return run_transcode(config, dispatcher, input, output, Some(audio_position));
    }

    let position = picker.pick(StreamKind::Subtitle, &subtitle_streams);
    let subtitle_index = subtitle_streams[position].index;

    let scratch = JobScratch::new(&config.output_dir, &stem);

    dispatcher.emit(Event::StageStarted {
        stage: Stage::ExtractFonts,
    });
    let font_count = extract_fonts(config, input, &scratch.fonts_dir)?;
    log::debug!("Extracted {font_count} font attachment(s) for {stem}");

    dispatcher.emit(Event::StageStarted {
        stage: Stage::ExtractSubtitle,
    });
    extract_subtitle(
        config,
        input,
        subtitle_index,
        &scratch.ass_file,
        &scratch.srt_file,
    )?;

    dispatcher.emit(Event::StageStarted {
        stage: Stage::BurnSubtitles,
    });
    burn_subtitles(
        config,
        dispatcher,
        input,
        &scratch.srt_file,
        &scratch.fonts_dir,
        &scratch.temp_container,
    )?;

    dispatcher.emit(Event::StageStarted {
        stage: Stage::Transcode,
    });
    let output = reserve_output_path(&config.output_dir, &stem, OUTPUT_EXTENSION)?;
    run_transcode(config, dispatcher, &scratch.temp_container, output, None)
}

/// Runs the final transcode, removing a partially-written destination if it
/// fails so a later re-run starts from a clean slate.
fn run_transcode(
    config: &CoreConfig,
    dispatcher: &EventDispatcher,
    source: &Path,
    output: PathBuf,
    audio_position: Option<usize>,
) -> CoreResult<PathBuf> {
    match transcode_to_target(config, dispatcher, source, &output, audio_position) {
        Ok(()) => Ok(output),
        Err(err) => {
            if output.exists() {
                let _ = std::fs::remove_file(&output);
            }
            Err(err)
        }
    }
}

fn file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}
