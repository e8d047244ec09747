// retrovert-cli/src/terminal.rs
//
// Terminal rendering of pipeline events: status lines per job and stage,
// plus an in-place progress bar fed by the core's percent/ETA snapshots.
// The bar is cleared before any other line is printed so progress always
// redraws on its own line.

use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

use retrovert_core::{Event, EventHandler, format_bytes, format_duration_seconds};

pub struct TerminalEventHandler {
    bar: Mutex<Option<ProgressBar>>,
}

impl TerminalEventHandler {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn clear_bar(&self) {
        if let Ok(mut guard) = self.bar.lock() {
            if let Some(bar) = guard.take() {
                bar.finish_and_clear();
            }
        }
    }

    fn progress_style() -> ProgressStyle {
        ProgressStyle::with_template("  {bar:32} {pos:>3}% | ETA: {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>.")
    }
}

impl EventHandler for TerminalEventHandler {
    fn handle(&self, event: &Event) {
        match event {
            Event::BatchStarted {
                total_files,
                output_dir,
            } => {
                println!("Found {total_files} file(s) to convert.");
                println!("Output directory: {}", output_dir.display());
            }

            Event::JobStarted {
                current_file,
                total_files,
                input,
            } => {
                self.clear_bar();
                println!();
                println!(
                    "{} {}",
                    format!("[{current_file}/{total_files}]").bold(),
                    input.display()
                );
            }

            Event::StageStarted { stage } => {
                self.clear_bar();
                println!("  {} {}...", "»".cyan(), stage.describe());
            }

            Event::StageProgress {
                percent,
                position_secs,
                total_secs,
                eta,
                ..
            } => {
                if let Ok(mut guard) = self.bar.lock() {
                    let bar = guard.get_or_insert_with(|| {
                        let bar = ProgressBar::new(100);
                        bar.set_style(Self::progress_style());
                        bar
                    });
                    bar.set_position(*percent as u64);
                    bar.set_message(format!(
                        "{}s ({} / {})",
                        eta.as_secs(),
                        format_duration_seconds(*position_secs),
                        format_duration_seconds(*total_secs)
                    ));
                }
            }

            Event::Warning { message } => {
                self.clear_bar();
                println!("  {} {}", "!".yellow().bold(), message.yellow());
            }

            Event::JobSucceeded {
                output,
                input_size,
                output_size,
                elapsed,
                ..
            } => {
                self.clear_bar();
                println!(
                    "  {} Done: {} ({} -> {} in {})",
                    "✓".green().bold(),
                    output.display(),
                    format_bytes(*input_size),
                    format_bytes(*output_size),
                    format_duration_seconds(elapsed.as_secs_f64())
                );
            }

            Event::JobFailed { input, message } => {
                self.clear_bar();
                eprintln!(
                    "  {} Failed: {}: {}",
                    "✗".red().bold(),
                    input.display(),
                    message
                );
            }

            Event::BatchComplete {
                succeeded,
                failed,
                total_files,
                elapsed,
            } => {
                self.clear_bar();
                println!();
                let elapsed = format_duration_seconds(elapsed.as_secs_f64());
                if *failed == 0 {
                    println!(
                        "{}",
                        format!(
                            "All conversions finished! {succeeded} of {total_files} file(s) converted in {elapsed}."
                        )
                        .green()
                    );
                } else {
                    println!(
                        "{}",
                        format!(
                            "Finished with failures: {succeeded} converted, {failed} failed of {total_files} file(s) in {elapsed}."
                        )
                        .yellow()
                    );
                }
            }
        }
    }
}

impl Default for TerminalEventHandler {
    fn default() -> Self {
        Self::new()
    }
}
