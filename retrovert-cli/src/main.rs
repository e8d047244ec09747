// retrovert-cli/src/main.rs
//
// Command-line entry point for the retrovert converter.
//
// Responsibilities:
// - Parsing arguments (`Cli` in cli.rs).
// - Initializing env_logger from RUST_LOG.
// - Building the CoreConfig from flags and defaults.
// - Discovering input files and invoking the core pipeline.
// - Rendering pipeline events through the terminal handler.
// - Mapping the batch outcome to the process exit code.

mod cli;
mod logging;
mod terminal;

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::Parser;
use owo_colors::OwoColorize;

use retrovert_core::{
    CoreConfig, EventDispatcher, FirstPicker, StdinPicker, StreamPicker, find_video_files,
    process_videos,
};

use crate::cli::Cli;
use crate::terminal::TerminalEventHandler;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<i32, Box<dyn std::error::Error>> {
    if cli.paths.is_empty() {
        println!("Pass files or folders to convert, e.g. `retrovert ~/Videos`.");
        return Ok(0);
    }

    let output_dir = match cli.output_dir {
        Some(dir) => dir,
        None => default_output_dir()?,
    };

    let mut config = CoreConfig::new(output_dir);
    config.ffmpeg_path = cli.ffmpeg;
    config.ffprobe_path = cli.ffprobe;
    log::debug!("Using configuration: {config:?}");

    let files = find_video_files(&config, &cli.paths);
    if files.is_empty() {
        println!("No supported video files found.");
        return Ok(0);
    }

    println!("Retrovert run started: {}", logging::get_timestamp());

    let mut dispatcher = EventDispatcher::new();
    dispatcher.add_handler(Arc::new(TerminalEventHandler::new()));

    let mut picker: Box<dyn StreamPicker> = if cli.non_interactive {
        Box::new(FirstPicker)
    } else {
        Box::new(StdinPicker)
    };

    let report = process_videos(&config, &files, picker.as_mut(), &dispatcher)?;

    // Exit status reflects per-job failures unless the caller opted back
    // into the always-succeed behavior for unattended batch runs.
    if report.all_succeeded() || cli.ignore_failures {
        Ok(0)
    } else {
        Ok(1)
    }
}

fn default_output_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let home = dirs::home_dir().ok_or("Failed to determine home directory")?;
    Ok(home.join("Converted"))
}
