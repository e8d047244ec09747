//! Typed events emitted by the conversion pipeline.
//!
//! The core never prints to the terminal directly; it emits [`Event`]
//! values through an [`EventDispatcher`] and lets the consumer decide how
//! to render them. The CLI installs a terminal handler; tests install
//! collecting handlers.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// The externally-visible stages of a single conversion job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ExtractFonts,
    ExtractSubtitle,
    BurnSubtitles,
    Transcode,
}

impl Stage {
    /// Short human-readable description.
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Stage::ExtractFonts => "Extracting font attachments",
            Stage::ExtractSubtitle => "Extracting subtitle track",
            Stage::BurnSubtitles => "Burning in subtitles",
            Stage::Transcode => "Converting to MPEG-1",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Event {
    BatchStarted {
        total_files: usize,
        output_dir: PathBuf,
    },

    JobStarted {
        current_file: usize,
        total_files: usize,
        input: PathBuf,
    },

    StageStarted {
        stage: Stage,
    },

    StageProgress {
        stage: Stage,
        percent: f64,
        position_secs: f64,
        total_secs: f64,
        eta: Duration,
    },

    Warning {
        message: String,
    },

    JobSucceeded {
        input: PathBuf,
        output: PathBuf,
        input_size: u64,
        output_size: u64,
        elapsed: Duration,
    },

    JobFailed {
        input: PathBuf,
        message: String,
    },

    BatchComplete {
        succeeded: usize,
        failed: usize,
        total_files: usize,
        elapsed: Duration,
    },
}

pub trait EventHandler: Send + Sync {
    fn handle(&self, event: &Event);
}

/// Fans events out to every registered handler, in registration order.
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn EventHandler>>,
}

impl EventDispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Arc<dyn EventHandler>) {
        self.handlers.push(handler);
    }

    pub fn emit(&self, event: Event) {
        for handler in &self.handlers {
            handler.handle(&event);
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
