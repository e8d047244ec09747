//! Incremental progress estimation for external transcode runs.
//!
//! ffmpeg announces the input duration once (`Duration: H:MM:SS.ss`) early
//! in its diagnostic output and then reports the current position
//! (`time=H:MM:SS.ss`) as it encodes. [`ProgressTracker`] is fed that text a
//! line at a time and turns it into percent-complete plus an ETA derived
//! from wall-clock elapsed time. Until the duration announcement has been
//! seen no snapshot is produced, so there is no division by an unknown
//! total. The tracker is decoupled from process spawning and can be driven
//! with literal text fixtures.

use std::time::{Duration, Instant};

use crate::utils::parse_ffmpeg_time;

/// A single progress observation for one external invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSnapshot {
    /// Percent of the media duration processed so far (0.0 ..= 100.0)
    pub percent: f64,

    /// Current media position in seconds
    pub position_secs: f64,

    /// Total media duration in seconds
    pub total_secs: f64,

    /// Estimated wall-clock time remaining
    pub eta: Duration,
}

/// Streaming parser for one ffmpeg invocation's diagnostic output.
///
/// Two phases: waiting for the duration announcement, then tracking
/// position ticks against it. Scoped to a single invocation and discarded
/// when it ends.
#[derive(Debug)]
pub struct ProgressTracker {
    total_secs: Option<f64>,
    started: Instant,
}

impl ProgressTracker {
    #[must_use]
    pub fn new() -> Self {
        Self {
            total_secs: None,
            started: Instant::now(),
        }
    }

    /// The total media duration, once seen.
    #[must_use]
    pub fn total_secs(&self) -> Option<f64> {
        self.total_secs
    }

    /// Feeds one raw output line, returning a snapshot when the line
    /// carries a position tick and the total duration is already known.
    pub fn observe_line(&mut self, line: &str) -> Option<ProgressSnapshot> {
        if let Some(total) = scan_timestamp(line, "Duration: ") {
            self.observe_duration(total);
            return None;
        }
        let position = scan_timestamp(line, "time=")?;
        self.observe_position(position)
    }

    /// Records the total media duration. Only the first announcement
    /// counts; later ones (e.g. from additional inputs) are ignored.
    pub fn observe_duration(&mut self, secs: f64) {
        if self.total_secs.is_none() && secs.is_finite() && secs > 0.0 {
            self.total_secs = Some(secs);
        }
    }

    /// Records the current media position, returning a snapshot if the
    /// total duration is known.
    pub fn observe_position(&mut self, secs: f64) -> Option<ProgressSnapshot> {
        let total = self.total_secs?;
        let percent = (secs / total * 100.0).clamp(0.0, 100.0);

        let wall_elapsed = self.started.elapsed().as_secs_f64();
        let eta_secs = if percent > 0.0 {
            ((wall_elapsed / percent) * (100.0 - percent)).max(0.0)
        } else {
            0.0
        };
        let eta = if eta_secs.is_finite() {
            Duration::from_secs_f64(eta_secs)
        } else {
            Duration::ZERO
        };

        Some(ProgressSnapshot {
            percent,
            position_secs: secs,
            total_secs: total,
            eta,
        })
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Finds `marker` in `line` and parses the `H:MM:SS.ss` token that follows
/// it, stopping at the first comma or whitespace.
fn scan_timestamp(line: &str, marker: &str) -> Option<f64> {
    let start = line.find(marker)? + marker.len();
    let token = line[start..]
        .split(|c: char| c == ',' || c.is_whitespace())
        .next()?;
    parse_ffmpeg_time(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halfway_position_is_fifty_percent() {
        let mut tracker = ProgressTracker::new();
        assert!(tracker.observe_line("Duration: 00:02:00.00").is_none());
        let snap = tracker
            .observe_line("frame= 100 fps= 25 time=00:01:00.00 bitrate= 600k")
            .unwrap();
        assert!((snap.percent - 50.0).abs() < 1e-9);
        assert!((snap.position_secs - 60.0).abs() < 1e-9);
        assert!((snap.total_secs - 120.0).abs() < 1e-9);
    }

    #[test]
    fn no_snapshot_before_duration_is_seen() {
        let mut tracker = ProgressTracker::new();
        assert!(tracker.observe_line("time=00:01:00.00").is_none());
        assert!(tracker.observe_position(60.0).is_none());
    }

    #[test]
    fn duration_line_with_trailing_fields() {
        let mut tracker = ProgressTracker::new();
        tracker.observe_line("  Duration: 00:02:00.00, start: 0.000000, bitrate: 1000 kb/s");
        assert_eq!(tracker.total_secs(), Some(120.0));
    }

    #[test]
    fn first_duration_announcement_wins() {
        let mut tracker = ProgressTracker::new();
        tracker.observe_duration(120.0);
        tracker.observe_duration(300.0);
        assert_eq!(tracker.total_secs(), Some(120.0));
    }

    #[test]
    fn unparseable_position_is_ignored() {
        let mut tracker = ProgressTracker::new();
        tracker.observe_duration(120.0);
        assert!(tracker.observe_line("time=N/A bitrate=N/A").is_none());
        assert!(tracker.observe_line("no markers at all").is_none());
    }

    #[test]
    fn position_is_clamped_to_full() {
        let mut tracker = ProgressTracker::new();
        tracker.observe_duration(60.0);
        let snap = tracker.observe_position(90.0).unwrap();
        assert!((snap.percent - 100.0).abs() < 1e-9);
    }

    #[test]
    fn zero_or_bogus_durations_are_rejected() {
        let mut tracker = ProgressTracker::new();
        tracker.observe_duration(0.0);
        tracker.observe_duration(f64::NAN);
        assert!(tracker.total_secs().is_none());
        assert!(tracker.observe_position(10.0).is_none());
    }
}
