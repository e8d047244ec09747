//! Interactive stream selection.
//!
//! Choosing a track is abstracted behind the [`StreamPicker`] trait so the
//! pipeline never touches stdin directly: the CLI supplies a prompting
//! picker, batch mode supplies [`FirstPicker`], and tests supply scripted
//! answers. A picker is only consulted with a non-empty candidate list;
//! empty-list policy (default audio track, skip subtitles) belongs to the
//! pipeline.

use std::io::{self, BufRead, Write};

use crate::probe::{StreamDescriptor, StreamKind};

/// Chooses one stream out of a non-empty candidate list.
///
/// Returns the *position* of the chosen descriptor within `streams`, always
/// strictly less than `streams.len()`.
pub trait StreamPicker {
    fn pick(&mut self, kind: StreamKind, streams: &[StreamDescriptor]) -> usize;
}

/// Validates one line of user input against a candidate count.
///
/// Accepts a non-negative integer strictly less than `len`; anything else
/// (non-numeric, out of range, empty) is rejected and the caller falls back
/// to the first candidate.
#[must_use]
pub fn resolve_choice(input: &str, len: usize) -> Option<usize> {
    let choice = input.trim().parse::<usize>().ok()?;
    (choice < len).then_some(choice)
}

/// Prompting picker reading one selection per call from stdin.
#[derive(Debug, Default)]
pub struct StdinPicker;

impl StdinPicker {
    fn read_choice(kind: StreamKind, len: usize) -> usize {
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            line.clear();
        }
        match resolve_choice(&line, len) {
            Some(choice) => choice,
            None => {
                eprintln!(
                    "Invalid choice, defaulting to the first {} track.",
                    kind.label()
                );
                0
            }
        }
    }
}

impl StreamPicker for StdinPicker {
    fn pick(&mut self, kind: StreamKind, streams: &[StreamDescriptor]) -> usize {
        println!("\nAvailable {} tracks:", kind.label());
        for (position, stream) in streams.iter().enumerate() {
            println!(
                "  [{position}] stream #{} | lang={} | title={}",
                stream.index,
                stream.language.as_deref().unwrap_or("unknown"),
                stream.title.as_deref().unwrap_or("")
            );
        }
        print!("Pick {} track number: ", kind.label());
        let _ = io::stdout().flush();

        Self::read_choice(kind, streams.len())
    }
}

/// Non-interactive picker that always takes the first candidate.
#[derive(Debug, Default)]
pub struct FirstPicker;

impl StreamPicker for FirstPicker {
    fn pick(&mut self, _kind: StreamKind, _streams: &[StreamDescriptor]) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_in_range_integers() {
        assert_eq!(resolve_choice("0", 3), Some(0));
        assert_eq!(resolve_choice("2", 3), Some(2));
        assert_eq!(resolve_choice(" 1 \n", 3), Some(1));
    }

    #[test]
    fn rejects_everything_else() {
        // Each of these must fall back to the first candidate.
        assert_eq!(resolve_choice("abc", 3), None);
        assert_eq!(resolve_choice("5", 3), None);
        assert_eq!(resolve_choice("3", 3), None);
        assert_eq!(resolve_choice("", 3), None);
        assert_eq!(resolve_choice("-1", 3), None);
        assert_eq!(resolve_choice("1.5", 3), None);
    }

    #[test]
    fn first_picker_always_answers_zero() {
        let streams = vec![
            StreamDescriptor {
                index: 1,
                kind: StreamKind::Audio,
                language: Some("eng".into()),
                title: None,
                filename: None,
            },
            StreamDescriptor {
                index: 2,
                kind: StreamKind::Audio,
                language: Some("jpn".into()),
                title: None,
                filename: None,
            },
        ];
        let mut picker = FirstPicker;
        assert_eq!(picker.pick(StreamKind::Audio, &streams), 0);
    }
}
