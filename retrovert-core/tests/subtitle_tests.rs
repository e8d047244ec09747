// retrovert-core/tests/subtitle_tests.rs

use retrovert_core::subtitles::{SubtitleCue, parse_ass, render_srt};

const SAMPLE_ASS: &str = "\
[Script Info]
Title: Conversion sample
ScriptType: v4.00+

[V4+ Styles]
Format: Name, Fontname, Fontsize
Style: Default,Open Sans,48

[Events]
Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text
Dialogue: 0,0:00:01.00,0:00:04.00,Default,,0,0,0,,First line
Dialogue: 0,0:00:05.50,0:00:08.25,Default,,0,0,0,,{\\i1}Second{\\i0} line,\\Nwith a break
Dialogue: 0,0:01:02.04,0:01:03.96,Default,,0,0,0,,Third line
";

#[test]
fn conversion_preserves_cue_count_and_timing() {
    let cues = parse_ass(SAMPLE_ASS);
    assert_eq!(cues.len(), 3);

    // ASS timing has centisecond resolution; converted values must match exactly.
    assert_eq!(cues[0].start_ms, 1_000);
    assert_eq!(cues[0].end_ms, 4_000);
    assert_eq!(cues[1].start_ms, 5_500);
    assert_eq!(cues[1].end_ms, 8_250);
    assert_eq!(cues[2].start_ms, 62_040);
    assert_eq!(cues[2].end_ms, 63_960);
}

#[test]
fn styling_is_stripped_but_breaks_survive() {
    let cues = parse_ass(SAMPLE_ASS);
    assert_eq!(cues[1].text, "Second line,\nwith a break");
}

#[test]
fn rendered_srt_is_numbered_and_timed() {
    let cues = parse_ass(SAMPLE_ASS);
    let srt = render_srt(&cues);

    let expected = "\
1
00:00:01,000 --> 00:00:04,000
First line

2
00:00:05,500 --> 00:00:08,250
Second line,
with a break

3
00:01:02,040 --> 00:01:03,960
Third line

";
    assert_eq!(srt, expected);
}

#[test]
fn render_handles_manual_cues() {
    let cues = vec![SubtitleCue {
        start_ms: 3_661_042,
        end_ms: 3_662_000,
        text: "edge".to_string(),
    }];
    let srt = render_srt(&cues);
    assert!(srt.contains("01:01:01,042 --> 01:01:02,000"));
}

#[test]
fn empty_document_yields_no_cues() {
    assert!(parse_ass("").is_empty());
    assert!(parse_ass("[Script Info]\nTitle: x\n").is_empty());
}
