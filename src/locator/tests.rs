use super::*;
use crate::types::{Lane, Segment, TimingPayload, TokenMatch, TrackKind, WordToken};

fn segment(id: &str, words: &[(f64, f64)]) -> Segment {
    let tokens: Vec<WordToken> = words
        .iter()
        .enumerate()
        .map(|(idx, &(t0, t1))| WordToken {
            id: format!("{id}-w{idx}"),
            text: format!("word{idx}"),
            t0,
            t1,
            lane: Some(Lane::Original),
            seg_id: id.to_string(),
        })
        .collect();
    Segment {
        id: id.to_string(),
        t0: words.first().map(|w| w.0).unwrap_or(0.0),
        t1: words.last().map(|w| w.1).unwrap_or(0.0),
        tokens,
    }
}

fn payload(segments: Vec<Segment>) -> TimingPayload {
    TimingPayload::new(TrackKind::Combined, segments)
}

fn three_words() -> TimingPayload {
    payload(vec![segment("s0", &[(0.0, 0.5), (0.5, 1.1), (1.1, 1.6)])])
}

fn spread_timeline() -> TimingPayload {
    payload(vec![
        segment("s0", &[(0.0, 0.5), (0.5, 1.0)]),
        segment("s1", &[(2.0, 2.4), (2.4, 3.0)]),
        segment("s2", &[(3.0, 3.2), (3.3, 3.6)]),
    ])
}

#[test]
fn clock_inside_token_is_exact_match() {
    assert_eq!(locate(&three_words(), 0.6, None), Some(TokenMatch::new(0, 1)));
}

#[test]
fn token_start_is_inclusive_and_end_exclusive() {
    let timeline = three_words();
    assert_eq!(locate(&timeline, 0.5, None), Some(TokenMatch::new(0, 1)));
    assert_eq!(locate(&timeline, 1.1, None), Some(TokenMatch::new(0, 2)));
}

#[test]
fn clock_inside_last_match_returns_it() {
    let last = TokenMatch::new(0, 2);
    assert_eq!(locate(&three_words(), 1.58, Some(last)), Some(last));
}

#[test]
fn small_overrun_past_end_stays_sticky() {
    let timeline = spread_timeline();
    let last = TokenMatch::new(0, 1);
    // 1.0 is the end of s0; s1 starts at 2.0
    assert_eq!(locate(&timeline, 1.03, Some(last)), Some(last));
    // without the hint, the nearest token is the same one
    assert_eq!(locate(&timeline, 1.03, None), Some(last));
}

#[test]
fn overrun_into_next_token_moves_on() {
    let last = TokenMatch::new(0, 0);
    assert_eq!(
        locate(&three_words(), 0.52, Some(last)),
        Some(TokenMatch::new(0, 1))
    );
}

#[test]
fn stickiness_prefers_last_match_in_gap() {
    let timeline = spread_timeline();
    let last = TokenMatch::new(2, 0);
    // 3.23 sits in the 3.2..3.3 gap, closer to 3.2 but still within tolerance
    assert_eq!(locate(&timeline, 3.23, Some(last)), Some(last));
    let tight = LocatorOptions::with_sticky_tolerance(0.0).unwrap();
    assert_eq!(
        locate_with(&timeline, 3.27, Some(last), &tight),
        Some(TokenMatch::new(2, 1))
    );
}

#[test]
fn backward_seek_ignores_last_match() {
    let timeline = spread_timeline();
    let last = locate(&timeline, 3.1, None).unwrap();
    assert_eq!(last, TokenMatch::new(2, 0));
    assert_eq!(locate(&timeline, 0.2, Some(last)), Some(TokenMatch::new(0, 0)));
}

#[test]
fn forward_seek_ignores_last_match() {
    let timeline = spread_timeline();
    assert_eq!(
        locate(&timeline, 2.5, Some(TokenMatch::new(0, 0))),
        Some(TokenMatch::new(1, 1))
    );
}

#[test]
fn clock_between_segments_picks_nearest() {
    let timeline = spread_timeline();
    assert_eq!(locate(&timeline, 1.2, None), Some(TokenMatch::new(0, 1)));
    assert_eq!(locate(&timeline, 1.9, None), Some(TokenMatch::new(1, 0)));
}

#[test]
fn out_of_range_clock_clamps_to_boundary() {
    let timeline = spread_timeline();
    assert_eq!(locate(&timeline, -4.0, None), Some(TokenMatch::new(0, 0)));
    assert_eq!(locate(&timeline, 99.0, None), Some(TokenMatch::new(2, 1)));
    assert_eq!(
        locate(&timeline, f64::INFINITY, None),
        Some(TokenMatch::new(2, 1))
    );
    assert_eq!(
        locate(&timeline, f64::NEG_INFINITY, None),
        Some(TokenMatch::new(0, 0))
    );
}

#[test]
fn nan_clock_keeps_last_match() {
    let timeline = spread_timeline();
    let last = TokenMatch::new(1, 1);
    assert_eq!(locate(&timeline, f64::NAN, Some(last)), Some(last));
    assert_eq!(locate(&timeline, f64::NAN, None), Some(TokenMatch::new(0, 0)));
}

#[test]
fn stale_last_match_is_ignored() {
    let timeline = three_words();
    let stale = TokenMatch::new(4, 0);
    assert_eq!(locate(&timeline, 0.1, Some(stale)), Some(TokenMatch::new(0, 0)));
    assert_eq!(locate(&timeline, f64::NAN, Some(stale)), Some(TokenMatch::new(0, 0)));
}

#[test]
fn empty_segments_are_skipped() {
    let timeline = payload(vec![
        segment("s0", &[(0.0, 0.5)]),
        Segment {
            id: "empty".to_string(),
            t0: 0.6,
            t1: 0.7,
            tokens: Vec::new(),
        },
        segment("s2", &[(0.8, 1.0)]),
    ]);
    assert_eq!(locate(&timeline, 0.6, None), Some(TokenMatch::new(0, 0)));
    assert_eq!(locate(&timeline, 0.75, None), Some(TokenMatch::new(2, 0)));
}

#[test]
fn empty_timeline_has_no_match() {
    assert_eq!(locate(&payload(Vec::new()), 1.0, None), None);
    assert_eq!(
        locate(&payload(Vec::new()), 1.0, Some(TokenMatch::new(0, 0))),
        None
    );
}

#[test]
fn zero_width_pause_token_is_reachable() {
    let mut pause = segment("pause-0", &[(0.75, 0.75)]);
    pause.tokens[0].text.clear();
    let timeline = payload(vec![
        segment("s0", &[(0.0, 0.5)]),
        pause,
        segment("s1", &[(1.0, 1.5)]),
    ]);
    assert_eq!(locate(&timeline, 0.75, None), Some(TokenMatch::new(1, 0)));
    assert_eq!(locate(&timeline, 0.7, None), Some(TokenMatch::new(1, 0)));
}

#[test]
fn sticky_tolerance_rejects_invalid_values() {
    assert!(LocatorOptions::with_sticky_tolerance(-0.1).is_err());
    assert!(LocatorOptions::with_sticky_tolerance(f64::NAN).is_err());
    assert_eq!(
        LocatorOptions::default().sticky_tolerance_seconds,
        DEFAULT_STICKY_TOLERANCE_SECONDS
    );
}
