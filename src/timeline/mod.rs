//! Timeline merging - interleave original and translation caption tracks
//!
//! Pure function module:
//! - Takes two start-ordered segment sequences as input
//! - Returns one start-ordered, non-overlapping sequence with pause markers
//! - Never mutates its inputs and never fails on malformed timings

mod ordering;
mod pause;
mod sanitize;
mod validate;


use std::borrow::Cow;
use std::cmp::Ordering;

use crate::types::{Lane, Segment, TimingPayload, TrackKind};

pub use ordering::{compare_tokens, TIME_EPSILON};
pub use sanitize::MIN_DURATION_SECONDS;
pub use validate::{validate_timeline, TimelineViolation};

use ordering::compare_times;
use pause::{pause_midpoint, PauseIds};
use sanitize::sanitize_segment;

/// Default gap above which a pause marker is synthesized (90 ms).
pub const DEFAULT_PAUSE_THRESHOLD_SECONDS: f64 = 0.09;

/// Merge-time options
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MergeOptions {
    /// Gap size above which a pause marker is inserted
    pub pause_threshold_seconds: Option<f64>,
}

impl MergeOptions {
    pub fn with_pause_threshold(seconds: f64) -> Self {
        Self {
            pause_threshold_seconds: Some(seconds),
        }
    }

    /// Threshold actually applied; missing, non-finite or non-positive values use the default
    pub fn effective_pause_threshold(&self) -> f64 {
        match self.pause_threshold_seconds {
            Some(seconds) if seconds.is_finite() && seconds > 0.0 => seconds,
            _ => DEFAULT_PAUSE_THRESHOLD_SECONDS,
        }
    }
}

/// Merge two caption tracks into one ordered, non-overlapping timeline
///
/// When either track is empty the other is returned borrowed, untouched.
/// Otherwise segments are emitted by start time (original first on ties),
/// sanitized, shifted past their predecessor when they would overlap it, and
/// separated by pause segments where the gap exceeds the pause threshold.
pub fn merge_tracks<'a>(
    original: &'a [Segment],
    translation: &'a [Segment],
    options: MergeOptions,
) -> Cow<'a, [Segment]> {
    if translation.is_empty() {
        return Cow::Borrowed(original);
    }
    if original.is_empty() {
        return Cow::Borrowed(translation);
    }

    let mut builder = TimelineBuilder::new(
        options.effective_pause_threshold(),
        original.len() + translation.len(),
    );
    let mut originals = original
        .iter()
        .map(|segment| sanitize_segment(segment, Lane::Original))
        .peekable();
    let mut translations = translation
        .iter()
        .map(|segment| sanitize_segment(segment, Lane::Translation))
        .peekable();

    loop {
        let next = match (originals.peek(), translations.peek()) {
            (Some(a), Some(b)) => {
                if compare_times(b.t0, a.t0) == Ordering::Less {
                    translations.next()
                } else {
                    originals.next()
                }
            }
            (Some(_), None) => originals.next(),
            (None, Some(_)) => translations.next(),
            (None, None) => break,
        };
        if let Some(segment) = next {
            builder.push(segment);
        }
    }

    Cow::Owned(builder.finish())
}

/// Merge two payloads into an owned `combined` payload
pub fn merge_payloads(
    original: &TimingPayload,
    translation: &TimingPayload,
    options: MergeOptions,
) -> TimingPayload {
    let segments = merge_tracks(&original.segments, &translation.segments, options);
    TimingPayload::new(TrackKind::Combined, segments.into_owned())
}

struct TimelineBuilder {
    segments: Vec<Segment>,
    pause_threshold: f64,
    pause_ids: PauseIds,
}

impl TimelineBuilder {
    fn new(pause_threshold: f64, capacity: usize) -> Self {
        Self {
            segments: Vec::with_capacity(capacity),
            pause_threshold,
            pause_ids: PauseIds::default(),
        }
    }

    fn push(&mut self, mut segment: Segment) {
        if let Some(prev_end) = self.segments.last().map(|prev| prev.t1) {
            if let Some(at) = pause_midpoint(prev_end, segment.t0, self.pause_threshold) {
                let pause = self.pause_ids.pause_at(at);
                tracing::debug!(pause = %pause.id, at, before = %segment.id, "inserted pause");
                self.segments.push(pause);
            }
            if compare_times(segment.t0, prev_end) != Ordering::Greater {
                let delta = prev_end + MIN_DURATION_SECONDS - segment.t0;
                tracing::debug!(segment = %segment.id, delta, "shifted overlapping segment");
                shift_segment(&mut segment, delta);
            }
        }
        self.segments.push(segment);
    }

    fn finish(self) -> Vec<Segment> {
        self.segments
    }
}

fn shift_segment(segment: &mut Segment, delta: f64) {
    segment.t0 += delta;
    segment.t1 += delta;
    for token in &mut segment.tokens {
        token.t0 += delta;
        token.t1 += delta;
    }
}
