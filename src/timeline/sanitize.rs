use crate::types::{Lane, Segment, WordToken};

use super::ordering::sort_tokens;

/// Shortest duration any token or segment may have after sanitizing (8 ms).
pub const MIN_DURATION_SECONDS: f64 = 0.008;

/// Clone a segment with finite, floored timings and a lane on every token.
///
/// `track` is the lane of the input sequence the segment came from; tokens
/// without a recognizable lane inherit it.
pub(crate) fn sanitize_segment(segment: &Segment, track: Lane) -> Segment {
    let start_fallback = finite_or(segment.t0, 0.0);
    let end_fallback = finite_or(segment.t1, 0.0);

    let mut tokens: Vec<WordToken> = segment
        .tokens
        .iter()
        .map(|token| sanitize_token(token, track, start_fallback, end_fallback))
        .collect();
    sort_tokens(&mut tokens);

    let (t0, t1) = token_bounds(&tokens).unwrap_or((start_fallback, end_fallback));
    let (t0, t1) = floor_duration(t0, t1);
    tracing::trace!(segment = %segment.id, t0, t1, tokens = tokens.len(), "sanitized segment");

    Segment {
        id: segment.id.clone(),
        t0,
        t1,
        tokens,
    }
}

fn sanitize_token(token: &WordToken, track: Lane, start: f64, end: f64) -> WordToken {
    let (t0, t1) = floor_duration(finite_or(token.t0, start), finite_or(token.t1, end));
    WordToken {
        t0,
        t1,
        lane: Some(token.lane.unwrap_or(track)),
        ..token.clone()
    }
}

/// Min start and max end over `tokens`, `None` when empty.
pub(crate) fn token_bounds(tokens: &[WordToken]) -> Option<(f64, f64)> {
    let first = tokens.first()?;
    Some(tokens.iter().fold((first.t0, first.t1), |(lo, hi), token| {
        (lo.min(token.t0), hi.max(token.t1))
    }))
}

fn floor_duration(t0: f64, t1: f64) -> (f64, f64) {
    if t1 - t0 < MIN_DURATION_SECONDS {
        (t0, t0 + MIN_DURATION_SECONDS)
    } else {
        (t0, t1)
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}
