//! Token location - map a playback clock onto the merged timeline
//!
//! Stateless: the previous match is threaded in by the caller and handed back
//! unchanged while the clock stays within it, which keeps the highlight from
//! flickering across token boundaries under clock jitter.

mod seek;

#[cfg(test)]
mod tests;

use crate::error::{Result, SyncError};
use crate::timeline::TIME_EPSILON;
use crate::types::{Segment, TimingPayload, TokenMatch, WordToken};

pub use seek::{
    is_large_seek, SeekThreshold, DEFAULT_LARGE_SEEK_SECONDS, LARGE_SEEK_RANGE_SECONDS,
};

/// Default band past a token's end during which it stays highlighted (50 ms).
pub const DEFAULT_STICKY_TOLERANCE_SECONDS: f64 = 0.05;

/// Locate-time options
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocatorOptions {
    pub sticky_tolerance_seconds: f64,
}

impl LocatorOptions {
    pub fn with_sticky_tolerance(seconds: f64) -> Result<Self> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(SyncError::new(format!(
                "sticky tolerance must be a non-negative number of seconds, got {seconds}"
            )));
        }
        Ok(Self {
            sticky_tolerance_seconds: seconds,
        })
    }
}

impl Default for LocatorOptions {
    fn default() -> Self {
        Self {
            sticky_tolerance_seconds: DEFAULT_STICKY_TOLERANCE_SECONDS,
        }
    }
}

/// Everything a playback driver needs to run the locator tick by tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LocatorSettings {
    pub options: LocatorOptions,
    pub seek: SeekThreshold,
}

/// Find the token to highlight at `clock_seconds`
///
/// Returns `last_match` unchanged while the clock is still inside that token,
/// or within the sticky tolerance past its end before the next token starts.
/// Otherwise bisects the whole timeline: a token covering the clock wins,
/// else the nearest one. Clocks outside the timeline clamp to its first or
/// last token. `None` only when the timeline holds no tokens.
pub fn locate(
    payload: &TimingPayload,
    clock_seconds: f64,
    last_match: Option<TokenMatch>,
) -> Option<TokenMatch> {
    locate_with(
        payload,
        clock_seconds,
        last_match,
        &LocatorOptions::default(),
    )
}

/// [`locate`] with explicit options
pub fn locate_with(
    payload: &TimingPayload,
    clock_seconds: f64,
    last_match: Option<TokenMatch>,
    options: &LocatorOptions,
) -> Option<TokenMatch> {
    let segments = &payload.segments;
    let valid_last = last_match.filter(|at| payload.token(*at).is_some());

    if clock_seconds.is_nan() {
        return valid_last.or_else(|| first_token(segments));
    }
    if clock_seconds.is_infinite() {
        return if clock_seconds > 0.0 {
            last_token(segments)
        } else {
            first_token(segments)
        };
    }

    if let Some(previous) = valid_last {
        if is_sticky(segments, previous, clock_seconds, options.sticky_tolerance_seconds) {
            return Some(previous);
        }
    }
    search(segments, clock_seconds)
}

fn is_sticky(segments: &[Segment], at: TokenMatch, clock: f64, tolerance: f64) -> bool {
    let Some(token) = token_at(segments, at) else {
        return false;
    };
    if clock < token.t0 - TIME_EPSILON {
        return false;
    }
    if clock < token.t1 {
        return true;
    }
    if clock >= token.t1 + tolerance {
        return false;
    }
    next_token(segments, at).map_or(true, |next| clock < next.t0)
}

fn search(segments: &[Segment], clock: f64) -> Option<TokenMatch> {
    // Segments are sorted and non-overlapping, so their ends are monotonic.
    let split = segments.partition_point(|segment| segment.t1 <= clock);
    let before = segments[..split]
        .iter()
        .rposition(|segment| !segment.tokens.is_empty());
    let after = segments[split..]
        .iter()
        .position(|segment| !segment.tokens.is_empty())
        .map(|offset| split + offset);

    let segment_index = match (before, after) {
        (_, Some(a)) if segments[a].t0 <= clock => a,
        (Some(b), Some(a)) => {
            if segments[a].t0 - clock < clock - segments[b].t1 {
                a
            } else {
                b
            }
        }
        (Some(b), None) => b,
        (None, Some(a)) => a,
        (None, None) => return None,
    };
    let token_index = nearest_token(&segments[segment_index].tokens, clock);
    Some(TokenMatch::new(segment_index, token_index))
}

/// Index of the token covering `clock`, else the closest one (earliest on ties)
fn nearest_token(tokens: &[WordToken], clock: f64) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (index, token) in tokens.iter().enumerate() {
        if token.t0 <= clock && clock < token.t1 {
            return index;
        }
        let distance = if clock < token.t0 {
            token.t0 - clock
        } else {
            clock - token.t1
        };
        if distance < best_distance {
            best = index;
            best_distance = distance;
        }
    }
    best
}

fn token_at(segments: &[Segment], at: TokenMatch) -> Option<&WordToken> {
    segments
        .get(at.segment_index)
        .and_then(|segment| segment.tokens.get(at.token_index))
}

fn next_token(segments: &[Segment], at: TokenMatch) -> Option<&WordToken> {
    let current = segments.get(at.segment_index)?;
    current.tokens.get(at.token_index + 1).or_else(|| {
        segments[at.segment_index + 1..]
            .iter()
            .find_map(|segment| segment.tokens.first())
    })
}

fn first_token(segments: &[Segment]) -> Option<TokenMatch> {
    segments
        .iter()
        .position(|segment| !segment.tokens.is_empty())
        .map(|segment_index| TokenMatch::new(segment_index, 0))
}

fn last_token(segments: &[Segment]) -> Option<TokenMatch> {
    segments
        .iter()
        .rposition(|segment| !segment.tokens.is_empty())
        .map(|segment_index| {
            TokenMatch::new(segment_index, segments[segment_index].tokens.len() - 1)
        })
}
