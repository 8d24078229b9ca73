use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::types::Segment;

use super::ordering::TIME_EPSILON;
use super::sanitize::token_bounds;

/// A broken post-merge invariant, reported with the offending segment index.
#[derive(Debug, Clone, PartialEq)]
pub enum TimelineViolation {
    /// A segment ends before it starts, or has a non-finite bound.
    InvertedBounds { index: usize, t0: f64, t1: f64 },
    /// A segment starts before its predecessor ends.
    Overlap {
        index: usize,
        previous_end: f64,
        start: f64,
    },
    /// Segment bounds disagree with its tokens' min/max.
    BoundsMismatch {
        index: usize,
        bounds: (f64, f64),
        tokens: (f64, f64),
    },
    /// A token ends before it starts.
    InvertedToken { index: usize, token: String },
}

impl Display for TimelineViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvertedBounds { index, t0, t1 } => {
                write!(f, "segment {index} ends ({t1:.6}) before it starts ({t0:.6})")
            }
            Self::Overlap {
                index,
                previous_end,
                start,
            } => write!(
                f,
                "segment {index} starts at {start:.6} before previous segment ends at {previous_end:.6}"
            ),
            Self::BoundsMismatch {
                index,
                bounds,
                tokens,
            } => write!(
                f,
                "segment {index} bounds [{:.6}, {:.6}] do not match tokens [{:.6}, {:.6}]",
                bounds.0, bounds.1, tokens.0, tokens.1
            ),
            Self::InvertedToken { index, token } => {
                write!(f, "token {token} in segment {index} ends before it starts")
            }
        }
    }
}

impl Error for TimelineViolation {}

/// Check a merged timeline against the ordering and bounds invariants.
///
/// Bounds may exceed the tokens' max end only up to the 8 ms floor.
pub fn validate_timeline(segments: &[Segment]) -> Result<(), TimelineViolation> {
    let mut previous_end: Option<f64> = None;
    for (index, segment) in segments.iter().enumerate() {
        if is_inverted(segment.t0, segment.t1) {
            return Err(TimelineViolation::InvertedBounds {
                index,
                t0: segment.t0,
                t1: segment.t1,
            });
        }
        if let Some(end) = previous_end {
            if segment.t0 < end {
                return Err(TimelineViolation::Overlap {
                    index,
                    previous_end: end,
                    start: segment.t0,
                });
            }
        }
        if let Some(token) = segment.tokens.iter().find(|token| is_inverted(token.t0, token.t1)) {
            return Err(TimelineViolation::InvertedToken {
                index,
                token: token.id.clone(),
            });
        }
        if let Some((lo, hi)) = token_bounds(&segment.tokens) {
            let start_matches = (segment.t0 - lo).abs() <= TIME_EPSILON;
            let end_matches = segment.t1 + TIME_EPSILON >= hi
                && segment.t1 - hi <= super::MIN_DURATION_SECONDS + TIME_EPSILON;
            if !start_matches || !end_matches {
                return Err(TimelineViolation::BoundsMismatch {
                    index,
                    bounds: (segment.t0, segment.t1),
                    tokens: (lo, hi),
                });
            }
        }
        previous_end = Some(segment.t1);
    }
    Ok(())
}

fn is_inverted(t0: f64, t1: f64) -> bool {
    !t0.is_finite() || !t1.is_finite() || t1 < t0
}
