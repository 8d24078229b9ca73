use std::cmp::Ordering;

use approx::abs_diff_eq;

use crate::types::WordToken;

/// Times closer than this compare as equal.
pub const TIME_EPSILON: f64 = 1e-6;

pub(crate) fn compare_times(a: f64, b: f64) -> Ordering {
    if abs_diff_eq!(a, b, epsilon = TIME_EPSILON) {
        Ordering::Equal
    } else {
        a.total_cmp(&b)
    }
}

/// Token order: start, end, original lane before translation, then id.
///
/// Tokens without a lane rank after both lanes; sanitized tokens always carry one.
pub fn compare_tokens(a: &WordToken, b: &WordToken) -> Ordering {
    compare_times(a.t0, b.t0)
        .then_with(|| compare_times(a.t1, b.t1))
        .then_with(|| lane_rank(a).cmp(&lane_rank(b)))
        .then_with(|| a.id.cmp(&b.id))
}

fn lane_rank(token: &WordToken) -> u8 {
    token.lane.map_or(u8::MAX, |lane| lane.rank())
}

/// Stable insertion sort under [`compare_tokens`].
///
/// The epsilon comparator is not transitive, so it cannot back `slice::sort_by`.
/// Upstream tokens arrive nearly sorted, which keeps this close to linear.
pub(crate) fn sort_tokens(tokens: &mut [WordToken]) {
    for i in 1..tokens.len() {
        let mut j = i;
        while j > 0 && compare_tokens(&tokens[j - 1], &tokens[j]) == Ordering::Greater {
            tokens.swap(j - 1, j);
            j -= 1;
        }
    }
}
