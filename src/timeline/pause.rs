use crate::types::{Lane, Segment, WordToken, PAUSE_ID_PREFIX};

/// Hands out `pause-<n>` ids for one merge call.
#[derive(Debug, Default)]
pub(super) struct PauseIds {
    next: usize,
}

impl PauseIds {
    pub(super) fn pause_at(&mut self, at: f64) -> Segment {
        let id = format!("{PAUSE_ID_PREFIX}{}", self.next);
        self.next += 1;
        Segment {
            tokens: vec![WordToken {
                id: format!("{id}-token"),
                text: String::new(),
                t0: at,
                t1: at,
                lane: Some(Lane::Original),
                seg_id: id.clone(),
            }],
            id,
            t0: at,
            t1: at,
        }
    }
}

/// Midpoint of the gap between `prev_end` and `next_start` when it exceeds `threshold`.
pub(super) fn pause_midpoint(prev_end: f64, next_start: f64, threshold: f64) -> Option<f64> {
    let gap = next_start - prev_end;
    (gap > threshold).then(|| prev_end + gap / 2.0)
}
