//! Playback cursor - the per-tick driver around the locator
//!
//! Owns the previous clock value and previous match between ticks so the
//! locator itself can stay stateless.

use crate::locator::{locate_with, LocatorSettings};
use crate::types::{TimingPayload, TokenMatch};

/// Outcome of one clock tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorUpdate {
    /// Token to highlight, `None` for a timeline without tokens
    pub matched: Option<TokenMatch>,
    /// The clock jumped; renderers should drop auto-scroll anchors
    pub seeked: bool,
    /// The highlighted token differs from the previous tick
    pub changed: bool,
}

/// Caller-side locality state threaded between locator calls.
#[derive(Debug, Clone, Default)]
pub struct PlaybackCursor {
    settings: LocatorSettings,
    last_clock: Option<f64>,
    last_match: Option<TokenMatch>,
}

impl PlaybackCursor {
    pub fn new(settings: LocatorSettings) -> Self {
        Self {
            settings,
            last_clock: None,
            last_match: None,
        }
    }

    pub fn last_match(&self) -> Option<TokenMatch> {
        self.last_match
    }

    /// Advance to `clock_seconds` and report what to highlight.
    ///
    /// The first tick after construction or [`reset`](Self::reset) counts as a seek.
    pub fn advance(&mut self, timeline: &TimingPayload, clock_seconds: f64) -> CursorUpdate {
        let seeked = match self.last_clock {
            Some(previous) => self.settings.seek.is_large_seek(previous, clock_seconds),
            None => true,
        };
        let hint = if seeked { None } else { self.last_match };
        if seeked {
            tracing::debug!(
                from = ?self.last_clock,
                to = clock_seconds,
                "seek detected; dropping locality"
            );
        }

        let matched = locate_with(timeline, clock_seconds, hint, &self.settings.options);
        let changed = matched != self.last_match;

        if !clock_seconds.is_nan() {
            self.last_clock = Some(clock_seconds);
        }
        self.last_match = matched;

        CursorUpdate {
            matched,
            seeked,
            changed,
        }
    }

    /// Forget all locality, e.g. for a new playback session
    pub fn reset(&mut self) {
        self.last_clock = None;
        self.last_match = None;
    }
}
