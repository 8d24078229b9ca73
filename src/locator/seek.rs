use crate::error::{Result, SyncError};

/// Default clock jump treated as a seek rather than continuous playback.
pub const DEFAULT_LARGE_SEEK_SECONDS: f64 = 0.3;

/// Accepted range for a large-seek threshold: `(0.2, 0.5]` seconds.
pub const LARGE_SEEK_RANGE_SECONDS: (f64, f64) = (0.2, 0.5);

/// Validated large-seek threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeekThreshold(f64);

impl SeekThreshold {
    pub fn new(seconds: f64) -> Result<Self> {
        let (lower, upper) = LARGE_SEEK_RANGE_SECONDS;
        if !seconds.is_finite() || seconds <= lower || seconds > upper {
            return Err(SyncError::new(format!(
                "large seek threshold must be greater than {lower}s and at most {upper}s, got {seconds}"
            )));
        }
        Ok(Self(seconds))
    }

    pub fn seconds(self) -> f64 {
        self.0
    }

    /// Whether moving from `previous` to `new` is a discontinuous jump.
    ///
    /// Non-finite clock values always count as a jump.
    pub fn is_large_seek(self, previous: f64, new: f64) -> bool {
        let delta = (new - previous).abs();
        !delta.is_finite() || delta > self.0
    }
}

impl Default for SeekThreshold {
    fn default() -> Self {
        Self(DEFAULT_LARGE_SEEK_SECONDS)
    }
}

/// [`SeekThreshold::is_large_seek`] with the default threshold.
pub fn is_large_seek(previous_clock_seconds: f64, new_clock_seconds: f64) -> bool {
    SeekThreshold::default().is_large_seek(previous_clock_seconds, new_clock_seconds)
}
