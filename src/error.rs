use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result of building validated tunables (seek threshold, sticky tolerance, config).
pub type Result<T> = std::result::Result<T, SyncError>;

/// A rejected tunable, carrying the message shown to the user.
///
/// Timing data never produces one: malformed numbers in payloads are
/// normalized by the merger and absorbed by the locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncError {
    message: String,
}

impl SyncError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for SyncError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for SyncError {}
