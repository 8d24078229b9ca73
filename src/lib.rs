//! Dual-track caption timeline synchronizer
//!
//! Merges an original-language and a translation caption track into one
//! ordered, non-overlapping timeline, and maps a playback clock onto the
//! token to highlight.

pub mod cli;
pub mod config;
pub mod error;
pub mod locator;
pub mod playback;
pub mod timeline;
pub mod types;

pub use config::SyncConfig;
pub use error::SyncError;
pub use locator::{
    is_large_seek, locate, locate_with, LocatorOptions, LocatorSettings, SeekThreshold,
};
pub use playback::{CursorUpdate, PlaybackCursor};
pub use timeline::{
    merge_payloads, merge_tracks, validate_timeline, MergeOptions, TimelineViolation,
};
pub use types::{Lane, Segment, TimingPayload, TokenMatch, TrackKind, WordToken};
