//! Core types for the dual-track caption timeline

use serde::{Deserialize, Deserializer, Serialize};

/// Which caption track a token belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lane {
    Original,
    Translation,
}

impl Lane {
    /// Tie-break rank: original sorts before translation
    pub fn rank(self) -> u8 {
        match self {
            Lane::Original => 0,
            Lane::Translation => 1,
        }
    }
}

/// Discriminator carried by a [`TimingPayload`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Original,
    Translation,
    Combined,
}

impl From<Lane> for TrackKind {
    fn from(lane: Lane) -> Self {
        match lane {
            Lane::Original => TrackKind::Original,
            Lane::Translation => TrackKind::Translation,
        }
    }
}

/// Smallest unit of aligned caption content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordToken {
    pub id: String,
    /// Display text; empty for synthetic pause tokens
    #[serde(default)]
    pub text: String,
    #[serde(default = "missing_time", deserialize_with = "lenient_time")]
    pub t0: f64, // seconds
    #[serde(default = "missing_time", deserialize_with = "lenient_time")]
    pub t1: f64, // seconds
    /// `None` when upstream data carried no recognizable lane
    #[serde(default, deserialize_with = "lenient_lane")]
    pub lane: Option<Lane>,
    /// Owning segment id (lookup only)
    #[serde(default)]
    pub seg_id: String,
}

impl WordToken {
    pub fn duration(&self) -> f64 {
        self.t1 - self.t0
    }
}

/// A contiguous group of tokens from one source track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: String,
    #[serde(default = "missing_time", deserialize_with = "lenient_time")]
    pub t0: f64, // seconds
    #[serde(default = "missing_time", deserialize_with = "lenient_time")]
    pub t1: f64, // seconds
    #[serde(default)]
    pub tokens: Vec<WordToken>,
}

impl Segment {
    pub fn is_pause(&self) -> bool {
        self.id.starts_with(PAUSE_ID_PREFIX)
    }
}

/// Prefix of synthetic pause segment ids (`pause-<n>`)
pub const PAUSE_ID_PREFIX: &str = "pause-";

/// Ordered segment sequence handed to rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingPayload {
    pub track_kind: TrackKind,
    #[serde(default)]
    pub segments: Vec<Segment>,
}

impl TimingPayload {
    pub fn new(track_kind: TrackKind, segments: Vec<Segment>) -> Self {
        Self {
            track_kind,
            segments,
        }
    }

    pub fn token(&self, at: TokenMatch) -> Option<&WordToken> {
        self.segments
            .get(at.segment_index)
            .and_then(|segment| segment.tokens.get(at.token_index))
    }

    pub fn token_count(&self) -> usize {
        self.segments.iter().map(|segment| segment.tokens.len()).sum()
    }
}

/// Position of a token inside a [`TimingPayload`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenMatch {
    pub segment_index: usize,
    pub token_index: usize,
}

impl TokenMatch {
    pub fn new(segment_index: usize, token_index: usize) -> Self {
        Self {
            segment_index,
            token_index,
        }
    }
}

fn missing_time() -> f64 {
    f64::NAN
}

// JSON has no NaN; `null` stands in for it.
fn lenient_time<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

// Anything other than a known lane name (numbers, objects, typos) means "unknown".
fn lenient_lane<'de, D>(deserializer: D) -> Result<Option<Lane>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(name) => match name.as_str() {
            "original" => Some(Lane::Original),
            "translation" => Some(Lane::Translation),
            _ => None,
        },
        _ => None,
    })
}
