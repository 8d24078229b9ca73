use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use crate::config::SyncConfig;
use crate::playback::PlaybackCursor;
use crate::timeline::{merge_payloads, validate_timeline};
use crate::types::{Lane, TimingPayload, TrackKind};

#[derive(Parser, Debug)]
#[command(
    name = "dualsync",
    version,
    about = "Merge original and translation caption tracks into one playback timeline"
)]
pub struct Cli {
    /// Log merge and seek decisions to stderr.
    #[arg(long, short, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Merge two timing payloads into a combined timeline.
    Merge(MergeArgs),
    /// Resolve clock values against a merged timeline, tick by tick.
    Locate(LocateArgs),
    /// Verify ordering and bounds invariants of a timeline.
    Check(CheckArgs),
}

#[derive(Args, Debug, Clone)]
pub struct MergeArgs {
    /// Original-track timing payload (JSON).
    #[arg(long, value_name = "PATH")]
    pub original: PathBuf,
    /// Translation-track timing payload (JSON).
    #[arg(long, value_name = "PATH")]
    pub translation: PathBuf,
    /// Gap in seconds above which a pause marker is inserted.
    #[arg(long = "pause-threshold", value_name = "SECONDS", allow_negative_numbers = true)]
    pub pause_threshold: Option<f64>,
    /// Optional JSON config file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Write the combined payload here instead of stdout.
    #[arg(long, short, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct LocateArgs {
    /// Merged timing payload (JSON).
    #[arg(long, value_name = "PATH")]
    pub timeline: PathBuf,
    /// Playback clock value in seconds; repeat for successive ticks.
    #[arg(long = "clock", value_name = "SECONDS", required = true, allow_negative_numbers = true)]
    pub clocks: Vec<f64>,
    /// Optional JSON config file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Timing payload (JSON).
    #[arg(long, value_name = "PATH")]
    pub timeline: PathBuf,
}

/// One line of `locate` output
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TickReport<'a> {
    clock: f64,
    segment_index: Option<usize>,
    token_index: Option<usize>,
    text: Option<&'a str>,
    seeked: bool,
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Merge(args) => run_merge(&args),
        Command::Locate(args) => run_locate(&args),
        Command::Check(args) => run_check(&args),
    }
}

fn run_merge(args: &MergeArgs) -> Result<()> {
    let mut config = SyncConfig::from_override(args.config.as_deref())?;
    if let Some(seconds) = args.pause_threshold {
        config.pause_threshold_seconds = seconds;
    }
    config
        .validate()
        .context("invalid merge settings")?;

    let original = load_payload(&args.original, Some(Lane::Original))?;
    let translation = load_payload(&args.translation, Some(Lane::Translation))?;
    let merged = merge_payloads(&original, &translation, config.merge_options());
    tracing::info!(
        original = original.segments.len(),
        translation = translation.segments.len(),
        merged = merged.segments.len(),
        "merged timeline"
    );

    let json = serde_json::to_string_pretty(&merged).context("failed to serialize timeline")?;
    match &args.output {
        Some(path) => fs::write(path, json + "\n")
            .with_context(|| format!("failed to write timeline to {:?}", path))?,
        None => println!("{json}"),
    }
    Ok(())
}

fn run_locate(args: &LocateArgs) -> Result<()> {
    let config = SyncConfig::from_override(args.config.as_deref())?;
    let settings = config
        .locator_settings()
        .context("invalid locator settings")?;
    let timeline = load_payload(&args.timeline, None)?;

    let mut cursor = PlaybackCursor::new(settings);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for &clock in &args.clocks {
        let update = cursor.advance(&timeline, clock);
        let report = TickReport {
            clock,
            segment_index: update.matched.map(|at| at.segment_index),
            token_index: update.matched.map(|at| at.token_index),
            text: update
                .matched
                .and_then(|at| timeline.token(at))
                .map(|token| token.text.as_str()),
            seeked: update.seeked,
        };
        let line = serde_json::to_string(&report).context("failed to serialize tick")?;
        writeln!(out, "{line}").context("failed to write tick")?;
    }
    Ok(())
}

fn run_check(args: &CheckArgs) -> Result<()> {
    let timeline = load_payload(&args.timeline, None)?;
    validate_timeline(&timeline.segments)
        .with_context(|| format!("timeline {:?} violates invariants", args.timeline))?;
    println!(
        "ok: {} segments, {} tokens",
        timeline.segments.len(),
        timeline.token_count()
    );
    Ok(())
}

/// Read a payload, warning when its track kind is not the one expected
pub fn load_payload(path: &Path, expected: Option<Lane>) -> Result<TimingPayload> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read timing payload {:?}", path))?;
    let payload: TimingPayload = serde_json::from_str(&data)
        .with_context(|| format!("failed to parse timing payload {:?}", path))?;
    if let Some(lane) = expected {
        let kind = TrackKind::from(lane);
        if payload.track_kind != kind {
            tracing::warn!(
                path = %path.display(),
                found = ?payload.track_kind,
                expected = ?kind,
                "payload track kind differs from its role"
            );
        }
    }
    Ok(payload)
}
