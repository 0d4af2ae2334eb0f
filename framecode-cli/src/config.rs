//! Settings file and the timecode options shared by subcommands.

use anyhow::Context;
use clap::Args;
use framecode_core::Rational;
use framecode_timecode::{Flags, TimecodeParams};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Defaults loaded from a JSON settings file.
///
/// ```json
/// { "rate": { "num": 30000, "den": 1001 }, "flags": { "drop_frame": true, "max_24_hours": true } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Frame rate used when `--rate` is absent.
    pub rate: Option<Rational>,
    /// Flags that command-line switches add to.
    pub flags: Flags,
    /// Start frame used when `--start` is absent.
    pub start: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rate: None,
            flags: Flags::new(false, true, false),
            start: 0,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        let settings = serde_json::from_str(&text)
            .with_context(|| format!("Invalid settings file {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Load settings from an optional path, falling back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

/// Frame rate and flag options.
#[derive(Args, Debug, Clone, Default)]
pub struct TimecodeArgs {
    /// Frame rate as num/den or an integer (e.g. 30000/1001, 25).
    #[arg(short, long)]
    pub rate: Option<Rational>,

    /// Use drop-frame counting (29.97 and 59.94 only).
    #[arg(long)]
    pub drop_frame: bool,

    /// Do not wrap hours after 24.
    #[arg(long)]
    pub no_wrap: bool,

    /// Render negative frame numbers with a sign.
    #[arg(long)]
    pub allow_negative: bool,

    /// Frame number that frame 0 is labelled with.
    #[arg(long, allow_hyphen_values = true)]
    pub start: Option<i64>,
}

impl TimecodeArgs {
    /// Merge the options over the settings file.
    pub fn resolve(&self, settings: &Settings) -> anyhow::Result<TimecodeParams> {
        let rate = resolve_rate(self.rate, settings)?;

        let flags = settings
            .flags
            .with_drop_frame(settings.flags.drop_frame || self.drop_frame)
            .with_max_24_hours(settings.flags.max_24_hours && !self.no_wrap)
            .with_allow_negative(settings.flags.allow_negative || self.allow_negative);

        Ok(TimecodeParams {
            start: self.start.unwrap_or(settings.start),
            flags,
            rate,
        })
    }
}

/// Frame rate option for commands that take no flags.
#[derive(Args, Debug, Clone, Default)]
pub struct RateArgs {
    /// Frame rate as num/den or an integer (e.g. 30000/1001, 25).
    #[arg(short, long)]
    pub rate: Option<Rational>,
}

impl RateArgs {
    /// Take the rate from the command line or the settings file.
    pub fn resolve(&self, settings: &Settings) -> anyhow::Result<Rational> {
        resolve_rate(self.rate, settings)
    }
}

fn resolve_rate(rate: Option<Rational>, settings: &Settings) -> anyhow::Result<Rational> {
    rate.or(settings.rate)
        .context("No frame rate given; pass --rate or set \"rate\" in the settings file")
}
