//! Parse timecode strings into start frames.

use crate::config::{RateArgs, Settings};
use clap::Args;
use console::style;
use framecode_timecode::{parse, TimecodeError};
use serde::Serialize;

/// Outcome of parsing one string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedTimecode {
    /// Input text.
    pub text: String,
    /// Start frame, if the text parsed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    /// Whether the text used the drop-frame separator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drop_frame: Option<bool>,
    /// Parse failure, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<TimecodeError>,
}

/// Parse timecode strings into frame numbers.
#[derive(Args, Debug)]
pub struct CmdParse {
    #[command(flatten)]
    pub rate: RateArgs,

    /// Timecode strings (HH:MM:SS:FF or HH:MM:SS;FF).
    #[arg(required = true)]
    pub timecodes: Vec<String>,
}

impl CmdParse {
    /// Parse every string, keeping failures alongside successes.
    pub fn parse_all(&self, settings: &Settings) -> anyhow::Result<Vec<ParsedTimecode>> {
        let rate = self.rate.resolve(settings)?;
        Ok(self
            .timecodes
            .iter()
            .map(|text| match parse(rate, text) {
                Ok(tc) => ParsedTimecode {
                    text: text.clone(),
                    start: Some(tc.start()),
                    drop_frame: Some(tc.flags().drop_frame),
                    error: None,
                },
                Err(err) => ParsedTimecode {
                    text: text.clone(),
                    start: None,
                    drop_frame: None,
                    error: Some(err),
                },
            })
            .collect())
    }

    /// Execute the parse command.
    pub fn run(&self, settings: &Settings, json: bool) -> anyhow::Result<()> {
        let parsed = self.parse_all(settings)?;
        let failures = parsed.iter().filter(|p| p.error.is_some()).count();

        if json {
            let output = serde_json::json!({ "timecodes": parsed });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            for entry in &parsed {
                match (&entry.start, &entry.error) {
                    (Some(start), _) => println!("{}\t{}", entry.text, start),
                    (None, Some(err)) => {
                        eprintln!("{}\t{}", entry.text, style(err).red());
                    }
                    (None, None) => {}
                }
            }
        }

        if failures > 0 {
            anyhow::bail!("{} of {} timecodes failed to parse", failures, parsed.len());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    #[derive(Parser)]
    #[command(name = "test")]
    struct TestCli {
        #[command(flatten)]
        cmd: CmdParse,
    }

    #[test]
    fn test_parse_batch() {
        let cli = TestCli::try_parse_from([
            "test",
            "--rate",
            "30000/1001",
            "00:12:24;23",
            "bogus",
            "00:00:01:00",
        ])
        .unwrap();

        let parsed = cli.cmd.parse_all(&Settings::default()).unwrap();
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[0].start, Some(22321));
        assert_eq!(parsed[0].drop_frame, Some(true));
        assert!(matches!(
            parsed[1].error,
            Some(TimecodeError::InvalidFormat { .. })
        ));
        assert_eq!(parsed[2].start, Some(30));
        assert_eq!(parsed[2].drop_frame, Some(false));
    }

    #[test]
    fn test_parse_rate_from_settings() {
        let cli = TestCli::try_parse_from(["test", "00:12:24:23"]).unwrap();
        let settings = Settings {
            rate: Some(framecode_core::Rational::new(25, 1)),
            ..Default::default()
        };
        let parsed = cli.cmd.parse_all(&settings).unwrap();
        assert_eq!(parsed[0].start, Some(18623));
    }

    #[test]
    fn test_parse_rejects_render_flags() {
        for flag in ["--drop-frame", "--no-wrap", "--allow-negative"] {
            assert!(TestCli::try_parse_from(["test", "-r", "25", flag, "00:00:01:00"]).is_err());
        }
        assert!(TestCli::try_parse_from(["test", "--start", "5", "00:00:01:00"]).is_err());
    }

    #[test]
    fn test_parsed_json_shape() {
        let ok = ParsedTimecode {
            text: "00:00:01:00".into(),
            start: Some(25),
            drop_frame: Some(false),
            error: None,
        };
        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "text": "00:00:01:00", "start": 25, "drop_frame": false })
        );
    }
}
