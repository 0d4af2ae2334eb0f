//! Render frame numbers as timecode strings.

use crate::config::{Settings, TimecodeArgs};
use clap::Args;
use framecode_timecode::Timecode;
use serde::Serialize;

/// One rendered frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedFrame {
    /// Frame number relative to the start.
    pub frame: i64,
    /// Timecode label.
    pub timecode: String,
}

/// Render frame numbers as timecode.
#[derive(Args, Debug)]
pub struct CmdRender {
    #[command(flatten)]
    pub timecode: TimecodeArgs,

    /// Frame numbers to render.
    #[arg(required = true, allow_hyphen_values = true)]
    pub frames: Vec<i64>,
}

impl CmdRender {
    /// Render every requested frame.
    pub fn render(&self, settings: &Settings) -> anyhow::Result<Vec<RenderedFrame>> {
        let tc = Timecode::try_from(self.timecode.resolve(settings)?)?;
        Ok(self
            .frames
            .iter()
            .map(|&frame| RenderedFrame {
                frame,
                timecode: tc.render(frame),
            })
            .collect())
    }

    /// Execute the render command.
    pub fn run(&self, settings: &Settings, json: bool) -> anyhow::Result<()> {
        let rendered = self.render(settings)?;

        if json {
            let output = serde_json::json!({ "frames": rendered });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            for entry in &rendered {
                println!("{}\t{}", entry.frame, entry.timecode);
            }
        }
        Ok(())
    }
}
