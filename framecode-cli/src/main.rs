//! Framecode CLI - convert between frame numbers and SMPTE timecode.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use commands::{CmdCompare, CmdParse, CmdReduce, CmdRender};
use config::Settings;
use std::path::PathBuf;
use tracing::debug;

/// Output mode for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    /// Plain text output.
    Normal,
    /// JSON output for programmatic parsing.
    Json,
    /// No log output.
    Quiet,
    /// Debug log output.
    Verbose,
}

/// Command-line arguments for the framecode tool.
#[derive(Parser, Debug)]
#[command(name = "framecode")]
#[command(version)]
#[command(about = "Convert between frame numbers and SMPTE timecode")]
#[command(long_about = "Framecode converts frame numbers to HH:MM:SS:FF timecode and back,\n\
    using exact rational frame rates such as 30000/1001.\n\n\
    EXAMPLES:\n    \
    framecode render --rate 25 120\n    \
    framecode render --rate 30000/1001 --drop-frame 1800\n    \
    framecode parse --rate 30000/1001 '00:12:24;23'\n    \
    framecode reduce 123442143 213432\n    \
    framecode compare 12/135 120/1350")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// JSON settings file with default rate, flags and start
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Suppress log output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Enable debug log output
    #[arg(short, long, global = true)]
    verbose: bool,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.quiet {
            OutputMode::Quiet
        } else if self.verbose {
            OutputMode::Verbose
        } else {
            OutputMode::Normal
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render frame numbers as timecode
    Render(CmdRender),
    /// Parse timecode strings into start frames
    Parse(CmdParse),
    /// Reduce a fraction, optionally under a bound
    Reduce(CmdReduce),
    /// Compare two rationals
    Compare(CmdCompare),
}

fn init_logging(mode: OutputMode) {
    if mode == OutputMode::Json || mode == OutputMode::Quiet {
        return;
    }
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if mode == OutputMode::Verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mode = cli.output_mode();
    init_logging(mode);

    let settings = Settings::load_or_default(cli.config.as_deref())?;
    debug!(?settings, "resolved settings");

    let json = mode == OutputMode::Json;
    match &cli.command {
        Command::Render(cmd) => cmd.run(&settings, json),
        Command::Parse(cmd) => cmd.run(&settings, json),
        Command::Reduce(cmd) => cmd.run(json),
        Command::Compare(cmd) => cmd.run(json),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_output_mode() {
        let cli = Cli::try_parse_from(["framecode", "--json", "-v", "reduce", "1", "2"]).unwrap();
        assert_eq!(cli.output_mode(), OutputMode::Json);

        let cli = Cli::try_parse_from(["framecode", "reduce", "1", "2", "--verbose"]).unwrap();
        assert_eq!(cli.output_mode(), OutputMode::Verbose);

        let cli = Cli::try_parse_from(["framecode", "compare", "1/2", "2/4"]).unwrap();
        assert_eq!(cli.output_mode(), OutputMode::Normal);
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from([
            "framecode",
            "render",
            "--config",
            "framecode.json",
            "0",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("framecode.json")));
        assert!(matches!(cli.command, Command::Render(_)));
    }
}
