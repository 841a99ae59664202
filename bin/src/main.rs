//! seastate CLI - Hourly ERA5 ocean wave data downloader.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use seastate_lib::DEFAULT_OUTPUT_ROOT;
use std::path::PathBuf;
use tracing::debug;

mod commands;
mod display;
mod logging;

use display::Format;

/// Printed when positional arguments are missing.
const MISSING_ARGS: &str = "3 Arguments required 'CompetitionID' 'Start Time' 'End Time'";

#[derive(Parser)]
#[command(name = "seastate")]
#[command(about = "Download hourly ERA5 ocean wave data from the Climate Data Store", long_about = None)]
#[command(version)]
struct Cli {
    /// Competition identifier, used as the output folder name
    competition_id: Option<String>,

    /// Start time (YYYYMMDDHHMMSS)
    start: Option<String>,

    /// End time (YYYYMMDDHHMMSS), inclusive
    end: Option<String>,

    /// Trailing arguments, ignored
    #[arg(hide = true)]
    extra: Vec<String>,

    /// Directory holding one folder per competition
    #[arg(long, default_value = DEFAULT_OUTPUT_ROOT)]
    root: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "grib")]
    format: Format,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (Some(competition_id), Some(start), Some(end)) = (cli.competition_id, cli.start, cli.end)
    else {
        println!("{MISSING_ARGS}");
        println!("{}", Cli::command().render_usage());
        return Ok(());
    };

    logging::init(cli.verbose, cli.quiet);

    if !cli.extra.is_empty() {
        debug!(extra = ?cli.extra, "Ignoring extra arguments");
    }

    commands::fetch::fetch(
        &competition_id,
        &start,
        &end,
        cli.root,
        cli.format,
        cli.quiet,
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_missing_arguments_still_parse() {
        let cli = Cli::try_parse_from(["seastate", "test1"]).unwrap();
        assert_eq!(cli.competition_id.as_deref(), Some("test1"));
        assert!(cli.start.is_none());
        assert!(cli.end.is_none());
    }

    #[test]
    fn test_defaults() {
        let cli =
            Cli::try_parse_from(["seastate", "test1", "20200101000000", "20200101020000"]).unwrap();
        assert_eq!(cli.root, PathBuf::from("operating_folder"));
        assert!(matches!(cli.format, Format::Grib));
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
        assert!(cli.extra.is_empty());
    }

    #[test]
    fn test_extra_arguments_ignored() {
        let cli = Cli::try_parse_from([
            "seastate",
            "test1",
            "20200101000000",
            "20200101020000",
            "leftover",
            "more",
        ])
        .unwrap();
        assert_eq!(cli.competition_id.as_deref(), Some("test1"));
        assert_eq!(cli.end.as_deref(), Some("20200101020000"));
        assert_eq!(cli.extra, vec!["leftover", "more"]);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "seastate",
            "-vv",
            "--root",
            "/data/races",
            "--format",
            "netcdf",
            "g",
            "20200101000000",
            "20200101020000",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.root, PathBuf::from("/data/races"));
        assert!(matches!(cli.format, Format::Netcdf));
    }
}
