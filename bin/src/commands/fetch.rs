//! Fetch command implementation.
//!
//! This module retrieves every hour of a time range from the Climate Data Store
//! into a per-competition directory.

use crate::display::{Format, hour_progress};
use anyhow::{Context, Result};
use seastate_lib::prelude::*;
use std::path::PathBuf;
use tracing::info;

/// Fetch one file per hour between `start_str` and `end_str`, inclusive.
pub(crate) async fn fetch(
    competition_id: &str,
    start_str: &str,
    end_str: &str,
    root: PathBuf,
    format: Format,
    quiet: bool,
) -> Result<()> {
    // Parse both ends before touching the filesystem
    let start =
        parse_timestamp(start_str).with_context(|| format!("Invalid start time: {start_str}"))?;
    let end = parse_timestamp(end_str).with_context(|| format!("Invalid end time: {end_str}"))?;
    let range = TimeRange::new(start, end);

    let client = CdsClient::from_env().context("Failed to set up Climate Data Store client")?;
    info!(url = client.url(), "Using Climate Data Store");

    let fetcher = RangeFetcher::new(&client)
        .with_root(root)
        .with_format(format.into());

    let progress = hour_progress(range.total_hours() as u64, quiet);
    progress.set_message(format!("{competition_id} {range}"));

    let result = fetcher
        .fetch_with(competition_id, range, |hour, _| {
            progress.set_message(format!("{competition_id} {}", hour.format("%Y-%m-%d %H:00")));
            progress.inc(1);
        })
        .await;

    let summary = match result {
        Ok(summary) => summary,
        Err(e) => {
            progress.abandon();
            return Err(e).with_context(|| format!("Download for {competition_id} aborted"));
        }
    };

    progress.finish_with_message(format!("Downloaded {} files", summary.files.len()));

    if !quiet {
        println!("Output written to: {}", summary.directory.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_malformed_start_creates_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("operating_folder");

        let err = fetch("g", "2020", "20200101000000", root.clone(), Format::Grib, true)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Invalid start time: 2020"));
        assert!(!root.exists());
    }

    #[tokio::test]
    async fn test_malformed_end_creates_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("operating_folder");

        let start = "20200101000000";
        let result = fetch("g", start, "2020010100000x", root.clone(), Format::Grib, true).await;

        assert!(result.is_err());
        assert!(!root.exists());
    }
}
