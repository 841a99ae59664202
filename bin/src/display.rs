//! Display utilities for the seastate CLI.

use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use seastate_lib::DataFormat;

/// Output format for downloaded data.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    Grib,
    Netcdf,
}

impl From<Format> for DataFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Grib => Self::Grib,
            Format::Netcdf => Self::Netcdf,
        }
    }
}

/// Creates the per-hour progress bar, hidden in quiet mode.
pub(crate) fn hour_progress(total_hours: u64, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total_hours);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} hours ({percent}%) {msg}")
            .expect("Invalid progress template")
            .progress_chars("=>-"),
    );
    pb
}
