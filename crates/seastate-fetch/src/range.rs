//! Hour-by-hour retrieval of a time range into a group directory.

use chrono::NaiveDateTime;
use seastate_types::{
    DATASET, DataFormat, RetrievalRequest, SeastateError, TimeRange, output_file_name,
};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

use crate::{RetrieveError, Retriever};

/// Directory, relative to the working directory, that holds one folder per group.
pub const DEFAULT_OUTPUT_ROOT: &str = "operating_folder";

/// Files written by a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSummary {
    /// The group directory.
    pub directory: PathBuf,
    /// Written files, in retrieval order.
    pub files: Vec<PathBuf>,
    /// Total bytes written.
    pub bytes: u64,
}

/// Retrieves one file per hour of a [`TimeRange`], strictly in order.
///
/// The first failure stops the run; files written before it are kept.
#[derive(Debug)]
pub struct RangeFetcher<'a, R: ?Sized> {
    retriever: &'a R,
    root: PathBuf,
    format: DataFormat,
}

impl<'a, R: Retriever + ?Sized> RangeFetcher<'a, R> {
    /// Creates a fetcher writing GRIB files under [`DEFAULT_OUTPUT_ROOT`].
    #[must_use]
    pub fn new(retriever: &'a R) -> Self {
        Self {
            retriever,
            root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            format: DataFormat::default(),
        }
    }

    /// Sets the directory holding the group folders.
    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Sets the output encoding.
    #[must_use]
    pub const fn with_format(mut self, format: DataFormat) -> Self {
        self.format = format;
        self
    }

    /// Returns the output directory of `group`.
    ///
    /// Root, prefix and `..` components of `group` are dropped so the
    /// directory always stays under the root.
    #[must_use]
    pub fn group_dir(&self, group: &str) -> PathBuf {
        let relative: PathBuf = Path::new(group)
            .components()
            .filter(|c| matches!(c, Component::Normal(_)))
            .collect();
        self.root.join(relative)
    }

    /// Returns the output path for the hour containing `timestamp`.
    #[must_use]
    pub fn target_path(&self, directory: &Path, timestamp: NaiveDateTime) -> PathBuf {
        directory.join(output_file_name(timestamp, self.format))
    }

    /// Retrieves every hour of `range` into the directory of `group`.
    ///
    /// # Errors
    ///
    /// Returns the first directory or retrieval error.
    pub async fn fetch(
        &self,
        group: &str,
        range: TimeRange,
    ) -> Result<FetchSummary, SeastateError> {
        self.fetch_with(group, range, |_, _| {}).await
    }

    /// Like [`fetch`](Self::fetch), calling `on_file` after each written file.
    ///
    /// # Errors
    ///
    /// Returns the first directory or retrieval error.
    pub async fn fetch_with(
        &self,
        group: &str,
        range: TimeRange,
        mut on_file: impl FnMut(NaiveDateTime, &Path),
    ) -> Result<FetchSummary, SeastateError> {
        let timestamps = range.timestamps();
        debug!(count = timestamps.len(), ?timestamps, "Enumerated hours");
        if let Ok(exe) = std::env::current_exe() {
            debug!(program = %exe.display(), "Running");
        }

        let directory = self.group_dir(group);
        tokio::fs::create_dir_all(&directory).await?;
        info!(
            directory = %directory.display(),
            hours = timestamps.len(),
            "Fetching {range}"
        );

        let mut files = Vec::with_capacity(timestamps.len());
        let mut bytes = 0;

        for timestamp in timestamps {
            let request = RetrievalRequest::for_hour(timestamp, self.format);
            let target = self.target_path(&directory, timestamp);

            let written = self
                .retriever
                .retrieve(DATASET, &request, &target)
                .await?;
            info!(file = %target.display(), bytes = written, "Retrieved {timestamp}");

            on_file(timestamp, &target);
            bytes += written;
            files.push(target);
        }

        Ok(FetchSummary {
            directory,
            files,
            bytes,
        })
    }
}

impl From<RetrieveError> for SeastateError {
    fn from(err: RetrieveError) -> Self {
        match err {
            RetrieveError::Config(e) => Self::Config(e.to_string()),
            RetrieveError::Http(e) => Self::Http(e.to_string()),
            RetrieveError::Io { path, source } => Self::Io(std::io::Error::new(
                source.kind(),
                format!("{}: {source}", path.display()),
            )),
            other => Self::Api(other.to_string()),
        }
    }
}
