//! Climate Data Store retrieve API endpoints and documents.

use serde::Deserialize;

/// Header carrying the personal access token.
pub const TOKEN_HEADER: &str = "PRIVATE-TOKEN";

/// Builds the job submission URL for a dataset.
///
/// # Example
///
/// ```
/// use seastate_fetch::api::execution_url;
///
/// assert_eq!(
///     execution_url("https://cds.climate.copernicus.eu/api", "reanalysis-era5-single-levels"),
///     "https://cds.climate.copernicus.eu/api/retrieve/v1/processes/reanalysis-era5-single-levels/execution"
/// );
/// ```
#[must_use]
pub fn execution_url(base: &str, dataset: &str) -> String {
    format!("{base}/retrieve/v1/processes/{dataset}/execution")
}

/// Builds the status URL of a job.
#[must_use]
pub fn job_url(base: &str, job_id: &str) -> String {
    format!("{base}/retrieve/v1/jobs/{job_id}")
}

/// Builds the results URL of a job.
#[must_use]
pub fn results_url(base: &str, job_id: &str) -> String {
    format!("{base}/retrieve/v1/jobs/{job_id}/results")
}

/// Resolves an asset location that may be relative to the API base.
#[must_use]
pub fn asset_url(base: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else {
        format!("{base}/{}", href.trim_start_matches('/'))
    }
}

/// Processing state of a retrieval job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    /// Queued, not started.
    Accepted,
    /// Being processed.
    Running,
    /// Finished; results are available.
    Successful,
    /// Processing failed.
    Failed,
    /// Refused by the service.
    Rejected,
    /// Cancelled.
    Dismissed,
    /// Any state this client does not know.
    #[serde(other)]
    Unknown,
}

impl JobState {
    /// Returns true while the job may still change state.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Accepted | Self::Running)
    }
}

/// Status document returned on submission and when polling a job.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JobStatus {
    /// Job identifier.
    #[serde(rename = "jobID")]
    pub job_id: String,
    /// Current state.
    pub status: JobState,
}

/// Results document of a finished job.
#[derive(Debug, Clone, Deserialize)]
pub struct JobResults {
    /// The produced file.
    pub asset: Asset,
}

/// Wrapper around the produced file description.
#[derive(Debug, Clone, Deserialize)]
pub struct Asset {
    /// File description.
    pub value: AssetValue,
}

/// Location and size of the produced file.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetValue {
    /// Download location.
    pub href: String,
    /// Announced size in bytes.
    #[serde(rename = "file:size")]
    pub size: Option<u64>,
}

/// Problem document returned by the service on errors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Problem {
    /// Short summary.
    pub title: Option<String>,
    /// Longer explanation.
    pub detail: Option<String>,
}

impl Problem {
    /// Joins title and detail into one message.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match (&self.title, &self.detail) {
            (Some(title), Some(detail)) if !detail.is_empty() => Some(format!("{title}: {detail}")),
            (Some(title), _) => Some(title.clone()),
            (None, Some(detail)) => Some(detail.clone()),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let base = "https://cds.example/api";
        assert_eq!(job_url(base, "abc"), "https://cds.example/api/retrieve/v1/jobs/abc");
        assert_eq!(
            results_url(base, "abc"),
            "https://cds.example/api/retrieve/v1/jobs/abc/results"
        );
    }

    #[test]
    fn test_asset_url() {
        let base = "https://cds.example/api";
        assert_eq!(
            asset_url(base, "https://object-store.example/file.grib"),
            "https://object-store.example/file.grib"
        );
        assert_eq!(
            asset_url(base, "/downloads/file.grib"),
            "https://cds.example/api/downloads/file.grib"
        );
    }

    #[test]
    fn test_job_status_json() {
        let json = r#"{"processID":"x","jobID":"42","status":"running","type":"process"}"#;
        let status: JobStatus = serde_json::from_str(json).unwrap();
        assert_eq!(status.job_id, "42");
        assert_eq!(status.status, JobState::Running);
        assert!(status.status.is_pending());
    }

    #[test]
    fn test_unknown_state() {
        let status: JobStatus =
            serde_json::from_str(r#"{"jobID":"42","status":"paused"}"#).unwrap();
        assert_eq!(status.status, JobState::Unknown);
        assert!(!status.status.is_pending());
    }

    #[test]
    fn test_results_json() {
        let json = r#"{"asset":{"value":{
            "type":"application/x-grib","href":"https://x/y.grib","file:size":1024
        }}}"#;
        let results: JobResults = serde_json::from_str(json).unwrap();
        assert_eq!(results.asset.value.href, "https://x/y.grib");
        assert_eq!(results.asset.value.size, Some(1024));
    }

    #[test]
    fn test_problem_message() {
        let problem = Problem {
            title: Some("The job failed".to_string()),
            detail: Some("quota exceeded".to_string()),
        };
        assert_eq!(problem.message().unwrap(), "The job failed: quota exceeded");
        assert!(Problem::default().message().is_none());
    }
}
