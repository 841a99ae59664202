//! HTTP client for the Climate Data Store retrieve API.

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use seastate_types::RetrievalRequest;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::api::{self, JobResults, JobState, JobStatus, Problem, TOKEN_HEADER};
use crate::config::{CdsCredentials, ConfigError};

/// Configuration for the retrieval client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Timeout of a single HTTP request, including the body.
    pub timeout: Duration,
    /// Maximum retry attempts for transient HTTP failures.
    pub max_retries: u32,
    /// Base delay for exponential backoff (in milliseconds).
    pub base_delay_ms: u64,
    /// Maximum delay between retries (in milliseconds).
    pub max_delay_ms: u64,
    /// First sleep while waiting for a job.
    pub poll_initial: Duration,
    /// Longest sleep while waiting for a job.
    pub poll_max: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(600),
            max_retries: 10,
            base_delay_ms: 500,
            max_delay_ms: 30_000,
            poll_initial: Duration::from_secs(1),
            poll_max: Duration::from_secs(120),
            user_agent: format!("seastate/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Errors that can occur while retrieving a file.
#[derive(Error, Debug)]
pub enum RetrieveError {
    /// Credentials could not be resolved.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with an error status.
    #[error("Server returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Problem description or raw body.
        message: String,
    },

    /// The job ended in a state other than successful.
    #[error("Job {job_id} ended as {state:?}: {message}")]
    JobFailed {
        /// Job identifier.
        job_id: String,
        /// Final state.
        state: JobState,
        /// Problem description reported by the service.
        message: String,
    },

    /// The downloaded file does not have the announced size.
    #[error("Downloaded {actual} bytes to '{path}', expected {expected}")]
    SizeMismatch {
        /// The written file.
        path: PathBuf,
        /// Announced size.
        expected: u64,
        /// Bytes written.
        actual: u64,
    },

    /// Writing the target file failed.
    #[error("Failed to write file '{path}': {source}")]
    Io {
        /// The path that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

/// A service that writes one dataset extract to a local file.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Retrieves `request` from `dataset` into `target`, returning the bytes written.
    ///
    /// # Errors
    ///
    /// Returns an error if the service rejects the request, the transfer fails,
    /// or the file cannot be written.
    async fn retrieve(
        &self,
        dataset: &str,
        request: &RetrievalRequest,
        target: &Path,
    ) -> Result<u64, RetrieveError>;
}

/// Climate Data Store client with connection pooling and retry logic.
///
/// Created once per run and shared by reference.
#[derive(Debug, Clone)]
pub struct CdsClient {
    client: Client,
    credentials: CdsCredentials,
    config: ClientConfig,
}

impl CdsClient {
    /// Creates a new client with the given credentials and configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(credentials: CdsCredentials, config: ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .tcp_keepalive(Duration::from_secs(60))
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .danger_accept_invalid_certs(!credentials.verify)
            .gzip(true)
            .build()?;
        Ok(Self {
            client,
            credentials,
            config,
        })
    }

    /// Creates a client from environment credentials and default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if no credentials are found or the HTTP client cannot be created.
    pub fn from_env() -> Result<Self, RetrieveError> {
        let credentials = CdsCredentials::from_env()?;
        Ok(Self::new(credentials, ClientConfig::default())?)
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the endpoint URL in use.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.credentials.url
    }

    /// Submits a retrieval job.
    ///
    /// # Errors
    ///
    /// Returns an error if the service rejects the request.
    pub async fn submit(
        &self,
        dataset: &str,
        request: &RetrievalRequest,
    ) -> Result<JobStatus, RetrieveError> {
        let url = api::execution_url(&self.credentials.url, dataset);
        let body = json!({ "inputs": request });
        debug!(%url, request = %body, "Submitting request");

        let response = self
            .send(|| {
                self.client
                    .post(&url)
                    .header(TOKEN_HEADER, &self.credentials.key)
                    .json(&body)
            })
            .await?;
        Ok(response.json().await?)
    }

    /// Fetches the current status of a job.
    ///
    /// # Errors
    ///
    /// Returns an error if the status cannot be fetched.
    pub async fn status(&self, job_id: &str) -> Result<JobStatus, RetrieveError> {
        let url = api::job_url(&self.credentials.url, job_id);
        let response = self
            .send(|| self.client.get(&url).header(TOKEN_HEADER, &self.credentials.key))
            .await?;
        Ok(response.json().await?)
    }

    /// Polls a job until it leaves the accepted and running states.
    ///
    /// The sleep between polls grows by half each time, up to `poll_max`.
    ///
    /// # Errors
    ///
    /// Returns an error if a status request fails.
    pub async fn wait(&self, mut job: JobStatus) -> Result<JobStatus, RetrieveError> {
        let mut delay = self.config.poll_initial;

        while job.status.is_pending() {
            debug!(
                job_id = %job.job_id,
                status = ?job.status,
                "Job pending, next check in {delay:?}"
            );
            tokio::time::sleep(delay).await;
            delay = delay.mul_f64(1.5).min(self.config.poll_max);
            job = self.status(&job.job_id).await?;
        }

        Ok(job)
    }

    /// Fetches the results document of a successful job.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be fetched or parsed.
    pub async fn results(&self, job_id: &str) -> Result<JobResults, RetrieveError> {
        let url = api::results_url(&self.credentials.url, job_id);
        let response = self
            .send(|| self.client.get(&url).header(TOKEN_HEADER, &self.credentials.key))
            .await?;
        Ok(response.json().await?)
    }

    /// Streams the body at `url` into `target`, returning the bytes written.
    ///
    /// # Errors
    ///
    /// Returns an error if the transfer fails or the file cannot be written.
    pub async fn download(&self, url: &str, target: &Path) -> Result<u64, RetrieveError> {
        let response = self.send(|| self.client.get(url)).await?;
        let io_error = |source| RetrieveError::Io {
            path: target.to_path_buf(),
            source,
        };

        let mut file = tokio::fs::File::create(target).await.map_err(io_error)?;
        let mut stream = response.bytes_stream();
        let mut written = 0u64;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await.map_err(io_error)?;
            written += chunk.len() as u64;
        }
        file.flush().await.map_err(io_error)?;

        Ok(written)
    }

    /// Reads the problem document a failed job leaves at its results URL.
    async fn failure_message(&self, job_id: &str) -> String {
        let url = api::results_url(&self.credentials.url, job_id);
        let problem = match self
            .client
            .get(&url)
            .header(TOKEN_HEADER, &self.credentials.key)
            .send()
            .await
        {
            Ok(response) => response.json::<Problem>().await.unwrap_or_default(),
            Err(_) => Problem::default(),
        };
        problem
            .message()
            .unwrap_or_else(|| "no details provided".to_string())
    }

    /// Sends a request, retrying transient failures with backoff.
    async fn send(&self, build: impl Fn() -> RequestBuilder) -> Result<Response, RetrieveError> {
        let mut attempts = 0;

        loop {
            match build().send().await {
                Ok(response) => {
                    let status = response.status();

                    // Retry on server errors (5xx) and rate limiting (429)
                    if (status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS)
                        && attempts < self.config.max_retries
                    {
                        attempts += 1;
                        let delay = self.calculate_backoff_delay(attempts);
                        warn!(%status, attempt = attempts, "Request failed, retrying in {delay:?}");
                        tokio::time::sleep(delay).await;
                        continue;
                    }

                    if status.is_client_error() || status.is_server_error() {
                        return Err(status_error(response).await);
                    }
                    return Ok(response);
                }
                Err(e) if Self::is_retryable_error(&e) && attempts < self.config.max_retries => {
                    attempts += 1;
                    let delay = self.calculate_backoff_delay(attempts);
                    warn!(error = %e, attempt = attempts, "Request failed, retrying in {delay:?}");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Calculates the backoff delay with exponential backoff and jitter.
    fn calculate_backoff_delay(&self, attempt: u32) -> Duration {
        // base_delay * 2^attempt, capped
        let exp_delay = self
            .config
            .base_delay_ms
            .saturating_mul(1u64 << attempt.min(10));
        let capped_delay = exp_delay.min(self.config.max_delay_ms);

        // Deterministic jitter of up to +25%
        let jitter_range = capped_delay / 4;
        let jitter = if jitter_range > 0 {
            (u64::from(attempt) * 17) % jitter_range
        } else {
            0
        };

        Duration::from_millis((capped_delay + jitter).max(100))
    }

    /// Determines if an error is retryable.
    fn is_retryable_error(error: &reqwest::Error) -> bool {
        // Builder errors are configuration issues
        if error.is_builder() {
            return false;
        }

        error.is_timeout() || error.is_connect() || error.is_request()
    }
}

/// Turns an error response into [`RetrieveError::Status`], preferring the problem document.
async fn status_error(response: Response) -> RetrieveError {
    let status = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Problem>(&text)
        .ok()
        .and_then(|problem| problem.message())
        .unwrap_or(text);
    RetrieveError::Status { status, message }
}

#[async_trait]
impl Retriever for CdsClient {
    async fn retrieve(
        &self,
        dataset: &str,
        request: &RetrievalRequest,
        target: &Path,
    ) -> Result<u64, RetrieveError> {
        let job = self.submit(dataset, request).await?;
        debug!(job_id = %job.job_id, status = ?job.status, "Job submitted");

        let job = self.wait(job).await?;
        if job.status != JobState::Successful {
            let message = self.failure_message(&job.job_id).await;
            return Err(RetrieveError::JobFailed {
                job_id: job.job_id,
                state: job.status,
                message,
            });
        }

        let results = self.results(&job.job_id).await?;
        let href = api::asset_url(&self.credentials.url, &results.asset.value.href);
        debug!(job_id = %job.job_id, %href, "Downloading result");

        let written = self.download(&href, target).await?;
        match results.asset.value.size {
            Some(expected) if expected != written => Err(RetrieveError::SizeMismatch {
                path: target.to_path_buf(),
                expected,
                actual: written,
            }),
            _ => Ok(written),
        }
    }
}
