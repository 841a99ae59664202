//! Climate Data Store client and hourly range fetching for seastate.
//!
//! This crate provides the download pipeline:
//!
//! - [`CdsCredentials`] - Endpoint and token from the environment or `~/.cdsapirc`
//! - [`CdsClient`] - HTTP client that submits, polls and downloads retrieval jobs
//! - [`Retriever`] - The seam between the range loop and the retrieval service
//! - [`RangeFetcher`] - Sequential per-hour retrieval into a group directory
//! - [`api`] - Retrieve API endpoints and documents

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/seastate/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod api;
mod client;
mod config;
mod range;

pub use client::{CdsClient, ClientConfig, RetrieveError, Retriever};
pub use config::{CdsCredentials, ConfigError, KEY_ENV, RC_ENV, RC_FILE, URL_ENV};
pub use range::{DEFAULT_OUTPUT_ROOT, FetchSummary, RangeFetcher};
