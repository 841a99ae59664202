//! Core types for the seastate ERA5 wave data downloader.
//!
//! This crate provides the fundamental data structures used throughout seastate:
//!
//! - [`parse_timestamp`] - Parses `YYYYMMDDHHMMSS` command-line timestamps
//! - [`TimeRange`] - Inclusive time range enumerated hour by hour
//! - [`WaveVariable`] - The ERA5 ocean wave parameters requested per hour
//! - [`RetrievalRequest`] - Request payload for a single hourly retrieval
//! - [`DataFormat`] - Output encoding of the retrieved files

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/seastate/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod request;
mod time_range;
mod timestamp;
mod variable;

pub use error::{DataFormatError, Result, SeastateError, TimestampError};
pub use request::{DATASET, DataFormat, PRODUCT_TYPE, RetrievalRequest, output_file_name};
pub use time_range::{HourIterator, TimeRange};
pub use timestamp::{TIMESTAMP_FORMAT, TIMESTAMP_LEN, parse_timestamp};
pub use variable::{UnknownVariable, WaveVariable};
