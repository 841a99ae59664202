//! Rust library for downloading hourly ERA5 ocean wave data.
//!
//! This is a facade crate that re-exports functionality from the seastate
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```no_run
//! use seastate_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//!     let client = CdsClient::from_env()?;
//!     let range = TimeRange::parse("20200101000000", "20200101020000")?;
//!
//!     let summary = RangeFetcher::new(&client).fetch("test1", range).await?;
//!     println!("Wrote {} files to {}", summary.files.len(), summary.directory.display());
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/seastate/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use seastate_types::*;

// Re-export fetch functionality
#[cfg(feature = "fetch")]
pub use seastate_fetch::{
    CdsClient, CdsCredentials, ClientConfig, ConfigError, DEFAULT_OUTPUT_ROOT, FetchSummary,
    RangeFetcher, RetrieveError, Retriever, api,
};

/// Prelude module for convenient imports.
///
/// ```
/// use seastate_lib::prelude::*;
/// ```
pub mod prelude {
    pub use seastate_types::{
        DataFormat, Result, RetrievalRequest, SeastateError, TimeRange, WaveVariable,
        parse_timestamp,
    };

    #[cfg(feature = "fetch")]
    pub use seastate_fetch::{
        CdsClient, CdsCredentials, ClientConfig, FetchSummary, RangeFetcher, Retriever,
    };
}
