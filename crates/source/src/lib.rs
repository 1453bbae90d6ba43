//! Metrics sources for the report pipeline.
//!
//! This crate provides implementations of the `MetricsSource` trait from
//! phishreport-traits.
//!
//! ## Available Sources
//!
//! - [`HttpMetricsSource`]: the platform's REST backend, over `reqwest`
//! - [`InMemoryMetricsSource`]: canned payloads with call counting, for tests
//!   and offline demos
//!
//! ## Example
//!
//! ```ignore
//! use phishreport_source::HttpMetricsSource;
//! use std::time::Duration;
//!
//! let source = HttpMetricsSource::new("http://127.0.0.1:8000", Some(token), Duration::from_secs(30))?;
//! let dashboard = source.dashboard().await?;
//! ```

mod http;
mod memory;

pub use http::{CAMPAIGN_PAGE_SIZE, HttpMetricsSource};
pub use memory::InMemoryMetricsSource;
