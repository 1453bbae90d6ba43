//! Resource providers and the logo loader for the report pipeline.
//!
//! This crate provides implementations of the `ResourceProvider` trait from
//! phishreport-traits, plus [`load_image`], which turns provider bytes into a
//! [`LogoAsset`](phishreport_types::LogoAsset).
//!
//! ## Available Providers
//!
//! - [`FilesystemResourceProvider`]: Loads resources from the local filesystem
//! - [`HttpResourceProvider`]: Fetches resources relative to a base URL
//!
//! ## Re-exports
//!
//! For convenience, we also re-export the in-memory provider from phishreport-traits:
//! - [`InMemoryResourceProvider`]: Pre-populated in-memory storage

mod filesystem;
mod http;
mod image_loader;

pub use filesystem::FilesystemResourceProvider;
pub use http::HttpResourceProvider;
pub use image_loader::{decode_logo, load_image};

pub use phishreport_traits::InMemoryResourceProvider;
