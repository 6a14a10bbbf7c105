//! fetchzip library
//!
//! Streaming HTTP(S) downloads with progress reporting, and ZIP extraction
//! that never overwrites what is already on disk.

pub mod commands;
pub mod core;
pub mod error;
pub mod utils;

pub use crate::core::download::{download, DownloadOutcome, Downloader};
pub use crate::core::extract::{unzip, ExtractSummary};
pub use crate::error::{FetchError, Result};
