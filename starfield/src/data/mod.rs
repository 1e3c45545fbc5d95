//! Data module for downloading and caching astronomical data
//!
//! This module provides functionality for fetching catalog files once and
//! reusing the cached copy afterwards.

mod downloader;

pub use downloader::{cached_file_path, download_hipparcos, ensure_cache_dir, HIPPARCOS_URL};
