use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info};

use crate::error::CatalogError;

/// Hipparcos main catalog at the CDS archive
pub const HIPPARCOS_URL: &str = "https://cdsarc.cds.unistra.fr/ftp/cats/I/239/hip_main.dat";

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Create the cache directory if it does not exist yet.
pub fn ensure_cache_dir(cache_dir: &Path) -> Result<(), CatalogError> {
    if !cache_dir.exists() {
        debug!("Creating cache directory {}", cache_dir.display());
        fs::create_dir_all(cache_dir)?;
    }
    Ok(())
}

/// Where a given URL is stored inside the cache directory.
///
/// The file keeps the last path segment of the URL, so a `.gz` download is
/// still recognised as compressed when read back.
pub fn cached_file_path(url: &str, cache_dir: &Path) -> PathBuf {
    let name = url
        .split(['?', '#'])
        .next()
        .and_then(|u| u.rsplit('/').next())
        .filter(|n| !n.is_empty())
        .unwrap_or("catalog.dat");
    cache_dir.join(name)
}

/// Download a catalog file into `cache_dir` unless it is already cached.
///
/// The body is written to a `.part` file first and renamed into place, so an
/// interrupted download never leaves a truncated file that looks valid.
///
/// # Arguments
/// * `url` - Source URL of the catalog
/// * `cache_dir` - Directory holding downloaded catalogs
///
/// # Returns
/// Path of the cached file
pub fn download_hipparcos(url: &str, cache_dir: &Path) -> Result<PathBuf, CatalogError> {
    let path = cached_file_path(url, cache_dir);

    if let Ok(meta) = fs::metadata(&path) {
        if meta.len() > 0 {
            debug!("Using cached catalog {}", path.display());
            return Ok(path);
        }
    }

    ensure_cache_dir(cache_dir)?;
    info!("Downloading star catalog from {url}");

    let client = reqwest::blocking::Client::builder()
        .timeout(DOWNLOAD_TIMEOUT)
        .build()?;
    let response = client.get(url).send()?.error_for_status()?;
    let bytes = response.bytes()?;

    let partial = path.with_extension("part");
    {
        let mut file = fs::File::create(&partial)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
    }
    fs::rename(&partial, &path)?;

    info!("Saved {} bytes to {}", bytes.len(), path.display());
    Ok(path)
}
