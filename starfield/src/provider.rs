//! Catalog providers.
//!
//! A chart needs a [`SkyCatalog`] but does not care where it came from. Each
//! source implements [`CatalogProvider`]; [`FallbackCatalog`] chains two of
//! them and reports through [`CatalogLoad`] whether the fallback was taken.

use std::path::PathBuf;

use log::{info, warn};

use crate::catalogs::embedded::sample_catalog;
use crate::catalogs::{read_hipparcos_file, SkyCatalog, StarCatalog};
use crate::data::{download_hipparcos, HIPPARCOS_URL};
use crate::error::CatalogError;

/// Naked-eye limit used when none is given
pub const DEFAULT_MAGNITUDE_LIMIT: f64 = 6.0;

/// A source of star catalogs
pub trait CatalogProvider {
    /// Short human-readable name, used in logs
    fn name(&self) -> &str;

    /// Produce a catalog with constellation figures attached
    fn load(&self) -> Result<SkyCatalog, CatalogError>;
}

/// The built-in sample of bright stars in Ursa Major, Orion and Cassiopeia
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedCatalog;

impl CatalogProvider for EmbeddedCatalog {
    fn name(&self) -> &str {
        "embedded sample"
    }

    fn load(&self) -> Result<SkyCatalog, CatalogError> {
        sample_catalog()
    }
}

/// A local `hip_main.dat` (optionally gzipped)
#[derive(Debug, Clone)]
pub struct HipparcosFile {
    pub path: PathBuf,
    pub magnitude_limit: f64,
}

impl HipparcosFile {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            magnitude_limit: DEFAULT_MAGNITUDE_LIMIT,
        }
    }

    pub fn with_magnitude_limit(mut self, magnitude_limit: f64) -> Self {
        self.magnitude_limit = magnitude_limit;
        self
    }
}

impl CatalogProvider for HipparcosFile {
    fn name(&self) -> &str {
        "Hipparcos file"
    }

    fn load(&self) -> Result<SkyCatalog, CatalogError> {
        let parsed = read_hipparcos_file(&self.path, self.magnitude_limit)?;
        let catalog = SkyCatalog::from_stars(parsed.stars).with_constellation_lines();
        if catalog.is_empty() {
            return Err(CatalogError::Empty(self.path.display().to_string()));
        }
        info!(
            "Loaded {} stars brighter than magnitude {} from {}",
            catalog.len(),
            self.magnitude_limit,
            self.path.display()
        );
        Ok(catalog)
    }
}

/// Hipparcos catalog fetched over HTTP and cached on disk
#[derive(Debug, Clone)]
pub struct HipparcosDownload {
    pub url: String,
    pub cache_dir: PathBuf,
    pub magnitude_limit: f64,
}

impl HipparcosDownload {
    /// Download from the CDS archive into `cache_dir`.
    pub fn new<P: Into<PathBuf>>(cache_dir: P) -> Self {
        Self {
            url: HIPPARCOS_URL.to_string(),
            cache_dir: cache_dir.into(),
            magnitude_limit: DEFAULT_MAGNITUDE_LIMIT,
        }
    }

    pub fn with_url<S: Into<String>>(mut self, url: S) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_magnitude_limit(mut self, magnitude_limit: f64) -> Self {
        self.magnitude_limit = magnitude_limit;
        self
    }
}

impl CatalogProvider for HipparcosDownload {
    fn name(&self) -> &str {
        "Hipparcos download"
    }

    fn load(&self) -> Result<SkyCatalog, CatalogError> {
        let path = download_hipparcos(&self.url, &self.cache_dir)?;
        HipparcosFile::new(path)
            .with_magnitude_limit(self.magnitude_limit)
            .load()
    }
}

/// Outcome of [`FallbackCatalog::load`]
#[derive(Debug)]
pub enum CatalogLoad {
    /// The primary provider succeeded
    Loaded(SkyCatalog),
    /// The primary failed; `reason` is its error message
    Fallback { catalog: SkyCatalog, reason: String },
}

impl CatalogLoad {
    pub fn catalog(&self) -> &SkyCatalog {
        match self {
            CatalogLoad::Loaded(catalog) => catalog,
            CatalogLoad::Fallback { catalog, .. } => catalog,
        }
    }

    pub fn into_catalog(self) -> SkyCatalog {
        match self {
            CatalogLoad::Loaded(catalog) => catalog,
            CatalogLoad::Fallback { catalog, .. } => catalog,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, CatalogLoad::Fallback { .. })
    }
}

/// Try `primary`, and on any error load `fallback` instead.
pub struct FallbackCatalog {
    primary: Box<dyn CatalogProvider>,
    fallback: Box<dyn CatalogProvider>,
}

impl FallbackCatalog {
    pub fn new(primary: Box<dyn CatalogProvider>, fallback: Box<dyn CatalogProvider>) -> Self {
        Self { primary, fallback }
    }

    /// Fall back to the embedded sample
    pub fn with_embedded(primary: Box<dyn CatalogProvider>) -> Self {
        Self::new(primary, Box::new(EmbeddedCatalog))
    }

    /// Load from the primary provider, falling back on failure.
    ///
    /// Only an error from the fallback provider itself is returned.
    pub fn load(&self) -> Result<CatalogLoad, CatalogError> {
        match self.primary.load() {
            Ok(catalog) => Ok(CatalogLoad::Loaded(catalog)),
            Err(err) => {
                warn!(
                    "{} failed ({}); using {}",
                    self.primary.name(),
                    err,
                    self.fallback.name()
                );
                let catalog = self.fallback.load()?;
                Ok(CatalogLoad::Fallback {
                    catalog,
                    reason: err.to_string(),
                })
            }
        }
    }
}
