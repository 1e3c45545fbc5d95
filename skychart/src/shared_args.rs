use std::path::PathBuf;

use chrono::{DateTime, NaiveDateTime, Utc};
use clap::{Parser, ValueEnum};
use starfield::{
    CatalogError, CatalogLoad, CatalogProvider, EmbeddedCatalog, FallbackCatalog,
    HipparcosDownload, HipparcosFile, DEFAULT_MAGNITUDE_LIMIT,
};

use crate::config_storage::ConfigStorage;
use crate::style::ChartStyle;
use crate::location::{
    find_preset, InteractivePrompt, IpGeolocation, LocationChain, LocationError,
    LocationProvider, ManualLocation, PresetLocation, PRESETS,
};

/// Format accepted by `--time`
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a UTC time in the form "YYYY-MM-DD HH:MM:SS"
pub fn parse_time(s: &str) -> Result<DateTime<Utc>, String> {
    NaiveDateTime::parse_from_str(s.trim(), TIME_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| format!("Invalid time '{s}' (expected YYYY-MM-DD HH:MM:SS): {e}"))
}

fn parse_preset(s: &str) -> Result<String, String> {
    match find_preset(s) {
        Some(preset) => Ok(preset.key.to_string()),
        None => {
            let keys: Vec<&str> = PRESETS.iter().map(|p| p.key).collect();
            Err(format!(
                "Unknown location '{s}'. Available: {}",
                keys.join(", ")
            ))
        }
    }
}

/// Which star catalog to draw from
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CatalogChoice {
    /// Built-in sample of bright stars
    Embedded,
    /// Hipparcos main catalog, downloaded and cached on first use
    Hipparcos,
}

impl std::fmt::Display for CatalogChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogChoice::Embedded => write!(f, "embedded"),
            CatalogChoice::Hipparcos => write!(f, "hipparcos"),
        }
    }
}

/// Command-line arguments of the `skychart` binary
#[derive(Parser, Debug, Clone)]
#[command(
    name = "skychart",
    about = "Generate a night-sky chart for any place on Earth at any time",
    long_about = None
)]
pub struct SkyChartArgs {
    /// Preset location (see --list-locations)
    #[arg(long, value_parser = parse_preset)]
    pub location: Option<String>,

    /// Latitude in degrees, north positive
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude in degrees, east positive
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Elevation in meters
    #[arg(long, default_value_t = 0.0)]
    pub elevation: f64,

    /// City name shown in the title with --lat/--lon
    #[arg(long)]
    pub city: Option<String>,

    /// UTC time "YYYY-MM-DD HH:MM:SS" (defaults to now)
    #[arg(long, value_parser = parse_time)]
    pub time: Option<DateTime<Utc>>,

    /// Output file; .svg or .png
    #[arg(long, default_value = "sky_view.png")]
    pub output: PathBuf,

    /// Output width in pixels
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Output height in pixels
    #[arg(long, default_value_t = 1200)]
    pub height: u32,

    /// List preset locations and exit
    #[arg(long)]
    pub list_locations: bool,

    /// Detect location from the public IP address
    #[arg(long)]
    pub auto_location: bool,

    /// Star catalog
    #[arg(long, value_enum, default_value_t = CatalogChoice::Embedded)]
    pub catalog: CatalogChoice,

    /// Local Hipparcos hip_main.dat (optionally .gz); implies --catalog hipparcos
    #[arg(long)]
    pub catalog_file: Option<PathBuf>,

    /// Faintest magnitude loaded from Hipparcos
    #[arg(long, default_value_t = DEFAULT_MAGNITUDE_LIMIT)]
    pub magnitude_limit: f64,

    /// Chart style JSON (defaults to the saved style, then built-in)
    #[arg(long)]
    pub style: Option<PathBuf>,

    /// Configuration directory (defaults to ~/.skychart)
    #[arg(long)]
    pub config_dir: Option<PathBuf>,

    /// Store the --style file as the default style and exit
    #[arg(long, requires = "style")]
    pub save_style: bool,

    /// Delete the stored default style and exit
    #[arg(long, conflicts_with = "save_style")]
    pub reset_style: bool,

    /// Delete downloaded catalogs and exit
    #[arg(long)]
    pub clear_cache: bool,
}

impl SkyChartArgs {
    pub fn config_storage(&self) -> ConfigStorage {
        match &self.config_dir {
            Some(dir) => ConfigStorage::with_path(dir.clone()),
            None => ConfigStorage::default(),
        }
    }

    /// True when the flags ask for config maintenance instead of a chart
    pub fn is_maintenance(&self) -> bool {
        self.save_style || self.reset_style || self.clear_cache
    }

    /// Apply the config maintenance flags, returning one message per action.
    pub fn run_maintenance(&self, storage: &ConfigStorage) -> std::io::Result<Vec<String>> {
        let mut messages = Vec::new();
        if self.save_style {
            if let Some(source) = &self.style {
                let style = ChartStyle::load_from_file(source)?;
                let path = storage.save_chart_style(&style)?;
                messages.push(format!("Saved chart style to {}", path.display()));
            }
        }
        if self.reset_style {
            if storage.delete_chart_style()? {
                messages.push("Deleted saved chart style".to_string());
            } else {
                messages.push("No saved chart style".to_string());
            }
        }
        if self.clear_cache {
            let removed = storage.clear_catalog_cache()?;
            messages.push(format!(
                "Removed {removed} cached catalog file(s) from {}",
                storage.catalog_cache_dir().display()
            ));
        }
        Ok(messages)
    }

    /// The catalog actually used, after `--catalog-file` is taken into account
    pub fn effective_catalog(&self) -> CatalogChoice {
        if self.catalog_file.is_some() {
            CatalogChoice::Hipparcos
        } else {
            self.catalog
        }
    }

    /// Pick the location provider the flags ask for.
    ///
    /// `--auto-location` wins, then `--location`, then `--lat/--lon`. With
    /// none of them, IP lookup is tried and then the terminal prompt.
    pub fn location_provider(&self) -> Result<Box<dyn LocationProvider>, LocationError> {
        if self.auto_location {
            return Ok(Box::new(IpGeolocation::new()));
        }
        if let Some(key) = &self.location {
            return Ok(Box::new(PresetLocation::from_key(key)?));
        }
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Ok(Box::new(ManualLocation::new(
                lat,
                lon,
                self.elevation,
                self.city.clone(),
            )?)),
            (None, None) => Ok(Box::new(
                LocationChain::new()
                    .with(Box::new(IpGeolocation::new()))
                    .with(Box::new(InteractivePrompt::stdio())),
            )),
            _ => Err(LocationError::Input(
                "--lat and --lon must be given together".to_string(),
            )),
        }
    }

    /// Primary catalog provider for the chosen source
    pub fn catalog_provider(&self, storage: &ConfigStorage) -> Box<dyn CatalogProvider> {
        match (self.effective_catalog(), &self.catalog_file) {
            (CatalogChoice::Hipparcos, Some(path)) => Box::new(
                HipparcosFile::new(path.clone()).with_magnitude_limit(self.magnitude_limit),
            ),
            (CatalogChoice::Hipparcos, None) => Box::new(
                HipparcosDownload::new(storage.catalog_cache_dir())
                    .with_magnitude_limit(self.magnitude_limit),
            ),
            (CatalogChoice::Embedded, _) => Box::new(EmbeddedCatalog),
        }
    }

    /// Load the catalog. Hipparcos failures fall back to the embedded sample.
    pub fn load_catalog(&self, storage: &ConfigStorage) -> Result<CatalogLoad, CatalogError> {
        let provider = self.catalog_provider(storage);
        match self.effective_catalog() {
            CatalogChoice::Embedded => provider.load().map(CatalogLoad::Loaded),
            CatalogChoice::Hipparcos => FallbackCatalog::with_embedded(provider).load(),
        }
    }
}
