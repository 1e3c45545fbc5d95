//! Configuration storage for chart styles and downloaded catalogs.
//!
//! All config is stored in ~/.skychart/ by default.

use std::path::{Path, PathBuf};

use crate::style::ChartStyle;

/// Configuration storage manager.
///
/// Manages the saved chart style and the catalog download cache under one
/// root directory (defaults to ~/.skychart/).
#[derive(Debug, Clone)]
pub struct ConfigStorage {
    /// Root directory for all configuration (e.g., ~/.skychart)
    root_path: PathBuf,
}

impl ConfigStorage {
    /// Create a new config storage with default path (~/.skychart)
    pub fn new() -> std::io::Result<Self> {
        let home = std::env::var("HOME")
            .map_err(|_| std::io::Error::new(std::io::ErrorKind::NotFound, "HOME not set"))?;
        let root_path = PathBuf::from(home).join(".skychart");
        Ok(Self { root_path })
    }

    /// Create a new config storage with custom root path
    pub fn with_path(root_path: PathBuf) -> Self {
        Self { root_path }
    }

    /// Get the root configuration path
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    // =========================================================================
    // Chart Style
    // =========================================================================

    fn chart_style_path(&self) -> PathBuf {
        self.root_path.join("chart_style.json")
    }

    /// Get the saved chart style.
    ///
    /// Returns None if no style has been saved.
    /// Returns Some(Err) if the file exists but cannot be loaded.
    pub fn get_chart_style(&self) -> Option<std::io::Result<ChartStyle>> {
        let path = self.chart_style_path();

        if !path.exists() {
            return None;
        }

        Some(ChartStyle::load_from_file(&path))
    }

    /// Save the chart style.
    ///
    /// Creates the config directory if it doesn't exist.
    /// Returns the path where the style was saved.
    pub fn save_chart_style(&self, style: &ChartStyle) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(&self.root_path)?;

        let path = self.chart_style_path();
        style.save_to_file(&path)?;
        Ok(path)
    }

    /// Delete the saved chart style.
    ///
    /// Returns Ok(true) if the file was deleted, Ok(false) if it didn't exist.
    pub fn delete_chart_style(&self) -> std::io::Result<bool> {
        let path = self.chart_style_path();

        if !path.exists() {
            return Ok(false);
        }

        std::fs::remove_file(path)?;
        Ok(true)
    }

    // =========================================================================
    // Catalog cache
    // =========================================================================

    /// Directory downloaded catalogs are cached in. Not created here.
    pub fn catalog_cache_dir(&self) -> PathBuf {
        self.root_path.join("catalogs")
    }

    /// List cached catalog files, sorted by name.
    pub fn list_cached_catalogs(&self) -> std::io::Result<Vec<PathBuf>> {
        let dir = self.catalog_cache_dir();

        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Remove every cached catalog file.
    ///
    /// Returns the number of files removed.
    pub fn clear_catalog_cache(&self) -> std::io::Result<usize> {
        let files = self.list_cached_catalogs()?;
        for file in &files {
            std::fs::remove_file(file)?;
        }
        Ok(files.len())
    }
}

impl Default for ConfigStorage {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self::with_path(PathBuf::from(".skychart")))
    }
}
