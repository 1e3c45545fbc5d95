//! Star catalogs module
//!
//! This module provides the in-memory catalog model and the loaders that
//! fill it.

pub mod constellations;
pub mod embedded;
pub mod hipparcos;

use std::collections::BTreeMap;

use ephemeris::CelestialPoint;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

pub use hipparcos::{parse_hipparcos, read_hipparcos_file, HipparcosParse};

/// Generic trait for all star catalogs
pub trait StarCatalog {
    /// Star entry type for this catalog
    type Star;

    /// Get a star by its identifier
    fn get_star(&self, id: usize) -> Option<&Self::Star>;

    /// Get all stars in the catalog
    fn stars(&self) -> impl Iterator<Item = &Self::Star>;

    /// Get the number of stars in the catalog
    fn len(&self) -> usize;

    /// Check if the catalog is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Filter stars based on a predicate
    fn filter<F>(&self, predicate: F) -> Vec<&Self::Star>
    where
        F: Fn(&Self::Star) -> bool;
}

/// A single catalog star
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StarRecord {
    /// Hipparcos number
    pub id: usize,
    pub position: CelestialPoint,
    /// Visual magnitude; smaller is brighter
    pub magnitude: f64,
}

impl StarRecord {
    /// Build a star from raw degrees, validating the position.
    pub fn new(id: usize, ra: f64, dec: f64, magnitude: f64) -> Result<Self, CatalogError> {
        let position = CelestialPoint::new(ra, dec)
            .map_err(|source| CatalogError::InvalidPosition { id, source })?;
        Ok(Self {
            id,
            position,
            magnitude,
        })
    }
}

/// One line of a constellation figure, joining two stars by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConstellationEdge {
    pub star_a: usize,
    pub star_b: usize,
}

impl ConstellationEdge {
    pub const fn new(star_a: usize, star_b: usize) -> Self {
        Self { star_a, star_b }
    }
}

/// Stars keyed by id plus named constellation figures.
///
/// Both maps are ordered so that iteration, and everything drawn from it,
/// is deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkyCatalog {
    stars: BTreeMap<usize, StarRecord>,
    constellations: BTreeMap<String, Vec<ConstellationEdge>>,
}

impl SkyCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from stars. A later record with a repeated id replaces
    /// the earlier one.
    pub fn from_stars<I>(stars: I) -> Self
    where
        I: IntoIterator<Item = StarRecord>,
    {
        let mut catalog = Self::new();
        for star in stars {
            catalog.insert_star(star);
        }
        catalog
    }

    /// Insert a star, returning any record it replaced.
    pub fn insert_star(&mut self, star: StarRecord) -> Option<StarRecord> {
        self.stars.insert(star.id, star)
    }

    /// Append edges to a named constellation, creating it if needed.
    pub fn add_constellation<S, I>(&mut self, name: S, edges: I)
    where
        S: Into<String>,
        I: IntoIterator<Item = ConstellationEdge>,
    {
        self.constellations
            .entry(name.into())
            .or_default()
            .extend(edges);
    }

    /// Attach the built-in constellation figures.
    pub fn with_constellation_lines(mut self) -> Self {
        for (name, edges) in constellations::CONSTELLATION_LINES {
            self.add_constellation(*name, edges.iter().copied());
        }
        self
    }

    /// Edges of one constellation, or an empty slice if it is unknown.
    pub fn constellation_lines(&self, name: &str) -> &[ConstellationEdge] {
        self.constellations
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Constellation names in sorted order
    pub fn constellation_names(&self) -> impl Iterator<Item = &str> {
        self.constellations.keys().map(String::as_str)
    }

    /// All constellations in name order
    pub fn constellations(&self) -> impl Iterator<Item = (&str, &[ConstellationEdge])> {
        self.constellations
            .iter()
            .map(|(name, edges)| (name.as_str(), edges.as_slice()))
    }

    /// Read-only access to the id → star map
    pub fn star_map(&self) -> &BTreeMap<usize, StarRecord> {
        &self.stars
    }
}

impl StarCatalog for SkyCatalog {
    type Star = StarRecord;

    fn get_star(&self, id: usize) -> Option<&StarRecord> {
        self.stars.get(&id)
    }

    fn stars(&self) -> impl Iterator<Item = &StarRecord> {
        self.stars.values()
    }

    fn len(&self) -> usize {
        self.stars.len()
    }

    fn filter<F>(&self, predicate: F) -> Vec<&StarRecord>
    where
        F: Fn(&StarRecord) -> bool,
    {
        self.stars.values().filter(|s| predicate(s)).collect()
    }
}
