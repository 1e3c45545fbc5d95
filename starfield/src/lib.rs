//! Star catalogs for naked-eye sky charts.
//!
//! A [`SkyCatalog`] holds stars keyed by Hipparcos number together with named
//! constellation figures (lists of star-to-star edges). Catalogs come from a
//! [`CatalogProvider`]: the small built-in sample, a local `hip_main.dat`, or
//! a downloaded and cached copy of it. [`FallbackCatalog`] tries one provider
//! and drops back to another, reporting which one was used.

pub mod catalogs;
pub mod data;
pub mod error;
pub mod provider;

pub use catalogs::{ConstellationEdge, SkyCatalog, StarCatalog, StarRecord};
pub use error::CatalogError;
pub use provider::{
    CatalogLoad, CatalogProvider, EmbeddedCatalog, FallbackCatalog, HipparcosDownload,
    HipparcosFile, DEFAULT_MAGNITUDE_LIMIT,
};
