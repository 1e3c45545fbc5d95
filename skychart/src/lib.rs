//! Night-sky charts for an arbitrary place and time.
//!
//! The pipeline runs in one direction:
//!
//! ```text
//! location + instant + catalog
//!     -> horizontal coordinates   (ephemeris::Transformer)
//!     -> chart-plane coordinates  (projection)
//!     -> drawing primitives       (composer)
//!     -> SVG / PNG                (viz)
//! ```
//!
//! Locations come from a [`location::LocationProvider`], catalogs from a
//! [`starfield::CatalogProvider`]; the composer never sees which one.

pub mod composer;
pub mod config_storage;
pub mod error;
pub mod location;
pub mod projection;
pub mod shared_args;
pub mod style;

pub use composer::{title_text, ChartComposer, ChartStats, SkyChart};
pub use config_storage::ConfigStorage;
pub use error::ComposeError;
pub use projection::{
    altitude_ring, horizon_boundary, magnitude_to_size, project, ring_radius, OFF_CHART_RADIUS,
};
pub use style::{ChartStyle, Palette, StyleError};
