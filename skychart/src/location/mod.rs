//! Resolving where the observer is.
//!
//! Every way of finding a location implements [`LocationProvider`]. The
//! variants are fixed coordinates ([`ManualLocation`]), a named city from a
//! built-in table ([`PresetLocation`]), public IP geolocation services
//! ([`IpGeolocation`]) and asking on a terminal ([`InteractivePrompt`]).
//! [`LocationChain`] tries several in order.

mod ip;
mod manual;
mod prompt;

use std::fmt;

use ephemeris::{ObserverLocation, TransformError};
use log::{info, warn};
use thiserror::Error;

pub use ip::{parse_service_response, GeoService, IpGeolocation};
pub use manual::{find_preset, ManualLocation, Preset, PresetLocation, PRESETS};
pub use prompt::InteractivePrompt;

#[derive(Error, Debug)]
pub enum LocationError {
    #[error("{service}: request failed: {message}")]
    Network { service: String, message: String },

    #[error("{service}: {reason}")]
    ServiceRejected { service: String, reason: String },

    #[error("Could not determine location: {0}")]
    NoResult(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(#[from] TransformError),

    #[error("Unknown location '{0}'")]
    UnknownPreset(String),

    #[error("Invalid input: {0}")]
    Input(String),
}

/// How a location was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationSource {
    Manual,
    Preset,
    IpGeolocation,
    Interactive,
}

impl fmt::Display for LocationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            LocationSource::Manual => "manual coordinates",
            LocationSource::Preset => "preset",
            LocationSource::IpGeolocation => "IP-based (~city level)",
            LocationSource::Interactive => "manual input",
        };
        f.write_str(text)
    }
}

/// An observer location plus how to describe it
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub location: ObserverLocation,
    pub display_name: Option<String>,
    pub country: Option<String>,
    pub source: LocationSource,
}

impl ResolvedLocation {
    /// Multi-line human-readable summary
    pub fn describe(&self) -> String {
        let mut lines = vec![
            format!("  Latitude: {:.4}°", self.location.latitude),
            format!("  Longitude: {:.4}°", self.location.longitude),
        ];
        if let Some(city) = &self.display_name {
            lines.push(format!("  City: {city}"));
        }
        if let Some(country) = &self.country {
            lines.push(format!("  Country: {country}"));
        }
        lines.push(format!("  Accuracy: {}", self.source));
        lines.join("\n")
    }
}

/// A way of finding the observer's location
pub trait LocationProvider {
    /// Short name used in logs
    fn name(&self) -> &str;

    fn locate(&self) -> Result<ResolvedLocation, LocationError>;
}

/// Try providers in order; the first success wins.
#[derive(Default)]
pub struct LocationChain {
    providers: Vec<Box<dyn LocationProvider>>,
}

impl LocationChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, provider: Box<dyn LocationProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl LocationProvider for LocationChain {
    fn name(&self) -> &str {
        "location chain"
    }

    fn locate(&self) -> Result<ResolvedLocation, LocationError> {
        let mut failures = Vec::new();
        for provider in &self.providers {
            info!("Trying {}", provider.name());
            match provider.locate() {
                Ok(resolved) => {
                    info!("Location detected via {}", provider.name());
                    return Ok(resolved);
                }
                Err(err) => {
                    warn!("{} failed: {}", provider.name(), err);
                    failures.push(format!("{}: {}", provider.name(), err));
                }
            }
        }
        if failures.is_empty() {
            return Err(LocationError::NoResult("no providers configured".to_string()));
        }
        Err(LocationError::NoResult(failures.join("; ")))
    }
}
