use ephemeris::ObserverLocation;

use super::{LocationError, LocationProvider, LocationSource, ResolvedLocation};

/// A named city in the built-in table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    pub key: &'static str,
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

pub const PRESETS: &[Preset] = &[
    Preset {
        key: "new_york",
        name: "New York City",
        latitude: 40.7128,
        longitude: -74.0060,
    },
    Preset {
        key: "london",
        name: "London",
        latitude: 51.5074,
        longitude: -0.1278,
    },
    Preset {
        key: "tokyo",
        name: "Tokyo",
        latitude: 35.6762,
        longitude: 139.6503,
    },
    Preset {
        key: "sydney",
        name: "Sydney",
        latitude: -33.8688,
        longitude: 151.2093,
    },
    Preset {
        key: "paris",
        name: "Paris",
        latitude: 48.8566,
        longitude: 2.3522,
    },
    Preset {
        key: "cairo",
        name: "Cairo",
        latitude: 30.0444,
        longitude: 31.2357,
    },
    Preset {
        key: "reykjavik",
        name: "Reykjavik",
        latitude: 64.1466,
        longitude: -21.9426,
    },
    Preset {
        key: "anchorage",
        name: "Anchorage",
        latitude: 61.2181,
        longitude: -149.9003,
    },
];

pub fn find_preset(key: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.key == key)
}

/// Location from the built-in city table
#[derive(Debug, Clone, Copy)]
pub struct PresetLocation {
    preset: &'static Preset,
}

impl PresetLocation {
    pub fn from_key(key: &str) -> Result<Self, LocationError> {
        find_preset(key)
            .map(|preset| Self { preset })
            .ok_or_else(|| LocationError::UnknownPreset(key.to_string()))
    }

    pub fn preset(&self) -> &'static Preset {
        self.preset
    }
}

impl LocationProvider for PresetLocation {
    fn name(&self) -> &str {
        "preset location"
    }

    fn locate(&self) -> Result<ResolvedLocation, LocationError> {
        Ok(ResolvedLocation {
            location: ObserverLocation::new(self.preset.latitude, self.preset.longitude, 0.0)?,
            display_name: Some(self.preset.name.to_string()),
            country: None,
            source: LocationSource::Preset,
        })
    }
}

/// Explicit coordinates, optionally with a city name
#[derive(Debug, Clone)]
pub struct ManualLocation {
    location: ObserverLocation,
    city: Option<String>,
}

impl ManualLocation {
    pub const DEFAULT_NAME: &'static str = "Custom Location";

    pub fn new(
        latitude: f64,
        longitude: f64,
        elevation: f64,
        city: Option<String>,
    ) -> Result<Self, LocationError> {
        Ok(Self {
            location: ObserverLocation::new(latitude, longitude, elevation)?,
            city,
        })
    }
}

impl LocationProvider for ManualLocation {
    fn name(&self) -> &str {
        "manual coordinates"
    }

    fn locate(&self) -> Result<ResolvedLocation, LocationError> {
        Ok(ResolvedLocation {
            location: self.location,
            display_name: Some(
                self.city
                    .clone()
                    .unwrap_or_else(|| Self::DEFAULT_NAME.to_string()),
            ),
            country: None,
            source: LocationSource::Manual,
        })
    }
}
