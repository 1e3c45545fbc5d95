//! Coordinate types for the observer, the celestial sphere and the local sky

pub mod horizontal;

use serde::{Deserialize, Serialize};

use crate::error::{check_range, TransformError};

/// Wrap an angle in degrees into [0, 360).
///
/// `rem_euclid` can round a tiny negative input up to exactly 360.0, which
/// would escape the half-open interval, so that case is folded back to zero.
pub fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Where on Earth the sky is being viewed from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObserverLocation {
    /// Geodetic latitude in degrees, [-90, 90]
    pub latitude: f64,
    /// Longitude in degrees east of Greenwich, [-180, 180]
    pub longitude: f64,
    /// Height above sea level in meters
    pub elevation: f64,
}

impl ObserverLocation {
    /// Build a validated observer location.
    pub fn new(latitude: f64, longitude: f64, elevation: f64) -> Result<Self, TransformError> {
        let location = Self {
            latitude,
            longitude,
            elevation,
        };
        location.validate()?;
        Ok(location)
    }

    /// Check that every field is inside its physical domain.
    ///
    /// Fields are public, so values built with a struct literal or
    /// deserialized from disk are checked again at the transform boundary.
    pub fn validate(&self) -> Result<(), TransformError> {
        check_range("latitude", self.latitude, -90.0, 90.0)?;
        check_range("longitude", self.longitude, -180.0, 180.0)?;
        check_range("elevation", self.elevation, 0.0, f64::MAX)?;
        Ok(())
    }
}

/// A fixed-epoch position on the celestial sphere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CelestialPoint {
    /// Right ascension in degrees, [0, 360)
    pub ra: f64,
    /// Declination in degrees, [-90, 90]
    pub dec: f64,
}

impl CelestialPoint {
    /// Build a validated celestial point.
    ///
    /// Any finite right ascension is accepted and wrapped into [0, 360);
    /// declination outside [-90, 90] is rejected.
    pub fn new(ra: f64, dec: f64) -> Result<Self, TransformError> {
        check_range("right ascension", ra, f64::MIN, f64::MAX)?;
        check_range("declination", dec, -90.0, 90.0)?;
        Ok(Self {
            ra: normalize_degrees(ra),
            dec,
        })
    }

    pub fn validate(&self) -> Result<(), TransformError> {
        check_range("right ascension", self.ra, f64::MIN, f64::MAX)?;
        check_range("declination", self.dec, -90.0, 90.0)
    }
}

/// Observer-relative direction: angle above the horizon and compass bearing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizontalPoint {
    /// Altitude above the horizon in degrees, [-90, 90]
    pub altitude: f64,
    /// Azimuth in degrees from North through East, [0, 360)
    pub azimuth: f64,
}

impl HorizontalPoint {
    pub fn new(altitude: f64, azimuth: f64) -> Self {
        Self { altitude, azimuth }
    }

    /// Strictly above the horizon. A point exactly on the horizon is not visible.
    pub fn is_above_horizon(&self) -> bool {
        self.altitude > 0.0
    }
}

/// The four compass points labelled on a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardinalDirection {
    North,
    East,
    South,
    West,
}

impl CardinalDirection {
    pub fn label(&self) -> &'static str {
        match self {
            CardinalDirection::North => "North",
            CardinalDirection::East => "East",
            CardinalDirection::South => "South",
            CardinalDirection::West => "West",
        }
    }

    pub fn azimuth(&self) -> f64 {
        match self {
            CardinalDirection::North => 0.0,
            CardinalDirection::East => 90.0,
            CardinalDirection::South => 180.0,
            CardinalDirection::West => 270.0,
        }
    }
}

impl std::fmt::Display for CardinalDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Azimuths of the cardinal directions.
///
/// Independent of location and time: on a point chart of the whole sky the
/// geodesic deviation of true bearings is negligible, so no correction is made.
pub fn cardinal_azimuths() -> [(CardinalDirection, f64); 4] {
    [
        CardinalDirection::North,
        CardinalDirection::East,
        CardinalDirection::South,
        CardinalDirection::West,
    ]
    .map(|d| (d, d.azimuth()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(360.0, 0.0)]
    #[case(-90.0, 270.0)]
    #[case(725.0, 5.0)]
    #[case(-1e-15, 0.0)]
    fn test_normalize_degrees(#[case] input: f64, #[case] expected: f64) {
        let out = normalize_degrees(input);
        assert!((0.0..360.0).contains(&out));
        assert!((out - expected).abs() < 1e-9, "{input} -> {out}");
    }

    #[rstest]
    #[case(90.5, 0.0, 0.0)]
    #[case(-91.0, 0.0, 0.0)]
    #[case(0.0, 180.5, 0.0)]
    #[case(0.0, 0.0, -1.0)]
    #[case(f64::NAN, 0.0, 0.0)]
    fn test_observer_location_rejects(#[case] lat: f64, #[case] lon: f64, #[case] elev: f64) {
        assert!(ObserverLocation::new(lat, lon, elev).is_err());
    }

    #[test]
    fn test_observer_location_accepts_poles_and_antimeridian() {
        assert!(ObserverLocation::new(90.0, 180.0, 0.0).is_ok());
        assert!(ObserverLocation::new(-90.0, -180.0, 8848.0).is_ok());
    }

    #[test]
    fn test_celestial_point_wraps_ra() {
        let p = CelestialPoint::new(370.0, 10.0).unwrap();
        assert!((p.ra - 10.0).abs() < 1e-12);

        let p = CelestialPoint::new(-15.0, -10.0).unwrap();
        assert!((p.ra - 345.0).abs() < 1e-12);
    }

    #[test]
    fn test_celestial_point_rejects_bad_dec() {
        assert!(CelestialPoint::new(10.0, 90.0001).is_err());
        assert!(CelestialPoint::new(f64::INFINITY, 0.0).is_err());
    }

    #[test]
    fn test_horizon_is_not_visible() {
        assert!(!HorizontalPoint::new(0.0, 45.0).is_above_horizon());
        assert!(HorizontalPoint::new(0.001, 45.0).is_above_horizon());
    }

    #[test]
    fn test_cardinal_azimuths_table() {
        let table = cardinal_azimuths();
        assert_eq!(table[0], (CardinalDirection::North, 0.0));
        assert_eq!(table[1], (CardinalDirection::East, 90.0));
        assert_eq!(table[2], (CardinalDirection::South, 180.0));
        assert_eq!(table[3], (CardinalDirection::West, 270.0));
        assert_eq!(CardinalDirection::West.to_string(), "West");
    }
}
