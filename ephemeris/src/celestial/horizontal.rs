//! Equatorial ↔ horizontal transforms.
//!
//! Both directions are the same rotation about the observer's east-west axis
//! by the colatitude. Written in vector form the forward transform is
//!
//! ```text
//! up    = sin(dec)·sin(lat) + cos(dec)·cos(lat)·cos(H)
//! north = cos(lat)·sin(dec) − sin(lat)·cos(dec)·cos(H)
//! east  = −sin(H)·cos(dec)
//!
//! altitude = atan2(up, hypot(north, east))      (≡ asin(up))
//! azimuth  = atan2(east, north)                 (0° = North, 90° = East)
//! ```
//!
//! where `H = LST − ra` is the hour angle. Evaluating the altitude through
//! `atan2` keeps it accurate near the zenith, where `asin` loses half of its
//! significant digits.

use chrono::{DateTime, Utc};
use log::trace;

use super::{normalize_degrees, CelestialPoint, HorizontalPoint, ObserverLocation};
use crate::error::{check_range, TransformError};
use crate::sidereal::local_sidereal_degrees;

/// Coordinate transformer bound to one observer and one instant.
///
/// Sidereal time and the latitude terms are computed once at construction,
/// so transforming a whole catalog only pays for the per-star trigonometry.
#[derive(Debug, Clone, Copy)]
pub struct Transformer {
    location: ObserverLocation,
    time: DateTime<Utc>,
    lst_deg: f64,
    sin_lat: f64,
    cos_lat: f64,
}

impl Transformer {
    /// Create a transformer, validating the location.
    pub fn new(location: ObserverLocation, time: DateTime<Utc>) -> Result<Self, TransformError> {
        location.validate()?;
        let lst_deg = local_sidereal_degrees(location.longitude, time);
        let (sin_lat, cos_lat) = location.latitude.to_radians().sin_cos();
        trace!(
            "transformer at lat {:.4} lon {:.4}, LST {:.6}°",
            location.latitude,
            location.longitude,
            lst_deg
        );
        Ok(Self {
            location,
            time,
            lst_deg,
            sin_lat,
            cos_lat,
        })
    }

    pub fn location(&self) -> &ObserverLocation {
        &self.location
    }

    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    /// Local sidereal time in hours, [0, 24)
    pub fn local_sidereal_time(&self) -> f64 {
        self.lst_deg / 15.0
    }

    /// Transform a catalog position into altitude/azimuth for this observer.
    pub fn to_horizontal(&self, point: &CelestialPoint) -> Result<HorizontalPoint, TransformError> {
        point.validate()?;

        let hour_angle = (self.lst_deg - point.ra).to_radians();
        let (sin_h, cos_h) = hour_angle.sin_cos();
        let (sin_dec, cos_dec) = point.dec.to_radians().sin_cos();

        let up = sin_dec * self.sin_lat + cos_dec * self.cos_lat * cos_h;
        let north = self.cos_lat * sin_dec - self.sin_lat * cos_dec * cos_h;
        let east = -sin_h * cos_dec;

        Ok(HorizontalPoint {
            altitude: up.atan2(north.hypot(east)).to_degrees(),
            azimuth: normalize_degrees(east.atan2(north).to_degrees()),
        })
    }

    /// Inverse transform: altitude/azimuth back to right ascension/declination.
    pub fn to_celestial(&self, point: &HorizontalPoint) -> Result<CelestialPoint, TransformError> {
        check_range("altitude", point.altitude, -90.0, 90.0)?;
        check_range("azimuth", point.azimuth, f64::MIN, f64::MAX)?;

        let (sin_alt, cos_alt) = point.altitude.to_radians().sin_cos();
        let (sin_az, cos_az) = point.azimuth.to_radians().sin_cos();

        let pole = sin_alt * self.sin_lat + cos_alt * cos_az * self.cos_lat;
        let meridian = sin_alt * self.cos_lat - cos_alt * cos_az * self.sin_lat;
        let west = -sin_az * cos_alt;

        let dec = pole.atan2(meridian.hypot(west)).to_degrees();
        let hour_angle = west.atan2(meridian).to_degrees();

        Ok(CelestialPoint {
            ra: normalize_degrees(self.lst_deg - hour_angle),
            dec,
        })
    }

    /// Celestial coordinate currently overhead.
    ///
    /// Azimuth is undefined at the zenith; 0 is used by convention.
    pub fn zenith(&self) -> CelestialPoint {
        let (sin_lat, cos_lat) = (self.sin_lat, self.cos_lat);
        // to_celestial at altitude 90, azimuth 0, with the trig folded out
        CelestialPoint {
            ra: self.lst_deg,
            dec: sin_lat.atan2(cos_lat).to_degrees(),
        }
    }
}

/// Convert a celestial point to horizontal coordinates for an observer at an instant.
pub fn to_horizontal(
    point: &CelestialPoint,
    location: &ObserverLocation,
    time: DateTime<Utc>,
) -> Result<HorizontalPoint, TransformError> {
    Transformer::new(*location, time)?.to_horizontal(point)
}

/// Convert horizontal coordinates back to a celestial point.
pub fn to_celestial(
    point: &HorizontalPoint,
    location: &ObserverLocation,
    time: DateTime<Utc>,
) -> Result<CelestialPoint, TransformError> {
    Transformer::new(*location, time)?.to_celestial(point)
}

/// Right ascension and declination of the zenith for an observer at an instant.
pub fn zenith_celestial_point(
    location: &ObserverLocation,
    time: DateTime<Utc>,
) -> Result<CelestialPoint, TransformError> {
    Ok(Transformer::new(*location, time)?.zenith())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sidereal::local_sidereal_time;
    use approx::assert_abs_diff_eq;
    use chrono::TimeZone;
    use rstest::rstest;

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 15, 22, 0, 0).unwrap()
    }

    /// Angular difference between two azimuths, accounting for wrap-around
    fn azimuth_diff(a: f64, b: f64) -> f64 {
        let d = (a - b).rem_euclid(360.0);
        d.min(360.0 - d)
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(40.7128, -74.0060)]
    #[case(-33.8688, 151.2093)]
    #[case(64.1466, -21.9426)]
    #[case(89.999, 10.0)]
    #[case(90.0, 0.0)]
    #[case(-90.0, 180.0)]
    fn test_zenith_round_trip(#[case] lat: f64, #[case] lon: f64) {
        let location = ObserverLocation::new(lat, lon, 0.0).unwrap();
        for minutes in [0, 97, 611, 1439] {
            let time = instant() + chrono::Duration::minutes(minutes);
            let zenith = zenith_celestial_point(&location, time).unwrap();
            let seen = to_horizontal(&zenith, &location, time).unwrap();
            assert_abs_diff_eq!(seen.altitude, 90.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_zenith_matches_general_inverse() {
        let location = ObserverLocation::new(35.6762, 139.6503, 40.0).unwrap();
        let t = Transformer::new(location, instant()).unwrap();
        let general = t.to_celestial(&HorizontalPoint::new(90.0, 0.0)).unwrap();
        let zenith = t.zenith();
        assert_abs_diff_eq!(general.dec, zenith.dec, epsilon = 1e-9);
        assert_abs_diff_eq!(general.ra, zenith.ra, epsilon = 1e-9);
        assert_abs_diff_eq!(zenith.dec, 35.6762, epsilon = 1e-9);
    }

    #[test]
    fn test_star_on_local_meridian_at_equator_is_overhead() {
        let location = ObserverLocation::new(0.0, 0.0, 0.0).unwrap();
        let time = instant();
        let lst_deg = local_sidereal_time(&location, time).unwrap() * 15.0;
        let star = CelestialPoint::new(lst_deg, 0.0).unwrap();

        let seen = to_horizontal(&star, &location, time).unwrap();
        assert_abs_diff_eq!(seen.altitude, 90.0, epsilon = 1e-6);
    }

    #[rstest]
    #[case(40.0, 10.0)]
    #[case(40.0, 70.0)]
    #[case(-30.0, -60.0)]
    #[case(-30.0, 20.0)]
    fn test_meridian_transit_altitude(#[case] lat: f64, #[case] dec: f64) {
        let location = ObserverLocation::new(lat, 0.0, 0.0).unwrap();
        let time = instant();
        let lst_deg = local_sidereal_time(&location, time).unwrap() * 15.0;
        let star = CelestialPoint::new(lst_deg, dec).unwrap();

        let seen = to_horizontal(&star, &location, time).unwrap();
        assert_abs_diff_eq!(seen.altitude, 90.0 - (lat - dec).abs(), epsilon = 1e-9);

        // South of the zenith transits due South, north of it due North
        let expected_az = if dec < lat { 180.0 } else { 0.0 };
        assert!(azimuth_diff(seen.azimuth, expected_az) < 1e-9);
    }

    #[test]
    fn test_equatorial_star_rises_due_east() {
        let location = ObserverLocation::new(0.0, 0.0, 0.0).unwrap();
        let time = instant();
        let lst_deg = local_sidereal_time(&location, time).unwrap() * 15.0;
        // Hour angle of -90 degrees: six sidereal hours before transit
        let star = CelestialPoint::new(lst_deg + 90.0, 0.0).unwrap();

        let seen = to_horizontal(&star, &location, time).unwrap();
        assert_abs_diff_eq!(seen.altitude, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(seen.azimuth, 90.0, epsilon = 1e-9);
    }

    #[test]
    fn test_celestial_pole_sits_at_latitude() {
        let location = ObserverLocation::new(45.0, 7.0, 0.0).unwrap();
        let pole = CelestialPoint::new(0.0, 90.0).unwrap();
        for hours in 0..24 {
            let time = instant() + chrono::Duration::hours(hours);
            let seen = to_horizontal(&pole, &location, time).unwrap();
            assert_abs_diff_eq!(seen.altitude, 45.0, epsilon = 1e-9);
            assert!(azimuth_diff(seen.azimuth, 0.0) < 1e-6);
        }
    }

    #[test]
    fn test_meeus_example_13b_venus() {
        // Venus from the US Naval Observatory, 1987 April 10 19:21:00 UT.
        // Meeus gives A = 68.0337 (from South) and h = 15.1249 using apparent
        // sidereal time; the mean time used here differs by ~0.24 s.
        let location = ObserverLocation::new(
            38.0 + 55.0 / 60.0 + 17.0 / 3600.0,
            -(77.0 + 3.0 / 60.0 + 56.0 / 3600.0),
            0.0,
        )
        .unwrap();
        let time = Utc.with_ymd_and_hms(1987, 4, 10, 19, 21, 0).unwrap();
        let venus = CelestialPoint::new(
            (23.0 + 9.0 / 60.0 + 16.641 / 3600.0) * 15.0,
            -(6.0 + 43.0 / 60.0 + 11.61 / 3600.0),
        )
        .unwrap();

        let seen = to_horizontal(&venus, &location, time).unwrap();
        assert_abs_diff_eq!(seen.altitude, 15.1249, epsilon = 0.01);
        assert_abs_diff_eq!(seen.azimuth, 68.0337 + 180.0, epsilon = 0.01);
    }

    #[test]
    fn test_round_trip_through_inverse() {
        let location = ObserverLocation::new(51.5074, -0.1278, 11.0).unwrap();
        let t = Transformer::new(location, instant()).unwrap();
        for (ra, dec) in [(10.0, 20.0), (88.793, 7.407), (279.2347, 38.7837), (200.0, -60.0)] {
            let star = CelestialPoint::new(ra, dec).unwrap();
            let back = t.to_celestial(&t.to_horizontal(&star).unwrap()).unwrap();
            assert_abs_diff_eq!(back.dec, dec, epsilon = 1e-9);
            assert!(azimuth_diff(back.ra, ra) < 1e-9);
        }
    }

    #[test]
    fn test_output_ranges() {
        let location = ObserverLocation::new(-12.0, 77.0, 0.0).unwrap();
        let t = Transformer::new(location, instant()).unwrap();
        for i in 0..72 {
            let star = CelestialPoint::new(i as f64 * 5.0, (i as f64 * 2.5) - 90.0).unwrap();
            let seen = t.to_horizontal(&star).unwrap();
            assert!((-90.0..=90.0).contains(&seen.altitude));
            assert!((0.0..360.0).contains(&seen.azimuth));
        }
    }

    #[test]
    fn test_malformed_inputs_fail_fast() {
        let time = instant();
        let good_location = ObserverLocation::new(10.0, 10.0, 0.0).unwrap();
        let bad_location = ObserverLocation {
            latitude: 91.0,
            longitude: 0.0,
            elevation: 0.0,
        };
        let good_star = CelestialPoint::new(10.0, 10.0).unwrap();
        let bad_star = CelestialPoint {
            ra: 10.0,
            dec: -95.0,
        };

        assert!(matches!(
            to_horizontal(&good_star, &bad_location, time),
            Err(TransformError::InvalidInput { field: "latitude", .. })
        ));
        assert!(matches!(
            to_horizontal(&bad_star, &good_location, time),
            Err(TransformError::InvalidInput { field: "declination", .. })
        ));
        assert!(to_celestial(&HorizontalPoint::new(120.0, 0.0), &good_location, time).is_err());
    }
}
