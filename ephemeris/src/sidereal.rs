//! Julian dates and sidereal time.
//!
//! Sidereal time is what converts a fixed right ascension into an hour angle
//! for a particular observer. We use the IAU 1982 expression for Greenwich
//! mean sidereal time (Meeus, *Astronomical Algorithms*, eq. 12.4). The
//! equation of the equinoxes (the nutation term that would make it
//! "apparent") is deliberately left out: it is below 1.2 s of time and this
//! crate does not model nutation.

use chrono::{DateTime, Utc};

use crate::celestial::{normalize_degrees, ObserverLocation};
use crate::error::TransformError;

/// Julian date of the J2000.0 epoch (2000-01-01T12:00:00)
const J2000_JD: f64 = 2_451_545.0;

/// Unix timestamp of the J2000.0 epoch
const J2000_UNIX_SECONDS: i64 = 946_728_000;

const SECONDS_PER_DAY: f64 = 86_400.0;
const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Julian date for a UTC instant, including the sub-second part.
pub fn julian_date(time: DateTime<Utc>) -> f64 {
    J2000_JD + days_since_j2000(time)
}

/// Days elapsed since J2000.0.
///
/// Computed from the Unix timestamp offset rather than by subtracting two
/// large Julian dates so that the fractional day keeps full precision.
fn days_since_j2000(time: DateTime<Utc>) -> f64 {
    let whole = (time.timestamp() - J2000_UNIX_SECONDS) as f64;
    let frac = f64::from(time.timestamp_subsec_nanos()) * 1e-9;
    (whole + frac) / SECONDS_PER_DAY
}

/// Greenwich mean sidereal time in degrees, normalized to [0, 360).
fn gmst_degrees(time: DateTime<Utc>) -> f64 {
    let d = days_since_j2000(time);
    let t = d / DAYS_PER_CENTURY;
    let theta = 280.460_618_37 + 360.985_647_366_29 * d + 0.000_387_933 * t * t
        - t * t * t / 38_710_000.0;
    normalize_degrees(theta)
}

/// Greenwich mean sidereal time in hours, in [0, 24).
pub fn greenwich_mean_sidereal_time(time: DateTime<Utc>) -> f64 {
    gmst_degrees(time) / 15.0
}

/// Local sidereal time in degrees for an already validated longitude.
pub(crate) fn local_sidereal_degrees(longitude: f64, time: DateTime<Utc>) -> f64 {
    normalize_degrees(gmst_degrees(time) + longitude)
}

/// Local sidereal time at the observer's longitude, in hours in [0, 24).
pub fn local_sidereal_time(
    location: &ObserverLocation,
    time: DateTime<Utc>,
) -> Result<f64, TransformError> {
    location.validate()?;
    Ok(local_sidereal_degrees(location.longitude, time) / 15.0)
}
