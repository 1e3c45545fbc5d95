//! Observer-relative positions of fixed celestial objects.
//!
//! This crate turns catalog coordinates (right ascension / declination) into
//! what an observer standing at a given place and instant actually sees
//! (altitude / azimuth). It is a purely geometric model: no refraction,
//! precession, nutation, aberration or proper motion is applied.
//!
//! # Conventions
//!
//! - All angles at the API boundary are in **degrees**.
//! - Azimuth is measured from North (0°) increasing toward East (90°).
//! - Longitudes are positive east of Greenwich.
//! - Time is always an explicit `chrono::DateTime<Utc>`; nothing in this
//!   crate reads the system clock.
//!
//! # Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use ephemeris::{to_horizontal, CelestialPoint, ObserverLocation};
//!
//! let london = ObserverLocation::new(51.5074, -0.1278, 11.0)?;
//! let vega = CelestialPoint::new(279.2347, 38.7837)?;
//! let time = Utc.with_ymd_and_hms(2024, 7, 15, 22, 0, 0).unwrap();
//!
//! let seen = to_horizontal(&vega, &london, time)?;
//! assert!(seen.altitude > 0.0);
//! # Ok::<(), ephemeris::TransformError>(())
//! ```

pub mod celestial;
pub mod error;
pub mod sidereal;

pub use celestial::horizontal::{
    to_celestial, to_horizontal, zenith_celestial_point, Transformer,
};
pub use celestial::{
    cardinal_azimuths, CardinalDirection, CelestialPoint, HorizontalPoint, ObserverLocation,
};
pub use error::TransformError;
pub use sidereal::{greenwich_mean_sidereal_time, julian_date, local_sidereal_time};
