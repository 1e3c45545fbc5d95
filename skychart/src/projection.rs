//! Zenith-centered stereographic projection of the local sky.
//!
//! A point at zenith distance `z` lands at radius `tan(z / 2)`: the zenith
//! at the origin, the horizon on the unit circle, and anything below the
//! horizon outside it. North is up (+y) and East is to the right (+x),
//! i.e. the chart is the sky seen from outside, not from below.

use ephemeris::HorizontalPoint;
use viz::Point;

/// Radius used for the nadir, where the projection diverges.
pub const OFF_CHART_RADIUS: f64 = 1e6;

/// Radial distance from the chart center for a given altitude.
///
/// Altitude −90° (the nadir) maps to [`OFF_CHART_RADIUS`] instead of
/// infinity; anything that would exceed it is clamped to it.
pub fn ring_radius(altitude: f64) -> f64 {
    if altitude <= -90.0 {
        return OFF_CHART_RADIUS;
    }
    let zenith_distance = (90.0 - altitude).to_radians();
    (zenith_distance / 2.0).tan().min(OFF_CHART_RADIUS)
}

/// Project horizontal coordinates onto the chart plane.
pub fn project(point: &HorizontalPoint) -> Point {
    let r = ring_radius(point.altitude);
    let (sin_az, cos_az) = point.azimuth.to_radians().sin_cos();
    Point::new(r * sin_az, r * cos_az)
}

/// Visual size of a star from its magnitude.
///
/// Magnitude is clamped to `[0, magnitude_ceiling]` and mapped linearly so
/// that magnitude 0 gets `max_size` and the ceiling gets `min_size`. A
/// non-positive ceiling gives every star `max_size`.
///
/// # Arguments
/// * `magnitude` - Visual magnitude (smaller is brighter)
/// * `min_size` - Size of the faintest drawn stars
/// * `max_size` - Size of the brightest stars
/// * `magnitude_ceiling` - Magnitude mapped to `min_size`
pub fn magnitude_to_size(
    magnitude: f64,
    min_size: f64,
    max_size: f64,
    magnitude_ceiling: f64,
) -> f64 {
    if !(magnitude_ceiling > 0.0) {
        return max_size;
    }
    let clamped = magnitude.max(0.0).min(magnitude_ceiling);
    max_size - (clamped / magnitude_ceiling) * (max_size - min_size)
}

/// `num_points` points of a constant-altitude circle, azimuth ascending
/// uniformly from 0°.
///
/// For callers that draw rings as polylines. [`crate::ChartComposer`] emits
/// exact circles of radius [`ring_radius`] instead.
pub fn altitude_ring(altitude: f64, num_points: usize) -> Vec<Point> {
    (0..num_points)
        .map(|i| {
            let azimuth = 360.0 * i as f64 / num_points as f64;
            project(&HorizontalPoint::new(altitude, azimuth))
        })
        .collect()
}

/// The horizon sampled at `num_points` azimuths; lies on the unit circle.
///
/// Public helper for callers that clip or outline with a polygon. The
/// composer's horizon circle has the same radius.
pub fn horizon_boundary(num_points: usize) -> Vec<Point> {
    altitude_ring(0.0, num_points)
}
