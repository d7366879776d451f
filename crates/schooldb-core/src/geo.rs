//! Great-circle distance on a spherical Earth.
//!
//! Distances use the haversine formula with a mean radius of 6371 km. The
//! sphere is an approximation: results differ from an ellipsoidal model
//! (WGS-84) by up to roughly 0.5%, which is acceptable for ranking by
//! proximity.

use serde::Serialize;
use thiserror::Error;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InvalidCoordinateError {
    #[error("latitude must be between -90 and 90, got {0}")]
    Latitude(f64),

    #[error("longitude must be between -180 and 180, got {0}")]
    Longitude(f64),
}

/// A validated latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting NaN, infinities and out-of-range degrees.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCoordinateError`] naming the first offending axis.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinateError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(InvalidCoordinateError::Latitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidCoordinateError::Longitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Great-circle distance between two coordinates, in kilometres.
///
/// The intermediate `a` term is clamped to `[0, 1]` before taking square
/// roots; rounding can push it fractionally past 1 for near-antipodal points.
#[must_use]
pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
    let phi1 = from.latitude.to_radians();
    let phi2 = to.latitude.to_radians();
    let d_phi = (to.latitude - from.latitude).to_radians();
    let d_lambda = (to.longitude - from.longitude).to_radians();

    let a = ((d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).expect("valid coordinate")
    }

    #[test]
    fn coincident_points_are_zero_apart() {
        for (lat, lon) in [(0.0, 0.0), (51.5074, -0.1278), (-33.8688, 151.2093), (90.0, 0.0)] {
            let p = coord(lat, lon);
            assert!(haversine_km(p, p).abs() < TOLERANCE, "({lat}, {lon})");
        }
    }

    #[test]
    fn one_degree_of_longitude_on_the_equator() {
        let d = haversine_km(coord(0.0, 0.0), coord(0.0, 1.0));
        assert!((d - EARTH_RADIUS_KM * PI / 180.0).abs() < 1e-6, "got {d}");
        assert!((d - 111.19).abs() < 0.01, "got {d}");
    }

    #[test]
    fn antipodal_points_are_half_the_circumference() {
        let d = haversine_km(coord(0.0, 0.0), coord(0.0, 180.0));
        assert!((d - EARTH_RADIUS_KM * PI).abs() < 1e-6, "got {d}");
        assert!((d - 20_015.1).abs() < 0.1, "got {d}");
    }

    #[test]
    fn pole_to_pole_is_finite() {
        let d = haversine_km(coord(90.0, 0.0), coord(-90.0, 0.0));
        assert!(d.is_finite());
        assert!((d - EARTH_RADIUS_KM * PI).abs() < 1e-6, "got {d}");
    }

    #[test]
    fn near_antipodal_points_do_not_produce_nan() {
        let d = haversine_km(coord(45.0, 45.0), coord(-45.0, -135.0));
        assert!(d.is_finite());
        assert!(d <= EARTH_RADIUS_KM * PI + TOLERANCE);
    }

    #[test]
    fn distance_is_symmetric() {
        let pairs = [
            (coord(40.7128, -74.0060), coord(34.0522, -118.2437)),
            (coord(-33.8688, 151.2093), coord(35.6762, 139.6503)),
            (coord(0.0, 179.5), coord(0.0, -179.5)),
        ];
        for (a, b) in pairs {
            assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < TOLERANCE);
        }
    }

    #[test]
    fn crossing_the_antimeridian_takes_the_short_way() {
        let d = haversine_km(coord(0.0, 179.5), coord(0.0, -179.5));
        assert!((d - EARTH_RADIUS_KM * PI / 180.0).abs() < 1e-6, "got {d}");
    }

    #[test]
    fn new_accepts_inclusive_bounds() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn new_rejects_out_of_range_latitude() {
        assert_eq!(
            Coordinate::new(91.0, 0.0),
            Err(InvalidCoordinateError::Latitude(91.0))
        );
    }

    #[test]
    fn new_rejects_out_of_range_longitude() {
        assert_eq!(
            Coordinate::new(0.0, -180.5),
            Err(InvalidCoordinateError::Longitude(-180.5))
        );
    }

    #[test]
    fn new_rejects_non_finite_values() {
        assert!(matches!(
            Coordinate::new(f64::NAN, 0.0),
            Err(InvalidCoordinateError::Latitude(_))
        ));
        assert!(matches!(
            Coordinate::new(0.0, f64::INFINITY),
            Err(InvalidCoordinateError::Longitude(_))
        ));
    }

    #[test]
    fn error_message_names_the_axis() {
        let err = Coordinate::new(0.0, 200.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "longitude must be between -180 and 180, got 200"
        );
    }
}
