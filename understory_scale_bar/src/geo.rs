// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geographic positions and great‑circle distance.

use crate::DistanceUnit;

/// Earth radius used for distance calculations, in meters.
///
/// This is the WGS84 equatorial radius, matching what Web‑Mercator web maps
/// use for their spherical model.
pub const EARTH_RADIUS_METERS: f64 = 6_378_137.0;

/// A longitude/latitude pair in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Position {
    /// Longitude in degrees, positive east.
    pub lon: f64,
    /// Latitude in degrees, positive north.
    pub lat: f64,
}

impl Position {
    /// Creates a position from longitude and latitude in degrees.
    #[must_use]
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Great‑circle distance to `other`, in `unit`.
    #[must_use]
    pub fn distance_to(self, other: Self, unit: DistanceUnit) -> f64 {
        haversine_distance(self, other, unit)
    }
}

/// Great‑circle distance between two positions on a spherical earth.
#[must_use]
pub fn haversine_distance(a: Position, b: Position, unit: DistanceUnit) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let s_lat = libm::sin(d_lat * 0.5);
    let s_lon = libm::sin(d_lon * 0.5);
    let h = s_lat * s_lat + libm::cos(lat1) * libm::cos(lat2) * s_lon * s_lon;
    let c = 2.0 * libm::atan2(libm::sqrt(h), libm::sqrt((1.0 - h).max(0.0)));

    unit.from_meters(EARTH_RADIUS_METERS * c)
}

#[cfg(test)]
mod tests {
    use super::{EARTH_RADIUS_METERS, Position, haversine_distance};
    use crate::DistanceUnit;

    #[test]
    fn same_point_is_zero() {
        let p = Position::new(-122.33, 47.6);
        assert_eq!(haversine_distance(p, p, DistanceUnit::Meters), 0.0);
    }

    #[test]
    fn one_degree_of_longitude_at_equator() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(1.0, 0.0);
        let expected = EARTH_RADIUS_METERS * core::f64::consts::PI / 180.0;
        let d = a.distance_to(b, DistanceUnit::Meters);
        assert!((d - expected).abs() < 1e-6);
        let km = a.distance_to(b, DistanceUnit::Kilometers);
        assert!((km - expected / 1_000.0).abs() < 1e-9);
    }

    #[test]
    fn symmetric_and_shrinks_with_latitude() {
        let a = Position::new(10.0, 60.0);
        let b = Position::new(11.0, 60.0);
        let ab = haversine_distance(a, b, DistanceUnit::Miles);
        let ba = haversine_distance(b, a, DistanceUnit::Miles);
        assert!((ab - ba).abs() < 1e-9);

        let equator = haversine_distance(
            Position::new(10.0, 0.0),
            Position::new(11.0, 0.0),
            DistanceUnit::Miles,
        );
        // cos(60°) = 0.5, so roughly half the equatorial distance.
        assert!((ab / equator - 0.5).abs() < 1e-3);
    }

    #[test]
    fn antipodes_are_half_circumference() {
        let d = haversine_distance(
            Position::new(0.0, 0.0),
            Position::new(180.0, 0.0),
            DistanceUnit::Meters,
        );
        assert!((d - EARTH_RADIUS_METERS * core::f64::consts::PI).abs() < 1e-3);
    }
}
