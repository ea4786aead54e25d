//! Haversine distance between WGS84 coordinates.

use crate::model::Coordinate;

/// Mean Earth radius used for all distance calculations.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometres between two points given in degrees.
#[must_use]
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Round a distance to one decimal place, the precision shown to users.
#[must_use]
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl Coordinate {
    /// Distance in kilometres from this point to `other`.
    #[must_use]
    pub fn distance_km_to(&self, other: &Coordinate) -> f64 {
        distance_km(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BERLIN: (f64, f64) = (52.5200, 13.4050);
    const PARIS: (f64, f64) = (48.8566, 2.3522);

    #[test]
    fn same_point_is_zero() {
        for (lat, lon) in [BERLIN, PARIS, (0.0, 0.0), (-89.9, 179.9), (39.8, -89.6)] {
            assert!(
                distance_km(lat, lon, lat, lon).abs() < f64::EPSILON,
                "distance from a point to itself must be zero"
            );
        }
    }

    #[test]
    fn distance_is_symmetric() {
        let there = distance_km(BERLIN.0, BERLIN.1, PARIS.0, PARIS.1);
        let back = distance_km(PARIS.0, PARIS.1, BERLIN.0, BERLIN.1);
        assert!((there - back).abs() < 1e-9, "haversine must be symmetric");
    }

    #[test]
    fn berlin_to_paris_is_about_878_km() {
        let distance = distance_km(BERLIN.0, BERLIN.1, PARIS.0, PARIS.1);
        assert!(
            (distance - 877.5).abs() < 2.0,
            "unexpected distance {distance}"
        );
    }

    #[test]
    fn one_degree_on_equator_is_about_111_km() {
        let distance = distance_km(0.0, 0.0, 0.0, 1.0);
        assert!((distance - 111.19).abs() < 0.01, "unexpected distance {distance}");
    }

    #[test]
    fn grows_with_angular_separation_along_meridian() {
        let mut previous = 0.0;
        for step in 1..=18 {
            let lat = f64::from(step) * 10.0 - 90.0;
            let distance = distance_km(-90.0, 0.0, lat, 0.0);
            assert!(distance > previous, "distance must increase at step {step}");
            previous = distance;
        }
    }

    #[test]
    fn antipodes_are_half_the_circumference() {
        let distance = distance_km(0.0, 0.0, 0.0, 180.0);
        let half = std::f64::consts::PI * EARTH_RADIUS_KM;
        assert!((distance - half).abs() < 1e-6, "unexpected distance {distance}");
    }

    #[test]
    fn rounds_to_one_decimal() {
        assert!((round_to_tenth(12.345) - 12.3).abs() < 1e-12, "12.345 rounds down");
        assert!((round_to_tenth(0.05) - 0.1).abs() < 1e-12, "0.05 rounds up");
        assert!(round_to_tenth(0.0).abs() < f64::EPSILON, "zero stays zero");
    }

    #[test]
    fn coordinate_helper_matches_free_function() {
        let berlin = Coordinate::new(BERLIN.0, BERLIN.1);
        let paris = Coordinate::new(PARIS.0, PARIS.1);
        let direct = distance_km(BERLIN.0, BERLIN.1, PARIS.0, PARIS.1);
        assert!(
            (berlin.distance_km_to(&paris) - direct).abs() < f64::EPSILON,
            "helper must delegate to distance_km"
        );
    }
}
