//! Coordinates and great-circle distance.

use serde::{Deserialize, Serialize};

pub const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// Builds a coordinate, rejecting values outside the valid
    /// latitude/longitude ranges.
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng) {
            Some(Self { lat, lng })
        } else {
            None
        }
    }

    pub fn offset_deg(self, dlat: f64, dlng: f64) -> Self {
        Self {
            lat: (self.lat + dlat).clamp(-90.0, 90.0),
            lng: (self.lng + dlng).clamp(-180.0, 180.0),
        }
    }
}

/// Haversine great-circle distance in kilometres.
///
/// Symmetric in its arguments and exactly zero when both coordinates are
/// equal.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    if a == b {
        return 0.0;
    }
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_to_self_is_zero() {
        let a = Coordinate { lat: 55.7558, lng: 37.6173 };
        assert_eq!(distance_km(a, a), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Coordinate { lat: 55.7558, lng: 37.6173 };
        let b = Coordinate { lat: 59.9343, lng: 30.3351 };
        assert_eq!(distance_km(a, b), distance_km(b, a));
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let a = Coordinate { lat: 10.0, lng: 20.0 };
        let b = Coordinate { lat: 11.0, lng: 20.0 };
        let d = distance_km(a, b);
        assert!((d - 111.19).abs() < 0.01, "got {d}");
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        assert!(Coordinate::new(90.1, 0.0).is_none());
        assert!(Coordinate::new(0.0, -180.5).is_none());
        assert!(Coordinate::new(-90.0, 180.0).is_some());
    }
}
