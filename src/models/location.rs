// Coordinate model representing a point on the Earth's surface

use crate::models::Kilometers;
use crate::utils::distance::haversine_distance;
use serde::{Deserialize, Serialize};

/// Latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// Creates a new coordinate from latitude and longitude
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance to another coordinate in kilometers
    pub fn distance_to(&self, other: &Coordinate) -> Kilometers {
        haversine_distance(self, other)
    }
}

// geo uses (x, y) = (lng, lat)
impl From<Coordinate> for geo::Point<f64> {
    fn from(coordinate: Coordinate) -> Self {
        geo::Point::new(coordinate.lng, coordinate.lat)
    }
}

impl From<geo::Point<f64>> for Coordinate {
    fn from(point: geo::Point<f64>) -> Self {
        Self::new(point.y(), point.x())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_to_self_is_zero() {
        let loc = Coordinate::new(52.3676, 4.9041);

        assert_eq!(loc.distance_to(&loc), 0.0);
    }

    #[test]
    fn test_geo_point_conversion() {
        let loc = Coordinate::new(52.3676, 4.9041);
        let point: geo::Point<f64> = loc.into();

        assert_eq!(point.x(), 4.9041);
        assert_eq!(point.y(), 52.3676);
        assert_eq!(Coordinate::from(point), loc);
    }
}
