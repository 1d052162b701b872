// Distance calculation utilities

use crate::models::{Coordinate, Kilometers};

/// Mean Earth radius used by the haversine formula
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate the great-circle distance between two coordinates with the haversine formula
pub fn haversine_distance(p1: &Coordinate, p2: &Coordinate) -> Kilometers {
    // Absolute differences keep the result bit-for-bit symmetric
    let d_lat = (p2.lat - p1.lat).abs().to_radians();
    let d_lng = (p2.lng - p1.lng).abs().to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + p1.lat.to_radians().cos() * p2.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    // Rounding can push `a` just above 1.0 for antipodal points; NaN must pass through
    let c = 2.0 * a.sqrt().clamp(0.0, 1.0).asin();

    EARTH_RADIUS_KM * c
}
