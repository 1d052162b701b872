// Geocoding capability used to resolve order addresses into coordinates

use crate::error::GeocodeError;
use crate::models::Coordinate;
use geo::{Coord, Rect};
use rustc_hash::FxHasher;
use std::collections::HashMap;
use std::fs;
use std::hash::Hasher;
use std::path::Path;

/// Resolves a free-form address into a coordinate.
///
/// Implementations must be deterministic: the same address string always
/// yields the same coordinate. Batching and routing only ever talk to this
/// trait, so a real geocoding backend can be plugged in without touching them.
pub trait Geocoder: Send + Sync {
    fn geocode(&self, address: &str) -> Result<Coordinate, GeocodeError>;
}

impl<G: Geocoder + ?Sized> Geocoder for Box<G> {
    fn geocode(&self, address: &str) -> Result<Coordinate, GeocodeError> {
        (**self).geocode(address)
    }
}

impl<G: Geocoder + ?Sized> Geocoder for &G {
    fn geocode(&self, address: &str) -> Result<Coordinate, GeocodeError> {
        (**self).geocode(address)
    }
}

/// Stand-in geocoder that hashes the address into a fixed service area.
///
/// Coordinates are stable across runs but bear no relation to the real
/// location of the address. Use it for demos and tests only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HashGeocoder {
    area: Rect<f64>,
}

impl HashGeocoder {
    /// Creates a geocoder mapping addresses into `area` (x = lng, y = lat)
    pub fn new(area: Rect<f64>) -> Self {
        Self { area }
    }

    /// Creates a geocoder covering a square of `span_degrees` centred on `center`
    pub fn around(center: Coordinate, span_degrees: f64) -> Self {
        let half = span_degrees.abs() / 2.0;
        Self::new(Rect::new(
            Coord {
                x: center.lng - half,
                y: center.lat - half,
            },
            Coord {
                x: center.lng + half,
                y: center.lat + half,
            },
        ))
    }

    pub fn area(&self) -> Rect<f64> {
        self.area
    }
}

impl Default for HashGeocoder {
    fn default() -> Self {
        // Central Amsterdam, roughly 11 km across
        Self::around(Coordinate::new(52.3676, 4.9041), 0.1)
    }
}

impl Geocoder for HashGeocoder {
    fn geocode(&self, address: &str) -> Result<Coordinate, GeocodeError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(GeocodeError::EmptyAddress);
        }

        let mut hasher = FxHasher::default();
        hasher.write(address.as_bytes());
        let hash = hasher.finish();

        let lat_fraction = (hash & 0xFFFF_FFFF) as f64 / u32::MAX as f64;
        let lng_fraction = (hash >> 32) as f64 / u32::MAX as f64;

        let min = self.area.min();
        Ok(Coordinate::new(
            min.y + lat_fraction * self.area.height(),
            min.x + lng_fraction * self.area.width(),
        ))
    }
}

/// Geocoder backed by an explicit address table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticGeocoder {
    addresses: HashMap<String, Coordinate>,
}

impl StaticGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a JSON object mapping addresses to `{ "lat": .., "lng": .. }`
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, GeocodeError> {
        let json_str = fs::read_to_string(path)?;
        let table: HashMap<String, Coordinate> = serde_json::from_str(&json_str)?;

        Ok(table.into_iter().collect())
    }

    /// Registers or replaces the coordinate of an address
    pub fn insert<S: Into<String>>(&mut self, address: S, coordinate: Coordinate) {
        let address = address.into();
        self.addresses.insert(address.trim().to_string(), coordinate);
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Coordinate)> for StaticGeocoder {
    fn from_iter<I: IntoIterator<Item = (S, Coordinate)>>(iter: I) -> Self {
        let mut geocoder = StaticGeocoder::new();
        for (address, coordinate) in iter {
            geocoder.insert(address, coordinate);
        }
        geocoder
    }
}

impl Geocoder for StaticGeocoder {
    fn geocode(&self, address: &str) -> Result<Coordinate, GeocodeError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(GeocodeError::EmptyAddress);
        }

        self.addresses
            .get(address)
            .copied()
            .ok_or_else(|| GeocodeError::UnknownAddress(address.to_string()))
    }
}
