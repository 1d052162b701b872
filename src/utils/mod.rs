// Utility modules shared by the algorithms and services

pub mod distance;
pub mod geocoder;
