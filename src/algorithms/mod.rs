//! Core positioning algorithms

pub mod ecef;
pub mod trilateration;

pub use ecef::{chord_distance_km, haversine_distance_km, EarthModel, SphericalEarth};
pub use trilateration::{LocalFrame, Trilaterator};
