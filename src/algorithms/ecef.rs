//! Geodetic <-> Earth-Centered Earth-Fixed conversions
//!
//! The trilateration solve only sees ECEF vectors produced through
//! [`EarthModel`], so the spherical approximation used here can be replaced
//! by an ellipsoid without touching the solver.

use nalgebra::Vector3;

use crate::core::{GeoPoint, EARTH_RADIUS_KM};

/// Conversion between geodetic degrees and ECEF kilometers
pub trait EarthModel {
    /// Radius used to project ECEF points back onto the surface (km)
    fn radius_km(&self) -> f64;

    /// Geodetic position (zero elevation) to ECEF coordinates in km
    fn to_ecef(&self, point: &GeoPoint) -> Vector3<f64>;

    /// ECEF coordinates in km back to a geodetic position.
    /// Points off the surface are projected radially; an argument outside
    /// the `asin` domain produces a NaN latitude.
    fn to_geodetic(&self, ecef: &Vector3<f64>) -> GeoPoint;
}

/// Authalic sphere Earth model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalEarth {
    pub radius_km: f64,
}

impl Default for SphericalEarth {
    fn default() -> Self {
        Self { radius_km: EARTH_RADIUS_KM }
    }
}

impl SphericalEarth {
    pub fn new(radius_km: f64) -> Self {
        Self { radius_km }
    }
}

impl EarthModel for SphericalEarth {
    fn radius_km(&self) -> f64 {
        self.radius_km
    }

    fn to_ecef(&self, point: &GeoPoint) -> Vector3<f64> {
        let lat = point.lat.to_radians();
        let lon = point.lon.to_radians();

        Vector3::new(
            self.radius_km * lat.cos() * lon.cos(),
            self.radius_km * lat.cos() * lon.sin(),
            self.radius_km * lat.sin(),
        )
    }

    fn to_geodetic(&self, ecef: &Vector3<f64>) -> GeoPoint {
        // f64::asin returns NaN outside [-1, 1]
        let lat = (ecef.z / self.radius_km).asin().to_degrees();
        let lon = ecef.y.atan2(ecef.x).to_degrees();
        GeoPoint::new(lon, lat)
    }
}

/// Straight-line distance through the Earth between two surface points (km).
/// This is the distance the trilateration solve treats as exact.
pub fn chord_distance_km<E: EarthModel>(earth: &E, a: &GeoPoint, b: &GeoPoint) -> f64 {
    (earth.to_ecef(a) - earth.to_ecef(b)).norm()
}

/// Great-circle distance between two points on a sphere of `radius_km`
pub fn haversine_distance_km(radius_km: f64, a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * radius_km * h.sqrt().min(1.0).asin()
}
