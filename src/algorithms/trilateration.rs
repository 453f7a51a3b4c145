//! Closed-form three-sphere trilateration in an ECEF frame
//!
//! Reference A becomes the origin of a local orthonormal basis, reference B
//! lies on its x-axis and reference C in its xy-plane. The unknown point is
//! the intersection of the three distance spheres expressed in that basis and
//! mapped back to geodetic coordinates. Only the non-negative height root is
//! reported as the answer; [`Trilaterator::candidates`] exposes both.
//!
//! Degenerate input never aborts: coincident or collinear references,
//! inconsistent distances and out-of-domain inverse trigonometry all resolve
//! to NaN coordinates plus a [`SolveStatus`] describing the cause.

use nalgebra::Vector3;
use tracing::trace;

use super::ecef::{EarthModel, SphericalEarth};
use crate::core::{GeoPoint, SampleRecord, SolveStatus, TrilaterationResult, REFERENCE_COUNT};
use crate::utils::config::TrilaterationConfig;

/// Orthonormal basis anchored at the first reference point
#[derive(Debug, Clone, PartialEq)]
pub struct LocalFrame {
    pub origin: Vector3<f64>,
    pub ex: Vector3<f64>,
    pub ey: Vector3<f64>,
    pub ez: Vector3<f64>,
    /// Distance between P1 and P2
    pub d: f64,
    /// Projection of P3 - P1 on ex
    pub i: f64,
    /// Projection of P3 - P1 on ey
    pub j: f64,
}

impl LocalFrame {
    /// Build the basis from three ECEF points. No guard against coincident
    /// or collinear points: the affected terms become NaN.
    pub fn new(p1: &Vector3<f64>, p2: &Vector3<f64>, p3: &Vector3<f64>) -> Self {
        let p21 = p2 - p1;
        let p31 = p3 - p1;

        let d = p21.norm();
        let ex = p21 / d;
        let i = ex.dot(&p31);
        let in_plane = p31 - ex * i;
        let ey = in_plane / in_plane.norm();
        let ez = ex.cross(&ey);
        let j = ey.dot(&p31);

        Self { origin: *p1, ex, ey, ez, d, i, j }
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.d.is_finite()
            && self.i.is_finite()
            && self.j.is_finite()
            && self.ex.iter().all(|v| v.is_finite())
            && self.ey.iter().all(|v| v.is_finite()))
    }

    /// Solve the sphere equations in the local frame.
    /// Returns `(x, y, z²)`; distances in the frame's unit.
    pub fn intersect(&self, distances: &[f64; REFERENCE_COUNT]) -> (f64, f64, f64) {
        let [da, db, dc] = *distances;
        let (d, i, j) = (self.d, self.i, self.j);

        let x = (da.powi(2) - db.powi(2) + d.powi(2)) / (2.0 * d);
        let y = (da.powi(2) - dc.powi(2) + i.powi(2) + j.powi(2)) / (2.0 * j) - (i / j) * x;
        let z_squared = da.powi(2) - x.powi(2) - y.powi(2);

        (x, y, z_squared)
    }

    /// Map local coordinates back to the global ECEF frame
    pub fn to_global(&self, x: f64, y: f64, z: f64) -> Vector3<f64> {
        self.origin + self.ex * x + self.ey * y + self.ez * z
    }
}

/// Trilateration solver over a pluggable Earth model
#[derive(Debug, Clone)]
pub struct Trilaterator<E: EarthModel = SphericalEarth> {
    earth: E,
    distance_scale: f64,
    height_tolerance_km2: f64,
}

impl Default for Trilaterator<SphericalEarth> {
    fn default() -> Self {
        Self::from_config(&TrilaterationConfig::default())
    }
}

impl Trilaterator<SphericalEarth> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &TrilaterationConfig) -> Self {
        Self::with_earth_model(
            SphericalEarth::new(config.earth_radius_km),
            config.distance_scale,
            config.height_tolerance_km2,
        )
    }
}

impl<E: EarthModel> Trilaterator<E> {
    pub fn with_earth_model(earth: E, distance_scale: f64, height_tolerance_km2: f64) -> Self {
        Self { earth, distance_scale, height_tolerance_km2 }
    }

    pub fn earth(&self) -> &E {
        &self.earth
    }

    /// Solve one sample, keeping its name
    pub fn solve(&self, sample: &SampleRecord) -> TrilaterationResult {
        let (position, status) = self.locate(&sample.distances_m, &sample.references);

        TrilaterationResult {
            name: sample.name.clone(),
            position,
            status,
        }
    }

    /// Position of the unknown point for the non-negative height root.
    /// Distances are in input units (meters by default).
    pub fn locate(
        &self,
        distances: &[f64; REFERENCE_COUNT],
        references: &[GeoPoint; REFERENCE_COUNT],
    ) -> (GeoPoint, SolveStatus) {
        let frame = self.frame(references);
        let (x, y, z_squared) = frame.intersect(&self.scaled(distances));
        let z = self.height(z_squared);

        trace!(x, y, z_squared, "local frame solution");

        let position = self.earth.to_geodetic(&frame.to_global(x, y, z));

        let status = if frame.is_degenerate() {
            SolveStatus::DegenerateBasis
        } else if z_squared < -self.height_tolerance_km2 {
            SolveStatus::NoRealIntersection
        } else if !position.is_finite() {
            SolveStatus::NonFinite
        } else {
            SolveStatus::Solved
        };

        (position, status)
    }

    /// Both intersection candidates: `[+z, -z]`.
    /// The second is the reflection of the first across the reference plane.
    pub fn candidates(
        &self,
        distances: &[f64; REFERENCE_COUNT],
        references: &[GeoPoint; REFERENCE_COUNT],
    ) -> [GeoPoint; 2] {
        let frame = self.frame(references);
        let (x, y, z_squared) = frame.intersect(&self.scaled(distances));
        let z = self.height(z_squared);

        [
            self.earth.to_geodetic(&frame.to_global(x, y, z)),
            self.earth.to_geodetic(&frame.to_global(x, y, -z)),
        ]
    }

    fn frame(&self, references: &[GeoPoint; REFERENCE_COUNT]) -> LocalFrame {
        let [a, b, c] = references;
        LocalFrame::new(&self.earth.to_ecef(a), &self.earth.to_ecef(b), &self.earth.to_ecef(c))
    }

    fn scaled(&self, distances: &[f64; REFERENCE_COUNT]) -> [f64; REFERENCE_COUNT] {
        distances.map(|d| d * self.distance_scale)
    }

    fn height(&self, z_squared: f64) -> f64 {
        if z_squared >= 0.0 {
            z_squared.sqrt()
        } else if z_squared >= -self.height_tolerance_km2 {
            // rounding noise for points on the reference plane
            0.0
        } else {
            f64::NAN
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::ecef::chord_distance_km;

    fn exact_distances_m(target: &GeoPoint, refs: &[GeoPoint; 3]) -> [f64; 3] {
        let earth = SphericalEarth::default();
        refs.map(|r| chord_distance_km(&earth, target, &r) * 1000.0)
    }

    fn sample(name: &str, distances_m: [f64; 3], refs: [(f64, f64); 3]) -> SampleRecord {
        SampleRecord {
            name: name.to_string(),
            distances_m,
            references: refs.map(|(lon, lat)| GeoPoint::new(lon, lat)),
        }
    }

    fn assert_close(actual: &GeoPoint, expected: &GeoPoint, tol: f64) {
        assert!(
            (actual.lon - expected.lon).abs() < tol && (actual.lat - expected.lat).abs() < tol,
            "expected ({:.9}, {:.9}), got ({:.9}, {:.9})",
            expected.lon, expected.lat, actual.lon, actual.lat
        );
    }

    #[test]
    fn test_local_frame_axes_are_orthonormal() {
        let earth = SphericalEarth::default();
        let frame = LocalFrame::new(
            &earth.to_ecef(&GeoPoint::new(0.0, 0.0)),
            &earth.to_ecef(&GeoPoint::new(1.0, 0.0)),
            &earth.to_ecef(&GeoPoint::new(0.0, 1.0)),
        );

        assert!((frame.ex.norm() - 1.0).abs() < 1e-12);
        assert!((frame.ey.norm() - 1.0).abs() < 1e-12);
        assert!((frame.ez.norm() - 1.0).abs() < 1e-12);
        assert!(frame.ex.dot(&frame.ey).abs() < 1e-12);
        assert!(frame.ex.dot(&frame.ez).abs() < 1e-12);
        assert!(!frame.is_degenerate());
        // East then north: ez points away from the Earth's center
        assert!(frame.ez.dot(&frame.origin) > 0.0);
    }

    #[test]
    fn test_identity_triangle_returns_reference_a() {
        let trilaterator = Trilaterator::new();
        let cases = [
            [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)],
            [(10.5, 45.2), (10.9, 45.1), (10.7, 45.6)],
            [(-122.0, 37.0), (-121.5, 37.2), (-121.8, 37.5)],
        ];

        for refs in cases {
            let refs = refs.map(|(lon, lat)| GeoPoint::new(lon, lat));
            let mut distances = exact_distances_m(&refs[0], &refs);
            distances[0] = 0.0;

            let (position, status) = trilaterator.locate(&distances, &refs);
            assert_eq!(status, SolveStatus::Solved);
            assert_close(&position, &refs[0], 1e-6);
        }
    }

    #[test]
    fn test_roundtrip_recovers_point() {
        let trilaterator = Trilaterator::new();
        let cases = [
            (GeoPoint::new(0.3, 0.4), [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]),
            (GeoPoint::new(-121.77, 37.23), [(-122.0, 37.0), (-121.5, 37.2), (-121.8, 37.5)]),
            (GeoPoint::new(-120.0, 38.5), [(-122.0, 37.0), (-121.5, 37.2), (-121.8, 37.5)]),
        ];

        for (target, refs) in cases {
            let refs = refs.map(|(lon, lat)| GeoPoint::new(lon, lat));
            let distances = exact_distances_m(&target, &refs);

            let (position, status) = trilaterator.locate(&distances, &refs);
            assert_eq!(status, SolveStatus::Solved);

            // The +z root is only the true point when it lies within the
            // reference circle; otherwise it is the mirror candidate.
            let [upper, lower] = trilaterator.candidates(&distances, &refs);
            assert_eq!(position, upper);
            let recovered = if (upper.lon - target.lon).abs() < 1e-6 { upper } else { lower };
            assert_close(&recovered, &target, 1e-6);
        }
    }

    #[test]
    fn test_point_inside_reference_circle_is_primary_answer() {
        let trilaterator = Trilaterator::new();
        let target = GeoPoint::new(-121.77, 37.23);
        let refs = [(-122.0, 37.0), (-121.5, 37.2), (-121.8, 37.5)].map(|(lon, lat)| GeoPoint::new(lon, lat));

        let (position, _) = trilaterator.locate(&exact_distances_m(&target, &refs), &refs);
        assert_close(&position, &target, 1e-6);
    }

    #[test]
    fn test_cyclic_relabelling_gives_same_answer() {
        let trilaterator = Trilaterator::new();
        let target = GeoPoint::new(-121.77, 37.23);
        let refs = [(-122.0, 37.0), (-121.5, 37.2), (-121.8, 37.5)].map(|(lon, lat)| GeoPoint::new(lon, lat));
        let [da, db, dc] = exact_distances_m(&target, &refs);
        let [a, b, c] = refs;

        let (abc, _) = trilaterator.locate(&[da, db, dc], &[a, b, c]);
        let (bca, _) = trilaterator.locate(&[db, dc, da], &[b, c, a]);
        let (cab, _) = trilaterator.locate(&[dc, da, db], &[c, a, b]);

        assert_close(&bca, &abc, 1e-6);
        assert_close(&cab, &abc, 1e-6);
    }

    #[test]
    fn test_swapped_labels_keep_point_among_candidates() {
        let trilaterator = Trilaterator::new();
        let target = GeoPoint::new(0.3, 0.4);
        let refs = [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)].map(|(lon, lat)| GeoPoint::new(lon, lat));
        let [da, db, dc] = exact_distances_m(&target, &refs);
        let [a, b, c] = refs;

        let swapped = trilaterator.candidates(&[db, da, dc], &[b, a, c]);
        let hit = swapped
            .iter()
            .any(|p| (p.lon - target.lon).abs() < 1e-6 && (p.lat - target.lat).abs() < 1e-6);
        assert!(hit, "target not among candidates: {:?}", swapped);
    }

    #[test]
    fn test_concrete_scenario_has_no_real_intersection() {
        // 10 km spheres around references one degree (~111 km) apart do not meet
        let trilaterator = Trilaterator::new();
        let result = trilaterator.solve(&sample(
            "P1",
            [10000.0, 10000.0, 10000.0],
            [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)],
        ));

        assert_eq!(result.name, "P1");
        assert!(result.position.lon.is_nan());
        assert!(result.position.lat.is_nan());
        assert_eq!(result.status, SolveStatus::NoRealIntersection);
    }

    #[test]
    fn test_golden_value() {
        let trilaterator = Trilaterator::new();
        let result = trilaterator.solve(&sample(
            "S7",
            [50000.0, 60000.0, 70000.0],
            [(-122.0, 37.0), (-121.5, 37.2), (-121.8, 37.5)],
        ));

        assert_eq!(result.status, SolveStatus::Solved);
        assert_close(&result.position, &GeoPoint::new(-121.85485894814964, 37.3725393129122), 1e-4);
    }

    #[test]
    fn test_collinear_references_yield_nan() {
        let trilaterator = Trilaterator::new();
        let result = trilaterator.solve(&sample(
            "equator",
            [1000.0, 1000.0, 1000.0],
            [(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)],
        ));

        assert!(result.position.lon.is_nan());
        assert!(result.position.lat.is_nan());
        assert!(!result.status.is_solved());
    }

    #[test]
    fn test_coincident_references_are_degenerate() {
        let trilaterator = Trilaterator::new();

        let same_ab = trilaterator.solve(&sample("ab", [1000.0, 1000.0, 1000.0], [(5.0, 5.0), (5.0, 5.0), (5.0, 6.0)]));
        assert_eq!(same_ab.status, SolveStatus::DegenerateBasis);
        assert!(!same_ab.position.is_finite());

        let same_ac = trilaterator.solve(&sample("ac", [1000.0, 1000.0, 1000.0], [(5.0, 5.0), (6.0, 5.0), (5.0, 5.0)]));
        assert_eq!(same_ac.status, SolveStatus::DegenerateBasis);
        assert!(!same_ac.position.is_finite());
    }

    #[test]
    fn test_nan_distance_is_non_finite() {
        let trilaterator = Trilaterator::new();
        let result = trilaterator.solve(&sample(
            "nan",
            [f64::NAN, 60000.0, 70000.0],
            [(-122.0, 37.0), (-121.5, 37.2), (-121.8, 37.5)],
        ));

        assert_eq!(result.status, SolveStatus::NonFinite);
        assert!(result.position.lat.is_nan());
    }

    #[test]
    fn test_strict_tolerance_turns_plane_point_into_nan_or_reference() {
        // With zero tolerance, rounding noise in z² may push the identity
        // case either way; the call must still not panic.
        let trilaterator = Trilaterator::with_earth_model(SphericalEarth::default(), 0.001, 0.0);
        let refs = [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)].map(|(lon, lat)| GeoPoint::new(lon, lat));
        let mut distances = exact_distances_m(&refs[0], &refs);
        distances[0] = 0.0;

        let (position, status) = trilaterator.locate(&distances, &refs);
        if status.is_solved() {
            assert_close(&position, &refs[0], 1e-6);
        } else {
            assert_eq!(status, SolveStatus::NoRealIntersection);
        }
    }

    #[test]
    fn test_distance_scale_from_config() {
        let config = TrilaterationConfig {
            distance_scale: 1.0,
            ..TrilaterationConfig::default()
        };
        let trilaterator = Trilaterator::from_config(&config);
        let result = trilaterator.solve(&sample(
            "km",
            [50.0, 60.0, 70.0],
            [(-122.0, 37.0), (-121.5, 37.2), (-121.8, 37.5)],
        ));

        assert_close(&result.position, &GeoPoint::new(-121.85485894814964, 37.3725393129122), 1e-4);
    }
}
