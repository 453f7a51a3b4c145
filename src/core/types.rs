//! Core data types for the trilateration system

use serde::{Deserialize, Serialize};

use super::constants::REFERENCE_COUNT;

/// Geographic position in decimal degrees (elevation is always zero)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "long")]
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    pub fn nan() -> Self {
        Self::new(f64::NAN, f64::NAN)
    }

    pub fn is_finite(&self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }
}

/// One input row: a named sample and its distances to three references
#[derive(Debug, Clone, PartialEq)]
pub struct SampleRecord {
    pub name: String,
    /// Distance to reference A, B, C in meters
    pub distances_m: [f64; REFERENCE_COUNT],
    pub references: [GeoPoint; REFERENCE_COUNT],
}

/// Outcome classification of a single solve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    /// Finite position recovered
    Solved,
    /// Reference points coincide or are collinear in ECEF space
    DegenerateBasis,
    /// Distances are inconsistent with the reference geometry (z² < 0)
    NoRealIntersection,
    /// Any other non-finite result, e.g. NaN input
    NonFinite,
}

impl SolveStatus {
    pub fn is_solved(&self) -> bool {
        matches!(self, SolveStatus::Solved)
    }
}

/// One output row
#[derive(Debug, Clone, PartialEq)]
pub struct TrilaterationResult {
    pub name: String,
    pub position: GeoPoint,
    pub status: SolveStatus,
}
