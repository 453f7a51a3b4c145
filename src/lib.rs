//! Geographic trilateration
//!
//! Computes the longitude/latitude of an unknown point from its distances to
//! three reference points, using closed-form trilateration in an
//! Earth-centered, Earth-fixed frame over a spherical Earth.

pub mod core;
pub mod algorithms;
pub mod processing;
pub mod validation;
pub mod utils;

// Re-export commonly used types
pub use self::core::{GeoPoint, SampleRecord, SolveStatus, TrilaterationResult, EARTH_RADIUS_KM};
pub use algorithms::{EarthModel, SphericalEarth, Trilaterator};
pub use processing::{run_batch, run_files, BatchSummary};
pub use utils::TrilaterationConfig;
pub use validation::{TrilatError, TrilatResult};
