//! Physical constants and system parameters

/// Mean (authalic) Earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Factor converting input distances (meters) to the solver's unit (kilometers)
pub const METERS_TO_KILOMETERS: f64 = 1.0 / 1000.0;

/// Number of reference points a sample is measured against
pub const REFERENCE_COUNT: usize = 3;
