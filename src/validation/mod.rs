//! Error types for batch processing

pub mod error;

pub use error::{TrilatError, TrilatResult};
