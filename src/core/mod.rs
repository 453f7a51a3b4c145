//! Core types and constants for the trilateration system

pub mod types;
pub mod constants;

pub use types::*;
pub use constants::*;
