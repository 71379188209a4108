//! Heredity math utilities.

pub mod math;

pub use math::posterior::{normalize_in_place, sums_to_one};
pub use math::stable::CompensatedSum;
