//! Heredity configuration loading and validation.
//!
//! This crate provides:
//! - Typed Rust structs for probs.json (the conditional probability tables)
//! - Config resolution (CLI → env → user config dir → defaults)
//! - Semantic validation

pub mod probs;
pub mod resolve;
pub mod validate;

pub use probs::{GeneTable, ProbabilityTables};
pub use resolve::{resolve_probs, resolve_probs_from, ProbsSource, ResolvedProbs, PROBS_ENV_VAR};
pub use validate::{ValidationError, ValidationResult};
