//! Heredity common types, ids, and errors.
//!
//! This crate provides foundational types shared across the heredity crates:
//! - Person identity type
//! - Gene-count (genotype) enumeration
//! - Schema versioning for JSON outputs
//! - Common error types
//! - Output format specifications

pub mod error;
pub mod genotype;
pub mod id;
pub mod output;
pub mod schema;

pub use error::{Error, Result, TableField};
pub use genotype::GeneCount;
pub use id::PersonId;
pub use output::OutputFormat;
pub use schema::SCHEMA_VERSION;
