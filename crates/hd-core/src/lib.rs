//! Heredity core: exact inference over family pedigrees.
//!
//! Given a pedigree with some observed trait values, the engine enumerates
//! every assignment of gene counts and trait values consistent with the
//! evidence and returns each person's posterior gene and trait distributions.
//!
//! ```no_run
//! use hd_config::ProbabilityTables;
//! use hd_core::{infer, load_pedigree};
//!
//! let pedigree = load_pedigree("data/family0.csv".as_ref())?;
//! let table = infer(&pedigree, &ProbabilityTables::default())?;
//! for person in &table {
//!     println!("{}: {:?}", person.person, person.gene.as_array());
//! }
//! # Ok::<(), hd_common::Error>(())
//! ```

pub mod cli;
pub mod exit_codes;
pub mod inference;
pub mod loader;
pub mod logging;
pub mod output;
pub mod pedigree;

pub use exit_codes::ExitCode;
pub use inference::{infer, InferenceConfig, InferenceEngine, ProbabilityTable};
pub use loader::{load_pedigree, read_pedigree};
pub use pedigree::{Pedigree, Person, TraitObservation};
