//! Error types for heredity inference.

use thiserror::Error;

use crate::id::PersonId;

/// Result type alias for heredity operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Which of a person's two distributions an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableField {
    Gene,
    Trait,
}

impl std::fmt::Display for TableField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableField::Gene => write!(f, "gene"),
            TableField::Trait => write!(f, "trait"),
        }
    }
}

/// Unified error type for heredity.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid probability tables: {0}")]
    InvalidProbabilities(String),

    // Pedigree errors (20-29)
    #[error("failed to load pedigree: {0}")]
    Load(String),

    #[error("duplicate person {person}")]
    DuplicatePerson { person: PersonId },

    #[error("person {person} has only one parent recorded")]
    HalfSpecifiedParents { person: PersonId },

    #[error("person {person} references unknown parent {parent}")]
    UnknownParent { person: PersonId, parent: PersonId },

    #[error("person {person} is their own ancestor")]
    ParentCycle { person: PersonId },

    // Inference errors (30-39)
    #[error("contradictory evidence: {field} distribution of {person} has zero total probability")]
    ContradictoryEvidence { person: PersonId, field: TableField },

    #[error("pedigree has {people} people, limit is {max}")]
    PedigreeTooLarge { people: usize, max: usize },

    #[error("world assigns {world} people but the pedigree has {people}")]
    WorldMismatch { world: usize, people: usize },

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    /// Used for detailed error reporting in JSON output.
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::InvalidProbabilities(_) => 11,
            Error::Load(_) => 20,
            Error::DuplicatePerson { .. } => 21,
            Error::HalfSpecifiedParents { .. } => 22,
            Error::UnknownParent { .. } => 23,
            Error::ParentCycle { .. } => 24,
            Error::ContradictoryEvidence { .. } => 30,
            Error::PedigreeTooLarge { .. } => 31,
            Error::WorldMismatch { .. } => 32,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// True for errors raised while validating pedigree structure.
    pub fn is_malformed_pedigree(&self) -> bool {
        matches!(
            self,
            Error::DuplicatePerson { .. }
                | Error::HalfSpecifiedParents { .. }
                | Error::UnknownParent { .. }
                | Error::ParentCycle { .. }
        )
    }
}
