//! Exit codes for the heredity CLI.
//!
//! Exit codes communicate operation outcome without requiring output parsing.

use hd_common::Error;

/// Exit codes for heredity operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Clean = 0,

    /// Configuration error (bad or missing probability tables)
    ConfigError = 10,

    /// Pedigree could not be loaded or is malformed
    PedigreeError = 11,

    /// Inference error (contradictory evidence, pedigree too large)
    InferenceError = 12,

    /// I/O error
    IoError = 13,

    /// Internal/unknown error
    InternalError = 99,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Check if this exit code indicates success.
    pub fn is_success(self) -> bool {
        matches!(self, ExitCode::Clean)
    }

    /// Check if this exit code indicates an error requiring attention.
    pub fn is_error(self) -> bool {
        (self as i32) >= 10
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::Config(_) | Error::InvalidProbabilities(_) => ExitCode::ConfigError,
            Error::Load(_)
            | Error::DuplicatePerson { .. }
            | Error::HalfSpecifiedParents { .. }
            | Error::UnknownParent { .. }
            | Error::ParentCycle { .. } => ExitCode::PedigreeError,
            Error::ContradictoryEvidence { .. }
            | Error::PedigreeTooLarge { .. }
            | Error::WorldMismatch { .. } => ExitCode::InferenceError,
            Error::Io(_) => ExitCode::IoError,
            Error::Json(_) => ExitCode::InternalError,
        }
    }
}
