//! Output format selection.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How results are rendered on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Indented per-person listing with four decimals.
    #[default]
    Text,
    /// Machine-readable JSON document.
    Json,
}
