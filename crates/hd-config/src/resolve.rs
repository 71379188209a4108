//! Probability table resolution.
//!
//! Tables come from the first of:
//! 1. an explicit path given on the command line,
//! 2. the path in the `HEREDITY_PROBS` environment variable,
//! 3. `<config_dir>/heredity/probs.json` if it exists,
//! 4. the built-in defaults.
//!
//! Whatever is chosen is validated before it is returned.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::probs::ProbabilityTables;
use crate::validate::ValidationError;

/// Environment variable naming a probability table file.
pub const PROBS_ENV_VAR: &str = "HEREDITY_PROBS";

/// Where the resolved tables came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum ProbsSource {
    Cli(PathBuf),
    Env(PathBuf),
    UserConfig(PathBuf),
    Defaults,
}

impl ProbsSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ProbsSource::Cli(p) | ProbsSource::Env(p) | ProbsSource::UserConfig(p) => Some(p),
            ProbsSource::Defaults => None,
        }
    }
}

/// Validated tables plus their provenance.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedProbs {
    pub source: ProbsSource,
    pub tables: ProbabilityTables,
}

/// Default location of the per-user tables file.
pub fn user_probs_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("heredity").join("probs.json"))
}

/// Resolve tables from the process environment.
pub fn resolve_probs(cli_path: Option<&Path>) -> Result<ResolvedProbs, ValidationError> {
    let env_path = std::env::var_os(PROBS_ENV_VAR)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from);
    resolve_probs_from(cli_path, env_path, user_probs_path())
}

/// Resolve tables from explicit candidates.
///
/// Explicit CLI and env paths must exist; the user config path is only used
/// when the file is present.
pub fn resolve_probs_from(
    cli_path: Option<&Path>,
    env_path: Option<PathBuf>,
    user_path: Option<PathBuf>,
) -> Result<ResolvedProbs, ValidationError> {
    let source = if let Some(path) = cli_path {
        ProbsSource::Cli(path.to_path_buf())
    } else if let Some(path) = env_path {
        ProbsSource::Env(path)
    } else {
        match user_path {
            Some(path) if path.is_file() => ProbsSource::UserConfig(path),
            _ => ProbsSource::Defaults,
        }
    };

    let tables = match source.path() {
        Some(path) => ProbabilityTables::from_file(path)?,
        None => ProbabilityTables::default(),
    };
    debug!(source = ?source, "resolved probability tables");

    Ok(ResolvedProbs {
        source,
        tables: tables.checked()?,
    })
}
