//! Rendering of posterior tables.
//!
//! Text output lists each person with their gene distribution (2, 1, 0
//! copies) and trait distribution (True, False) to four decimals. JSON output
//! wraps the table in a versioned report.

use chrono::{SecondsFormat, Utc};
use hd_common::{GeneCount, OutputFormat, Result, SCHEMA_VERSION};
use serde::Serialize;

use crate::inference::{InferenceStats, ProbabilityTable};

/// Versioned JSON report.
#[derive(Debug, Serialize)]
pub struct InferenceReport<'a> {
    pub schema_version: &'static str,
    pub generated_at: String,
    pub people: &'a ProbabilityTable,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<&'a InferenceStats>,
}

impl<'a> InferenceReport<'a> {
    pub fn new(table: &'a ProbabilityTable, stats: Option<&'a InferenceStats>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            people: table,
            stats,
        }
    }
}

/// Render a table in the requested format.
pub fn render(
    table: &ProbabilityTable,
    stats: Option<&InferenceStats>,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(table)),
        OutputFormat::Json => render_json(table, stats),
    }
}

pub fn render_text(table: &ProbabilityTable) -> String {
    let mut out = String::new();
    for person in table {
        out.push_str(&format!("{}:\n  Gene:\n", person.person));
        for gene in GeneCount::ALL.iter().rev() {
            out.push_str(&format!("    {}: {:.4}\n", gene, person.gene.get(*gene)));
        }
        out.push_str(&format!(
            "  Trait:\n    True: {:.4}\n    False: {:.4}\n",
            person.trait_.get(true),
            person.trait_.get(false)
        ));
    }
    out
}

pub fn render_json(table: &ProbabilityTable, stats: Option<&InferenceStats>) -> Result<String> {
    Ok(serde_json::to_string_pretty(&InferenceReport::new(table, stats))?)
}
