//! Conditional probability tables for single-gene inheritance.
//!
//! The tables are fixed model constants: a gene-count prior for founders,
//! the probability of expressing the trait given the gene count, and the
//! per-allele mutation rate. They default to the embedded
//! `schemas/probs.default.json` and can be overridden by a JSON file of the
//! same shape.

use hd_common::GeneCount;
use serde::{Deserialize, Serialize};

use crate::validate::{ValidationError, ValidationResult};

/// Tolerance for the gene prior summing to one.
pub const PRIOR_SUM_TOLERANCE: f64 = 1e-9;

/// Complete probability table configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityTables {
    pub schema_version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Unconditional gene-count probabilities, used for founders only.
    pub gene: GeneTable,

    /// P(trait = true | gene count).
    pub trait_given_gene: GeneTable,

    /// Probability that a transmitted allele flips.
    pub mutation: f64,
}

/// One probability per gene count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneTable {
    pub two: f64,
    pub one: f64,
    pub zero: f64,

    #[serde(rename = "_comment", default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl GeneTable {
    pub fn new(zero: f64, one: f64, two: f64) -> Self {
        Self {
            two,
            one,
            zero,
            comment: None,
        }
    }

    pub fn get(&self, gene: GeneCount) -> f64 {
        match gene {
            GeneCount::Zero => self.zero,
            GeneCount::One => self.one,
            GeneCount::Two => self.two,
        }
    }

    fn sum(&self) -> f64 {
        self.zero + self.one + self.two
    }
}

impl ProbabilityTables {
    /// Load tables from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ValidationError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ValidationError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::parse_json(&content)
    }

    /// Parse tables from a JSON string.
    pub fn parse_json(json: &str) -> Result<Self, ValidationError> {
        serde_json::from_str(json)
            .map_err(|e| ValidationError::ParseError(format!("Invalid JSON: {}", e)))
    }

    /// Prior probability that a founder carries `gene` copies.
    pub fn gene_prior(&self, gene: GeneCount) -> f64 {
        self.gene.get(gene)
    }

    /// Probability of the observed trait value given `gene` copies.
    pub fn trait_likelihood(&self, gene: GeneCount, has_trait: bool) -> f64 {
        let p = self.trait_given_gene.get(gene);
        if has_trait {
            p
        } else {
            1.0 - p
        }
    }

    pub fn mutation_rate(&self) -> f64 {
        self.mutation
    }

    /// Override the mutation rate.
    pub fn with_mutation_rate(mut self, mutation: f64) -> Self {
        self.mutation = mutation;
        self
    }

    /// Override the founder gene prior.
    pub fn with_gene_prior(mut self, gene: GeneTable) -> Self {
        self.gene = gene;
        self
    }

    /// Override P(trait = true | gene count).
    pub fn with_trait_given_gene(mut self, trait_given_gene: GeneTable) -> Self {
        self.trait_given_gene = trait_given_gene;
        self
    }

    /// Semantic validation of every table entry.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        if !hd_common::schema::is_compatible(&self.schema_version) {
            result.error(format!(
                "schema_version {} is not compatible with {}",
                self.schema_version,
                hd_common::SCHEMA_VERSION
            ));
        }

        for gene in GeneCount::ALL {
            result.check_probability(&format!("gene.{}", gene_key(gene)), self.gene.get(gene));
            result.check_probability(
                &format!("trait_given_gene.{}", gene_key(gene)),
                self.trait_given_gene.get(gene),
            );
        }
        result.check_probability("mutation", self.mutation);

        let sum = self.gene.sum();
        if sum.is_finite() && (sum - 1.0).abs() > PRIOR_SUM_TOLERANCE {
            result.error(format!("gene prior must sum to 1, got {sum}"));
        }

        if self.mutation > 0.5 && self.mutation <= 1.0 {
            result.warn(format!(
                "mutation rate {} exceeds 0.5; homozygous parents transmit the opposite allele more often than not",
                self.mutation
            ));
        }

        result
    }

    /// Validate and return the tables, or every problem found.
    pub fn checked(self) -> Result<Self, ValidationError> {
        let warnings = self.validate().into_result()?;
        for warning in warnings {
            tracing::warn!(%warning, "probability tables");
        }
        Ok(self)
    }
}

fn gene_key(gene: GeneCount) -> &'static str {
    match gene {
        GeneCount::Zero => "zero",
        GeneCount::One => "one",
        GeneCount::Two => "two",
    }
}

/// Embedded default tables JSON.
const DEFAULT_PROBS_JSON: &str = include_str!("schemas/probs.default.json");

impl Default for ProbabilityTables {
    fn default() -> Self {
        // The JSON is embedded at compile time and covered by tests.
        Self::parse_json(DEFAULT_PROBS_JSON).expect("Embedded default probability tables are invalid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn minimal_probs_json() -> &'static str {
        r#"{
            "schema_version": "1.0.0",
            "gene": {"two": 0.1, "one": 0.2, "zero": 0.7},
            "trait_given_gene": {"two": 0.9, "one": 0.5, "zero": 0.05},
            "mutation": 0.02
        }"#
    }

    #[test]
    fn default_matches_model_constants() {
        let p = ProbabilityTables::default();
        assert_eq!(p.gene_prior(GeneCount::Two), 0.01);
        assert_eq!(p.gene_prior(GeneCount::One), 0.03);
        assert_eq!(p.gene_prior(GeneCount::Zero), 0.96);
        assert_eq!(p.trait_likelihood(GeneCount::Two, true), 0.65);
        assert_eq!(p.trait_likelihood(GeneCount::One, true), 0.56);
        assert_eq!(p.trait_likelihood(GeneCount::Zero, true), 0.01);
        assert_eq!(p.mutation_rate(), 0.01);
    }

    #[test]
    fn default_is_valid() {
        let result = ProbabilityTables::default().validate();
        assert!(result.is_valid(), "{:?}", result.errors);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn trait_likelihood_complement() {
        let p = ProbabilityTables::default();
        for g in GeneCount::ALL {
            let total = p.trait_likelihood(g, true) + p.trait_likelihood(g, false);
            assert!((total - 1.0).abs() < 1e-12);
        }
        assert!((p.trait_likelihood(GeneCount::Two, false) - 0.35).abs() < 1e-12);
    }

    #[test]
    fn parse_minimal() {
        let p = ProbabilityTables::parse_json(minimal_probs_json()).unwrap();
        assert!(p.description.is_none());
        assert_eq!(p.gene_prior(GeneCount::One), 0.2);
        assert_eq!(p.mutation_rate(), 0.02);
        assert!(p.validate().is_valid());
    }

    #[test]
    fn parse_invalid_json() {
        let err = ProbabilityTables::parse_json("{not valid json}").unwrap_err();
        assert!(matches!(err, ValidationError::ParseError(_)));
    }

    #[test]
    fn parse_missing_mutation() {
        let json = r#"{
            "schema_version": "1.0.0",
            "gene": {"two": 0.1, "one": 0.2, "zero": 0.7},
            "trait_given_gene": {"two": 0.9, "one": 0.5, "zero": 0.05}
        }"#;
        assert!(ProbabilityTables::parse_json(json).is_err());
    }

    #[test]
    fn prior_not_summing_to_one_is_rejected() {
        let p = ProbabilityTables::default().with_gene_prior(GeneTable::new(0.9, 0.03, 0.01));
        let result = p.validate();
        assert!(!result.is_valid());
        assert!(result.errors[0].contains("sum to 1"));
    }

    #[test]
    fn out_of_range_values_are_all_reported() {
        let p = ProbabilityTables::default()
            .with_trait_given_gene(GeneTable::new(-0.1, 0.5, 1.2))
            .with_mutation_rate(f64::NAN);
        let err = p.checked().unwrap_err();
        match err {
            ValidationError::Semantic(errors) => assert_eq!(errors.len(), 3),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn incompatible_schema_version() {
        let mut p = ProbabilityTables::default();
        p.schema_version = "2.0.0".to_string();
        assert!(!p.validate().is_valid());
    }

    #[test]
    fn high_mutation_rate_warns() {
        let p = ProbabilityTables::default().with_mutation_rate(0.75);
        let result = p.validate();
        assert!(result.is_valid());
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn serde_roundtrip_keeps_comment() {
        let p = ProbabilityTables::default();
        let json = serde_json::to_string(&p).unwrap();
        let back = ProbabilityTables::parse_json(&json).unwrap();
        assert_eq!(p, back);
        assert!(back.trait_given_gene.comment.is_some());
    }

    #[test]
    fn from_file_reads_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(minimal_probs_json().as_bytes()).unwrap();
        let p = ProbabilityTables::from_file(file.path()).unwrap();
        assert_eq!(p.gene_prior(GeneCount::Two), 0.1);
    }

    #[test]
    fn from_file_nonexistent() {
        let err = ProbabilityTables::from_file(std::path::Path::new("/nonexistent/probs.json"))
            .unwrap_err();
        assert!(matches!(err, ValidationError::IoError(_)));
    }
}
