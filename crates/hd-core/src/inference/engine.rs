//! Exact inference driver.
//!
//! Enumerates every admissible world, evaluates its joint probability, and
//! accumulates marginals. Cost is exponential: a pedigree of n people with u
//! unknown traits has 3^n × 2^u admissible worlds, so pedigrees above
//! [`InferenceConfig::max_people`] are refused before enumeration starts.

use std::time::Instant;

use hd_common::{Error, Result};
use hd_config::ProbabilityTables;
use hd_math::CompensatedSum;
use serde::Serialize;
use tracing::{debug, info};

use super::hypothesis::HypothesisSpace;
use super::joint::world_probability;
use super::marginals::{MarginalAccumulator, ProbabilityTable};
use crate::pedigree::Pedigree;

/// Default pedigree size limit (3^12 × 2^12 ≈ 2.2 × 10^9 worlds).
pub const DEFAULT_MAX_PEOPLE: usize = 12;

/// Engine limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceConfig {
    /// Largest pedigree the engine accepts.
    pub max_people: usize,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            max_people: DEFAULT_MAX_PEOPLE,
        }
    }
}

/// Counters from one inference run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InferenceStats {
    pub people: usize,
    pub worlds: u64,
    /// Total probability of the observed evidence, P(evidence).
    pub evidence_probability: f64,
}

/// Posterior table plus run counters.
#[derive(Debug, Clone)]
pub struct InferenceOutcome {
    pub table: ProbabilityTable,
    pub stats: InferenceStats,
}

/// Exact inference engine owning its probability tables and limits.
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    tables: ProbabilityTables,
    config: InferenceConfig,
}

impl InferenceEngine {
    /// Create an engine, rejecting tables that fail validation.
    ///
    /// Warnings are left to whoever loaded the tables ([`hd_config::resolve_probs`]
    /// logs them once).
    pub fn new(tables: ProbabilityTables, config: InferenceConfig) -> Result<Self> {
        tables.validate().into_result()?;
        Ok(Self { tables, config })
    }

    pub fn tables(&self) -> &ProbabilityTables {
        &self.tables
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Posterior gene and trait distributions for every person.
    pub fn infer(&self, pedigree: &Pedigree) -> Result<ProbabilityTable> {
        self.infer_with_stats(pedigree).map(|outcome| outcome.table)
    }

    pub fn infer_with_stats(&self, pedigree: &Pedigree) -> Result<InferenceOutcome> {
        if pedigree.len() > self.config.max_people {
            return Err(Error::PedigreeTooLarge {
                people: pedigree.len(),
                max: self.config.max_people,
            });
        }

        let space = HypothesisSpace::new(pedigree);
        info!(
            people = pedigree.len(),
            observed = pedigree.observed_count(),
            worlds = %space.len(),
            "starting exact inference"
        );
        let started = Instant::now();

        let mut accumulator = MarginalAccumulator::new(pedigree.len());
        let mut evidence = CompensatedSum::new();
        space.for_each_world(|world| {
            let p = world_probability(pedigree, &self.tables, world);
            evidence.add(p);
            accumulator.record(world, p);
        });

        let stats = InferenceStats {
            people: pedigree.len(),
            worlds: accumulator.worlds(),
            evidence_probability: evidence.value(),
        };
        debug!(
            worlds = stats.worlds,
            evidence_probability = stats.evidence_probability,
            "enumeration complete"
        );

        let table = accumulator.normalize(pedigree)?;
        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            worlds = stats.worlds,
            "inference complete"
        );
        Ok(InferenceOutcome { table, stats })
    }
}

/// Run inference with the given tables and default limits.
pub fn infer(pedigree: &Pedigree, tables: &ProbabilityTables) -> Result<ProbabilityTable> {
    InferenceEngine::new(tables.clone(), InferenceConfig::default())?.infer(pedigree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pedigree::{Person, TraitObservation};
    use hd_common::{GeneCount, TableField};
    use hd_config::GeneTable;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    fn solo(observed: TraitObservation) -> Pedigree {
        Pedigree::new(vec![Person::founder("Solo", observed)]).unwrap()
    }

    #[test]
    fn unobserved_founder_recovers_prior() {
        let table = infer(&solo(TraitObservation::Unknown), &ProbabilityTables::default()).unwrap();
        let gene = table.get("Solo").unwrap().gene;
        assert!(close(gene.get(GeneCount::Two), 0.01, 1e-12));
        assert!(close(gene.get(GeneCount::One), 0.03, 1e-12));
        assert!(close(gene.get(GeneCount::Zero), 0.96, 1e-12));
    }

    #[test]
    fn observed_founder_posterior_is_proportional() {
        let table = infer(&solo(TraitObservation::Present), &ProbabilityTables::default()).unwrap();
        let solo = table.get("Solo").unwrap();
        let (two, one, zero) = (0.01 * 0.65, 0.03 * 0.56, 0.96 * 0.01);
        let z = two + one + zero;
        assert!(close(solo.gene.get(GeneCount::Two), two / z, 1e-12));
        assert!(close(solo.gene.get(GeneCount::One), one / z, 1e-12));
        assert!(close(solo.gene.get(GeneCount::Zero), zero / z, 1e-12));
        assert_eq!(solo.trait_.get(true), 1.0);
        assert_eq!(solo.trait_.get(false), 0.0);
    }

    #[test]
    fn stats_report_worlds_and_evidence() {
        let engine =
            InferenceEngine::new(ProbabilityTables::default(), InferenceConfig::default()).unwrap();
        let outcome = engine.infer_with_stats(&solo(TraitObservation::Present)).unwrap();
        assert_eq!(outcome.stats.people, 1);
        assert_eq!(outcome.stats.worlds, 3);
        let evidence = 0.01 * 0.65 + 0.03 * 0.56 + 0.96 * 0.01;
        assert!(close(outcome.stats.evidence_probability, evidence, 1e-15));
    }

    #[test]
    fn empty_pedigree_gives_empty_table() {
        let pedigree = Pedigree::new(Vec::new()).unwrap();
        let table = infer(&pedigree, &ProbabilityTables::default()).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn too_many_people_is_refused() {
        let people = (0..5)
            .map(|i| Person::founder(format!("p{i}"), TraitObservation::Unknown))
            .collect();
        let pedigree = Pedigree::new(people).unwrap();
        let engine =
            InferenceEngine::new(ProbabilityTables::default(), InferenceConfig { max_people: 4 })
                .unwrap();
        let err = engine.infer(&pedigree).unwrap_err();
        assert!(matches!(err, Error::PedigreeTooLarge { people: 5, max: 4 }));
    }

    #[test]
    fn impossible_evidence_is_reported() {
        // Nobody can express the trait under these tables.
        let tables = ProbabilityTables::default().with_trait_given_gene(GeneTable::new(0.0, 0.0, 0.0));
        let err = infer(&solo(TraitObservation::Present), &tables).unwrap_err();
        assert!(matches!(
            err,
            Error::ContradictoryEvidence { field: TableField::Gene, .. }
        ));
    }

    #[test]
    fn invalid_tables_are_rejected() {
        let tables = ProbabilityTables::default().with_mutation_rate(2.0);
        let err = InferenceEngine::new(tables, InferenceConfig::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidProbabilities(_)));
    }
}
