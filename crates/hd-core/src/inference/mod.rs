//! Inference engine modules.
//!
//! Leaves first: [`inheritance`] (allele transmission), [`hypothesis`]
//! (world enumeration), [`joint`] (probability of one world), [`marginals`]
//! (accumulation and normalization), and [`engine`], which drives them.

pub mod engine;
pub mod hypothesis;
pub mod inheritance;
pub mod joint;
pub mod marginals;

pub use engine::{
    infer, InferenceConfig, InferenceEngine, InferenceOutcome, InferenceStats, DEFAULT_MAX_PEOPLE,
};
pub use hypothesis::{Hypotheses, HypothesisSpace, World};
pub use inheritance::{child_gene_probability, transmit_probability};
pub use joint::{joint_probability, joint_probability_of_sets, person_factor};
pub use marginals::{
    GeneDistribution, MarginalAccumulator, PersonMarginals, ProbabilityTable, TraitDistribution,
};
