//! Joint probability of one world.
//!
//! Founders contribute `P(gene) × P(trait | gene)`. Everyone else contributes
//! `P(gene | parents' genes) × P(trait | gene)`. Given the world, these factors
//! are independent, so the joint probability is their product.

use std::collections::BTreeSet;

use hd_common::{Error, PersonId, Result};
use hd_config::ProbabilityTables;

use super::hypothesis::World;
use super::inheritance::child_gene_probability;
use crate::pedigree::Pedigree;

/// Factor contributed by person `idx` in `world`.
pub fn person_factor(
    pedigree: &Pedigree,
    tables: &ProbabilityTables,
    world: &World,
    idx: usize,
) -> f64 {
    let gene = world.gene(idx);
    let gene_probability = match pedigree.parents(idx) {
        None => tables.gene_prior(gene),
        Some(parents) => child_gene_probability(
            gene,
            world.gene(parents.mother),
            world.gene(parents.father),
            tables.mutation_rate(),
        ),
    };
    gene_probability * tables.trait_likelihood(gene, world.has_trait(idx))
}

/// Probability of `world` under the model. An empty pedigree yields 1.0.
///
/// Fails with [`Error::WorldMismatch`] when `world` was built for a pedigree
/// of a different size.
pub fn joint_probability(
    pedigree: &Pedigree,
    tables: &ProbabilityTables,
    world: &World,
) -> Result<f64> {
    if world.len() != pedigree.len() {
        return Err(Error::WorldMismatch {
            world: world.len(),
            people: pedigree.len(),
        });
    }
    Ok(world_probability(pedigree, tables, world))
}

/// Product of every person's factor; `world` must match `pedigree`.
pub(crate) fn world_probability(
    pedigree: &Pedigree,
    tables: &ProbabilityTables,
    world: &World,
) -> f64 {
    (0..pedigree.len())
        .map(|idx| person_factor(pedigree, tables, world, idx))
        .product()
}

/// [`joint_probability`] over the set-triple view of a world.
pub fn joint_probability_of_sets(
    pedigree: &Pedigree,
    tables: &ProbabilityTables,
    one_gene: &BTreeSet<PersonId>,
    two_genes: &BTreeSet<PersonId>,
    have_trait: &BTreeSet<PersonId>,
) -> f64 {
    let world = World::from_sets(pedigree, one_gene, two_genes, have_trait);
    world_probability(pedigree, tables, &world)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pedigree::{Person, TraitObservation};

    fn set(names: &[&str]) -> BTreeSet<PersonId> {
        names.iter().map(|&n| PersonId::from(n)).collect()
    }

    fn family() -> Pedigree {
        Pedigree::new(vec![
            Person::child("Harry", "Lily", "James", TraitObservation::Unknown),
            Person::founder("James", TraitObservation::Present),
            Person::founder("Lily", TraitObservation::Absent),
        ])
        .unwrap()
    }

    #[test]
    fn everyone_reference_no_trait() {
        let tables = ProbabilityTables::default();
        let p = joint_probability_of_sets(&family(), &tables, &set(&[]), &set(&[]), &set(&[]));
        let expected = (0.96 * 0.99) * (0.96 * 0.99) * (0.9801 * 0.99);
        assert!((p - expected).abs() < 1e-15, "{p} vs {expected}");
    }

    #[test]
    fn mixed_world() {
        // Harry 1 copy, James 2 copies with trait, Lily 0 copies without.
        let tables = ProbabilityTables::default();
        let p = joint_probability_of_sets(
            &family(),
            &tables,
            &set(&["Harry"]),
            &set(&["James"]),
            &set(&["James"]),
        );
        let lily = 0.96 * 0.99;
        let james = 0.01 * 0.65;
        // Mother (Lily, 0) passes with m, father (James, 2) passes with 1 - m.
        let harry = (0.01 * 0.01 + 0.99 * 0.99) * 0.44;
        assert!((p - lily * james * harry).abs() < 1e-15);
    }

    #[test]
    fn single_founder_factor() {
        let pedigree =
            Pedigree::new(vec![Person::founder("Solo", TraitObservation::Unknown)]).unwrap();
        let tables = ProbabilityTables::default();
        let p = joint_probability_of_sets(&pedigree, &tables, &set(&["Solo"]), &set(&[]), &set(&["Solo"]));
        assert!((p - 0.03 * 0.56).abs() < 1e-15);
    }

    #[test]
    fn empty_pedigree_is_certain() {
        let pedigree = Pedigree::new(Vec::new()).unwrap();
        let world = World::new(Vec::new(), Vec::new());
        let p = joint_probability(&pedigree, &ProbabilityTables::default(), &world).unwrap();
        assert_eq!(p, 1.0);
    }

    #[test]
    fn identical_factors_multiply() {
        let pedigree = Pedigree::new(vec![
            Person::founder("A", TraitObservation::Present),
            Person::founder("B", TraitObservation::Present),
        ])
        .unwrap();
        let tables = ProbabilityTables::default();
        let both = set(&["A", "B"]);
        let p = joint_probability_of_sets(&pedigree, &tables, &set(&[]), &both, &both);
        let factor = 0.01 * 0.65;
        assert!((p - factor * factor).abs() < 1e-18, "{p}");
    }

    #[test]
    fn rejects_world_of_other_pedigree() {
        let solo =
            Pedigree::new(vec![Person::founder("Solo", TraitObservation::Unknown)]).unwrap();
        let world = crate::inference::hypothesis::HypothesisSpace::new(&solo)
            .iter()
            .next()
            .unwrap();
        let err = joint_probability(&family(), &ProbabilityTables::default(), &world).unwrap_err();
        assert!(matches!(err, Error::WorldMismatch { world: 1, people: 3 }), "{err:?}");
    }

    #[test]
    fn joint_probabilities_sum_to_one_without_evidence() {
        let pedigree = Pedigree::new(vec![
            Person::child("C", "M", "F", TraitObservation::Unknown),
            Person::founder("M", TraitObservation::Unknown),
            Person::founder("F", TraitObservation::Unknown),
        ])
        .unwrap();
        let tables = ProbabilityTables::default();
        let space = crate::inference::hypothesis::HypothesisSpace::new(&pedigree);
        let total: f64 = space
            .iter()
            .map(|w| joint_probability(&pedigree, &tables, &w).unwrap())
            .sum();
        assert!((total - 1.0).abs() < 1e-12);
    }
}
