//! Marginal accumulation and normalization.
//!
//! Every admissible world adds its joint probability to one gene cell and one
//! trait cell per person. After enumeration each person's two distributions
//! are rescaled independently to sum to one.

use hd_common::{Error, GeneCount, PersonId, Result, TableField};
use hd_math::{normalize_in_place, CompensatedSum};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::trace;

use super::hypothesis::World;
use crate::pedigree::Pedigree;

/// Distribution over gene counts, indexed by number of copies.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GeneDistribution([f64; 3]);

impl GeneDistribution {
    pub fn new(probabilities: [f64; 3]) -> Self {
        Self(probabilities)
    }

    pub fn get(&self, gene: GeneCount) -> f64 {
        self.0[gene.index()]
    }

    pub fn as_array(&self) -> [f64; 3] {
        self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = (GeneCount, f64)> + '_ {
        GeneCount::ALL.iter().map(move |&g| (g, self.get(g)))
    }
}

impl Serialize for GeneDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        for (g, p) in self.iter() {
            map.serialize_entry(&g.to_string(), &p)?;
        }
        map.end()
    }
}

/// Distribution over the trait value, indexed `[false, true]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TraitDistribution([f64; 2]);

impl TraitDistribution {
    pub fn new(absent: f64, present: f64) -> Self {
        Self([absent, present])
    }

    pub fn get(&self, has_trait: bool) -> f64 {
        self.0[usize::from(has_trait)]
    }

    pub fn as_array(&self) -> [f64; 2] {
        self.0
    }
}

impl Serialize for TraitDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("true", &self.get(true))?;
        map.serialize_entry("false", &self.get(false))?;
        map.end()
    }
}

/// Posterior distributions for one person.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonMarginals {
    #[serde(rename = "name")]
    pub person: PersonId,
    pub gene: GeneDistribution,
    #[serde(rename = "trait")]
    pub trait_: TraitDistribution,
}

/// Normalized posterior table, one record per person in pedigree order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProbabilityTable {
    people: Vec<PersonMarginals>,
}

impl ProbabilityTable {
    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn get(&self, person: &str) -> Option<&PersonMarginals> {
        self.people.iter().find(|m| m.person.as_str() == person)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PersonMarginals> {
        self.people.iter()
    }
}

impl<'a> IntoIterator for &'a ProbabilityTable {
    type Item = &'a PersonMarginals;
    type IntoIter = std::slice::Iter<'a, PersonMarginals>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Unnormalized running totals, zero-initialized.
#[derive(Debug, Clone)]
pub struct MarginalAccumulator {
    gene: Vec<[CompensatedSum; 3]>,
    traits: Vec<[CompensatedSum; 2]>,
    worlds: u64,
}

impl MarginalAccumulator {
    pub fn new(people: usize) -> Self {
        Self {
            gene: vec![[CompensatedSum::new(); 3]; people],
            traits: vec![[CompensatedSum::new(); 2]; people],
            worlds: 0,
        }
    }

    /// Add joint probability `p` of `world` to every person's cells.
    pub fn add(&mut self, world: &World, p: f64) -> Result<()> {
        if world.len() != self.gene.len() {
            return Err(Error::WorldMismatch {
                world: world.len(),
                people: self.gene.len(),
            });
        }
        self.record(world, p);
        Ok(())
    }

    /// [`add`](Self::add) for worlds known to match the accumulator.
    pub(crate) fn record(&mut self, world: &World, p: f64) {
        for (idx, (gene, traits)) in self.gene.iter_mut().zip(&mut self.traits).enumerate() {
            gene[world.gene(idx).index()].add(p);
            traits[usize::from(world.has_trait(idx))].add(p);
        }
        self.worlds += 1;
    }

    /// Fold in partial sums computed over a disjoint set of worlds.
    pub fn merge(&mut self, other: &MarginalAccumulator) {
        for (mine, theirs) in self.gene.iter_mut().zip(&other.gene) {
            for (a, b) in mine.iter_mut().zip(theirs) {
                a.merge(b);
            }
        }
        for (mine, theirs) in self.traits.iter_mut().zip(&other.traits) {
            for (a, b) in mine.iter_mut().zip(theirs) {
                a.merge(b);
            }
        }
        self.worlds += other.worlds;
    }

    /// Number of worlds added so far.
    pub fn worlds(&self) -> u64 {
        self.worlds
    }

    /// Unnormalized gene totals of person `idx`.
    pub fn gene_totals(&self, idx: usize) -> [f64; 3] {
        self.gene[idx].map(|s| s.value())
    }

    /// Unnormalized trait totals of person `idx`, `[false, true]`.
    pub fn trait_totals(&self, idx: usize) -> [f64; 2] {
        self.traits[idx].map(|s| s.value())
    }

    /// Rescale each distribution to sum to one.
    ///
    /// Fails with [`Error::ContradictoryEvidence`] when a distribution has no
    /// probability mass at all.
    pub fn normalize(self, pedigree: &Pedigree) -> Result<ProbabilityTable> {
        if pedigree.len() != self.gene.len() {
            return Err(Error::WorldMismatch {
                world: self.gene.len(),
                people: pedigree.len(),
            });
        }
        let mut people = Vec::with_capacity(pedigree.len());
        for (idx, person) in pedigree.people().iter().enumerate() {
            let mut gene = self.gene_totals(idx);
            let mut traits = self.trait_totals(idx);
            normalize_in_place(&mut gene).ok_or_else(|| Error::ContradictoryEvidence {
                person: person.id.clone(),
                field: TableField::Gene,
            })?;
            normalize_in_place(&mut traits).ok_or_else(|| Error::ContradictoryEvidence {
                person: person.id.clone(),
                field: TableField::Trait,
            })?;
            trace!(person = %person.id, ?gene, ?traits, "normalized marginals");
            people.push(PersonMarginals {
                person: person.id.clone(),
                gene: GeneDistribution(gene),
                trait_: TraitDistribution(traits),
            });
        }
        Ok(ProbabilityTable { people })
    }
}
