//! Hypothesis enumeration.
//!
//! A hypothesis (world) assigns every person one gene count and one trait
//! value. Worlds are stored compactly as two vectors in pedigree order; the
//! set-triple view (`one_gene`, `two_genes`, `have_trait`) is available for
//! callers that think in terms of sets.
//!
//! The enumerator never materializes the space. It walks an odometer: gene
//! counts count in base 3 across all people, and once they wrap, the trait
//! values of people with unknown observations count in base 2. People with an
//! observed trait keep that value in every world, so evidence filtering
//! happens before the gene split instead of after it.

use std::collections::BTreeSet;

use hd_common::{GeneCount, PersonId};

use crate::pedigree::Pedigree;

/// One complete assignment of gene count and trait value to every person.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct World {
    genes: Vec<GeneCount>,
    traits: Vec<bool>,
}

impl World {
    pub(crate) fn new(genes: Vec<GeneCount>, traits: Vec<bool>) -> Self {
        debug_assert_eq!(genes.len(), traits.len());
        Self { genes, traits }
    }

    /// Build a world from the set-triple view.
    ///
    /// A person in both `two_genes` and `one_gene` counts as two copies.
    /// Names outside the pedigree are ignored.
    pub fn from_sets(
        pedigree: &Pedigree,
        one_gene: &BTreeSet<PersonId>,
        two_genes: &BTreeSet<PersonId>,
        have_trait: &BTreeSet<PersonId>,
    ) -> Self {
        let genes = pedigree
            .people()
            .iter()
            .map(|p| {
                if two_genes.contains(&p.id) {
                    GeneCount::Two
                } else if one_gene.contains(&p.id) {
                    GeneCount::One
                } else {
                    GeneCount::Zero
                }
            })
            .collect();
        let traits = pedigree
            .people()
            .iter()
            .map(|p| have_trait.contains(&p.id))
            .collect();
        Self { genes, traits }
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn gene(&self, idx: usize) -> GeneCount {
        self.genes[idx]
    }

    pub fn has_trait(&self, idx: usize) -> bool {
        self.traits[idx]
    }

    pub fn genes(&self) -> &[GeneCount] {
        &self.genes
    }

    pub fn traits(&self) -> &[bool] {
        &self.traits
    }

    /// True when every observed trait matches this world.
    pub fn is_admissible(&self, pedigree: &Pedigree) -> bool {
        pedigree
            .people()
            .iter()
            .zip(&self.traits)
            .all(|(person, &has_trait)| person.observed.admits(has_trait))
    }

    pub fn one_gene(&self, pedigree: &Pedigree) -> BTreeSet<PersonId> {
        self.ids_where(pedigree, |i| self.genes[i] == GeneCount::One)
    }

    pub fn two_genes(&self, pedigree: &Pedigree) -> BTreeSet<PersonId> {
        self.ids_where(pedigree, |i| self.genes[i] == GeneCount::Two)
    }

    pub fn have_trait(&self, pedigree: &Pedigree) -> BTreeSet<PersonId> {
        self.ids_where(pedigree, |i| self.traits[i])
    }

    fn ids_where(&self, pedigree: &Pedigree, pred: impl Fn(usize) -> bool) -> BTreeSet<PersonId> {
        (0..self.len())
            .filter(|&i| pred(i))
            .map(|i| pedigree.person(i).id.clone())
            .collect()
    }

    /// Advance to the next world, returning false once the space wraps.
    fn advance(&mut self, free: &[usize]) -> bool {
        for g in self.genes.iter_mut() {
            match *g {
                GeneCount::Zero => {
                    *g = GeneCount::One;
                    return true;
                }
                GeneCount::One => {
                    *g = GeneCount::Two;
                    return true;
                }
                GeneCount::Two => *g = GeneCount::Zero,
            }
        }
        for &i in free {
            if self.traits[i] {
                self.traits[i] = false;
            } else {
                self.traits[i] = true;
                return true;
            }
        }
        false
    }
}

/// Every world consistent with the pedigree's trait evidence.
#[derive(Debug, Clone)]
pub struct HypothesisSpace {
    first: World,
    /// People whose trait is unknown and therefore varies.
    free: Vec<usize>,
}

impl HypothesisSpace {
    pub fn new(pedigree: &Pedigree) -> Self {
        let n = pedigree.len();
        let traits = (0..n)
            .map(|i| pedigree.observed(i).as_bool().unwrap_or(false))
            .collect();
        let free = (0..n)
            .filter(|&i| pedigree.observed(i).as_bool().is_none())
            .collect();
        Self {
            first: World::new(vec![GeneCount::Zero; n], traits),
            free,
        }
    }

    /// Number of admissible worlds, 3^n × 2^u, saturating at `u128::MAX`.
    pub fn len(&self) -> u128 {
        let genes = 3u128.checked_pow(self.first.len() as u32);
        let traits = 2u128.checked_pow(self.free.len() as u32);
        match (genes, traits) {
            (Some(g), Some(t)) => g.saturating_mul(t),
            _ => u128::MAX,
        }
    }

    /// Never true: even an empty pedigree has the single empty world.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Lazily iterate the space from the start. Each call restarts.
    pub fn iter(&self) -> Hypotheses<'_> {
        Hypotheses {
            free: &self.free,
            next: Some(self.first.clone()),
        }
    }

    /// Visit every world by reference without allocating per world.
    pub fn for_each_world(&self, mut f: impl FnMut(&World)) {
        let mut world = self.first.clone();
        loop {
            f(&world);
            if !world.advance(&self.free) {
                break;
            }
        }
    }
}

impl<'a> IntoIterator for &'a HypothesisSpace {
    type Item = World;
    type IntoIter = Hypotheses<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a [`HypothesisSpace`].
#[derive(Debug, Clone)]
pub struct Hypotheses<'a> {
    free: &'a [usize],
    next: Option<World>,
}

impl Iterator for Hypotheses<'_> {
    type Item = World;

    fn next(&mut self) -> Option<World> {
        let current = self.next.take()?;
        let mut successor = current.clone();
        if successor.advance(self.free) {
            self.next = Some(successor);
        }
        Some(current)
    }
}
