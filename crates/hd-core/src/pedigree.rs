//! Pedigree model.
//!
//! A pedigree is an immutable set of people with optional parent links and an
//! optional observed trait value per person. Construction through
//! [`Pedigree::new`] enforces the structural invariants the inference engine
//! relies on:
//! - identifiers are unique,
//! - a person has either no recorded parents or both,
//! - every referenced parent exists,
//! - no person is their own ancestor.
//!
//! Parent links are resolved to indices once so the engine never looks up a
//! name while enumerating hypotheses.

use std::collections::HashMap;

use hd_common::{Error, PersonId, Result};
use tracing::debug;

/// Observed value of the binary trait.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TraitObservation {
    Present,
    Absent,
    #[default]
    Unknown,
}

impl TraitObservation {
    /// The observed value, or `None` when unknown.
    pub fn as_bool(self) -> Option<bool> {
        match self {
            TraitObservation::Present => Some(true),
            TraitObservation::Absent => Some(false),
            TraitObservation::Unknown => None,
        }
    }

    /// Parse a table cell: `"1"`, `"0"` or blank.
    pub fn from_cell(cell: &str) -> Option<Self> {
        match cell.trim() {
            "1" => Some(TraitObservation::Present),
            "0" => Some(TraitObservation::Absent),
            "" => Some(TraitObservation::Unknown),
            _ => None,
        }
    }

    /// Whether a hypothesized trait value agrees with this observation.
    pub fn admits(self, has_trait: bool) -> bool {
        self.as_bool().map_or(true, |observed| observed == has_trait)
    }
}

impl From<Option<bool>> for TraitObservation {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => TraitObservation::Present,
            Some(false) => TraitObservation::Absent,
            None => TraitObservation::Unknown,
        }
    }
}

/// One individual in the pedigree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub id: PersonId,
    pub mother: Option<PersonId>,
    pub father: Option<PersonId>,
    pub observed: TraitObservation,
}

impl Person {
    /// A person with no recorded parents.
    pub fn founder(id: impl Into<PersonId>, observed: TraitObservation) -> Self {
        Self {
            id: id.into(),
            mother: None,
            father: None,
            observed,
        }
    }

    /// A person with both parents recorded.
    pub fn child(
        id: impl Into<PersonId>,
        mother: impl Into<PersonId>,
        father: impl Into<PersonId>,
        observed: TraitObservation,
    ) -> Self {
        Self {
            id: id.into(),
            mother: Some(mother.into()),
            father: Some(father.into()),
            observed,
        }
    }

    pub fn is_founder(&self) -> bool {
        self.mother.is_none() && self.father.is_none()
    }
}

/// Resolved parent indices of a non-founder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parents {
    pub mother: usize,
    pub father: usize,
}

/// Validated, immutable pedigree.
#[derive(Debug, Clone)]
pub struct Pedigree {
    people: Vec<Person>,
    index: HashMap<PersonId, usize>,
    parents: Vec<Option<Parents>>,
}

impl Pedigree {
    /// Build a pedigree, rejecting any structural problem.
    ///
    /// People keep the order they were given in.
    pub fn new(people: Vec<Person>) -> Result<Self> {
        let mut index = HashMap::with_capacity(people.len());
        for (i, person) in people.iter().enumerate() {
            if index.insert(person.id.clone(), i).is_some() {
                return Err(Error::DuplicatePerson {
                    person: person.id.clone(),
                });
            }
        }

        let mut parents = Vec::with_capacity(people.len());
        for person in &people {
            let resolved = match (&person.mother, &person.father) {
                (None, None) => None,
                (Some(mother), Some(father)) => Some(Parents {
                    mother: resolve_parent(&index, person, mother)?,
                    father: resolve_parent(&index, person, father)?,
                }),
                _ => {
                    return Err(Error::HalfSpecifiedParents {
                        person: person.id.clone(),
                    })
                }
            };
            parents.push(resolved);
        }

        if let Some(i) = find_cycle(&parents) {
            return Err(Error::ParentCycle {
                person: people[i].id.clone(),
            });
        }

        let pedigree = Self {
            people,
            index,
            parents,
        };
        debug!(
            people = pedigree.len(),
            founders = pedigree.founder_count(),
            observed = pedigree.observed_count(),
            "pedigree validated"
        );
        Ok(pedigree)
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// People in insertion order.
    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn person(&self, idx: usize) -> &Person {
        &self.people[idx]
    }

    pub fn get(&self, id: &str) -> Option<&Person> {
        self.index_of(id).map(|i| &self.people[i])
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Parent indices of person `idx`, `None` for founders.
    pub fn parents(&self, idx: usize) -> Option<Parents> {
        self.parents[idx]
    }

    pub fn observed(&self, idx: usize) -> TraitObservation {
        self.people[idx].observed
    }

    pub fn founder_count(&self) -> usize {
        self.parents.iter().filter(|p| p.is_none()).count()
    }

    /// Number of people whose trait value is known.
    pub fn observed_count(&self) -> usize {
        self.people
            .iter()
            .filter(|p| p.observed.as_bool().is_some())
            .count()
    }
}

fn resolve_parent(
    index: &HashMap<PersonId, usize>,
    person: &Person,
    parent: &PersonId,
) -> Result<usize> {
    index
        .get(parent)
        .copied()
        .ok_or_else(|| Error::UnknownParent {
            person: person.id.clone(),
            parent: parent.clone(),
        })
}

/// Index of a person on a parent cycle, if any.
fn find_cycle(parents: &[Option<Parents>]) -> Option<usize> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        New,
        Active,
        Done,
    }

    let mut marks = vec![Mark::New; parents.len()];
    for start in 0..parents.len() {
        if marks[start] != Mark::New {
            continue;
        }
        // (node, parents visited so far)
        let mut stack = vec![(start, 0u8)];
        marks[start] = Mark::Active;
        while let Some(top) = stack.last_mut() {
            let (node, visited) = *top;
            top.1 += 1;
            let next = match parents[node] {
                Some(p) if visited == 0 => Some(p.mother),
                Some(p) if visited == 1 => Some(p.father),
                _ => None,
            };
            match next {
                Some(parent) => match marks[parent] {
                    Mark::Active => return Some(parent),
                    Mark::New => {
                        marks[parent] = Mark::Active;
                        stack.push((parent, 0));
                    }
                    Mark::Done => {}
                },
                None => {
                    marks[node] = Mark::Done;
                    stack.pop();
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn potter() -> Vec<Person> {
        vec![
            Person::child("Harry", "Lily", "James", TraitObservation::Unknown),
            Person::founder("James", TraitObservation::Present),
            Person::founder("Lily", TraitObservation::Absent),
        ]
    }

    #[test]
    fn trait_cells() {
        assert_eq!(TraitObservation::from_cell("1"), Some(TraitObservation::Present));
        assert_eq!(TraitObservation::from_cell("0"), Some(TraitObservation::Absent));
        assert_eq!(TraitObservation::from_cell(""), Some(TraitObservation::Unknown));
        assert_eq!(TraitObservation::from_cell("yes"), None);
    }

    #[test]
    fn unknown_admits_both_values() {
        assert!(TraitObservation::Unknown.admits(true));
        assert!(TraitObservation::Unknown.admits(false));
        assert!(TraitObservation::Present.admits(true));
        assert!(!TraitObservation::Present.admits(false));
        assert!(!TraitObservation::Absent.admits(true));
    }

    #[test]
    fn builds_and_resolves_parents() {
        let pedigree = Pedigree::new(potter()).unwrap();
        assert_eq!(pedigree.len(), 3);
        assert_eq!(pedigree.founder_count(), 2);
        assert_eq!(pedigree.observed_count(), 2);
        let harry = pedigree.index_of("Harry").unwrap();
        assert_eq!(
            pedigree.parents(harry),
            Some(Parents {
                mother: pedigree.index_of("Lily").unwrap(),
                father: pedigree.index_of("James").unwrap(),
            })
        );
        assert!(pedigree.parents(pedigree.index_of("James").unwrap()).is_none());
    }

    #[test]
    fn keeps_insertion_order() {
        let pedigree = Pedigree::new(potter()).unwrap();
        let names: Vec<_> = pedigree.people().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(names, ["Harry", "James", "Lily"]);
    }

    #[test]
    fn empty_pedigree_is_valid() {
        let pedigree = Pedigree::new(Vec::new()).unwrap();
        assert!(pedigree.is_empty());
    }

    #[test]
    fn rejects_duplicate() {
        let mut people = potter();
        people.push(Person::founder("Lily", TraitObservation::Unknown));
        let err = Pedigree::new(people).unwrap_err();
        assert!(matches!(err, Error::DuplicatePerson { ref person } if person.as_str() == "Lily"));
    }

    #[test]
    fn rejects_half_specified_parents() {
        let mut people = potter();
        people[0].father = None;
        let err = Pedigree::new(people).unwrap_err();
        assert!(matches!(err, Error::HalfSpecifiedParents { .. }));
    }

    #[test]
    fn rejects_unknown_parent() {
        let people = vec![
            Person::child("Dudley", "Petunia", "Vernon", TraitObservation::Unknown),
            Person::founder("Vernon", TraitObservation::Unknown),
        ];
        let err = Pedigree::new(people).unwrap_err();
        match err {
            Error::UnknownParent { person, parent } => {
                assert_eq!(person.as_str(), "Dudley");
                assert_eq!(parent.as_str(), "Petunia");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn rejects_self_parent() {
        let people = vec![
            Person::child("Tom", "Tom", "Merope", TraitObservation::Unknown),
            Person::founder("Merope", TraitObservation::Unknown),
        ];
        let err = Pedigree::new(people).unwrap_err();
        assert!(matches!(err, Error::ParentCycle { .. }));
    }

    #[test]
    fn rejects_longer_cycle() {
        let people = vec![
            Person::founder("F", TraitObservation::Unknown),
            Person::child("A", "C", "F", TraitObservation::Unknown),
            Person::child("B", "A", "F", TraitObservation::Unknown),
            Person::child("C", "B", "F", TraitObservation::Unknown),
        ];
        let err = Pedigree::new(people).unwrap_err();
        assert!(err.is_malformed_pedigree());
        assert!(matches!(err, Error::ParentCycle { .. }));
    }

    #[test]
    fn shared_ancestors_are_not_cycles() {
        // Grandparents reached through both parents.
        let people = vec![
            Person::founder("G1", TraitObservation::Unknown),
            Person::founder("G2", TraitObservation::Unknown),
            Person::child("M", "G1", "G2", TraitObservation::Unknown),
            Person::child("F", "G1", "G2", TraitObservation::Unknown),
            Person::child("C", "M", "F", TraitObservation::Unknown),
        ];
        assert!(Pedigree::new(people).is_ok());
    }
}
