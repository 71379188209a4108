//! CSV pedigree loader.
//!
//! Reads tables with the header `name,mother,father,trait`. Blank parent cells
//! mean "no recorded parent"; the trait cell is `1`, `0` or blank (unknown).
//! Structural checks are left to [`Pedigree::new`], so a bad table fails with
//! the same errors as a bad programmatic pedigree.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use hd_common::{Error, PersonId, Result};
use serde::Deserialize;
use tracing::debug;

use crate::pedigree::{Pedigree, Person, TraitObservation};

#[derive(Debug, Deserialize)]
struct PedigreeRow {
    name: String,
    #[serde(default)]
    mother: String,
    #[serde(default)]
    father: String,
    #[serde(rename = "trait", default)]
    trait_cell: String,
}

/// Load a pedigree from a CSV file.
pub fn load_pedigree(path: &Path) -> Result<Pedigree> {
    let file = File::open(path)?;
    let pedigree = read_pedigree(file)?;
    debug!(path = %path.display(), people = pedigree.len(), "pedigree loaded");
    Ok(pedigree)
}

/// Read a pedigree from any CSV source.
pub fn read_pedigree<R: Read>(reader: R) -> Result<Pedigree> {
    let mut csv = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut people = Vec::new();
    for (i, row) in csv.deserialize::<PedigreeRow>().enumerate() {
        // Line 1 is the header.
        let line = i + 2;
        let row = row.map_err(|e| Error::Load(format!("line {line}: {e}")))?;
        people.push(person_from_row(row, line)?);
    }
    Pedigree::new(people)
}

fn person_from_row(row: PedigreeRow, line: usize) -> Result<Person> {
    let id = PersonId::parse_optional(&row.name)
        .ok_or_else(|| Error::Load(format!("line {line}: empty name")))?;
    let observed = TraitObservation::from_cell(&row.trait_cell).ok_or_else(|| {
        Error::Load(format!(
            "line {line}: trait for {id} must be 0, 1 or blank, got {:?}",
            row.trait_cell
        ))
    })?;
    Ok(Person {
        id,
        mother: PersonId::parse_optional(&row.mother),
        father: PersonId::parse_optional(&row.father),
        observed,
    })
}
