//! Gene-count (genotype) values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of copies of the variant allele a person carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum GeneCount {
    Zero,
    One,
    Two,
}

impl GeneCount {
    /// All gene counts, in ascending copy order.
    pub const ALL: [GeneCount; 3] = [GeneCount::Zero, GeneCount::One, GeneCount::Two];

    /// Number of variant copies.
    pub fn copies(self) -> u8 {
        match self {
            GeneCount::Zero => 0,
            GeneCount::One => 1,
            GeneCount::Two => 2,
        }
    }

    /// Position of this gene count in a three-entry distribution.
    pub fn index(self) -> usize {
        self.copies() as usize
    }

    pub fn from_copies(copies: u8) -> Option<Self> {
        match copies {
            0 => Some(GeneCount::Zero),
            1 => Some(GeneCount::One),
            2 => Some(GeneCount::Two),
            _ => None,
        }
    }
}

impl fmt::Display for GeneCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.copies())
    }
}

impl From<GeneCount> for u8 {
    fn from(g: GeneCount) -> Self {
        g.copies()
    }
}

impl TryFrom<u8> for GeneCount {
    type Error = String;

    fn try_from(copies: u8) -> Result<Self, Self::Error> {
        GeneCount::from_copies(copies).ok_or_else(|| format!("gene count must be 0, 1 or 2, got {copies}"))
    }
}
