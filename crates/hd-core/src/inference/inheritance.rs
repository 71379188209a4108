//! Inheritance model.
//!
//! Each parent hands one allele to the child. A homozygous parent hands down
//! the allele it carries, flipped with probability `mutation`. A heterozygous
//! parent hands down either allele with probability 0.5 and mutation is not
//! applied; this simplification is part of the model and must be kept.

use hd_common::GeneCount;

/// Probability that a parent with `parent` copies does (or does not) pass on
/// the variant allele.
pub fn transmit_probability(parent: GeneCount, transmits_variant: bool, mutation: f64) -> f64 {
    match (parent, transmits_variant) {
        (GeneCount::Two, true) | (GeneCount::Zero, false) => 1.0 - mutation,
        (GeneCount::Two, false) | (GeneCount::Zero, true) => mutation,
        (GeneCount::One, _) => 0.5,
    }
}

/// Probability that a child of parents with `mother` and `father` copies ends
/// up with exactly `child` copies.
pub fn child_gene_probability(
    child: GeneCount,
    mother: GeneCount,
    father: GeneCount,
    mutation: f64,
) -> f64 {
    let m = |passes| transmit_probability(mother, passes, mutation);
    let f = |passes| transmit_probability(father, passes, mutation);
    match child {
        GeneCount::Two => m(true) * f(true),
        GeneCount::One => m(true) * f(false) + m(false) * f(true),
        GeneCount::Zero => m(false) * f(false),
    }
}
