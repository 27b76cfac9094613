//! Cross-term redundancy elimination within one rule.
//!
//! Terms of a rule are OR'd, so a term that is strictly more specific than
//! a later, more general term contributes nothing: every row it matches is
//! already matched by the general one. The entailment check knows the
//! attribute semantics, so a tighter numeric bound entails a looser one
//! even though the literals differ.

use log::debug;

use crate::semantics::Semantics;
use crate::term::Term;

/// Does every row satisfying `a` also satisfy `b`?
///
/// True iff each literal of `b` is implied by some literal of `a` on the
/// same feature and polarity. The empty term is entailed by everything.
pub fn entails(a: &Term, b: &Term, semantics: &Semantics) -> bool {
    b.lits()
        .all(|lb| a.lits().any(|la| semantics.implies(la, lb)))
}

/// Keeps only necessary terms: term `i` survives unless some later term
/// `j > i` is entailed by it. Original relative order is preserved.
///
/// Running the eliminator on its own output is a no-op.
pub fn drop_redundant(terms: Vec<Term>, semantics: &Semantics) -> Vec<Term> {
    let keep: Vec<bool> = terms
        .iter()
        .enumerate()
        .map(|(i, term)| {
            let redundant = terms[i + 1..]
                .iter()
                .any(|later| entails(term, later, semantics));
            if redundant {
                debug!("redundant term dropped: {}", term);
            }
            !redundant
        })
        .collect();
    terms
        .into_iter()
        .zip(keep)
        .filter_map(|(term, keep)| keep.then_some(term))
        .collect()
}
