//! Domain-knowledge simplification of a single term.
//!
//! Minimization works on literals as opaque booleans; this pass exploits
//! what the literals mean. Under one-hot semantics two positive equality
//! tests on the same feature are contradictory, and among threshold tests
//! on one feature only the tightest bound in each direction matters. The
//! pass is pure and idempotent.

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::semantics::{Predicate, Semantics};
use crate::term::Term;
use crate::types::Lit;

/// Drops literals made redundant by attribute semantics:
///
/// - categorical features keep at most one positive equality literal (the
///   first in variable order); negative literals are kept as-is;
/// - numerical features keep only the largest positive threshold (tightest
///   lower bound) and the smallest negative threshold (tightest upper
///   bound).
pub fn simplify_term(term: &Term, semantics: &Semantics) -> Term {
    // (feature, direction) -> (var, threshold) of the tightest bound so far
    let mut bounds: HashMap<(String, bool), (u32, f64)> = HashMap::new();
    let mut categorical_positive: HashSet<String> = HashSet::new();
    let mut simplified = Term::new();

    for lit in term.lits() {
        match semantics.predicate(lit.var()) {
            Predicate::Categorical { feature, .. } => {
                if lit.is_positive() {
                    if categorical_positive.insert(feature.clone()) {
                        simplified.insert(lit);
                    }
                } else {
                    simplified.insert(lit);
                }
            }
            Predicate::Numerical { feature, threshold } => {
                let key = (feature.clone(), lit.is_positive());
                let tighter = match bounds.get(&key) {
                    None => true,
                    // positive: x > t, larger t is tighter;
                    // negative: x <= t, smaller t is tighter.
                    Some(&(_, best)) => {
                        if lit.is_positive() {
                            *threshold > best
                        } else {
                            *threshold < best
                        }
                    }
                };
                if tighter {
                    bounds.insert(key, (lit.var(), *threshold));
                }
            }
        }
    }

    for ((_, positive), (var, _)) in bounds {
        simplified.insert(Lit::new(var, positive));
    }

    if simplified.len() < term.len() {
        debug!("domain pruning: {} -> {} literals", term.len(), simplified.len());
    }
    simplified
}
