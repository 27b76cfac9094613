//! Boolean minimization of a class's term list (Quine-McCluskey family).
//!
//! The input terms all share one literal shape: they originate from
//! fixed-width types, so every term constrains exactly the same variables.
//! Minimization proceeds in two phases:
//!
//! 1. **Prime implicant generation.** Two implicants that constrain the
//!    same variables and differ in exactly one polarity merge into one
//!    implicant with that variable dropped ("don't care"). Merging repeats
//!    level by level until nothing merges; implicants that never merged at
//!    some level are prime.
//! 2. **Cover selection.** Every prime that is the unique coverer of some
//!    original term is essential and must be kept. Remaining uncovered
//!    terms are covered greedily by the prime covering the most of them,
//!    ties resolved by generation order.
//!
//! Unlike the textbook algorithm, terms are sparse maps from variable index
//! to polarity rather than fixed-width bit vectors: the literal alphabet is
//! chosen dynamically per fit, so there is no natural bit layout.

use std::collections::{BTreeSet, HashMap};

use log::debug;

use crate::error::{Error, Result};
use crate::term::Term;

/// An implicant under construction: a term plus the set of original term
/// indices it covers.
#[derive(Debug, Clone)]
struct Implicant {
    term: Term,
    covers: BTreeSet<usize>,
}

/// Attempts to merge two implicants differing in exactly one polarity.
///
/// Both must constrain the same variable set; the result drops the single
/// differing variable.
fn merge(a: &Term, b: &Term) -> Option<Term> {
    if a.len() != b.len() {
        return None;
    }
    let mut differing = None;
    for lit in a.lits() {
        match b.polarity(lit.var()) {
            None => return None,
            Some(polarity) if polarity != lit.is_positive() => {
                if differing.is_some() {
                    return None;
                }
                differing = Some(lit.var());
            }
            Some(_) => {}
        }
    }
    differing.map(|var| a.without(var))
}

/// Minimizes a disjunction of same-shape terms into an equivalent, usually
/// smaller, disjunction.
///
/// A single input term is returned unchanged; mismatched literal shapes are
/// a contract violation and fail with [`Error::ShapeMismatch`].
pub fn minimize_terms(terms: &[Term]) -> Result<Vec<Term>> {
    if terms.len() <= 1 {
        return Ok(terms.to_vec());
    }

    // Shape precondition: identical variable sets across all terms.
    let shape: Vec<u32> = terms[0].vars().collect();
    for term in &terms[1..] {
        if term.len() != shape.len() || !term.vars().eq(shape.iter().copied()) {
            return Err(Error::ShapeMismatch);
        }
    }

    let mut primes: Vec<Implicant> = Vec::new();
    let mut level: Vec<Implicant> = terms
        .iter()
        .enumerate()
        .map(|(i, term)| Implicant {
            term: term.clone(),
            covers: BTreeSet::from([i]),
        })
        .collect();

    let mut round = 0;
    while !level.is_empty() {
        let mut merged = vec![false; level.len()];
        let mut next: Vec<Implicant> = Vec::new();
        let mut slots: HashMap<Term, usize> = HashMap::new();

        for i in 0..level.len() {
            for j in (i + 1)..level.len() {
                let Some(term) = merge(&level[i].term, &level[j].term) else {
                    continue;
                };
                merged[i] = true;
                merged[j] = true;
                let covers: BTreeSet<usize> = level[i]
                    .covers
                    .union(&level[j].covers)
                    .copied()
                    .collect();
                match slots.get(&term) {
                    Some(&slot) => next[slot].covers.extend(covers),
                    None => {
                        slots.insert(term.clone(), next.len());
                        next.push(Implicant { term, covers });
                    }
                }
            }
        }

        for (i, implicant) in level.into_iter().enumerate() {
            if merged[i] {
                continue;
            }
            // The same prime can fall out of different merge paths.
            match primes.iter_mut().find(|p| p.term == implicant.term) {
                Some(prime) => prime.covers.extend(implicant.covers),
                None => primes.push(implicant),
            }
        }

        round += 1;
        debug!(
            "merge round {}: {} implicants, {} primes so far",
            round,
            next.len(),
            primes.len()
        );
        level = next;
    }

    Ok(select_cover(&primes, terms.len()))
}

/// Essential-first cover selection over the generated primes.
fn select_cover(primes: &[Implicant], num_terms: usize) -> Vec<Term> {
    let mut selected: Vec<usize> = Vec::new();
    let mut covered = vec![false; num_terms];

    // Essential primes: unique coverer of at least one original term.
    for t in 0..num_terms {
        let mut coverers = primes.iter().enumerate().filter(|(_, p)| p.covers.contains(&t));
        if let (Some((idx, _)), None) = (coverers.next(), coverers.next()) {
            if !selected.contains(&idx) {
                selected.push(idx);
                for &c in &primes[idx].covers {
                    covered[c] = true;
                }
            } else {
                covered[t] = true;
            }
        }
    }

    // Greedy: repeatedly take the prime covering the most uncovered terms.
    while covered.iter().any(|&c| !c) {
        let mut best: Option<(usize, usize)> = None;
        for (idx, prime) in primes.iter().enumerate() {
            if selected.contains(&idx) {
                continue;
            }
            let gain = prime.covers.iter().filter(|&&c| !covered[c]).count();
            if gain > 0 && best.map_or(true, |(_, g)| gain > g) {
                best = Some((idx, gain));
            }
        }
        let (idx, _) = best.expect("every original term is covered by some prime");
        selected.push(idx);
        for &c in &primes[idx].covers {
            covered[c] = true;
        }
    }

    debug!("cover: {} of {} primes selected", selected.len(), primes.len());
    selected.into_iter().map(|idx| primes[idx].term.clone()).collect()
}
