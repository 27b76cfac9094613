//! Significance scoring and greedy literal pruning.
//!
//! A term is worth keeping when its precision on the training data is
//! unlikely to arise by chance. The score used here is a one-sided p-value
//! style statistic built from the regularized incomplete beta function:
//! the probability that a term with the same coverage, drawing positives
//! at the global base rate, would match at least as many rows of the
//! target class. Lower is better.
//!
//! [`shrink_term`] is a greedy hill-climber over that score, implemented
//! against the [`TermScore`] strategy trait so alternative statistics can
//! be plugged in without touching the search loop.

use log::debug;
use statrs::function::beta::beta_reg;

use crate::matrix::{Binding, BoolMatrix};
use crate::term::Term;
use crate::types::Class;

/// Scoring strategy for candidate terms; minimized by [`shrink_term`].
pub trait TermScore<C: Class> {
    fn score(&self, term: &Term, class: &C) -> f64;
}

/// Incomplete-beta significance against the training data.
///
/// For a term with coverage `t_count` and `p_count` class hits, on a
/// dataset with `total` rows of which `positives` carry the class:
///
/// ```text
/// score = I_{positives/total}(p_count, t_count - p_count + 1)
/// ```
pub struct BetaSignificance<'a, C: Class> {
    matrix: &'a BoolMatrix,
    binding: &'a Binding,
    labels: &'a [C],
}

impl<'a, C: Class> BetaSignificance<'a, C> {
    pub fn new(matrix: &'a BoolMatrix, binding: &'a Binding, labels: &'a [C]) -> Self {
        assert_eq!(
            matrix.num_rows(),
            labels.len(),
            "label column must be aligned with the matrix"
        );
        Self {
            matrix,
            binding,
            labels,
        }
    }

    /// Rows satisfying the term, and those also carrying the class.
    pub fn coverage(&self, term: &Term, class: &C) -> (usize, usize) {
        let mut t_count = 0;
        let mut p_count = 0;
        for row in 0..self.matrix.num_rows() {
            if term.holds(self.matrix, self.binding, row) {
                t_count += 1;
                if self.labels[row] == *class {
                    p_count += 1;
                }
            }
        }
        (t_count, p_count)
    }
}

impl<C: Class> TermScore<C> for BetaSignificance<'_, C> {
    fn score(&self, term: &Term, class: &C) -> f64 {
        let (t_count, p_count) = self.coverage(term, class);
        if p_count == 0 {
            // I_x(0, b) = 1: a term with no class hits is maximally
            // insignificant. beta_reg itself requires a > 0.
            return 1.0;
        }
        let total = self.labels.len();
        let positives = self.labels.iter().filter(|l| **l == *class).count();
        let base_rate = positives as f64 / total as f64;
        beta_reg(
            p_count as f64,
            (t_count - p_count + 1) as f64,
            base_rate,
        )
    }
}

/// Greedily removes literals while the score does not get worse.
///
/// Each pass scores the term with every single literal removed and drops
/// the literal giving the best (smallest) score, as long as that score does
/// not exceed the current one; removals that leave the score unchanged are
/// taken too, since the shorter term is more general at no cost. Terminates
/// because the term strictly shrinks; the result's literal set is always a
/// subset of the input's, possibly empty.
pub fn shrink_term<C: Class>(term: &Term, class: &C, scorer: &impl TermScore<C>) -> Term {
    let mut current = term.clone();
    let mut best = scorer.score(&current, class);
    debug!("shrink: start {} (score {:.6})", current, best);

    loop {
        let mut candidate: Option<(u32, f64)> = None;
        for lit in current.lits() {
            let score = scorer.score(&current.without(lit.var()), class);
            let better = match candidate {
                None => score <= best,
                Some((_, leader)) => score < leader,
            };
            if better {
                candidate = Some((lit.var(), score));
            }
        }
        match candidate {
            Some((var, score)) => {
                current.remove(var);
                best = score;
                debug!("shrink: dropped x{} -> {} (score {:.6})", var, current, best);
            }
            None => break,
        }
    }
    current
}
