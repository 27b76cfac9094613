//! Type aggregation: collapsing rows into distinct boolean patterns.
//!
//! Restricted to the selected literal subset, many rows look identical. The
//! aggregator groups them into "types", one [`Term`] per distinct pattern,
//! and counts how often each class label occurs within a type. Types are
//! ephemeral: the rule list builder consumes them immediately.

use std::collections::HashMap;

use log::debug;

use crate::matrix::{Binding, BoolMatrix};
use crate::term::Term;
use crate::types::{Class, Lit};

/// Stable enumeration order of labels: first appearance in the label column.
///
/// Every tie-break in the pipeline (majority vote, default class selection)
/// resolves to the label with the smallest first-seen index, so results are
/// reproducible across runs.
#[derive(Debug, Clone)]
pub struct LabelOrder<C: Class> {
    order: Vec<C>,
    index: HashMap<C, usize>,
}

impl<C: Class> LabelOrder<C> {
    pub fn from_labels(labels: &[C]) -> Self {
        let mut order = Vec::new();
        let mut index = HashMap::new();
        for label in labels {
            if !index.contains_key(label) {
                index.insert(label.clone(), order.len());
                order.push(label.clone());
            }
        }
        Self { order, index }
    }

    /// First-seen index of a label. Labels absent from the training column
    /// sort last.
    pub fn index_of(&self, label: &C) -> usize {
        self.index.get(label).copied().unwrap_or(usize::MAX)
    }

    /// Distinct labels in first-seen order.
    pub fn labels(&self) -> &[C] {
        &self.order
    }

    /// The most frequent label in `labels`, ties resolved by first-seen
    /// index. Returns `None` only for an empty slice.
    pub fn majority(&self, labels: &[C]) -> Option<C> {
        let mut counts: HashMap<&C, usize> = HashMap::new();
        for label in labels {
            *counts.entry(label).or_insert(0) += 1;
        }
        let mut best: Option<(&C, usize)> = None;
        for (label, count) in counts {
            let better = match best {
                None => true,
                Some((current, current_count)) => {
                    count > current_count
                        || (count == current_count
                            && self.index_of(label) < self.index_of(current))
                }
            };
            if better {
                best = Some((label, count));
            }
        }
        best.map(|(label, _)| label.clone())
    }
}

/// One distinct boolean pattern with its class-frequency counts.
#[derive(Debug, Clone)]
pub struct TypeGroup<C: Class> {
    /// The pattern itself: one literal per selected variable.
    pub pattern: Term,
    counts: HashMap<C, usize>,
}

impl<C: Class> TypeGroup<C> {
    /// Rows aggregated into this type.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Observed count for one label.
    pub fn count(&self, label: &C) -> usize {
        self.counts.get(label).copied().unwrap_or(0)
    }

    /// Majority label of this type, ties resolved by the global label order.
    pub fn majority(&self, order: &LabelOrder<C>) -> C {
        let mut best: Option<(&C, usize)> = None;
        for (label, &count) in &self.counts {
            let better = match best {
                None => true,
                Some((current, current_count)) => {
                    count > current_count
                        || (count == current_count
                            && order.index_of(label) < order.index_of(current))
                }
            };
            if better {
                best = Some((label, count));
            }
        }
        best.map(|(label, _)| label.clone())
            .expect("a type group always aggregates at least one row")
    }
}

/// Collapses matrix rows (restricted to `vars`) into distinct types.
///
/// Types are returned in first-seen row order. With an empty variable
/// subset every row collapses into the single empty pattern.
pub fn aggregate_types<C: Class>(
    matrix: &BoolMatrix,
    binding: &Binding,
    vars: &[u32],
    labels: &[C],
) -> Vec<TypeGroup<C>> {
    assert_eq!(
        matrix.num_rows(),
        labels.len(),
        "label column must be aligned with the matrix"
    );

    let mut groups: Vec<TypeGroup<C>> = Vec::new();
    let mut seen: HashMap<Vec<bool>, usize> = HashMap::new();

    for row in 0..matrix.num_rows() {
        let key: Vec<bool> = vars
            .iter()
            .map(|&var| matrix.value(binding.column(var), row))
            .collect();
        let slot = *seen.entry(key.clone()).or_insert_with(|| {
            let pattern = Term::from_lits(
                vars.iter()
                    .zip(&key)
                    .map(|(&var, &value)| Lit::new(var, value)),
            );
            groups.push(TypeGroup {
                pattern,
                counts: HashMap::new(),
            });
            groups.len() - 1
        });
        *groups[slot].counts.entry(labels[row].clone()).or_insert(0) += 1;
    }

    debug!(
        "aggregated {} rows over {} literals into {} types",
        matrix.num_rows(),
        vars.len(),
        groups.len()
    );
    groups
}
