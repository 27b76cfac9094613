//! Terms: conjunctions of literals.
//!
//! A [`Term`] maps each variable it constrains to the required polarity.
//! The map representation makes the central invariant structural: a variable
//! cannot appear twice with conflicting polarities. An empty term constrains
//! nothing and is therefore always true.

use std::collections::BTreeMap;
use std::fmt;

use crate::matrix::{Binding, BoolMatrix};
use crate::semantics::Semantics;
use crate::types::Lit;

/// A conjunction of literals with set semantics.
///
/// Variables are kept in index order, which makes iteration deterministic;
/// the tie-break policies in the builder and the pruners rely on this.
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash)]
pub struct Term {
    lits: BTreeMap<u32, bool>,
}

impl Term {
    /// The empty ("always true") term.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a term from literals. A variable mentioned twice keeps the
    /// last polarity seen; callers constructing terms from observed rows
    /// never hit that case.
    pub fn from_lits(lits: impl IntoIterator<Item = Lit>) -> Self {
        let mut term = Self::new();
        for lit in lits {
            term.insert(lit);
        }
        term
    }

    pub fn insert(&mut self, lit: Lit) {
        self.lits.insert(lit.var(), lit.is_positive());
    }

    /// Removes the literal on `var`, returning its polarity if present.
    pub fn remove(&mut self, var: u32) -> Option<bool> {
        self.lits.remove(&var)
    }

    /// Copy of this term with the literal on `var` removed.
    pub fn without(&self, var: u32) -> Self {
        let mut copy = self.clone();
        copy.remove(var);
        copy
    }

    pub fn len(&self) -> usize {
        self.lits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lits.is_empty()
    }

    /// Required polarity for `var`, if this term constrains it.
    pub fn polarity(&self, var: u32) -> Option<bool> {
        self.lits.get(&var).copied()
    }

    pub fn contains(&self, lit: Lit) -> bool {
        self.polarity(lit.var()) == Some(lit.is_positive())
    }

    /// Literals in variable-index order.
    pub fn lits(&self) -> impl Iterator<Item = Lit> + '_ {
        self.lits.iter().map(|(&var, &pos)| Lit::new(var, pos))
    }

    /// Constrained variables in index order.
    pub fn vars(&self) -> impl Iterator<Item = u32> + '_ {
        self.lits.keys().copied()
    }

    /// Is every literal of this term present in `other`?
    pub fn is_subset_of(&self, other: &Term) -> bool {
        self.lits().all(|lit| other.contains(lit))
    }

    /// Evaluates the term on one matrix row. The empty term holds on every
    /// row.
    pub fn holds(&self, matrix: &BoolMatrix, binding: &Binding, row: usize) -> bool {
        self.lits()
            .all(|lit| matrix.value(binding.column(lit.var()), row) == lit.is_positive())
    }

    /// Evaluates the term under an explicit assignment of all variables,
    /// given in the same order as `vars`. Used by equivalence checks.
    pub fn holds_under(&self, vars: &[u32], assignment: &[bool]) -> bool {
        self.lits().all(|lit| {
            vars.iter()
                .position(|&v| v == lit.var())
                .map(|i| assignment[i] == lit.is_positive())
                .unwrap_or(false)
        })
    }

    /// Display adaptor rendering literals through the semantics table.
    pub fn display<'a>(&'a self, semantics: &'a Semantics) -> TermDisplay<'a> {
        TermDisplay {
            term: self,
            semantics,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "true");
        }
        let mut first = true;
        for lit in self.lits() {
            if !first {
                write!(f, " & ")?;
            }
            write!(f, "{}", lit)?;
            first = false;
        }
        Ok(())
    }
}

/// Pretty form of a term, e.g. `color == red AND temp > 4.5`.
pub struct TermDisplay<'a> {
    term: &'a Term,
    semantics: &'a Semantics,
}

impl fmt::Display for TermDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.term.is_empty() {
            return write!(f, "true");
        }
        let mut first = true;
        for lit in self.term.lits() {
            if !first {
                write!(f, " AND ")?;
            }
            write!(f, "{}", self.semantics.describe(lit))?;
            first = false;
        }
        Ok(())
    }
}
