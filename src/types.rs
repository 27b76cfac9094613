//! Core value types: literals and class labels.
//!
//! A [`Lit`] is a handle to one boolean proposition (a column of the design
//! matrix) together with a polarity. What the proposition *means* lives in
//! the [`Semantics`][crate::semantics::Semantics] table; a `Lit` itself is
//! just an index plus a sign, cheap to copy and compare.

use std::fmt;
use std::hash::Hash;
use std::ops::Neg;

/// A propositional literal: a variable index with a polarity.
///
/// Positive polarity asserts the proposition holds, negative polarity
/// asserts it does not. Negation is available via the unary `-` operator.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Lit {
    var: u32,
    positive: bool,
}

impl Lit {
    pub const fn new(var: u32, positive: bool) -> Self {
        Self { var, positive }
    }

    /// Positive literal for the given variable.
    pub const fn pos(var: u32) -> Self {
        Self::new(var, true)
    }

    /// Negative literal for the given variable.
    pub const fn neg(var: u32) -> Self {
        Self::new(var, false)
    }

    /// Index of the underlying variable in the semantics table.
    pub const fn var(self) -> u32 {
        self.var
    }

    pub const fn is_positive(self) -> bool {
        self.positive
    }
}

impl Neg for Lit {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(self.var, !self.positive)
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", if self.positive { "" } else { "~" }, self.var)
    }
}

/// Trait alias for types usable as class labels.
///
/// Labels can be any hashable, comparable, cloneable value; a blanket impl
/// covers every type that satisfies the bounds.
pub trait Class: Eq + Hash + Clone + fmt::Debug {}

impl<T: Eq + Hash + Clone + fmt::Debug> Class for T {}
