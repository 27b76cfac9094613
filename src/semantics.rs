//! The semantics table: what each literal actually tests.
//!
//! Every variable index used by a [`Lit`] points at one [`Predicate`] here.
//! The table is built once, before fitting, and is never mutated afterwards;
//! components receive it by shared reference.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::types::Lit;

/// The condition a literal tests on a raw row.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// True iff `row[feature] == value`.
    Categorical { feature: String, value: String },
    /// True iff `row[feature] > threshold`.
    Numerical { feature: String, threshold: f64 },
}

impl Predicate {
    pub fn feature(&self) -> &str {
        match self {
            Predicate::Categorical { feature, .. } => feature,
            Predicate::Numerical { feature, .. } => feature,
        }
    }
}

/// Immutable mapping from variable index to column name and predicate.
///
/// Names double as the column names of the boolean design matrix, so a
/// variable can be resolved against any matrix carrying the same columns.
#[derive(Debug, Default, Clone)]
pub struct Semantics {
    names: Vec<String>,
    predicates: Vec<Predicate>,
    by_name: HashMap<String, u32>,
}

impl Semantics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a literal column and returns its variable index.
    pub fn push(&mut self, name: impl Into<String>, predicate: Predicate) -> Result<u32> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(Error::DuplicateColumn(name));
        }
        let var = self.names.len() as u32;
        self.by_name.insert(name.clone(), var);
        self.names.push(name);
        self.predicates.push(predicate);
        Ok(var)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn name(&self, var: u32) -> &str {
        &self.names[var as usize]
    }

    pub fn predicate(&self, var: u32) -> &Predicate {
        &self.predicates[var as usize]
    }

    /// Resolves a column name to its variable index.
    pub fn var_of(&self, name: &str) -> Option<u32> {
        self.by_name.get(name).copied()
    }

    /// Human-readable form of a literal, e.g. `color == red` or `temp <= 4.5`.
    pub fn describe(&self, lit: Lit) -> String {
        match self.predicate(lit.var()) {
            Predicate::Categorical { feature, value } => {
                let op = if lit.is_positive() { "==" } else { "!=" };
                format!("{} {} {}", feature, op, value)
            }
            Predicate::Numerical { feature, threshold } => {
                let op = if lit.is_positive() { ">" } else { "<=" };
                format!("{} {} {}", feature, op, threshold)
            }
        }
    }

    /// Does literal `a` imply literal `b`?
    ///
    /// Implication only holds between literals on the same underlying
    /// feature and with the same polarity:
    /// - categorical: the tested values must be identical;
    /// - numerical: a tighter bound implies a looser bound of the same
    ///   direction (`x > 5` implies `x > 3`; `x <= 3` implies `x <= 5`).
    pub fn implies(&self, a: Lit, b: Lit) -> bool {
        if a == b {
            return true;
        }
        if a.is_positive() != b.is_positive() {
            return false;
        }
        match (self.predicate(a.var()), self.predicate(b.var())) {
            (
                Predicate::Categorical { feature: fa, value: va },
                Predicate::Categorical { feature: fb, value: vb },
            ) => fa == fb && va == vb,
            (
                Predicate::Numerical { feature: fa, threshold: ta },
                Predicate::Numerical { feature: fb, threshold: tb },
            ) => {
                if fa != fb {
                    return false;
                }
                if a.is_positive() {
                    // x > ta implies x > tb when ta >= tb
                    ta >= tb
                } else {
                    // x <= ta implies x <= tb when ta <= tb
                    ta <= tb
                }
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Semantics {
        let mut s = Semantics::new();
        s.push(
            "color=red",
            Predicate::Categorical {
                feature: "color".into(),
                value: "red".into(),
            },
        )
        .unwrap();
        s.push(
            "color=blue",
            Predicate::Categorical {
                feature: "color".into(),
                value: "blue".into(),
            },
        )
        .unwrap();
        s.push(
            "temp>3",
            Predicate::Numerical {
                feature: "temp".into(),
                threshold: 3.0,
            },
        )
        .unwrap();
        s.push(
            "temp>5",
            Predicate::Numerical {
                feature: "temp".into(),
                threshold: 5.0,
            },
        )
        .unwrap();
        s
    }

    #[test]
    fn test_var_lookup() {
        let s = table();
        assert_eq!(s.var_of("color=red"), Some(0));
        assert_eq!(s.var_of("temp>5"), Some(3));
        assert_eq!(s.var_of("missing"), None);
        assert_eq!(s.name(2), "temp>3");
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut s = table();
        let err = s
            .push(
                "temp>3",
                Predicate::Numerical {
                    feature: "temp".into(),
                    threshold: 3.0,
                },
            )
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateColumn(_)));
    }

    #[test]
    fn test_numeric_implication() {
        let s = table();
        // x > 5 implies x > 3
        assert!(s.implies(Lit::pos(3), Lit::pos(2)));
        assert!(!s.implies(Lit::pos(2), Lit::pos(3)));
        // x <= 3 implies x <= 5
        assert!(s.implies(Lit::neg(2), Lit::neg(3)));
        assert!(!s.implies(Lit::neg(3), Lit::neg(2)));
        // no cross-polarity implication
        assert!(!s.implies(Lit::pos(3), Lit::neg(2)));
    }

    #[test]
    fn test_categorical_implication() {
        let s = table();
        assert!(s.implies(Lit::pos(0), Lit::pos(0)));
        assert!(!s.implies(Lit::pos(0), Lit::pos(1)));
        assert!(!s.implies(Lit::neg(0), Lit::neg(1)));
    }

    #[test]
    fn test_describe() {
        let s = table();
        assert_eq!(s.describe(Lit::pos(0)), "color == red");
        assert_eq!(s.describe(Lit::neg(0)), "color != red");
        assert_eq!(s.describe(Lit::pos(2)), "temp > 3");
        assert_eq!(s.describe(Lit::neg(3)), "temp <= 5");
    }
}
