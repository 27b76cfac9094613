//! # rulekit: rule induction for tabular classifiers
//!
//! **`rulekit`** turns a labeled boolean design matrix into a compact,
//! human-readable disjunctive rule set: an ordered list of
//! term-to-class mappings with a default fallback.
//!
//! ## Pipeline
//!
//! 1. Aggregation: rows, restricted to a ranked literal subset, collapse
//!    into distinct boolean "types" with per-class counts.
//! 2. Rule list building: each type gets its majority class. Types landing
//!    on the default class are dropped, the rest are grouped per class.
//! 3. Minimization: each class's terms go through a Quine-McCluskey style
//!    prime implicant cover over the literal alphabet.
//! 4. Domain pruning: attribute semantics collapse redundant equality and
//!    threshold literals.
//! 5. Significance pruning: a greedy pass removes literals as long as an
//!    incomplete-beta score does not get worse.
//! 6. Redundancy elimination: terms entailed by a later, more general term
//!    of the same rule are dropped.
//!
//! Discretization (one-hot expansion, threshold search) and feature
//! ranking are collaborator concerns: this crate consumes their output,
//! the boolean matrix plus the [`Semantics`][semantics::Semantics] table.
//!
//! ## Quick start
//!
//! ```rust
//! use rulekit::classifier::{FitOptions, RuleSetClassifier};
//! use rulekit::matrix::BoolMatrix;
//! use rulekit::semantics::{Predicate, Semantics};
//!
//! # fn main() -> rulekit::error::Result<()> {
//! // One literal: color == red.
//! let mut semantics = Semantics::new();
//! semantics.push(
//!     "color=red",
//!     Predicate::Categorical { feature: "color".into(), value: "red".into() },
//! )?;
//!
//! let mut matrix = BoolMatrix::new();
//! matrix.add_column("color=red", vec![true, true, true, true, false, false])?;
//! let labels = vec!["yes", "yes", "yes", "no", "no", "no"];
//!
//! let mut clf = RuleSetClassifier::new(semantics);
//! clf.fit(matrix.clone(), labels, &["color=red"], FitOptions::default())?;
//!
//! let predictions = clf.predict(&matrix)?;
//! assert_eq!(predictions.len(), 6);
//! println!("{}", clf.describe()?);
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod builder;
pub mod classifier;
pub mod domain;
pub mod error;
pub mod matrix;
pub mod minimize;
pub mod redundancy;
pub mod score;
pub mod semantics;
pub mod term;
pub mod types;

pub use classifier::{FitOptions, Rule, RuleSet, RuleSetClassifier};
pub use error::{Error, Result};
pub use matrix::BoolMatrix;
pub use semantics::{Predicate, Semantics};
pub use term::Term;
pub use types::{Class, Lit};
