//! The rule set classifier facade.
//!
//! `fit` drives the whole pipeline: aggregate types, build the preliminary
//! per-class rule list, then for each class minimize, domain-prune,
//! significance-prune and de-duplicate its terms. The result is an ordered
//! [`RuleSet`] with a default class; `evaluate`/`predict` walk the rules in
//! order and return the first match.

use std::fmt::Write as _;

use log::debug;

use crate::aggregate::{aggregate_types, LabelOrder};
use crate::builder::{build_rule_list, default_class};
use crate::domain::simplify_term;
use crate::error::{Error, Result};
use crate::matrix::{Binding, BoolMatrix};
use crate::minimize::minimize_terms;
use crate::redundancy::drop_redundant;
use crate::score::{shrink_term, BetaSignificance};
use crate::semantics::Semantics;
use crate::term::Term;
use crate::types::Class;

/// Options controlling `fit`.
#[derive(Debug, Clone)]
pub struct FitOptions<C: Class> {
    /// Truncates the ranked literal subset to this many columns.
    pub max_literals: Option<usize>,
    /// Caller-supplied default class; otherwise the global majority label.
    pub default_class: Option<C>,
}

// Hand-written so `default()` does not require `C: Default`.
impl<C: Class> Default for FitOptions<C> {
    fn default() -> Self {
        Self {
            max_literals: None,
            default_class: None,
        }
    }
}

/// One rule: a class and the OR'd terms predicting it.
#[derive(Debug, Clone)]
pub struct Rule<C: Class> {
    pub class: C,
    pub terms: Vec<Term>,
}

/// The fitted, immutable rule list with its default class.
///
/// Rule order is prediction order: the first rule with a satisfied term
/// wins, and rows matching no rule fall back to the default class.
#[derive(Debug, Clone)]
pub struct RuleSet<C: Class> {
    pub rules: Vec<Rule<C>>,
    pub default_class: C,
}

/// Support and confidence of one term, measured on the training data.
#[derive(Debug, Clone)]
pub struct TermStats<C: Class> {
    pub class: C,
    pub term: Term,
    /// Rows satisfying the term.
    pub support: usize,
    /// Fraction of those rows carrying the rule's class.
    pub confidence: f64,
}

/// A flagged (not repaired) inconsistency in a fitted rule set.
///
/// Independent per-class pruning can leave terms that silently change
/// prediction behavior; these diagnostics surface the two known shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsistencyIssue<C: Class> {
    /// A term became empty: it matches every row reaching its rule, making
    /// its class the effective default for later rules.
    AlwaysTrueTerm { class: C, rule: usize, term: usize },
    /// The same term predicts two different classes; the earlier rule
    /// shadows the later one.
    OverlappingTerm { first: C, second: C, term: Term },
}

struct Fitted<C: Class> {
    rule_set: RuleSet<C>,
    matrix: BoolMatrix,
    labels: Vec<C>,
    binding: Binding,
}

/// Facade over the induction pipeline. Owns the semantics table and, once
/// fitted, the rule set plus the training data for stats queries.
pub struct RuleSetClassifier<C: Class> {
    semantics: Semantics,
    fitted: Option<Fitted<C>>,
}

impl<C: Class> RuleSetClassifier<C> {
    pub fn new(semantics: Semantics) -> Self {
        Self {
            semantics,
            fitted: None,
        }
    }

    pub fn semantics(&self) -> &Semantics {
        &self.semantics
    }

    /// Fits a rule set from a boolean design matrix, its label column, and
    /// the externally-ranked literal subset (ordered column names).
    ///
    /// A failed fit leaves the classifier unfitted; no partial state is
    /// retained.
    pub fn fit<S: AsRef<str>>(
        &mut self,
        matrix: BoolMatrix,
        labels: Vec<C>,
        selected: &[S],
        options: FitOptions<C>,
    ) -> Result<()> {
        self.fitted = None;

        if matrix.num_rows() == 0 || labels.is_empty() {
            return Err(Error::EmptyDataset);
        }
        if labels.len() != matrix.num_rows() {
            return Err(Error::LabelLength {
                labels: labels.len(),
                rows: matrix.num_rows(),
            });
        }

        let take = options.max_literals.unwrap_or(selected.len());
        let mut vars = Vec::with_capacity(take.min(selected.len()));
        for name in selected.iter().take(take) {
            let name = name.as_ref();
            let var = self
                .semantics
                .var_of(name)
                .ok_or_else(|| Error::UnknownLiteral(name.to_string()))?;
            vars.push(var);
        }

        let binding = matrix.bind(&self.semantics, vars.iter().copied())?;
        let order = LabelOrder::from_labels(&labels);
        let default = default_class(&labels, &order, options.default_class)
            .expect("labels are non-empty");

        let groups = aggregate_types(&matrix, &binding, &vars, &labels);
        let drafts = build_rule_list(&groups, &order, &default);

        let mut rules = Vec::with_capacity(drafts.len());
        {
            let scorer = BetaSignificance::new(&matrix, &binding, &labels);
            for draft in drafts {
                let minimized = minimize_terms(&draft.terms)?;
                let pruned: Vec<Term> = minimized
                    .iter()
                    .map(|term| {
                        let term = simplify_term(term, &self.semantics);
                        shrink_term(&term, &draft.class, &scorer)
                    })
                    .collect();
                let terms = drop_redundant(pruned, &self.semantics);
                debug!(
                    "class {:?}: {} types -> {} terms",
                    draft.class,
                    draft.terms.len(),
                    terms.len()
                );
                if !terms.is_empty() {
                    rules.push(Rule {
                        class: draft.class,
                        terms,
                    });
                }
            }
        }

        self.fitted = Some(Fitted {
            rule_set: RuleSet {
                rules,
                default_class: default,
            },
            matrix,
            labels,
            binding,
        });
        Ok(())
    }

    /// The fitted rule set.
    pub fn rule_set(&self) -> Result<&RuleSet<C>> {
        self.fitted
            .as_ref()
            .map(|f| &f.rule_set)
            .ok_or(Error::NotFitted)
    }

    /// Predicts the class of one row of `matrix`. The matrix must carry
    /// every literal column used by the fitted rules; extra columns are
    /// ignored.
    pub fn evaluate(&self, matrix: &BoolMatrix, row: usize) -> Result<C> {
        let rule_set = self.rule_set()?;
        if row >= matrix.num_rows() {
            return Err(Error::RowOutOfRange {
                row,
                rows: matrix.num_rows(),
            });
        }
        let binding = self.bind_used(matrix)?;
        Ok(rule_set.evaluate(matrix, &binding, row))
    }

    /// Predicts a label per row. Pure: no internal state changes.
    pub fn predict(&self, matrix: &BoolMatrix) -> Result<Vec<C>> {
        let rule_set = self.rule_set()?;
        let binding = self.bind_used(matrix)?;
        Ok((0..matrix.num_rows())
            .map(|row| rule_set.evaluate(matrix, &binding, row))
            .collect())
    }

    /// Support and confidence for every term, measured on the training
    /// data, in rule order.
    pub fn term_stats(&self) -> Result<Vec<TermStats<C>>> {
        let fitted = self.fitted.as_ref().ok_or(Error::NotFitted)?;
        let scorer = BetaSignificance::new(&fitted.matrix, &fitted.binding, &fitted.labels);
        let mut stats = Vec::new();
        for rule in &fitted.rule_set.rules {
            for term in &rule.terms {
                let (support, hits) = scorer.coverage(term, &rule.class);
                let confidence = if support == 0 {
                    0.0
                } else {
                    hits as f64 / support as f64
                };
                stats.push(TermStats {
                    class: rule.class.clone(),
                    term: term.clone(),
                    support,
                    confidence,
                });
            }
        }
        Ok(stats)
    }

    /// Flags known inconsistencies left by independent per-class pruning.
    /// Diagnostics only: the rule set is never altered.
    pub fn check_consistency(&self) -> Result<Vec<ConsistencyIssue<C>>> {
        Ok(self.rule_set()?.check_consistency())
    }

    /// Human-readable rendering of the fitted rule set.
    pub fn describe(&self) -> Result<String> {
        let rule_set = self.rule_set()?;
        let mut out = String::new();
        for rule in &rule_set.rules {
            for term in &rule.terms {
                writeln!(
                    out,
                    "IF {} THEN {:?}",
                    term.display(&self.semantics),
                    rule.class
                )
                .expect("writing to a String cannot fail");
            }
        }
        writeln!(out, "ELSE {:?}", rule_set.default_class)
            .expect("writing to a String cannot fail");
        Ok(out)
    }

    /// Binds exactly the variables the fitted rules mention.
    fn bind_used(&self, matrix: &BoolMatrix) -> Result<Binding> {
        let fitted = self.fitted.as_ref().ok_or(Error::NotFitted)?;
        let mut used: Vec<u32> = fitted
            .rule_set
            .rules
            .iter()
            .flat_map(|rule| rule.terms.iter().flat_map(|term| term.vars().collect::<Vec<_>>()))
            .collect();
        used.sort_unstable();
        used.dedup();
        matrix.bind(&self.semantics, used)
    }
}

impl<C: Class> RuleSet<C> {
    /// First-match evaluation over the ordered rule list.
    pub fn evaluate(&self, matrix: &BoolMatrix, binding: &Binding, row: usize) -> C {
        for rule in &self.rules {
            if rule.terms.iter().any(|term| term.holds(matrix, binding, row)) {
                return rule.class.clone();
            }
        }
        self.default_class.clone()
    }

    /// Scans the rule list for the two known inconsistency shapes: empty
    /// (always-true) terms and identical terms under different classes.
    pub fn check_consistency(&self) -> Vec<ConsistencyIssue<C>> {
        let mut issues = Vec::new();
        for (r, rule) in self.rules.iter().enumerate() {
            for (t, term) in rule.terms.iter().enumerate() {
                if term.is_empty() {
                    issues.push(ConsistencyIssue::AlwaysTrueTerm {
                        class: rule.class.clone(),
                        rule: r,
                        term: t,
                    });
                }
                for later in &self.rules[r + 1..] {
                    if later.terms.contains(term) {
                        issues.push(ConsistencyIssue::OverlappingTerm {
                            first: rule.class.clone(),
                            second: later.class.clone(),
                            term: term.clone(),
                        });
                    }
                }
            }
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantics::Predicate;
    use crate::types::Lit;

    fn categorical(feature: &str, value: &str) -> Predicate {
        Predicate::Categorical {
            feature: feature.into(),
            value: value.into(),
        }
    }

    /// The ripeness scenario: (red,yes) x3, (red,no) x1, (blue,no) x2.
    fn ripeness() -> (Semantics, BoolMatrix, Vec<&'static str>) {
        let mut s = Semantics::new();
        s.push("color=red", categorical("color", "red")).unwrap();
        let mut m = BoolMatrix::new();
        m.add_column("color=red", vec![true, true, true, true, false, false])
            .unwrap();
        let labels = vec!["yes", "yes", "yes", "no", "no", "no"];
        (s, m, labels)
    }

    #[test]
    fn test_fit_before_anything_else() {
        let (s, m, _) = ripeness();
        let clf: RuleSetClassifier<&str> = RuleSetClassifier::new(s);
        assert!(matches!(clf.rule_set(), Err(Error::NotFitted)));
        assert!(matches!(clf.predict(&m), Err(Error::NotFitted)));
        assert!(matches!(clf.term_stats(), Err(Error::NotFitted)));
    }

    #[test]
    fn test_empty_dataset_rejected() {
        let (s, _, _) = ripeness();
        let mut clf = RuleSetClassifier::new(s);
        let err = clf
            .fit(BoolMatrix::new(), Vec::<&str>::new(), &["color=red"], FitOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::EmptyDataset));
        assert!(matches!(clf.rule_set(), Err(Error::NotFitted)));
    }

    #[test]
    fn test_label_length_mismatch_rejected() {
        let (s, m, _) = ripeness();
        let mut clf = RuleSetClassifier::new(s);
        let err = clf
            .fit(m, vec!["yes"], &["color=red"], FitOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::LabelLength { labels: 1, rows: 6 }));
    }

    #[test]
    fn test_unknown_literal_rejected() {
        let (s, m, labels) = ripeness();
        let mut clf = RuleSetClassifier::new(s);
        let err = clf
            .fit(m, labels, &["color=green"], FitOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::UnknownLiteral(_)));
    }

    #[test]
    fn test_ripeness_scenario() {
        // "yes" is seen first, so the 3-3 tie makes it the default; the
        // red-majority type lands on the default and is skipped, leaving a
        // single rule for "no".
        let (s, m, labels) = ripeness();
        let mut clf = RuleSetClassifier::new(s);
        clf.fit(m.clone(), labels, &["color=red"], FitOptions::default())
            .unwrap();

        let rule_set = clf.rule_set().unwrap();
        assert_eq!(rule_set.default_class, "yes");
        assert_eq!(rule_set.rules.len(), 1);
        assert_eq!(rule_set.rules[0].class, "no");

        let predictions = clf.predict(&m).unwrap();
        // Red rows match no rule and fall back to the default.
        assert_eq!(predictions, vec!["yes", "yes", "yes", "yes", "no", "no"]);
        assert_eq!(clf.evaluate(&m, 0).unwrap(), "yes");
        assert_eq!(clf.evaluate(&m, 5).unwrap(), "no");
    }

    #[test]
    fn test_explicit_default_class() {
        let (s, m, labels) = ripeness();
        let mut clf = RuleSetClassifier::new(s);
        clf.fit(
            m,
            labels,
            &["color=red"],
            FitOptions {
                default_class: Some("no"),
                ..Default::default()
            },
        )
        .unwrap();
        let rule_set = clf.rule_set().unwrap();
        assert_eq!(rule_set.default_class, "no");
        assert_eq!(rule_set.rules.len(), 1);
        assert_eq!(rule_set.rules[0].class, "yes");
    }

    #[test]
    fn test_term_stats() {
        let (s, m, labels) = ripeness();
        let mut clf = RuleSetClassifier::new(s);
        clf.fit(m, labels, &["color=red"], FitOptions::default())
            .unwrap();
        let stats = clf.term_stats().unwrap();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].class, "no");
        // ~(color=red) covers the two blue rows, both labeled "no".
        assert_eq!(stats[0].support, 2);
        assert_eq!(stats[0].confidence, 1.0);
    }

    #[test]
    fn test_predict_missing_column() {
        let (s, m, labels) = ripeness();
        let mut clf = RuleSetClassifier::new(s);
        clf.fit(m, labels, &["color=red"], FitOptions::default())
            .unwrap();
        let empty = BoolMatrix::new();
        assert!(matches!(
            clf.predict(&empty),
            Err(Error::UnknownColumn(_))
        ));
    }

    #[test]
    fn test_describe_renders_rules() {
        let (s, m, labels) = ripeness();
        let mut clf = RuleSetClassifier::new(s);
        clf.fit(m, labels, &["color=red"], FitOptions::default())
            .unwrap();
        let text = clf.describe().unwrap();
        assert!(text.contains("IF color != red THEN \"no\""));
        assert!(text.contains("ELSE \"yes\""));
    }

    #[test]
    fn test_consistency_clean_set() {
        let (s, m, labels) = ripeness();
        let mut clf = RuleSetClassifier::new(s);
        clf.fit(m, labels, &["color=red"], FitOptions::default())
            .unwrap();
        assert!(clf.check_consistency().unwrap().is_empty());
    }

    #[test]
    fn test_forced_default_leaves_always_true_term() {
        // All rows carry "b" but the default is forced elsewhere, so both
        // types survive the vote and their terms [a] | [~a] minimize to the
        // empty term. The diagnostic flags it; prediction still walks the
        // rules in order, so every row matches "b" before the default.
        let mut s = Semantics::new();
        s.push("a", categorical("f", "a")).unwrap();
        let mut m = BoolMatrix::new();
        m.add_column("a", vec![true, true, false, false]).unwrap();
        let labels = vec!["b", "b", "b", "b"];

        let mut clf = RuleSetClassifier::new(s);
        clf.fit(
            m.clone(),
            labels,
            &["a"],
            FitOptions {
                default_class: Some("z"),
                ..Default::default()
            },
        )
        .unwrap();

        let rule_set = clf.rule_set().unwrap();
        assert_eq!(rule_set.default_class, "z");
        assert_eq!(rule_set.rules.len(), 1);
        assert_eq!(rule_set.rules[0].terms, vec![Term::new()]);

        assert_eq!(
            clf.check_consistency().unwrap(),
            vec![ConsistencyIssue::AlwaysTrueTerm {
                class: "b",
                rule: 0,
                term: 0,
            }]
        );

        // The always-true rule fires first; the default never applies.
        assert_eq!(clf.predict(&m).unwrap(), vec!["b"; 4]);
        assert!(clf.describe().unwrap().contains("IF true THEN \"b\""));
    }

    #[test]
    fn test_overlapping_term_flagged() {
        // Same term under two classes: the earlier rule shadows the later.
        let shared = Term::from_lits([Lit::pos(0)]);
        let rule_set = RuleSet {
            rules: vec![
                Rule {
                    class: "a",
                    terms: vec![shared.clone()],
                },
                Rule {
                    class: "b",
                    terms: vec![shared.clone()],
                },
            ],
            default_class: "d",
        };
        assert_eq!(
            rule_set.check_consistency(),
            vec![ConsistencyIssue::OverlappingTerm {
                first: "a",
                second: "b",
                term: shared,
            }]
        );
    }

    #[test]
    fn test_evaluate_row_out_of_range() {
        let (s, m, labels) = ripeness();
        let mut clf = RuleSetClassifier::new(s);
        clf.fit(m.clone(), labels, &["color=red"], FitOptions::default())
            .unwrap();
        assert!(matches!(
            clf.evaluate(&m, 6),
            Err(Error::RowOutOfRange { row: 6, rows: 6 })
        ));
    }

    #[test]
    fn test_max_literals_truncates_subset() {
        let mut s = Semantics::new();
        s.push("color=red", categorical("color", "red")).unwrap();
        s.push("size=big", categorical("size", "big")).unwrap();
        let mut m = BoolMatrix::new();
        m.add_column("color=red", vec![true, true, false, false])
            .unwrap();
        m.add_column("size=big", vec![true, false, true, false])
            .unwrap();
        let labels = vec!["a", "a", "b", "b"];
        let mut clf = RuleSetClassifier::new(s);
        clf.fit(
            m,
            labels,
            &["color=red", "size=big"],
            FitOptions {
                max_literals: Some(1),
                ..Default::default()
            },
        )
        .unwrap();
        // Only color=red was used, so no fitted term mentions size.
        let rule_set = clf.rule_set().unwrap();
        for rule in &rule_set.rules {
            for term in &rule.terms {
                assert!(term.vars().all(|v| v == 0));
            }
        }
    }
}
