//! Rule list construction: majority vote and grouping by class.
//!
//! Each distinct type gets the majority label among its rows; types landing
//! on the default class carry no information and are dropped, everything
//! else is grouped per class into a preliminary rule. Classes appear in the
//! order they are first assigned while iterating over the types.

use log::debug;

use crate::aggregate::{LabelOrder, TypeGroup};
use crate::term::Term;
use crate::types::Class;

/// Preliminary rule: all types assigned to one class, still unminimized.
#[derive(Debug, Clone)]
pub struct RuleDraft<C: Class> {
    pub class: C,
    pub terms: Vec<Term>,
}

/// Picks the default class: the caller's choice if given, otherwise the
/// globally most frequent label (ties to first-seen, see [`LabelOrder`]).
pub fn default_class<C: Class>(
    labels: &[C],
    order: &LabelOrder<C>,
    requested: Option<C>,
) -> Option<C> {
    requested.or_else(|| order.majority(labels))
}

/// Groups types by their majority class, skipping the default class.
///
/// Types keep their first-seen order inside each class, and classes keep
/// the order in which they first received a type. Classes that end up with
/// no types are simply absent.
pub fn build_rule_list<C: Class>(
    groups: &[TypeGroup<C>],
    order: &LabelOrder<C>,
    default: &C,
) -> Vec<RuleDraft<C>> {
    let mut drafts: Vec<RuleDraft<C>> = Vec::new();
    for group in groups {
        let assigned = group.majority(order);
        if assigned == *default {
            continue;
        }
        match drafts.iter_mut().find(|d| d.class == assigned) {
            Some(draft) => draft.terms.push(group.pattern.clone()),
            None => drafts.push(RuleDraft {
                class: assigned,
                terms: vec![group.pattern.clone()],
            }),
        }
    }
    debug!(
        "rule list: {} classes from {} types (default {:?})",
        drafts.len(),
        groups.len(),
        default
    );
    drafts
}
