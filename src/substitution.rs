//! Substitution maps produced by reconciliation.
//!
//! Reconciling two facts abstracts the arguments where they differ. Each side
//! gets its own [`Substitution`] recording which original term was replaced by
//! which placeholder, so the two sides are never forced to co-refer before the
//! rest of the pattern confirms it. A [`BindingContext`] pairs the two maps and
//! is threaded by `&mut` through the pre-fact, action and post-fact stages of a
//! single pattern reconciliation.

use crate::symbol::{Placeholder, Term};

/// Original term -> placeholder that replaced it, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution {
    entries: Vec<(Term, Placeholder)>,
}

impl Substitution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `original -> placeholder`. A term substituted before keeps its
    /// slot and takes the new placeholder.
    pub fn insert(&mut self, original: Term, placeholder: Placeholder) {
        match self.entries.iter_mut().find(|(term, _)| *term == original) {
            Some((_, slot)) => *slot = placeholder,
            None => self.entries.push((original, placeholder)),
        }
    }

    pub fn get(&self, original: &Term) -> Option<&Placeholder> {
        self.entries
            .iter()
            .find(|(term, _)| term == original)
            .map(|(_, placeholder)| placeholder)
    }

    pub fn contains(&self, original: &Term) -> bool {
        self.get(original).is_some()
    }

    /// Whether `placeholder` was introduced by this substitution.
    pub fn produced(&self, placeholder: &Placeholder) -> bool {
        self.entries.iter().any(|(_, p)| p == placeholder)
    }

    /// Replace `term` by its placeholder if it was substituted, else keep it.
    pub fn apply(&self, term: &Term) -> Term {
        match self.get(term) {
            Some(placeholder) => Term::Placeholder(placeholder.clone()),
            None => term.clone(),
        }
    }

    pub fn extend(&mut self, other: Substitution) {
        for (original, placeholder) in other.entries {
            self.insert(original, placeholder);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(Term, Placeholder)> for Substitution {
    fn from_iter<I: IntoIterator<Item = (Term, Placeholder)>>(iter: I) -> Self {
        let mut sub = Self::new();
        for (original, placeholder) in iter {
            sub.insert(original, placeholder);
        }
        sub
    }
}

/// The pair of substitutions accumulated during one reconciliation call.
///
/// `left` is keyed by terms of the first input, `right` by terms of the second.
/// A context lives for exactly one call and is never shared across calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingContext {
    pub left: Substitution,
    pub right: Substitution,
}

impl BindingContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `left_original` and `right_original` were abstracted into
    /// `left_placeholder` and `right_placeholder` respectively.
    pub fn record(
        &mut self,
        left_original: Term,
        left_placeholder: Placeholder,
        right_original: Term,
        right_placeholder: Placeholder,
    ) {
        self.left.insert(left_original, left_placeholder);
        self.right.insert(right_original, right_placeholder);
    }

    pub fn merge(&mut self, other: BindingContext) {
        self.left.extend(other.left);
        self.right.extend(other.right);
    }

    /// Total number of substitutions on both sides.
    pub fn len(&self) -> usize {
        self.left.len() + self.right.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }
}
