//! Inference: fill a generalized pattern's placeholders from a concrete one.
//!
//! The target is typically a stored, abstract pattern and the source a
//! partial observation. Whichever parts the source supplies (pre-facts,
//! action, post-facts) are aligned with the target and used to bind the
//! target's placeholders; every occurrence of a bound placeholder in the
//! returned pattern then carries its value. This predicts effects from causes
//! and causes from effects alike.
//!
//! The target passed in is never modified. Binding happens on a private copy.

use std::collections::BTreeMap;

use crate::action::Action;
use crate::align::align_facts;
use crate::fact::Fact;
use crate::pattern::Pattern;
use crate::symbol::{PlaceholderId, Symbol, Term};

/// Values assigned to placeholders during one inference.
pub type Bindings = BTreeMap<PlaceholderId, Symbol>;

/// A target pattern with its placeholders filled where the source allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inference {
    pub pattern: Pattern,
    pub bindings: Bindings,
}

/// Bind `target` against `source` argument by argument.
///
/// A placeholder in the target takes the source's value, provided it holds no
/// other value already. A concrete target argument must equal the source's
/// value. Unbound source placeholders carry no information and only conflict
/// with concrete target arguments.
fn bind_term(target: &Term, source: &Term, bindings: &mut Bindings) -> Option<()> {
    let value = source.resolved();
    match target {
        Term::Placeholder(ph) => {
            let Some(value) = value else {
                return Some(());
            };
            let held = ph.value.as_ref().or_else(|| bindings.get(&ph.id));
            match held {
                Some(held) if held != value => {
                    tracing::trace!(placeholder = %ph.id, %held, %value, "placeholder already bound");
                    None
                }
                Some(_) => Some(()),
                None => {
                    bindings.insert(ph.id, value.clone());
                    Some(())
                }
            }
        }
        Term::Symbol(symbol) => (value == Some(symbol)).then_some(()),
    }
}

fn bind_facts(target: &[Fact], source: &[Fact], bindings: &mut Bindings) -> Option<()> {
    if source.is_empty() {
        return Some(());
    }
    if target.is_empty() {
        return None;
    }
    for (t, s) in align_facts(target, source)? {
        for (ta, sa) in t.args.iter().zip(&s.args) {
            bind_term(ta, sa, bindings)?;
        }
    }
    Some(())
}

fn bind_actions(target: Option<&Action>, source: Option<&Action>, bindings: &mut Bindings) -> Option<()> {
    let Some(source) = source else {
        return Some(());
    };
    let target = target?;
    if target.kind() != source.kind() || target.arity() != source.arity() {
        return None;
    }
    for (t, s) in target.resolved().iter().zip(source.resolved()) {
        if let (Some(t), Some(s)) = (t, s) {
            bind_term(t, s, bindings)?;
        }
    }
    Some(())
}

fn fill(term: &mut Term, bindings: &Bindings) -> Option<()> {
    if let Term::Placeholder(ph) = term
        && let Some(value) = bindings.get(&ph.id)
    {
        ph.bind(value.clone()).ok()?;
    }
    Some(())
}

/// Fill `target`'s placeholders using `source`.
///
/// Pre-facts, actions and post-facts are handled in that order, each stage
/// skipped when the source leaves it empty. Returns `None` if the source has
/// facts the target cannot align with, the action kinds or arities differ, a
/// concrete argument disagrees, or a placeholder would need two values
/// (including a copy of it that already holds a different one).
pub fn infer(target: &Pattern, source: &Pattern) -> Option<Inference> {
    let mut bindings = Bindings::new();
    bind_facts(&target.pre, &source.pre, &mut bindings)?;
    bind_actions(target.action.as_ref(), source.action.as_ref(), &mut bindings)?;
    bind_facts(&target.post, &source.post, &mut bindings)?;

    let mut pattern = target.clone();
    for fact in pattern.pre.iter_mut().chain(pattern.post.iter_mut()) {
        for arg in &mut fact.args {
            fill(arg, &bindings)?;
        }
    }
    if let Some(action) = pattern.action.as_mut() {
        for term in action.resolved_mut().iter_mut().flatten() {
            fill(term, &bindings)?;
        }
    }

    tracing::trace!(bound = bindings.len(), inferred = %pattern, "inference succeeded");
    Some(Inference { pattern, bindings })
}
