//! Fact-level reconciliation.

use crate::fact::Fact;
use crate::substitution::BindingContext;
use crate::symbol::{Placeholder, Term};

/// A generalized fact and the substitutions that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactReconciliation {
    pub fact: Fact,
    pub bindings: BindingContext,
}

/// Generalize `left` and `right` into a single fact.
///
/// Per argument position:
/// - equal arguments, or placeholders sharing a position tag, are kept as-is;
/// - placeholders with different position tags stem from unrelated
///   generalizations and make the whole reconciliation fail;
/// - anything else is replaced by a fresh placeholder tagged with the
///   position. Each side gets its own placeholder in its map; the generalized
///   fact carries the left one.
///
/// Returns `None` if names or arities differ.
pub fn reconcile_facts(left: &Fact, right: &Fact) -> Option<FactReconciliation> {
    if !left.same_shape(right) {
        return None;
    }

    let mut bindings = BindingContext::new();
    let mut args = Vec::with_capacity(left.arity());

    for (position, (a, b)) in left.args.iter().zip(&right.args).enumerate() {
        match (a, b) {
            _ if a == b => args.push(a.clone()),
            (Term::Placeholder(pa), Term::Placeholder(pb)) => {
                if pa.position != pb.position {
                    tracing::trace!(
                        fact = %left.name,
                        position,
                        "placeholders from different positions, not reconcilable"
                    );
                    return None;
                }
                args.push(a.clone());
            }
            _ => {
                let left_ph = Placeholder::at(position);
                let right_ph = Placeholder::at(position);
                args.push(Term::Placeholder(left_ph.clone()));
                bindings.record(a.clone(), left_ph, b.clone(), right_ph);
            }
        }
    }

    Some(FactReconciliation {
        fact: Fact::new(left.name.clone(), args),
        bindings,
    })
}

/// Reconcile aligned fact pairs in order.
///
/// Substitutions found for earlier pairs are applied to later pairs before
/// they are reconciled, so a symbol abstracted once is abstracted consistently
/// throughout. Returns the generalized facts and all substitutions made, or
/// `None` if any pair fails.
pub fn reconcile_fact_pairs(pairs: &[(&Fact, &Fact)]) -> Option<(Vec<Fact>, BindingContext)> {
    let mut ctx = BindingContext::new();
    let mut facts = Vec::with_capacity(pairs.len());
    for (left, right) in pairs {
        let left = left.substitute(&ctx.left);
        let right = right.substitute(&ctx.right);
        let reconciled = reconcile_facts(&left, &right)?;
        facts.push(reconciled.fact);
        ctx.merge(reconciled.bindings);
    }
    Some((facts, ctx))
}
