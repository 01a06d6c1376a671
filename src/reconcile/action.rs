//! Action-level reconciliation.
//!
//! Runs after the pre-facts of two patterns have been reconciled and their
//! substitutions applied to the actions, so arguments that already occurred
//! in the pre-facts arrive as placeholders. Arguments that never appeared in
//! the pre-facts (the box something is put into, say) may still differ and
//! are generalized here.

use crate::action::Action;
use crate::substitution::BindingContext;
use crate::symbol::{Placeholder, Term};

/// Reconcile two (pre-substituted) actions, extending `ctx` with any new
/// substitutions.
///
/// - both absent: `Some(None)`, `ctx` unchanged;
/// - one absent, kinds differ, or arities differ: `None`;
/// - otherwise `Some(Some(generalized))`.
///
/// Per argument pair, equal arguments are kept. Two placeholders are kept if
/// they share a position tag and either both or neither came out of the
/// pre-fact substitutions in `ctx`. A placeholder produced by those
/// substitutions facing a concrete symbol on the other side means the two
/// actions use their arguments in different roles, and fails. Anything else
/// is generalized into a fresh, position-less placeholder pair.
pub fn reconcile_actions(
    left: Option<&Action>,
    right: Option<&Action>,
    ctx: &mut BindingContext,
) -> Option<Option<Action>> {
    let (left, right) = match (left, right) {
        (None, None) => return Some(None),
        (Some(l), Some(r)) if l.kind() == r.kind() && l.arity() == r.arity() => (l, r),
        _ => return None,
    };

    let mut fresh = BindingContext::new();
    let mut args = Vec::with_capacity(left.arity());
    let mut resolved = Vec::with_capacity(left.arity());

    let slots = left.args().iter().zip(left.resolved()).zip(right.resolved());
    for ((arg, lt), rt) in slots {
        let keep = match (lt, rt) {
            _ if lt == rt => true,
            (Some(Term::Placeholder(pl)), Some(Term::Placeholder(pr))) => {
                if pl.position != pr.position
                    || ctx.left.produced(pl) != ctx.right.produced(pr)
                {
                    tracing::trace!(action = %left.kind(), "placeholders from different contexts");
                    return None;
                }
                true
            }
            (Some(Term::Placeholder(p)), Some(Term::Symbol(_))) if ctx.left.produced(p) => {
                return None;
            }
            (Some(Term::Symbol(_)), Some(Term::Placeholder(p))) if ctx.right.produced(p) => {
                return None;
            }
            _ => false,
        };

        if keep {
            args.push(arg.clone());
            resolved.push(lt.clone());
        } else {
            let left_ph = Placeholder::new();
            let right_ph = Placeholder::new();
            if let Some(term) = lt {
                fresh.left.insert(term.clone(), left_ph.clone());
            }
            if let Some(term) = rt {
                fresh.right.insert(term.clone(), right_ph);
            }
            args.push(left_ph.label());
            resolved.push(Some(Term::Placeholder(left_ph)));
        }
    }

    ctx.merge(fresh);
    Some(Some(Action::from_parts(left.kind(), args, resolved)))
}
