//! Pattern-level reconciliation: pre-facts, then action, then post-facts.

use crate::align::align_facts;
use crate::fact::Fact;
use crate::pattern::Pattern;
use crate::substitution::BindingContext;

use super::action::reconcile_actions;
use super::fact::reconcile_fact_pairs;

/// A generalized pattern and the substitutions made on the way.
///
/// `bindings` holds what the pre-fact and action stages abstracted on each
/// side. The post-fact stage never contributes: a reconciliation that needs
/// new substitutions there is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternReconciliation {
    pub pattern: Pattern,
    pub bindings: BindingContext,
}

/// Generalize two experience patterns into one.
///
/// 1. Pre-fact lists must have equal length and the action kinds must agree.
/// 2. Pre-facts are aligned and reconciled.
/// 3. The resulting substitutions are applied to both actions, which are then
///    reconciled, possibly adding substitutions for arguments the pre-facts
///    never mentioned.
/// 4. All substitutions so far are applied to both sides' post-facts, which
///    are aligned and reconciled in turn.
/// 5. If step 4 had to abstract anything further, the two experiences lead to
///    different outcomes and are not merged.
///
/// Returns `None` whenever a step fails.
pub fn reconcile_patterns(left: &Pattern, right: &Pattern) -> Option<PatternReconciliation> {
    if left.pre.len() != right.pre.len() || left.action_kind() != right.action_kind() {
        return None;
    }

    let pre_pairs = align_facts(&left.pre, &right.pre)?;
    let (pre, mut ctx) = reconcile_fact_pairs(&pre_pairs)?;

    let left_action = left.action.as_ref().map(|a| a.substitute(&ctx.left));
    let right_action = right.action.as_ref().map(|a| a.substitute(&ctx.right));
    let action = reconcile_actions(left_action.as_ref(), right_action.as_ref(), &mut ctx)?;

    let left_post: Vec<Fact> = left.post.iter().map(|f| f.substitute(&ctx.left)).collect();
    let right_post: Vec<Fact> = right.post.iter().map(|f| f.substitute(&ctx.right)).collect();
    let post_pairs = align_facts(&left_post, &right_post)?;
    let (post, residual) = reconcile_fact_pairs(&post_pairs)?;

    if !residual.is_empty() {
        tracing::trace!(
            residual = residual.len(),
            "post-facts need further generalization, treating as exception"
        );
        return None;
    }

    Some(PatternReconciliation {
        pattern: Pattern::new(pre, action, post),
        bindings: ctx,
    })
}
