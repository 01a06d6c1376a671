//! Reconciliation: generalizing two facts, actions or whole patterns into one.
//!
//! Where the inputs differ, fresh placeholders are minted and each side's
//! [`BindingContext`](crate::substitution::BindingContext) map records what
//! they replaced. Where they cannot be generalized without conflating
//! genuinely different situations, reconciliation returns `None`; callers
//! treat that as ordinary control flow.

pub mod action;
pub mod fact;
pub mod pattern;

pub use action::reconcile_actions;
pub use fact::{FactReconciliation, reconcile_fact_pairs, reconcile_facts};
pub use pattern::{PatternReconciliation, reconcile_patterns};
