//! Similarity ranking: find the stored pattern closest to a query pattern.
//!
//! ## Scoring
//!
//! For each stored candidate the score is the sum of:
//!
//! - every query pre-fact's best [`match_fact`] score against the candidate's
//!   pre-facts (candidates are not consumed, so two query facts may score
//!   against the same candidate fact);
//! - `+1` if the action kinds agree (both absent counts as agreeing), then per
//!   resolved argument pair `+1` if equal, `0` if both are placeholders and
//!   `-1` otherwise;
//! - the same fact scores for post-facts.
//!
//! A candidate whose action kind differs, or for which some query fact has no
//! same-name, same-arity partner, is not ranked at all.

use crate::action::Action;
use crate::fact::Fact;
use crate::matcher::match_fact;
use crate::pattern::Pattern;
use crate::store::PatternStore;
use crate::symbol::Term;

/// The best-ranked stored pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimilarityMatch<'a> {
    pub pattern: &'a Pattern,
    pub schema: &'a str,
    pub score: i32,
}

fn score_fact_list(query: &[Fact], candidates: &[Fact]) -> Option<i32> {
    query
        .iter()
        .map(|fact| match_fact(fact, candidates).map(|m| m.score))
        .sum()
}

fn score_action_args(query: &Action, candidate: &Action) -> i32 {
    query
        .resolved()
        .iter()
        .zip(candidate.resolved())
        .map(|pair| match pair {
            (a, b) if a == b => 1,
            (Some(Term::Placeholder(_)), Some(Term::Placeholder(_))) => 0,
            _ => -1,
        })
        .sum()
}

/// Score `candidate` against `query`, or `None` if it cannot be ranked.
pub fn score_pattern(query: &Pattern, candidate: &Pattern) -> Option<i32> {
    if query.action_kind() != candidate.action_kind() {
        return None;
    }

    let pre = score_fact_list(&query.pre, &candidate.pre)?;
    let action = match (&query.action, &candidate.action) {
        (Some(q), Some(c)) => 1 + score_action_args(q, c),
        _ => 1,
    };
    let post = score_fact_list(&query.post, &candidate.post)?;
    Some(pre + action + post)
}

/// The stored pattern most similar to `query`.
///
/// Candidates are visited schema by schema, in stored order; among equal
/// scores the first one visited wins. Returns `None` if the store holds no
/// rankable candidate.
pub fn most_similar<'a>(query: &Pattern, store: &'a PatternStore) -> Option<SimilarityMatch<'a>> {
    let mut best: Option<SimilarityMatch<'a>> = None;
    for schema in store.schemas() {
        for candidate in &schema.patterns {
            let Some(score) = score_pattern(query, candidate) else {
                tracing::trace!(schema = %schema.name, %candidate, "candidate not comparable");
                continue;
            };
            if best.is_none_or(|b| score > b.score) {
                best = Some(SimilarityMatch {
                    pattern: candidate,
                    schema: &schema.name,
                    score,
                });
            }
        }
    }
    best
}
