//! Proposition matcher: pick the best-matching fact from a candidate list.
//!
//! ## Scoring
//!
//! Candidates must share the fact's name and arity. Each positional argument
//! pair then contributes:
//!
//! - `+1` when the arguments are equal, or both are placeholders
//! - `0` when exactly one side is a placeholder
//! - `-1` when both are concrete and differ
//!
//! The first candidate with the maximal score wins.

use crate::fact::Fact;
use crate::symbol::Term;

/// The best candidate for a fact, with its position in the candidate list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactMatch<'a> {
    pub candidate: &'a Fact,
    pub index: usize,
    pub score: i32,
}

/// Score one argument pair.
pub fn score_args(a: &Term, b: &Term) -> i32 {
    match (a, b) {
        _ if a == b => 1,
        (Term::Placeholder(_), Term::Placeholder(_)) => 1,
        (Term::Placeholder(_), Term::Symbol(_)) | (Term::Symbol(_), Term::Placeholder(_)) => 0,
        (Term::Symbol(_), Term::Symbol(_)) => -1,
    }
}

/// Score two facts of the same shape.
pub fn score_facts(fact: &Fact, candidate: &Fact) -> i32 {
    fact.args
        .iter()
        .zip(&candidate.args)
        .map(|(a, b)| score_args(a, b))
        .sum()
}

/// Find the best match for `fact` among `candidates`.
///
/// Returns `None` if no candidate has the same name and arity. Ties go to the
/// earliest candidate.
pub fn match_fact<'a, I>(fact: &Fact, candidates: I) -> Option<FactMatch<'a>>
where
    I: IntoIterator<Item = &'a Fact>,
{
    let mut best: Option<FactMatch<'a>> = None;
    for (index, candidate) in candidates.into_iter().enumerate() {
        if !fact.same_shape(candidate) {
            continue;
        }
        let score = score_facts(fact, candidate);
        if best.is_none_or(|b| score > b.score) {
            best = Some(FactMatch {
                candidate,
                index,
                score,
            });
        }
    }
    best
}
