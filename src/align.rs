//! Greedy one-to-one alignment of two fact lists.
//!
//! Each fact of the first list, in order, takes its best match among the
//! not-yet-taken facts of the second list. This is first-come-first-served:
//! there is no backtracking, so an early fact can claim a candidate a later
//! fact would have matched better, and the result is not a globally optimal
//! bipartite matching.

use crate::fact::Fact;
use crate::matcher::match_fact;

/// Align `left` against `right`.
///
/// Returns the matched pairs in `left` order, or `None` if any fact of `left`
/// finds no same-name, same-arity partner among the remaining facts of
/// `right`. Unclaimed facts of `right` are ignored.
pub fn align_facts<'a, 'b>(left: &'a [Fact], right: &'b [Fact]) -> Option<Vec<(&'a Fact, &'b Fact)>> {
    let mut remaining: Vec<&'b Fact> = right.iter().collect();
    let mut pairs = Vec::with_capacity(left.len());
    for fact in left {
        let found = match_fact(fact, remaining.iter().copied())?;
        pairs.push((fact, found.candidate));
        remaining.remove(found.index);
    }
    Some(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::Symbol;

    fn fact(name: &str, a: &str, b: &str) -> Fact {
        Fact::ground(name, [Symbol::new(a, "o"), Symbol::new(b, "c")])
    }

    #[test]
    fn empty_lists_align_trivially() {
        assert_eq!(align_facts(&[], &[]), Some(vec![]));
    }

    #[test]
    fn missing_partner_fails_alignment() {
        let left = vec![fact("in", "key", "box")];
        let right = vec![fact("at", "key", "room")];
        assert!(align_facts(&left, &right).is_none());
        assert!(align_facts(&left, &[]).is_none());
    }

    #[test]
    fn candidates_are_consumed() {
        let left = vec![fact("in", "key", "box"), fact("in", "map", "box")];
        let right = vec![fact("in", "key", "box")];
        assert!(align_facts(&left, &right).is_none());
    }

    #[test]
    fn pairs_follow_left_order_and_best_scores() {
        let left = vec![fact("in", "map", "box"), fact("in", "key", "box")];
        let right = vec![fact("in", "key", "box"), fact("in", "map", "box")];
        let pairs = align_facts(&left, &right).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0], (&left[0], &right[1]));
        assert_eq!(pairs[1], (&left[1], &right[0]));
    }

    #[test]
    fn greedy_choice_is_not_revisited() {
        // in(key, box) ties between both candidates and takes the first; the
        // second left fact then has to settle for the worse remaining one.
        let left = vec![fact("in", "key", "box"), fact("in", "key", "bag")];
        let right = vec![fact("in", "key", "bag"), fact("in", "pen", "box")];
        let pairs = align_facts(&left, &right).unwrap();
        assert_eq!(pairs[0].1, &right[0]);
        assert_eq!(pairs[1].1, &right[1]);
    }

    #[test]
    fn extra_right_facts_are_ignored() {
        let left = vec![fact("in", "key", "box")];
        let right = vec![fact("at", "box", "room"), fact("in", "key", "box")];
        let pairs = align_facts(&left, &right).unwrap();
        assert_eq!(pairs, vec![(&left[0], &right[1])]);
    }
}
