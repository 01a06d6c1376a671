//! Raw experience: full world states before and after a move.
//!
//! Experiences arrive as complete fact lists. Most of those facts are
//! unaffected by the move, so before learning they are usually reduced to the
//! facts that changed about the objects involved.

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::error::PatternError;
use crate::fact::Fact;
use crate::pattern::Pattern;
use crate::symbol::Term;

/// One observed step: the world before, the move, and the world after.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ExperienceRecord")]
pub struct Experience {
    pub before: Vec<Fact>,
    pub action: Option<Action>,
    pub after: Vec<Fact>,
}

/// On-disk form. The move may be given as a resolved action or as command
/// text, which is resolved against `before`.
#[derive(Deserialize)]
struct ExperienceRecord {
    #[serde(default)]
    before: Vec<Fact>,
    #[serde(default)]
    action: Option<Action>,
    #[serde(default)]
    command: Option<String>,
    #[serde(default)]
    after: Vec<Fact>,
}

impl TryFrom<ExperienceRecord> for Experience {
    type Error = PatternError;

    fn try_from(record: ExperienceRecord) -> Result<Self, Self::Error> {
        let action = match (record.action, record.command) {
            (Some(action), _) => Some(action),
            (None, Some(command)) => Some(Action::from_command(&command, &record.before)?),
            (None, None) => None,
        };
        Ok(Self {
            before: record.before,
            action,
            after: record.after,
        })
    }
}

impl Experience {
    pub fn new(before: Vec<Fact>, action: Option<Action>, after: Vec<Fact>) -> Self {
        Self {
            before,
            action,
            after,
        }
    }

    /// The experience as a pattern, either verbatim or reduced to the facts
    /// that changed (see [`diff_facts`]).
    pub fn to_pattern(&self, diff: bool) -> Pattern {
        if diff {
            let (removed, added) = diff_facts(&self.before, &self.after);
            Pattern::new(removed, self.action.clone(), added)
        } else {
            Pattern::new(self.before.clone(), self.action.clone(), self.after.clone())
        }
    }
}

fn push_unique(facts: &mut Vec<Fact>, fact: &Fact) {
    if !facts.contains(fact) {
        facts.push(fact.clone());
    }
}

/// Facts that stopped holding and facts that started holding between
/// `before` and `after`.
///
/// Only objects that appear as the first argument of some `before` fact are
/// considered. For each, in first-appearance order, every fact mentioning the
/// object anywhere is compared across the two states. Results carry no
/// duplicates and keep first-appearance order.
pub fn diff_facts(before: &[Fact], after: &[Fact]) -> (Vec<Fact>, Vec<Fact>) {
    let mut objects: Vec<&Term> = Vec::new();
    for subject in before.iter().filter_map(|f| f.args.first()) {
        if !objects.contains(&subject) {
            objects.push(subject);
        }
    }

    let mut removed = Vec::new();
    let mut added = Vec::new();
    for object in objects {
        let about = |facts: &[Fact]| -> Vec<Fact> {
            facts.iter().filter(|f| f.mentions(object)).cloned().collect()
        };
        let (was, is) = (about(before), about(after));
        for fact in was.iter().filter(|f| !is.contains(f)) {
            push_unique(&mut removed, fact);
        }
        for fact in is.iter().filter(|f| !was.contains(f)) {
            push_unique(&mut added, fact);
        }
    }
    (removed, added)
}

/// What one argument position of two facts has in common.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArgumentCommonality {
    pub name: Option<String>,
    pub kind: Option<String>,
}

/// What two facts have in common, position by position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FactCommonality {
    /// The relation name, if both facts share it.
    pub name: Option<String>,
    pub arguments: Vec<ArgumentCommonality>,
}

/// Compare two facts argument by argument.
///
/// Placeholders compare by their held value; an unbound placeholder has no
/// name or kind to share.
pub fn fact_commonalities(a: &Fact, b: &Fact) -> FactCommonality {
    let arguments = a
        .args
        .iter()
        .zip(&b.args)
        .map(|(x, y)| match (x.resolved(), y.resolved()) {
            (Some(x), Some(y)) => ArgumentCommonality {
                name: (x.name == y.name).then(|| x.name.clone()),
                kind: (x.kind == y.kind).then(|| x.kind.clone()),
            },
            _ => ArgumentCommonality::default(),
        })
        .collect();
    FactCommonality {
        name: (a.name == b.name).then(|| a.name.clone()),
        arguments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionKind;
    use crate::symbol::Symbol;

    fn fact(name: &str, a: (&str, &str), b: (&str, &str)) -> Fact {
        Fact::ground(name, [Symbol::new(a.0, a.1), Symbol::new(b.0, b.1)])
    }

    fn kitchen() -> Vec<Fact> {
        vec![
            fact("at", ("P", "P"), ("kitchen", "r")),
            fact("in", ("key", "o"), ("box", "c")),
            fact("at", ("box", "c"), ("kitchen", "r")),
            fact("at", ("chair", "o"), ("kitchen", "r")),
        ]
    }

    #[test]
    fn diff_reports_only_changed_facts() {
        let before = kitchen();
        let mut after = kitchen();
        after[1] = fact("in", ("key", "o"), ("I", "I"));

        let (removed, added) = diff_facts(&before, &after);
        assert_eq!(removed, vec![fact("in", ("key", "o"), ("box", "c"))]);
        assert_eq!(added, vec![fact("in", ("key", "o"), ("I", "I"))]);
    }

    #[test]
    fn facts_about_other_objects_are_ignored() {
        let before = vec![fact("at", ("P", "P"), ("kitchen", "r"))];
        let after = vec![
            fact("at", ("P", "P"), ("kitchen", "r")),
            fact("on", ("apple", "f"), ("table", "s")),
        ];
        let (removed, added) = diff_facts(&before, &after);
        assert!(removed.is_empty());
        assert!(added.is_empty());
    }

    #[test]
    fn facts_shared_by_two_objects_appear_once() {
        let before = vec![
            fact("in", ("key", "o"), ("box", "c")),
            fact("closed", ("box", "c"), ("box", "c")),
        ];
        let after = vec![fact("in", ("key", "o"), ("I", "I"))];
        let (removed, added) = diff_facts(&before, &after);
        assert_eq!(removed.len(), 2);
        assert_eq!(removed[0], before[0]);
        assert_eq!(added, after);
    }

    #[test]
    fn to_pattern_keeps_or_diffs_the_states() {
        let before = kitchen();
        let mut after = kitchen();
        after[0] = fact("at", ("P", "P"), ("hall", "r"));
        let go = Action::resolve(ActionKind::Go, &["hall"], &after).unwrap();
        let exp = Experience::new(before.clone(), Some(go.clone()), after.clone());

        let full = exp.to_pattern(false);
        assert_eq!(full.pre, before);
        assert_eq!(full.post, after);

        let diffed = exp.to_pattern(true);
        assert_eq!(diffed.pre, vec![fact("at", ("P", "P"), ("kitchen", "r"))]);
        assert_eq!(diffed.action, Some(go));
        assert_eq!(diffed.post, vec![fact("at", ("P", "P"), ("hall", "r"))]);
    }

    #[test]
    fn experience_accepts_command_text() {
        let json = r#"{
            "before": [{"name": "in", "args": [
                {"symbol": {"name": "key", "kind": "o"}},
                {"symbol": {"name": "box", "kind": "c"}}
            ]}],
            "command": "take key from box",
            "after": []
        }"#;
        let exp: Experience = serde_json::from_str(json).unwrap();
        let action = exp.action.unwrap();
        assert_eq!(action.kind(), ActionKind::Take);
        assert_eq!(action.resolved()[0], Some(Term::symbol("key", "o")));
    }

    #[test]
    fn experience_rejects_unknown_commands() {
        let json = r#"{"before": [], "command": "dance", "after": []}"#;
        assert!(serde_json::from_str::<Experience>(json).is_err());
    }

    #[test]
    fn commonalities_report_shared_parts() {
        let common = fact_commonalities(
            &fact("in", ("key", "o"), ("box", "c")),
            &fact("in", ("map", "o"), ("box", "c")),
        );
        assert_eq!(common.name.as_deref(), Some("in"));
        assert_eq!(common.arguments[0].name, None);
        assert_eq!(common.arguments[0].kind.as_deref(), Some("o"));
        assert_eq!(common.arguments[1].name.as_deref(), Some("box"));

        let common = fact_commonalities(
            &fact("in", ("key", "o"), ("box", "c")),
            &fact("at", ("box", "c"), ("room", "r")),
        );
        assert_eq!(common.name, None);
        assert_eq!(common.arguments[0], ArgumentCommonality::default());
    }
}
