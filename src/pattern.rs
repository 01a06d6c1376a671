//! Experience patterns: `(pre-facts, action, post-facts)` triples.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::action::{Action, ActionKind};
use crate::fact::Fact;
use crate::symbol::Placeholder;

/// "If `pre` held and `action` was taken, `post` holds afterwards."
///
/// Either fact list may be empty and the action may be absent, describing a
/// purely static configuration or a bare effect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pattern {
    #[serde(default)]
    pub pre: Vec<Fact>,
    #[serde(default)]
    pub action: Option<Action>,
    #[serde(default)]
    pub post: Vec<Fact>,
}

impl Pattern {
    pub fn new(pre: Vec<Fact>, action: Option<Action>, post: Vec<Fact>) -> Self {
        Self { pre, action, post }
    }

    /// The fully empty triple `([], none, [])`.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.pre.is_empty() && self.action.is_none() && self.post.is_empty()
    }

    pub fn action_kind(&self) -> Option<ActionKind> {
        self.action.as_ref().map(Action::kind)
    }

    pub fn pre_names(&self) -> BTreeSet<&str> {
        self.pre.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn post_names(&self) -> BTreeSet<&str> {
        self.post.iter().map(|f| f.name.as_str()).collect()
    }

    /// Same set of pre-fact names, same action kind, same set of post-fact names.
    pub fn same_signature(&self, other: &Pattern) -> bool {
        self.pre_names() == other.pre_names()
            && self.action_kind() == other.action_kind()
            && self.post_names() == other.post_names()
    }

    /// Every placeholder occurrence, in pre, action, post order.
    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> {
        self.pre
            .iter()
            .flat_map(Fact::placeholders)
            .chain(self.action.iter().flat_map(Action::placeholders))
            .chain(self.post.iter().flat_map(Fact::placeholders))
    }

    /// No placeholders anywhere.
    pub fn is_ground(&self) -> bool {
        self.placeholders().next().is_none()
    }
}

fn write_facts(f: &mut std::fmt::Formatter<'_>, facts: &[Fact]) -> std::fmt::Result {
    f.write_str("[")?;
    for (i, fact) in facts.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{fact}")?;
    }
    f.write_str("]")
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_facts(f, &self.pre)?;
        match &self.action {
            Some(action) => write!(f, " --{action}--> ")?,
            None => f.write_str(" --> ")?,
        }
        write_facts(f, &self.post)
    }
}
