//! Image-schema detection: decide which schemas an experience is evidence for.
//!
//! Detection is rule-based and looks at the relation between pre- and
//! post-facts. A pattern is usually learned once under every schema detected
//! for it.

use serde::{Deserialize, Serialize};

use crate::action::ActionKind;
use crate::config::SchemataConfig;
use crate::fact::Fact;
use crate::pattern::Pattern;
use crate::symbol::Term;

/// The image schemas the learner groups patterns under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageSchema {
    Container,
    Support,
    SourcePathGoal,
    SourcePath,
    GoalPath,
    Blockage,
}

impl ImageSchema {
    pub const ALL: [ImageSchema; 6] = [
        Self::Container,
        Self::Support,
        Self::SourcePathGoal,
        Self::SourcePath,
        Self::GoalPath,
        Self::Blockage,
    ];

    /// Name the schema's patterns are stored under.
    pub fn store_name(self) -> &'static str {
        match self {
            Self::Container => "CONTAINER",
            Self::Support => "SUPPORT",
            Self::SourcePathGoal => "SOURCE_PATH_GOAL",
            Self::SourcePath => "SOURCE_PATH",
            Self::GoalPath => "GOAL_PATH",
            Self::Blockage => "BLOCKAGE",
        }
    }

    pub fn from_store_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.store_name() == name)
    }
}

impl std::fmt::Display for ImageSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.store_name())
    }
}

fn names(term: &Term, name: &str) -> bool {
    term.resolved().is_some_and(|s| s.name == name)
}

/// An object that should have moved in or out of the inventory did not.
fn object_move_blocked(before: &Fact, after: &Fact, kind: Option<ActionKind>, inventory: &str) -> bool {
    if after.name != "in" || before.args[0] != after.args[0] {
        return false;
    }
    let was_held = names(&before.args[1], inventory);
    let is_held = names(&after.args[1], inventory);
    match kind {
        Some(ActionKind::Take) => !was_held && !is_held,
        Some(ActionKind::Put) => was_held && is_held,
        _ => false,
    }
}

/// The player tried to go somewhere and stayed put.
fn player_move_blocked(before: &Fact, after: &Fact, kind: Option<ActionKind>, player: &str) -> bool {
    kind == Some(ActionKind::Go)
        && before.name == "at"
        && after.name == "at"
        && names(&before.args[0], player)
        && names(&after.args[0], player)
        && before.args[1] == after.args[1]
}

/// Image schemas `pattern` is evidence for, in detection order.
///
/// A static pattern (no action, no post-facts) is a `Container` per `in`
/// pre-fact. Otherwise every pre-fact is compared with every post-fact:
///
/// - same subject, different second argument: `SourcePath` and `GoalPath`;
/// - an inventory move the action should have caused did not happen, or the
///   player stayed in place after `go`: one `Blockage` per pre-fact and kind
///   of blockage.
///
/// Duplicates are kept since each one counts as separate evidence.
pub fn detect_schemas(pattern: &Pattern, config: &SchemataConfig) -> Vec<ImageSchema> {
    let mut schemas = Vec::new();

    if pattern.action.is_none() && pattern.post.is_empty() {
        schemas.extend(
            pattern
                .pre
                .iter()
                .filter(|f| f.name == "in")
                .map(|_| ImageSchema::Container),
        );
        return schemas;
    }

    let kind = pattern.action_kind();
    for before in pattern.pre.iter().filter(|f| f.arity() >= 2) {
        let mut object_blocked = false;
        let mut player_blocked = false;
        for after in pattern.post.iter().filter(|f| f.arity() >= 2) {
            if before.args[0] == after.args[0] && before.args[1] != after.args[1] {
                schemas.push(ImageSchema::SourcePath);
                schemas.push(ImageSchema::GoalPath);
            }
            object_blocked |= object_move_blocked(before, after, kind, &config.inventory_symbol);
            player_blocked |= player_move_blocked(before, after, kind, &config.player_symbol);
        }
        if object_blocked {
            schemas.push(ImageSchema::Blockage);
        }
        if player_blocked {
            schemas.push(ImageSchema::Blockage);
        }
    }
    schemas
}
