//! Agent moves: action kinds, their command templates, and resolved arguments.

use serde::{Deserialize, Serialize};

use crate::error::PatternError;
use crate::fact::Fact;
use crate::substitution::Substitution;
use crate::symbol::{Placeholder, Term};

// ---------------------------------------------------------------------------
// Action kind
// ---------------------------------------------------------------------------

/// The command vocabulary understood by the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Go,
    Look,
    Open,
    Close,
    Take,
    Lock,
    Unlock,
    Put,
    Insert,
    Drop,
    Eat,
    Examine,
    Inventory,
    Yes,
}

impl ActionKind {
    /// Argument counts this kind accepts.
    pub fn arities(self) -> &'static [usize] {
        match self {
            Self::Look | Self::Inventory | Self::Yes => &[0],
            Self::Go | Self::Open | Self::Close | Self::Drop | Self::Eat | Self::Examine => &[1],
            Self::Take | Self::Lock | Self::Unlock => &[1, 2],
            Self::Put | Self::Insert => &[2],
        }
    }

    /// Command template for `arity` arguments, `{0}`/`{1}` marking the slots.
    pub fn template(self, arity: usize) -> Option<&'static str> {
        let template = match (self, arity) {
            (Self::Go, 1) => "go {0}",
            (Self::Look, 0) => "look",
            (Self::Open, 1) => "open {0}",
            (Self::Close, 1) => "close {0}",
            (Self::Take, 1) => "take {0}",
            (Self::Take, 2) => "take {0} from {1}",
            (Self::Lock, 1) => "lock {0}",
            (Self::Lock, 2) => "lock {0} with {1}",
            (Self::Unlock, 1) => "unlock {0}",
            (Self::Unlock, 2) => "unlock {0} with {1}",
            (Self::Put, 2) => "put {0} on {1}",
            (Self::Insert, 2) => "insert {0} into {1}",
            (Self::Drop, 1) => "drop {0}",
            (Self::Eat, 1) => "eat {0}",
            (Self::Examine, 1) => "examine {0}",
            (Self::Inventory, 0) => "inventory",
            (Self::Yes, 0) => "YES",
            _ => return None,
        };
        Some(template)
    }

    /// Word separating the two arguments of a two-argument command, if any.
    pub fn separator(self) -> Option<&'static str> {
        match self {
            Self::Take => Some("from"),
            Self::Put => Some("on"),
            Self::Lock | Self::Unlock => Some("with"),
            Self::Insert => Some("into"),
            _ => None,
        }
    }

    /// Parse a kind from its command verb.
    pub fn parse(verb: &str) -> Option<Self> {
        let kind = match verb.to_lowercase().as_str() {
            "go" => Self::Go,
            "look" => Self::Look,
            "open" => Self::Open,
            "close" => Self::Close,
            "take" => Self::Take,
            "lock" => Self::Lock,
            "unlock" => Self::Unlock,
            "put" => Self::Put,
            "insert" => Self::Insert,
            "drop" => Self::Drop,
            "eat" => Self::Eat,
            "examine" => Self::Examine,
            "inventory" => Self::Inventory,
            "yes" => Self::Yes,
            _ => return None,
        };
        Some(kind)
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verb = match self {
            Self::Go => "go",
            Self::Look => "look",
            Self::Open => "open",
            Self::Close => "close",
            Self::Take => "take",
            Self::Lock => "lock",
            Self::Unlock => "unlock",
            Self::Put => "put",
            Self::Insert => "insert",
            Self::Drop => "drop",
            Self::Eat => "eat",
            Self::Examine => "examine",
            Self::Inventory => "inventory",
            Self::Yes => "YES",
        };
        f.write_str(verb)
    }
}

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// A named move with textual argument slots and their resolved terms.
///
/// `resolved[i]` is the term `args[i]` refers to, or `None` when the name
/// could not be looked up. Both lists always have the same length and that
/// length is an arity accepted by `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawAction")]
pub struct Action {
    kind: ActionKind,
    args: Vec<String>,
    resolved: Vec<Option<Term>>,
}

#[derive(Deserialize)]
struct RawAction {
    kind: ActionKind,
    args: Vec<String>,
    resolved: Vec<Option<Term>>,
}

impl TryFrom<RawAction> for Action {
    type Error = PatternError;

    fn try_from(raw: RawAction) -> Result<Self, Self::Error> {
        Action::new(raw.kind, raw.args, raw.resolved)
    }
}

impl Action {
    /// Create an action, checking that both argument lists agree with each
    /// other and with the kind's template.
    pub fn new(
        kind: ActionKind,
        args: Vec<String>,
        resolved: Vec<Option<Term>>,
    ) -> Result<Self, PatternError> {
        if args.len() != resolved.len() {
            return Err(PatternError::ArityMismatch {
                kind: kind.to_string(),
                args: args.len(),
                resolved: resolved.len(),
            });
        }
        if !kind.arities().contains(&args.len()) {
            return Err(PatternError::UnsupportedArity {
                kind: kind.to_string(),
                arity: args.len(),
                expected: format!("{:?} argument(s)", kind.arities()),
            });
        }
        Ok(Self {
            kind,
            args,
            resolved,
        })
    }

    /// Create an action whose arguments are all resolved terms.
    pub fn with_terms(kind: ActionKind, terms: Vec<Term>) -> Result<Self, PatternError> {
        let args = terms.iter().map(Term::name).collect();
        let resolved = terms.into_iter().map(Some).collect();
        Self::new(kind, args, resolved)
    }

    /// Create an action from textual arguments, resolving each against the
    /// arguments of `facts` by name. The first occurrence wins; names that
    /// appear nowhere stay unresolved.
    pub fn resolve(kind: ActionKind, args: &[&str], facts: &[Fact]) -> Result<Self, PatternError> {
        let resolved = args
            .iter()
            .map(|name| {
                facts
                    .iter()
                    .flat_map(|fact| fact.args.iter())
                    .find(|term| term.resolved().is_some_and(|s| s.name == *name))
                    .cloned()
            })
            .collect();
        Self::new(kind, args.iter().map(|a| a.to_string()).collect(), resolved)
    }

    /// Parse a command such as `take key from box` and resolve its arguments
    /// against `facts` as [`Action::resolve`] does.
    ///
    /// Multi-word names (`living room`) are kept whole; only the kind's
    /// separator word splits a two-argument command.
    pub fn from_command(command: &str, facts: &[Fact]) -> Result<Self, PatternError> {
        let unknown = || PatternError::UnknownCommand {
            command: command.to_string(),
        };
        let mut words = command.split_whitespace();
        let kind = words.next().and_then(ActionKind::parse).ok_or_else(unknown)?;
        let words: Vec<&str> = words.collect();

        let split = kind
            .separator()
            .and_then(|sep| words.iter().position(|w| *w == sep));
        let args = match split {
            Some(at) => vec![words[..at].join(" "), words[at + 1..].join(" ")],
            None if words.is_empty() => Vec::new(),
            None => vec![words.join(" ")],
        };
        if args.iter().any(String::is_empty) {
            return Err(unknown());
        }
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        Self::resolve(kind, &args, facts)
    }

    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn resolved(&self) -> &[Option<Term>] {
        &self.resolved
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }

    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> {
        self.resolved
            .iter()
            .filter_map(|r| r.as_ref().and_then(Term::as_placeholder))
    }

    /// Copy of this action with every substituted resolved argument replaced.
    /// The textual slot of a replaced argument takes the placeholder's label.
    pub fn substitute(&self, substitution: &Substitution) -> Action {
        let mut args = Vec::with_capacity(self.args.len());
        let mut resolved = Vec::with_capacity(self.resolved.len());
        for (arg, term) in self.args.iter().zip(&self.resolved) {
            match term.as_ref().and_then(|t| substitution.get(t)) {
                Some(placeholder) => {
                    args.push(placeholder.label());
                    resolved.push(Some(Term::Placeholder(placeholder.clone())));
                }
                None => {
                    args.push(arg.clone());
                    resolved.push(term.clone());
                }
            }
        }
        Action {
            kind: self.kind,
            args,
            resolved,
        }
    }

    /// Rebuild an action of the same kind from already validated parts.
    pub(crate) fn from_parts(
        kind: ActionKind,
        args: Vec<String>,
        resolved: Vec<Option<Term>>,
    ) -> Self {
        debug_assert_eq!(args.len(), resolved.len());
        Self {
            kind,
            args,
            resolved,
        }
    }

    /// Mutable access to resolved arguments, for binding placeholders in place.
    pub(crate) fn resolved_mut(&mut self) -> &mut [Option<Term>] {
        &mut self.resolved
    }

    /// Render the command text, e.g. `insert key into box`.
    ///
    /// Resolved arguments take precedence over textual ones so that bound
    /// placeholders render as their values.
    pub fn command(&self) -> String {
        let mut command = self
            .kind
            .template(self.arity())
            .unwrap_or_default()
            .to_string();
        for (i, (arg, term)) in self.args.iter().zip(&self.resolved).enumerate() {
            let text = match term {
                Some(term) => term.to_string(),
                None => arg.clone(),
            };
            command = command.replace(&format!("{{{i}}}"), &text);
        }
        command
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.command())
    }
}
