//! Core term types: concrete symbols and the placeholders that stand in for them.
//!
//! A [`Symbol`] names a concrete entity of the simulated world. A
//! [`Placeholder`] is the abstract stand-in minted while generalizing two
//! experiences; it carries a globally unique [`PlaceholderId`], the argument
//! position it was created at, and (once inference fills it) a bound symbol.
//! [`Term`] is the sum type every fact and action argument is drawn from.

use std::num::NonZeroU64;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::PatternError;

/// A concrete, named, typed entity (e.g. `fridge` of type `c`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Symbol {
    /// Entity name as it appears in the world facts.
    pub name: String,
    /// Type tag assigned by the environment.
    pub kind: String,
}

impl Symbol {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
        }
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

// ---------------------------------------------------------------------------
// Placeholder identity
// ---------------------------------------------------------------------------

/// Next raw id to hand out, offset by one from the id itself.
static NEXT_PLACEHOLDER: AtomicU64 = AtomicU64::new(0);

/// Unique, niche-optimized identifier for a placeholder.
///
/// Ids are drawn from a process-wide counter, so two placeholders minted by
/// independent reconciliations never share an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct PlaceholderId(NonZeroU64);

impl PlaceholderId {
    /// Allocate a fresh id.
    pub fn fresh() -> Self {
        let raw = NEXT_PLACEHOLDER.fetch_add(1, Ordering::Relaxed);
        PlaceholderId(NonZeroU64::MIN.saturating_add(raw))
    }

    /// Make sure no later call to [`PlaceholderId::fresh`] returns `id` or
    /// anything below it.
    ///
    /// Called after loading persisted patterns whose ids were allocated by
    /// another process.
    pub fn reserve_through(id: PlaceholderId) {
        NEXT_PLACEHOLDER.fetch_max(id.get(), Ordering::Relaxed);
    }

    /// Get the underlying `u64` value.
    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl std::fmt::Display for PlaceholderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "?{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Placeholder
// ---------------------------------------------------------------------------

/// An abstract stand-in for a symbol inside a generalized pattern.
///
/// `position` records the argument slot the placeholder was created for, or
/// `None` when it was minted while reconciling action arguments. Placeholders
/// from different positions are never merged by reconciliation. The tag is the
/// only provenance kept: two placeholders minted independently at the same
/// position look compatible even if they generalize unrelated things.
///
/// Binding is one-way: `unbound -> bound`. Nothing ever unbinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placeholder {
    pub id: PlaceholderId,
    pub position: Option<usize>,
    pub value: Option<Symbol>,
}

impl Placeholder {
    /// A fresh, unbound placeholder with no position tag.
    pub fn new() -> Self {
        Self {
            id: PlaceholderId::fresh(),
            position: None,
            value: None,
        }
    }

    /// A fresh, unbound placeholder created for argument slot `position`.
    pub fn at(position: usize) -> Self {
        Self {
            position: Some(position),
            ..Self::new()
        }
    }

    /// A fresh placeholder already holding `value`.
    pub fn holding(value: Symbol) -> Self {
        Self {
            value: Some(value),
            ..Self::new()
        }
    }

    pub fn is_bound(&self) -> bool {
        self.value.is_some()
    }

    /// Fill this placeholder with `value`.
    ///
    /// Binding the value already held is a no-op; binding a different one is
    /// an error.
    pub fn bind(&mut self, value: Symbol) -> Result<(), PatternError> {
        match &self.value {
            Some(held) if *held != value => Err(PatternError::AlreadyBound {
                placeholder: self.id.to_string(),
                bound_to: held.to_string(),
                attempted: value.to_string(),
            }),
            Some(_) => Ok(()),
            None => {
                self.value = Some(value);
                Ok(())
            }
        }
    }

    /// The label used for this placeholder in textual action arguments.
    pub fn label(&self) -> String {
        self.id.to_string()
    }
}

impl Default for Placeholder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Placeholder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{value}"),
            None => write!(f, "{}", self.id),
        }
    }
}

// ---------------------------------------------------------------------------
// Term
// ---------------------------------------------------------------------------

/// An argument of a fact or action: either concrete or abstract.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Term {
    Symbol(Symbol),
    Placeholder(Placeholder),
}

impl Term {
    /// Shorthand for a concrete symbol term.
    pub fn symbol(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::Symbol(Symbol::new(name, kind))
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }

    pub fn as_placeholder(&self) -> Option<&Placeholder> {
        match self {
            Self::Placeholder(p) => Some(p),
            Self::Symbol(_) => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Self::Symbol(s) => Some(s),
            Self::Placeholder(_) => None,
        }
    }

    /// The concrete symbol this term denotes: itself, or a placeholder's held value.
    pub fn resolved(&self) -> Option<&Symbol> {
        match self {
            Self::Symbol(s) => Some(s),
            Self::Placeholder(p) => p.value.as_ref(),
        }
    }

    /// Name used when matching action arguments against facts.
    pub fn name(&self) -> String {
        match self {
            Self::Symbol(s) => s.name.clone(),
            Self::Placeholder(p) => p.label(),
        }
    }
}

impl From<Symbol> for Term {
    fn from(symbol: Symbol) -> Self {
        Self::Symbol(symbol)
    }
}

impl From<Placeholder> for Term {
    fn from(placeholder: Placeholder) -> Self {
        Self::Placeholder(placeholder)
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Symbol(s) => write!(f, "{s}"),
            Self::Placeholder(p) => write!(f, "{p}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_id_niche_optimization() {
        assert_eq!(
            std::mem::size_of::<Option<PlaceholderId>>(),
            std::mem::size_of::<PlaceholderId>()
        );
    }

    #[test]
    fn fresh_ids_are_unique() {
        let a = PlaceholderId::fresh();
        let b = PlaceholderId::fresh();
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn reserve_through_skips_loaded_ids() {
        let high = PlaceholderId(NonZeroU64::new(1_000_000).unwrap());
        PlaceholderId::reserve_through(high);
        assert!(PlaceholderId::fresh() > high);
    }

    #[test]
    fn unbound_placeholder_holds_nothing() {
        let vp = Placeholder::new();
        assert!(!vp.is_bound());
        assert!(vp.position.is_none());
    }

    #[test]
    fn bind_fills_once() {
        let mut vp = Placeholder::at(0);
        vp.bind(Symbol::new("bread", "f")).unwrap();
        assert_eq!(vp.value, Some(Symbol::new("bread", "f")));

        // Same value again is fine.
        vp.bind(Symbol::new("bread", "f")).unwrap();

        let err = vp.bind(Symbol::new("orange", "f")).unwrap_err();
        assert!(matches!(err, PatternError::AlreadyBound { .. }));
        assert_eq!(vp.value, Some(Symbol::new("bread", "f")));
    }

    #[test]
    fn placeholders_compare_by_identity() {
        let a = Placeholder::at(0);
        let b = Placeholder::at(0);
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn term_display() {
        assert_eq!(Term::symbol("fridge", "c").to_string(), "fridge");
        let vp = Placeholder::holding(Symbol::new("box", "c"));
        assert_eq!(Term::from(vp).to_string(), "box");
        let unbound = Placeholder::new();
        assert_eq!(Term::from(unbound.clone()).to_string(), format!("?{}", unbound.id.get()));
    }

    #[test]
    fn resolved_follows_bound_placeholders() {
        assert_eq!(
            Term::symbol("key", "o").resolved(),
            Some(&Symbol::new("key", "o"))
        );
        assert_eq!(Term::from(Placeholder::new()).resolved(), None);
        let bound = Term::from(Placeholder::holding(Symbol::new("map", "o")));
        assert_eq!(bound.resolved(), Some(&Symbol::new("map", "o")));
    }
}
