//! Pattern store and learner.
//!
//! The store maps schema names (e.g. `CONTAINMENT`) to the ordered list of
//! patterns known for that schema. Insertion order is preserved for both
//! schemas and patterns, since ranking breaks ties by it.
//!
//! Learning never mutates a store in place: [`PatternStore::learn`] returns
//! the updated store and leaves `self` untouched.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SchemaResult, StoreError};
use crate::pattern::Pattern;
use crate::reconcile::reconcile_patterns;
use crate::symbol::PlaceholderId;

/// The patterns stored under one schema name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaPatterns {
    pub name: String,
    pub patterns: Vec<Pattern>,
}

/// What a call to [`PatternStore::learn`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LearnOutcome {
    /// The pattern was the empty triple; nothing changed.
    Ignored,
    /// The schema already holds this exact pattern at `index`; nothing changed.
    Known { index: usize },
    /// The schema was unknown and now holds this pattern as its first entry.
    NewSchema,
    /// No stored pattern had the same signature; appended as an independent rule.
    Appended { index: usize },
    /// The stored pattern at `index` was replaced by its generalization.
    Generalized { index: usize },
    /// Reconciliation with the pattern at `matched` failed; appended at `index`.
    Exception { matched: usize, index: usize },
}

/// Schema name -> ordered patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternStore {
    schemas: Vec<SchemaPatterns>,
}

impl PatternStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of this store with an (empty) entry for `name`, if absent.
    pub fn with_schema(&self, name: &str) -> Self {
        let mut store = self.clone();
        if store.get(name).is_none() {
            store.schemas.push(SchemaPatterns {
                name: name.to_string(),
                patterns: Vec::new(),
            });
        }
        store
    }

    /// Number of schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Total number of stored patterns across all schemas.
    pub fn pattern_count(&self) -> usize {
        self.schemas.iter().map(|s| s.patterns.len()).sum()
    }

    pub fn get(&self, name: &str) -> Option<&[Pattern]> {
        self.schemas
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.patterns.as_slice())
    }

    /// Schemas in insertion order.
    pub fn schemas(&self) -> impl Iterator<Item = &SchemaPatterns> {
        self.schemas.iter()
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut Vec<Pattern>> {
        self.schemas
            .iter_mut()
            .find(|s| s.name == name)
            .map(|s| &mut s.patterns)
    }

    /// The first pattern under `name` whose pre-fact names, action kind and
    /// post-fact names match those of `pattern`, with its index.
    pub fn matching_pattern(&self, pattern: &Pattern, name: &str) -> Option<(usize, &Pattern)> {
        self.get(name)?
            .iter()
            .enumerate()
            .find(|(_, candidate)| candidate.same_signature(pattern))
    }

    /// Incorporate `pattern` under schema `name`, returning the new store.
    pub fn learn(&self, pattern: &Pattern, name: &str) -> PatternStore {
        self.learn_with_outcome(pattern, name).0
    }

    /// Like [`learn`](Self::learn), also reporting what happened.
    ///
    /// - empty pattern: store unchanged;
    /// - pattern already stored verbatim under `name`: store unchanged;
    /// - unknown schema: pattern becomes its first entry;
    /// - no stored pattern with the same signature: appended as a new rule;
    /// - a matching pattern reconciles: it is replaced, in place, by the
    ///   generalization;
    /// - otherwise the pattern is appended verbatim as an exception.
    pub fn learn_with_outcome(&self, pattern: &Pattern, name: &str) -> (PatternStore, LearnOutcome) {
        if pattern.is_empty() {
            return (self.clone(), LearnOutcome::Ignored);
        }
        if let Some(index) = self
            .get(name)
            .and_then(|patterns| patterns.iter().position(|p| p == pattern))
        {
            tracing::trace!(schema = name, index, "pattern already stored");
            return (self.clone(), LearnOutcome::Known { index });
        }

        let mut store = self.clone();
        let matched = self
            .matching_pattern(pattern, name)
            .map(|(index, existing)| (index, reconcile_patterns(existing, pattern)));

        let Some(patterns) = store.get_mut(name) else {
            store.schemas.push(SchemaPatterns {
                name: name.to_string(),
                patterns: vec![pattern.clone()],
            });
            tracing::debug!(schema = name, %pattern, "new schema");
            return (store, LearnOutcome::NewSchema);
        };

        let outcome = match matched {
            None => {
                patterns.push(pattern.clone());
                tracing::debug!(schema = name, %pattern, "appended independent pattern");
                LearnOutcome::Appended {
                    index: patterns.len() - 1,
                }
            }
            Some((index, Some(reconciled))) => {
                tracing::debug!(
                    schema = name,
                    index,
                    generalized = %reconciled.pattern,
                    "generalized stored pattern"
                );
                patterns[index] = reconciled.pattern;
                LearnOutcome::Generalized { index }
            }
            Some((matched, None)) => {
                patterns.push(pattern.clone());
                tracing::debug!(schema = name, matched, %pattern, "appended exception");
                LearnOutcome::Exception {
                    matched,
                    index: patterns.len() - 1,
                }
            }
        };
        (store, outcome)
    }

    /// Learn every pattern in order under `name`.
    pub fn learn_all<'a>(&self, patterns: impl IntoIterator<Item = &'a Pattern>, name: &str) -> PatternStore {
        patterns
            .into_iter()
            .fold(self.clone(), |store, pattern| store.learn(pattern, name))
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Load a store written by [`save`](Self::save).
    ///
    /// Reserves every loaded placeholder id so placeholders minted afterwards
    /// cannot collide with stored ones.
    pub fn load(path: &Path) -> SchemaResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let store: PatternStore =
            serde_json::from_str(&content).map_err(|e| StoreError::Serialization {
                message: format!("failed to parse pattern store {}: {e}", path.display()),
            })?;
        if let Some(max) = store.max_placeholder_id() {
            PlaceholderId::reserve_through(max);
        }
        tracing::info!(
            path = %path.display(),
            schemas = store.len(),
            patterns = store.pattern_count(),
            "loaded pattern store"
        );
        Ok(store)
    }

    /// Write this store as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> SchemaResult<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| StoreError::Serialization {
            message: format!("failed to serialize pattern store: {e}"),
        })?;
        std::fs::write(path, json).map_err(|source| StoreError::Io {
            path: path.display().to_string(),
            source,
        })?;
        tracing::info!(path = %path.display(), schemas = self.len(), "saved pattern store");
        Ok(())
    }

    fn max_placeholder_id(&self) -> Option<PlaceholderId> {
        self.schemas
            .iter()
            .flat_map(|s| s.patterns.iter())
            .flat_map(Pattern::placeholders)
            .map(|p| p.id)
            .max()
    }
}
