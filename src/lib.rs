// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # schemata
//!
//! A symbolic learner that generalizes observed `(pre-facts, action,
//! post-facts)` experiences into abstract patterns grouped under image
//! schemas, and uses those patterns to predict effects or causes of new
//! situations.
//!
//! ## Architecture
//!
//! - **Terms** (`symbol`, `fact`, `action`, `pattern`): symbols, placeholders,
//!   facts, actions and experience patterns
//! - **Matching** (`matcher`, `align`): score facts and pair up fact lists
//! - **Reconciliation** (`reconcile`): anti-unify two patterns into one
//! - **Learning** (`store`): copy-on-write pattern store keyed by schema name
//! - **Ranking and inference** (`similarity`, `infer`): retrieve the closest
//!   stored pattern and fill its placeholders from a partial observation
//! - **Ingestion** (`experience`, `detect`): diff raw world states and detect
//!   which image schemas they are evidence for
//!
//! ## Library usage
//!
//! ```
//! use schemata::fact::Fact;
//! use schemata::infer::infer;
//! use schemata::pattern::Pattern;
//! use schemata::similarity::most_similar;
//! use schemata::store::PatternStore;
//! use schemata::symbol::Symbol;
//!
//! let in_fridge = |food: &str| {
//!     Fact::ground("in", [Symbol::new(food, "f"), Symbol::new("fridge", "c")])
//! };
//! let stay = |fact: Fact| Pattern::new(vec![fact.clone()], None, vec![fact]);
//!
//! let store = PatternStore::new()
//!     .learn(&stay(in_fridge("orange")), "CONTAINER")
//!     .learn(&stay(in_fridge("bread")), "CONTAINER");
//!
//! let query = Pattern::new(vec![in_fridge("carrot")], None, vec![]);
//! let best = most_similar(&query, &store).unwrap();
//! let inferred = infer(best.pattern, &query).unwrap();
//! assert_eq!(inferred.pattern.post[0].to_string(), "in(carrot, fridge)");
//! ```

pub mod action;
pub mod align;
pub mod config;
pub mod detect;
pub mod error;
pub mod experience;
pub mod fact;
pub mod infer;
pub mod matcher;
pub mod pattern;
pub mod reconcile;
pub mod similarity;
pub mod store;
pub mod substitution;
pub mod symbol;
