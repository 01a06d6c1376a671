//! Facts: named relations over ordered arguments.

use serde::{Deserialize, Serialize};

use crate::substitution::Substitution;
use crate::symbol::{Placeholder, Symbol, Term};

/// A named relation such as `in(bread, fridge)`.
///
/// Arguments are positional: two facts are equal iff their names and every
/// argument at the same index are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fact {
    pub name: String,
    pub args: Vec<Term>,
}

impl Fact {
    pub fn new(name: impl Into<String>, args: Vec<Term>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// Build a fully concrete fact.
    pub fn ground(name: impl Into<String>, args: impl IntoIterator<Item = Symbol>) -> Self {
        Self::new(name, args.into_iter().map(Term::Symbol).collect())
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }

    /// Same relation name and arity: the precondition for comparing two facts.
    pub fn same_shape(&self, other: &Fact) -> bool {
        self.name == other.name && self.args.len() == other.args.len()
    }

    /// No placeholder arguments.
    pub fn is_ground(&self) -> bool {
        self.args.iter().all(|a| !a.is_placeholder())
    }

    pub fn mentions(&self, term: &Term) -> bool {
        self.args.contains(term)
    }

    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> {
        self.args.iter().filter_map(Term::as_placeholder)
    }

    /// Copy of this fact with every substituted argument replaced.
    pub fn substitute(&self, substitution: &Substitution) -> Fact {
        Fact {
            name: self.name.clone(),
            args: self.args.iter().map(|a| substitution.apply(a)).collect(),
        }
    }
}

impl std::fmt::Display for Fact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(")")
    }
}
