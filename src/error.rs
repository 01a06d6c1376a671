//! Rich diagnostic error types for the schemata engine.
//!
//! Reconciliation, alignment, ranking and inference fail routinely and report
//! that with `Option`. The types here cover the genuinely exceptional cases:
//! malformed actions, re-binding a placeholder, persistence and configuration.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the schemata engine.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum SchemaError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Pattern(#[from] PatternError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Pattern errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum PatternError {
    #[error("action `{kind}` has {args} textual argument(s) but {resolved} resolved argument(s)")]
    #[diagnostic(
        code(schemata::pattern::arity_mismatch),
        help(
            "Every textual argument slot of an action needs exactly one resolved \
             counterpart. Use `None` for arguments that could not be resolved."
        )
    )]
    ArityMismatch {
        kind: String,
        args: usize,
        resolved: usize,
    },

    #[error("action `{kind}` does not accept {arity} argument(s)")]
    #[diagnostic(
        code(schemata::pattern::unsupported_arity),
        help("Check the command template of this action kind: {expected}.")
    )]
    UnsupportedArity {
        kind: String,
        arity: usize,
        expected: String,
    },

    #[error("placeholder {placeholder} is already bound to {bound_to}, cannot bind {attempted}")]
    #[diagnostic(
        code(schemata::pattern::already_bound),
        help(
            "Placeholders are filled once and never re-filled. \
             Take a fresh copy of the pattern before binding it to another source."
        )
    )]
    AlreadyBound {
        placeholder: String,
        bound_to: String,
        attempted: String,
    },

    #[error("unknown command: \"{command}\"")]
    #[diagnostic(
        code(schemata::pattern::unknown_command),
        help(
            "Commands start with one of: go, look, open, close, take, lock, unlock, \
             put, insert, drop, eat, examine, inventory, YES."
        )
    )]
    UnknownCommand { command: String },
}

// ---------------------------------------------------------------------------
// Store errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    #[diagnostic(
        code(schemata::store::io),
        help(
            "A filesystem operation failed. Check that the file exists \
             and that you have read/write permissions."
        )
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {message}")]
    #[diagnostic(
        code(schemata::store::serde),
        help(
            "Failed to serialize or deserialize the pattern store. \
             The file must hold the JSON written by `PatternStore::save`."
        )
    )]
    Serialization { message: String },
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config: {path}")]
    #[diagnostic(
        code(schemata::config::read),
        help("Ensure the config file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {message}")]
    #[diagnostic(
        code(schemata::config::parse),
        help("Check the TOML syntax. Unknown keys are rejected.")
    )]
    Parse { path: String, message: String },
}

/// Convenience alias for functions returning schemata results.
pub type SchemaResult<T> = std::result::Result<T, SchemaError>;
