//! # Structured Error Handling
//!
//! Error taxonomy for the scope engine. All validation errors are raised
//! synchronously at the offending call (condition construction, scope
//! registration, scope invocation) and never deferred to resolution time.
//! Resolution introduces no error classes of its own: a scope body that fails
//! propagates its error unchanged, and data-access errors pass through the
//! terminal operations without reinterpretation.

use thiserror::Error;

use crate::query_spec::Operator;
use crate::scopes::Arity;

/// Errors raised by the scope engine itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScopeError {
    /// A condition was constructed with an operand count the operator does
    /// not accept (e.g. `In` with zero operands, `Eq` with two).
    #[error("operator {operator} expects {expected} operand(s), got {actual}")]
    InvalidOperandCount {
        operator: Operator,
        expected: &'static str,
        actual: usize,
    },

    /// A scope name was registered twice on the same model.
    #[error("scope '{scope}' is already registered on model '{model}'")]
    DuplicateScopeName { model: String, scope: String },

    /// A chain invocation named a scope that is not registered on the model.
    #[error("unknown scope '{scope}' on model '{model}'")]
    UnknownScope { model: String, scope: String },

    /// A chain invocation passed an argument count the scope's arity rejects.
    #[error("scope '{scope}' expects {expected} but was invoked with {actual} argument(s)")]
    ArityMismatch {
        scope: String,
        expected: Arity,
        actual: usize,
    },

    /// `find_by` named a field that is not in the model's field registry.
    #[error("unknown field '{field}' on model '{model}'")]
    UnknownField { model: String, field: String },

    /// A scope body rejected one of its bound arguments at evaluation time.
    #[error("scope '{scope}' received an invalid argument: {message}")]
    InvalidArgument { scope: String, message: String },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ScopeError>;

/// Errors surfaced by terminal operations, which combine chain resolution
/// with a call into the data-access collaborator. Collaborator errors are
/// carried as-is; the engine never catches, retries, or rewraps them.
#[derive(Error, Debug)]
pub enum ExecuteError<E> {
    /// Chain resolution failed before the collaborator was invoked.
    #[error(transparent)]
    Scope(#[from] ScopeError),

    /// The data-access collaborator failed; propagated unchanged.
    #[error("data access error: {0}")]
    DataAccess(E),
}
