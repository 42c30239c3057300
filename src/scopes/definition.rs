//! Scope definitions: named, arity-checked producers of partial query
//! specifications.
//!
//! A definition's body is stored as a deferred computation and is invoked
//! with its bound arguments at chain-resolution time, never at registration
//! time. The engine caches nothing: every resolution re-invokes every body,
//! so a body that reads the clock always sees the current time. The
//! [`Evaluation`] tag records author intent only and has no effect on
//! freshness.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::Result;
use crate::query_spec::PartialSpec;

/// How many bound arguments a scope accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// No arguments.
    Zero,
    /// Exactly this many arguments.
    Fixed(usize),
    /// Zero or more arguments; the body inspects the sequence and supplies
    /// its own defaults when arguments are absent.
    Variadic,
}

impl Arity {
    /// Whether an invocation with `count` arguments satisfies this arity.
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Zero => count == 0,
            Arity::Fixed(expected) => count == expected,
            Arity::Variadic => true,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Zero => write!(f, "no arguments"),
            Arity::Fixed(n) => write!(f, "exactly {n} argument(s)"),
            Arity::Variadic => write!(f, "any number of arguments"),
        }
    }
}

/// Author-intent marker for a scope body. Behaviorally inert: resolution
/// re-invokes eager and lazy bodies alike, so neither can go stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    Eager,
    Lazy,
}

/// The deferred computation behind a scope: bound arguments in, fresh
/// partial specification out.
pub type ScopeBody = Arc<dyn Fn(&[Value]) -> Result<PartialSpec> + Send + Sync>;

/// A named, registered scope. Immutable after construction; owned by its
/// model for the lifetime of the model definition.
#[derive(Clone)]
pub struct ScopeDefinition {
    name: String,
    arity: Arity,
    evaluation: Evaluation,
    body: ScopeBody,
}

impl ScopeDefinition {
    pub fn new(
        name: impl Into<String>,
        arity: Arity,
        evaluation: Evaluation,
        body: impl Fn(&[Value]) -> Result<PartialSpec> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            arity,
            evaluation,
            body: Arc::new(body),
        }
    }

    /// An eager zero-arity scope producing a constant partial specification.
    pub fn constant(name: impl Into<String>, partial: PartialSpec) -> Self {
        Self::new(name, Arity::Zero, Evaluation::Eager, move |_| {
            Ok(partial.clone())
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    pub fn evaluation(&self) -> Evaluation {
        self.evaluation
    }

    /// Invoke the body with the arguments bound at invocation time. Always a
    /// fresh invocation; results are never memoized.
    pub(crate) fn evaluate(&self, args: &[Value]) -> Result<PartialSpec> {
        tracing::trace!(scope = %self.name, args = args.len(), "evaluating scope body");
        (self.body)(args)
    }
}

impl fmt::Debug for ScopeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeDefinition")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("evaluation", &self.evaluation)
            .finish_non_exhaustive()
    }
}
