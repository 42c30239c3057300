#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Scope Engine
//!
//! A composable, lazily-evaluated query scope engine: named scopes are
//! registered once on a model, invoked in chains, and resolved on demand
//! into a single immutable query specification that an external data-access
//! collaborator executes.
//!
//! ## Overview
//!
//! The engine is a pure in-process query-building layer. It knows nothing
//! about SQL, connections, or transactions; its whole job is to turn a
//! sequence of scope invocations into one [`QuerySpec`] with well-defined
//! merge semantics:
//!
//! - condition lists **append** in invocation order (never deduplicated),
//! - eager-load and join relation sets **union**,
//! - scalar clauses (order, limit, offset, grouping, selection, readonly,
//!   lock) are **last-writer-wins**.
//!
//! Scope bodies are deferred computations. Nothing is memoized: every
//! resolution re-invokes every body with the arguments bound at invocation
//! time, so a scope that reads the clock can never serve a stale value. The
//! eager/lazy tag on a definition records author intent only.
//!
//! ## Module Organization
//!
//! - [`query_spec`] - Conditions, partial specifications, and the merged
//!   [`QuerySpec`]
//! - [`scopes`] - Scope definitions, model registration, and chain
//!   resolution
//! - [`executor`] - The [`DataAccess`] collaborator boundary and aggregate
//!   calculations
//! - [`error`] - Structured error handling
//! - [`logging`] - Optional tracing subscriber setup for embedding binaries
//!
//! ## Quick Start
//!
//! ```rust
//! use scope_engine::query_spec::{timestamp, Condition, PartialSpec};
//! use scope_engine::scopes::{Arity, Evaluation, ModelBuilder, ScopeDefinition};
//! use chrono::{Duration, Utc};
//!
//! # fn main() -> scope_engine::Result<()> {
//! let users = ModelBuilder::new("users")
//!     .fields(&["id", "name", "gender", "created_at"])
//!     .scope(ScopeDefinition::constant(
//!         "males",
//!         PartialSpec::new().condition(Condition::eq("gender", "male")),
//!     ))?
//!     // Lazy, variadic: defaults to "the last two weeks" when no bound
//!     // argument is supplied, evaluated fresh at every resolution.
//!     .scope_fn("recent", Arity::Variadic, Evaluation::Lazy, |args| {
//!         let since = match args.first() {
//!             Some(arg) => arg.clone(),
//!             None => timestamp(Utc::now() - Duration::days(14)),
//!         };
//!         Ok(PartialSpec::new().condition(Condition::new(
//!             "created_at",
//!             scope_engine::query_spec::Operator::Gt,
//!             vec![since],
//!         )?))
//!     })?
//!     .build();
//!
//! let spec = users.scope().invoke("males")?.invoke("recent")?.resolve()?;
//! assert_eq!(spec.conditions().len(), 2);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod executor;
pub mod logging;
pub mod query_spec;
pub mod scopes;

pub use error::{ExecuteError, Result, ScopeError};
pub use executor::{Aggregate, DataAccess};
pub use query_spec::{Condition, Direction, Operator, Order, PartialSpec, QuerySpec};
pub use scopes::{Arity, Evaluation, Model, ModelBuilder, ScopeChain, ScopeDefinition};
