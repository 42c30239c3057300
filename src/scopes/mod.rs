//! # Query Scopes Module
//!
//! Named, chainable, composable query scopes over a flat model namespace.
//!
//! ## Architecture
//!
//! - [`ScopeDefinition`]: a named, arity-checked, deferred producer of a
//!   [`PartialSpec`](crate::query_spec::PartialSpec), registered once during
//!   model setup.
//! - [`Model`] / [`ModelBuilder`]: the write-once registry scopes and known
//!   field names live in; read concurrently without locking thereafter.
//! - [`ScopeChain`]: a persistent sequence of scope invocations that
//!   resolves into one [`QuerySpec`](crate::query_spec::QuerySpec) and
//!   delegates terminal operations to the data-access collaborator.
//!
//! ## Usage
//!
//! ```rust
//! use scope_engine::query_spec::{Condition, PartialSpec};
//! use scope_engine::scopes::{ModelBuilder, ScopeDefinition};
//!
//! # fn main() -> scope_engine::Result<()> {
//! let users = ModelBuilder::new("users")
//!     .scope(ScopeDefinition::constant(
//!         "males",
//!         PartialSpec::new().condition(Condition::eq("gender", "male")),
//!     ))?
//!     .scope(ScopeDefinition::constant(
//!         "active",
//!         PartialSpec::new().condition(Condition::eq("active", true)),
//!     ))?
//!     .build();
//!
//! let spec = users.scope().invoke("males")?.invoke("active")?.resolve()?;
//! assert_eq!(spec.conditions().len(), 2);
//! # Ok(())
//! # }
//! ```

pub mod chain;
pub mod definition;
pub mod model;

pub use chain::ScopeChain;
pub use definition::{Arity, Evaluation, ScopeBody, ScopeDefinition};
pub use model::{Model, ModelBuilder};
