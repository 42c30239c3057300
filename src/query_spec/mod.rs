//! # Query Specifications
//!
//! The value types a scope chain resolves into: immutable predicate
//! fragments ([`Condition`]), the partial specification a single scope body
//! produces ([`PartialSpec`]), and the merged accumulator handed to the
//! data-access collaborator ([`QuerySpec`]).

pub mod condition;
pub mod spec;

pub use condition::{timestamp, Condition, Operator};
pub use spec::{Direction, Order, PartialSpec, QuerySpec};
