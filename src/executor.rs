//! # Data-Access Boundary
//!
//! The engine builds query specifications; it never touches storage. A
//! [`DataAccess`] implementation consumes a resolved
//! [`QuerySpec`](crate::query_spec::QuerySpec) and performs the actual fetch,
//! however it likes (SQL, an in-memory store, a remote service). Resolution
//! always completes before the collaborator is invoked, so query-building
//! latency is decoupled from I/O latency, and timeout or retry policy
//! belongs entirely to the implementation.
//!
//! The result shape a terminal operation wants is conveyed by which trait
//! method it calls: `fetch_all` (ordered sequence), `fetch_first`
//! (single-or-absent), `count` (integer), `aggregate` (scalar).

use async_trait::async_trait;
use serde_json::Value;

use crate::query_spec::QuerySpec;

/// Aggregate calculations a collaborator can be asked to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Aggregate {
    Count,
    Sum(String),
    Average(String),
    Minimum(String),
    Maximum(String),
}

/// The external data-access collaborator. Errors returned here pass through
/// the terminal operations unchanged; the engine never reinterprets or
/// retries them.
#[async_trait]
pub trait DataAccess {
    type Record: Send;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch every record matching the specification, in specification
    /// order.
    async fn fetch_all(&self, spec: QuerySpec) -> Result<Vec<Self::Record>, Self::Error>;

    /// Fetch the first matching record, or `None`.
    async fn fetch_first(&self, spec: QuerySpec) -> Result<Option<Self::Record>, Self::Error>;

    /// Count matching records.
    async fn count(&self, spec: QuerySpec) -> Result<u64, Self::Error>;

    /// Compute a scalar aggregate over the matching records.
    async fn aggregate(
        &self,
        spec: QuerySpec,
        function: Aggregate,
    ) -> Result<Value, Self::Error>;
}
