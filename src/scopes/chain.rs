//! # Scope Chains
//!
//! A chain records scope invocations against one model and resolves them
//! into a single [`QuerySpec`] on demand.
//!
//! Chains are persistent values: every [`invoke`](ScopeChain::invoke)
//! returns a *new* chain and leaves the receiver untouched, so a base chain
//! can be reused as the root of several different extensions without
//! cross-contamination. Argument counts are validated at invocation time;
//! scope bodies run only at resolution time, and every resolution re-runs
//! every body against current inputs — resolved specifications are never
//! cached.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::definition::ScopeDefinition;
use super::model::Model;
use crate::error::{ExecuteError, Result, ScopeError};
use crate::executor::{Aggregate, DataAccess};
use crate::query_spec::QuerySpec;

#[derive(Clone)]
struct Invocation {
    definition: Arc<ScopeDefinition>,
    args: Vec<Value>,
}

/// An ordered sequence of scope invocations bound to a model. Created per
/// finder call and discarded after resolution; never shared across callers.
#[derive(Clone)]
pub struct ScopeChain {
    model: Model,
    invocations: Vec<Invocation>,
}

impl ScopeChain {
    pub(crate) fn new(model: Model) -> Self {
        Self {
            model,
            invocations: Vec::new(),
        }
    }

    pub(crate) fn extended(&self, definition: Arc<ScopeDefinition>, args: Vec<Value>) -> Self {
        let mut invocations = self.invocations.clone();
        invocations.push(Invocation { definition, args });
        Self {
            model: self.model.clone(),
            invocations,
        }
    }

    /// The model this chain is bound to.
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Number of invocations recorded so far.
    pub fn len(&self) -> usize {
        self.invocations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invocations.is_empty()
    }

    /// Append a zero-argument scope invocation, returning the extended chain.
    pub fn invoke(&self, name: &str) -> Result<Self> {
        self.invoke_with(name, Vec::new())
    }

    /// Append a scope invocation with bound arguments, returning the
    /// extended chain. Fails with `UnknownScope` for an unregistered name
    /// and `ArityMismatch` when the argument count does not satisfy the
    /// definition's arity. Both checks happen here, not at resolution.
    pub fn invoke_with(&self, name: &str, args: Vec<Value>) -> Result<Self> {
        let definition = self
            .model
            .definition(name)
            .ok_or_else(|| ScopeError::UnknownScope {
                model: self.model.name().to_string(),
                scope: name.to_string(),
            })?
            .clone();

        if !definition.arity().accepts(args.len()) {
            return Err(ScopeError::ArityMismatch {
                scope: name.to_string(),
                expected: definition.arity(),
                actual: args.len(),
            });
        }

        Ok(self.extended(definition, args))
    }

    /// Resolve the chain into one query specification: a pure fold over the
    /// invocations in call order. Each body is evaluated fresh with its
    /// bound arguments and merged into the accumulator (conditions append,
    /// relation sets union, scalar clauses last-writer-wins). Body errors
    /// propagate unchanged; nothing is mutated and nothing is cached.
    pub fn resolve(&self) -> Result<QuerySpec> {
        let mut spec = QuerySpec::new();
        for invocation in &self.invocations {
            let partial = invocation.definition.evaluate(&invocation.args)?;
            spec.merge(partial);
        }
        tracing::debug!(
            model = %self.model.name(),
            scopes = self.invocations.len(),
            conditions = spec.conditions().len(),
            "resolved scope chain"
        );
        Ok(spec)
    }

    /// Fetch all matching records.
    pub async fn all<D: DataAccess>(
        &self,
        data: &D,
    ) -> std::result::Result<Vec<D::Record>, ExecuteError<D::Error>> {
        let spec = self.resolve()?;
        data.fetch_all(spec).await.map_err(ExecuteError::DataAccess)
    }

    /// Fetch the first matching record, if any. Applies `limit = 1` unless a
    /// scope in the chain already set a limit (the explicit limit wins, per
    /// the last-writer-wins rule).
    pub async fn first<D: DataAccess>(
        &self,
        data: &D,
    ) -> std::result::Result<Option<D::Record>, ExecuteError<D::Error>> {
        let spec = self.resolve()?.with_default_limit(1);
        data.fetch_first(spec)
            .await
            .map_err(ExecuteError::DataAccess)
    }

    /// Count matching records.
    pub async fn count<D: DataAccess>(
        &self,
        data: &D,
    ) -> std::result::Result<u64, ExecuteError<D::Error>> {
        let spec = self.resolve()?;
        data.count(spec).await.map_err(ExecuteError::DataAccess)
    }

    /// Whether any record matches.
    pub async fn exists<D: DataAccess>(
        &self,
        data: &D,
    ) -> std::result::Result<bool, ExecuteError<D::Error>> {
        Ok(self.first(data).await?.is_some())
    }

    /// Run an aggregate calculation over the matching records.
    pub async fn aggregate<D: DataAccess>(
        &self,
        data: &D,
        function: Aggregate,
    ) -> std::result::Result<Value, ExecuteError<D::Error>> {
        let spec = self.resolve()?;
        data.aggregate(spec, function)
            .await
            .map_err(ExecuteError::DataAccess)
    }

    /// Sum of `field` over the matching records.
    pub async fn sum<D: DataAccess>(
        &self,
        data: &D,
        field: &str,
    ) -> std::result::Result<Value, ExecuteError<D::Error>> {
        self.aggregate(data, Aggregate::Sum(field.to_string())).await
    }

    /// Mean of `field` over the matching records.
    pub async fn average<D: DataAccess>(
        &self,
        data: &D,
        field: &str,
    ) -> std::result::Result<Value, ExecuteError<D::Error>> {
        self.aggregate(data, Aggregate::Average(field.to_string()))
            .await
    }

    /// Minimum of `field` over the matching records.
    pub async fn minimum<D: DataAccess>(
        &self,
        data: &D,
        field: &str,
    ) -> std::result::Result<Value, ExecuteError<D::Error>> {
        self.aggregate(data, Aggregate::Minimum(field.to_string()))
            .await
    }

    /// Maximum of `field` over the matching records.
    pub async fn maximum<D: DataAccess>(
        &self,
        data: &D,
        field: &str,
    ) -> std::result::Result<Value, ExecuteError<D::Error>> {
        self.aggregate(data, Aggregate::Maximum(field.to_string()))
            .await
    }
}

impl fmt::Debug for ScopeChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scopes: Vec<&str> = self
            .invocations
            .iter()
            .map(|invocation| invocation.definition.name())
            .collect();
        f.debug_struct("ScopeChain")
            .field("model", &self.model.name())
            .field("scopes", &scopes)
            .finish()
    }
}
