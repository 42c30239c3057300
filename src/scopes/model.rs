//! Model registration: the write-once registry of scope definitions and
//! known field names that scope chains resolve against.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::chain::ScopeChain;
use super::definition::{Arity, Evaluation, ScopeDefinition};
use crate::error::{Result, ScopeError};
use crate::query_spec::{Condition, PartialSpec};

pub(crate) struct ModelInner {
    pub(crate) name: String,
    pub(crate) fields: BTreeSet<String>,
    pub(crate) scopes: HashMap<String, Arc<ScopeDefinition>>,
}

/// A model handle: the flat namespace a set of scopes is registered under.
///
/// Built once during setup via [`ModelBuilder`], then immutable. The handle
/// is a cheap clone over shared state, so independent resolution calls can
/// read it concurrently without locking.
#[derive(Clone)]
pub struct Model {
    inner: Arc<ModelInner>,
}

impl Model {
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Start an empty scope chain bound to this model.
    pub fn scope(&self) -> ScopeChain {
        ScopeChain::new(self.clone())
    }

    /// Look up a registered scope definition by name.
    pub fn definition(&self, name: &str) -> Option<&Arc<ScopeDefinition>> {
        self.inner.scopes.get(name)
    }

    /// Whether `field` is in the model's field registry.
    pub fn has_field(&self, field: &str) -> bool {
        self.inner.fields.contains(field)
    }

    /// Generic lookup-by-field: one operation covering every registered
    /// column instead of one generated finder method per column. Validates
    /// `field` against the registry, then yields a chain seeded with an
    /// equality condition.
    pub fn find_by(&self, field: &str, value: impl Into<Value>) -> Result<ScopeChain> {
        if !self.has_field(field) {
            return Err(ScopeError::UnknownField {
                model: self.inner.name.clone(),
                field: field.to_string(),
            });
        }
        let partial = PartialSpec::new().condition(Condition::eq(field, value.into()));
        let definition = ScopeDefinition::constant(format!("find_by({field})"), partial);
        Ok(self.scope().extended(Arc::new(definition), Vec::new()))
    }
}

/// Builder for the setup phase. Registration fails fast on duplicate scope
/// names; everything else is additive.
pub struct ModelBuilder {
    name: String,
    fields: BTreeSet<String>,
    scopes: HashMap<String, Arc<ScopeDefinition>>,
}

impl ModelBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: BTreeSet::new(),
            scopes: HashMap::new(),
        }
    }

    /// Register a known field name for `find_by`.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.fields.insert(name.into());
        self
    }

    /// Register several field names at once.
    #[must_use]
    pub fn fields(mut self, names: &[&str]) -> Self {
        self.fields.extend(names.iter().map(|n| (*n).to_string()));
        self
    }

    /// Register a scope definition. Fails with `DuplicateScopeName` if the
    /// name is already taken on this model.
    pub fn scope(mut self, definition: ScopeDefinition) -> Result<Self> {
        let name = definition.name().to_string();
        if self.scopes.contains_key(&name) {
            return Err(ScopeError::DuplicateScopeName {
                model: self.name,
                scope: name,
            });
        }
        tracing::debug!(model = %self.name, scope = %name, "registered scope");
        self.scopes.insert(name, Arc::new(definition));
        Ok(self)
    }

    /// Shorthand for registering a scope from its parts.
    pub fn scope_fn(
        self,
        name: impl Into<String>,
        arity: Arity,
        evaluation: Evaluation,
        body: impl Fn(&[Value]) -> Result<PartialSpec> + Send + Sync + 'static,
    ) -> Result<Self> {
        self.scope(ScopeDefinition::new(name, arity, evaluation, body))
    }

    pub fn build(self) -> Model {
        Model {
            inner: Arc::new(ModelInner {
                name: self.name,
                fields: self.fields,
                scopes: self.scopes,
            }),
        }
    }
}

impl fmt::Debug for ModelBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut scopes: Vec<&str> = self.scopes.keys().map(String::as_str).collect();
        scopes.sort_unstable();
        f.debug_struct("ModelBuilder")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("scopes", &scopes)
            .finish()
    }
}
