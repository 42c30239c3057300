//! Partial and accumulated query specifications.
//!
//! A [`PartialSpec`] is the fragment a single scope body produces; a
//! [`QuerySpec`] is the accumulator a chain resolution folds those fragments
//! into. Merge rules: condition lists append (duplicates are legal and narrow
//! results further), relation-name sets union, and scalar clauses are
//! last-writer-wins (a later `Some` overwrites, a later `None` leaves the
//! earlier value in place).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::Condition;

/// Sort direction for an ordering clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Asc,
    Desc,
}

/// An ordering clause: one field and a direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub field: String,
    pub direction: Direction,
}

impl Order {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Desc,
        }
    }
}

/// The partial query specification produced by one scope body evaluation.
/// Produced fresh per evaluation and consumed by the merge; never shared.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialSpec {
    pub(crate) conditions: Vec<Condition>,
    pub(crate) order: Option<Order>,
    pub(crate) limit: Option<u64>,
    pub(crate) offset: Option<u64>,
    pub(crate) includes: BTreeSet<String>,
    pub(crate) joins: BTreeSet<String>,
    pub(crate) group_by: Option<String>,
    pub(crate) select: Option<Vec<String>>,
    pub(crate) readonly: Option<bool>,
    pub(crate) lock: Option<bool>,
}

impl PartialSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a condition (ANDed with any others at resolution).
    pub fn condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Append several conditions in order.
    pub fn conditions(mut self, conditions: impl IntoIterator<Item = Condition>) -> Self {
        self.conditions.extend(conditions);
        self
    }

    /// Set the ordering clause.
    pub fn order(mut self, order: Order) -> Self {
        self.order = Some(order);
        self
    }

    /// Order ascending by `field`.
    pub fn order_asc(self, field: impl Into<String>) -> Self {
        self.order(Order::asc(field))
    }

    /// Order descending by `field`.
    pub fn order_desc(self, field: impl Into<String>) -> Self {
        self.order(Order::desc(field))
    }

    /// Set the row limit.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the row offset.
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Add a relation name to eager-load via separate queries.
    pub fn include(mut self, relation: impl Into<String>) -> Self {
        self.includes.insert(relation.into());
        self
    }

    /// Add a relation name to join into the main query.
    pub fn join(mut self, relation: impl Into<String>) -> Self {
        self.joins.insert(relation.into());
        self
    }

    /// Set the grouping clause.
    pub fn group_by(mut self, clause: impl Into<String>) -> Self {
        self.group_by = Some(clause.into());
        self
    }

    /// Restrict the selected fields.
    pub fn select(mut self, fields: &[&str]) -> Self {
        self.select = Some(fields.iter().map(|f| (*f).to_string()).collect());
        self
    }

    /// Mark fetched records as read-only.
    pub fn readonly(mut self, readonly: bool) -> Self {
        self.readonly = Some(readonly);
        self
    }

    /// Request row locking from the collaborator.
    pub fn lock(mut self, lock: bool) -> Self {
        self.lock = Some(lock);
        self
    }
}

/// The accumulated, merged result of resolving a scope chain. Same shape as
/// [`PartialSpec`], built incrementally by [`QuerySpec::merge`] and handed to
/// the data-access collaborator once resolution completes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuerySpec {
    conditions: Vec<Condition>,
    order: Option<Order>,
    limit: Option<u64>,
    offset: Option<u64>,
    includes: BTreeSet<String>,
    joins: BTreeSet<String>,
    group_by: Option<String>,
    select: Option<Vec<String>>,
    readonly: Option<bool>,
    lock: Option<bool>,
}

impl QuerySpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one partial specification into the accumulator.
    pub fn merge(&mut self, partial: PartialSpec) {
        self.conditions.extend(partial.conditions);
        self.includes.extend(partial.includes);
        self.joins.extend(partial.joins);
        if partial.order.is_some() {
            self.order = partial.order;
        }
        if partial.limit.is_some() {
            self.limit = partial.limit;
        }
        if partial.offset.is_some() {
            self.offset = partial.offset;
        }
        if partial.group_by.is_some() {
            self.group_by = partial.group_by;
        }
        if partial.select.is_some() {
            self.select = partial.select;
        }
        if partial.readonly.is_some() {
            self.readonly = partial.readonly;
        }
        if partial.lock.is_some() {
            self.lock = partial.lock;
        }
    }

    /// Set the limit only if no scope in the chain set one. An explicit limit
    /// always wins over this default.
    pub fn with_default_limit(mut self, limit: u64) -> Self {
        if self.limit.is_none() {
            self.limit = Some(limit);
        }
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn order(&self) -> Option<&Order> {
        self.order.as_ref()
    }

    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    pub fn offset(&self) -> Option<u64> {
        self.offset
    }

    pub fn includes(&self) -> &BTreeSet<String> {
        &self.includes
    }

    pub fn joins(&self) -> &BTreeSet<String> {
        &self.joins
    }

    pub fn group_by(&self) -> Option<&str> {
        self.group_by.as_deref()
    }

    pub fn select(&self) -> Option<&[String]> {
        self.select.as_deref()
    }

    pub fn readonly(&self) -> Option<bool> {
        self.readonly
    }

    pub fn lock(&self) -> Option<bool> {
        self.lock
    }
}
