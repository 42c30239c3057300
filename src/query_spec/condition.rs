use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, ScopeError};

/// Comparison operators available to conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    Like,
}

impl Operator {
    /// Whether `count` operands satisfy this operator's arity.
    fn accepts_operands(self, count: usize) -> bool {
        match self {
            Operator::In => count >= 1,
            _ => count == 1,
        }
    }

    /// Human-readable operand requirement, used in error messages.
    fn expected_operands(self) -> &'static str {
        match self {
            Operator::In => "at least 1",
            _ => "exactly 1",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::In => "IN",
            Operator::Like => "LIKE",
        };
        write!(f, "{symbol}")
    }
}

/// An immutable predicate fragment: a field compared against one or more
/// bound operand values. Multiple conditions combine by logical AND when
/// merged into a query specification.
///
/// Deserialization runs the same operand-count validation as
/// [`Condition::new`], so a decoded condition upholds the operator arity
/// invariant just like a constructed one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCondition")]
pub struct Condition {
    field: String,
    operator: Operator,
    operands: Vec<Value>,
}

/// Unvalidated wire form of a condition.
#[derive(Deserialize)]
struct RawCondition {
    field: String,
    operator: Operator,
    operands: Vec<Value>,
}

impl TryFrom<RawCondition> for Condition {
    type Error = ScopeError;

    fn try_from(raw: RawCondition) -> Result<Self> {
        Condition::new(raw.field, raw.operator, raw.operands)
    }
}

impl Condition {
    /// Build a condition, validating operand count against the operator's
    /// arity. `Eq`/`Ne`/`Gt`/`Gte`/`Lt`/`Lte`/`Like` take exactly one
    /// operand; `In` takes one or more.
    pub fn new(
        field: impl Into<String>,
        operator: Operator,
        operands: Vec<Value>,
    ) -> Result<Self> {
        if !operator.accepts_operands(operands.len()) {
            return Err(ScopeError::InvalidOperandCount {
                operator,
                expected: operator.expected_operands(),
                actual: operands.len(),
            });
        }
        Ok(Self {
            field: field.into(),
            operator,
            operands,
        })
    }

    /// `field = value`
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::single(field, Operator::Eq, value)
    }

    /// `field != value`
    pub fn ne(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::single(field, Operator::Ne, value)
    }

    /// `field > value`
    pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::single(field, Operator::Gt, value)
    }

    /// `field >= value`
    pub fn gte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::single(field, Operator::Gte, value)
    }

    /// `field < value`
    pub fn lt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::single(field, Operator::Lt, value)
    }

    /// `field <= value`
    pub fn lte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::single(field, Operator::Lte, value)
    }

    /// `field LIKE pattern` with `%` wildcards.
    pub fn like(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::single(field, Operator::Like, Value::String(pattern.into()))
    }

    /// `field IN (values...)`. Fails with `InvalidOperandCount` when
    /// `values` is empty.
    pub fn one_of(field: impl Into<String>, values: Vec<Value>) -> Result<Self> {
        Self::new(field, Operator::In, values)
    }

    fn single(field: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            operator,
            operands: vec![value.into()],
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn operands(&self) -> &[Value] {
        &self.operands
    }

    /// The sole operand of a single-operand condition, or the first operand
    /// of an `In` condition.
    pub fn operand(&self) -> &Value {
        &self.operands[0]
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operator == Operator::In {
            let list = self
                .operands
                .iter()
                .map(Value::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            write!(f, "{} IN ({list})", self.field)
        } else {
            write!(f, "{} {} {}", self.field, self.operator, self.operands[0])
        }
    }
}

/// Canonical operand encoding for timestamps: RFC 3339 strings. RFC 3339
/// orders lexicographically, so ordered comparison operators stay meaningful
/// for collaborators that compare string operands directly.
pub fn timestamp(at: DateTime<Utc>) -> Value {
    Value::String(at.to_rfc3339())
}
