//! Shared test fixtures: an in-memory data-access collaborator that
//! evaluates resolved query specifications against JSON rows.

use std::cmp::Ordering;

use async_trait::async_trait;
use serde_json::{json, Value};
use thiserror::Error;

use scope_engine::executor::{Aggregate, DataAccess};
use scope_engine::query_spec::{Condition, Direction, Operator, QuerySpec};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage offline")]
    Offline,
    #[error("cannot compare values for field '{field}'")]
    Incomparable { field: String },
}

/// A toy data-access layer over a vector of JSON objects. Supports the full
/// operator set, ordering, offset/limit, field selection, and aggregates.
pub struct MemoryStore {
    rows: Vec<Value>,
    offline: bool,
}

impl MemoryStore {
    pub fn new(rows: Vec<Value>) -> Self {
        Self {
            rows,
            offline: false,
        }
    }

    /// A store whose every call fails, for error pass-through tests.
    pub fn offline() -> Self {
        Self {
            rows: Vec::new(),
            offline: true,
        }
    }

    fn matching(&self, spec: &QuerySpec) -> Vec<Value> {
        self.rows
            .iter()
            .filter(|row| spec.conditions().iter().all(|c| matches(row, c)))
            .cloned()
            .collect()
    }

    fn select_rows(&self, spec: &QuerySpec) -> Vec<Value> {
        let mut rows = self.matching(spec);

        if let Some(order) = spec.order() {
            rows.sort_by(|a, b| {
                let ordering = compare(
                    a.get(&order.field).unwrap_or(&Value::Null),
                    b.get(&order.field).unwrap_or(&Value::Null),
                )
                .unwrap_or(Ordering::Equal);
                match order.direction {
                    Direction::Asc => ordering,
                    Direction::Desc => ordering.reverse(),
                }
            });
        }

        let offset = spec.offset().unwrap_or(0) as usize;
        let rows: Vec<Value> = rows.into_iter().skip(offset).collect();
        let rows: Vec<Value> = match spec.limit() {
            Some(limit) => rows.into_iter().take(limit as usize).collect(),
            None => rows,
        };

        match spec.select() {
            Some(fields) => rows.into_iter().map(|row| project(&row, fields)).collect(),
            None => rows,
        }
    }
}

#[async_trait]
impl DataAccess for MemoryStore {
    type Record = Value;
    type Error = StoreError;

    async fn fetch_all(&self, spec: QuerySpec) -> Result<Vec<Value>, StoreError> {
        if self.offline {
            return Err(StoreError::Offline);
        }
        Ok(self.select_rows(&spec))
    }

    async fn fetch_first(&self, spec: QuerySpec) -> Result<Option<Value>, StoreError> {
        if self.offline {
            return Err(StoreError::Offline);
        }
        Ok(self.select_rows(&spec).into_iter().next())
    }

    async fn count(&self, spec: QuerySpec) -> Result<u64, StoreError> {
        if self.offline {
            return Err(StoreError::Offline);
        }
        Ok(self.matching(&spec).len() as u64)
    }

    async fn aggregate(&self, spec: QuerySpec, function: Aggregate) -> Result<Value, StoreError> {
        if self.offline {
            return Err(StoreError::Offline);
        }
        let rows = self.matching(&spec);
        match function {
            Aggregate::Count => Ok(json!(rows.len())),
            Aggregate::Sum(field) => Ok(json!(numbers(&rows, &field)?.iter().sum::<f64>())),
            Aggregate::Average(field) => {
                let values = numbers(&rows, &field)?;
                if values.is_empty() {
                    Ok(Value::Null)
                } else {
                    Ok(json!(values.iter().sum::<f64>() / values.len() as f64))
                }
            }
            Aggregate::Minimum(field) => Ok(extremum(&rows, &field, Ordering::Less)),
            Aggregate::Maximum(field) => Ok(extremum(&rows, &field, Ordering::Greater)),
        }
    }
}

fn matches(row: &Value, condition: &Condition) -> bool {
    let actual = row.get(condition.field()).unwrap_or(&Value::Null);
    match condition.operator() {
        Operator::Eq => actual == condition.operand(),
        Operator::Ne => actual != condition.operand(),
        Operator::Gt => compare(actual, condition.operand()) == Some(Ordering::Greater),
        Operator::Gte => matches!(
            compare(actual, condition.operand()),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        Operator::Lt => compare(actual, condition.operand()) == Some(Ordering::Less),
        Operator::Lte => matches!(
            compare(actual, condition.operand()),
            Some(Ordering::Less | Ordering::Equal)
        ),
        Operator::In => condition.operands().contains(actual),
        Operator::Like => match (actual.as_str(), condition.operand().as_str()) {
            (Some(text), Some(pattern)) => like_match(text, pattern),
            _ => false,
        },
    }
}

fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

fn like_match(text: &str, pattern: &str) -> bool {
    if !pattern.contains('%') {
        return text == pattern;
    }
    let parts: Vec<&str> = pattern.split('%').collect();
    let mut pos = 0usize;
    for (i, part) in parts.iter().enumerate() {
        if part.is_empty() {
            continue;
        }
        if i == 0 {
            if !text.starts_with(part) {
                return false;
            }
            pos = part.len();
        } else if i == parts.len() - 1 {
            return text.len() >= pos && text[pos..].ends_with(part);
        } else if let Some(found) = text[pos..].find(part) {
            pos += found + part.len();
        } else {
            return false;
        }
    }
    true
}

fn project(row: &Value, fields: &[String]) -> Value {
    let mut out = serde_json::Map::new();
    for field in fields {
        if let Some(value) = row.get(field) {
            out.insert(field.clone(), value.clone());
        }
    }
    Value::Object(out)
}

fn numbers(rows: &[Value], field: &str) -> Result<Vec<f64>, StoreError> {
    rows.iter()
        .filter_map(|row| row.get(field))
        .filter(|value| !value.is_null())
        .map(|value| {
            value.as_f64().ok_or_else(|| StoreError::Incomparable {
                field: field.to_string(),
            })
        })
        .collect()
}

fn extremum(rows: &[Value], field: &str, keep: Ordering) -> Value {
    let mut best: Option<&Value> = None;
    for row in rows {
        let Some(value) = row.get(field) else { continue };
        if value.is_null() {
            continue;
        }
        best = match best {
            None => Some(value),
            Some(current) => {
                if compare(value, current) == Some(keep) {
                    Some(value)
                } else {
                    Some(current)
                }
            }
        };
    }
    best.cloned().unwrap_or(Value::Null)
}
