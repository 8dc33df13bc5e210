//! Arguments and aggregated results for broadcast dispatch.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::num::FpCategory;

use super::ControlVector;

/// Positional arguments passed to a named drone operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperationArgs(Vec<Value>);

impl OperationArgs {
    /// Creates an argument list.
    #[must_use]
    pub const fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    /// Creates an empty argument list.
    #[must_use]
    pub const fn none() -> Self {
        Self(Vec::new())
    }

    /// Returns the number of arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no arguments were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the argument at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    /// Returns all arguments.
    #[must_use]
    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }
}

impl From<Vec<Value>> for OperationArgs {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

impl From<ControlVector> for OperationArgs {
    fn from(control: ControlVector) -> Self {
        Self(vec![
            Value::from(control.roll()),
            Value::from(control.pitch()),
            Value::from(control.yaw()),
            Value::from(control.throttle()),
        ])
    }
}

/// Aggregate result of a broadcast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum BroadcastOutcome {
    /// Every drone returned an empty value. Not an error.
    NothingReturned,
    /// Per-drone operation results in dispatch order, empties kept in place.
    Results(Vec<Value>),
    /// Per-drone attribute tuples in registry order.
    AttributeSnapshot(Vec<Vec<Value>>),
}

impl BroadcastOutcome {
    /// Aggregates per-drone operation results.
    ///
    /// Collapses to [`BroadcastOutcome::NothingReturned`] when every result
    /// is empty in the sense of [`is_empty_value`].
    #[must_use]
    pub fn from_results(results: Vec<Value>) -> Self {
        if results.iter().all(is_empty_value) {
            Self::NothingReturned
        } else {
            Self::Results(results)
        }
    }

    /// Builds a snapshot from raw per-drone attribute values.
    #[must_use]
    pub fn from_attribute_values(values: impl IntoIterator<Item = Value>) -> Self {
        Self::AttributeSnapshot(values.into_iter().map(attribute_tuple).collect())
    }

    /// Returns `true` for the nothing-returned sentinel.
    #[must_use]
    pub const fn is_nothing_returned(&self) -> bool {
        matches!(self, Self::NothingReturned)
    }

    /// Returns the positional results, if this is an operation outcome with
    /// at least one non-empty entry.
    #[must_use]
    pub fn results(&self) -> Option<&[Value]> {
        match self {
            Self::Results(results) => Some(results),
            Self::NothingReturned | Self::AttributeSnapshot(_) => None,
        }
    }

    /// Returns the attribute tuples, if this is an attribute outcome.
    #[must_use]
    pub fn snapshot(&self) -> Option<&[Vec<Value>]> {
        match self {
            Self::AttributeSnapshot(tuples) => Some(tuples),
            Self::NothingReturned | Self::Results(_) => None,
        }
    }
}

/// Returns `true` for values that carry no output: `null`, `false`, numeric
/// zero, and empty strings, arrays, or objects.
#[must_use]
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number
            .as_i64()
            .map(|integer| integer == 0)
            .or_else(|| number.as_u64().map(|integer| integer == 0))
            .or_else(|| number.as_f64().map(|float| float.classify() == FpCategory::Zero))
            .unwrap_or(false),
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

/// Wraps one attribute reading as a tuple.
///
/// Arrays become tuples of their elements; every other value, including
/// strings and objects, becomes a single-element tuple. A string reading is
/// one value such as a mode name, so splitting it into characters would lose
/// it.
fn attribute_tuple(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        scalar => vec![scalar],
    }
}
