//! Values held by command data stores.

use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// A single command data value.
///
/// `Bool(false)` is a real value, distinct from an absent key; absence is
/// always modelled with `Option<DataValue>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<DataValue>),
}

impl DataValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DataValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Append `value`, turning a scalar into a two-element list first.
    pub fn push(&mut self, value: DataValue) {
        match self {
            DataValue::List(items) => items.push(value),
            scalar => {
                let first = std::mem::replace(scalar, DataValue::List(Vec::with_capacity(2)));
                if let DataValue::List(items) = scalar {
                    items.push(first);
                    items.push(value);
                }
            }
        }
    }

    /// Flatten into string items (scalars become a single item).
    pub fn to_strings(&self) -> Vec<String> {
        match self {
            DataValue::List(items) => items.iter().map(|v| v.to_string()).collect(),
            other => vec![other.to_string()],
        }
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::Bool(b) => write!(f, "{}", b),
            DataValue::Int(i) => write!(f, "{}", i),
            DataValue::Float(x) => write!(f, "{}", x),
            DataValue::Text(s) => write!(f, "{}", s),
            DataValue::List(items) => write!(f, "{}", items.iter().join(", ")),
        }
    }
}

impl From<&str> for DataValue {
    fn from(value: &str) -> Self {
        DataValue::Text(value.to_string())
    }
}

impl From<String> for DataValue {
    fn from(value: String) -> Self {
        DataValue::Text(value)
    }
}

impl From<bool> for DataValue {
    fn from(value: bool) -> Self {
        DataValue::Bool(value)
    }
}

impl From<i64> for DataValue {
    fn from(value: i64) -> Self {
        DataValue::Int(value)
    }
}

impl From<f64> for DataValue {
    fn from(value: f64) -> Self {
        DataValue::Float(value)
    }
}

impl<T: Into<DataValue>> From<Vec<T>> for DataValue {
    fn from(values: Vec<T>) -> Self {
        DataValue::List(values.into_iter().map(Into::into).collect())
    }
}
