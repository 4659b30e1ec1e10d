/*
 * data.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! A structured data value to render templates against.
//!
//! [`Data`] deserializes from any self-describing format (JSON, YAML) and is
//! convenient to build by hand:
//!
//! ```ignore
//! let data = Data::from_iter([("Name", Data::from("World"))]);
//! ```

use crate::environment::{FieldAccessor, Scalar};
use serde::Deserialize;
use std::collections::HashMap;

/// Caller-supplied data.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(untagged)]
pub enum Data {
    #[default]
    Null,
    Bool(bool),
    Number(i64),
    Float(f64),
    String(String),
    List(Vec<Data>),
    Map(HashMap<String, Data>),
}

impl Data {
    /// Name of this value's kind, as used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Data::Null => "null",
            Data::Bool(_) => "bool",
            Data::Number(_) => "int",
            Data::Float(_) => "float",
            Data::String(_) => "string",
            Data::List(_) => "list",
            Data::Map(_) => "map",
        }
    }
}

impl FieldAccessor for Data {
    fn field(&self, name: &str) -> Option<&dyn FieldAccessor> {
        match self {
            Data::Map(map) => map.get(name).map(|v| v as &dyn FieldAccessor),
            _ => None,
        }
    }

    fn is_structured(&self) -> bool {
        matches!(self, Data::Map(_))
    }

    fn scalar(&self) -> Scalar<'_> {
        match self {
            Data::String(s) => Scalar::Str(s),
            Data::Number(n) => Scalar::Int(*n),
            other => Scalar::Other(other.kind()),
        }
    }
}

impl From<&str> for Data {
    fn from(s: &str) -> Self {
        Data::String(s.to_string())
    }
}

impl From<String> for Data {
    fn from(s: String) -> Self {
        Data::String(s)
    }
}

impl From<i32> for Data {
    fn from(n: i32) -> Self {
        Data::Number(i64::from(n))
    }
}

impl From<i64> for Data {
    fn from(n: i64) -> Self {
        Data::Number(n)
    }
}

impl From<f64> for Data {
    fn from(f: f64) -> Self {
        Data::Float(f)
    }
}

impl From<bool> for Data {
    fn from(b: bool) -> Self {
        Data::Bool(b)
    }
}

impl From<Vec<Data>> for Data {
    fn from(items: Vec<Data>) -> Self {
        Data::List(items)
    }
}

impl From<HashMap<String, Data>> for Data {
    fn from(map: HashMap<String, Data>) -> Self {
        Data::Map(map)
    }
}

impl From<serde_json::Value> for Data {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Data::Null,
            serde_json::Value::Bool(b) => Data::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Data::Number(i),
                None => Data::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Data::String(s),
            serde_json::Value::Array(items) => {
                Data::List(items.into_iter().map(Data::from).collect())
            }
            serde_json::Value::Object(map) => Data::Map(
                map.into_iter()
                    .map(|(key, value)| (key, Data::from(value)))
                    .collect(),
            ),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Data)> for Data {
    fn from_iter<I: IntoIterator<Item = (K, Data)>>(iter: I) -> Self {
        Data::Map(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }
}
