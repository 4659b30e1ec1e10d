/*
 * environment.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Field resolution against caller-supplied data.
//!
//! Templates look fields up by name at evaluation time. Instead of
//! inspecting arbitrary values at runtime, data types opt in by implementing
//! [`FieldAccessor`]. The crate implements it for [`crate::Data`] and for
//! `serde_json::Value`.

use crate::error::EvalError;
use crate::value::Value;

/// The scalar view of a data value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scalar<'a> {
    Str(&'a str),
    Int(i64),
    /// Any kind a template cannot render, named for error messages.
    Other(&'static str),
}

/// Named-field access on structured data.
pub trait FieldAccessor {
    /// The child called `name`, or `None` if there is no such child or this
    /// value is not structured.
    fn field(&self, name: &str) -> Option<&dyn FieldAccessor>;

    /// Whether this value has named fields at all.
    fn is_structured(&self) -> bool;

    fn scalar(&self) -> Scalar<'_>;
}

/// The binding context an expression is evaluated in.
#[derive(Clone, Copy, Default)]
pub struct Environment<'a> {
    data: Option<&'a dyn FieldAccessor>,
}

impl std::fmt::Debug for Environment<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("has_data", &self.data.is_some())
            .finish()
    }
}

impl<'a> Environment<'a> {
    pub fn new(data: Option<&'a dyn FieldAccessor>) -> Self {
        Self { data }
    }

    pub fn with_data(data: &'a dyn FieldAccessor) -> Self {
        Self { data: Some(data) }
    }

    /// Walk a dotted path (`"a.b.c"`) down from the root.
    ///
    /// Empty segments are skipped, so `".a"` means `"a"` and `"."` is the
    /// root itself.
    pub fn resolve(&self, path: &str) -> Result<&'a dyn FieldAccessor, EvalError> {
        let root = self.data.ok_or_else(|| EvalError::NoData {
            path: path.to_string(),
        })?;

        let mut segments = path.split('.').filter(|s| !s.is_empty()).peekable();
        if segments.peek().is_some() && !root.is_structured() {
            return Err(EvalError::NoData {
                path: path.to_string(),
            });
        }

        let mut current = root;
        for segment in segments {
            current = current
                .field(segment)
                .ok_or_else(|| EvalError::FieldNotFound {
                    path: path.to_string(),
                })?;
        }
        Ok(current)
    }

    /// Resolve `path` and convert the result to a [`Value`].
    ///
    /// Only strings and integers can be rendered; anything else is an
    /// `UnsupportedType` error value.
    pub fn field(&self, path: &str) -> Value {
        let resolved = match self.resolve(path) {
            Ok(resolved) => resolved,
            Err(err) => return Value::Error(err),
        };

        match resolved.scalar() {
            Scalar::Str(s) => Value::String(s.to_string()),
            Scalar::Int(n) => Value::Number(n),
            Scalar::Other(kind) => Value::Error(EvalError::UnsupportedType {
                path: path.to_string(),
                kind: kind.to_string(),
            }),
        }
    }
}

impl FieldAccessor for serde_json::Value {
    fn field(&self, name: &str) -> Option<&dyn FieldAccessor> {
        match self {
            serde_json::Value::Object(map) => map.get(name).map(|v| v as &dyn FieldAccessor),
            _ => None,
        }
    }

    fn is_structured(&self) -> bool {
        self.is_object()
    }

    fn scalar(&self) -> Scalar<'_> {
        match self {
            serde_json::Value::String(s) => Scalar::Str(s),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Scalar::Int(i),
                None => Scalar::Other("float"),
            },
            serde_json::Value::Bool(_) => Scalar::Other("bool"),
            serde_json::Value::Array(_) => Scalar::Other("list"),
            serde_json::Value::Object(_) => Scalar::Other("map"),
            serde_json::Value::Null => Scalar::Other("null"),
        }
    }
}
