/*
 * value.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Runtime values produced by the evaluator.

use crate::error::EvalError;
use std::fmt;

/// The result of evaluating an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Number(i64),
    Boolean(bool),
    /// What a conditional produces when its condition is falsy.
    Void,
    Error(EvalError),
}

impl Value {
    /// Name of this value's type, as used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "STRING",
            Value::Number(_) => "NUMBER",
            Value::Boolean(_) => "BOOLEAN",
            Value::Void => "VOID",
            Value::Error(_) => "ERROR",
        }
    }

    /// Check if this value is "truthy" for conditional evaluation.
    ///
    /// - Numbers are truthy unless zero
    /// - Strings are truthy unless empty
    /// - Booleans are themselves
    /// - Void is falsy
    ///
    /// Errors report truthy, but the evaluator never branches on one.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::String(s) => !s.is_empty(),
            Value::Number(n) => *n != 0,
            Value::Boolean(b) => *b,
            Value::Void => false,
            Value::Error(_) => true,
        }
    }

    pub fn as_error(&self) -> Option<&EvalError> {
        match self {
            Value::Error(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Number(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Void => Ok(()),
            Value::Error(err) => write!(f, "{}", err),
        }
    }
}

impl From<EvalError> for Value {
    fn from(err: EvalError) -> Self {
        Value::Error(err)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}
