/*
 * evaluator.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Expression evaluation.
//!
//! Evaluation never fails outright: problems are reported as
//! [`Value::Error`], and it is up to the caller to decide what an error value
//! means.

use crate::ast::{Expr, InfixOp, PrefixOp};
use crate::environment::Environment;
use crate::error::EvalError;
use crate::value::Value;

/// Evaluate `expr` against the data bound in `env`.
pub fn evaluate(expr: &Expr, env: &Environment<'_>) -> Value {
    match expr {
        Expr::Number(n) => Value::Number(*n),
        Expr::String(s) => Value::String(s.clone()),
        Expr::Boolean(b) => Value::Boolean(*b),
        Expr::Text(text) => Value::String(text.clone()),

        Expr::Field(name) => env.field(name),

        Expr::Prefix {
            op: PrefixOp::Dot,
            rhs,
        } => match rhs.as_ref() {
            Expr::Field(name) => env.field(name),
            other => Value::Error(EvalError::UnsupportedExpression {
                expr: format!(".{}", other),
            }),
        },

        Expr::Infix { op, lhs, rhs } => {
            let lhs = evaluate(lhs, env);
            let rhs = evaluate(rhs, env);
            evaluate_infix(*op, lhs, rhs)
        }

        Expr::Cond { condition, body } => {
            let condition = evaluate(condition, env);
            if condition.is_error() {
                return condition;
            }
            if condition.is_truthy() {
                evaluate(body, env)
            } else {
                Value::Void
            }
        }

        Expr::Action(body) => evaluate(body, env),
    }
}

fn evaluate_infix(op: InfixOp, lhs: Value, rhs: Value) -> Value {
    match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => evaluate_number_infix(op, a, b),
        (Value::String(a), Value::String(b)) => match op {
            InfixOp::Add => Value::String(a + &b),
            _ => Value::Error(EvalError::UnsupportedOperator {
                op: op.to_string(),
                kind: "STRING".to_string(),
            }),
        },
        (lhs, rhs) if lhs.type_name() == rhs.type_name() => {
            Value::Error(EvalError::UnsupportedOperator {
                op: op.to_string(),
                kind: lhs.type_name().to_string(),
            })
        }
        (lhs, rhs) => Value::Error(EvalError::TypeMismatch {
            op: op.to_string(),
            lhs: lhs.type_name().to_string(),
            rhs: rhs.type_name().to_string(),
        }),
    }
}

fn evaluate_number_infix(op: InfixOp, a: i64, b: i64) -> Value {
    let arithmetic = match op {
        InfixOp::Add => a.checked_add(b),
        InfixOp::Sub => a.checked_sub(b),
        InfixOp::Gt => return Value::Boolean(a > b),
        InfixOp::Lt => return Value::Boolean(a < b),
        InfixOp::Eq => return Value::Boolean(a == b),
    };
    match arithmetic {
        Some(n) => Value::Number(n),
        None => Value::Error(EvalError::ArithmeticOverflow { op: op.to_string() }),
    }
}
