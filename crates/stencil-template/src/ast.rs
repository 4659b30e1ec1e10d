/*
 * ast.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Expression tree produced by the parser.
//!
//! Every node owns its children; the tree is built once per action and
//! dropped after evaluation.

use std::fmt;

/// A unary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOp {
    /// `.` (field access)
    Dot,
}

impl fmt::Display for PrefixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefixOp::Dot => f.write_str("."),
        }
    }
}

/// A binary operator. All of them share one precedence tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOp {
    Add,
    Sub,
    Gt,
    Lt,
    Eq,
}

impl fmt::Display for InfixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            InfixOp::Add => "+",
            InfixOp::Sub => "-",
            InfixOp::Gt => ">",
            InfixOp::Lt => "<",
            InfixOp::Eq => "==",
        };
        f.write_str(op)
    }
}

/// An expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Literal template text.
    Text(String),
    /// `{{ body }}`
    Action(Box<Expr>),
    /// A field path, possibly dotted (`a.b`), or `.` for the data itself.
    Field(String),
    Prefix {
        op: PrefixOp,
        rhs: Box<Expr>,
    },
    Infix {
        op: InfixOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Number(i64),
    String(String),
    Boolean(bool),
    /// `{{if condition}}body{{end}}`
    Cond {
        condition: Box<Expr>,
        body: Box<Expr>,
    },
}

impl Expr {
    pub fn action(body: Expr) -> Self {
        Expr::Action(Box::new(body))
    }

    pub fn field(name: impl Into<String>) -> Self {
        Expr::Field(name.into())
    }

    /// `.name`
    pub fn dot(rhs: Expr) -> Self {
        Expr::Prefix {
            op: PrefixOp::Dot,
            rhs: Box::new(rhs),
        }
    }

    pub fn infix(lhs: Expr, op: InfixOp, rhs: Expr) -> Self {
        Expr::Infix {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn cond(condition: Expr, body: Expr) -> Self {
        Expr::Cond {
            condition: Box::new(condition),
            body: Box::new(body),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Text(text) => write!(f, "{:?}", text),
            Expr::Action(body) => write!(f, "{{{{{}}}}}", body),
            Expr::Field(name) => f.write_str(name),
            Expr::Prefix { op, rhs } => write!(f, "{}{}", op, rhs),
            Expr::Infix { op, lhs, rhs } => write!(f, "({} {} {})", lhs, op, rhs),
            Expr::Number(n) => write!(f, "{}", n),
            Expr::String(s) => write!(f, "{:?}", s),
            Expr::Boolean(b) => write!(f, "{}", b),
            Expr::Cond { condition, body } => write!(f, "if {} then {}", condition, body),
        }
    }
}

/// The expressions of one parse, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub exprs: Vec<Expr>,
}
