/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for parsing, evaluation and rendering.

use crate::span::Span;
use crate::token::TokenKind;
use thiserror::Error;

/// Errors that abort a parse. The parser never recovers from these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The token stream was empty.
    #[error("no tokens")]
    NoTokens,

    #[error("expected token type {expected}, got {found} at {span}")]
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
        span: Span,
    },

    #[error("no prefix handler for {kind} at {span}")]
    NoPrefixHandler { kind: TokenKind, span: Span },

    #[error("no infix handler for {kind} at {span}")]
    NoInfixHandler { kind: TokenKind, span: Span },

    #[error("not a number: {text:?} at {span}")]
    InvalidNumber { text: String, span: Span },

    /// The lexer could not classify a character inside an action.
    #[error("unexpected character {text:?} at {span}")]
    InvalidCharacter { text: String, span: Span },
}

/// Errors carried by [`crate::Value::Error`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// There is no data to resolve `path` against, or the data is not
    /// structured.
    #[error("no data to resolve field {path:?}")]
    NoData { path: String },

    #[error("field not found: {path}")]
    FieldNotFound { path: String },

    #[error("field {path:?}: unsupported type {kind}")]
    UnsupportedType { path: String, kind: String },

    #[error("type mismatch: {lhs} {op} {rhs}")]
    TypeMismatch {
        op: String,
        lhs: String,
        rhs: String,
    },

    #[error("unsupported operator {op} for {kind}")]
    UnsupportedOperator { op: String, kind: String },

    #[error("arithmetic overflow in {op}")]
    ArithmeticOverflow { op: String },

    #[error("unsupported expression: {expr}")]
    UnsupportedExpression { expr: String },
}

/// Errors returned by a render.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TemplateError {
    /// A token that cannot appear where it was found while collecting an
    /// action, e.g. end of input before `}}`.
    #[error("unexpected token {kind} at {span}")]
    UnexpectedToken { kind: TokenKind, span: Span },

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("evaluation error: {0}")]
    Eval(#[from] EvalError),
}

/// Result type for parsing.
pub type ParseResult<T> = Result<T, ParseError>;

/// Result type for rendering.
pub type TemplateResult<T> = Result<T, TemplateError>;
