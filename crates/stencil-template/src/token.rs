/*
 * token.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The token alphabet shared by the lexer, the renderer and the parser.

use crate::span::Span;
use std::fmt;

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Unrecognized input inside an action.
    Error,
    /// End of input. Terminal; a source keeps returning it.
    Eof,
    /// Literal template text outside of any action.
    Text,
    /// `{{`
    ActionStart,
    /// `}}`
    ActionEnd,
    /// `.`
    Dot,
    Ident,
    Number,
    Plus,
    Minus,
    If,
    End,
    True,
    False,
    /// `>`
    Gt,
    /// `<`
    Lt,
    /// `==`
    Eq,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Error => "ERROR",
            TokenKind::Eof => "EOF",
            TokenKind::Text => "TEXT",
            TokenKind::ActionStart => "ACTIONSTART",
            TokenKind::ActionEnd => "ACTIONEND",
            TokenKind::Dot => "DOT",
            TokenKind::Ident => "IDENT",
            TokenKind::Number => "NUMBER",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::If => "IF",
            TokenKind::End => "END",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::Gt => ">",
            TokenKind::Lt => "<",
            TokenKind::Eq => "==",
        };
        f.write_str(name)
    }
}

/// A single token with its source text and location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    /// A token with no meaningful location, for hand-built token streams.
    pub fn synthetic(kind: TokenKind, text: impl Into<String>) -> Self {
        Self::new(kind, text, Span::default())
    }

    pub fn eof(span: Span) -> Self {
        Self::new(TokenKind::Eof, "", span)
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}
