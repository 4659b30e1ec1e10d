/*
 * lexer.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Two-mode template scanner.
//!
//! Outside of actions the lexer is in [`Mode::Text`] and emits one `Text`
//! token per run of literal text. `{{` switches it to [`Mode::Action`], where
//! it emits expression tokens until `}}` switches it back.
//!
//! The scan position only ever moves forward, and no decision looks further
//! than one character past the current one.

use crate::span::{Location, Span};
use crate::token::{Token, TokenKind};
use once_cell::sync::Lazy;
use std::collections::HashMap;

static KEYWORDS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    HashMap::from([
        ("if", TokenKind::If),
        ("end", TokenKind::End),
        ("true", TokenKind::True),
        ("false", TokenKind::False),
    ])
});

/// Anything that hands out tokens one at a time.
///
/// Once a source has returned `Eof` it must keep returning `Eof`.
pub trait TokenSource {
    fn next_token(&mut self) -> Token;
}

/// Which part of the template the lexer is scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Text,
    Action,
}

/// Lazily tokenizes template source.
#[derive(Debug)]
pub struct Lexer<'a> {
    input: &'a str,
    loc: Location,
    mode: Mode,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            loc: Location::default(),
            mode: Mode::Text,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    fn curr(&self) -> Option<char> {
        self.input[self.loc.offset..].chars().next()
    }

    fn peek(&self) -> Option<char> {
        let mut chars = self.input[self.loc.offset..].chars();
        chars.next();
        chars.next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.curr() {
            self.loc.advance(c);
        }
    }

    fn at_pair(&self, first: char, second: char) -> bool {
        self.curr() == Some(first) && self.peek() == Some(second)
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.curr().is_some_and(&pred) {
            self.bump();
        }
    }

    /// Build a token from `start` up to the current position.
    fn token_from(&self, kind: TokenKind, start: Location) -> Token {
        Token::new(
            kind,
            &self.input[start.offset..self.loc.offset],
            Span::new(start, self.loc),
        )
    }

    fn eof(&self) -> Token {
        Token::eof(Span::new(self.loc, self.loc))
    }

    fn next_text(&mut self) -> Token {
        let start = self.loc;

        if self.at_pair('{', '{') {
            self.bump();
            self.bump();
            self.mode = Mode::Action;
            tracing::trace!(at = %Span::new(start, self.loc), "entering action mode");
            return self.token_from(TokenKind::ActionStart, start);
        }

        if self.curr().is_none() {
            return self.eof();
        }

        while self.curr().is_some() && !self.at_pair('{', '{') {
            self.bump();
        }
        self.token_from(TokenKind::Text, start)
    }

    fn next_action(&mut self) -> Token {
        self.take_while(char::is_whitespace);
        let start = self.loc;

        let Some(c) = self.curr() else {
            return self.eof();
        };

        if self.at_pair('}', '}') {
            self.bump();
            self.bump();
            self.mode = Mode::Text;
            tracing::trace!(at = %Span::new(start, self.loc), "leaving action mode");
            return self.token_from(TokenKind::ActionEnd, start);
        }
        if self.at_pair('=', '=') {
            self.bump();
            self.bump();
            return self.token_from(TokenKind::Eq, start);
        }

        let single = match c {
            '.' => Some(TokenKind::Dot),
            '+' => Some(TokenKind::Plus),
            '-' => Some(TokenKind::Minus),
            '>' => Some(TokenKind::Gt),
            '<' => Some(TokenKind::Lt),
            _ => None,
        };
        if let Some(kind) = single {
            self.bump();
            return self.token_from(kind, start);
        }

        if is_ident_start(c) {
            self.take_while(is_ident_continue);
            let mut token = self.token_from(TokenKind::Ident, start);
            if let Some(kind) = KEYWORDS.get(token.text.as_str()) {
                token.kind = *kind;
            }
            return token;
        }

        if c.is_ascii_digit() {
            self.take_while(|c| c.is_ascii_digit());
            return self.token_from(TokenKind::Number, start);
        }

        self.bump();
        let token = self.token_from(TokenKind::Error, start);
        tracing::trace!(text = %token.text, at = %token.span, "unexpected character");
        token
    }
}

impl TokenSource for Lexer<'_> {
    fn next_token(&mut self) -> Token {
        let token = match self.mode {
            Mode::Text => self.next_text(),
            Mode::Action => self.next_action(),
        };
        tracing::trace!(kind = %token.kind, text = %token.text, "token");
        token
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// A token source over an already collected list of tokens.
///
/// An `Eof` token is appended when the list does not end with one.
#[derive(Debug, Clone)]
pub struct TokenSlice {
    tokens: Vec<Token>,
    index: usize,
}

impl TokenSlice {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(|t| t.is(TokenKind::Eof)) {
            let span = tokens
                .last()
                .map(|t| Span::new(t.span.end, t.span.end))
                .unwrap_or_default();
            tokens.push(Token::eof(span));
        }
        Self { tokens, index: 0 }
    }
}

impl TokenSource for TokenSlice {
    fn next_token(&mut self) -> Token {
        match self.tokens.get(self.index) {
            Some(token) => {
                self.index += 1;
                token.clone()
            }
            // The list always ends with Eof, so the last token is Eof.
            None => self.tokens[self.tokens.len() - 1].clone(),
        }
    }
}
