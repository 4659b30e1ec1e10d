/*
 * parser.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Pratt parser for template expressions.
//!
//! The parser keeps a two-token window (`curr` and `next`) over any
//! [`TokenSource`]. Each token kind that can start an expression has a prefix
//! handler, and each binary operator an infix handler. Handlers are found
//! through [`prefix_rule`] and [`infix_rule`], which are fixed for the life of
//! the process.
//!
//! Every handler returns a `ParseResult`; the first error ends the parse and
//! no partial tree is returned.

use crate::ast::{Expr, InfixOp, Program};
use crate::error::{ParseError, ParseResult};
use crate::lexer::{TokenSlice, TokenSource};
use crate::token::{Token, TokenKind};

/// Binding strength of an operator, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    /// `+ - > < ==`
    Additive,
    /// Leading `.`
    Prefix,
}

impl Precedence {
    pub fn of(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Dot => Precedence::Prefix,
            TokenKind::Plus | TokenKind::Minus | TokenKind::Gt | TokenKind::Lt | TokenKind::Eq => {
                Precedence::Additive
            }
            _ => Precedence::Lowest,
        }
    }
}

type PrefixFn<'a> = fn(&mut Parser<'a>) -> ParseResult<Expr>;
type InfixFn<'a> = fn(&mut Parser<'a>, Expr) -> ParseResult<Expr>;

/// The prefix handler for tokens of `kind`, if any.
pub(crate) fn prefix_rule<'a>(kind: TokenKind) -> Option<PrefixFn<'a>> {
    match kind {
        TokenKind::ActionStart => Some(Parser::parse_action),
        TokenKind::Text => Some(Parser::parse_text),
        TokenKind::Ident => Some(Parser::parse_identifier),
        TokenKind::Dot => Some(Parser::parse_prefix),
        TokenKind::Number => Some(Parser::parse_number),
        TokenKind::True | TokenKind::False => Some(Parser::parse_boolean),
        TokenKind::If => Some(Parser::parse_cond),
        _ => None,
    }
}

/// The infix handler for tokens of `kind`, if any.
pub(crate) fn infix_rule<'a>(kind: TokenKind) -> Option<InfixFn<'a>> {
    match kind {
        TokenKind::Plus | TokenKind::Minus | TokenKind::Gt | TokenKind::Lt | TokenKind::Eq => {
            Some(Parser::parse_infix)
        }
        _ => None,
    }
}

fn invalid_character(token: &Token) -> ParseError {
    ParseError::InvalidCharacter {
        text: token.text.clone(),
        span: token.span,
    }
}

fn infix_op(kind: TokenKind) -> Option<InfixOp> {
    match kind {
        TokenKind::Plus => Some(InfixOp::Add),
        TokenKind::Minus => Some(InfixOp::Sub),
        TokenKind::Gt => Some(InfixOp::Gt),
        TokenKind::Lt => Some(InfixOp::Lt),
        TokenKind::Eq => Some(InfixOp::Eq),
        _ => None,
    }
}

/// Parses a token stream into expressions.
pub struct Parser<'a> {
    source: Box<dyn TokenSource + 'a>,
    curr: Token,
    next: Token,
}

impl<'a> Parser<'a> {
    pub fn new(source: impl TokenSource + 'a) -> Self {
        let mut source: Box<dyn TokenSource + 'a> = Box::new(source);
        let curr = source.next_token();
        let next = if curr.is(TokenKind::Eof) {
            curr.clone()
        } else {
            source.next_token()
        };
        Self { source, curr, next }
    }

    /// Parse a pre-collected token list. A trailing `Eof` is implied.
    pub fn from_tokens(tokens: Vec<Token>) -> Parser<'static> {
        Parser::new(TokenSlice::new(tokens))
    }

    /// Parse expressions until the end of input.
    pub fn parse(&mut self) -> ParseResult<Program> {
        if self.curr.is(TokenKind::Eof) {
            return Err(ParseError::NoTokens);
        }

        let mut program = Program::default();
        while !self.curr.is(TokenKind::Eof) {
            let expr = self.parse_expression(Precedence::Lowest)?;
            tracing::trace!(%expr, "parsed expression");
            program.exprs.push(expr);
            self.advance();
        }
        Ok(program)
    }

    fn advance(&mut self) {
        self.curr = self.next.clone();
        if !self.next.is(TokenKind::Eof) {
            self.next = self.source.next_token();
        }
    }

    fn expect(&self, kind: TokenKind) -> ParseResult<()> {
        if self.curr.is(kind) {
            Ok(())
        } else {
            Err(ParseError::UnexpectedToken {
                expected: kind,
                found: self.curr.kind,
                span: self.curr.span,
            })
        }
    }

    /// Move onto the next token and require it to be `kind`.
    fn advance_expecting(&mut self, kind: TokenKind) -> ParseResult<()> {
        self.advance();
        self.expect(kind)
    }

    fn parse_expression(&mut self, precedence: Precedence) -> ParseResult<Expr> {
        let _span = tracing::trace_span!("parse_expression", ?precedence).entered();

        let prefix = match prefix_rule(self.curr.kind) {
            Some(prefix) => prefix,
            None if self.curr.is(TokenKind::Error) => return Err(invalid_character(&self.curr)),
            None => {
                return Err(ParseError::NoPrefixHandler {
                    kind: self.curr.kind,
                    span: self.curr.span,
                });
            }
        };
        let mut expr = prefix(self)?;

        loop {
            // A bad character right after an operand.
            if self.next.is(TokenKind::Error) {
                return Err(invalid_character(&self.next));
            }
            if self.next.is(TokenKind::Eof)
                || self.next.is(TokenKind::ActionEnd)
                || precedence >= Precedence::of(self.next.kind)
            {
                break;
            }

            self.advance();
            let infix = infix_rule(self.curr.kind).ok_or(ParseError::NoInfixHandler {
                kind: self.curr.kind,
                span: self.curr.span,
            })?;
            expr = infix(self, expr)?;
        }

        Ok(expr)
    }

    /// `{{ expr }}`
    fn parse_action(&mut self) -> ParseResult<Expr> {
        let _span = tracing::trace_span!("parse_action").entered();
        self.expect(TokenKind::ActionStart)?;
        self.advance();
        let body = self.parse_expression(Precedence::Lowest)?;

        // A conditional already sits on its closing `}}`; anything else
        // stops just before it.
        if self.next.is(TokenKind::ActionEnd) {
            self.advance();
        }
        self.expect(TokenKind::ActionEnd)?;

        Ok(Expr::action(body))
    }

    fn parse_text(&mut self) -> ParseResult<Expr> {
        Ok(Expr::Text(self.curr.text.clone()))
    }

    fn parse_identifier(&mut self) -> ParseResult<Expr> {
        Ok(Expr::field(self.curr.text.clone()))
    }

    /// `.name`, `.a.b.c`, or a bare `.` for the data itself.
    fn parse_prefix(&mut self) -> ParseResult<Expr> {
        let _span = tracing::trace_span!("parse_prefix").entered();
        if self.next.is(TokenKind::ActionEnd) || self.next.is(TokenKind::Eof) {
            return Ok(Expr::field("."));
        }

        self.advance();
        let rhs = self.parse_expression(Precedence::Prefix)?;

        let rhs = match rhs {
            Expr::Field(mut path) => {
                while self.next.is(TokenKind::Dot) {
                    self.advance();
                    self.advance_expecting(TokenKind::Ident)?;
                    path.push('.');
                    path.push_str(&self.curr.text);
                }
                Expr::Field(path)
            }
            other => other,
        };

        Ok(Expr::dot(rhs))
    }

    fn parse_number(&mut self) -> ParseResult<Expr> {
        self.curr
            .text
            .parse::<i64>()
            .map(Expr::Number)
            .map_err(|_| ParseError::InvalidNumber {
                text: self.curr.text.clone(),
                span: self.curr.span,
            })
    }

    fn parse_boolean(&mut self) -> ParseResult<Expr> {
        Ok(Expr::Boolean(self.curr.is(TokenKind::True)))
    }

    fn parse_infix(&mut self, lhs: Expr) -> ParseResult<Expr> {
        let _span = tracing::trace_span!("parse_infix").entered();
        let kind = self.curr.kind;
        let op = infix_op(kind).ok_or(ParseError::NoInfixHandler {
            kind,
            span: self.curr.span,
        })?;
        self.advance();
        let rhs = self.parse_expression(Precedence::of(kind))?;
        Ok(Expr::infix(lhs, op, rhs))
    }

    /// `if cond }} body {{ end }}`
    fn parse_cond(&mut self) -> ParseResult<Expr> {
        let _span = tracing::trace_span!("parse_cond").entered();
        self.expect(TokenKind::If)?;
        self.advance();
        let condition = self.parse_expression(Precedence::Lowest)?;
        self.advance_expecting(TokenKind::ActionEnd)?;

        self.advance();
        let body = self.parse_expression(Precedence::Lowest)?;

        self.advance_expecting(TokenKind::ActionStart)?;
        self.advance_expecting(TokenKind::End)?;
        self.advance_expecting(TokenKind::ActionEnd)?;

        Ok(Expr::cond(condition, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::span::{Location, Span};
    use pretty_assertions::assert_eq;

    fn tok(kind: TokenKind, text: &str) -> Token {
        Token::synthetic(kind, text)
    }

    fn parse_one(parser: &mut Parser<'_>) -> Expr {
        let program = parser.parse().expect("parse should succeed");
        assert_eq!(program.exprs.len(), 1, "unexpected number of expressions");
        program.exprs.into_iter().next().unwrap()
    }

    fn parse_source(source: &str) -> Expr {
        parse_one(&mut Parser::new(Lexer::new(source)))
    }

    fn parse_err(source: &str) -> ParseError {
        Parser::new(Lexer::new(source))
            .parse()
            .expect_err("parse should fail")
    }

    #[test]
    fn test_access_field() {
        let mut parser = Parser::from_tokens(vec![
            tok(TokenKind::Dot, "."),
            tok(TokenKind::Ident, "Name"),
        ]);
        assert_eq!(parse_one(&mut parser), Expr::dot(Expr::field("Name")));
    }

    #[test]
    fn test_sum() {
        let mut parser = Parser::from_tokens(vec![
            tok(TokenKind::Dot, "."),
            tok(TokenKind::Ident, "foo"),
            tok(TokenKind::Plus, "+"),
            tok(TokenKind::Number, "2"),
        ]);
        assert_eq!(
            parse_one(&mut parser),
            Expr::infix(
                Expr::dot(Expr::field("foo")),
                InfixOp::Add,
                Expr::Number(2)
            )
        );
    }

    #[test]
    fn test_text() {
        assert_eq!(parse_source("2"), Expr::Text("2".to_string()));
    }

    #[test]
    fn test_action_with_number() {
        assert_eq!(parse_source("{{2}}"), Expr::action(Expr::Number(2)));
    }

    #[test]
    fn test_cond() {
        assert_eq!(
            parse_source("{{if 1}}hi{{end}}"),
            Expr::action(Expr::cond(Expr::Number(1), Expr::Text("hi".to_string())))
        );
    }

    #[test]
    fn test_cond_with_action_body() {
        assert_eq!(
            parse_source("{{if .ok}}{{.Wow}}{{end}}"),
            Expr::action(Expr::cond(
                Expr::dot(Expr::field("ok")),
                Expr::action(Expr::dot(Expr::field("Wow")))
            ))
        );
    }

    #[test]
    fn test_nested_cond() {
        assert_eq!(
            parse_source("{{if 2 > 1}}{{if 1 > 0}}hi{{end}}{{end}}"),
            Expr::action(Expr::cond(
                Expr::infix(Expr::Number(2), InfixOp::Gt, Expr::Number(1)),
                Expr::action(Expr::cond(
                    Expr::infix(Expr::Number(1), InfixOp::Gt, Expr::Number(0)),
                    Expr::Text("hi".to_string())
                ))
            ))
        );
    }

    #[test]
    fn test_greater_than() {
        assert_eq!(
            parse_source("{{1 > 2}}"),
            Expr::action(Expr::infix(Expr::Number(1), InfixOp::Gt, Expr::Number(2)))
        );
    }

    #[test]
    fn test_infix_is_left_associative() {
        assert_eq!(
            parse_source("{{1 - 2 + 3 == 2}}"),
            Expr::action(Expr::infix(
                Expr::infix(
                    Expr::infix(Expr::Number(1), InfixOp::Sub, Expr::Number(2)),
                    InfixOp::Add,
                    Expr::Number(3)
                ),
                InfixOp::Eq,
                Expr::Number(2)
            ))
        );
    }

    #[test]
    fn test_dot_binds_tighter_than_infix() {
        assert_eq!(
            parse_source("{{.a < .b}}"),
            Expr::action(Expr::infix(
                Expr::dot(Expr::field("a")),
                InfixOp::Lt,
                Expr::dot(Expr::field("b"))
            ))
        );
    }

    #[test]
    fn test_dotted_chain_folds_into_one_field() {
        assert_eq!(
            parse_source("{{.a.b.c + 1}}"),
            Expr::action(Expr::infix(
                Expr::dot(Expr::field("a.b.c")),
                InfixOp::Add,
                Expr::Number(1)
            ))
        );
    }

    #[test]
    fn test_bare_dot() {
        assert_eq!(parse_source("{{.}}"), Expr::action(Expr::field(".")));
        assert_eq!(parse_source("{{ . }}"), Expr::action(Expr::field(".")));
    }

    #[test]
    fn test_booleans() {
        assert_eq!(parse_source("{{true}}"), Expr::action(Expr::Boolean(true)));
        assert_eq!(
            parse_source("{{false}}"),
            Expr::action(Expr::Boolean(false))
        );
    }

    #[test]
    fn test_template_with_text_and_actions() {
        let program = Parser::new(Lexer::new("Hello {{.Name}}!"))
            .parse()
            .unwrap();
        assert_eq!(
            program.exprs,
            vec![
                Expr::Text("Hello ".to_string()),
                Expr::action(Expr::dot(Expr::field("Name"))),
                Expr::Text("!".to_string()),
            ]
        );
    }

    #[test]
    fn test_no_tokens() {
        assert_eq!(Parser::from_tokens(Vec::new()).parse(), Err(ParseError::NoTokens));
        assert_eq!(parse_err(""), ParseError::NoTokens);
    }

    #[test]
    fn test_missing_prefix_handler() {
        assert!(matches!(
            parse_err("{{}}"),
            ParseError::NoPrefixHandler {
                kind: TokenKind::ActionEnd,
                ..
            }
        ));
        assert!(matches!(
            parse_err("{{+ 1}}"),
            ParseError::NoPrefixHandler {
                kind: TokenKind::Plus,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_infix_handler() {
        assert!(matches!(
            parse_err("{{1 .a}}"),
            ParseError::NoInfixHandler {
                kind: TokenKind::Dot,
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_character() {
        let err = parse_err("{{ # }}");
        assert!(matches!(err, ParseError::InvalidCharacter { ref text, .. } if text == "#"));
    }

    #[test]
    fn test_invalid_character_after_operand() {
        assert_eq!(
            parse_err("{{1 = 2}}"),
            ParseError::InvalidCharacter {
                text: "=".to_string(),
                span: Span::new(
                    Location {
                        offset: 4,
                        row: 0,
                        column: 4,
                    },
                    Location {
                        offset: 5,
                        row: 0,
                        column: 5,
                    },
                ),
            }
        );

        let err = parse_err("{{.One + 1 = 2}}");
        assert!(matches!(err, ParseError::InvalidCharacter { ref text, .. } if text == "="));

        let err = parse_err("{{if 1 # }}x{{end}}");
        assert!(matches!(err, ParseError::InvalidCharacter { ref text, .. } if text == "#"));
    }

    #[test]
    fn test_number_out_of_range() {
        let err = parse_err("{{99999999999999999999}}");
        assert!(matches!(err, ParseError::InvalidNumber { .. }));
    }

    #[test]
    fn test_unterminated_action() {
        assert_eq!(
            parse_err("{{.Name"),
            ParseError::UnexpectedToken {
                expected: TokenKind::ActionEnd,
                found: TokenKind::Ident,
                span: Span::new(
                    Location {
                        offset: 3,
                        row: 0,
                        column: 3,
                    },
                    Location {
                        offset: 7,
                        row: 0,
                        column: 7,
                    }
                ),
            }
        );
    }

    #[test]
    fn test_cond_without_end() {
        assert!(matches!(
            parse_err("{{if true}}hi"),
            ParseError::UnexpectedToken {
                expected: TokenKind::ActionStart,
                found: TokenKind::Eof,
                ..
            }
        ));
    }

    #[test]
    fn test_cond_with_two_body_expressions() {
        assert!(matches!(
            parse_err("{{if true}}a{{.b}}{{end}}"),
            ParseError::UnexpectedToken {
                expected: TokenKind::End,
                found: TokenKind::Dot,
                ..
            }
        ));
    }

    #[test]
    fn test_dot_chain_requires_identifier() {
        assert!(matches!(
            parse_err("{{.a.1}}"),
            ParseError::UnexpectedToken {
                expected: TokenKind::Ident,
                found: TokenKind::Number,
                ..
            }
        ));
    }

    #[test]
    fn test_precedence_order() {
        assert!(Precedence::Lowest < Precedence::Additive);
        assert!(Precedence::Additive < Precedence::Prefix);
        assert_eq!(Precedence::of(TokenKind::Eq), Precedence::Additive);
        assert_eq!(Precedence::of(TokenKind::Dot), Precedence::Prefix);
        assert_eq!(Precedence::of(TokenKind::Text), Precedence::Lowest);
    }
}
