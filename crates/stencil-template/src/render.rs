/*
 * render.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The render loop.
//!
//! Text tokens are copied to the output as they arrive. Each action is
//! collected into a token group, parsed, evaluated and written out before
//! the lexer moves on, so nothing parsed in one render is reused.
//!
//! A conditional spans several actions (`{{if c}}body{{end}}`), so an action
//! that starts with `if` keeps the group open until its matching `{{end}}`.

use crate::environment::{Environment, FieldAccessor};
use crate::error::{TemplateError, TemplateResult};
use crate::evaluator::evaluate;
use crate::lexer::{Lexer, TokenSource};
use crate::parser::Parser;
use crate::token::{Token, TokenKind};

/// Render `template` against `data`.
///
/// ```ignore
/// let data = Data::from_iter([("Name", Data::from("World"))]);
/// assert_eq!(render("Hello {{.Name}}", Some(&data))?, "Hello World");
/// ```
pub fn render(template: &str, data: Option<&dyn FieldAccessor>) -> TemplateResult<String> {
    Renderer::new(template).render(data)
}

/// Drives one render of one template.
#[derive(Debug)]
pub struct Renderer<'a> {
    lexer: Lexer<'a>,
}

impl<'a> Renderer<'a> {
    pub fn new(template: &'a str) -> Self {
        Self {
            lexer: Lexer::new(template),
        }
    }

    /// Consume the template and produce the rendered output.
    pub fn render(mut self, data: Option<&dyn FieldAccessor>) -> TemplateResult<String> {
        let env = Environment::new(data);
        let mut out = String::new();

        loop {
            let token = self.lexer.next_token();
            match token.kind {
                TokenKind::Text => out.push_str(&token.text),
                TokenKind::ActionStart => {
                    let group = self.collect_action(token)?;
                    tracing::debug!(tokens = %describe(&group), "collected action");

                    let program = Parser::from_tokens(group).parse()?;
                    for expr in &program.exprs {
                        let value = evaluate(expr, &env);
                        if let Some(err) = value.as_error() {
                            return Err(TemplateError::Eval(err.clone()));
                        }
                        out.push_str(&value.to_string());
                    }
                }
                TokenKind::Eof => return Ok(out),
                kind => {
                    return Err(TemplateError::UnexpectedToken {
                        kind,
                        span: token.span,
                    });
                }
            }
        }
    }

    /// Gather the tokens of the action opened by `start`, delimiters
    /// included.
    ///
    /// Inside an action, end of input, `{{` or text are structural errors.
    /// An action whose first token is `if` opens a block that only closes
    /// with its matching `{{end}}`; text and further actions in between
    /// belong to the group.
    fn collect_action(&mut self, start: Token) -> TemplateResult<Vec<Token>> {
        let mut group = vec![start];
        let mut in_action = true;
        let mut first_in_action = true;
        let mut depth = 0usize;

        loop {
            let token = self.lexer.next_token();

            if !in_action {
                match token.kind {
                    TokenKind::Text => {}
                    TokenKind::ActionStart => {
                        in_action = true;
                        first_in_action = true;
                    }
                    kind => {
                        return Err(TemplateError::UnexpectedToken {
                            kind,
                            span: token.span,
                        });
                    }
                }
                group.push(token);
                continue;
            }

            match token.kind {
                TokenKind::Eof | TokenKind::ActionStart | TokenKind::Text => {
                    return Err(TemplateError::UnexpectedToken {
                        kind: token.kind,
                        span: token.span,
                    });
                }
                TokenKind::ActionEnd => {
                    group.push(token);
                    if depth == 0 {
                        return Ok(group);
                    }
                    in_action = false;
                    continue;
                }
                TokenKind::If if first_in_action => depth += 1,
                // A stray `{{end}}` is left for the parser to reject.
                TokenKind::End if first_in_action => depth = depth.saturating_sub(1),
                _ => {}
            }
            first_in_action = false;
            group.push(token);
        }
    }
}

fn describe(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.kind.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
