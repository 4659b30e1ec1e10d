/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Action template engine.
//!
//! Templates are literal text with embedded actions:
//!
//! - Field access: `{{.Name}}`, nested `{{.owner.name}}`, or `{{.}}` for the
//!   data itself
//! - Literals: `{{42}}`, `{{true}}`
//! - Binary operators on one precedence tier, left-associative:
//!   `{{.Count + 1}}`, `{{.A - .B}}`, `{{.A > 2}}`, `{{.A < 2}}`, `{{.A == 2}}`
//! - Conditionals: `{{if .Count > 0}}some{{end}}`
//!
//! # Architecture
//!
//! Rendering is a three-stage pipeline driven by [`Renderer`]:
//!
//! 1. [`Lexer`] turns source text into [`Token`]s, switching between text and
//!    action mode at `{{` and `}}`.
//! 2. [`Parser`] turns the tokens of one action into an [`Expr`].
//! 3. [`evaluate`] computes a [`Value`] for the expression against the
//!    caller's data, seen through the [`FieldAccessor`] trait.
//!
//! # Example
//!
//! ```ignore
//! use stencil_template::{Data, render};
//!
//! let data = Data::from_iter([("Name", Data::from("World"))]);
//! let output = render("Hello {{.Name}}", Some(&data))?;
//! assert_eq!(output, "Hello World");
//! ```

pub mod ast;
pub mod data;
pub mod environment;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod render;
pub mod span;
pub mod token;
pub mod value;

// Re-export main types at crate root
pub use ast::{Expr, InfixOp, PrefixOp, Program};
pub use data::Data;
pub use environment::{Environment, FieldAccessor, Scalar};
pub use error::{EvalError, ParseError, ParseResult, TemplateError, TemplateResult};
pub use evaluator::evaluate;
pub use lexer::{Lexer, Mode, TokenSlice, TokenSource};
pub use parser::{Parser, Precedence};
pub use render::{Renderer, render};
pub use span::{Location, Span};
pub use token::{Token, TokenKind};
pub use value::Value;
