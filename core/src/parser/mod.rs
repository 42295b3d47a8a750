//! Trigger expression parser.
//!
//! Turns the text of a trigger (`stateno = 200 && time > 10`) into an
//! arena-allocated [`Expr`] tree. Variables and arrays are bound to their
//! implementations here, so evaluation never looks names up again.

mod error;
mod parsed_expr;
pub mod parser;
mod scanner;
mod syntax;

pub use error::{ParseError, ParseErrorKind};
pub use parsed_expr::{Expr, Literal};
pub use parser::{DEFAULT_MAX_DEPTH, Parser, parse, parse_with_max_depth};
pub use syntax::{BinaryOp, BoolOp, ComparisonOp, Span, UnaryOp};

#[cfg(test)]
mod parse_test;
