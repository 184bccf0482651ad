mod expr;
#[allow(clippy::module_inception)]
pub mod parser;
mod syntax;
pub mod error;

// Re-export the parser and rule enum for external use
pub use parser::NotationParser;
pub use parser::Rule;
pub use parser::parse;
pub use parser::parse_with_max_depth;
pub use parser::DEFAULT_MAX_DEPTH;

pub use expr::{Expr, ExprDisplay};
pub use syntax::{BinaryOp, Span, UnaryOp};
pub use error::{ParseError, ParseErrorKind};
