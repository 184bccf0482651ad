//! Expression tree produced by the notation parser.
//!
//! The same tree is used for symbolic results: a `Value::Symbolic` holds an
//! `Expr`, which is why rendering lives here.

use core::fmt;

use crate::parser::{BinaryOp, UnaryOp};
use crate::values::format_significant;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Symbol(String),
    Unary {
        op: UnaryOp,
        expr: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Call {
        function: String,
        args: Vec<Expr>,
    },
}

// Precedence levels for rendering. Binary operators use `BinaryOp::precedence`.
const PREC_NEG: u8 = 3;
const PREC_ATOM: u8 = 5;

impl Expr {
    pub fn number(value: f64) -> Self {
        Expr::Number(value)
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Expr::Symbol(name.into())
    }

    pub fn neg(expr: Expr) -> Self {
        Expr::Unary {
            op: UnaryOp::Neg,
            expr: Box::new(expr),
        }
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn call(function: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call {
            function: function.into(),
            args,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Expr::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Expr::Symbol(name) => Some(name),
            _ => None,
        }
    }

    /// Number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        match self {
            Expr::Number(_) | Expr::Symbol(_) => 1,
            Expr::Unary { expr, .. } => 1 + expr.node_count(),
            Expr::Binary { left, right, .. } => 1 + left.node_count() + right.node_count(),
            Expr::Call { args, .. } => 1 + args.iter().map(Expr::node_count).sum::<usize>(),
        }
    }

    /// Render with numbers rounded to `digits` significant digits.
    pub fn display_with(&self, digits: usize) -> ExprDisplay<'_> {
        ExprDisplay {
            expr: self,
            digits: Some(digits),
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Expr::Number(n) if *n < 0.0 => PREC_NEG,
            Expr::Number(_) | Expr::Symbol(_) | Expr::Call { .. } => PREC_ATOM,
            Expr::Unary { .. } => PREC_NEG,
            Expr::Binary { op, .. } => op.precedence(),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            ExprDisplay {
                expr: self,
                digits: None
            }
        )
    }
}

/// Plain-text rendering of an [`Expr`] (`2*x^2 + sin(x)`).
pub struct ExprDisplay<'a> {
    expr: &'a Expr,
    digits: Option<usize>,
}

impl ExprDisplay<'_> {
    fn child<'b>(&self, expr: &'b Expr) -> ExprDisplay<'b> {
        ExprDisplay {
            expr,
            digits: self.digits,
        }
    }

    fn write_operand(&self, f: &mut fmt::Formatter<'_>, expr: &Expr, parens: bool) -> fmt::Result {
        if parens {
            write!(f, "({})", self.child(expr))
        } else {
            write!(f, "{}", self.child(expr))
        }
    }
}

impl fmt::Display for ExprDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.expr {
            Expr::Number(n) => match self.digits {
                Some(digits) => f.write_str(&format_significant(*n, digits)),
                None => write!(f, "{n}"),
            },
            Expr::Symbol(name) => f.write_str(name),
            Expr::Unary {
                op: UnaryOp::Neg,
                expr,
            } => {
                f.write_str("-")?;
                self.write_operand(f, expr, expr.precedence() <= PREC_NEG)
            }
            Expr::Binary { op, left, right } => {
                let prec = op.precedence();
                let left_parens = match op {
                    // `^` is right-associative: `(a^b)^c` keeps its parentheses.
                    BinaryOp::Pow => left.precedence() <= prec,
                    _ => left.precedence() < prec,
                };
                let right_parens = match op {
                    BinaryOp::Pow => right.precedence() < prec,
                    BinaryOp::Sub | BinaryOp::Div => right.precedence() <= prec,
                    BinaryOp::Add | BinaryOp::Mul => right.precedence() < prec,
                };
                self.write_operand(f, left, left_parens)?;
                write!(f, "{op}")?;
                self.write_operand(f, right, right_parens)
            }
            Expr::Call { function, args } if function == "factorial" && args.len() == 1 => {
                self.write_operand(f, &args[0], args[0].precedence() < PREC_ATOM)?;
                f.write_str("!")
            }
            Expr::Call { function, args } => {
                write!(f, "{function}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", self.child(arg))?;
                }
                f.write_str(")")
            }
        }
    }
}
