use lazy_static::lazy_static;
use pest::Parser;
use pest::iterators::Pair;
use pest::pratt_parser::{Assoc, Op, PrattParser};
use pest_derive::Parser;

use crate::parser::error::{ParseError, ParseErrorKind, convert_pest_error};
use crate::parser::{BinaryOp, Expr, Span};

/// Default limit on bracket nesting, checked before handing the text to pest.
pub const DEFAULT_MAX_DEPTH: usize = 256;

lazy_static! {
    // Note: precedence is defined lowest to highest.
    static ref PRATT_PARSER: PrattParser<Rule> = PrattParser::new()
        // (lowest precedence)
        .op(Op::infix(Rule::add, Assoc::Left) | Op::infix(Rule::sub, Assoc::Left))
        .op(
            Op::infix(Rule::mul, Assoc::Left)
                | Op::infix(Rule::div, Assoc::Left)
                | Op::infix(Rule::implicit_mul, Assoc::Left)
        )
        .op(Op::prefix(Rule::neg) | Op::prefix(Rule::pos))
        .op(Op::infix(Rule::pow, Assoc::Right))          // `^` (right-assoc)
        .op(Op::postfix(Rule::factorial))                // `!`
        // (highest precedence)
        ;
}

#[derive(Parser)]
#[grammar = "parser/notation.pest"]
pub struct NotationParser;

type PestError = pest::error::Error<Rule>;

/// Message of the custom error raised for number literals that do not fit
/// an `f64` (`1e400`).
pub(crate) const INVALID_NUMBER: &str = "invalid number literal";

fn custom_error(message: &str, span: pest::Span<'_>) -> PestError {
    pest::error::Error::new_from_span(
        pest::error::ErrorVariant::CustomError {
            message: message.to_string(),
        },
        span,
    )
}

fn next_inner<'i>(
    pairs: &mut pest::iterators::Pairs<'i, Rule>,
    span: pest::Span<'i>,
) -> Result<Pair<'i, Rule>, PestError> {
    pairs
        .next()
        .ok_or_else(|| custom_error("missing expected pair in rule", span))
}

fn parse_expr(pair: Pair<Rule>) -> Result<Expr, PestError> {
    let span = pair.as_span();
    match pair.as_rule() {
        Rule::main | Rule::grouped | Rule::braced => {
            parse_expr(next_inner(&mut pair.into_inner(), span)?)
        }

        Rule::expression => PRATT_PARSER
            .map_primary(|primary| parse_expr(primary))
            .map_prefix(|op, rhs| match op.as_rule() {
                Rule::neg => Ok(Expr::neg(rhs?)),
                Rule::pos => rhs,
                _ => unreachable!("Unknown prefix operator: {:?}", op.as_rule()),
            })
            .map_infix(|lhs, op, rhs| {
                let op = match op.as_rule() {
                    Rule::add => BinaryOp::Add,
                    Rule::sub => BinaryOp::Sub,
                    Rule::mul | Rule::implicit_mul => BinaryOp::Mul,
                    Rule::div => BinaryOp::Div,
                    Rule::pow => BinaryOp::Pow,
                    _ => unreachable!("Unknown binary operator: {:?}", op.as_rule()),
                };
                Ok(Expr::binary(op, lhs?, rhs?))
            })
            .map_postfix(|lhs, op| match op.as_rule() {
                Rule::factorial => Ok(Expr::call("factorial", vec![lhs?])),
                _ => unreachable!("Unknown postfix operator: {:?}", op.as_rule()),
            })
            .parse(pair.into_inner()),

        Rule::number => {
            let value: f64 = pair
                .as_str()
                .parse()
                .map_err(|_| custom_error(INVALID_NUMBER, span))?;
            if !value.is_finite() {
                return Err(custom_error(INVALID_NUMBER, span));
            }
            Ok(Expr::Number(value))
        }

        Rule::ident => Ok(Expr::Symbol(normalize_ident(pair.as_str()))),

        Rule::greek => Ok(Expr::Symbol(pair.as_str().trim_start_matches('\\').to_string())),

        Rule::unicode_greek => Ok(Expr::Symbol(unicode_name(pair.as_str()).to_string())),

        Rule::frac => {
            let mut inner = pair.into_inner();
            let numerator = parse_expr(next_inner(&mut inner, span)?)?;
            let denominator = parse_expr(next_inner(&mut inner, span)?)?;
            Ok(Expr::binary(BinaryOp::Div, numerator, denominator))
        }

        Rule::sqrt => {
            let mut inner = pair.into_inner();
            let first = next_inner(&mut inner, span)?;
            if first.as_rule() == Rule::sqrt_index {
                let index = parse_expr(next_inner(&mut first.into_inner(), span)?)?;
                let radicand = parse_expr(next_inner(&mut inner, span)?)?;
                Ok(Expr::call("root", vec![radicand, index]))
            } else {
                Ok(Expr::call("sqrt", vec![parse_expr(first)?]))
            }
        }

        Rule::abs => {
            let value = parse_expr(next_inner(&mut pair.into_inner(), span)?)?;
            Ok(Expr::call("abs", vec![value]))
        }

        Rule::call => {
            let mut inner = pair.into_inner();
            let function = normalize_ident(next_inner(&mut inner, span)?.as_str());
            let args = parse_args(next_inner(&mut inner, span)?)?;
            Ok(Expr::Call { function, args })
        }

        Rule::command_call => {
            let mut inner = pair.into_inner();
            let function = next_inner(&mut inner, span)?
                .as_str()
                .trim_start_matches('\\')
                .to_string();
            let operand = next_inner(&mut inner, span)?;
            let args = if operand.as_rule() == Rule::call_args {
                parse_args(operand)?
            } else {
                vec![parse_expr(operand)?]
            };
            Ok(Expr::Call { function, args })
        }

        _ => Err(custom_error(
            &format!("Unhandled rule: {:?}", pair.as_rule()),
            span,
        )),
    }
}

fn parse_args(pair: Pair<Rule>) -> Result<Vec<Expr>, PestError> {
    pair.into_inner().map(parse_expr).collect()
}

/// `x_{12}` and `x_12` name the same symbol.
fn normalize_ident(text: &str) -> String {
    text.chars().filter(|c| *c != '{' && *c != '}').collect()
}

fn unicode_name(text: &str) -> &str {
    match text {
        "π" => "pi",
        "θ" => "theta",
        "α" => "alpha",
        "β" => "beta",
        "γ" => "gamma",
        "λ" => "lambda",
        "μ" => "mu",
        "σ" => "sigma",
        "φ" => "phi",
        "ω" => "omega",
        other => other,
    }
}

/// Find the deepest bracket nesting in `source`, failing at the first
/// position that goes past `max_depth`.
fn check_depth(source: &str, max_depth: usize) -> Result<(), ParseError> {
    let mut depth = 0usize;
    for (pos, c) in source.char_indices() {
        match c {
            '(' | '[' | '{' => {
                depth += 1;
                if depth > max_depth {
                    return Err(ParseError::new(
                        ParseErrorKind::MaxDepthExceeded { depth, max_depth },
                        source,
                        Span::new(pos, pos + 1),
                    ));
                }
            }
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    Ok(())
}

/// Parse math notation into an expression tree.
pub fn parse(source: &str) -> Result<Expr, ParseError> {
    parse_with_max_depth(source, DEFAULT_MAX_DEPTH)
}

/// Parse with a custom bracket-nesting limit.
pub fn parse_with_max_depth(source: &str, max_depth: usize) -> Result<Expr, ParseError> {
    if source.trim().is_empty() {
        return Err(ParseError::new(
            ParseErrorKind::Empty,
            source,
            Span::new(0, source.len()),
        ));
    }
    check_depth(source, max_depth)?;

    let mut pairs = NotationParser::parse(Rule::main, source)
        .map_err(|e| convert_pest_error(e, source))?;
    let pair = pairs.next().ok_or_else(|| {
        ParseError::new(
            ParseErrorKind::Other {
                message: "missing expected pair in rule".to_string(),
            },
            source,
            Span::new(0, source.len()),
        )
    })?;
    parse_expr(pair).map_err(|e| convert_pest_error(e, source))
}
