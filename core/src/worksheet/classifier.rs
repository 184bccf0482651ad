//! Decide what a region is: a global or local definition, a plot directive, or
//! a plain expression.
//!
//! Decision order, first match wins:
//!
//! 1. A symbolic-output marker (`→`, `->`, `\to`, `\rightarrow`) is stripped
//!    together with everything after it, and the region is flagged symbolic.
//! 2. `≡` / `\equiv` makes a global definition.
//! 3. `:=` / `\coloneq` / `\coloneqq` / `≔` makes a local definition.
//! 4. `plot(...)` (after one optional trailing `=`) is a plot directive.
//! 5. Anything else is an expression (one trailing `=` stripped).

use core::ops::Range;

use crate::parser::{
    DEFAULT_MAX_DEPTH, Expr, ParseError, ParseErrorKind, Span, parse_with_max_depth,
};
use crate::worksheet::{ClassifiedRegion, Region, RegionBody, RegionError, RegionKind};

const SYMBOLIC_MARKERS: &[&str] = &["→", "->", "\\rightarrow", "\\to"];
const GLOBAL_OPERATORS: &[&str] = &["≡", "\\equiv"];
const LOCAL_OPERATORS: &[&str] = &[":=", "≔", "\\coloneqq", "\\coloneq"];

/// Classify a region with the default parser nesting limit.
pub fn classify(region: &Region) -> Result<ClassifiedRegion, RegionError> {
    classify_with_max_depth(region, DEFAULT_MAX_DEPTH)
}

/// Classify a region, parsing its operands with the given nesting limit.
///
/// Parse errors are reported against the region's full content.
pub fn classify_with_max_depth(
    region: &Region,
    max_depth: usize,
) -> Result<ClassifiedRegion, RegionError> {
    let source = region.content.as_str();
    let classified = |kind, bound_name, body, symbolic| ClassifiedRegion {
        id: region.id.clone(),
        x: region.x,
        y: region.y,
        kind,
        bound_name,
        body,
        symbolic,
    };

    let (text, symbolic) = match find_operators(source, SYMBOLIC_MARKERS).first() {
        Some((marker, _)) => (0..marker.start, true),
        None => (0..source.len(), false),
    };

    for (operators, kind) in [
        (GLOBAL_OPERATORS, RegionKind::GlobalDefinition),
        (LOCAL_OPERATORS, RegionKind::LocalDefinition),
    ] {
        if let Some((name, body)) = split_definition(source, text.clone(), operators, max_depth)? {
            return Ok(classified(kind, Some(name), RegionBody::Expr(body), symbolic));
        }
    }

    let text = strip_trailing_equals(source, text);
    if let Some(arguments) = plot_arguments(&source[text.clone()]) {
        return Ok(classified(
            RegionKind::Plot,
            None,
            RegionBody::Plot(arguments.to_string()),
            symbolic,
        ));
    }

    let body = parse_fragment(source, text, max_depth)?;
    Ok(classified(
        RegionKind::Expression,
        None,
        RegionBody::Expr(body),
        symbolic,
    ))
}

/// Split `name <op> body` if `text` contains one of `operators`.
///
/// Returns `Ok(None)` when no operator occurs, and an error when more than
/// one does.
fn split_definition(
    source: &str,
    text: Range<usize>,
    operators: &[&'static str],
    max_depth: usize,
) -> Result<Option<(String, Expr)>, RegionError> {
    let found = find_operators(&source[text.clone()], operators);
    let operator = match found.as_slice() {
        [] => return Ok(None),
        [(operator, _)] => shift(operator, text.start),
        [(_, symbol), (second, _), ..] => {
            let second = shift(second, text.start);
            return Err(ParseError::new(
                ParseErrorKind::OperatorCount {
                    operator: symbol.to_string(),
                    found: found.len(),
                },
                source,
                Span(second),
            )
            .into());
        }
    };

    let name = parse_name(source, text.start..operator.start, max_depth)?;
    let body = strip_trailing_equals(source, operator.end..text.end);
    let body = parse_fragment(source, body, max_depth)?;
    Ok(Some((name, body)))
}

fn shift(range: &Range<usize>, offset: usize) -> Range<usize> {
    range.start + offset..range.end + offset
}

/// Byte ranges of every occurrence of any of `operators` in `text`, left to
/// right. Commands (`\to`) only match when not followed by a letter.
fn find_operators(text: &str, operators: &[&'static str]) -> Vec<(Range<usize>, &'static str)> {
    let mut found = Vec::new();
    let mut pos = 0;
    while let Some(rest) = text.get(pos..).filter(|rest| !rest.is_empty()) {
        let matched = operators
            .iter()
            .find(|operator| rest.starts_with(**operator) && ends_command(rest, operator));
        match matched {
            Some(operator) => {
                found.push((pos..pos + operator.len(), *operator));
                pos += operator.len();
            }
            None => pos += rest.chars().next().map_or(1, char::len_utf8),
        }
    }
    found
}

fn ends_command(rest: &str, operator: &str) -> bool {
    !operator.starts_with('\\')
        || !rest[operator.len()..].starts_with(|c: char| c.is_ascii_alphabetic())
}

/// Drop one trailing `=` (and the whitespace around it) from the range.
fn strip_trailing_equals(source: &str, text: Range<usize>) -> Range<usize> {
    let trimmed = source[text.clone()].trim_end();
    match trimmed.strip_suffix('=') {
        Some(rest) => text.start..text.start + rest.len(),
        None => text,
    }
}

/// The text between `plot(` and the final `)` of `text`.
///
/// `None` when the parenthesis opened after `plot` closes before the end
/// (`plot(x) + plot(y)`). Brackets left open inside are kept for
/// `split_arguments` to report.
fn plot_arguments(text: &str) -> Option<&str> {
    let inner = text
        .trim()
        .strip_prefix("plot")?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')?;
    let mut depth = 0usize;
    for c in inner.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.checked_sub(1)?,
            _ => {}
        }
    }
    Some(inner)
}

fn parse_fragment(
    source: &str,
    text: Range<usize>,
    max_depth: usize,
) -> Result<Expr, RegionError> {
    parse_with_max_depth(&source[text.clone()], max_depth)
        .map_err(|err| err.relocate(source, text.start).into())
}

/// Parse a definition target, which must be a single name (`a`, `x_1`,
/// `\alpha`).
fn parse_name(source: &str, text: Range<usize>, max_depth: usize) -> Result<String, RegionError> {
    match parse_with_max_depth(&source[text.clone()], max_depth) {
        Ok(Expr::Symbol(name)) => Ok(name),
        _ => Err(ParseError::new(
            ParseErrorKind::ExpectedName {
                found: source[text.clone()].trim().to_string(),
            },
            source,
            Span(text),
        )
        .into()),
    }
}
