use crate::parser::parser::INVALID_NUMBER;
use crate::parser::{Rule, Span};

/// Parser error with the source it refers to.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub source: String,
    pub span: Span,
}

/// Specific kinds of parse errors
#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    /// Unexpected token
    UnexpectedToken { expected: String, found: String },
    /// Invalid number literal
    InvalidNumber { text: String },
    /// Maximum nesting depth exceeded
    MaxDepthExceeded { depth: usize, max_depth: usize },
    /// Nothing to parse
    Empty,
    /// A single name was required (definition target, plot variable)
    ExpectedName { found: String },
    /// A region operator such as `:=` appeared other than exactly once
    OperatorCount { operator: String, found: usize },
    /// Other parse errors (catch-all for Pest errors we don't specifically handle)
    Other { message: String },
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, source: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            source: source.into(),
            span,
        }
    }

    /// Re-anchor an error raised on `fragment` onto the enclosing `source`,
    /// where the fragment starts at byte `offset`.
    pub fn relocate(self, source: &str, offset: usize) -> Self {
        Self {
            kind: self.kind,
            source: source.to_string(),
            span: self.span.offset(offset),
        }
    }

    /// Human-readable message, without location.
    pub fn message(&self) -> String {
        match &self.kind {
            ParseErrorKind::UnexpectedToken { expected, found } => {
                format!("expected {expected}, found {found}")
            }
            ParseErrorKind::InvalidNumber { text } => format!("invalid number '{text}'"),
            ParseErrorKind::MaxDepthExceeded { max_depth, .. } => {
                format!("nesting depth exceeds maximum of {max_depth} levels")
            }
            ParseErrorKind::Empty => "empty expression".to_string(),
            ParseErrorKind::ExpectedName { found } if found.is_empty() => {
                "expected a name".to_string()
            }
            ParseErrorKind::ExpectedName { found } => {
                format!("expected a single name, found '{found}'")
            }
            ParseErrorKind::OperatorCount { operator, found } => {
                format!("expected exactly one '{operator}', found {found}")
            }
            ParseErrorKind::Other { message } => message.clone(),
        }
    }

    /// Stable error code, for documentation lookup.
    pub fn code(&self) -> &'static str {
        match self.kind {
            ParseErrorKind::UnexpectedToken { .. } => "P001",
            ParseErrorKind::InvalidNumber { .. } => "P003",
            ParseErrorKind::MaxDepthExceeded { .. } => "P004",
            ParseErrorKind::Empty => "P005",
            ParseErrorKind::ExpectedName { .. } => "P006",
            ParseErrorKind::OperatorCount { .. } => "P007",
            ParseErrorKind::Other { .. } => "P999",
        }
    }

    pub fn help(&self) -> Option<&'static str> {
        match self.kind {
            ParseErrorKind::MaxDepthExceeded { .. } => {
                Some("Reduce nesting or simplify the expression")
            }
            ParseErrorKind::ExpectedName { .. } => Some("Names look like `a`, `x_1` or `\\alpha`"),
            ParseErrorKind::OperatorCount { .. } => {
                Some("Split the definitions into separate regions")
            }
            _ => None,
        }
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.message())
    }
}

impl core::error::Error for ParseError {}

/// Convert Pest error to human-readable ParseError
pub fn convert_pest_error(err: pest::error::Error<Rule>, source: &str) -> ParseError {
    use pest::error::ErrorVariant;

    let span = match err.location {
        pest::error::InputLocation::Pos(pos) => Span(pos..pos),
        pest::error::InputLocation::Span((start, end)) => Span(start..end),
    };

    let kind = match err.variant {
        ErrorVariant::ParsingError {
            positives,
            negatives,
        } => {
            let expected = format_expected_rules(&positives);
            let found = match negatives.first() {
                Some(rule) => describe_rule(*rule).to_string(),
                None => describe_found(source, span.0.start),
            };
            ParseErrorKind::UnexpectedToken { expected, found }
        }
        ErrorVariant::CustomError { message } if message == INVALID_NUMBER => {
            ParseErrorKind::InvalidNumber {
                text: source.get(span.0.clone()).unwrap_or_default().to_string(),
            }
        }
        ErrorVariant::CustomError { message } => ParseErrorKind::Other { message },
    };

    ParseError::new(kind, source, span)
}

fn describe_rule(rule: Rule) -> &'static str {
    match rule {
        Rule::EOI => "end of input",
        Rule::add | Rule::sub | Rule::mul | Rule::div | Rule::pow | Rule::implicit_mul => {
            "operator"
        }
        Rule::factorial => "'!'",
        Rule::call_args => "argument list",
        _ => "expression",
    }
}

/// Describe the text at `pos` for "found ..." messages.
fn describe_found(source: &str, pos: usize) -> String {
    match source.get(pos..).and_then(|rest| rest.chars().next()) {
        Some(c) => format!("'{c}'"),
        None => "end of input".to_string(),
    }
}

/// Format expected rules in a human-readable way
fn format_expected_rules(rules: &[Rule]) -> String {
    let mut concepts: Vec<&str> = Vec::new();
    for rule in rules {
        let concept = describe_rule(*rule);
        if !concepts.contains(&concept) {
            concepts.push(concept);
        }
    }

    match concepts.split_last() {
        None => "something else".to_string(),
        Some((only, [])) => only.to_string(),
        Some((last, rest)) => format!("{} or {}", rest.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_message() {
        let error = ParseError::new(
            ParseErrorKind::UnexpectedToken {
                expected: "expression".to_string(),
                found: "end of input".to_string(),
            },
            "1 +",
            Span(3..3),
        );

        assert_eq!(error.to_string(), "expected expression, found end of input");
        assert_eq!(error.code(), "P001");
        assert_eq!(error.help(), None);
    }

    #[test]
    fn test_parse_error_is_a_std_error() {
        let error = ParseError::new(ParseErrorKind::Empty, "", Span(0..0));
        let dynamic: &dyn core::error::Error = &error;
        assert_eq!(dynamic.to_string(), "empty expression");
        assert!(dynamic.source().is_none());
    }

    #[test]
    fn test_format_expected_rules() {
        let rules = vec![Rule::number, Rule::ident, Rule::EOI];
        assert_eq!(format_expected_rules(&rules), "expression or end of input");

        let rules = vec![Rule::add, Rule::sub, Rule::number, Rule::EOI];
        assert_eq!(
            format_expected_rules(&rules),
            "operator, expression or end of input"
        );
    }

    #[test]
    fn test_relocate_shifts_span_into_enclosing_source() {
        let error = ParseError::new(ParseErrorKind::Empty, "", Span(0..0));
        let relocated = error.relocate("a := ", 5);
        assert_eq!(relocated.source, "a := ");
        assert_eq!(relocated.span, Span(5..5));
    }
}
