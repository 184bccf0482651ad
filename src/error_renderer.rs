//! Error rendering using ariadne
//!
//! Parse errors carry the source they refer to and a byte span, so they can
//! be shown with the offending notation underlined. Other region errors have
//! no location and render as their plain wire message.

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use slate_core::parser::ParseError;
use slate_core::worksheet::RegionError;
use std::io::Write;

const SOURCE_ID: &str = "<input>";

/// Render a parse error with formatting to stderr
///
/// # Example
/// ```no_run
/// use slate::{parse, render_parse_error};
///
/// if let Err(e) = parse("1 +") {
///     render_parse_error(&e);
/// }
/// ```
pub fn render_parse_error(error: &ParseError) {
    render_to_writer(error, &mut std::io::stderr(), true).ok();
}

/// Render a parse error to a specific writer
pub fn render_parse_error_to(error: &ParseError, writer: &mut dyn Write) -> std::io::Result<()> {
    render_to_writer(error, writer, true)
}

/// Render a parse error to a String (for logs, web UIs, etc.)
pub fn render_parse_error_to_string(error: &ParseError) -> String {
    let mut buf = Vec::new();
    render_to_writer(error, &mut buf, true).ok();
    String::from_utf8_lossy(&buf).to_string()
}

/// Same as `render_parse_error_to_string`, without ANSI color codes.
pub fn render_parse_error_to_string_no_color(error: &ParseError) -> String {
    let mut buf = Vec::new();
    render_to_writer(error, &mut buf, false).ok();
    String::from_utf8_lossy(&buf).to_string()
}

/// Render any region error without color.
///
/// Parse failures get a source snippet; everything else is the `Error: `
/// line a worksheet response would carry.
pub fn render_region_error_to_string_no_color(error: &RegionError) -> String {
    match error {
        RegionError::Parse(parse_error) => render_parse_error_to_string_no_color(parse_error),
        other => format!("{}\n", other.render()),
    }
}

fn render_to_writer(
    error: &ParseError,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    let span = clamp(error.span.0.clone(), error.source.len());
    let message = error.message();

    let mut report = Report::build(ReportKind::Error, (SOURCE_ID, span.clone()))
        .with_code(error.code())
        .with_message(format!("Invalid expression: {message}"))
        .with_config(
            Config::default()
                .with_color(use_color)
                .with_index_type(IndexType::Byte),
        )
        .with_label(
            Label::new((SOURCE_ID, span))
                .with_message(&message)
                .with_color(Color::Red),
        );

    if let Some(help) = error.help() {
        report = report.with_help(help);
    }

    report
        .finish()
        .write((SOURCE_ID, Source::from(error.source.as_str())), &mut *writer)
}

/// Keep the span inside the source so the label always has a line to sit on.
fn clamp(span: std::ops::Range<usize>, len: usize) -> std::ops::Range<usize> {
    let start = span.start.min(len);
    let end = span.end.clamp(start, len);
    start..end
}

#[cfg(test)]
mod tests {
    use super::*;
    use slate_core::parser::parse;
    use slate_core::worksheet::{Region, classify};

    #[test]
    fn test_render_parse_error() {
        let err = parse("1 + + * 2").unwrap_err();
        let output = render_parse_error_to_string_no_color(&err);

        assert!(output.contains("Error"));
        assert!(output.contains("Invalid expression"));
        assert!(output.contains("1 + + * 2"));
    }

    #[test]
    fn test_render_includes_code_and_help() {
        let source = format!("{}1{}", "(".repeat(300), ")".repeat(300));
        let err = parse(&source).unwrap_err();
        let output = render_parse_error_to_string_no_color(&err);

        assert!(output.contains(err.code()));
        assert!(output.contains("Reduce nesting"));
    }

    #[test]
    fn test_render_error_at_end_of_input() {
        let err = parse("1 +").unwrap_err();
        let output = render_parse_error_to_string_no_color(&err);

        assert!(!output.is_empty());
        assert!(output.lines().count() > 1);
    }

    #[test]
    fn test_no_color_has_no_escape_codes() {
        let err = parse("1 +").unwrap_err();
        assert!(!render_parse_error_to_string_no_color(&err).contains('\u{1b}'));
    }

    #[test]
    fn test_render_region_error() {
        let region = Region::new("r", "a := 1 := 2", 0.0, 0.0);
        let err = classify(&region).unwrap_err();
        let output = render_region_error_to_string_no_color(&err);
        assert!(output.contains("a := 1 := 2"));

        let undefined = RegionError::UndefinedVariable(vec!["b".to_string()]);
        assert_eq!(
            render_region_error_to_string_no_color(&undefined),
            "Error: Undefined Variable: b\n"
        );
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(3..3, 3), 3..3);
        assert_eq!(clamp(5..9, 3), 3..3);
        assert_eq!(clamp(1..9, 3), 1..3);
    }
}
