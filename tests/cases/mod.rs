#![allow(dead_code)]

use once_cell::sync::Lazy;
use slate::{Region, RegionOutput, Worksheet, WorksheetOptions};

/// One worksheet shared by every case; it only holds options.
pub static WORKSHEET: Lazy<Worksheet> = Lazy::new(|| Worksheet::new(WorksheetOptions::default()));

/// Evaluate a single expression and render it like a single-shot request.
pub fn eval(input: &str) -> Result<String, String> {
    let digits = WORKSHEET.options().significant_digits;
    match WORKSHEET.evaluate_expression(input) {
        Ok(value) => Ok(render(RegionOutput::new(&Ok(value), digits))),
        Err(err) => Err(err.render()),
    }
}

/// Evaluate `(id, content, x, y)` regions and render every result in
/// input order.
pub fn eval_regions(regions: &[(&str, &str, f64, f64)]) -> Vec<(String, String)> {
    let regions: Vec<Region> = regions
        .iter()
        .map(|(id, content, x, y)| Region::new(*id, *content, *x, *y))
        .collect();
    let digits = WORKSHEET.options().significant_digits;
    WORKSHEET
        .evaluate(&regions)
        .iter()
        .map(|(id, outcome)| (id.to_string(), render(RegionOutput::new(outcome, digits))))
        .collect()
}

/// Text results as-is, payloads as compact JSON.
pub fn render(output: RegionOutput) -> String {
    match output {
        RegionOutput::Text(text) => text,
        payload => serde_json::to_string(&payload).unwrap_or_default(),
    }
}

/// Builds a test from an input and its expected rendering.
///
/// Single expressions:
///
/// ```ignore
/// test_case!(half, input: "\\frac{1}{2}", result: Ok("0.5"));
/// test_case!(dangling, input: "1 +", result: Err("Invalid expression"));
/// ```
///
/// `Err` only needs to be a substring of the rendered error.
///
/// Worksheets, as `(id, content, x, y)` regions with the expected rendering
/// for every id:
///
/// ```ignore
/// test_case!(
///     local,
///     regions: [("1", "a := 5", 0.0, 0.0), ("2", "a + 2", 0.0, 50.0)],
///     results: { "1" => "5", "2" => "7" },
/// );
/// ```
#[macro_export]
macro_rules! test_case {
    ($name:ident, input: $input:expr, result: Ok($expected:expr) $(,)?) => {
        #[test]
        fn $name() {
            pretty_assertions::assert_eq!($crate::cases::eval($input), Ok($expected.to_string()));
        }
    };
    ($name:ident, input: $input:expr, result: Err($expected:expr) $(,)?) => {
        #[test]
        fn $name() {
            match $crate::cases::eval($input) {
                Err(err) => assert!(
                    err.contains($expected),
                    "error {:?} does not contain {:?}",
                    err,
                    $expected
                ),
                Ok(value) => panic!("expected an error, got {:?}", value),
            }
        }
    };
    (
        $name:ident,
        regions: [$(($id:expr, $content:expr, $x:expr, $y:expr)),* $(,)?],
        results: { $($rid:expr => $expected:expr),* $(,)? } $(,)?
    ) => {
        #[test]
        fn $name() {
            let results = $crate::cases::eval_regions(&[$(($id, $content, $x as f64, $y as f64)),*]);
            let expected: Vec<(String, String)> =
                vec![$(($rid.to_string(), $expected.to_string())),*];
            pretty_assertions::assert_eq!(results, expected);
        }
    };
}
