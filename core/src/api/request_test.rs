use super::*;
use crate::worksheet::Worksheet;
use indoc::indoc;
use pretty_assertions::assert_eq;
use serde_json::{Value as Json, json};

fn respond(body: &str) -> Result<Json, RequestError> {
    let request = parse_request(body)?;
    let response = handle_request(&Worksheet::default(), request)?;
    Ok(serde_json::to_value(&response).unwrap())
}

#[test]
fn test_single_expression() {
    assert_eq!(
        respond(r#"{"expression": "1 + 1"}"#).unwrap(),
        json!({"result": "2"})
    );
    assert_eq!(
        respond(r#"{"expression": "\\frac{1}{2}"}"#).unwrap(),
        json!({"result": "0.5"})
    );
}

#[test]
fn test_single_expression_errors() {
    let err = respond(r#"{"expression": "1 +"}"#).unwrap_err();
    assert_eq!(err.status(), 400);
    assert!(err.to_string().starts_with("Invalid expression:"));

    let err = respond(r#"{"expression": ""}"#).unwrap_err();
    assert!(matches!(err, RequestError::NoExpression));
    assert_eq!(
        serde_json::to_value(err.to_response()).unwrap(),
        json!({"error": "No expression provided"})
    );

    let err = respond(r#"{"expression": "   "}"#).unwrap_err();
    assert!(matches!(err, RequestError::NoExpression));
}

#[test]
fn test_missing_fields_and_bad_json() {
    let err = respond("{}").unwrap_err();
    assert!(matches!(err, RequestError::MissingField));
    assert_eq!(err.status(), 400);

    let err = respond("{not json").unwrap_err();
    assert!(matches!(err, RequestError::InvalidJson(_)));
    assert_eq!(err.status(), 400);
}

#[test]
fn test_worksheet_request() {
    let body = indoc! {r#"
        {
          "regions": [
            {"id": "use", "content": "a + 2", "x": 0, "y": 100},
            {"id": "def", "content": "a := 5", "x": 0, "y": 0},
            {"id": "bad", "content": "c * 2", "x": 0, "y": 200},
            {"id": 7, "content": "g ≡ 20", "x": 10, "y": 300},
            {"id": "glob", "content": "g + 5", "x": 0, "y": 0}
          ]
        }
    "#};
    let response = respond(body).unwrap();
    assert_eq!(
        response,
        json!({
            "results": {
                "use": "7",
                "def": "5",
                "bad": "Error: Undefined Variable: c",
                "7": "20",
                "glob": "25"
            }
        })
    );
}

#[test]
fn test_results_keep_input_order() {
    let body = indoc! {r#"
        {"regions": [
          {"id": "z", "content": "1", "x": 0, "y": 9},
          {"id": "a", "content": "2", "x": 0, "y": 1}
        ]}
    "#};
    let request = parse_request(body).unwrap();
    let response = handle_request(&Worksheet::default(), request).unwrap();
    let text = serde_json::to_string(&response).unwrap();
    assert_eq!(text, r#"{"results":{"z":"1","a":"2"}}"#);
}

#[test]
fn test_regions_win_over_expression() {
    let body = indoc! {r#"
        {
          "expression": "1 + 1",
          "regions": [{"id": "r", "content": "3", "x": 0, "y": 0}]
        }
    "#};
    assert_eq!(respond(body).unwrap(), json!({"results": {"r": "3"}}));
}

#[test]
fn test_plot_payload() {
    let body = r#"{"regions": [{"id": "p", "content": "plot(x^2, x, -5, 5)", "x": 0, "y": 0}]}"#;
    let response = respond(body).unwrap();
    let plot = &response["results"]["p"];
    assert_eq!(plot["type"], json!("plot"));

    let data = plot["data"].as_array().unwrap();
    assert_eq!(data.len(), 100);
    assert_eq!(data[0], json!({"x": -5.0, "y": 25.0}));
    assert_eq!(data[99], json!({"x": 5.0, "y": 25.0}));
}

#[test]
fn test_plot_missing_samples_are_null() {
    let body = r#"{"regions": [{"id": "p", "content": "plot(\\ln(x), x, 0, 1)", "x": 0, "y": 0}]}"#;
    let response = respond(body).unwrap();
    let data = response["results"]["p"]["data"].as_array().unwrap();
    assert_eq!(data[0], json!({"x": 0.0, "y": null}));
    assert_eq!(data[99], json!({"x": 1.0, "y": 0.0}));
}

#[test]
fn test_plot_errors_render_as_strings() {
    let body = r#"{"regions": [{"id": "p", "content": "plot(sin(x), x)", "x": 0, "y": 0}]}"#;
    let response = respond(body).unwrap();
    let text = response["results"]["p"].as_str().unwrap();
    assert!(text.contains("Error: plot"), "{}", text);
}

#[test]
fn test_single_expression_plot() {
    let response = respond(r#"{"expression": "plot(x, x, 0, 1)"}"#).unwrap();
    assert_eq!(response["result"]["type"], json!("plot"));
}

#[test]
fn test_significant_digits_option() {
    let worksheet = Worksheet::new(WorksheetOptions {
        significant_digits: 2,
        ..WorksheetOptions::default()
    });
    let request = parse_request(r#"{"expression": "2/3"}"#).unwrap();
    let response = handle_request(&worksheet, request).unwrap();
    assert_eq!(
        response,
        Response::Expression {
            result: RegionOutput::Text("0.67".to_string())
        }
    );
}
