//! Wire types for evaluation requests and responses.
//!
//! Two request shapes are accepted:
//!
//! - `{"expression": "1 + 1"}` evaluates one piece of notation and answers
//!   `{"result": "2"}`.
//! - `{"regions": [{"id", "content", "x", "y"}, ...]}` evaluates a worksheet
//!   and answers `{"results": {"<id>": "<result>", ...}}`.
//!
//! Region failures are rendered as strings starting with `Error: `. Plots
//! are rendered as `{"type": "plot", "data": [{"x": .., "y": ..}, ...]}`.

use serde::{Deserialize, Serialize, Serializer};
use tracing::debug;

use crate::api::RequestError;
use crate::values::{PlotPoint, Value};
use crate::worksheet::{Region, RegionError, Worksheet, WorksheetResults};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub expression: Option<String>,
    /// Takes precedence over `expression` when both are present.
    #[serde(default)]
    pub regions: Option<Vec<Region>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Expression { result: RegionOutput },
    Worksheet { results: RenderedResults },
}

/// The rendered result of one region.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RegionOutput {
    Text(String),
    Payload(Payload),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Payload {
    Plot { data: Vec<PlotPoint> },
}

impl RegionOutput {
    pub fn new(outcome: &Result<Value, RegionError>, digits: usize) -> Self {
        match outcome {
            Ok(Value::PlotSeries(points)) => RegionOutput::Payload(Payload::Plot {
                data: points.clone(),
            }),
            Ok(value) => RegionOutput::Text(value.render(digits)),
            Err(err) => RegionOutput::Text(err.render()),
        }
    }
}

/// Rendered results keyed by region id, serialized as a JSON object in input
/// order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedResults(pub Vec<(String, RegionOutput)>);

impl RenderedResults {
    pub fn new(results: &WorksheetResults, digits: usize) -> Self {
        Self(
            results
                .iter()
                .map(|(id, outcome)| (id.to_string(), RegionOutput::new(outcome, digits)))
                .collect(),
        )
    }

    pub fn get(&self, id: &str) -> Option<&RegionOutput> {
        self.0
            .iter()
            .find(|(entry_id, _)| entry_id == id)
            .map(|(_, output)| output)
    }
}

impl Serialize for RenderedResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(id, output)| (id, output)))
    }
}

/// Deserialize a request body.
pub fn parse_request(json: &str) -> Result<Request, RequestError> {
    Ok(serde_json::from_str(json)?)
}

/// Evaluate a request.
///
/// Worksheet failures are per region and never fail the request. A failing
/// single-shot expression does, mirroring a 400 response.
pub fn handle_request(worksheet: &Worksheet, request: Request) -> Result<Response, RequestError> {
    let digits = worksheet.options().significant_digits;

    if let Some(regions) = request.regions {
        debug!(regions = regions.len(), "worksheet request");
        let results = worksheet.evaluate(&regions);
        return Ok(Response::Worksheet {
            results: RenderedResults::new(&results, digits),
        });
    }

    match request.expression {
        Some(expression) if !expression.trim().is_empty() => {
            debug!(expression = expression.as_str(), "expression request");
            let value = worksheet.evaluate_expression(&expression)?;
            Ok(Response::Expression {
                result: RegionOutput::new(&Ok(value), digits),
            })
        }
        Some(_) => Err(RequestError::NoExpression),
        None => Err(RequestError::MissingField),
    }
}
