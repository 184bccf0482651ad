//! Turns one classified region into its result, reading and writing the
//! shared symbol table.

use tracing::{debug, trace};

use crate::api::WorksheetOptions;
use crate::evaluator::{Evaluator, Mode, free_symbols};
use crate::parser::{Expr, ParseError, ParseErrorKind, Span, parse_with_max_depth};
use crate::symbol_table::SymbolTable;
use crate::values::{PlotPoint, Value};
use crate::worksheet::plot::{linspace, split_arguments};
use crate::worksheet::{ClassifiedRegion, PLOT_SIGNATURE, RegionBody, RegionError};

pub struct EvaluationAdapter<'o> {
    options: &'o WorksheetOptions,
}

impl<'o> EvaluationAdapter<'o> {
    pub fn new(options: &'o WorksheetOptions) -> Self {
        Self { options }
    }

    /// Evaluate `region` against `table`.
    ///
    /// A successful definition binds its value under the region's name and
    /// also returns it. A failed one leaves the table untouched.
    pub fn evaluate(
        &self,
        region: &ClassifiedRegion,
        table: &mut SymbolTable,
    ) -> Result<Value, RegionError> {
        match &region.body {
            RegionBody::Plot(arguments) => self.plot(arguments, table),
            RegionBody::Expr(expr) => {
                let value = self.resolve(expr, region.symbolic, table)?;
                if let Some(name) = &region.bound_name {
                    let previous = table.bind(name, value.clone())?;
                    debug!(
                        name = name.as_str(),
                        value = %value,
                        redefined = previous.is_some(),
                        "bound"
                    );
                }
                Ok(value)
            }
        }
    }

    fn evaluator<'t>(&self, table: &'t SymbolTable) -> Evaluator<'t> {
        Evaluator::new(self.options.evaluator, table)
    }

    fn resolve(
        &self,
        expr: &Expr,
        symbolic: bool,
        table: &SymbolTable,
    ) -> Result<Value, RegionError> {
        let mode = if symbolic {
            Mode::Symbolic
        } else {
            Mode::Numeric
        };
        Ok(self.evaluator(table).evaluate(expr, mode)?)
    }

    /// `plot(function, variable, start, end)` sampled at
    /// `options.plot_samples` points.
    fn plot(&self, arguments: &str, table: &SymbolTable) -> Result<Value, RegionError> {
        let arguments = split_arguments(arguments)?;
        let [function, variable, start, end] = arguments.as_slice() else {
            return Err(RegionError::Arity {
                expected: PLOT_SIGNATURE,
                found: arguments.len(),
            });
        };

        let function = self.parse_argument(function)?;
        let variable = self.parse_variable(variable)?;
        let start = self.endpoint(start, table)?;
        let end = self.endpoint(end, table)?;

        let shadowed = [variable.as_str()];
        let mut evaluator = self.evaluator(table).with_shadowed(&shadowed);
        let function = evaluator.reduce(&function)?;

        let unresolved: Vec<String> = free_symbols(&function)
            .into_iter()
            .filter(|name| *name != variable)
            .collect();
        if !unresolved.is_empty() {
            return Err(RegionError::UndefinedVariable(unresolved));
        }

        let points: Vec<PlotPoint> = linspace(start, end, self.options.plot_samples)
            .into_iter()
            .map(|x| PlotPoint {
                x,
                y: evaluator.evaluate_at(&function, &variable, x).ok(),
            })
            .collect();
        trace!(
            function = %function,
            variable = variable.as_str(),
            start,
            end,
            missing = points.iter().filter(|p| p.y.is_none()).count(),
            "sampled plot"
        );
        Ok(Value::PlotSeries(points))
    }

    fn parse_argument(&self, text: &str) -> Result<Expr, RegionError> {
        Ok(parse_with_max_depth(text, self.options.parser_max_depth)?)
    }

    fn parse_variable(&self, text: &str) -> Result<String, RegionError> {
        match self.parse_argument(text)? {
            Expr::Symbol(name) => Ok(name),
            _ => Err(ParseError::new(
                ParseErrorKind::ExpectedName {
                    found: text.to_string(),
                },
                text,
                Span::new(0, text.len()),
            )
            .into()),
        }
    }

    /// Evaluate a plot range bound numerically.
    fn endpoint(&self, text: &str, table: &SymbolTable) -> Result<f64, RegionError> {
        let expr = self.parse_argument(text)?;
        let value = self.evaluator(table).evaluate(&expr, Mode::Numeric)?;
        value.as_number().ok_or_else(|| {
            RegionError::Evaluation(format!("plot range '{}' is not a number", text))
        })
    }
}
