//! Orders regions and drives evaluation.
//!
//! Scoping is positional. Global definitions are evaluated first, then every
//! other region, each group in reading order (top to bottom, then left to
//! right). One symbol table is threaded through both passes and is never
//! rolled back: a failing region binds nothing and the rest carry on.

use tracing::{debug, debug_span, trace};

use crate::api::WorksheetOptions;
use crate::symbol_table::SymbolTable;
use crate::values::Value;
use crate::worksheet::{
    ClassifiedRegion, EvaluationAdapter, Region, RegionError, RegionKind,
    classify_with_max_depth,
};

/// Evaluates worksheets. Holds only configuration, so one instance can serve
/// concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct Worksheet {
    options: WorksheetOptions,
}

impl Worksheet {
    pub fn new(options: WorksheetOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &WorksheetOptions {
        &self.options
    }

    /// Evaluate every region against a fresh table holding only the
    /// built-in constants.
    pub fn evaluate(&self, regions: &[Region]) -> WorksheetResults {
        self.evaluate_with_table(regions, &mut SymbolTable::with_constants())
    }

    /// Evaluate every region against `table`, leaving the final bindings in
    /// it.
    pub fn evaluate_with_table(
        &self,
        regions: &[Region],
        table: &mut SymbolTable,
    ) -> WorksheetResults {
        let _span = debug_span!("evaluate_worksheet", regions = regions.len()).entered();

        let mut outcomes: Vec<Option<Result<Value, RegionError>>> = vec![None; regions.len()];
        let mut globals = Vec::new();
        let mut others = Vec::new();
        for (index, region) in regions.iter().enumerate() {
            match classify_with_max_depth(region, self.options.parser_max_depth) {
                Ok(classified) if classified.kind == RegionKind::GlobalDefinition => {
                    globals.push((index, classified))
                }
                Ok(classified) => others.push((index, classified)),
                Err(err) => {
                    trace!(id = region.id.as_str(), error = %err, "classification failed");
                    outcomes[index] = Some(Err(err));
                }
            }
        }
        debug!(
            globals = globals.len(),
            others = others.len(),
            failed = regions.len() - globals.len() - others.len(),
            "classified regions"
        );

        sort_reading_order(&mut globals);
        sort_reading_order(&mut others);

        let adapter = EvaluationAdapter::new(&self.options);
        for (index, region) in globals.iter().chain(others.iter()) {
            let outcome = adapter.evaluate(region, table);
            match &outcome {
                Ok(value) => trace!(id = region.id.as_str(), value = %value, "evaluated"),
                Err(err) => trace!(id = region.id.as_str(), error = %err, "evaluation failed"),
            }
            outcomes[*index] = Some(outcome);
        }

        WorksheetResults::collect(regions, outcomes)
    }

    /// Evaluate a single piece of notation on its own, as a one-region
    /// worksheet.
    pub fn evaluate_expression(&self, content: &str) -> Result<Value, RegionError> {
        let region = Region::new("expression", content, 0.0, 0.0);
        let classified = classify_with_max_depth(&region, self.options.parser_max_depth)?;
        EvaluationAdapter::new(&self.options)
            .evaluate(&classified, &mut SymbolTable::with_constants())
    }
}

/// Evaluate a worksheet with default options.
pub fn evaluate_worksheet(regions: &[Region]) -> WorksheetResults {
    Worksheet::default().evaluate(regions)
}

/// Stable sort by `(y, x)`; ties keep input order.
fn sort_reading_order(regions: &mut [(usize, ClassifiedRegion)]) {
    regions.sort_by(|(_, a), (_, b)| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)));
}

/// One result per region id, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorksheetResults {
    entries: Vec<(String, Result<Value, RegionError>)>,
}

impl WorksheetResults {
    /// Pair outcomes with their region ids. When ids repeat, the entry keeps
    /// the first position and the later region's outcome.
    fn collect(regions: &[Region], outcomes: Vec<Option<Result<Value, RegionError>>>) -> Self {
        let mut entries: Vec<(String, Result<Value, RegionError>)> = Vec::with_capacity(regions.len());
        for (region, outcome) in regions.iter().zip(outcomes) {
            let Some(outcome) = outcome else { continue };
            match entries.iter_mut().find(|(id, _)| *id == region.id) {
                Some(entry) => entry.1 = outcome,
                None => entries.push((region.id.clone(), outcome)),
            }
        }
        Self { entries }
    }

    pub fn get(&self, id: &str) -> Option<&Result<Value, RegionError>> {
        self.entries
            .iter()
            .find(|(entry_id, _)| entry_id == id)
            .map(|(_, outcome)| outcome)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Result<Value, RegionError>)> {
        self.entries
            .iter()
            .map(|(id, outcome)| (id.as_str(), outcome))
    }
}

impl IntoIterator for WorksheetResults {
    type Item = (String, Result<Value, RegionError>);
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
