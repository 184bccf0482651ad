//! Slate worksheet evaluation engine.
//!
//! A worksheet is a freeform canvas of math regions, each placed at an
//! (x, y) position. Regions are evaluated in reading order against one
//! shared symbol table, so a definition is visible to the regions below it
//! (or, for global definitions, to every region).

pub mod api;
pub mod evaluator;
pub mod parser;
pub mod stdlib;
pub mod symbol_table;
pub mod values;
pub mod worksheet;

pub use api::{Request, RequestError, Response, WorksheetOptions, handle_request, parse_request};
pub use symbol_table::SymbolTable;
pub use values::{PlotPoint, Value};
pub use worksheet::{Region, RegionError, Worksheet, WorksheetResults, evaluate_worksheet};
