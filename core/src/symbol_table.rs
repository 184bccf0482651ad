//! Name → value bindings threaded through one worksheet evaluation.
//!
//! The table keeps insertion order: the first binding of a name fixes its
//! slot, and rebinding replaces the value in place (last writer wins). It is
//! never rolled back, so bindings made before a failing region stay visible
//! to every region after it.

use core::f64::consts::{E, PI, TAU};
use core::fmt;

use hashbrown::HashMap;

use crate::values::Value;

/// Constants every worksheet starts with.
pub const CONSTANTS: &[(&str, f64)] = &[("pi", PI), ("e", E), ("tau", TAU)];

#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    entries: Vec<(String, Value)>,
    index: HashMap<String, usize>,
}

impl SymbolTable {
    /// Create an empty table, without constants.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table pre-populated with [`CONSTANTS`].
    pub fn with_constants() -> Self {
        let mut table = Self::new();
        for (name, value) in CONSTANTS {
            table.insert(name, Value::Numeric(*value));
        }
        table
    }

    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.index.get(name).map(|&idx| &self.entries[idx].1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Bind `value` to `name`, returning the value it replaced.
    ///
    /// Plot series cannot be substituted into expressions and are rejected.
    pub fn bind(&mut self, name: &str, value: Value) -> Result<Option<Value>, BindError> {
        if name.is_empty() {
            return Err(BindError::EmptyName);
        }
        if !value.is_bindable() {
            return Err(BindError::NotBindable(name.to_string()));
        }
        Ok(self.insert(name, value))
    }

    fn insert(&mut self, name: &str, value: Value) -> Option<Value> {
        match self.index.get(name) {
            Some(&idx) => Some(core::mem::replace(&mut self.entries[idx].1, value)),
            None => {
                self.index.insert(name.to_string(), self.entries.len());
                self.entries.push((name.to_string(), value));
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bindings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }
}

/// Error when trying to bind a value in the table.
#[derive(Debug, Clone, PartialEq)]
pub enum BindError {
    /// The name is empty.
    EmptyName,
    /// The value cannot be substituted into an expression.
    NotBindable(String),
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindError::EmptyName => write!(f, "Cannot bind an empty name"),
            BindError::NotBindable(name) => {
                write!(f, "Cannot bind a plot to '{}'", name)
            }
        }
    }
}

impl core::error::Error for BindError {}
