//! Slate Standard Library
//!
//! Built-in numeric functions available to every worksheet. Constants live in
//! [`crate::symbol_table::CONSTANTS`] because they are ordinary bindings that
//! regions may shadow; functions cannot be redefined.

pub mod math;

pub use math::{Arity, MathFunction, is_builtin, lookup};
