//! Core evaluation logic.

use std::collections::BTreeSet;

use crate::{
    evaluator::{EvalError, operators},
    parser::{BinaryOp, Expr, UnaryOp},
    stdlib,
    symbol_table::SymbolTable,
    values::Value,
};

/// Resource limits for one evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluatorOptions {
    /// Maximum evaluation stack depth (for recursion protection).
    ///
    /// Default: 1000
    pub max_depth: usize,

    /// Maximum number of nodes produced while substituting bindings into
    /// one expression.
    ///
    /// Default: 10000
    pub max_nodes: usize,
}

impl Default for EvaluatorOptions {
    fn default() -> Self {
        Self {
            max_depth: 1000,
            max_nodes: 10_000,
        }
    }
}

/// Whether a result must reduce to a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Numeric,
    Symbolic,
}

/// Evaluator for expressions against a symbol table.
pub struct Evaluator<'a> {
    options: EvaluatorOptions,
    table: &'a SymbolTable,
    /// Names left untouched by substitution even when bound (plot variables).
    shadowed: &'a [&'a str],
    /// Bound names whose values are being substituted right now.
    expanding: Vec<String>,
    depth: usize,
    /// Nodes produced by the current `reduce`.
    nodes: usize,
}

impl<'a> Evaluator<'a> {
    pub fn new(options: EvaluatorOptions, table: &'a SymbolTable) -> Self {
        Self {
            options,
            table,
            shadowed: &[],
            expanding: Vec::new(),
            depth: 0,
            nodes: 0,
        }
    }

    /// Keep `names` as free symbols during substitution.
    pub fn with_shadowed(mut self, names: &'a [&'a str]) -> Self {
        self.shadowed = names;
        self
    }

    /// Substitute, simplify, and check the result against `mode`.
    pub fn evaluate(&mut self, expr: &Expr, mode: Mode) -> Result<Value, EvalError> {
        let reduced = self.reduce(expr)?;
        match (mode, reduced) {
            (Mode::Symbolic, reduced) => Ok(Value::from_expr(reduced)),
            (Mode::Numeric, Expr::Number(n)) => Ok(Value::Numeric(n)),
            (Mode::Numeric, reduced) => {
                let names = free_symbols(&reduced);
                if names.is_empty() {
                    Err(EvalError::NotNumeric {
                        expr: reduced.to_string(),
                    })
                } else {
                    Err(EvalError::Unresolved { names })
                }
            }
        }
    }

    /// Substitute bindings, then simplify.
    ///
    /// Fails with [`EvalError::ExpressionTooLarge`] once substitution has
    /// produced more than `max_nodes` nodes.
    pub fn reduce(&mut self, expr: &Expr) -> Result<Expr, EvalError> {
        self.nodes = 0;
        let substituted = self.substitute(expr)?;
        self.simplify(substituted)
    }

    /// Replace every bound, non-shadowed name by its value.
    ///
    /// Symbolic values are substituted in turn, except for names already
    /// being expanded, so `y := y + 1` stays finite.
    ///
    /// A call whose name is not a built-in function but is bound to a value
    /// reads as juxtaposition: with `a := 5`, `a(2)` is `a * 2`.
    pub fn substitute(&mut self, expr: &Expr) -> Result<Expr, EvalError> {
        self.grow(1)?;
        self.descend(|this| match expr {
            Expr::Number(_) => Ok(expr.clone()),
            Expr::Symbol(name) => Ok(this.expand(name)?.unwrap_or_else(|| expr.clone())),
            Expr::Unary { op, expr: inner } => Ok(Expr::Unary {
                op: *op,
                expr: Box::new(this.substitute(inner)?),
            }),
            Expr::Binary { op, left, right } => Ok(Expr::binary(
                *op,
                this.substitute(left)?,
                this.substitute(right)?,
            )),
            Expr::Call { function, args } => {
                let mut args = args
                    .iter()
                    .map(|arg| this.substitute(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                if !stdlib::is_builtin(function) && args.len() == 1 {
                    if let Some(value) = this.expand(function)? {
                        if let Some(arg) = args.pop() {
                            return Ok(Expr::binary(BinaryOp::Mul, value, arg));
                        }
                    }
                }
                Ok(Expr::Call {
                    function: function.clone(),
                    args,
                })
            }
        })
    }

    /// Fold numeric sub-trees and apply identities, bottom-up.
    pub fn simplify(&mut self, expr: Expr) -> Result<Expr, EvalError> {
        self.descend(|this| match expr {
            Expr::Number(_) | Expr::Symbol(_) => Ok(expr),
            Expr::Unary { op, expr: inner } => {
                let inner = this.simplify(*inner)?;
                Ok(match (op, inner) {
                    (op, Expr::Number(n)) => Expr::Number(operators::eval_unary(op, n)),
                    (UnaryOp::Neg, inner) => negate(inner),
                })
            }
            Expr::Binary { op, left, right } => {
                let left = this.simplify(*left)?;
                let right = this.simplify(*right)?;
                simplify_binary(op, left, right)
            }
            Expr::Call { function, args } => {
                let args = args
                    .into_iter()
                    .map(|arg| this.simplify(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                let Some(builtin) = stdlib::lookup(&function) else {
                    return Ok(Expr::Call { function, args });
                };
                if !builtin.arity.accepts(args.len()) {
                    return Err(EvalError::Arity {
                        function,
                        expected: builtin.arity,
                        found: args.len(),
                    });
                }
                match args.iter().map(Expr::as_number).collect::<Option<Vec<_>>>() {
                    Some(numbers) => Ok(Expr::Number(operators::finite(builtin.call(&numbers)?)?)),
                    None => Ok(Expr::Call { function, args }),
                }
            }
        })
    }

    /// Evaluate `expr` numerically with `variable` set to `x`.
    ///
    /// Used for sampling plots; `expr` is expected to be substituted already,
    /// so any other name is unresolved.
    pub fn evaluate_at(&mut self, expr: &Expr, variable: &str, x: f64) -> Result<f64, EvalError> {
        self.descend(|this| match expr {
            Expr::Number(n) => Ok(*n),
            Expr::Symbol(name) if name == variable => Ok(x),
            Expr::Symbol(name) => Err(EvalError::Unresolved {
                names: vec![name.clone()],
            }),
            Expr::Unary { op, expr: inner } => {
                Ok(operators::eval_unary(*op, this.evaluate_at(inner, variable, x)?))
            }
            Expr::Binary { op, left, right } => {
                let left = this.evaluate_at(left, variable, x)?;
                let right = this.evaluate_at(right, variable, x)?;
                operators::eval_binary(*op, left, right)
            }
            Expr::Call { function, args } => {
                let builtin = stdlib::lookup(function).ok_or_else(|| EvalError::Unresolved {
                    names: vec![function.clone()],
                })?;
                let numbers = args
                    .iter()
                    .map(|arg| this.evaluate_at(arg, variable, x))
                    .collect::<Result<Vec<_>, _>>()?;
                operators::finite(builtin.call(&numbers)?)
            }
        })
    }

    /// The substituted value of `name`, or `None` if it stays free.
    ///
    /// A stored value is walked again only when one of its free names has
    /// been bound since it was computed.
    fn expand(&mut self, name: &str) -> Result<Option<Expr>, EvalError> {
        let Some(value) = self.binding(name) else {
            return Ok(None);
        };
        let rebound = free_symbols(&value)
            .iter()
            .any(|free| free != name && self.is_bound(free));
        if !rebound {
            self.grow(value.node_count())?;
            return Ok(Some(value));
        }
        self.expanding.push(name.to_string());
        let expanded = self.substitute(&value);
        self.expanding.pop();
        expanded.map(Some)
    }

    fn binding(&self, name: &str) -> Option<Expr> {
        if self.is_hidden(name) {
            return None;
        }
        self.table.lookup(name).and_then(Value::to_expr)
    }

    fn is_bound(&self, name: &str) -> bool {
        !self.is_hidden(name) && self.table.lookup(name).is_some_and(Value::is_bindable)
    }

    fn is_hidden(&self, name: &str) -> bool {
        self.shadowed.iter().any(|shadowed| *shadowed == name)
            || self.expanding.iter().any(|expanding| expanding == name)
    }

    fn grow(&mut self, nodes: usize) -> Result<(), EvalError> {
        self.nodes = self.nodes.saturating_add(nodes);
        if self.nodes > self.options.max_nodes {
            return Err(EvalError::ExpressionTooLarge {
                max_nodes: self.options.max_nodes,
            });
        }
        Ok(())
    }

    /// Run `f` one level deeper, failing once the depth limit is reached.
    fn descend<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, EvalError>,
    ) -> Result<T, EvalError> {
        if self.depth >= self.options.max_depth {
            return Err(EvalError::StackOverflow {
                depth: self.depth,
                max_depth: self.options.max_depth,
            });
        }

        self.depth += 1;
        let result = f(self);
        self.depth -= 1;

        result
    }
}

fn simplify_binary(op: BinaryOp, left: Expr, right: Expr) -> Result<Expr, EvalError> {
    if let (Some(l), Some(r)) = (left.as_number(), right.as_number()) {
        return operators::eval_binary(op, l, r).map(Expr::Number);
    }

    let is = |expr: &Expr, value: f64| expr.as_number() == Some(value);
    let simplified = match op {
        BinaryOp::Add if is(&left, 0.0) => right,
        BinaryOp::Add if is(&right, 0.0) => left,
        BinaryOp::Add if left == right => scale(2.0, left),
        BinaryOp::Sub if is(&right, 0.0) => left,
        BinaryOp::Sub if is(&left, 0.0) => negate(right),
        BinaryOp::Sub if left == right => Expr::Number(0.0),
        BinaryOp::Mul if is(&left, 0.0) || is(&right, 0.0) => Expr::Number(0.0),
        BinaryOp::Mul if is(&left, 1.0) => right,
        BinaryOp::Mul if is(&right, 1.0) => left,
        BinaryOp::Mul => match (left.as_number(), right) {
            (Some(n), right) => scale(n, right),
            (None, right) => Expr::binary(op, left, right),
        },
        BinaryOp::Div if is(&right, 0.0) => return Err(EvalError::DivisionByZero),
        BinaryOp::Div if is(&right, 1.0) => left,
        BinaryOp::Div if is(&left, 0.0) => Expr::Number(0.0),
        BinaryOp::Div if left == right => Expr::Number(1.0),
        BinaryOp::Pow if is(&right, 0.0) => Expr::Number(1.0),
        BinaryOp::Pow if is(&right, 1.0) => left,
        BinaryOp::Pow if is(&left, 1.0) => Expr::Number(1.0),
        _ => Expr::binary(op, left, right),
    };
    Ok(simplified)
}

/// `factor * expr`, merging into a leading coefficient of `expr`.
fn scale(factor: f64, expr: Expr) -> Expr {
    match expr {
        Expr::Binary {
            op: BinaryOp::Mul,
            left,
            right,
        } => match left.as_number().map(|c| c * factor).filter(|c| c.is_finite()) {
            Some(coefficient) => Expr::binary(BinaryOp::Mul, Expr::Number(coefficient), *right),
            None => Expr::binary(
                BinaryOp::Mul,
                Expr::Number(factor),
                Expr::Binary {
                    op: BinaryOp::Mul,
                    left,
                    right,
                },
            ),
        },
        other => Expr::binary(BinaryOp::Mul, Expr::Number(factor), other),
    }
}

fn negate(expr: Expr) -> Expr {
    match expr {
        Expr::Number(n) => Expr::Number(-n),
        Expr::Unary {
            op: UnaryOp::Neg,
            expr,
        } => *expr,
        other => Expr::neg(other),
    }
}

/// Names an expression still depends on, sorted and deduplicated.
///
/// Calls to functions that are not built in count as unresolved names.
pub fn free_symbols(expr: &Expr) -> Vec<String> {
    fn collect<'e>(expr: &'e Expr, names: &mut BTreeSet<&'e str>) {
        match expr {
            Expr::Number(_) => {}
            Expr::Symbol(name) => {
                names.insert(name);
            }
            Expr::Unary { expr, .. } => collect(expr, names),
            Expr::Binary { left, right, .. } => {
                collect(left, names);
                collect(right, names);
            }
            Expr::Call { function, args } => {
                if !stdlib::is_builtin(function) {
                    names.insert(function);
                }
                for arg in args {
                    collect(arg, names);
                }
            }
        }
    }

    let mut names = BTreeSet::new();
    collect(expr, &mut names);
    names.into_iter().map(str::to_string).collect()
}
