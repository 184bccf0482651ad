//! Math functions
//!
//! Trigonometry: sin, cos, tan, sec, csc, cot, asin, acos, atan (and the
//!               arcsin, arccos, arctan spellings), sinh, cosh, tanh
//! Logarithms:   exp, ln, log (natural, or `log(x, base)`), log10, log2
//! Roots:        sqrt, root(x, n)
//! Rounding:     abs, floor, ceil, round, sign
//! Other:        min, max, factorial

use core::fmt;

use hashbrown::HashMap;
use lazy_static::lazy_static;

use crate::evaluator::EvalError;

/// Number of arguments a function accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    Between(usize, usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => count == n,
            Arity::Between(min, max) => (min..=max).contains(&count),
            Arity::AtLeast(min) => count >= min,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(1) => write!(f, "1 argument"),
            Arity::Exact(n) => write!(f, "{} arguments", n),
            Arity::Between(min, max) => write!(f, "{} or {} arguments", min, max),
            Arity::AtLeast(1) => write!(f, "at least 1 argument"),
            Arity::AtLeast(n) => write!(f, "at least {} arguments", n),
        }
    }
}

type Apply = fn(&[f64]) -> Result<f64, EvalError>;

/// A built-in function over real numbers.
pub struct MathFunction {
    pub name: &'static str,
    pub arity: Arity,
    apply: Apply,
}

impl MathFunction {
    /// Check the argument count, then apply the function.
    pub fn call(&self, args: &[f64]) -> Result<f64, EvalError> {
        if !self.arity.accepts(args.len()) {
            return Err(EvalError::Arity {
                function: self.name.to_string(),
                expected: self.arity,
                found: args.len(),
            });
        }
        (self.apply)(args)
    }
}

impl fmt::Debug for MathFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MathFunction({}, {})", self.name, self.arity)
    }
}

lazy_static! {
    static ref FUNCTIONS: HashMap<&'static str, MathFunction> = {
        let mut functions = HashMap::new();
        let mut register = |names: &[&'static str], arity: Arity, apply: Apply| {
            for name in names {
                functions.insert(
                    *name,
                    MathFunction {
                        name: names[0],
                        arity,
                        apply,
                    },
                );
            }
        };

        register(&["sin"], Arity::Exact(1), |a| Ok(a[0].sin()));
        register(&["cos"], Arity::Exact(1), |a| Ok(a[0].cos()));
        register(&["tan"], Arity::Exact(1), |a| Ok(a[0].tan()));
        register(&["sec"], Arity::Exact(1), |a| reciprocal(a[0].cos()));
        register(&["csc"], Arity::Exact(1), |a| reciprocal(a[0].sin()));
        register(&["cot"], Arity::Exact(1), |a| {
            Ok(a[0].cos() * reciprocal(a[0].sin())?)
        });
        register(&["asin", "arcsin"], Arity::Exact(1), |a| {
            unit_interval("asin", a[0]).map(f64::asin)
        });
        register(&["acos", "arccos"], Arity::Exact(1), |a| {
            unit_interval("acos", a[0]).map(f64::acos)
        });
        register(&["atan", "arctan"], Arity::Exact(1), |a| Ok(a[0].atan()));
        register(&["sinh"], Arity::Exact(1), |a| Ok(a[0].sinh()));
        register(&["cosh"], Arity::Exact(1), |a| Ok(a[0].cosh()));
        register(&["tanh"], Arity::Exact(1), |a| Ok(a[0].tanh()));

        register(&["exp"], Arity::Exact(1), |a| Ok(a[0].exp()));
        register(&["ln"], Arity::Exact(1), |a| positive("ln", a[0]).map(f64::ln));
        register(&["log"], Arity::Between(1, 2), math_log);
        register(&["log10"], Arity::Exact(1), |a| {
            positive("log10", a[0]).map(f64::log10)
        });
        register(&["log2"], Arity::Exact(1), |a| positive("log2", a[0]).map(f64::log2));

        register(&["sqrt"], Arity::Exact(1), |a| {
            non_negative("sqrt", a[0]).map(f64::sqrt)
        });
        register(&["root"], Arity::Exact(2), math_root);

        register(&["abs"], Arity::Exact(1), |a| Ok(a[0].abs()));
        register(&["floor"], Arity::Exact(1), |a| Ok(a[0].floor()));
        register(&["ceil"], Arity::Exact(1), |a| Ok(a[0].ceil()));
        register(&["round"], Arity::Exact(1), |a| Ok(a[0].round()));
        register(&["sign"], Arity::Exact(1), math_sign);

        register(&["min"], Arity::AtLeast(1), |a| {
            Ok(a.iter().copied().fold(f64::INFINITY, f64::min))
        });
        register(&["max"], Arity::AtLeast(1), |a| {
            Ok(a.iter().copied().fold(f64::NEG_INFINITY, f64::max))
        });
        register(&["factorial"], Arity::Exact(1), math_factorial);

        functions
    };
}

/// Look up a built-in function by any of its spellings.
pub fn lookup(name: &str) -> Option<&'static MathFunction> {
    FUNCTIONS.get(name)
}

pub fn is_builtin(name: &str) -> bool {
    FUNCTIONS.contains_key(name)
}

// ============================================================================
// Domain checks
// ============================================================================

fn domain_error(function: &str, argument: f64) -> EvalError {
    EvalError::Domain {
        function: function.to_string(),
        argument,
    }
}

fn positive(function: &str, value: f64) -> Result<f64, EvalError> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(domain_error(function, value))
    }
}

fn non_negative(function: &str, value: f64) -> Result<f64, EvalError> {
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(domain_error(function, value))
    }
}

fn unit_interval(function: &str, value: f64) -> Result<f64, EvalError> {
    if (-1.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(domain_error(function, value))
    }
}

fn reciprocal(value: f64) -> Result<f64, EvalError> {
    if value == 0.0 {
        Err(EvalError::DivisionByZero)
    } else {
        Ok(1.0 / value)
    }
}

// ============================================================================
// Functions with more than one case
// ============================================================================

/// Natural logarithm, or logarithm in the base given as second argument.
fn math_log(args: &[f64]) -> Result<f64, EvalError> {
    let value = positive("log", args[0])?.ln();
    match args.get(1) {
        None => Ok(value),
        Some(&base) => {
            let base = positive("log", base)?;
            if base == 1.0 {
                return Err(domain_error("log", base));
            }
            Ok(value / base.ln())
        }
    }
}

/// `root(x, n)`: the real n-th root. Negative radicands only have one for
/// odd integer `n`.
fn math_root(args: &[f64]) -> Result<f64, EvalError> {
    let (value, n) = (args[0], args[1]);
    if n == 0.0 {
        return Err(domain_error("root", n));
    }
    if value >= 0.0 {
        return Ok(value.powf(1.0 / n));
    }
    let odd_integer = n.fract() == 0.0 && n % 2.0 != 0.0;
    if odd_integer {
        Ok(-(-value).powf(1.0 / n))
    } else {
        Err(domain_error("root", value))
    }
}

fn math_sign(args: &[f64]) -> Result<f64, EvalError> {
    let value = args[0];
    if value == 0.0 {
        Ok(0.0)
    } else {
        Ok(value.signum())
    }
}

/// Largest n whose factorial is finite in an f64.
const MAX_FACTORIAL: f64 = 170.0;

fn math_factorial(args: &[f64]) -> Result<f64, EvalError> {
    let n = args[0];
    if n < 0.0 || n.fract() != 0.0 || n > MAX_FACTORIAL {
        return Err(domain_error("factorial", n));
    }
    Ok((2..=n as u32).fold(1.0, |acc, k| acc * k as f64))
}
