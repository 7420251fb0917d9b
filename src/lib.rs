//! Symbolic differentiation and integration over a small expression algebra,
//! with exact parsing and 28-digit numeric evaluation.

pub mod calculator;
pub mod calculus;
pub mod config;
pub mod error;
pub mod eval;
pub mod expr;
pub mod format;
pub mod formula;
pub mod numeric;
pub mod parser;
pub mod prelude;
pub mod simplify;
mod ui;

pub use calculator::{Calculator, Operation, compute};
pub use calculus::{
    Derivative, DiffWarning, Integral, Method, Rule, antiderivative, derivative_steps,
    differentiate, integral_steps, integrate, integrate_with,
};
pub use config::EngineConfig;
pub use error::{
    ConfigError, DiffError, EngineError, EvalError, IntegralError, ParseError, ParseErrorKind,
    Result,
};
pub use eval::{Evaluator, evaluate, evaluate_at};
pub use expr::{
    BinaryOp, Constant, Expr, Rational, UnaryOp, add, div, func, mul, neg, one, pow, rational,
    sub, zero,
};
pub use format::{decimal, pretty};
pub use formula::{FormulaEntry, FormulaTable};
pub use parser::parse_expr;
pub use simplify::{simplify, substitute};
