//! String-based UI helpers for quick usage and rendering.

use once_cell::sync::Lazy;

use crate::calculus::{Integral, antiderivative, differentiate as differentiate_expr, integrate_with};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::eval::Evaluator;
use crate::expr::{Expr, Rational};
use crate::format::{decimal, pretty_integral};
use crate::formula::FormulaTable;
use crate::parser::parse_expr;
use crate::simplify::simplify as simplify_expr;

pub use crate::format::pretty;

static BUILTIN: Lazy<FormulaTable> = Lazy::new(FormulaTable::standard);

/// The builtin rule table, built on first use.
pub fn builtin_table() -> &'static FormulaTable {
    &BUILTIN
}

pub fn parse(input: &str) -> Result<Expr> {
    Ok(parse_expr(input)?)
}

pub fn differentiate(input: &str) -> Result<Expr> {
    let expr = parse_expr(input)?;
    Ok(differentiate_expr(&expr, builtin_table())?.expr)
}

pub fn diff(input: &str) -> Result<String> {
    Ok(pretty(&differentiate(input)?))
}

/// Antiderivative without the constant of integration.
pub fn integrate(input: &str) -> Result<Expr> {
    let expr = parse_expr(input)?;
    Ok(antiderivative(&expr, builtin_table())?)
}

pub fn inte(input: &str) -> Result<String> {
    Ok(format!("{} + C", pretty(&integrate(input)?)))
}

pub fn definite(input: &str, lower: &str, upper: &str) -> Result<Integral> {
    let expr = parse_expr(input)?;
    let (lower, upper) = (parse_expr(lower)?, parse_expr(upper)?);
    let config = EngineConfig::default();
    Ok(integrate_with(&expr, builtin_table(), Some((&lower, &upper)), &config)?)
}

pub fn defi(input: &str, lower: &str, upper: &str) -> Result<String> {
    let digits = EngineConfig::default().digits;
    Ok(pretty_integral(&definite(input, lower, upper)?, digits))
}

pub fn evaluate(input: &str) -> Result<Rational> {
    let expr = parse_expr(input)?;
    Ok(Evaluator::default().evaluate(&expr)?)
}

pub fn eval(input: &str) -> Result<String> {
    Ok(decimal(&evaluate(input)?))
}

/// Value of `input` at `x = at`, both given as text.
pub fn evaluate_at(input: &str, at: &str) -> Result<Rational> {
    let expr = parse_expr(input)?;
    let evaluator = Evaluator::default();
    let x = evaluator.evaluate(&parse_expr(at)?)?;
    Ok(evaluator.evaluate_at(&expr, &x)?)
}

pub fn simplify(input: &str) -> Result<Expr> {
    let expr = parse_expr(input)?;
    Ok(simplify_expr(expr))
}

pub fn simp(input: &str) -> Result<String> {
    Ok(pretty(&simplify(input)?))
}
