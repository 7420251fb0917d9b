//! Antiderivatives by table lookup and linearity, and definite integrals.

mod common;
mod definite;
mod polynomial;
mod table;

use log::debug;
use num_traits::One;

use crate::config::EngineConfig;
use crate::error::IntegralError;
use crate::expr::{BinaryOp, Expr, Rational, UnaryOp, add, div, mul, neg, sub};
use crate::formula::FormulaTable;
use crate::simplify::simplify;

pub(crate) use common::affine_slope;

/// How a definite integral was obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    /// `F(b) - F(a)` from an exact antiderivative.
    ClosedForm,
    /// Composite Simpson's rule; the value is an approximation.
    Simpson,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Integral {
    Indefinite(Expr),
    Definite { value: Rational, method: Method },
}

/// Antiderivative of `expr` with respect to `x`, without the constant.
pub fn antiderivative(expr: &Expr, table: &FormulaTable) -> Result<Expr, IntegralError> {
    if let Some(name) = expr.foreign_symbol() {
        return Err(IntegralError::UnsupportedVariable(name.to_string()));
    }
    let integrand = simplify(expr.clone());
    let result = simplify(Integrator { table }.integrate(&integrand)?);
    debug!("∫ {expr} dx = {result}");
    Ok(result)
}

/// Indefinite integral, or definite over `bounds` with default settings.
pub fn integrate(
    expr: &Expr,
    table: &FormulaTable,
    bounds: Option<(&Expr, &Expr)>,
) -> Result<Integral, IntegralError> {
    integrate_with(expr, table, bounds, &EngineConfig::default())
}

pub fn integrate_with(
    expr: &Expr,
    table: &FormulaTable,
    bounds: Option<(&Expr, &Expr)>,
    config: &EngineConfig,
) -> Result<Integral, IntegralError> {
    match bounds {
        None => antiderivative(expr, table).map(Integral::Indefinite),
        Some((lower, upper)) => definite::definite(expr, table, lower, upper, config)
            .map(|(value, method)| Integral::Definite { value, method }),
    }
}

struct Integrator<'a> {
    table: &'a FormulaTable,
}

impl<'a> Integrator<'a> {
    fn integrate(&self, expr: &Expr) -> Result<Expr, IntegralError> {
        if !expr.contains_var() {
            return Ok(mul(expr.clone(), Expr::var()));
        }
        let found = match expr {
            Expr::Symbol(_) => polynomial::integrate_power(expr, &Rational::one()),

            Expr::Binary(BinaryOp::Add, a, b) => {
                return Ok(add(self.integrate(a)?, self.integrate(b)?));
            }
            Expr::Binary(BinaryOp::Sub, a, b) => {
                return Ok(sub(self.integrate(a)?, self.integrate(b)?));
            }
            Expr::Unary(UnaryOp::Neg, a) => return Ok(neg(self.integrate(a)?)),

            Expr::Binary(BinaryOp::Mul, a, b) if !a.contains_var() => {
                return Ok(mul((**a).clone(), self.integrate(b)?));
            }
            Expr::Binary(BinaryOp::Mul, a, b) if !b.contains_var() => {
                return Ok(mul(self.integrate(a)?, (**b).clone()));
            }
            Expr::Binary(BinaryOp::Div, a, b) if !b.contains_var() => {
                return Ok(div(self.integrate(a)?, (**b).clone()));
            }
            Expr::Binary(BinaryOp::Mul, a, b) => table::integrate_trig_product(a, b),
            Expr::Binary(BinaryOp::Div, a, b) if !a.contains_var() => {
                polynomial::integrate_reciprocal(a, b)
                    .or_else(|| table::integrate_inverse_sine(a, b))
            }

            Expr::Binary(BinaryOp::Pow, base, exp) if !base.contains_var() => {
                table::integrate_exponential(base, exp)
            }
            Expr::Binary(BinaryOp::Pow, base, exp) => match exp.as_ref() {
                Expr::Number(n) => polynomial::integrate_power(base, n)
                    .or_else(|| table::integrate_squared_trig(base, n)),
                _ => None,
            },

            Expr::Unary(op, arg) => table::integrate_function(*op, arg, self.table),
            _ => None,
        };
        found.ok_or_else(|| IntegralError::NoClosedForm(expr.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_expr;

    fn anti(input: &str) -> Result<String, IntegralError> {
        let table = FormulaTable::standard();
        antiderivative(&parse_expr(input).unwrap(), &table).map(|e| e.to_string())
    }

    #[test]
    fn linearity_and_affine_arguments() {
        assert_eq!(anti("3x^2 + 2").unwrap(), "x^3 + 2x");
        assert_eq!(anti("sin(2x)").unwrap(), "-cos(2x)/2");
        assert_eq!(anti("e^(3x)").unwrap(), "e^(3x)/3");
        assert_eq!(anti("5/x").unwrap(), "5ln(abs(x))");
    }

    #[test]
    fn product_and_inverse_sine_rows() {
        assert_eq!(anti("sec(x)tan(x)").unwrap(), "sec(x)");
        assert_eq!(anti("csc(x)*cot(x)").unwrap(), "-csc(x)");
        assert_eq!(anti("1/sqrt(1 - x^2)").unwrap(), "asin(x)");
    }

    #[test]
    fn failures_name_the_offending_term() {
        assert_eq!(
            anti("x + sin(x^2)"),
            Err(IntegralError::NoClosedForm("sin(x^2)".into()))
        );
        assert_eq!(
            anti("x*y"),
            Err(IntegralError::UnsupportedVariable("y".into()))
        );
    }
}
