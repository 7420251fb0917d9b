use log::debug;
use num_traits::Zero;

use super::{Method, antiderivative};
use crate::config::EngineConfig;
use crate::error::{EvalError, IntegralError};
use crate::eval::Evaluator;
use crate::expr::{Expr, Rational};
use crate::formula::FormulaTable;
use crate::numeric::round_significant;

/// Extra digits kept on each quadrature sample before summation.
const SAMPLE_GUARD: usize = 8;

pub(super) fn definite(
    expr: &Expr,
    table: &FormulaTable,
    lower: &Expr,
    upper: &Expr,
    config: &EngineConfig,
) -> Result<(Rational, Method), IntegralError> {
    let evaluator = Evaluator::with_digits(config.digits);
    let a = bound(&evaluator, lower, "lower")?;
    let b = bound(&evaluator, upper, "upper")?;

    match antiderivative(expr, table) {
        Ok(f) => {
            debug!("definite integral of {expr} by closed form {f}");
            let value = evaluator.reduce(&f, Some(&b))? - evaluator.reduce(&f, Some(&a))?;
            Ok((round_significant(&value, config.digits), Method::ClosedForm))
        }
        Err(IntegralError::NoClosedForm(term)) => {
            let steps = even_steps(config.simpson_steps);
            debug!("no closed form for {term}; composite Simpson with {steps} steps");
            let value = simpson(expr, &a, &b, steps, &evaluator)?;
            Ok((value, Method::Simpson))
        }
        Err(err) => Err(err),
    }
}

fn bound(evaluator: &Evaluator, expr: &Expr, which: &str) -> Result<Rational, IntegralError> {
    evaluator
        .evaluate(expr)
        .map_err(|err| IntegralError::InvalidBounds(format!("{which} bound `{expr}`: {err}")))
}

fn even_steps(steps: usize) -> usize {
    let steps = steps.max(2);
    steps + steps % 2
}

/// Composite Simpson's rule over `steps` (even) subintervals of `[a, b]`.
pub(super) fn simpson(
    expr: &Expr,
    a: &Rational,
    b: &Rational,
    steps: usize,
    evaluator: &Evaluator,
) -> Result<Rational, EvalError> {
    let h = (b - a) / Rational::from_integer(steps.into());
    let sample_digits = evaluator.digits() + SAMPLE_GUARD;

    let mut sum = Rational::zero();
    for i in 0..=steps {
        let x = a + &h * Rational::from_integer(i.into());
        let fx = round_significant(&evaluator.reduce(expr, Some(&x))?, sample_digits);
        let weight: u32 = if i == 0 || i == steps {
            1
        } else if i % 2 == 1 {
            4
        } else {
            2
        };
        sum += fx * Rational::from_integer(weight.into());
    }
    let value = sum * h / Rational::from_integer(3.into());
    Ok(round_significant(&value, evaluator.digits()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{pow, rational};

    #[test]
    fn simpson_is_exact_on_cubics() {
        let cube = pow(Expr::var(), Expr::integer(3));
        let value = simpson(&cube, &rational(0, 1), &rational(2, 1), 4, &Evaluator::default());
        assert_eq!(value, Ok(rational(4, 1)));
    }

    #[test]
    fn step_counts_are_even() {
        assert_eq!(even_steps(0), 2);
        assert_eq!(even_steps(7), 8);
        assert_eq!(even_steps(1000), 1000);
    }
}
