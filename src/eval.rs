//! Numeric reduction of terms at a fixed number of significant digits.

use num_traits::{Signed, Zero};

use crate::error::EvalError;
use crate::expr::{BinaryOp, Constant, Expr, Rational, UnaryOp, VARIABLE};
use crate::numeric::{self, DEFAULT_DIGITS};

/// Evaluates terms with exact rational arithmetic where possible and the
/// `numeric` kernels elsewhere, rounding the final value to `digits`
/// significant digits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Evaluator {
    digits: usize,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::with_digits(DEFAULT_DIGITS)
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_digits(digits: usize) -> Self {
        Self {
            digits: digits.max(1),
        }
    }

    pub fn digits(&self) -> usize {
        self.digits
    }

    /// Value of a term with no free variable.
    pub fn evaluate(&self, expr: &Expr) -> Result<Rational, EvalError> {
        self.reduce(expr, None)
            .map(|v| numeric::round_significant(&v, self.digits))
    }

    /// Value of a term with `x` bound to `x`.
    pub fn evaluate_at(&self, expr: &Expr, x: &Rational) -> Result<Rational, EvalError> {
        self.reduce(expr, Some(x))
            .map(|v| numeric::round_significant(&v, self.digits))
    }

    /// Unrounded value, carrying whatever guard digits the kernels produced.
    pub(crate) fn reduce(&self, expr: &Expr, x: Option<&Rational>) -> Result<Rational, EvalError> {
        match expr {
            Expr::Number(r) => Ok(r.clone()),
            Expr::Symbol(name) if name == VARIABLE => x
                .cloned()
                .ok_or_else(|| EvalError::FreeVariable(name.clone())),
            Expr::Symbol(name) => match Constant::from_name(name) {
                Some(c) => Ok(numeric::constant_value(c, self.digits)),
                None => Err(EvalError::UnsupportedVariable(name.clone())),
            },
            Expr::Unary(op, a) => {
                let v = self.reduce(a, x)?;
                self.apply_unary(*op, &v)
            }
            Expr::Binary(op, a, b) => {
                let lhs = self.reduce(a, x)?;
                let rhs = self.reduce(b, x)?;
                match op {
                    BinaryOp::Add => Ok(lhs + rhs),
                    BinaryOp::Sub => Ok(lhs - rhs),
                    BinaryOp::Mul => Ok(lhs * rhs),
                    BinaryOp::Div if rhs.is_zero() => Err(EvalError::DivisionByZero),
                    BinaryOp::Div => Ok(lhs / rhs),
                    BinaryOp::Pow => numeric::power(&lhs, &rhs, self.digits),
                }
            }
        }
    }

    fn apply_unary(&self, op: UnaryOp, v: &Rational) -> Result<Rational, EvalError> {
        let d = self.digits;
        match op {
            UnaryOp::Neg => Ok(-v),
            UnaryOp::Sqrt => numeric::sqrt(v, d),
            UnaryOp::Abs => Ok(v.abs()),
            UnaryOp::Floor => Ok(v.floor()),
            UnaryOp::Ceil => Ok(v.ceil()),
            UnaryOp::Sin => Ok(numeric::sin_cos(v, d)?.0),
            UnaryOp::Cos => Ok(numeric::sin_cos(v, d)?.1),
            UnaryOp::Tan => {
                let (s, c) = numeric::sin_cos(v, d)?;
                ratio(s, c, "tan")
            }
            UnaryOp::Sec => {
                let (_, c) = numeric::sin_cos(v, d)?;
                ratio(Rational::from_integer(1.into()), c, "sec")
            }
            UnaryOp::Csc => {
                let (s, _) = numeric::sin_cos(v, d)?;
                ratio(Rational::from_integer(1.into()), s, "csc")
            }
            UnaryOp::Cot => {
                let (s, c) = numeric::sin_cos(v, d)?;
                ratio(c, s, "cot")
            }
            UnaryOp::Asin => numeric::asin(v, d),
            UnaryOp::Acos => numeric::acos(v, d),
            UnaryOp::Atan => Ok(numeric::atan(v, d)),
            UnaryOp::Sinh => numeric::sinh(v, d),
            UnaryOp::Cosh => numeric::cosh(v, d),
            UnaryOp::Tanh => numeric::tanh(v, d),
            UnaryOp::Ln => numeric::ln(v, d),
            UnaryOp::Log => log_base(v, 10, d),
            UnaryOp::Log2 => log_base(v, 2, d),
            UnaryOp::Exp => numeric::exp(v, d),
        }
    }
}

fn ratio(num: Rational, den: Rational, name: &str) -> Result<Rational, EvalError> {
    if den.is_zero() {
        return Err(EvalError::DomainError(format!("{name} is undefined at a pole")));
    }
    Ok(num / den)
}

fn log_base(v: &Rational, base: u32, digits: usize) -> Result<Rational, EvalError> {
    let num = numeric::ln(v, digits)?;
    let den = numeric::ln(&Rational::from_integer(base.into()), digits)?;
    Ok(num / den)
}

/// Evaluate a constant term at the default precision.
pub fn evaluate(expr: &Expr) -> Result<Rational, EvalError> {
    Evaluator::default().evaluate(expr)
}

/// Evaluate a term at a given `x` at the default precision.
pub fn evaluate_at(expr: &Expr, x: &Rational) -> Result<Rational, EvalError> {
    Evaluator::default().evaluate_at(expr, x)
}
