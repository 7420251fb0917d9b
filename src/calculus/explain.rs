//! Step-by-step explanations of a derivative or an antiderivative.

use std::fmt;

use num_traits::One;

use crate::calculus::differentiate::differentiate;
use crate::calculus::integrate::{affine_slope, antiderivative};
use crate::error::{DiffError, IntegralError};
use crate::expr::{BinaryOp, Constant, Expr, Rational, UnaryOp, VARIABLE, func};
use crate::format::expr::pretty;
use crate::formula::FormulaTable;
use crate::simplify::simplify;

/// The rule applied at the top of an expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rule {
    Constant,
    Variable,
    Sum,
    Negation,
    ConstantDivisor,
    ConstantMultiple,
    Product,
    Quotient,
    Power,
    Exponential,
    GeneralPower,
    Chain(UnaryOp),
    ConstantIntegrand,
    Linearity,
    Reciprocal,
    SquaredTrig,
    TrigProduct,
    InverseSine,
    TableRow(UnaryOp),
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Constant => write!(f, "constant rule: d/dx[c] = 0"),
            Rule::Variable => write!(f, "variable rule: d/dx[x] = 1"),
            Rule::Sum => write!(f, "sum rule: (f ± g)' = f' ± g'"),
            Rule::Negation => write!(f, "negation: (-f)' = -f'"),
            Rule::ConstantDivisor => write!(f, "constant divisor: (f/c)' = f'/c"),
            Rule::ConstantMultiple => write!(f, "constant multiple: ∫c*f dx = c*∫f dx"),
            Rule::Product => write!(f, "product rule: (fg)' = f'g + fg'"),
            Rule::Quotient => write!(f, "quotient rule: (f/g)' = (f'g - fg')/g^2"),
            Rule::Power => write!(f, "power rule: d/dx[u^n] = n*u^(n-1)*u'"),
            Rule::Exponential => write!(f, "exponential rule: d/dx[a^u] = a^u*ln(a)*u'"),
            Rule::GeneralPower => {
                write!(f, "general power rule: d/dx[f^g] = f^g*(g'*ln(f) + g*f'/f)")
            }
            Rule::Chain(op) => {
                let name = op.name();
                write!(f, "chain rule: d/dx[{name}(u)] = {name}'(u)*u'")
            }
            Rule::ConstantIntegrand => write!(f, "constant rule: ∫c dx = cx"),
            Rule::Linearity => write!(f, "linearity: ∫(f ± g) dx = ∫f dx ± ∫g dx"),
            Rule::Reciprocal => write!(f, "reciprocal rule: ∫1/u dx = ln(abs(u))/k"),
            Rule::SquaredTrig => {
                write!(f, "table row: ∫sec(u)^2 dx = tan(u)/k, ∫csc(u)^2 dx = -cot(u)/k")
            }
            Rule::TrigProduct => {
                write!(f, "table row: ∫sec(u)tan(u) dx = sec(u)/k, ∫csc(u)cot(u) dx = -csc(u)/k")
            }
            Rule::InverseSine => write!(f, "table row: ∫1/sqrt(1 - u^2) dx = asin(u)/k"),
            Rule::TableRow(op) => {
                write!(f, "table row for {}(u), divided by the slope k", op.name())
            }
        }
    }
}

/// The rule `differentiate` applies at the top of `expr`.
pub fn derivative_rule(expr: &Expr) -> Rule {
    match expr {
        Expr::Symbol(name) if name == VARIABLE => Rule::Variable,
        _ if !expr.contains_var() => Rule::Constant,
        Expr::Binary(BinaryOp::Add | BinaryOp::Sub, ..) => Rule::Sum,
        Expr::Unary(UnaryOp::Neg, _) => Rule::Negation,
        Expr::Binary(BinaryOp::Mul, ..) => Rule::Product,
        Expr::Binary(BinaryOp::Div, _, b) if !b.contains_var() => Rule::ConstantDivisor,
        Expr::Binary(BinaryOp::Div, ..) => Rule::Quotient,
        Expr::Binary(BinaryOp::Pow, base, exp) => {
            if matches!(simplify((**exp).clone()), Expr::Number(_)) {
                Rule::Power
            } else if base.as_constant() == Some(Constant::E) || !base.contains_var() {
                Rule::Exponential
            } else {
                Rule::GeneralPower
            }
        }
        Expr::Unary(op, _) => Rule::Chain(*op),
        Expr::Symbol(_) | Expr::Number(_) => Rule::Constant,
    }
}

/// The rule the integrator applies at the top of a simplified integrand.
pub fn integral_rule(expr: &Expr) -> Rule {
    if !expr.contains_var() {
        return Rule::ConstantIntegrand;
    }
    match expr {
        Expr::Binary(BinaryOp::Add | BinaryOp::Sub, ..) | Expr::Unary(UnaryOp::Neg, _) => {
            Rule::Linearity
        }
        Expr::Binary(BinaryOp::Mul, a, b) if !a.contains_var() || !b.contains_var() => {
            Rule::ConstantMultiple
        }
        Expr::Binary(BinaryOp::Mul, ..) => Rule::TrigProduct,
        Expr::Binary(BinaryOp::Div, _, b) if !b.contains_var() => Rule::ConstantMultiple,
        Expr::Binary(BinaryOp::Div, _, b) if affine_slope(b).is_some() => Rule::Reciprocal,
        Expr::Binary(BinaryOp::Div, ..) => Rule::InverseSine,
        Expr::Binary(BinaryOp::Pow, base, _) if !base.contains_var() => Rule::Exponential,
        Expr::Binary(BinaryOp::Pow, base, exp) => match (base.as_ref(), exp.as_ref()) {
            (Expr::Unary(UnaryOp::Sec | UnaryOp::Csc, _), Expr::Number(n))
                if n == &Rational::from_integer(2.into()) =>
            {
                Rule::SquaredTrig
            }
            (_, Expr::Number(n)) if n == &-Rational::one() => Rule::Reciprocal,
            _ => Rule::Power,
        },
        Expr::Unary(op, _) => Rule::TableRow(*op),
        Expr::Symbol(_) | Expr::Number(_) => Rule::Power,
    }
}

/// Lines explaining d/dx of `expr`: the input, the rule, any table row and
/// warnings, then the result.
pub fn derivative_steps(expr: &Expr, table: &FormulaTable) -> Result<Vec<String>, DiffError> {
    let derivative = differentiate(expr, table)?;
    let rule = derivative_rule(expr);
    let mut lines = vec![format!("expression: d/dx[{}]", pretty(expr)), format!("rule: {rule}")];
    if let Rule::Chain(op) = rule {
        if let Some(row) = table.derivative(op) {
            let x = Expr::var();
            lines.push(format!("table: d/dx[{}] = {}", pretty(&func(op, x)), pretty(row)));
        }
    }
    lines.extend(derivative.warnings.iter().map(|w| format!("warning: {w}")));
    lines.push(format!("result: {}", pretty(&derivative.expr)));
    Ok(lines)
}

/// Lines explaining the antiderivative of `expr`, ending in `F + C`.
pub fn integral_steps(expr: &Expr, table: &FormulaTable) -> Result<Vec<String>, IntegralError> {
    let result = antiderivative(expr, table)?;
    let rule = integral_rule(&simplify(expr.clone()));
    let mut lines = vec![format!("expression: ∫ {} dx", pretty(expr)), format!("rule: {rule}")];
    if let Rule::TableRow(op) = rule {
        if let Some(row) = table.integral(op) {
            let x = Expr::var();
            lines.push(format!("table: ∫ {} dx = {}", pretty(&func(op, x)), pretty(row)));
        }
    }
    lines.push(format!("result: {} + C", pretty(&result)));
    Ok(lines)
}
