use std::fmt;

use log::{debug, warn};
use num_traits::One;

use crate::error::DiffError;
use crate::expr::{
    BinaryOp, Constant, Expr, Rational, UnaryOp, VARIABLE, add, div, func, mul, neg, one, pow, sub, zero,
};
use crate::formula::FormulaTable;
use crate::simplify::{simplify, substitute};

/// Non-fatal findings attached to a derivative.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiffWarning {
    /// A quotient whose denominator folds to the literal `0`.
    SymbolicZeroDenominator(Expr),
}

impl fmt::Display for DiffWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffWarning::SymbolicZeroDenominator(term) => {
                write!(f, "denominator of `{term}` is identically zero")
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Derivative {
    pub expr: Expr,
    pub warnings: Vec<DiffWarning>,
}

/// d/dx of `expr`, simplified.
pub fn differentiate(expr: &Expr, table: &FormulaTable) -> Result<Derivative, DiffError> {
    if let Some(name) = expr.foreign_symbol() {
        return Err(DiffError::UnsupportedVariable(name.to_string()));
    }
    let mut d = Differentiator {
        table,
        warnings: Vec::new(),
    };
    let result = simplify(d.derive(expr)?);
    debug!("d/dx {expr} = {result}");
    Ok(Derivative {
        expr: result,
        warnings: d.warnings,
    })
}

struct Differentiator<'a> {
    table: &'a FormulaTable,
    warnings: Vec<DiffWarning>,
}

impl<'a> Differentiator<'a> {
    fn derive(&mut self, expr: &Expr) -> Result<Expr, DiffError> {
        Ok(match expr {
            Expr::Number(_) => zero(),
            Expr::Symbol(name) if name == VARIABLE => one(),
            Expr::Symbol(name) if Constant::from_name(name).is_some() => zero(),
            Expr::Symbol(name) => return Err(DiffError::UnsupportedVariable(name.clone())),

            Expr::Binary(BinaryOp::Add, a, b) => add(self.derive(a)?, self.derive(b)?),
            Expr::Binary(BinaryOp::Sub, a, b) => sub(self.derive(a)?, self.derive(b)?),
            Expr::Binary(BinaryOp::Mul, a, b) => self.product_rule(a, b)?,
            Expr::Binary(BinaryOp::Div, a, b) => self.quotient_rule(a, b)?,
            Expr::Binary(BinaryOp::Pow, a, b) => self.power_rule(a, b)?,

            Expr::Unary(UnaryOp::Neg, a) => neg(self.derive(a)?),
            Expr::Unary(op, a) => self.chain_rule(*op, a)?,
        })
    }

    fn product_rule(&mut self, a: &Expr, b: &Expr) -> Result<Expr, DiffError> {
        let da = self.derive(a)?;
        let db = self.derive(b)?;
        Ok(add(mul(da, b.clone()), mul(a.clone(), db)))
    }

    fn quotient_rule(&mut self, a: &Expr, b: &Expr) -> Result<Expr, DiffError> {
        if simplify(b.clone()).is_zero() {
            let term = div(a.clone(), b.clone());
            warn!("quotient `{term}` has a zero denominator");
            self.warnings.push(DiffWarning::SymbolicZeroDenominator(term));
        }
        let da = self.derive(a)?;
        if !b.contains_var() {
            return Ok(div(da, b.clone()));
        }
        let db = self.derive(b)?;
        Ok(div(
            sub(mul(da, b.clone()), mul(a.clone(), db)),
            pow(b.clone(), Expr::integer(2)),
        ))
    }

    fn power_rule(&mut self, base: &Expr, exp: &Expr) -> Result<Expr, DiffError> {
        if let Expr::Number(n) = simplify(exp.clone()) {
            let lowered = pow(base.clone(), Expr::Number(&n - Rational::one()));
            let outer = mul(Expr::Number(n), lowered);
            if base.is_variable() {
                return Ok(outer);
            }
            return Ok(mul(outer, self.derive(base)?));
        }

        if base.as_constant() == Some(Constant::E) {
            return Ok(mul(pow(base.clone(), exp.clone()), self.derive(exp)?));
        }
        if !base.contains_var() {
            return Ok(mul(
                mul(pow(base.clone(), exp.clone()), func(UnaryOp::Ln, base.clone())),
                self.derive(exp)?,
            ));
        }

        // f^g * (g' * ln(f) + g * f'/f)
        let df = self.derive(base)?;
        let dg = self.derive(exp)?;
        Ok(mul(
            pow(base.clone(), exp.clone()),
            add(
                mul(dg, func(UnaryOp::Ln, base.clone())),
                mul(exp.clone(), div(df, base.clone())),
            ),
        ))
    }

    fn chain_rule(&mut self, op: UnaryOp, arg: &Expr) -> Result<Expr, DiffError> {
        let template = self
            .table
            .derivative(op)
            .ok_or_else(|| DiffError::NoRuleFor(op.name().to_string()))?;
        let outer = substitute(template, VARIABLE, arg);
        Ok(mul(outer, self.derive(arg)?))
    }
}
