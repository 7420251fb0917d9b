use super::common::{affine_slope, divide_by};
use crate::expr::{BinaryOp, Constant, Expr, Rational, UnaryOp, VARIABLE, div, func, mul, neg, pow};
use crate::formula::FormulaTable;
use crate::simplify::substitute;

/// ∫ f(u) dx from the table row of `f`, for affine `u`.
pub fn integrate_function(op: UnaryOp, arg: &Expr, table: &FormulaTable) -> Option<Expr> {
    let template = table.integral(op)?;
    let k = affine_slope(arg)?;
    Some(divide_by(substitute(template, VARIABLE, arg), &k))
}

/// ∫ a^u dx for a constant base `a` and affine `u`.
pub fn integrate_exponential(base: &Expr, exp: &Expr) -> Option<Expr> {
    let k = affine_slope(exp)?;
    let raised = pow(base.clone(), exp.clone());
    if base.as_constant() == Some(Constant::E) {
        return Some(divide_by(raised, &k));
    }
    Some(divide_by(div(raised, func(UnaryOp::Ln, base.clone())), &k))
}

/// ∫ sec(u)^2 dx and ∫ csc(u)^2 dx.
pub fn integrate_squared_trig(base: &Expr, n: &Rational) -> Option<Expr> {
    if n != &Rational::from_integer(2.into()) {
        return None;
    }
    let Expr::Unary(op, arg) = base else {
        return None;
    };
    let antiderivative = match op {
        UnaryOp::Sec => func(UnaryOp::Tan, (**arg).clone()),
        UnaryOp::Csc => neg(func(UnaryOp::Cot, (**arg).clone())),
        _ => return None,
    };
    let k = affine_slope(arg)?;
    Some(divide_by(antiderivative, &k))
}

/// ∫ sec(u)tan(u) dx and ∫ csc(u)cot(u) dx, in either factor order.
pub fn integrate_trig_product(a: &Expr, b: &Expr) -> Option<Expr> {
    let (Expr::Unary(f, u), Expr::Unary(g, v)) = (a, b) else {
        return None;
    };
    if u != v {
        return None;
    }
    let antiderivative = match (f, g) {
        (UnaryOp::Sec, UnaryOp::Tan) | (UnaryOp::Tan, UnaryOp::Sec) => {
            func(UnaryOp::Sec, (**u).clone())
        }
        (UnaryOp::Csc, UnaryOp::Cot) | (UnaryOp::Cot, UnaryOp::Csc) => {
            neg(func(UnaryOp::Csc, (**u).clone()))
        }
        _ => return None,
    };
    let k = affine_slope(u)?;
    Some(divide_by(antiderivative, &k))
}

/// ∫ c/sqrt(1 - u^2) dx = c*asin(u)/k.
pub fn integrate_inverse_sine(numer: &Expr, denom: &Expr) -> Option<Expr> {
    let Expr::Unary(UnaryOp::Sqrt, radicand) = denom else {
        return None;
    };
    let Expr::Binary(BinaryOp::Sub, one, square) = radicand.as_ref() else {
        return None;
    };
    let Expr::Binary(BinaryOp::Pow, u, two) = square.as_ref() else {
        return None;
    };
    if !one.is_one() || two.as_ref() != &Expr::integer(2) {
        return None;
    }
    let k = affine_slope(u)?;
    Some(divide_by(mul(numer.clone(), func(UnaryOp::Asin, (**u).clone())), &k))
}
