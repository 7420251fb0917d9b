use crate::expr::{BinaryOp, Expr, Rational, UnaryOp, div, mul};
use num_traits::{One, Zero};

/// Slope `k` of an affine argument `k*x + b` with rational `k != 0`.
pub fn affine_slope(expr: &Expr) -> Option<Rational> {
    let k = slope(expr)?;
    (!k.is_zero()).then_some(k)
}

fn slope(expr: &Expr) -> Option<Rational> {
    if !expr.contains_var() {
        return Some(Rational::zero());
    }
    match expr {
        Expr::Symbol(_) => Some(Rational::one()),
        Expr::Unary(UnaryOp::Neg, a) => slope(a).map(|k| -k),
        Expr::Binary(BinaryOp::Add, a, b) => Some(slope(a)? + slope(b)?),
        Expr::Binary(BinaryOp::Sub, a, b) => Some(slope(a)? - slope(b)?),
        Expr::Binary(BinaryOp::Mul, a, b) => match (a.as_ref(), b.as_ref()) {
            (Expr::Number(c), t) | (t, Expr::Number(c)) => Some(c * slope(t)?),
            _ => None,
        },
        Expr::Binary(BinaryOp::Div, a, b) => match b.as_ref() {
            Expr::Number(c) if !c.is_zero() => Some(slope(a)? / c),
            _ => None,
        },
        _ => None,
    }
}

/// `expr / by`, written as an integer divisor or a coefficient where possible.
pub fn divide_by(expr: Expr, by: &Rational) -> Expr {
    let inv = by.recip();
    let p = Expr::Number(Rational::from_integer(inv.numer().clone()));
    let q = Expr::Number(Rational::from_integer(inv.denom().clone()));
    match (inv.numer().is_one(), inv.denom().is_one()) {
        (true, true) => expr,
        (true, false) => div(expr, q),
        (false, true) => mul(p, expr),
        (false, false) => div(mul(p, expr), q),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{Constant, add, pow, rational, sub};

    #[test]
    fn slopes_of_affine_arguments() {
        let x = Expr::var();
        assert_eq!(affine_slope(&x), Some(rational(1, 1)));
        let u = sub(mul(Expr::integer(3), x.clone()), Expr::constant(Constant::Pi));
        assert_eq!(affine_slope(&u), Some(rational(3, 1)));
        let u = add(div(x.clone(), Expr::integer(2)), x.clone());
        assert_eq!(affine_slope(&u), Some(rational(3, 2)));
        assert_eq!(affine_slope(&pow(x.clone(), Expr::integer(2))), None);
        assert_eq!(affine_slope(&sub(x.clone(), x)), None);
    }

    #[test]
    fn divides_by_rationals() {
        let x = Expr::var();
        assert_eq!(divide_by(x.clone(), &rational(3, 1)), div(x.clone(), Expr::integer(3)));
        assert_eq!(divide_by(x.clone(), &rational(1, 2)), mul(Expr::integer(2), x.clone()));
        assert_eq!(
            divide_by(x.clone(), &rational(3, 2)),
            div(mul(Expr::integer(2), x), Expr::integer(3))
        );
    }
}
