use super::common::{affine_slope, divide_by};
use crate::expr::{Expr, Rational, UnaryOp, div, func, mul, pow};
use num_traits::One;

/// ∫ u^n dx for affine `u`; `n = -1` gives `ln(abs(u))`.
pub fn integrate_power(base: &Expr, n: &Rational) -> Option<Expr> {
    let k = affine_slope(base)?;
    if n == &-Rational::one() {
        return Some(divide_by(log_abs(base), &k));
    }
    let m = n + Rational::one();
    let raised = pow(base.clone(), Expr::Number(m.clone()));
    Some(divide_by(divide_by(raised, &m), &k))
}

/// ∫ c/u dx for constant `c` and affine `u`.
pub fn integrate_reciprocal(numer: &Expr, denom: &Expr) -> Option<Expr> {
    let k = affine_slope(denom)?;
    Some(divide_by(mul(numer.clone(), log_abs(denom)), &k))
}

fn log_abs(u: &Expr) -> Expr {
    func(UnaryOp::Ln, func(UnaryOp::Abs, u.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{add, rational};

    #[test]
    fn power_rule_with_affine_base() {
        let x = Expr::var();
        assert_eq!(
            integrate_power(&x, &rational(2, 1)),
            Some(div(pow(x.clone(), Expr::integer(3)), Expr::integer(3)))
        );
        let u = add(mul(Expr::integer(2), x.clone()), Expr::integer(1));
        assert_eq!(
            integrate_power(&u, &rational(-1, 1)),
            Some(div(log_abs(&u), Expr::integer(2)))
        );
        assert_eq!(integrate_power(&pow(x, Expr::integer(2)), &rational(2, 1)), None);
    }
}
