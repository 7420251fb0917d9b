use std::collections::HashMap;

use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::expr::{BinaryOp, Expr, Rational, UnaryOp, add, div, mul, neg, one, pow, sub, zero};

/// Largest integer exponent folded when base and exponent are both literals.
const FOLD_POW_LIMIT: i32 = 64;

/// Single bottom-up pass of constant folding and the basic identities.
pub fn simplify(expr: Expr) -> Expr {
    let mut cache = HashMap::new();
    simplify_cached(expr, &mut cache)
}

fn simplify_cached(expr: Expr, cache: &mut HashMap<Expr, Expr>) -> Expr {
    if let Some(hit) = cache.get(&expr) {
        return hit.clone();
    }

    let key = expr.clone();
    let result = match expr {
        Expr::Binary(op, a, b) => {
            let a = simplify_cached(*a, cache);
            let b = simplify_cached(*b, cache);
            match op {
                BinaryOp::Add => simplify_add(a, b),
                BinaryOp::Sub => simplify_sub(a, b),
                BinaryOp::Mul => simplify_mul(a, b),
                BinaryOp::Div => simplify_div(a, b),
                BinaryOp::Pow => simplify_pow(a, b),
            }
        }
        Expr::Unary(UnaryOp::Neg, a) => simplify_neg(simplify_cached(*a, cache)),
        Expr::Unary(op, a) => Expr::Unary(op, simplify_cached(*a, cache).boxed()),
        e => e,
    };

    cache.insert(key, result.clone());
    result
}

pub fn simplify_add(x: Expr, y: Expr) -> Expr {
    match (x, y) {
        (Expr::Number(a), Expr::Number(b)) => Expr::Number(a + b),
        (a, b) if a.is_zero() => b,
        (a, b) if b.is_zero() => a,
        (a, b) => {
            if let Some(magnitude) = negated(&b) {
                return simplify_sub(a, magnitude);
            }
            combine_like_terms(&a, &b, false).unwrap_or_else(|| add(a, b))
        }
    }
}

pub fn simplify_sub(x: Expr, y: Expr) -> Expr {
    match (x, y) {
        (Expr::Number(a), Expr::Number(b)) => Expr::Number(a - b),
        (a, b) if b.is_zero() => a,
        (a, b) if a.is_zero() => simplify_neg(b),
        (a, b) => {
            if let Some(magnitude) = negated(&b) {
                return simplify_add(a, magnitude);
            }
            combine_like_terms(&a, &b, true).unwrap_or_else(|| sub(a, b))
        }
    }
}

pub fn simplify_neg(x: Expr) -> Expr {
    match x {
        Expr::Number(n) => Expr::Number(-n),
        Expr::Unary(UnaryOp::Neg, inner) => *inner,
        Expr::Binary(BinaryOp::Mul, a, b) => match *a {
            Expr::Number(c) => simplify_mul(Expr::Number(-c), *b),
            a => neg(mul(a, *b)),
        },
        Expr::Binary(BinaryOp::Div, a, b) => div(simplify_neg(*a), *b),
        other => neg(other),
    }
}

pub fn simplify_mul(x: Expr, y: Expr) -> Expr {
    if let (Expr::Number(a), Expr::Number(b)) = (&x, &y) {
        return Expr::Number(a * b);
    }
    if x.is_zero() || y.is_zero() {
        return zero();
    }
    if x.is_one() {
        return y;
    }
    if y.is_one() {
        return x;
    }
    if let Expr::Number(c) = y {
        return simplify_mul(Expr::Number(c), x);
    }
    if let Expr::Unary(UnaryOp::Neg, t) = x {
        return simplify_neg(simplify_mul(*t, y));
    }
    if let Expr::Unary(UnaryOp::Neg, t) = y {
        return simplify_neg(simplify_mul(x, *t));
    }

    if let Expr::Number(c) = &x {
        if c == &-Rational::one() {
            return simplify_neg(y);
        }
        match &y {
            Expr::Binary(BinaryOp::Mul, l, r) => {
                if let Expr::Number(inner) = l.as_ref() {
                    return simplify_mul(Expr::Number(c * inner), (**r).clone());
                }
            }
            Expr::Binary(BinaryOp::Div, n, d) => {
                if let Expr::Number(den) = d.as_ref() {
                    if !den.is_zero() {
                        return scale_quotient(c / den, (**n).clone());
                    }
                }
                if let Expr::Number(num) = n.as_ref() {
                    return simplify_div(Expr::Number(c * num), (**d).clone());
                }
            }
            _ => {}
        }
    }

    if x == y {
        return pow(x, Expr::integer(2));
    }
    mul(x, y)
}

pub fn simplify_div(x: Expr, y: Expr) -> Expr {
    if y.is_one() {
        return x;
    }
    if let (Expr::Number(a), Expr::Number(b)) = (&x, &y) {
        if !b.is_zero() {
            return Expr::Number(a / b);
        }
    }
    if y.is_zero() {
        return div(x, y);
    }
    if x.is_zero() {
        return zero();
    }
    if let Expr::Number(d) = &y {
        if d == &-Rational::one() {
            return simplify_neg(x);
        }
        if let Expr::Binary(BinaryOp::Mul, l, r) = &x {
            if let Expr::Number(c) = l.as_ref() {
                return scale_quotient(c / d, (**r).clone());
            }
        }
    }
    div(x, y)
}

pub fn simplify_pow(x: Expr, y: Expr) -> Expr {
    if y.is_zero() {
        return one();
    }
    if y.is_one() {
        return x;
    }
    if let (Expr::Number(base), Expr::Number(exp)) = (&x, &y) {
        if let Some(folded) = fold_pow(base, exp) {
            return Expr::Number(folded);
        }
    }
    pow(x, y)
}

fn fold_pow(base: &Rational, exp: &Rational) -> Option<Rational> {
    if !exp.is_integer() {
        return None;
    }
    let n = exp.to_integer().to_i32()?;
    if n.abs() > FOLD_POW_LIMIT || (base.is_zero() && n < 0) {
        return None;
    }
    Some(base.pow(n))
}

/// `ratio * t`, written as `(p*t)/q` when the ratio is not an integer.
fn scale_quotient(ratio: Rational, t: Expr) -> Expr {
    if ratio.is_integer() {
        return simplify_mul(Expr::Number(ratio), t);
    }
    let numer = Expr::Number(Rational::from_integer(ratio.numer().clone()));
    let denom = Expr::Number(Rational::from_integer(ratio.denom().clone()));
    div(simplify_mul(numer, t), denom)
}

/// Magnitude of a term that renders with a leading minus.
fn negated(expr: &Expr) -> Option<Expr> {
    match expr {
        Expr::Number(n) if n.is_negative() => Some(Expr::Number(-n)),
        Expr::Unary(UnaryOp::Neg, inner) => Some((**inner).clone()),
        Expr::Binary(BinaryOp::Mul, l, r) => match l.as_ref() {
            Expr::Number(c) if c.is_negative() => Some(scale(-c, (**r).clone())),
            _ => None,
        },
        Expr::Binary(BinaryOp::Div, n, d) => negated(n).map(|m| div(m, (**d).clone())),
        _ => None,
    }
}

fn split_coeff(expr: &Expr) -> (Rational, Expr) {
    match expr {
        Expr::Unary(UnaryOp::Neg, inner) => {
            let (c, t) = split_coeff(inner);
            (-c, t)
        }
        Expr::Binary(BinaryOp::Mul, l, r) => match l.as_ref() {
            Expr::Number(c) => (c.clone(), (**r).clone()),
            _ => (Rational::one(), expr.clone()),
        },
        other => (Rational::one(), other.clone()),
    }
}

fn combine_like_terms(a: &Expr, b: &Expr, subtract: bool) -> Option<Expr> {
    let (ca, ta) = split_coeff(a);
    let (cb, tb) = split_coeff(b);
    if ta != tb || matches!(ta, Expr::Number(_)) {
        return None;
    }
    let c = if subtract { ca - cb } else { ca + cb };
    Some(scale(c, ta))
}

fn scale(c: Rational, t: Expr) -> Expr {
    if c.is_zero() {
        zero()
    } else if c.is_one() {
        t
    } else if c == -Rational::one() {
        neg(t)
    } else {
        mul(Expr::Number(c), t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{func, rational};

    fn x() -> Expr {
        Expr::var()
    }

    #[test]
    fn folds_numbers_and_identities() {
        assert_eq!(simplify(add(Expr::integer(2), Expr::integer(3))), Expr::integer(5));
        assert_eq!(simplify(mul(one(), x())), x());
        assert_eq!(simplify(mul(x(), zero())), zero());
        assert_eq!(simplify(sub(zero(), x())), neg(x()));
        assert_eq!(simplify(pow(x(), one())), x());
        assert_eq!(simplify(pow(x(), zero())), one());
        assert_eq!(simplify(div(zero(), x())), zero());
        assert_eq!(simplify(neg(neg(x()))), x());
    }

    #[test]
    fn moves_coefficients_and_negation_outward() {
        let t = func(UnaryOp::Sin, x());
        assert_eq!(
            simplify(mul(neg(t.clone()), Expr::integer(2))),
            mul(Expr::integer(-2), t.clone())
        );
        assert_eq!(
            simplify(mul(Expr::integer(3), mul(Expr::integer(4), x()))),
            mul(Expr::integer(12), x())
        );
        assert_eq!(
            simplify(add(x(), neg(t.clone()))),
            sub(x(), t)
        );
    }

    #[test]
    fn scales_quotients_by_coefficients() {
        let cube = pow(x(), Expr::integer(3));
        assert_eq!(
            simplify(mul(Expr::integer(3), div(cube.clone(), Expr::integer(3)))),
            cube
        );
        assert_eq!(
            simplify(mul(Expr::integer(2), div(cube.clone(), Expr::integer(3)))),
            div(mul(Expr::integer(2), cube), Expr::integer(3))
        );
        assert_eq!(
            simplify(div(mul(Expr::integer(6), x()), Expr::integer(4))),
            div(mul(Expr::integer(3), x()), Expr::integer(2))
        );
    }

    #[test]
    fn squares_repeated_factors_and_combines_like_terms() {
        let c = func(UnaryOp::Cos, x());
        assert_eq!(simplify(mul(c.clone(), c.clone())), pow(c, Expr::integer(2)));
        assert_eq!(simplify(add(x(), x())), mul(Expr::integer(2), x()));
        assert_eq!(simplify(sub(mul(Expr::integer(2), x()), mul(Expr::integer(2), x()))), zero());
    }

    #[test]
    fn negation_moves_into_numerators() {
        let q = div(func(UnaryOp::Cos, x()), Expr::integer(2));
        assert_eq!(
            simplify(neg(q)),
            div(neg(func(UnaryOp::Cos, x())), Expr::integer(2))
        );
        let sum = add(x(), div(neg(x()), Expr::integer(3)));
        assert_eq!(simplify(sum), sub(x(), div(x(), Expr::integer(3))));
    }

    #[test]
    fn keeps_literal_zero_denominators() {
        let e = div(x(), sub(Expr::integer(1), Expr::integer(1)));
        assert_eq!(simplify(e), div(x(), zero()));
        assert_eq!(
            simplify(pow(Expr::integer(2), Expr::integer(-2))),
            Expr::Number(rational(1, 4))
        );
    }
}
