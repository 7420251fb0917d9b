use crate::expr::{BinaryOp, Expr, Rational, UnaryOp};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed};

const SUM: u8 = 1;
const PRODUCT: u8 = 2;
const IMPLICIT: u8 = 3;
const POWER: u8 = 4;
const PREFIX: u8 = 5;
const ATOM: u8 = 6;

/// Render an expression in the calculator's notation, e.g. `3x^2 + 4x + 1`.
pub fn pretty(expr: &Expr) -> String {
    fn pp(ctx: u8, expr: &Expr) -> String {
        match expr {
            Expr::Symbol(name) => name.clone(),
            Expr::Number(r) => bracket(ctx, number_prec(r), show_rational(r)),

            Expr::Binary(op @ (BinaryOp::Add | BinaryOp::Sub), a, b) => {
                let s_a = pp(SUM, a);
                let (flip, s_b) = match split_neg(b) {
                    Some(magnitude) => (true, pp(PRODUCT, &magnitude)),
                    None => (false, pp(PRODUCT, b)),
                };
                let minus = (*op == BinaryOp::Sub) != flip;
                let body = format!("{s_a} {} {s_b}", if minus { "-" } else { "+" });
                bracket(ctx, SUM, body)
            }

            Expr::Binary(BinaryOp::Mul, a, b) => match a.as_ref() {
                Expr::Number(c) if juxtaposable(b) => {
                    let body = format!("{}{}", show_coefficient(c), pp(POWER, b));
                    bracket(ctx, IMPLICIT, body)
                }
                _ => bracket(ctx, PRODUCT, format!("{}*{}", pp(PRODUCT, a), pp(IMPLICIT, b))),
            },

            Expr::Binary(BinaryOp::Div, a, b) => {
                bracket(ctx, PRODUCT, format!("{}/{}", pp(PRODUCT, a), pp(POWER, b)))
            }

            Expr::Binary(BinaryOp::Pow, a, b) => {
                bracket(ctx, POWER, format!("{}^{}", pp(ATOM, a), pp(POWER, b)))
            }

            Expr::Unary(UnaryOp::Neg, a) => bracket(ctx, PREFIX, format!("-{}", pp(PREFIX, a))),
            Expr::Unary(op, a) => format!("{}({})", op.name(), pp(0, a)),
        }
    }

    pp(0, &fold_literals(expr))
}

/// Rewrite the subterms the parser reads back as one number: a negated
/// literal and a reduced integer quotient `p/q` with `q > 1`.
fn fold_literals(expr: &Expr) -> Expr {
    match expr {
        Expr::Unary(UnaryOp::Neg, a) => match fold_literals(a) {
            Expr::Number(r) => Expr::Number(-r),
            inner => Expr::Unary(UnaryOp::Neg, inner.boxed()),
        },
        Expr::Unary(op, a) => Expr::Unary(*op, fold_literals(a).boxed()),
        Expr::Binary(op, a, b) => {
            let (a, b) = (fold_literals(a), fold_literals(b));
            match (op, &a, &b) {
                (BinaryOp::Div, Expr::Number(p), Expr::Number(q)) if reduced_quotient(p, q) => {
                    Expr::Number(p / q)
                }
                _ => Expr::Binary(*op, a.boxed(), b.boxed()),
            }
        }
        leaf => leaf.clone(),
    }
}

fn reduced_quotient(p: &Rational, q: &Rational) -> bool {
    p.is_integer()
        && q.is_integer()
        && q.numer() > &BigInt::one()
        && p.numer().gcd(q.numer()).is_one()
}

/// Magnitude of a term that would render with a leading minus.
fn split_neg(expr: &Expr) -> Option<Expr> {
    match expr {
        Expr::Unary(UnaryOp::Neg, inner) if split_neg(inner).is_none() => Some((**inner).clone()),
        Expr::Number(r) if r.is_negative() => Some(Expr::Number(-r)),
        Expr::Binary(BinaryOp::Mul, a, b) => match a.as_ref() {
            Expr::Number(c) if c.is_negative() => Some(Expr::Binary(
                BinaryOp::Mul,
                Expr::Number(-c).boxed(),
                b.clone(),
            )),
            _ => None,
        },
        Expr::Binary(BinaryOp::Div, a, b) => {
            split_neg(a).map(|m| Expr::Binary(BinaryOp::Div, m.boxed(), b.clone()))
        }
        _ => None,
    }
}

/// Factors written directly after a numeric coefficient: `3x`, `2sin(x)`, `4x^2`.
fn juxtaposable(expr: &Expr) -> bool {
    fn named(expr: &Expr) -> bool {
        match expr {
            Expr::Symbol(_) => true,
            Expr::Unary(op, _) => *op != UnaryOp::Neg,
            _ => false,
        }
    }
    match expr {
        Expr::Binary(BinaryOp::Pow, base, _) => named(base),
        other => named(other),
    }
}

fn number_prec(r: &Rational) -> u8 {
    if !r.is_integer() {
        PRODUCT
    } else if r.is_negative() {
        PREFIX
    } else {
        ATOM
    }
}

fn show_coefficient(r: &Rational) -> String {
    if r.is_integer() {
        show_rational(r)
    } else {
        format!("({})", show_rational(r))
    }
}

fn bracket(ctx: u8, prec: u8, body: String) -> String {
    if prec < ctx {
        format!("({body})")
    } else {
        body
    }
}

fn show_rational(r: &Rational) -> String {
    if r.is_integer() {
        r.numer().to_string()
    } else {
        format!("{}/{}", r.numer(), r.denom())
    }
}
