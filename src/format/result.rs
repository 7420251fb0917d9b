use num_traits::Signed;

use crate::calculus::{Derivative, Integral};
use crate::format::expr::pretty;
use crate::numeric::{DEFAULT_DIGITS, round_significant};
use crate::expr::Rational;

/// Render a derivative. Warnings stay on the value.
pub fn pretty_derivative(result: &Derivative) -> String {
    pretty(&result.expr)
}

/// `F + C` for an antiderivative, the value for a definite integral.
pub fn pretty_integral(result: &Integral, digits: usize) -> String {
    match result {
        Integral::Indefinite(f) => format!("{} + C", pretty(f)),
        Integral::Definite { value, .. } => decimal_with_digits(value, digits),
    }
}

/// Plain decimal at the default precision, e.g. `0.3333333333333333333333333333`.
pub fn decimal(value: &Rational) -> String {
    decimal_with_digits(value, DEFAULT_DIGITS)
}

/// Plain decimal with at most `digits` significant digits and no trailing zeros.
pub fn decimal_with_digits(value: &Rational, digits: usize) -> String {
    let value = round_significant(value, digits.max(1));
    if value.is_integer() {
        return value.numer().to_string();
    }

    // rounded values have a power-of-ten denominator
    let ten = Rational::from_integer(10.into());
    let mut scaled = value.abs();
    let mut places = 0usize;
    while !scaled.is_integer() {
        scaled *= &ten;
        places += 1;
    }

    let mut text = scaled.numer().to_string();
    if text.len() <= places {
        text = format!("{}{text}", "0".repeat(places + 1 - text.len()));
    }
    let (whole, frac) = text.split_at(text.len() - places);
    let sign = if value.is_negative() { "-" } else { "" };
    format!("{sign}{whole}.{frac}")
}
