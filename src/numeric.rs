//! Fixed-precision real kernels on top of exact rationals.
//!
//! Every transcendental kernel takes the number of significant digits the caller
//! wants and works internally with `GUARD_DIGITS` more, in scaled-integer
//! fixed point (values are `BigInt`s multiplied by `10^places`).

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::error::EvalError;
use crate::expr::{Constant, Rational};

/// Significant digits kept in every evaluated number.
pub const DEFAULT_DIGITS: usize = 28;

const GUARD_DIGITS: usize = 12;

/// Largest `|x|` accepted by `exp`.
const EXP_LIMIT: i64 = 10_000;

/// Largest decimal exponent of `|x|` accepted by the trigonometric kernels.
const TRIG_MAX_EXPONENT: i64 = 1_000;

pub fn pow10(n: usize) -> BigInt {
    BigInt::from(10u32).pow(n as u32)
}

fn pow10_rational(exp: i64) -> Rational {
    if exp >= 0 {
        Rational::from_integer(pow10(exp as usize))
    } else {
        Rational::new(BigInt::one(), pow10(exp.unsigned_abs() as usize))
    }
}

/// Integer division rounding half away from zero.
fn round_div(n: &BigInt, d: &BigInt) -> BigInt {
    let (q, r) = n.div_rem(d);
    if r.abs() * 2u32 >= d.abs() {
        if n.is_negative() != d.is_negative() {
            q - 1u32
        } else {
            q + 1u32
        }
    } else {
        q
    }
}

/// `floor(log10(|value|))` for a non-zero value.
fn decimal_exponent(value: &Rational) -> i64 {
    let n = value.numer().abs();
    let d = value.denom().abs();
    let guess = n.to_string().len() as i64 - d.to_string().len() as i64;
    if Rational::new(n, d) >= pow10_rational(guess) {
        guess
    } else {
        guess - 1
    }
}

/// Round to `digits` significant decimal digits, half away from zero.
pub fn round_significant(value: &Rational, digits: usize) -> Rational {
    if value.is_zero() || value.is_integer() && value.numer().abs().to_string().len() <= digits {
        return value.clone();
    }
    let shift = digits as i64 - 1 - decimal_exponent(value);
    let scaled = value * pow10_rational(shift);
    let rounded = round_div(scaled.numer(), scaled.denom());
    Rational::from_integer(rounded) * pow10_rational(-shift)
}

/// Extra fixed-point places for `|x| < 1`, so a result about the size of `x`
/// keeps its significant digits.
fn small_places(x: &Rational, digits: usize) -> usize {
    let exponent = decimal_exponent(x);
    if exponent >= 0 {
        0
    } else {
        (exponent.unsigned_abs() as usize).min(digits + GUARD_DIGITS)
    }
}

/// True when `x^3` is below the working precision relative to `x`.
fn cubic_negligible(x: &Rational, digits: usize) -> bool {
    decimal_exponent(x) < -((digits + GUARD_DIGITS) as i64)
}

struct Fixed {
    scale: BigInt,
}

impl Fixed {
    fn new(places: usize) -> Self {
        Self {
            scale: pow10(places),
        }
    }

    fn one(&self) -> BigInt {
        self.scale.clone()
    }

    fn from_rational(&self, r: &Rational) -> BigInt {
        round_div(&(r.numer() * &self.scale), r.denom())
    }

    fn to_rational(&self, v: BigInt) -> Rational {
        Rational::new(v, self.scale.clone())
    }

    fn mul(&self, a: &BigInt, b: &BigInt) -> BigInt {
        round_div(&(a * b), &self.scale)
    }

    fn div(&self, a: &BigInt, b: &BigInt) -> BigInt {
        round_div(&(a * &self.scale), b)
    }

    fn sqrt(&self, v: &BigInt) -> BigInt {
        (v * &self.scale).sqrt()
    }
}

/// atan(1/q) scaled by `scale`, truncated.
fn atan_inv_scaled(q: u32, scale: &BigInt) -> BigInt {
    let q = BigInt::from(q);
    let q2 = &q * &q;
    let mut power = q.clone();
    let mut sum = BigInt::zero();
    let mut k = 0u32;
    loop {
        let term = scale / (&power * (2 * k + 1));
        if term.is_zero() {
            break;
        }
        if k % 2 == 0 {
            sum += term;
        } else {
            sum -= term;
        }
        power *= &q2;
        k += 1;
    }
    sum
}

fn pi_fixed(fx: &Fixed) -> BigInt {
    // Machin: pi = 16 atan(1/5) - 4 atan(1/239)
    let extra = pow10(6);
    let wide = &fx.scale * &extra;
    let pi = atan_inv_scaled(5, &wide) * 16 - atan_inv_scaled(239, &wide) * 4;
    round_div(&pi, &extra)
}

pub fn pi(digits: usize) -> Rational {
    let fx = Fixed::new(digits + GUARD_DIGITS);
    fx.to_rational(pi_fixed(&fx))
}

pub fn constant_value(c: Constant, digits: usize) -> Rational {
    match c {
        Constant::Pi => pi(digits),
        Constant::E => exp_positive(&Rational::one(), digits),
        Constant::Phi => {
            let five = Rational::from_integer(5.into());
            let root = sqrt_non_negative(&five, digits);
            (Rational::one() + root) / Rational::from_integer(2.into())
        }
    }
}

pub fn sqrt(x: &Rational, digits: usize) -> Result<Rational, EvalError> {
    if x.is_negative() {
        return Err(EvalError::DomainError(
            "square root of a negative value".to_string(),
        ));
    }
    Ok(sqrt_non_negative(x, digits))
}

fn sqrt_non_negative(x: &Rational, digits: usize) -> Rational {
    if x.is_zero() {
        return Rational::zero();
    }
    let (n, d) = (x.numer(), x.denom());
    let (rn, rd) = (n.sqrt(), d.sqrt());
    if &(&rn * &rn) == n && &(&rd * &rd) == d {
        return Rational::new(rn, rd);
    }
    let s = pow10(digits + GUARD_DIGITS);
    let root = (n * d * &s * &s).sqrt();
    Rational::new(root, d * s)
}

pub fn exp(x: &Rational, digits: usize) -> Result<Rational, EvalError> {
    if x.abs() > Rational::from_integer(EXP_LIMIT.into()) {
        return Err(EvalError::DomainError(format!(
            "exponent magnitude exceeds {EXP_LIMIT}"
        )));
    }
    if x.is_negative() {
        return Ok(exp_positive(&-x, digits).recip());
    }
    Ok(exp_positive(x, digits))
}

fn exp_positive(x: &Rational, digits: usize) -> Rational {
    if x.is_zero() {
        return Rational::one();
    }
    let half = Rational::new(1.into(), 2.into());
    let two = Rational::from_integer(2.into());
    let mut reduced = x.clone();
    let mut halvings = 0usize;
    while reduced > half {
        reduced /= &two;
        halvings += 1;
    }

    let fx = Fixed::new(digits + GUARD_DIGITS + halvings);
    let xs = fx.from_rational(&reduced);
    let mut sum = fx.one();
    let mut term = fx.one();
    let mut k = 1u32;
    loop {
        term = fx.mul(&term, &xs) / k;
        if term.is_zero() {
            break;
        }
        sum += &term;
        k += 1;
    }
    for _ in 0..halvings {
        sum = fx.mul(&sum, &sum);
    }
    fx.to_rational(sum)
}

fn atanh_fixed(fx: &Fixed, z: &BigInt) -> BigInt {
    let z2 = fx.mul(z, z);
    let mut power = z.clone();
    let mut sum = z.clone();
    let mut n = 1u32;
    loop {
        power = fx.mul(&power, &z2);
        n += 2;
        let term = &power / n;
        if term.is_zero() {
            break;
        }
        sum += term;
    }
    sum
}

pub fn ln(x: &Rational, digits: usize) -> Result<Rational, EvalError> {
    if !x.is_positive() {
        return Err(EvalError::DomainError(
            "logarithm of a non-positive value".to_string(),
        ));
    }
    if x.is_one() {
        return Ok(Rational::zero());
    }

    // x = m * 2^k with 1 <= m < 2
    let one = Rational::one();
    let two = Rational::from_integer(2.into());
    let mut k = x.numer().bits() as i64 - x.denom().bits() as i64;
    let mut m = if k >= 0 {
        x / Rational::from_integer(BigInt::one() << k as usize)
    } else {
        x * Rational::from_integer(BigInt::one() << k.unsigned_abs() as usize)
    };
    while m >= two {
        m /= &two;
        k += 1;
    }
    while m < one {
        m *= &two;
        k -= 1;
    }

    let fx = Fixed::new(digits + GUARD_DIGITS + k.unsigned_abs().to_string().len());
    let z = (&m - &one) / (&m + &one);
    let ln_m = atanh_fixed(&fx, &fx.from_rational(&z)) * 2u32;
    let third = Rational::new(1.into(), 3.into());
    let ln2 = atanh_fixed(&fx, &fx.from_rational(&third)) * 2u32;
    Ok(fx.to_rational(ln_m + ln2 * k))
}

/// Sine and cosine together, reduced modulo pi/2.
///
/// For `|x| < 10^GUARD_DIGITS`, a residue within the rounding noise of the
/// argument itself (relative `10^-(digits + GUARD_DIGITS - 2)`) is treated as an
/// exact multiple of pi/2, so `sin(pi)` and `cos(pi/2)` are 0 while
/// `sin(pi + 10^-35)` is not.
pub fn sin_cos(x: &Rational, digits: usize) -> Result<(Rational, Rational), EvalError> {
    if x.is_zero() {
        return Ok((Rational::zero(), Rational::one()));
    }
    let exponent = decimal_exponent(x);
    if exponent > TRIG_MAX_EXPONENT {
        return Err(EvalError::DomainError(format!(
            "trigonometric argument exceeds 10^{TRIG_MAX_EXPONENT}"
        )));
    }
    if cubic_negligible(x, digits) {
        let half_square = x * x / Rational::from_integer(2.into());
        return Ok((x.clone(), Rational::one() - half_square));
    }

    let magnitude = exponent.max(0) as usize;
    let fx = Fixed::new(digits + GUARD_DIGITS + magnitude + small_places(x, digits));
    let half_pi = pi_fixed(&fx) / 2u32;
    let xs = fx.from_rational(x);
    let n = round_div(&xs, &half_pi);
    let mut r = &xs - &n * &half_pi;
    let noise = xs.abs() / pow10(digits + GUARD_DIGITS - 2);
    if !n.is_zero() && exponent < GUARD_DIGITS as i64 && r.abs() <= noise {
        r = BigInt::zero();
    }

    let r2 = fx.mul(&r, &r);
    let mut s = r.clone();
    let mut term = r.clone();
    let mut k = 1u32;
    loop {
        term = -fx.mul(&term, &r2) / ((2 * k) * (2 * k + 1));
        if term.is_zero() {
            break;
        }
        s += &term;
        k += 1;
    }
    let mut c = fx.one();
    let mut term = fx.one();
    let mut k = 1u32;
    loop {
        term = -fx.mul(&term, &r2) / ((2 * k - 1) * (2 * k));
        if term.is_zero() {
            break;
        }
        c += &term;
        k += 1;
    }

    let quadrant = n.mod_floor(&BigInt::from(4)).to_u8().unwrap_or(0);
    let (s, c) = match quadrant {
        0 => (s, c),
        1 => (c, -s),
        2 => (-s, -c),
        _ => (-c, s),
    };
    Ok((fx.to_rational(s), fx.to_rational(c)))
}

pub fn atan(x: &Rational, digits: usize) -> Rational {
    if x.is_zero() {
        return Rational::zero();
    }
    if x.is_negative() {
        return -atan(&-x, digits);
    }
    if x > &Rational::one() {
        let half_pi = pi(digits) / Rational::from_integer(2.into());
        return half_pi - atan_series(&x.recip(), digits + GUARD_DIGITS);
    }
    if cubic_negligible(x, digits) {
        return x.clone();
    }
    atan_series(x, digits + GUARD_DIGITS + small_places(x, digits))
}

/// atan(x) for `0 <= x <= 1` at `places` fixed-point places.
fn atan_series(x: &Rational, places: usize) -> Rational {
    let fx = Fixed::new(places);
    let threshold = &fx.scale / 10u32;
    let mut xs = fx.from_rational(x);
    let mut doublings = 0usize;
    // atan(x) = 2 atan(x / (1 + sqrt(1 + x^2)))
    while xs > threshold {
        let root = fx.sqrt(&(fx.one() + fx.mul(&xs, &xs)));
        xs = fx.div(&xs, &(fx.one() + root));
        doublings += 1;
    }

    let x2 = fx.mul(&xs, &xs);
    let mut power = xs.clone();
    let mut sum = xs;
    let mut n = 1u32;
    let mut subtract = true;
    loop {
        power = fx.mul(&power, &x2);
        n += 2;
        let term = &power / n;
        if term.is_zero() {
            break;
        }
        if subtract {
            sum -= term;
        } else {
            sum += term;
        }
        subtract = !subtract;
    }
    fx.to_rational(sum << doublings)
}

pub fn asin(x: &Rational, digits: usize) -> Result<Rational, EvalError> {
    let one = Rational::one();
    if x.abs() > one {
        return Err(EvalError::DomainError(
            "asin argument outside [-1, 1]".to_string(),
        ));
    }
    let half_pi = pi(digits) / Rational::from_integer(2.into());
    if *x == one {
        return Ok(half_pi);
    }
    if *x == -one.clone() {
        return Ok(-half_pi);
    }
    let root = sqrt_non_negative(&(&one - x * x), digits);
    Ok(atan(&(x / root), digits))
}

pub fn acos(x: &Rational, digits: usize) -> Result<Rational, EvalError> {
    if x.abs() > Rational::one() {
        return Err(EvalError::DomainError(
            "acos argument outside [-1, 1]".to_string(),
        ));
    }
    Ok(pi(digits) / Rational::from_integer(2.into()) - asin(x, digits)?)
}

pub fn sinh(x: &Rational, digits: usize) -> Result<Rational, EvalError> {
    if x.abs() < Rational::one() {
        if cubic_negligible(x, digits) {
            return Ok(x.clone());
        }
        let fx = Fixed::new(digits + GUARD_DIGITS + small_places(x, digits));
        let xs = fx.from_rational(x);
        let x2 = fx.mul(&xs, &xs);
        let mut sum = xs.clone();
        let mut term = xs;
        let mut k = 1u32;
        loop {
            term = fx.mul(&term, &x2) / ((2 * k) * (2 * k + 1));
            if term.is_zero() {
                break;
            }
            sum += &term;
            k += 1;
        }
        return Ok(fx.to_rational(sum));
    }
    let ex = exp(x, digits)?;
    Ok((&ex - ex.recip()) / Rational::from_integer(2.into()))
}

pub fn cosh(x: &Rational, digits: usize) -> Result<Rational, EvalError> {
    let ex = exp(x, digits)?;
    Ok((&ex + ex.recip()) / Rational::from_integer(2.into()))
}

/// Hyperbolic tangent; saturates to `±1` once `1 - |tanh x|` is below the
/// working precision, so large arguments never reach `exp`.
pub fn tanh(x: &Rational, digits: usize) -> Result<Rational, EvalError> {
    let saturation = Rational::from_integer(BigInt::from(2 * (digits + GUARD_DIGITS)));
    if x.abs() > saturation {
        return Ok(if x.is_negative() {
            -Rational::one()
        } else {
            Rational::one()
        });
    }
    Ok(sinh(x, digits)? / cosh(x, digits)?)
}

/// Raise `base` to `exponent`; integer exponents are exact.
pub fn power(base: &Rational, exponent: &Rational, digits: usize) -> Result<Rational, EvalError> {
    if base.is_zero() {
        return if exponent.is_negative() {
            Err(EvalError::DivisionByZero)
        } else if exponent.is_zero() {
            Ok(Rational::one())
        } else {
            Ok(Rational::zero())
        };
    }
    if exponent.is_integer() {
        if let Some(n) = exponent.to_integer().to_i32() {
            return Ok(base.pow(n));
        }
    }
    if base.is_positive() {
        return exp(&(exponent * ln(base, digits)?), digits);
    }
    if exponent.is_integer() {
        let magnitude = exp(&(exponent * ln(&-base, digits)?), digits)?;
        return Ok(if exponent.to_integer().is_odd() {
            -magnitude
        } else {
            magnitude
        });
    }
    Err(EvalError::DomainError(
        "non-integer power of a negative value".to_string(),
    ))
}
