use crate::error::{ParseError, ParseErrorKind};
use crate::expr::{Constant, Expr, Rational, UnaryOp, VARIABLE, add, div, func, mul, neg, pow, sub};
use crate::numeric::pow10;
use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{alpha1, alphanumeric0, char, digit0, digit1, multispace0, satisfy};
use nom::combinator::{all_consuming, map, map_res, not, opt, peek, recognize};
use nom::error::{VerboseError, VerboseErrorKind};
use nom::multi::fold_many0;
use nom::sequence::{delimited, pair, preceded, separated_pair, terminated};
use num_bigint::{BigInt, ParseBigIntError};
use num_integer::Integer;
use num_traits::One;

type PResult<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

/// Deepest nesting accepted; groups, prefix minus runs and power chains each
/// recurse once per level.
const MAX_NESTING: usize = 100;

const UNKNOWN_FUNCTION: &str = "unknown function";
const MISSING_ARGUMENT: &str = "function without argument";

/// Parse an expression such as `3x^2 + sin(2x) - pi/4`.
pub fn parse_expr(input: &str) -> Result<Expr, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::new(ParseErrorKind::Malformed, 0));
    }
    check_delimiters(input)?;
    check_characters(input)?;
    check_nesting(input)?;

    match all_consuming(ws(parse_add_sub))(input) {
        Ok((_, expr)) => Ok(expr),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(classify(input, &e)),
        Err(nom::Err::Incomplete(_)) => Err(ParseError::new(
            ParseErrorKind::Malformed,
            input.chars().count(),
        )),
    }
}

fn check_delimiters(input: &str) -> Result<(), ParseError> {
    let mut open: Vec<(char, usize)> = Vec::new();
    for (pos, c) in input.chars().enumerate() {
        match c {
            '(' | '[' => open.push((c, pos)),
            ')' | ']' => {
                let expected = if c == ')' { '(' } else { '[' };
                match open.pop() {
                    Some((opener, _)) if opener == expected => {}
                    _ => return Err(ParseError::new(ParseErrorKind::UnbalancedDelimiter, pos)),
                }
            }
            _ => {}
        }
    }
    match open.pop() {
        Some((_, pos)) => Err(ParseError::new(ParseErrorKind::UnbalancedDelimiter, pos)),
        None => Ok(()),
    }
}

fn check_characters(input: &str) -> Result<(), ParseError> {
    let allowed = |c: char| {
        c.is_ascii_alphanumeric()
            || c.is_whitespace()
            || matches!(c, '+' | '-' | '*' | '/' | '^' | '(' | ')' | '[' | ']' | '.' | 'π')
    };
    match input.chars().position(|c| !allowed(c)) {
        Some(pos) => Err(ParseError::new(ParseErrorKind::UnknownToken, pos)),
        None => Ok(()),
    }
}

fn check_nesting(input: &str) -> Result<(), ParseError> {
    let chars: Vec<char> = input.chars().collect();
    // right-nested operators pending in each open group, innermost last
    let mut chains = vec![0usize];
    let mut prev: Option<char> = None;
    let mut spaced = false;
    for (pos, &c) in chars.iter().enumerate() {
        if c.is_whitespace() {
            spaced = true;
            continue;
        }
        let top = chains.len() - 1;
        match c {
            '(' | '[' => {
                if prev.is_some_and(|p| ends_factor(p) && !p.is_ascii_alphabetic()) {
                    chains[top] = 0;
                }
                chains.push(0);
            }
            ')' | ']' => {
                if chains.len() > 1 {
                    chains.pop();
                }
            }
            '^' => chains[top] += 1,
            '*' if chars.get(pos + 1) == Some(&'*') => chains[top] += 1,
            '*' if prev == Some('*') && !spaced => {}
            '-' if prev.map_or(true, |p| matches!(p, '+' | '-' | '*' | '/' | '^' | '(' | '[')) => {
                chains[top] += 1
            }
            '+' | '-' | '*' | '/' => chains[top] = 0,
            _ if juxtaposed(prev, c, spaced) => chains[top] = 0,
            _ => {}
        }
        let depth = chains.len() - 1 + chains.iter().sum::<usize>();
        if depth > MAX_NESTING {
            return Err(ParseError::new(ParseErrorKind::Malformed, pos));
        }
        prev = Some(c);
        spaced = false;
    }
    Ok(())
}

fn ends_factor(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | ')' | ']' | 'π')
}

/// Whether `c` opens a new factor written right after another one, as in `2x`.
fn juxtaposed(prev: Option<char>, c: char, spaced: bool) -> bool {
    let Some(p) = prev else {
        return false;
    };
    if !ends_factor(p) || !(c.is_ascii_alphanumeric() || matches!(c, '.' | 'π')) {
        return false;
    }
    spaced
        || matches!(p, ')' | ']' | 'π')
        || c == 'π'
        || (!p.is_ascii_alphabetic() && c.is_ascii_alphabetic())
}

fn classify(input: &str, err: &VerboseError<&str>) -> ParseError {
    let position = |rest: &str| input[..input.len() - rest.len()].chars().count();
    if let Some((rest, _)) = err
        .errors
        .iter()
        .find(|(_, kind)| matches!(kind, VerboseErrorKind::Context(UNKNOWN_FUNCTION)))
    {
        return ParseError::new(ParseErrorKind::UnknownToken, position(rest));
    }
    let furthest = err
        .errors
        .iter()
        .map(|(rest, _)| *rest)
        .min_by_key(|rest| rest.len())
        .unwrap_or(input);
    ParseError::new(ParseErrorKind::Malformed, position(furthest))
}

fn parse_add_sub(input: &str) -> PResult<Expr> {
    let (rest, init) = parse_mul_div(input)?;
    fold_many0(
        pair(ws(alt((char('+'), char('-')))), parse_mul_div),
        move || init.clone(),
        |acc, (op, rhs)| match op {
            '+' => add(acc, rhs),
            '-' => sub(acc, rhs),
            _ => unreachable!(),
        },
    )(rest)
}

/// `p/q` literals only start a product chain, so `x/3/2` stays `(x/3)/2`.
fn parse_mul_div(input: &str) -> PResult<Expr> {
    let (rest, init) = parse_implicit(input, true)?;
    fold_many0(
        pair(
            ws(alt((terminated(char('*'), not(char('*'))), char('/')))),
            |i| parse_implicit(i, false),
        ),
        move || init.clone(),
        |acc, (op, rhs)| match op {
            '*' => mul(acc, rhs),
            '/' => div(acc, rhs),
            _ => unreachable!(),
        },
    )(rest)
}

/// Juxtaposed factors (`2x`, `3x^2`, `2sin(x)`) bind tighter than `*` and `/`.
fn parse_implicit(input: &str, allow_fraction: bool) -> PResult<Expr> {
    let (mut rest, mut acc) = parse_power(input, allow_fraction)?;
    while peek(ws(factor_start))(rest).is_ok() {
        let (next, rhs) = parse_power(rest, true)?;
        acc = mul(acc, rhs);
        rest = next;
    }
    Ok((rest, acc))
}

fn factor_start(input: &str) -> PResult<char> {
    satisfy(|c| c.is_ascii_alphabetic() || matches!(c, '(' | '[' | 'π'))(input)
}

fn parse_power(input: &str, allow_fraction: bool) -> PResult<Expr> {
    let (rest, base) = parse_unary(input, allow_fraction)?;
    match preceded(ws(pow_operator), |i| parse_power(i, false))(rest) {
        Ok((next, exp)) => Ok((next, pow(base, exp))),
        Err(nom::Err::Error(_)) => Ok((rest, base)),
        Err(e) => Err(e),
    }
}

fn pow_operator(input: &str) -> PResult<&str> {
    alt((tag("^"), tag("**")))(input)
}

fn parse_unary(input: &str, allow_fraction: bool) -> PResult<Expr> {
    if let Ok((rest, value)) = preceded(ws(char('-')), |i| parse_literal(i, allow_fraction))(input) {
        return Ok((rest, Expr::Number(-value)));
    }
    match preceded(ws(char('-')), |i| parse_unary(i, allow_fraction))(input) {
        Ok((rest, inner)) => Ok((rest, neg(inner))),
        Err(nom::Err::Error(_)) => parse_primary(input, allow_fraction),
        Err(e) => Err(e),
    }
}

fn parse_primary(input: &str, allow_fraction: bool) -> PResult<Expr> {
    alt((
        parse_group,
        map(|i| parse_literal(i, allow_fraction), Expr::Number),
        parse_pi,
        parse_identifier,
    ))(input)
}

fn parse_group(input: &str) -> PResult<Expr> {
    alt((
        delimited(ws(char('(')), parse_add_sub, ws(char(')'))),
        delimited(ws(char('[')), parse_add_sub, ws(char(']'))),
    ))(input)
}

fn parse_literal(input: &str, allow_fraction: bool) -> PResult<Rational> {
    if allow_fraction {
        if let Ok(ok) = parse_fraction(input) {
            return Ok(ok);
        }
    }
    parse_decimal(input)
}

/// Reduced `p/q` integer literals with `q > 1` become exact rationals unless `q`
/// is raised to a power. `2/4` and `3/1` stay quotients, so every literal reads
/// back the way it renders.
fn parse_fraction(input: &str) -> PResult<Rational> {
    let (rest, (n, d)) = terminated(
        separated_pair(parse_integer, ws(char('/')), parse_integer),
        not(ws(pow_operator)),
    )(input)?;
    if d <= BigInt::one() || !n.gcd(&d).is_one() {
        return Err(nom::Err::Error(VerboseError {
            errors: vec![(input, VerboseErrorKind::Context("not a reduced fraction"))],
        }));
    }
    Ok((rest, Rational::new(n, d)))
}

fn parse_integer(input: &str) -> PResult<BigInt> {
    map_res(ws(terminated(digit1, not(char('.')))), |s: &str| {
        s.parse::<BigInt>()
    })(input)
}

fn parse_decimal(input: &str) -> PResult<Rational> {
    map_res(
        ws(recognize(alt((
            recognize(pair(digit1, opt(pair(char('.'), digit0)))),
            recognize(pair(char('.'), digit1)),
        )))),
        decimal_value,
    )(input)
}

fn decimal_value(text: &str) -> Result<Rational, ParseBigIntError> {
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text, ""));
    let numer: BigInt = format!("{int_part}{frac_part}").parse()?;
    Ok(Rational::new(numer, pow10(frac_part.len())))
}

fn parse_pi(input: &str) -> PResult<Expr> {
    map(ws(tag("π")), |_| Expr::constant(Constant::Pi))(input)
}

fn parse_identifier(input: &str) -> PResult<Expr> {
    let (rest, name) = ws(recognize(pair(alpha1, alphanumeric0)))(input)?;
    let opens_call = rest.starts_with('(') || rest.starts_with('[');

    if let Some(op) = UnaryOp::from_name(name) {
        if !opens_call {
            return Err(failure(input.trim_start(), MISSING_ARGUMENT));
        }
        let (rest, arg) = parse_group(rest)?;
        return Ok((rest, func(op, arg)));
    }
    if opens_call && name != VARIABLE && Constant::from_name(name).is_none() {
        return Err(failure(input.trim_start(), UNKNOWN_FUNCTION));
    }
    Ok((rest, Expr::Symbol(name.to_string())))
}

fn failure<'a>(at: &'a str, context: &'static str) -> nom::Err<VerboseError<&'a str>> {
    nom::Err::Failure(VerboseError {
        errors: vec![(at, VerboseErrorKind::Context(context))],
    })
}

fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O, VerboseError<&'a str>>
where
    F: FnMut(&'a str) -> IResult<&'a str, O, VerboseError<&'a str>>,
{
    delimited(multispace0, inner, multispace0)
}
