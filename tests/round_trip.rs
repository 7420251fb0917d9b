use quickcheck::{Arbitrary, Gen, QuickCheck};
use symcalc::{
    Constant, Expr, UnaryOp, add, div, func, mul, neg, parse_expr, pow, pretty, simplify, sub,
};

fn assert_round_trip(input: &str, rendered: &str) {
    let expr = parse_expr(input).expect("parse input");
    assert_eq!(pretty(&expr), rendered, "render {input}");
    let again = parse_expr(rendered).expect("parse rendered");
    assert_eq!(pretty(&again), rendered, "re-render {input}");
}

#[test]
fn renders_normalized_text() {
    assert_round_trip("3*x^2+4*x+1", "3x^2 + 4x + 1");
    assert_round_trip("2 * sin(x)", "2sin(x)");
    assert_round_trip("x + -3x", "x - 3x");
    assert_round_trip("x - -2", "x + 2");
    assert_round_trip("-cos(x)", "-cos(x)");
    assert_round_trip("x^(1/2)", "x^(1/2)");
    assert_round_trip("(1/3)x", "(1/3)x");
    assert_round_trip("x**3 / 3", "x^3/3");
    assert_round_trip("e^(3x)/3", "e^(3x)/3");
    assert_round_trip("(-x)^2", "(-x)^2");
    assert_round_trip("-(x^2)", "-(x^2)");
    assert_round_trip("x/(2x)", "x/(2x)");
    assert_round_trip("x - (x + 1)", "x - (x + 1)");
    assert_round_trip("2.5x", "(5/2)x");
    assert_round_trip("ln(abs(x))", "ln(abs(x))");
    assert_round_trip("[x+1]*pi", "(x + 1)*pi");
    assert_round_trip("x^-1", "x^-1");
    assert_round_trip("(-2)^x", "(-2)^x");
    assert_round_trip("2/4", "2/4");
    assert_round_trip("2/4*x", "2/4*x");
    assert_round_trip("x/(1/2)", "x/(1/2)");
    assert_round_trip("x*(1/2)x", "x*(1/2)x");
}

#[test]
fn built_quotients_render_as_their_literals() {
    let half = div(Expr::integer(1), Expr::integer(2));
    let cases = [
        (mul(half.clone(), Expr::var()), "(1/2)x"),
        (div(Expr::var(), half.clone()), "x/(1/2)"),
        (add(Expr::var(), mul(neg(half.clone()), Expr::var())), "x - (1/2)x"),
        (pow(Expr::var(), half), "x^(1/2)"),
        (pow(Expr::var(), neg(Expr::integer(2))), "x^-2"),
    ];
    for (expr, rendered) in cases {
        assert_eq!(pretty(&expr), rendered);
        let parsed = parse_expr(rendered).expect("parse rendered");
        assert_eq!(pretty(&parsed), rendered);
    }
}

#[derive(Clone, Debug)]
struct Term(Expr);

impl Arbitrary for Term {
    fn arbitrary(g: &mut Gen) -> Self {
        Term(term(g, 4))
    }
}

fn term(g: &mut Gen, depth: usize) -> Expr {
    if depth == 0 || u8::arbitrary(g) % 3 == 0 {
        return match u8::arbitrary(g) % 4 {
            0 => Expr::var(),
            1 => Expr::constant(*g.choose(&[Constant::Pi, Constant::E]).unwrap()),
            2 => Expr::integer(i64::from(i8::arbitrary(g) % 10)),
            _ => Expr::fraction(
                i64::from(i8::arbitrary(g) % 10),
                i64::from(u8::arbitrary(g) % 9) + 1,
            ),
        };
    }
    let d = depth - 1;
    match u8::arbitrary(g) % 7 {
        0 => add(term(g, d), term(g, d)),
        1 => sub(term(g, d), term(g, d)),
        2 => mul(term(g, d), term(g, d)),
        3 => div(term(g, d), term(g, d)),
        4 => pow(term(g, d), term(g, 1)),
        5 => neg(term(g, d)),
        _ => func(*g.choose(&UnaryOp::FUNCTIONS).unwrap(), term(g, d)),
    }
}

#[test]
fn simplified_terms_survive_render_and_parse() {
    fn prop(t: Term) -> bool {
        let rendered = pretty(&simplify(t.0));
        match parse_expr(&rendered) {
            Ok(parsed) => pretty(&parsed) == rendered,
            Err(_) => false,
        }
    }
    QuickCheck::new()
        .tests(500)
        .quickcheck(prop as fn(Term) -> bool);
}

#[test]
fn raw_terms_survive_render_and_parse() {
    fn prop(t: Term) -> bool {
        let rendered = pretty(&t.0);
        match parse_expr(&rendered) {
            Ok(parsed) => pretty(&parsed) == rendered,
            Err(_) => false,
        }
    }
    QuickCheck::new()
        .tests(500)
        .quickcheck(prop as fn(Term) -> bool);
}
