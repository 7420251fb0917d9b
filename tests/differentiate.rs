use approx::assert_relative_eq;
use symcalc::{
    DiffError, DiffWarning, Evaluator, Expr, FormulaTable, Rational, decimal, derivative_steps,
    differentiate, parse_expr, pretty, rational,
};

fn assert_diff_eq(input: &str, expected: &str) {
    let table = FormulaTable::standard();
    let expr = parse_expr(input).expect("parse input");
    let got = differentiate(&expr, &table).expect("differentiate");
    assert_eq!(pretty(&got.expr), expected, "d/dx {input}");
}

#[test]
fn polynomials() {
    assert_diff_eq("x^3 + 2x^2 + x + 1", "3x^2 + 4x + 1");
    assert_diff_eq("x", "1");
    assert_diff_eq("5", "0");
    assert_diff_eq("pi", "0");
    assert_diff_eq("x^3/3", "x^2");
}

#[test]
fn products_and_chains() {
    assert_diff_eq("sin(x)*cos(x)", "cos(x)^2 - sin(x)^2");
    assert_diff_eq("sin(x)", "cos(x)");
    assert_diff_eq("cos(x)", "-sin(x)");
    assert_diff_eq("sin(2x)", "2cos(2x)");
    assert_diff_eq("ln(x)", "1/x");
}

#[test]
fn exponentials() {
    assert_diff_eq("e^x", "e^x");
    assert_diff_eq("exp(x)", "exp(x)");
    assert_diff_eq("e^(3x)", "3e^(3x)");
}

#[test]
fn product_rule_matches_expansion_numerically() {
    let table = FormulaTable::standard();
    let d = differentiate(&parse_expr("sin(x)*cos(x)").unwrap(), &table).unwrap();
    let expected = parse_expr("cos(2x)").unwrap();
    let evaluator = Evaluator::default();
    let at = |e: &Expr, x: Rational| -> f64 {
        let value = evaluator.evaluate_at(e, &x).expect("evaluate");
        decimal(&value).parse().expect("decimal")
    };
    for x in [rational(1, 3), rational(1, 1), rational(5, 2)] {
        assert_relative_eq!(at(&d.expr, x.clone()), at(&expected, x), epsilon = 1e-15);
    }
}

#[test]
fn other_variables_are_rejected() {
    let table = FormulaTable::standard();
    let err = differentiate(&parse_expr("x*y + 1").unwrap(), &table).unwrap_err();
    assert_eq!(err, DiffError::UnsupportedVariable("y".into()));
}

#[test]
fn zero_denominator_is_reported_as_warning() {
    let table = FormulaTable::standard();
    let d = differentiate(&parse_expr("1/(x - x)").unwrap(), &table).unwrap();
    assert_eq!(d.warnings.len(), 1);
    let DiffWarning::SymbolicZeroDenominator(term) = &d.warnings[0];
    assert_eq!(term.to_string(), "1/(x - x)");
}

#[test]
fn steps_name_the_rule_and_carry_warnings() {
    let table = FormulaTable::standard();
    let steps = derivative_steps(&parse_expr("x^3").unwrap(), &table).unwrap();
    assert_eq!(
        steps,
        vec![
            "expression: d/dx[x^3]",
            "rule: power rule: d/dx[u^n] = n*u^(n-1)*u'",
            "result: 3x^2",
        ]
    );

    let steps = derivative_steps(&parse_expr("x/(x - x)").unwrap(), &table).unwrap();
    assert_eq!(steps[1], "rule: quotient rule: (f/g)' = (f'g - fg')/g^2");
    assert_eq!(steps[2], "warning: denominator of `x/(x - x)` is identically zero");
    assert!(steps[3].starts_with("result: "));

    let err = derivative_steps(&parse_expr("y^2").unwrap(), &table).unwrap_err();
    assert_eq!(err, DiffError::UnsupportedVariable("y".into()));
}
