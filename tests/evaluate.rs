use approx::assert_relative_eq;
use symcalc::{EvalError, Evaluator, decimal, parse_expr, rational};

fn assert_eval(input: &str, expected: &str) {
    let expr = parse_expr(input).expect("parse input");
    let value = Evaluator::default().evaluate(&expr).expect("evaluate");
    assert_eq!(decimal(&value), expected, "{input}");
}

fn eval_err(input: &str) -> EvalError {
    let expr = parse_expr(input).expect("parse input");
    Evaluator::default().evaluate(&expr).unwrap_err()
}

#[test]
fn exact_arithmetic() {
    assert_eval("2 + 3 * 4", "14");
    assert_eval("sqrt(144) + 2^3", "20");
    assert_eval("2.5 * 4", "10");
    assert_eval("1/3", "0.3333333333333333333333333333");
    assert_eval("-2^2", "4");
    assert_eval("2**10", "1024");
    assert_eval("abs(-7) + floor(2.5) + ceil(2.5)", "12");
}

#[test]
fn constants_to_28_digits() {
    assert_eval("2 * pi * 5", "31.41592653589793238462643383");
    assert_eval("π", "3.141592653589793238462643383");
    assert_eval("e", "2.718281828459045235360287471");
    assert_eval("phi", "1.618033988749894848204586834");
}

#[test]
fn transcendental_functions() {
    assert_eval("sin(0)", "0");
    assert_eval("cos(pi)", "-1");
    assert_eval("ln(1)", "0");
    assert_eval("log(1000)", "3");
    assert_eval("log2(8)", "3");

    let expr = parse_expr("atan(1) * 4").unwrap();
    let value: f64 = decimal(&Evaluator::default().evaluate(&expr).unwrap())
        .parse()
        .unwrap();
    assert_relative_eq!(value, std::f64::consts::PI, epsilon = 1e-15);
}

#[test]
fn evaluation_at_a_point() {
    let expr = parse_expr("3x^2 + 4x + 1").unwrap();
    let value = Evaluator::default().evaluate_at(&expr, &rational(2, 1)).unwrap();
    assert_eq!(decimal(&value), "21");
}

#[test]
fn precision_is_configurable() {
    let expr = parse_expr("1/3").unwrap();
    let value = Evaluator::with_digits(5).evaluate(&expr).unwrap();
    assert_eq!(value, rational(33333, 100000));
}

#[test]
fn errors() {
    assert_eq!(eval_err("1/0"), EvalError::DivisionByZero);
    assert_eq!(eval_err("0^-1"), EvalError::DivisionByZero);
    assert_eq!(eval_err("x + 1"), EvalError::FreeVariable("x".into()));
    assert_eq!(eval_err("y"), EvalError::UnsupportedVariable("y".into()));
    assert!(matches!(eval_err("sqrt(-1)"), EvalError::DomainError(_)));
    assert!(matches!(eval_err("ln(0)"), EvalError::DomainError(_)));
    assert!(matches!(eval_err("asin(2)"), EvalError::DomainError(_)));
    assert!(matches!(eval_err("tan(pi/2)"), EvalError::DomainError(_)));
    assert!(matches!(eval_err("(-8)^(1/3)"), EvalError::DomainError(_)));
    assert!(matches!(eval_err("sin(10^20000)"), EvalError::DomainError(_)));
    assert!(matches!(eval_err("cosh(20000)"), EvalError::DomainError(_)));
}

#[test]
fn tiny_arguments_keep_full_precision() {
    let expected = format!("0.{}{}", "0".repeat(25), "3".repeat(28));
    assert_eval("1/(3*10^25)", &expected);
    assert_eval("sin(1/(3*10^25))", &expected);
    assert_eval("atan(1/(3*10^25))", &expected);
    assert_eval("sinh(1/(3*10^25))", &expected);
    assert_eval("tanh(1/(3*10^25))", &expected);
}

#[test]
fn hyperbolic_tangent_saturates() {
    assert_eval("tanh(20000)", "1");
    assert_eval("tanh(-20000)", "-1");
}

#[test]
fn trig_near_multiples_of_pi() {
    assert_eval("sin(pi)", "0");
    assert_eval("sin(100pi)", "0");
    assert_eval("cos(pi/2)", "0");

    let expr = parse_expr("sin(pi + 10^-35)").unwrap();
    let value: f64 = decimal(&Evaluator::default().evaluate(&expr).unwrap())
        .parse()
        .unwrap();
    assert_relative_eq!(value, -1e-35, max_relative = 1e-4);
}
