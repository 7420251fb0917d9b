use std::sync::Arc;
use std::thread;

use symcalc::{
    Calculator, ConfigError, EngineConfig, EngineError, FormulaEntry, FormulaTable, IntegralError,
    Operation, ParseErrorKind, compute,
};

fn assert_compute(op: Operation, input: &str, bounds: Option<(&str, &str)>, expected: &str) {
    let got = compute(op, input, bounds).unwrap_or_else(|err| panic!("{op} {input}: {err}"));
    assert_eq!(got, expected, "{op} {input}");
}

#[test]
fn one_call_per_operation() {
    assert_compute(Operation::Derivative, "x^3 + 2x^2 + x + 1", None, "3x^2 + 4x + 1");
    assert_compute(Operation::Integral, "x^2", None, "x^3/3 + C");
    assert_compute(Operation::Integral, "sin(x)", None, "-cos(x) + C");
    assert_compute(Operation::Evaluate, "2 + 3 * 4", None, "14");
    assert_compute(Operation::Evaluate, "sqrt(144) + 2^3", None, "20");
    assert_compute(
        Operation::DefiniteIntegral,
        "x^2",
        Some(("0", "1")),
        "0.3333333333333333333333333333",
    );
    assert_compute(Operation::DefiniteIntegral, "sin(x)", Some(("0", "pi")), "2");
}

#[test]
fn integral_with_bounds_is_definite() {
    assert_compute(Operation::Integral, "2x", Some(("1", "3")), "8");
}

#[test]
fn errors_surface_through_the_boundary() {
    let err = compute(Operation::Derivative, "sin(x", None).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Parse(ref e) if e.kind == ParseErrorKind::UnbalancedDelimiter
    ));

    let err = compute(Operation::Integral, "1/(x^2+1)", None).unwrap_err();
    assert_eq!(
        err,
        EngineError::Integral(IntegralError::NoClosedForm("1/(x^2 + 1)".into()))
    );

    let err = compute(Operation::DefiniteIntegral, "x", None).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Integral(IntegralError::InvalidBounds(_))
    ));
    assert!(err.to_string().starts_with("invalid integration bounds"));
}

#[test]
fn calculator_uses_injected_table_and_config() {
    let table = FormulaTable::with_entries(
        &FormulaTable::standard(),
        [("sinh", FormulaEntry::new("2cosh(x)", None))],
    )
    .unwrap();
    let config = EngineConfig {
        digits: 6,
        ..EngineConfig::default()
    };
    let calc = Calculator::new(Arc::new(table), config).unwrap();
    assert_eq!(
        calc.compute(Operation::Derivative, "sinh(x)", None).unwrap(),
        "2cosh(x)"
    );
    assert_eq!(calc.compute(Operation::Evaluate, "1/3", None).unwrap(), "0.333333");
}

#[test]
fn calculator_rejects_bad_settings() {
    let config = EngineConfig {
        digits: 0,
        ..EngineConfig::default()
    };
    let err = Calculator::new(Arc::new(FormulaTable::standard()), config).unwrap_err();
    assert!(matches!(err, EngineError::Config(ConfigError::BadSetting(_))));
}

#[test]
fn calculator_is_shared_across_threads() {
    let calc = Calculator::default();
    let handles: Vec<_> = ["x^2", "cos(x)", "e^x"]
        .into_iter()
        .map(|input| {
            let calc = calc.clone();
            thread::spawn(move || calc.compute(Operation::Derivative, input, None))
        })
        .collect();
    let results: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().unwrap().unwrap())
        .collect();
    assert_eq!(results, ["2x", "-sin(x)", "e^x"]);
}
