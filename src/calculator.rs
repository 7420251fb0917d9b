//! Dispatcher boundary: one operation over one expression text.

use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::calculus::{derivative_steps, differentiate, integral_steps, integrate_with};
use crate::config::EngineConfig;
use crate::error::{IntegralError, Result};
use crate::eval::Evaluator;
use crate::format::{decimal_with_digits, pretty_derivative, pretty_integral};
use crate::formula::FormulaTable;
use crate::parser::parse_expr;
use crate::ui::builtin_table;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    Derivative,
    Integral,
    Evaluate,
    DefiniteIntegral,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Derivative => "derivative",
            Operation::Integral => "integral",
            Operation::Evaluate => "evaluate",
            Operation::DefiniteIntegral => "definite integral",
        };
        f.write_str(name)
    }
}

/// A rule table and engine settings bound together.
#[derive(Clone, Debug)]
pub struct Calculator {
    table: Arc<FormulaTable>,
    config: EngineConfig,
}

impl Default for Calculator {
    fn default() -> Self {
        Self {
            table: Arc::new(FormulaTable::standard()),
            config: EngineConfig::default(),
        }
    }
}

impl Calculator {
    pub fn new(table: Arc<FormulaTable>, config: EngineConfig) -> Result<Self> {
        Ok(Self {
            table,
            config: config.validated()?,
        })
    }

    pub fn table(&self) -> &FormulaTable {
        &self.table
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Parse `text`, run `op` and render the result.
    pub fn compute(
        &self,
        op: Operation,
        text: &str,
        bounds: Option<(&str, &str)>,
    ) -> Result<String> {
        compute_with(&self.table, &self.config, op, text, bounds)
    }

    /// Step-by-step lines for `op` over `text`. Numeric operations report
    /// only the expression and the rendered value.
    pub fn explain(
        &self,
        op: Operation,
        text: &str,
        bounds: Option<(&str, &str)>,
    ) -> Result<Vec<String>> {
        let expr = parse_expr(text)?;
        match (op, bounds) {
            (Operation::Derivative, _) => Ok(derivative_steps(&expr, &self.table)?),
            (Operation::Integral, None) => Ok(integral_steps(&expr, &self.table)?),
            _ => {
                let value = self.compute(op, text, bounds)?;
                Ok(vec![format!("expression: {op} of {expr}"), format!("result: {value}")])
            }
        }
    }
}

/// [`Calculator::compute`] against the builtin table and default settings.
pub fn compute(op: Operation, text: &str, bounds: Option<(&str, &str)>) -> Result<String> {
    compute_with(builtin_table(), &EngineConfig::default(), op, text, bounds)
}

fn compute_with(
    table: &FormulaTable,
    config: &EngineConfig,
    op: Operation,
    text: &str,
    bounds: Option<(&str, &str)>,
) -> Result<String> {
    let expr = parse_expr(text)?;
    debug!("{op} of {expr}");

    match (op, bounds) {
        (Operation::Derivative, _) => Ok(pretty_derivative(&differentiate(&expr, table)?)),
        (Operation::Evaluate, _) => {
            let value = Evaluator::with_digits(config.digits).evaluate(&expr)?;
            Ok(decimal_with_digits(&value, config.digits))
        }
        (Operation::DefiniteIntegral, None) => Err(IntegralError::InvalidBounds(
            "definite integral requires lower and upper bounds".into(),
        )
        .into()),
        (Operation::Integral, None) => {
            let result = integrate_with(&expr, table, None, config)?;
            Ok(pretty_integral(&result, config.digits))
        }
        (Operation::Integral | Operation::DefiniteIntegral, Some((lower, upper))) => {
            let lower = parse_expr(lower).map_err(|err| bad_bound("lower", err))?;
            let upper = parse_expr(upper).map_err(|err| bad_bound("upper", err))?;
            let result = integrate_with(&expr, table, Some((&lower, &upper)), config)?;
            Ok(pretty_integral(&result, config.digits))
        }
    }
}

fn bad_bound(which: &str, err: impl fmt::Display) -> IntegralError {
    IntegralError::InvalidBounds(format!("{which} bound: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    #[test]
    fn definite_integral_requires_bounds() {
        let err = compute(Operation::DefiniteIntegral, "x", None).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Integral(IntegralError::InvalidBounds(_))
        ));
    }

    #[test]
    fn explain_lists_rule_and_result() {
        let calc = Calculator::default();
        assert_eq!(
            calc.explain(Operation::Derivative, "sin(2x)", None).unwrap(),
            vec![
                "expression: d/dx[sin(2x)]",
                "rule: chain rule: d/dx[sin(u)] = sin'(u)*u'",
                "table: d/dx[sin(x)] = cos(x)",
                "result: 2cos(2x)",
            ]
        );
        assert_eq!(
            calc.explain(Operation::Integral, "sec(x)tan(x)", None).unwrap(),
            vec![
                "expression: ∫ sec(x)*tan(x) dx",
                "rule: table row: ∫sec(u)tan(u) dx = sec(u)/k, ∫csc(u)cot(u) dx = -csc(u)/k",
                "result: sec(x) + C",
            ]
        );
        assert_eq!(
            calc.explain(Operation::Evaluate, "2 + 3", None).unwrap(),
            vec!["expression: evaluate of 2 + 3", "result: 5"]
        );
        assert!(calc.explain(Operation::Integral, "sin(x^2)", None).is_err());
    }

    #[test]
    fn evaluate_ignores_bounds() {
        assert_eq!(
            compute(Operation::Evaluate, "2 + 3 * 4", Some(("0", "1"))).unwrap(),
            "14"
        );
    }

    #[test]
    fn unparsable_bounds_are_invalid_bounds() {
        let err = compute(Operation::Integral, "x", Some(("0", "1 +"))).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Integral(IntegralError::InvalidBounds(_))
        ));
    }
}
