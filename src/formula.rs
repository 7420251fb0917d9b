//! Rule table: derivative and antiderivative templates for each named function.
//!
//! Templates are ordinary expressions written in `x`; the engines substitute the
//! matched argument for `x` before using them.

use std::collections::BTreeMap;

use log::{error, trace};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::expr::{Expr, UnaryOp};
use crate::parser::parse_expr;

/// Host-supplied row, as it appears in a formula mapping.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormulaEntry {
    pub derivative: String,
    #[serde(default)]
    pub integral: Option<String>,
}

impl FormulaEntry {
    pub fn new(derivative: impl Into<String>, integral: Option<&str>) -> Self {
        Self {
            derivative: derivative.into(),
            integral: integral.map(str::to_string),
        }
    }
}

/// A validated row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Formula {
    pub derivative: Expr,
    pub integral: Option<Expr>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormulaTable {
    rows: BTreeMap<UnaryOp, Formula>,
}

const STANDARD_ROWS: &[(&str, &str, Option<&str>)] = &[
    ("sqrt", "1/(2sqrt(x))", Some("2x^(3/2)/3")),
    ("abs", "x/abs(x)", Some("x*abs(x)/2")),
    ("floor", "0", None),
    ("ceil", "0", None),
    ("sin", "cos(x)", Some("-cos(x)")),
    ("cos", "-sin(x)", Some("sin(x)")),
    ("tan", "sec(x)^2", Some("-ln(abs(cos(x)))")),
    ("sec", "sec(x)*tan(x)", Some("ln(abs(sec(x) + tan(x)))")),
    ("csc", "-csc(x)*cot(x)", Some("-ln(abs(csc(x) + cot(x)))")),
    ("cot", "-csc(x)^2", Some("ln(abs(sin(x)))")),
    ("asin", "1/sqrt(1 - x^2)", Some("x*asin(x) + sqrt(1 - x^2)")),
    ("acos", "-1/sqrt(1 - x^2)", Some("x*acos(x) - sqrt(1 - x^2)")),
    ("atan", "1/(1 + x^2)", Some("x*atan(x) - ln(1 + x^2)/2")),
    ("sinh", "cosh(x)", Some("cosh(x)")),
    ("cosh", "sinh(x)", Some("sinh(x)")),
    ("tanh", "1 - tanh(x)^2", Some("ln(cosh(x))")),
    ("ln", "1/x", Some("x*ln(x) - x")),
    ("log", "1/(x*ln(10))", Some("(x*ln(x) - x)/ln(10)")),
    ("log2", "1/(x*ln(2))", Some("(x*ln(x) - x)/ln(2)")),
    ("exp", "exp(x)", Some("exp(x)")),
];

impl FormulaTable {
    /// Builtin rows for every supported function.
    pub fn standard() -> Self {
        let mut rows = BTreeMap::new();
        for (name, derivative, integral) in STANDARD_ROWS {
            match compile_row(name, &FormulaEntry::new(*derivative, *integral)) {
                Ok((op, formula)) => {
                    rows.insert(op, formula);
                }
                Err(err) => error!("builtin formula row rejected: {err}"),
            }
        }
        trace!("standard formula table loaded with {} rows", rows.len());
        Self { rows }
    }

    /// Build a table from host rows, rejecting the first invalid one.
    pub fn from_entries<I, K>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, FormulaEntry)>,
        K: AsRef<str>,
    {
        Self::default().layered(entries)
    }

    /// Layer host rows over `base`; an override replaces the whole row.
    pub fn with_entries<I, K>(base: &FormulaTable, overrides: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, FormulaEntry)>,
        K: AsRef<str>,
    {
        base.clone().layered(overrides)
    }

    fn layered<I, K>(mut self, entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, FormulaEntry)>,
        K: AsRef<str>,
    {
        for (name, entry) in entries {
            let (op, formula) = compile_row(name.as_ref(), &entry)?;
            self.rows.insert(op, formula);
        }
        Ok(self)
    }

    pub fn get(&self, op: UnaryOp) -> Option<&Formula> {
        self.rows.get(&op)
    }

    pub fn derivative(&self, op: UnaryOp) -> Option<&Expr> {
        self.get(op).map(|f| &f.derivative)
    }

    pub fn integral(&self, op: UnaryOp) -> Option<&Expr> {
        self.get(op).and_then(|f| f.integral.as_ref())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn functions(&self) -> impl Iterator<Item = UnaryOp> + '_ {
        self.rows.keys().copied()
    }
}

fn compile_row(name: &str, entry: &FormulaEntry) -> Result<(UnaryOp, Formula), ConfigError> {
    let bad = || ConfigError::BadFormulaEntry(name.to_string());
    let op = UnaryOp::from_name(name).ok_or_else(bad)?;
    let derivative = parse_template(&entry.derivative).ok_or_else(bad)?;
    let integral = match entry.integral.as_deref() {
        Some(text) => Some(parse_template(text).ok_or_else(bad)?),
        None => None,
    };
    trace!("formula row `{name}`: d = {derivative}");
    Ok((op, Formula { derivative, integral }))
}

/// Templates may only mention `x` and the named constants.
fn parse_template(text: &str) -> Option<Expr> {
    let expr = parse_expr(text).ok()?;
    expr.foreign_symbol().is_none().then_some(expr)
}
