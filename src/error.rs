use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    Malformed,
    UnbalancedDelimiter,
    UnknownToken,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ParseErrorKind::Malformed => "malformed expression",
            ParseErrorKind::UnbalancedDelimiter => "unbalanced delimiter",
            ParseErrorKind::UnknownToken => "unknown token",
        };
        f.write_str(text)
    }
}

/// Parse failure with the character offset where the parser gave up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parse error: {kind} at position {position}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: usize,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, position: usize) -> Self {
        Self { kind, position }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiffError {
    #[error("unsupported multivariable expression: `{0}` is not a known variable or constant")]
    UnsupportedVariable(String),
    #[error("no differentiation rule for `{0}`")]
    NoRuleFor(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegralError {
    #[error("no closed form antiderivative for `{0}`")]
    NoClosedForm(String),
    #[error("unsupported multivariable expression: `{0}` is not a known variable or constant")]
    UnsupportedVariable(String),
    #[error("invalid integration bounds: {0}")]
    InvalidBounds(String),
    #[error(transparent)]
    Evaluation(#[from] EvalError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("cannot evaluate: free variable `{0}` has no value")]
    FreeVariable(String),
    #[error("cannot evaluate: unknown symbol `{0}`")]
    UnsupportedVariable(String),
    #[error("domain error: {0}")]
    DomainError(String),
    #[error("division by zero")]
    DivisionByZero,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("bad formula entry `{0}`")]
    BadFormulaEntry(String),
    #[error("bad engine setting: {0}")]
    BadSetting(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Diff(#[from] DiffError),
    #[error(transparent)]
    Integral(#[from] IntegralError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
