//! Expression tree definitions and helpers.

use std::fmt;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

pub type Rational = BigRational;

/// Name of the single free variable the engines understand.
pub const VARIABLE: &str = "x";

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum UnaryOp {
    Neg,
    Sqrt,
    Abs,
    Floor,
    Ceil,
    Sin,
    Cos,
    Tan,
    Sec,
    Csc,
    Cot,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Ln,
    Log,
    Log2,
    Exp,
}

impl UnaryOp {
    /// Every named function, i.e. every operator except negation.
    pub const FUNCTIONS: [UnaryOp; 20] = [
        UnaryOp::Sqrt,
        UnaryOp::Abs,
        UnaryOp::Floor,
        UnaryOp::Ceil,
        UnaryOp::Sin,
        UnaryOp::Cos,
        UnaryOp::Tan,
        UnaryOp::Sec,
        UnaryOp::Csc,
        UnaryOp::Cot,
        UnaryOp::Asin,
        UnaryOp::Acos,
        UnaryOp::Atan,
        UnaryOp::Sinh,
        UnaryOp::Cosh,
        UnaryOp::Tanh,
        UnaryOp::Ln,
        UnaryOp::Log,
        UnaryOp::Log2,
        UnaryOp::Exp,
    ];

    pub fn name(self) -> &'static str {
        match self {
            UnaryOp::Neg => "neg",
            UnaryOp::Sqrt => "sqrt",
            UnaryOp::Abs => "abs",
            UnaryOp::Floor => "floor",
            UnaryOp::Ceil => "ceil",
            UnaryOp::Sin => "sin",
            UnaryOp::Cos => "cos",
            UnaryOp::Tan => "tan",
            UnaryOp::Sec => "sec",
            UnaryOp::Csc => "csc",
            UnaryOp::Cot => "cot",
            UnaryOp::Asin => "asin",
            UnaryOp::Acos => "acos",
            UnaryOp::Atan => "atan",
            UnaryOp::Sinh => "sinh",
            UnaryOp::Cosh => "cosh",
            UnaryOp::Tanh => "tanh",
            UnaryOp::Ln => "ln",
            UnaryOp::Log => "log",
            UnaryOp::Log2 => "log2",
            UnaryOp::Exp => "exp",
        }
    }

    /// Look up a function by its written name. `neg` is an operator, not a function.
    pub fn from_name(name: &str) -> Option<Self> {
        let op = match name {
            "arcsin" => UnaryOp::Asin,
            "arccos" => UnaryOp::Acos,
            "arctan" => UnaryOp::Atan,
            other => *UnaryOp::FUNCTIONS.iter().find(|op| op.name() == other)?,
        };
        Some(op)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

/// Named constants that are never treated as variables.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Constant {
    Pi,
    E,
    Phi,
}

impl Constant {
    pub fn name(self) -> &'static str {
        match self {
            Constant::Pi => "pi",
            Constant::E => "e",
            Constant::Phi => "phi",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pi" | "π" => Some(Constant::Pi),
            "e" => Some(Constant::E),
            "phi" => Some(Constant::Phi),
            _ => None,
        }
    }
}

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Expr {
    Number(Rational),
    Symbol(String),
    Unary(UnaryOp, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn var() -> Self {
        Expr::Symbol(VARIABLE.to_string())
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Expr::Symbol(name.into())
    }

    pub fn constant(c: Constant) -> Self {
        Expr::Symbol(c.name().to_string())
    }

    pub fn integer(value: impl Into<BigInt>) -> Self {
        Expr::Number(Rational::from_integer(value.into()))
    }

    pub fn fraction(num: impl Into<BigInt>, den: impl Into<BigInt>) -> Self {
        Expr::Number(Rational::new(num.into(), den.into()))
    }

    pub fn number(value: Rational) -> Self {
        Expr::Number(value)
    }

    pub fn negate(self) -> Self {
        match self {
            Expr::Number(r) => Expr::Number(-r),
            Expr::Unary(UnaryOp::Neg, inner) => *inner,
            other => Expr::Unary(UnaryOp::Neg, other.boxed()),
        }
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Expr::Number(r) if r.is_zero())
    }

    pub fn is_one(&self) -> bool {
        matches!(self, Expr::Number(r) if r.is_one())
    }

    pub fn as_number(&self) -> Option<&Rational> {
        match self {
            Expr::Number(r) => Some(r),
            _ => None,
        }
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Expr::Symbol(name) if name == VARIABLE)
    }

    pub fn as_constant(&self) -> Option<Constant> {
        match self {
            Expr::Symbol(name) => Constant::from_name(name),
            _ => None,
        }
    }

    /// True when `x` occurs anywhere in the tree.
    pub fn contains_var(&self) -> bool {
        match self {
            Expr::Number(_) => false,
            Expr::Symbol(name) => name == VARIABLE,
            Expr::Unary(_, a) => a.contains_var(),
            Expr::Binary(_, a, b) => a.contains_var() || b.contains_var(),
        }
    }

    /// First symbol that is neither `x` nor a named constant, in left-to-right order.
    pub fn foreign_symbol(&self) -> Option<&str> {
        match self {
            Expr::Number(_) => None,
            Expr::Symbol(name) if name == VARIABLE || Constant::from_name(name).is_some() => None,
            Expr::Symbol(name) => Some(name),
            Expr::Unary(_, a) => a.foreign_symbol(),
            Expr::Binary(_, a, b) => a.foreign_symbol().or_else(|| b.foreign_symbol()),
        }
    }

    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::format::pretty(self))
    }
}

pub fn zero() -> Expr {
    Expr::Number(Rational::zero())
}

pub fn one() -> Expr {
    Expr::Number(Rational::one())
}

pub fn rational(num: i64, den: i64) -> Rational {
    Rational::new(num.into(), den.into())
}

pub fn add(a: Expr, b: Expr) -> Expr {
    Expr::Binary(BinaryOp::Add, a.boxed(), b.boxed())
}

pub fn sub(a: Expr, b: Expr) -> Expr {
    Expr::Binary(BinaryOp::Sub, a.boxed(), b.boxed())
}

pub fn mul(a: Expr, b: Expr) -> Expr {
    Expr::Binary(BinaryOp::Mul, a.boxed(), b.boxed())
}

pub fn div(a: Expr, b: Expr) -> Expr {
    Expr::Binary(BinaryOp::Div, a.boxed(), b.boxed())
}

pub fn pow(base: Expr, exp: Expr) -> Expr {
    Expr::Binary(BinaryOp::Pow, base.boxed(), exp.boxed())
}

pub fn neg(a: Expr) -> Expr {
    Expr::Unary(UnaryOp::Neg, a.boxed())
}

pub fn func(op: UnaryOp, arg: Expr) -> Expr {
    Expr::Unary(op, arg.boxed())
}
