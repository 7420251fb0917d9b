//! Formatting helpers for rendering expressions and calculation results.

pub mod expr;
pub mod result;

pub use expr::pretty;
pub use result::{decimal, decimal_with_digits, pretty_derivative, pretty_integral};
