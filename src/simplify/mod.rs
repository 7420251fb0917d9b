//! Constant folding, trivial identities and variable substitution.

mod rules;
mod substitute;

pub use rules::{
    simplify, simplify_add, simplify_div, simplify_mul, simplify_neg, simplify_pow, simplify_sub,
};
pub use substitute::substitute;
