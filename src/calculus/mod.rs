//! Calculus routines (differentiation and integration) and their step reports.

pub mod differentiate;
pub mod explain;
pub mod integrate;

pub use differentiate::{DiffWarning, Derivative, differentiate};
pub use explain::{Rule, derivative_steps, integral_steps};
pub use integrate::{Integral, Method, antiderivative, integrate, integrate_with};
