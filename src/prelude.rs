//! String-based convenience API for quick experimentation.

pub use crate::ui::{
    builtin_table, defi, definite, diff, differentiate, eval, evaluate, evaluate_at, inte,
    integrate, parse, pretty, simp, simplify,
};
