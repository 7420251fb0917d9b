use crate::expr::Expr;

/// Substitute variable `var` with `replacement` throughout `expr`.
pub fn substitute(expr: &Expr, var: &str, replacement: &Expr) -> Expr {
    match expr {
        Expr::Symbol(name) if name == var => replacement.clone(),
        Expr::Unary(op, a) => Expr::Unary(*op, substitute(a, var, replacement).boxed()),
        Expr::Binary(op, a, b) => Expr::Binary(
            *op,
            substitute(a, var, replacement).boxed(),
            substitute(b, var, replacement).boxed(),
        ),
        _ => expr.clone(),
    }
}
