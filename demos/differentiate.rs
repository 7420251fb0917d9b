use symcalc::prelude::diff;

fn main() {
    env_logger::init();

    for expr in ["x^3 + 2x^2 + x + 1", "sin(x)*cos(x)", "x^x", "ln(sin(2x))"] {
        match diff(expr) {
            Ok(result) => println!("d/dx {expr} = {result}"),
            Err(err) => eprintln!("{expr}: {err}"),
        }
    }
}
