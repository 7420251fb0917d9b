use symcalc::{Operation, compute};

fn main() {
    env_logger::init();

    for expr in ["2 + 3 * 4", "sqrt(144) + 2^3", "2 * pi * 5", "e^1 - exp(1)", "ln(0)"] {
        match compute(Operation::Evaluate, expr, None) {
            Ok(value) => println!("{expr} = {value}"),
            Err(err) => eprintln!("{expr}: {err}"),
        }
    }
}
