use symcalc::prelude::{defi, inte};

fn main() {
    env_logger::init();

    for expr in ["x^2", "sin(2x) + 3", "e^(3x)", "1/(x^2 + 1)"] {
        match inte(expr) {
            Ok(result) => println!("integrate {expr} dx = {result}"),
            Err(err) => eprintln!("{expr}: {err}"),
        }
    }

    let expr = "1/(x^2 + 1)";
    match defi(expr, "0", "1") {
        Ok(result) => println!("integrate {expr} dx over [0, 1] = {result}"),
        Err(err) => eprintln!("{expr}: {err}"),
    }
}
