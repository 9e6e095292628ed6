use rpncalc::{evaluate_once, Var};

fn main() {
    pretty_env_logger::init();

    let expressions = ["5 + 10^2", "(5 + 5) / 2", "sqrt(PI)", "1 / 0", "2^3^2"];
    for expression in expressions {
        match evaluate_once(expression, &[]) {
            Ok(result) => println!("{expression} = {result}"),
            Err(err) => println!("{expression}: {err}"),
        }
    }

    let price = Var::new("price", 120.0);
    let volume = Var::new("volume", 3000.0);
    match evaluate_once("price * volume / 1000", &[price, volume]) {
        Ok(result) => println!("Result: {result}"),
        Err(err) => println!("Error: {err}"),
    }

    // Errors carry their position.
    for broken in ["sqrt(", "func(5)", "x + 5", "0xf"] {
        if let Err(err) = evaluate_once(broken, &[]) {
            println!("{broken:?}: {err}");
        }
    }
}
