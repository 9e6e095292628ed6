use log::debug;
use rpncalc::compile;

fn main() {
    pretty_env_logger::init();

    let expr = compile("(x + y) / (x - y)", &["x", "y"]).expect("Failed to compile");
    debug!("compiled: {expr}");
    println!("postfix: {expr}");
    println!("variables: {:?}", expr.variables());

    let mut scratch = expr.scratch();
    for (x, y) in [(5.0, 10.0), (1.0, 2.0), (3.0, 3.0)] {
        let result = expr.evaluate_with(&[x, y], &mut scratch);
        println!("x = {x}, y = {y}: {result}");
    }
}
