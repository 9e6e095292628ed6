use rpncalc::compile;

fn main() {
    pretty_env_logger::init();

    let expr = compile("price * volume - fee", &["price", "volume", "fee"]).unwrap();

    let rows: Vec<[f64; 3]> = (1..=8)
        .map(|i| [100.0 + i as f64, 1000.0 * i as f64, 2.5])
        .collect();

    let results = expr.evaluate_batch(&rows);
    for (i, (row, result)) in rows.iter().zip(&results).enumerate() {
        println!("Result {i}: {row:?} -> {result}");
    }
}
