use rpncalc::{compile, evaluate_once, CompileError, SyntaxErrorKind, Var};
use std::f64::consts::PI;

fn init() {
    let _ = pretty_env_logger::try_init();
}

fn eval(formula: &str) -> f64 {
    evaluate_once(formula, &[]).unwrap()
}

#[test]
fn evaluates_constant_expressions() {
    init();
    let cases: &[(&str, f64)] = &[
        ("5", 5.0),
        ("5.5 + 5.5", 11.0),
        ("5 + 10", 15.0),
        ("5 + 10^2", 105.0),
        ("5 + 10 * 5", 55.0),
        ("5 + 10 / 2", 10.0),
        ("-5 + 10 / 2 * 9 - 5 ^ -2", -5.0 + 10.0 / 2.0 * 9.0 - 5f64.powf(-2.0)),
        ("(5 + 5) / 2", 5.0),
        ("(5 + (5 * 5))", 30.0),
        ("(5 + 5) * (5 / 1) + ((5 / 1) * 5 * (5+5))", 300.0),
        ("sqrt(PI)", PI.sqrt()),
        ("sqrt(10)", 10f64.sqrt()),
        ("sqrt(sin(0) + cos(1))", (0f64.sin() + 1f64.cos()).sqrt()),
        ("sqrt(5 * 10)", 50f64.sqrt()),
        ("-5 + 10", 5.0),
        ("-5 + -5", -10.0),
        ("-5 - -5", 0.0),
        ("-sqrt(5)", -(5f64.sqrt())),
        ("cos(-1)", (-1f64).cos()),
        ("5 - 10 - 2", -7.0),
        ("2^3^2", 512.0),
        ("- - 5", 5.0),
        ("ln(E)", std::f64::consts::E.ln()),
        ("floor(2.7) + ceil(2.1) + abs(-1)", 6.0),
        ("cbrt(27) * SQRT2 ^ 2", 3.0 * std::f64::consts::SQRT_2.powf(2.0)),
        ("1.5e2 / .5", 300.0),
    ];
    for &(formula, expected) in cases {
        assert_eq!(eval(formula), expected, "{formula}");
    }
}

#[test]
fn division_by_zero_is_infinite() {
    assert_eq!(eval("1 / 0"), f64::INFINITY);
    assert_eq!(eval("-1 / 0"), f64::NEG_INFINITY);
    assert!(eval("0 / 0").is_nan());
    assert!(eval("sqrt(-1)").is_nan());
}

#[test]
fn binds_variables_by_declared_position() {
    let expr = compile("5 + y", &["y", "z"]).unwrap();
    assert_eq!(expr.variables(), ["y"]);
    assert_eq!(expr.evaluate(&[10.0]), 15.0);

    let expr = compile("x * z - y", &["x", "y", "z"]).unwrap();
    assert_eq!(expr.variables(), ["x", "z", "y"]);
    assert_eq!(expr.evaluate(&[2.0, 1.0, 4.0]), 7.0);

    assert_eq!(
        evaluate_once("x + y", &[Var::new("x", 1.0), Var::new("y", 2.0)]),
        Ok(3.0)
    );
}

#[test]
fn constants_shadow_variables() {
    let expr = compile("PI * r ^ 2", &["PI", "r"]).unwrap();
    assert_eq!(expr.variables(), ["r"]);
    assert_eq!(expr.evaluate(&[0.0, 2.0]), PI * 4.0);
}

#[test]
fn reports_every_unbound_variable() {
    let err = compile("x + 5", &[]).unwrap_err();
    assert_eq!(
        err,
        CompileError::UnboundVariables {
            names: vec!["x".into()]
        }
    );

    let err = compile("c * b + a * x + c", &["x"]).unwrap_err();
    assert_eq!(err.to_string(), "missing variables: [a b c]");
}

#[test]
fn reports_syntax_errors_with_positions() {
    let cases: &[(&[u8], &str)] = &[
        (b"", "0:0 : unexpected token: EOF"),
        (b"sqrt(", "1:6 : unexpected token: EOF"),
        (b"sqrt&", "1:5 : unexpected token: \"&\""),
        (b"(0", "1:3 : expected \")\", got EOF"),
        (b"0xf", "1:1 : invalid float: \"0xf\""),
        (b"1e400", "1:1 : invalid float: \"1e400\""),
        (b"0e", "1:1 : exponent has no digits"),
        (b"0N", "1:2 : expected EOF, got Ident"),
        (b"5 *", "1:4 : unexpected token: EOF"),
        (b"func(5)", "1:5 : no function named: \"func\""),
        (b"-I\xfa", "1:2 : invalid UTF-8 encoding"),
        (b"a \xfa", "0:1 : invalid UTF-8 encoding"),
        (b"()\xfa", "1:2 : invalid UTF-8 encoding"),
        (b"sqrt()", "1:6 : unexpected token: \")\""),
    ];
    for &(formula, expected) in cases {
        let err = compile(formula, &[]).unwrap_err();
        assert_eq!(err.to_string(), expected, "{:?}", String::from_utf8_lossy(formula));
    }
}

#[test]
fn syntax_error_fields() {
    let CompileError::Syntax(err) = compile("1 + 0x1F", &[]).unwrap_err() else {
        panic!("expected a syntax error");
    };
    assert_eq!(err.kind, SyntaxErrorKind::InvalidFloat("0x1F".into()));
    assert_eq!(err.message(), "invalid float: \"0x1F\"");
    assert_eq!((err.line, err.column), (1, 5));

    let CompileError::Syntax(err) = compile(&b"1 + \xff"[..], &[]).unwrap_err() else {
        panic!("expected a syntax error");
    };
    assert_eq!(err.kind, SyntaxErrorKind::InvalidEncoding);
}

#[test]
fn syntax_errors_win_over_unbound_variables() {
    let err = compile("x + (", &[]).unwrap_err();
    assert!(matches!(err, CompileError::Syntax(_)), "{err:?}");
}

#[test]
fn compiling_twice_is_deterministic() {
    let names = ["a", "b", "c"];
    let first = compile("a * sqrt(b) - c ^ 2 / (a + PI)", &names).unwrap();
    let second = compile("a * sqrt(b) - c ^ 2 / (a + PI)", &names).unwrap();
    assert_eq!(first.postfix(), second.postfix());
    assert_eq!(first.variables(), second.variables());
    assert_eq!(first, second);

    let mut scratch = Vec::new();
    let values = [3.0, 16.0, 2.0];
    let expected = first.evaluate_with(&values, &mut scratch);
    for _ in 0..1000 {
        assert_eq!(first.evaluate_with(&values, &mut scratch), expected);
        assert_eq!(second.evaluate_with(&values, &mut scratch), expected);
    }
}

#[test]
fn shared_between_threads_with_private_scratch() {
    let expr = compile("x * 2 + 1", &["x"]).unwrap();
    std::thread::scope(|scope| {
        for t in 0..4 {
            let expr = &expr;
            scope.spawn(move || {
                let mut scratch = expr.scratch();
                for i in 0..1000 {
                    let x = (t * 1000 + i) as f64;
                    assert_eq!(expr.evaluate_with(&[x], &mut scratch), x * 2.0 + 1.0);
                }
            });
        }
    });
}

#[test]
fn batch_evaluation_keeps_row_order() {
    let expr = compile("a - b", &["a", "b"]).unwrap();
    let rows: Vec<Vec<f64>> = (0..500).map(|i| vec![i as f64, 1.0]).collect();
    let results = expr.evaluate_batch(&rows);
    assert_eq!(results.len(), rows.len());
    for (i, result) in results.iter().enumerate() {
        assert_eq!(*result, i as f64 - 1.0);
    }
}

#[test]
fn arbitrary_input_never_panics() {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const ALPHABET: &[u8] = b"0123456789.eExX+-*/^() \nabcPIsqrtcos_\xfa\xc3\xa9&";
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..20_000 {
        let len = rng.random_range(0..24);
        let formula: Vec<u8> = (0..len)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())])
            .collect();
        let names = ["a", "b", "c"];
        if let Ok(expr) = compile(&formula, &names) {
            let _ = expr.evaluate(&[1.0, 2.0, 3.0]);
        }
    }
}

#[test]
fn agrees_with_meval() {
    let formulas = [
        "5 + 10 * 5",
        "(10 + 20) * 3 / (4 - 1) + 5",
        "5 - 10 - 2",
        "100 / 10 / 5",
        "2 ^ 10",
        "sqrt(10) + abs(3 - 7)",
        "floor(7.5) / ceil(1.2)",
        "sin(1) * cos(2) + tan(0.5)",
    ];
    for formula in formulas {
        let ours = eval(formula);
        let theirs = meval::eval_str(formula).unwrap();
        assert!((ours - theirs).abs() < 1e-12, "{formula}: {ours} != {theirs}");
    }
}
