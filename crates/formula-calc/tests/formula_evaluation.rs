//! End-to-end tests for formula evaluation through the public entry point

use formula_calc::{evaluate, ErrorKind, EvalError};

fn kind_of(formula: &str, args: &[f64]) -> ErrorKind {
    match evaluate(formula, args) {
        Err(e) => e.kind(),
        Ok(value) => panic!("Expected {:?} to fail, got {}", formula, value),
    }
}

/// Test basic arithmetic
#[test]
fn test_basic_arithmetic() {
    assert_eq!(evaluate("2 + 3", &[]).unwrap(), 5.0);
    assert_eq!(evaluate("10 + 20", &[]).unwrap(), 30.0);
    assert_eq!(evaluate("5 - 3", &[]).unwrap(), 2.0);
    assert_eq!(evaluate("4 * 5", &[]).unwrap(), 20.0);
    assert_eq!(evaluate("10 / 2", &[]).unwrap(), 5.0);
    assert_eq!(evaluate("2 + 3 * 4", &[]).unwrap(), 14.0);
    assert_eq!(evaluate("(2 + 3) * 4", &[]).unwrap(), 20.0);
    assert_eq!(evaluate("2 + (3 * 4)", &[]).unwrap(), 14.0);
}

/// Test both exponent spellings
#[test]
fn test_exponentiation() {
    assert_eq!(evaluate("2 ^ 3", &[]).unwrap(), 8.0);
    assert_eq!(evaluate("2 ** 3", &[]).unwrap(), 8.0);
    assert_eq!(evaluate("3 ^ 2", &[]).unwrap(), 9.0);
    assert_eq!(evaluate("3 ** 2", &[]).unwrap(), 9.0);
}

/// Test constants, case-insensitive and whole-word only
#[test]
fn test_constants() {
    for formula in ["PI", "pi", "Pi"] {
        assert_eq!(evaluate(formula, &[]).unwrap(), std::f64::consts::PI);
    }
    for formula in ["E", "e"] {
        assert_eq!(evaluate(formula, &[]).unwrap(), std::f64::consts::E);
    }
    assert_eq!(kind_of("pie", &[]), ErrorKind::Syntax);
    assert_eq!(kind_of("epi", &[]), ErrorKind::Syntax);
}

/// Test built-in functions
#[test]
fn test_functions() {
    assert_eq!(evaluate("sqrt(16)", &[]).unwrap(), 4.0);
    assert_eq!(evaluate("sqrt(25)", &[]).unwrap(), 5.0);
    assert_eq!(evaluate("pow(2,3)", &[]).unwrap(), 8.0);
    assert_eq!(evaluate("abs(-5)", &[]).unwrap(), 5.0);
    assert_eq!(evaluate("abs(5)", &[]).unwrap(), 5.0);
    assert_eq!(evaluate("round(3.6)", &[]).unwrap(), 4.0);
    assert_eq!(evaluate("floor(3.6)", &[]).unwrap(), 3.0);
    assert_eq!(evaluate("ceil(3.2)", &[]).unwrap(), 4.0);
    assert_eq!(evaluate("min(5,3,8)", &[]).unwrap(), 3.0);
    assert_eq!(evaluate("max(5,3,8)", &[]).unwrap(), 8.0);
    assert_eq!(evaluate("sin(0)", &[]).unwrap(), 0.0);
    assert_eq!(evaluate("cos(0)", &[]).unwrap(), 1.0);
    assert_eq!(evaluate("tan(0)", &[]).unwrap(), 0.0);
    assert_eq!(evaluate("log(1)", &[]).unwrap(), 0.0);
    assert_eq!(evaluate("exp(0)", &[]).unwrap(), 1.0);
    assert_eq!(evaluate("SQRT(16)", &[]).unwrap(), 4.0);
    assert_eq!(evaluate("Max(1, 2)", &[]).unwrap(), 2.0);
}

/// Test positional and named arguments
#[test]
fn test_arguments() {
    assert_eq!(evaluate("$arg0 + $arg1", &[5.0, 3.0]).unwrap(), 8.0);
    assert_eq!(evaluate("$arg0 * $arg1", &[4.0, 6.0]).unwrap(), 24.0);
    assert_eq!(evaluate("$arg0 * $arg1 + $arg2", &[2.0, 3.0, 4.0]).unwrap(), 10.0);
    assert_eq!(evaluate("sqrt($arg0) + $arg1", &[16.0, 5.0]).unwrap(), 9.0);
    assert_eq!(evaluate("$num1 + $num2", &[5.0, 3.0]).unwrap(), 8.0);
    assert_eq!(evaluate("$quantity * $price", &[4.0, 6.0]).unwrap(), 24.0);
    assert_eq!(evaluate("$a + $b", &[5.0, 3.0]).unwrap(), 8.0);
    assert_eq!(evaluate("$x + $x", &[5.0]).unwrap(), 10.0);
}

/// Test binding by appearance rather than by name
#[test]
fn test_arguments_bind_by_appearance() {
    assert_eq!(evaluate("$b - $a", &[10.0, 4.0]).unwrap(), 6.0);
    assert_eq!(evaluate("$arg1 - $arg0", &[10.0, 4.0]).unwrap(), 6.0);
    assert_eq!(evaluate("$a", &[1.0, 2.0, 3.0]).unwrap(), 1.0);
    assert_eq!(evaluate("$x / $y * $x", &[6.0, 3.0]).unwrap(), 12.0);
}

/// Test more complex formulas combining everything
#[test]
fn test_complex_formulas() {
    assert_eq!(
        evaluate("($quantity + $existing) * $price", &[4.0, 5.0, 6.0]).unwrap(),
        54.0
    );
    assert_eq!(
        evaluate("sqrt(pow($base, 2) + pow($height, 2))", &[3.0, 4.0]).unwrap(),
        5.0
    );
    assert_eq!(
        evaluate("abs(sin($angle) * $radius)", &[0.0, 5.0]).unwrap(),
        0.0
    );
    assert_eq!(
        evaluate("$arg0 + $quantity * $price", &[10.0, 2.0, 3.0]).unwrap(),
        16.0
    );
    assert_eq!(
        evaluate("sqrt($base^2 + $height^2)", &[3.0, 4.0]).unwrap(),
        5.0
    );
    assert_eq!(
        evaluate("($x + $y) * $z / $w", &[5.0, 3.0, 4.0, 2.0]).unwrap(),
        16.0
    );
    assert_eq!(evaluate("sqrt(16) + pow(2, 3)", &[]).unwrap(), 12.0);
}

/// Test negative arguments and literals
#[test]
fn test_negative_values() {
    assert_eq!(evaluate("-5", &[]).unwrap(), -5.0);
    assert_eq!(evaluate("5 + (-3)", &[]).unwrap(), 2.0);
    assert_eq!(evaluate("-$a", &[-2.0]).unwrap(), 2.0);
    assert_eq!(evaluate("$a ^ 2", &[-3.0]).unwrap(), 9.0);
    assert_eq!(evaluate("-2 ^ 2", &[]).unwrap(), -4.0);
}

/// Test every error kind is surfaced
#[test]
fn test_error_kinds() {
    assert_eq!(kind_of("", &[]), ErrorKind::EmptyFormula);
    assert_eq!(kind_of("   ", &[]), ErrorKind::EmptyFormula);
    assert_eq!(kind_of("2 & 3", &[]), ErrorKind::Lex);
    assert_eq!(kind_of("$a + $b", &[1.0]), ErrorKind::Argument);
    assert_eq!(kind_of("2 +", &[]), ErrorKind::Syntax);
    assert_eq!(kind_of("* 5", &[]), ErrorKind::Syntax);
    assert_eq!(kind_of("sqrt()", &[]), ErrorKind::Syntax);
    assert_eq!(kind_of("(1 + 2", &[]), ErrorKind::Syntax);
    assert_eq!(kind_of("1 / 0", &[]), ErrorKind::Domain);
    assert_eq!(kind_of("sqrt(-4)", &[]), ErrorKind::Domain);
    assert_eq!(kind_of("invalid(5)", &[]), ErrorKind::Domain);
    assert_eq!(kind_of("random()", &[]), ErrorKind::Domain);
}

/// Test error messages identify the offending input
#[test]
fn test_error_messages() {
    assert_eq!(
        evaluate("2 & 3", &[]).unwrap_err(),
        EvalError::Lex {
            character: '&',
            offset: 2
        }
    );
    assert_eq!(
        evaluate("$quantity * $price", &[4.0]).unwrap_err().to_string(),
        "No argument supplied for placeholder '$price' (argument #1, 1 supplied)"
    );
    assert_eq!(
        evaluate("invalid(5)", &[]).unwrap_err().to_string(),
        "Domain error: Unknown function 'invalid'"
    );
}

/// Test non-finite caller arguments are rejected
#[test]
fn test_non_finite_arguments() {
    assert_eq!(kind_of("$a", &[f64::NAN]), ErrorKind::Domain);
    assert_eq!(kind_of("$a * 0", &[f64::INFINITY]), ErrorKind::Domain);
}

/// Test evaluation from several threads at once
#[test]
fn test_concurrent_evaluation() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            std::thread::spawn(move || {
                let x = i as f64;
                evaluate("$x * $x + 1", &[x]).unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let x = i as f64;
        assert_eq!(handle.join().unwrap(), x * x + 1.0);
    }
}
