//! fcalc - evaluate formulas from the command line

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use formula_calc::{evaluate, evaluate_with, tokenize_spanned, ErrorKind, EvalOptions};
use serde::Serialize;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fcalc")]
#[command(author, version, about = "Arithmetic formula calculator")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a formula, binding ARGS to its placeholders in order of appearance
    #[command(alias = "calc")]
    Eval {
        /// Formula to evaluate, e.g. 'sqrt($a^2 + $b^2)'
        #[arg(allow_hyphen_values = true)]
        formula: String,

        /// Placeholder values
        #[arg(allow_negative_numbers = true)]
        args: Vec<f64>,

        /// Print the result or error as JSON
        #[arg(long)]
        json: bool,

        /// Maximum formula length in characters
        #[arg(long, default_value_t = EvalOptions::DEFAULT_MAX_LENGTH)]
        max_length: usize,

        /// Maximum nesting depth
        #[arg(long, default_value_t = EvalOptions::DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },

    /// Print the token stream of a formula
    Tokens {
        /// Formula to tokenize
        #[arg(allow_hyphen_values = true)]
        formula: String,
    },

    /// Run a tour of example formulas
    Tour,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Eval {
            formula,
            args,
            json,
            max_length,
            max_depth,
        } => {
            let options = EvalOptions::default()
                .with_max_length(max_length)
                .with_max_depth(max_depth);
            tracing::debug!(?options, ?args, json, "parsed command line");
            eval(&formula, &args, &options, json)
        }
        Commands::Tokens { formula } => show_tokens(&formula),
        Commands::Tour => {
            tour();
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// JSON shape printed by `eval --json`
#[derive(Debug, Serialize)]
struct EvalReport<'a> {
    formula: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorReport>,
}

#[derive(Debug, Serialize)]
struct ErrorReport {
    kind: ErrorKind,
    message: String,
}

fn report<'a>(formula: &'a str, args: &[f64], options: &EvalOptions) -> EvalReport<'a> {
    match evaluate_with(formula, args, options) {
        Ok(value) => EvalReport {
            formula,
            result: Some(value),
            error: None,
        },
        Err(e) => EvalReport {
            formula,
            result: None,
            error: Some(ErrorReport {
                kind: e.kind(),
                message: e.to_string(),
            }),
        },
    }
}

fn eval(formula: &str, args: &[f64], options: &EvalOptions, json: bool) -> Result<ExitCode> {
    if json {
        let report = report(formula, args, options);
        let failed = report.error.is_some();
        println!(
            "{}",
            serde_json::to_string(&report).context("Failed to serialize result")?
        );
        return Ok(if failed {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        });
    }

    let value = evaluate_with(formula, args, options)
        .with_context(|| format!("Failed to evaluate '{}'", formula))?;
    println!("{}", value);
    Ok(ExitCode::SUCCESS)
}

fn show_tokens(formula: &str) -> Result<ExitCode> {
    let tokens = tokenize_spanned(formula)
        .with_context(|| format!("Failed to tokenize '{}'", formula))?;

    for (token, span) in &tokens {
        println!("{:>4}..{:<4} {:?}", span.start, span.end, token);
    }
    Ok(ExitCode::SUCCESS)
}

/// Example formulas shown by `fcalc tour`, grouped by section
const TOUR: &[(&str, &[(&str, &[f64])])] = &[
    (
        "Basic Arithmetic",
        &[
            ("2 + 3", &[]),
            ("10 - 5", &[]),
            ("4 * 6", &[]),
            ("15 / 3", &[]),
        ],
    ),
    ("Exponentiation", &[("2 ^ 3", &[]), ("3 ** 2", &[])]),
    ("Mathematical Constants", &[("PI", &[]), ("E", &[])]),
    (
        "Mathematical Functions",
        &[
            ("sqrt(16)", &[]),
            ("pow(2, 3)", &[]),
            ("abs(-5)", &[]),
            ("round(3.6)", &[]),
            ("min(5, 3, 8)", &[]),
            ("max(5, 3, 8)", &[]),
        ],
    ),
    (
        "Trigonometric Functions",
        &[("sin(0)", &[]), ("cos(0)", &[]), ("sin(PI/2)", &[])],
    ),
    (
        "Using Arguments",
        &[
            ("$arg0 + $arg1", &[5.0, 3.0]),
            ("$arg0 * $arg1", &[4.0, 6.0]),
            ("sqrt($arg0) + $arg1", &[16.0, 5.0]),
        ],
    ),
    (
        "Using Named Arguments",
        &[
            ("$num1 + $num2", &[5.0, 3.0]),
            ("$quantity * $price", &[4.0, 6.0]),
            ("sqrt($base) + $offset", &[16.0, 5.0]),
        ],
    ),
    (
        "Complex Formulas",
        &[
            ("(2 + 3) * 4", &[]),
            ("2 + (3 * 4)", &[]),
            ("sqrt(16) + pow(2, 3)", &[]),
        ],
    ),
    ("Error Handling", &[("2 +", &[]), ("1 / 0", &[])]),
];

fn tour() {
    println!("=== Formula Calculator Examples ===");

    for (section, formulas) in TOUR {
        println!("\n{}:", section);
        for (formula, args) in formulas.iter() {
            let label = if args.is_empty() {
                formula.to_string()
            } else {
                format!("{} {:?}", formula, args)
            };

            match evaluate(formula, args) {
                Ok(value) => println!("  {} = {}", label, value),
                Err(e) => println!("  {} -> {}: {}", label, e.kind(), e),
            }
        }
    }

    println!("\n=== Examples completed ===");
}
