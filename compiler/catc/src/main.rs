//! Cat interpreter CLI.

mod commands;
mod env_config;

use std::sync::Once;

use commands::{eval_source, lex_file, repl, run_file};

static TRACING_INIT: Once = Once::new();

/// Enable with `RUST_LOG=cat_eval=debug` or `RUST_LOG=trace`.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let code = match args[1].as_str() {
        "run" => {
            if args.len() < 3 {
                eprintln!("Usage: cat run <file.cat>");
                std::process::exit(1);
            }
            run_file(&args[2])
        }
        "eval" => {
            if args.len() < 3 {
                eprintln!("Usage: cat eval <code>");
                std::process::exit(1);
            }
            eval_source(&args[2..].join(" "))
        }
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: cat lex <file.cat>");
                std::process::exit(1);
            }
            lex_file(&args[2])
        }
        "repl" => repl(),
        "help" | "--help" | "-h" => {
            print_usage();
            0
        }
        "version" | "--version" | "-V" => {
            println!("cat {}", env!("CARGO_PKG_VERSION"));
            0
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            1
        }
    };

    std::process::exit(code);
}

fn print_usage() {
    println!("Cat, a concatenative stack language");
    println!();
    println!("Usage: cat <command> [args]");
    println!();
    println!("Commands:");
    println!("  run <file.cat>     Load a file and print the final stack");
    println!("  eval <code>        Evaluate code and print the final stack");
    println!("  lex <file.cat>     Read a file and display its atoms");
    println!("  repl               Interactive session on stdin");
    println!("  help               Show this help message");
    println!("  version            Show version information");
    println!();
    println!("Environment:");
    println!("  CAT_PATH           Comma-separated directories searched by load");
    println!("  CAT_TRACE          Print each atom and the stack while evaluating");
    println!("  CAT_MAX_DEPTH      Maximum nesting of word calls");
    println!("  CAT_PROMPT         Prompt shown by the repl");
    println!("  RUST_LOG           Enable diagnostic logging (e.g. cat_eval=debug)");
}
