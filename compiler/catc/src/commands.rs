//! Command handlers for the `cat` binary.
//!
//! Each handler returns the process exit code; `main` only dispatches.

use std::io::{self, BufRead, Write};

use cat_eval::{EvalError, EvalErrorKind, EvalResult, Interpreter, InterpreterBuilder};
use cat_lexer::tokenize;

use crate::env_config;

fn interpreter() -> Interpreter {
    InterpreterBuilder::new()
        .config_source(&env_config::from_env())
        .build()
}

fn read_file(path: &str) -> Result<String, i32> {
    std::fs::read_to_string(path).map_err(|err| {
        eprintln!("error: cannot read '{path}': {err}");
        1
    })
}

/// Exit code for a failed evaluation. `halt` picks its own code.
pub fn exit_code(err: &EvalError) -> i32 {
    match err.kind {
        EvalErrorKind::Halt { code } => code,
        _ => 1,
    }
}

/// Error text with the word backtrace, one frame per line.
pub fn render_error(err: &EvalError) -> String {
    let mut text = format!("error: {err}");
    if let Some(backtrace) = &err.backtrace {
        for frame in backtrace.frames() {
            text.push_str("\n  in ");
            text.push_str(frame);
        }
    }
    text
}

/// Print the final stack on success, or the error.
fn finish(interp: &Interpreter, result: EvalResult) -> i32 {
    match result {
        Ok(()) => {
            println!("{}", interp.stack);
            0
        }
        Err(err) if matches!(err.kind, EvalErrorKind::Halt { .. }) => exit_code(&err),
        Err(err) => {
            eprintln!("{}", render_error(&err));
            exit_code(&err)
        }
    }
}

/// Run a program file line by line, the way definition files load.
pub fn run_file(path: &str) -> i32 {
    let mut interp = interpreter();
    let result = interp.load_file(path, None, true).map(|_| ());
    finish(&interp, result)
}

pub fn eval_source(source: &str) -> i32 {
    let mut interp = interpreter();
    let result = interp.eval(source);
    finish(&interp, result)
}

/// One line per atom, as printed by `cat lex`.
pub fn lex_lines(source: &str) -> Vec<String> {
    tokenize(source).map(|atom| format!("  {atom:?}")).collect()
}

pub fn lex_file(path: &str) -> i32 {
    let content = match read_file(path) {
        Ok(content) => content,
        Err(code) => return code,
    };
    let lines = lex_lines(&content);
    println!("Atoms for '{path}' ({} atoms):", lines.len());
    for line in lines {
        println!("{line}");
    }
    0
}

/// Whether an interactive `define` needs more lines.
pub fn is_open_definition(buffer: &str) -> bool {
    let trimmed = buffer.trim();
    trimmed.starts_with("define") && (!trimmed.ends_with('}') || trimmed.ends_with("}}"))
}

/// Read-eval-print loop on stdin. Errors are reported and the session
/// continues; `halt` ends it.
pub fn repl() -> i32 {
    let mut interp = interpreter();
    let prompt = interp.config().prompt.clone();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut buffer = String::new();

    loop {
        print!("{}", if buffer.is_empty() { prompt.as_str() } else { "... " });
        if io::stdout().flush().is_err() {
            return 1;
        }
        let Some(Ok(line)) = lines.next() else {
            return 0;
        };
        let line = line.trim();
        if buffer.is_empty() && matches!(line, "quit" | "exit") {
            return 0;
        }
        if !buffer.is_empty() {
            buffer.push('\n');
        }
        buffer.push_str(line);
        if is_open_definition(&buffer) {
            continue;
        }

        let source = std::mem::take(&mut buffer);
        match interp.eval(&source) {
            Ok(()) => println!("{}", interp.stack),
            Err(err) if matches!(err.kind, EvalErrorKind::Halt { .. }) => return exit_code(&err),
            Err(err) => eprintln!("{}", render_error(&err)),
        }
    }
}
