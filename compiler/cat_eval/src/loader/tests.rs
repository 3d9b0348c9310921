use std::fs;

use super::*;
use crate::errors::EvalErrorKind;
use crate::print_handler::silent_handler;
use crate::value::Value;
use crate::{EvalConfig, InterpreterBuilder};
use pretty_assertions::assert_eq;

fn interp_with_paths(paths: Vec<PathBuf>) -> Interpreter {
    let config = EvalConfig {
        search_paths: paths,
        ..EvalConfig::default()
    };
    InterpreterBuilder::new()
        .config(config)
        .print_handler(silent_handler())
        .build()
}

#[expect(clippy::expect_used, reason = "tests need a scratch directory")]
fn scratch_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("create temp dir")
}

#[expect(clippy::expect_used, reason = "tests need fixture files")]
fn write(dir: &Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture");
    path.display().to_string()
}

// === Statement splitting ===

#[test]
fn test_statements_skip_comments_and_blank_lines() {
    let source = "// header\n\n# note\n1 2 +   // trailing\n  3  \n";
    assert_eq!(
        statements(source).ok(),
        Some(vec![
            Statement::Eval("1 2 +".to_string()),
            Statement::Eval("3".to_string()),
        ])
    );
}

#[test]
fn test_statements_multiline_definition() {
    let source = "define sq : (n -- n)\n{{ squares }}\n{ dup\n  * }\n5 sq\n";
    assert_eq!(
        statements(source).ok(),
        Some(vec![
            Statement::Define("define sq : (n -- n)\n{{ squares }}\n{ dup\n* }".to_string()),
            Statement::Eval("5 sq".to_string()),
        ])
    );
}

#[test]
fn test_statements_description_line_does_not_close_block() {
    let source = "define w\n{{ text }}\n{ 1 }";
    let parsed = statements(source).ok();
    assert_eq!(parsed.map(|s| s.len()), Some(1));
}

#[test]
fn test_statements_unclosed_block_is_malformed() {
    let err = statements("define w {\n1 2").err().map(|e| e.kind);
    assert!(matches!(err, Some(EvalErrorKind::MalformedDefinition { .. })));
}

#[test]
fn test_definition_block_matches_exact_name() {
    let source = "define double { 2 * }\ndefine dbl\n{ double }\n";
    assert_eq!(
        definition_block(source, "dbl").as_deref(),
        Some("define dbl\n{ double }")
    );
    assert_eq!(definition_block(source, "dou"), None);
}

// === load_file ===

#[test]
fn test_load_defines_and_evaluates() {
    let dir = scratch_dir();
    let file = write(dir.path(), "lib.cat", "define inc { 1 + }\n41 inc\n");
    let mut interp = interp_with_paths(vec![]);
    assert_eq!(interp.load_file(&file, None, false).ok(), Some(true));
    assert_eq!(interp.values(), &[Value::Int(42)]);
    assert!(interp.namespaces.has_file("user", &file));
}

#[test]
fn test_reload_is_idempotent_without_force() {
    let dir = scratch_dir();
    let file = write(dir.path(), "lib.cat", "define one { 1 }\none\n");
    let mut interp = interp_with_paths(vec![]);
    assert_eq!(interp.load_file(&file, None, false).ok(), Some(true));
    assert_eq!(interp.load_file(&file, None, false).ok(), Some(false));
    assert_eq!(interp.values(), &[Value::Int(1)]);
}

#[test]
fn test_force_reload_reregisters() {
    let dir = scratch_dir();
    let file = write(dir.path(), "lib.cat", "define v { 1 }\n");
    let mut interp = interp_with_paths(vec![]);
    interp.load_file(&file, None, false).ok();

    write(dir.path(), "lib.cat", "define v { 2 }\n");
    assert_eq!(interp.load_file(&file, None, false).ok(), Some(false));
    interp.eval("v").ok();
    assert_eq!(interp.load_file(&file, None, true).ok(), Some(true));
    interp.eval("v").ok();
    assert_eq!(interp.values(), &[Value::Int(1), Value::Int(2)]);
}

#[test]
fn test_load_into_namespace_restores_current_user() {
    let dir = scratch_dir();
    let file = write(dir.path(), "ts.cat", "define tick { 1 }\n");
    let mut interp = interp_with_paths(vec![]);
    assert!(interp.load_file(&file, Some("TS"), false).is_ok());
    assert_eq!(interp.namespaces.current_user(), "user");
    assert_eq!(interp.namespaces.words_in("TS"), Ok(vec!["tick"]));
    assert_eq!(interp.namespaces.words_in("user"), Ok(vec![]));
    assert!(interp.eval("TS:tick").is_ok());
    assert_eq!(interp.values(), &[Value::Int(1)]);
}

#[test]
fn test_load_failure_restores_namespace_and_records_nothing() {
    let dir = scratch_dir();
    let file = write(dir.path(), "bad.cat", "1 2\nundefined_thing raise\n");
    let mut interp = interp_with_paths(vec![]);
    assert!(interp.load_file(&file, Some("scratch"), false).is_err());
    assert_eq!(interp.namespaces.current_user(), "user");
    assert!(!interp.namespaces.has_file("scratch", &file));
}

#[test]
fn test_load_relative_to_search_path() {
    let dir = scratch_dir();
    write(dir.path(), "rel.cat", "7\n");
    let mut interp = interp_with_paths(vec![dir.path().to_path_buf()]);
    assert_eq!(interp.load_file("rel.cat", None, false).ok(), Some(true));
    assert_eq!(interp.values(), &[Value::Int(7)]);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let mut interp = interp_with_paths(vec![]);
    let err = interp
        .load_file("/definitely/not/here.cat", None, false)
        .err()
        .map(|e| e.kind);
    assert!(matches!(err, Some(EvalErrorKind::Io { .. })));
}

// === fetch ===

#[test]
fn test_fetch_from_definition_file_with_dependencies() {
    let dir = scratch_dir();
    write(
        dir.path(),
        "arith.cat",
        "define double { 2 * }\ndefine quad {{ deps: double }}\n{ double double }\n",
    );
    let mut interp = interp_with_paths(vec![dir.path().to_path_buf()]);
    assert!(interp.fetch("quad", "user").is_ok());
    assert_eq!(interp.namespaces.words_in("user"), Ok(vec!["double", "quad"]));
    interp.eval("2 quad").ok();
    assert_eq!(interp.values(), &[Value::Int(8)]);
}

#[test]
fn test_fetch_qualified_creates_namespace() {
    let dir = scratch_dir();
    write(dir.path(), "a.cat", "define seven { 7 }\n");
    let mut interp = interp_with_paths(vec![dir.path().to_path_buf()]);
    assert!(interp.fetch("core:seven", "user").is_ok());
    assert_eq!(interp.namespaces.words_in("core"), Ok(vec!["seven"]));
}

#[test]
fn test_fetch_dependency_cycle_terminates() {
    let dir = scratch_dir();
    write(
        dir.path(),
        "cycle.cat",
        "define ping {{ deps: pong }} { pong }\ndefine pong {{ deps: ping }} { 1 }\n",
    );
    let mut interp = interp_with_paths(vec![dir.path().to_path_buf()]);
    assert!(interp.fetch("ping", "user").is_ok());
    assert_eq!(interp.namespaces.words_in("user"), Ok(vec!["ping", "pong"]));
}

#[test]
fn test_fetch_unknown_word_fails() {
    let mut interp = interp_with_paths(vec![]);
    let err = interp.fetch("nowhere", "user").err().map(|e| e.kind);
    assert!(matches!(err, Some(EvalErrorKind::UndefinedWord { .. })));
}

#[test]
fn test_fetch_of_builtin_is_noop() {
    let mut interp = interp_with_paths(vec![]);
    assert!(interp.fetch("dup", "user").is_ok());
    assert_eq!(interp.namespaces.words_in("user"), Ok(vec![]));
}
