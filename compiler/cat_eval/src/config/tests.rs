use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_defaults_without_keys() {
    let config = EvalConfig::from_source(&MapConfig::new());
    assert_eq!(config, EvalConfig::default());
    assert_eq!(config.max_depth, Some(DEFAULT_MAX_DEPTH));
}

#[test]
fn test_reads_all_keys() {
    let source = MapConfig::new()
        .with(keys::TRACE, "yes")
        .with(keys::MAX_DEPTH, "50")
        .with(keys::SEARCH_PATHS, "defs, lib/cat ,")
        .with(keys::PROMPT, ">> ")
        .with(keys::ERROR_TAG, "red");
    let config = EvalConfig::from_source(&source);
    assert!(config.trace);
    assert_eq!(config.max_depth, Some(50));
    assert_eq!(
        config.search_paths,
        vec![PathBuf::from("defs"), PathBuf::from("lib/cat")]
    );
    assert_eq!(config.prompt, ">> ");
    assert_eq!(config.error_tag, "red");
}

#[test]
fn test_zero_depth_disables_limit() {
    let config = EvalConfig::from_source(&MapConfig::new().with(keys::MAX_DEPTH, "0"));
    assert_eq!(config.max_depth, None);
}

#[test]
fn test_typed_getters() {
    let source = MapConfig::new()
        .with("a:b", "off")
        .with("a:n", " 42 ")
        .with("a:x", "2.5")
        .with("a:bad", "maybe");
    assert_eq!(source.get_bool("a:b"), Some(false));
    assert_eq!(source.get_bool("a:bad"), None);
    assert_eq!(source.get_int("a:n"), Some(42));
    assert_eq!(source.get_float("a:x"), Some(2.5));
    assert_eq!(source.get_str("missing:key"), None);
}
