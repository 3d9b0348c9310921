//! Interpreter settings read from the environment.
//!
//! | Variable        | Key             |
//! |-----------------|-----------------|
//! | `CAT_PATH`      | `paths:catdefs` |
//! | `CAT_TRACE`     | `eval:trace`    |
//! | `CAT_MAX_DEPTH` | `eval:max_depth`|
//! | `CAT_PROMPT`    | `prompt:default`|

use cat_eval::{config_keys, MapConfig};

const VARS: &[(&str, &str)] = &[
    ("CAT_PATH", config_keys::SEARCH_PATHS),
    ("CAT_TRACE", config_keys::TRACE),
    ("CAT_MAX_DEPTH", config_keys::MAX_DEPTH),
    ("CAT_PROMPT", config_keys::PROMPT),
];

/// Build a config from any variable lookup.
pub fn config_from(lookup: impl Fn(&str) -> Option<String>) -> MapConfig {
    let mut config = MapConfig::new();
    for (var, key) in VARS {
        if let Some(value) = lookup(var) {
            tracing::debug!(var, key, value = %value, "config from environment");
            config.set(key, value);
        }
    }
    config
}

pub fn from_env() -> MapConfig {
    config_from(|var| std::env::var(var).ok())
}
