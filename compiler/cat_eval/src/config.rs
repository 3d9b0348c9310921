//! Interpreter configuration.
//!
//! Settings come from an opaque key-value [`ConfigSource`] addressed by
//! `section:key` and are folded into an [`EvalConfig`] owned by each
//! interpreter. Nothing is global, so interpreters never see each other's
//! trace flags or search paths.

use std::path::PathBuf;

use rustc_hash::FxHashMap;

/// Key-value configuration provider.
pub trait ConfigSource {
    fn get_str(&self, key: &str) -> Option<String>;

    fn get_bool(&self, key: &str) -> Option<bool> {
        let raw = self.get_str(key)?;
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        }
    }

    fn get_int(&self, key: &str) -> Option<i64> {
        self.get_str(key)?.trim().parse().ok()
    }

    fn get_float(&self, key: &str) -> Option<f64> {
        self.get_str(key)?.trim().parse().ok()
    }
}

/// In-memory configuration, keyed by `section:key`.
#[derive(Clone, Debug, Default)]
pub struct MapConfig {
    values: FxHashMap<String, String>,
}

impl MapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }
}

impl ConfigSource for MapConfig {
    fn get_str(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

pub mod keys {
    pub const PROMPT: &str = "prompt:default";
    /// Comma-separated directories searched for `*.cat` definition files.
    pub const SEARCH_PATHS: &str = "paths:catdefs";
    pub const TRACE: &str = "eval:trace";
    /// Maximum word call depth; `0` disables the limit.
    pub const MAX_DEPTH: &str = "eval:max_depth";
    pub const ERROR_TAG: &str = "display:error";
    pub const INFO_TAG: &str = "display:info";
}

pub const DEFAULT_MAX_DEPTH: usize = 10_000;

#[derive(Clone, Debug, PartialEq)]
pub struct EvalConfig {
    /// Echo every atom and the stack before it to the output sink.
    pub trace: bool,
    pub max_depth: Option<usize>,
    pub search_paths: Vec<PathBuf>,
    pub prompt: String,
    pub error_tag: String,
    pub info_tag: String,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            trace: false,
            max_depth: Some(DEFAULT_MAX_DEPTH),
            search_paths: Vec::new(),
            prompt: "cat> ".to_string(),
            error_tag: crate::print_handler::ERROR_TAG.to_string(),
            info_tag: "info".to_string(),
        }
    }
}

impl EvalConfig {
    /// Read settings from `source`, keeping defaults for missing keys.
    pub fn from_source(source: &dyn ConfigSource) -> Self {
        let mut config = Self::default();
        if let Some(trace) = source.get_bool(keys::TRACE) {
            config.trace = trace;
        }
        if let Some(depth) = source.get_int(keys::MAX_DEPTH) {
            config.max_depth = usize::try_from(depth).ok().filter(|&d| d > 0);
        }
        if let Some(paths) = source.get_str(keys::SEARCH_PATHS) {
            config.search_paths = paths
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(PathBuf::from)
                .collect();
        }
        if let Some(prompt) = source.get_str(keys::PROMPT) {
            config.prompt = prompt;
        }
        if let Some(tag) = source.get_str(keys::ERROR_TAG) {
            config.error_tag = tag;
        }
        if let Some(tag) = source.get_str(keys::INFO_TAG) {
            config.info_tag = tag;
        }
        config
    }
}

#[cfg(test)]
mod tests;
