//! Definition files and dependency fetching.
//!
//! A definition file is read line by line. Blank lines and lines starting
//! with `//` or `#` are skipped, and a trailing ` //` comment is cut. A line
//! starting with `define` opens a definition block that runs to the first
//! line ending in `}` (but not `}}`); every other line is evaluated as it
//! is reached.

use std::path::{Path, PathBuf};

use cat_ir::name::QualifiedName;

use crate::definition::{definition_name, is_definition};
use crate::errors::{io_error, malformed_definition, undefined_word, EvalResult};
use crate::interpreter::Interpreter;

/// Extension of definition files searched by `fetch`.
pub const DEFINITION_EXT: &str = "cat";

/// One unit of a definition file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Statement {
    /// A program line, evaluated immediately.
    Eval(String),
    /// A complete `define` block, possibly spanning several lines.
    Define(String),
}

/// Trimmed, non-comment lines of a file.
fn code_lines(source: &str) -> impl Iterator<Item = &str> {
    source.lines().filter_map(|line| {
        let line = line.trim();
        if line.is_empty() || line.starts_with("//") || line.starts_with('#') {
            return None;
        }
        let line = match line.find(" //") {
            Some(idx) => line[..idx].trim_end(),
            None => line,
        };
        Some(line)
    })
}

/// Whether `line` closes a definition block.
fn ends_block(line: &str) -> bool {
    line.ends_with('}') && !line.ends_with("}}")
}

/// Split file contents into statements.
pub fn statements(source: &str) -> EvalResult<Vec<Statement>> {
    let mut out = Vec::new();
    let mut block: Option<String> = None;
    for line in code_lines(source) {
        if let Some(text) = block.as_mut() {
            text.push('\n');
            text.push_str(line);
        } else if is_definition(line) {
            block = Some(line.to_string());
        } else {
            out.push(Statement::Eval(line.to_string()));
            continue;
        }
        if ends_block(line) {
            if let Some(text) = block.take() {
                out.push(Statement::Define(text));
            }
        }
    }
    if let Some(text) = block {
        let name = definition_name(&text).unwrap_or("?");
        return Err(malformed_definition(format!(
            "{name}: definition block never closed"
        )));
    }
    Ok(out)
}

/// Text of the block defining `word` in `source`, if any.
fn definition_block(source: &str, word: &str) -> Option<String> {
    let mut lines = code_lines(source);
    let first = lines.find(|line| {
        definition_name(line).is_some_and(|name| QualifiedName::parse(name).name == word)
    })?;
    let mut text = first.to_string();
    if !ends_block(first) {
        for line in lines {
            text.push('\n');
            text.push_str(line);
            if ends_block(line) {
                break;
            }
        }
    }
    Some(text)
}

/// Search the `*.cat` files of each directory, in order, for the
/// definition of `word`.
pub fn find_definition(search_paths: &[PathBuf], word: &str) -> EvalResult<Option<String>> {
    for dir in search_paths {
        let pattern = dir.join(format!("*.{DEFINITION_EXT}"));
        let pattern = pattern.to_string_lossy();
        let entries = match glob::glob(&pattern) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(%pattern, %err, "bad search path");
                continue;
            }
        };
        let mut files: Vec<PathBuf> = entries.filter_map(Result::ok).collect();
        files.sort();
        for file in files {
            let source = std::fs::read_to_string(&file)
                .map_err(|err| io_error(&file.display().to_string(), &err))?;
            if let Some(block) = definition_block(&source, word) {
                tracing::debug!(word, file = %file.display(), "definition found");
                return Ok(Some(block));
            }
        }
    }
    Ok(None)
}

impl Interpreter {
    /// Load a definition file into `namespace` (default: the current user
    /// namespace), creating the namespace if needed.
    ///
    /// Returns `false` when the file was already loaded there and `force`
    /// is not set.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn load_file(&mut self, path: &str, namespace: Option<&str>, force: bool) -> EvalResult<bool> {
        let target = namespace
            .map_or_else(|| self.namespaces.current_user().to_string(), str::to_string);
        if !self.namespaces.contains(&target) {
            self.namespaces.create(&target)?;
        }
        if !force && self.namespaces.has_file(&target, path) {
            tracing::warn!(file = path, ns = %target, "already loaded, skipping");
            return Ok(false);
        }

        let resolved = self.locate(path)?;
        let source = std::fs::read_to_string(&resolved).map_err(|err| io_error(path, &err))?;
        let statements = statements(&source)?;
        {
            let mut scope = self.in_user_namespace(&target)?;
            for statement in &statements {
                match statement {
                    Statement::Define(text) => scope.define(text)?,
                    Statement::Eval(text) => scope.eval(text)?,
                }
            }
        }
        self.namespaces.record_file(&target, path)?;
        tracing::debug!(file = path, ns = %target, statements = statements.len(), "loaded");
        Ok(true)
    }

    /// Find `path` as given, or relative to one of the search paths.
    fn locate(&self, path: &str) -> EvalResult<PathBuf> {
        let direct = Path::new(path);
        if direct.is_file() {
            return Ok(direct.to_path_buf());
        }
        if direct.is_relative() {
            if let Some(found) = self
                .config
                .search_paths
                .iter()
                .map(|dir| dir.join(direct))
                .find(|candidate| candidate.is_file())
            {
                return Ok(found);
            }
        }
        Err(io_error(
            path,
            &std::io::Error::from(std::io::ErrorKind::NotFound),
        ))
    }

    /// Make `word` available in `target`.
    ///
    /// A qualified `ns:word` overrides the target namespace, which is
    /// created if missing. The word is copied from the first other
    /// namespace defining it (then its own dependencies are fetched), or
    /// compiled from the first definition file that has it.
    pub fn fetch(&mut self, word: &str, target: &str) -> EvalResult {
        let q = QualifiedName::parse(word);
        let target = q.namespace.unwrap_or(target).to_string();
        let word = q.name;
        if !self.namespaces.contains(&target) {
            self.namespaces.create(&target)?;
        }
        if self.is_available(word, &target) {
            return Ok(());
        }

        // Already being fetched further up: the outer fetch installs it.
        let key = format!("{target}:{word}");
        if !self.fetching.insert(key.clone()) {
            return Ok(());
        }
        let result = self.fetch_missing(word, &target);
        self.fetching.remove(&key);
        result
    }

    fn fetch_missing(&mut self, word: &str, target: &str) -> EvalResult {
        let source = self
            .namespaces
            .owners_of(word)
            .into_iter()
            .find(|ns| *ns != target && !self.namespaces.is_reserved(ns))
            .map(str::to_string);
        let def = source.as_deref().and_then(|ns| {
            self.namespaces
                .get(ns)
                .and_then(|n| n.words.get(word))
                .cloned()
        });

        if let Some(def) = def {
            tracing::debug!(word, from = ?source, to = target, "fetched from namespace");
            let deps = def.deps.clone();
            self.namespaces.define_word(target, word, def)?;
            for dep in &deps {
                if !self.is_available(dep, target) {
                    self.fetch(dep, target)?;
                }
            }
            return Ok(());
        }

        if let Some(block) = find_definition(&self.config.search_paths, word)? {
            tracing::debug!(word, to = target, "fetched from definition file");
            return self.define_in(&block, target);
        }
        Err(undefined_word(word, target))
    }
}

#[cfg(test)]
mod tests;
