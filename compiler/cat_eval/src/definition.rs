//! The `define` statement.
//!
//! ```text
//! define <name> [: (<effect>)] [{{ <description> }}] { <body> }
//! ```
//!
//! The description may declare prerequisite words with `deps: a,b,c`;
//! they are fetched before the word is installed. A name written `ns:name`
//! installs into `ns`, otherwise into the current user namespace.

use cat_ir::name::QualifiedName;
use cat_ir::Quotation;
use cat_lexer::tokenize;

use crate::errors::{malformed_definition, EvalResult};
use crate::interpreter::Interpreter;
use crate::namespace::{WordDef, STD};

const DEFAULT_EFFECT: &str = "none";
const DEFAULT_DESCRIPTION: &str = "none";

/// A parsed `define` statement.
#[derive(Clone, Debug, PartialEq)]
pub struct Definition {
    /// Name as written, possibly `ns:name`.
    pub name: String,
    pub effect: Option<String>,
    pub description: Option<String>,
    pub deps: Vec<String>,
    pub body: Quotation,
}

impl Definition {
    /// Documentation string stored with the word.
    pub fn doc(&self) -> String {
        let effect = match &self.effect {
            Some(effect) => format!("({effect})"),
            None => DEFAULT_EFFECT.to_string(),
        };
        let description = self.description.as_deref().unwrap_or(DEFAULT_DESCRIPTION);
        format!("  {} : {effect}\n\n{description}", self.name)
    }
}

/// Whether `text` starts a definition (`define` followed by whitespace).
pub fn is_definition(text: &str) -> bool {
    text.strip_prefix("define")
        .is_some_and(|rest| rest.starts_with(char::is_whitespace))
}

/// Split a definition into its name and the text after the name.
fn split_name(text: &str) -> Option<(&str, &str)> {
    let rest = text.trim_start().strip_prefix("define")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let rest = rest.trim_start();
    let mut end = rest
        .find(|c: char| c.is_whitespace() || c == '{')
        .unwrap_or(rest.len());
    // `define name: (effect)` with the colon glued to the name
    if end > 1 && rest[..end].ends_with(':') && rest[end..].trim_start().starts_with('(') {
        end -= 1;
    }
    if end == 0 {
        return None;
    }
    Some((&rest[..end], &rest[end..]))
}

/// Name of the word a definition block defines, without parsing the rest.
pub fn definition_name(text: &str) -> Option<&str> {
    split_name(text).map(|(name, _)| name)
}

/// Scan a description for `deps: a,b` declarations.
fn scan_deps(description: &str) -> Vec<String> {
    let mut deps = Vec::new();
    let mut rest = description;
    while let Some(idx) = rest.find("deps:") {
        let after = rest[idx + "deps:".len()..].trim_start();
        let list = after.split_whitespace().next().unwrap_or("");
        deps.extend(
            list.split(',')
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
        );
        rest = &after[list.len()..];
    }
    deps
}

/// Parse a `define` statement.
pub fn parse_definition(text: &str) -> EvalResult<Definition> {
    let Some((name, rest)) = split_name(text) else {
        return Err(malformed_definition("expected 'define <name>'"));
    };
    let mut rest = rest.trim_start();

    let mut effect = None;
    if let Some(after_colon) = rest.strip_prefix(':') {
        let after_colon = after_colon.trim_start();
        let Some(inner) = after_colon.strip_prefix('(') else {
            return Err(malformed_definition(format!(
                "{name}: stack effect must be written as ( ... )"
            )));
        };
        let Some(close) = matching_paren(inner) else {
            return Err(malformed_definition(format!(
                "{name}: unbalanced parentheses in stack effect"
            )));
        };
        effect = Some(inner[..close].trim().to_string());
        rest = inner[close + 1..].trim_start();
    }

    let mut description = None;
    if let Some(after) = rest.strip_prefix("{{") {
        let Some(close) = after.find("}}") else {
            return Err(malformed_definition(format!(
                "{name}: unterminated {{{{ description }}}}"
            )));
        };
        description = Some(after[..close].trim().to_string());
        rest = after[close + 2..].trim_start();
    }

    let Some(after_open) = rest.strip_prefix('{') else {
        return Err(malformed_definition(format!("{name}: missing {{ body }}")));
    };
    let Some(close) = after_open.find('}') else {
        return Err(malformed_definition(format!("{name}: unterminated {{ body }}")));
    };
    let trailing = after_open[close + 1..].trim();
    if !trailing.is_empty() {
        tracing::warn!(word = name, trailing, "ignoring text after definition body");
    }

    let deps = description.as_deref().map(scan_deps).unwrap_or_default();
    Ok(Definition {
        name: name.to_string(),
        effect,
        description,
        deps,
        body: Quotation::new(tokenize(&after_open[..close]).collect()),
    })
}

/// Byte index of the `)` closing an already-opened `(`.
fn matching_paren(text: &str) -> Option<usize> {
    let mut depth = 1usize;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

impl Interpreter {
    /// Compile a `define` statement into the current user namespace (or
    /// the namespace named by its qualifier).
    pub fn define(&mut self, text: &str) -> EvalResult {
        let target = self.namespaces.current_user().to_string();
        self.define_in(text, &target)
    }

    /// Compile a `define` statement, defaulting to namespace `default_ns`.
    #[tracing::instrument(level = "debug", skip_all, fields(ns = default_ns))]
    pub fn define_in(&mut self, text: &str, default_ns: &str) -> EvalResult {
        let def = parse_definition(text)?;
        let q = QualifiedName::parse(&def.name);
        let target = q.namespace.unwrap_or(default_ns).to_string();
        if !self.namespaces.contains(&target) {
            return Err(crate::namespace::NamespaceError::NotFound { name: target }.into());
        }

        for dep in &def.deps {
            if !self.is_available(dep, &target) {
                self.fetch(dep, &target)?;
            }
        }

        tracing::debug!(word = q.name, ns = %target, deps = def.deps.len(), "define");
        let doc = def.doc();
        self.namespaces
            .define_word(&target, q.name, WordDef::defined(def.body, doc, def.deps))?;
        Ok(())
    }

    /// Whether `word` resolves from `ns` or from the built-in scope.
    pub(crate) fn is_available(&self, word: &str, ns: &str) -> bool {
        [ns, STD]
            .into_iter()
            .any(|start| matches!(self.namespaces.resolve_word(word, start), Ok(Some(_))))
    }
}
