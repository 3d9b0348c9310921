//! Name syntax: `ns:word` qualifiers and `ident.member` paths.

/// Qualifier that addresses the built-in scope's own variable table.
pub const GLOBAL_QUALIFIER: &str = "global";

/// A word or variable name with an optional namespace qualifier.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct QualifiedName<'a> {
    pub namespace: Option<&'a str>,
    pub name: &'a str,
}

impl<'a> QualifiedName<'a> {
    /// Split `ns:name` at the first colon.
    ///
    /// Both sides must be non-empty, so `:`, `a:` and `:a` are plain names.
    pub fn parse(text: &'a str) -> Self {
        match text.split_once(':') {
            Some((ns, name)) if !ns.is_empty() && !name.is_empty() => QualifiedName {
                namespace: Some(ns),
                name,
            },
            _ => QualifiedName {
                namespace: None,
                name: text,
            },
        }
    }

    pub fn is_global(&self) -> bool {
        self.namespace == Some(GLOBAL_QUALIFIER)
    }
}

fn is_ident(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Split an `ident.member[.member...]` path into its head and the rest.
///
/// Returns `None` unless every dot-separated segment is an identifier.
pub fn member_path(text: &str) -> Option<(&str, &str)> {
    let (head, rest) = text.split_once('.')?;
    if is_ident(head) && rest.split('.').all(is_ident) {
        Some((head, rest))
    } else {
        None
    }
}

#[cfg(test)]
mod tests;
