//! Atoms produced by the reader.

use std::fmt;
use std::rc::Rc;

/// A numeric literal.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{n}"),
            Number::Float(x) => write!(f, "{x:?}"),
        }
    }
}

/// One lexical unit of a Cat program.
#[derive(Clone, Debug, PartialEq)]
pub enum Atom {
    Number(Number),
    /// A quoted string literal (`"text"` or `'text`).
    Str(String),
    /// Anything that is neither a number nor a string: a word name, a
    /// qualified `ns:word`, an `ident.member` path or plain text.
    Word(String),
    Quotation(Quotation),
}

impl Atom {
    /// Convenience constructor for integer atoms.
    pub fn int(n: i64) -> Self {
        Atom::Number(Number::Int(n))
    }

    /// Convenience constructor for word atoms.
    pub fn word(name: impl Into<String>) -> Self {
        Atom::Word(name.into())
    }

    /// Convenience constructor for string atoms.
    pub fn string(text: impl Into<String>) -> Self {
        Atom::Str(text.into())
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Number(n) => write!(f, "{n}"),
            Atom::Str(s) => write!(f, "\"{s}\""),
            Atom::Word(w) => f.write_str(w),
            Atom::Quotation(q) => write!(f, "{q}"),
        }
    }
}

/// An unevaluated, shared list of atoms: the body of `[ ... ]` or of a
/// user-defined word.
#[derive(Clone, Debug, PartialEq)]
pub struct Quotation(Rc<[Atom]>);

impl Default for Quotation {
    fn default() -> Self {
        Quotation::new(Vec::new())
    }
}

impl Quotation {
    pub fn new(atoms: Vec<Atom>) -> Self {
        Quotation(atoms.into())
    }

    #[inline]
    pub fn atoms(&self) -> &[Atom] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Atom> {
        self.0.iter()
    }

    /// Whether both handles point at the same atom list.
    pub fn ptr_eq(&self, other: &Quotation) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Nested quotations are released iteratively, so dropping a deeply
/// nested tree does not recurse once per level.
impl Drop for Quotation {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach_children(&mut self.0, &mut pending);
        while let Some(mut q) = pending.pop() {
            detach_children(&mut q.0, &mut pending);
        }
    }
}

/// Move the non-empty child quotations out of `atoms` if this handle is
/// the last one, leaving empty quotations in their place.
fn detach_children(atoms: &mut Rc<[Atom]>, out: &mut Vec<Quotation>) {
    let Some(atoms) = Rc::get_mut(atoms) else {
        return;
    };
    for atom in atoms {
        if let Atom::Quotation(q) = atom {
            if !q.is_empty() {
                out.push(std::mem::take(q));
            }
        }
    }
}

impl From<Vec<Atom>> for Quotation {
    fn from(atoms: Vec<Atom>) -> Self {
        Quotation::new(atoms)
    }
}

impl<'a> IntoIterator for &'a Quotation {
    type Item = &'a Atom;
    type IntoIter = std::slice::Iter<'a, Atom>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Quotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, atom) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{atom}")?;
        }
        f.write_str("]")
    }
}
