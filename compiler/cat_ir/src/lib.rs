//! Cat IR - the atom model shared by the reader and the evaluator.
//!
//! - [`Atom`]: one lexical unit (number, string literal, word, quotation)
//! - [`Number`]: integer or float literal
//! - [`Quotation`]: shared, immutable list of atoms
//! - [`name`]: helpers for `ns:word` qualifiers and `ident.member` paths
//!
//! Atoms are immutable once produced. Quotations are reference counted, so
//! pushing a quotation onto the stack or reusing a word body never copies
//! the atom list.

mod atom;
pub mod name;

pub use atom::{Atom, Number, Quotation};
