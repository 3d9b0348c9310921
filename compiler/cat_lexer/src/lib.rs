//! Cat Lexer - turns source text into a lazy stream of atoms.
//!
//! The reader has no knowledge of namespaces or words. It only knows about
//! whitespace, `[ ... ]` quotations, `"..."` literals, `'word` string
//! constants, and numeric literals in several bases. Everything else is a
//! word atom.
//!
//! # Usage
//!
//! ```
//! use cat_ir::Atom;
//! use cat_lexer::tokenize;
//!
//! let atoms: Vec<Atom> = tokenize("3 5 +").collect();
//! assert_eq!(atoms, vec![Atom::int(3), Atom::int(5), Atom::word("+")]);
//! ```

mod number;
mod tokens;

pub use number::intern_number;
pub use tokens::{tokenize, Tokens};
