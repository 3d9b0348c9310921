//! The atom iterator.
//!
//! Delimiters are all ASCII, so the reader scans bytes and slices the source
//! only at delimiter positions, which are always char boundaries.

use cat_ir::{Atom, Quotation};

use crate::intern_number;

#[inline]
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

#[inline]
fn is_delimiter(b: u8) -> bool {
    is_space(b) || matches!(b, b'[' | b']' | b'"')
}

/// Index of the `"` closing a literal whose text starts at `from`, or the
/// end of input when the literal is unterminated.
///
/// A quote directly preceded by a backslash inside the literal does not
/// close it; both characters stay in the text. `""` is the empty string.
fn closing_quote(bytes: &[u8], from: usize) -> usize {
    let mut i = from;
    while i < bytes.len() {
        if bytes[i] == b'"' && !(i > from && bytes[i - 1] == b'\\') {
            return i;
        }
        i += 1;
    }
    bytes.len()
}

/// Index of the `]` matching a `[` whose body starts at `from`, or the end
/// of input when the bracket is unterminated. Brackets inside string
/// literals are not counted.
fn matching_bracket(bytes: &[u8], from: usize) -> usize {
    let mut depth = 1usize;
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b'"' => i = closing_quote(bytes, i + 1),
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return i;
                }
            }
            _ => {}
        }
        i += 1;
    }
    bytes.len()
}

/// Lazy iterator over the atoms of a source string.
///
/// Single pass, finite, and not restartable: call [`tokenize`] again to
/// read the same text twice.
#[derive(Clone, Debug)]
pub struct Tokens<'src> {
    src: &'src str,
    pos: usize,
}

/// Read `src` as a sequence of atoms.
pub fn tokenize(src: &str) -> Tokens<'_> {
    Tokens { src, pos: 0 }
}

impl<'src> Tokens<'src> {
    /// The source text not yet consumed.
    pub fn remaining(&self) -> &'src str {
        &self.src[self.pos.min(self.src.len())..]
    }

    fn bytes(&self) -> &'src [u8] {
        self.src.as_bytes()
    }

    /// Read a `[ ... ]` quotation and everything nested in it.
    ///
    /// Nesting is tracked with an explicit stack of open frames, so depth
    /// costs heap, not native stack.
    fn quotation(&mut self) -> Atom {
        let bytes = self.bytes();
        let pairs = bracket_pairs(bytes, self.pos);
        let mut current = Frame {
            atoms: Vec::new(),
            end: closing_bracket(bytes, &pairs, self.pos, bytes.len()),
        };
        let mut parents: Vec<Frame> = Vec::new();
        self.pos += 1;

        loop {
            while self.pos < current.end && is_space(bytes[self.pos]) {
                self.pos += 1;
            }
            if self.pos >= current.end {
                let end = current.end;
                let done = Atom::Quotation(Quotation::new(current.atoms));
                match parents.pop() {
                    Some(mut parent) => {
                        self.pos = (end + 1).min(parent.end);
                        parent.atoms.push(done);
                        current = parent;
                        continue;
                    }
                    None => {
                        self.pos = (end + 1).min(bytes.len());
                        return done;
                    }
                }
            }
            let atom = match bytes[self.pos] {
                b'[' => {
                    let end = closing_bracket(bytes, &pairs, self.pos, current.end);
                    parents.push(std::mem::replace(
                        &mut current,
                        Frame {
                            atoms: Vec::new(),
                            end,
                        },
                    ));
                    self.pos += 1;
                    continue;
                }
                b']' => {
                    self.pos += 1;
                    continue;
                }
                b'"' => self.string_literal(current.end),
                b'\'' => self.string_constant(current.end),
                _ => self.bare(current.end),
            };
            current.atoms.push(atom);
        }
    }

    fn string_literal(&mut self, limit: usize) -> Atom {
        let start = self.pos + 1;
        let end = closing_quote(&self.bytes()[..limit], start);
        let text = &self.src[start..end];
        self.pos = (end + 1).min(limit);
        Atom::Str(text.to_owned())
    }

    /// `'word`: a string constant running to the next whitespace.
    fn string_constant(&mut self, limit: usize) -> Atom {
        let start = self.pos + 1;
        let end = self.scan_until(start, limit, is_space);
        self.pos = end;
        Atom::Str(self.src[start..end].to_owned())
    }

    fn bare(&mut self, limit: usize) -> Atom {
        let start = self.pos;
        let end = self.scan_until(start, limit, is_delimiter);
        self.pos = end;
        let text = &self.src[start..end];
        match intern_number(text) {
            Some(n) => Atom::Number(n),
            None => Atom::Word(text.to_owned()),
        }
    }

    fn scan_until(&self, from: usize, limit: usize, stop: fn(u8) -> bool) -> usize {
        self.bytes()[from..limit]
            .iter()
            .position(|&b| stop(b))
            .map_or(limit, |offset| from + offset)
    }
}

/// A quotation still being read: its atoms so far and the index of its
/// closing bracket.
struct Frame {
    atoms: Vec<Atom>,
    end: usize,
}

/// `(open, close)` for every bracket in the quotation opened at `open`,
/// sorted by `open`. One linear pass; unterminated brackets close at the
/// end of input.
fn bracket_pairs(bytes: &[u8], open: usize) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    let mut stack = vec![open];
    let mut i = open + 1;
    while i < bytes.len() && !stack.is_empty() {
        match bytes[i] {
            b'"' => i = closing_quote(bytes, i + 1),
            b'[' => stack.push(i),
            b']' => {
                if let Some(o) = stack.pop() {
                    pairs.push((o, i));
                }
            }
            _ => {}
        }
        i += 1;
    }
    pairs.extend(stack.into_iter().map(|o| (o, bytes.len())));
    pairs.sort_unstable();
    pairs
}

/// Closing index for the bracket at `open`, never past `limit`.
///
/// A bracket the pair scan did not see as one (inside a `'word`
/// constant, say) falls back to a direct scan of the enclosing body.
fn closing_bracket(bytes: &[u8], pairs: &[(usize, usize)], open: usize, limit: usize) -> usize {
    let close = match pairs.binary_search_by_key(&open, |&(o, _)| o) {
        Ok(i) => pairs[i].1,
        Err(_) => matching_bracket(&bytes[..limit], open + 1),
    };
    close.min(limit)
}

impl Iterator for Tokens<'_> {
    type Item = Atom;

    fn next(&mut self) -> Option<Atom> {
        let bytes = self.bytes();
        loop {
            while self.pos < bytes.len() && is_space(bytes[self.pos]) {
                self.pos += 1;
            }
            let &b = bytes.get(self.pos)?;
            return Some(match b {
                b'[' => self.quotation(),
                b']' => {
                    // stray closer
                    self.pos += 1;
                    continue;
                }
                b'"' => self.string_literal(bytes.len()),
                b'\'' => self.string_constant(bytes.len()),
                _ => self.bare(bytes.len()),
            });
        }
    }
}

#[cfg(test)]
mod tests;
