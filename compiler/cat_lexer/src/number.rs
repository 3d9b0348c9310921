//! Numeric literal interning.
//!
//! Supported forms, after an optional `+`/`-` sign that must be followed by
//! a digit:
//!
//! | form          | example    | value |
//! |---------------|------------|-------|
//! | decimal       | `42`       | 42    |
//! | binary        | `0b1010`   | 10    |
//! | hexadecimal   | `0xff`     | 255   |
//! | octal         | `017`      | 15    |
//! | any radix     | `0(11)2a`  | 32    |
//! | float         | `-3.1415`  | -3.1415 |
//!
//! A literal is a float when it has exactly one `.` or exactly one `e`/`E`,
//! unless a `0x`/`0b`/`0(` prefix already selected an integer base.

use cat_ir::Number;

fn digits_in_radix(digits: &str, radix: u32) -> Option<i64> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return None;
    }
    i64::from_str_radix(digits, radix).ok()
}

/// `(base)digits`, the part after the leading `0` of a radix literal.
fn radix_literal(rest: &str) -> Option<i64> {
    let rest = rest.strip_prefix('(')?;
    let (base, digits) = rest.split_once(')')?;
    let base: u32 = base.parse().ok()?;
    if !(2..=36).contains(&base) {
        return None;
    }
    digits_in_radix(&digits.to_ascii_lowercase(), base)
}

fn unsigned(value: &str) -> Option<Number> {
    if let Some(bin) = value.strip_prefix("0b") {
        return digits_in_radix(bin, 2).map(Number::Int);
    }
    if let Some(hex) = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        return digits_in_radix(hex, 16).map(Number::Int);
    }
    if let Some(rest) = value.strip_prefix('0') {
        if rest.starts_with('(') {
            return radix_literal(rest).map(Number::Int);
        }
    }

    let lower = value.to_ascii_lowercase();
    if value.matches('.').count() == 1 || lower.matches('e').count() == 1 {
        if !value.bytes().all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-')) {
            return None;
        }
        return value.parse::<f64>().ok().map(Number::Float);
    }

    if value.len() > 1 && value.starts_with('0') {
        return digits_in_radix(&value[1..], 8).map(Number::Int);
    }
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Out of i64 range: keep the magnitude as a float rather than a word.
    match value.parse::<i64>() {
        Ok(n) => Some(Number::Int(n)),
        Err(_) => value.parse::<f64>().ok().map(Number::Float),
    }
}

/// Convert the text of an atom to a number, if it is one.
///
/// Returns `None` for anything that does not start with a digit (after an
/// optional sign) or does not parse in its selected base; the caller keeps
/// such text as a word.
pub fn intern_number(text: &str) -> Option<Number> {
    let (negative, value) = match text.as_bytes() {
        [b'-', d, ..] if d.is_ascii_digit() => (true, &text[1..]),
        [b'+', d, ..] if d.is_ascii_digit() => (false, &text[1..]),
        [d, ..] if d.is_ascii_digit() => (false, text),
        _ => return None,
    };

    // Plain decimal, parsed with its sign so i64::MIN round-trips.
    if value.len() == 1 || !value.starts_with('0') {
        if let Ok(n) = text.parse::<i64>() {
            return Some(Number::Int(n));
        }
    }

    let number = unsigned(value)?;
    if !negative {
        return Some(number);
    }
    match number {
        Number::Int(n) => n.checked_neg().map(Number::Int),
        Number::Float(x) => Some(Number::Float(-x)),
    }
}

#[cfg(test)]
mod tests;
