use super::*;
use pretty_assertions::assert_eq;

fn int(text: &str) -> Option<i64> {
    match intern_number(text) {
        Some(Number::Int(n)) => Some(n),
        _ => None,
    }
}

fn float(text: &str) -> Option<f64> {
    match intern_number(text) {
        Some(Number::Float(x)) => Some(x),
        _ => None,
    }
}

#[test]
fn test_decimal_and_signs() {
    assert_eq!(int("42"), Some(42));
    assert_eq!(int("0"), Some(0));
    assert_eq!(int("7"), Some(7));
    assert_eq!(int("-12"), Some(-12));
    assert_eq!(int("+12"), Some(12));
}

#[test]
fn test_prefixed_bases() {
    assert_eq!(int("0b1010"), Some(10));
    assert_eq!(int("0xff"), Some(255));
    assert_eq!(int("0XFF"), Some(255));
    assert_eq!(int("017"), Some(15));
    assert_eq!(int("-0x10"), Some(-16));
}

#[test]
fn test_arbitrary_radix() {
    assert_eq!(int("0(3)12"), Some(5));
    assert_eq!(int("0(11)2a"), Some(32));
    assert_eq!(int("0(36)z"), Some(35));
    assert_eq!(int("0(16)FF"), Some(255));
}

#[test]
fn test_hex_digit_e_stays_integer() {
    assert_eq!(int("0x1e"), Some(30));
}

#[test]
fn test_floats() {
    assert_eq!(float("-3.1415"), Some(-3.1415));
    assert_eq!(float("2.5"), Some(2.5));
    assert_eq!(float("1e3"), Some(1000.0));
    assert_eq!(float("0.5"), Some(0.5));
}

#[test]
fn test_integer_overflow_becomes_float() {
    assert_eq!(float("99999999999999999999"), Some(1e20));
}

#[test]
fn test_non_numbers() {
    for text in [
        "", "-", "+", "abc", "-abc", "1.2.3", "12abc", "0b102", "08", "0(1)0", "0(37)1", "0(3",
        "3e", "0x", "1-2", "+-1",
    ] {
        assert_eq!(intern_number(text), None, "{text:?}");
    }
}
