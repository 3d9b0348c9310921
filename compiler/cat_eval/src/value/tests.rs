use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_truthiness() {
    assert!(!Value::Int(0).is_truthy());
    assert!(!Value::Float(0.0).is_truthy());
    assert!(!Value::text("").is_truthy());
    assert!(!Value::List(vec![]).is_truthy());
    assert!(!Value::Bool(false).is_truthy());
    assert!(Value::Int(-1).is_truthy());
    assert!(Value::text("0").is_truthy());
    assert!(Value::quotation(Quotation::default()).is_truthy());
}

#[test]
fn test_quotation_as_list() {
    let q = Quotation::new(vec![
        Atom::int(1),
        Atom::word("dup"),
        Atom::string("s"),
        Atom::Quotation(Quotation::new(vec![Atom::int(2)])),
    ]);
    let list = Value::quotation(q).into_list();
    assert_eq!(
        list,
        Some(vec![
            Value::Int(1),
            Value::text("dup"),
            Value::text("s"),
            Value::quotation(Quotation::new(vec![Atom::int(2)])),
        ])
    );
}

#[test]
fn test_scalars_are_not_lists() {
    assert_eq!(Value::Int(3).into_list(), None);
    assert!(!Value::text("abc").is_list_like());
}

#[test]
fn test_numeric_equality_crosses_types() {
    assert_eq!(Value::Int(2), Value::Float(2.0));
    assert_ne!(Value::Int(2), Value::text("2"));
}

#[test]
fn test_display() {
    let v = Value::List(vec![
        Value::text("a"),
        Value::Int(1),
        Value::Float(2.5),
        Value::List(vec![]),
    ]);
    assert_eq!(v.to_string(), "['a', 1, 2.5, []]");
    assert_eq!(Value::text("bare").to_string(), "bare");
    assert_eq!(Value::Bool(true).to_string(), "true");
}

#[test]
fn test_map_display_is_sorted() {
    let mut map = BTreeMap::new();
    map.insert("b".to_string(), Value::Int(2));
    map.insert("a".to_string(), Value::Int(1));
    assert_eq!(Value::Map(map).to_string(), "{'a': 1, 'b': 2}");
}

#[test]
fn test_callable_display() {
    let c = Callable::Constant(Rc::new(Value::Int(5)));
    assert_eq!(Value::Callable(c).to_string(), "[5 quote]");
}
