use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn ints(values: &[i64]) -> Vec<Value> {
    values.iter().copied().map(Value::Int).collect()
}

fn stack_of(values: &[i64]) -> ValueStack {
    ValueStack::from_values(ints(values))
}

#[test]
fn test_pop_on_empty_fails() {
    let mut stack = ValueStack::new();
    assert_eq!(
        stack.pop(),
        Err(StackError::Underflow {
            needed: 1,
            available: 0
        })
    );
}

#[test]
fn test_pop_n_top_first() {
    let mut stack = stack_of(&[1, 2, 3, 4]);
    let popped = stack.pop_n(3).map(|p| p.into_vec());
    assert_eq!(popped, Ok(ints(&[4, 3, 2])));
    assert_eq!(stack.as_slice(), ints(&[1]).as_slice());
}

#[test]
fn test_pop_n_underflow_leaves_stack() {
    let mut stack = stack_of(&[1, 2]);
    assert_eq!(
        stack.pop_n(3).map(|p| p.len()),
        Err(StackError::Underflow {
            needed: 3,
            available: 2
        })
    );
    assert_eq!(stack.len(), 2);
}

#[test]
fn test_pop2_and_pop3_order() {
    let mut stack = stack_of(&[1, 2, 3, 4, 5]);
    assert_eq!(stack.pop2(), Ok((Value::Int(5), Value::Int(4))));
    assert_eq!(
        stack.pop3(),
        Ok((Value::Int(3), Value::Int(2), Value::Int(1)))
    );
    assert!(stack.pop2().is_err());
}

#[test]
fn test_peek_at_depth() {
    let stack = stack_of(&[1, 2, 3]);
    assert_eq!(stack.peek(), Ok(&Value::Int(3)));
    assert_eq!(stack.peek_at(2), Ok(&Value::Int(1)));
    assert!(stack.peek_at(3).is_err());
}

#[test]
fn test_clear_to_retains_bottom() {
    let mut stack = stack_of(&[1, 2, 3, 4]);
    stack.clear_to(1);
    assert_eq!(stack.as_slice(), ints(&[1]).as_slice());
    stack.clear_to(5);
    assert_eq!(stack.len(), 1);
    stack.clear();
    assert!(stack.is_empty());
}

#[test]
fn test_reverse_and_remove_first() {
    let mut stack = stack_of(&[1, 2, 1, 3]);
    assert!(stack.remove_first(&Value::Int(1)));
    assert_eq!(stack.as_slice(), ints(&[2, 1, 3]).as_slice());
    assert!(!stack.remove_first(&Value::Int(9)));
    stack.reverse();
    assert_eq!(stack.as_slice(), ints(&[3, 1, 2]).as_slice());
}

#[test]
fn test_aux_stack() {
    let mut stack = ValueStack::new();
    stack.push_aux(Value::Int(1));
    stack.push_aux(Value::Int(2));
    assert_eq!(stack.aux_len(), 2);
    assert_eq!(stack.pop_aux_n(2).map(|p| p.into_vec()), Ok(ints(&[2, 1])));
    assert!(matches!(
        stack.pop_aux(),
        Err(StackError::AuxUnderflow { .. })
    ));
    assert!(stack.is_empty());
}

#[test]
fn test_snapshot_restore() {
    let mut stack = stack_of(&[1, 2]);
    let saved = stack.snapshot();
    stack.push(Value::Int(3));
    stack.restore(saved);
    assert_eq!(stack.as_slice(), ints(&[1, 2]).as_slice());
    assert_eq!(stack.take_all(), ints(&[1, 2]));
    assert!(stack.is_empty());
}

#[test]
fn test_display() {
    let mut stack = stack_of(&[1]);
    stack.push(Value::text("a"));
    assert_eq!(stack.to_string(), "[1, 'a']");
}

proptest! {
    #[test]
    fn prop_pop_n_reverses_pushes(
        base in proptest::collection::vec(any::<i64>(), 0..8),
        pushed in proptest::collection::vec(any::<i64>(), 0..8),
    ) {
        let mut stack = stack_of(&base);
        stack.push_multi(ints(&pushed));
        let popped = stack.pop_n(pushed.len()).map(|p| p.into_vec());
        let mut expected = ints(&pushed);
        expected.reverse();
        prop_assert_eq!(popped, Ok(expected));
        let base_values = ints(&base);
        prop_assert_eq!(stack.as_slice(), base_values.as_slice());
    }
}
