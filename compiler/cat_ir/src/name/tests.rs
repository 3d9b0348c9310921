use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_qualified_split() {
    let q = QualifiedName::parse("math:square");
    assert_eq!(q.namespace, Some("math"));
    assert_eq!(q.name, "square");
    assert!(!q.is_global());
}

#[test]
fn test_unqualified_forms() {
    for text in ["square", ":", "a:", ":a"] {
        let q = QualifiedName::parse(text);
        assert_eq!(q.namespace, None, "{text}");
        assert_eq!(q.name, text);
    }
}

#[test]
fn test_global_qualifier() {
    assert!(QualifiedName::parse("global:x").is_global());
}

#[test]
fn test_member_path() {
    assert_eq!(member_path("math.sqrt"), Some(("math", "sqrt")));
    assert_eq!(member_path("obj.inner.call"), Some(("obj", "inner.call")));
    assert_eq!(member_path("1.5"), None);
    assert_eq!(member_path("..."), None);
    assert_eq!(member_path("a."), None);
    assert_eq!(member_path("plain"), None);
}
