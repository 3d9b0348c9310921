use super::*;
use cat_ir::Number;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn atoms(src: &str) -> Vec<Atom> {
    tokenize(src).collect()
}

fn quote(atoms: Vec<Atom>) -> Atom {
    Atom::Quotation(Quotation::new(atoms))
}

// === Basic atoms ===

#[test]
fn test_words_and_numbers() {
    assert_eq!(
        atoms("3 5 +"),
        vec![Atom::int(3), Atom::int(5), Atom::word("+")]
    );
}

#[test]
fn test_all_whitespace_separates() {
    assert_eq!(
        atoms("1\t2\r\n3\n  dup"),
        vec![Atom::int(1), Atom::int(2), Atom::int(3), Atom::word("dup")]
    );
}

#[test]
fn test_empty_input() {
    assert!(atoms("").is_empty());
    assert!(atoms(" \t\n ").is_empty());
}

#[test]
fn test_float_atom() {
    assert_eq!(atoms("-3.1415"), vec![Atom::Number(Number::Float(-3.1415))]);
}

#[test]
fn test_qualified_word_is_one_atom() {
    assert_eq!(atoms("math:square"), vec![Atom::word("math:square")]);
}

// === Quotations ===

#[test]
fn test_nested_quotations() {
    assert_eq!(
        atoms("1 [2 3 [4]] 5"),
        vec![
            Atom::int(1),
            quote(vec![Atom::int(2), Atom::int(3), quote(vec![Atom::int(4)])]),
            Atom::int(5),
        ]
    );
}

#[test]
fn test_bracket_flushes_pending_word() {
    assert_eq!(
        atoms("dup[1]swap"),
        vec![Atom::word("dup"), quote(vec![Atom::int(1)]), Atom::word("swap")]
    );
}

#[test]
fn test_empty_quotation() {
    assert_eq!(atoms("[]"), vec![quote(vec![])]);
}

#[test]
fn test_unterminated_quotation_runs_to_end() {
    assert_eq!(
        atoms("[1 [2"),
        vec![quote(vec![Atom::int(1), quote(vec![Atom::int(2)])])]
    );
}

#[test]
fn test_stray_close_bracket_is_skipped() {
    assert_eq!(atoms("1 ] 2"), vec![Atom::int(1), Atom::int(2)]);
}

#[test]
fn test_brackets_inside_strings_are_text() {
    assert_eq!(
        atoms("[\"a]b\" 1]"),
        vec![quote(vec![Atom::string("a]b"), Atom::int(1)])]
    );
}

#[test]
fn test_sibling_quotations_after_nested_ones() {
    assert_eq!(
        atoms("[[1] [2 [3]] 4] 5"),
        vec![
            quote(vec![
                quote(vec![Atom::int(1)]),
                quote(vec![Atom::int(2), quote(vec![Atom::int(3)])]),
                Atom::int(4),
            ]),
            Atom::int(5),
        ]
    );
}

#[test]
fn test_constant_inside_quotation_stops_at_bracket() {
    assert_eq!(
        atoms("['a] 'b]"),
        vec![quote(vec![Atom::string("a")]), Atom::string("b]")]
    );
}

#[test]
fn test_deeply_nested_quotations() {
    let depth = 50_000;
    let src = format!("{}1{} 2", "[".repeat(depth), "]".repeat(depth));
    let read = atoms(&src);
    assert_eq!(read.len(), 2);
    assert_eq!(read[1], Atom::int(2));

    let mut levels = 0;
    let mut atom = &read[0];
    while let Atom::Quotation(q) = atom {
        assert_eq!(q.len(), 1);
        atom = &q.atoms()[0];
        levels += 1;
    }
    assert_eq!(levels, depth);
    assert_eq!(atom, &Atom::int(1));
}

// === Strings ===

#[test]
fn test_string_keeps_spaces_and_tabs() {
    assert_eq!(atoms("\"hello\t big world\""), vec![Atom::string("hello\t big world")]);
}

#[test]
fn test_empty_string() {
    assert_eq!(atoms("\"\" 1"), vec![Atom::string(""), Atom::int(1)]);
}

#[test]
fn test_escaped_quote_keeps_backslash() {
    assert_eq!(atoms(r#""say \"hi\"""#), vec![Atom::string(r#"say \"hi\""#)]);
}

#[test]
fn test_unterminated_string() {
    assert_eq!(atoms("\"abc def"), vec![Atom::string("abc def")]);
}

#[test]
fn test_numeric_text_in_string_stays_text() {
    assert_eq!(atoms("\"42\""), vec![Atom::string("42")]);
}

#[test]
fn test_string_constant() {
    assert_eq!(
        atoms("'a 'bc pair"),
        vec![Atom::string("a"), Atom::string("bc"), Atom::word("pair")]
    );
    assert_eq!(atoms("'"), vec![Atom::string("")]);
}

#[test]
fn test_apostrophe_inside_word() {
    assert_eq!(atoms("don't"), vec![Atom::word("don't")]);
}

#[test]
fn test_remaining_tracks_consumption() {
    let mut tokens = tokenize("1 2 3");
    tokens.next();
    assert_eq!(tokens.remaining(), " 2 3");
}

// === Properties ===

proptest! {
    #[test]
    fn prop_integers_read_back(n in any::<i64>()) {
        prop_assert_eq!(atoms(&n.to_string()), vec![Atom::int(n)]);
    }

    #[test]
    fn prop_word_count_matches_whitespace_split(words in proptest::collection::vec("[a-z+*-]{1,6}", 0..12)) {
        let src = words.join(" ");
        let read = atoms(&src);
        prop_assert_eq!(read.len(), words.len());
    }

    #[test]
    fn prop_reader_never_panics(src in "\\PC{0,64}") {
        let _ = atoms(&src);
    }
}
