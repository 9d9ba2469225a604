use super::*;
use crate::{RuleTableBuilder, UnknownState};
use pretty_assertions::assert_eq;

use crate::Category::{Comment, Keyword, Number, Operator, Text};

fn lex(lexer: &Lexer, text: &str) -> Vec<(Category, String)> {
    lexer
        .tokenize(text)
        .map(|t| (t.category, t.text.to_string()))
        .collect()
}

fn tok(category: Category, text: &str) -> (Category, String) {
    (category, text.to_string())
}

// === Rule selection ===

#[test]
fn first_declared_rule_wins() {
    let mut b = RuleTableBuilder::new("root");
    b.state("root")
        .words(&["mov"], Keyword)
        .rule(r"[a-z]+", Text)
        .rule(r"movzx", Operator)
        .rule(" ", Text);
    let lexer = b.build().unwrap();

    // The generic word rule shadows the later, longer `movzx` rule.
    assert_eq!(
        lex(&lexer, "mov movzx"),
        vec![tok(Keyword, "mov"), tok(Text, " "), tok(Text, "movzx")]
    );
}

#[test]
fn match_must_start_at_current_offset() {
    let mut b = RuleTableBuilder::new("root");
    b.state("root").rule(r"b", Keyword);
    let lexer = b.build().unwrap();

    // `b` exists later in the input but must not be taken from offset 0.
    assert_eq!(
        lex(&lexer, "ab"),
        vec![tok(Text, "a"), tok(Keyword, "b")]
    );
}

#[test]
fn word_rule_respects_boundaries() {
    let mut b = RuleTableBuilder::new("root");
    b.state("root")
        .words(&["or"], Keyword)
        .rule(r"\w+", Text)
        .rule(" ", Text);
    let lexer = b.build().unwrap();

    assert_eq!(
        lex(&lexer, "orange or or_x"),
        vec![
            tok(Text, "orange"),
            tok(Text, " "),
            tok(Keyword, "or"),
            tok(Text, " "),
            tok(Text, "or_x"),
        ]
    );
}

// === Groups ===

#[test]
fn groups_emit_one_token_each() {
    let mut b = RuleTableBuilder::new("root");
    b.state("root")
        .groups(r"(\w+)(\.)(\w+)", &[Keyword, Operator, Text]);
    let lexer = b.build().unwrap();

    assert_eq!(
        lex(&lexer, "sym.main"),
        vec![tok(Keyword, "sym"), tok(Operator, "."), tok(Text, "main")]
    );
}

#[test]
fn text_outside_groups_is_kept_as_text() {
    let mut b = RuleTableBuilder::new("root");
    b.state("root").groups(r"<(\d+)>", &[Number]);
    let lexer = b.build().unwrap();

    assert_eq!(
        lex(&lexer, "<42>"),
        vec![tok(Text, "<"), tok(Number, "42"), tok(Text, ">")]
    );
}

#[test]
fn non_participating_group_is_skipped() {
    let mut b = RuleTableBuilder::new("root");
    b.state("root")
        .groups(r"(>)( *)(\w+)?(.*)", &[Operator, Text, Keyword, Text]);
    let lexer = b.build().unwrap();

    assert_eq!(
        lex(&lexer, "> !x"),
        vec![tok(Operator, ">"), tok(Text, " "), tok(Text, "!x")]
    );
}

// === Transitions ===

#[test]
fn push_and_pop() {
    let mut b = RuleTableBuilder::new("root");
    b.state("root")
        .push(";", Comment, "comment")
        .rule(r"\w+", Keyword)
        .rule(" ", Text);
    b.state("comment").pop(r"[^\n]+", Comment);
    let lexer = b.build().unwrap();

    let mut tokens = lexer.tokenize("nop ; hi\nret");
    let _ = tokens.by_ref().take(3).count();
    assert_eq!(tokens.state(), "comment");
    assert_eq!(tokens.depth(), 2);
    assert_eq!(tokens.next().map(|t| t.text), Some(" hi"));
    assert_eq!(tokens.state(), "root");
    assert_eq!(tokens.depth(), 1);
    let rest: Vec<_> = tokens.map(|t| (t.category, t.text)).collect();
    assert_eq!(rest, vec![(Text, "\n"), (Keyword, "ret")]);
}

#[test]
fn pop_on_root_is_a_no_op() {
    let mut b = RuleTableBuilder::new("root");
    b.state("root").pop("x", Keyword);
    let lexer = b.build().unwrap();

    let mut tokens = lexer.tokenize("xxx");
    while tokens.next().is_some() {
        assert_eq!(tokens.depth(), 1);
        assert_eq!(tokens.state(), "root");
    }
}

#[test]
fn unmatched_newline_resets_to_root() {
    let mut b = RuleTableBuilder::new("root");
    b.state("root").push("#", Comment, "line");
    b.state("line").push(r"[^\n]+", Comment, "line");
    let lexer = b.build().unwrap();

    let mut tokens = lexer.tokenize("#a\n#b");
    assert_eq!(tokens.by_ref().take(2).count(), 2);
    assert_eq!(tokens.depth(), 3);
    assert_eq!(tokens.next().map(|t| t.text), Some("\n"));
    assert_eq!(tokens.depth(), 1);
    assert_eq!(tokens.next().map(|t| (t.category, t.text)), Some((Comment, "#")));
}

#[test]
fn tokenize_in_starts_above_root() {
    let mut b = RuleTableBuilder::new("root");
    b.state("root").rule(r"\w+", Keyword);
    b.state("inner").pop(r"\w+", Number).rule(" ", Text);
    let lexer = b.build().unwrap();

    let tokens = lexer.tokenize_in("12 ab", "inner").unwrap();
    assert_eq!(tokens.state(), "inner");
    assert_eq!(tokens.depth(), 2);
    let got: Vec<_> = tokens.map(|t| (t.category, t.text)).collect();
    // After the pop, `ab` is scanned by root.
    assert_eq!(got, vec![(Number, "12"), (Text, " "), (Keyword, "ab")]);

    assert_eq!(
        lexer.tokenize_in("x", "nope").err(),
        Some(UnknownState("nope".into()))
    );
}

// === Line anchoring ===

#[test]
fn line_anchored_rules_only_fire_at_line_start() {
    let mut b = RuleTableBuilder::new("root");
    b.state("root")
        .rule(r"^\[", Keyword)
        .rule(r"\[", Operator)
        .rule(r"\n", Text);
    let lexer = b.build().unwrap();

    assert_eq!(
        lex(&lexer, "[[\n["),
        vec![
            tok(Keyword, "["),
            tok(Operator, "["),
            tok(Text, "\n"),
            tok(Keyword, "["),
        ]
    );
}

// === Progress ===

#[test]
fn zero_width_match_advances_one_char() {
    let mut b = RuleTableBuilder::new("root");
    b.state("root").rule(r"x*", Keyword);
    let lexer = b.build().unwrap();

    assert_eq!(
        lex(&lexer, "xxab"),
        vec![tok(Keyword, "xx"), tok(Text, "a"), tok(Text, "b")]
    );
}

#[test]
fn zero_width_match_still_applies_transition() {
    let mut b = RuleTableBuilder::new("root");
    b.state("root").push(r"\b", Keyword, "word");
    b.state("word").rule(r"\w+", Number);
    let lexer = b.build().unwrap();

    let got: Vec<_> = lexer.tokenize("ab").map(|t| (t.category, t.text)).collect();
    assert_eq!(got, vec![(Text, "a"), (Number, "b")]);
}

#[test]
fn fallback_consumes_whole_utf8_chars() {
    let mut b = RuleTableBuilder::new("root");
    b.state("root").rule("a", Keyword);
    let lexer = b.build().unwrap();

    assert_eq!(
        lex(&lexer, "│a└"),
        vec![tok(Text, "│"), tok(Keyword, "a"), tok(Text, "└")]
    );
}

#[test]
fn empty_input_yields_nothing() {
    let mut b = RuleTableBuilder::new("root");
    b.state("root").rule("a", Keyword);
    let lexer = b.build().unwrap();

    assert_eq!(lexer.tokenize("").count(), 0);
}

#[test]
fn iteration_is_lazy() {
    let mut b = RuleTableBuilder::new("root");
    b.state("root").rule(r"\w+", Keyword).rule(" ", Text);
    let lexer = b.build().unwrap();

    let text = "a ".repeat(10_000);
    let mut tokens = lexer.tokenize(&text);
    assert_eq!(tokens.next().map(|t| t.text), Some("a"));
    assert_eq!(tokens.offset(), 1);
}

// === Coalescing ===

#[test]
fn coalesced_merges_adjacent_same_category() {
    let mut b = RuleTableBuilder::new("root");
    b.state("root").rule(" ", Text).rule(r"\w+", Keyword);
    let lexer = b.build().unwrap();

    let got: Vec<_> = lexer
        .tokenize("a   b c")
        .coalesced()
        .map(|t| (t.category, t.text, t.offset))
        .collect();
    assert_eq!(
        got,
        vec![
            (Keyword, "a", 0),
            (Text, "   ", 1),
            (Keyword, "b", 4),
            (Text, " ", 5),
            (Keyword, "c", 6),
        ]
    );
}
