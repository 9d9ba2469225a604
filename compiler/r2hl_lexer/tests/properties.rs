//! Property tests for the built-in radare2 table.
//!
//! Inputs are either arbitrary strings or lines stitched together from
//! console-output fragments, so every state gets exercised:
//! 1. Losslessness: token texts concatenate back to the input.
//! 2. Contiguity: every token starts where the previous one ended and is
//!    non-empty, which bounds the token count by the input length.
//! 3. Determinism: two scans of the same input agree.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::uninlined_format_args,
    reason = "Proptest macros generate code with these patterns"
)]

use proptest::prelude::*;
use r2hl_lexer::{radare2, tokenize, Token};

/// A line of plausible radare2 output.
fn console_line() -> impl Strategy<Value = String> {
    let fragment = proptest::sample::select(vec![
        "[0x00001000]> ",
        "pd 10",
        "sys ",
        "usr ",
        "4K ",
        "1.5M ",
        "r-x ",
        "0x00401000 ",
        "4889e5 ",
        "│ ",
        "┌ ",
        "└─> ",
        "`-> ",
        "mov eax, ebx ",
        "call sym.imp.puts ",
        "(fcn) main ",
        "(var) local_10h ",
        "; comment ",
        ";",
        "$ ",
        " -- ",
        "-> ",
        "orange ",
        "[rbp - 8] ",
        "\t",
    ]);
    proptest::collection::vec(fragment, 0..12).prop_map(|parts| parts.concat())
}

fn console_text() -> impl Strategy<Value = String> {
    proptest::collection::vec(console_line(), 0..6).prop_map(|lines| lines.join("\n"))
}

fn check_partition(text: &str, tokens: &[Token<'_>]) -> Result<(), TestCaseError> {
    let mut offset = 0;
    for token in tokens {
        prop_assert!(!token.text.is_empty(), "empty token at {}", token.offset);
        prop_assert_eq!(token.offset, offset);
        prop_assert_eq!(&text[token.span()], token.text);
        offset = token.end();
    }
    prop_assert_eq!(offset, text.len());
    prop_assert!(tokens.len() <= text.len());
    let rebuilt: String = tokens.iter().map(|t| t.text).collect();
    prop_assert_eq!(rebuilt.as_str(), text);
    Ok(())
}

proptest! {
    #[test]
    fn arbitrary_text_is_partitioned(text in any::<String>()) {
        let tokens: Vec<_> = tokenize(&text).collect();
        check_partition(&text, &tokens)?;
    }

    #[test]
    fn console_text_is_partitioned(text in console_text()) {
        let tokens: Vec<_> = tokenize(&text).collect();
        check_partition(&text, &tokens)?;
    }

    #[test]
    fn every_start_state_is_lossless(
        text in console_text(),
        state in proptest::sample::select(radare2().state_names().collect::<Vec<_>>()),
    ) {
        let tokens: Vec<_> = radare2().tokenize_in(&text, state).unwrap().collect();
        check_partition(&text, &tokens)?;
    }

    #[test]
    fn coalesced_is_lossless(text in console_text()) {
        let tokens: Vec<_> = tokenize(&text).coalesced().collect();
        check_partition(&text, &tokens)?;
        for pair in tokens.windows(2) {
            prop_assert_ne!(pair[0].category, pair[1].category);
        }
    }

    #[test]
    fn tokenization_is_deterministic(text in console_text()) {
        let first: Vec<_> = tokenize(&text).collect();
        let second: Vec<_> = tokenize(&text).collect();
        prop_assert_eq!(first, second);
    }
}

#[test]
fn shared_lexer_is_usable_across_threads() {
    let text = "[0x1000]> pd 2\n│ mov eax, 1 ; set\n";
    let expected: Vec<_> = tokenize(text).collect();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| tokenize(text).collect::<Vec<_>>()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
