//! Stateful tokenizer for radare2 console output.
//!
//! Classifies command prompts, disassembly listings, memory maps and
//! visual-mode panes into highlighting [`Category`]s. The lexer is a
//! table of named states, each an ordered list of regex rules; rules may
//! push or pop states or split one match into several tokens.
//!
//! # Architecture
//!
//! - [`RuleTableBuilder`] declares states and compiles them into a
//!   [`Lexer`], flattening `include`s and rejecting dangling state
//!   references up front.
//! - [`Lexer::tokenize()`] returns a lazy [`Tokens`] iterator that owns
//!   the state stack. Token texts always concatenate back to the input.
//! - [`radare2`](mod@radare2) holds the built-in rule table;
//!   [`registry`] holds name/alias metadata for host highlighters.
//!
//! This crate has no CLI or rendering dependencies.
//!
//! # Tracing
//!
//! Table construction logs at `debug`, state transitions at `trace`
//! (`RUST_LOG=r2hl_lexer=trace`).

mod builder;
mod category;
mod error;
pub mod radare2;
pub mod registry;
mod rule;
mod scanner;
mod table;
mod token;

use std::sync::LazyLock;

pub use builder::{RuleTableBuilder, StateBuilder};
pub use category::Category;
pub use error::{BuildError, Reference, UnknownState};
pub use rule::{words_pattern, Action, RuleDef, Transition};
pub use scanner::Tokens;
pub use table::{Lexer, StateId};
pub use token::{coalesce, Coalesced, Token};

#[allow(
    clippy::expect_used,
    reason = "static table; `radare2::tests::table_builds` covers every state"
)]
static RADARE2: LazyLock<Lexer> =
    LazyLock::new(|| radare2::lexer().expect("built-in radare2 rule table is well-formed"));

/// The built-in radare2 lexer, built on first use.
pub fn radare2() -> &'static Lexer {
    &RADARE2
}

/// Tokenize radare2 console output with the built-in table.
///
/// ```
/// use r2hl_lexer::{tokenize, Category};
///
/// let tokens: Vec<_> = tokenize("[0x1000]> pd 10").collect();
/// assert_eq!(tokens[1].text, "0x1000");
/// assert_eq!(tokens[1].category, Category::NumberHex);
/// assert_eq!(tokens[5].text, "pd");
/// assert_eq!(tokens[5].category, Category::Function);
/// ```
pub fn tokenize(text: &str) -> Tokens<'_> {
    radare2().tokenize(text)
}
