//! The scanning loop.
//!
//! [`Tokens`] walks the input left to right. At each offset it tries the
//! rules of the state on top of the stack in declaration order and takes
//! the first one whose match starts exactly at the offset. Matches are
//! anchored searches over the whole input, so `^`, `$` and `\b` see the
//! surrounding text rather than a truncated slice.
//!
//! # Progress
//!
//! Every step consumes at least one character:
//! - a non-empty match consumes itself;
//! - an empty match, or no match at all, consumes the next character as
//!   a single [`Category::Text`] token.
//!
//! # Line reset
//!
//! An unmatched `\n` drops the stack back to the root state. Console
//! output is line oriented, and most line states simply stop matching at
//! the end of their line; the reset dispatches the next line afresh.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use regex_automata::{Anchored, Input};
use smallvec::{smallvec, SmallVec};
use tracing::trace;

use crate::rule::Action;
use crate::table::{CompiledRule, Lexer, StateId, Step};
use crate::token::{coalesce, Coalesced, Token};
use crate::Category;

/// Lazy token stream over one input. Created by [`Lexer::tokenize()`].
///
/// Owns its state stack; the lexer is only read. Dropping the iterator
/// early costs nothing further.
pub struct Tokens<'a> {
    lexer: &'a Lexer,
    text: &'a str,
    pos: usize,
    /// Never empty; `stack[0]` is always the root state.
    stack: SmallVec<[StateId; 8]>,
    /// Tokens produced by the last step but not yet yielded.
    pending: VecDeque<Token<'a>>,
}

impl<'a> Tokens<'a> {
    pub(crate) fn new(lexer: &'a Lexer, text: &'a str, start: Option<StateId>) -> Self {
        let mut stack: SmallVec<[StateId; 8]> = smallvec![lexer.root()];
        stack.extend(start);
        Tokens {
            lexer,
            text,
            pos: 0,
            stack,
            pending: VecDeque::new(),
        }
    }

    /// Name of the state on top of the stack.
    pub fn state(&self) -> &'a str {
        self.lexer.state_name(self.top())
    }

    /// Number of states on the stack (at least 1).
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Byte offset the scanner has reached. Tokens already scanned but
    /// not yet yielded lie before this offset.
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Merge adjacent tokens of the same category.
    pub fn coalesced(self) -> Coalesced<'a, Self> {
        coalesce(self.text, self)
    }

    fn top(&self) -> StateId {
        self.stack.last().copied().unwrap_or(self.lexer.root())
    }

    fn at_line_start(&self) -> bool {
        self.pos == 0 || self.text.as_bytes()[self.pos - 1] == b'\n'
    }

    /// Run one scan step, queueing at least one token.
    fn step(&mut self) {
        let lexer = self.lexer;
        let state = self.top();
        let line_start = self.at_line_start();
        let input = Input::new(self.text)
            .range(self.pos..)
            .anchored(Anchored::Yes);

        for rule in lexer.rules(state) {
            if rule.line_anchored && !line_start {
                continue;
            }
            let Some(m) = rule.regex.search(&input) else {
                continue;
            };

            if m.is_empty() {
                self.emit_char();
            } else {
                self.emit_match(rule, &input, m.end());
                self.pos = m.end();
            }
            self.apply(rule);
            return;
        }

        let newline = self.text.as_bytes()[self.pos] == b'\n';
        self.emit_char();
        if newline && self.stack.len() > 1 {
            trace!(from = self.state(), "line reset");
            self.stack.truncate(1);
        }
    }

    fn emit_char(&mut self) {
        let len = self.text[self.pos..].chars().next().map_or(1, char::len_utf8);
        self.queue(Category::Text, self.pos, self.pos + len);
        self.pos += len;
    }

    fn emit_match(&mut self, rule: &CompiledRule, input: &Input<'_>, end: usize) {
        let start = self.pos;
        let categories = match &rule.action {
            Action::Token(category) => {
                self.queue(*category, start, end);
                return;
            }
            Action::ByGroups(categories) => categories,
        };

        let mut caps = rule.regex.create_captures();
        rule.regex.search_captures(input, &mut caps);
        if !caps.is_match() {
            self.queue(Category::Text, start, end);
            return;
        }

        // Text between or around groups is emitted as plain text; nested
        // groups overlapping an earlier one are skipped.
        let mut cursor = start;
        for (group, &category) in categories.iter().enumerate() {
            let Some(span) = caps.get_group(group + 1) else {
                continue;
            };
            if span.is_empty() || span.start < cursor {
                continue;
            }
            if span.start > cursor {
                self.queue(Category::Text, cursor, span.start);
            }
            self.queue(category, span.start, span.end);
            cursor = span.end;
        }
        if cursor < end {
            self.queue(Category::Text, cursor, end);
        }
    }

    fn apply(&mut self, rule: &CompiledRule) {
        match rule.step {
            Step::Stay => {}
            Step::Push(id) => {
                trace!(
                    from = self.state(),
                    to = self.lexer.state_name(id),
                    rule = rule.origin.1,
                    "push"
                );
                self.stack.push(id);
            }
            Step::Pop => {
                if self.stack.len() > 1 {
                    trace!(from = self.state(), rule = rule.origin.1, "pop");
                    self.stack.pop();
                }
            }
        }
    }

    fn queue(&mut self, category: Category, start: usize, end: usize) {
        self.pending
            .push_back(Token::new(category, &self.text[start..end], start));
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(token);
            }
            if self.pos >= self.text.len() {
                return None;
            }
            self.step();
        }
    }
}

impl FusedIterator for Tokens<'_> {}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests;
