//! Token type and the category-merging adaptor.

use std::iter::Peekable;
use std::ops::Range;

use crate::Category;

/// A classified slice of the input.
///
/// `text` borrows from the tokenized input and `offset` is its byte
/// position there, so `&input[token.span()] == token.text`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Token<'a> {
    pub category: Category,
    pub text: &'a str,
    pub offset: usize,
}

impl<'a> Token<'a> {
    pub fn new(category: Category, text: &'a str, offset: usize) -> Self {
        Token {
            category,
            text,
            offset,
        }
    }

    /// Byte offset one past the token's last byte.
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }

    pub fn span(&self) -> Range<usize> {
        self.offset..self.end()
    }
}

/// Merges runs of adjacent same-category tokens into one token.
///
/// Created by [`Tokens::coalesced()`](crate::Tokens::coalesced) or
/// [`coalesce()`]. The concatenated text is unchanged; only token
/// boundaries inside a run disappear.
pub struct Coalesced<'a, I: Iterator<Item = Token<'a>>> {
    source: &'a str,
    inner: Peekable<I>,
}

/// Merge adjacent same-category tokens produced from `source`.
pub fn coalesce<'a, I>(source: &'a str, tokens: I) -> Coalesced<'a, I::IntoIter>
where
    I: IntoIterator<Item = Token<'a>>,
{
    Coalesced {
        source,
        inner: tokens.into_iter().peekable(),
    }
}

impl<'a, I: Iterator<Item = Token<'a>>> Iterator for Coalesced<'a, I> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let first = self.inner.next()?;
        let mut end = first.end();
        while let Some(next) = self
            .inner
            .next_if(|t| t.category == first.category && t.offset == end)
        {
            end = next.end();
        }
        Some(Token::new(
            first.category,
            &self.source[first.offset..end],
            first.offset,
        ))
    }
}
