//! Semantic categories assigned to tokens.

use std::fmt;

/// Highlighting class of a token.
///
/// The set is deliberately small: renderers map each category to one
/// style, and the rule table picks the closest category for every
/// vocabulary class (registers are `Keyword`, data-movement mnemonics are
/// `Number`, control-transfer mnemonics are `Function`, and so on).
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Category {
    /// Plain, uncategorized text. Also used for whitespace and for any
    /// character no rule claims.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "text"))]
    Text,
    #[cfg_attr(feature = "serde", serde(rename = "string"))]
    String,
    /// Decimal number (and single hex digits in disassembly panes).
    #[cfg_attr(feature = "serde", serde(rename = "number"))]
    Number,
    #[cfg_attr(feature = "serde", serde(rename = "number.hex"))]
    NumberHex,
    #[cfg_attr(feature = "serde", serde(rename = "keyword"))]
    Keyword,
    #[cfg_attr(feature = "serde", serde(rename = "operator"))]
    Operator,
    #[cfg_attr(feature = "serde", serde(rename = "comment"))]
    Comment,
    /// Function or command name.
    #[cfg_attr(feature = "serde", serde(rename = "function"))]
    Function,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 8] = [
        Category::Text,
        Category::String,
        Category::Number,
        Category::NumberHex,
        Category::Keyword,
        Category::Operator,
        Category::Comment,
        Category::Function,
    ];

    /// Stable short name, e.g. `"number.hex"`.
    pub const fn name(self) -> &'static str {
        match self {
            Category::Text => "text",
            Category::String => "string",
            Category::Number => "number",
            Category::NumberHex => "number.hex",
            Category::Keyword => "keyword",
            Category::Operator => "operator",
            Category::Comment => "comment",
            Category::Function => "function",
        }
    }

    /// Parse a short name produced by [`name()`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}
