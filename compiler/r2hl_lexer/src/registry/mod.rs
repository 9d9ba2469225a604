//! Lexer registration metadata.
//!
//! Host highlighters look lexers up by name or short alias. That metadata
//! is static configuration and has nothing to do with scanning, so it
//! lives here rather than on [`Lexer`].

use rustc_hash::FxHashMap;

use crate::Lexer;

/// Identifying metadata a host uses to find a lexer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LexerInfo {
    /// Human-readable name.
    pub name: &'static str,
    /// Short lookup names.
    pub aliases: &'static [&'static str],
    /// File globs the lexer claims. radare2 output has no extension.
    pub filenames: &'static [&'static str],
}

/// Registration for the built-in radare2 lexer.
pub const RADARE2: LexerInfo = LexerInfo {
    name: "Radare2",
    aliases: &["r2", "radare2"],
    filenames: &[],
};

/// Name/alias → lexer lookup. Keys are matched case-insensitively.
#[derive(Default)]
pub struct Registry {
    entries: Vec<(LexerInfo, &'static Lexer)>,
    by_key: FxHashMap<String, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in lexers.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(RADARE2, crate::radare2());
        registry
    }

    /// Register `lexer` under its name and every alias. A later
    /// registration of the same key replaces the earlier one.
    pub fn register(&mut self, info: LexerInfo, lexer: &'static Lexer) {
        let index = self.entries.len();
        self.entries.push((info, lexer));
        for key in std::iter::once(info.name).chain(info.aliases.iter().copied()) {
            self.by_key.insert(key.to_ascii_lowercase(), index);
        }
    }

    /// Find a lexer by name or alias.
    pub fn get(&self, key: &str) -> Option<&'static Lexer> {
        self.info_and_lexer(key).map(|(_, lexer)| lexer)
    }

    /// Find a lexer's metadata by name or alias.
    pub fn info(&self, key: &str) -> Option<LexerInfo> {
        self.info_and_lexer(key).map(|(info, _)| info)
    }

    /// All registrations, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &LexerInfo> {
        self.entries.iter().map(|(info, _)| info)
    }

    fn info_and_lexer(&self, key: &str) -> Option<(LexerInfo, &'static Lexer)> {
        let index = *self.by_key.get(&key.to_ascii_lowercase())?;
        self.entries.get(index).copied()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests;
