//! Rule definitions: the uncompiled form of a lexer state.
//!
//! A state is declared as an ordered list of [`RuleDef`]s. Each entry is
//! either a pattern rule or an `include` of another state, which the
//! builder splices in place before the first scan. Patterns are plain
//! regular-expression source; compilation and validation happen in
//! [`RuleTableBuilder::build()`](crate::RuleTableBuilder::build).

use crate::Category;

/// What a matching rule emits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// One token spanning the whole match.
    Token(Category),
    /// One token per capture group, in group order.
    ///
    /// The list length must equal the pattern's number of explicit
    /// capture groups. Groups that do not participate in a match emit
    /// nothing; match text outside every group is emitted as
    /// [`Category::Text`].
    ByGroups(Vec<Category>),
}

/// State-stack effect of a matching rule.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Transition {
    #[default]
    None,
    /// Make the named state the new top of the stack.
    Push(String),
    /// Drop the top of the stack. A no-op when only one state remains.
    Pop,
}

/// One entry in a state's declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuleDef {
    Match {
        pattern: String,
        action: Action,
        transition: Transition,
    },
    /// Splice every rule of the named state here.
    Include(String),
}

impl RuleDef {
    /// Pattern rule with a single category and no transition.
    pub fn token(pattern: impl Into<String>, category: Category) -> Self {
        RuleDef::Match {
            pattern: pattern.into(),
            action: Action::Token(category),
            transition: Transition::None,
        }
    }

    /// Pattern rule emitting one token per capture group.
    pub fn groups(pattern: impl Into<String>, categories: &[Category]) -> Self {
        RuleDef::Match {
            pattern: pattern.into(),
            action: Action::ByGroups(categories.to_vec()),
            transition: Transition::None,
        }
    }

    /// Replace this rule's transition. Includes are returned unchanged.
    #[must_use]
    pub fn with_transition(self, transition: Transition) -> Self {
        match self {
            RuleDef::Match {
                pattern, action, ..
            } => RuleDef::Match {
                pattern,
                action,
                transition,
            },
            include @ RuleDef::Include(_) => include,
        }
    }
}

/// Build a pattern matching any of `words` as a whole word.
///
/// Each alternative is wrapped in `\b` on every side whose edge character
/// is a word character, so `or` never matches inside `orange` while
/// punctuation entries such as `[` or `fs:` still match literally.
/// Alternatives are ordered longest first, so no word is shadowed by one
/// of its own prefixes.
pub fn words_pattern<S: AsRef<str>>(words: &[S]) -> String {
    let mut sorted: Vec<&str> = words.iter().map(AsRef::as_ref).collect();
    sorted.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    sorted.dedup();

    let alternatives: Vec<String> = sorted.into_iter().map(bounded_word).collect();
    format!("(?:{})", alternatives.join("|"))
}

fn bounded_word(word: &str) -> String {
    let edge = |c: Option<char>| {
        if c.is_some_and(regex_syntax::is_word_character) {
            r"\b"
        } else {
            ""
        }
    };
    let lead = edge(word.chars().next());
    let trail = edge(word.chars().next_back());
    format!("{lead}{}{trail}", regex_syntax::escape(word))
}
