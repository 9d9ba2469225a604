//! Compiled rule table.
//!
//! A [`Lexer`] is the immutable output of
//! [`RuleTableBuilder::build()`](crate::RuleTableBuilder::build): every
//! state is a flat list of compiled rules (includes already spliced in),
//! and states are addressed by dense [`StateId`] indices so selecting the
//! active rule list is a single slice lookup.

use regex_automata::meta;
use rustc_hash::FxHashMap;

use crate::error::UnknownState;
use crate::rule::Action;
use crate::scanner::Tokens;

/// Index of a state within a [`Lexer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(pub(crate) usize);

impl StateId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Resolved state-stack effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Step {
    Stay,
    Push(StateId),
    Pop,
}

/// One rule, ready to run.
#[derive(Clone, Debug)]
pub(crate) struct CompiledRule {
    pub(crate) regex: meta::Regex,
    pub(crate) action: Action,
    pub(crate) step: Step,
    /// Every match of this rule begins at a line start.
    pub(crate) line_anchored: bool,
    /// Declaring state and declaration index, for tracing.
    pub(crate) origin: (StateId, usize),
}

#[derive(Clone, Debug)]
pub(crate) struct State {
    pub(crate) name: String,
    pub(crate) rules: Vec<CompiledRule>,
}

/// Immutable, shareable rule table.
///
/// Tokenizing borrows the table read-only, so one `Lexer` can serve any
/// number of threads at once.
#[derive(Clone, Debug)]
pub struct Lexer {
    pub(crate) states: Vec<State>,
    pub(crate) by_name: FxHashMap<String, StateId>,
    pub(crate) root: StateId,
}

impl Lexer {
    /// The state every scan starts in.
    pub fn root(&self) -> StateId {
        self.root
    }

    /// Look up a state by name.
    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.by_name.get(name).copied()
    }

    /// Name of a state.
    pub fn state_name(&self, id: StateId) -> &str {
        &self.states[id.0].name
    }

    /// State names in declaration order.
    pub fn state_names(&self) -> impl Iterator<Item = &str> {
        self.states.iter().map(|s| s.name.as_str())
    }

    /// Number of rules in a state after include flattening.
    pub fn rule_count(&self, id: StateId) -> usize {
        self.states[id.0].rules.len()
    }

    pub(crate) fn rules(&self, id: StateId) -> &[CompiledRule] {
        &self.states[id.0].rules
    }

    /// Tokenize `text` starting in the root state.
    pub fn tokenize<'a>(&'a self, text: &'a str) -> Tokens<'a> {
        Tokens::new(self, text, None)
    }

    /// Tokenize `text` with `state` pushed on top of the root state.
    ///
    /// Useful for highlighting a fragment already known to belong to one
    /// kind of output (a disassembly pane, a memory map). A pop from
    /// `state` returns to root.
    pub fn tokenize_in<'a>(
        &'a self,
        text: &'a str,
        state: &str,
    ) -> Result<Tokens<'a>, UnknownState> {
        let id = self
            .state_id(state)
            .ok_or_else(|| UnknownState(state.to_owned()))?;
        Ok(Tokens::new(self, text, Some(id)))
    }
}
