//! Rule table builder.
//!
//! Collects state declarations, then [`build()`](RuleTableBuilder::build)
//! validates and compiles them in one pass:
//!
//! 1. State names are unique and the root state exists.
//! 2. Every `include` and `push` target names a declared state.
//! 3. Every pattern compiles, and per-group actions list exactly one
//!    category per capture group.
//! 4. Includes are flattened: the included state's rules (recursively
//!    expanded) are copied in at the point of the include. Cycles are
//!    rejected.
//!
//! Nothing is resolved lazily. A table that builds can scan any input.

use regex_automata::meta;
use regex_automata::util::syntax;
use regex_syntax::hir::Look;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::{BuildError, Reference};
use crate::rule::{words_pattern, Action, RuleDef, Transition};
use crate::table::{CompiledRule, Lexer, State, StateId, Step};
use crate::Category;

/// Declares states, then compiles them into a [`Lexer`].
///
/// ```
/// use r2hl_lexer::{Category, RuleTableBuilder};
///
/// let mut builder = RuleTableBuilder::new("root");
/// builder
///     .state("root")
///     .push(";", Category::Comment, "comment")
///     .rule(r"\w+", Category::Text);
/// builder.state("comment").pop(".+$", Category::Comment);
///
/// let lexer = builder.build().unwrap();
/// assert_eq!(lexer.tokenize("mov ; x").count(), 4);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RuleTableBuilder {
    root: String,
    states: Vec<(String, Vec<RuleDef>)>,
}

/// Appends rules to one state. Returned by [`RuleTableBuilder::state()`].
pub struct StateBuilder<'b> {
    rules: &'b mut Vec<RuleDef>,
}

impl StateBuilder<'_> {
    /// Append an arbitrary rule definition.
    pub fn def(&mut self, rule: RuleDef) -> &mut Self {
        self.rules.push(rule);
        self
    }

    /// Pattern emitting one token of `category`.
    pub fn rule(&mut self, pattern: &str, category: Category) -> &mut Self {
        self.def(RuleDef::token(pattern, category))
    }

    /// Pattern emitting one token per capture group.
    pub fn groups(&mut self, pattern: &str, categories: &[Category]) -> &mut Self {
        self.def(RuleDef::groups(pattern, categories))
    }

    /// Pattern emitting one token, then pushing `state`.
    pub fn push(&mut self, pattern: &str, category: Category, state: &str) -> &mut Self {
        self.def(RuleDef::token(pattern, category).with_transition(Transition::Push(state.into())))
    }

    /// Pattern emitting one token, then popping the current state.
    pub fn pop(&mut self, pattern: &str, category: Category) -> &mut Self {
        self.def(RuleDef::token(pattern, category).with_transition(Transition::Pop))
    }

    /// Whole-word match against a fixed vocabulary. See [`words_pattern`].
    pub fn words(&mut self, words: &[&str], category: Category) -> &mut Self {
        self.def(RuleDef::token(words_pattern(words), category))
    }

    /// Splice in every rule of `state` at this position.
    pub fn include(&mut self, state: &str) -> &mut Self {
        self.def(RuleDef::Include(state.into()))
    }
}

impl RuleTableBuilder {
    /// Start a table whose scans begin in the state named `root`.
    pub fn new(root: impl Into<String>) -> Self {
        RuleTableBuilder {
            root: root.into(),
            states: Vec::new(),
        }
    }

    /// Declare a new state and return a builder for its rules.
    pub fn state(&mut self, name: impl Into<String>) -> StateBuilder<'_> {
        self.states.push((name.into(), Vec::new()));
        let last = self.states.len() - 1;
        StateBuilder {
            rules: &mut self.states[last].1,
        }
    }

    /// Validate, compile, and flatten the declared states.
    pub fn build(&self) -> Result<Lexer, BuildError> {
        let by_name = self.index_states()?;
        let root = *by_name
            .get(self.root.as_str())
            .ok_or_else(|| BuildError::MissingRoot(self.root.clone()))?;

        self.check_targets(&by_name)?;
        let compiled = self.compile_rules(&by_name)?;

        let mut states = Vec::with_capacity(self.states.len());
        for (idx, (name, _)) in self.states.iter().enumerate() {
            let mut rules = Vec::new();
            let mut visiting = Vec::new();
            self.flatten(idx, &by_name, &compiled, &mut visiting, &mut rules)?;
            states.push(State {
                name: name.clone(),
                rules,
            });
        }

        let rule_total: usize = states.iter().map(|s| s.rules.len()).sum();
        debug!(
            root = %self.root,
            states = states.len(),
            rules = rule_total,
            "rule table built"
        );

        Ok(Lexer {
            states,
            by_name,
            root,
        })
    }

    fn index_states(&self) -> Result<FxHashMap<String, StateId>, BuildError> {
        let mut by_name = FxHashMap::default();
        for (idx, (name, _)) in self.states.iter().enumerate() {
            if by_name.insert(name.clone(), StateId(idx)).is_some() {
                return Err(BuildError::DuplicateState(name.clone()));
            }
        }
        Ok(by_name)
    }

    fn check_targets(&self, by_name: &FxHashMap<String, StateId>) -> Result<(), BuildError> {
        for (name, defs) in &self.states {
            for (index, def) in defs.iter().enumerate() {
                let (target, reference) = match def {
                    RuleDef::Include(target) => (target, Reference::Include),
                    RuleDef::Match {
                        transition: Transition::Push(target),
                        ..
                    } => (target, Reference::Push),
                    RuleDef::Match { .. } => continue,
                };
                if !by_name.contains_key(target.as_str()) {
                    return Err(BuildError::UnknownState {
                        state: name.clone(),
                        index,
                        target: target.clone(),
                        reference,
                    });
                }
            }
        }
        Ok(())
    }

    /// Compile every pattern rule once, indexed `[state][declaration]`.
    /// Include slots stay `None`.
    fn compile_rules(
        &self,
        by_name: &FxHashMap<String, StateId>,
    ) -> Result<Vec<Vec<Option<CompiledRule>>>, BuildError> {
        let mut out = Vec::with_capacity(self.states.len());
        for (state_idx, (name, defs)) in self.states.iter().enumerate() {
            let mut rules = Vec::with_capacity(defs.len());
            for (index, def) in defs.iter().enumerate() {
                let RuleDef::Match {
                    pattern,
                    action,
                    transition,
                } = def
                else {
                    rules.push(None);
                    continue;
                };

                let compiled =
                    compile_pattern(pattern).map_err(|source| BuildError::InvalidPattern {
                        state: name.clone(),
                        index,
                        pattern: pattern.clone(),
                        source,
                    })?;

                if let Action::ByGroups(categories) = action {
                    if categories.len() != compiled.groups {
                        return Err(BuildError::GroupCountMismatch {
                            state: name.clone(),
                            index,
                            expected: categories.len(),
                            found: compiled.groups,
                        });
                    }
                }

                let step = match transition {
                    Transition::None => Step::Stay,
                    Transition::Pop => Step::Pop,
                    // Targets were checked above.
                    Transition::Push(target) => Step::Push(by_name[target.as_str()]),
                };

                rules.push(Some(CompiledRule {
                    regex: compiled.regex,
                    action: action.clone(),
                    step,
                    line_anchored: compiled.line_anchored,
                    origin: (StateId(state_idx), index),
                }));
            }
            out.push(rules);
        }
        Ok(out)
    }

    fn flatten(
        &self,
        state_idx: usize,
        by_name: &FxHashMap<String, StateId>,
        compiled: &[Vec<Option<CompiledRule>>],
        visiting: &mut Vec<usize>,
        out: &mut Vec<CompiledRule>,
    ) -> Result<(), BuildError> {
        visiting.push(state_idx);
        let (name, defs) = &self.states[state_idx];
        for (index, def) in defs.iter().enumerate() {
            match def {
                RuleDef::Match { .. } => {
                    if let Some(rule) = &compiled[state_idx][index] {
                        out.push(rule.clone());
                    }
                }
                RuleDef::Include(target) => {
                    let target_idx = by_name[target.as_str()].0;
                    if let Some(pos) = visiting.iter().position(|&v| v == target_idx) {
                        let mut cycle: Vec<String> = visiting[pos..]
                            .iter()
                            .map(|&v| self.states[v].0.clone())
                            .collect();
                        cycle.push(target.clone());
                        return Err(BuildError::IncludeCycle {
                            state: name.clone(),
                            index,
                            cycle,
                        });
                    }
                    self.flatten(target_idx, by_name, compiled, visiting, out)?;
                }
            }
        }
        visiting.pop();
        Ok(())
    }
}

struct CompiledPattern {
    regex: meta::Regex,
    groups: usize,
    line_anchored: bool,
}

/// Compile `pattern` in multi-line mode: `^` and `$` match at line
/// boundaries and `.` stops at `\n`.
fn compile_pattern(
    pattern: &str,
) -> Result<CompiledPattern, Box<dyn std::error::Error + Send + Sync>> {
    let regex = meta::Regex::builder()
        .syntax(syntax::Config::new().multi_line(true))
        .build(pattern)?;

    let hir = regex_syntax::ParserBuilder::new()
        .multi_line(true)
        .build()
        .parse(pattern)?;
    let props = hir.properties();
    let prefix = props.look_set_prefix();

    Ok(CompiledPattern {
        regex,
        groups: props.explicit_captures_len(),
        line_anchored: prefix.contains(Look::Start) || prefix.contains(Look::StartLF),
    })
}
