//! Transition rules and the ordered tables that hold them.

use super::matching::TransitionMatching;
use super::state::State;
use serde::{Deserialize, Serialize};

/// A permitted `(from, to)` move together with its agreement policy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionRule<S: State> {
    /// The state the move starts from
    pub from: S,
    /// The state the move ends in
    pub to: S,
    /// Agreement policy gating local use of the rule
    pub matching: TransitionMatching,
}

impl<S: State> TransitionRule<S> {
    pub fn new(from: S, to: S, matching: TransitionMatching) -> Self {
        Self { from, to, matching }
    }

    /// Check if this rule covers the given move (pure)
    pub fn covers(&self, from: &S, to: &S) -> bool {
        self.from == *from && self.to == *to
    }
}

/// Ordered list of rules owned by one role.
///
/// Lookups return the first rule covering a move; later duplicates for the
/// same `(from, to)` pair are never consulted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct RuleTable<S: State> {
    rules: Vec<TransitionRule<S>>,
}

impl<S: State> Default for RuleTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> RuleTable<S> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn push(&mut self, rule: TransitionRule<S>) {
        self.rules.push(rule);
    }

    /// First rule covering `from -> to`, if any.
    pub fn find(&self, from: &S, to: &S) -> Option<&TransitionRule<S>> {
        self.rules.iter().find(|rule| rule.covers(from, to))
    }

    /// Whether any rule covers `from -> to`.
    pub fn permits(&self, from: &S, to: &S) -> bool {
        self.find(from, to).is_some()
    }

    /// Rules leaving `from`, in registration order.
    pub fn outgoing<'a>(&'a self, from: &'a S) -> impl Iterator<Item = &'a TransitionRule<S>> {
        self.rules.iter().filter(move |rule| rule.from == *from)
    }

    pub fn rules(&self) -> &[TransitionRule<S>] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
