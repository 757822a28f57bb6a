// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

//! Random regular expression patterns.
//!
//! The pattern engine mirrors the grammar engine: a cheaply cloned [`RegExpState`] is threaded
//! through one generator per production. Two pieces are shared across the whole pattern
//! rather than cloned: the deferred group bookkeeping in [`RegExpGlobalState`], and the
//! capability set of the target engine.

mod chars;
mod pattern;
mod probe;
mod properties;

pub use chars::char_val;
pub use probe::{BugAvoidance, CapabilityProbe, OnigEngine, PatternEngine};
pub use properties::{BINARY_PROPERTIES, GENERAL_CATEGORY_VALUES, SCRIPT_VALUES};

use crate::combinators::FuzzContext;
use crate::random::Random;
use crate::state::FuzzerState;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

pub const DEFAULT_MAX_DEPTH: usize = 5;

/// Exclusive bound on the numbers in `{n,m}` quantifiers.
pub const DEFAULT_MAX_NUMBER: usize = 100_000;

/// A capture group name as written, and the name it decodes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSpecifier {
    pub identifier: String,
    pub value: String,
}

#[derive(Debug, Default)]
pub struct RegExpGlobalState {
    /// Set when the text so far ends in an escape that a following digit would extend.
    pub no_numeric_lookahead: bool,
    /// Referenced by a backreference, not yet emitted as a group.
    pub to_define: Vec<GroupSpecifier>,
    /// Already emitted as a group.
    pub defined: Vec<GroupSpecifier>,
    /// Largest `\N` emitted so far, zero when none.
    pub max_backreference: usize,
}

impl RegExpGlobalState {
    /// The number of groups the finished pattern is guaranteed to contain, counting from
    /// what has been emitted or promised so far.
    pub fn group_count(&self) -> usize {
        self.defined.len() + self.to_define.len()
    }

    pub fn is_taken(&self, value: &str) -> bool {
        self.defined
            .iter()
            .chain(self.to_define.iter())
            .any(|g| g.value == value)
    }
}

#[derive(Debug, Clone)]
pub struct RegExpState {
    rng: Random,
    pub depth: usize,
    pub max_depth: usize,
    pub unicode: bool,
    /// The atom being generated will be followed by a quantifier.
    pub require_quantifiable: bool,
    pub in_class: bool,
    pub max_number: usize,
    pub global_state: Rc<RefCell<RegExpGlobalState>>,
    pub bug_avoidance: Rc<BugAvoidance>,
}

impl RegExpState {
    pub fn new(rng: Random, unicode: bool, max_depth: usize, bug_avoidance: Rc<BugAvoidance>) -> Self {
        Self {
            rng,
            depth: 0,
            max_depth,
            unicode,
            require_quantifiable: false,
            in_class: false,
            max_number: DEFAULT_MAX_NUMBER,
            global_state: Rc::new(RefCell::new(RegExpGlobalState::default())),
            bug_avoidance,
        }
    }

    pub fn rng(&self) -> &Random {
        &self.rng
    }

    pub fn require_quantifiable(&self, require: bool) -> Self {
        Self {
            require_quantifiable: require,
            ..self.clone()
        }
    }

    pub fn enter_class(&self) -> Self {
        Self {
            in_class: true,
            ..self.clone()
        }
    }

    pub(crate) fn set_no_numeric_lookahead(&self, value: bool) {
        self.global_state.borrow_mut().no_numeric_lookahead = value;
    }

    pub(crate) fn no_numeric_lookahead(&self) -> bool {
        self.global_state.borrow().no_numeric_lookahead
    }
}

impl FuzzContext for RegExpState {
    fn rng(&self) -> &Random {
        &self.rng
    }

    fn depth(&self) -> usize {
        self.depth
    }

    fn max_depth(&self) -> usize {
        self.max_depth
    }

    fn go_deeper(&self) -> Self {
        Self {
            depth: self.depth + 1,
            ..self.clone()
        }
    }
}

/// A generated pattern with its flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegExpPattern {
    pub pattern: String,
    pub global: bool,
    pub ignore_case: bool,
    pub multiline: bool,
    pub dot_all: bool,
    pub unicode: bool,
    pub sticky: bool,
}

impl RegExpPattern {
    pub fn flags(&self) -> String {
        [
            (self.global, 'g'),
            (self.ignore_case, 'i'),
            (self.multiline, 'm'),
            (self.dot_all, 's'),
            (self.unicode, 'u'),
            (self.sticky, 'y'),
        ]
        .iter()
        .filter(|(set, _)| *set)
        .map(|(_, c)| *c)
        .collect()
    }
}

/// Generate a pattern body. Every group that a backreference in it names or numbers is
/// present in the returned text.
pub fn fuzz_regexp_pattern_body(st: &RegExpState) -> String {
    debug!(unicode = st.unicode, max_depth = st.max_depth, "generating regexp pattern");
    let mut rv = pattern::fuzz_disjunction(st);
    let named = st.bug_avoidance.named_groups;
    let stragglers: Vec<GroupSpecifier> = {
        let mut global = st.global_state.borrow_mut();
        let pending: Vec<GroupSpecifier> = global.to_define.drain(..).collect();
        global.defined.extend(pending.iter().cloned());
        pending
    };
    for group in stragglers {
        if named {
            rv.push_str(&format!("(?<{}>)", group.identifier));
        } else {
            rv.push_str("()");
        }
    }
    if rv.is_empty() {
        return "(?:)".to_string();
    }
    rv
}

/// Generate a pattern and flags, drawing from the grammar context's random stream.
pub fn fuzz_regexp_pattern(st: &FuzzerState, unicode: bool) -> RegExpPattern {
    let state = RegExpState::new(
        st.rng().clone(),
        unicode,
        st.regexp_max_depth,
        st.bug_avoidance.clone(),
    );
    let pattern = fuzz_regexp_pattern_body(&state);
    let rng = st.rng();
    RegExpPattern {
        pattern,
        global: rng.next_boolean(),
        ignore_case: rng.next_boolean(),
        multiline: rng.next_boolean(),
        dot_all: rng.next_boolean(),
        unicode,
        sticky: rng.next_boolean(),
    }
}
