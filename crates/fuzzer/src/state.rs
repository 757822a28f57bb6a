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

//! The grammar context threaded through every production.
//!
//! A `FuzzerState` is a plain value. Every transition returns a modified copy, so sibling
//! productions never see each other's overrides. Only the random stream and the pattern
//! engine capabilities are shared between copies.

use crate::combinators::FuzzContext;
use crate::random::Random;
use crate::regexp::BugAvoidance;
use esfuzz_ast::VariableDeclarationKind;
use imbl::Vector;
use std::rc::Rc;

pub const DEFAULT_MAX_DEPTH: usize = 7;

/// The shape of a function being entered, for [`FuzzerState::enter_function`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FunctionKind {
    pub is_generator: bool,
    pub is_async: bool,
    pub is_arrow: bool,
    pub is_method: bool,
    pub has_strict_directive: bool,
}

#[derive(Debug, Clone)]
pub struct FuzzerState {
    rng: Random,
    pub depth: usize,
    pub max_depth: usize,

    /// Allows `continue` and unlabeled `break`.
    pub in_loop: bool,
    /// Allows unlabeled `break`.
    pub in_switch: bool,
    pub strict: bool,
    pub allow_return: bool,
    pub allow_new_target: bool,
    pub allow_super_call: bool,
    pub allow_super_prop: bool,
    pub allow_missing_else: bool,
    // The yield pair and the await pair are mutually exclusive, but both members can be
    // false at once, e.g. in the formal parameters of a generator.
    pub allow_yield_identifier: bool,
    pub allow_yield_expr: bool,
    pub allow_await_identifier: bool,
    pub allow_await_expr: bool,
    pub is_module: bool,
    pub in_for_in_of_head: bool,
    pub require_declarator_initializers: bool,
    pub allow_proper_declarations: bool,
    pub allow_function_declarations: bool,
    /// `let` and `const` forbid bindings named `let`; `const` requires initializers.
    pub decl_kind: Option<VariableDeclarationKind>,

    pub labels: Vector<String>,
    /// Always a subset of `labels`.
    pub loop_labels: Vector<String>,

    pub bug_avoidance: Rc<BugAvoidance>,
    pub regexp_max_depth: usize,
}

impl FuzzerState {
    pub fn new(max_depth: usize, rng: Random) -> Self {
        Self {
            rng,
            depth: 0,
            max_depth,
            in_loop: false,
            in_switch: false,
            strict: false,
            allow_return: false,
            allow_new_target: false,
            allow_super_call: false,
            allow_super_prop: false,
            allow_missing_else: true,
            allow_yield_identifier: true,
            allow_yield_expr: false,
            allow_await_identifier: true,
            allow_await_expr: false,
            is_module: false,
            in_for_in_of_head: false,
            require_declarator_initializers: false,
            allow_proper_declarations: true,
            allow_function_declarations: true,
            decl_kind: None,
            labels: Vector::new(),
            loop_labels: Vector::new(),
            bug_avoidance: Rc::new(BugAvoidance::default()),
            regexp_max_depth: crate::regexp::DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(DEFAULT_MAX_DEPTH, Random::seeded(seed))
    }

    pub fn with_bug_avoidance(mut self, bug_avoidance: BugAvoidance) -> Self {
        self.bug_avoidance = Rc::new(bug_avoidance);
        self
    }

    pub fn with_regexp_max_depth(mut self, depth: usize) -> Self {
        self.regexp_max_depth = depth;
        self
    }

    pub fn rng(&self) -> &Random {
        &self.rng
    }

    pub fn allow_break(&self) -> bool {
        self.in_loop || self.in_switch || !self.labels.is_empty()
    }

    pub fn enable_missing_else(&self) -> Self {
        Self {
            allow_missing_else: true,
            ..self.clone()
        }
    }

    pub fn disable_missing_else(&self) -> Self {
        Self {
            allow_missing_else: false,
            ..self.clone()
        }
    }

    pub fn disable_yield_expr(&self) -> Self {
        Self {
            allow_yield_expr: false,
            ..self.clone()
        }
    }

    pub fn disable_await_expr(&self) -> Self {
        Self {
            allow_await_expr: false,
            ..self.clone()
        }
    }

    pub fn enter_function(&self, kind: FunctionKind) -> Self {
        let mut st = self.clone();
        st.in_loop = false;
        st.in_switch = false;
        st.in_for_in_of_head = false;
        st.require_declarator_initializers = false;
        st.allow_proper_declarations = true;
        st.allow_function_declarations = true;
        st.decl_kind = None;
        if kind.has_strict_directive {
            st.strict = true;
        }
        st.allow_return = true;
        if kind.is_arrow {
            st.allow_yield_expr = false;
        } else {
            st.allow_new_target = true;
            st.allow_yield_identifier = !kind.is_generator;
            st.allow_yield_expr = kind.is_generator;
            if !kind.is_method {
                st.allow_super_call = false;
                st.allow_super_prop = false;
            }
        }
        if kind.is_async {
            st.allow_await_expr = true;
            st.allow_await_identifier = false;
        } else {
            st.allow_await_expr = false;
            st.allow_await_identifier = !st.is_module;
        }
        st.allow_missing_else = true;
        st.labels = Vector::new();
        st.loop_labels = Vector::new();
        st
    }

    pub fn enter_loop(&self) -> Self {
        Self {
            in_loop: true,
            ..self.clone()
        }
    }

    pub fn enter_switch(&self) -> Self {
        Self {
            in_switch: true,
            ..self.clone()
        }
    }

    /// Module code is strict, and `await` is reserved throughout it.
    pub fn enter_module(&self) -> Self {
        Self {
            is_module: true,
            strict: true,
            allow_await_identifier: false,
            ..self.clone()
        }
    }

    pub fn enter_strict(&self) -> Self {
        Self {
            strict: true,
            ..self.clone()
        }
    }

    /// Class bodies are strict; `super` is decided per member.
    pub fn enter_class_body(&self) -> Self {
        Self {
            strict: true,
            ..self.clone()
        }
    }

    pub fn with_super(&self, call: bool, prop: bool) -> Self {
        Self {
            allow_super_call: call,
            allow_super_prop: prop,
            ..self.clone()
        }
    }

    pub fn with_decl_kind(&self, kind: Option<VariableDeclarationKind>) -> Self {
        Self {
            decl_kind: kind,
            require_declarator_initializers: kind == Some(VariableDeclarationKind::Const)
                && !self.in_for_in_of_head,
            ..self.clone()
        }
    }

    pub fn enter_for_in_of_head(&self) -> Self {
        Self {
            in_for_in_of_head: true,
            require_declarator_initializers: false,
            ..self.clone()
        }
    }

    pub fn leave_for_in_of_head(&self) -> Self {
        Self {
            in_for_in_of_head: false,
            ..self.clone()
        }
    }

    pub fn add_label(&self, label: &str, is_loop: bool) -> Self {
        let mut st = self.clone();
        st.labels.push_back(label.to_string());
        if is_loop {
            st.loop_labels.push_back(label.to_string());
        }
        st
    }

    pub fn with_declarations(&self, proper: bool, function: bool) -> Self {
        Self {
            allow_proper_declarations: proper,
            allow_function_declarations: function,
            ..self.clone()
        }
    }
}

impl Default for FuzzerState {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH, Random::from_os_rng())
    }
}

impl FuzzContext for FuzzerState {
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

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn initial_flags() {
        let st = FuzzerState::with_seed(0);
        assert!(!st.strict);
        assert!(!st.allow_break());
        assert!(st.allow_missing_else);
        assert!(st.allow_yield_identifier && !st.allow_yield_expr);
        assert!(st.allow_await_identifier && !st.allow_await_expr);
        assert_eq!(st.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn transitions_do_not_leak_into_parent() {
        let st = FuzzerState::with_seed(0);
        let inner = st.enter_loop().add_label("a", true).go_deeper();
        assert!(inner.in_loop && inner.allow_break());
        assert_eq!(inner.depth, 1);
        assert!(!st.in_loop);
        assert!(st.labels.is_empty());
    }

    #[test]
    fn labels_and_loop_labels() {
        let st = FuzzerState::with_seed(0)
            .add_label("outer", true)
            .add_label("inner", false);
        assert_eq!(st.labels.len(), 2);
        assert_eq!(st.loop_labels.len(), 1);
        assert!(st.loop_labels.iter().all(|l| st.labels.contains(l)));
        assert!(st.allow_break());
    }

    #[test_case(false, false ; "plain function")]
    #[test_case(true, false ; "generator")]
    #[test_case(false, true ; "async function")]
    #[test_case(true, true ; "async generator")]
    fn enter_function_pairs(is_generator: bool, is_async: bool) {
        let st = FuzzerState::with_seed(0)
            .enter_loop()
            .enter_switch()
            .add_label("l", true)
            .disable_missing_else()
            .enter_function(FunctionKind {
                is_generator,
                is_async,
                ..Default::default()
            });
        assert!(!st.in_loop && !st.in_switch && st.labels.is_empty());
        assert!(st.allow_return && st.allow_new_target && st.allow_missing_else);
        assert_eq!(st.allow_yield_expr, is_generator);
        assert_eq!(st.allow_yield_identifier, !is_generator);
        assert_eq!(st.allow_await_expr, is_async);
        assert_eq!(st.allow_await_identifier, !is_async);
        assert!(!st.allow_super_call && !st.allow_super_prop);
    }

    #[test]
    fn arrows_inherit() {
        let generator = FuzzerState::with_seed(0).enter_function(FunctionKind {
            is_generator: true,
            ..Default::default()
        });
        let arrow = generator.enter_function(FunctionKind {
            is_arrow: true,
            ..Default::default()
        });
        assert!(!arrow.allow_yield_expr);
        assert!(!arrow.allow_yield_identifier);
        assert!(arrow.allow_new_target);

        let top = FuzzerState::with_seed(0).with_super(true, true);
        let arrow = top.enter_function(FunctionKind {
            is_arrow: true,
            ..Default::default()
        });
        assert!(!arrow.allow_new_target);
        assert!(arrow.allow_super_prop);
    }

    #[test]
    fn strictness_is_never_revoked() {
        let st = FuzzerState::with_seed(0).enter_strict();
        assert!(st.enter_function(FunctionKind::default()).strict);
        let sloppy = FuzzerState::with_seed(0);
        let st = sloppy.enter_function(FunctionKind {
            has_strict_directive: true,
            ..Default::default()
        });
        assert!(st.strict);
        assert!(!sloppy.strict);
    }

    #[test]
    fn module_await() {
        let st = FuzzerState::with_seed(0).enter_module();
        assert!(st.strict && !st.allow_await_identifier);
        assert!(!st.enter_function(FunctionKind::default()).allow_await_identifier);
    }

    #[test]
    fn const_requires_initializer_outside_heads() {
        let st = FuzzerState::with_seed(0);
        assert!(st
            .with_decl_kind(Some(VariableDeclarationKind::Const))
            .require_declarator_initializers);
        assert!(!st
            .enter_for_in_of_head()
            .with_decl_kind(Some(VariableDeclarationKind::Const))
            .require_declarator_initializers);
        assert!(!st
            .with_decl_kind(Some(VariableDeclarationKind::Let))
            .require_declarator_initializers);
    }
}
