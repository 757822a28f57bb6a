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

//! Properties that hold for every seed: generation terminates inside a depth envelope, replays
//! exactly, and never produces the handful of early errors the grammar context exists to avoid.

use std::collections::HashSet;
use std::rc::Rc;

use esfuzz_ast::walk::{collect_nodes, node_depth, node_type};
use proptest::prelude::*;
use serde_json::Value;

use super::scan::scan_pattern;
use crate::combinators::{MANY_BOUND, many, many1};
use crate::identifiers::{Position, fuzz_identifier, is_reserved, special_names};
use crate::productions::{fuzz_program, fuzz_statement};
use crate::random::Random;
use crate::regexp::{self, BugAvoidance, RegExpState, fuzz_regexp_pattern_body};
use crate::state::FuzzerState;

/// Nodes built below the depth limit add at most this many levels on their way to leaves.
const DEPTH_SLACK: usize = 8;

fn program_json(seed: u64, max_depth: usize) -> Value {
    let st = FuzzerState::new(max_depth, Random::seeded(seed));
    serde_json::to_value(fuzz_program(&st)).unwrap()
}

fn pattern(seed: u64, unicode: bool, bug_avoidance: BugAvoidance) -> String {
    let st = RegExpState::new(
        Random::seeded(seed),
        unicode,
        regexp::DEFAULT_MAX_DEPTH,
        Rc::new(bug_avoidance),
    );
    fuzz_regexp_pattern_body(&st)
}

fn is_proto_key(property: &Value) -> bool {
    node_type(property) == Some("DataProperty")
        && node_type(&property["name"]) == Some("StaticPropertyName")
        && property["name"]["value"] == "__proto__"
}

fn is_constructor(element: &Value) -> bool {
    element["isStatic"] == false
        && node_type(&element["method"]) == Some("Method")
        && node_type(&element["method"]["name"]) == Some("StaticPropertyName")
        && element["method"]["name"]["value"] == "constructor"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn programs_stay_within_depth(seed in any::<u64>(), max_depth in 0usize..8) {
        let st = FuzzerState::new(max_depth, Random::seeded(seed));
        let depth = node_depth(&fuzz_program(&st)).unwrap();
        prop_assert!(depth <= max_depth + DEPTH_SLACK, "depth {} at max {}", depth, max_depth);
    }

    #[test]
    fn same_seed_same_program(seed in any::<u64>()) {
        let a = fuzz_program(&FuzzerState::with_seed(seed));
        let b = fuzz_program(&FuzzerState::with_seed(seed));
        prop_assert_eq!(a, b);
    }

    #[test]
    fn same_seed_same_pattern(seed in any::<u64>(), unicode in any::<bool>()) {
        prop_assert_eq!(
            pattern(seed, unicode, BugAvoidance::default()),
            pattern(seed, unicode, BugAvoidance::default())
        );
    }

    #[test]
    fn many_respects_bounds(seed in any::<u64>(), max_depth in 0usize..4) {
        let st = FuzzerState::new(max_depth, Random::seeded(seed));
        let items = many(&st, |f| f.rng().next_int(10));
        prop_assert!(items.len() <= MANY_BOUND);
        let items = many1(&st, |f| f.rng().next_int(10));
        prop_assert!(!items.is_empty() && items.len() <= MANY_BOUND);
    }

    #[test]
    fn identifiers_are_never_reserved(
        seed in any::<u64>(),
        strict in any::<bool>(),
        is_module in any::<bool>(),
        allow_yield in any::<bool>(),
        binding in any::<bool>(),
    ) {
        let mut st = FuzzerState::with_seed(seed);
        st.strict = strict || is_module;
        st.is_module = is_module;
        st.allow_yield_identifier = allow_yield;
        let position = if binding { Position::Binding } else { Position::Reference };
        let (_, forbidden) = special_names(&st, position);
        for _ in 0..20 {
            let name = fuzz_identifier(&st, position);
            prop_assert!(!is_reserved(&name), "{} is reserved", name);
            prop_assert!(!forbidden.iter().any(|f| *f == name), "{} is forbidden here", name);
        }
    }

    #[test]
    fn objects_have_one_proto_at_most(seed in any::<u64>()) {
        let program = program_json(seed, 6);
        for object in collect_nodes(&program, "ObjectExpression") {
            let properties = object["properties"].as_array().unwrap();
            prop_assert!(properties.iter().filter(|p| is_proto_key(p)).count() <= 1);
        }
    }

    #[test]
    fn classes_have_one_constructor_at_most(seed in any::<u64>()) {
        let program = program_json(seed, 6);
        let classes = collect_nodes(&program, "ClassDeclaration")
            .into_iter()
            .chain(collect_nodes(&program, "ClassExpression"));
        for class in classes {
            let elements = class["elements"].as_array().unwrap();
            prop_assert!(elements.iter().filter(|e| is_constructor(e)).count() <= 1);
        }
    }

    #[test]
    fn depth_zero_statements_are_leaves(seed in any::<u64>()) {
        let st = FuzzerState::new(0, Random::seeded(seed));
        let statement = serde_json::to_value(fuzz_statement(&st)).unwrap();
        prop_assert_eq!(esfuzz_ast::walk::value_depth(&statement), 1);
        prop_assert!(matches!(
            node_type(&statement),
            Some("EmptyStatement") | Some("DebuggerStatement")
        ));
    }

    #[test]
    fn backreferences_resolve(seed in any::<u64>(), unicode in any::<bool>()) {
        let scan = scan_pattern(&pattern(seed, unicode, BugAvoidance::default()));
        let names: HashSet<&String> = scan.group_names.iter().collect();
        prop_assert_eq!(names.len(), scan.group_names.len(), "duplicate group names");
        for name in &scan.named_references {
            prop_assert!(names.contains(name), "\\k<{}> names no group", name);
        }
        // Outside unicode mode a high `\N` is a legacy octal escape, not a reference.
        if unicode {
            for n in &scan.numeric_references {
                prop_assert!(*n <= scan.capture_count, "\\{} with {} groups", n, scan.capture_count);
            }
        }
    }

    #[test]
    fn legacy_backreferences_resolve(seed in any::<u64>(), named_groups in any::<bool>()) {
        let avoidance = BugAvoidance { named_groups, ..BugAvoidance::default() };
        let st = RegExpState::new(
            Random::seeded(seed),
            false,
            regexp::DEFAULT_MAX_DEPTH,
            Rc::new(avoidance),
        );
        let scan = scan_pattern(&fuzz_regexp_pattern_body(&st));
        let global = st.global_state.borrow();
        prop_assert!(global.to_define.is_empty());
        prop_assert_eq!(scan.capture_count, global.group_count());
        prop_assert!(
            global.max_backreference <= scan.capture_count,
            "\\{} with {} groups",
            global.max_backreference,
            scan.capture_count
        );
    }

    #[test]
    fn unnamed_groups_when_unsupported(seed in any::<u64>(), unicode in any::<bool>()) {
        let avoidance = BugAvoidance { named_groups: false, ..BugAvoidance::default() };
        let scan = scan_pattern(&pattern(seed, unicode, avoidance));
        prop_assert!(scan.group_names.is_empty());
        prop_assert!(scan.named_references.is_empty());
    }

    #[test]
    fn no_property_escapes_when_unsupported(seed in any::<u64>()) {
        let avoidance = BugAvoidance { unicode_properties: false, ..BugAvoidance::default() };
        let scan = scan_pattern(&pattern(seed, true, avoidance));
        prop_assert!(!scan.escapes.iter().any(|c| *c == 'p' || *c == 'P'));
    }
}
