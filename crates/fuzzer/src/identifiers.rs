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

//! Identifier names, and which of them are legal where.

use crate::combinators::{guard_value, one_of};
use crate::state::FuzzerState;
use esfuzz_ast::VariableDeclarationKind;
use lazy_static::lazy_static;
use unicode_xid::UnicodeXID;

const MAX_IDENT_LENGTH: usize = 15;

/// Reserved in every context.
pub const RESERVED: &[&str] = &[
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "export",
    "extends",
    "finally",
    "for",
    "function",
    "if",
    "import",
    "in",
    "instanceof",
    "new",
    "return",
    "super",
    "switch",
    "this",
    "throw",
    "try",
    "typeof",
    "var",
    "void",
    "while",
    "with",
    "null",
    "true",
    "false",
    "enum",
];

/// Reserved in strict mode code only.
pub const STRICT_RESERVED: &[&str] = &[
    "implements",
    "interface",
    "package",
    "private",
    "protected",
    "public",
    "static",
];

lazy_static! {
    static ref IDENTIFIER_START: Vec<char> = ('\u{0}'..='\u{10FFFF}')
        .filter(|c| *c == '$' || *c == '_' || c.is_xid_start())
        .collect();
    static ref IDENTIFIER_CONTINUE: Vec<char> = ('\u{0}'..='\u{10FFFF}')
        .filter(|c| *c == '$' || *c == '\u{200C}' || *c == '\u{200D}' || c.is_xid_continue())
        .collect();
}

/// Whether an identifier is declared or referenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// A binding, or a simple assignment target.
    Binding,
    Reference,
}

pub fn is_reserved(name: &str) -> bool {
    RESERVED.iter().chain(STRICT_RESERVED).any(|r| *r == name)
}

/// Splits `let`, `yield`, `await`, `eval` and `arguments` into the ones legal here and the
/// ones that are not.
pub fn special_names(st: &FuzzerState, position: Position) -> (Vec<&'static str>, Vec<&'static str>) {
    let lexical = matches!(
        st.decl_kind,
        Some(VariableDeclarationKind::Let | VariableDeclarationKind::Const)
    );
    let binding = position == Position::Binding;
    let candidates = [
        ("let", !st.strict && !(binding && lexical)),
        ("yield", !st.strict && st.allow_yield_identifier),
        ("await", st.allow_await_identifier && !st.is_module),
        ("eval", !(st.strict && binding)),
        ("arguments", !(st.strict && binding)),
    ];
    let mut interesting = vec![];
    let mut forbidden = vec![];
    for (name, legal) in candidates {
        if legal {
            interesting.push(name);
        } else {
            forbidden.push(name);
        }
    }
    (interesting, forbidden)
}

/// Any IdentifierName, reserved words included. Used for property names and member access.
pub fn fuzz_identifier_name(st: &FuzzerState) -> String {
    let rng = st.rng();
    let mut name = String::new();
    name.push(IDENTIFIER_START[rng.next_int(IDENTIFIER_START.len())]);
    for _ in 0..rng.next_int(MAX_IDENT_LENGTH) {
        name.push(IDENTIFIER_CONTINUE[rng.next_int(IDENTIFIER_CONTINUE.len())]);
    }
    name
}

/// An identifier legal in `position` under `st`. Half of the time, if any contextual name
/// is legal here, one of those is returned instead of a fresh name.
pub fn fuzz_identifier(st: &FuzzerState, position: Position) -> String {
    let (interesting, forbidden) = special_names(st, position);
    if !interesting.is_empty() && st.rng().next_boolean() {
        return one_of(st, &interesting).to_string();
    }
    guard_value(st, fuzz_identifier_name, |name| {
        is_reserved(name) || forbidden.iter().any(|f| *f == name.as_str())
    })
}

pub fn fuzz_binding_name(st: &FuzzerState) -> String {
    fuzz_identifier(st, Position::Binding)
}

pub fn fuzz_reference_name(st: &FuzzerState) -> String {
    fuzz_identifier(st, Position::Reference)
}

/// Label names follow the reference rules and never shadow an enclosing label.
pub fn fuzz_label(st: &FuzzerState) -> String {
    guard_value(st, fuzz_reference_name, |l| st.labels.contains(l))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FunctionKind;

    fn check_all(st: &FuzzerState, position: Position, forbidden: &[&str]) {
        for _ in 0..500 {
            let name = fuzz_identifier(st, position);
            assert!(!is_reserved(&name), "{name}");
            assert!(!forbidden.iter().any(|f| *f == name), "{name}");
        }
    }

    #[test]
    fn sloppy_names() {
        let st = FuzzerState::with_seed(1);
        let (interesting, forbidden) = special_names(&st, Position::Binding);
        assert_eq!(interesting, vec!["let", "yield", "await", "eval", "arguments"]);
        assert!(forbidden.is_empty());
        check_all(&st, Position::Binding, &[]);
    }

    #[test]
    fn strict_bindings() {
        let st = FuzzerState::with_seed(2).enter_strict();
        check_all(
            &st,
            Position::Binding,
            &["let", "yield", "eval", "arguments", "static", "public"],
        );
        let (interesting, _) = special_names(&st, Position::Reference);
        assert!(interesting.contains(&"eval"));
    }

    #[test]
    fn generator_forbids_yield() {
        let st = FuzzerState::with_seed(3).enter_function(FunctionKind {
            is_generator: true,
            is_async: true,
            ..Default::default()
        });
        check_all(&st, Position::Reference, &["yield", "await"]);
    }

    #[test]
    fn lexical_bindings_forbid_let() {
        let st = FuzzerState::with_seed(4).with_decl_kind(Some(VariableDeclarationKind::Let));
        check_all(&st, Position::Binding, &["let"]);
        let (interesting, _) = special_names(&st, Position::Reference);
        assert!(interesting.contains(&"let"));
    }

    #[test]
    fn module_forbids_await() {
        let st = FuzzerState::with_seed(5).enter_module();
        check_all(&st, Position::Reference, &["await"]);
    }

    #[test]
    fn names_are_identifiers() {
        let st = FuzzerState::with_seed(6);
        for _ in 0..100 {
            let name = fuzz_identifier_name(&st);
            let mut chars = name.chars();
            let first = chars.next().unwrap();
            assert!(first == '$' || first == '_' || first.is_xid_start());
            assert!(name.chars().count() <= MAX_IDENT_LENGTH);
        }
    }

    #[test]
    fn labels_are_fresh() {
        let st = FuzzerState::with_seed(7).add_label("let", false).add_label("yield", true);
        for _ in 0..100 {
            let l = fuzz_label(&st);
            assert!(l != "let" && l != "yield");
        }
    }
}
