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

//! Leaf productions: identifiers, literals, directives, template elements and property names.

use crate::combinators::{FuzzContext, ap, either, guard_value, many, pick};
use crate::escape::{RawPosition, escape_raw};
use crate::identifiers::{
    Position, fuzz_binding_name, fuzz_identifier, fuzz_identifier_name, fuzz_reference_name,
};
use crate::productions::expressions::fuzz_expression;
use crate::regexp::fuzz_regexp_pattern;
use crate::state::FuzzerState;
use esfuzz_ast::{
    AssignmentTargetIdentifier, BindingIdentifier, ComputedPropertyName, Directive, Expression,
    IdentifierExpression, LiteralBooleanExpression, LiteralInfinityExpression,
    LiteralNullExpression, LiteralNumericExpression, LiteralRegExpExpression,
    LiteralStringExpression, NewTargetExpression, PropertyName, StaticPropertyName,
    TemplateElement, ThisExpression,
};

/// Cooked strings are short; the interesting part is which characters they hold.
const MAX_STRING_LENGTH: usize = 3;

const USE_STRICT: &str = "use strict";

/// A short string of ASCII, control characters included.
pub fn fuzz_string(st: &FuzzerState) -> String {
    let rng = st.rng();
    (0..rng.next_int(MAX_STRING_LENGTH + 1))
        .map(|_| char::from((0x14 + rng.next_int(0x7f - 0x14)) as u8))
        .collect()
}

/// Finite and non-negative: a small integer or `e^x` for `x` in `[0, 1)`.
pub fn fuzz_number(st: &FuzzerState) -> f64 {
    either(
        st,
        |f| f.rng().next_int(1 << 16) as f64,
        |f| f.rng().next_double().exp(),
    )
}

pub fn fuzz_binding_identifier(st: &FuzzerState) -> BindingIdentifier {
    BindingIdentifier {
        name: fuzz_binding_name(st),
    }
}

/// In a for-in/of head, `let` is refused here too: `for (let.x of y)` and `for (let[x] in y)`
/// do not parse.
pub fn fuzz_identifier_expression(st: &FuzzerState) -> IdentifierExpression {
    let name = if st.in_for_in_of_head {
        guard_value(st, fuzz_reference_name, |n| n == "let")
    } else {
        fuzz_reference_name(st)
    };
    IdentifierExpression { name }
}

/// Simple targets follow the binding rules; `let` cannot start a for-in/of head.
pub fn fuzz_assignment_target_identifier(st: &FuzzerState) -> AssignmentTargetIdentifier {
    let name = if st.in_for_in_of_head {
        guard_value(
            st,
            |f| fuzz_identifier(f, Position::Binding),
            |n| n == "let",
        )
    } else {
        fuzz_identifier(st, Position::Binding)
    };
    AssignmentTargetIdentifier { name }
}

fn fuzz_directive(st: &FuzzerState) -> Directive {
    let raw_value = if st.rng().next_int(4) == 0 {
        USE_STRICT.to_string()
    } else {
        escape_raw(&fuzz_string(st), RawPosition::Directive)
    };
    Directive { raw_value }
}

/// A directive prologue, and whether it contains `"use strict"`.
pub fn fuzz_directives(st: &FuzzerState) -> (Vec<Directive>, bool) {
    let directives = many(st, fuzz_directive);
    let strict = directives.iter().any(Directive::is_use_strict);
    (directives, strict)
}

/// Blank out every `"use strict"`, for prologues where it is not allowed.
pub fn strip_use_strict(directives: &mut [Directive]) {
    for directive in directives.iter_mut().filter(|d| d.is_use_strict()) {
        directive.raw_value = String::new();
    }
}

pub fn fuzz_template_element(st: &FuzzerState) -> TemplateElement {
    TemplateElement {
        raw_value: escape_raw(&fuzz_string(st), RawPosition::Template),
    }
}

pub fn fuzz_regexp_literal(st: &FuzzerState) -> LiteralRegExpExpression {
    let unicode = st.rng().next_boolean();
    let p = fuzz_regexp_pattern(st, unicode);
    LiteralRegExpExpression {
        pattern: p.pattern,
        global: p.global,
        ignore_case: p.ignore_case,
        multiline: p.multiline,
        dot_all: p.dot_all,
        unicode: p.unicode,
        sticky: p.sticky,
    }
}

/// Expressions with no children. `new.target` joins them inside ordinary functions.
pub fn fuzz_leaf_expression(st: &FuzzerState) -> Expression {
    let leaves: [fn(&FuzzerState) -> Expression; 8] = [
        |f| Expression::IdentifierExpression(fuzz_identifier_expression(f)),
        |f| {
            Expression::LiteralBooleanExpression(LiteralBooleanExpression {
                value: f.rng().next_boolean(),
            })
        },
        |_| Expression::LiteralInfinityExpression(LiteralInfinityExpression {}),
        |_| Expression::LiteralNullExpression(LiteralNullExpression {}),
        |f| {
            Expression::LiteralNumericExpression(LiteralNumericExpression {
                value: fuzz_number(f),
            })
        },
        |f| {
            Expression::LiteralStringExpression(LiteralStringExpression {
                value: fuzz_string(f),
            })
        },
        |_| Expression::ThisExpression(ThisExpression {}),
        |f| Expression::LiteralRegExpExpression(fuzz_regexp_literal(f)),
    ];
    let mut leaves = leaves.to_vec();
    if st.allow_new_target {
        leaves.push(|_| Expression::NewTargetExpression(NewTargetExpression {}));
    }
    pick(st, &leaves)
}

/// Object literals allow this key once, so it is drawn often enough to exercise that rule.
const PROTO_KEY: &str = "__proto__";

pub fn fuzz_static_property_name(st: &FuzzerState) -> StaticPropertyName {
    let value = match st.rng().next_int(4) {
        0 => fuzz_identifier_name(st),
        1 => fuzz_string(st),
        2 => fuzz_number(st).to_string(),
        _ => PROTO_KEY.to_string(),
    };
    StaticPropertyName { value }
}

pub fn fuzz_property_name(st: &FuzzerState) -> PropertyName {
    if st.too_deep() {
        return PropertyName::StaticPropertyName(fuzz_static_property_name(st));
    }
    either(
        st,
        |f| PropertyName::StaticPropertyName(fuzz_static_property_name(f)),
        |f| {
            ap(f, |f| {
                PropertyName::ComputedPropertyName(ComputedPropertyName {
                    expression: Box::new(fuzz_expression(f)),
                })
            })
        },
    )
}

/// A module specifier or exported name: any short string.
pub fn fuzz_module_specifier(st: &FuzzerState) -> String {
    fuzz_string(st)
}
