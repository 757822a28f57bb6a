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

//! Pattern productions: disjunction, alternative, term, atom, and the class sub-grammar.

use super::chars::{char_val, fuzz_hex, fuzz_unicode_escape};
use super::properties::{
    BINARY_PROPERTIES, GENERAL_CATEGORY_NAMES, GENERAL_CATEGORY_VALUES, SCRIPT_NAMES,
    SCRIPT_VALUES,
};
use super::{GroupSpecifier, RegExpState};
use crate::combinators::{FuzzContext, either, guard_value, many, one_of, pick};
use std::cell::Cell;

const DECIMAL: &[char] = &['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];
const OCTAL: &[char] = &['0', '1', '2', '3', '4', '5', '6', '7'];

const SYNTAX_CHARACTERS: &str = "^$\\.*+?()[{|";
const UNICODE_SYNTAX_CHARACTERS: &str = "^$\\.*+?()[]{}|";

const CONTROL_LETTERS: &[char] = &[
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r',
    's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J',
    'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// Letters that already mean something after a backslash, so cannot be identity escapes.
const OCCUPIED_ESCAPES: &str = "dDsSwWfnrtvuxbBckpP0123456789";

const ILLEGAL_RANGE_ITEMS: &[&str] = &["\\c"];
const ILLEGAL_RANGE_ITEMS_UNICODE: &[&str] =
    &["\\d", "\\D", "\\w", "\\W", "\\s", "\\S", "\\c", "\\p", "\\P"];

const GROUP_NAME_START: &[char] = &[
    '$', '_', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'x', 'y', 'z', 'A', 'B', 'C', 'X', 'Y',
    'Z',
];
const GROUP_NAME_CONTINUE: &[char] = &[
    '$', '_', 'a', 'b', 'c', 'd', 'e', 'x', 'y', 'z', 'A', 'B', 'Z', '0', '1', '2', '9',
];

fn syntax_characters(st: &RegExpState) -> &'static str {
    if st.unicode {
        UNICODE_SYNTAX_CHARACTERS
    } else {
        SYNTAX_CHARACTERS
    }
}

/// Printable ASCII, never `/`, which would end the literal.
fn fuzz_printable_ascii(st: &RegExpState) -> char {
    guard_value(
        st,
        |f| char::from((32 + f.rng().next_int(94)) as u8),
        |c| *c == '/',
    )
}

fn fuzz_printable_ascii_except(st: &RegExpState, except: &str) -> char {
    guard_value(st, fuzz_printable_ascii, |c| except.contains(*c))
}

fn fuzz_pattern_character(st: &RegExpState) -> String {
    fuzz_printable_ascii_except(st, syntax_characters(st)).to_string()
}

/// True if a digit written directly after `value` would be read as part of its final escape.
fn ends_in_numeric_escape(value: &str) -> bool {
    match value.rfind('\\') {
        Some(i) => {
            let tail = &value[i + 1..];
            !tail.is_empty() && tail.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}

/// Run `generator`, refusing a leading digit if the previous sibling ended in a numeric
/// escape, and record whether this value does.
fn guard_escaped_numeric<G>(st: &RegExpState, generator: G) -> String
where
    G: Fn(&RegExpState) -> String,
{
    let value = if st.no_numeric_lookahead() {
        guard_value(st, &generator, |v| v.starts_with(DECIMAL))
    } else {
        generator(st)
    };
    if !value.is_empty() {
        st.set_no_numeric_lookahead(ends_in_numeric_escape(&value));
    }
    value
}

// -----------------------------------------------------------------------------
// Escapes
// -----------------------------------------------------------------------------

fn fuzz_character_class_escape(st: &RegExpState) -> String {
    format!("\\{}", one_of(st, &['d', 'D', 's', 'S', 'w', 'W']))
}

fn fuzz_control_escape(st: &RegExpState) -> String {
    format!("\\{}", one_of(st, &['f', 'n', 'r', 't', 'v']))
}

fn fuzz_control_letter_escape(st: &RegExpState) -> String {
    format!("\\c{}", one_of(st, CONTROL_LETTERS))
}

fn fuzz_hex_escape(st: &RegExpState) -> String {
    format!("\\x{}{}", fuzz_hex(st), fuzz_hex(st))
}

fn fuzz_null_escape(_: &RegExpState) -> String {
    "\\0".to_string()
}

fn fuzz_legacy_octal_escape(st: &RegExpState) -> String {
    let forms: [fn(&RegExpState) -> String; 3] = [
        |f| one_of(f, OCTAL).to_string(),
        |f| {
            let tail = either(f, |_| String::new(), |f| one_of(f, OCTAL).to_string());
            format!("{}{}{tail}", one_of(f, &OCTAL[..4]), one_of(f, OCTAL))
        },
        |f| format!("{}{}", one_of(f, &OCTAL[4..]), one_of(f, OCTAL)),
    ];
    format!("\\{}", pick(st, &forms))
}

fn fuzz_identity_escape(st: &RegExpState) -> String {
    format!("\\{}", fuzz_printable_ascii_except(st, OCCUPIED_ESCAPES))
}

fn fuzz_syntax_identity_escape(st: &RegExpState) -> String {
    let escapable: Vec<char> = UNICODE_SYNTAX_CHARACTERS.chars().chain(['/']).collect();
    format!("\\{}", one_of(st, &escapable))
}

/// The body of a `\p{...}` escape the target engine accepts, if there is one.
fn fuzz_property_expression(st: &RegExpState) -> Option<String> {
    let caps = &st.bug_avoidance;
    let lone = || -> Vec<String> {
        BINARY_PROPERTIES
            .iter()
            .chain(GENERAL_CATEGORY_VALUES)
            .map(|p| p.to_string())
            .filter(|p| caps.property_supported(p))
            .collect()
    };
    let candidates: Vec<String> = match st.rng().next_int(3) {
        0 => lone(),
        1 => {
            let name = one_of(st, GENERAL_CATEGORY_NAMES);
            GENERAL_CATEGORY_VALUES
                .iter()
                .map(|v| format!("{name}={v}"))
                .filter(|p| caps.property_supported(p))
                .collect()
        }
        _ => {
            let name = one_of(st, SCRIPT_NAMES);
            SCRIPT_VALUES
                .iter()
                .map(|v| format!("{name}={v}"))
                .filter(|p| caps.property_supported(p))
                .collect()
        }
    };
    let candidates = if candidates.is_empty() {
        lone()
    } else {
        candidates
    };
    if candidates.is_empty() {
        return None;
    }
    Some(one_of(st, &candidates))
}

fn fuzz_property_escape(st: &RegExpState) -> String {
    match fuzz_property_expression(st) {
        Some(expression) => format!("\\{}{{{expression}}}", one_of(st, &['p', 'P'])),
        None => fuzz_character_class_escape(st),
    }
}

fn fuzz_character_escape(st: &RegExpState) -> String {
    let common: [fn(&RegExpState) -> String; 6] = [
        fuzz_character_class_escape,
        fuzz_control_escape,
        fuzz_control_letter_escape,
        fuzz_hex_escape,
        fuzz_unicode_escape,
        fuzz_null_escape,
    ];
    let mut alternatives = common.to_vec();
    if st.unicode {
        alternatives.push(fuzz_syntax_identity_escape);
        if st.bug_avoidance.unicode_properties {
            alternatives.push(fuzz_property_escape);
        }
    } else {
        alternatives.push(fuzz_legacy_octal_escape);
        alternatives.push(fuzz_identity_escape);
    }
    if st.in_class {
        alternatives.push(|_| "\\b".to_string());
        if st.unicode {
            alternatives.push(|_| "\\-".to_string());
        }
    }
    pick(st, &alternatives)
}

// -----------------------------------------------------------------------------
// Groups and backreferences
// -----------------------------------------------------------------------------

/// A fresh group name. One character is sometimes spelled as a `\u` escape; `value` holds
/// the decoded name.
fn fuzz_group_name(st: &RegExpState) -> GroupSpecifier {
    let mut value = one_of(st, GROUP_NAME_START).to_string();
    for _ in 0..st.rng().next_int(4) {
        value.push(one_of(st, GROUP_NAME_CONTINUE));
    }
    let identifier = if st.rng().next_int(4) == 0 {
        let escaped = st.rng().next_int(value.chars().count());
        value
            .chars()
            .enumerate()
            .map(|(i, c)| {
                if i == escaped {
                    format!("\\u{:04X}", u32::from(c))
                } else {
                    c.to_string()
                }
            })
            .collect()
    } else {
        value.clone()
    };
    GroupSpecifier { identifier, value }
}

fn fuzz_unused_group_specifier(st: &RegExpState) -> GroupSpecifier {
    guard_value(st, fuzz_group_name, |g| {
        st.global_state.borrow().is_taken(&g.value)
    })
}

/// The specifier for a group about to be emitted: the oldest pending reference if there is
/// one, otherwise a fresh name.
fn claim_group_specifier(st: &RegExpState) -> GroupSpecifier {
    let pending = {
        let mut global = st.global_state.borrow_mut();
        if global.to_define.is_empty() {
            None
        } else {
            Some(global.to_define.remove(0))
        }
    };
    let specifier = pending.unwrap_or_else(|| fuzz_unused_group_specifier(st));
    st.global_state.borrow_mut().defined.push(specifier.clone());
    specifier
}

fn fuzz_capturing_group(st: &RegExpState) -> String {
    if st.too_deep() {
        return "(?:)".to_string();
    }
    let f = st.go_deeper();
    let specifier = claim_group_specifier(&f);
    f.set_no_numeric_lookahead(false);
    let body = fuzz_disjunction(&f);
    f.set_no_numeric_lookahead(false);
    if f.bug_avoidance.named_groups {
        format!("(?<{}>{body})", specifier.identifier)
    } else {
        format!("({body})")
    }
}

fn fuzz_non_capturing_group(st: &RegExpState) -> String {
    if st.too_deep() {
        return "(?:)".to_string();
    }
    let f = st.go_deeper();
    f.set_no_numeric_lookahead(false);
    let value = format!("(?:{})", fuzz_disjunction(&f));
    f.set_no_numeric_lookahead(false);
    value
}

/// A lookahead, or when the engine has them and no quantifier follows, a lookbehind.
fn fuzz_lookaround_group(st: &RegExpState) -> String {
    if st.too_deep() {
        return "(?:)".to_string();
    }
    let f = st.go_deeper();
    let mut openers = vec!["?=", "?!"];
    if f.bug_avoidance.lookbehinds && !f.require_quantifiable {
        openers.extend(["?<=", "?<!"]);
    }
    f.set_no_numeric_lookahead(false);
    let opener = one_of(&f, &openers);
    let value = format!("({opener}{})", fuzz_disjunction(&f.require_quantifiable(false)));
    f.set_no_numeric_lookahead(false);
    value
}

/// `\N` for a group that exists or will be appended.
fn fuzz_decimal_backreference(st: &RegExpState) -> String {
    let count = st.global_state.borrow().group_count();
    let n = st.rng().next_int(count + 1) + 1;
    if n > count {
        let specifier = fuzz_unused_group_specifier(st);
        st.global_state.borrow_mut().to_define.push(specifier);
    }
    let mut global = st.global_state.borrow_mut();
    global.max_backreference = global.max_backreference.max(n);
    format!("\\{n}")
}

fn fuzz_named_backreference(st: &RegExpState) -> String {
    let known: Vec<String> = {
        let global = st.global_state.borrow();
        global
            .defined
            .iter()
            .chain(global.to_define.iter())
            .map(|g| g.identifier.clone())
            .collect()
    };
    let identifier = if known.is_empty() || st.rng().next_boolean() {
        let specifier = fuzz_unused_group_specifier(st);
        let identifier = specifier.identifier.clone();
        st.global_state.borrow_mut().to_define.push(specifier);
        identifier
    } else {
        one_of(st, &known)
    };
    format!("\\k<{identifier}>")
}

// -----------------------------------------------------------------------------
// Character classes
// -----------------------------------------------------------------------------

fn fuzz_class_atom(st: &RegExpState) -> String {
    if st.too_deep() {
        return String::new();
    }
    let f = st.go_deeper();
    let common: [fn(&RegExpState) -> String; 3] = [
        |f| fuzz_printable_ascii_except(f, "\\]-").to_string(),
        |f| {
            let syntax: Vec<char> = SYNTAX_CHARACTERS.chars().collect();
            format!("\\{}", one_of(f, &syntax))
        },
        fuzz_character_escape,
    ];
    let mut alternatives = common.to_vec();
    if !f.unicode {
        alternatives.push(|f| {
            let mut letters = DECIMAL.to_vec();
            letters.push('_');
            format!("\\c{}", one_of(f, &letters))
        });
    }
    pick(&f, &alternatives)
}

fn fuzz_class_atom_or_dash(st: &RegExpState) -> String {
    either(st, |_| "-".to_string(), fuzz_class_atom)
}

fn fuzz_range_endpoint(st: &RegExpState) -> String {
    let illegal = if st.unicode {
        ILLEGAL_RANGE_ITEMS_UNICODE
    } else {
        ILLEGAL_RANGE_ITEMS
    };
    guard_value(st, fuzz_class_atom, |v| {
        v.is_empty() || illegal.iter().any(|item| v.starts_with(item))
    })
}

/// `a-b` with `a <= b`. Where a bare `-` is allowed, `-` itself may serve as the lower
/// endpoint.
fn fuzz_class_range(st: &RegExpState, can_dash: bool) -> String {
    if can_dash && st.rng().next_int(4) == 0 {
        let upper = guard_value(st, fuzz_range_endpoint, |v| char_val(v) < u32::from('-'));
        return format!("--{upper}");
    }
    let mut a = fuzz_range_endpoint(st);
    let mut b = fuzz_range_endpoint(st);
    if char_val(&a) > char_val(&b) {
        std::mem::swap(&mut a, &mut b);
    }
    format!("{a}-{b}")
}

fn fuzz_character_class(st: &RegExpState) -> String {
    if st.too_deep() {
        return "[]".to_string();
    }
    let f = st.go_deeper().enter_class();
    f.set_no_numeric_lookahead(false);
    // A bare `-` right after a single atom would turn the pair into a range.
    let can_dash = Cell::new(true);
    // A leading `^` would negate the class.
    let can_caret = Cell::new(false);
    let tokens = many(&f, |f| {
        let last_was_range = Cell::new(false);
        let token = guard_escaped_numeric(f, |f| {
            guard_value(
                f,
                |f| {
                    either(
                        f,
                        |f| {
                            last_was_range.set(false);
                            if can_dash.get() {
                                fuzz_class_atom_or_dash(f)
                            } else {
                                fuzz_class_atom(f)
                            }
                        },
                        |f| {
                            last_was_range.set(true);
                            fuzz_class_range(f, can_dash.get())
                        },
                    )
                },
                |v| !can_caret.get() && v.starts_with('^'),
            )
        });
        can_dash.set(last_was_range.get());
        can_caret.set(true);
        token
    });
    f.set_no_numeric_lookahead(false);
    format!(
        "[{}{}{}]",
        one_of(&f, &["^", ""]),
        tokens.concat(),
        one_of(&f, &["-", ""])
    )
}

// -----------------------------------------------------------------------------
// Terms
// -----------------------------------------------------------------------------

fn fuzz_atom(st: &RegExpState) -> String {
    if st.too_deep() {
        return String::new();
    }
    let f = st.go_deeper();
    let common: [fn(&RegExpState) -> String; 7] = [
        fuzz_pattern_character,
        |_| ".".to_string(),
        fuzz_character_escape,
        fuzz_character_class,
        fuzz_non_capturing_group,
        fuzz_capturing_group,
        fuzz_decimal_backreference,
    ];
    let mut alternatives = common.to_vec();
    if f.bug_avoidance.named_groups {
        alternatives.push(fuzz_named_backreference);
    }
    pick(&f, &alternatives)
}

fn fuzz_length_quantifier(st: &RegExpState) -> String {
    either(
        st,
        |f| {
            format!(
                "{{{}{}}}",
                f.rng().next_int(f.max_number),
                one_of(f, &[",", ""])
            )
        },
        |f| {
            let low = f.rng().next_int(f.max_number);
            let high = low + f.rng().next_int(f.max_number - low);
            format!("{{{low},{high}}}")
        },
    )
}

fn fuzz_quantifier(st: &RegExpState) -> String {
    let base = either(
        st,
        |f| one_of(f, &["?", "+", "*"]).to_string(),
        fuzz_length_quantifier,
    );
    format!("{base}{}", one_of(st, &["", "?"]))
}

fn fuzz_repetition<G>(st: &RegExpState, atom: G) -> String
where
    G: Fn(&RegExpState) -> String,
{
    if st.too_deep() {
        return String::new();
    }
    let f = st.go_deeper();
    if f.too_deep() {
        return String::new();
    }
    let value = atom(&f.require_quantifiable(true));
    if value.is_empty() {
        return value;
    }
    format!("{value}{}", fuzz_quantifier(&f))
}

fn fuzz_assertion(st: &RegExpState) -> String {
    either(
        st,
        |f| one_of(f, &["^", "$", "\\b", "\\B"]).to_string(),
        fuzz_lookaround_group,
    )
}

fn fuzz_term(st: &RegExpState) -> String {
    if st.unicode {
        let terms: [fn(&RegExpState) -> String; 3] = [
            fuzz_assertion,
            fuzz_atom,
            |f| fuzz_repetition(f, fuzz_atom),
        ];
        pick(st, &terms)
    } else {
        // Legacy mode also allows quantified lookaheads.
        let terms: [fn(&RegExpState) -> String; 4] = [
            |f| fuzz_repetition(f, fuzz_lookaround_group),
            fuzz_assertion,
            fuzz_atom,
            |f| fuzz_repetition(f, fuzz_atom),
        ];
        pick(st, &terms)
    }
}

fn fuzz_alternative(st: &RegExpState) -> String {
    many(st, |f| guard_escaped_numeric(f, fuzz_term)).concat()
}

fn fuzz_many_disjunctions(st: &RegExpState) -> String {
    if st.too_deep() {
        return String::new();
    }
    let f = st.go_deeper();
    many(&f, fuzz_alternative).join("|")
}

pub(super) fn fuzz_disjunction(st: &RegExpState) -> String {
    if st.too_deep() {
        return String::new();
    }
    let f = st.go_deeper();
    either(&f, fuzz_alternative, fuzz_many_disjunctions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::Random;
    use crate::regexp::BugAvoidance;
    use std::rc::Rc;

    fn state(seed: u64, unicode: bool, caps: BugAvoidance) -> RegExpState {
        RegExpState::new(Random::seeded(seed), unicode, 5, Rc::new(caps))
    }

    #[test]
    fn numeric_escape_detection() {
        assert!(ends_in_numeric_escape("a\\1"));
        assert!(ends_in_numeric_escape("\\012"));
        assert!(!ends_in_numeric_escape("\\1*"));
        assert!(!ends_in_numeric_escape("\\x41"));
        assert!(!ends_in_numeric_escape("12"));
        assert!(!ends_in_numeric_escape("\\"));
    }

    #[test]
    fn guarded_sibling_never_starts_with_a_digit() {
        let st = state(11, true, BugAvoidance::default());
        for _ in 0..200 {
            st.set_no_numeric_lookahead(true);
            let v = guard_escaped_numeric(&st, fuzz_pattern_character);
            assert!(!v.starts_with(DECIMAL), "{v}");
        }
    }

    #[test]
    fn class_ranges_are_ordered() {
        for seed in 0..40 {
            let st = state(seed, true, BugAvoidance::default()).enter_class();
            for _ in 0..20 {
                let range = fuzz_class_range(&st, false);
                let ordered = range.match_indices('-').any(|(i, _)| {
                    let (a, b) = (&range[..i], &range[i + 1..]);
                    !a.is_empty() && !b.is_empty() && char_val(a) <= char_val(b)
                });
                assert!(ordered, "{range}");
            }
        }
    }

    #[test]
    fn dash_lower_endpoint_stays_below_upper() {
        for seed in 0..40 {
            let st = state(seed, false, BugAvoidance::default()).enter_class();
            let range = fuzz_class_range(&st, true);
            if let Some(upper) = range.strip_prefix("--") {
                assert!(char_val(upper) >= u32::from('-'), "{range}");
            }
        }
    }

    #[test]
    fn legacy_escapes_stay_in_legacy_mode() {
        for seed in 0..100 {
            let st = state(seed, true, BugAvoidance::default());
            let e = fuzz_character_escape(&st);
            // No legacy octal or bare identity escapes in unicode mode.
            let second = e.chars().nth(1).unwrap_or(' ');
            assert!(
                !('1'..='7').contains(&second) && (second != '0' || e == "\\0"),
                "{e}"
            );
        }
    }

    #[test]
    fn group_names_decode() {
        let st = state(5, false, BugAvoidance::default());
        for _ in 0..100 {
            let g = fuzz_group_name(&st);
            if g.identifier != g.value {
                let start = g.identifier.find("\\u").unwrap();
                let code = u32::from_str_radix(&g.identifier[start + 2..start + 6], 16).unwrap();
                let decoded = format!(
                    "{}{}{}",
                    &g.identifier[..start],
                    char::from_u32(code).unwrap(),
                    &g.identifier[start + 6..]
                );
                assert_eq!(decoded, g.value);
            }
        }
    }
}
