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

//! Character values and the escapes that spell them.

use super::RegExpState;
use crate::combinators::{one_of, pick};

const HEX: &[char] = &[
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'A', 'B',
    'C', 'D', 'E', 'F',
];

fn hex_value(digits: &str) -> u32 {
    u32::from_str_radix(digits, 16).unwrap_or(0)
}

/// The value of the part of a `\u` escape after the `u`: `XXXX`, `{X...}`, or a surrogate
/// pair spelled `XXXX\uXXXX`.
fn unicode_escape_value(body: &str) -> u32 {
    if let Some(braced) = body.strip_prefix('{') {
        return hex_value(braced.trim_end_matches('}'));
    }
    match body.split_once("\\u") {
        Some((high, low)) => {
            0x10000 + ((hex_value(high) & 0x3FF) << 10) + (hex_value(low) & 0x3FF)
        }
        None => hex_value(body),
    }
}

/// The code point a single class atom stands for. Used to order range endpoints.
pub fn char_val(atom: &str) -> u32 {
    let Some(escaped) = atom.strip_prefix('\\') else {
        return atom.chars().next().map(u32::from).unwrap_or(0);
    };
    let mut chars = escaped.chars();
    let Some(kind) = chars.next() else {
        return u32::from('\\');
    };
    let rest = chars.as_str();
    match kind {
        'u' => unicode_escape_value(rest),
        'x' => hex_value(rest),
        '0'..='7' => u32::from_str_radix(escaped, 8).unwrap_or(0),
        'b' => 0x08,
        't' => 0x09,
        'n' => 0x0A,
        'v' => 0x0B,
        'f' => 0x0C,
        'r' => 0x0D,
        'c' => match rest.chars().next() {
            Some(letter) => u32::from(letter) % 32,
            None => u32::from('c'),
        },
        other => u32::from(other),
    }
}

pub(super) fn fuzz_hex(st: &RegExpState) -> char {
    one_of(st, HEX)
}

pub(super) fn fuzz_hex_except(st: &RegExpState, except: &str) -> char {
    let allowed: Vec<char> = HEX.iter().copied().filter(|h| !except.contains(*h)).collect();
    one_of(st, &allowed)
}

/// Four hex digits that never spell a surrogate code unit.
fn fuzz_bmp_hex4(st: &RegExpState) -> String {
    let first = fuzz_hex(st);
    let second = if first == 'd' || first == 'D' {
        fuzz_hex_except(st, "89abcdefABCDEF")
    } else {
        fuzz_hex(st)
    };
    format!("{first}{second}{}{}", fuzz_hex(st), fuzz_hex(st))
}

/// A `\u` escape. Outside unicode mode only the four digit form exists; in unicode mode the
/// braced forms and surrogate pairs are also produced, and lone surrogates are not.
pub(super) fn fuzz_unicode_escape(st: &RegExpState) -> String {
    if !st.unicode {
        return format!(
            "\\u{}{}{}{}",
            fuzz_hex(st),
            fuzz_hex(st),
            fuzz_hex(st),
            fuzz_hex(st)
        );
    }
    let forms: [fn(&RegExpState) -> String; 5] = [
        |f| format!("\\u{{{}}}", fuzz_bmp_hex4(f)),
        |f| format!("\\u{}", fuzz_bmp_hex4(f)),
        |f| {
            format!(
                "\\u{{{}{}{}{}{}}}",
                fuzz_hex_except(f, "0"),
                fuzz_hex(f),
                fuzz_hex(f),
                fuzz_hex(f),
                fuzz_hex(f)
            )
        },
        |f| {
            format!(
                "\\u{{10{}{}{}{}}}",
                fuzz_hex(f),
                fuzz_hex(f),
                fuzz_hex(f),
                fuzz_hex(f)
            )
        },
        |f| {
            format!(
                "\\u{}{}{}{}\\u{}{}{}{}",
                one_of(f, &['d', 'D']),
                one_of(f, &['8', '9', 'A', 'B', 'a', 'b']),
                fuzz_hex(f),
                fuzz_hex(f),
                one_of(f, &['d', 'D']),
                one_of(f, &['C', 'D', 'E', 'F', 'c', 'd', 'e', 'f']),
                fuzz_hex(f),
                fuzz_hex(f)
            )
        },
    ];
    pick(st, &forms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::Random;
    use crate::regexp::BugAvoidance;
    use pretty_assertions::assert_eq;
    use std::rc::Rc;
    use test_case::test_case;

    #[test_case("a", 0x61 ; "plain")]
    #[test_case("", 0 ; "empty")]
    #[test_case("\\u0041", 0x41 ; "four digit unicode")]
    #[test_case("\\u{1F600}", 0x1F600 ; "braced unicode")]
    #[test_case("\\uD83D\\uDE00", 0x1F600 ; "surrogate pair")]
    #[test_case("\\x7e", 0x7E ; "hex")]
    #[test_case("\\0", 0 ; "null")]
    #[test_case("\\17", 0o17 ; "legacy octal")]
    #[test_case("\\377", 0xFF ; "three digit octal")]
    #[test_case("\\t", 9 ; "tab")]
    #[test_case("\\b", 8 ; "backspace in class")]
    #[test_case("\\cJ", 10 ; "control letter")]
    #[test_case("\\c_", 31 ; "control underscore")]
    #[test_case("\\-", 0x2D ; "escaped dash")]
    #[test_case("\\]", 0x5D ; "identity")]
    fn values(atom: &str, expected: u32) {
        assert_eq!(char_val(atom), expected);
    }

    fn state(seed: u64, unicode: bool) -> RegExpState {
        RegExpState::new(Random::seeded(seed), unicode, 5, Rc::new(BugAvoidance::default()))
    }

    #[test]
    fn unicode_escapes_are_never_lone_surrogates() {
        for seed in 0..50 {
            let st = state(seed, true);
            for _ in 0..20 {
                let e = fuzz_unicode_escape(&st);
                let v = char_val(&e);
                assert!(!(0xD800..=0xDFFF).contains(&v), "{e}");
                assert!(v <= 0x10FFFF, "{e}");
            }
        }
    }

    #[test]
    fn legacy_unicode_escapes_are_four_digits() {
        let st = state(3, false);
        for _ in 0..20 {
            let e = fuzz_unicode_escape(&st);
            assert_eq!(e.len(), 6);
            assert!(e.starts_with("\\u"));
        }
    }
}
