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

//! Raw text for directives and template elements.
//!
//! Raw values are emitted verbatim by a code generator, so the random text has to be
//! rewritten until it is a legal literal body. Each rewrite can expose a new violation
//! (`\8\8` only shows its second `\8` after the first is fixed), so the rules are applied
//! until nothing changes.

use lazy_static::lazy_static;
use regex::Regex;

// A backslash that is not itself escaped: an even run of backslashes that is not preceded
// by another one. Capture groups 1 and 2 carry that prefix through replacement.
macro_rules! unescaped {
    ($tail:literal) => {
        Regex::new(concat!(r"(^|[^\\])((?:\\\\)*)", $tail)).unwrap()
    };
}

lazy_static! {
    static ref DECIMAL_ESCAPE_89: Regex = unescaped!(r"\\([89])");
    static ref TRAILING_BACKSLASH: Regex = unescaped!(r"\\$");
    static ref HEX_OR_UNICODE_ESCAPE: Regex = unescaped!(r"\\([ux])");
    static ref OCTAL_ESCAPE: Regex = unescaped!(r"\\(0[0-9]|[1-7])");
    static ref LINE_TERMINATOR: Regex = unescaped!(r"([\n\r\u{2028}\u{2029}])");
    static ref DOUBLE_QUOTE: Regex = unescaped!("(\")");
    static ref SINGLE_QUOTE: Regex = unescaped!("(')");
    static ref BACKTICK: Regex = unescaped!("(`)");
    static ref TEMPLATE_SUBSTITUTION: Regex = unescaped!(r"(\$\{)");
}

/// Escapes the matched character by inserting a backslash before it.
const ESCAPE_IT: &str = r"${1}${2}\${3}";
/// Escapes the backslash of a matched escape sequence, leaving its body literal.
const ESCAPE_BACKSLASH: &str = r"${1}${2}\\${3}";

/// Where a raw value will be emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawPosition {
    /// Between quotes in a directive prologue.
    Directive,
    /// Between template delimiters.
    Template,
}

fn rewrite_once(raw: &str, position: RawPosition) -> String {
    let mut s = DECIMAL_ESCAPE_89.replace_all(raw, ESCAPE_BACKSLASH).into_owned();
    s = TRAILING_BACKSLASH.replace_all(&s, r"${1}${2}\\").into_owned();
    s = HEX_OR_UNICODE_ESCAPE
        .replace_all(&s, ESCAPE_BACKSLASH)
        .into_owned();
    // Templates never allow octal escapes. A directive may precede "use strict" in the same
    // prologue, so it is held to strict rules regardless of the enclosing code.
    s = OCTAL_ESCAPE.replace_all(&s, ESCAPE_BACKSLASH).into_owned();
    match position {
        RawPosition::Directive => {
            s = LINE_TERMINATOR.replace_all(&s, "${1}${2}").into_owned();
            s = DOUBLE_QUOTE.replace_all(&s, ESCAPE_IT).into_owned();
            s = SINGLE_QUOTE.replace_all(&s, ESCAPE_IT).into_owned();
        }
        RawPosition::Template => {
            s = BACKTICK.replace_all(&s, ESCAPE_IT).into_owned();
            s = TEMPLATE_SUBSTITUTION.replace_all(&s, ESCAPE_IT).into_owned();
        }
    }
    s
}

/// Rewrite `raw` until it is a legal raw value at `position`.
pub fn escape_raw(raw: &str, position: RawPosition) -> String {
    let mut current = raw.to_string();
    loop {
        let next = rewrite_once(&current, position);
        if next == current {
            return current;
        }
        current = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(r"\8", r"\\8" ; "lone eight")]
    #[test_case(r"\8\8", r"\\8\\8" ; "adjacent eights")]
    #[test_case(r"\\8", r"\\8" ; "already escaped")]
    #[test_case(r"ab\", r"ab\\" ; "trailing backslash")]
    #[test_case(r"\u12", r"\\u12" ; "unicode escape")]
    #[test_case(r"\x", r"\\x" ; "hex escape")]
    #[test_case(r"\07", r"\\07" ; "octal zero")]
    #[test_case(r"\0a", r"\0a" ; "null escape")]
    #[test_case(r"\3", r"\\3" ; "octal digit")]
    #[test_case(r#"a"b'"#, r#"a\"b\'"# ; "quotes")]
    fn directive_rewrites(raw: &str, expected: &str) {
        assert_eq!(escape_raw(raw, RawPosition::Directive), expected);
    }

    #[test]
    fn directive_line_terminators_are_dropped() {
        assert_eq!(escape_raw("a\nb", RawPosition::Directive), "ab");
        // An escaped line terminator is a line continuation and stays.
        assert_eq!(escape_raw("a\\\nb", RawPosition::Directive), "a\\\nb");
    }

    #[test]
    fn template_rewrites() {
        assert_eq!(escape_raw("`${x}", RawPosition::Template), r"\`\${x}");
        assert_eq!(escape_raw("$x {", RawPosition::Template), "$x {");
        assert_eq!(escape_raw("a\nb", RawPosition::Template), "a\nb");
        assert_eq!(escape_raw(r"\1", RawPosition::Template), r"\\1");
    }

    #[test]
    fn rewriting_is_idempotent() {
        for raw in [r"\\\8", r"\u\x\8\9\", "\"'`${", r"\\\\\"] {
            for pos in [RawPosition::Directive, RawPosition::Template] {
                let once = escape_raw(raw, pos);
                assert_eq!(escape_raw(&once, pos), once);
            }
        }
    }
}
