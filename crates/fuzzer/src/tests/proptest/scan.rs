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

//! A small reader for generated pattern text: enough structure to count capturing groups and
//! find escapes, without being a regex parser.

#[derive(Debug, Default, PartialEq)]
pub struct PatternScan {
    pub capture_count: usize,
    pub group_names: Vec<String>,
    pub numeric_references: Vec<usize>,
    pub named_references: Vec<String>,
    /// The character after each backslash, in order.
    pub escapes: Vec<char>,
}

fn read_until(chars: &[char], mut i: usize, end: char) -> (String, usize) {
    let mut out = String::new();
    while i < chars.len() && chars[i] != end {
        out.push(chars[i]);
        i += 1;
    }
    (out, i + 1)
}

pub fn scan_pattern(pattern: &str) -> PatternScan {
    let chars: Vec<char> = pattern.chars().collect();
    let mut scan = PatternScan::default();
    let mut in_class = false;
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '\\' if i + 1 < chars.len() => {
                let c = chars[i + 1];
                scan.escapes.push(c);
                i += 2;
                if in_class {
                    continue;
                }
                if c.is_ascii_digit() && c != '0' {
                    let mut digits = c.to_string();
                    while i < chars.len() && chars[i].is_ascii_digit() {
                        digits.push(chars[i]);
                        i += 1;
                    }
                    if let Ok(n) = digits.parse() {
                        scan.numeric_references.push(n);
                    }
                } else if c == 'k' && chars.get(i) == Some(&'<') {
                    let (name, next) = read_until(&chars, i + 1, '>');
                    scan.named_references.push(name);
                    i = next;
                }
            }
            '[' if !in_class => {
                in_class = true;
                i += 1;
            }
            ']' if in_class => {
                in_class = false;
                i += 1;
            }
            '(' if !in_class => {
                if chars.get(i + 1) != Some(&'?') {
                    scan.capture_count += 1;
                    i += 1;
                } else if chars.get(i + 2) == Some(&'<')
                    && !matches!(chars.get(i + 3), Some('=') | Some('!'))
                {
                    let (name, next) = read_until(&chars, i + 3, '>');
                    scan.capture_count += 1;
                    scan.group_names.push(name);
                    i = next;
                } else {
                    i += 2;
                }
            }
            _ => i += 1,
        }
    }
    scan
}

#[cfg(test)]
mod tests {
    use super::scan_pattern;
    use pretty_assertions::assert_eq;

    #[test]
    fn counts_groups_and_references() {
        let scan = scan_pattern(r"(a)(?:b)(?<x>c)(?<=d)(?<!e)[(\1]\1\k<x>\\p");
        assert_eq!(scan.capture_count, 2);
        assert_eq!(scan.group_names, vec!["x".to_string()]);
        assert_eq!(scan.numeric_references, vec![1]);
        assert_eq!(scan.named_references, vec!["x".to_string()]);
        assert_eq!(scan.escapes, vec!['1', '1', 'k', '\\']);
    }

    #[test]
    fn escaped_names_read_whole() {
        let scan = scan_pattern(r"(?<a\u0062>.)\k<a\u0062>");
        assert_eq!(scan.group_names, vec![r"a\u0062".to_string()]);
        assert_eq!(scan.named_references, vec![r"a\u0062".to_string()]);
    }
}
