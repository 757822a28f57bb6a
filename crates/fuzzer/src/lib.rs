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

//! Randomized generation of syntactically legal ECMAScript programs and regular expression
//! patterns, for driving parsers, code generators and pattern engines under test.
//!
//! Generation is a depth-bounded recursive walk over the grammar. Each production reads the
//! grammar context ([`FuzzerState`]) to decide what is legal where it stands, and hands a
//! transformed copy to its children. Pattern literals are produced by a parallel engine over
//! [`RegExpState`], shaped by what the target pattern engine can compile.

mod combinators;
mod config;
mod errors;
mod escape;
mod identifiers;
pub mod productions;
mod random;
pub mod regexp;
mod state;

pub use crate::combinators::{
    Alt, FuzzContext, MANY_BOUND, RETRY_LIMIT, ap, choose, either, guard_depth, guard_value,
    many, many_n, many1, one_of, opt, pick,
};
pub use crate::config::{ENV_PREFIX, FuzzerConfig};
pub use crate::errors::FuzzError;
pub use crate::escape::{RawPosition, escape_raw};
pub use crate::identifiers::{
    Position, RESERVED, STRICT_RESERVED, fuzz_binding_name, fuzz_identifier,
    fuzz_identifier_name, fuzz_label, fuzz_reference_name, is_reserved, special_names,
};
pub use crate::productions::{
    fuzz_expression, fuzz_module, fuzz_program, fuzz_script, fuzz_statement,
};
pub use crate::random::Random;
pub use crate::regexp::{
    BugAvoidance, CapabilityProbe, OnigEngine, PatternEngine, RegExpPattern, RegExpState,
    fuzz_regexp_pattern, fuzz_regexp_pattern_body,
};
pub use crate::state::{DEFAULT_MAX_DEPTH, FunctionKind, FuzzerState};

#[cfg(test)]
mod tests;
