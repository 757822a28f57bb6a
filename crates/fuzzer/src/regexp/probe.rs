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

//! What the target pattern engine can actually compile.
//!
//! Rather than assuming a feature set, the generator asks a [`PatternEngine`] to compile a
//! small battery of patterns once, and shapes the pattern productions around the answers.

use super::properties::all_property_expressions;
use lazy_static::lazy_static;
use once_cell::unsync::OnceCell;
use serde_derive::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, info, warn};

/// Pattern features to keep out of generated patterns because the target engine rejects them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BugAvoidance {
    pub named_groups: bool,
    pub lookbehinds: bool,
    pub unicode_properties: bool,
    /// Property escape bodies (`Alpha`, `Script=Latin`, ...) the engine rejects.
    pub broken_property_names: Vec<String>,
}

impl Default for BugAvoidance {
    fn default() -> Self {
        Self {
            named_groups: true,
            lookbehinds: true,
            unicode_properties: true,
            broken_property_names: vec![],
        }
    }
}

impl BugAvoidance {
    /// Only the features every engine has.
    pub fn minimal() -> Self {
        Self {
            named_groups: false,
            lookbehinds: false,
            unicode_properties: false,
            broken_property_names: vec![],
        }
    }

    pub fn property_supported(&self, expression: &str) -> bool {
        self.unicode_properties && !self.broken_property_names.iter().any(|b| b == expression)
    }
}

/// Something that can say whether it compiles a pattern with the given flags.
pub trait PatternEngine {
    fn accepts(&self, pattern: &str, flags: &str) -> bool;
}

impl<F> PatternEngine for F
where
    F: Fn(&str, &str) -> bool,
{
    fn accepts(&self, pattern: &str, flags: &str) -> bool {
        self(pattern, flags)
    }
}

/// Runs the capability battery against an engine the first time it is asked, and answers
/// from the cached result after that.
pub struct CapabilityProbe<E: PatternEngine> {
    engine: E,
    result: OnceCell<BugAvoidance>,
}

impl<E: PatternEngine> CapabilityProbe<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            result: OnceCell::new(),
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn bug_avoidance(&self) -> &BugAvoidance {
        self.result.get_or_init(|| probe(&self.engine))
    }
}

fn probe<E: PatternEngine>(engine: &E) -> BugAvoidance {
    let named_groups = engine.accepts(r"(?<a>x)\k<a>", "");
    let lookbehinds = engine.accepts("(?<=a)b", "") && engine.accepts("(?<!a)b", "");
    let unicode_properties = engine.accepts(r"\p{L}", "u") && engine.accepts(r"\P{L}", "u");
    if !named_groups {
        info!("pattern engine does not support named groups");
    }
    if !lookbehinds {
        info!("pattern engine does not support lookbehind assertions");
    }
    let broken_property_names = if unicode_properties {
        let broken: Vec<String> = all_property_expressions()
            .into_iter()
            .filter(|expression| !engine.accepts(&format!("\\p{{{expression}}}"), "u"))
            .collect();
        if !broken.is_empty() {
            warn!(count = broken.len(), "pattern engine rejects some unicode property escapes");
            debug!(?broken, "rejected property escapes");
        }
        broken
    } else {
        info!("pattern engine does not support unicode property escapes");
        vec![]
    };
    BugAvoidance {
        named_groups,
        lookbehinds,
        unicode_properties,
        broken_property_names,
    }
}

/// Compiled patterns kept before the cache is emptied and starts over.
const ONIG_CACHE_CAPACITY: usize = 1024;

lazy_static! {
    static ref ONIG_PATTERN_CACHE: Mutex<HashMap<(String, String), Result<onig::Regex, onig::Error>>> =
        Default::default();
}

/// Oniguruma, in its Perl + named group syntax, as a [`PatternEngine`].
///
/// Only the `i` and `s` flags change how oniguruma compiles; the rest are accepted and ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct OnigEngine;

impl PatternEngine for OnigEngine {
    fn accepts(&self, pattern: &str, flags: &str) -> bool {
        let mut cache_lock = ONIG_PATTERN_CACHE
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let key = (pattern.to_string(), flags.to_string());
        if cache_lock.len() >= ONIG_CACHE_CAPACITY && !cache_lock.contains_key(&key) {
            debug!(entries = cache_lock.len(), "clearing oniguruma pattern cache");
            cache_lock.clear();
        }
        let regex = cache_lock.entry(key).or_insert_with(|| {
            let mut options = onig::RegexOptions::REGEX_OPTION_NONE;
            if flags.contains('i') {
                options |= onig::RegexOptions::REGEX_OPTION_IGNORECASE;
            }
            if flags.contains('s') {
                // Oniguruma's "multiline" is dot-matches-newline.
                options |= onig::RegexOptions::REGEX_OPTION_MULTILINE;
            }
            onig::Regex::with_options(pattern, options, onig::Syntax::perl_ng())
        });
        regex.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    #[test]
    fn probe_runs_once() {
        let calls = Cell::new(0);
        let probe = CapabilityProbe::new(|pattern: &str, _flags: &str| {
            calls.set(calls.get() + 1);
            !pattern.starts_with("(?<=") && !pattern.contains("Script")
        });
        let first = probe.bug_avoidance().clone();
        let after_first = calls.get();
        assert_eq!(probe.bug_avoidance(), &first);
        assert_eq!(calls.get(), after_first);

        assert!(first.named_groups);
        assert!(!first.lookbehinds);
        assert!(first.unicode_properties);
        assert!(first.property_supported("Alpha"));
        assert!(!first.property_supported("Script=Latin"));
        assert!(first.property_supported("sc=Latin"));
    }

    #[test]
    fn engine_without_properties() {
        let probe = CapabilityProbe::new(|pattern: &str, _flags: &str| !pattern.contains("\\p"));
        let caps = probe.bug_avoidance();
        assert!(!caps.unicode_properties);
        assert!(caps.broken_property_names.is_empty());
        assert!(!caps.property_supported("L"));
    }

    #[test]
    fn onig_compiles_and_rejects() {
        let engine = OnigEngine;
        assert!(engine.accepts("(?<name>a+)\\k<name>", ""));
        assert!(engine.accepts("a(?=b)", "i"));
        assert!(!engine.accepts("(", ""));
        // Cached answers agree with fresh ones.
        assert!(!engine.accepts("(", ""));
    }

    #[test]
    fn onig_cache_stays_bounded() {
        let engine = OnigEngine;
        for i in 0..ONIG_CACHE_CAPACITY + 50 {
            assert!(engine.accepts(&format!("a{{{i}}}"), ""));
        }
        let entries = ONIG_PATTERN_CACHE
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len();
        assert!(entries <= ONIG_CACHE_CAPACITY);
        // Answers survive a clear.
        assert!(!engine.accepts("(", ""));
    }

    #[test]
    fn onig_probe() {
        let probe = CapabilityProbe::new(OnigEngine);
        let caps = probe.bug_avoidance();
        assert!(caps.named_groups);
        assert!(caps.lookbehinds);
    }
}
