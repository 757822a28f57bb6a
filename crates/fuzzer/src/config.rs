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

//! Generator configuration: depth bounds, the seed, and the pattern engine's capabilities.
//!
//! Layered the usual way: built-in defaults, then an optional YAML file, then `ESFUZZ_`
//! environment variables (`ESFUZZ_MAX_DEPTH=4`, `ESFUZZ_BUG_AVOIDANCE__LOOKBEHINDS=false`).

use crate::errors::FuzzError;
use crate::random::Random;
use crate::regexp::{BugAvoidance, CapabilityProbe, PatternEngine};
use crate::state::{DEFAULT_MAX_DEPTH, FuzzerState};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde_derive::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

pub const ENV_PREFIX: &str = "ESFUZZ_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuzzerConfig {
    /// Recursion bound for the grammar productions.
    pub max_depth: usize,
    /// Recursion bound for each regular expression pattern.
    pub regexp_max_depth: usize,
    /// Fixed seed for reproducible output. Without one, the OS generator seeds each run.
    pub seed: Option<u64>,
    pub bug_avoidance: BugAvoidance,
}

impl Default for FuzzerConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            regexp_max_depth: crate::regexp::DEFAULT_MAX_DEPTH,
            seed: None,
            bug_avoidance: BugAvoidance::default(),
        }
    }
}

impl FuzzerConfig {
    pub fn load(path: Option<&Path>) -> Result<Self, FuzzError> {
        let mut figment = Figment::new().merge(Serialized::defaults(FuzzerConfig::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        let config: FuzzerConfig = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;
        debug!(?config, "loaded fuzzer configuration");
        Ok(config)
    }

    /// Replace the configured capabilities with what `probe` found.
    pub fn with_probe<E: PatternEngine>(mut self, probe: &CapabilityProbe<E>) -> Self {
        self.bug_avoidance = probe.bug_avoidance().clone();
        self
    }

    /// The initial grammar context for one generation run.
    pub fn state(&self) -> FuzzerState {
        let rng = match self.seed {
            Some(seed) => Random::seeded(seed),
            None => Random::from_os_rng(),
        };
        FuzzerState::new(self.max_depth, rng)
            .with_regexp_max_depth(self.regexp_max_depth)
            .with_bug_avoidance(self.bug_avoidance.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::productions::fuzz_program;
    use figment::Jail;
    use pretty_assertions::assert_eq;

    fn load(path: Option<&str>) -> figment::error::Result<FuzzerConfig> {
        FuzzerConfig::load(path.map(Path::new)).map_err(|e| e.to_string().into())
    }

    #[test]
    fn defaults_without_file_or_environment() {
        Jail::expect_with(|_| {
            assert_eq!(load(None)?, FuzzerConfig::default());
            Ok(())
        });
    }

    #[test]
    fn file_then_environment() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "esfuzz.yaml",
                concat!(
                    "max_depth: 4\n",
                    "seed: 17\n",
                    "bug_avoidance:\n",
                    "  lookbehinds: false\n",
                    "  broken_property_names: [\"Script=Adlam\"]\n",
                ),
            )?;
            jail.set_env("ESFUZZ_MAX_DEPTH", "3");
            jail.set_env("ESFUZZ_BUG_AVOIDANCE__NAMED_GROUPS", "false");
            let config = load(Some("esfuzz.yaml"))?;
            assert_eq!(config.max_depth, 3);
            assert_eq!(config.regexp_max_depth, crate::regexp::DEFAULT_MAX_DEPTH);
            assert_eq!(config.seed, Some(17));
            assert!(!config.bug_avoidance.lookbehinds);
            assert!(!config.bug_avoidance.named_groups);
            assert!(config.bug_avoidance.unicode_properties);
            assert_eq!(
                config.bug_avoidance.broken_property_names,
                vec!["Script=Adlam".to_string()]
            );
            Ok(())
        });
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        Jail::expect_with(|jail| {
            jail.create_file("esfuzz.yaml", "max_depth: lots")?;
            let result = FuzzerConfig::load(Some(Path::new("esfuzz.yaml")));
            assert!(matches!(result, Err(FuzzError::Config(_))));
            Ok(())
        });
    }

    #[test]
    fn seeded_states_replay() {
        let config = FuzzerConfig {
            seed: Some(99),
            max_depth: 4,
            ..Default::default()
        };
        assert_eq!(fuzz_program(&config.state()), fuzz_program(&config.state()));
    }

    #[test]
    fn probe_overrides_capabilities() {
        let probe = CapabilityProbe::new(|_: &str, _: &str| false);
        let config = FuzzerConfig::default().with_probe(&probe);
        assert!(!config.bug_avoidance.named_groups);
        assert!(!config.bug_avoidance.unicode_properties);
    }
}
