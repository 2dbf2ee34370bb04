// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing property source implementations.
//!
//! Each adapter implements the `PropertySource` port for one kind of input.
//! Defaults and callbacks are always available; the environment, argument and
//! YAML adapters sit behind the `env`, `cli` and `yaml` features.

pub mod callback;
#[cfg(feature = "cli")]
pub mod cli;
pub mod defaults;
#[cfg(feature = "env")]
pub mod env_var;
#[cfg(feature = "yaml")]
pub mod yaml_file;

// Re-export adapters based on feature flags
pub use callback::CallbackSource;
#[cfg(feature = "cli")]
pub use cli::ArgsSource;
pub use defaults::DefaultsSource;
#[cfg(feature = "env")]
pub use env_var::EnvVarSource;
#[cfg(feature = "yaml")]
pub use yaml_file::{YamlFileSource, YamlParser};

use crate::domain::RawValue;
use std::collections::HashMap;

/// Finds the value for a source key in a map whose keys may differ in case.
///
/// An exact-case key wins. Otherwise, among keys equal ignoring case, the
/// smallest key in byte order is used so repeated passes pick the same value.
pub(crate) fn lookup_key<'a>(
    values: &'a HashMap<String, RawValue>,
    key: &str,
) -> Option<&'a RawValue> {
    if let Some(value) = values.get(key) {
        return Some(value);
    }
    let lowered = key.to_lowercase();
    values
        .iter()
        .filter(|(candidate, _)| candidate.to_lowercase() == lowered)
        .min_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(_, value)| value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, RawValue> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), RawValue::from(*v)))
            .collect()
    }

    #[test]
    fn test_lookup_key_prefers_exact_case() {
        let map = values(&[("OPT_B", "1"), ("opt_b", "2"), ("Opt_B", "3")]);
        assert_eq!(lookup_key(&map, "OPT_B"), Some(&RawValue::from("1")));
        assert_eq!(lookup_key(&map, "opt_b"), Some(&RawValue::from("2")));
    }

    #[test]
    fn test_lookup_key_case_insensitive_is_stable() {
        for _ in 0..50 {
            // Fresh maps iterate in different orders; "Opt_A" sorts first
            let map = values(&[("opt_a", "lower"), ("Opt_A", "mixed")]);
            assert_eq!(lookup_key(&map, "OPT_A"), Some(&RawValue::from("mixed")));
        }
    }

    #[test]
    fn test_lookup_key_missing() {
        let map = values(&[("other", "x")]);
        assert!(lookup_key(&map, "OPT_A").is_none());
    }
}
