//! Helpers for comma separated `key=value` flag values such as
//! `--feature-gates`.
use std::collections::BTreeMap;

use cluster_version::is_version_ge;

pub const FEATURE_GATES: &str = "--feature-gates";

fn apply_values(values: &mut BTreeMap<String, String>, input: &str) {
    for value in input.split(',') {
        let parts: Vec<&str> = value.trim_matches(' ').split('=').collect();
        if let [key, value] = parts.as_slice() {
            values.insert((*key).to_owned(), (*value).to_owned());
        }
    }
}

fn join_values(values: &BTreeMap<String, String>) -> String {
    values
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Merges comma separated `key=value` lists. Later inputs win, malformed
/// entries are dropped and the output is sorted by key.
pub fn combine_values<'a>(inputs: impl IntoIterator<Item = &'a str>) -> String {
    let mut values = BTreeMap::new();
    for input in inputs {
        apply_values(&mut values, input);
    }
    join_values(&values)
}

/// Merges `defaults` into the `--feature-gates` value of `config`, with the
/// values already present taking precedence. The defaults are only applied
/// if `version` is at least `min_version`; an empty `min_version` applies
/// them unconditionally. The flag is always written, even if it ends up
/// empty.
pub fn add_default_feature_gates(
    config: &mut BTreeMap<String, String>,
    version: &str,
    min_version: &str,
    defaults: &str,
) {
    let defaults = if min_version.is_empty() || is_version_ge(version, min_version) {
        defaults
    } else {
        ""
    };

    let current = config.get(FEATURE_GATES).map_or("", String::as_str);
    let combined = combine_values([defaults, current]);
    config.insert(FEATURE_GATES.to_owned(), combined);
}

/// Removes the named gates from an existing `--feature-gates` value.
pub fn remove_invalid_feature_gates(config: &mut BTreeMap<String, String>, invalid: &[&str]) {
    let Some(current) = config.get_mut(FEATURE_GATES) else {
        return;
    };

    let mut values = BTreeMap::new();
    apply_values(&mut values, current);
    for gate in invalid {
        values.remove(*gate);
    }

    *current = join_values(&values);
}
