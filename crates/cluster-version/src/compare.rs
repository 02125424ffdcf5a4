use semver::Version;

/// Parses `input` as a semantic version, treating anything unparseable as
/// `0.0.0`. Version-gated rules must never fail, so a garbage version simply
/// ends up below every threshold.
fn parse_or_zero(input: &str) -> Version {
    Version::parse(input).unwrap_or_else(|_| Version::new(0, 0, 0))
}

/// Returns `true` if `actual` is greater than or equal to `threshold`.
///
/// Pre-releases sort before their release, so `1.22.0-alpha.1` is below
/// `1.22.0`. Rules that must also apply to pre-releases of a release use the
/// first pre-release as their threshold, e.g. `1.22.0-alpha.1`.
pub fn is_version_ge(actual: &str, threshold: &str) -> bool {
    parse_or_zero(actual) >= parse_or_zero(threshold)
}

/// Sorts `versions` ascending by semantic version. Unparseable entries sort
/// first.
pub fn sort_versions(versions: &mut [String]) {
    versions.sort_by_cached_key(|v| parse_or_zero(v));
}

#[cfg(test)]
mod test {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::equal("1.22.0", "1.22.0", true)]
    #[case::greater_patch("1.22.3", "1.22.0", true)]
    #[case::lower_minor("1.19.0", "1.22.0-alpha.1", false)]
    #[case::release_above_prerelease("1.22.0", "1.22.0-alpha.1", true)]
    #[case::prerelease_below_release("1.22.0-alpha.1", "1.22.0", false)]
    #[case::prerelease_order("1.22.0-beta.1", "1.22.0-alpha.3", true)]
    #[case::empty_actual("", "1.10.0", false)]
    #[case::garbage_threshold("1.10.0", "garbage", true)]
    fn version_ge(#[case] actual: &str, #[case] threshold: &str, #[case] expected: bool) {
        assert_eq!(is_version_ge(actual, threshold), expected);
    }

    #[test]
    fn sorts_semantically() {
        let mut versions = vec![
            "1.22.10".to_owned(),
            "1.22.2".to_owned(),
            "1.22.0-rc.1".to_owned(),
            "1.22.0".to_owned(),
        ];
        sort_versions(&mut versions);
        assert_eq!(versions, ["1.22.0-rc.1", "1.22.0", "1.22.2", "1.22.10"]);
    }
}
