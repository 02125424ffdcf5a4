use crate::{Platform, Release, VersionTable, latest_patch_version};

fn parse_exact_release(release: &str) -> Option<Release> {
    release
        .parse::<Release>()
        .ok()
        .filter(|parsed| parsed.to_string() == release)
}

/// Turns the user supplied release and version into a concrete supported
/// version.
///
/// - neither given: the default version of the platform
/// - only the release: the latest patch version of that release
/// - only the version: the version itself, if it is known
/// - both: the version, if it is known and belongs to the release
///
/// A leading `v` is ignored on both. Returns [`None`] if the input cannot be
/// satisfied.
pub fn rationalize_release_and_version(
    release: &str,
    version: &str,
    is_update: bool,
    platform: Platform,
) -> Option<String> {
    let release = release.strip_prefix('v').unwrap_or(release);
    let version = version.strip_prefix('v').unwrap_or(version);

    let table = VersionTable::for_platform(platform);
    let versions = table.all_versions(is_update);

    match (release.is_empty(), version.is_empty()) {
        (true, true) => table.default_version(),
        (false, true) => latest_patch_version(parse_exact_release(release)?, &versions),
        (true, false) => versions.into_iter().find(|v| v == version),
        (false, false) => {
            let release = parse_exact_release(release)?;
            versions
                .into_iter()
                .find(|v| v == version && release.contains(v))
        }
    }
}

/// Returns `version` if it is supported, otherwise the latest supported patch
/// version of the same release. An empty `version` yields the platform
/// default.
pub fn valid_patch_version(version: &str, is_update: bool, platform: Platform) -> Option<String> {
    if version.is_empty() {
        return rationalize_release_and_version("", "", is_update, platform);
    }

    rationalize_release_and_version("", version, is_update, platform).or_else(|| {
        let parsed = semver::Version::parse(version).ok()?;
        let release = Release::from(&parsed).to_string();
        rationalize_release_and_version(&release, "", is_update, platform)
    })
}

#[cfg(test)]
mod test {
    use rstest::rstest;
    use rstest_reuse::{apply, template};

    use super::*;

    const AZURE_STACK: Platform = Platform {
        has_windows: false,
        is_azure_stack: true,
    };

    #[template]
    #[rstest]
    #[case::defaults("", "", false, Platform::default(), Some("1.24.8"))]
    #[case::release_only("1.22", "", false, Platform::default(), Some("1.22.16"))]
    #[case::v_prefixed_release("v1.22", "", false, Platform::default(), Some("1.22.16"))]
    #[case::version_only("", "1.21.14", false, Platform::default(), Some("1.21.14"))]
    #[case::v_prefixed_version("", "v1.21.14", false, Platform::default(), Some("1.21.14"))]
    #[case::disabled_version_on_create("", "1.21.3", false, Platform::default(), None)]
    #[case::disabled_version_on_update("", "1.21.3", true, Platform::default(), Some("1.21.3"))]
    #[case::matching_pair("1.23", "1.23.14", false, Platform::default(), Some("1.23.14"))]
    #[case::mismatched_pair("1.22", "1.23.14", false, Platform::default(), None)]
    #[case::unknown_release("1.9", "", false, Platform::default(), None)]
    #[case::azure_stack_default("", "", false, AZURE_STACK, Some("1.23.14"))]
    #[case::azure_stack_release("1.22", "", true, AZURE_STACK, Some("1.22.16"))]
    fn rationalize_cases(
        #[case] release: &str,
        #[case] version: &str,
        #[case] is_update: bool,
        #[case] platform: Platform,
        #[case] expected: Option<&str>,
    ) {
    }

    #[apply(rationalize_cases)]
    fn rationalize(
        release: &str,
        version: &str,
        is_update: bool,
        platform: Platform,
        expected: Option<&str>,
    ) {
        let actual = rationalize_release_and_version(release, version, is_update, platform);
        assert_eq!(actual.as_deref(), expected);
    }

    #[apply(rationalize_cases)]
    fn rationalize_is_stable(
        release: &str,
        version: &str,
        is_update: bool,
        platform: Platform,
        expected: Option<&str>,
    ) {
        // Feeding a rationalized version back in must not move it.
        if let Some(first) = rationalize_release_and_version(release, version, is_update, platform)
        {
            let second = rationalize_release_and_version("", &first, is_update, platform);
            assert_eq!(second.as_deref(), expected);
        }
    }

    #[rstest]
    #[case::empty("", Some("1.24.8"))]
    #[case::supported("1.22.16", Some("1.22.16"))]
    #[case::falls_back_to_latest_patch("1.22.3", Some("1.22.16"))]
    #[case::unknown_release("1.9.1", None)]
    #[case::garbage("latest", None)]
    fn patch_version(#[case] version: &str, #[case] expected: Option<&str>) {
        let actual = valid_patch_version(version, false, Platform::default());
        assert_eq!(actual.as_deref(), expected);
    }
}
