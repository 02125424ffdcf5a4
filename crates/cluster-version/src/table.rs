use crate::{Release, sort_versions};

/// Default release for Linux clusters on public clouds.
pub const DEFAULT_RELEASE: &str = "1.24";
/// Default release for clusters with Windows node pools.
pub const DEFAULT_RELEASE_WINDOWS: &str = "1.23";
/// Default release for Linux clusters on Azure Stack.
pub const DEFAULT_RELEASE_AZURE_STACK: &str = "1.23";
/// Default release for clusters with Windows node pools on Azure Stack.
pub const DEFAULT_RELEASE_WINDOWS_AZURE_STACK: &str = "1.23";

/// All known Kubernetes versions. The flag marks whether new clusters may be
/// created with that version; every listed version is valid for upgrades.
///
/// Windows clusters share this table.
const KUBERNETES_VERSIONS: &[(&str, bool)] = &[
    ("1.15.0-alpha.1", false),
    ("1.15.0-alpha.2", false),
    ("1.15.0-alpha.3", false),
    ("1.15.0-beta.1", false),
    ("1.15.0-beta.2", false),
    ("1.15.0-rc.1", false),
    ("1.15.0", false),
    ("1.15.1", false),
    ("1.15.2", false),
    ("1.15.3", false),
    ("1.15.4", false),
    ("1.15.5", false),
    ("1.15.7", false),
    ("1.15.8", false),
    ("1.15.9", false),
    ("1.15.10", false),
    ("1.15.11", false),
    ("1.15.12", false),
    ("1.16.0-alpha.1", false),
    ("1.16.0-alpha.2", false),
    ("1.16.0-alpha.3", false),
    ("1.16.0-beta.1", false),
    ("1.16.0-beta.2", false),
    ("1.16.0-rc.1", false),
    ("1.16.0", false),
    ("1.16.1", false),
    ("1.16.2", false),
    ("1.16.4", false),
    ("1.16.5", false),
    ("1.16.6", false),
    ("1.16.7", false),
    ("1.16.8", false),
    ("1.16.9", false),
    ("1.16.10", false),
    ("1.16.11", false),
    ("1.16.12", false),
    ("1.16.13", false),
    ("1.16.14", false),
    ("1.16.15", false),
    ("1.17.0-alpha.1", false),
    ("1.17.0-alpha.2", false),
    ("1.17.0-alpha.3", false),
    ("1.17.0-beta.1", false),
    ("1.17.0-beta.2", false),
    ("1.17.0-rc.1", false),
    ("1.17.0-rc.2", false),
    ("1.17.0", false),
    ("1.17.1", false),
    ("1.17.2", false),
    ("1.17.3", false),
    ("1.17.4", false),
    ("1.17.5", false),
    ("1.17.6", false),
    ("1.17.7", false),
    ("1.17.8", false),
    ("1.17.9", false),
    ("1.17.10", false),
    ("1.17.11", false),
    ("1.17.12", false),
    ("1.17.13", false),
    ("1.17.14", false),
    ("1.17.15", false),
    ("1.17.16", false),
    ("1.17.17", false),
    ("1.18.0-alpha.1", false),
    ("1.18.0-alpha.2", false),
    ("1.18.0-alpha.3", false),
    ("1.18.0-alpha.5", false),
    ("1.18.0-beta.1", false),
    ("1.18.0", false),
    ("1.18.1", false),
    ("1.18.2", false),
    ("1.18.3", false),
    ("1.18.4", false),
    ("1.18.5", false),
    ("1.18.6", false),
    ("1.18.7", false),
    ("1.18.8", false),
    ("1.18.9", false),
    ("1.18.10", false),
    ("1.18.11", false),
    ("1.18.12", false),
    ("1.18.13", false),
    ("1.18.14", false),
    ("1.18.15", false),
    ("1.18.16", false),
    ("1.18.17", false),
    ("1.18.18", false),
    ("1.18.19", false),
    ("1.18.20", false),
    ("1.19.0-alpha.1", false),
    ("1.19.0-alpha.2", false),
    ("1.19.0-alpha.3", false),
    ("1.19.0-beta.0", false),
    ("1.19.0-beta.1", false),
    ("1.19.0-beta.2", false),
    ("1.19.0-rc.3", false),
    ("1.19.0-rc.4", false),
    ("1.19.0", false),
    ("1.19.1", false),
    ("1.19.2", false),
    ("1.19.3", false),
    ("1.19.4", false),
    ("1.19.5", false),
    ("1.19.6", false),
    ("1.19.7", false),
    ("1.19.8", false),
    ("1.19.9", false),
    ("1.19.10", false),
    ("1.19.11", false),
    ("1.19.12", false),
    ("1.19.13", false),
    ("1.19.14", false),
    ("1.19.15", false),
    ("1.19.16", false),
    ("1.20.0-alpha.1", false),
    ("1.20.0-alpha.2", false),
    ("1.20.0-alpha.3", false),
    ("1.20.0-beta.0", false),
    ("1.20.0-beta.1", false),
    ("1.20.0-beta.2", false),
    ("1.20.0-rc.0", false),
    ("1.20.0", false),
    ("1.20.1", false),
    ("1.20.2", false),
    ("1.20.3", false),
    ("1.20.4", false),
    ("1.20.5", false),
    ("1.20.6", false),
    ("1.20.7", false),
    ("1.20.8", false),
    ("1.20.9", false),
    ("1.20.10", false),
    ("1.20.11", false),
    ("1.20.12", false),
    ("1.20.13", false),
    ("1.20.14", false),
    ("1.20.15", true),
    ("1.21.0-alpha.1", false),
    ("1.21.0-alpha.2", false),
    ("1.21.0-alpha.3", false),
    ("1.21.0-beta.0", false),
    ("1.21.0-beta.1", false),
    ("1.21.0-rc.0", false),
    ("1.21.0", false),
    ("1.21.1", false),
    ("1.21.2", false),
    ("1.21.3", false),
    ("1.21.4", false),
    ("1.21.5", false),
    ("1.21.6", false),
    ("1.21.7", false),
    ("1.21.8", false),
    ("1.21.9", false),
    ("1.21.10", false),
    ("1.21.11", false),
    ("1.21.12", false),
    ("1.21.13", false),
    ("1.21.14", true),
    ("1.22.0-alpha.1", false),
    ("1.22.0-alpha.2", false),
    ("1.22.0-alpha.3", false),
    ("1.22.0-beta.0", false),
    ("1.22.0-beta.1", false),
    ("1.22.0-beta.2", false),
    ("1.22.0", false),
    ("1.22.1", false),
    ("1.22.2", false),
    ("1.22.3", false),
    ("1.22.4", false),
    ("1.22.5", false),
    ("1.22.6", false),
    ("1.22.7", false),
    ("1.22.8", false),
    ("1.22.9", false),
    ("1.22.10", false),
    ("1.22.11", false),
    ("1.22.12", false),
    ("1.22.13", false),
    ("1.22.14", false),
    ("1.22.15", false),
    ("1.22.16", true),
    ("1.23.0-alpha.1", false),
    ("1.23.0-alpha.2", false),
    ("1.23.0-alpha.3", false),
    ("1.23.0-alpha.4", false),
    ("1.23.0-beta.0", false),
    ("1.23.0-rc.0", false),
    ("1.23.0-rc.1", false),
    ("1.23.0", false),
    ("1.23.1", false),
    ("1.23.2", false),
    ("1.23.3", false),
    ("1.23.4", false),
    ("1.23.5", false),
    ("1.23.6", false),
    ("1.23.7", false),
    ("1.23.8", false),
    ("1.23.9", false),
    ("1.23.10", false),
    ("1.23.11", false),
    ("1.23.12", false),
    ("1.23.13", false),
    ("1.23.14", true),
    ("1.24.0-alpha.2", false),
    ("1.24.0-alpha.3", false),
    ("1.24.0", false),
    ("1.24.1", false),
    ("1.24.2", false),
    ("1.24.3", false),
    ("1.24.4", false),
    ("1.24.5", false),
    ("1.24.6", false),
    ("1.24.7", false),
    ("1.24.8", true),
];

/// Kubernetes versions available on Azure Stack Hub.
const KUBERNETES_VERSIONS_AZURE_STACK: &[(&str, bool)] = &[
    ("1.14.7", false),
    ("1.14.8", false),
    ("1.15.4", false),
    ("1.15.5", false),
    ("1.15.10", false),
    ("1.15.11", false),
    ("1.15.12", false),
    ("1.16.9", false),
    ("1.16.10", false),
    ("1.16.11", false),
    ("1.16.13", false),
    ("1.16.14", false),
    ("1.16.15", false),
    ("1.17.4", false),
    ("1.17.5", false),
    ("1.17.6", false),
    ("1.17.7", false),
    ("1.17.9", false),
    ("1.17.11", false),
    ("1.17.17", false),
    ("1.18.10", false),
    ("1.18.15", false),
    ("1.18.18", false),
    ("1.19.10", false),
    ("1.19.15", false),
    ("1.20.6", false),
    ("1.20.11", false),
    ("1.21.10", false),
    ("1.22.7", false),
    ("1.22.15", false),
    ("1.22.16", true),
    ("1.23.6", false),
    ("1.23.12", false),
    ("1.23.13", false),
    ("1.23.14", true),
];

/// Windows node pools on Azure Stack Hub are not available before 1.15.
const WINDOWS_AZURE_STACK_MIN_RELEASE: Release = Release { major: 1, minor: 15 };

/// The platform a cluster targets. It selects the version table and the
/// default release.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct Platform {
    pub has_windows: bool,
    pub is_azure_stack: bool,
}

/// The set of versions available for one [`Platform`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VersionTable {
    platform: Platform,
    entries: &'static [(&'static str, bool)],
    default_release: &'static str,
}

impl VersionTable {
    pub fn for_platform(platform: Platform) -> Self {
        let (entries, default_release) = match (platform.is_azure_stack, platform.has_windows) {
            (false, false) => (KUBERNETES_VERSIONS, DEFAULT_RELEASE),
            (false, true) => (KUBERNETES_VERSIONS, DEFAULT_RELEASE_WINDOWS),
            (true, false) => (KUBERNETES_VERSIONS_AZURE_STACK, DEFAULT_RELEASE_AZURE_STACK),
            (true, true) => (
                KUBERNETES_VERSIONS_AZURE_STACK,
                DEFAULT_RELEASE_WINDOWS_AZURE_STACK,
            ),
        };

        Self {
            platform,
            entries,
            default_release,
        }
    }

    fn entries(&self) -> impl Iterator<Item = (&'static str, bool)> + '_ {
        self.entries.iter().copied().filter(|(version, _)| {
            !(self.platform.is_azure_stack && self.platform.has_windows)
                || semver::Version::parse(version)
                    .is_ok_and(|v| Release::from(&v) >= WINDOWS_AZURE_STACK_MIN_RELEASE)
        })
    }

    /// Returns every version usable for the operation, sorted ascending.
    /// Upgrades may target any known version, creates only enabled ones.
    pub fn all_versions(&self, is_update: bool) -> Vec<String> {
        let mut versions: Vec<String> = self
            .entries()
            .filter(|(_, enabled)| is_update || *enabled)
            .map(|(version, _)| version.to_owned())
            .collect();
        sort_versions(&mut versions);
        versions
    }

    /// The latest enabled patch version of the platform's default release.
    pub fn default_version(&self) -> Option<String> {
        let release = self.default_release.parse::<Release>().ok()?;
        latest_patch_version(release, &self.all_versions(false))
    }

    pub fn default_release(&self) -> &'static str {
        self.default_release
    }

    pub fn is_supported(&self, version: &str, is_update: bool) -> bool {
        self.entries()
            .any(|(candidate, enabled)| candidate == version && (is_update || enabled))
    }
}

/// Returns the highest version of `release` found in `versions`.
pub fn latest_patch_version(release: Release, versions: &[String]) -> Option<String> {
    versions
        .iter()
        .filter_map(|v| semver::Version::parse(v).ok().map(|parsed| (parsed, v)))
        .filter(|(parsed, _)| Release::from(parsed) == release)
        .max_by(|(lhs, _), (rhs, _)| lhs.cmp(rhs))
        .map(|(_, v)| v.clone())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::linux(Platform::default(), "1.24.8")]
    #[case::windows(Platform { has_windows: true, is_azure_stack: false }, "1.23.14")]
    #[case::azure_stack(Platform { has_windows: false, is_azure_stack: true }, "1.23.14")]
    #[case::azure_stack_windows(Platform { has_windows: true, is_azure_stack: true }, "1.23.14")]
    fn default_version(#[case] platform: Platform, #[case] expected: &str) {
        let table = VersionTable::for_platform(platform);
        assert_eq!(table.default_version().as_deref(), Some(expected));
    }

    #[test]
    fn create_only_lists_enabled_versions() {
        let versions = VersionTable::for_platform(Platform::default()).all_versions(false);
        assert_eq!(versions, ["1.20.15", "1.21.14", "1.22.16", "1.23.14", "1.24.8"]);
    }

    #[test]
    fn update_lists_every_version() {
        let versions = VersionTable::for_platform(Platform::default()).all_versions(true);
        assert!(versions.contains(&"1.15.0-alpha.1".to_owned()));
        assert_eq!(versions.last().map(String::as_str), Some("1.24.8"));
    }

    #[test]
    fn windows_on_azure_stack_skips_old_releases() {
        let table = VersionTable::for_platform(Platform {
            has_windows: true,
            is_azure_stack: true,
        });
        assert!(!table.is_supported("1.14.7", true));
        assert!(table.is_supported("1.15.10", true));
    }

    #[rstest]
    #[case("1.22", Some("1.22.16"))]
    #[case("1.15", Some("1.15.12"))]
    #[case("1.9", None)]
    fn latest_patch(#[case] release: &str, #[case] expected: Option<&str>) {
        let versions = VersionTable::for_platform(Platform::default()).all_versions(true);
        let release = release.parse().expect("valid release");
        assert_eq!(latest_patch_version(release, &versions).as_deref(), expected);
    }
}
