use std::{fmt::Display, num::ParseIntError, str::FromStr, sync::LazyLock};

use regex::Regex;
use snafu::{OptionExt, ResultExt, Snafu};

static RELEASE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v?(?P<major>\d+)\.(?P<minor>\d+)(?:\.[0-9A-Za-z.+-]+)?$")
        .expect("failed to compile release regex")
});

/// Error variants which can be encountered when creating a new [`Release`]
/// from unparsed input.
#[derive(Debug, Eq, PartialEq, Snafu)]
pub enum ParseReleaseError {
    #[snafu(display("invalid release format {input:?}, expected <MAJOR>.<MINOR>(.<PATCH>)"))]
    InvalidFormat { input: String },

    #[snafu(display("failed to parse major version"))]
    ParseMajor { source: ParseIntError },

    #[snafu(display("failed to parse minor version"))]
    ParseMinor { source: ParseIntError },
}

/// An orchestrator release, the `<MAJOR>.<MINOR>` part of a version.
///
/// Users may pin a release instead of a concrete version, in which case the
/// latest supported patch version of that release is picked.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Release {
    pub major: u64,
    pub minor: u64,
}

impl FromStr for Release {
    type Err = ParseReleaseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let captures = RELEASE_REGEX
            .captures(input)
            .context(InvalidFormatSnafu { input })?;

        // Both groups are mandatory in the regex, a successful match always
        // carries them.
        let major = captures
            .name("major")
            .map_or("", |m| m.as_str())
            .parse::<u64>()
            .context(ParseMajorSnafu)?;
        let minor = captures
            .name("minor")
            .map_or("", |m| m.as_str())
            .parse::<u64>()
            .context(ParseMinorSnafu)?;

        Ok(Self { major, minor })
    }
}

impl Display for Release {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{major}.{minor}", major = self.major, minor = self.minor)
    }
}

impl From<&semver::Version> for Release {
    fn from(version: &semver::Version) -> Self {
        Self::new(version.major, version.minor)
    }
}

impl Release {
    pub fn new(major: u64, minor: u64) -> Self {
        Self { major, minor }
    }

    /// Returns whether `version` belongs to this release. Unparseable
    /// versions belong to no release.
    pub fn contains(&self, version: &str) -> bool {
        semver::Version::parse(version).is_ok_and(|v| Self::from(&v) == *self)
    }
}

#[cfg(test)]
mod test {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("1.22", Release::new(1, 22))]
    #[case("v1.9", Release::new(1, 9))]
    #[case("1.22.16", Release::new(1, 22))]
    #[case("v1.23.0-alpha.1", Release::new(1, 23))]
    fn valid_release(#[case] input: &str, #[case] expected: Release) {
        let release = Release::from_str(input).expect("valid release");
        assert_eq!(release, expected);
    }

    #[rstest]
    #[case("")]
    #[case("1")]
    #[case("one.two")]
    #[case("1.22.")]
    fn invalid_release(#[case] input: &str) {
        let err = Release::from_str(input).expect_err("invalid release");
        assert_eq!(
            err,
            ParseReleaseError::InvalidFormat {
                input: input.to_owned()
            }
        );
    }

    #[rstest]
    #[case("1.22.16", true)]
    #[case("1.22.0-beta.1", true)]
    #[case("1.23.1", false)]
    #[case("garbage", false)]
    fn contains(#[case] version: &str, #[case] expected: bool) {
        assert_eq!(Release::new(1, 22).contains(version), expected);
    }

    #[test]
    fn display() {
        assert_eq!(Release::new(1, 24).to_string(), "1.24");
    }
}
