//! This library provides the orchestrator version handling used while
//! resolving cluster configurations. It knows which Kubernetes versions can
//! be deployed (and upgraded to) per platform, compares versions the way
//! version-gated rules expect and turns loosely specified input (a bare
//! `major.minor` release, a `v`-prefixed version or nothing at all) into a
//! concrete supported version.
//!
//! ## Usage
//!
//! ```
//! use cluster_version::{Platform, rationalize_release_and_version};
//!
//! let version = rationalize_release_and_version("1.22", "", false, Platform::default());
//! assert_eq!(version.as_deref(), Some("1.22.16"));
//! ```
//!
//! Releases can be parsed from either a release or a full version string
//! using [`FromStr`](std::str::FromStr).
//!
//! ```
//! use cluster_version::Release;
//!
//! let release: Release = "v1.22.3".parse().expect("valid release");
//! assert_eq!(release.to_string(), "1.22");
//! ```

// NOTE: Fixed in https://github.com/la10736/rstest/pull/244 but not yet
// released.
#[cfg(test)]
use rstest_reuse::{self};

mod compare;
mod rationalize;
mod release;
mod table;

pub use compare::*;
pub use rationalize::*;
pub use release::*;
pub use table::*;
