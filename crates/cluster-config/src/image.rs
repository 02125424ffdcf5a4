//! Container image reference parsing and per-component image resolution.
//!
//! References follow the distribution grammar, normalized the same way the
//! Docker CLI does: a missing registry becomes `docker.io`, single component
//! repositories on `docker.io` live below `library/`, and a missing tag
//! becomes `latest`.
use std::{collections::BTreeMap, fmt::Display, sync::LazyLock};

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use snafu::{OptionExt, Snafu, ensure};
use tracing::debug;

use crate::{api::KubernetesConfig, cloud::CloudSpec};

pub const DEFAULT_DOMAIN: &str = "docker.io";
pub const DEFAULT_TAG: &str = "latest";
const LEGACY_DEFAULT_DOMAIN: &str = "index.docker.io";
const OFFICIAL_REPO_PREFIX: &str = "library/";
const NAME_TOTAL_LENGTH_MAX: usize = 255;

const DOMAIN_COMPONENT: &str = r"(?:[a-zA-Z0-9]|[a-zA-Z0-9][a-zA-Z0-9-]*[a-zA-Z0-9])";
const NAME_COMPONENT: &str = r"[a-z0-9]+(?:(?:[._]|__|[-]*)[a-z0-9]+)*";
const TAG: &str = r"[\w][\w.-]{0,127}";

static REFERENCE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    let domain = format!(r"{DOMAIN_COMPONENT}(?:\.{DOMAIN_COMPONENT})*(?::[0-9]+)?");
    let name = format!(r"(?:{domain}/)?{NAME_COMPONENT}(?:/{NAME_COMPONENT})*");

    Regex::new(&format!(r"^({name})(?::({TAG}))?$")).expect("failed to compile reference regex")
});

static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{TAG}$")).expect("failed to compile tag regex"));

static IDENTIFIER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^[a-f0-9]{64}$").expect("failed to compile image identifier regex")
});

type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Eq, PartialEq, Snafu)]
pub enum Error {
    #[snafu(display("no image is known for component {component:?}"))]
    ComponentNotFound { component: String },

    #[snafu(display("invalid reference format {reference:?}"))]
    InvalidReferenceFormat { reference: String },

    #[snafu(display("invalid tag format {tag:?}"))]
    InvalidTagFormat { tag: String },
}

/// Rewrites references whose untagged form equals the key this override is
/// stored under.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default)]
pub struct ImageOverride {
    /// Replaces the registry (domain) when set.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub registry: String,

    /// Replaces the repository path when set.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub repo: String,

    /// Maps the current tag to its replacement. Tags without an entry are
    /// kept.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

/// A normalized, always tagged image reference.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ImageReference {
    pub domain: String,
    pub path: String,
    pub tag: String,
}

impl Display for ImageReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}:{}", self.domain, self.path, self.tag)
    }
}

impl ImageReference {
    /// Parses and normalizes `input`, defaulting the tag to
    /// [`DEFAULT_TAG`].
    pub fn parse(input: &str) -> Result<Self> {
        let (domain, path, tag) = parse_normalized(input)?;

        Ok(Self {
            domain,
            path,
            tag: tag.unwrap_or_else(|| DEFAULT_TAG.to_owned()),
        })
    }

    /// The reference without its tag, as used for override lookups.
    pub fn untagged(&self) -> String {
        format!("{}/{}", self.domain, self.path)
    }

    /// Applies `image_override` and re-validates the result.
    pub fn with_override(self, image_override: &ImageOverride) -> Result<Self> {
        let domain = if image_override.registry.is_empty() {
            self.domain
        } else {
            image_override.registry.clone()
        };
        let path = if image_override.repo.is_empty() {
            self.path
        } else {
            image_override.repo.clone()
        };
        let tag = image_override
            .tags
            .get(&self.tag)
            .cloned()
            .unwrap_or(self.tag);

        let reference = join_path(&domain, &path);
        let (domain, path, existing_tag) = parse_normalized(&reference)?;

        // The repository override must not smuggle in a tag of its own
        ensure!(existing_tag.is_none(), InvalidReferenceFormatSnafu { reference });
        ensure!(TAG_REGEX.is_match(&tag), InvalidTagFormatSnafu { tag });

        Ok(Self { domain, path, tag })
    }
}

/// Joins two slash separated paths, dropping empty segments.
fn join_path(base: &str, element: &str) -> String {
    base.split('/')
        .chain(element.split('/'))
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

fn split_domain(name: &str) -> (String, String) {
    let (mut domain, mut remainder) = match name.split_once('/') {
        Some((first, rest))
            if first.contains(['.', ':']) || first == "localhost" =>
        {
            (first.to_owned(), rest.to_owned())
        }
        _ => (DEFAULT_DOMAIN.to_owned(), name.to_owned()),
    };

    if domain == LEGACY_DEFAULT_DOMAIN {
        DEFAULT_DOMAIN.clone_into(&mut domain);
    }
    if domain == DEFAULT_DOMAIN && !remainder.contains('/') {
        remainder = format!("{OFFICIAL_REPO_PREFIX}{remainder}");
    }

    (domain, remainder)
}

fn parse_normalized(input: &str) -> Result<(String, String, Option<String>)> {
    let invalid = || InvalidReferenceFormatSnafu { reference: input }.build();

    if input.is_empty() || IDENTIFIER_REGEX.is_match(input) {
        return Err(invalid());
    }

    let (domain, remainder) = split_domain(input);
    if remainder.to_lowercase() != remainder {
        return Err(invalid());
    }

    let normalized = format!("{domain}/{remainder}");
    let captures = REFERENCE_REGEX.captures(&normalized).with_context(|| {
        InvalidReferenceFormatSnafu {
            reference: input.to_owned(),
        }
    })?;

    let name = captures.get(1).map_or("", |m| m.as_str());
    if name.len() > NAME_TOTAL_LENGTH_MAX {
        return Err(invalid());
    }

    let tag = captures.get(2).map(|m| m.as_str().to_owned());
    let path = name
        .strip_prefix(&domain)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(name)
        .to_owned();

    Ok((domain, path, tag))
}

/// Resolves the image of the component `name`.
///
/// The bare image is taken from `components` and placed below the
/// configured Kubernetes image base. On Azure Stack every component but
/// `hyperkube` is pulled from the cloud's image base instead. Overrides
/// from [`KubernetesConfig::image_repo_overrides`] apply when their key
/// matches the untagged reference.
pub fn resolve_component_image(
    name: &str,
    components: &BTreeMap<String, String>,
    config: &KubernetesConfig,
    is_azure_stack: bool,
    cloud_spec: &CloudSpec,
) -> Result<String> {
    let base = if is_azure_stack && name != "hyperkube" {
        cloud_spec.kubernetes_spec_config.kubernetes_image_base.as_str()
    } else {
        config.kubernetes_image_base.as_str()
    };

    let image = components
        .get(name)
        .filter(|image| !image.is_empty())
        .context(ComponentNotFoundSnafu { component: name })?;

    resolve_image(base, image, &config.image_repo_overrides)
}

/// Places the bare `image` below `base` and applies `overrides`.
pub fn resolve_image(
    base: &str,
    image: &str,
    overrides: &BTreeMap<String, ImageOverride>,
) -> Result<String> {
    let reference = ImageReference::parse(&join_path(base.trim_end_matches('/'), image))?;
    let reference = apply_image_overrides(reference, overrides)?;

    Ok(reference.to_string())
}

/// Applies the override registered for the untagged form of `reference`, if
/// any.
pub fn apply_image_overrides(
    reference: ImageReference,
    overrides: &BTreeMap<String, ImageOverride>,
) -> Result<ImageReference> {
    let key = reference.untagged();
    match overrides.get(&key) {
        Some(image_override) => {
            debug!(%key, "applying image override");
            reference.with_override(image_override)
        }
        None => Ok(reference),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn components() -> BTreeMap<String, String> {
        BTreeMap::from(
            [
                ("foo", "foo:v1.0.0"),
                ("invalid", "invalid:"),
                ("noimage", ""),
                ("notag", "notag"),
            ]
            .map(|(k, v)| (k.to_owned(), v.to_owned())),
        )
    }

    fn config(base: &str, overrides: Option<ImageOverride>) -> KubernetesConfig {
        KubernetesConfig {
            kubernetes_image_base: base.to_owned(),
            image_repo_overrides: overrides
                .map(|o| BTreeMap::from([("foo.com/foo".to_owned(), o)]))
                .unwrap_or_default(),
            ..Default::default()
        }
    }

    fn image_override(registry: &str, repo: &str, tags: &[(&str, &str)]) -> ImageOverride {
        ImageOverride {
            registry: registry.to_owned(),
            repo: repo.to_owned(),
            tags: tags
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
        }
    }

    #[rstest]
    #[case::no_base_no_overrides("foo", config("", None), "docker.io/library/foo:v1.0.0")]
    #[case::base_no_overrides("foo", config("foo.com", None), "foo.com/foo:v1.0.0")]
    #[case::base_with_trailing_slash("foo", config("foo.com/", None), "foo.com/foo:v1.0.0")]
    #[case::empty_component_tag("notag", config("foo.com", None), "foo.com/notag:latest")]
    #[case::empty_override(
        "foo",
        config("foo.com", Some(ImageOverride::default())),
        "foo.com/foo:v1.0.0"
    )]
    #[case::registry_override_only(
        "foo",
        config("foo.com", Some(image_override("bar.com", "", &[]))),
        "bar.com/foo:v1.0.0"
    )]
    #[case::repo_override_only(
        "foo",
        config("foo.com", Some(image_override("", "bar/baz", &[]))),
        "foo.com/bar/baz:v1.0.0"
    )]
    #[case::tag_override_only(
        "foo",
        config("foo.com", Some(image_override("", "", &[("v1.0.0", "whatever"), ("v2.0.0", "another")]))),
        "foo.com/foo:whatever"
    )]
    #[case::override_all(
        "foo",
        config("foo.com", Some(image_override("bar.com", "bar/baz", &[("v1.0.0", "whatever"), ("v2.0.0", "another")]))),
        "bar.com/bar/baz:whatever"
    )]
    #[case::unmatched_tag_override(
        "foo",
        config("foo.com", Some(image_override("bar.com", "bar/baz", &[("unmatched1", "v1.0.0"), ("unmatched2", "v1.0.0")]))),
        "bar.com/bar/baz:v1.0.0"
    )]
    fn resolve_image(
        #[case] component: &str,
        #[case] config: KubernetesConfig,
        #[case] expected: &str,
    ) {
        let image = resolve_component_image(
            component,
            &components(),
            &config,
            false,
            &CloudSpec::default(),
        )
        .expect("image must resolve");

        assert_eq!(image, expected);
    }

    #[rstest]
    #[case::missing_component("not exist", config("", None), ComponentNotFoundSnafu { component: "not exist" }.build())]
    #[case::component_without_image("noimage", config("", None), ComponentNotFoundSnafu { component: "noimage" }.build())]
    #[case::invalid_base(
        "foo",
        config("garbage:entry", None),
        InvalidReferenceFormatSnafu { reference: "garbage:entry/foo:v1.0.0" }.build()
    )]
    #[case::invalid_component_image(
        "invalid",
        config("", None),
        InvalidReferenceFormatSnafu { reference: "invalid:" }.build()
    )]
    #[case::repo_override_with_tag(
        "foo",
        config("foo.com", Some(image_override("bar.com", "bar:baz", &[("v1.0.0", "whatever")]))),
        InvalidReferenceFormatSnafu { reference: "bar.com/bar:baz" }.build()
    )]
    #[case::invalid_tag_override(
        "foo",
        config("foo.com", Some(image_override("bar.com", "bar/baz", &[("v1.0.0", "bro:ken")]))),
        InvalidTagFormatSnafu { tag: "bro:ken" }.build()
    )]
    #[case::empty_tag_override(
        "foo",
        config("foo.com", Some(image_override("bar.com", "bar/baz", &[("v1.0.0", "")]))),
        InvalidTagFormatSnafu { tag: "" }.build()
    )]
    fn resolve_image_error(
        #[case] component: &str,
        #[case] config: KubernetesConfig,
        #[case] expected: Error,
    ) {
        let error = resolve_component_image(
            component,
            &components(),
            &config,
            false,
            &CloudSpec::default(),
        )
        .expect_err("image must not resolve");

        assert_eq!(error, expected);
    }

    #[test]
    fn azure_stack_uses_cloud_image_base() {
        let mut cloud_spec = CloudSpec::default();
        cloud_spec.kubernetes_spec_config.kubernetes_image_base = "stack.local/".to_owned();

        let mut components = components();
        components.insert("hyperkube".to_owned(), "hyperkube-amd64:v1.16.0".to_owned());
        let config = config("foo.com", None);

        let foo =
            resolve_component_image("foo", &components, &config, true, &cloud_spec).unwrap();
        let hyperkube =
            resolve_component_image("hyperkube", &components, &config, true, &cloud_spec)
                .unwrap();

        assert_eq!(foo, "stack.local/foo:v1.0.0");
        assert_eq!(hyperkube, "foo.com/hyperkube-amd64:v1.16.0");
    }

    #[rstest]
    #[case::registry_override(image_override("bar.com", "", &[("v1.0.0", "v1.0.1")]))]
    #[case::tag_override(image_override("", "", &[("v1.0.0", "v1.0.1")]))]
    fn overriding_twice_is_stable(#[case] image_override: ImageOverride) {
        let overrides = BTreeMap::from([("foo.com/foo".to_owned(), image_override)]);
        let reference = ImageReference::parse("foo.com/foo:v1.0.0").unwrap();

        let first = apply_image_overrides(reference, &overrides).unwrap();
        let second = apply_image_overrides(first.clone(), &overrides).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.tag, "v1.0.1");
    }

    #[rstest]
    #[case::localhost("localhost/foo", "localhost", "foo", "latest")]
    #[case::legacy_index("index.docker.io/foo:1", "docker.io", "library/foo", "1")]
    #[case::registry_with_port("reg.io:5000/a/b:c", "reg.io:5000", "a/b", "c")]
    #[case::user_repo("user/repo", "docker.io", "user/repo", "latest")]
    fn parse_reference(
        #[case] input: &str,
        #[case] domain: &str,
        #[case] path: &str,
        #[case] tag: &str,
    ) {
        let reference = ImageReference::parse(input).unwrap();

        assert_eq!(reference.domain, domain);
        assert_eq!(reference.path, path);
        assert_eq!(reference.tag, tag);
    }

    #[rstest]
    #[case::uppercase("Foo/Bar")]
    #[case::empty("")]
    #[case::identifier("0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef")]
    #[case::digest("foo@sha256:0123456789abcdef0123456789abcdef")]
    fn parse_reference_error(#[case] input: &str) {
        assert!(ImageReference::parse(input).is_err());
    }
}
