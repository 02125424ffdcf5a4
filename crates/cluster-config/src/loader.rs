//! Loads versioned cluster definitions into the canonical model and writes
//! them back out.
//!
//! Unknown keys are detected by walking the raw JSON against the JSON schema
//! of the target shape, so a typo in a user document is reported instead of
//! being silently dropped.
use serde::Serialize;
use serde_json::Value;
use snafu::{OptionExt, ResultExt, Snafu, ensure};
use tracing::{debug, info};

use crate::{
    api::{
        ContainerService,
        consts::{
            DEFAULT_ADMIN_USERNAME, DEFAULT_AGENT_COUNT, DEFAULT_AGENT_POOL_NAME,
            DEFAULT_MASTER_COUNT, DEFAULT_OS_DISK_SIZE_GB, DEFAULT_VM_SIZE, KUBERNETES,
        },
    },
    convert, vlabs,
};

/// Keys every versioned document may carry in addition to its own fields.
const METADATA_KEYS: &[&str] = &["apiVersion"];

type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("failed to parse the cluster definition"))]
    MalformedInput { source: serde_json::Error },

    #[snafu(display("unrecognized apiVersion {version:?}"))]
    UnrecognizedVersion { version: String },

    #[snafu(display("unknown field {field:?} in the cluster definition"))]
    UnknownField { field: String },

    #[snafu(display("failed to deserialize the {version} cluster definition"))]
    DeserializeDocument {
        source: serde_json::Error,
        version: String,
    },

    #[snafu(display("the cluster definition is invalid"))]
    InvalidDocument { source: vlabs::ValidationError },

    #[snafu(display("failed to convert the cluster definition"))]
    ConvertDocument { source: convert::Error },

    #[snafu(display("failed to serialize the cluster definition"))]
    SerializeDocument { source: serde_json::Error },
}

/// A document together with the version tag it is written in.
#[derive(Serialize)]
struct VersionedContainerService<'a> {
    #[serde(rename = "apiVersion")]
    api_version: &'a str,

    #[serde(flatten)]
    container_service: vlabs::ContainerService,
}

/// Returns the `apiVersion` of `input`, empty if there is none.
pub fn api_version(input: &[u8]) -> Result<String> {
    let document: Value = serde_json::from_slice(input).context(MalformedInputSnafu)?;
    Ok(declared_version(&document))
}

fn declared_version(document: &Value) -> String {
    document
        .get("apiVersion")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

/// Parses, optionally validates and converts a cluster definition.
///
/// When `existing` is given the document is first merged with the deployed
/// cluster. Unknown keys are only rejected if `validate` is set. Returns the
/// canonical model together with the version tag of the input.
pub fn load_container_service(
    input: &[u8],
    validate: bool,
    is_update: bool,
    existing: Option<&ContainerService>,
) -> Result<(ContainerService, String)> {
    let raw: Value = serde_json::from_slice(input).context(MalformedInputSnafu)?;
    let version = declared_version(&raw);
    ensure!(
        version == vlabs::API_VERSION,
        UnrecognizedVersionSnafu { version }
    );

    if validate {
        check_unknown_fields::<vlabs::ContainerService>(&raw)?;
    }

    let mut document: vlabs::ContainerService =
        serde_json::from_value(raw).context(DeserializeDocumentSnafu { version: &version })?;

    if let Some(existing) = existing {
        debug!("merging with the existing cluster definition");
        document.merge(&convert::from_api(existing));
    }

    if validate && let Some(properties) = &document.properties {
        properties.validate(is_update).context(InvalidDocumentSnafu)?;
    }

    let version_given = document
        .properties
        .as_ref()
        .and_then(|properties| properties.orchestrator_profile.as_ref())
        .is_some_and(|profile| {
            !profile.orchestrator_version.is_empty() || !profile.orchestrator_release.is_empty()
        });

    let mut container_service =
        convert::to_api(document, is_update).context(ConvertDocumentSnafu)?;

    if let Some(existing) = existing
        && !version_given
        && let Some(profile) = container_service.properties.orchestrator_profile.as_mut()
    {
        let current = existing.properties.orchestrator_version();
        if !current.is_empty() {
            profile.orchestrator_version = current.to_owned();
        }
    }

    info!(
        %version,
        orchestrator_version = container_service.properties.orchestrator_version(),
        "loaded cluster definition"
    );

    Ok((container_service, version))
}

/// Writes `container_service` as a pretty printed document of `version`.
pub fn serialize_container_service(
    container_service: &ContainerService,
    version: &str,
) -> Result<Vec<u8>> {
    ensure!(
        version == vlabs::API_VERSION,
        UnrecognizedVersionSnafu { version }
    );

    let document = VersionedContainerService {
        api_version: version,
        container_service: convert::from_api(container_service),
    };

    serde_json::to_vec_pretty(&document).context(SerializeDocumentSnafu)
}

/// The starting point for new cluster definitions.
pub fn default_container_service_properties() -> vlabs::Properties {
    vlabs::Properties {
        orchestrator_profile: Some(vlabs::OrchestratorProfile {
            orchestrator_type: KUBERNETES.to_owned(),
            ..Default::default()
        }),
        master_profile: Some(vlabs::MasterProfile {
            count: DEFAULT_MASTER_COUNT,
            vm_size: DEFAULT_VM_SIZE.to_owned(),
            os_disk_size_gb: DEFAULT_OS_DISK_SIZE_GB,
            ..Default::default()
        }),
        agent_pool_profiles: vec![vlabs::AgentPoolProfile {
            name: DEFAULT_AGENT_POOL_NAME.to_owned(),
            count: DEFAULT_AGENT_COUNT,
            vm_size: DEFAULT_VM_SIZE.to_owned(),
            os_disk_size_gb: DEFAULT_OS_DISK_SIZE_GB,
            ..Default::default()
        }],
        linux_profile: Some(vlabs::LinuxProfile {
            admin_username: DEFAULT_ADMIN_USERNAME.to_owned(),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Rejects keys of `document` which `T` does not know about.
fn check_unknown_fields<T: schemars::JsonSchema>(document: &Value) -> Result<()> {
    let schema = schemars::schema_for!(T);
    let schema = schema.as_value();

    if let Value::Object(fields) = document {
        for (key, value) in fields {
            if METADATA_KEYS.contains(&key.as_str()) {
                continue;
            }

            let field = property_schema(schema, schema, key).context(UnknownFieldSnafu {
                field: key.as_str(),
            })?;
            walk(value, field, schema, key)?;
        }
    }

    Ok(())
}

fn walk(value: &Value, schema: &Value, root: &Value, path: &str) -> Result<()> {
    match value {
        Value::Object(fields) => {
            let Some(object_schema) = object_schema(schema, root) else {
                return Ok(());
            };

            for (key, value) in fields {
                let path = format!("{path}.{key}");
                if let Some(properties) = object_schema.get("properties") {
                    let field = properties
                        .get(key)
                        .map(|field| resolve(field, root))
                        .context(UnknownFieldSnafu { field: &path })?;
                    walk(value, field, root, &path)?;
                } else if let Some(values) = object_schema.get("additionalProperties") {
                    walk(value, resolve(values, root), root, &path)?;
                }
            }
        }
        Value::Array(items) => {
            if let Some(items_schema) = array_items(schema, root) {
                for (index, item) in items.iter().enumerate() {
                    walk(item, items_schema, root, &format!("{path}[{index}]"))?;
                }
            }
        }
        _ => {}
    }

    Ok(())
}

fn property_schema<'a>(schema: &'a Value, root: &'a Value, key: &str) -> Option<&'a Value> {
    object_schema(schema, root)?
        .get("properties")?
        .get(key)
        .map(|field| resolve(field, root))
}

/// Follows `$ref` pointers into the schema definitions.
fn resolve<'a>(schema: &'a Value, root: &'a Value) -> &'a Value {
    match schema.get("$ref").and_then(Value::as_str) {
        Some(reference) => reference
            .strip_prefix('#')
            .and_then(|pointer| root.pointer(pointer))
            .map_or(schema, |target| resolve(target, root)),
        None => schema,
    }
}

/// The variants of an `anyOf` or `oneOf`, as generated for optional values.
fn variants(schema: &Value) -> impl Iterator<Item = &Value> {
    ["anyOf", "oneOf", "allOf"]
        .into_iter()
        .filter_map(|keyword| schema.get(keyword).and_then(Value::as_array))
        .flatten()
}

fn object_schema<'a>(schema: &'a Value, root: &'a Value) -> Option<&'a Value> {
    let schema = resolve(schema, root);
    if schema.get("properties").is_some() || schema.get("additionalProperties").is_some() {
        return Some(schema);
    }

    variants(schema).find_map(|variant| object_schema(variant, root))
}

fn array_items<'a>(schema: &'a Value, root: &'a Value) -> Option<&'a Value> {
    let schema = resolve(schema, root);
    match schema.get("items") {
        Some(items) => Some(resolve(items, root)),
        None => variants(schema).find_map(|variant| array_items(variant, root)),
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use rstest::rstest;

    use super::*;

    const MINIMAL: &str = indoc! {r#"
        {
          "apiVersion": "vlabs",
          "location": "westus2",
          "properties": {
            "orchestratorProfile": {
              "orchestratorType": "Kubernetes",
              "orchestratorRelease": "1.22",
              "kubernetesConfig": {
                "addons": [{ "name": "coredns", "enabled": true, "config": { "anything": "goes" } }],
                "kubeletConfig": { "--max-pods": "30" }
              }
            },
            "masterProfile": { "count": 1, "dnsPrefix": "prefix", "vmSize": "Standard_D2_v3" },
            "agentPoolProfiles": [
              { "name": "linuxpool", "count": 2, "vmSize": "Standard_D2_v3", "distro": "aks-ubuntu-18.04" }
            ],
            "linuxProfile": {
              "adminUsername": "azureuser",
              "ssh": { "publicKeys": [{ "keyData": "ssh-rsa AAAA" }] }
            }
          }
        }
    "#};

    #[test]
    fn loads_minimal_document() {
        let (container_service, version) =
            load_container_service(MINIMAL.as_bytes(), true, false, None).unwrap();

        assert_eq!(version, "vlabs");
        assert_eq!(container_service.location, "westus2");
        assert_eq!(container_service.properties.orchestrator_version(), "1.22.16");
        assert_eq!(
            container_service
                .properties
                .linux_profile
                .as_ref()
                .unwrap()
                .ssh_public_keys,
            ["ssh-rsa AAAA"]
        );
    }

    #[test]
    fn malformed_input() {
        let result = load_container_service(b"{ \"apiVersion\": ", true, false, None);
        assert!(matches!(result, Err(Error::MalformedInput { .. })));
    }

    #[rstest]
    #[case::legacy(r#"{ "apiVersion": "2017-07-01", "properties": {} }"#, "2017-07-01")]
    #[case::agent_pool_only(r#"{ "apiVersion": "2018-03-31", "properties": {} }"#, "2018-03-31")]
    #[case::missing(r#"{ "properties": {} }"#, "")]
    fn unrecognized_version(#[case] input: &str, #[case] expected: &str) {
        let result = load_container_service(input.as_bytes(), false, false, None);
        assert!(matches!(
            result,
            Err(Error::UnrecognizedVersion { version }) if version == expected
        ));
    }

    #[rstest]
    #[case::top_level("location", "locaton", "locaton")]
    #[case::nested("\"count\": 1", "\"cuont\": 1", "properties.masterProfile.cuont")]
    #[case::in_array("\"count\": 2", "\"coutn\": 2", "properties.agentPoolProfiles[0].coutn")]
    #[case::in_option(
        "\"keyData\"",
        "\"keydata\"",
        "properties.linuxProfile.ssh.publicKeys[0].keydata"
    )]
    fn unknown_field(#[case] from: &str, #[case] to: &str, #[case] expected: &str) {
        let input = MINIMAL.replacen(from, to, 1);

        let result = load_container_service(input.as_bytes(), true, false, None);
        assert!(matches!(
            result,
            Err(Error::UnknownField { field }) if field == expected
        ));
    }

    #[test]
    fn unknown_fields_are_ignored_without_validation() {
        let input = MINIMAL.replacen("\"count\": 1", "\"count\": 1, \"bogus\": true", 1);
        assert!(load_container_service(input.as_bytes(), false, false, None).is_ok());
    }

    #[test]
    fn invalid_document() {
        let input = MINIMAL.replacen("\"count\": 1", "\"count\": 2", 1);

        let result = load_container_service(input.as_bytes(), true, false, None);
        assert!(matches!(
            result,
            Err(Error::InvalidDocument {
                source: vlabs::ValidationError::InvalidMasterCount { count: 2 }
            })
        ));
    }

    #[test]
    fn existing_version_is_kept_on_update() {
        let (existing, _) = load_container_service(MINIMAL.as_bytes(), true, false, None).unwrap();
        let resubmitted = MINIMAL.replacen("\"orchestratorRelease\": \"1.22\",", "", 1);

        let (container_service, _) =
            load_container_service(resubmitted.as_bytes(), true, true, Some(&existing)).unwrap();

        assert_eq!(container_service.properties.orchestrator_version(), "1.22.16");
    }

    #[test]
    fn serialize_adds_the_version_tag() {
        let (container_service, version) =
            load_container_service(MINIMAL.as_bytes(), true, false, None).unwrap();

        let output = serialize_container_service(&container_service, &version).unwrap();
        let output: Value = serde_json::from_slice(&output).unwrap();

        assert_eq!(output["apiVersion"], "vlabs");
        assert_eq!(
            output["properties"]["orchestratorProfile"]["orchestratorVersion"],
            "1.22.16"
        );
        assert_eq!(
            output["properties"]["masterProfile"]["storageProfile"],
            "ManagedDisks"
        );
    }

    #[test]
    fn serialize_rejects_unknown_versions() {
        let result = serialize_container_service(&ContainerService::default(), "2017-07-01");
        assert!(matches!(result, Err(Error::UnrecognizedVersion { .. })));
    }

    #[test]
    fn default_properties() {
        let properties = default_container_service_properties();

        assert_eq!(properties.master_profile.as_ref().unwrap().count, 3);
        assert_eq!(properties.agent_pool_profiles[0].name, "agent");
        assert_eq!(
            properties.linux_profile.as_ref().unwrap().admin_username,
            "azureuser"
        );
    }
}
