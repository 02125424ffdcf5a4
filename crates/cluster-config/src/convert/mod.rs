//! Conversion between the `vlabs` wire format and the canonical model.
//!
//! Field copies are plain [`From`] implementations, one per type pair. The
//! few semantic rewrites a document goes through on its way in live in
//! [`to_api`] so they are visible in one place.
use snafu::Snafu;

use crate::{api, vlabs};

mod from_api;
mod to_api;

type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Eq, PartialEq, Snafu)]
pub enum Error {
    #[snafu(display("invalid orchestrator profile"))]
    InvalidOrchestratorProfile { source: vlabs::ValidationError },

    #[snafu(display("unknown orchestrator {orchestrator_type:?}"))]
    UnknownOrchestratorType { orchestrator_type: String },

    #[snafu(display(
        "orchestrator release {release:?} with version {version:?} can not be resolved to a supported version"
    ))]
    UnresolvableVersion { release: String, version: String },
}

/// Converts a `vlabs` document into the canonical model.
///
/// New documents (`is_update == false`) get their orchestrator profile
/// validated first. The orchestrator version is always rationalized into a
/// concrete supported version.
pub fn to_api(
    container_service: vlabs::ContainerService,
    is_update: bool,
) -> Result<api::ContainerService> {
    to_api::container_service(container_service, is_update)
}

/// Converts the canonical model back into a `vlabs` document. Values the
/// defaults engine computed are kept.
pub fn from_api(container_service: &api::ContainerService) -> vlabs::ContainerService {
    vlabs::ContainerService::from(container_service.clone())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use indoc::indoc;
    use rstest::rstest;

    use super::*;
    use crate::api::{
        OrchestratorType,
        consts::{MANAGED_DISKS, OIDC_AUTHENTICATOR},
    };

    fn document(input: &str) -> vlabs::ContainerService {
        serde_json::from_str(input).unwrap()
    }

    fn kubernetes(kubernetes_config: &str) -> vlabs::ContainerService {
        document(&format!(
            r#"{{
              "location": "westus2",
              "properties": {{
                "orchestratorProfile": {{
                  "orchestratorType": "Kubernetes",
                  "orchestratorRelease": "1.22",
                  "kubernetesConfig": {kubernetes_config}
                }},
                "masterProfile": {{ "count": 1, "dnsPrefix": "prefix", "vmSize": "Standard_D2_v3" }},
                "agentPoolProfiles": [
                  {{ "name": "linuxpool", "count": 2, "vmSize": "Standard_D2_v3" }}
                ]
              }}
            }}"#
        ))
    }

    fn network(container_service: &api::ContainerService) -> (&str, &str) {
        let config = container_service.properties.kubernetes_config().unwrap();
        (&config.network_plugin, &config.network_policy)
    }

    #[test]
    fn location_is_normalized() {
        let mut input = kubernetes("{}");
        input.location = "West US 2".to_owned();

        let container_service = to_api(input, false).unwrap();
        assert_eq!(container_service.location, "westus2");
    }

    #[test]
    fn release_is_rationalized() {
        let container_service = to_api(kubernetes("{}"), false).unwrap();
        let orchestrator = container_service
            .properties
            .orchestrator_profile
            .as_ref()
            .unwrap();

        assert_eq!(orchestrator.orchestrator_type, OrchestratorType::Kubernetes);
        assert_eq!(orchestrator.orchestrator_version, "1.22.16");
    }

    #[rstest]
    #[case::defaults("{}", ("azure", ""))]
    #[case::policy_azure(r#"{ "networkPolicy": "azure" }"#, ("azure", ""))]
    #[case::policy_none(r#"{ "networkPolicy": "none" }"#, ("kubenet", ""))]
    #[case::policy_calico(r#"{ "networkPolicy": "calico" }"#, ("azure", "calico"))]
    #[case::explicit_plugin(r#"{ "networkPlugin": "kubenet", "networkPolicy": "calico" }"#, ("kubenet", "calico"))]
    #[case::flannel_addon(
        r#"{ "addons": [{ "name": "flannel", "enabled": true }] }"#,
        ("flannel", "")
    )]
    fn network_plugin_aliasing(#[case] kubernetes_config: &str, #[case] expected: (&str, &str)) {
        let container_service = to_api(kubernetes(kubernetes_config), false).unwrap();
        assert_eq!(network(&container_service), expected);
    }

    #[test]
    fn invalid_orchestrator_profile_is_rejected_on_create() {
        let input = kubernetes(r#"{ "networkPlugin": "weave" }"#);

        assert_eq!(
            to_api(input, false),
            Err(Error::InvalidOrchestratorProfile {
                source: vlabs::ValidationError::UnknownNetworkPlugin {
                    plugin: "weave".to_owned()
                }
            })
        );
    }

    #[test]
    fn disabled_version_is_accepted_on_update() {
        let mut input = kubernetes("{}");
        let orchestrator = input
            .properties
            .as_mut()
            .and_then(|properties| properties.orchestrator_profile.as_mut())
            .unwrap();
        orchestrator.orchestrator_release = String::new();
        orchestrator.orchestrator_version = "1.21.3".to_owned();

        assert!(matches!(
            to_api(input.clone(), false),
            Err(Error::InvalidOrchestratorProfile { .. })
        ));

        let container_service = to_api(input, true).unwrap();
        assert_eq!(container_service.properties.orchestrator_version(), "1.21.3");
    }

    #[test]
    fn storage_profile_defaults() {
        let input = document(indoc! {r#"
            {
              "properties": {
                "orchestratorProfile": { "orchestratorType": "DCOS", "orchestratorVersion": "1.11.0" },
                "masterProfile": { "count": 1 },
                "agentPoolProfiles": [{ "name": "pool", "count": 1 }],
                "aadProfile": { "clientAppID": "client" }
              }
            }
        "#});

        let container_service = to_api(input, false).unwrap();
        let properties = &container_service.properties;

        assert_eq!(properties.orchestrator_version(), "1.11.0");
        assert_eq!(
            properties.master_profile.as_ref().unwrap().storage_profile,
            MANAGED_DISKS
        );
        assert_eq!(properties.agent_pool_profiles[0].storage_profile, MANAGED_DISKS);
        assert_eq!(
            properties.aad_profile.as_ref().unwrap().authenticator,
            OIDC_AUTHENTICATOR
        );
    }

    #[test]
    fn kubernetes_agent_pools_keep_their_storage_profile() {
        let container_service = to_api(kubernetes("{}"), false).unwrap();
        assert_eq!(
            container_service.properties.agent_pool_profiles[0].storage_profile,
            ""
        );
    }

    #[test]
    fn unknown_orchestrator_on_update() {
        let mut input = kubernetes("{}");
        input
            .properties
            .as_mut()
            .and_then(|properties| properties.orchestrator_profile.as_mut())
            .unwrap()
            .orchestrator_type = "Nomad".to_owned();

        assert_eq!(
            to_api(input, true),
            Err(Error::UnknownOrchestratorType {
                orchestrator_type: "Nomad".to_owned()
            })
        );
    }

    #[test]
    fn from_api_writes_the_resolved_version_and_release() {
        let container_service = to_api(kubernetes("{}"), false).unwrap();
        let output = from_api(&container_service);
        let orchestrator = output
            .properties
            .as_ref()
            .and_then(|properties| properties.orchestrator_profile.as_ref())
            .unwrap();

        assert_eq!(orchestrator.orchestrator_type, "Kubernetes");
        assert_eq!(orchestrator.orchestrator_release, "1.22");
        assert_eq!(orchestrator.orchestrator_version, "1.22.16");
        assert_eq!(
            orchestrator
                .kubernetes_config
                .as_ref()
                .unwrap()
                .network_plugin,
            "azure"
        );
    }

    #[test]
    fn component_maps_are_copied() {
        let input = kubernetes(indoc! {r#"
            {
              "networkPlugin": "azure",
              "apiServerConfig": { "--audit-log-maxage": "7" },
              "components": [{ "name": "kube-scheduler", "enabled": true, "config": { "command": "x" } }]
            }
        "#});

        let container_service = to_api(input, false).unwrap();
        let config = container_service.properties.kubernetes_config().unwrap();

        assert_eq!(
            config.apiserver_config,
            BTreeMap::from([("--audit-log-maxage".to_owned(), "7".to_owned())])
        );
        assert!(config.kubelet_config.is_empty());
        assert_eq!(config.components[0].config["command"], "x");
    }

    #[test]
    fn written_release_converts_back_to_the_same_version() {
        let container_service = to_api(kubernetes("{}"), false).unwrap();
        let written = from_api(&container_service);

        let reloaded = to_api(written.clone(), false).unwrap();
        assert_eq!(reloaded.properties.orchestrator_version(), "1.22.16");
        assert_eq!(from_api(&reloaded), written);
    }

    #[test]
    fn release_is_not_written_without_version() {
        let mut container_service = to_api(kubernetes("{}"), false).unwrap();
        container_service
            .properties
            .orchestrator_profile
            .as_mut()
            .unwrap()
            .orchestrator_version = String::new();

        let output = from_api(&container_service);
        let orchestrator = output
            .properties
            .as_ref()
            .and_then(|properties| properties.orchestrator_profile.as_ref())
            .unwrap();
        assert_eq!(orchestrator.orchestrator_release, "");
    }
}
