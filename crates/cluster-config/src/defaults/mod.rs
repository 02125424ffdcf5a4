//! Fills in everything a cluster definition leaves out.
//!
//! Every component flag map (kubelet, controller-manager,
//! cloud-controller-manager, API server and scheduler) is resolved in the
//! same order:
//!
//! 1. computed defaults are seeded for keys the user did not set,
//! 2. user values stay untouched,
//! 3. static values are forced over whatever is present,
//! 4. legacy values are rewritten and flags the orchestrator version does
//!    not understand are removed.
//!
//! Resolution never fails. Values that can not be used are replaced and
//! reported with [`tracing::warn!`]. Running [`ContainerService::set_defaults`]
//! a second time leaves the model unchanged.
use std::collections::BTreeMap;

use tracing::debug;

use crate::{
    api::{ContainerService, KubernetesConfig},
    cloud::CloudRegistry,
};

mod apiserver;
mod cloud_controller_manager;
mod components;
mod controller_manager;
pub mod feature_gates;
mod kubelet;
mod orchestrator;
mod profiles;
mod scheduler;
mod sysctld;

pub use profiles::accelerated_networking_supported;

/// Flag name to value. Sorted so the rendered output is deterministic.
pub type Flags = BTreeMap<String, String>;

const KUBECONFIG: &str = "/var/lib/kubelet/kubeconfig";
const AZURE_CLOUD_CONFIG: &str = "/etc/kubernetes/azure.json";
const CA_CERTIFICATE: &str = "/etc/kubernetes/certs/ca.crt";

/// The operation the defaults are resolved for.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DefaultsParams {
    pub is_upgrade: bool,
    pub is_scale: bool,
}

impl DefaultsParams {
    /// Upgrades and scale operations both act on an existing cluster.
    pub fn is_update(self) -> bool {
        self.is_upgrade || self.is_scale
    }
}

impl ContainerService {
    /// Resolves all defaults in place.
    ///
    /// Azure Stack clusters derive their cloud from the custom cloud profile,
    /// every other cluster looks its cloud up in `registry`.
    pub fn set_defaults(&mut self, registry: &CloudRegistry, params: DefaultsParams) {
        debug!(?params, "resolving cluster defaults");

        if self.properties.is_custom_cloud_profile() {
            self.properties.set_custom_cloud_profile_defaults();
        }

        let cloud_spec = self.cloud_spec(registry);
        let properties = &mut self.properties;

        properties.set_master_profile_defaults(params);
        properties.set_agent_profile_defaults(params);
        properties.set_storage_defaults();
        properties.set_orchestrator_defaults(&cloud_spec, params);
        properties.set_extension_defaults();

        if properties.windows_profile.is_some() {
            properties.set_windows_profile_defaults(params);
            properties.set_csi_proxy_defaults(&cloud_spec);
        }

        properties.set_telemetry_profile_defaults();
    }
}

/// Builds a flag map from borrowed pairs.
fn flags<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Flags {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_owned(), value.to_owned()))
        .collect()
}

/// Seeds `defaults` for every key missing from `config`.
fn set_missing(config: &mut Flags, defaults: Flags) {
    for (key, value) in defaults {
        config.entry(key).or_insert(value);
    }
}

/// Writes `statics` over whatever `config` holds.
fn force(config: &mut Flags, statics: Flags) {
    config.extend(statics);
}

fn remove(config: &mut Flags, keys: &[&str]) {
    for key in keys {
        config.remove(*key);
    }
}

fn bool_flag(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// The second subnet of a dual-stack cluster CIDR, otherwise the whole value.
fn dual_stack_cluster_cidr(cluster_subnet: &str, is_dual_stack: bool) -> &str {
    if is_dual_stack {
        cluster_subnet.split(',').nth(1).unwrap_or(cluster_subnet)
    } else {
        cluster_subnet
    }
}

impl crate::api::Properties {
    fn kubernetes_config_mut(&mut self) -> Option<&mut KubernetesConfig> {
        self.orchestrator_profile
            .as_mut()
            .and_then(|o| o.kubernetes_config.as_mut())
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use rstest::rstest;

    use super::*;
    use crate::{
        api::{
            AgentPoolProfile, Distro, MasterProfile, OrchestratorProfile, OrchestratorType, OsType,
            Properties,
            consts::{MASTER_NODE_TAINT, NETWORK_PLUGIN_AZURE},
        },
        vlabs,
    };

    pub(super) fn cluster(input: &str) -> ContainerService {
        let document: vlabs::ContainerService = serde_json::from_str(input).unwrap();
        crate::convert::to_api(document, false).unwrap()
    }

    /// A Kubernetes cluster with its top level defaults already in place, for
    /// exercising single resolution stages.
    pub(super) fn kubernetes_properties(version: &str) -> Properties {
        Properties {
            orchestrator_profile: Some(OrchestratorProfile {
                orchestrator_type: OrchestratorType::Kubernetes,
                orchestrator_version: version.to_owned(),
                kubernetes_config: Some(KubernetesConfig {
                    kubernetes_image_base: "mcr.microsoft.com/oss/kubernetes/".to_owned(),
                    mcr_kubernetes_image_base: "mcr.microsoft.com/oss/kubernetes/".to_owned(),
                    network_plugin: NETWORK_PLUGIN_AZURE.to_owned(),
                    cluster_subnet: "10.240.0.0/12".to_owned(),
                    service_cidr: "10.0.0.0/16".to_owned(),
                    dns_service_ip: "10.0.0.10".to_owned(),
                    etcd_version: "3.3.19".to_owned(),
                    enable_rbac: Some(true),
                    enable_secure_kubelet: Some(true),
                    enable_aggregated_apis: true,
                    ..Default::default()
                }),
                ..Default::default()
            }),
            master_profile: Some(MasterProfile {
                count: 3,
                dns_prefix: "mycluster".to_owned(),
                distro: Some(Distro::AksUbuntu1804),
                ..Default::default()
            }),
            agent_pool_profiles: vec![AgentPoolProfile {
                name: "linuxpool".to_owned(),
                count: 3,
                os_type: Some(OsType::Linux),
                distro: Some(Distro::AksUbuntu1804),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    pub(super) fn kubernetes_cluster() -> ContainerService {
        cluster(indoc! {r#"
            {
              "location": "westus2",
              "properties": {
                "orchestratorProfile": {
                  "orchestratorType": "Kubernetes",
                  "orchestratorRelease": "1.22",
                  "kubernetesConfig": {
                    "apiServerConfig": {
                      "--bind-address": "127.0.0.1",
                      "--audit-log-maxage": "7",
                      "--audit-policy-file": "/etc/kubernetes/manifests/audit-policy.yaml",
                      "--feature-gates": "VolumeSnapshotDataSource=true"
                    },
                    "kubeletConfig": { "--max-pods": "50", "--address": "10.0.0.1" }
                  }
                },
                "masterProfile": { "count": 3, "dnsPrefix": "mycluster", "vmSize": "Standard_D2_v3" },
                "agentPoolProfiles": [
                  { "name": "linuxpool", "count": 3, "vmSize": "Standard_D2_v3" }
                ],
                "linuxProfile": {
                  "adminUsername": "azureuser",
                  "ssh": { "publicKeys": [{ "keyData": "ssh-rsa AAAA" }] }
                }
              }
            }
        "#})
    }

    fn properties(cs: &ContainerService) -> &Properties {
        &cs.properties
    }

    #[rstest]
    #[case::create(DefaultsParams::default())]
    #[case::upgrade(DefaultsParams { is_upgrade: true, is_scale: false })]
    #[case::scale(DefaultsParams { is_upgrade: false, is_scale: true })]
    fn set_defaults_is_idempotent(#[case] params: DefaultsParams) {
        let mut cs = kubernetes_cluster();
        cs.set_defaults(CloudRegistry::builtin(), params);
        let once = cs.clone();

        cs.set_defaults(CloudRegistry::builtin(), params);
        assert_eq!(cs, once);
    }

    #[test]
    fn static_values_win_over_user_values() {
        let mut cs = kubernetes_cluster();
        cs.set_defaults(CloudRegistry::builtin(), DefaultsParams::default());

        let config = properties(&cs).kubernetes_config().unwrap();
        assert_eq!(config.apiserver_config["--bind-address"], "0.0.0.0");
        assert_eq!(config.kubelet_config["--address"], "0.0.0.0");
    }

    #[test]
    fn user_values_win_over_defaults() {
        let mut cs = kubernetes_cluster();
        cs.set_defaults(CloudRegistry::builtin(), DefaultsParams::default());

        let config = properties(&cs).kubernetes_config().unwrap();
        assert_eq!(config.apiserver_config["--audit-log-maxage"], "7");
        assert_eq!(config.kubelet_config["--max-pods"], "50");
    }

    #[test]
    fn final_pass_rewrites_and_removes() {
        let mut cs = kubernetes_cluster();
        cs.set_defaults(CloudRegistry::builtin(), DefaultsParams::default());

        let config = properties(&cs).kubernetes_config().unwrap();
        assert_eq!(
            config.apiserver_config["--audit-policy-file"],
            "/etc/kubernetes/addons/audit-policy.yaml"
        );
        assert_eq!(config.apiserver_config[feature_gates::FEATURE_GATES], "");
    }

    #[test]
    fn resolves_the_release_to_a_version() {
        let mut cs = kubernetes_cluster();
        cs.set_defaults(CloudRegistry::builtin(), DefaultsParams::default());

        assert_eq!(properties(&cs).orchestrator_version(), "1.22.16");
    }

    #[test]
    fn master_kubelet_is_tainted() {
        let mut cs = kubernetes_cluster();
        cs.set_defaults(CloudRegistry::builtin(), DefaultsParams::default());

        let master = properties(&cs).master_profile.as_ref().unwrap();
        let kubelet = &master.kubernetes_config.as_ref().unwrap().kubelet_config;
        assert_eq!(kubelet["--register-with-taints"], MASTER_NODE_TAINT);
        assert_eq!(kubelet["--max-pods"], "50");
    }

    #[rstest]
    #[case::upgrade(DefaultsParams { is_upgrade: true, is_scale: false }, true)]
    #[case::scale(DefaultsParams { is_upgrade: false, is_scale: true }, true)]
    #[case::create(DefaultsParams::default(), false)]
    fn is_update(#[case] params: DefaultsParams, #[case] expected: bool) {
        assert_eq!(params.is_update(), expected);
    }

    #[rstest]
    #[case::single("10.244.0.0/16", true, "10.244.0.0/16")]
    #[case::dual_stack("10.244.0.0/16,fc00::/48", true, "fc00::/48")]
    #[case::not_dual_stack("10.244.0.0/16,fc00::/48", false, "10.244.0.0/16,fc00::/48")]
    fn dual_stack_cidr(#[case] subnet: &str, #[case] dual_stack: bool, #[case] expected: &str) {
        assert_eq!(dual_stack_cluster_cidr(subnet, dual_stack), expected);
    }

    #[test]
    fn set_missing_keeps_present_keys() {
        let mut config = flags([("--v", "9")]);
        set_missing(&mut config, flags([("--v", "2"), ("--profiling", "false")]));
        assert_eq!(config, flags([("--v", "9"), ("--profiling", "false")]));

        force(&mut config, flags([("--v", "2")]));
        assert_eq!(config["--v"], "2");
    }
}
