use std::net::Ipv4Addr;

use cluster_version::Platform;
use tracing::warn;

use crate::{
    api::{
        consts::{
            AVAILABILITY_SET, CONTAINERD, DEFAULT_FIRST_CONSECUTIVE_KUBERNETES_STATIC_IP,
            DEFAULT_KUBERNETES_FIRST_CONSECUTIVE_STATIC_IP_OFFSET,
            DEFAULT_KUBERNETES_FIRST_CONSECUTIVE_STATIC_IP_OFFSET_VMSS, EPHEMERAL, MANAGED_DISKS,
            IP_MASQ_AGENT_ADDON_NAME, NETWORK_PLUGIN_ANTREA, NETWORK_PLUGIN_AZURE,
            NETWORK_PLUGIN_FLANNEL, NETWORK_POLICY_CILIUM, SCALE_SET_PRIORITY_LOW, SCALE_SET_PRIORITY_SPOT,
            VIRTUAL_MACHINE_SCALE_SETS,
        },
        types::{
            AgentPoolProfile, ContainerService, KubernetesAddon, KubernetesComponent,
            KubernetesConfig, MasterProfile, OrchestratorProfile, OrchestratorType, OsType,
            Properties,
        },
    },
    cloud::{CloudName, CloudRegistry, CloudSpec},
};

impl ContainerService {
    /// The cloud this cluster is deployed to. Azure Stack clusters use the
    /// spec stored in their custom cloud profile once defaults were applied.
    pub fn cloud_spec(&self, registry: &CloudRegistry) -> CloudSpec {
        if self.properties.is_azure_stack_cloud()
            && let Some(spec) = self
                .properties
                .custom_cloud_profile
                .as_ref()
                .and_then(|profile| profile.azure_environment_spec_config.as_ref())
        {
            return spec.clone();
        }

        let cloud_name = CloudName::target_env(&self.location, self.properties.custom_cloud_name());
        match registry.lookup(cloud_name) {
            Some(spec) => spec.clone(),
            None => {
                warn!(%cloud_name, "cloud is not registered, falling back to the public cloud");
                registry
                    .lookup(CloudName::AzurePublicCloud)
                    .cloned()
                    .unwrap_or_default()
            }
        }
    }
}

impl Properties {
    pub fn is_kubernetes(&self) -> bool {
        self.orchestrator_profile
            .as_ref()
            .is_some_and(OrchestratorProfile::is_kubernetes)
    }

    /// The orchestrator version, empty if there is no orchestrator profile.
    pub fn orchestrator_version(&self) -> &str {
        self.orchestrator_profile
            .as_ref()
            .map_or("", |o| o.orchestrator_version.as_str())
    }

    pub fn kubernetes_config(&self) -> Option<&KubernetesConfig> {
        self.orchestrator_profile
            .as_ref()
            .and_then(|o| o.kubernetes_config.as_ref())
    }

    pub fn has_windows(&self) -> bool {
        self.agent_pool_profiles
            .iter()
            .any(AgentPoolProfile::is_windows)
    }

    /// The version table this cluster selects.
    pub fn platform(&self) -> Platform {
        Platform {
            has_windows: self.has_windows(),
            is_azure_stack: self.is_azure_stack_cloud(),
        }
    }

    pub fn any_agent_is_linux(&self) -> bool {
        self.agent_pool_profiles
            .iter()
            .any(AgentPoolProfile::is_linux)
    }

    pub fn has_vmss_agent_pool(&self) -> bool {
        self.agent_pool_profiles
            .iter()
            .any(AgentPoolProfile::is_virtual_machine_scale_sets)
    }

    pub fn total_nodes(&self) -> i32 {
        let masters = self.master_profile.as_ref().map_or(0, |m| m.count);
        self.agent_pool_profiles
            .iter()
            .fold(masters, |total, pool| total.saturating_add(pool.count))
    }

    pub fn is_custom_cloud_profile(&self) -> bool {
        self.custom_cloud_profile.is_some()
    }

    /// Custom cloud profiles without an environment name are treated as
    /// Azure Stack as well.
    pub fn is_azure_stack_cloud(&self) -> bool {
        self.custom_cloud_profile.as_ref().is_some_and(|profile| {
            profile.environment.as_ref().is_none_or(|env| {
                env.name.is_empty()
                    || env
                        .name
                        .eq_ignore_ascii_case(CloudName::AzureStackCloud.as_ref())
            })
        })
    }

    pub fn custom_cloud_name(&self) -> &str {
        self.custom_cloud_profile
            .as_ref()
            .and_then(|profile| profile.environment.as_ref())
            .map_or("", |env| env.name.as_str())
    }

    pub fn is_ipv6_dual_stack(&self) -> bool {
        self.feature_flags
            .as_ref()
            .is_some_and(|f| f.enable_ipv6_dual_stack)
    }

    pub fn is_ipv6_only(&self) -> bool {
        self.feature_flags
            .as_ref()
            .is_some_and(|f| f.enable_ipv6_only)
    }

    pub fn is_azure_cni(&self) -> bool {
        self.orchestrator_profile
            .as_ref()
            .is_some_and(OrchestratorProfile::is_azure_cni)
    }

    pub fn is_azure_cni_dual_stack(&self) -> bool {
        self.is_azure_cni() && self.is_ipv6_dual_stack()
    }

    /// Whether pod traffic is routed through an Azure route table.
    pub fn require_route_table(&self) -> bool {
        let Some(orchestrator) = &self.orchestrator_profile else {
            return false;
        };
        match orchestrator.orchestrator_type {
            OrchestratorType::Kubernetes => {
                let (plugin, policy) = orchestrator
                    .kubernetes_config
                    .as_ref()
                    .map_or(("", ""), |k| {
                        (k.network_plugin.as_str(), k.network_policy.as_str())
                    });

                !((self.is_azure_cni() && !self.is_ipv6_dual_stack())
                    || policy == NETWORK_POLICY_CILIUM
                    || plugin == NETWORK_PLUGIN_FLANNEL
                    || plugin == NETWORK_PLUGIN_ANTREA)
            }
            _ => false,
        }
    }

    pub fn is_ip_masq_agent_disabled(&self) -> bool {
        self.kubernetes_config()
            .is_some_and(|k| k.is_addon_disabled(IP_MASQ_AGENT_ADDON_NAME))
    }

    pub fn has_aad_profile(&self) -> bool {
        self.aad_profile.is_some()
    }

    pub fn is_vhd_distro_for_all_nodes(&self) -> bool {
        self.agent_pool_profiles
            .iter()
            .all(AgentPoolProfile::is_vhd_distro)
            && self
                .master_profile
                .as_ref()
                .is_none_or(MasterProfile::is_vhd_distro)
    }
}

impl OrchestratorProfile {
    pub fn is_kubernetes(&self) -> bool {
        self.orchestrator_type == OrchestratorType::Kubernetes
    }

    pub fn is_dcos(&self) -> bool {
        self.orchestrator_type == OrchestratorType::Dcos
    }

    pub fn is_azure_cni(&self) -> bool {
        self.kubernetes_config
            .as_ref()
            .is_some_and(|k| k.network_plugin == NETWORK_PLUGIN_AZURE)
    }

    pub fn is_private_cluster(&self) -> bool {
        self.is_kubernetes()
            && self
                .kubernetes_config
                .as_ref()
                .and_then(|k| k.private_cluster.as_ref())
                .is_some_and(|p| p.enabled == Some(true))
    }

    /// The `--storage-backend` value matching the configured etcd version.
    pub fn apiserver_etcd_api_version(&self) -> String {
        let major = self
            .kubernetes_config
            .as_ref()
            .and_then(|k| semver::Version::parse(&k.etcd_version).ok())
            .map_or(0, |v| v.major);
        format!("etcd{major}")
    }
}

impl KubernetesAddon {
    pub fn is_enabled(&self) -> bool {
        self.enabled == Some(true)
    }

    pub fn is_disabled(&self) -> bool {
        self.enabled == Some(false)
    }
}

impl KubernetesComponent {
    pub fn is_enabled(&self) -> bool {
        self.enabled == Some(true)
    }

    pub fn is_disabled(&self) -> bool {
        self.enabled == Some(false)
    }
}

impl KubernetesConfig {
    pub fn addon(&self, name: &str) -> Option<&KubernetesAddon> {
        self.addons.iter().find(|addon| addon.name == name)
    }

    pub fn is_addon_enabled(&self, name: &str) -> bool {
        self.addon(name).is_some_and(KubernetesAddon::is_enabled)
    }

    /// Only true if the addon is explicitly disabled.
    pub fn is_addon_disabled(&self, name: &str) -> bool {
        self.addon(name).is_some_and(KubernetesAddon::is_disabled)
    }

    pub fn component(&self, name: &str) -> Option<&KubernetesComponent> {
        self.components
            .iter()
            .find(|component| component.name == name)
    }

    pub fn is_component_enabled(&self, name: &str) -> bool {
        self.component(name)
            .is_some_and(KubernetesComponent::is_enabled)
    }

    pub fn is_rbac_enabled(&self) -> bool {
        self.enable_rbac == Some(true)
    }

    pub fn is_secure_kubelet_enabled(&self) -> bool {
        self.enable_secure_kubelet == Some(true)
    }

    /// Whether a jumpbox is provisioned next to the private cluster.
    pub fn private_jumpbox_provision(&self) -> bool {
        self.private_cluster
            .as_ref()
            .is_some_and(|p| p.enabled == Some(true) && p.jumpbox_profile.is_some())
    }

    pub fn uses_cloud_controller_manager(&self) -> bool {
        self.use_cloud_controller_manager == Some(true)
    }

    pub fn needs_containerd(&self) -> bool {
        self.container_runtime == CONTAINERD
    }

    pub fn is_network_policy(&self, policy: &str) -> bool {
        self.network_policy == policy
    }

    pub fn is_network_plugin(&self, plugin: &str) -> bool {
        self.network_plugin == plugin
    }
}

impl MasterProfile {
    pub fn is_virtual_machine_scale_sets(&self) -> bool {
        self.availability_profile == VIRTUAL_MACHINE_SCALE_SETS
    }

    pub fn is_availability_set(&self) -> bool {
        self.availability_profile == AVAILABILITY_SET
    }

    pub fn is_custom_vnet(&self) -> bool {
        !self.vnet_subnet_id.is_empty()
    }

    pub fn is_managed_disks(&self) -> bool {
        self.storage_profile == MANAGED_DISKS
    }

    pub fn is_vhd_distro(&self) -> bool {
        self.distro.is_some_and(|d| d.is_vhd())
    }

    pub fn is_ubuntu_1804(&self) -> bool {
        self.distro.is_some_and(|d| d.is_ubuntu_1804())
    }

    pub fn has_cosmos_etcd(&self) -> bool {
        self.cosmos_etcd == Some(true)
    }

    pub fn cosmos_endpoint_uri(&self) -> String {
        if self.has_cosmos_etcd() {
            format!("{}k8s.etcd.cosmosdb.azure.com", self.dns_prefix)
        } else {
            String::new()
        }
    }

    /// Computes the first static master IP of `subnet`. Availability set
    /// masters are placed at the start of the last /24 of the subnet, scale
    /// set masters at the start of the subnet.
    pub fn first_consecutive_static_ip(&self, subnet: &str) -> String {
        let Some((address, prefix)) = parse_ipv4_cidr(subnet) else {
            return DEFAULT_FIRST_CONSECUTIVE_KUBERNETES_STATIC_IP.to_owned();
        };

        let mask = u32::MAX.checked_shl(32 - prefix).unwrap_or(0);
        let network = u32::from(address) & mask;

        let ip = if self.is_virtual_machine_scale_sets() {
            (network & !0xff) | DEFAULT_KUBERNETES_FIRST_CONSECUTIVE_STATIC_IP_OFFSET_VMSS
        } else {
            // All host bits set, except for the last octet
            (network | (!mask & !0xff)) | DEFAULT_KUBERNETES_FIRST_CONSECUTIVE_STATIC_IP_OFFSET
        };

        Ipv4Addr::from(ip).to_string()
    }
}

fn parse_ipv4_cidr(cidr: &str) -> Option<(Ipv4Addr, u32)> {
    let (address, prefix) = cidr.split_once('/')?;
    let address: Ipv4Addr = address.parse().ok()?;
    let prefix: u32 = prefix.parse().ok()?;
    (prefix <= 32).then_some((address, prefix))
}

impl AgentPoolProfile {
    pub fn is_windows(&self) -> bool {
        self.os_type == Some(OsType::Windows)
    }

    pub fn is_linux(&self) -> bool {
        self.os_type == Some(OsType::Linux)
    }

    pub fn is_virtual_machine_scale_sets(&self) -> bool {
        self.availability_profile == VIRTUAL_MACHINE_SCALE_SETS
    }

    pub fn is_availability_sets(&self) -> bool {
        self.availability_profile == AVAILABILITY_SET
    }

    pub fn is_low_priority_scale_set(&self) -> bool {
        self.is_virtual_machine_scale_sets() && self.scale_set_priority == SCALE_SET_PRIORITY_LOW
    }

    pub fn is_spot_scale_set(&self) -> bool {
        self.is_virtual_machine_scale_sets() && self.scale_set_priority == SCALE_SET_PRIORITY_SPOT
    }

    pub fn is_managed_disks(&self) -> bool {
        self.storage_profile == MANAGED_DISKS
    }

    pub fn is_ephemeral(&self) -> bool {
        self.storage_profile == EPHEMERAL
    }

    pub fn is_vhd_distro(&self) -> bool {
        self.distro.is_some_and(|d| d.is_vhd())
    }

    pub fn is_ubuntu_1804(&self) -> bool {
        !self.is_windows() && self.distro.is_some_and(|d| d.is_ubuntu_1804())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::{
        api::{CustomCloudProfile, FeatureFlags},
        cloud::CloudEnvironment,
    };

    fn properties(plugin: &str, policy: &str, dual_stack: bool) -> Properties {
        Properties {
            orchestrator_profile: Some(OrchestratorProfile {
                kubernetes_config: Some(KubernetesConfig {
                    network_plugin: plugin.to_owned(),
                    network_policy: policy.to_owned(),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            feature_flags: Some(FeatureFlags {
                enable_ipv6_dual_stack: dual_stack,
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[rstest]
    #[case::kubenet("kubenet", "", false, true)]
    #[case::azure_cni("azure", "", false, false)]
    #[case::azure_cni_dual_stack("azure", "", true, true)]
    #[case::cilium("kubenet", "cilium", false, false)]
    #[case::flannel("flannel", "", false, false)]
    #[case::antrea("antrea", "antrea", false, false)]
    #[case::calico("kubenet", "calico", false, true)]
    fn require_route_table(
        #[case] plugin: &str,
        #[case] policy: &str,
        #[case] dual_stack: bool,
        #[case] expected: bool,
    ) {
        assert_eq!(
            properties(plugin, policy, dual_stack).require_route_table(),
            expected
        );
    }

    #[rstest]
    #[case::availability_set("10.239.0.0/16", "", "10.239.255.5")]
    #[case::availability_set_24("10.240.0.0/24", "", "10.240.0.5")]
    #[case::scale_set("10.239.0.0/16", VIRTUAL_MACHINE_SCALE_SETS, "10.239.0.4")]
    #[case::unparseable("garbage", "", DEFAULT_FIRST_CONSECUTIVE_KUBERNETES_STATIC_IP)]
    fn first_consecutive_static_ip(
        #[case] subnet: &str,
        #[case] availability_profile: &str,
        #[case] expected: &str,
    ) {
        let master = MasterProfile {
            availability_profile: availability_profile.to_owned(),
            ..Default::default()
        };

        assert_eq!(master.first_consecutive_static_ip(subnet), expected);
    }

    #[rstest]
    #[case::no_profile(None, false)]
    #[case::no_environment(Some(None), true)]
    #[case::unnamed_environment(Some(Some("")), true)]
    #[case::azure_stack(Some(Some("azurestackcloud")), true)]
    #[case::other_cloud(Some(Some("SomeCloud")), false)]
    fn is_azure_stack_cloud(#[case] environment: Option<Option<&str>>, #[case] expected: bool) {
        let properties = Properties {
            custom_cloud_profile: environment.map(|name| CustomCloudProfile {
                environment: name.map(|name| CloudEnvironment {
                    name: name.to_owned(),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        };

        assert_eq!(properties.is_azure_stack_cloud(), expected);
    }

    #[test]
    fn cloud_spec_follows_location() {
        let cs = ContainerService {
            location: "chinaeast2".to_owned(),
            ..Default::default()
        };

        let spec = cs.cloud_spec(CloudRegistry::builtin());
        assert_eq!(spec.cloud_name, "AzureChinaCloud");
    }

    #[test]
    fn apiserver_etcd_api_version() {
        let orchestrator = OrchestratorProfile {
            kubernetes_config: Some(KubernetesConfig {
                etcd_version: "3.3.19".to_owned(),
                ..Default::default()
            }),
            ..Default::default()
        };

        assert_eq!(orchestrator.apiserver_etcd_api_version(), "etcd3");
    }

    #[rstest]
    #[case::counts(Some(3), &[2, 5], 10)]
    #[case::no_master(None, &[4], 4)]
    #[case::saturates(Some(1), &[i32::MAX, i32::MAX], i32::MAX)]
    fn total_nodes(#[case] masters: Option<i32>, #[case] pools: &[i32], #[case] expected: i32) {
        let properties = Properties {
            master_profile: masters.map(|count| MasterProfile {
                count,
                ..Default::default()
            }),
            agent_pool_profiles: pools
                .iter()
                .map(|&count| AgentPoolProfile {
                    count,
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        };

        assert_eq!(properties.total_nodes(), expected);
    }
}
