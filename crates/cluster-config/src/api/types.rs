use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::{
    cloud::{CloudEnvironment, CloudSpec},
    image::ImageOverride,
};

/// The orchestrator a cluster runs.
#[derive(
    AsRefStr, Clone, Copy, Debug, Default, Display, EnumString, Eq, Hash, Ord, PartialEq, PartialOrd,
)]
#[strum(ascii_case_insensitive)]
pub enum OrchestratorType {
    #[default]
    Kubernetes,
    #[strum(serialize = "DCOS")]
    Dcos,
    Swarm,
    SwarmMode,
}

#[derive(
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    EnumString,
    Eq,
    Hash,
    JsonSchema,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub enum OsType {
    #[default]
    Linux,
    Windows,
}

/// Linux distribution of a VM image.
#[derive(
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    EnumString,
    Eq,
    Hash,
    JsonSchema,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub enum Distro {
    #[serde(rename = "ubuntu")]
    #[strum(serialize = "ubuntu")]
    Ubuntu,
    #[serde(rename = "ubuntu-18.04")]
    #[strum(serialize = "ubuntu-18.04")]
    Ubuntu1804,
    #[serde(rename = "ubuntu-18.04-gen2")]
    #[strum(serialize = "ubuntu-18.04-gen2")]
    Ubuntu1804Gen2,
    #[serde(rename = "rhel")]
    #[strum(serialize = "rhel")]
    Rhel,
    /// Deprecated
    #[serde(rename = "coreos")]
    #[strum(serialize = "coreos")]
    CoreOs,
    /// Deprecated alias of [`Distro::AksUbuntu1604`].
    #[serde(rename = "aks")]
    #[strum(serialize = "aks")]
    Aks1604Deprecated,
    /// Deprecated alias of [`Distro::AksUbuntu1804`].
    #[serde(rename = "aks-1804")]
    #[strum(serialize = "aks-1804")]
    Aks1804Deprecated,
    /// Deprecated
    #[serde(rename = "aks-docker-engine")]
    #[strum(serialize = "aks-docker-engine")]
    AksDockerEngine,
    #[serde(rename = "aks-ubuntu-16.04")]
    #[strum(serialize = "aks-ubuntu-16.04")]
    AksUbuntu1604,
    #[serde(rename = "aks-ubuntu-18.04")]
    #[strum(serialize = "aks-ubuntu-18.04")]
    AksUbuntu1804,
    #[serde(rename = "acc-16.04")]
    #[strum(serialize = "acc-16.04")]
    Acc1604,
}

impl Distro {
    /// VHD distros ship a pre-baked image maintained alongside the tooling.
    pub fn is_vhd(self) -> bool {
        matches!(self, Self::AksUbuntu1604 | Self::AksUbuntu1804)
    }

    pub fn is_ubuntu_1804(self) -> bool {
        matches!(
            self,
            Self::AksUbuntu1804 | Self::Ubuntu1804 | Self::Ubuntu1804Gen2
        )
    }

    pub fn is_ubuntu_1604(self) -> bool {
        matches!(self, Self::AksUbuntu1604 | Self::Ubuntu | Self::Acc1604)
    }
}

/// The unversioned cluster definition every stage after loading works on.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContainerService {
    pub id: String,
    pub location: String,
    pub name: String,
    pub plan: Option<ResourcePurchasePlan>,
    pub tags: BTreeMap<String, String>,
    pub resource_type: String,
    pub properties: Properties,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ResourcePurchasePlan {
    pub name: String,
    pub product: String,
    pub promotion_code: String,
    pub publisher: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Properties {
    pub provisioning_state: String,
    pub orchestrator_profile: Option<OrchestratorProfile>,
    pub master_profile: Option<MasterProfile>,
    pub agent_pool_profiles: Vec<AgentPoolProfile>,
    pub linux_profile: Option<LinuxProfile>,
    pub windows_profile: Option<WindowsProfile>,
    pub extension_profiles: Vec<ExtensionProfile>,
    pub service_principal_profile: Option<ServicePrincipalProfile>,
    pub certificate_profile: Option<CertificateProfile>,
    pub aad_profile: Option<AadProfile>,
    pub feature_flags: Option<FeatureFlags>,
    pub custom_cloud_profile: Option<CustomCloudProfile>,
    pub telemetry_profile: Option<TelemetryProfile>,
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FeatureFlags {
    pub enable_cse_run_in_background: bool,
    pub block_outbound_internet: bool,
    pub enable_ipv6_dual_stack: bool,
    pub enable_telemetry: bool,
    pub enable_ipv6_only: bool,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ServicePrincipalProfile {
    pub client_id: String,
    pub secret: String,
    pub object_id: String,
    pub keyvault_secret_ref: Option<KeyvaultSecretRef>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct KeyvaultSecretRef {
    pub vault_id: String,
    pub secret_name: String,
    pub secret_version: String,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CertificateProfile {
    pub ca_certificate: String,
    pub ca_private_key: String,
    pub api_server_certificate: String,
    pub api_server_private_key: String,
    pub client_certificate: String,
    pub client_private_key: String,
    pub kube_config_certificate: String,
    pub kube_config_private_key: String,
    pub etcd_server_certificate: String,
    pub etcd_server_private_key: String,
    pub etcd_client_certificate: String,
    pub etcd_client_private_key: String,
    pub etcd_peer_certificates: Vec<String>,
    pub etcd_peer_private_keys: Vec<String>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LinuxProfile {
    pub admin_username: String,
    pub ssh_public_keys: Vec<String>,
    pub secrets: Vec<KeyVaultSecrets>,
    pub script_root_url: String,
    pub custom_search_domain: Option<CustomSearchDomain>,
    pub custom_nodes_dns: Option<CustomNodesDns>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CustomSearchDomain {
    pub name: String,
    pub realm_user: String,
    pub realm_password: String,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CustomNodesDns {
    pub dns_server: String,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct WindowsProfile {
    pub admin_username: String,
    pub admin_password: String,
    pub csi_proxy_url: String,
    pub enable_csi_proxy: Option<bool>,
    pub image_ref: Option<ImageReference>,
    pub image_version: String,
    pub windows_image_source_url: String,
    pub windows_publisher: String,
    pub windows_offer: String,
    pub windows_sku: String,
    pub windows_docker_version: String,
    pub secrets: Vec<KeyVaultSecrets>,
    pub ssh_enabled: Option<bool>,
    pub enable_automatic_updates: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct OrchestratorProfile {
    pub orchestrator_type: OrchestratorType,
    pub orchestrator_version: String,
    pub kubernetes_config: Option<KubernetesConfig>,
    pub dcos_config: Option<DcosConfig>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct KubernetesContainerSpec {
    pub name: String,
    pub image: String,
    pub cpu_requests: String,
    pub memory_requests: String,
    pub cpu_limits: String,
    pub memory_limits: String,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AddonNodePoolsConfig {
    pub name: String,
    pub config: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct KubernetesAddon {
    pub name: String,
    pub enabled: Option<bool>,
    pub mode: String,
    pub containers: Vec<KubernetesContainerSpec>,
    pub config: BTreeMap<String, String>,
    pub pools: Vec<AddonNodePoolsConfig>,
    pub data: String,
}

/// A control plane component together with the containers it runs.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct KubernetesComponent {
    pub name: String,
    pub enabled: Option<bool>,
    pub containers: Vec<KubernetesContainerSpec>,
    pub config: BTreeMap<String, String>,
    pub data: String,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PrivateCluster {
    pub enabled: Option<bool>,
    pub jumpbox_profile: Option<PrivateJumpboxProfile>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PrivateJumpboxProfile {
    pub name: String,
    pub vm_size: String,
    pub os_disk_size_gb: i32,
    pub username: String,
    pub public_key: String,
    pub storage_profile: String,
}

/// Kubernetes specific configuration. The component maps hold command line
/// flags keyed by flag name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KubernetesConfig {
    pub kubernetes_image_base: String,
    pub kubernetes_image_base_type: String,
    pub mcr_kubernetes_image_base: String,
    pub cluster_subnet: String,
    pub non_masquerade_cidr: String,
    pub network_policy: String,
    pub network_plugin: String,
    pub network_mode: String,
    pub container_runtime: String,
    pub max_pods: i32,
    pub docker_bridge_subnet: String,
    pub dns_service_ip: String,
    pub service_cidr: String,
    pub use_managed_identity: bool,
    pub user_assigned_id: String,
    pub user_assigned_client_id: String,
    pub custom_hyperkube_image: String,
    pub custom_kube_api_server_image: String,
    pub custom_kube_controller_manager_image: String,
    pub custom_kube_proxy_image: String,
    pub custom_kube_scheduler_image: String,
    pub custom_kube_binary_url: String,
    pub docker_engine_version: String,
    pub moby_version: String,
    pub containerd_version: String,
    pub custom_ccm_image: String,
    pub use_cloud_controller_manager: Option<bool>,
    pub custom_windows_package_url: String,
    pub windows_node_binaries_url: String,
    pub windows_containerd_url: String,
    pub windows_sdn_plugin_url: String,
    pub use_instance_metadata: Option<bool>,
    pub enable_rbac: Option<bool>,
    pub enable_secure_kubelet: Option<bool>,
    pub enable_aggregated_apis: bool,
    pub private_cluster: Option<PrivateCluster>,
    pub gc_high_threshold: i32,
    pub gc_low_threshold: i32,
    pub etcd_version: String,
    pub etcd_disk_size_gb: String,
    pub etcd_encryption_key: String,
    pub enable_data_encryption_at_rest: Option<bool>,
    pub enable_encryption_with_external_kms: Option<bool>,
    pub enable_pod_security_policy: Option<bool>,
    pub addons: Vec<KubernetesAddon>,
    pub components: Vec<KubernetesComponent>,
    pub container_runtime_config: BTreeMap<String, String>,
    pub kubelet_config: BTreeMap<String, String>,
    pub controller_manager_config: BTreeMap<String, String>,
    pub cloud_controller_manager_config: BTreeMap<String, String>,
    pub apiserver_config: BTreeMap<String, String>,
    pub scheduler_config: BTreeMap<String, String>,
    pub pod_security_policy_config: BTreeMap<String, String>,
    pub kube_reserved_cgroup: String,
    pub cloud_provider_backoff_mode: String,
    pub cloud_provider_backoff: Option<bool>,
    pub cloud_provider_backoff_retries: i32,
    pub cloud_provider_backoff_jitter: f64,
    pub cloud_provider_backoff_duration: i32,
    pub cloud_provider_backoff_exponent: f64,
    pub cloud_provider_rate_limit: Option<bool>,
    pub cloud_provider_rate_limit_qps: f64,
    pub cloud_provider_rate_limit_qps_write: f64,
    pub cloud_provider_rate_limit_bucket: i32,
    pub cloud_provider_rate_limit_bucket_write: i32,
    pub cloud_provider_disable_outbound_snat: Option<bool>,
    pub node_status_update_frequency: String,
    pub hard_eviction_threshold: String,
    pub ctrl_mgr_node_monitor_grace_period: String,
    pub ctrl_mgr_pod_eviction_timeout: String,
    pub ctrl_mgr_route_reconciliation_period: String,
    pub load_balancer_sku: String,
    pub exclude_master_from_standard_lb: Option<bool>,
    pub load_balancer_outbound_ips: Option<i32>,
    pub azure_cni_version: String,
    pub azure_cni_url_linux: String,
    pub azure_cni_url_windows: String,
    pub key_vault_sku: String,
    pub maximum_load_balancer_rule_count: i32,
    pub proxy_mode: String,
    pub private_azure_registry_server: String,
    pub outbound_rule_idle_timeout_in_minutes: i32,
    pub image_repo_overrides: BTreeMap<String, ImageOverride>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CustomFile {
    pub source: String,
    pub dest: String,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BootstrapProfile {
    pub vm_size: String,
    pub os_disk_size_gb: i32,
    pub oauth_enabled: bool,
    pub static_ip: String,
    pub subnet: String,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DcosConfig {
    pub dcos_bootstrap_url: String,
    pub dcos_windows_bootstrap_url: String,
    pub registry: String,
    pub registry_user: String,
    pub registry_pass: String,
    pub dcos_repository_url: String,
    pub dcos_cluster_package_list_id: String,
    pub dcos_provider_package_id: String,
    pub bootstrap_profile: Option<BootstrapProfile>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MasterProfile {
    pub count: i32,
    pub dns_prefix: String,
    pub subject_alt_names: Vec<String>,
    pub vm_size: String,
    pub os_disk_size_gb: i32,
    pub vnet_subnet_id: String,
    pub vnet_cidr: String,
    pub agent_vnet_subnet_id: String,
    pub first_consecutive_static_ip: String,
    pub subnet: String,
    pub subnet_ipv6: String,
    pub ip_address_count: i32,
    pub storage_profile: String,
    pub http_source_address_prefix: String,
    pub oauth_enabled: bool,
    pub pre_provision_extension: Option<Extension>,
    pub extensions: Vec<Extension>,
    pub distro: Option<Distro>,
    pub kubernetes_config: Option<KubernetesConfig>,
    pub image_ref: Option<ImageReference>,
    pub custom_files: Vec<CustomFile>,
    pub availability_profile: String,
    pub agent_subnet: String,
    pub availability_zones: Vec<String>,
    pub single_placement_group: Option<bool>,
    pub platform_fault_domain_count: Option<i32>,
    pub platform_update_domain_count: Option<i32>,
    pub audit_d_enabled: Option<bool>,
    pub custom_vm_tags: BTreeMap<String, String>,
    pub sysctld_config: BTreeMap<String, String>,
    pub ultra_ssd_enabled: Option<bool>,
    pub encryption_at_host: Option<bool>,
    pub fqdn: String,
    pub cosmos_etcd: Option<bool>,
    pub proximity_placement_group_id: String,
    pub os_disk_caching_type: String,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ImageReference {
    pub name: String,
    pub resource_group: String,
    pub subscription_id: String,
    pub gallery: String,
    pub version: String,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ExtensionProfile {
    pub name: String,
    pub version: String,
    pub extension_parameters: String,
    pub extension_parameters_key_vault_ref: Option<KeyvaultSecretRef>,
    pub root_url: String,
    pub script: String,
    pub url_query: String,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Extension {
    pub name: String,
    pub single_or_all: String,
    pub template: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AgentPoolProfile {
    pub name: String,
    pub count: i32,
    pub vm_size: String,
    pub os_disk_size_gb: i32,
    pub dns_prefix: String,
    pub os_type: Option<OsType>,
    pub ports: Vec<i32>,
    pub availability_profile: String,
    pub scale_set_priority: String,
    pub scale_set_eviction_policy: String,
    pub spot_max_price: Option<f64>,
    pub storage_profile: String,
    pub disk_sizes_gb: Vec<i32>,
    pub vnet_subnet_id: String,
    pub subnet: String,
    pub ip_address_count: i32,
    pub distro: Option<Distro>,
    pub kubernetes_config: Option<KubernetesConfig>,
    pub image_ref: Option<ImageReference>,
    pub role: String,
    pub accelerated_networking_enabled: Option<bool>,
    pub accelerated_networking_enabled_windows: Option<bool>,
    pub vmss_over_provisioning_enabled: Option<bool>,
    pub audit_d_enabled: Option<bool>,
    pub custom_vm_tags: BTreeMap<String, String>,
    pub disk_encryption_set_id: String,
    pub ultra_ssd_enabled: Option<bool>,
    pub encryption_at_host: Option<bool>,
    pub fqdn: String,
    pub custom_node_labels: BTreeMap<String, String>,
    pub pre_provision_extension: Option<Extension>,
    pub extensions: Vec<Extension>,
    pub single_placement_group: Option<bool>,
    pub platform_fault_domain_count: Option<i32>,
    pub platform_update_domain_count: Option<i32>,
    pub availability_zones: Vec<String>,
    pub enable_vmss_node_public_ip: Option<bool>,
    pub load_balancer_backend_address_pool_ids: Vec<String>,
    pub sysctld_config: BTreeMap<String, String>,
    pub proximity_placement_group_id: String,
    pub os_disk_caching_type: String,
    pub data_disk_caching_type: String,
    pub preserve_nodes_properties: Option<bool>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AadProfile {
    pub client_app_id: String,
    pub server_app_id: String,
    pub tenant_id: String,
    pub admin_group_id: String,
    /// Always `OIDC` once converted.
    pub authenticator: String,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct KeyVaultSecrets {
    pub source_vault_id: Option<String>,
    pub vault_certificates: Vec<KeyVaultCertificate>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct KeyVaultCertificate {
    pub certificate_url: String,
    pub certificate_store: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CustomCloudProfile {
    pub environment: Option<CloudEnvironment>,
    /// Populated by the defaults engine for Azure Stack clouds.
    pub azure_environment_spec_config: Option<CloudSpec>,
    pub identity_system: String,
    pub authentication_method: String,
    pub dependencies_location: String,
    pub portal_url: String,
    pub custom_cloud_root_certificates: String,
    pub custom_cloud_sources_list: String,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TelemetryProfile {
    pub application_insights_key: String,
}
