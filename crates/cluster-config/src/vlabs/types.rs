use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    api::{Distro, OsType},
    cloud::{CloudEnvironment, CloudSpec},
    image::ImageOverride,
};

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero(value: &i32) -> bool {
    *value == 0
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero_f64(value: &f64) -> bool {
    *value == 0.0
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !*value
}

/// The `vlabs` cluster definition as authored by users.
#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContainerService {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub location: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<ResourcePurchasePlan>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,

    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub resource_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResourcePurchasePlan {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub product: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub promotion_code: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub publisher: String,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Properties {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub provisioning_state: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub orchestrator_profile: Option<OrchestratorProfile>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub master_profile: Option<MasterProfile>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub agent_pool_profiles: Vec<AgentPoolProfile>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub linux_profile: Option<LinuxProfile>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extension_profiles: Vec<ExtensionProfile>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub windows_profile: Option<WindowsProfile>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_principal_profile: Option<ServicePrincipalProfile>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_profile: Option<CertificateProfile>,

    #[serde(rename = "aadProfile", skip_serializing_if = "Option::is_none")]
    pub aad_profile: Option<AadProfile>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_flags: Option<FeatureFlags>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_cloud_profile: Option<CustomCloudProfile>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub telemetry_profile: Option<TelemetryProfile>,
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default)]
pub struct FeatureFlags {
    #[serde(rename = "enableCSERunInBackground", skip_serializing_if = "is_false")]
    pub enable_cse_run_in_background: bool,

    #[serde(rename = "blockOutboundInternet", skip_serializing_if = "is_false")]
    pub block_outbound_internet: bool,

    #[serde(rename = "enableIPv6DualStack", skip_serializing_if = "is_false")]
    pub enable_ipv6_dual_stack: bool,

    #[serde(rename = "enableTelemetry", skip_serializing_if = "is_false")]
    pub enable_telemetry: bool,

    #[serde(rename = "enableIPv6Only", skip_serializing_if = "is_false")]
    pub enable_ipv6_only: bool,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServicePrincipalProfile {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub client_id: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub secret: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub object_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyvault_secret_ref: Option<KeyvaultSecretRef>,
}

/// A secret stored in Azure Key Vault.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default)]
pub struct KeyvaultSecretRef {
    #[serde(rename = "vaultID", skip_serializing_if = "String::is_empty")]
    pub vault_id: String,

    #[serde(rename = "secretName", skip_serializing_if = "String::is_empty")]
    pub secret_name: String,

    #[serde(rename = "version", skip_serializing_if = "String::is_empty")]
    pub secret_version: String,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CertificateProfile {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ca_certificate: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub ca_private_key: String,

    #[serde(rename = "apiServerCertificate", skip_serializing_if = "String::is_empty")]
    pub api_server_certificate: String,

    #[serde(rename = "apiServerPrivateKey", skip_serializing_if = "String::is_empty")]
    pub api_server_private_key: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub client_certificate: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub client_private_key: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub kube_config_certificate: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub kube_config_private_key: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub etcd_server_certificate: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub etcd_server_private_key: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub etcd_client_certificate: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub etcd_client_private_key: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub etcd_peer_certificates: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub etcd_peer_private_keys: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LinuxProfile {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub admin_username: String,

    pub ssh: SshConfig,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub secrets: Vec<KeyVaultSecrets>,

    #[serde(rename = "scriptroot", skip_serializing_if = "String::is_empty")]
    pub script_root_url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_search_domain: Option<CustomSearchDomain>,

    #[serde(rename = "customNodesDNS", skip_serializing_if = "Option::is_none")]
    pub custom_nodes_dns: Option<CustomNodesDns>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SshConfig {
    pub public_keys: Vec<PublicKey>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PublicKey {
    pub key_data: String,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomSearchDomain {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub realm_user: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub realm_password: String,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomNodesDns {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub dns_server: String,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WindowsProfile {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub admin_username: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub admin_password: String,

    #[serde(rename = "csiProxyURL", skip_serializing_if = "String::is_empty")]
    pub csi_proxy_url: String,

    #[serde(rename = "enableCSIProxy", skip_serializing_if = "Option::is_none")]
    pub enable_csi_proxy: Option<bool>,

    #[serde(rename = "imageReference", skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<ImageReference>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub image_version: String,

    #[serde(rename = "WindowsImageSourceUrl", skip_serializing_if = "String::is_empty")]
    pub windows_image_source_url: String,

    #[serde(rename = "WindowsPublisher", skip_serializing_if = "String::is_empty")]
    pub windows_publisher: String,

    #[serde(rename = "WindowsOffer", skip_serializing_if = "String::is_empty")]
    pub windows_offer: String,

    #[serde(rename = "WindowsSku", skip_serializing_if = "String::is_empty")]
    pub windows_sku: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub windows_docker_version: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub secrets: Vec<KeyVaultSecrets>,

    #[serde(rename = "sshEnabled", skip_serializing_if = "Option::is_none")]
    pub ssh_enabled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_automatic_updates: Option<bool>,
}

/// Selects the orchestrator and its version. `orchestratorRelease` may carry
/// a bare `major.minor` release which is rationalized during conversion.
#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrchestratorProfile {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub orchestrator_type: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub orchestrator_release: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub orchestrator_version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kubernetes_config: Option<KubernetesConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dcos_config: Option<DcosConfig>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KubernetesContainerSpec {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub image: String,

    #[serde(rename = "cpuRequests", skip_serializing_if = "String::is_empty")]
    pub cpu_requests: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub memory_requests: String,

    #[serde(rename = "cpuLimits", skip_serializing_if = "String::is_empty")]
    pub cpu_limits: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub memory_limits: String,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default)]
pub struct AddonNodePoolsConfig {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub config: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default)]
pub struct KubernetesAddon {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub mode: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub containers: Vec<KubernetesContainerSpec>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub config: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pools: Vec<AddonNodePoolsConfig>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub data: String,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default)]
pub struct KubernetesComponent {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub containers: Vec<KubernetesContainerSpec>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub config: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub data: String,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrivateCluster {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub jumpbox_profile: Option<PrivateJumpboxProfile>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrivateJumpboxProfile {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub vm_size: String,

    #[serde(rename = "osDiskSizeGB", skip_serializing_if = "is_zero")]
    pub os_disk_size_gb: i32,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub username: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub public_key: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub storage_profile: String,
}

/// Kubernetes specific configuration. Used on the orchestrator profile as
/// well as on the master and agent pool profiles.
#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KubernetesConfig {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub kubernetes_image_base: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub kubernetes_image_base_type: String,

    #[serde(rename = "mcrKubernetesImageBase", skip_serializing_if = "String::is_empty")]
    pub mcr_kubernetes_image_base: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub cluster_subnet: String,

    #[serde(rename = "dnsServiceIP", skip_serializing_if = "String::is_empty")]
    pub dns_service_ip: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub service_cidr: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub network_policy: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub network_plugin: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub network_mode: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub container_runtime: String,

    #[serde(skip_serializing_if = "is_zero")]
    pub max_pods: i32,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub docker_bridge_subnet: String,

    #[serde(skip_serializing_if = "is_false")]
    pub use_managed_identity: bool,

    #[serde(rename = "userAssignedID", skip_serializing_if = "String::is_empty")]
    pub user_assigned_id: String,

    #[serde(rename = "userAssignedClientID", skip_serializing_if = "String::is_empty")]
    pub user_assigned_client_id: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub custom_hyperkube_image: String,

    #[serde(rename = "customKubeAPIServerImage", skip_serializing_if = "String::is_empty")]
    pub custom_kube_api_server_image: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub custom_kube_controller_manager_image: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub custom_kube_proxy_image: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub custom_kube_scheduler_image: String,

    #[serde(rename = "customKubeBinaryURL", skip_serializing_if = "String::is_empty")]
    pub custom_kube_binary_url: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub docker_engine_version: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub moby_version: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub containerd_version: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub custom_ccm_image: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_cloud_controller_manager: Option<bool>,

    #[serde(rename = "customWindowsPackageURL", skip_serializing_if = "String::is_empty")]
    pub custom_windows_package_url: String,

    #[serde(rename = "windowsNodeBinariesURL", skip_serializing_if = "String::is_empty")]
    pub windows_node_binaries_url: String,

    #[serde(rename = "windowsContainerdURL", skip_serializing_if = "String::is_empty")]
    pub windows_containerd_url: String,

    #[serde(rename = "windowsSdnPluginURL", skip_serializing_if = "String::is_empty")]
    pub windows_sdn_plugin_url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_instance_metadata: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_rbac: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_secure_kubelet: Option<bool>,

    #[serde(rename = "enableAggregatedAPIs", skip_serializing_if = "is_false")]
    pub enable_aggregated_apis: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_cluster: Option<PrivateCluster>,

    #[serde(rename = "gchighthreshold", skip_serializing_if = "is_zero")]
    pub gc_high_threshold: i32,

    #[serde(rename = "gclowthreshold", skip_serializing_if = "is_zero")]
    pub gc_low_threshold: i32,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub etcd_version: String,

    #[serde(rename = "etcdDiskSizeGB", skip_serializing_if = "String::is_empty")]
    pub etcd_disk_size_gb: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub etcd_encryption_key: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_data_encryption_at_rest: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_encryption_with_external_kms: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_pod_security_policy: Option<bool>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub addons: Vec<KubernetesAddon>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<KubernetesComponent>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub container_runtime_config: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub kubelet_config: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub controller_manager_config: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub cloud_controller_manager_config: BTreeMap<String, String>,

    #[serde(rename = "apiServerConfig", skip_serializing_if = "BTreeMap::is_empty")]
    pub apiserver_config: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub scheduler_config: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub pod_security_policy_config: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub kube_reserved_cgroup: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub cloud_provider_backoff_mode: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_provider_backoff: Option<bool>,

    #[serde(skip_serializing_if = "is_zero")]
    pub cloud_provider_backoff_retries: i32,

    #[serde(skip_serializing_if = "is_zero_f64")]
    pub cloud_provider_backoff_jitter: f64,

    #[serde(skip_serializing_if = "is_zero")]
    pub cloud_provider_backoff_duration: i32,

    #[serde(skip_serializing_if = "is_zero_f64")]
    pub cloud_provider_backoff_exponent: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_provider_rate_limit: Option<bool>,

    #[serde(rename = "cloudProviderRateLimitQPS", skip_serializing_if = "is_zero_f64")]
    pub cloud_provider_rate_limit_qps: f64,

    #[serde(
        rename = "cloudProviderRateLimitQPSWrite",
        skip_serializing_if = "is_zero_f64"
    )]
    pub cloud_provider_rate_limit_qps_write: f64,

    #[serde(skip_serializing_if = "is_zero")]
    pub cloud_provider_rate_limit_bucket: i32,

    #[serde(skip_serializing_if = "is_zero")]
    pub cloud_provider_rate_limit_bucket_write: i32,

    #[serde(
        rename = "cloudProviderDisableOutboundSNAT",
        skip_serializing_if = "Option::is_none"
    )]
    pub cloud_provider_disable_outbound_snat: Option<bool>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub load_balancer_sku: String,

    #[serde(rename = "excludeMasterFromStandardLB", skip_serializing_if = "Option::is_none")]
    pub exclude_master_from_standard_lb: Option<bool>,

    #[serde(rename = "loadBalancerOutboundIPs", skip_serializing_if = "Option::is_none")]
    pub load_balancer_outbound_ips: Option<i32>,

    #[serde(rename = "azureCNIVersion", skip_serializing_if = "String::is_empty")]
    pub azure_cni_version: String,

    #[serde(rename = "azureCNIURLLinux", skip_serializing_if = "String::is_empty")]
    pub azure_cni_url_linux: String,

    #[serde(rename = "azureCNIURLWindows", skip_serializing_if = "String::is_empty")]
    pub azure_cni_url_windows: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub key_vault_sku: String,

    #[serde(skip_serializing_if = "is_zero")]
    pub maximum_load_balancer_rule_count: i32,

    #[serde(rename = "kubeProxyMode", skip_serializing_if = "String::is_empty")]
    pub proxy_mode: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub private_azure_registry_server: String,

    #[serde(skip_serializing_if = "is_zero")]
    pub outbound_rule_idle_timeout_in_minutes: i32,

    /// Registry, repository and tag rewrites keyed by untagged image
    /// reference.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub image_repo_overrides: BTreeMap<String, ImageOverride>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default)]
pub struct CustomFile {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub source: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub dest: String,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BootstrapProfile {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub vm_size: String,

    #[serde(rename = "osDiskSizeGB", skip_serializing_if = "is_zero")]
    pub os_disk_size_gb: i32,

    #[serde(rename = "oauthEnabled", skip_serializing_if = "is_false")]
    pub oauth_enabled: bool,

    #[serde(rename = "staticIP", skip_serializing_if = "String::is_empty")]
    pub static_ip: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub subnet: String,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DcosConfig {
    #[serde(rename = "dcosBootstrapURL", skip_serializing_if = "String::is_empty")]
    pub dcos_bootstrap_url: String,

    #[serde(rename = "dcosWindowsBootstrapURL", skip_serializing_if = "String::is_empty")]
    pub dcos_windows_bootstrap_url: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub registry: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub registry_user: String,

    #[serde(rename = "registryPassword", skip_serializing_if = "String::is_empty")]
    pub registry_pass: String,

    #[serde(rename = "dcosRepositoryURL", skip_serializing_if = "String::is_empty")]
    pub dcos_repository_url: String,

    #[serde(rename = "dcosClusterPackageListID", skip_serializing_if = "String::is_empty")]
    pub dcos_cluster_package_list_id: String,

    #[serde(rename = "dcosProviderPackageID", skip_serializing_if = "String::is_empty")]
    pub dcos_provider_package_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bootstrap_profile: Option<BootstrapProfile>,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MasterProfile {
    #[serde(skip_serializing_if = "is_zero")]
    pub count: i32,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub dns_prefix: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subject_alt_names: Vec<String>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub vm_size: String,

    #[serde(rename = "osDiskSizeGB", skip_serializing_if = "is_zero")]
    pub os_disk_size_gb: i32,

    #[serde(rename = "vnetSubnetID", skip_serializing_if = "String::is_empty")]
    pub vnet_subnet_id: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub vnet_cidr: String,

    #[serde(rename = "agentVnetSubnetID", skip_serializing_if = "String::is_empty")]
    pub agent_vnet_subnet_id: String,

    #[serde(rename = "firstConsecutiveStaticIP", skip_serializing_if = "String::is_empty")]
    pub first_consecutive_static_ip: String,

    #[serde(skip_serializing_if = "is_zero")]
    pub ip_address_count: i32,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub storage_profile: String,

    #[serde(rename = "HTTPSourceAddressPrefix", skip_serializing_if = "String::is_empty")]
    pub http_source_address_prefix: String,

    #[serde(rename = "oauthEnabled", skip_serializing_if = "is_false")]
    pub oauth_enabled: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_provision_extension: Option<Extension>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<Extension>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub distro: Option<Distro>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kubernetes_config: Option<KubernetesConfig>,

    #[serde(rename = "imageReference", skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<ImageReference>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub custom_files: Vec<CustomFile>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub availability_profile: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub agent_subnet: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub availability_zones: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_placement_group: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_fault_domain_count: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_update_domain_count: Option<i32>,

    #[serde(rename = "auditDEnabled", skip_serializing_if = "Option::is_none")]
    pub audit_d_enabled: Option<bool>,

    #[serde(rename = "customVMTags", skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_vm_tags: BTreeMap<String, String>,

    #[serde(rename = "sysctldConfig", skip_serializing_if = "BTreeMap::is_empty")]
    pub sysctld_config: BTreeMap<String, String>,

    #[serde(rename = "ultraSSDEnabled", skip_serializing_if = "Option::is_none")]
    pub ultra_ssd_enabled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption_at_host: Option<bool>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub fqdn: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cosmos_etcd: Option<bool>,

    #[serde(rename = "proximityPlacementGroupID", skip_serializing_if = "String::is_empty")]
    pub proximity_placement_group_id: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub os_disk_caching_type: String,
}

/// A reference to a custom VM image resource.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageReference {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub resource_group: String,

    #[serde(rename = "subscriptionId", skip_serializing_if = "String::is_empty")]
    pub subscription_id: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub gallery: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub version: String,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtensionProfile {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub version: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub extension_parameters: String,

    #[serde(
        rename = "parametersKeyvaultSecretRef",
        skip_serializing_if = "Option::is_none"
    )]
    pub extension_parameters_key_vault_ref: Option<KeyvaultSecretRef>,

    #[serde(rename = "rootURL", skip_serializing_if = "String::is_empty")]
    pub root_url: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub script: String,

    #[serde(rename = "urlQuery", skip_serializing_if = "String::is_empty")]
    pub url_query: String,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Extension {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub single_or_all: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub template: String,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AgentPoolProfile {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(skip_serializing_if = "is_zero")]
    pub count: i32,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub vm_size: String,

    #[serde(rename = "osDiskSizeGB", skip_serializing_if = "is_zero")]
    pub os_disk_size_gb: i32,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub dns_prefix: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_type: Option<OsType>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<i32>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub availability_profile: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub scale_set_priority: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub scale_set_eviction_policy: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub spot_max_price: Option<f64>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub storage_profile: String,

    #[serde(rename = "diskSizesGB", skip_serializing_if = "Vec::is_empty")]
    pub disk_sizes_gb: Vec<i32>,

    #[serde(rename = "vnetSubnetID", skip_serializing_if = "String::is_empty")]
    pub vnet_subnet_id: String,

    #[serde(skip_serializing_if = "is_zero")]
    pub ip_address_count: i32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub distro: Option<Distro>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kubernetes_config: Option<KubernetesConfig>,

    #[serde(rename = "imageReference", skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<ImageReference>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub role: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub accelerated_networking_enabled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub accelerated_networking_enabled_windows: Option<bool>,

    #[serde(rename = "vmssOverProvisioningEnabled", skip_serializing_if = "Option::is_none")]
    pub vmss_over_provisioning_enabled: Option<bool>,

    #[serde(rename = "auditDEnabled", skip_serializing_if = "Option::is_none")]
    pub audit_d_enabled: Option<bool>,

    #[serde(rename = "customVMTags", skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_vm_tags: BTreeMap<String, String>,

    #[serde(rename = "diskEncryptionSetID", skip_serializing_if = "String::is_empty")]
    pub disk_encryption_set_id: String,

    #[serde(rename = "ultraSSDEnabled", skip_serializing_if = "Option::is_none")]
    pub ultra_ssd_enabled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption_at_host: Option<bool>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub fqdn: String,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_node_labels: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_provision_extension: Option<Extension>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<Extension>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_placement_group: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_fault_domain_count: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_update_domain_count: Option<i32>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub availability_zones: Vec<String>,

    #[serde(rename = "enableVMSSNodePublicIP", skip_serializing_if = "Option::is_none")]
    pub enable_vmss_node_public_ip: Option<bool>,

    #[serde(
        rename = "loadBalancerBackendAddressPoolIDs",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub load_balancer_backend_address_pool_ids: Vec<String>,

    #[serde(rename = "sysctldConfig", skip_serializing_if = "BTreeMap::is_empty")]
    pub sysctld_config: BTreeMap<String, String>,

    #[serde(rename = "proximityPlacementGroupID", skip_serializing_if = "String::is_empty")]
    pub proximity_placement_group_id: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub os_disk_caching_type: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub data_disk_caching_type: String,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default)]
pub struct AadProfile {
    #[serde(rename = "clientAppID", skip_serializing_if = "String::is_empty")]
    pub client_app_id: String,

    #[serde(rename = "serverAppID", skip_serializing_if = "String::is_empty")]
    pub server_app_id: String,

    #[serde(rename = "tenantID", skip_serializing_if = "String::is_empty")]
    pub tenant_id: String,

    #[serde(rename = "adminGroupID", skip_serializing_if = "String::is_empty")]
    pub admin_group_id: String,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KeyVaultSecrets {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_vault: Option<KeyVaultId>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub vault_certificates: Vec<KeyVaultCertificate>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default)]
pub struct KeyVaultId {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default)]
pub struct KeyVaultCertificate {
    #[serde(rename = "certificateUrl", skip_serializing_if = "String::is_empty")]
    pub certificate_url: String,

    #[serde(rename = "certificateStore", skip_serializing_if = "String::is_empty")]
    pub certificate_store: String,
}

/// Describes a cloud which is not one of the built-in Azure clouds, most
/// notably Azure Stack Hub.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomCloudProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<CloudEnvironment>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub azure_environment_spec_config: Option<CloudSpec>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub identity_system: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub authentication_method: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub dependencies_location: String,

    #[serde(rename = "portalURL", skip_serializing_if = "String::is_empty")]
    pub portal_url: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub custom_cloud_root_certificates: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub custom_cloud_sources_list: String,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TelemetryProfile {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub application_insights_key: String,
}
