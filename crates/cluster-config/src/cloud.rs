//! Per-cloud endpoint suffixes, image bases and OS images.
//!
//! The [`CloudRegistry`] is built once and handed to the defaults engine by
//! reference. Azure Stack deployments derive their [`CloudSpec`] from the
//! custom cloud profile instead, see [`azure_stack_cloud_spec`].
use std::{collections::BTreeMap, sync::LazyLock};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::api::{
    Distro,
    consts::{AZURE_CNI_PLUGIN_VERSION, CNI_PLUGIN_VERSION},
};

#[derive(
    AsRefStr, Clone, Copy, Debug, Display, EnumString, Eq, Hash, Ord, PartialEq, PartialOrd,
)]
#[strum(ascii_case_insensitive)]
pub enum CloudName {
    AzurePublicCloud,
    AzureChinaCloud,
    AzureGermanCloud,
    AzureUSGovernmentCloud,
    AzureStackCloud,
}

impl CloudName {
    /// Determines the sovereign cloud a location belongs to, falling back to
    /// the public cloud.
    pub fn from_location(location: &str) -> Self {
        let location: String = location
            .split_whitespace()
            .collect::<String>()
            .to_lowercase();

        match location.as_str() {
            "chinaeast" | "chinanorth" | "chinaeast2" | "chinanorth2" => Self::AzureChinaCloud,
            "germanynortheast" | "germanycentral" => Self::AzureGermanCloud,
            loc if loc.starts_with("usgov") || loc.starts_with("usdod") => {
                Self::AzureUSGovernmentCloud
            }
            _ => Self::AzurePublicCloud,
        }
    }

    /// Like [`CloudName::from_location`], but a custom cloud named
    /// `AzureStackCloud` takes precedence over the location.
    pub fn target_env(location: &str, custom_cloud_name: &str) -> Self {
        if custom_cloud_name.eq_ignore_ascii_case(Self::AzureStackCloud.as_ref()) {
            Self::AzureStackCloud
        } else {
            Self::from_location(location)
        }
    }
}

/// Image bases and download locations of a cloud.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KubernetesSpecConfig {
    #[serde(rename = "azureTelemetryPID", skip_serializing_if = "String::is_empty")]
    pub azure_telemetry_pid: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub kubernetes_image_base: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub tiller_image_base: String,

    #[serde(rename = "aciConnectorImageBase", skip_serializing_if = "String::is_empty")]
    pub aci_connector_image_base: String,

    #[serde(rename = "mcrKubernetesImageBase", skip_serializing_if = "String::is_empty")]
    pub mcr_kubernetes_image_base: String,

    #[serde(rename = "nvidiaImageBase", skip_serializing_if = "String::is_empty")]
    pub nvidia_image_base: String,

    #[serde(rename = "azureCNIImageBase", skip_serializing_if = "String::is_empty")]
    pub azure_cni_image_base: String,

    #[serde(rename = "CalicoImageBase", skip_serializing_if = "String::is_empty")]
    pub calico_image_base: String,

    #[serde(rename = "etcdDownloadURLBase", skip_serializing_if = "String::is_empty")]
    pub etcd_download_url_base: String,

    #[serde(rename = "kubeBinariesSASURLBase", skip_serializing_if = "String::is_empty")]
    pub kube_binaries_sas_url_base: String,

    #[serde(rename = "windowsTelemetryGUID", skip_serializing_if = "String::is_empty")]
    pub windows_telemetry_guid: String,

    #[serde(rename = "cniPluginsDownloadURL", skip_serializing_if = "String::is_empty")]
    pub cni_plugins_download_url: String,

    #[serde(
        rename = "vnetCNILinuxPluginsDownloadURL",
        skip_serializing_if = "String::is_empty"
    )]
    pub vnet_cni_linux_plugins_download_url: String,

    #[serde(
        rename = "vnetCNIWindowsPluginsDownloadURL",
        skip_serializing_if = "String::is_empty"
    )]
    pub vnet_cni_windows_plugins_download_url: String,

    #[serde(rename = "containerdDownloadURLBase", skip_serializing_if = "String::is_empty")]
    pub containerd_download_url_base: String,

    #[serde(rename = "csiProxyDownloadURL", skip_serializing_if = "String::is_empty")]
    pub csi_proxy_download_url: String,
}

impl KubernetesSpecConfig {
    /// Image bases shared by every cloud without a local mirror.
    pub fn public() -> Self {
        Self {
            azure_telemetry_pid: String::new(),
            kubernetes_image_base: "k8s.gcr.io/".to_owned(),
            tiller_image_base: "gcr.io/kubernetes-helm/".to_owned(),
            aci_connector_image_base: "microsoft/".to_owned(),
            mcr_kubernetes_image_base: "mcr.microsoft.com/k8s/core/".to_owned(),
            nvidia_image_base: "nvidia/".to_owned(),
            azure_cni_image_base: "mcr.microsoft.com/containernetworking/".to_owned(),
            calico_image_base: "calico/".to_owned(),
            etcd_download_url_base: "https://acs-mirror.azureedge.net/github-coreos".to_owned(),
            kube_binaries_sas_url_base: "https://acs-mirror.azureedge.net/wink8s/".to_owned(),
            windows_telemetry_guid: "fb801154-36b9-41bc-89c2-f4d4f05472b0".to_owned(),
            cni_plugins_download_url: format!(
                "https://acs-mirror.azureedge.net/cni/cni-plugins-amd64-{CNI_PLUGIN_VERSION}.tgz"
            ),
            vnet_cni_linux_plugins_download_url: format!(
                "https://acs-mirror.azureedge.net/cni/azure-vnet-cni-linux-amd64-{AZURE_CNI_PLUGIN_VERSION}.tgz"
            ),
            vnet_cni_windows_plugins_download_url: format!(
                "https://acs-mirror.azureedge.net/cni/azure-vnet-cni-windows-amd64-{AZURE_CNI_PLUGIN_VERSION}.zip"
            ),
            containerd_download_url_base: "https://storage.googleapis.com/cri-containerd-release/"
                .to_owned(),
            csi_proxy_download_url:
                "https://acs-mirror.azureedge.net/csi-proxy/v0.1.0/binaries/csi-proxy.tar.gz"
                    .to_owned(),
        }
    }

    /// The public bases rewritten to the mirrors reachable from Azure China.
    pub fn china() -> Self {
        let public = Self::public();
        Self {
            kubernetes_image_base: "gcr.azk8s.cn/google_containers/".to_owned(),
            tiller_image_base: "gcr.azk8s.cn/kubernetes-helm/".to_owned(),
            aci_connector_image_base: "dockerhub.azk8s.cn/microsoft/".to_owned(),
            nvidia_image_base: "dockerhub.azk8s.cn/nvidia/".to_owned(),
            azure_cni_image_base: "dockerhub.azk8s.cn/containernetworking/".to_owned(),
            calico_image_base: "dockerhub.azk8s.cn/calico/".to_owned(),
            etcd_download_url_base: "https://mirror.azk8s.cn/kubernetes/etcd".to_owned(),
            cni_plugins_download_url: format!(
                "https://mirror.azk8s.cn/kubernetes/containernetworking-plugins/cni-plugins-amd64-{CNI_PLUGIN_VERSION}.tgz"
            ),
            vnet_cni_linux_plugins_download_url: format!(
                "https://mirror.azk8s.cn/kubernetes/azure-container-networking/azure-vnet-cni-linux-amd64-{AZURE_CNI_PLUGIN_VERSION}.tgz"
            ),
            vnet_cni_windows_plugins_download_url: format!(
                "https://mirror.azk8s.cn/kubernetes/azure-container-networking/azure-vnet-cni-windows-amd64-{AZURE_CNI_PLUGIN_VERSION}.zip"
            ),
            containerd_download_url_base: "https://mirror.azk8s.cn/kubernetes/containerd/"
                .to_owned(),
            ..public
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default)]
pub struct EndpointConfig {
    #[serde(
        rename = "resourceManagerVMDNSSuffix",
        skip_serializing_if = "String::is_empty"
    )]
    pub resource_manager_vm_dns_suffix: String,
}

/// Marketplace coordinates of a VM image.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OsImageConfig {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub image_offer: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub image_sku: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub image_publisher: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub image_version: String,
}

impl OsImageConfig {
    fn new(offer: &str, sku: &str, publisher: &str, version: &str) -> Self {
        Self {
            image_offer: offer.to_owned(),
            image_sku: sku.to_owned(),
            image_publisher: publisher.to_owned(),
            image_version: version.to_owned(),
        }
    }

    pub fn ubuntu_1604() -> Self {
        Self::new("UbuntuServer", "16.04-LTS", "Canonical", "latest")
    }

    pub fn ubuntu_1804() -> Self {
        Self::new("UbuntuServer", "18.04-LTS", "Canonical", "latest")
    }

    pub fn rhel() -> Self {
        Self::new("RHEL", "7.3", "RedHat", "latest")
    }

    pub fn coreos() -> Self {
        Self::new("CoreOS", "Stable", "CoreOS", "latest")
    }

    pub fn aks_ubuntu_1604() -> Self {
        Self::new("aks", "aks-ubuntu-1604-201912", "microsoft-aks", "2019.12.11")
    }

    pub fn aks_ubuntu_1804() -> Self {
        Self::new("aks", "aks-ubuntu-1804-201912", "microsoft-aks", "2019.12.11")
    }

    pub fn acc_1604() -> Self {
        Self::new(
            "confidential-compute-preview",
            "16.04-LTS",
            "Canonical",
            "latest",
        )
    }

    pub fn aks_windows_2019() -> Self {
        Self::new(
            "aks-windows",
            "2019-datacenter-core-smalldisk-1912",
            "microsoft-aks",
            "17763.864.191211",
        )
    }

    pub fn windows_server_2019() -> Self {
        Self::new(
            "WindowsServer",
            "2019-Datacenter-Core-with-Containers-smalldisk",
            "MicrosoftWindowsServer",
            "17763.864.1911120152",
        )
    }
}

/// Everything that differs between clouds.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CloudSpec {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cloud_name: String,

    pub kubernetes_spec_config: KubernetesSpecConfig,

    pub endpoint_config: EndpointConfig,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub os_image_config: BTreeMap<Distro, OsImageConfig>,
}

impl CloudSpec {
    fn new(
        cloud_name: CloudName,
        kubernetes_spec_config: KubernetesSpecConfig,
        dns_suffix: &str,
        os_image_config: BTreeMap<Distro, OsImageConfig>,
    ) -> Self {
        Self {
            cloud_name: cloud_name.to_string(),
            kubernetes_spec_config,
            endpoint_config: EndpointConfig {
                resource_manager_vm_dns_suffix: dns_suffix.to_owned(),
            },
            os_image_config,
        }
    }

    pub fn os_image(&self, distro: Distro) -> Option<&OsImageConfig> {
        self.os_image_config.get(&distro)
    }
}

fn os_images(aks_1604: OsImageConfig, aks_1804: OsImageConfig) -> BTreeMap<Distro, OsImageConfig> {
    BTreeMap::from([
        (Distro::Ubuntu, OsImageConfig::ubuntu_1604()),
        (Distro::Ubuntu1804, OsImageConfig::ubuntu_1804()),
        (Distro::Rhel, OsImageConfig::rhel()),
        (Distro::CoreOs, OsImageConfig::coreos()),
        (Distro::AksUbuntu1604, aks_1604.clone()),
        (Distro::Aks1604Deprecated, aks_1604),
        (Distro::AksUbuntu1804, aks_1804.clone()),
        (Distro::Aks1804Deprecated, aks_1804),
    ])
}

/// Read-only lookup table of [`CloudSpec`]s keyed by [`CloudName`].
#[derive(Clone, Debug, PartialEq)]
pub struct CloudRegistry {
    specs: BTreeMap<CloudName, CloudSpec>,
}

static BUILTIN: LazyLock<CloudRegistry> = LazyLock::new(CloudRegistry::default);

impl Default for CloudRegistry {
    fn default() -> Self {
        let mut public_images = os_images(
            OsImageConfig::aks_ubuntu_1604(),
            OsImageConfig::aks_ubuntu_1804(),
        );
        public_images.insert(Distro::Acc1604, OsImageConfig::acc_1604());

        let specs = [
            CloudSpec::new(
                CloudName::AzurePublicCloud,
                KubernetesSpecConfig::public(),
                "cloudapp.azure.com",
                public_images,
            ),
            CloudSpec::new(
                CloudName::AzureChinaCloud,
                KubernetesSpecConfig::china(),
                "cloudapp.chinacloudapi.cn",
                os_images(
                    OsImageConfig::aks_ubuntu_1604(),
                    OsImageConfig::aks_ubuntu_1804(),
                ),
            ),
            // The AKS images are not published to Azure Germany
            CloudSpec::new(
                CloudName::AzureGermanCloud,
                KubernetesSpecConfig::public(),
                "cloudapp.microsoftazure.de",
                os_images(OsImageConfig::ubuntu_1604(), OsImageConfig::ubuntu_1604()),
            ),
            CloudSpec::new(
                CloudName::AzureUSGovernmentCloud,
                KubernetesSpecConfig::public(),
                "cloudapp.usgovcloudapi.net",
                os_images(
                    OsImageConfig::aks_ubuntu_1604(),
                    OsImageConfig::aks_ubuntu_1804(),
                ),
            ),
            CloudSpec::new(
                CloudName::AzureStackCloud,
                KubernetesSpecConfig::public(),
                "",
                os_images(
                    OsImageConfig::aks_ubuntu_1604(),
                    OsImageConfig::aks_ubuntu_1804(),
                ),
            ),
        ];

        Self::new(specs)
    }
}

impl CloudRegistry {
    /// Builds a registry from arbitrary specs. Specs with an unknown cloud
    /// name are ignored.
    pub fn new(specs: impl IntoIterator<Item = CloudSpec>) -> Self {
        let specs = specs
            .into_iter()
            .filter_map(|spec| Some((spec.cloud_name.parse().ok()?, spec)))
            .collect();

        Self { specs }
    }

    /// The process wide registry of the built-in clouds.
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    pub fn lookup(&self, cloud_name: CloudName) -> Option<&CloudSpec> {
        self.specs.get(&cloud_name)
    }
}

/// The subset of an Azure environment description the pipeline reads or
/// carries through.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CloudEnvironment {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(rename = "managementPortalURL", skip_serializing_if = "String::is_empty")]
    pub management_portal_url: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub service_management_endpoint: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub resource_manager_endpoint: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub active_directory_endpoint: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub gallery_endpoint: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub key_vault_endpoint: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub graph_endpoint: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub storage_endpoint_suffix: String,

    #[serde(rename = "keyVaultDNSSuffix", skip_serializing_if = "String::is_empty")]
    pub key_vault_dns_suffix: String,

    #[serde(
        rename = "serviceManagementVMDNSSuffix",
        skip_serializing_if = "String::is_empty"
    )]
    pub service_management_vm_dns_suffix: String,

    #[serde(
        rename = "resourceManagerVMDNSSuffix",
        skip_serializing_if = "String::is_empty"
    )]
    pub resource_manager_vm_dns_suffix: String,

    #[serde(
        rename = "containerRegistryDNSSuffix",
        skip_serializing_if = "String::is_empty"
    )]
    pub container_registry_dns_suffix: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub token_audience: String,
}

fn ensure(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_owned()
    } else {
        value.to_owned()
    }
}

/// Builds the spec of an Azure Stack cloud. The public image bases are used
/// unless `custom` provides its own; a custom OS image table replaces the
/// default one entirely.
pub fn azure_stack_cloud_spec(
    environment: Option<&CloudEnvironment>,
    custom: Option<&CloudSpec>,
) -> CloudSpec {
    let mut spec = CloudSpec::new(
        CloudName::AzureStackCloud,
        KubernetesSpecConfig::public(),
        environment.map_or("", |env| env.resource_manager_vm_dns_suffix.as_str()),
        os_images(
            OsImageConfig::aks_ubuntu_1604(),
            OsImageConfig::aks_ubuntu_1804(),
        ),
    );

    let Some(custom) = custom else {
        return spec;
    };

    spec.cloud_name = ensure(&custom.cloud_name, &spec.cloud_name);

    let (user, base) = (
        &custom.kubernetes_spec_config,
        &mut spec.kubernetes_spec_config,
    );
    base.aci_connector_image_base =
        ensure(&user.aci_connector_image_base, &base.aci_connector_image_base);
    base.azure_cni_image_base = ensure(&user.azure_cni_image_base, &base.azure_cni_image_base);
    base.cni_plugins_download_url =
        ensure(&user.cni_plugins_download_url, &base.cni_plugins_download_url);
    base.containerd_download_url_base = ensure(
        &user.containerd_download_url_base,
        &base.containerd_download_url_base,
    );
    base.etcd_download_url_base =
        ensure(&user.etcd_download_url_base, &base.etcd_download_url_base);
    base.kube_binaries_sas_url_base = ensure(
        &user.kube_binaries_sas_url_base,
        &base.kube_binaries_sas_url_base,
    );
    base.kubernetes_image_base = ensure(&user.kubernetes_image_base, &base.kubernetes_image_base);
    base.mcr_kubernetes_image_base = ensure(
        &user.mcr_kubernetes_image_base,
        &base.mcr_kubernetes_image_base,
    );
    base.nvidia_image_base = ensure(&user.nvidia_image_base, &base.nvidia_image_base);
    base.tiller_image_base = ensure(&user.tiller_image_base, &base.tiller_image_base);
    base.vnet_cni_linux_plugins_download_url = ensure(
        &user.vnet_cni_linux_plugins_download_url,
        &base.vnet_cni_linux_plugins_download_url,
    );
    base.vnet_cni_windows_plugins_download_url = ensure(
        &user.vnet_cni_windows_plugins_download_url,
        &base.vnet_cni_windows_plugins_download_url,
    );
    base.windows_telemetry_guid =
        ensure(&user.windows_telemetry_guid, &base.windows_telemetry_guid);

    spec.endpoint_config.resource_manager_vm_dns_suffix = ensure(
        &custom.endpoint_config.resource_manager_vm_dns_suffix,
        &spec.endpoint_config.resource_manager_vm_dns_suffix,
    );

    if !custom.os_image_config.is_empty() {
        spec.os_image_config = custom.os_image_config.clone();
    }

    spec
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::china_east("chinaeast", CloudName::AzureChinaCloud)]
    #[case::china_north_2("China North 2", CloudName::AzureChinaCloud)]
    #[case::germany("germanycentral", CloudName::AzureGermanCloud)]
    #[case::usgov("usgovvirginia", CloudName::AzureUSGovernmentCloud)]
    #[case::usdod("USDoD East", CloudName::AzureUSGovernmentCloud)]
    #[case::public("westeurope", CloudName::AzurePublicCloud)]
    #[case::empty("", CloudName::AzurePublicCloud)]
    fn cloud_from_location(#[case] location: &str, #[case] expected: CloudName) {
        assert_eq!(CloudName::from_location(location), expected);
    }

    #[rstest]
    #[case::azure_stack("local", "AzureStackCloud", CloudName::AzureStackCloud)]
    #[case::azure_stack_lowercase("local", "azurestackcloud", CloudName::AzureStackCloud)]
    #[case::other_custom_name("chinaeast", "SomeCloud", CloudName::AzureChinaCloud)]
    fn target_env(
        #[case] location: &str,
        #[case] custom_name: &str,
        #[case] expected: CloudName,
    ) {
        assert_eq!(CloudName::target_env(location, custom_name), expected);
    }

    #[test]
    fn builtin_registry_knows_every_cloud() {
        let registry = CloudRegistry::builtin();

        for (name, suffix) in [
            (CloudName::AzurePublicCloud, "cloudapp.azure.com"),
            (CloudName::AzureChinaCloud, "cloudapp.chinacloudapi.cn"),
            (CloudName::AzureGermanCloud, "cloudapp.microsoftazure.de"),
            (CloudName::AzureUSGovernmentCloud, "cloudapp.usgovcloudapi.net"),
            (CloudName::AzureStackCloud, ""),
        ] {
            let spec = registry.lookup(name).expect("builtin cloud must exist");
            assert_eq!(spec.cloud_name, name.to_string());
            assert_eq!(spec.endpoint_config.resource_manager_vm_dns_suffix, suffix);
        }
    }

    #[test]
    fn china_uses_local_mirrors() {
        let registry = CloudRegistry::builtin();
        let china = registry.lookup(CloudName::AzureChinaCloud).unwrap();

        assert_eq!(
            china.kubernetes_spec_config.kubernetes_image_base,
            "gcr.azk8s.cn/google_containers/"
        );
        assert_eq!(
            china.kubernetes_spec_config.mcr_kubernetes_image_base,
            "mcr.microsoft.com/k8s/core/"
        );
        assert!(china.os_image(Distro::Acc1604).is_none());
    }

    #[test]
    fn germany_has_no_aks_images() {
        let registry = CloudRegistry::builtin();
        let germany = registry.lookup(CloudName::AzureGermanCloud).unwrap();

        assert_eq!(
            germany.os_image(Distro::AksUbuntu1804),
            Some(&OsImageConfig::ubuntu_1604())
        );
    }

    #[test]
    fn registry_ignores_unknown_cloud_names() {
        let registry = CloudRegistry::new([CloudSpec {
            cloud_name: "NotACloud".to_owned(),
            ..Default::default()
        }]);

        assert!(registry.lookup(CloudName::AzurePublicCloud).is_none());
    }

    #[test]
    fn azure_stack_spec_without_custom_config() {
        let environment = CloudEnvironment {
            name: "AzureStackCloud".to_owned(),
            resource_manager_vm_dns_suffix: "cloudapp.local.azurestack.external".to_owned(),
            ..Default::default()
        };

        let spec = azure_stack_cloud_spec(Some(&environment), None);

        assert_eq!(spec.cloud_name, "AzureStackCloud");
        assert_eq!(
            spec.endpoint_config.resource_manager_vm_dns_suffix,
            "cloudapp.local.azurestack.external"
        );
        assert_eq!(spec.kubernetes_spec_config, KubernetesSpecConfig::public());
    }

    #[test]
    fn azure_stack_spec_with_custom_config() {
        let custom = CloudSpec {
            kubernetes_spec_config: KubernetesSpecConfig {
                kubernetes_image_base: "registry.local/".to_owned(),
                ..Default::default()
            },
            endpoint_config: EndpointConfig {
                resource_manager_vm_dns_suffix: "custom.suffix".to_owned(),
            },
            os_image_config: BTreeMap::from([(Distro::Ubuntu, OsImageConfig::ubuntu_1804())]),
            ..Default::default()
        };

        let spec = azure_stack_cloud_spec(None, Some(&custom));

        assert_eq!(spec.cloud_name, "AzureStackCloud");
        assert_eq!(
            spec.kubernetes_spec_config.kubernetes_image_base,
            "registry.local/"
        );
        assert_eq!(
            spec.kubernetes_spec_config.azure_cni_image_base,
            "mcr.microsoft.com/containernetworking/"
        );
        assert_eq!(spec.endpoint_config.resource_manager_vm_dns_suffix, "custom.suffix");
        assert_eq!(spec.os_image_config.len(), 1);
    }

    #[test]
    fn cloud_spec_wire_keys() {
        let spec = CloudRegistry::builtin()
            .lookup(CloudName::AzurePublicCloud)
            .unwrap();
        let value = serde_json::to_value(spec).unwrap();

        assert_eq!(value["cloudName"], "AzurePublicCloud");
        assert_eq!(
            value["kubernetesSpecConfig"]["mcrKubernetesImageBase"],
            "mcr.microsoft.com/k8s/core/"
        );
        assert_eq!(
            value["endpointConfig"]["resourceManagerVMDNSSuffix"],
            "cloudapp.azure.com"
        );
        assert_eq!(value["osImageConfig"]["aks-ubuntu-18.04"]["imageOffer"], "aks");
    }
}
