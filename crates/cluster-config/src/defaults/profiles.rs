//! Defaults of the master, agent pool, storage, Windows and bookkeeping
//! profiles.
use cluster_version::is_version_ge;
use tracing::debug;

use crate::{
    api::{
        Distro, OrchestratorType, OsType, Properties, TelemetryProfile,
        consts::{
            AVAILABILITY_SET, AZURE_AD_IDENTITY_SYSTEM, CLIENT_SECRET_AUTH_METHOD,
            DEFAULT_ACCELERATED_NETWORKING, DEFAULT_ACCELERATED_NETWORKING_WINDOWS,
            DEFAULT_AUDIT_D_ENABLED, DEFAULT_AZURE_STACK_ACCELERATED_NETWORKING,
            DEFAULT_AZURE_STACK_AVAILABILITY_PROFILE, DEFAULT_DCOS_FIRST_CONSECUTIVE_STATIC_IP,
            DEFAULT_DCOS_MASTER_SUBNET, DEFAULT_ENABLE_VMSS_NODE_PUBLIC_IP,
            DEFAULT_EXTENSIONS_ROOT_URL, DEFAULT_FAULT_DOMAIN_COUNT_AZURE_STACK,
            DEFAULT_FIRST_CONSECUTIVE_STATIC_IP, DEFAULT_MASTER_SUBNET,
            DEFAULT_PLATFORM_UPDATE_DOMAIN_COUNT, DEFAULT_PRESERVE_NODES_PROPERTIES,
            DEFAULT_SINGLE_PLACEMENT_GROUP, DEFAULT_SWARM_WINDOWS_FIRST_CONSECUTIVE_STATIC_IP,
            DEFAULT_SWARM_WINDOWS_MASTER_SUBNET, DEFAULT_USE_COSMOS,
            DEFAULT_VMSS_OVER_PROVISIONING_ENABLED, DEFAULT_WINDOWS_SSH_ENABLED,
            LATEST_IMAGE_VERSION, MANAGED_DISKS, READ_ONLY, READ_WRITE,
            SCALE_SET_EVICTION_POLICY_DELETE, SCALE_SET_PRIORITY_LOW, SCALE_SET_PRIORITY_SPOT,
            STORAGE_ACCOUNT, VIRTUAL_MACHINE_SCALE_SETS,
        },
    },
    cloud::{CloudSpec, OsImageConfig, azure_stack_cloud_spec},
    defaults::DefaultsParams,
};

/// Spot pools without a price cap pay at most the on-demand price.
const SPOT_MAX_PRICE_ON_DEMAND: f64 = -1.0;

const CSI_PROXY_MIN_VERSION: &str = "1.18.0";

/// VM sizes supporting accelerated networking, without the `_Promo` suffix.
const ACCELERATED_NETWORKING_SKUS: &[&str] = &[
    "Standard_B12ms", "Standard_B16ms", "Standard_B20ms", "Standard_D11_v2", "Standard_D12_v2",
    "Standard_D13_v2", "Standard_D14_v2", "Standard_D15_v2", "Standard_D16_v3", "Standard_D16a_v4",
    "Standard_D16as_v4", "Standard_D16s_v3", "Standard_D2_v2", "Standard_D32_v3", "Standard_D32a_v4",
    "Standard_D32as_v4", "Standard_D32s_v3", "Standard_D3_v2", "Standard_D48_v3", "Standard_D48s_v3",
    "Standard_D4_v2", "Standard_D4_v3", "Standard_D4a_v4", "Standard_D4as_v4", "Standard_D4s_v3",
    "Standard_D5_v2", "Standard_D64_v3", "Standard_D64s_v3", "Standard_D8_v3", "Standard_D8a_v4",
    "Standard_D8as_v4", "Standard_D8s_v3", "Standard_DS11-1_v2", "Standard_DS11_v2",
    "Standard_DS12-1_v2", "Standard_DS12-2_v2", "Standard_DS12_v2", "Standard_DS13-2_v2",
    "Standard_DS13-4_v2", "Standard_DS13_v2", "Standard_DS14-4_v2", "Standard_DS14-8_v2",
    "Standard_DS14_v2", "Standard_DS15_v2", "Standard_DS2_v2", "Standard_DS3_v2", "Standard_DS4_v2",
    "Standard_DS5_v2", "Standard_E16-4s_v3", "Standard_E16-8s_v3", "Standard_E16_v3",
    "Standard_E16a_v4", "Standard_E16as_v4", "Standard_E16s_v3", "Standard_E20_v3",
    "Standard_E20a_v4", "Standard_E20as_v4", "Standard_E20s_v3", "Standard_E32-16s_v3",
    "Standard_E32-8s_v3", "Standard_E32_v3", "Standard_E32a_v4", "Standard_E32as_v4",
    "Standard_E32s_v3", "Standard_E4-2s_v3", "Standard_E48_v3", "Standard_E48as_v4",
    "Standard_E48s_v3", "Standard_E4_v3", "Standard_E4a_v4", "Standard_E4as_v4", "Standard_E4s_v3",
    "Standard_E64-16s_v3", "Standard_E64-32s_v3", "Standard_E64_v3", "Standard_E64as_v4",
    "Standard_E64i_v3", "Standard_E64is_v3", "Standard_E64s_v3", "Standard_E8-2s_v3",
    "Standard_E8-4s_v3", "Standard_E8_v3", "Standard_E8a_v4", "Standard_E8as_v4", "Standard_E8s_v3",
    "Standard_E96as_v4", "Standard_F16", "Standard_F16s", "Standard_F16s_v2", "Standard_F2",
    "Standard_F2s", "Standard_F32s_v2", "Standard_F4", "Standard_F48s_v2", "Standard_F4s",
    "Standard_F4s_v2", "Standard_F64s_v2", "Standard_F72s_v2", "Standard_F8", "Standard_F8s",
    "Standard_F8s_v2", "Standard_L16s_v2", "Standard_L32s_v2", "Standard_L48s_v2",
    "Standard_L64s_v2", "Standard_L80s_v2", "Standard_L8s_v2", "Standard_M128",
    "Standard_M128-32ms", "Standard_M128-64ms", "Standard_M128m", "Standard_M128ms",
    "Standard_M128s", "Standard_M16-4ms", "Standard_M16-8ms", "Standard_M16ms",
    "Standard_M208ms_v2", "Standard_M208s_v2", "Standard_M32-16ms", "Standard_M32-8ms",
    "Standard_M32ls", "Standard_M32ms", "Standard_M32ts", "Standard_M416ms_v2",
    "Standard_M416s_v2", "Standard_M64", "Standard_M64-16ms", "Standard_M64-32ms",
    "Standard_M64ls", "Standard_M64m", "Standard_M64ms", "Standard_M64s", "Standard_M8-2ms",
    "Standard_M8-4ms", "Standard_M8ms",
    // Grandfathered
    "AZAP_Performance_ComputeV17C", "SQLGL", "SQLGLCore", "Standard_D12_v2_ABC",
    "Standard_D13_v2_ABC", "Standard_D14_v2_ABC", "Standard_D15_v2_ABC", "Standard_D32-16s_v3",
    "Standard_D32-8s_v3", "Standard_D3_v2_ABC", "Standard_D40_v3", "Standard_D40s_v3",
    "Standard_D4_v2_ABC", "Standard_D5_v2_ABC", "Standard_D64-16s_v3", "Standard_D64-32s_v3",
    "Standard_E32-16_v3", "Standard_F16_ABC", "Standard_F4_ABC", "Standard_F8_ABC",
    "Standard_L96s_v2",
];

/// Whether VMs of size `sku` support accelerated networking.
pub fn accelerated_networking_supported(sku: &str) -> bool {
    let sku = sku.strip_suffix("_Promo").unwrap_or(sku);
    ACCELERATED_NETWORKING_SKUS.contains(&sku)
}

fn ensure(value: &mut String, default: &str) {
    if value.is_empty() {
        default.clone_into(value);
    }
}

impl Properties {
    /// Stores the effective Azure Stack cloud spec in the custom cloud
    /// profile, so later stages and serialization see the same values.
    pub(super) fn set_custom_cloud_profile_defaults(&mut self) {
        if !self.is_azure_stack_cloud() {
            return;
        }
        let Some(profile) = self.custom_cloud_profile.as_mut() else {
            return;
        };

        let spec = azure_stack_cloud_spec(
            profile.environment.as_ref(),
            profile.azure_environment_spec_config.as_ref(),
        );
        debug!(cloud_name = %spec.cloud_name, "using the Azure Stack cloud spec");
        profile.azure_environment_spec_config = Some(spec);

        ensure(&mut profile.authentication_method, CLIENT_SECRET_AUTH_METHOD);
        ensure(&mut profile.identity_system, AZURE_AD_IDENTITY_SYSTEM);
    }

    pub(super) fn set_master_profile_defaults(&mut self, params: DefaultsParams) {
        let is_azure_stack = self.is_azure_stack_cloud();
        let has_windows = self.has_windows();
        let orchestrator_type = self
            .orchestrator_profile
            .as_ref()
            .map(|o| o.orchestrator_type);
        let Some(master) = self.master_profile.as_mut() else {
            return;
        };

        if master.availability_profile.is_empty() {
            master.availability_profile = if is_azure_stack {
                DEFAULT_AZURE_STACK_AVAILABILITY_PROFILE
            } else {
                AVAILABILITY_SET
            }
            .to_owned();
        }

        if master.is_virtual_machine_scale_sets() && master.single_placement_group.is_none() {
            master.single_placement_group = Some(DEFAULT_SINGLE_PLACEMENT_GROUP);
        }

        if master.is_custom_vnet()
            && master.is_virtual_machine_scale_sets()
            && orchestrator_type == Some(OrchestratorType::Kubernetes)
        {
            master.first_consecutive_static_ip =
                master.first_consecutive_static_ip(&master.vnet_cidr);
        }

        if let Some(orchestrator_type) = orchestrator_type
            && orchestrator_type != OrchestratorType::Kubernetes
        {
            master.distro = Some(Distro::Ubuntu);
            if !master.is_custom_vnet() {
                let (subnet, static_ip) = if orchestrator_type == OrchestratorType::Dcos {
                    (DEFAULT_DCOS_MASTER_SUBNET, DEFAULT_DCOS_FIRST_CONSECUTIVE_STATIC_IP)
                } else if has_windows {
                    (
                        DEFAULT_SWARM_WINDOWS_MASTER_SUBNET,
                        DEFAULT_SWARM_WINDOWS_FIRST_CONSECUTIVE_STATIC_IP,
                    )
                } else {
                    (DEFAULT_MASTER_SUBNET, DEFAULT_FIRST_CONSECUTIVE_STATIC_IP)
                };

                subnet.clone_into(&mut master.subnet);
                if !params.is_upgrade || master.first_consecutive_static_ip.is_empty() {
                    static_ip.clone_into(&mut master.first_consecutive_static_ip);
                }
            }
        }

        ensure(&mut master.http_source_address_prefix, "*");
        master.cosmos_etcd.get_or_insert(DEFAULT_USE_COSMOS);
        if is_azure_stack {
            master
                .platform_fault_domain_count
                .get_or_insert(DEFAULT_FAULT_DOMAIN_COUNT_AZURE_STACK);
        }
        master
            .platform_update_domain_count
            .get_or_insert(DEFAULT_PLATFORM_UPDATE_DOMAIN_COUNT);
        ensure(&mut master.os_disk_caching_type, READ_WRITE);
    }

    pub(super) fn set_agent_profile_defaults(&mut self, params: DefaultsParams) {
        let is_azure_stack = self.is_azure_stack_cloud();
        let is_kubernetes = self.is_kubernetes();
        let is_update = params.is_update();

        for pool in &mut self.agent_pool_profiles {
            ensure(&mut pool.availability_profile, VIRTUAL_MACHINE_SCALE_SETS);

            if pool.is_virtual_machine_scale_sets() {
                let evictable = pool.scale_set_priority == SCALE_SET_PRIORITY_LOW
                    || pool.scale_set_priority == SCALE_SET_PRIORITY_SPOT;
                if evictable {
                    ensure(
                        &mut pool.scale_set_eviction_policy,
                        SCALE_SET_EVICTION_POLICY_DELETE,
                    );
                }

                if pool.scale_set_priority == SCALE_SET_PRIORITY_SPOT {
                    pool.spot_max_price.get_or_insert(SPOT_MAX_PRICE_ON_DEMAND);
                }

                pool.vmss_over_provisioning_enabled
                    .get_or_insert(DEFAULT_VMSS_OVER_PROVISIONING_ENABLED && !is_update);
            }

            pool.os_type.get_or_insert(OsType::Linux);

            if is_azure_stack {
                pool.platform_fault_domain_count
                    .get_or_insert(DEFAULT_FAULT_DOMAIN_COUNT_AZURE_STACK);
            }
            pool.platform_update_domain_count
                .get_or_insert(DEFAULT_PLATFORM_UPDATE_DOMAIN_COUNT);

            let sku_supported = accelerated_networking_supported(&pool.vm_size);
            let (linux, windows) = if is_azure_stack {
                (
                    DEFAULT_AZURE_STACK_ACCELERATED_NETWORKING,
                    DEFAULT_AZURE_STACK_ACCELERATED_NETWORKING,
                )
            } else {
                (
                    DEFAULT_ACCELERATED_NETWORKING && !is_update && sku_supported,
                    DEFAULT_ACCELERATED_NETWORKING_WINDOWS && !is_update && sku_supported,
                )
            };
            pool.accelerated_networking_enabled.get_or_insert(linux);
            pool.accelerated_networking_enabled_windows
                .get_or_insert(windows);

            pool.audit_d_enabled
                .get_or_insert(DEFAULT_AUDIT_D_ENABLED && !is_update);
            pool.preserve_nodes_properties
                .get_or_insert(DEFAULT_PRESERVE_NODES_PROPERTIES);
            pool.enable_vmss_node_public_ip
                .get_or_insert(DEFAULT_ENABLE_VMSS_NODE_PUBLIC_IP);

            if !is_kubernetes {
                pool.distro = Some(Distro::Ubuntu);
            }

            if pool.os_disk_caching_type.is_empty() {
                pool.os_disk_caching_type = if pool.is_ephemeral() {
                    READ_ONLY
                } else {
                    READ_WRITE
                }
                .to_owned();
            }
            ensure(&mut pool.data_disk_caching_type, READ_ONLY);
        }
    }

    pub(super) fn set_storage_defaults(&mut self) {
        let storage_profile = if self.is_kubernetes() {
            MANAGED_DISKS
        } else {
            STORAGE_ACCOUNT
        };

        if let Some(master) = self.master_profile.as_mut() {
            ensure(&mut master.storage_profile, storage_profile);
        }
        for pool in &mut self.agent_pool_profiles {
            ensure(&mut pool.storage_profile, storage_profile);
        }
    }

    pub(super) fn set_extension_defaults(&mut self) {
        for extension in &mut self.extension_profiles {
            ensure(&mut extension.root_url, DEFAULT_EXTENSIONS_ROOT_URL);
        }
    }

    /// Picks the marketplace image of Windows nodes. Known images get their
    /// pinned version, anything else tracks the latest version. Upgrades
    /// only complete images that are already selected.
    pub(super) fn set_windows_profile_defaults(&mut self, params: DefaultsParams) {
        let Some(windows) = self.windows_profile.as_mut() else {
            return;
        };
        let aks = OsImageConfig::aks_windows_2019();
        let server = OsImageConfig::windows_server_2019();
        let is_image = |image: &OsImageConfig, publisher: &str, offer: &str| {
            publisher == image.image_publisher && offer == image.image_offer
        };

        if !params.is_update() {
            windows.ssh_enabled.get_or_insert(DEFAULT_WINDOWS_SSH_ENABLED);

            let known = [&aks, &server].into_iter().find(|image| {
                is_image(image, &windows.windows_publisher, &windows.windows_offer)
            });
            let image = match known {
                Some(image) => image,
                None => {
                    ensure(&mut windows.windows_publisher, &aks.image_publisher);
                    ensure(&mut windows.windows_offer, &aks.image_offer);
                    &aks
                }
            };

            ensure(&mut windows.windows_sku, &image.image_sku);
            if windows.image_version.is_empty() {
                let pinned = is_image(image, &windows.windows_publisher, &windows.windows_offer)
                    && windows.windows_sku == image.image_sku;
                windows.image_version = if pinned {
                    image.image_version.clone()
                } else {
                    LATEST_IMAGE_VERSION.to_owned()
                };
            }
        } else if params.is_upgrade
            && let Some(image) = [&aks, &server].into_iter().find(|image| {
                is_image(image, &windows.windows_publisher, &windows.windows_offer)
            })
        {
            ensure(&mut windows.image_version, &image.image_version);
            ensure(&mut windows.windows_sku, &image.image_sku);
        }
    }

    /// Enables the CSI proxy when asked for, when a download URL is given,
    /// or by default for clusters running the external cloud provider.
    pub(super) fn set_csi_proxy_defaults(&mut self, cloud_spec: &CloudSpec) {
        let uses_ccm = self
            .kubernetes_config()
            .is_some_and(|k| k.uses_cloud_controller_manager());
        let version = self.orchestrator_version().to_owned();
        let Some(windows) = self.windows_profile.as_mut() else {
            return;
        };

        let enable = (windows.enable_csi_proxy.is_none()
            && uses_ccm
            && is_version_ge(&version, CSI_PROXY_MIN_VERSION))
            || windows.enable_csi_proxy == Some(true)
            || !windows.csi_proxy_url.is_empty();

        if enable {
            windows.enable_csi_proxy = Some(true);
            ensure(
                &mut windows.csi_proxy_url,
                &cloud_spec.kubernetes_spec_config.csi_proxy_download_url,
            );
        }
    }

    pub(super) fn set_telemetry_profile_defaults(&mut self) {
        self.telemetry_profile
            .get_or_insert_with(TelemetryProfile::default);
    }
}
