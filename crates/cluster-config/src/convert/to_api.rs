use cluster_version::rationalize_release_and_version;
use snafu::{OptionExt, ResultExt};
use tracing::debug;

use crate::{
    api::{
        self,
        consts::{
            FLANNEL_ADDON_NAME, MANAGED_DISKS, NETWORK_PLUGIN_AZURE, NETWORK_PLUGIN_FLANNEL,
            NETWORK_PLUGIN_KUBENET, NETWORK_POLICY_AZURE, NETWORK_POLICY_CALICO,
            NETWORK_POLICY_NONE, OIDC_AUTHENTICATOR,
        },
    },
    convert::{
        InvalidOrchestratorProfileSnafu, Result, UnknownOrchestratorTypeSnafu,
        UnresolvableVersionSnafu,
    },
    vlabs,
};

/// Lower case without any whitespace, `West US 2` becomes `westus2`.
pub(super) fn normalize_location(location: &str) -> String {
    location
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

pub(super) fn container_service(
    container_service: vlabs::ContainerService,
    is_update: bool,
) -> Result<api::ContainerService> {
    let vlabs::ContainerService {
        id,
        location,
        name,
        plan,
        tags,
        resource_type,
        properties,
    } = container_service;

    Ok(api::ContainerService {
        id,
        location: normalize_location(&location),
        name,
        plan: plan.map(Into::into),
        tags,
        resource_type,
        properties: match properties {
            Some(properties) => self::properties(properties, is_update)?,
            None => api::Properties::default(),
        },
    })
}

fn properties(properties: vlabs::Properties, is_update: bool) -> Result<api::Properties> {
    let orchestrator_profile = properties
        .orchestrator_profile
        .as_ref()
        .map(|_| orchestrator_profile(&properties, is_update))
        .transpose()?;
    let is_kubernetes = orchestrator_profile
        .as_ref()
        .is_some_and(api::OrchestratorProfile::is_kubernetes);

    let vlabs::Properties {
        provisioning_state,
        orchestrator_profile: _,
        master_profile,
        agent_pool_profiles,
        linux_profile,
        extension_profiles,
        windows_profile,
        service_principal_profile,
        certificate_profile,
        aad_profile,
        feature_flags,
        custom_cloud_profile,
        telemetry_profile,
    } = properties;

    let agent_pool_profiles = agent_pool_profiles
        .into_iter()
        .map(|pool| {
            let mut pool = api::AgentPoolProfile::from(pool);
            // Kubernetes pools are left to the defaults engine.
            if !is_kubernetes && pool.storage_profile.is_empty() {
                pool.storage_profile = MANAGED_DISKS.to_owned();
            }
            pool
        })
        .collect();

    Ok(api::Properties {
        provisioning_state,
        orchestrator_profile,
        master_profile: master_profile.map(Into::into),
        agent_pool_profiles,
        linux_profile: linux_profile.map(Into::into),
        windows_profile: windows_profile.map(Into::into),
        extension_profiles: extension_profiles.into_iter().map(Into::into).collect(),
        service_principal_profile: service_principal_profile.map(Into::into),
        certificate_profile: certificate_profile.map(Into::into),
        aad_profile: aad_profile.map(Into::into),
        feature_flags: feature_flags.map(Into::into),
        custom_cloud_profile: custom_cloud_profile.map(Into::into),
        telemetry_profile: telemetry_profile.map(Into::into),
    })
}

fn orchestrator_profile(
    properties: &vlabs::Properties,
    is_update: bool,
) -> Result<api::OrchestratorProfile> {
    let profile = properties.orchestrator_profile.clone().unwrap_or_default();

    if !is_update {
        properties
            .validate_orchestrator_profile(is_update)
            .context(InvalidOrchestratorProfileSnafu)?;
    }

    let orchestrator_type = profile
        .orchestrator_type
        .parse::<api::OrchestratorType>()
        .ok()
        .context(UnknownOrchestratorTypeSnafu {
            orchestrator_type: &profile.orchestrator_type,
        })?;

    let orchestrator_version = match orchestrator_type {
        api::OrchestratorType::Kubernetes => rationalize_release_and_version(
            &profile.orchestrator_release,
            &profile.orchestrator_version,
            is_update,
            properties.platform(),
        )
        .context(UnresolvableVersionSnafu {
            release: &profile.orchestrator_release,
            version: &profile.orchestrator_version,
        })?,
        // Only Kubernetes versions are tracked, everything else is taken as is.
        _ if profile.orchestrator_version.is_empty() => profile.orchestrator_release.clone(),
        _ => profile.orchestrator_version.clone(),
    };
    debug!(%orchestrator_type, %orchestrator_version, "resolved orchestrator version");

    let (kubernetes_config, dcos_config) = match orchestrator_type {
        api::OrchestratorType::Kubernetes => (
            Some(kubernetes_network(properties, profile.kubernetes_config)),
            None,
        ),
        api::OrchestratorType::Dcos => (None, profile.dcos_config.map(Into::into)),
        _ => (None, None),
    };

    Ok(api::OrchestratorProfile {
        orchestrator_type,
        orchestrator_version,
        kubernetes_config,
        dcos_config,
    })
}

/// Rewrites the deprecated ways of selecting a network plugin through the
/// network policy, then picks the default plugin.
fn kubernetes_network(
    properties: &vlabs::Properties,
    kubernetes_config: Option<vlabs::KubernetesConfig>,
) -> api::KubernetesConfig {
    let flannel_enabled = kubernetes_config
        .as_ref()
        .is_some_and(|config| config.is_addon_enabled(FLANNEL_ADDON_NAME));
    let mut config = kubernetes_config.map(api::KubernetesConfig::from).unwrap_or_default();

    if config.network_plugin.is_empty() && config.network_policy == NETWORK_POLICY_AZURE {
        config.network_plugin = NETWORK_PLUGIN_AZURE.to_owned();
        config.network_policy.clear();
    } else if config.network_policy == NETWORK_POLICY_NONE {
        config.network_plugin = NETWORK_PLUGIN_KUBENET.to_owned();
        config.network_policy.clear();
    }

    if config.network_plugin.is_empty()
        && (config.network_policy.is_empty() || config.network_policy == NETWORK_POLICY_CALICO)
    {
        config.network_plugin = if !properties.has_windows() && flannel_enabled {
            NETWORK_PLUGIN_FLANNEL
        } else {
            NETWORK_PLUGIN_AZURE
        }
        .to_owned();
    }

    config
}

impl From<vlabs::ResourcePurchasePlan> for api::ResourcePurchasePlan {
    fn from(plan: vlabs::ResourcePurchasePlan) -> Self {
        Self {
            name: plan.name,
            product: plan.product,
            promotion_code: plan.promotion_code,
            publisher: plan.publisher,
        }
    }
}

impl From<vlabs::FeatureFlags> for api::FeatureFlags {
    fn from(flags: vlabs::FeatureFlags) -> Self {
        Self {
            enable_cse_run_in_background: flags.enable_cse_run_in_background,
            block_outbound_internet: flags.block_outbound_internet,
            enable_ipv6_dual_stack: flags.enable_ipv6_dual_stack,
            enable_telemetry: flags.enable_telemetry,
            enable_ipv6_only: flags.enable_ipv6_only,
        }
    }
}

impl From<vlabs::KeyvaultSecretRef> for api::KeyvaultSecretRef {
    fn from(secret_ref: vlabs::KeyvaultSecretRef) -> Self {
        Self {
            vault_id: secret_ref.vault_id,
            secret_name: secret_ref.secret_name,
            secret_version: secret_ref.secret_version,
        }
    }
}

impl From<vlabs::ServicePrincipalProfile> for api::ServicePrincipalProfile {
    fn from(profile: vlabs::ServicePrincipalProfile) -> Self {
        Self {
            client_id: profile.client_id,
            secret: profile.secret,
            object_id: profile.object_id,
            keyvault_secret_ref: profile.keyvault_secret_ref.map(Into::into),
        }
    }
}

impl From<vlabs::CertificateProfile> for api::CertificateProfile {
    fn from(profile: vlabs::CertificateProfile) -> Self {
        Self {
            ca_certificate: profile.ca_certificate,
            ca_private_key: profile.ca_private_key,
            api_server_certificate: profile.api_server_certificate,
            api_server_private_key: profile.api_server_private_key,
            client_certificate: profile.client_certificate,
            client_private_key: profile.client_private_key,
            kube_config_certificate: profile.kube_config_certificate,
            kube_config_private_key: profile.kube_config_private_key,
            etcd_server_certificate: profile.etcd_server_certificate,
            etcd_server_private_key: profile.etcd_server_private_key,
            etcd_client_certificate: profile.etcd_client_certificate,
            etcd_client_private_key: profile.etcd_client_private_key,
            etcd_peer_certificates: profile.etcd_peer_certificates,
            etcd_peer_private_keys: profile.etcd_peer_private_keys,
        }
    }
}

impl From<vlabs::KeyVaultSecrets> for api::KeyVaultSecrets {
    fn from(secrets: vlabs::KeyVaultSecrets) -> Self {
        Self {
            source_vault_id: secrets.source_vault.map(|vault| vault.id),
            vault_certificates: secrets
                .vault_certificates
                .into_iter()
                .map(|certificate| api::KeyVaultCertificate {
                    certificate_url: certificate.certificate_url,
                    certificate_store: certificate.certificate_store,
                })
                .collect(),
        }
    }
}

impl From<vlabs::LinuxProfile> for api::LinuxProfile {
    fn from(profile: vlabs::LinuxProfile) -> Self {
        Self {
            admin_username: profile.admin_username,
            ssh_public_keys: profile
                .ssh
                .public_keys
                .into_iter()
                .map(|key| key.key_data)
                .collect(),
            secrets: profile.secrets.into_iter().map(Into::into).collect(),
            script_root_url: profile.script_root_url,
            custom_search_domain: profile.custom_search_domain.map(|domain| {
                api::CustomSearchDomain {
                    name: domain.name,
                    realm_user: domain.realm_user,
                    realm_password: domain.realm_password,
                }
            }),
            custom_nodes_dns: profile.custom_nodes_dns.map(|dns| api::CustomNodesDns {
                dns_server: dns.dns_server,
            }),
        }
    }
}

impl From<vlabs::ImageReference> for api::ImageReference {
    fn from(image_ref: vlabs::ImageReference) -> Self {
        Self {
            name: image_ref.name,
            resource_group: image_ref.resource_group,
            subscription_id: image_ref.subscription_id,
            gallery: image_ref.gallery,
            version: image_ref.version,
        }
    }
}

impl From<vlabs::WindowsProfile> for api::WindowsProfile {
    fn from(profile: vlabs::WindowsProfile) -> Self {
        Self {
            admin_username: profile.admin_username,
            admin_password: profile.admin_password,
            csi_proxy_url: profile.csi_proxy_url,
            enable_csi_proxy: profile.enable_csi_proxy,
            image_ref: profile.image_ref.map(Into::into),
            image_version: profile.image_version,
            windows_image_source_url: profile.windows_image_source_url,
            windows_publisher: profile.windows_publisher,
            windows_offer: profile.windows_offer,
            windows_sku: profile.windows_sku,
            windows_docker_version: profile.windows_docker_version,
            secrets: profile.secrets.into_iter().map(Into::into).collect(),
            ssh_enabled: profile.ssh_enabled,
            enable_automatic_updates: profile.enable_automatic_updates,
        }
    }
}

impl From<vlabs::KubernetesContainerSpec> for api::KubernetesContainerSpec {
    fn from(spec: vlabs::KubernetesContainerSpec) -> Self {
        Self {
            name: spec.name,
            image: spec.image,
            cpu_requests: spec.cpu_requests,
            memory_requests: spec.memory_requests,
            cpu_limits: spec.cpu_limits,
            memory_limits: spec.memory_limits,
        }
    }
}

impl From<vlabs::KubernetesAddon> for api::KubernetesAddon {
    fn from(addon: vlabs::KubernetesAddon) -> Self {
        Self {
            name: addon.name,
            enabled: addon.enabled,
            mode: addon.mode,
            containers: addon.containers.into_iter().map(Into::into).collect(),
            config: addon.config,
            pools: addon
                .pools
                .into_iter()
                .map(|pool| api::AddonNodePoolsConfig {
                    name: pool.name,
                    config: pool.config,
                })
                .collect(),
            data: addon.data,
        }
    }
}

impl From<vlabs::KubernetesComponent> for api::KubernetesComponent {
    fn from(component: vlabs::KubernetesComponent) -> Self {
        Self {
            name: component.name,
            enabled: component.enabled,
            containers: component.containers.into_iter().map(Into::into).collect(),
            config: component.config,
            data: component.data,
        }
    }
}

impl From<vlabs::PrivateCluster> for api::PrivateCluster {
    fn from(cluster: vlabs::PrivateCluster) -> Self {
        Self {
            enabled: cluster.enabled,
            jumpbox_profile: cluster
                .jumpbox_profile
                .map(|jumpbox| api::PrivateJumpboxProfile {
                    name: jumpbox.name,
                    vm_size: jumpbox.vm_size,
                    os_disk_size_gb: jumpbox.os_disk_size_gb,
                    username: jumpbox.username,
                    public_key: jumpbox.public_key,
                    storage_profile: jumpbox.storage_profile,
                }),
        }
    }
}

impl From<vlabs::KubernetesConfig> for api::KubernetesConfig {
    fn from(config: vlabs::KubernetesConfig) -> Self {
        Self {
            kubernetes_image_base: config.kubernetes_image_base,
            kubernetes_image_base_type: config.kubernetes_image_base_type,
            mcr_kubernetes_image_base: config.mcr_kubernetes_image_base,
            cluster_subnet: config.cluster_subnet,
            non_masquerade_cidr: String::new(),
            network_policy: config.network_policy,
            network_plugin: config.network_plugin,
            network_mode: config.network_mode,
            container_runtime: config.container_runtime,
            max_pods: config.max_pods,
            docker_bridge_subnet: config.docker_bridge_subnet,
            dns_service_ip: config.dns_service_ip,
            service_cidr: config.service_cidr,
            use_managed_identity: config.use_managed_identity,
            user_assigned_id: config.user_assigned_id,
            user_assigned_client_id: config.user_assigned_client_id,
            custom_hyperkube_image: config.custom_hyperkube_image,
            custom_kube_api_server_image: config.custom_kube_api_server_image,
            custom_kube_controller_manager_image: config.custom_kube_controller_manager_image,
            custom_kube_proxy_image: config.custom_kube_proxy_image,
            custom_kube_scheduler_image: config.custom_kube_scheduler_image,
            custom_kube_binary_url: config.custom_kube_binary_url,
            docker_engine_version: config.docker_engine_version,
            moby_version: config.moby_version,
            containerd_version: config.containerd_version,
            custom_ccm_image: config.custom_ccm_image,
            use_cloud_controller_manager: config.use_cloud_controller_manager,
            custom_windows_package_url: config.custom_windows_package_url,
            windows_node_binaries_url: config.windows_node_binaries_url,
            windows_containerd_url: config.windows_containerd_url,
            windows_sdn_plugin_url: config.windows_sdn_plugin_url,
            use_instance_metadata: config.use_instance_metadata,
            enable_rbac: config.enable_rbac,
            enable_secure_kubelet: config.enable_secure_kubelet,
            enable_aggregated_apis: config.enable_aggregated_apis,
            private_cluster: config.private_cluster.map(Into::into),
            gc_high_threshold: config.gc_high_threshold,
            gc_low_threshold: config.gc_low_threshold,
            etcd_version: config.etcd_version,
            etcd_disk_size_gb: config.etcd_disk_size_gb,
            etcd_encryption_key: config.etcd_encryption_key,
            enable_data_encryption_at_rest: config.enable_data_encryption_at_rest,
            enable_encryption_with_external_kms: config.enable_encryption_with_external_kms,
            enable_pod_security_policy: config.enable_pod_security_policy,
            addons: config.addons.into_iter().map(Into::into).collect(),
            components: config.components.into_iter().map(Into::into).collect(),
            container_runtime_config: config.container_runtime_config,
            kubelet_config: config.kubelet_config,
            controller_manager_config: config.controller_manager_config,
            cloud_controller_manager_config: config.cloud_controller_manager_config,
            apiserver_config: config.apiserver_config,
            scheduler_config: config.scheduler_config,
            pod_security_policy_config: config.pod_security_policy_config,
            kube_reserved_cgroup: config.kube_reserved_cgroup,
            cloud_provider_backoff_mode: config.cloud_provider_backoff_mode,
            cloud_provider_backoff: config.cloud_provider_backoff,
            cloud_provider_backoff_retries: config.cloud_provider_backoff_retries,
            cloud_provider_backoff_jitter: config.cloud_provider_backoff_jitter,
            cloud_provider_backoff_duration: config.cloud_provider_backoff_duration,
            cloud_provider_backoff_exponent: config.cloud_provider_backoff_exponent,
            cloud_provider_rate_limit: config.cloud_provider_rate_limit,
            cloud_provider_rate_limit_qps: config.cloud_provider_rate_limit_qps,
            cloud_provider_rate_limit_qps_write: config.cloud_provider_rate_limit_qps_write,
            cloud_provider_rate_limit_bucket: config.cloud_provider_rate_limit_bucket,
            cloud_provider_rate_limit_bucket_write: config.cloud_provider_rate_limit_bucket_write,
            cloud_provider_disable_outbound_snat: config.cloud_provider_disable_outbound_snat,
            node_status_update_frequency: String::new(),
            hard_eviction_threshold: String::new(),
            ctrl_mgr_node_monitor_grace_period: String::new(),
            ctrl_mgr_pod_eviction_timeout: String::new(),
            ctrl_mgr_route_reconciliation_period: String::new(),
            load_balancer_sku: config.load_balancer_sku,
            exclude_master_from_standard_lb: config.exclude_master_from_standard_lb,
            load_balancer_outbound_ips: config.load_balancer_outbound_ips,
            azure_cni_version: config.azure_cni_version,
            azure_cni_url_linux: config.azure_cni_url_linux,
            azure_cni_url_windows: config.azure_cni_url_windows,
            key_vault_sku: config.key_vault_sku,
            maximum_load_balancer_rule_count: config.maximum_load_balancer_rule_count,
            proxy_mode: config.proxy_mode,
            private_azure_registry_server: config.private_azure_registry_server,
            outbound_rule_idle_timeout_in_minutes: config.outbound_rule_idle_timeout_in_minutes,
            image_repo_overrides: config.image_repo_overrides,
        }
    }
}

impl From<vlabs::DcosConfig> for api::DcosConfig {
    fn from(config: vlabs::DcosConfig) -> Self {
        Self {
            dcos_bootstrap_url: config.dcos_bootstrap_url,
            dcos_windows_bootstrap_url: config.dcos_windows_bootstrap_url,
            registry: config.registry,
            registry_user: config.registry_user,
            registry_pass: config.registry_pass,
            dcos_repository_url: config.dcos_repository_url,
            dcos_cluster_package_list_id: config.dcos_cluster_package_list_id,
            dcos_provider_package_id: config.dcos_provider_package_id,
            bootstrap_profile: config
                .bootstrap_profile
                .map(|bootstrap| api::BootstrapProfile {
                    vm_size: bootstrap.vm_size,
                    os_disk_size_gb: bootstrap.os_disk_size_gb,
                    oauth_enabled: bootstrap.oauth_enabled,
                    static_ip: bootstrap.static_ip,
                    subnet: bootstrap.subnet,
                }),
        }
    }
}

impl From<vlabs::Extension> for api::Extension {
    fn from(extension: vlabs::Extension) -> Self {
        Self {
            name: extension.name,
            single_or_all: extension.single_or_all,
            template: extension.template,
        }
    }
}

impl From<vlabs::ExtensionProfile> for api::ExtensionProfile {
    fn from(profile: vlabs::ExtensionProfile) -> Self {
        Self {
            name: profile.name,
            version: profile.version,
            extension_parameters: profile.extension_parameters,
            extension_parameters_key_vault_ref: profile
                .extension_parameters_key_vault_ref
                .map(Into::into),
            root_url: profile.root_url,
            script: profile.script,
            url_query: profile.url_query,
        }
    }
}

impl From<vlabs::MasterProfile> for api::MasterProfile {
    fn from(profile: vlabs::MasterProfile) -> Self {
        let storage_profile = if profile.storage_profile.is_empty() {
            MANAGED_DISKS.to_owned()
        } else {
            profile.storage_profile
        };

        Self {
            count: profile.count,
            dns_prefix: profile.dns_prefix,
            subject_alt_names: profile.subject_alt_names,
            vm_size: profile.vm_size,
            os_disk_size_gb: profile.os_disk_size_gb,
            vnet_subnet_id: profile.vnet_subnet_id,
            vnet_cidr: profile.vnet_cidr,
            agent_vnet_subnet_id: profile.agent_vnet_subnet_id,
            first_consecutive_static_ip: profile.first_consecutive_static_ip,
            subnet: String::new(),
            subnet_ipv6: String::new(),
            ip_address_count: profile.ip_address_count,
            storage_profile,
            http_source_address_prefix: profile.http_source_address_prefix,
            oauth_enabled: profile.oauth_enabled,
            pre_provision_extension: profile.pre_provision_extension.map(Into::into),
            extensions: profile.extensions.into_iter().map(Into::into).collect(),
            distro: profile.distro,
            kubernetes_config: profile.kubernetes_config.map(Into::into),
            image_ref: profile.image_ref.map(Into::into),
            custom_files: profile
                .custom_files
                .into_iter()
                .map(|file| api::CustomFile {
                    source: file.source,
                    dest: file.dest,
                })
                .collect(),
            availability_profile: profile.availability_profile,
            agent_subnet: profile.agent_subnet,
            availability_zones: profile.availability_zones,
            single_placement_group: profile.single_placement_group,
            platform_fault_domain_count: profile.platform_fault_domain_count,
            platform_update_domain_count: profile.platform_update_domain_count,
            audit_d_enabled: profile.audit_d_enabled,
            custom_vm_tags: profile.custom_vm_tags,
            sysctld_config: profile.sysctld_config,
            ultra_ssd_enabled: profile.ultra_ssd_enabled,
            encryption_at_host: profile.encryption_at_host,
            fqdn: profile.fqdn,
            cosmos_etcd: profile.cosmos_etcd,
            proximity_placement_group_id: profile.proximity_placement_group_id,
            os_disk_caching_type: profile.os_disk_caching_type,
        }
    }
}

impl From<vlabs::AgentPoolProfile> for api::AgentPoolProfile {
    fn from(profile: vlabs::AgentPoolProfile) -> Self {
        Self {
            name: profile.name,
            count: profile.count,
            vm_size: profile.vm_size,
            os_disk_size_gb: profile.os_disk_size_gb,
            dns_prefix: profile.dns_prefix,
            os_type: profile.os_type,
            ports: profile.ports,
            availability_profile: profile.availability_profile,
            scale_set_priority: profile.scale_set_priority,
            scale_set_eviction_policy: profile.scale_set_eviction_policy,
            spot_max_price: profile.spot_max_price,
            storage_profile: profile.storage_profile,
            disk_sizes_gb: profile.disk_sizes_gb,
            vnet_subnet_id: profile.vnet_subnet_id,
            subnet: String::new(),
            ip_address_count: profile.ip_address_count,
            distro: profile.distro,
            kubernetes_config: profile.kubernetes_config.map(Into::into),
            image_ref: profile.image_ref.map(Into::into),
            role: profile.role,
            accelerated_networking_enabled: profile.accelerated_networking_enabled,
            accelerated_networking_enabled_windows: profile.accelerated_networking_enabled_windows,
            vmss_over_provisioning_enabled: profile.vmss_over_provisioning_enabled,
            audit_d_enabled: profile.audit_d_enabled,
            custom_vm_tags: profile.custom_vm_tags,
            disk_encryption_set_id: profile.disk_encryption_set_id,
            ultra_ssd_enabled: profile.ultra_ssd_enabled,
            encryption_at_host: profile.encryption_at_host,
            fqdn: profile.fqdn,
            custom_node_labels: profile.custom_node_labels,
            pre_provision_extension: profile.pre_provision_extension.map(Into::into),
            extensions: profile.extensions.into_iter().map(Into::into).collect(),
            single_placement_group: profile.single_placement_group,
            platform_fault_domain_count: profile.platform_fault_domain_count,
            platform_update_domain_count: profile.platform_update_domain_count,
            availability_zones: profile.availability_zones,
            enable_vmss_node_public_ip: profile.enable_vmss_node_public_ip,
            load_balancer_backend_address_pool_ids: profile.load_balancer_backend_address_pool_ids,
            sysctld_config: profile.sysctld_config,
            proximity_placement_group_id: profile.proximity_placement_group_id,
            os_disk_caching_type: profile.os_disk_caching_type,
            data_disk_caching_type: profile.data_disk_caching_type,
            preserve_nodes_properties: None,
        }
    }
}

impl From<vlabs::AadProfile> for api::AadProfile {
    fn from(profile: vlabs::AadProfile) -> Self {
        Self {
            client_app_id: profile.client_app_id,
            server_app_id: profile.server_app_id,
            tenant_id: profile.tenant_id,
            admin_group_id: profile.admin_group_id,
            authenticator: OIDC_AUTHENTICATOR.to_owned(),
        }
    }
}

impl From<vlabs::CustomCloudProfile> for api::CustomCloudProfile {
    fn from(profile: vlabs::CustomCloudProfile) -> Self {
        Self {
            environment: profile.environment,
            azure_environment_spec_config: profile.azure_environment_spec_config,
            identity_system: profile.identity_system,
            authentication_method: profile.authentication_method,
            dependencies_location: profile.dependencies_location,
            portal_url: profile.portal_url,
            custom_cloud_root_certificates: profile.custom_cloud_root_certificates,
            custom_cloud_sources_list: profile.custom_cloud_sources_list,
        }
    }
}

impl From<vlabs::TelemetryProfile> for api::TelemetryProfile {
    fn from(profile: vlabs::TelemetryProfile) -> Self {
        Self {
            application_insights_key: profile.application_insights_key,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::already_normalized("westus2", "westus2")]
    #[case::display_name("West US 2", "westus2")]
    #[case::mixed("  uksouth\t", "uksouth")]
    #[case::empty("", "")]
    fn location(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_location(input), expected);
    }
}
