//! Cluster wide orchestrator defaults, followed by every stage that depends
//! on them.
use std::net::IpAddr;

use base64::Engine;
use cluster_version::{is_version_ge, valid_patch_version};
use tracing::{debug, warn};

use crate::{
    api::{
        Distro, KubernetesConfig, MasterProfile, OrchestratorType, Properties,
        consts::{
            AZURE_CNI_PLUGIN_VERSION, BASIC_LOAD_BALANCER_SKU, CLOUD_PROVIDER_BACKOFF_MODE_V1,
            CLOUD_PROVIDER_BACKOFF_MODE_V2, CONTAINERD, DEFAULT_AGENT_SUBNET_VMSS,
            DEFAULT_AZURE_STACK_CLOUD_PROVIDER_BACKOFF_DURATION,
            DEFAULT_AZURE_STACK_CLOUD_PROVIDER_BACKOFF_EXPONENT,
            DEFAULT_AZURE_STACK_CLOUD_PROVIDER_BACKOFF_JITTER,
            DEFAULT_AZURE_STACK_CLOUD_PROVIDER_BACKOFF_RETRIES,
            DEFAULT_AZURE_STACK_CLOUD_PROVIDER_RATE_LIMIT_BUCKET,
            DEFAULT_AZURE_STACK_CLOUD_PROVIDER_RATE_LIMIT_BUCKET_WRITE,
            DEFAULT_AZURE_STACK_CLOUD_PROVIDER_RATE_LIMIT_QPS,
            DEFAULT_AZURE_STACK_CLOUD_PROVIDER_RATE_LIMIT_QPS_WRITE,
            DEFAULT_AZURE_STACK_LOAD_BALANCER_SKU, DEFAULT_AZURE_STACK_USE_INSTANCE_METADATA,
            DEFAULT_CONTAINER_RUNTIME, DEFAULT_CONTAINERD_VERSION,
            DEFAULT_DCOS_BOOTSTRAP_MIN_VERSION, DEFAULT_DCOS_BOOTSTRAP_STATIC_IP,
            DEFAULT_DCOS_BOOTSTRAP_VM_SIZE, DEFAULT_DOCKER_BRIDGE_SUBNET,
            DEFAULT_ETCD_DISK_SIZE, DEFAULT_ETCD_DISK_SIZE_GT3_NODES,
            DEFAULT_ETCD_DISK_SIZE_GT10_NODES, DEFAULT_ETCD_DISK_SIZE_GT20_NODES,
            DEFAULT_ETCD_VERSION, DEFAULT_EXCLUDE_MASTER_FROM_STANDARD_LB,
            DEFAULT_FIRST_CONSECUTIVE_KUBERNETES_STATIC_IP,
            DEFAULT_FIRST_CONSECUTIVE_KUBERNETES_STATIC_IP_VMSS, DEFAULT_JUMPBOX_DISK_SIZE,
            DEFAULT_JUMPBOX_USERNAME, DEFAULT_KUBE_PROXY_MODE,
            DEFAULT_KUBERNETES_CLOUD_PROVIDER_BACKOFF_DURATION,
            DEFAULT_KUBERNETES_CLOUD_PROVIDER_BACKOFF_EXPONENT,
            DEFAULT_KUBERNETES_CLOUD_PROVIDER_BACKOFF_JITTER,
            DEFAULT_KUBERNETES_CLOUD_PROVIDER_BACKOFF_RETRIES,
            DEFAULT_KUBERNETES_CLOUD_PROVIDER_RATE_LIMIT,
            DEFAULT_KUBERNETES_CLOUD_PROVIDER_RATE_LIMIT_BUCKET,
            DEFAULT_KUBERNETES_CLOUD_PROVIDER_RATE_LIMIT_BUCKET_WRITE,
            DEFAULT_KUBERNETES_CLOUD_PROVIDER_RATE_LIMIT_QPS,
            DEFAULT_KUBERNETES_CLOUD_PROVIDER_RATE_LIMIT_QPS_WRITE,
            DEFAULT_KUBERNETES_CLUSTER_SUBNET, DEFAULT_KUBERNETES_CLUSTER_SUBNET_IPV6,
            DEFAULT_KUBERNETES_CLUSTER_SUBNET_IPV6_LEGACY, DEFAULT_KUBERNETES_DNS_SERVICE_IP,
            DEFAULT_KUBERNETES_DNS_SERVICE_IP_IPV6, DEFAULT_KUBERNETES_GC_HIGH_THRESHOLD,
            DEFAULT_KUBERNETES_GC_LOW_THRESHOLD, DEFAULT_KUBERNETES_MASTER_SUBNET,
            DEFAULT_KUBERNETES_MASTER_SUBNET_IPV6, DEFAULT_KUBERNETES_SERVICE_CIDR,
            DEFAULT_KUBERNETES_SERVICE_CIDR_IPV6, DEFAULT_KUBERNETES_SUBNET,
            DEFAULT_MOBY_VERSION, DEFAULT_NETWORK_PLUGIN, DEFAULT_OUTBOUND_RULE_IDLE_TIMEOUT_IN_MINUTES,
            DEFAULT_PRIVATE_CLUSTER_ENABLED, DEFAULT_RBAC_ENABLED, DEFAULT_SECURE_KUBELET_ENABLED,
            DEFAULT_SINGLE_PLACEMENT_GROUP, DEFAULT_USE_INSTANCE_METADATA, DOCKER,
            FLANNEL_ADDON_NAME, KUBERNETES_IMAGE_BASE_TYPE_GCR, KUBERNETES_IMAGE_BASE_TYPE_MCR,
            MANAGED_DISKS, MAX_AGENT_COUNT, MAX_AZURE_STACK_MANAGED_DISK_SIZE,
            MAXIMUM_LOAD_BALANCER_RULE_COUNT, MIN_CLOUD_PROVIDER_QPS_TO_BUCKET_FACTOR,
            NETWORK_PLUGIN_AZURE, NETWORK_PLUGIN_FLANNEL, STANDARD_LOAD_BALANCER_SKU,
            VHD_DISK_SIZE_AKS,
        },
    },
    cloud::{CloudName, CloudSpec},
    defaults::DefaultsParams,
};

/// Cluster facts the [`KubernetesConfig`] defaults depend on, collected
/// before the config is borrowed mutably.
#[derive(Clone, Copy, Debug)]
struct ClusterFacts {
    is_azure_stack: bool,
    is_dual_stack: bool,
    is_ipv6_only: bool,
    agent_pool_count: usize,
    total_nodes: i32,
}

impl Properties {
    pub(super) fn set_orchestrator_defaults(&mut self, cloud_spec: &CloudSpec, params: DefaultsParams) {
        let platform = self.platform();
        let Some(orchestrator) = self.orchestrator_profile.as_mut() else {
            return;
        };

        match orchestrator.orchestrator_type {
            OrchestratorType::Kubernetes => {
                match valid_patch_version(
                    &orchestrator.orchestrator_version,
                    params.is_update(),
                    platform,
                ) {
                    Some(version) => orchestrator.orchestrator_version = version,
                    None => warn!(
                        version = %orchestrator.orchestrator_version,
                        "no supported patch version found, keeping the requested version"
                    ),
                }
                orchestrator.kubernetes_config.get_or_insert_default();

                self.set_kubernetes_config_defaults(cloud_spec, params);
                self.set_master_network_defaults(params);
                self.set_master_distro_defaults(cloud_spec, params);
                self.set_agent_pool_orchestrator_defaults(cloud_spec, params);

                self.set_kubelet_defaults(params);
                self.set_ip_address_count_defaults();
                self.set_controller_manager_defaults();
                self.set_cloud_controller_manager_defaults();
                self.set_apiserver_defaults(cloud_spec);
                self.set_scheduler_defaults();
                self.set_components_defaults(cloud_spec, params);
                self.set_sysctld_defaults();
            }
            OrchestratorType::Dcos => self.set_dcos_defaults(params),
            OrchestratorType::Swarm | OrchestratorType::SwarmMode => {}
        }
    }

    fn set_kubernetes_config_defaults(&mut self, cloud_spec: &CloudSpec, params: DefaultsParams) {
        let facts = ClusterFacts {
            is_azure_stack: self.is_azure_stack_cloud(),
            is_dual_stack: self.is_ipv6_dual_stack(),
            is_ipv6_only: self.is_ipv6_only(),
            agent_pool_count: self.agent_pool_profiles.len(),
            total_nodes: self.total_nodes(),
        };
        let Some(orchestrator) = self.orchestrator_profile.as_mut() else {
            return;
        };
        let version = orchestrator.orchestrator_version.as_str();
        let Some(config) = orchestrator.kubernetes_config.as_mut() else {
            return;
        };

        set_image_base_defaults(config, cloud_spec, facts, params);

        if config.etcd_version.is_empty() {
            DEFAULT_ETCD_VERSION.clone_into(&mut config.etcd_version);
        } else if params.is_upgrade
            && config.etcd_version != DEFAULT_ETCD_VERSION
            && !is_version_ge(&config.etcd_version, DEFAULT_ETCD_VERSION)
        {
            warn!(
                from = %config.etcd_version,
                to = DEFAULT_ETCD_VERSION,
                "etcd will be upgraded"
            );
            DEFAULT_ETCD_VERSION.clone_into(&mut config.etcd_version);
        }

        if config.network_plugin.is_empty() {
            config.network_plugin = if config.is_addon_enabled(FLANNEL_ADDON_NAME) {
                NETWORK_PLUGIN_FLANNEL
            } else {
                DEFAULT_NETWORK_PLUGIN
            }
            .to_owned();
        }

        if config.container_runtime.is_empty() {
            DEFAULT_CONTAINER_RUNTIME.clone_into(&mut config.container_runtime);
        }
        match config.container_runtime.as_str() {
            DOCKER => refresh_runtime_version(
                &mut config.moby_version,
                DEFAULT_MOBY_VERSION,
                "Moby",
                params,
            ),
            CONTAINERD => refresh_runtime_version(
                &mut config.containerd_version,
                DEFAULT_CONTAINERD_VERSION,
                "containerd",
                params,
            ),
            _ => {}
        }

        let is_azure_cni = config.network_plugin == NETWORK_PLUGIN_AZURE;
        config.cluster_subnet = resolve_cluster_subnet(
            &config.cluster_subnet,
            is_azure_cni,
            facts,
            default_cluster_subnet_ipv6(version),
        );

        set_networking_defaults(config, facts);
        set_cloud_provider_defaults(config, version, facts);

        let private_cluster = config.private_cluster.get_or_insert_default();
        private_cluster
            .enabled
            .get_or_insert(DEFAULT_PRIVATE_CLUSTER_ENABLED);

        if config.etcd_disk_size_gb.is_empty() {
            config.etcd_disk_size_gb = etcd_disk_size(facts.total_nodes, facts.is_azure_stack).to_owned();
        }

        if config.enable_data_encryption_at_rest == Some(true) && config.etcd_encryption_key.is_empty() {
            debug!("generating an etcd encryption key");
            config.etcd_encryption_key = generate_etcd_encryption_key();
        }

        if config.private_jumpbox_provision()
            && let Some(jumpbox) = config
                .private_cluster
                .as_mut()
                .and_then(|p| p.jumpbox_profile.as_mut())
        {
            if jumpbox.os_disk_size_gb == 0 {
                jumpbox.os_disk_size_gb = DEFAULT_JUMPBOX_DISK_SIZE;
            }
            if jumpbox.username.is_empty() {
                DEFAULT_JUMPBOX_USERNAME.clone_into(&mut jumpbox.username);
            }
            if jumpbox.storage_profile.is_empty() {
                MANAGED_DISKS.clone_into(&mut jumpbox.storage_profile);
            }
        }

        let rbac = config.enable_rbac.get_or_insert(DEFAULT_RBAC_ENABLED);
        if !*rbac && params.is_upgrade && is_version_ge(version, "1.15.0") {
            warn!(version, "RBAC will be enabled during the upgrade");
            *rbac = true;
        }
        if config.is_rbac_enabled() {
            config.enable_aggregated_apis = true;
        } else if params.is_update() {
            config.enable_aggregated_apis = false;
        }

        config
            .enable_secure_kubelet
            .get_or_insert(DEFAULT_SECURE_KUBELET_ENABLED);
        config.use_instance_metadata.get_or_insert(if facts.is_azure_stack {
            DEFAULT_AZURE_STACK_USE_INSTANCE_METADATA
        } else {
            DEFAULT_USE_INSTANCE_METADATA
        });

        set_load_balancer_defaults(config, facts);

        if is_azure_cni {
            AZURE_CNI_PLUGIN_VERSION.clone_into(&mut config.azure_cni_version);
        }
        if config.maximum_load_balancer_rule_count == 0 {
            config.maximum_load_balancer_rule_count = MAXIMUM_LOAD_BALANCER_RULE_COUNT;
        }
        if config.proxy_mode.is_empty() {
            DEFAULT_KUBE_PROXY_MODE.clone_into(&mut config.proxy_mode);
        }
    }

    /// Places the masters in the default subnets unless they live in a
    /// custom VNET. Upgrades keep an existing first static IP.
    fn set_master_network_defaults(&mut self, params: DefaultsParams) {
        let is_azure_cni = self.is_azure_cni();
        let is_dual_stack = self.is_azure_cni_dual_stack();
        let cluster_subnet = self
            .kubernetes_config()
            .map(|k| k.cluster_subnet.clone())
            .unwrap_or_default();
        let Some(master) = self.master_profile.as_mut() else {
            return;
        };
        if master.is_custom_vnet() {
            return;
        }

        let keep_static_ip = params.is_upgrade && !master.first_consecutive_static_ip.is_empty();
        let is_vmss = master.is_virtual_machine_scale_sets();

        // Scale set masters always live in their own subnet, next to the agents
        if is_vmss {
            DEFAULT_KUBERNETES_MASTER_SUBNET.clone_into(&mut master.subnet);
            DEFAULT_AGENT_SUBNET_VMSS.clone_into(&mut master.agent_subnet);
        } else if is_azure_cni {
            master.subnet = match cluster_subnet.split_once(',') {
                Some((ipv4, _)) if is_dual_stack => ipv4.to_owned(),
                _ => cluster_subnet,
            };
        } else {
            DEFAULT_KUBERNETES_MASTER_SUBNET.clone_into(&mut master.subnet);
        }
        DEFAULT_KUBERNETES_MASTER_SUBNET_IPV6.clone_into(&mut master.subnet_ipv6);

        if keep_static_ip {
            return;
        }
        if is_vmss {
            DEFAULT_FIRST_CONSECUTIVE_KUBERNETES_STATIC_IP_VMSS
                .clone_into(&mut master.first_consecutive_static_ip);
        } else if is_azure_cni {
            master.first_consecutive_static_ip = master.first_consecutive_static_ip(&master.subnet);
        } else {
            DEFAULT_FIRST_CONSECUTIVE_KUBERNETES_STATIC_IP
                .clone_into(&mut master.first_consecutive_static_ip);
        }
    }

    fn set_master_distro_defaults(&mut self, cloud_spec: &CloudSpec, params: DefaultsParams) {
        let has_custom_hyperkube = self
            .kubernetes_config()
            .is_some_and(|k| !k.custom_hyperkube_image.is_empty());
        let Some(master) = self.master_profile.as_mut() else {
            return;
        };
        if master.image_ref.is_some() {
            return;
        }

        let fallback = if has_custom_hyperkube {
            Distro::Ubuntu1804
        } else {
            Distro::AksUbuntu1804
        };
        resolve_distro(&mut master.distro, fallback, params, is_german_cloud(cloud_spec));
    }

    fn set_agent_pool_orchestrator_defaults(&mut self, cloud_spec: &CloudSpec, params: DefaultsParams) {
        let master_subnet = self
            .master_profile
            .as_ref()
            .filter(|m| !m.is_custom_vnet() && !m.is_virtual_machine_scale_sets())
            .map(|m| m.subnet.clone());
        let has_custom_hyperkube = self
            .kubernetes_config()
            .is_some_and(|k| !k.custom_hyperkube_image.is_empty());
        let is_standard_lb = self
            .kubernetes_config()
            .is_some_and(|k| k.load_balancer_sku == STANDARD_LOAD_BALANCER_SKU);
        let is_german_cloud = is_german_cloud(cloud_spec);

        for pool in &mut self.agent_pool_profiles {
            if let Some(subnet) = &master_subnet {
                subnet.clone_into(&mut pool.subnet);
            }

            if !pool.is_windows() && pool.image_ref.is_none() {
                let small_os_disk =
                    pool.os_disk_size_gb != 0 && pool.os_disk_size_gb < VHD_DISK_SIZE_AKS;
                let fallback = if has_custom_hyperkube || small_os_disk {
                    Distro::Ubuntu1804
                } else {
                    Distro::AksUbuntu1804
                };
                resolve_distro(&mut pool.distro, fallback, params, is_german_cloud);
            }

            if pool.is_virtual_machine_scale_sets() && pool.single_placement_group.is_none() {
                pool.single_placement_group =
                    Some(!is_standard_lb && DEFAULT_SINGLE_PLACEMENT_GROUP);
            }
        }
    }

    /// One address for the node, plus one per pod when pods draw their
    /// addresses from the VNET.
    fn set_ip_address_count_defaults(&mut self) {
        let is_azure_cni = self.is_azure_cni();
        let addresses = |config: Option<&KubernetesConfig>| {
            let pods = if is_azure_cni {
                config
                    .and_then(|k| k.kubelet_config.get("--max-pods"))
                    .and_then(|max_pods| max_pods.parse::<i32>().ok())
                    .unwrap_or(0)
            } else {
                0
            };
            1 + pods
        };

        if let Some(master) = self.master_profile.as_mut()
            && master.ip_address_count == 0
        {
            master.ip_address_count = addresses(master.kubernetes_config.as_ref());
        }
        for pool in &mut self.agent_pool_profiles {
            if pool.ip_address_count == 0 {
                pool.ip_address_count = addresses(pool.kubernetes_config.as_ref());
            }
        }
    }

    fn set_dcos_defaults(&mut self, params: DefaultsParams) {
        let is_custom_vnet = self
            .master_profile
            .as_ref()
            .is_some_and(MasterProfile::is_custom_vnet);
        let Some(orchestrator) = self.orchestrator_profile.as_mut() else {
            return;
        };
        let dcos = orchestrator.dcos_config.get_or_insert_default();

        if is_version_ge(
            &orchestrator.orchestrator_version,
            DEFAULT_DCOS_BOOTSTRAP_MIN_VERSION,
        ) {
            let bootstrap = dcos.bootstrap_profile.get_or_insert_default();
            if bootstrap.vm_size.is_empty() {
                DEFAULT_DCOS_BOOTSTRAP_VM_SIZE.clone_into(&mut bootstrap.vm_size);
            }
        }

        if !is_custom_vnet
            && let Some(bootstrap) = dcos.bootstrap_profile.as_mut()
            && (!params.is_upgrade || bootstrap.static_ip.is_empty())
        {
            DEFAULT_DCOS_BOOTSTRAP_STATIC_IP.clone_into(&mut bootstrap.static_ip);
        }
    }
}

fn set_image_base_defaults(
    config: &mut KubernetesConfig,
    cloud_spec: &CloudSpec,
    facts: ClusterFacts,
    params: DefaultsParams,
) {
    let spec = &cloud_spec.kubernetes_spec_config;

    if facts.is_azure_stack {
        if !config
            .kubernetes_image_base
            .eq_ignore_ascii_case(&spec.mcr_kubernetes_image_base)
        {
            warn!(
                image_base = %spec.mcr_kubernetes_image_base,
                "kubernetesImageBase is forced on Azure Stack"
            );
        }
        config
            .kubernetes_image_base
            .clone_from(&spec.mcr_kubernetes_image_base);

        if !config
            .kubernetes_image_base_type
            .eq_ignore_ascii_case(KUBERNETES_IMAGE_BASE_TYPE_MCR)
        {
            warn!(
                image_base_type = KUBERNETES_IMAGE_BASE_TYPE_MCR,
                "kubernetesImageBaseType is forced on Azure Stack"
            );
        }
        KUBERNETES_IMAGE_BASE_TYPE_MCR.clone_into(&mut config.kubernetes_image_base_type);
    }

    if params.is_upgrade
        && config.kubernetes_image_base == spec.kubernetes_image_base
        && config.kubernetes_image_base_type == KUBERNETES_IMAGE_BASE_TYPE_GCR
    {
        debug!("moving the image base from gcr to mcr");
        config
            .kubernetes_image_base
            .clone_from(&spec.mcr_kubernetes_image_base);
        KUBERNETES_IMAGE_BASE_TYPE_MCR.clone_into(&mut config.kubernetes_image_base_type);
    }

    if config.kubernetes_image_base.is_empty() {
        config
            .kubernetes_image_base
            .clone_from(&spec.mcr_kubernetes_image_base);
    } else if !config.kubernetes_image_base.ends_with('/') {
        config.kubernetes_image_base.push('/');
    }

    if config.kubernetes_image_base_type.is_empty() {
        KUBERNETES_IMAGE_BASE_TYPE_MCR.clone_into(&mut config.kubernetes_image_base_type);
    }
    if config.mcr_kubernetes_image_base.is_empty() {
        config
            .mcr_kubernetes_image_base
            .clone_from(&spec.mcr_kubernetes_image_base);
    }
}

/// New clusters get the default runtime version. Updates move existing nodes
/// to it as well.
fn refresh_runtime_version(current: &mut String, default: &str, runtime: &str, params: DefaultsParams) {
    if !current.is_empty() && !params.is_update() {
        return;
    }
    if current != default {
        if params.is_upgrade {
            warn!(runtime, version = default, "the container runtime will be upgraded");
        } else if params.is_scale {
            warn!(runtime, version = default, "new nodes will run a different container runtime version");
        }
    }
    default.clone_into(current);
}

fn default_cluster_subnet_ipv6(version: &str) -> &'static str {
    if is_version_ge(version, "1.17.0") {
        DEFAULT_KUBERNETES_CLUSTER_SUBNET_IPV6
    } else {
        DEFAULT_KUBERNETES_CLUSTER_SUBNET_IPV6_LEGACY
    }
}

/// Fills in an empty cluster subnet and makes sure dual-stack clusters carry
/// an IPv4 subnet followed by an IPv6 subnet.
fn resolve_cluster_subnet(
    current: &str,
    is_azure_cni: bool,
    facts: ClusterFacts,
    ipv6_subnet: &str,
) -> String {
    let ipv4_subnet = if is_azure_cni {
        DEFAULT_KUBERNETES_SUBNET
    } else {
        DEFAULT_KUBERNETES_CLUSTER_SUBNET
    };

    if current.is_empty() {
        return if facts.is_dual_stack {
            format!("{ipv4_subnet},{ipv6_subnet}")
        } else if facts.is_ipv6_only && !is_azure_cni {
            DEFAULT_KUBERNETES_CLUSTER_SUBNET_IPV6.to_owned()
        } else {
            ipv4_subnet.to_owned()
        };
    }

    if !facts.is_dual_stack || current.contains(',') {
        return current.to_owned();
    }

    // Invalid subnets are left for validation to reject
    let address = current.split_once('/').map_or(current, |(address, _)| address);
    match address.parse::<IpAddr>() {
        Ok(IpAddr::V4(_)) => format!("{current},{ipv6_subnet}"),
        Ok(IpAddr::V6(_)) => format!("{ipv4_subnet},{current}"),
        Err(_) => current.to_owned(),
    }
}

fn set_networking_defaults(config: &mut KubernetesConfig, facts: ClusterFacts) {
    if config.gc_high_threshold == 0 {
        config.gc_high_threshold = DEFAULT_KUBERNETES_GC_HIGH_THRESHOLD;
    }
    if config.gc_low_threshold == 0 {
        config.gc_low_threshold = DEFAULT_KUBERNETES_GC_LOW_THRESHOLD;
    }

    let (dns_service_ip, service_cidr) = if facts.is_ipv6_only {
        (DEFAULT_KUBERNETES_DNS_SERVICE_IP_IPV6, DEFAULT_KUBERNETES_SERVICE_CIDR_IPV6)
    } else {
        (DEFAULT_KUBERNETES_DNS_SERVICE_IP, DEFAULT_KUBERNETES_SERVICE_CIDR)
    };
    if config.dns_service_ip.is_empty() {
        dns_service_ip.clone_into(&mut config.dns_service_ip);
    }
    if config.service_cidr.is_empty() {
        service_cidr.clone_into(&mut config.service_cidr);
    }
    if config.docker_bridge_subnet.is_empty() {
        DEFAULT_DOCKER_BRIDGE_SUBNET.clone_into(&mut config.docker_bridge_subnet);
    }
}

fn is_unset(value: f64) -> bool {
    value.abs() < f64::EPSILON
}

/// Keeps the QPS at or above a tenth of the bucket size.
fn rate_limit_qps(default: f64, bucket: i32) -> f64 {
    let bucket = f64::from(bucket);
    if default / bucket < MIN_CLOUD_PROVIDER_QPS_TO_BUCKET_FACTOR {
        bucket * MIN_CLOUD_PROVIDER_QPS_TO_BUCKET_FACTOR
    } else {
        default
    }
}

fn set_cloud_provider_defaults(config: &mut KubernetesConfig, version: &str, facts: ClusterFacts) {
    if is_version_ge(version, "1.14.0") {
        CLOUD_PROVIDER_BACKOFF_MODE_V2.clone_into(&mut config.cloud_provider_backoff_mode);
        config.cloud_provider_backoff.get_or_insert(true);
    } else {
        CLOUD_PROVIDER_BACKOFF_MODE_V1.clone_into(&mut config.cloud_provider_backoff_mode);
        config.cloud_provider_backoff.get_or_insert(false);
    }

    let azure_stack = facts.is_azure_stack;
    if config.cloud_provider_backoff_duration == 0 {
        config.cloud_provider_backoff_duration = if azure_stack {
            DEFAULT_AZURE_STACK_CLOUD_PROVIDER_BACKOFF_DURATION
        } else {
            DEFAULT_KUBERNETES_CLOUD_PROVIDER_BACKOFF_DURATION
        };
    }
    if config.cloud_provider_backoff_retries == 0 {
        config.cloud_provider_backoff_retries = if azure_stack {
            DEFAULT_AZURE_STACK_CLOUD_PROVIDER_BACKOFF_RETRIES
        } else {
            DEFAULT_KUBERNETES_CLOUD_PROVIDER_BACKOFF_RETRIES
        };
    }
    // The v2 backoff has no exponent or jitter
    if config.cloud_provider_backoff_mode != CLOUD_PROVIDER_BACKOFF_MODE_V2 {
        if is_unset(config.cloud_provider_backoff_exponent) {
            config.cloud_provider_backoff_exponent = if azure_stack {
                DEFAULT_AZURE_STACK_CLOUD_PROVIDER_BACKOFF_EXPONENT
            } else {
                DEFAULT_KUBERNETES_CLOUD_PROVIDER_BACKOFF_EXPONENT
            };
        }
        if is_unset(config.cloud_provider_backoff_jitter) {
            config.cloud_provider_backoff_jitter = if azure_stack {
                DEFAULT_AZURE_STACK_CLOUD_PROVIDER_BACKOFF_JITTER
            } else {
                DEFAULT_KUBERNETES_CLOUD_PROVIDER_BACKOFF_JITTER
            };
        }
    }

    config
        .cloud_provider_rate_limit
        .get_or_insert(DEFAULT_KUBERNETES_CLOUD_PROVIDER_RATE_LIMIT);

    let bucket_per_pools = |default: i32| match facts.agent_pool_count {
        0 => default,
        count => i32::try_from(count)
            .unwrap_or(i32::MAX)
            .saturating_mul(MAX_AGENT_COUNT),
    };

    if config.cloud_provider_rate_limit_bucket == 0 {
        config.cloud_provider_rate_limit_bucket = if azure_stack {
            DEFAULT_AZURE_STACK_CLOUD_PROVIDER_RATE_LIMIT_BUCKET
        } else {
            bucket_per_pools(DEFAULT_KUBERNETES_CLOUD_PROVIDER_RATE_LIMIT_BUCKET)
        };
    }
    if is_unset(config.cloud_provider_rate_limit_qps) {
        config.cloud_provider_rate_limit_qps = if azure_stack {
            DEFAULT_AZURE_STACK_CLOUD_PROVIDER_RATE_LIMIT_QPS
        } else {
            rate_limit_qps(
                DEFAULT_KUBERNETES_CLOUD_PROVIDER_RATE_LIMIT_QPS,
                config.cloud_provider_rate_limit_bucket,
            )
        };
    }
    if config.cloud_provider_rate_limit_bucket_write == 0 {
        config.cloud_provider_rate_limit_bucket_write = if azure_stack {
            DEFAULT_AZURE_STACK_CLOUD_PROVIDER_RATE_LIMIT_BUCKET_WRITE
        } else {
            bucket_per_pools(DEFAULT_KUBERNETES_CLOUD_PROVIDER_RATE_LIMIT_BUCKET_WRITE)
        };
    }
    if is_unset(config.cloud_provider_rate_limit_qps_write) {
        config.cloud_provider_rate_limit_qps_write = if azure_stack {
            DEFAULT_AZURE_STACK_CLOUD_PROVIDER_RATE_LIMIT_QPS_WRITE
        } else {
            rate_limit_qps(
                DEFAULT_KUBERNETES_CLOUD_PROVIDER_RATE_LIMIT_QPS_WRITE,
                config.cloud_provider_rate_limit_bucket_write,
            )
        };
    }
}

fn etcd_disk_size(total_nodes: i32, is_azure_stack: bool) -> &'static str {
    match total_nodes {
        n if n > 10 && is_azure_stack => MAX_AZURE_STACK_MANAGED_DISK_SIZE,
        n if n > 20 => DEFAULT_ETCD_DISK_SIZE_GT20_NODES,
        n if n > 10 => DEFAULT_ETCD_DISK_SIZE_GT10_NODES,
        n if n > 3 => DEFAULT_ETCD_DISK_SIZE_GT3_NODES,
        _ => DEFAULT_ETCD_DISK_SIZE,
    }
}

/// 32 random bytes, base64 encoded.
fn generate_etcd_encryption_key() -> String {
    let key: [u8; 32] = rand::random();
    base64::engine::general_purpose::STANDARD.encode(key)
}

fn set_load_balancer_defaults(config: &mut KubernetesConfig, facts: ClusterFacts) {
    if facts.is_azure_stack && config.load_balancer_sku != DEFAULT_AZURE_STACK_LOAD_BALANCER_SKU {
        if !config.load_balancer_sku.is_empty() {
            warn!(
                sku = DEFAULT_AZURE_STACK_LOAD_BALANCER_SKU,
                "loadBalancerSku is forced on Azure Stack"
            );
        }
        DEFAULT_AZURE_STACK_LOAD_BALANCER_SKU.clone_into(&mut config.load_balancer_sku);
    } else if config.load_balancer_sku.is_empty() {
        STANDARD_LOAD_BALANCER_SKU.clone_into(&mut config.load_balancer_sku);
    }

    if config
        .load_balancer_sku
        .eq_ignore_ascii_case(BASIC_LOAD_BALANCER_SKU)
    {
        BASIC_LOAD_BALANCER_SKU.clone_into(&mut config.load_balancer_sku);
    } else if config
        .load_balancer_sku
        .eq_ignore_ascii_case(STANDARD_LOAD_BALANCER_SKU)
    {
        STANDARD_LOAD_BALANCER_SKU.clone_into(&mut config.load_balancer_sku);
    }

    if config.load_balancer_sku == STANDARD_LOAD_BALANCER_SKU {
        config
            .exclude_master_from_standard_lb
            .get_or_insert(DEFAULT_EXCLUDE_MASTER_FROM_STANDARD_LB);
        if config.outbound_rule_idle_timeout_in_minutes == 0 {
            config.outbound_rule_idle_timeout_in_minutes =
                DEFAULT_OUTBOUND_RULE_IDLE_TIMEOUT_IN_MINUTES;
        }
        config.cloud_provider_disable_outbound_snat.get_or_insert(false);
    } else {
        // Only meaningful for Standard load balancers
        config.cloud_provider_disable_outbound_snat = Some(false);
    }
}

fn is_german_cloud(cloud_spec: &CloudSpec) -> bool {
    cloud_spec.cloud_name == CloudName::AzureGermanCloud.as_ref()
}

/// Assigns `fallback` to a missing distro and replaces deprecated distros on
/// updates. The AKS images are not published to Azure Germany.
fn resolve_distro(
    distro: &mut Option<Distro>,
    fallback: Distro,
    params: DefaultsParams,
    is_german_cloud: bool,
) {
    match *distro {
        None => *distro = Some(fallback),
        Some(Distro::AksDockerEngine | Distro::Aks1604Deprecated) if params.is_update() => {
            *distro = Some(Distro::AksUbuntu1604);
        }
        Some(Distro::Aks1804Deprecated) if params.is_update() => {
            *distro = Some(Distro::AksUbuntu1804);
        }
        Some(_) => {}
    }

    if is_german_cloud {
        *distro = Some(Distro::Ubuntu1804);
    }
}
