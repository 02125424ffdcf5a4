use std::{collections::BTreeSet, sync::LazyLock};

use cluster_version::{is_version_ge, rationalize_release_and_version, valid_patch_version};
use regex::Regex;
use snafu::{OptionExt, Snafu, ensure};
use tracing::warn;

use crate::{
    api::consts::{
        BASIC_LOAD_BALANCER_SKU, CONTAINERD, DOCKER, MAX_AGENT_COUNT, NETWORK_MODE_TRANSPARENT,
        NETWORK_PLUGIN_ANTREA, NETWORK_PLUGIN_AZURE, NETWORK_PLUGIN_CILIUM, NETWORK_PLUGIN_FLANNEL,
        NETWORK_PLUGIN_KUBENET, NETWORK_POLICY_ANTREA, NETWORK_POLICY_AZURE, NETWORK_POLICY_CALICO,
        NETWORK_POLICY_CILIUM, NETWORK_POLICY_NONE, STANDARD_LOAD_BALANCER_SKU,
    },
    api::{Distro, OrchestratorType, OsType},
    vlabs::{AgentPoolProfile, KubernetesConfig, MasterProfile, OrchestratorProfile, Properties},
};

static POOL_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^[a-z][a-z0-9]{0,11}$").expect("failed to compile pool name regex")
});

const NETWORK_PLUGINS: &[&str] = &[
    "",
    NETWORK_PLUGIN_KUBENET,
    NETWORK_PLUGIN_AZURE,
    NETWORK_PLUGIN_CILIUM,
    NETWORK_PLUGIN_FLANNEL,
    NETWORK_PLUGIN_ANTREA,
];

const NETWORK_POLICIES: &[&str] = &[
    "",
    NETWORK_POLICY_CALICO,
    NETWORK_POLICY_CILIUM,
    NETWORK_POLICY_AZURE,
    NETWORK_POLICY_NONE,
    NETWORK_POLICY_ANTREA,
];

/// Allowed `(networkPlugin, networkPolicy)` combinations.
const NETWORK_PLUGIN_POLICY_COMBINATIONS: &[(&str, &str)] = &[
    ("", ""),
    (NETWORK_PLUGIN_AZURE, ""),
    (NETWORK_PLUGIN_AZURE, NETWORK_POLICY_AZURE),
    (NETWORK_PLUGIN_KUBENET, ""),
    (NETWORK_PLUGIN_FLANNEL, ""),
    (NETWORK_PLUGIN_CILIUM, NETWORK_POLICY_CILIUM),
    (NETWORK_PLUGIN_KUBENET, NETWORK_POLICY_CALICO),
    (NETWORK_PLUGIN_AZURE, NETWORK_POLICY_CALICO),
    ("", NETWORK_POLICY_CALICO),
    ("", NETWORK_POLICY_CILIUM),
    (NETWORK_PLUGIN_ANTREA, NETWORK_POLICY_ANTREA),
    ("", NETWORK_POLICY_ANTREA),
    ("", NETWORK_POLICY_AZURE),
    ("", NETWORK_POLICY_NONE),
];

const CONTAINER_RUNTIMES: &[&str] = &["", DOCKER, CONTAINERD];

const MASTER_COUNTS: &[i32] = &[1, 3, 5];

const KUBERNETES_MIN_MAX_PODS: i32 = 5;

type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Eq, PartialEq, Snafu)]
pub enum Error {
    #[snafu(display("the orchestratorProfile is required"))]
    MissingOrchestratorProfile,

    #[snafu(display("the masterProfile is required"))]
    MissingMasterProfile,

    #[snafu(display("unknown orchestrator {orchestrator_type:?}"))]
    UnsupportedOrchestrator { orchestrator_type: String },

    #[snafu(display(
        "orchestrator release {release:?} with version {version:?} is not supported{}",
        if *has_windows { " with Windows agent pools" } else { "" }
    ))]
    UnsupportedVersion {
        release: String,
        version: String,
        has_windows: bool,
    },

    #[snafu(display("kubernetesConfig can only be specified when the orchestrator is Kubernetes"))]
    KubernetesConfigWithoutKubernetes,

    #[snafu(display("dcosConfig can only be specified when the orchestrator is DCOS"))]
    DcosConfigWithoutDcos,

    #[snafu(display("availabilityZones require Kubernetes 1.12.0 or greater, got {version}"))]
    AvailabilityZonesUnsupported { version: String },

    #[snafu(display("master count {count} is invalid, it must be one of 1, 3 or 5"))]
    InvalidMasterCount { count: i32 },

    #[snafu(display(
        "masterProfile uses a custom image (imageReference) and an explicit distro, only one of them may be set"
    ))]
    ImageReferenceWithDistro,

    #[snafu(display(
        "pool name {name:?} is invalid, it must start with a lowercase letter, have max length of 12 and only contain a-z0-9"
    ))]
    InvalidPoolName { name: String },

    #[snafu(display("pool name {name:?} is used more than once"))]
    DuplicatePoolName { name: String },

    #[snafu(display("agent pool {name:?} has count {count}, it must be between 1 and 100"))]
    InvalidAgentCount { name: String, count: i32 },

    #[snafu(display("{distro} is not supported with IPv6, used by {profile}"))]
    Ipv6UnsupportedDistro { distro: Distro, profile: String },

    #[snafu(display("agent pool {name:?} runs Windows which is not supported with IPv6"))]
    Ipv6UnsupportedWindows { name: String },

    #[snafu(display("enableIPv6DualStack and enableIPv6Only can't be enabled at the same time"))]
    Ipv6ExclusiveFeatures,

    #[snafu(display("IPv6 dual stack is not available in Kubernetes version {version}"))]
    Ipv6DualStackUnsupported { version: String },

    #[snafu(display("IPv6 single stack is not available in Kubernetes version {version}"))]
    Ipv6OnlyUnsupported { version: String },

    #[snafu(display("network plugin {plugin:?} is invalid, IPv6 is supported only with kubenet"))]
    Ipv6RequiresKubenet { plugin: String },

    #[snafu(display("unknown networkPlugin {plugin:?}"))]
    UnknownNetworkPlugin { plugin: String },

    #[snafu(display("unknown networkPolicy {policy:?}"))]
    UnknownNetworkPolicy { policy: String },

    #[snafu(display("networkPolicy {policy:?} is not supported with networkPlugin {plugin:?}"))]
    InvalidNetworkPolicy { plugin: String, policy: String },

    #[snafu(display("{option} {value:?} does not support Windows agent pools"))]
    UnsupportedOnWindows { option: String, value: String },

    #[snafu(display("networkMode {mode:?} requires the azure network plugin"))]
    NetworkModeRequiresAzure { mode: String },

    #[snafu(display("networkMode {mode:?} is not supported by calico"))]
    NetworkModeUnsupportedByCalico { mode: String },

    #[snafu(display("unknown containerRuntime {runtime:?}"))]
    UnknownContainerRuntime { runtime: String },

    #[snafu(display("maxPods {max_pods} must be at least {KUBERNETES_MIN_MAX_PODS}"))]
    InvalidMaxPods { max_pods: i32 },

    #[snafu(display("dnsServiceIP and serviceCidr must be specified together"))]
    IncompleteServiceNetwork,

    #[snafu(display("enableAggregatedAPIs requires enableRbac"))]
    AggregatedApisRequireRbac,

    #[snafu(display("enablePodSecurityPolicy requires enableRbac"))]
    PodSecurityPolicyRequiresRbac,

    #[snafu(display("RBAC can't be disabled for Kubernetes 1.15.0 or greater, got {version}"))]
    RbacRequired { version: String },

    #[snafu(display("loadBalancerSku {sku:?} is invalid, only Standard and Basic are supported"))]
    InvalidLoadBalancerSku { sku: String },

    #[snafu(display(
        "the Standard loadBalancerSku requires excludeMasterFromStandardLB to be true"
    ))]
    StandardLoadBalancerIncludesMaster,

    #[snafu(display("maximumLoadBalancerRuleCount {count} must not be negative"))]
    NegativeLoadBalancerRuleCount { count: i32 },

    #[snafu(display("outboundRuleIdleTimeoutInMinutes {minutes} must be between 4 and 120"))]
    InvalidOutboundRuleIdleTimeout { minutes: i32 },

    #[snafu(display("useInstanceMetadata is not supported on Azure Stack"))]
    InstanceMetadataOnAzureStack,

    #[snafu(display("customHyperkubeImage has no effect in Kubernetes 1.17.0 or greater"))]
    HyperkubeImageWithSplitImages,

    #[snafu(display(
        "custom component images or customKubeBinaryURL have no effect below Kubernetes 1.17.0"
    ))]
    SplitImagesWithHyperkube,
}

impl Properties {
    /// Semantic checks on a freshly parsed document. On updates, versions
    /// which are no longer offered for new clusters are still accepted.
    pub fn validate(&self, is_update: bool) -> Result<()> {
        self.validate_orchestrator_profile(is_update)?;

        let master = self
            .master_profile
            .as_ref()
            .context(MissingMasterProfileSnafu)?;
        self.validate_master_profile(master)?;
        self.validate_agent_pool_profiles()
    }

    /// The orchestrator specific subset of [`Properties::validate`]. Also run
    /// while converting new documents.
    pub fn validate_orchestrator_profile(&self, is_update: bool) -> Result<()> {
        let orchestrator = self
            .orchestrator_profile
            .as_ref()
            .context(MissingOrchestratorProfileSnafu)?;

        let orchestrator_type = orchestrator
            .orchestrator_type
            .parse::<OrchestratorType>()
            .ok()
            .context(UnsupportedOrchestratorSnafu {
                orchestrator_type: &orchestrator.orchestrator_type,
            })?;

        if orchestrator_type == OrchestratorType::Kubernetes {
            let version = self.validate_kubernetes_version(orchestrator, is_update)?;
            self.validate_kubernetes_config(orchestrator, &version)?;
        }

        ensure!(
            orchestrator_type == OrchestratorType::Kubernetes
                || orchestrator.kubernetes_config.is_none(),
            KubernetesConfigWithoutKubernetesSnafu
        );
        ensure!(
            orchestrator_type == OrchestratorType::Dcos
                || orchestrator
                    .dcos_config
                    .as_ref()
                    .is_none_or(|config| *config == Default::default()),
            DcosConfigWithoutDcosSnafu
        );

        Ok(())
    }

    fn validate_kubernetes_version(
        &self,
        orchestrator: &OrchestratorProfile,
        is_update: bool,
    ) -> Result<String> {
        let platform = self.platform();
        let release = &orchestrator.orchestrator_release;
        let version = &orchestrator.orchestrator_version;

        let rationalized = if is_update {
            rationalize_release_and_version(release, version, false, platform)
                .or_else(|| valid_patch_version(version, true, platform))
        } else {
            rationalize_release_and_version(release, version, false, platform)
        };

        rationalized.context(UnsupportedVersionSnafu {
            release,
            version,
            has_windows: platform.has_windows,
        })
    }

    fn validate_kubernetes_config(
        &self,
        orchestrator: &OrchestratorProfile,
        version: &str,
    ) -> Result<()> {
        let has_zones = self
            .agent_pool_profiles
            .iter()
            .any(|pool| !pool.availability_zones.is_empty())
            || self
                .master_profile
                .as_ref()
                .is_some_and(|master| !master.availability_zones.is_empty());
        ensure!(
            !has_zones || is_version_ge(version, "1.12.0"),
            AvailabilityZonesUnsupportedSnafu { version }
        );

        let default_config = KubernetesConfig::default();
        let config = orchestrator
            .kubernetes_config
            .as_ref()
            .unwrap_or(&default_config);

        self.validate_ip_families(config, version)?;
        self.validate_network(config)?;
        self.validate_container_runtime(config)?;

        if config.max_pods != 0 {
            ensure!(
                config.max_pods >= KUBERNETES_MIN_MAX_PODS,
                InvalidMaxPodsSnafu {
                    max_pods: config.max_pods
                }
            );
        }
        ensure!(
            config.dns_service_ip.is_empty() == config.service_cidr.is_empty(),
            IncompleteServiceNetworkSnafu
        );

        ensure!(
            !config.enable_aggregated_apis || config.is_rbac_enabled(),
            AggregatedApisRequireRbacSnafu
        );
        ensure!(
            config.is_rbac_enabled() || !is_version_ge(version, "1.15.0"),
            RbacRequiredSnafu { version }
        );
        if config.enable_pod_security_policy == Some(true) {
            warn!("enablePodSecurityPolicy is deprecated in favor of the pod-security-policy addon");
            ensure!(config.is_rbac_enabled(), PodSecurityPolicyRequiresRbacSnafu);
        }
        if !config.docker_engine_version.is_empty() {
            warn!("dockerEngineVersion is deprecated in favor of moby and will be ignored");
        }

        validate_load_balancer(config)?;

        if self.is_azure_stack_cloud() {
            ensure!(
                config.use_instance_metadata != Some(true),
                InstanceMetadataOnAzureStackSnafu
            );
        }

        if is_version_ge(version, "1.17.0") {
            ensure!(
                config.custom_hyperkube_image.is_empty(),
                HyperkubeImageWithSplitImagesSnafu
            );
        } else {
            ensure!(
                !config.uses_custom_kube_component(),
                SplitImagesWithHyperkubeSnafu
            );
        }

        Ok(())
    }

    fn validate_ip_families(&self, config: &KubernetesConfig, version: &str) -> Result<()> {
        let (dual_stack, ipv6_only) = (self.is_ipv6_dual_stack(), self.is_ipv6_only());
        ensure!(!(dual_stack && ipv6_only), Ipv6ExclusiveFeaturesSnafu);

        if dual_stack {
            ensure!(
                is_version_ge(version, "1.16.0"),
                Ipv6DualStackUnsupportedSnafu { version }
            );
        }
        if ipv6_only {
            ensure!(
                is_version_ge(version, "1.18.0"),
                Ipv6OnlyUnsupportedSnafu { version }
            );
        }
        if dual_stack || ipv6_only {
            ensure!(
                config.network_plugin == NETWORK_PLUGIN_KUBENET,
                Ipv6RequiresKubenetSnafu {
                    plugin: &config.network_plugin
                }
            );
        }

        Ok(())
    }

    fn validate_network(&self, config: &KubernetesConfig) -> Result<()> {
        let plugin = config.network_plugin.as_str();
        let policy = config.network_policy.as_str();
        let has_windows = self.has_windows();

        ensure!(
            NETWORK_PLUGINS.contains(&plugin),
            UnknownNetworkPluginSnafu { plugin }
        );
        ensure!(
            !(has_windows && plugin == NETWORK_PLUGIN_ANTREA),
            UnsupportedOnWindowsSnafu {
                option: "networkPlugin",
                value: plugin
            }
        );

        ensure!(
            NETWORK_POLICIES.contains(&policy),
            UnknownNetworkPolicySnafu { policy }
        );
        ensure!(
            !(has_windows
                && [
                    NETWORK_POLICY_CALICO,
                    NETWORK_POLICY_CILIUM,
                    NETWORK_POLICY_ANTREA
                ]
                .contains(&policy)),
            UnsupportedOnWindowsSnafu {
                option: "networkPolicy",
                value: policy
            }
        );

        ensure!(
            NETWORK_PLUGIN_POLICY_COMBINATIONS.contains(&(plugin, policy)),
            InvalidNetworkPolicySnafu { plugin, policy }
        );

        let mode = config.network_mode.as_str();
        if !mode.is_empty() {
            ensure!(
                plugin == NETWORK_PLUGIN_AZURE,
                NetworkModeRequiresAzureSnafu { mode }
            );
            ensure!(
                policy != NETWORK_POLICY_CALICO || mode == NETWORK_MODE_TRANSPARENT,
                NetworkModeUnsupportedByCalicoSnafu { mode }
            );
        }

        Ok(())
    }

    fn validate_container_runtime(&self, config: &KubernetesConfig) -> Result<()> {
        let runtime = config.container_runtime.as_str();

        ensure!(
            CONTAINER_RUNTIMES.contains(&runtime),
            UnknownContainerRuntimeSnafu { runtime }
        );
        ensure!(
            !(runtime == CONTAINERD && self.has_windows()),
            UnsupportedOnWindowsSnafu {
                option: "containerRuntime",
                value: runtime
            }
        );

        Ok(())
    }

    fn validate_master_profile(&self, master: &MasterProfile) -> Result<()> {
        ensure!(
            MASTER_COUNTS.contains(&master.count),
            InvalidMasterCountSnafu {
                count: master.count
            }
        );
        ensure!(
            master.image_ref.is_none() || master.distro.is_none(),
            ImageReferenceWithDistroSnafu
        );

        if (self.is_ipv6_dual_stack() || self.is_ipv6_only())
            && let Some(distro @ Distro::CoreOs) = master.distro
        {
            return Ipv6UnsupportedDistroSnafu {
                distro,
                profile: "masterProfile",
            }
            .fail();
        }

        Ok(())
    }

    fn validate_agent_pool_profiles(&self) -> Result<()> {
        let mut names = BTreeSet::new();

        for pool in &self.agent_pool_profiles {
            validate_pool(pool)?;
            ensure!(
                names.insert(pool.name.as_str()),
                DuplicatePoolNameSnafu { name: &pool.name }
            );

            if self.is_ipv6_dual_stack() || self.is_ipv6_only() {
                ensure!(
                    pool.os_type != Some(OsType::Windows),
                    Ipv6UnsupportedWindowsSnafu { name: &pool.name }
                );
                if let Some(distro @ Distro::CoreOs) = pool.distro {
                    return Ipv6UnsupportedDistroSnafu {
                        distro,
                        profile: format!("agent pool {:?}", pool.name),
                    }
                    .fail();
                }
            }
        }

        Ok(())
    }
}

fn validate_pool(pool: &AgentPoolProfile) -> Result<()> {
    ensure!(
        POOL_NAME_REGEX.is_match(&pool.name),
        InvalidPoolNameSnafu { name: &pool.name }
    );
    ensure!(
        (1..=MAX_AGENT_COUNT).contains(&pool.count),
        InvalidAgentCountSnafu {
            name: &pool.name,
            count: pool.count
        }
    );

    Ok(())
}

fn validate_load_balancer(config: &KubernetesConfig) -> Result<()> {
    let sku = config.load_balancer_sku.as_str();

    ensure!(
        sku.is_empty()
            || sku.eq_ignore_ascii_case(STANDARD_LOAD_BALANCER_SKU)
            || sku.eq_ignore_ascii_case(BASIC_LOAD_BALANCER_SKU),
        InvalidLoadBalancerSkuSnafu { sku }
    );

    if sku == STANDARD_LOAD_BALANCER_SKU {
        ensure!(
            config.exclude_master_from_standard_lb == Some(true),
            StandardLoadBalancerIncludesMasterSnafu
        );

        let minutes = config.outbound_rule_idle_timeout_in_minutes;
        ensure!(
            minutes == 0 || (4..=120).contains(&minutes),
            InvalidOutboundRuleIdleTimeoutSnafu { minutes }
        );
    }

    ensure!(
        config.maximum_load_balancer_rule_count >= 0,
        NegativeLoadBalancerRuleCountSnafu {
            count: config.maximum_load_balancer_rule_count
        }
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use indoc::formatdoc;
    use rstest::rstest;

    use super::*;

    fn properties(kubernetes_config: &str, pools: &str) -> Properties {
        let document = formatdoc!(
            r#"
                {{
                  "orchestratorProfile": {{
                    "orchestratorType": "Kubernetes",
                    "orchestratorRelease": "1.22",
                    "kubernetesConfig": {kubernetes_config}
                  }},
                  "masterProfile": {{
                    "count": 3,
                    "dnsPrefix": "mycluster",
                    "vmSize": "Standard_D2_v3"
                  }},
                  "agentPoolProfiles": {pools}
                }}
            "#
        );

        serde_json::from_str(&document).unwrap()
    }

    const LINUX_POOL: &str = r#"[{"name": "agentpool1", "count": 3, "vmSize": "Standard_D2_v3"}]"#;

    #[test]
    fn valid_document() {
        properties("{}", LINUX_POOL).validate(false).unwrap();
    }

    #[rstest]
    #[case::flannel_with_calico(
        r#"{"networkPlugin": "flannel", "networkPolicy": "calico"}"#,
        InvalidNetworkPolicySnafu { plugin: "flannel", policy: "calico" }.build()
    )]
    #[case::unknown_plugin(
        r#"{"networkPlugin": "weave"}"#,
        UnknownNetworkPluginSnafu { plugin: "weave" }.build()
    )]
    #[case::unknown_policy(
        r#"{"networkPolicy": "weave"}"#,
        UnknownNetworkPolicySnafu { policy: "weave" }.build()
    )]
    #[case::unknown_runtime(
        r#"{"containerRuntime": "kata-containers"}"#,
        UnknownContainerRuntimeSnafu { runtime: "kata-containers" }.build()
    )]
    #[case::network_mode_without_azure(
        r#"{"networkPlugin": "kubenet", "networkMode": "bridge"}"#,
        NetworkModeRequiresAzureSnafu { mode: "bridge" }.build()
    )]
    #[case::rbac_disabled(
        r#"{"enableRbac": false}"#,
        RbacRequiredSnafu { version: "1.22.16" }.build()
    )]
    #[case::standard_lb_includes_master(
        r#"{"loadBalancerSku": "Standard"}"#,
        StandardLoadBalancerIncludesMasterSnafu.build()
    )]
    #[case::lowercase_lb_sku(
        r#"{"loadBalancerSku": "premium"}"#,
        InvalidLoadBalancerSkuSnafu { sku: "premium" }.build()
    )]
    #[case::hyperkube_on_split_images(
        r#"{"customHyperkubeImage": "example.com/hyperkube:v1.22.16"}"#,
        HyperkubeImageWithSplitImagesSnafu.build()
    )]
    #[case::service_cidr_without_dns_ip(
        r#"{"serviceCidr": "10.0.0.0/16"}"#,
        IncompleteServiceNetworkSnafu.build()
    )]
    fn invalid_kubernetes_config(#[case] kubernetes_config: &str, #[case] expected: Error) {
        let error = properties(kubernetes_config, LINUX_POOL)
            .validate(false)
            .unwrap_err();
        assert_eq!(error, expected);
    }

    #[rstest]
    #[case::uppercase(r#"[{"name": "Agent", "count": 1}]"#, InvalidPoolNameSnafu { name: "Agent" }.build())]
    #[case::too_long(
        r#"[{"name": "agentpool12345", "count": 1}]"#,
        InvalidPoolNameSnafu { name: "agentpool12345" }.build()
    )]
    #[case::zero_count(
        r#"[{"name": "agent", "count": 0}]"#,
        InvalidAgentCountSnafu { name: "agent", count: 0 }.build()
    )]
    #[case::too_many(
        r#"[{"name": "agent", "count": 101}]"#,
        InvalidAgentCountSnafu { name: "agent", count: 101 }.build()
    )]
    #[case::duplicate(
        r#"[{"name": "agent", "count": 1}, {"name": "agent", "count": 2}]"#,
        DuplicatePoolNameSnafu { name: "agent" }.build()
    )]
    fn invalid_agent_pools(#[case] pools: &str, #[case] expected: Error) {
        let error = properties("{}", pools).validate(false).unwrap_err();
        assert_eq!(error, expected);
    }

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    #[case(2, false)]
    #[case(5, true)]
    fn master_count(#[case] count: i32, #[case] valid: bool) {
        let mut properties = properties("{}", LINUX_POOL);
        properties.master_profile.as_mut().unwrap().count = count;

        assert_eq!(properties.validate(false).is_ok(), valid);
    }

    #[test]
    fn unknown_orchestrator() {
        let mut properties = properties("{}", LINUX_POOL);
        properties
            .orchestrator_profile
            .as_mut()
            .unwrap()
            .orchestrator_type = "Mesos".to_owned();

        assert_eq!(
            properties.validate(false).unwrap_err(),
            UnsupportedOrchestratorSnafu {
                orchestrator_type: "Mesos"
            }
            .build()
        );
    }

    #[test]
    fn orchestrator_type_is_case_insensitive() {
        let mut properties = properties("{}", LINUX_POOL);
        properties
            .orchestrator_profile
            .as_mut()
            .unwrap()
            .orchestrator_type = "kubernetes".to_owned();

        properties.validate(false).unwrap();
    }

    #[test]
    fn unsupported_version() {
        let mut properties = properties("{}", LINUX_POOL);
        let orchestrator = properties.orchestrator_profile.as_mut().unwrap();
        orchestrator.orchestrator_release = String::new();
        orchestrator.orchestrator_version = "1.6.9".to_owned();

        assert_eq!(
            properties.validate(false).unwrap_err(),
            UnsupportedVersionSnafu {
                release: "",
                version: "1.6.9",
                has_windows: false,
            }
            .build()
        );
    }

    #[rstest]
    #[case::dual_stack_kubenet(r#"{"enableIPv6DualStack": true}"#, r#"{"networkPlugin": "kubenet"}"#, None)]
    #[case::dual_stack_azure(
        r#"{"enableIPv6DualStack": true}"#,
        r#"{"networkPlugin": "azure"}"#,
        Some(Ipv6RequiresKubenetSnafu { plugin: "azure" }.build())
    )]
    #[case::both(
        r#"{"enableIPv6DualStack": true, "enableIPv6Only": true}"#,
        r#"{"networkPlugin": "kubenet"}"#,
        Some(Ipv6ExclusiveFeaturesSnafu.build())
    )]
    fn ipv6(
        #[case] feature_flags: &str,
        #[case] kubernetes_config: &str,
        #[case] expected: Option<Error>,
    ) {
        let mut properties = properties(kubernetes_config, LINUX_POOL);
        properties.feature_flags = Some(serde_json::from_str(feature_flags).unwrap());

        assert_eq!(properties.validate(false).err(), expected);
    }

    #[test]
    fn kubernetes_config_requires_kubernetes() {
        let mut properties = properties("{}", LINUX_POOL);
        properties
            .orchestrator_profile
            .as_mut()
            .unwrap()
            .orchestrator_type = "Swarm".to_owned();

        assert_eq!(
            properties.validate(false).unwrap_err(),
            KubernetesConfigWithoutKubernetesSnafu.build()
        );
    }
}
