use cluster_version::is_version_ge;
use tracing::debug;

use super::{
    AZURE_CLOUD_CONFIG, CA_CERTIFICATE, DefaultsParams, Flags, KUBECONFIG,
    feature_gates::{FEATURE_GATES, add_default_feature_gates},
    flags, force, remove, set_missing,
};
use crate::api::{
    KubernetesConfig, Properties,
    consts::{
        DEFAULT_AZURE_STACK_KUBELET_NODE_STATUS_UPDATE_FREQUENCY, DEFAULT_KUBELET_CADVISOR_PORT,
        DEFAULT_KUBELET_EVENT_QPS, DEFAULT_KUBELET_NODE_STATUS_UPDATE_FREQUENCY,
        DEFAULT_KUBELET_POD_MAX_PIDS, DEFAULT_KUBERNETES_CLUSTER_DOMAIN,
        DEFAULT_KUBERNETES_GC_HIGH_THRESHOLD, DEFAULT_KUBERNETES_GC_LOW_THRESHOLD,
        DEFAULT_KUBERNETES_HARD_EVICTION_THRESHOLD, DEFAULT_KUBERNETES_MAX_PODS,
        DEFAULT_KUBERNETES_MAX_PODS_VNET_INTEGRATED, DEFAULT_NON_MASQUERADE_CIDR,
        MASTER_NODE_TAINT, NETWORK_PLUGIN_AZURE, NETWORK_PLUGIN_KUBENET, NETWORK_POLICY_CALICO,
        TLS_STRONG_CIPHER_SUITES_KUBELET,
    },
    k8s_components::PAUSE_IMAGE,
};

const POD_MAX_PIDS: &str = "--pod-max-pids";
const REGISTER_WITH_TAINTS: &str = "--register-with-taints";
const PROTECT_KERNEL_DEFAULTS: &str = "--protect-kernel-defaults";
const RESOLV_CONF: &str = "--resolv-conf";
const SYSTEMD_RESOLV_CONF: &str = "/run/systemd/resolve/resolv.conf";

const ROTATE_CERTIFICATES_MIN_VERSION: &str = "1.11.9";
const POD_PIDS_LIMIT_MIN_VERSION: &str = "1.14.0";

const AAD_POD_IDENTITY_ADDON_NAME: &str = "aad-pod-identity";
const AAD_POD_IDENTITY_TAINT: &str = "kubernetes.azure.com/aad-pod-identity=true:NoSchedule";

/// Windows nodes read an empty quoted string as "unset".
const WINDOWS_EMPTY: &str = r#""""""#;

fn linux_statics(config: &KubernetesConfig) -> Flags {
    let mut statics = flags([
        ("--address", "0.0.0.0"),
        ("--allow-privileged", "true"),
        ("--anonymous-auth", "false"),
        ("--authorization-mode", "Webhook"),
        ("--client-ca-file", CA_CERTIFICATE),
        ("--pod-manifest-path", "/etc/kubernetes/manifests"),
        ("--cluster-dns", config.dns_service_ip.as_str()),
        ("--cgroups-per-qos", "true"),
        ("--kubeconfig", KUBECONFIG),
        ("--keep-terminated-pod-volumes", "false"),
        ("--tls-cert-file", "/etc/kubernetes/certs/kubeletserver.crt"),
        ("--tls-private-key-file", "/etc/kubernetes/certs/kubeletserver.key"),
        ("--v", "2"),
        ("--volume-plugin-dir", "/etc/kubernetes/volumeplugins"),
    ]);

    if !config.is_secure_kubelet_enabled() {
        remove(&mut statics, &["--anonymous-auth", "--client-ca-file"]);
    }

    statics
}

/// Derived from the Linux statics, with host paths blanked out or moved
/// below `c:\k`.
fn windows_statics(linux: &Flags) -> Flags {
    let mut statics = linux.clone();
    for key in ["--pod-manifest-path", "--tls-cert-file", "--tls-private-key-file"] {
        statics.insert(key.to_owned(), String::new());
    }
    if let Some(client_ca) = statics.get_mut("--client-ca-file") {
        r"c:\k\ca.crt".clone_into(client_ca);
    }

    force(
        &mut statics,
        flags([
            ("--azure-container-registry-config", r"c:\k\azure.json"),
            ("--pod-infra-container-image", "kubletwin/pause"),
            ("--kubeconfig", r"c:\k\config"),
            ("--cloud-config", r"c:\k\azure.json"),
            ("--cgroups-per-qos", "false"),
            ("--enforce-node-allocatable", WINDOWS_EMPTY),
            ("--system-reserved", "memory=2Gi"),
            ("--hairpin-mode", "promiscuous-bridge"),
            ("--image-pull-progress-deadline", "20m"),
            ("--resolv-conf", WINDOWS_EMPTY),
            ("--eviction-hard", WINDOWS_EMPTY),
        ]),
    );

    statics
}

fn cluster_defaults(
    config: &KubernetesConfig,
    version: &str,
    is_azure_stack: bool,
    is_ip_masq_agent_disabled: bool,
) -> Flags {
    let pause_image = format!("{}{PAUSE_IMAGE}", config.mcr_kubernetes_image_base);
    let node_status_update_frequency = if is_azure_stack {
        DEFAULT_AZURE_STACK_KUBELET_NODE_STATUS_UPDATE_FREQUENCY
    } else {
        DEFAULT_KUBELET_NODE_STATUS_UPDATE_FREQUENCY
    };
    let max_pods = if config.is_network_plugin(NETWORK_PLUGIN_AZURE) {
        DEFAULT_KUBERNETES_MAX_PODS_VNET_INTEGRATED
    } else {
        DEFAULT_KUBERNETES_MAX_PODS
    }
    .to_string();
    let non_masquerade_cidr = if is_ip_masq_agent_disabled {
        config.cluster_subnet.as_str()
    } else {
        DEFAULT_NON_MASQUERADE_CIDR
    };
    let gc_high_threshold = DEFAULT_KUBERNETES_GC_HIGH_THRESHOLD.to_string();
    let gc_low_threshold = DEFAULT_KUBERNETES_GC_LOW_THRESHOLD.to_string();
    let pod_max_pids = DEFAULT_KUBELET_POD_MAX_PIDS.to_string();

    let mut defaults = flags([
        ("--cluster-domain", DEFAULT_KUBERNETES_CLUSTER_DOMAIN),
        ("--network-plugin", "cni"),
        ("--pod-infra-container-image", pause_image.as_str()),
        ("--max-pods", max_pods.as_str()),
        ("--eviction-hard", DEFAULT_KUBERNETES_HARD_EVICTION_THRESHOLD),
        ("--node-status-update-frequency", node_status_update_frequency),
        ("--image-gc-high-threshold", gc_high_threshold.as_str()),
        ("--image-gc-low-threshold", gc_low_threshold.as_str()),
        ("--non-masquerade-cidr", non_masquerade_cidr),
        ("--cloud-provider", "azure"),
        ("--cloud-config", AZURE_CLOUD_CONFIG),
        ("--azure-container-registry-config", AZURE_CLOUD_CONFIG),
        ("--event-qps", DEFAULT_KUBELET_EVENT_QPS),
        ("--cadvisor-port", DEFAULT_KUBELET_CADVISOR_PORT),
        (POD_MAX_PIDS, pod_max_pids.as_str()),
        ("--image-pull-progress-deadline", "30m"),
        ("--enforce-node-allocatable", "pods"),
        ("--streaming-connection-idle-timeout", "4h"),
        ("--tls-cipher-suites", TLS_STRONG_CIPHER_SUITES_KUBELET),
    ]);

    if is_version_ge(version, ROTATE_CERTIFICATES_MIN_VERSION) {
        defaults.insert("--rotate-certificates".to_owned(), "true".to_owned());
    }

    if is_version_ge(version, "1.16.0") {
        defaults.extend(flags([
            ("--authentication-token-webhook", "true"),
            ("--read-only-port", "0"),
        ]));
    }

    if config.needs_containerd() {
        defaults.extend(flags([
            ("--container-runtime", "remote"),
            ("--runtime-request-timeout", "15m"),
            (
                "--container-runtime-endpoint",
                "unix:///run/containerd/containerd.sock",
            ),
        ]));
    }

    defaults
}

/// Upgraded clusters only keep a PID limit they explicitly opted into.
fn limit_pod_max_pids(kubelet: &mut Flags, version: &str, params: DefaultsParams) {
    if !params.is_upgrade || !is_version_ge(version, POD_PIDS_LIMIT_MIN_VERSION) {
        return;
    }

    let opted_in = kubelet
        .get(FEATURE_GATES)
        .is_some_and(|gates| gates.contains("SupportPodPidsLimit=true"));
    let limit = kubelet
        .get(POD_MAX_PIDS)
        .and_then(|value| value.parse::<i64>().ok());

    if !opted_in || limit.is_none_or(|limit| limit <= 0) {
        kubelet.insert(POD_MAX_PIDS.to_owned(), DEFAULT_KUBELET_POD_MAX_PIDS.to_string());
    }
}

fn remove_unsupported(kubelet: &mut Flags, version: &str) {
    if !is_version_ge(version, "1.10.0") {
        remove(kubelet, &[POD_MAX_PIDS]);
    }
    if is_version_ge(version, "1.12.0") {
        remove(kubelet, &["--cadvisor-port"]);
    }
    if is_version_ge(version, "1.15.0-beta.1") {
        remove(kubelet, &["--allow-privileged"]);
    }
}

/// Rules shared by the master and every agent pool, applied once the node
/// map is complete.
fn finish_node_kubelet(
    kubelet: &mut Flags,
    version: &str,
    params: DefaultsParams,
    is_vhd: bool,
    is_ubuntu_1804: bool,
) {
    limit_pod_max_pids(kubelet, version, params);

    if is_vhd {
        kubelet
            .entry(PROTECT_KERNEL_DEFAULTS.to_owned())
            .or_insert_with(|| "true".to_owned());
    }
    if is_ubuntu_1804 {
        kubelet.insert(RESOLV_CONF.to_owned(), SYSTEMD_RESOLV_CONF.to_owned());
    }

    remove_unsupported(kubelet, version);
}

fn add_taint(kubelet: &mut Flags, taint: &str) {
    match kubelet.get_mut(REGISTER_WITH_TAINTS) {
        Some(taints) if taints.contains(taint) => {}
        Some(taints) => {
            taints.push(',');
            taints.push_str(taint);
        }
        None => {
            kubelet.insert(REGISTER_WITH_TAINTS.to_owned(), taint.to_owned());
        }
    }
}

impl Properties {
    /// Resolves the cluster wide kubelet flags first and derives the master
    /// and agent pool maps from them.
    pub(super) fn set_kubelet_defaults(&mut self, params: DefaultsParams) {
        let version = self.orchestrator_version().to_owned();
        let is_azure_stack = self.is_azure_stack_cloud();
        let is_ip_masq_agent_disabled = self.is_ip_masq_agent_disabled();
        let any_agent_is_linux = self.any_agent_is_linux();
        let Some(config) = self.kubernetes_config_mut() else {
            return;
        };

        let mut linux = linux_statics(config);
        let windows = windows_statics(&linux);
        let defaults = cluster_defaults(config, &version, is_azure_stack, is_ip_masq_agent_disabled);
        let uses_ccm = config.uses_cloud_controller_manager();
        let is_kubenet = config.is_network_plugin(NETWORK_PLUGIN_KUBENET)
            && !config.is_network_policy(NETWORK_POLICY_CALICO);
        let has_pod_identity = config.is_addon_enabled(AAD_POD_IDENTITY_ADDON_NAME);

        let kubelet = &mut config.kubelet_config;
        set_missing(kubelet, defaults);
        add_default_feature_gates(
            kubelet,
            &version,
            ROTATE_CERTIFICATES_MIN_VERSION,
            "RotateKubeletServerCertificate=true",
        );

        if uses_ccm {
            linux.insert("--cloud-provider".to_owned(), "external".to_owned());
        }
        if is_kubenet {
            kubelet.insert("--network-plugin".to_owned(), NETWORK_PLUGIN_KUBENET.to_owned());
        }

        force(kubelet, linux.clone());
        limit_pod_max_pids(kubelet, &version, params);
        remove_unsupported(kubelet, &version);
        let cluster = kubelet.clone();

        if let Some(master) = self.master_profile.as_mut() {
            let (is_vhd, is_ubuntu_1804) = (master.is_vhd_distro(), master.is_ubuntu_1804());
            let kubelet = &mut master
                .kubernetes_config
                .get_or_insert_with(KubernetesConfig::default)
                .kubelet_config;

            set_missing(kubelet, cluster.clone());
            add_default_feature_gates(kubelet, &version, "", "");
            finish_node_kubelet(kubelet, &version, params, is_vhd, is_ubuntu_1804);

            if any_agent_is_linux {
                add_taint(kubelet, MASTER_NODE_TAINT);
            }
        }

        for pool in &mut self.agent_pool_profiles {
            let (is_windows, is_vhd, is_ubuntu_1804) =
                (pool.is_windows(), pool.is_vhd_distro(), pool.is_ubuntu_1804());
            let kubelet = &mut pool
                .kubernetes_config
                .get_or_insert_with(KubernetesConfig::default)
                .kubelet_config;

            force(kubelet, if is_windows { windows.clone() } else { linux.clone() });
            set_missing(kubelet, cluster.clone());
            finish_node_kubelet(kubelet, &version, params, is_vhd, is_ubuntu_1804);

            if has_pod_identity && !is_windows {
                add_taint(kubelet, AAD_POD_IDENTITY_TAINT);
            }
            debug!(pool = %pool.name, flags = kubelet.len(), "resolved kubelet flags");
        }
    }
}
