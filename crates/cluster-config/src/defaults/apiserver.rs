use cluster_version::is_version_ge;

use super::{
    AZURE_CLOUD_CONFIG, CA_CERTIFICATE, Flags,
    feature_gates::{add_default_feature_gates, remove_invalid_feature_gates},
    flags, force, remove,
};
use crate::{
    api::{
        Properties,
        consts::{
            DEFAULT_AUDIT_POLICY_FILE, DEFAULT_KUBERNETES_API_SERVER_ENABLE_PROFILING,
            DEFAULT_MASTER_ETCD_CLIENT_PORT, LEGACY_AUDIT_POLICY_FILE,
            POD_SECURITY_POLICY_ADDON_NAME, TLS_STRONG_CIPHER_SUITES_API_SERVER,
        },
    },
    cloud::{CloudName, CloudSpec},
};

const AUDIT_POLICY_FILE: &str = "--audit-policy-file";
const APISERVER_KEY: &str = "/etc/kubernetes/certs/apiserver.key";
const KUBELET_CLIENT_CERTIFICATES: &[&str] = &["--kubelet-client-certificate", "--kubelet-client-key"];

/// Clusters at or above this version sign service account tokens with a
/// bound issuer and no longer serve the insecure port.
const SERVICE_ACCOUNT_ISSUER_MIN_VERSION: &str = "1.20.0";

const ADMISSION_PLUGINS: &str = "NamespaceLifecycle,LimitRanger,ServiceAccount,DefaultStorageClass,\
    DefaultTolerationSeconds,ValidatingAdmissionWebhook,ResourceQuota,ExtendedResourceToleration";

impl Properties {
    fn apiserver_statics(&self) -> Flags {
        let Some(orchestrator) = &self.orchestrator_profile else {
            return Flags::new();
        };
        let Some(config) = &orchestrator.kubernetes_config else {
            return Flags::new();
        };
        let storage_backend = orchestrator.apiserver_etcd_api_version();

        let mut statics = flags([
            ("--bind-address", "0.0.0.0"),
            ("--advertise-address", "<advertiseAddr>"),
            ("--allow-privileged", "true"),
            ("--anonymous-auth", "false"),
            ("--audit-log-path", "/var/log/kubeaudit/audit.log"),
            ("--insecure-port", "8080"),
            ("--secure-port", "443"),
            ("--service-account-lookup", "true"),
            ("--etcd-certfile", "/etc/kubernetes/certs/etcdclient.crt"),
            ("--etcd-keyfile", "/etc/kubernetes/certs/etcdclient.key"),
            ("--tls-cert-file", "/etc/kubernetes/certs/apiserver.crt"),
            ("--tls-private-key-file", APISERVER_KEY),
            ("--client-ca-file", CA_CERTIFICATE),
            ("--repair-malformed-updates", "false"),
            ("--service-account-key-file", APISERVER_KEY),
            ("--kubelet-client-certificate", "/etc/kubernetes/certs/client.crt"),
            ("--kubelet-client-key", "/etc/kubernetes/certs/client.key"),
            ("--service-cluster-ip-range", config.service_cidr.as_str()),
            ("--storage-backend", storage_backend.as_str()),
            ("--enable-bootstrap-token-auth", "true"),
            ("--v", "4"),
        ]);

        if let Some(master) = &self.master_profile {
            let etcd_servers = if master.has_cosmos_etcd() {
                format!(
                    "https://{}:{DEFAULT_MASTER_ETCD_CLIENT_PORT}",
                    master.cosmos_endpoint_uri()
                )
            } else {
                statics.insert("--etcd-cafile".to_owned(), CA_CERTIFICATE.to_owned());
                format!("https://127.0.0.1:{DEFAULT_MASTER_ETCD_CLIENT_PORT}")
            };
            statics.insert("--etcd-servers".to_owned(), etcd_servers);
        }

        if config.enable_data_encryption_at_rest == Some(true)
            || config.enable_encryption_with_external_kms == Some(true)
        {
            statics.insert(
                "--encryption-provider-config".to_owned(),
                "/etc/kubernetes/encryption-config.yaml".to_owned(),
            );
        }

        if !config.uses_cloud_controller_manager() {
            statics.extend(flags([
                ("--cloud-provider", "azure"),
                ("--cloud-config", AZURE_CLOUD_CONFIG),
            ]));
        }

        if is_version_ge(&orchestrator.orchestrator_version, SERVICE_ACCOUNT_ISSUER_MIN_VERSION) {
            statics.extend(flags([
                (
                    "--service-account-issuer",
                    "https://kubernetes.default.svc.cluster.local",
                ),
                ("--service-account-signing-key-file", APISERVER_KEY),
            ]));
        }

        if self.is_ipv6_only() {
            statics.insert("--bind-address".to_owned(), "::".to_owned());
        }

        statics
    }

    fn apiserver_defaults(&self, cloud_spec: &CloudSpec) -> Flags {
        let Some(config) = self.kubernetes_config() else {
            return Flags::new();
        };
        let version = self.orchestrator_version();

        let mut defaults = flags([
            ("--audit-log-maxage", "30"),
            ("--audit-log-maxbackup", "10"),
            ("--audit-log-maxsize", "100"),
            ("--profiling", DEFAULT_KUBERNETES_API_SERVER_ENABLE_PROFILING),
            ("--tls-cipher-suites", TLS_STRONG_CIPHER_SUITES_API_SERVER),
            (AUDIT_POLICY_FILE, DEFAULT_AUDIT_POLICY_FILE),
        ]);

        if config.enable_aggregated_apis {
            defaults.extend(flags([
                (
                    "--requestheader-client-ca-file",
                    "/etc/kubernetes/certs/proxy-ca.crt",
                ),
                ("--proxy-client-cert-file", "/etc/kubernetes/certs/proxy.crt"),
                ("--proxy-client-key-file", "/etc/kubernetes/certs/proxy.key"),
                ("--requestheader-allowed-names", ""),
                ("--requestheader-extra-headers-prefix", "X-Remote-Extra-"),
                ("--requestheader-group-headers", "X-Remote-Group"),
                ("--requestheader-username-headers", "X-Remote-User"),
            ]));
        }

        if let Some(aad) = &self.aad_profile {
            let issuer_host = if cloud_spec.cloud_name == CloudName::AzureChinaCloud.as_ref() {
                "sts.chinacloudapi.cn"
            } else {
                "sts.windows.net"
            };
            defaults.extend([
                ("--oidc-username-claim".to_owned(), "oid".to_owned()),
                ("--oidc-groups-claim".to_owned(), "groups".to_owned()),
                (
                    "--oidc-client-id".to_owned(),
                    format!("spn:{}", aad.server_app_id),
                ),
                (
                    "--oidc-issuer-url".to_owned(),
                    format!("https://{issuer_host}/{}/", aad.tenant_id),
                ),
            ]);
        }

        if config.is_rbac_enabled() {
            let authorization_mode = if is_version_ge(version, "1.7.0") {
                "Node,RBAC"
            } else {
                "RBAC"
            };
            defaults.insert("--authorization-mode".to_owned(), authorization_mode.to_owned());
        }

        let mut admission_plugins = ADMISSION_PLUGINS.to_owned();
        if config.is_addon_enabled(POD_SECURITY_POLICY_ADDON_NAME) {
            admission_plugins.push_str(",PodSecurityPolicy");
        }
        defaults.insert("--enable-admission-plugins".to_owned(), admission_plugins);

        if !is_version_ge(version, "1.17.0") {
            add_default_feature_gates(
                &mut defaults,
                version,
                "1.13.0",
                "VolumeSnapshotDataSource=true",
            );
        }

        defaults
    }

    pub(super) fn set_apiserver_defaults(&mut self, cloud_spec: &CloudSpec) {
        let version = self.orchestrator_version().to_owned();
        let statics = self.apiserver_statics();
        let defaults = self.apiserver_defaults(cloud_spec);
        let Some(config) = self.kubernetes_config_mut() else {
            return;
        };
        let is_secure_kubelet_enabled = config.is_secure_kubelet_enabled();
        let apiserver = &mut config.apiserver_config;

        for (key, value) in defaults {
            match apiserver.get_mut(&key) {
                None => {
                    apiserver.insert(key, value);
                }
                // Only the exact legacy path is migrated
                Some(current)
                    if key == AUDIT_POLICY_FILE && current.as_str() == LEGACY_AUDIT_POLICY_FILE =>
                {
                    *current = value;
                }
                Some(_) => {}
            }
        }

        force(apiserver, statics);

        if !is_secure_kubelet_enabled {
            remove(apiserver, KUBELET_CLIENT_CERTIFICATES);
        }
        if is_version_ge(&version, "1.10.0") {
            remove(apiserver, &["--admission-control"]);
        }
        if is_version_ge(&version, "1.14.0-alpha.1") {
            remove(apiserver, &["--repair-malformed-updates"]);
        }
        if is_version_ge(&version, SERVICE_ACCOUNT_ISSUER_MIN_VERSION) {
            remove(apiserver, &["--insecure-port"]);
        }
        if is_version_ge(&version, "1.22.0-alpha.1") {
            remove_invalid_feature_gates(apiserver, &["VolumeSnapshotDataSource"]);
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::{
        api::{AadProfile, FeatureFlags, KubernetesAddon},
        cloud::CloudRegistry,
        defaults::{feature_gates::FEATURE_GATES, tests::kubernetes_properties},
    };

    fn public_cloud() -> &'static CloudSpec {
        CloudRegistry::builtin()
            .lookup(CloudName::AzurePublicCloud)
            .unwrap()
    }

    fn resolve(version: &str, user: Flags) -> Flags {
        let mut properties = kubernetes_properties(version);
        properties.kubernetes_config_mut().unwrap().apiserver_config = user;
        properties.set_apiserver_defaults(public_cloud());
        properties.kubernetes_config().unwrap().apiserver_config.clone()
    }

    #[rstest]
    #[case::legacy_path(LEGACY_AUDIT_POLICY_FILE, DEFAULT_AUDIT_POLICY_FILE)]
    #[case::custom_path("/etc/custom/audit.yaml", "/etc/custom/audit.yaml")]
    #[case::similar_path(
        "/etc/kubernetes/manifests/audit-policy.yml",
        "/etc/kubernetes/manifests/audit-policy.yml"
    )]
    fn audit_policy_rewrite(#[case] user: &str, #[case] expected: &str) {
        let apiserver = resolve("1.22.16", flags([(AUDIT_POLICY_FILE, user)]));
        assert_eq!(apiserver[AUDIT_POLICY_FILE], expected);
    }

    #[test]
    fn volume_snapshot_gate_before_removal() {
        let apiserver = resolve("1.19.16", Flags::new());
        assert!(!apiserver.contains_key(FEATURE_GATES));

        let apiserver = resolve(
            "1.19.16",
            flags([(FEATURE_GATES, "VolumeSnapshotDataSource=true")]),
        );
        assert_eq!(apiserver[FEATURE_GATES], "VolumeSnapshotDataSource=true");
    }

    #[test]
    fn volume_snapshot_gate_removed() {
        let apiserver = resolve(
            "1.22.0",
            flags([(FEATURE_GATES, "VolumeSnapshotDataSource=true,Foo=true")]),
        );
        assert_eq!(apiserver[FEATURE_GATES], "Foo=true");
    }

    #[test]
    fn legacy_versions_get_volume_snapshot_default() {
        let apiserver = resolve("1.16.9", Flags::new());
        assert_eq!(apiserver[FEATURE_GATES], "VolumeSnapshotDataSource=true");
        assert_eq!(apiserver["--insecure-port"], "8080");
        assert!(!apiserver.contains_key("--service-account-issuer"));
    }

    #[test]
    fn statics_win_over_user_values() {
        let apiserver = resolve(
            "1.22.16",
            flags([
                ("--secure-port", "6443"),
                ("--anonymous-auth", "true"),
                ("--profiling", "true"),
                ("--repair-malformed-updates", "true"),
                ("--admission-control", "AlwaysAdmit"),
            ]),
        );

        assert_eq!(apiserver["--secure-port"], "443");
        assert_eq!(apiserver["--anonymous-auth"], "false");
        assert_eq!(apiserver["--profiling"], "true");
        assert_eq!(apiserver["--etcd-servers"], "https://127.0.0.1:2379");
        assert_eq!(apiserver["--storage-backend"], "etcd3");
        assert_eq!(apiserver["--authorization-mode"], "Node,RBAC");
        assert_eq!(
            apiserver["--service-account-issuer"],
            "https://kubernetes.default.svc.cluster.local"
        );
        assert!(!apiserver.contains_key("--repair-malformed-updates"));
        assert!(!apiserver.contains_key("--admission-control"));
        assert!(!apiserver.contains_key("--insecure-port"));
    }

    #[test]
    fn cosmos_etcd() {
        let mut properties = kubernetes_properties("1.22.16");
        properties.master_profile.as_mut().unwrap().cosmos_etcd = Some(true);
        properties.set_apiserver_defaults(public_cloud());

        let apiserver = &properties.kubernetes_config().unwrap().apiserver_config;
        assert_eq!(
            apiserver["--etcd-servers"],
            "https://myclusterk8s.etcd.cosmosdb.azure.com:2379"
        );
        assert!(!apiserver.contains_key("--etcd-cafile"));
    }

    #[test]
    fn oidc_and_admission_plugins() {
        let mut properties = kubernetes_properties("1.22.16");
        properties.aad_profile = Some(AadProfile {
            server_app_id: "server".to_owned(),
            tenant_id: "tenant".to_owned(),
            ..Default::default()
        });
        let config = properties.kubernetes_config_mut().unwrap();
        config.addons.push(KubernetesAddon {
            name: POD_SECURITY_POLICY_ADDON_NAME.to_owned(),
            enabled: Some(true),
            ..Default::default()
        });
        config.enable_secure_kubelet = Some(false);
        config.use_cloud_controller_manager = Some(true);
        properties.set_apiserver_defaults(public_cloud());

        let apiserver = &properties.kubernetes_config().unwrap().apiserver_config;
        assert_eq!(apiserver["--oidc-client-id"], "spn:server");
        assert_eq!(apiserver["--oidc-issuer-url"], "https://sts.windows.net/tenant/");
        assert!(apiserver["--enable-admission-plugins"].ends_with(",PodSecurityPolicy"));
        assert!(!apiserver.contains_key("--kubelet-client-certificate"));
        assert!(!apiserver.contains_key("--cloud-provider"));
    }

    #[test]
    fn ipv6_only_bind_address() {
        let mut properties = kubernetes_properties("1.22.16");
        properties.feature_flags = Some(FeatureFlags {
            enable_ipv6_only: true,
            ..Default::default()
        });
        properties.set_apiserver_defaults(public_cloud());

        let apiserver = &properties.kubernetes_config().unwrap().apiserver_config;
        assert_eq!(apiserver["--bind-address"], "::");
    }
}
