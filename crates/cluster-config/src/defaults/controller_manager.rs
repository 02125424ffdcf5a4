use cluster_version::is_version_ge;

use super::{
    AZURE_CLOUD_CONFIG, CA_CERTIFICATE, Flags, KUBECONFIG, bool_flag, dual_stack_cluster_cidr,
    feature_gates::{add_default_feature_gates, remove_invalid_feature_gates},
    flags, force, set_missing,
};
use crate::api::{
    Properties,
    consts::{
        DEFAULT_AZURE_STACK_CTRL_MGR_NODE_MONITOR_GRACE_PERIOD,
        DEFAULT_AZURE_STACK_CTRL_MGR_POD_EVICTION_TIMEOUT,
        DEFAULT_AZURE_STACK_CTRL_MGR_ROUTE_RECONCILIATION_PERIOD,
        DEFAULT_KUBERNETES_CTR_MGR_ENABLE_PROFILING,
        DEFAULT_KUBERNETES_CTRL_MGR_NODE_MONITOR_GRACE_PERIOD,
        DEFAULT_KUBERNETES_CTRL_MGR_POD_EVICTION_TIMEOUT,
        DEFAULT_KUBERNETES_CTRL_MGR_ROUTE_RECONCILIATION_PERIOD,
        DEFAULT_KUBERNETES_CTRL_MGR_TERMINATED_POD_GC_THRESHOLD,
        DEFAULT_KUBERNETES_CTRL_MGR_USE_SVC_ACCOUNT_CREDS,
    },
};

const USE_SERVICE_ACCOUNT_CREDENTIALS: &str = "--use-service-account-credentials";

impl Properties {
    fn controller_manager_statics(&self) -> Flags {
        let Some(config) = self.kubernetes_config() else {
            return Flags::new();
        };
        let is_dual_stack = self.is_azure_cni_dual_stack();

        let mut statics = flags([
            ("--kubeconfig", KUBECONFIG),
            (
                "--allocate-node-cidrs",
                bool_flag(!self.is_azure_cni() || is_dual_stack),
            ),
            (
                "--configure-cloud-routes",
                bool_flag(self.require_route_table()),
            ),
            (
                "--cluster-cidr",
                dual_stack_cluster_cidr(&config.cluster_subnet, is_dual_stack),
            ),
            ("--root-ca-file", CA_CERTIFICATE),
            ("--cluster-signing-cert-file", CA_CERTIFICATE),
            ("--cluster-signing-key-file", "/etc/kubernetes/certs/ca.key"),
            (
                "--service-account-private-key-file",
                "/etc/kubernetes/certs/apiserver.key",
            ),
            ("--leader-elect", "true"),
            ("--v", "2"),
            ("--controllers", "*,bootstrapsigner,tokencleaner"),
        ]);

        if let Some(master) = &self.master_profile {
            statics.insert("--cluster-name".to_owned(), master.dns_prefix.clone());
        }

        if config.uses_cloud_controller_manager() {
            statics.insert("--cloud-provider".to_owned(), "external".to_owned());
        } else {
            statics.extend(flags([
                ("--cloud-provider", "azure"),
                ("--cloud-config", AZURE_CLOUD_CONFIG),
            ]));
        }

        statics
    }

    fn controller_manager_defaults(&self) -> Flags {
        let (node_monitor_grace_period, pod_eviction_timeout, route_reconciliation_period) =
            if self.is_azure_stack_cloud() {
                (
                    DEFAULT_AZURE_STACK_CTRL_MGR_NODE_MONITOR_GRACE_PERIOD,
                    DEFAULT_AZURE_STACK_CTRL_MGR_POD_EVICTION_TIMEOUT,
                    DEFAULT_AZURE_STACK_CTRL_MGR_ROUTE_RECONCILIATION_PERIOD,
                )
            } else {
                (
                    DEFAULT_KUBERNETES_CTRL_MGR_NODE_MONITOR_GRACE_PERIOD,
                    DEFAULT_KUBERNETES_CTRL_MGR_POD_EVICTION_TIMEOUT,
                    DEFAULT_KUBERNETES_CTRL_MGR_ROUTE_RECONCILIATION_PERIOD,
                )
            };

        flags([
            ("--node-monitor-grace-period", node_monitor_grace_period),
            ("--pod-eviction-timeout", pod_eviction_timeout),
            ("--route-reconciliation-period", route_reconciliation_period),
            (
                "--terminated-pod-gc-threshold",
                DEFAULT_KUBERNETES_CTRL_MGR_TERMINATED_POD_GC_THRESHOLD,
            ),
            (
                USE_SERVICE_ACCOUNT_CREDENTIALS,
                DEFAULT_KUBERNETES_CTRL_MGR_USE_SVC_ACCOUNT_CREDS,
            ),
            ("--profiling", DEFAULT_KUBERNETES_CTR_MGR_ENABLE_PROFILING),
        ])
    }

    pub(super) fn set_controller_manager_defaults(&mut self) {
        let version = self.orchestrator_version().to_owned();
        let statics = self.controller_manager_statics();
        let defaults = self.controller_manager_defaults();
        let Some(config) = self.kubernetes_config_mut() else {
            return;
        };
        let is_rbac_enabled = config.is_rbac_enabled();
        let controller_manager = &mut config.controller_manager_config;

        set_missing(controller_manager, defaults);

        if !is_version_ge(&version, "1.19.0") {
            add_default_feature_gates(
                controller_manager,
                &version,
                "1.9.0",
                "ServiceNodeExclusion=true",
            );
        }
        add_default_feature_gates(
            controller_manager,
            &version,
            "1.10.0",
            "LocalStorageCapacityIsolation=true",
        );
        add_default_feature_gates(
            controller_manager,
            &version,
            "1.24.0",
            "LegacyServiceAccountTokenNoAutoGeneration=false",
        );

        force(controller_manager, statics);

        if is_rbac_enabled {
            controller_manager.insert(
                USE_SERVICE_ACCOUNT_CREDENTIALS.to_owned(),
                "true".to_owned(),
            );
        }

        if is_version_ge(&version, "1.22.0-alpha.1") {
            remove_invalid_feature_gates(controller_manager, &["VolumeSnapshotDataSource"]);
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::{
        api::{CustomCloudProfile, FeatureFlags},
        defaults::{feature_gates::FEATURE_GATES, tests::kubernetes_properties},
    };

    fn controller_manager(properties: &Properties) -> &Flags {
        &properties
            .kubernetes_config()
            .unwrap()
            .controller_manager_config
    }

    #[rstest]
    #[case::public_cloud(false, "40s", "5m0s")]
    #[case::azure_stack(true, "5m", "5m")]
    fn cloud_dependent_timings(
        #[case] azure_stack: bool,
        #[case] grace_period: &str,
        #[case] eviction_timeout: &str,
    ) {
        let mut properties = kubernetes_properties("1.22.16");
        if azure_stack {
            properties.custom_cloud_profile = Some(CustomCloudProfile::default());
        }
        properties.set_controller_manager_defaults();

        let config = controller_manager(&properties);
        assert_eq!(config["--node-monitor-grace-period"], grace_period);
        assert_eq!(config["--pod-eviction-timeout"], eviction_timeout);
    }

    #[rstest]
    #[case::v1_18("1.18.2", "LocalStorageCapacityIsolation=true,ServiceNodeExclusion=true")]
    #[case::v1_22("1.22.16", "LocalStorageCapacityIsolation=true")]
    #[case::v1_24(
        "1.24.8",
        "LegacyServiceAccountTokenNoAutoGeneration=false,LocalStorageCapacityIsolation=true"
    )]
    fn default_feature_gates(#[case] version: &str, #[case] expected: &str) {
        let mut properties = kubernetes_properties(version);
        properties.set_controller_manager_defaults();

        assert_eq!(controller_manager(&properties)[FEATURE_GATES], expected);
    }

    #[test]
    fn statics_and_rbac_win() {
        let mut properties = kubernetes_properties("1.22.16");
        let config = properties.kubernetes_config_mut().unwrap();
        config.controller_manager_config = flags([
            ("--leader-elect", "false"),
            (USE_SERVICE_ACCOUNT_CREDENTIALS, "false"),
            ("--profiling", "true"),
            (FEATURE_GATES, "VolumeSnapshotDataSource=true"),
        ]);
        properties.set_controller_manager_defaults();

        let config = controller_manager(&properties);
        assert_eq!(config["--leader-elect"], "true");
        assert_eq!(config[USE_SERVICE_ACCOUNT_CREDENTIALS], "true");
        assert_eq!(config["--profiling"], "true");
        assert_eq!(config["--cluster-name"], "mycluster");
        assert_eq!(config["--cloud-config"], AZURE_CLOUD_CONFIG);
        assert_eq!(config[FEATURE_GATES], "LocalStorageCapacityIsolation=true");
    }

    #[test]
    fn azure_cni_dual_stack() {
        let mut properties = kubernetes_properties("1.22.16");
        properties.feature_flags = Some(FeatureFlags {
            enable_ipv6_dual_stack: true,
            ..Default::default()
        });
        "10.240.0.0/12,fc00::/48".clone_into(
            &mut properties.kubernetes_config_mut().unwrap().cluster_subnet,
        );
        properties.set_controller_manager_defaults();

        let config = controller_manager(&properties);
        assert_eq!(config["--cluster-cidr"], "fc00::/48");
        assert_eq!(config["--allocate-node-cidrs"], "true");
    }

    #[test]
    fn external_cloud_provider() {
        let mut properties = kubernetes_properties("1.22.16");
        properties
            .kubernetes_config_mut()
            .unwrap()
            .use_cloud_controller_manager = Some(true);
        properties.set_controller_manager_defaults();

        let config = controller_manager(&properties);
        assert_eq!(config["--cloud-provider"], "external");
        assert!(!config.contains_key("--cloud-config"));
    }
}
