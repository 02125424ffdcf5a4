use cluster_version::is_version_ge;

use super::{
    AZURE_CLOUD_CONFIG, Flags, KUBECONFIG, bool_flag, dual_stack_cluster_cidr, flags, force,
    set_missing,
};
use crate::api::{
    Properties,
    consts::{
        DEFAULT_KUBERNETES_CLOUD_PROVIDER_ROUTE_RECONCILIATION_PERIOD,
        DEFAULT_KUBERNETES_CTRL_MGR_ROUTE_RECONCILIATION_PERIOD,
    },
};

impl Properties {
    fn cloud_controller_manager_statics(&self) -> Flags {
        let Some(config) = self.kubernetes_config() else {
            return Flags::new();
        };
        let is_dual_stack = self.is_azure_cni_dual_stack();

        let mut statics = flags([
            (
                "--allocate-node-cidrs",
                bool_flag(!self.is_azure_cni() || is_dual_stack),
            ),
            (
                "--configure-cloud-routes",
                bool_flag(self.require_route_table()),
            ),
            ("--cloud-provider", "azure"),
            ("--cloud-config", AZURE_CLOUD_CONFIG),
            (
                "--cluster-cidr",
                dual_stack_cluster_cidr(&config.cluster_subnet, is_dual_stack),
            ),
            ("--kubeconfig", KUBECONFIG),
            ("--leader-elect", "true"),
            (
                "--route-reconciliation-period",
                DEFAULT_KUBERNETES_CLOUD_PROVIDER_ROUTE_RECONCILIATION_PERIOD,
            ),
            ("--v", "2"),
        ]);

        if is_version_ge(self.orchestrator_version(), "1.16.0") {
            statics.insert("--controllers".to_owned(), "*,-cloud-node".to_owned());
        }
        if let Some(master) = &self.master_profile {
            statics.insert("--cluster-name".to_owned(), master.dns_prefix.clone());
        }

        statics
    }

    pub(super) fn set_cloud_controller_manager_defaults(&mut self) {
        let statics = self.cloud_controller_manager_statics();
        let Some(config) = self.kubernetes_config_mut() else {
            return;
        };
        let ccm = &mut config.cloud_controller_manager_config;

        set_missing(
            ccm,
            flags([(
                "--route-reconciliation-period",
                DEFAULT_KUBERNETES_CTRL_MGR_ROUTE_RECONCILIATION_PERIOD,
            )]),
        );
        force(ccm, statics);
    }
}
