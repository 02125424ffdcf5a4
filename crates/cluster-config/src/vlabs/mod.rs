//! The `vlabs` version of the cluster definition wire format.
//!
//! These types mirror the JSON users write. They are never defaulted in
//! place; [`crate::convert`] maps them to and from the canonical model.
use cluster_version::Platform;

use crate::api::OsType;

mod types;
mod validate;

pub use types::*;
pub use validate::Error as ValidationError;

/// The `apiVersion` tag of this wire format.
pub const API_VERSION: &str = "vlabs";

impl Properties {
    pub fn has_windows(&self) -> bool {
        self.agent_pool_profiles
            .iter()
            .any(|pool| pool.os_type == Some(OsType::Windows))
    }

    /// Azure Stack is the only custom cloud this format can describe.
    pub fn is_azure_stack_cloud(&self) -> bool {
        self.custom_cloud_profile.is_some()
    }

    /// The version table this document selects.
    pub fn platform(&self) -> Platform {
        Platform {
            has_windows: self.has_windows(),
            is_azure_stack: self.is_azure_stack_cloud(),
        }
    }

    pub fn is_ipv6_dual_stack(&self) -> bool {
        self.feature_flags
            .as_ref()
            .is_some_and(|flags| flags.enable_ipv6_dual_stack)
    }

    pub fn is_ipv6_only(&self) -> bool {
        self.feature_flags
            .as_ref()
            .is_some_and(|flags| flags.enable_ipv6_only)
    }

    pub fn kubernetes_config(&self) -> Option<&KubernetesConfig> {
        self.orchestrator_profile
            .as_ref()
            .and_then(|profile| profile.kubernetes_config.as_ref())
    }
}

impl KubernetesConfig {
    /// RBAC is on unless explicitly disabled.
    pub fn is_rbac_enabled(&self) -> bool {
        self.enable_rbac.unwrap_or(true)
    }

    pub fn is_addon_enabled(&self, name: &str) -> bool {
        self.addons
            .iter()
            .any(|addon| addon.name == name && addon.enabled == Some(true))
    }

    fn uses_custom_kube_component(&self) -> bool {
        !(self.custom_kube_api_server_image.is_empty()
            && self.custom_kube_controller_manager_image.is_empty()
            && self.custom_kube_proxy_image.is_empty()
            && self.custom_kube_scheduler_image.is_empty()
            && self.custom_kube_binary_url.is_empty())
    }
}
