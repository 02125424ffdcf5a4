use std::collections::BTreeMap;

use cluster_version::is_version_ge;

use crate::api::consts::{
    API_SERVER_COMPONENT_NAME, CONTROLLER_MANAGER_COMPONENT_NAME, SCHEDULER_COMPONENT_NAME,
};

pub const HYPERKUBE: &str = "hyperkube";
pub const KUBE_PROXY: &str = "kube-proxy";
pub const CLOUD_CONTROLLER_MANAGER: &str = "ccm";
pub const CLOUD_NODE_MANAGER: &str = "cloud-node-manager";
pub const ADDON_MANAGER: &str = "addonmanager";
pub const PAUSE: &str = "pause";

pub const PAUSE_IMAGE: &str = "pause:1.2.0";
const CLOUD_CONTROLLER_MANAGER_IMAGE: &str = "azure-cloud-controller-manager:v0.3.0";
const CLOUD_NODE_MANAGER_IMAGE: &str = "azure-cloud-node-manager:v0.3.0";

/// The first version shipping one image per control plane component instead
/// of the all-in-one hyperkube image.
pub const SPLIT_IMAGES_MIN_VERSION: &str = "1.17.0";

fn addon_manager_image(version: &str) -> &'static str {
    if is_version_ge(version, "1.14.0") {
        "kube-addon-manager-amd64:v9.0.2"
    } else {
        "kube-addon-manager-amd64:v8.9.1"
    }
}

/// Bare images (no registry) of the Kubernetes components of `version`.
pub fn kubernetes_component_images(version: &str) -> BTreeMap<String, String> {
    let mut images = BTreeMap::new();

    if is_version_ge(version, SPLIT_IMAGES_MIN_VERSION) {
        for component in [
            API_SERVER_COMPONENT_NAME,
            CONTROLLER_MANAGER_COMPONENT_NAME,
            SCHEDULER_COMPONENT_NAME,
            KUBE_PROXY,
        ] {
            images.insert(component.to_owned(), format!("{component}:v{version}"));
        }
    } else {
        images.insert(HYPERKUBE.to_owned(), format!("hyperkube-amd64:v{version}"));
    }

    images.insert(
        CLOUD_CONTROLLER_MANAGER.to_owned(),
        CLOUD_CONTROLLER_MANAGER_IMAGE.to_owned(),
    );
    images.insert(
        CLOUD_NODE_MANAGER.to_owned(),
        CLOUD_NODE_MANAGER_IMAGE.to_owned(),
    );
    images.insert(ADDON_MANAGER.to_owned(), addon_manager_image(version).to_owned());
    images.insert(PAUSE.to_owned(), PAUSE_IMAGE.to_owned());

    images
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_images() {
        let images = kubernetes_component_images("1.18.2");

        assert_eq!(images["kube-apiserver"], "kube-apiserver:v1.18.2");
        assert_eq!(images["kube-proxy"], "kube-proxy:v1.18.2");
        assert!(!images.contains_key(HYPERKUBE));
    }

    #[test]
    fn hyperkube_image() {
        let images = kubernetes_component_images("1.16.9");

        assert_eq!(images[HYPERKUBE], "hyperkube-amd64:v1.16.9");
        assert!(!images.contains_key("kube-apiserver"));
        assert_eq!(images[ADDON_MANAGER], "kube-addon-manager-amd64:v9.0.2");
        assert_eq!(images[PAUSE], PAUSE_IMAGE);
    }
}
