//! Synthesizes the control plane component list.
//!
//! Every known component is appended when missing and then completed from
//! its computed default. User provided containers and config entries are
//! kept, empty values are filled. Upgrades always refresh container images
//! and commands so the cluster follows its new version.
use std::collections::BTreeMap;

use cluster_version::is_version_ge;
use tracing::warn;

use super::DefaultsParams;
use crate::{
    api::{
        KubernetesComponent, KubernetesContainerSpec, Properties,
        consts::{
            ADDON_MANAGER_COMPONENT_NAME, API_SERVER_COMPONENT_NAME, AZURE_STACK_SUFFIX,
            CLOUD_CONTROLLER_MANAGER_COMPONENT_NAME, CONTROLLER_MANAGER_COMPONENT_NAME,
            SCHEDULER_COMPONENT_NAME,
        },
        k8s_components::{
            ADDON_MANAGER, CLOUD_CONTROLLER_MANAGER, HYPERKUBE, SPLIT_IMAGES_MIN_VERSION,
            kubernetes_component_images,
        },
    },
    cloud::CloudSpec,
    image::resolve_image,
};

const COMMAND: &str = "command";

fn command(version: &str, binary: &str) -> String {
    if is_version_ge(version, SPLIT_IMAGES_MIN_VERSION) {
        format!("\"{binary}\"")
    } else {
        format!("\"/hyperkube\", \"{binary}\"")
    }
}

fn default_component(
    name: &str,
    enabled: bool,
    image: String,
    command: Option<String>,
) -> KubernetesComponent {
    KubernetesComponent {
        name: name.to_owned(),
        enabled: Some(enabled),
        containers: vec![KubernetesContainerSpec {
            name: name.to_owned(),
            image,
            ..Default::default()
        }],
        config: command
            .map(|command| BTreeMap::from([(COMMAND.to_owned(), command)]))
            .unwrap_or_default(),
        ..Default::default()
    }
}

fn fill(value: &mut String, default: &str) {
    if value.is_empty() {
        default.clone_into(value);
    }
}

fn assign_defaults(
    component: &mut KubernetesComponent,
    default: &KubernetesComponent,
    is_upgrade: bool,
) {
    fill(&mut component.name, &default.name);
    if component.enabled.is_none() {
        component.enabled = default.enabled;
    }

    if !component.is_enabled() {
        *component = KubernetesComponent {
            name: std::mem::take(&mut component.name),
            enabled: component.enabled,
            ..Default::default()
        };
        return;
    }
    if !component.data.is_empty() {
        *component = KubernetesComponent {
            name: std::mem::take(&mut component.name),
            enabled: component.enabled,
            data: std::mem::take(&mut component.data),
            ..Default::default()
        };
        return;
    }

    for default_container in &default.containers {
        match component
            .containers
            .iter_mut()
            .find(|container| container.name == default_container.name)
        {
            None => component.containers.push(default_container.clone()),
            Some(container) => {
                if container.image.is_empty() || is_upgrade {
                    container.image.clone_from(&default_container.image);
                }
                fill(&mut container.cpu_requests, &default_container.cpu_requests);
                fill(&mut container.memory_requests, &default_container.memory_requests);
                fill(&mut container.cpu_limits, &default_container.cpu_limits);
                fill(&mut container.memory_limits, &default_container.memory_limits);
            }
        }
    }

    for (key, value) in &default.config {
        let current = component.config.entry(key.clone()).or_default();
        if current.is_empty() || (is_upgrade && key == COMMAND) {
            current.clone_from(value);
        }
    }
}

impl Properties {
    /// The default of every known component, in the order they are
    /// appended to the cluster.
    fn default_components(&self, cloud_spec: &CloudSpec) -> Vec<KubernetesComponent> {
        let Some(config) = self.kubernetes_config() else {
            return Vec::new();
        };
        let version = self.orchestrator_version();
        let images = kubernetes_component_images(version);
        let suffix = if self.is_azure_stack_cloud() {
            AZURE_STACK_SUFFIX
        } else {
            ""
        };
        let base = if config.kubernetes_image_base.is_empty() {
            cloud_spec.kubernetes_spec_config.mcr_kubernetes_image_base.as_str()
        } else {
            config.kubernetes_image_base.as_str()
        };
        let ccm_base = if is_version_ge(version, "1.16.0") {
            config.mcr_kubernetes_image_base.as_str()
        } else {
            base
        };

        let image = |base: &str, key: &str, suffix: &str| {
            let bare = format!("{}{suffix}", images.get(key).map_or("", String::as_str));
            resolve_image(base, &bare, &config.image_repo_overrides).unwrap_or_else(|error| {
                warn!(%error, component = key, "using the unresolved component image");
                format!("{base}{bare}")
            })
        };
        let control_plane_image = |name: &str| {
            if is_version_ge(version, SPLIT_IMAGES_MIN_VERSION) {
                image(base, name, suffix)
            } else {
                image(base, HYPERKUBE, suffix)
            }
        };
        let control_plane = |name: &str| {
            default_component(
                name,
                true,
                control_plane_image(name),
                Some(command(version, name)),
            )
        };

        vec![
            control_plane(SCHEDULER_COMPONENT_NAME),
            control_plane(CONTROLLER_MANAGER_COMPONENT_NAME),
            default_component(
                CLOUD_CONTROLLER_MANAGER_COMPONENT_NAME,
                config.uses_cloud_controller_manager(),
                image(ccm_base, CLOUD_CONTROLLER_MANAGER, suffix),
                Some(format!("\"{CLOUD_CONTROLLER_MANAGER_COMPONENT_NAME}\"")),
            ),
            control_plane(API_SERVER_COMPONENT_NAME),
            default_component(
                ADDON_MANAGER_COMPONENT_NAME,
                true,
                image(base, ADDON_MANAGER, ""),
                None,
            ),
        ]
    }

    /// User supplied images of the control plane components. Before split
    /// images every component runs from the hyperkube image.
    fn custom_component_images(&self) -> Vec<(&'static str, String)> {
        let Some(config) = self.kubernetes_config() else {
            return Vec::new();
        };
        let split = is_version_ge(self.orchestrator_version(), SPLIT_IMAGES_MIN_VERSION);
        let pick = |custom: &str| {
            if split {
                custom.to_owned()
            } else {
                config.custom_hyperkube_image.clone()
            }
        };

        vec![
            (
                API_SERVER_COMPONENT_NAME,
                pick(&config.custom_kube_api_server_image),
            ),
            (
                CONTROLLER_MANAGER_COMPONENT_NAME,
                pick(&config.custom_kube_controller_manager_image),
            ),
            (
                SCHEDULER_COMPONENT_NAME,
                pick(&config.custom_kube_scheduler_image),
            ),
            (
                CLOUD_CONTROLLER_MANAGER_COMPONENT_NAME,
                config.custom_ccm_image.clone(),
            ),
        ]
    }

    pub(super) fn set_components_defaults(&mut self, cloud_spec: &CloudSpec, params: DefaultsParams) {
        let defaults = self.default_components(cloud_spec);
        let custom_images = self.custom_component_images();
        let Some(config) = self.kubernetes_config_mut() else {
            return;
        };
        let components = &mut config.components;

        for default in &defaults {
            if !components.iter().any(|c| c.name == default.name) {
                components.push(default.clone());
            }
        }

        for default in &defaults {
            if let Some(component) = components.iter_mut().find(|c| c.name == default.name) {
                assign_defaults(component, default, params.is_upgrade);
            }
        }

        for (name, image) in custom_images {
            if image.is_empty() {
                continue;
            }
            if let Some(container) = components
                .iter_mut()
                .find(|c| c.name == name && c.is_enabled())
                .and_then(|c| c.containers.first_mut())
            {
                container.image = image;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::{
        api::CustomCloudProfile,
        cloud::{CloudName, CloudRegistry},
        defaults::tests::kubernetes_properties,
        image::ImageOverride,
    };

    fn public_cloud() -> &'static CloudSpec {
        CloudRegistry::builtin()
            .lookup(CloudName::AzurePublicCloud)
            .unwrap()
    }

    fn resolve(mut properties: Properties, params: DefaultsParams) -> Vec<KubernetesComponent> {
        properties.set_components_defaults(public_cloud(), params);
        properties.kubernetes_config().unwrap().components.clone()
    }

    fn find<'a>(components: &'a [KubernetesComponent], name: &str) -> &'a KubernetesComponent {
        components.iter().find(|c| c.name == name).unwrap()
    }

    #[test]
    fn synthesizes_all_components() {
        let components = resolve(kubernetes_properties("1.22.16"), DefaultsParams::default());

        let names: Vec<_> = components.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            [
                SCHEDULER_COMPONENT_NAME,
                CONTROLLER_MANAGER_COMPONENT_NAME,
                CLOUD_CONTROLLER_MANAGER_COMPONENT_NAME,
                API_SERVER_COMPONENT_NAME,
                ADDON_MANAGER_COMPONENT_NAME,
            ]
        );

        let apiserver = find(&components, API_SERVER_COMPONENT_NAME);
        assert_eq!(apiserver.enabled, Some(true));
        assert_eq!(
            apiserver.containers[0].image,
            "mcr.microsoft.com/oss/kubernetes/kube-apiserver:v1.22.16"
        );
        assert_eq!(apiserver.config[COMMAND], "\"kube-apiserver\"");

        let ccm = find(&components, CLOUD_CONTROLLER_MANAGER_COMPONENT_NAME);
        assert_eq!(ccm.enabled, Some(false));
        assert!(ccm.containers.is_empty());

        let addon_manager = find(&components, ADDON_MANAGER_COMPONENT_NAME);
        assert!(addon_manager.config.is_empty());
    }

    #[test]
    fn hyperkube_before_split_images() {
        let components = resolve(kubernetes_properties("1.16.9"), DefaultsParams::default());

        let scheduler = find(&components, SCHEDULER_COMPONENT_NAME);
        assert_eq!(
            scheduler.containers[0].image,
            "mcr.microsoft.com/oss/kubernetes/hyperkube-amd64:v1.16.9"
        );
        assert_eq!(scheduler.config[COMMAND], "\"/hyperkube\", \"kube-scheduler\"");
    }

    #[test]
    fn azure_stack_suffix() {
        let mut properties = kubernetes_properties("1.22.16");
        properties.custom_cloud_profile = Some(CustomCloudProfile::default());
        let components = resolve(properties, DefaultsParams::default());

        let apiserver = find(&components, API_SERVER_COMPONENT_NAME);
        assert_eq!(
            apiserver.containers[0].image,
            "mcr.microsoft.com/oss/kubernetes/kube-apiserver:v1.22.16-azs"
        );
    }

    #[test]
    fn image_overrides_apply() {
        let mut properties = kubernetes_properties("1.22.16");
        properties
            .kubernetes_config_mut()
            .unwrap()
            .image_repo_overrides
            .insert(
                "mcr.microsoft.com/oss/kubernetes/kube-scheduler".to_owned(),
                ImageOverride {
                    registry: "myregistry.io".to_owned(),
                    ..Default::default()
                },
            );
        let components = resolve(properties, DefaultsParams::default());

        assert_eq!(
            find(&components, SCHEDULER_COMPONENT_NAME).containers[0].image,
            "myregistry.io/oss/kubernetes/kube-scheduler:v1.22.16"
        );
    }

    #[rstest]
    #[case::create(DefaultsParams::default(), "myregistry.io/kube-apiserver:custom", "\"custom\"")]
    #[case::upgrade(
        DefaultsParams { is_upgrade: true, is_scale: false },
        "mcr.microsoft.com/oss/kubernetes/kube-apiserver:v1.22.16",
        "\"kube-apiserver\""
    )]
    fn user_component_values(
        #[case] params: DefaultsParams,
        #[case] expected_image: &str,
        #[case] expected_command: &str,
    ) {
        let mut properties = kubernetes_properties("1.22.16");
        properties
            .kubernetes_config_mut()
            .unwrap()
            .components
            .push(KubernetesComponent {
                name: API_SERVER_COMPONENT_NAME.to_owned(),
                containers: vec![KubernetesContainerSpec {
                    name: API_SERVER_COMPONENT_NAME.to_owned(),
                    image: "myregistry.io/kube-apiserver:custom".to_owned(),
                    cpu_limits: "2".to_owned(),
                    ..Default::default()
                }],
                config: BTreeMap::from([(COMMAND.to_owned(), "\"custom\"".to_owned())]),
                ..Default::default()
            });
        let components = resolve(properties, params);

        let apiserver = find(&components, API_SERVER_COMPONENT_NAME);
        assert_eq!(apiserver.enabled, Some(true));
        assert_eq!(apiserver.containers[0].image, expected_image);
        assert_eq!(apiserver.containers[0].cpu_limits, "2");
        assert_eq!(apiserver.config[COMMAND], expected_command);
    }

    #[test]
    fn disabled_and_data_components() {
        let mut properties = kubernetes_properties("1.22.16");
        properties.kubernetes_config_mut().unwrap().components = vec![
            KubernetesComponent {
                name: SCHEDULER_COMPONENT_NAME.to_owned(),
                enabled: Some(false),
                config: BTreeMap::from([("foo".to_owned(), "bar".to_owned())]),
                ..Default::default()
            },
            KubernetesComponent {
                name: ADDON_MANAGER_COMPONENT_NAME.to_owned(),
                data: "YXBpVmVyc2lvbjogdjE=".to_owned(),
                ..Default::default()
            },
        ];
        let components = resolve(properties, DefaultsParams::default());

        assert_eq!(
            find(&components, SCHEDULER_COMPONENT_NAME),
            &KubernetesComponent {
                name: SCHEDULER_COMPONENT_NAME.to_owned(),
                enabled: Some(false),
                ..Default::default()
            }
        );

        let addon_manager = find(&components, ADDON_MANAGER_COMPONENT_NAME);
        assert_eq!(addon_manager.data, "YXBpVmVyc2lvbjogdjE=");
        assert!(addon_manager.containers.is_empty());
    }

    #[test]
    fn custom_images() {
        let mut properties = kubernetes_properties("1.22.16");
        let config = properties.kubernetes_config_mut().unwrap();
        config.custom_kube_api_server_image = "myregistry.io/apiserver:v1".to_owned();
        config.custom_hyperkube_image = "myregistry.io/hyperkube:v1".to_owned();
        config.custom_ccm_image = "myregistry.io/ccm:v1".to_owned();
        let components = resolve(properties, DefaultsParams::default());

        assert_eq!(
            find(&components, API_SERVER_COMPONENT_NAME).containers[0].image,
            "myregistry.io/apiserver:v1"
        );
        assert_eq!(
            find(&components, SCHEDULER_COMPONENT_NAME).containers[0].image,
            "mcr.microsoft.com/oss/kubernetes/kube-scheduler:v1.22.16"
        );
        // Disabled components carry no containers
        assert!(
            find(&components, CLOUD_CONTROLLER_MANAGER_COMPONENT_NAME)
                .containers
                .is_empty()
        );
    }
}
