//! Carries values an already deployed cluster pinned over into a document
//! submitted for an in-place operation.
//!
//! Only values the new document leaves unset are taken from the existing
//! cluster. This runs before conversion, so a re-submitted document can not
//! accidentally downgrade or re-rationalize the orchestrator version.
use tracing::debug;

use crate::vlabs::{ContainerService, Properties};

impl ContainerService {
    /// Fills unset values of `self` from `existing`, the `vlabs` rendition of
    /// the deployed cluster.
    pub fn merge(&mut self, existing: &Self) {
        let Some(existing) = existing.properties.as_ref() else {
            return;
        };

        self.properties
            .get_or_insert_with(Properties::default)
            .merge(existing);
    }
}

impl Properties {
    fn merge(&mut self, existing: &Self) {
        if self.orchestrator_profile.is_none() {
            debug!("carrying over the existing orchestrator profile");
            self.orchestrator_profile.clone_from(&existing.orchestrator_profile);
        } else if let (Some(profile), Some(existing)) =
            (&mut self.orchestrator_profile, &existing.orchestrator_profile)
            && profile.orchestrator_release.is_empty()
            && profile.orchestrator_version.is_empty()
        {
            debug!(
                version = %existing.orchestrator_version,
                "carrying over the existing orchestrator version"
            );
            profile
                .orchestrator_release
                .clone_from(&existing.orchestrator_release);
            profile
                .orchestrator_version
                .clone_from(&existing.orchestrator_version);
        }

        if let (Some(master), Some(existing)) = (&mut self.master_profile, &existing.master_profile)
            && master.dns_prefix.is_empty()
        {
            master.dns_prefix.clone_from(&existing.dns_prefix);
        }

        if let (Some(windows), Some(existing)) =
            (&mut self.windows_profile, &existing.windows_profile)
            && windows.admin_password.is_empty()
        {
            windows.admin_password.clone_from(&existing.admin_password);
        }

        if let (Some(principal), Some(existing)) = (
            &mut self.service_principal_profile,
            &existing.service_principal_profile,
        ) && principal.secret.is_empty()
            && principal.keyvault_secret_ref.is_none()
        {
            principal.secret.clone_from(&existing.secret);
        }
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;

    fn document(input: &str) -> ContainerService {
        serde_json::from_str(input).unwrap()
    }

    fn existing() -> ContainerService {
        document(indoc! {r#"
            {
              "properties": {
                "orchestratorProfile": {
                  "orchestratorType": "Kubernetes",
                  "orchestratorVersion": "1.21.14"
                },
                "masterProfile": { "count": 3, "dnsPrefix": "deployed" },
                "windowsProfile": { "adminUsername": "azureuser", "adminPassword": "hunter2" },
                "servicePrincipalProfile": { "clientId": "client", "secret": "secret" }
              }
            }
        "#})
    }

    fn orchestrator(container_service: &ContainerService) -> (&str, &str) {
        let profile = container_service
            .properties
            .as_ref()
            .and_then(|properties| properties.orchestrator_profile.as_ref())
            .unwrap();
        (&profile.orchestrator_release, &profile.orchestrator_version)
    }

    #[test]
    fn carries_over_pinned_values() {
        let mut container_service = document(indoc! {r#"
            {
              "properties": {
                "orchestratorProfile": { "orchestratorType": "Kubernetes" },
                "masterProfile": { "count": 3 },
                "windowsProfile": { "adminUsername": "azureuser" },
                "servicePrincipalProfile": { "clientId": "client" }
              }
            }
        "#});

        container_service.merge(&existing());
        let properties = container_service.properties.as_ref().unwrap();

        assert_eq!(orchestrator(&container_service), ("", "1.21.14"));
        assert_eq!(properties.master_profile.as_ref().unwrap().dns_prefix, "deployed");
        assert_eq!(
            properties.windows_profile.as_ref().unwrap().admin_password,
            "hunter2"
        );
        assert_eq!(
            properties.service_principal_profile.as_ref().unwrap().secret,
            "secret"
        );
    }

    #[test]
    fn missing_orchestrator_profile_is_taken_over() {
        let mut container_service = document(r#"{ "properties": {} }"#);
        container_service.merge(&existing());

        assert_eq!(orchestrator(&container_service), ("", "1.21.14"));
    }

    #[test]
    fn explicit_values_win() {
        let mut container_service = document(indoc! {r#"
            {
              "properties": {
                "orchestratorProfile": { "orchestratorType": "Kubernetes", "orchestratorRelease": "1.22" },
                "masterProfile": { "count": 3, "dnsPrefix": "new" }
              }
            }
        "#});

        container_service.merge(&existing());
        let properties = container_service.properties.as_ref().unwrap();

        assert_eq!(orchestrator(&container_service), ("1.22", ""));
        assert_eq!(properties.master_profile.as_ref().unwrap().dns_prefix, "new");
        assert!(properties.windows_profile.is_none());
    }

    #[test]
    fn keyvault_reference_suppresses_secret() {
        let mut container_service = document(indoc! {r#"
            {
              "properties": {
                "servicePrincipalProfile": {
                  "clientId": "client",
                  "keyvaultSecretRef": { "vaultID": "vault", "secretName": "name" }
                }
              }
            }
        "#});

        container_service.merge(&existing());
        let principal = container_service
            .properties
            .as_ref()
            .and_then(|properties| properties.service_principal_profile.as_ref())
            .unwrap();

        assert_eq!(principal.secret, "");
    }
}
