use super::{Flags, flags, set_missing};
use crate::api::{KubernetesConfig, Properties};

fn sysctld_defaults(needs_containerd: bool) -> Flags {
    let mut defaults = flags([
        ("net.ipv4.tcp_retries2", "8"),
        ("net.core.somaxconn", "16384"),
        ("net.ipv4.tcp_max_syn_backlog", "16384"),
        ("net.core.message_cost", "40"),
        ("net.core.message_burst", "80"),
        ("net.ipv4.neigh.default.gc_thresh1", "4096"),
        ("net.ipv4.neigh.default.gc_thresh2", "8192"),
        ("net.ipv4.neigh.default.gc_thresh3", "16384"),
        ("kernel.dmesg_restrict", "0"),
    ]);

    if needs_containerd {
        defaults.insert("net.ipv4.ip_forward".to_owned(), "1".to_owned());
    }

    defaults
}

impl Properties {
    /// Seeds kernel tunables on the master and every Linux pool.
    pub(super) fn set_sysctld_defaults(&mut self) {
        let defaults = sysctld_defaults(
            self.kubernetes_config()
                .is_some_and(KubernetesConfig::needs_containerd),
        );

        if let Some(master) = self.master_profile.as_mut() {
            set_missing(&mut master.sysctld_config, defaults.clone());
        }
        for pool in self.agent_pool_profiles.iter_mut().filter(|p| p.is_linux()) {
            set_missing(&mut pool.sysctld_config, defaults.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api::{AgentPoolProfile, OsType, consts::CONTAINERD},
        defaults::tests::kubernetes_properties,
    };

    #[test]
    fn user_values_win() {
        let mut properties = kubernetes_properties("1.22.16");
        properties.agent_pool_profiles[0].sysctld_config =
            flags([("net.core.somaxconn", "1024")]);
        properties.agent_pool_profiles.push(AgentPoolProfile {
            name: "winpool".to_owned(),
            os_type: Some(OsType::Windows),
            ..Default::default()
        });
        properties.set_sysctld_defaults();

        let linux = &properties.agent_pool_profiles[0].sysctld_config;
        assert_eq!(linux["net.core.somaxconn"], "1024");
        assert_eq!(linux["net.ipv4.tcp_retries2"], "8");
        assert!(!linux.contains_key("net.ipv4.ip_forward"));
        assert!(properties.agent_pool_profiles[1].sysctld_config.is_empty());

        let master = &properties.master_profile.as_ref().unwrap().sysctld_config;
        assert_eq!(master["net.core.somaxconn"], "16384");
    }

    #[test]
    fn containerd_enables_ip_forwarding() {
        let mut properties = kubernetes_properties("1.22.16");
        CONTAINERD.clone_into(&mut properties.kubernetes_config_mut().unwrap().container_runtime);
        properties.set_sysctld_defaults();

        let master = &properties.master_profile.as_ref().unwrap().sysctld_config;
        assert_eq!(master["net.ipv4.ip_forward"], "1");
    }
}
