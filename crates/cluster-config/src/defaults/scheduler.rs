use cluster_version::is_version_ge;

use super::{
    KUBECONFIG,
    feature_gates::{add_default_feature_gates, remove_invalid_feature_gates},
    flags, force, set_missing,
};
use crate::api::{Properties, consts::DEFAULT_KUBERNETES_SCHEDULER_ENABLE_PROFILING};

impl Properties {
    pub(super) fn set_scheduler_defaults(&mut self) {
        let version = self.orchestrator_version().to_owned();
        let Some(config) = self.kubernetes_config_mut() else {
            return;
        };
        let scheduler = &mut config.scheduler_config;

        set_missing(
            scheduler,
            flags([
                ("--v", "2"),
                ("--profiling", DEFAULT_KUBERNETES_SCHEDULER_ENABLE_PROFILING),
            ]),
        );
        add_default_feature_gates(scheduler, &version, "", "");
        force(
            scheduler,
            flags([("--kubeconfig", KUBECONFIG), ("--leader-elect", "true")]),
        );

        if is_version_ge(&version, "1.22.0-alpha.1") {
            remove_invalid_feature_gates(scheduler, &["VolumeSnapshotDataSource"]);
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::defaults::{Flags, feature_gates::FEATURE_GATES, tests::kubernetes_properties};

    fn resolve(version: &str, user: Flags) -> Flags {
        let mut properties = kubernetes_properties(version);
        properties.kubernetes_config_mut().unwrap().scheduler_config = user;
        properties.set_scheduler_defaults();
        properties.kubernetes_config().unwrap().scheduler_config.clone()
    }

    #[rstest]
    #[case::no_user_gates("1.19.16", None, "")]
    #[case::kept_before_removal("1.19.16", Some("VolumeSnapshotDataSource=true"), "VolumeSnapshotDataSource=true")]
    #[case::removed("1.22.16", Some("VolumeSnapshotDataSource=true"), "")]
    fn feature_gates(#[case] version: &str, #[case] user: Option<&str>, #[case] expected: &str) {
        let user = user.map_or_else(Flags::new, |gates| flags([(FEATURE_GATES, gates)]));
        assert_eq!(resolve(version, user)[FEATURE_GATES], expected);
    }

    #[test]
    fn user_values_and_statics() {
        let scheduler = resolve(
            "1.22.16",
            flags([("--v", "4"), ("--leader-elect", "false")]),
        );

        assert_eq!(scheduler["--v"], "4");
        assert_eq!(scheduler["--profiling"], "false");
        assert_eq!(scheduler["--leader-elect"], "true");
        assert_eq!(scheduler["--kubeconfig"], KUBECONFIG);
    }
}
