//! Metadata drift detection.

use pushlink_protocol::MetadataSnapshot;

/// What a metadata sync should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataPlan {
    /// Current metadata equals the last synced snapshot.
    Unchanged,
    /// Send this snapshot; persist it once the service accepts it.
    Sync(MetadataSnapshot),
}

/// Decides whether `current` must be sent, given the last synced snapshot.
///
/// Comparison is exact over every key and value. With no prior snapshot the
/// base is empty, so the first run always syncs.
pub fn plan_metadata_sync(
    prior: Option<&MetadataSnapshot>,
    current: MetadataSnapshot,
) -> MetadataPlan {
    match prior {
        Some(prior) if *prior == current => MetadataPlan::Unchanged,
        _ => MetadataPlan::Sync(current),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn os(version: &str) -> MetadataSnapshot {
        MetadataSnapshot::new().with("osVersion", version)
    }

    #[test]
    fn equal_snapshots_are_unchanged() {
        assert_eq!(
            plan_metadata_sync(Some(&os("1.0")), os("1.0")),
            MetadataPlan::Unchanged
        );
    }

    #[test]
    fn changed_value_syncs_current() {
        assert_eq!(
            plan_metadata_sync(Some(&os("1.0")), os("2.0")),
            MetadataPlan::Sync(os("2.0"))
        );
    }

    #[test]
    fn added_or_removed_key_syncs() {
        let extended = os("1.0").with("sdkVersion", "0.1.0");
        assert!(matches!(
            plan_metadata_sync(Some(&os("1.0")), extended.clone()),
            MetadataPlan::Sync(_)
        ));
        assert!(matches!(
            plan_metadata_sync(Some(&extended), os("1.0")),
            MetadataPlan::Sync(_)
        ));
    }

    #[test]
    fn first_run_always_syncs() {
        assert_eq!(
            plan_metadata_sync(None, os("1.0")),
            MetadataPlan::Sync(os("1.0"))
        );
        assert_eq!(
            plan_metadata_sync(None, MetadataSnapshot::new()),
            MetadataPlan::Sync(MetadataSnapshot::new())
        );
    }
}
