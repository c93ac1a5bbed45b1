//! Host environment lookups: metadata and bundle identifier.

use parking_lot::RwLock;
use pushlink_protocol::MetadataSnapshot;

/// Environment variable consulted for the bundle identifier.
pub const BUNDLE_ID_ENV: &str = "PUSHLINK_BUNDLE_ID";

/// Source of facts about the host the engine runs on.
pub trait Environment: Send + Sync {
    /// Computes the current metadata snapshot.
    fn metadata(&self) -> MetadataSnapshot;

    /// Returns the host application's bundle/package identifier.
    fn bundle_identifier(&self) -> Option<String>;
}

/// Environment backed by the running process.
///
/// Reports the SDK version and the compile-time OS/architecture. The bundle
/// identifier comes from configuration, falling back to `PUSHLINK_BUNDLE_ID`.
#[derive(Debug, Clone, Default)]
pub struct SystemEnvironment {
    bundle_identifier: Option<String>,
}

impl SystemEnvironment {
    /// Creates a system environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the bundle identifier explicitly.
    pub fn with_bundle_identifier(mut self, bundle_identifier: impl Into<String>) -> Self {
        self.bundle_identifier = Some(bundle_identifier.into());
        self
    }
}

impl Environment for SystemEnvironment {
    fn metadata(&self) -> MetadataSnapshot {
        MetadataSnapshot::new()
            .with("sdkVersion", env!("CARGO_PKG_VERSION"))
            .with("os", std::env::consts::OS)
            .with("osFamily", std::env::consts::FAMILY)
            .with("arch", std::env::consts::ARCH)
    }

    fn bundle_identifier(&self) -> Option<String> {
        self.bundle_identifier
            .clone()
            .or_else(|| std::env::var(BUNDLE_ID_ENV).ok())
            .filter(|id| !id.is_empty())
    }
}

/// Environment with fixed, settable values.
///
/// Used by tests and by embedders that compute metadata themselves.
#[derive(Debug, Default)]
pub struct StaticEnvironment {
    metadata: RwLock<MetadataSnapshot>,
    bundle_identifier: RwLock<Option<String>>,
}

impl StaticEnvironment {
    /// Creates an environment reporting `metadata`.
    pub fn new(metadata: MetadataSnapshot) -> Self {
        Self {
            metadata: RwLock::new(metadata),
            bundle_identifier: RwLock::new(None),
        }
    }

    /// Sets the bundle identifier, returning the environment.
    pub fn with_bundle_identifier(self, bundle_identifier: impl Into<String>) -> Self {
        *self.bundle_identifier.write() = Some(bundle_identifier.into());
        self
    }

    /// Replaces the reported metadata.
    pub fn set_metadata(&self, metadata: MetadataSnapshot) {
        *self.metadata.write() = metadata;
    }
}

impl Environment for StaticEnvironment {
    fn metadata(&self) -> MetadataSnapshot {
        self.metadata.read().clone()
    }

    fn bundle_identifier(&self) -> Option<String> {
        self.bundle_identifier.read().clone()
    }
}

impl<E: Environment + ?Sized> Environment for std::sync::Arc<E> {
    fn metadata(&self) -> MetadataSnapshot {
        (**self).metadata()
    }

    fn bundle_identifier(&self) -> Option<String> {
        (**self).bundle_identifier()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_metadata_is_stable() {
        let env = SystemEnvironment::new();
        let first = env.metadata();
        assert_eq!(first, env.metadata());
        assert_eq!(first.get("sdkVersion"), Some(env!("CARGO_PKG_VERSION")));
        assert_eq!(first.get("os"), Some(std::env::consts::OS));
    }

    #[test]
    fn explicit_bundle_identifier_wins() {
        let env = SystemEnvironment::new().with_bundle_identifier("com.example.app");
        assert_eq!(env.bundle_identifier().as_deref(), Some("com.example.app"));
    }

    #[test]
    fn static_environment_is_settable() {
        let env = StaticEnvironment::new(MetadataSnapshot::new().with("osVersion", "1.0"))
            .with_bundle_identifier("com.example.app");
        env.set_metadata(MetadataSnapshot::new().with("osVersion", "2.0"));

        assert_eq!(env.metadata().get("osVersion"), Some("2.0"));
        assert_eq!(env.bundle_identifier().as_deref(), Some("com.example.app"));
    }
}
