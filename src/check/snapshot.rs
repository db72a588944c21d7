//! Read-only cluster snapshots returned by the consistency probes.
//!
//! These are decoupled from the wire messages in [`crate::proto`] so the
//! probes can be exercised without a live cluster.

use std::fmt;

/// Identity of the cluster behind the frontend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterInfo {
    pub cluster_id: String,
    pub cluster_name: String,
    pub server_version: String,
    /// Current and recommended release, as reported by the version checker.
    pub version_info: Option<VersionInfo>,
    pub history_shard_count: i32,
    pub persistence_store: String,
    pub visibility_store: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionInfo {
    pub current: String,
    pub recommended: String,
    pub instructions: String,
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "current={} recommended={}", self.current, self.recommended)?;
        if !self.instructions.is_empty() {
            write!(f, " ({})", self.instructions)?;
        }
        Ok(())
    }
}

/// Server version and feature flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemCapabilities {
    pub server_version: String,
    pub signal_and_query_header: bool,
    pub internal_error_differentiation: bool,
    pub activity_failure_include_heartbeat: bool,
    pub supports_schedules: bool,
    pub encoded_failure_attributes: bool,
    pub build_id_based_versioning: bool,
    pub upsert_memo: bool,
    pub eager_workflow_start: bool,
    pub sdk_metadata: bool,
}

/// Lifecycle state of a registered namespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NamespaceState {
    #[default]
    Unspecified,
    Registered,
    Deprecated,
    Deleted,
}

impl NamespaceState {
    pub fn as_str(&self) -> &'static str {
        match self {
            NamespaceState::Unspecified => "Unspecified",
            NamespaceState::Registered => "Registered",
            NamespaceState::Deprecated => "Deprecated",
            NamespaceState::Deleted => "Deleted",
        }
    }
}

impl From<i32> for NamespaceState {
    fn from(val: i32) -> Self {
        match val {
            1 => NamespaceState::Registered,
            2 => NamespaceState::Deprecated,
            3 => NamespaceState::Deleted,
            _ => NamespaceState::Unspecified,
        }
    }
}

impl fmt::Display for NamespaceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceSummary {
    pub name: String,
    pub state: NamespaceState,
    pub description: String,
}

/// A cluster this one replicates with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeerClusterSummary {
    pub cluster_name: String,
    pub cluster_id: String,
    pub address: String,
    pub is_connection_enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_state_from_wire() {
        assert_eq!(NamespaceState::from(1), NamespaceState::Registered);
        assert_eq!(NamespaceState::from(3), NamespaceState::Deleted);
        assert_eq!(NamespaceState::from(42), NamespaceState::Unspecified);
    }

    #[test]
    fn test_version_info_display() {
        let v = VersionInfo {
            current: "1.22.0".into(),
            recommended: "1.22.4".into(),
            instructions: String::new(),
        };
        assert_eq!(v.to_string(), "current=1.22.0 recommended=1.22.4");
    }
}
