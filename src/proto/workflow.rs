//! `temporal.api.workflowservice.v1.WorkflowService` subset.

use tonic::transport::Channel;

use crate::check::snapshot::{
    ClusterInfo, NamespaceState, NamespaceSummary, SystemCapabilities, VersionInfo,
};
use crate::proto::UnaryClient;

const GET_CLUSTER_INFO: &str = "/temporal.api.workflowservice.v1.WorkflowService/GetClusterInfo";
const GET_SYSTEM_INFO: &str = "/temporal.api.workflowservice.v1.WorkflowService/GetSystemInfo";
const LIST_NAMESPACES: &str = "/temporal.api.workflowservice.v1.WorkflowService/ListNamespaces";

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetClusterInfoRequest {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetClusterInfoResponse {
    #[prost(string, tag = "2")]
    pub server_version: String,
    #[prost(string, tag = "3")]
    pub cluster_id: String,
    #[prost(message, optional, tag = "4")]
    pub version_info: Option<WireVersionInfo>,
    #[prost(string, tag = "5")]
    pub cluster_name: String,
    #[prost(int32, tag = "6")]
    pub history_shard_count: i32,
    #[prost(string, tag = "7")]
    pub persistence_store: String,
    #[prost(string, tag = "8")]
    pub visibility_store: String,
}

/// `temporal.api.version.v1.VersionInfo`
#[derive(Clone, PartialEq, prost::Message)]
pub struct WireVersionInfo {
    #[prost(message, optional, tag = "1")]
    pub current: Option<ReleaseInfo>,
    #[prost(message, optional, tag = "2")]
    pub recommended: Option<ReleaseInfo>,
    #[prost(string, tag = "3")]
    pub instructions: String,
}

/// `temporal.api.version.v1.ReleaseInfo`
#[derive(Clone, PartialEq, prost::Message)]
pub struct ReleaseInfo {
    #[prost(string, tag = "1")]
    pub version: String,
    #[prost(string, tag = "3")]
    pub notes: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetSystemInfoRequest {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetSystemInfoResponse {
    #[prost(string, tag = "1")]
    pub server_version: String,
    #[prost(message, optional, tag = "2")]
    pub capabilities: Option<Capabilities>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Capabilities {
    #[prost(bool, tag = "1")]
    pub signal_and_query_header: bool,
    #[prost(bool, tag = "2")]
    pub internal_error_differentiation: bool,
    #[prost(bool, tag = "3")]
    pub activity_failure_include_heartbeat: bool,
    #[prost(bool, tag = "4")]
    pub supports_schedules: bool,
    #[prost(bool, tag = "5")]
    pub encoded_failure_attributes: bool,
    #[prost(bool, tag = "6")]
    pub build_id_based_versioning: bool,
    #[prost(bool, tag = "7")]
    pub upsert_memo: bool,
    #[prost(bool, tag = "8")]
    pub eager_workflow_start: bool,
    #[prost(bool, tag = "9")]
    pub sdk_metadata: bool,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ListNamespacesRequest {
    #[prost(int32, tag = "1")]
    pub page_size: i32,
    #[prost(bytes = "vec", tag = "2")]
    pub next_page_token: Vec<u8>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ListNamespacesResponse {
    #[prost(message, repeated, tag = "1")]
    pub namespaces: Vec<DescribeNamespaceResponse>,
    #[prost(bytes = "vec", tag = "2")]
    pub next_page_token: Vec<u8>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DescribeNamespaceResponse {
    #[prost(message, optional, tag = "1")]
    pub namespace_info: Option<NamespaceInfo>,
    #[prost(bool, tag = "5")]
    pub is_global_namespace: bool,
}

/// `temporal.api.namespace.v1.NamespaceInfo`
#[derive(Clone, PartialEq, prost::Message)]
pub struct NamespaceInfo {
    #[prost(string, tag = "1")]
    pub name: String,
    /// `temporal.api.enums.v1.NamespaceState`, varint on the wire.
    #[prost(int32, tag = "2")]
    pub state: i32,
    #[prost(string, tag = "3")]
    pub description: String,
    #[prost(string, tag = "4")]
    pub owner_email: String,
    #[prost(string, tag = "6")]
    pub id: String,
}

impl From<WireVersionInfo> for VersionInfo {
    fn from(v: WireVersionInfo) -> Self {
        Self {
            current: v.current.map(|r| r.version).unwrap_or_default(),
            recommended: v.recommended.map(|r| r.version).unwrap_or_default(),
            instructions: v.instructions,
        }
    }
}

impl From<GetClusterInfoResponse> for ClusterInfo {
    fn from(r: GetClusterInfoResponse) -> Self {
        Self {
            cluster_id: r.cluster_id,
            cluster_name: r.cluster_name,
            server_version: r.server_version,
            version_info: r.version_info.map(VersionInfo::from),
            history_shard_count: r.history_shard_count,
            persistence_store: r.persistence_store,
            visibility_store: r.visibility_store,
        }
    }
}

impl From<GetSystemInfoResponse> for SystemCapabilities {
    fn from(r: GetSystemInfoResponse) -> Self {
        let cp = r.capabilities.unwrap_or_default();
        Self {
            server_version: r.server_version,
            signal_and_query_header: cp.signal_and_query_header,
            internal_error_differentiation: cp.internal_error_differentiation,
            activity_failure_include_heartbeat: cp.activity_failure_include_heartbeat,
            supports_schedules: cp.supports_schedules,
            encoded_failure_attributes: cp.encoded_failure_attributes,
            build_id_based_versioning: cp.build_id_based_versioning,
            upsert_memo: cp.upsert_memo,
            eager_workflow_start: cp.eager_workflow_start,
            sdk_metadata: cp.sdk_metadata,
        }
    }
}

impl From<DescribeNamespaceResponse> for NamespaceSummary {
    fn from(r: DescribeNamespaceResponse) -> Self {
        let info = r.namespace_info.unwrap_or_default();
        Self {
            name: info.name,
            state: NamespaceState::from(info.state),
            description: info.description,
        }
    }
}

/// Client for the workflow service on the frontend.
#[derive(Debug, Clone)]
pub struct WorkflowServiceClient {
    inner: UnaryClient,
}

impl WorkflowServiceClient {
    pub fn new(channel: Channel) -> Self {
        Self {
            inner: UnaryClient::new(channel),
        }
    }

    pub async fn get_cluster_info(&mut self) -> Result<GetClusterInfoResponse, tonic::Status> {
        self.inner
            .call(GET_CLUSTER_INFO, GetClusterInfoRequest {})
            .await
    }

    pub async fn get_system_info(&mut self) -> Result<GetSystemInfoResponse, tonic::Status> {
        self.inner.call(GET_SYSTEM_INFO, GetSystemInfoRequest {}).await
    }

    /// First page only.
    pub async fn list_namespaces(
        &mut self,
        page_size: i32,
    ) -> Result<ListNamespacesResponse, tonic::Status> {
        let request = ListNamespacesRequest {
            page_size,
            next_page_token: Vec::new(),
        };
        self.inner.call(LIST_NAMESPACES, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn test_cluster_info_conversion() {
        let wire = GetClusterInfoResponse {
            server_version: "1.22.4".into(),
            cluster_id: "c-1".into(),
            version_info: Some(WireVersionInfo {
                current: Some(ReleaseInfo {
                    version: "1.22.4".into(),
                    notes: String::new(),
                }),
                recommended: None,
                instructions: String::new(),
            }),
            cluster_name: "active".into(),
            history_shard_count: 512,
            persistence_store: "postgres12".into(),
            visibility_store: "elasticsearch".into(),
        };
        let info = ClusterInfo::from(wire);
        assert_eq!(info.cluster_id, "c-1");
        assert_eq!(info.history_shard_count, 512);
        assert_eq!(info.version_info.unwrap().current, "1.22.4");
    }

    #[test]
    fn test_namespace_decodes_state_from_varint() {
        let wire = DescribeNamespaceResponse {
            namespace_info: Some(NamespaceInfo {
                name: "default".into(),
                state: 1,
                description: "Default namespace".into(),
                owner_email: String::new(),
                id: String::new(),
            }),
            is_global_namespace: false,
        };
        let bytes = wire.encode_to_vec();
        let decoded = DescribeNamespaceResponse::decode(bytes.as_slice()).unwrap();
        let summary = NamespaceSummary::from(decoded);
        assert_eq!(summary.name, "default");
        assert_eq!(summary.state, NamespaceState::Registered);
    }

    #[test]
    fn test_missing_capabilities_default_to_false() {
        let caps = SystemCapabilities::from(GetSystemInfoResponse {
            server_version: "1.20.0".into(),
            capabilities: None,
        });
        assert_eq!(caps.server_version, "1.20.0");
        assert!(!caps.sdk_metadata);
    }
}
