//! Consistency probing (`FullCheck` sub-checks).
//!
//! # Responsibilities
//! - Cluster identity: id and name must be present
//! - System info: surfaced only
//! - Namespaces: first page surfaced, states not judged
//! - Peer clusters: every peer must have its replication connection enabled
//!
//! # Design Decisions
//! - All calls go through the frontend channel and inherit its timeout
//! - The peer check stops at the first disconnected peer; later peers are
//!   not inspected once replication is known broken

use std::time::Duration;

use crate::check::error::{CheckError, ErrorList};
use crate::check::snapshot::{ClusterInfo, NamespaceSummary, PeerClusterSummary, SystemCapabilities};
use crate::observability::metrics;
use crate::resilience::with_deadline;
use crate::transport::{OperatorApi, WorkflowApi};

/// Namespaces fetched per listing; no further pages are requested.
pub const NAMESPACE_PAGE_SIZE: i32 = 10;

/// Fetch cluster identity and require a non-empty id and name.
///
/// Both fields are judged independently, so a response missing both yields
/// two validation errors.
pub async fn check_cluster_info<W: WorkflowApi>(
    client: &mut W,
    timeout: Duration,
) -> Result<ClusterInfo, ErrorList> {
    let info = with_deadline(timeout, client.cluster_info())
        .await
        .map_err(|e| CheckError::probe("get cluster info", e))?;

    let version_info = info.version_info.clone().unwrap_or_default();
    tracing::info!(
        cluster_id = %info.cluster_id,
        cluster_name = %info.cluster_name,
        server_version = %info.server_version,
        version_info = %version_info,
        history_shard_count = info.history_shard_count,
        persistence_store = %info.persistence_store,
        visibility_store = %info.visibility_store,
        "Cluster info"
    );

    let mut errs = ErrorList::new();
    if info.cluster_id.is_empty() {
        errs.push(CheckError::Validation("Cluster Id is empty".to_string()));
    }
    if info.cluster_name.is_empty() {
        errs.push(CheckError::Validation("Cluster Name is empty".to_string()));
    }
    errs.into_result()?;
    Ok(info)
}

/// Fetch server version and capability flags. Nothing is validated.
pub async fn check_system_info<W: WorkflowApi>(
    client: &mut W,
    timeout: Duration,
) -> Result<SystemCapabilities, CheckError> {
    let caps = with_deadline(timeout, client.system_info())
        .await
        .map_err(|e| CheckError::probe("get system info", e))?;

    tracing::info!(
        server_version = %caps.server_version,
        sdk_metadata = caps.sdk_metadata,
        activity_failure_include_heartbeat = caps.activity_failure_include_heartbeat,
        build_id_based_versioning = caps.build_id_based_versioning,
        upsert_memo = caps.upsert_memo,
        signal_and_query_header = caps.signal_and_query_header,
        internal_error_differentiation = caps.internal_error_differentiation,
        supports_schedules = caps.supports_schedules,
        encoded_failure_attributes = caps.encoded_failure_attributes,
        eager_workflow_start = caps.eager_workflow_start,
        "System info"
    );
    Ok(caps)
}

/// List the first page of namespaces.
pub async fn check_namespaces<W: WorkflowApi>(
    client: &mut W,
    timeout: Duration,
) -> Result<Vec<NamespaceSummary>, CheckError> {
    // TODO: follow next_page_token once clusters with >10 namespaces need full coverage
    let namespaces = with_deadline(timeout, client.list_namespaces(NAMESPACE_PAGE_SIZE))
        .await
        .map_err(|e| CheckError::probe("list namespaces", e))?;

    for ns in &namespaces {
        tracing::info!(
            namespace = %ns.name,
            state = %ns.state,
            description = %ns.description,
            "Namespace"
        );
    }
    Ok(namespaces)
}

/// List peer clusters and fail on the first one that is not connected.
pub async fn check_peer_clusters<O: OperatorApi>(
    client: &mut O,
    timeout: Duration,
) -> Result<Vec<PeerClusterSummary>, CheckError> {
    let clusters = with_deadline(timeout, client.list_clusters())
        .await
        .map_err(|e| CheckError::probe("list clusters", e))?;

    for (index, cluster) in clusters.iter().enumerate() {
        tracing::info!(
            index,
            cluster_name = %cluster.cluster_name,
            cluster_id = %cluster.cluster_id,
            address = %cluster.address,
            connected = cluster.is_connection_enabled,
            "Peer cluster"
        );
        metrics::record_peer_cluster(&cluster.cluster_name, cluster.is_connection_enabled);

        if !cluster.is_connection_enabled {
            tracing::warn!(index, cluster_name = %cluster.cluster_name, "Peer cluster is not connected");
            return Err(CheckError::Replication {
                index,
                cluster_name: cluster.cluster_name.clone(),
            });
        }
    }
    Ok(clusters)
}
