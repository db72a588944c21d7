//! `temporal.api.operatorservice.v1.OperatorService` subset.

use tonic::transport::Channel;

use crate::check::snapshot::PeerClusterSummary;
use crate::proto::UnaryClient;

const LIST_CLUSTERS: &str = "/temporal.api.operatorservice.v1.OperatorService/ListClusters";

#[derive(Clone, PartialEq, prost::Message)]
pub struct ListClustersRequest {
    #[prost(int32, tag = "1")]
    pub page_size: i32,
    #[prost(bytes = "vec", tag = "2")]
    pub next_page_token: Vec<u8>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ListClustersResponse {
    #[prost(message, repeated, tag = "1")]
    pub clusters: Vec<ClusterMetadata>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ClusterMetadata {
    #[prost(string, tag = "1")]
    pub cluster_name: String,
    #[prost(string, tag = "2")]
    pub cluster_id: String,
    #[prost(string, tag = "3")]
    pub address: String,
    #[prost(int64, tag = "4")]
    pub initial_failover_version: i64,
    #[prost(int32, tag = "5")]
    pub history_shard_count: i32,
    #[prost(bool, tag = "6")]
    pub is_connection_enabled: bool,
}

impl From<ClusterMetadata> for PeerClusterSummary {
    fn from(c: ClusterMetadata) -> Self {
        Self {
            cluster_name: c.cluster_name,
            cluster_id: c.cluster_id,
            address: c.address,
            is_connection_enabled: c.is_connection_enabled,
        }
    }
}

/// Client for the operator (admin) service on the frontend.
#[derive(Debug, Clone)]
pub struct OperatorServiceClient {
    inner: UnaryClient,
}

impl OperatorServiceClient {
    pub fn new(channel: Channel) -> Self {
        Self {
            inner: UnaryClient::new(channel),
        }
    }

    /// Server default page size; only the first page is read.
    pub async fn list_clusters(&mut self) -> Result<ListClustersResponse, tonic::Status> {
        let request = ListClustersRequest {
            page_size: 0,
            next_page_token: Vec::new(),
        };
        self.inner.call(LIST_CLUSTERS, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn test_response_decodes_clusters_around_page_token() {
        let cluster = ClusterMetadata {
            cluster_name: "active".into(),
            cluster_id: "c-1".into(),
            address: "active:7233".into(),
            initial_failover_version: 1,
            history_shard_count: 4,
            is_connection_enabled: true,
        };
        let mut buf = Vec::new();
        prost::encoding::message::encode(1, &cluster, &mut buf);
        prost::encoding::bytes::encode(4, &b"next".to_vec(), &mut buf);

        let response = ListClustersResponse::decode(buf.as_slice()).unwrap();

        assert_eq!(response.clusters, vec![cluster]);
    }

    #[test]
    fn test_peer_cluster_conversion() {
        let peer = PeerClusterSummary::from(ClusterMetadata {
            cluster_name: "standby".into(),
            cluster_id: "c-2".into(),
            address: "standby:7233".into(),
            initial_failover_version: 2,
            history_shard_count: 512,
            is_connection_enabled: false,
        });
        assert_eq!(peer.cluster_name, "standby");
        assert!(!peer.is_connection_enabled);
    }
}
