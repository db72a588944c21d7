//! tonic-backed implementation of the transport traits.

use async_trait::async_trait;
use tonic::transport::{Channel, Endpoint};
use tonic_health::pb::health_client::HealthClient;
use tonic_health::pb::HealthCheckRequest;

use crate::check::error::CheckError;
use crate::check::snapshot::{ClusterInfo, NamespaceSummary, PeerClusterSummary, SystemCapabilities};
use crate::config::{ServiceConfig, ServiceKind};
use crate::proto::operator::OperatorServiceClient;
use crate::proto::workflow::WorkflowServiceClient;
use crate::transport::{Connection, Connector, HealthApi, OperatorApi, ServingStatus, WorkflowApi};

/// Dials services over plaintext HTTP/2.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrpcConnector;

/// Prepend `http://` when the address has no scheme.
pub fn endpoint_uri(address: &str) -> String {
    if address.contains("://") {
        address.to_string()
    } else {
        format!("http://{}", address)
    }
}

#[async_trait]
impl Connector for GrpcConnector {
    type Connection = GrpcConnection;

    async fn connect(
        &self,
        kind: ServiceKind,
        config: &ServiceConfig,
    ) -> Result<GrpcConnection, CheckError> {
        let uri = endpoint_uri(&config.address);
        let mut endpoint = Endpoint::from_shared(uri.clone()).map_err(|e| CheckError::Connection {
            service: kind,
            address: config.address.clone(),
            reason: e.to_string(),
        })?;

        let timeout = config.timeout();
        if !timeout.is_zero() {
            endpoint = endpoint.connect_timeout(timeout);
        }

        let channel = endpoint.connect_lazy();
        tracing::debug!(service = %kind, uri = %uri, "Channel created");

        Ok(GrpcConnection { kind, channel })
    }
}

/// A lazily-connected tonic channel to one service.
#[derive(Debug, Clone)]
pub struct GrpcConnection {
    kind: ServiceKind,
    channel: Channel,
}

impl GrpcConnection {
    pub fn kind(&self) -> ServiceKind {
        self.kind
    }
}

impl Connection for GrpcConnection {
    type Health = HealthClient<Channel>;
    type Workflow = WorkflowServiceClient;
    type Operator = OperatorServiceClient;

    fn health_client(&self) -> HealthClient<Channel> {
        HealthClient::new(self.channel.clone())
    }

    fn workflow_client(&self) -> Result<WorkflowServiceClient, CheckError> {
        Ok(WorkflowServiceClient::new(self.channel.clone()))
    }

    fn operator_client(&self) -> Result<OperatorServiceClient, CheckError> {
        Ok(OperatorServiceClient::new(self.channel.clone()))
    }
}

#[async_trait]
impl HealthApi for HealthClient<Channel> {
    async fn serving_status(&mut self, service: &str) -> Result<ServingStatus, tonic::Status> {
        let request = HealthCheckRequest {
            service: service.to_string(),
        };
        let response = self.check(request).await?.into_inner();
        Ok(ServingStatus::try_from(response.status).unwrap_or(ServingStatus::Unknown))
    }
}

#[async_trait]
impl WorkflowApi for WorkflowServiceClient {
    async fn cluster_info(&mut self) -> Result<ClusterInfo, tonic::Status> {
        Ok(self.get_cluster_info().await?.into())
    }

    async fn system_info(&mut self) -> Result<SystemCapabilities, tonic::Status> {
        Ok(self.get_system_info().await?.into())
    }

    async fn list_namespaces(
        &mut self,
        page_size: i32,
    ) -> Result<Vec<NamespaceSummary>, tonic::Status> {
        let response = WorkflowServiceClient::list_namespaces(self, page_size).await?;
        Ok(response.namespaces.into_iter().map(NamespaceSummary::from).collect())
    }
}

#[async_trait]
impl OperatorApi for OperatorServiceClient {
    async fn list_clusters(&mut self) -> Result<Vec<PeerClusterSummary>, tonic::Status> {
        let response = OperatorServiceClient::list_clusters(self).await?;
        Ok(response.clusters.into_iter().map(PeerClusterSummary::from).collect())
    }
}
