//! Transport subsystem: channels to the cluster's services.
//!
//! # Data Flow
//! ```text
//! CheckerConfig
//!     → Connector::connect (one call per enabled service)
//!     → ConnectionSet (at most one Connection per ServiceKind)
//!     → Connection hands out health / workflow / operator clients
//! ```
//!
//! # Design Decisions
//! - The checker only sees the traits below, so probes can run against
//!   scripted connections in tests
//! - gRPC channels are dialed lazily; an unreachable peer shows up as a
//!   failed probe, not a failed construction
//! - Plaintext only

pub mod grpc;
pub mod set;

use async_trait::async_trait;

use crate::check::error::CheckError;
use crate::check::snapshot::{ClusterInfo, NamespaceSummary, PeerClusterSummary, SystemCapabilities};
use crate::config::{ServiceConfig, ServiceKind};

pub use grpc::{GrpcConnection, GrpcConnector};
pub use set::ConnectionSet;
pub use tonic_health::pb::health_check_response::ServingStatus;

/// Establishes a connection to one service.
#[async_trait]
pub trait Connector: Send + Sync {
    type Connection: Connection;

    async fn connect(
        &self,
        kind: ServiceKind,
        config: &ServiceConfig,
    ) -> Result<Self::Connection, CheckError>;
}

/// An established channel to one service.
pub trait Connection: Send + Sync + 'static {
    type Health: HealthApi;
    type Workflow: WorkflowApi;
    type Operator: OperatorApi;

    fn health_client(&self) -> Self::Health;

    /// Fails with [`CheckError::Initialization`] if the handle cannot be built.
    fn workflow_client(&self) -> Result<Self::Workflow, CheckError>;

    /// Fails with [`CheckError::Initialization`] if the handle cannot be built.
    fn operator_client(&self) -> Result<Self::Operator, CheckError>;
}

/// `grpc.health.v1.Health`
#[async_trait]
pub trait HealthApi: Send {
    async fn serving_status(&mut self, service: &str) -> Result<ServingStatus, tonic::Status>;
}

/// Read-only queries against the workflow service.
#[async_trait]
pub trait WorkflowApi: Send {
    async fn cluster_info(&mut self) -> Result<ClusterInfo, tonic::Status>;

    async fn system_info(&mut self) -> Result<SystemCapabilities, tonic::Status>;

    async fn list_namespaces(
        &mut self,
        page_size: i32,
    ) -> Result<Vec<NamespaceSummary>, tonic::Status>;
}

/// Read-only queries against the operator service.
#[async_trait]
pub trait OperatorApi: Send {
    async fn list_clusters(&mut self) -> Result<Vec<PeerClusterSummary>, tonic::Status>;
}
