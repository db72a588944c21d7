//! Wire protocol for the Temporal services the checker talks to.
//!
//! # Data Flow
//! ```text
//! Checker
//!     → health (grpc.health.v1, via tonic-health)
//!     → workflow.rs (GetClusterInfo, GetSystemInfo, ListNamespaces)
//!     → operator.rs (ListClusters)
//!     → UnaryClient (tonic::client::Grpc + ProstCodec)
//!     → tonic Channel
//! ```
//!
//! # Design Decisions
//! - Only the consumed subset of each message is declared; prost skips
//!   unknown fields, so newer servers decode cleanly
//! - Field numbers match the upstream Temporal API definitions
//! - Responses are converted into [`crate::check::snapshot`] types at this
//!   boundary

pub mod operator;
pub mod workflow;

use tonic::codec::ProstCodec;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::Channel;

/// Minimal unary gRPC client shared by the service stubs.
#[derive(Debug, Clone)]
pub struct UnaryClient {
    inner: tonic::client::Grpc<Channel>,
}

impl UnaryClient {
    pub fn new(channel: Channel) -> Self {
        Self {
            inner: tonic::client::Grpc::new(channel),
        }
    }

    /// Issue one unary call to `path` (`/package.Service/Method`).
    pub async fn call<Req, Resp>(
        &mut self,
        path: &'static str,
        request: Req,
    ) -> Result<Resp, tonic::Status>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        self.inner.ready().await.map_err(|e| {
            tonic::Status::unavailable(format!("Service was not ready: {}", e))
        })?;
        let codec = ProstCodec::<Req, Resp>::default();
        let response = self
            .inner
            .unary(
                tonic::Request::new(request),
                PathAndQuery::from_static(path),
                codec,
            )
            .await?;
        Ok(response.into_inner())
    }
}
