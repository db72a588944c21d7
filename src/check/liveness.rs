//! Liveness probing (`BasicCheck`).
//!
//! # Responsibilities
//! - Send one `grpc.health.v1.Health/Check` per enabled service
//! - Classify the answer: transport failure, not serving, or serving
//!
//! # Design Decisions
//! - Each service is bounded by its own configured timeout
//! - Only `SERVING` counts as healthy; `UNKNOWN` and `SERVICE_UNKNOWN` do not

use std::time::{Duration, Instant};

use crate::check::error::CheckError;
use crate::config::ServiceKind;
use crate::observability::metrics::{self, ProbeOutcome};
use crate::resilience::with_deadline;
use crate::transport::{HealthApi, ServingStatus};

/// Probe one service's health endpoint.
pub async fn probe<H: HealthApi>(
    kind: ServiceKind,
    mut client: H,
    timeout: Duration,
) -> Result<(), CheckError> {
    let service = kind.health_service_name();
    let start = Instant::now();

    let status = match with_deadline(timeout, client.serving_status(service)).await {
        Ok(status) => status,
        Err(e) => {
            tracing::warn!(service = %kind, error = %e, "Health check failed: RPC error");
            metrics::record_probe(kind, ProbeOutcome::Error, start);
            return Err(CheckError::probe(format!("check health of {}", service), e));
        }
    };

    if status != ServingStatus::Serving {
        tracing::warn!(service = %kind, status = status.as_str_name(), "Health check failed: not serving");
        metrics::record_probe(kind, ProbeOutcome::Unhealthy, start);
        return Err(CheckError::Unhealthy {
            service: service.to_string(),
            status: status.as_str_name().to_string(),
        });
    }

    tracing::debug!(service = %kind, elapsed = ?start.elapsed(), "Service is serving");
    metrics::record_probe(kind, ProbeOutcome::Serving, start);
    Ok(())
}
