//! One-shot check run.
//!
//! # Responsibilities
//! - Build the checker from validated config
//! - Run BasicCheck, then FullCheck if the basic tier passed
//! - Report cumulative elapsed time per phase
//! - Map the result to a process exit code

use std::process::ExitCode;
use std::time::Instant;

use crate::check::{Checker, ErrorList};
use crate::config::CheckerConfig;
use crate::lifecycle::shutdown::with_checker;
use crate::transport::Connector;

/// Result of one pass.
#[derive(Debug)]
pub enum RunOutcome {
    /// Every enabled service is serving and the cluster is consistent.
    Healthy,
    /// The checker could not be built (bad address, dial failure).
    Misconfigured(ErrorList),
    /// A check failed.
    Unhealthy(ErrorList),
}

impl RunOutcome {
    /// 0 healthy, 1 unhealthy, 2 misconfigured.
    pub fn code(&self) -> u8 {
        match self {
            RunOutcome::Healthy => 0,
            RunOutcome::Unhealthy(_) => 1,
            RunOutcome::Misconfigured(_) => 2,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code())
    }

    pub fn errors(&self) -> Option<&ErrorList> {
        match self {
            RunOutcome::Healthy => None,
            RunOutcome::Misconfigured(errs) | RunOutcome::Unhealthy(errs) => Some(errs),
        }
    }
}

/// Connect, run both check tiers, and close.
pub async fn run_checks<C: Connector>(config: CheckerConfig, connector: &C) -> RunOutcome {
    let start = Instant::now();

    let checker = match Checker::with_connector(config, connector).await {
        Ok(checker) => checker,
        Err(errs) => return RunOutcome::Misconfigured(errs),
    };
    tracing::info!(elapsed = ?start.elapsed(), "Checker created");

    with_checker(checker, |checker| async move {
        tracing::info!("BasicCheck is starting...");
        if let Err(errs) = checker.basic_check().await {
            return RunOutcome::Unhealthy(errs);
        }
        tracing::info!(elapsed = ?start.elapsed(), "BasicCheck is done");

        tracing::info!("FullCheck is starting...");
        if let Err(errs) = checker.full_check().await {
            return RunOutcome::Unhealthy(errs);
        }
        tracing::info!(elapsed = ?start.elapsed(), "FullCheck is done");

        tracing::info!("All services are healthy");
        RunOutcome::Healthy
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::fake::{peer, FakeCluster, FakeConnector};
    use crate::config::{ServiceConfig, ServiceKind};
    use crate::transport::ServingStatus;

    fn config() -> CheckerConfig {
        CheckerConfig {
            frontend: ServiceConfig::enabled("frontend:7233", 5),
            history: ServiceConfig::enabled("history:7234", 5),
            ..CheckerConfig::default()
        }
    }

    #[tokio::test]
    async fn test_healthy_run_exits_zero() {
        let connector = FakeConnector::new(FakeCluster::healthy());
        let outcome = run_checks(config(), &connector).await;
        assert!(matches!(outcome, RunOutcome::Healthy));
        assert_eq!(outcome.code(), 0);
    }

    #[tokio::test]
    async fn test_basic_failure_skips_full_check() {
        let mut cluster = FakeCluster::healthy();
        cluster.statuses.insert(ServiceKind::History, ServingStatus::NotServing);
        cluster.peers = vec![peer("standby", false)];
        let connector = FakeConnector::new(cluster);

        let outcome = run_checks(config(), &connector).await;

        let errs = outcome.errors().unwrap();
        assert_eq!(errs.len(), 1);
        assert!(errs.iter().all(|e| e.step().is_none()));
        assert_eq!(outcome.code(), 1);
    }

    #[tokio::test]
    async fn test_bad_config_exits_two() {
        let connector = FakeConnector::new(FakeCluster::healthy());
        let mut config = config();
        config.history.address = String::new();

        let outcome = run_checks(config, &connector).await;

        assert!(matches!(outcome, RunOutcome::Misconfigured(_)));
        assert_eq!(outcome.code(), 2);
    }

    #[tokio::test]
    async fn test_full_failure_is_reported() {
        let mut cluster = FakeCluster::healthy();
        cluster.peers = vec![peer("active", true), peer("standby", false)];
        let connector = FakeConnector::new(cluster);

        let outcome = run_checks(config(), &connector).await;

        let errs = outcome.errors().unwrap();
        assert_eq!(
            errs.report(),
            "Health check failed: failed to check clusters: cluster 1 is not connected"
        );
    }
}
