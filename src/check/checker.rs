//! The checker: owns the connections and runs the two check tiers.

use std::time::Instant;

use tokio::sync::Mutex;

use crate::check::consistency;
use crate::check::error::{CheckError, CheckStep, ErrorList};
use crate::check::liveness;
use crate::config::validation::validate_services;
use crate::config::{CheckerConfig, ServiceKind};
use crate::observability::metrics;
use crate::transport::{Connection, ConnectionSet, Connector, GrpcConnector};

/// Health checker for one Temporal cluster.
///
/// `basic_check` and `full_check` are serialized behind one lock, so
/// concurrent callers queue instead of interleaving.
pub struct Checker<C: Connector = GrpcConnector> {
    config: CheckerConfig,
    state: Mutex<CheckerState<C::Connection>>,
}

struct CheckerState<T: Connection> {
    connections: ConnectionSet<T>,
    workflow: Option<T::Workflow>,
    operator: Option<T::Operator>,
}

impl<T: Connection> CheckerState<T> {
    /// Create the workflow and operator handles from the frontend channel
    /// unless they already exist.
    fn initialize_clients(&mut self, frontend_enabled: bool) -> Result<(), ErrorList> {
        if !frontend_enabled {
            return Err(CheckError::Initialization("frontend service is not enabled".into()).into());
        }
        let Some(frontend) = self.connections.get(ServiceKind::Frontend) else {
            return Err(CheckError::Initialization("frontend connection is closed".into()).into());
        };

        let mut errs = ErrorList::new();
        if self.workflow.is_none() {
            self.workflow = errs.record(frontend.workflow_client());
        }
        if self.operator.is_none() {
            self.operator = errs.record(frontend.operator_client());
        }
        errs.into_result()
    }

    fn release(&mut self) -> usize {
        self.workflow = None;
        self.operator = None;
        self.connections.close()
    }
}

fn missing_client(name: &str) -> CheckError {
    CheckError::Initialization(format!("{} client is not initialized", name))
}

impl Checker<GrpcConnector> {
    /// Validate `config` and open a gRPC channel to every enabled service.
    pub async fn connect(config: CheckerConfig) -> Result<Self, ErrorList> {
        Self::with_connector(config, &GrpcConnector).await
    }
}

impl<C: Connector> Checker<C> {
    /// Validate `config` and connect every enabled service with `connector`.
    ///
    /// Configuration errors are reported before anything is dialed. Dial
    /// failures are collected across all services; on any failure the
    /// channels that did open are dropped again.
    pub async fn with_connector(config: CheckerConfig, connector: &C) -> Result<Self, ErrorList> {
        validate_services(&config)?;

        let mut connections = ConnectionSet::new();
        let mut errs = ErrorList::new();
        for kind in config.enabled_services() {
            let svc = config.service(kind);
            match connector.connect(kind, svc).await {
                Ok(conn) => {
                    tracing::info!(service = %kind, address = %svc.address, "Connected");
                    connections.insert(kind, conn);
                }
                Err(e) => {
                    tracing::error!(service = %kind, address = %svc.address, error = %e, "Connection failed");
                    errs.push(e);
                }
            }
        }

        if !errs.is_empty() {
            connections.close();
            return Err(errs);
        }

        Ok(Self {
            config,
            state: Mutex::new(CheckerState {
                connections,
                workflow: None,
                operator: None,
            }),
        })
    }

    /// Number of channels currently held.
    pub async fn connection_count(&self) -> usize {
        self.state.lock().await.connections.len()
    }

    /// Liveness probe of every enabled service.
    ///
    /// All services are probed even if earlier ones fail.
    pub async fn basic_check(&self) -> Result<(), ErrorList> {
        let state = self.state.lock().await;
        let start = Instant::now();

        let mut errs = ErrorList::new();
        for kind in self.config.enabled_services() {
            let timeout = self.config.service(kind).timeout();
            match state.connections.get(kind) {
                Some(conn) => {
                    errs.record(liveness::probe(kind, conn.health_client(), timeout).await);
                }
                None => errs.push(CheckError::probe(
                    format!("check health of {}", kind.health_service_name()),
                    tonic::Status::unavailable("connection is closed"),
                )),
            }
        }

        metrics::record_check_duration("basic", start);
        tracing::debug!(failures = errs.len(), elapsed = ?start.elapsed(), "Basic check finished");
        errs.into_result()
    }

    /// Cluster consistency probe through the frontend.
    ///
    /// Does nothing when the frontend is disabled. Every sub-check runs even
    /// if an earlier one failed; failures carry the sub-check as prefix.
    pub async fn full_check(&self) -> Result<(), ErrorList> {
        if !self.config.frontend.enabled {
            tracing::debug!("Frontend disabled, skipping full check");
            return Ok(());
        }

        let mut guard = self.state.lock().await;
        let state = &mut *guard;
        let timeout = self.config.frontend.timeout();
        let start = Instant::now();
        let mut errs = ErrorList::new();

        if let Err(e) = state.initialize_clients(self.config.frontend.enabled) {
            errs.extend_in_step(CheckStep::InitializeClients, e);
        }

        match state.workflow.as_mut() {
            Some(wfs) => {
                if let Err(e) = consistency::check_cluster_info(wfs, timeout).await {
                    errs.extend_in_step(CheckStep::ClusterInfo, e);
                }
            }
            None => errs.push(missing_client("workflow service").in_step(CheckStep::ClusterInfo)),
        }
        tracing::debug!(step = "cluster_info", elapsed = ?start.elapsed(), "Sub-check done");

        match state.workflow.as_mut() {
            Some(wfs) => {
                if let Err(e) = consistency::check_system_info(wfs, timeout).await {
                    errs.push(e.in_step(CheckStep::SystemInfo));
                }
            }
            None => errs.push(missing_client("workflow service").in_step(CheckStep::SystemInfo)),
        }
        tracing::debug!(step = "system_info", elapsed = ?start.elapsed(), "Sub-check done");

        match state.workflow.as_mut() {
            Some(wfs) => {
                if let Err(e) = consistency::check_namespaces(wfs, timeout).await {
                    errs.push(e.in_step(CheckStep::Namespaces));
                }
            }
            None => errs.push(missing_client("workflow service").in_step(CheckStep::Namespaces)),
        }
        tracing::debug!(step = "namespaces", elapsed = ?start.elapsed(), "Sub-check done");

        match state.operator.as_mut() {
            Some(ops) => {
                if let Err(e) = consistency::check_peer_clusters(ops, timeout).await {
                    errs.push(e.in_step(CheckStep::PeerClusters));
                }
            }
            None => errs.push(missing_client("operator service").in_step(CheckStep::PeerClusters)),
        }
        tracing::debug!(step = "peer_clusters", elapsed = ?start.elapsed(), "Sub-check done");

        metrics::record_check_duration("full", start);
        errs.into_result()
    }

    /// Close every channel. Safe to call repeatedly and before any check.
    pub async fn close(&self) {
        let closed = self.state.lock().await.release();
        if closed > 0 {
            tracing::info!(connections = closed, "Checker closed");
        }
    }
}
