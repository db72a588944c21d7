//! Scripted in-memory transport for unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::check::error::CheckError;
use crate::check::snapshot::{
    ClusterInfo, NamespaceState, NamespaceSummary, PeerClusterSummary, SystemCapabilities,
};
use crate::config::{ServiceConfig, ServiceKind};
use crate::transport::{Connection, Connector, HealthApi, OperatorApi, ServingStatus, WorkflowApi};

/// What the fake cluster answers.
#[derive(Debug)]
pub struct FakeCluster {
    pub statuses: HashMap<ServiceKind, ServingStatus>,
    pub health_errors: HashMap<ServiceKind, tonic::Status>,
    pub health_delay: Option<Duration>,
    pub refuse: HashSet<ServiceKind>,
    pub workflow_init_fails: bool,
    pub cluster_info: ClusterInfo,
    pub cluster_info_error: Option<tonic::Status>,
    pub system_info_error: Option<tonic::Status>,
    pub namespaces: Vec<NamespaceSummary>,
    pub namespaces_error: Option<tonic::Status>,
    pub peers: Vec<PeerClusterSummary>,
    pub peers_error: Option<tonic::Status>,
    /// Added to every workflow service call.
    pub workflow_delay: Option<Duration>,
    pub peers_delay: Option<Duration>,

    /// Every dial, in order.
    pub dialed: Mutex<Vec<ServiceKind>>,
    /// Every health service name probed, in order.
    pub probed: Mutex<Vec<String>>,
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl FakeCluster {
    /// A cluster where every call succeeds.
    pub fn healthy() -> Self {
        Self {
            statuses: HashMap::new(),
            health_errors: HashMap::new(),
            health_delay: None,
            refuse: HashSet::new(),
            workflow_init_fails: false,
            cluster_info: ClusterInfo {
                cluster_id: "c-1".into(),
                cluster_name: "active".into(),
                server_version: "1.22.4".into(),
                history_shard_count: 4,
                ..ClusterInfo::default()
            },
            cluster_info_error: None,
            system_info_error: None,
            namespaces: vec![NamespaceSummary {
                name: "default".into(),
                state: NamespaceState::Registered,
                description: String::new(),
            }],
            namespaces_error: None,
            peers: vec![peer("active", true)],
            peers_error: None,
            workflow_delay: None,
            peers_delay: None,
            dialed: Mutex::new(Vec::new()),
            probed: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn dialed(&self) -> Vec<ServiceKind> {
        self.dialed.lock().unwrap().clone()
    }

    pub fn probed(&self) -> Vec<String> {
        self.probed.lock().unwrap().clone()
    }
}

async fn pause(delay: Option<Duration>) {
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
}

pub fn peer(name: &str, connected: bool) -> PeerClusterSummary {
    PeerClusterSummary {
        cluster_name: name.into(),
        cluster_id: format!("{name}-id"),
        address: format!("{name}:7233"),
        is_connection_enabled: connected,
    }
}

#[derive(Debug, Clone)]
pub struct FakeConnector {
    pub cluster: Arc<FakeCluster>,
}

impl FakeConnector {
    pub fn new(cluster: FakeCluster) -> Self {
        Self {
            cluster: Arc::new(cluster),
        }
    }
}

#[async_trait]
impl Connector for FakeConnector {
    type Connection = FakeConnection;

    async fn connect(
        &self,
        kind: ServiceKind,
        config: &ServiceConfig,
    ) -> Result<FakeConnection, CheckError> {
        if self.cluster.refuse.contains(&kind) {
            return Err(CheckError::Connection {
                service: kind,
                address: config.address.clone(),
                reason: "refused".into(),
            });
        }
        self.cluster.dialed.lock().unwrap().push(kind);
        Ok(FakeConnection {
            kind,
            cluster: self.cluster.clone(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct FakeConnection {
    kind: ServiceKind,
    cluster: Arc<FakeCluster>,
}

impl Connection for FakeConnection {
    type Health = FakeClient;
    type Workflow = FakeClient;
    type Operator = FakeClient;

    fn health_client(&self) -> FakeClient {
        FakeClient {
            kind: self.kind,
            cluster: self.cluster.clone(),
        }
    }

    fn workflow_client(&self) -> Result<FakeClient, CheckError> {
        if self.cluster.workflow_init_fails {
            return Err(CheckError::Initialization(
                "failed to initialize WorkflowServiceClient".into(),
            ));
        }
        Ok(self.health_client())
    }

    fn operator_client(&self) -> Result<FakeClient, CheckError> {
        Ok(self.health_client())
    }
}

#[derive(Debug, Clone)]
pub struct FakeClient {
    kind: ServiceKind,
    cluster: Arc<FakeCluster>,
}

fn scripted<T>(error: &Option<tonic::Status>, value: T) -> Result<T, tonic::Status> {
    match error {
        Some(status) => Err(status.clone()),
        None => Ok(value),
    }
}

#[async_trait]
impl HealthApi for FakeClient {
    async fn serving_status(&mut self, service: &str) -> Result<ServingStatus, tonic::Status> {
        self.cluster.probed.lock().unwrap().push(service.to_string());
        if let Some(delay) = self.cluster.health_delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(status) = self.cluster.health_errors.get(&self.kind) {
            return Err(status.clone());
        }
        Ok(self
            .cluster
            .statuses
            .get(&self.kind)
            .copied()
            .unwrap_or(ServingStatus::Serving))
    }
}

#[async_trait]
impl WorkflowApi for FakeClient {
    async fn cluster_info(&mut self) -> Result<ClusterInfo, tonic::Status> {
        let now = self.cluster.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.cluster.max_in_flight.fetch_max(now, Ordering::SeqCst);
        pause(self.cluster.workflow_delay).await;
        self.cluster.in_flight.fetch_sub(1, Ordering::SeqCst);
        scripted(&self.cluster.cluster_info_error, self.cluster.cluster_info.clone())
    }

    async fn system_info(&mut self) -> Result<SystemCapabilities, tonic::Status> {
        pause(self.cluster.workflow_delay).await;
        let caps = SystemCapabilities {
            server_version: self.cluster.cluster_info.server_version.clone(),
            sdk_metadata: true,
            ..SystemCapabilities::default()
        };
        scripted(&self.cluster.system_info_error, caps)
    }

    async fn list_namespaces(
        &mut self,
        page_size: i32,
    ) -> Result<Vec<NamespaceSummary>, tonic::Status> {
        pause(self.cluster.workflow_delay).await;
        let page = self
            .cluster
            .namespaces
            .iter()
            .take(page_size.max(0) as usize)
            .cloned()
            .collect();
        scripted(&self.cluster.namespaces_error, page)
    }
}

#[async_trait]
impl OperatorApi for FakeClient {
    async fn list_clusters(&mut self) -> Result<Vec<PeerClusterSummary>, tonic::Status> {
        pause(self.cluster.peers_delay).await;
        scripted(&self.cluster.peers_error, self.cluster.peers.clone())
    }
}
