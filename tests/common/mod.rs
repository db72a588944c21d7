//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::sync::oneshot;
use tonic::transport::Server;
use tonic_health::ServingStatus;

/// Start a gRPC health server reporting `statuses`.
///
/// Services not listed answer `NotFound`. Drop or fire the returned sender to
/// stop the server.
pub async fn start_health_server(
    addr: SocketAddr,
    statuses: &[(&'static str, ServingStatus)],
) -> oneshot::Sender<()> {
    let (mut reporter, service) = tonic_health::server::health_reporter();
    for (name, status) in statuses {
        reporter.set_service_status(*name, *status).await;
    }

    let (tx, rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        let _ = Server::builder()
            .add_service(service)
            .serve_with_shutdown(addr, async {
                let _ = rx.await;
            })
            .await;
    });

    // Give the listener time to bind.
    tokio::time::sleep(Duration::from_millis(100)).await;
    tx
}
