//! Shared integration test harness.

mod client;

pub use client::TestClient;

use relayd::network::Gateway;
use relayd::registry::Registry;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Spawn an in-process relay on an ephemeral loopback port and return its
/// address. The gateway task runs for the rest of the test process.
pub async fn spawn_relay() -> SocketAddr {
    let registry = Arc::new(Registry::new());
    let gateway = Gateway::bind("127.0.0.1:0".parse().unwrap(), registry)
        .await
        .expect("failed to bind test gateway");
    let addr = gateway.local_addr().expect("no local addr");

    tokio::spawn(async move {
        let _ = gateway.run().await;
    });

    addr
}

/// Give the server a moment to accept and register pending connections.
/// Name assignment happens in the accept loop, so tests that depend on
/// connection order settle between connects.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}
