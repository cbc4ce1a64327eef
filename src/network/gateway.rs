//! Gateway - TCP listener that accepts incoming connections.
//!
//! The Gateway binds the listen socket once at startup, then accepts
//! forever: each incoming client gets a generated name, a registered
//! [`Session`], and a dedicated worker task running the read loop. The
//! accept loop itself never blocks on a client.

use crate::registry::Registry;
use crate::router::Router;
use crate::session::Session;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, instrument};

use super::Connection;

/// Accepts incoming TCP connections and spawns session workers.
pub struct Gateway {
    listener: TcpListener,
    registry: Arc<Registry>,
    router: Arc<Router>,
}

impl Gateway {
    /// Bind the gateway to the specified address.
    ///
    /// Failure to bind is the only fatal startup error.
    pub async fn bind(addr: SocketAddr, registry: Arc<Registry>) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        info!(%addr, "Listener bound");

        let router = Arc::new(Router::new(Arc::clone(&registry)));
        Ok(Self {
            listener,
            registry,
            router,
        })
    }

    /// The bound local address. Tests bind port 0 and read it back here.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Run the gateway, accepting connections forever.
    #[instrument(skip(self), name = "gateway")]
    pub async fn run(self) -> anyhow::Result<()> {
        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    let name = self.registry.next_name();
                    info!(%addr, %name, "Connection accepted");

                    let (read_half, write_half) = stream.into_split();
                    let session = Arc::new(Session::new(name, addr, write_half));
                    self.registry.register(Arc::clone(&session));

                    let router = Arc::clone(&self.router);
                    tokio::spawn(Connection::new(session, read_half, router).run());
                }
                Err(e) => {
                    // Transient accept failures must not take the server
                    // down; existing sessions are unaffected.
                    error!(error = %e, "Failed to accept connection");
                }
            }
        }
    }
}
