//! Connection - the per-session read loop.
//!
//! Each accepted connection runs one worker task through this state
//! machine:
//!
//! ```text
//! CONNECTED → READING → (EXIT_REQUESTED | STREAM_ERROR) → CLOSED
//! ```
//!
//! Every inbound frame is handed to the [`Router`]. Routing failures are
//! logged and dropped, never fatal to the worker; only the exit command,
//! end of stream, or a stream error leaves the read loop. CLOSED always
//! tombstones the session.

use crate::error::RouteError;
use crate::frame::RelayCodec;
use crate::router::{RouteAction, Router};
use crate::session::Session;
use futures_util::StreamExt;
use std::sync::Arc;
use tokio::net::tcp::OwnedReadHalf;
use tokio_util::codec::FramedRead;
use tracing::{debug, info, instrument, warn};

/// Worker for one client connection.
pub struct Connection {
    session: Arc<Session>,
    reader: FramedRead<OwnedReadHalf, RelayCodec>,
    router: Arc<Router>,
}

impl Connection {
    pub fn new(session: Arc<Session>, read_half: OwnedReadHalf, router: Arc<Router>) -> Self {
        Self {
            session,
            reader: FramedRead::new(read_half, RelayCodec),
            router,
        }
    }

    /// Run the read loop until the client exits or the stream dies.
    #[instrument(
        skip(self),
        fields(name = %self.session.name(), addr = %self.session.addr()),
        name = "session"
    )]
    pub async fn run(mut self) {
        loop {
            match self.reader.next().await {
                Some(Ok(line)) => {
                    debug!(raw = %line, "Received frame");

                    match self.router.route(self.session.name(), &line).await {
                        Ok(RouteAction::Delivered { recipient }) => {
                            debug!(%recipient, "Message delivered");
                        }
                        Ok(RouteAction::Exit) => {
                            info!("Exit requested");
                            break;
                        }
                        Err(e @ RouteError::UnknownRecipient(_)) => {
                            // Silent drop from the sender's point of view.
                            debug!(code = e.error_code(), error = %e, "Message dropped");
                        }
                        Err(e) => {
                            warn!(code = e.error_code(), error = %e, "Message dropped");
                        }
                    }
                }
                Some(Err(e)) => {
                    warn!(error = %e, "Read stream error");
                    break;
                }
                None => {
                    info!("Client disconnected");
                    break;
                }
            }
        }

        self.session.mark_inactive().await;
        info!("Session closed");
    }
}
