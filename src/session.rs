//! Per-connection session state.
//!
//! A [`Session`] wraps the writable half of one accepted connection plus
//! the metadata other tasks need to route to it: the assigned name and a
//! liveness flag. The readable half stays with the session's own worker
//! task ([`crate::network::Connection`]); everything here may be touched
//! from other sessions' workers, so the writer sits behind a mutex and the
//! flag is atomic.

use crate::error::SessionError;
use crate::frame::RelayCodec;
use futures_util::SinkExt;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::net::tcp::OwnedWriteHalf;
use tokio::sync::Mutex;
use tokio_util::codec::FramedWrite;
use tracing::debug;

/// Server-side state for one connected client.
pub struct Session {
    /// Assigned display name. Immutable after construction.
    name: String,
    /// Peer address, for logging.
    addr: SocketAddr,
    /// True until the session's worker tears the connection down. The
    /// transition is one-way: true to false, exactly once.
    active: AtomicBool,
    /// Framed write half. The mutex makes each `send` an atomic unit at
    /// the stream level even when several senders target this session.
    writer: Mutex<FramedWrite<OwnedWriteHalf, RelayCodec>>,
}

impl Session {
    /// Wrap the write half of an accepted connection.
    pub fn new(name: String, addr: SocketAddr, write_half: OwnedWriteHalf) -> Self {
        Self {
            name,
            addr,
            active: AtomicBool::new(true),
            writer: Mutex::new(FramedWrite::new(write_half, RelayCodec)),
        }
    }

    /// The assigned display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The peer address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Whether this session can still receive deliveries.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Write one complete frame to this session's client.
    ///
    /// Fails with [`SessionError::Closed`] if the session has been marked
    /// inactive; stream failures are returned to the caller rather than
    /// swallowed.
    pub async fn send(&self, text: &str) -> Result<(), SessionError> {
        if !self.is_active() {
            return Err(SessionError::Closed);
        }

        let mut writer = self.writer.lock().await;
        // Re-check under the lock: a send racing mark_inactive must not
        // write into a stream that was just shut down.
        if !self.is_active() {
            return Err(SessionError::Closed);
        }
        writer.send(text).await?;
        Ok(())
    }

    /// Flip the liveness flag and close the write stream.
    ///
    /// Idempotent: only the first call performs the close, so a worker
    /// tearing down on both the exit command and a subsequent stream error
    /// cannot double-close.
    pub async fn mark_inactive(&self) {
        if self.active.swap(false, Ordering::AcqRel) {
            let mut writer = self.writer.lock().await;
            if let Err(e) = SinkExt::<&str>::close(&mut *writer).await {
                debug!(name = %self.name, error = %e, "Write stream close failed");
            }
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("name", &self.name)
            .field("addr", &self.addr)
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}
