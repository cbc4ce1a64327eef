//! Test client speaking the length-prefixed frame protocol.

use futures_util::{SinkExt, StreamExt};
use relayd::frame::RelayCodec;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_util::codec::Framed;

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// A framed client connection to a test relay.
pub struct TestClient {
    framed: Framed<TcpStream, RelayCodec>,
}

impl TestClient {
    /// Connect to a test relay.
    pub async fn connect(addr: SocketAddr) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self {
            framed: Framed::new(stream, RelayCodec),
        })
    }

    /// Send one frame.
    pub async fn send(&mut self, line: &str) -> anyhow::Result<()> {
        self.framed.send(line).await?;
        Ok(())
    }

    /// Receive one frame, failing on timeout or end of stream.
    pub async fn recv(&mut self) -> anyhow::Result<String> {
        let frame = timeout(RECV_TIMEOUT, self.framed.next())
            .await
            .map_err(|_| anyhow::anyhow!("timed out waiting for a frame"))?
            .ok_or_else(|| anyhow::anyhow!("connection closed"))??;
        Ok(frame)
    }

    /// Expect the server to close the connection.
    #[allow(dead_code)]
    pub async fn expect_eof(&mut self) -> anyhow::Result<()> {
        match timeout(RECV_TIMEOUT, self.framed.next()).await {
            Ok(None) => Ok(()),
            Ok(Some(frame)) => anyhow::bail!("expected end of stream, got frame: {:?}", frame),
            Err(_) => anyhow::bail!("timed out waiting for end of stream"),
        }
    }

    /// Assert that no frame arrives within `dur`.
    #[allow(dead_code)]
    pub async fn expect_silence(&mut self, dur: Duration) {
        match timeout(dur, self.framed.next()).await {
            Err(_) => {} // nothing arrived, as expected
            Ok(Some(frame)) => panic!("unexpected frame: {:?}", frame),
            Ok(None) => panic!("connection closed unexpectedly"),
        }
    }
}
