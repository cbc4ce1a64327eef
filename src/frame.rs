//! Wire framing: 2-byte big-endian length prefix + UTF-8 payload.
//!
//! Every message on the wire is one frame. The length prefix counts the
//! payload bytes only, so payloads are capped at 65535 bytes. Partial
//! frames stay buffered until the rest arrives.

use bytes::{Buf, BufMut, BytesMut};
use thiserror::Error;
use tokio_util::codec::{Decoder, Encoder};

/// Maximum payload length representable by the 2-byte prefix.
pub const MAX_PAYLOAD_LEN: usize = u16::MAX as usize;

/// Framing errors.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("frame payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("payload of {0} bytes exceeds the 65535-byte frame limit")]
    TooLong(usize),
}

/// Codec for length-prefixed UTF-8 string frames.
#[derive(Debug, Default, Clone, Copy)]
pub struct RelayCodec;

impl Decoder for RelayCodec {
    type Item = String;
    type Error = FrameError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<String>, FrameError> {
        if src.len() < 2 {
            return Ok(None);
        }

        let len = u16::from_be_bytes([src[0], src[1]]) as usize;
        if src.len() < 2 + len {
            // Wait for the rest of the frame.
            src.reserve(2 + len - src.len());
            return Ok(None);
        }

        src.advance(2);
        let payload = src.split_to(len);
        let text = String::from_utf8(payload.to_vec())?;
        Ok(Some(text))
    }
}

impl Encoder<&str> for RelayCodec {
    type Error = FrameError;

    fn encode(&mut self, item: &str, dst: &mut BytesMut) -> Result<(), FrameError> {
        let bytes = item.as_bytes();
        if bytes.len() > MAX_PAYLOAD_LEN {
            return Err(FrameError::TooLong(bytes.len()));
        }

        dst.reserve(2 + bytes.len());
        dst.put_u16(bytes.len() as u16);
        dst.extend_from_slice(bytes);
        Ok(())
    }
}

impl Encoder<String> for RelayCodec {
    type Error = FrameError;

    fn encode(&mut self, item: String, dst: &mut BytesMut) -> Result<(), FrameError> {
        Encoder::<&str>::encode(self, item.as_str(), dst)
    }
}
