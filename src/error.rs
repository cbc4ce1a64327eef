//! Error taxonomy for the relay core.
//!
//! Every failure path is classified here or in the module that owns it
//! ([`FrameError`](crate::frame::FrameError) stays next to the codec,
//! [`ConfigError`](crate::config::ConfigError) next to config loading).
//! Per-session errors are contained within that session's worker; nothing
//! is fatal to the process except failing to bind the listen port.

use crate::frame::FrameError;
use thiserror::Error;

/// Errors surfaced by [`Session::send`](crate::session::Session::send).
#[derive(Debug, Error)]
pub enum SessionError {
    /// The session was marked inactive before or during the write.
    #[error("session is closed")]
    Closed,

    /// The payload could not be framed or the underlying stream failed.
    #[error(transparent)]
    Frame(#[from] FrameError),
}

/// Errors produced while routing one inbound line.
#[derive(Debug, Error)]
pub enum RouteError {
    /// The line did not split into a body and a recipient.
    #[error("malformed message {0:?}, expected \"body#recipient\"")]
    Malformed(String),

    /// No live session carries the requested name. The protocol drops
    /// these silently from the sender's point of view.
    #[error("no active session named {0:?}")]
    UnknownRecipient(String),

    /// The recipient was found but the write to it failed.
    #[error("delivery failed: {0}")]
    Delivery(#[from] SessionError),
}

impl RouteError {
    /// Static error code for log field labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Malformed(_) => "malformed",
            Self::UnknownRecipient(_) => "unknown_recipient",
            Self::Delivery(_) => "delivery_failed",
        }
    }
}
