//! Addressed-delivery routing.
//!
//! Inbound lines take one of two shapes: the literal `exit` control
//! command, or `body#recipient`. The router parses the line, looks the
//! recipient up in the [`Registry`], and forwards `"<sender> : <body>"` to
//! the recipient's write stream.

use crate::error::RouteError;
use crate::registry::Registry;
use std::sync::Arc;

/// Control command requesting graceful session termination. Matched
/// case-sensitively against the whole line, never parsed as a message.
pub const EXIT_COMMAND: &str = "exit";

/// Delimiter between message body and recipient name.
const DELIMITER: char = '#';

/// What the router did with a line.
#[derive(Debug, PartialEq, Eq)]
pub enum RouteAction {
    /// The payload was forwarded to the named live session.
    Delivered { recipient: String },
    /// The line was the exit command; the calling session should close.
    Exit,
}

/// Maps a raw inbound line to its destination session.
#[derive(Debug)]
pub struct Router {
    registry: Arc<Registry>,
}

impl Router {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// Route one raw line received from `sender`.
    ///
    /// Errors are classifications for the caller to log; none of them are
    /// fatal to the session, and the sender is never notified of a failed
    /// delivery.
    pub async fn route(&self, sender: &str, line: &str) -> Result<RouteAction, RouteError> {
        if line == EXIT_COMMAND {
            return Ok(RouteAction::Exit);
        }

        let (body, recipient) = parse_line(line)?;

        let session = self
            .registry
            .find_active(recipient)
            .ok_or_else(|| RouteError::UnknownRecipient(recipient.to_string()))?;

        session.send(&format!("{sender} : {body}")).await?;

        Ok(RouteAction::Delivered {
            recipient: recipient.to_string(),
        })
    }
}

/// Split a raw line into `(body, recipient)`.
///
/// Tokenizer semantics: empty segments produced by leading, trailing, or
/// doubled delimiters are skipped, and anything after the second token is
/// ignored. Fewer than two tokens is a malformed message.
fn parse_line(line: &str) -> Result<(&str, &str), RouteError> {
    let mut tokens = line.split(DELIMITER).filter(|t| !t.is_empty());
    match (tokens.next(), tokens.next()) {
        (Some(body), Some(recipient)) => Ok((body, recipient)),
        _ => Err(RouteError::Malformed(line.to_string())),
    }
}
