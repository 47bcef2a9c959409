//! Wire-level protocol errors.
//!
//! These cover frame decoding only — semantic validation of an accepted
//! frame's payload (bad color, too few points, ...) is a concern of
//! `whiteboard-core`, not this crate.

use thiserror::Error;

/// Errors raised while decoding a client frame off the wire.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The frame was not valid JSON, or had no recognizable `type` tag.
    #[error("invalid message format: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for ProtocolError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}
