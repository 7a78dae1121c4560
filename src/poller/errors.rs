//! Upstream fetch errors
//!
//! Every variant is handled the same way at the poller boundary: logged,
//! and the record keeps its previous snapshot.

use std::fmt;
use std::fmt::Display;

#[derive(Debug)]
pub enum FetchError {
    /// Collaborator unreachable, timed out, or the body could not be read
    Transport(String),

    /// Collaborator answered with a non-success status code
    Status { code: u16, body: String },

    /// Body was not the expected JSON shape
    Malformed(serde_json::Error),

    /// Body parsed but carried nothing to map (e.g. no players)
    Empty(&'static str),
}

impl std::error::Error for FetchError {}

impl Display for FetchError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FetchError::Transport(e) => write!(fmt, "transport error: {}", e),
            FetchError::Status { code, body } => write!(fmt, "status {}: {}", code, body),
            FetchError::Malformed(e) => write!(fmt, "malformed response: {}", e),
            FetchError::Empty(what) => write!(fmt, "empty response: {}", what),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Malformed(e)
    }
}
