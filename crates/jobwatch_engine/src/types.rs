use std::fmt;

use jobwatch_core::ListingId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: Option<String> },
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType {
                content_type: Some(content_type),
            } => write!(f, "unexpected content type '{content_type}'"),
            FailureKind::UnsupportedContentType { content_type: None } => {
                write!(f, "missing content type")
            }
            FailureKind::Decode => write!(f, "malformed response body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Failure to reach the messaging provider. Not recovered from: it aborts the run.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("messaging request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("messaging provider answered {status}: {body}")]
    HttpStatus { status: u16, body: String },
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error(
        "dispatch for listing {} failed: {source}",
        .id.as_ref().map_or("<no id>", ListingId::as_str)
    )]
    Dispatch {
        id: Option<ListingId>,
        #[source]
        source: DispatchError,
    },
}
