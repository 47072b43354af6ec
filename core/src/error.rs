//! Error types for the client core.
//!
//! # Design
//! `BadBody` gets a message-bearing variant because callers frequently need
//! the decode detail (and, on the error path, the raw status and body) for
//! diagnostics. The other transport variants carry no payload beyond the
//! offending URL — they are surfaced verbatim from the host transport and
//! are never recoverable by this library.

use thiserror::Error;

/// Transport-level failure: the exchange or its body contract broke down
/// before any application-level error could be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The URL was malformed; the request was never attempted.
    #[error("bad url: {0}")]
    BadUrl(String),

    /// No response within the transport's configured deadline.
    #[error("request timed out")]
    Timeout,

    /// No response reachable at all (DNS failure, connection refused, ...).
    #[error("network unreachable")]
    NetworkUnreachable,

    /// A response arrived but its body violated the expected contract,
    /// whether on the success or the error path. The message carries the
    /// decode detail and, for non-2xx responses, the raw status and body.
    #[error("{0}")]
    BadBody(String),
}

/// Failure to decode a Rails-style validation error document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldDecodeError {
    /// A field path in the document has no registered tag. Fail-fast: a
    /// single unmapped path invalidates the whole decode.
    #[error("Unrecognized Field: {0}")]
    UnrecognizedField(String),

    /// The document does not have the `{"errors": {path: [messages]}}` shape.
    #[error("malformed error document: {0}")]
    Malformed(String),
}
