//! Response classification: raw transport outcome in, one of three terminal
//! results out.
//!
//! # Design
//! Classification runs exactly once per completed or failed transport
//! attempt and produces exactly one [`ClassifiedOutcome`] variant. The split
//! is deliberate:
//!
//! - a 2xx body that fails to decode is a `Transport(BadBody)`, never an
//!   `Application` value, because the server violated its contract rather
//!   than rejecting the request;
//! - a non-2xx body that decodes under the error decoder is the expected
//!   `Application` channel (validation failures and the like);
//! - a non-2xx body that fails to decode is also `Transport(BadBody)`, with
//!   the raw status and body preserved in the message for diagnostics.
//!
//! Decoders must be pure. No retries, no logging: callers decide whether to
//! retry by re-running the whole pipeline.

use serde::de::DeserializeOwned;

use crate::error::TransportError;
use crate::http::{RawOutcome, ResponseMeta};

/// Terminal result of one request, handed to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedOutcome<E, S> {
    /// 2xx response whose body decoded under the success decoder.
    Success(S),
    /// The exchange itself failed, or a body violated its contract.
    Transport(TransportError),
    /// Non-2xx response whose body decoded under the error decoder, with the
    /// response metadata it arrived under.
    Application(ResponseMeta, E),
}

/// Classify a JSON-expecting outcome with an explicit decoder pair.
///
/// Decoders take the body text and return either the decoded value or a
/// human-readable detail of where decoding failed. They are never invoked
/// for `BadUrl`, `Timeout`, or `NetworkError` outcomes.
pub fn classify_json<S, E>(
    outcome: RawOutcome,
    decode_success: impl FnOnce(&str) -> Result<S, String>,
    decode_error: impl FnOnce(&str) -> Result<E, String>,
) -> ClassifiedOutcome<E, S> {
    let (meta, body) = match outcome {
        RawOutcome::BadUrl(url) => {
            return ClassifiedOutcome::Transport(TransportError::BadUrl(url))
        }
        RawOutcome::Timeout => return ClassifiedOutcome::Transport(TransportError::Timeout),
        RawOutcome::NetworkError => {
            return ClassifiedOutcome::Transport(TransportError::NetworkUnreachable)
        }
        RawOutcome::Response { meta, body } => (meta, body),
    };

    if meta.is_success() {
        match decode_success(&body) {
            Ok(value) => ClassifiedOutcome::Success(value),
            Err(detail) => ClassifiedOutcome::Transport(TransportError::BadBody(format!(
                "Failed to decode result: {detail}"
            ))),
        }
    } else {
        match decode_error(&body) {
            Ok(value) => ClassifiedOutcome::Application(meta, value),
            Err(detail) => ClassifiedOutcome::Transport(TransportError::BadBody(format!(
                "Failed to decode error: {detail} (status {}, body: {body})",
                meta.status
            ))),
        }
    }
}

/// A serde-backed decoder usable in either slot of [`classify_json`].
pub fn json_decoder<T: DeserializeOwned>() -> impl Fn(&str) -> Result<T, String> {
    |body| serde_json::from_str(body).map_err(|e| e.to_string())
}

/// [`classify_json`] with serde decoders for both the success and error type.
pub fn classify_json_serde<S, E>(outcome: RawOutcome) -> ClassifiedOutcome<E, S>
where
    S: DeserializeOwned,
    E: DeserializeOwned,
{
    classify_json(outcome, json_decoder::<S>(), json_decoder::<E>())
}

/// [`classify_json`] decoding the same shape on both the success and error
/// path, for endpoints that answer with one payload type regardless of
/// status.
pub fn classify_json_shared<T: DeserializeOwned>(outcome: RawOutcome) -> ClassifiedOutcome<T, T> {
    classify_json(outcome, json_decoder::<T>(), json_decoder::<T>())
}

/// Take any 2xx body verbatim as text; no JSON parsing, no `Application`
/// branch. Non-2xx responses become `BadBody` carrying the raw status and
/// body for diagnostics.
pub fn classify_text(outcome: RawOutcome) -> Result<String, TransportError> {
    match outcome {
        RawOutcome::BadUrl(url) => Err(TransportError::BadUrl(url)),
        RawOutcome::Timeout => Err(TransportError::Timeout),
        RawOutcome::NetworkError => Err(TransportError::NetworkUnreachable),
        RawOutcome::Response { meta, body } => {
            if meta.is_success() {
                Ok(body)
            } else {
                Err(TransportError::BadBody(format!(
                    "unexpected status {} {}: {body}",
                    meta.status, meta.status_text
                )))
            }
        }
    }
}

/// Like [`classify_text`] but the success body is discarded.
pub fn classify_discard(outcome: RawOutcome) -> Result<(), TransportError> {
    classify_text(outcome).map(|_| ())
}
