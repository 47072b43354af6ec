//! CSRF-aware client core for JSON APIs on Rails-style backends.
//!
//! # Overview
//! Builds `HttpRequest` values and classifies `RawOutcome` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, making the core fully deterministic and testable.
//!
//! The backend contract this core standardizes: a CSRF token header on
//! state-changing requests (read once from host page metadata), JSON bodies,
//! a JSON success payload on 2xx, and a JSON error payload on non-2xx.
//!
//! # Design
//! - `Client` is stateless beyond its lazily-cached CSRF token.
//! - Each exchange is split into `build` (produces a request as plain data)
//!   and a `classify_*` call (consumes the raw outcome), so the I/O boundary
//!   is explicit.
//! - Classification is total: every raw outcome maps to exactly one of
//!   success, transport failure, or decoded application error.
//! - The crate performs no retries and no logging; diagnostics travel in the
//!   returned values.

pub mod classify;
pub mod client;
pub mod error;
pub mod fields;
pub mod http;
pub mod token;

pub use classify::{
    classify_discard, classify_json, classify_json_serde, classify_json_shared, classify_text,
    json_decoder, ClassifiedOutcome,
};
pub use client::{Client, Expect, RequestSpec, HEADER_CSRF_TOKEN};
pub use error::{FieldDecodeError, TransportError};
pub use fields::{decode_field_errors, field_errors_decoder, FieldMapping};
pub use http::{HttpMethod, HttpRequest, RawOutcome, RequestBody, ResponseMeta};
pub use token::{CsrfTokenProvider, CSRF_META_NAME};
