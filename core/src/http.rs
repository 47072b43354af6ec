//! Plain-data HTTP types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and transport outcomes as plain data.
//! The core crate builds `HttpRequest` values and classifies `RawOutcome`
//! values without ever touching the network — the caller (host) is
//! responsible for executing the actual I/O. This separation keeps the core
//! deterministic and easy to test.
//!
//! All fields use owned types (`String`, `Vec`) so values can cross host
//! boundaries without lifetime concerns.

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// GET is the one read-only method that never carries the CSRF header.
    pub fn is_get(&self) -> bool {
        matches!(self, HttpMethod::Get)
    }
}

/// A request body: opaque text tagged with its MIME type.
///
/// The MIME type is carried on the body rather than merged into the header
/// list; the executing transport applies it as the `Content-Type` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBody {
    pub mime: String,
    pub content: String,
}

impl RequestBody {
    /// A body already serialized as JSON.
    pub fn json(content: impl Into<String>) -> Self {
        Self {
            mime: "application/json".to_string(),
            content: content.into(),
        }
    }
}

/// An HTTP request described as plain data.
///
/// Built by [`crate::Client::build`]. The caller is responsible for executing
/// this request against the network and reporting back a [`RawOutcome`].
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestBody>,
}

/// Metadata of a received response, independent of how its body decodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseMeta {
    pub url: String,
    pub status: u16,
    pub status_text: String,
    pub headers: Vec<(String, String)>,
}

impl ResponseMeta {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The raw result of an HTTP exchange, before any body interpretation.
///
/// Constructed by the caller after attempting an [`HttpRequest`], then passed
/// to the classification functions in [`crate::classify`]. The variants are
/// mutually exclusive; a received response lands in `Response` even when its
/// status is non-2xx.
#[derive(Debug, Clone)]
pub enum RawOutcome {
    /// The URL was malformed; the request was never attempted.
    BadUrl(String),

    /// No response arrived within the transport's configured deadline.
    Timeout,

    /// No response at all (DNS failure, connection refused, ...).
    NetworkError,

    /// A response was received, including non-2xx.
    Response { meta: ResponseMeta, body: String },
}
