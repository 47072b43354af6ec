//! Stateless request builder with Rails-flavored default headers.
//!
//! # Design
//! `Client` holds only a `CsrfTokenProvider` and carries no mutable state
//! between calls. Each call produces an `HttpRequest` as plain data; the
//! caller executes the actual round-trip and feeds the `RawOutcome` to
//! [`crate::classify`]. Header assembly is pure and cannot fail.
//!
//! Headers are an ordered list, not a map. Defaults come first, the CSRF
//! header (when applicable) second, caller headers last. A caller header
//! with the same name as a default is NOT deduplicated — both are sent.
//! This mirrors the behavior Rails backends have been receiving from this
//! client's predecessors and is preserved deliberately.

use crate::http::{HttpMethod, HttpRequest, RequestBody};
use crate::token::CsrfTokenProvider;

/// Header carrying the CSRF token on state-changing requests.
pub const HEADER_CSRF_TOKEN: &str = "X-CSRF-Token";

const ACCEPT_JSON: &str = "application/json, text/javascript, */*; q=0.01";
const ACCEPT_ANY: &str = "*/*";

/// How the response body will be interpreted.
///
/// Selects the `Accept` header here and the classification mode afterwards:
/// `Json` pairs with [`crate::classify::classify_json`] and friends, `Text`
/// with [`crate::classify::classify_text`], `Nothing` with
/// [`crate::classify::classify_discard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    /// Decode the body as JSON (success and error payloads alike).
    Json,
    /// Take any 2xx body verbatim as text.
    Text,
    /// Discard the body; only the status matters.
    Nothing,
}

impl Expect {
    fn accept(&self) -> &'static str {
        match self {
            Expect::Json => ACCEPT_JSON,
            Expect::Text | Expect::Nothing => ACCEPT_ANY,
        }
    }
}

/// Everything needed to build one outbound request. Constructed per call,
/// never reused.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub method: HttpMethod,
    pub url: String,
    /// Caller headers, appended after the defaults in the order given.
    /// Duplicate names are allowed and all are sent.
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestBody>,
    pub expect: Expect,
}

/// Builds outbound requests with the standard header set.
#[derive(Debug)]
pub struct Client {
    csrf: CsrfTokenProvider,
}

impl Client {
    pub fn new(csrf: CsrfTokenProvider) -> Self {
        Self { csrf }
    }

    /// Client for hosts with no document; never attaches a CSRF header.
    pub fn headless() -> Self {
        Self::new(CsrfTokenProvider::headless())
    }

    /// Assemble the full outbound request for `spec`.
    ///
    /// Default headers first, then `X-CSRF-Token` when the method is not GET
    /// and a token is present, then the caller's headers unchanged.
    pub fn build(&self, spec: RequestSpec) -> HttpRequest {
        let mut headers = Vec::with_capacity(spec.headers.len() + 3);
        headers.push(("Accept".to_string(), spec.expect.accept().to_string()));
        headers.push(("X-Requested-With".to_string(), "XMLHttpRequest".to_string()));

        if !spec.method.is_get() {
            if let Some(token) = self.csrf.token() {
                headers.push((HEADER_CSRF_TOKEN.to_string(), token.to_string()));
            }
        }

        headers.extend(spec.headers);

        HttpRequest {
            method: spec.method,
            url: spec.url,
            headers,
            body: spec.body,
        }
    }

    pub fn get(&self, url: impl Into<String>, expect: Expect) -> HttpRequest {
        self.build(RequestSpec {
            method: HttpMethod::Get,
            url: url.into(),
            headers: Vec::new(),
            body: None,
            expect,
        })
    }

    pub fn post(&self, url: impl Into<String>, body: RequestBody, expect: Expect) -> HttpRequest {
        self.build(RequestSpec {
            method: HttpMethod::Post,
            url: url.into(),
            headers: Vec::new(),
            body: Some(body),
            expect,
        })
    }

    pub fn put(&self, url: impl Into<String>, body: RequestBody, expect: Expect) -> HttpRequest {
        self.build(RequestSpec {
            method: HttpMethod::Put,
            url: url.into(),
            headers: Vec::new(),
            body: Some(body),
            expect,
        })
    }

    pub fn patch(&self, url: impl Into<String>, body: RequestBody, expect: Expect) -> HttpRequest {
        self.build(RequestSpec {
            method: HttpMethod::Patch,
            url: url.into(),
            headers: Vec::new(),
            body: Some(body),
            expect,
        })
    }

    pub fn delete(&self, url: impl Into<String>, expect: Expect) -> HttpRequest {
        self.build(RequestSpec {
            method: HttpMethod::Delete,
            url: url.into(),
            headers: Vec::new(),
            body: None,
            expect,
        })
    }
}
