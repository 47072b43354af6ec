//! CSRF token sourced once from host page metadata.
//!
//! # Design
//! The token lives in a `<meta name="csrf-token" content="...">` tag on the
//! host page and does not change during a session, so it is read at most once
//! and cached. The DOM query itself is a host capability: the provider takes
//! a lookup closure instead of touching any document directly, which keeps
//! the core runnable in headless and test contexts where no document exists.
//! Absence is the only failure signal — a missing tag, a missing content
//! attribute, and a missing document all yield `None`.

use std::fmt;
use std::sync::OnceLock;

/// Name of the meta tag the token is read from.
pub const CSRF_META_NAME: &str = "csrf-token";

/// Lazily reads and caches the CSRF token from host page metadata.
///
/// The first call to [`token`](Self::token) evaluates the lookup closure for
/// `csrf-token` and caches the result, present or absent. Later calls return
/// the cached value. Safe under concurrent first access: the lookup is
/// required to be side-effect-free, so a raced recomputation is harmless and
/// `OnceLock` guarantees a single stored result either way.
pub struct CsrfTokenProvider {
    lookup: Box<dyn Fn(&str) -> Option<String> + Send + Sync>,
    cached: OnceLock<Option<String>>,
}

impl CsrfTokenProvider {
    /// Provider backed by a host metadata lookup (a DOM query in a browser
    /// host, a fixture in tests).
    pub fn new(lookup: impl Fn(&str) -> Option<String> + Send + Sync + 'static) -> Self {
        Self {
            lookup: Box::new(lookup),
            cached: OnceLock::new(),
        }
    }

    /// Provider for hosts with no document: every lookup yields absent.
    pub fn headless() -> Self {
        Self::new(|_| None)
    }

    /// Provider for hosts that already hold the token value.
    pub fn fixed(token: impl Into<String>) -> Self {
        let token = token.into();
        Self::new(move |_| Some(token.clone()))
    }

    /// The current CSRF token, or `None` if the host has none.
    pub fn token(&self) -> Option<&str> {
        self.cached
            .get_or_init(|| (self.lookup)(CSRF_META_NAME))
            .as_deref()
    }
}

impl fmt::Debug for CsrfTokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CsrfTokenProvider")
            .field("cached", &self.cached.get())
            .finish_non_exhaustive()
    }
}
