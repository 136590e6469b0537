//! Response classification.
//!
//! The endpoint's failures are about pacing and session affinity, not
//! content, so classification only looks at the status code and a handful
//! of literal body markers.

/// Body markers that indicate a rate-limit page served with any status.
const RATE_LIMIT_MARKERS: &[&str] = &["Error 429", "Too Many Requests"];

/// Body markers of an HTML error page where JSON was expected.
const ERROR_PAGE_MARKERS: &[&str] = &["<!DOCTYPE", "<html"];

/// How the transport should treat a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// HTTP 429, HTTP 401, or a rate-limit marker in the body.
    RateLimited,
    /// HTTP 302; the session cookie is stale.
    Redirect,
    /// Anything else. The body goes back to the caller as-is.
    Terminal,
}

impl Classification {
    /// Returns true for outcomes the transport may retry.
    pub fn is_retryable(self) -> bool {
        !matches!(self, Self::Terminal)
    }
}

/// Classifies a response by status code and body.
pub fn classify(status: u16, body: &str) -> Classification {
    if status == 429 || status == 401 || RATE_LIMIT_MARKERS.iter().any(|m| body.contains(m)) {
        return Classification::RateLimited;
    }
    if status == 302 {
        return Classification::Redirect;
    }
    Classification::Terminal
}

/// Returns true if the body looks like an upstream HTML error page.
pub fn looks_like_error_page(body: &str) -> bool {
    ERROR_PAGE_MARKERS.iter().any(|m| body.contains(m))
}
