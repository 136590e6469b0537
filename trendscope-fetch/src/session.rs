//! Caller-owned session cookie.
//!
//! The endpoint hands out a short-lived cookie and expects it back on the
//! next call. A [`Session`] holds only the `name=value` pair of the most
//! recent `Set-Cookie`; all attributes are stripped and nothing expires.
//! The value is owned by whoever drives the transport, so unrelated callers
//! never share or clobber each other's cookie.

use std::fmt;

/// Session state carried between transport calls.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    cookie: Option<String>,
}

impl Session {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session seeded with a `name=value` cookie pair.
    pub fn with_cookie(cookie: impl Into<String>) -> Self {
        Self {
            cookie: Some(cookie.into()),
        }
    }

    /// Returns the cookie pair, if any.
    pub fn cookie(&self) -> Option<&str> {
        self.cookie.as_deref()
    }

    /// Returns true if a cookie is held.
    pub fn has_cookie(&self) -> bool {
        self.cookie.is_some()
    }

    /// Stores the `name=value` segment of a raw `Set-Cookie` header value.
    ///
    /// Returns false (and leaves the session untouched) when the header has
    /// no usable pair.
    pub fn store_set_cookie(&mut self, set_cookie: &str) -> bool {
        match cookie_pair(set_cookie) {
            Some(pair) => {
                self.cookie = Some(pair);
                true
            }
            None => false,
        }
    }

    /// Drops the cookie.
    pub fn clear(&mut self) {
        self.cookie = None;
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("cookie", &self.cookie.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Extracts the leading `name=value` segment from a `Set-Cookie` value.
///
/// `"NID=511=abc; expires=...; path=/"` becomes `"NID=511=abc"`.
pub fn cookie_pair(set_cookie: &str) -> Option<String> {
    let pair = set_cookie.split(';').next()?.trim();
    match pair.split_once('=') {
        Some((name, _)) if !name.trim().is_empty() => Some(pair.to_string()),
        _ => None,
    }
}
