//! Transport: one logical request with retry, backoff, and session cookies.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, SET_COOKIE};
use reqwest::{redirect, Client};
use tracing::{debug, instrument, warn};
use url::Url;

use crate::classify::{classify, Classification};
use crate::error::FetchError;
use crate::request::RequestDescriptor;
use crate::retry::{RetryDecision, RetryMode, RetryPolicy};
use crate::session::Session;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent string for Trendscope.
const USER_AGENT: &str = concat!("trendscope/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Exchange
// ============================================================================

/// Outcome of a transport call.
///
/// A rate-limited or redirected call that ran out of retries still comes
/// back here as a body; `retries_exhausted` tells the caller that the body
/// is whatever the last retryable response carried.
#[derive(Debug, Clone)]
pub struct Exchange {
    /// Final response body.
    pub body: String,
    /// Final HTTP status code.
    pub status: u16,
    /// Number of requests sent.
    pub attempts: u32,
    /// True if the last response was still retryable.
    pub retries_exhausted: bool,
    /// Session after the call.
    pub session: Session,
}

// ============================================================================
// Transport Trait
// ============================================================================

/// Executes request descriptors.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Executes `descriptor`, threading `session` through every attempt.
    ///
    /// Retryable classifications are absorbed; only hard transport faults
    /// and malformed descriptors produce an error.
    async fn execute(
        &self,
        descriptor: &RequestDescriptor,
        session: Session,
        mode: RetryMode,
    ) -> Result<Exchange, FetchError>;
}

// ============================================================================
// HTTP Transport
// ============================================================================

/// `reqwest`-backed transport.
///
/// Redirects are not followed by the HTTP client: a 302 must reach the
/// classifier so the stale session cookie can be dropped.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    inner: Client,
    policy: RetryPolicy,
}

impl HttpTransport {
    /// Creates a transport with default settings.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a transport with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        Self::with_options(timeout, USER_AGENT)
    }

    /// Creates a transport with a custom timeout and user agent.
    pub fn with_options(timeout: Duration, user_agent: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .redirect(redirect::Policy::none())
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            inner: client,
            policy: RetryPolicy::default(),
        })
    }

    /// Sets the retry policy for this transport.
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the retry policy.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    fn build_headers(
        descriptor: &RequestDescriptor,
        body: Option<&str>,
        session: &Session,
    ) -> Result<HeaderMap, FetchError> {
        let mut headers = HeaderMap::new();
        for (name, value) in descriptor.header_pairs(body, session.cookie()) {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| FetchError::InvalidHeader(format!("{name}: {e}")))?;
            let value = HeaderValue::from_str(&value)
                .map_err(|e| FetchError::InvalidHeader(format!("{name}: {e}")))?;
            headers.insert(name, value);
        }
        Ok(headers)
    }

    async fn send_once(
        &self,
        descriptor: &RequestDescriptor,
        url: &Url,
        body: Option<&str>,
        session: &Session,
    ) -> Result<reqwest::Response, FetchError> {
        let headers = Self::build_headers(descriptor, body, session)?;
        let mut request = self
            .inner
            .request(descriptor.http_method().as_reqwest(), url.clone())
            .headers(headers);
        if let Some(body) = body {
            request = request.body(body.to_string());
        }
        Ok(request.send().await?)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, descriptor, session), fields(url = %descriptor.url()))]
    async fn execute(
        &self,
        descriptor: &RequestDescriptor,
        session: Session,
        mode: RetryMode,
    ) -> Result<Exchange, FetchError> {
        let url = descriptor.resolved_url()?;
        let body = descriptor.encoded_body()?;

        let mut session = session;
        let mut attempt = self.policy.initial_attempt(mode);
        let mut sent = 0;

        loop {
            sent += 1;
            debug!(attempt, has_cookie = session.has_cookie(), "Sending request");

            let response = match self.send_once(descriptor, &url, body.as_deref(), &session).await {
                Ok(response) => response,
                Err(FetchError::Http(e))
                    if self.policy.has_attempts_left(attempt) && RetryPolicy::should_retry_error(&e) =>
                {
                    let delay = self.policy.delay_for_attempt(attempt);
                    warn!(
                        error = %e,
                        delay_ms = delay.as_millis(),
                        "Request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };

            let status = response.status().as_u16();
            let set_cookie = response
                .headers()
                .get(SET_COOKIE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            if let Some(raw) = set_cookie {
                if session.store_set_cookie(&raw) {
                    debug!("Captured session cookie");
                }
            }

            let text = response.text().await?;
            let classification = classify(status, &text);
            debug!(status, ?classification, len = text.len(), "Response received");

            if classification == Classification::Redirect && session.has_cookie() {
                debug!("Redirected, dropping session cookie");
                session.clear();
            }

            match self.policy.decide(classification, attempt) {
                RetryDecision::Backoff(delay) => {
                    warn!(
                        status,
                        attempt,
                        delay_ms = delay.as_millis(),
                        "Rate limited, backing off"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                RetryDecision::RetryNow => {
                    attempt += 1;
                }
                RetryDecision::Finish => {
                    let retries_exhausted = classification.is_retryable();
                    if retries_exhausted {
                        warn!(status, attempts = sent, "Retries exhausted, returning last body");
                    }
                    return Ok(Exchange {
                        body: text,
                        status,
                        attempts: sent,
                        retries_exhausted,
                        session,
                    });
                }
            }
        }
    }
}
