//! Trends request builders and client.
//!
//! Request builders are plain functions from settings and inputs to a
//! [`RequestDescriptor`]. [`TrendsClient`] runs them through a
//! [`Transport`], keeps the session cookie between calls, and decodes the
//! result.

use serde_json::json;
use tracing::{debug, instrument, warn};
use trendscope_core::DailyTrendingTopics;
use trendscope_fetch::{
    looks_like_error_page, HttpTransport, RequestDescriptor, RetryMode, Session, Transport,
};
use url::Url;

use super::error::TrendsError;
use super::parser::{parse_autocomplete_response, parse_trending_response};
use crate::settings::TrendsSettings;

// ============================================================================
// Constants
// ============================================================================

/// RPC id of the trending-searches call.
pub const TRENDING_RPC_ID: &str = "i0OFE";

/// Path of the batch RPC endpoint.
const BATCH_EXECUTE_PATH: &[&str] = &["_", "TrendsUi", "data", "batchexecute"];

/// Path of the autocomplete endpoint (keyword is appended).
const AUTOCOMPLETE_PATH: &[&str] = &["trends", "api", "autocomplete"];

/// Window for daily trends, in hours.
pub const DAILY_HOURS: u32 = 24;

// ============================================================================
// Request Builders
// ============================================================================

fn endpoint_url(settings: &TrendsSettings, segments: &[&str]) -> Result<Url, TrendsError> {
    let mut url = Url::parse(&settings.base_url)
        .map_err(|e| TrendsError::InvalidRequest(format!("invalid base URL {}: {e}", settings.base_url)))?;
    url.path_segments_mut()
        .map_err(|()| TrendsError::InvalidRequest(format!("base URL cannot have a path: {}", settings.base_url)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Builds the `f.req` payload of a trending-searches call.
pub fn trending_payload(geo: &str, hl: &str, hours: u32) -> String {
    let args = json!([null, null, geo, 0, hl, hours, 1]).to_string();
    json!([[[TRENDING_RPC_ID, args, null, "generic"]]]).to_string()
}

/// Builds a trending-searches request for `geo` over the last `hours`.
pub fn trending_request(
    settings: &TrendsSettings,
    geo: &str,
    hours: u32,
) -> Result<RequestDescriptor, TrendsError> {
    let url = endpoint_url(settings, BATCH_EXECUTE_PATH)?;
    Ok(RequestDescriptor::post(url.as_str())
        .query("rpcids", TRENDING_RPC_ID)
        .query("source-path", "/trending")
        .query("hl", settings.hl.as_str())
        .query("soc-app", "162")
        .query("soc-platform", "1")
        .query("soc-device", "1")
        .form_body([("f.req", trending_payload(geo, &settings.hl, hours))]))
}

/// Builds an autocomplete request for `keyword`.
pub fn autocomplete_request(
    settings: &TrendsSettings,
    keyword: &str,
) -> Result<RequestDescriptor, TrendsError> {
    let mut segments = AUTOCOMPLETE_PATH.to_vec();
    segments.push(keyword);
    let url = endpoint_url(settings, &segments)?;
    Ok(RequestDescriptor::get(url.as_str())
        .query("hl", settings.hl.as_str())
        .query("tz", settings.tz.to_string()))
}

// ============================================================================
// Client
// ============================================================================

/// Client for the trends endpoints.
///
/// The client owns its [`Session`]; calls take `&mut self` so the cookie
/// learned by one call is echoed by the next. Independent callers should
/// use independent clients.
pub struct TrendsClient<T = HttpTransport> {
    transport: T,
    settings: TrendsSettings,
    session: Session,
}

impl TrendsClient<HttpTransport> {
    /// Creates a client with default settings.
    pub fn new() -> Result<Self, TrendsError> {
        Self::with_settings(TrendsSettings::default())
    }

    /// Creates a client over an HTTP transport built from `settings`.
    pub fn with_settings(settings: TrendsSettings) -> Result<Self, TrendsError> {
        let transport = settings.build_transport()?;
        Ok(Self::with_transport(transport, settings))
    }
}

impl<T: Transport> TrendsClient<T> {
    /// Creates a client over an arbitrary transport.
    pub fn with_transport(transport: T, settings: TrendsSettings) -> Self {
        Self {
            transport,
            settings,
            session: Session::new(),
        }
    }

    /// Returns the settings.
    pub fn settings(&self) -> &TrendsSettings {
        &self.settings
    }

    /// Returns the current session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Replaces the session, e.g. to seed a known cookie.
    pub fn set_session(&mut self, session: Session) {
        self.session = session;
    }

    /// Fetches the trending searches of the last 24 hours in `geo`.
    ///
    /// An empty `geo` is rejected without any network call.
    #[instrument(skip(self))]
    pub async fn daily_trends(&mut self, geo: &str) -> Result<DailyTrendingTopics, TrendsError> {
        self.trending(geo, DAILY_HOURS).await
    }

    /// Fetches the trending searches of the last `hours` in `geo`.
    ///
    /// Falls back to the configured real-time window when `hours` is `None`.
    #[instrument(skip(self))]
    pub async fn real_time_trends(
        &mut self,
        geo: &str,
        hours: Option<u32>,
    ) -> Result<DailyTrendingTopics, TrendsError> {
        let hours = hours.unwrap_or(self.settings.realtime_hours);
        self.trending(geo, hours).await
    }

    /// Fetches search suggestions for `keyword`.
    ///
    /// An empty keyword yields an empty list without any network call.
    #[instrument(skip(self))]
    pub async fn autocomplete(&mut self, keyword: &str) -> Result<Vec<String>, TrendsError> {
        if keyword.trim().is_empty() {
            debug!("Empty keyword, skipping request");
            return Ok(Vec::new());
        }
        let descriptor = autocomplete_request(&self.settings, keyword)?;
        let body = self.run(&descriptor, RetryMode::SingleShot).await?;
        Ok(parse_autocomplete_response(&body)?)
    }

    async fn trending(&mut self, geo: &str, hours: u32) -> Result<DailyTrendingTopics, TrendsError> {
        if geo.trim().is_empty() {
            return Err(TrendsError::InvalidRequest("geo is required".to_string()));
        }
        let descriptor = trending_request(&self.settings, geo, hours)?;
        let body = self.run(&descriptor, RetryMode::Opportunistic).await?;
        Ok(parse_trending_response(&body)?)
    }

    /// Executes `descriptor`, stores the updated session, and rejects HTML
    /// error pages.
    async fn run(
        &mut self,
        descriptor: &RequestDescriptor,
        mode: RetryMode,
    ) -> Result<String, TrendsError> {
        let exchange = self
            .transport
            .execute(descriptor, self.session.clone(), mode)
            .await?;
        self.session = exchange.session;

        if looks_like_error_page(&exchange.body) {
            warn!(
                status = exchange.status,
                exhausted = exchange.retries_exhausted,
                "Upstream returned an HTML page"
            );
            let reason = if exchange.retries_exhausted {
                "rate limited, retries exhausted"
            } else {
                "unexpected HTML response"
            };
            return Err(TrendsError::Parse(format!(
                "{reason} (status {})",
                exchange.status
            )));
        }

        Ok(exchange.body)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::Value;
    use trendscope_fetch::{Exchange, FetchError, RequestBody};

    use super::*;

    /// Records every call and replays canned responses.
    struct RecordingTransport {
        calls: Mutex<Vec<(RequestDescriptor, Session, RetryMode)>>,
        body: String,
        status: u16,
        cookie: Option<String>,
        exhausted: bool,
    }

    impl RecordingTransport {
        fn new(body: &str) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                body: body.to_string(),
                status: 200,
                cookie: None,
                exhausted: false,
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn execute(
            &self,
            descriptor: &RequestDescriptor,
            session: Session,
            mode: RetryMode,
        ) -> Result<Exchange, FetchError> {
            self.calls
                .lock()
                .unwrap()
                .push((descriptor.clone(), session.clone(), mode));
            let session = match &self.cookie {
                Some(c) => Session::with_cookie(c.clone()),
                None => session,
            };
            Ok(Exchange {
                body: self.body.clone(),
                status: self.status,
                attempts: 1,
                retries_exhausted: self.exhausted,
                session,
            })
        }
    }

    fn client(transport: RecordingTransport) -> TrendsClient<RecordingTransport> {
        TrendsClient::with_transport(transport, TrendsSettings::default())
    }

    fn trending_body() -> String {
        let nested = json!([null, [["X", null, "US", [100], null, null, "500"]]]).to_string();
        format!(")]}}'\n{}", json!([["wrb.fr", TRENDING_RPC_ID, nested]]))
    }

    #[test]
    fn test_trending_payload() {
        assert_eq!(
            trending_payload("US", "en-US", 24),
            r#"[[["i0OFE","[null,null,\"US\",0,\"en-US\",24,1]",null,"generic"]]]"#
        );
    }

    #[test]
    fn test_trending_request_shape() {
        let req = trending_request(&TrendsSettings::default(), "DE", 4).unwrap();
        let url = req.resolved_url().unwrap();

        assert_eq!(url.path(), "/_/TrendsUi/data/batchexecute");
        assert!(url.query().unwrap().starts_with("rpcids=i0OFE&source-path=%2Ftrending&hl=en-US"));
        match req.body() {
            Some(RequestBody::Form(pairs)) => {
                assert_eq!(pairs[0].0, "f.req");
                let payload: Value = serde_json::from_str(&pairs[0].1).unwrap();
                let args: Value = serde_json::from_str(payload[0][0][1].as_str().unwrap()).unwrap();
                assert_eq!(args[2], "DE");
                assert_eq!(args[5], 4);
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[test]
    fn test_autocomplete_request_encodes_keyword() {
        let req = autocomplete_request(&TrendsSettings::default(), "rust lang/2").unwrap();
        let url = req.resolved_url().unwrap();

        assert_eq!(url.path(), "/trends/api/autocomplete/rust%20lang%2F2");
        assert_eq!(url.query(), Some("hl=en-US&tz=360"));
        assert!(req.body().is_none());
    }

    #[test]
    fn test_invalid_base_url() {
        let settings = TrendsSettings::default().with_base_url("nope");
        assert!(matches!(
            autocomplete_request(&settings, "x"),
            Err(TrendsError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_keyword_skips_transport() {
        let mut client = client(RecordingTransport::new("unused"));

        assert!(client.autocomplete("").await.unwrap().is_empty());
        assert!(client.autocomplete("   ").await.unwrap().is_empty());
        assert_eq!(client.transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_autocomplete_is_single_shot() {
        let body = r#")]}'{"default":{"topics":[{"title":"Rust"}]}}"#;
        let mut client = client(RecordingTransport::new(body));

        assert_eq!(client.autocomplete("rust").await.unwrap(), vec!["Rust".to_string()]);
        let calls = client.transport.calls.lock().unwrap();
        assert_eq!(calls[0].2, RetryMode::SingleShot);
    }

    #[tokio::test]
    async fn test_empty_geo_is_invalid_request() {
        let mut client = client(RecordingTransport::new("unused"));

        let err = client.daily_trends("").await.unwrap_err();
        assert_eq!(err.kind(), "InvalidRequestError");
        assert_eq!(client.transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_daily_trends_decodes_and_keeps_session() {
        let mut transport = RecordingTransport::new(&trending_body());
        transport.cookie = Some("NID=fresh".to_string());
        let mut client = client(transport);

        let topics = client.daily_trends("US").await.unwrap();
        assert_eq!(topics.all_trending_stories[0].title, "X");
        assert_eq!(topics.summary[0].traffic, "500");
        assert_eq!(client.session().cookie(), Some("NID=fresh"));

        client.real_time_trends("US", None).await.unwrap();
        let calls = client.transport.calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert!(!calls[0].1.has_cookie());
        assert_eq!(calls[1].1.cookie(), Some("NID=fresh"));
        assert_eq!(calls[1].2, RetryMode::Opportunistic);
    }

    #[tokio::test]
    async fn test_html_page_is_parse_error() {
        let mut transport = RecordingTransport::new("<!DOCTYPE html><html>Error 429</html>");
        transport.status = 429;
        transport.exhausted = true;
        let mut client = client(transport);

        let err = client.daily_trends("US").await.unwrap_err();
        assert!(matches!(err, TrendsError::Parse(ref m) if m.contains("retries exhausted")));
    }

    #[tokio::test]
    async fn test_structural_failure_is_parse_error() {
        let mut client = client(RecordingTransport::new(")]}'\n[]"));

        let err = client.daily_trends("US").await.unwrap_err();
        assert!(matches!(err, TrendsError::Parse(ref m) if m == "empty array"));
    }
}
