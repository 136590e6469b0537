//! Request descriptors.
//!
//! A [`RequestDescriptor`] is an immutable value describing one logical
//! call: target URL, method, ordered query parameters, at most one body,
//! and extra headers. It is built per call and consumed by a transport.

use serde_json::Value;
use url::Url;

use crate::error::FetchError;

// ============================================================================
// Method & Content Type
// ============================================================================

/// HTTP method of a descriptor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET.
    Get,
    /// POST.
    #[default]
    Post,
}

impl HttpMethod {
    /// Converts to the `reqwest` method.
    pub fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
        }
    }
}

/// Discriminator for the `Content-Type` header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContentType {
    /// `application/json`.
    #[default]
    Json,
    /// `application/x-www-form-urlencoded`.
    Form,
}

impl ContentType {
    /// Header value for this content type.
    pub fn header_value(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Form => "application/x-www-form-urlencoded",
        }
    }
}

// ============================================================================
// Body
// ============================================================================

/// Request body. A descriptor carries at most one.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Sent verbatim.
    Raw(String),
    /// Form-encoded in the given order.
    Form(Vec<(String, String)>),
    /// Serialized as JSON.
    Json(Value),
}

impl RequestBody {
    /// Encodes the body to its wire form.
    pub fn encode(&self) -> Result<String, FetchError> {
        match self {
            Self::Raw(raw) => Ok(raw.clone()),
            Self::Form(pairs) => Ok(url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(pairs)
                .finish()),
            Self::Json(value) => Ok(serde_json::to_string(value)?),
        }
    }
}

// ============================================================================
// Request Descriptor
// ============================================================================

/// Immutable description of a single logical request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    url: String,
    method: HttpMethod,
    query: Vec<(String, String)>,
    body: Option<RequestBody>,
    content_type: ContentType,
    headers: Vec<(String, String)>,
}

impl RequestDescriptor {
    /// Creates a POST descriptor for `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: HttpMethod::default(),
            query: Vec::new(),
            body: None,
            content_type: ContentType::default(),
            headers: Vec::new(),
        }
    }

    /// Creates a GET descriptor for `url`.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(url).method(HttpMethod::Get)
    }

    /// Creates a POST descriptor for `url`.
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(url)
    }

    /// Sets the method.
    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Appends a query parameter. Order is preserved.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Appends an extra header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets a form body, replacing any previous body.
    pub fn form_body<K, V, I>(mut self, pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let pairs = pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self.body = Some(RequestBody::Form(pairs));
        self.content_type = ContentType::Form;
        self
    }

    /// Sets a JSON body, replacing any previous body.
    pub fn json_body(mut self, value: Value) -> Self {
        self.body = Some(RequestBody::Json(value));
        self.content_type = ContentType::Json;
        self
    }

    /// Sets a raw body with an explicit content type, replacing any
    /// previous body.
    pub fn raw_body(mut self, raw: impl Into<String>, content_type: ContentType) -> Self {
        self.body = Some(RequestBody::Raw(raw.into()));
        self.content_type = content_type;
        self
    }

    /// Target URL as given.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// HTTP method.
    pub fn http_method(&self) -> HttpMethod {
        self.method
    }

    /// Query parameters in insertion order.
    pub fn query_params(&self) -> &[(String, String)] {
        &self.query
    }

    /// The body, if any.
    pub fn body(&self) -> Option<&RequestBody> {
        self.body.as_ref()
    }

    /// Content type discriminator.
    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    /// Extra headers in insertion order.
    pub fn extra_headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Parses the URL and appends the query parameters.
    pub fn resolved_url(&self) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.url).map_err(|e| FetchError::InvalidUrl(format!("{}: {e}", self.url)))?;
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }
        Ok(url)
    }

    /// Encodes the body, if present.
    pub fn encoded_body(&self) -> Result<Option<String>, FetchError> {
        self.body.as_ref().map(RequestBody::encode).transpose()
    }

    /// Header list for one attempt.
    ///
    /// Always carries `Content-Type`; carries `Content-Length` when a body
    /// is present and `cookie` when the session holds one. Extra headers
    /// come last and override earlier entries with the same name.
    pub fn header_pairs(&self, body: Option<&str>, cookie: Option<&str>) -> Vec<(String, String)> {
        let mut headers = vec![(
            "content-type".to_string(),
            self.content_type.header_value().to_string(),
        )];
        if let Some(body) = body {
            headers.push(("content-length".to_string(), body.len().to_string()));
        }
        if let Some(cookie) = cookie {
            headers.push(("cookie".to_string(), cookie.to_string()));
        }
        headers.extend(self.headers.iter().cloned());
        headers
    }
}
