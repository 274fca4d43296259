// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP request types and builder

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::Serialize;
use url::Url;

use super::etag::ETagContainer;
use super::query::{IntoQueryValue, QueryParameters};
use super::response::Response;
use super::status::{IntoStatusCode, StatusPolicy};
use super::transport::Transport;
use crate::error::{Error, Result};

/// Authentication scheme attached to a request.
///
/// Only the intent is recorded here; the transport turns it into an
/// `Authorization` header. The checked constructors reject credentials that
/// could never be sent.
#[derive(Clone, PartialEq, Eq)]
pub enum Auth {
    /// HTTP Basic credentials
    Basic { username: String, password: String },
    /// OAuth 2.0 bearer token
    Bearer(String),
}

impl Auth {
    /// Basic credentials; the user-id may not contain a colon and neither
    /// part may contain control characters
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        let username = username.into();
        let password = password.into();
        if username.contains(':') {
            return Err(Error::validation("basic username must not contain ':'"));
        }
        if username.chars().chain(password.chars()).any(char::is_control) {
            return Err(Error::validation(
                "basic credentials must not contain control characters",
            ));
        }
        Ok(Auth::Basic { username, password })
    }

    /// Bearer token; must be non-empty and usable as a header value
    pub fn bearer(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.is_empty() {
            return Err(Error::validation("bearer token must not be empty"));
        }
        HeaderValue::from_str(&token).map_err(|_| {
            Error::validation("bearer token contains characters not allowed in headers")
        })?;
        Ok(Auth::Bearer(token))
    }
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Auth::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            Auth::Bearer(_) => f.debug_tuple("Bearer").field(&"<redacted>").finish(),
        }
    }
}

/// HTTP request representation
#[derive(Clone)]
pub struct Request {
    /// Request method
    pub method: Method,
    /// Request URL; its query string lives in `query`
    pub url: Url,
    /// Request headers
    pub headers: HeaderMap,
    /// Query parameters in insertion order
    pub query: QueryParameters,
    /// Authentication scheme
    pub auth: Option<Auth>,
    /// Request timeout, overriding the transport default
    pub timeout: Option<Duration>,
    /// Request body
    pub body: Option<Bytes>,
    /// Validator store for conditional requests
    pub etag_container: Option<Arc<dyn ETagContainer>>,
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("method", &self.method)
            .field("url", &self.url.as_str())
            .field("headers", &self.headers)
            .field("query", &self.query)
            .field("auth", &self.auth)
            .field("timeout", &self.timeout)
            .field("body_len", &self.body.as_ref().map(Bytes::len))
            .field("etag_container", &self.etag_container.is_some())
            .finish()
    }
}

impl Request {
    /// Create a new request with arbitrary method.
    ///
    /// Pairs already present in the URL's query string seed the query
    /// parameters, so a later parameter with the same name replaces them.
    pub fn new(method: Method, url: impl AsRef<str>) -> Result<Self> {
        let mut url = Url::parse(url.as_ref())?;
        let mut query = QueryParameters::new();
        for (key, value) in url.query_pairs() {
            if !key.is_empty() {
                query.insert(&key, value.into_owned())?;
            }
        }
        url.set_query(None);

        Ok(Self {
            method,
            url,
            headers: HeaderMap::new(),
            query,
            auth: None,
            timeout: None,
            body: None,
            etag_container: None,
        })
    }

    /// URL with the query parameters appended, form-urlencoded
    pub fn full_url(&self) -> Url {
        let mut url = self.url.clone();
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(self.query.iter());
        }
        url
    }

    /// Get the host
    pub fn host(&self) -> Option<&str> {
        self.url.host_str()
    }
}

/// Fluent configuration for a single request.
///
/// Every setter returns the builder so calls chain; setters that can reject
/// their input return `Result<Self>` and fail on the spot. Status policy and
/// authentication are single slots, so the last call wins. [`send`] consumes
/// the builder, which makes a dispatched request impossible to touch again:
///
/// ```rust,compile_fail
/// # async fn demo(client: &courier::HttpClient) -> courier::Result<()> {
/// let builder = client.get("https://example.com/items")?;
/// builder.send().await?;
/// let builder = builder.add_header("x-late", "1")?;
/// # Ok(())
/// # }
/// ```
///
/// # Example
///
/// ```rust,no_run
/// use courier::HttpClient;
/// use reqwest::header::HeaderMap;
///
/// # async fn demo() -> courier::Result<()> {
/// let client = HttpClient::new()?;
/// let mut headers = HeaderMap::new();
///
/// let response = client
///     .post("https://api.example.com/items")?
///     .add_query_parameter("page", 2)?
///     .add_query_parameter("filter", None::<&str>)?
///     .add_header("Accept", "application/json")?
///     .with_oauth_bearer("token")?
///     .allow_specific_status_code(201)?
///     .fill_response_headers(&mut headers)
///     .send()
///     .await?;
///
/// println!("{} {:?}", response.status, headers.get("etag"));
/// # Ok(())
/// # }
/// ```
///
/// [`send`]: RequestBuilder::send
pub struct RequestBuilder<'a> {
    transport: &'a dyn Transport,
    request: Request,
    status_policy: StatusPolicy,
    header_sink: Option<&'a mut HeaderMap>,
}

impl<'a> RequestBuilder<'a> {
    /// Create a builder that will dispatch through `transport`
    pub fn new(
        transport: &'a dyn Transport,
        method: Method,
        url: impl AsRef<str>,
    ) -> Result<Self> {
        Ok(Self {
            transport,
            request: Request::new(method, url)?,
            status_policy: StatusPolicy::default(),
            header_sink: None,
        })
    }

    /// Never fail because of the response status
    pub fn allow_any_status_code(mut self) -> Self {
        self.status_policy = StatusPolicy::Any;
        self
    }

    /// Accept statuses in `min..=max`; `min` greater than `max` is rejected
    pub fn allow_status_range(
        mut self,
        min: impl IntoStatusCode,
        max: impl IntoStatusCode,
    ) -> Result<Self> {
        self.status_policy =
            StatusPolicy::range(min.into_status_code()?, max.into_status_code()?)?;
        Ok(self)
    }

    /// Accept exactly one status
    pub fn allow_specific_status_code(mut self, code: impl IntoStatusCode) -> Result<Self> {
        self.status_policy = StatusPolicy::Specific(code.into_status_code()?);
        Ok(self)
    }

    /// Use HTTP Basic credentials, replacing any previous scheme
    pub fn with_basic_authentication(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        self.request.auth = Some(Auth::basic(username, password)?);
        Ok(self)
    }

    /// Use a bearer token, replacing any previous scheme
    pub fn with_oauth_bearer(mut self, token: impl Into<String>) -> Result<Self> {
        self.request.auth = Some(Auth::bearer(token)?);
        Ok(self)
    }

    /// Bound the whole exchange; a zero duration is rejected
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        if timeout.is_zero() {
            return Err(Error::validation("timeout must be greater than zero"));
        }
        self.request.timeout = Some(timeout);
        Ok(self)
    }

    /// Use `container` for `If-None-Match` and validator bookkeeping
    pub fn with_etag_container(mut self, container: Arc<dyn ETagContainer>) -> Self {
        self.request.etag_container = Some(container);
        self
    }

    /// Copy the response headers into `sink` once a response arrives,
    /// whether or not its status is accepted
    pub fn fill_response_headers(mut self, sink: &'a mut HeaderMap) -> Self {
        self.header_sink = Some(sink);
        self
    }

    /// Set a header, replacing any earlier value for the same name
    pub fn add_header(mut self, key: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let key = key.as_ref();
        let name = HeaderName::try_from(key)
            .map_err(|_| Error::validation(format!("invalid header name '{}'", key)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|_| Error::validation(format!("invalid value for header '{}'", key)))?;
        self.request.headers.insert(name, value);
        Ok(self)
    }

    /// Add a query parameter; `None` leaves the request unchanged
    pub fn add_query_parameter(
        mut self,
        key: impl AsRef<str>,
        value: impl IntoQueryValue,
    ) -> Result<Self> {
        self.request.query.insert(key.as_ref(), value)?;
        Ok(self)
    }

    /// Set the body
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.request.body = Some(body.into());
        self
    }

    /// Set JSON body
    pub fn json<T: Serialize>(mut self, data: &T) -> Result<Self> {
        let json = serde_json::to_vec(data)?;
        self.request.body = Some(Bytes::from(json));
        self.request
            .headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(self)
    }

    /// Request as configured so far
    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Active status policy
    pub fn status_policy(&self) -> StatusPolicy {
        self.status_policy
    }

    /// Build the request without sending it
    pub fn build(self) -> Request {
        self.request
    }

    /// Execute the request.
    ///
    /// The header sink is filled before the status policy is checked, so a
    /// rejected response still delivers its headers. A configured timeout
    /// bounds the whole call and surfaces as [`Error::Timeout`].
    pub async fn send(self) -> Result<Response> {
        let RequestBuilder {
            transport,
            request,
            status_policy,
            header_sink,
        } = self;

        let method = request.method.clone();
        let url = request.full_url();
        let timeout = request.timeout;
        tracing::debug!(%method, %url, policy = %status_policy, "Dispatching request");

        let response = match timeout {
            Some(limit) => tokio::time::timeout(limit, transport.execute(request))
                .await
                .map_err(|_| {
                    Error::timeout_with_url("request", limit.as_millis() as u64, url.as_str())
                })??,
            None => transport.execute(request).await?,
        };

        tracing::debug!(
            %method,
            %url,
            status = response.status.as_u16(),
            elapsed_ms = response.response_time_ms,
            "Received response"
        );

        if let Some(sink) = header_sink {
            *sink = response.headers.clone();
        }

        if !status_policy.accepts(response.status) {
            tracing::warn!(
                %method,
                %url,
                status = response.status.as_u16(),
                policy = %status_policy,
                "Response status rejected"
            );
            return Err(Error::UnexpectedStatus(Box::new(response)));
        }

        Ok(response)
    }
}

impl fmt::Debug for RequestBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("request", &self.request)
            .field("status_policy", &self.status_policy)
            .field("header_sink", &self.header_sink.is_some())
            .finish()
    }
}
