// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP client implementation

use std::time::{Duration, Instant};

use async_trait::async_trait;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, ETAG, IF_NONE_MATCH};
use reqwest::redirect::Policy;
use reqwest::{Client, Method, StatusCode};
use url::Url;

use super::request::{Auth, Request, RequestBuilder};
use super::response::Response;
use super::transport::Transport;
use super::DEFAULT_USER_AGENT;
use crate::error::{Error, Result};

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// User agent string
    pub user_agent: String,
    /// Default timeout, used when a request sets none
    pub timeout: Duration,
    /// Maximum redirects to follow
    pub max_redirects: usize,
    /// Accept invalid certificates (dangerous!)
    pub accept_invalid_certs: bool,
    /// Default headers
    pub default_headers: HeaderMap,
    /// Proxy URL
    pub proxy: Option<String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert("accept", HeaderValue::from_static("*/*"));

        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
            max_redirects: 10,
            accept_invalid_certs: false,
            default_headers,
            proxy: None,
        }
    }
}

impl HttpClientConfig {
    /// Create a new client config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set default timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set max redirects
    pub fn max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = max;
        self
    }

    /// Accept invalid TLS certificates
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Set proxy
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Add default header
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::Config(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::Config(format!("Invalid header value: {}", e)))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }
}

/// reqwest-backed [`Transport`]
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(Policy::limited(config.max_redirects))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .default_headers(config.default_headers.clone());

        if let Some(ref proxy_url) = config.proxy {
            builder = builder.proxy(
                reqwest::Proxy::all(proxy_url)
                    .map_err(|e| Error::Config(format!("Invalid proxy URL: {}", e)))?,
            );
        }

        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// Create a request builder
    pub fn request(&self, method: Method, url: impl AsRef<str>) -> Result<RequestBuilder<'_>> {
        RequestBuilder::new(self, method, url)
    }

    /// Start a GET request
    pub fn get(&self, url: impl AsRef<str>) -> Result<RequestBuilder<'_>> {
        self.request(Method::GET, url)
    }

    /// Start a POST request
    pub fn post(&self, url: impl AsRef<str>) -> Result<RequestBuilder<'_>> {
        self.request(Method::POST, url)
    }

    /// Start a PUT request
    pub fn put(&self, url: impl AsRef<str>) -> Result<RequestBuilder<'_>> {
        self.request(Method::PUT, url)
    }

    /// Start a PATCH request
    pub fn patch(&self, url: impl AsRef<str>) -> Result<RequestBuilder<'_>> {
        self.request(Method::PATCH, url)
    }

    /// Start a DELETE request
    pub fn delete(&self, url: impl AsRef<str>) -> Result<RequestBuilder<'_>> {
        self.request(Method::DELETE, url)
    }

    /// Start a HEAD request
    pub fn head(&self, url: impl AsRef<str>) -> Result<RequestBuilder<'_>> {
        self.request(Method::HEAD, url)
    }

    /// Get client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn execute(&self, request: Request) -> Result<Response> {
        let start = Instant::now();
        let url = request.full_url();
        let timeout = request.timeout.unwrap_or(self.config.timeout);

        let mut headers = request.headers.clone();

        if let Some(ref auth) = request.auth {
            headers.insert(AUTHORIZATION, authorization_value(auth)?);
        }

        let container = request.etag_container.clone();
        let known_etag = container.as_ref().and_then(|c| c.get(&url));
        if let Some(ref etag) = known_etag {
            if !headers.contains_key(IF_NONE_MATCH) {
                match HeaderValue::from_str(etag) {
                    Ok(value) => {
                        headers.insert(IF_NONE_MATCH, value);
                    }
                    Err(_) => tracing::warn!(%url, "Ignoring unusable stored ETag"),
                }
            }
        }

        let mut builder = self
            .client
            .request(request.method.clone(), url.clone())
            .headers(headers)
            .timeout(timeout);

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| send_error(e, &url, timeout))?;

        let redirected = response.url() != &url;
        let final_url = response.url().clone();
        let status = response.status();
        let headers = response.headers().clone();

        let body = response
            .bytes()
            .await
            .map_err(|e| send_error(e, &url, timeout))?;
        let response_time = start.elapsed().as_millis() as u64;

        if let Some(container) = container {
            if status == StatusCode::NOT_MODIFIED && known_etag.is_some() {
                if let Some(cached) = container.cached_body(&url) {
                    tracing::debug!(%url, "Not modified, serving stored body");
                    let mut resp = Response::new(
                        StatusCode::OK,
                        headers,
                        cached,
                        final_url,
                        redirected,
                        response_time,
                    );
                    resp.not_modified = true;
                    return Ok(resp);
                }
            } else if status.is_success() {
                if let Some(etag) = headers.get(ETAG).and_then(|v| v.to_str().ok()) {
                    container.set(&url, etag);
                    container.store_body(&url, body.clone());
                }
            }
        }

        Ok(Response::new(
            status,
            headers,
            body,
            final_url,
            redirected,
            response_time,
        ))
    }
}

/// Keep reqwest timeouts distinguishable from other transport failures
fn send_error(err: reqwest::Error, url: &Url, timeout: Duration) -> Error {
    if err.is_timeout() {
        Error::timeout_with_url("request", timeout.as_millis() as u64, url.as_str())
    } else {
        Error::Http(err)
    }
}

/// Render `auth` as an `Authorization` header value
fn authorization_value(auth: &Auth) -> Result<HeaderValue> {
    let raw = match auth {
        Auth::Basic { username, password } => {
            let encoded = base64::engine::general_purpose::STANDARD
                .encode(format!("{}:{}", username, password));
            format!("Basic {}", encoded)
        }
        Auth::Bearer(token) => format!("Bearer {}", token),
    };
    let mut value = HeaderValue::from_str(&raw)
        .map_err(|_| Error::validation("credentials contain characters not allowed in headers"))?;
    value.set_sensitive(true);
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HttpClient::new().unwrap();
        assert_eq!(client.config().user_agent, DEFAULT_USER_AGENT);
        assert_eq!(client.config().timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_default_headers_leave_encoding_to_reqwest() {
        let config = HttpClientConfig::default();
        assert_eq!(config.default_headers.get("accept").unwrap(), "*/*");
        assert!(!config.default_headers.contains_key("accept-encoding"));
    }

    #[test]
    fn test_config_builder() {
        let config = HttpClientConfig::new()
            .user_agent("test-agent")
            .timeout(Duration::from_secs(5))
            .max_redirects(2)
            .header("x-api-version", "3")
            .unwrap();
        assert_eq!(config.user_agent, "test-agent");
        assert_eq!(config.max_redirects, 2);
        assert_eq!(config.default_headers.get("x-api-version").unwrap(), "3");
        assert!(HttpClientConfig::new().header("bad name", "x").is_err());
    }

    #[test]
    fn test_basic_authorization_value() {
        let value = authorization_value(&Auth::Basic {
            username: "Aladdin".to_string(),
            password: "open sesame".to_string(),
        })
        .unwrap();
        assert_eq!(value, "Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ==");
        assert!(value.is_sensitive());
    }

    #[test]
    fn test_bearer_authorization_value() {
        let value = authorization_value(&Auth::Bearer("abc.def".to_string())).unwrap();
        assert_eq!(value, "Bearer abc.def");
        assert!(authorization_value(&Auth::Bearer("bad\ntoken".to_string()))
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_request_shorthands() {
        let client = HttpClient::new().unwrap();
        let request = client.delete("https://example.com/items/1").unwrap().build();
        assert_eq!(request.method, Method::DELETE);
        assert_eq!(request.host(), Some("example.com"));
        assert!(client.get("nope").is_err());
    }
}
