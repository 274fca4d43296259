// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Transport seam between the request builder and the network

use async_trait::async_trait;

use super::request::Request;
use super::response::Response;
use crate::error::Result;

/// Performs the network call for a fully configured [`Request`].
///
/// Implementations are responsible for everything on the wire: encoding
/// `request.auth` into an `Authorization` header, appending the query
/// parameters, honouring the ETag container and mapping their own timeouts
/// to [`Error::Timeout`](crate::Error::Timeout). Status codes are returned
/// as-is; acceptance is decided by the builder.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use bytes::Bytes;
/// use courier::http::{Request, Response, Transport};
/// use reqwest::{header::HeaderMap, StatusCode};
///
/// struct Teapot;
///
/// #[async_trait]
/// impl Transport for Teapot {
///     async fn execute(&self, request: Request) -> courier::Result<Response> {
///         Ok(Response::new(
///             StatusCode::IM_A_TEAPOT,
///             HeaderMap::new(),
///             Bytes::new(),
///             request.full_url(),
///             false,
///             0,
///         ))
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` and return the raw response
    async fn execute(&self, request: Request) -> Result<Response>;
}
