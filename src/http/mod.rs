// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP layer for courier
//!
//! The [`RequestBuilder`] collects per-request options and enforces the
//! status policy; a [`Transport`] (by default the reqwest-backed
//! [`HttpClient`]) puts the request on the wire.

mod client;
mod etag;
mod query;
mod request;
mod response;
mod status;
mod transport;

pub use client::{HttpClient, HttpClientConfig};
pub use etag::{ETagContainer, MemoryETagContainer};
pub use query::{IntoQueryValue, QueryParameters, QueryValue};
pub use request::{Auth, Request, RequestBuilder};
pub use response::Response;
pub use status::{IntoStatusCode, StatusPolicy};
pub use transport::Transport;

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str = concat!("courier/", env!("CARGO_PKG_VERSION"));
