// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # Courier - Fluent Per-Request HTTP Builder
//!
//! Configure one outgoing request at a time, then send it through a
//! pluggable transport.
//!
//! ## Features
//!
//! - Status policies: default 2xx, any, inclusive range or a single code
//! - Typed query parameters with locale-free encoding; `None` is skipped
//! - Basic and bearer authentication (last one set wins)
//! - Per-request timeout, distinct from status rejections
//! - ETag containers for `If-None-Match` and 304 handling
//! - Response headers captured into a caller-owned map, even on rejection
//!
//! ## Example
//!
//! ```rust,no_run
//! use courier::HttpClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HttpClient::new()?;
//!
//!     let response = client
//!         .get("https://api.example.com/items")?
//!         .add_query_parameter("page", 2)?
//!         .add_header("Accept", "application/json")?
//!         .allow_status_range(200, 304)?
//!         .send()
//!         .await?;
//!
//!     println!("{}", response.text_lossy());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod http;

// Errors
pub use error::{Error, Result};

// HTTP
pub use http::{
    Auth, ETagContainer, HttpClient, HttpClientConfig, IntoQueryValue, IntoStatusCode,
    MemoryETagContainer, QueryParameters, QueryValue, Request, RequestBuilder, Response,
    StatusPolicy, Transport,
};

/// Courier version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
