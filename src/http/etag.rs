// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! ETag validator storage for conditional requests

use std::sync::Arc;

use bytes::Bytes;
use dashmap::DashMap;
use url::Url;

/// Store of entity validators keyed by resource URL.
///
/// The transport reads it before sending (to add `If-None-Match`) and writes
/// it after a response that carries an `ETag`. Body caching is optional; a
/// store that keeps bodies lets a `304 Not Modified` be answered locally.
pub trait ETagContainer: Send + Sync {
    /// Validator previously recorded for `url`
    fn get(&self, url: &Url) -> Option<String>;

    /// Record the validator returned for `url`
    fn set(&self, url: &Url, etag: &str);

    /// Body recorded alongside the current validator
    fn cached_body(&self, _url: &Url) -> Option<Bytes> {
        None
    }

    /// Record the body that goes with the current validator
    fn store_body(&self, _url: &Url, _body: Bytes) {}
}

#[derive(Debug, Clone)]
struct Entry {
    etag: String,
    body: Option<Bytes>,
}

/// In-memory, thread-safe [`ETagContainer`]
#[derive(Debug, Clone, Default)]
pub struct MemoryETagContainer {
    entries: Arc<DashMap<String, Entry>>,
}

impl MemoryETagContainer {
    /// Create an empty container
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tracked resources
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no resources are tracked
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget every validator
    pub fn clear(&self) {
        self.entries.clear();
    }
}

impl ETagContainer for MemoryETagContainer {
    fn get(&self, url: &Url) -> Option<String> {
        self.entries.get(url.as_str()).map(|e| e.etag.clone())
    }

    fn set(&self, url: &Url, etag: &str) {
        let mut entry = self
            .entries
            .entry(url.as_str().to_string())
            .or_insert_with(|| Entry {
                etag: etag.to_string(),
                body: None,
            });
        // A new validator invalidates the body stored for the old one.
        if entry.etag != etag {
            entry.etag = etag.to_string();
            entry.body = None;
        }
    }

    fn cached_body(&self, url: &Url) -> Option<Bytes> {
        self.entries.get(url.as_str()).and_then(|e| e.body.clone())
    }

    fn store_body(&self, url: &Url, body: Bytes) {
        if let Some(mut entry) = self.entries.get_mut(url.as_str()) {
            entry.body = Some(body);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_set_and_get() {
        let container = MemoryETagContainer::new();
        let a = url("https://example.com/a");
        assert!(container.get(&a).is_none());

        container.set(&a, "\"v1\"");
        assert_eq!(container.get(&a).as_deref(), Some("\"v1\""));
        assert!(container.get(&url("https://example.com/b")).is_none());
        assert_eq!(container.len(), 1);
    }

    #[test]
    fn test_new_validator_drops_body() {
        let container = MemoryETagContainer::new();
        let a = url("https://example.com/a");

        container.set(&a, "v1");
        container.store_body(&a, Bytes::from("one"));
        assert_eq!(container.cached_body(&a), Some(Bytes::from("one")));

        container.set(&a, "v1");
        assert_eq!(container.cached_body(&a), Some(Bytes::from("one")));

        container.set(&a, "v2");
        assert!(container.cached_body(&a).is_none());
    }

    #[test]
    fn test_store_body_requires_validator() {
        let container = MemoryETagContainer::new();
        let a = url("https://example.com/a");
        container.store_body(&a, Bytes::from("orphan"));
        assert!(container.cached_body(&a).is_none());
        assert!(container.is_empty());
    }

    #[test]
    fn test_clones_share_storage() {
        let container = MemoryETagContainer::new();
        let other = container.clone();
        container.set(&url("https://example.com/a"), "v1");
        assert_eq!(other.len(), 1);
        other.clear();
        assert!(container.is_empty());
    }
}
