//! Text extractors and the cache policies that wrap them.
//!
//! A [`TextExtractor`] turns raw text into some owned output. [`Cached`]
//! composes any extractor with a [`CachePolicy`] chosen at construction, so
//! callers pick caching behavior instead of inheriting it. Stores are plain
//! in-process maps and only successful results are stored.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::Hasher;

use crate::error::Result;

/// Capability of turning text into an extraction result.
pub trait TextExtractor {
    /// What one extraction produces.
    type Output: Clone;

    /// Run the extraction over `text`.
    fn extract(&mut self, text: &str) -> Result<Self::Output>;

    /// Stable name, scoping content-hash cache keys per extractor kind.
    fn name(&self) -> &str;
}

/// How a [`Cached`] wrapper keys its store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// No caching, every call recomputes.
    PassThrough,
    /// Key by a 64-bit hash of `"<extractor-name>:<text>"`.
    #[default]
    ContentHash,
    /// Key by the full text.
    Memoized,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum CacheKey {
    Hash(u64),
    Text(String),
}

/// An extractor composed with a cache policy and an in-memory store.
pub struct Cached<E: TextExtractor> {
    inner: E,
    policy: CachePolicy,
    store: HashMap<CacheKey, E::Output>,
}

impl<E: TextExtractor> Cached<E> {
    /// Wrap with the default policy ([`CachePolicy::ContentHash`]).
    pub fn new(inner: E) -> Self {
        Self::with_policy(inner, CachePolicy::default())
    }

    /// Wrap with an explicit policy.
    pub fn with_policy(inner: E, policy: CachePolicy) -> Self {
        Self {
            inner,
            policy,
            store: HashMap::new(),
        }
    }

    /// The active policy.
    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Number of stored results.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether the store holds nothing.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Drop every stored result, keeping the extractor and policy.
    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// The wrapped extractor.
    pub fn inner(&self) -> &E {
        &self.inner
    }

    /// Unwrap, discarding the store.
    pub fn into_inner(self) -> E {
        self.inner
    }

    fn key(&self, text: &str) -> Option<CacheKey> {
        match self.policy {
            CachePolicy::PassThrough => None,
            CachePolicy::ContentHash => {
                Some(CacheKey::Hash(content_hash(self.inner.name(), text)))
            }
            CachePolicy::Memoized => Some(CacheKey::Text(text.to_string())),
        }
    }
}

impl<E: TextExtractor> TextExtractor for Cached<E> {
    type Output = E::Output;

    fn extract(&mut self, text: &str) -> Result<Self::Output> {
        let Some(key) = self.key(text) else {
            return self.inner.extract(text);
        };
        if let Some(hit) = self.store.get(&key) {
            log::debug!("{}: cache hit", self.inner.name());
            return Ok(hit.clone());
        }
        let value = self.inner.extract(text)?;
        self.store.insert(key, value.clone());
        Ok(value)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

fn content_hash(name: &str, text: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    hasher.write(name.as_bytes());
    hasher.write(b":");
    hasher.write(text.as_bytes());
    hasher.finish()
}
