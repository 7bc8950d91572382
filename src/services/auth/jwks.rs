//! JWKS snapshot cache.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use jsonwebtoken::DecodingKey;
use jsonwebtoken::jwk::JwkSet;
use tokio::sync::Mutex;

use super::error::AuthError;

/// kid -> decoding key, fetched from the configured JWKS endpoint.
///
/// The map is an immutable snapshot replaced wholesale under a lock that is
/// held only for the swap, so readers never observe a partially-updated key
/// set. A fetch is attempted at most once per cache miss and is bounded by
/// the client timeout; an unreachable key endpoint fails the request instead
/// of hanging it.
pub struct JwksCache {
    http: reqwest::Client,
    url: url::Url,
    keys: RwLock<Arc<HashMap<String, DecodingKey>>>,
    // Serializes refreshes so concurrent misses trigger one fetch.
    refresh: Mutex<()>,
}

impl std::fmt::Debug for JwksCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Key material is not printable.
        f.debug_struct("JwksCache")
            .field("url", &self.url.as_str())
            .field("keys", &self.keys.read().expect("jwks lock poisoned").len())
            .finish()
    }
}

impl JwksCache {
    pub fn new(url: url::Url, fetch_timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(fetch_timeout).build()?;

        Ok(Self {
            http,
            url,
            keys: RwLock::new(Arc::new(HashMap::new())),
            refresh: Mutex::new(()),
        })
    }

    /// Replace the snapshot with the keys from `set`.
    ///
    /// Keys without a kid or with parameters `jsonwebtoken` cannot use are
    /// skipped; they would never be resolvable anyway.
    pub fn install(&self, set: &JwkSet) {
        let mut map = HashMap::with_capacity(set.keys.len());
        for jwk in &set.keys {
            let Some(kid) = jwk.common.key_id.clone() else {
                continue;
            };
            match DecodingKey::from_jwk(jwk) {
                Ok(key) => {
                    map.insert(kid, key);
                }
                Err(err) => {
                    tracing::warn!(kid = %kid, error = %err, "skipping unusable JWK");
                }
            }
        }

        *self.keys.write().expect("jwks lock poisoned") = Arc::new(map);
    }

    /// Warm the cache at startup. Failure is not fatal; the next cache miss
    /// retries the fetch.
    pub async fn prefetch(&self) {
        if self.refresh().await.is_err() {
            tracing::warn!("starting with an empty key cache");
        }
    }

    /// Resolve `kid`, re-fetching the key set once on a miss.
    pub async fn key_for(&self, kid: &str) -> Result<DecodingKey, AuthError> {
        if let Some(key) = self.lookup(kid) {
            return Ok(key);
        }

        let _guard = self.refresh.lock().await;
        // Another request may have refreshed while we waited for the guard.
        if let Some(key) = self.lookup(kid) {
            return Ok(key);
        }
        self.refresh().await?;

        self.lookup(kid).ok_or(AuthError::UnknownKey)
    }

    fn lookup(&self, kid: &str) -> Option<DecodingKey> {
        self.keys
            .read()
            .expect("jwks lock poisoned")
            .get(kid)
            .cloned()
    }

    /// Fetch the key set and swap it in wholesale. Transport and parse
    /// failures surface as `UnknownKey`; the underlying error is logged here
    /// and never reaches the client.
    async fn refresh(&self) -> Result<(), AuthError> {
        let response = self
            .http
            .get(self.url.clone())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|err| {
                tracing::warn!(url = %self.url, error = %err, "JWKS fetch failed");
                AuthError::UnknownKey
            })?;

        let set: JwkSet = response.json().await.map_err(|err| {
            tracing::warn!(url = %self.url, error = %err, "JWKS body is not a valid key set");
            AuthError::UnknownKey
        })?;

        self.install(&set);
        Ok(())
    }
}
