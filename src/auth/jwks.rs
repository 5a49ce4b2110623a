use jsonwebtoken::{Algorithm, DecodingKey, decode_header};
use moka::future::Cache;
use std::sync::Arc;
use tracing::debug;

use super::jwt::{Claims, decode_claims};

/// Cached RSA components of one JWKS key.
#[derive(Clone)]
struct JwksKeyData {
    n: String,
    e: String,
    algorithm: Algorithm,
}

/// Fetches and caches the identity provider's JWKS. Clerk signs session
/// tokens with RS256 and rotates keys rarely, so a 1h TTL is plenty.
#[derive(Clone)]
pub struct JwksCache {
    cache: Arc<Cache<String, JwksKeyData>>,
    jwks_url: String,
    client: reqwest::Client,
}

impl JwksCache {
    pub fn new(jwks_url: &str) -> Self {
        let client = reqwest::Client::new();
        let cache = Arc::new(
            Cache::builder()
                .time_to_live(std::time::Duration::from_secs(3600))
                .max_capacity(10)
                .build(),
        );

        Self {
            cache,
            jwks_url: jwks_url.to_string(),
            client,
        }
    }

    async fn fetch_jwks(&self) -> Result<serde_json::Value, String> {
        debug!("Fetching JWKS from {}", self.jwks_url);

        let response: reqwest::Response = self
            .client
            .get(&self.jwks_url)
            .send()
            .await
            .map_err(|e| format!("Failed to fetch JWKS: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("Failed to fetch JWKS: HTTP {status}"));
        }

        let text = response
            .text()
            .await
            .map_err(|e| format!("Failed to get JWKS text: {e}"))?;

        serde_json::from_str(&text).map_err(|e| format!("Failed to parse JWKS JSON: {e}"))
    }

    async fn get_key_data(&self, kid: &str) -> Result<JwksKeyData, String> {
        if let Some(cached) = self.cache.get(kid).await {
            return Ok(cached);
        }

        let jwks = self.fetch_jwks().await?;
        let keys = jwks["keys"].as_array().ok_or("No keys in JWKS")?;

        let key_data = keys
            .iter()
            .find(|k| k["kid"].as_str() == Some(kid))
            .ok_or(format!("Key with kid={kid} not found in JWKS"))?;

        let n = key_data["n"]
            .as_str()
            .ok_or("Missing 'n' in JWK")?
            .to_string();
        let e = key_data["e"]
            .as_str()
            .ok_or("Missing 'e' in JWK")?
            .to_string();

        let alg_str = key_data["alg"].as_str().unwrap_or("RS256");
        let algorithm = match alg_str {
            "RS256" => Algorithm::RS256,
            "RS384" => Algorithm::RS384,
            _ => Algorithm::RS256,
        };

        let key_data = JwksKeyData { n, e, algorithm };

        self.cache.insert(kid.to_string(), key_data.clone()).await;
        Ok(key_data)
    }

    pub async fn validate_token(&self, token: &str) -> Result<Claims, String> {
        let header = decode_header(token).map_err(|e| format!("Failed to decode header: {e}"))?;
        let kid = header.kid.ok_or("No 'kid' in token header")?;

        let key_data = self.get_key_data(&kid).await?;

        let decoding_key = DecodingKey::from_rsa_components(&key_data.n, &key_data.e)
            .map_err(|e| format!("Failed to create decoding key: {e}"))?;

        decode_claims(token, &decoding_key, key_data.algorithm)
    }
}
