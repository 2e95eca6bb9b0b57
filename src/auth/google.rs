use crate::error::{AppError, Result};
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

const GOOGLE_CERTS_URL: &str = "https://www.googleapis.com/oauth2/v3/certs";
const GOOGLE_ISSUERS: [&str; 2] = ["https://accounts.google.com", "accounts.google.com"];
const KEY_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Identity claims extracted from a verified Google ID token.
#[derive(Debug, Deserialize)]
pub struct GoogleClaims {
    pub sub: String,
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct Jwk {
    kid: String,
    n: String,
    e: String,
}

#[derive(Debug, Deserialize)]
struct JwkSet {
    keys: Vec<Jwk>,
}

struct CachedKeys {
    keys: HashMap<String, Jwk>,
    fetched_at: Instant,
}

/// Verifies Google-issued ID tokens against Google's published signing keys.
///
/// Keys are cached and re-fetched when stale or when a token references an
/// unknown key id (Google rotates keys without notice).
pub struct GoogleVerifier {
    http: reqwest::Client,
    client_id: String,
    certs_url: String,
    cache: RwLock<Option<CachedKeys>>,
}

impl GoogleVerifier {
    pub fn new(client_id: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            client_id,
            certs_url: GOOGLE_CERTS_URL.to_string(),
            cache: RwLock::new(None),
        }
    }

    pub async fn verify(&self, id_token: &str) -> Result<GoogleClaims> {
        let header = decode_header(id_token)
            .map_err(|_| AppError::Unauthorized("Invalid Google token".to_string()))?;
        let kid = header
            .kid
            .ok_or_else(|| AppError::Unauthorized("Invalid Google token".to_string()))?;

        let jwk = self.key_for(&kid).await?;
        let decoding_key = DecodingKey::from_rsa_components(&jwk.n, &jwk.e)
            .map_err(|_| AppError::Unauthorized("Invalid Google token".to_string()))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.client_id]);
        validation.set_issuer(&GOOGLE_ISSUERS);

        decode::<GoogleClaims>(id_token, &decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|err| {
                tracing::debug!("Google token verification failed: {:?}", err);
                AppError::Unauthorized("Invalid Google token".to_string())
            })
    }

    async fn key_for(&self, kid: &str) -> Result<Jwk> {
        if let Some(cached) = self.cache.read().await.as_ref() {
            if cached.fetched_at.elapsed() < KEY_CACHE_TTL {
                if let Some(jwk) = cached.keys.get(kid) {
                    return Ok(jwk.clone());
                }
            }
        }

        // Cache miss, stale cache, or rotated key: refresh from Google.
        let keys = self.fetch_keys().await?;
        let jwk = keys.get(kid).cloned();

        *self.cache.write().await = Some(CachedKeys {
            keys,
            fetched_at: Instant::now(),
        });

        jwk.ok_or_else(|| AppError::Unauthorized("Invalid Google token".to_string()))
    }

    async fn fetch_keys(&self) -> Result<HashMap<String, Jwk>> {
        let jwks: JwkSet = self
            .http
            .get(&self.certs_url)
            .send()
            .await
            .map_err(|err| {
                tracing::error!("Failed to fetch Google signing keys: {:?}", err);
                AppError::ServiceUnavailable
            })?
            .json()
            .await
            .map_err(|err| {
                tracing::error!("Failed to parse Google signing keys: {:?}", err);
                AppError::ServiceUnavailable
            })?;

        Ok(jwks.keys.into_iter().map(|k| (k.kid.clone(), k)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwk_set_parsing() {
        let body = r#"{
            "keys": [
                {"kty": "RSA", "alg": "RS256", "use": "sig", "kid": "abc123", "n": "modulus", "e": "AQAB"},
                {"kty": "RSA", "alg": "RS256", "use": "sig", "kid": "def456", "n": "modulus2", "e": "AQAB"}
            ]
        }"#;

        let jwks: JwkSet = serde_json::from_str(body).unwrap();
        assert_eq!(jwks.keys.len(), 2);
        assert_eq!(jwks.keys[0].kid, "abc123");
        assert_eq!(jwks.keys[1].e, "AQAB");
    }

    #[test]
    fn test_google_claims_parsing() {
        let body = r#"{
            "iss": "https://accounts.google.com",
            "sub": "110169484474386276334",
            "aud": "client-id.apps.googleusercontent.com",
            "email": "player@example.com",
            "name": "Player One",
            "picture": "https://lh3.googleusercontent.com/a/photo",
            "exp": 1700000000
        }"#;

        let claims: GoogleClaims = serde_json::from_str(body).unwrap();
        assert_eq!(claims.sub, "110169484474386276334");
        assert_eq!(claims.email, "player@example.com");
        assert_eq!(claims.name, "Player One");
        assert!(claims.picture.is_some());
    }

    #[tokio::test]
    async fn test_malformed_token_rejected() {
        let verifier = GoogleVerifier::new("client-id".to_string());
        let err = verifier.verify("not-a-jwt").await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
