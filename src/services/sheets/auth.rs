//! Access tokens for the Sheets API.
//!
//! Either a pre-issued bearer token, or a service-account key whose signed
//! RS256 assertion is exchanged for a short-lived access token. Exchanged
//! tokens are cached until shortly before they expire.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};

/// OAuth scope granting read/write access to spreadsheets.
pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

/// Default token endpoint when the key file does not name one.
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Lifetime requested for the signed assertion.
const ASSERTION_TTL_SECS: i64 = 3600;

/// Refresh this long before the cached token expires.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Fields used from a Google service-account JSON key.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: SecretString,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    /// Read and parse a key file.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let raw = std::fs::read(path).map_err(|e| {
            AppError::Sync(format!(
                "Service account file '{}' not readable: {}",
                path.display(),
                e
            ))
        })?;
        serde_json::from_slice(&raw).map_err(|e| {
            AppError::Sync(format!(
                "Service account file '{}' is invalid: {}",
                path.display(),
                e
            ))
        })
    }
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key", &"[REDACTED]")
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

/// JWT-bearer assertion claims.
#[derive(Debug, Serialize, Deserialize)]
pub struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    expires_in: Option<u64>,
    error: Option<String>,
}

struct CachedToken {
    token: SecretString,
    expires_at: Instant,
}

/// Source of bearer tokens for API calls.
#[derive(Clone)]
pub struct TokenSource {
    kind: TokenKind,
}

#[derive(Clone)]
enum TokenKind {
    /// Token supplied by configuration, used as-is.
    Static(SecretString),
    /// Token minted from a service-account key.
    ServiceAccount {
        key: ServiceAccountKey,
        cache: Arc<RwLock<Option<CachedToken>>>,
    },
}

impl TokenSource {
    /// Token source that always hands out the given bearer token.
    pub fn fixed(token: SecretString) -> Self {
        TokenSource {
            kind: TokenKind::Static(token),
        }
    }

    /// Token source for a service-account key.
    pub fn service_account(key: ServiceAccountKey) -> Self {
        TokenSource {
            kind: TokenKind::ServiceAccount {
                key,
                cache: Arc::new(RwLock::new(None)),
            },
        }
    }

    /// Get a bearer token, exchanging a new assertion when needed.
    pub async fn access_token(&self, http: &reqwest::Client) -> AppResult<SecretString> {
        let (key, cache) = match &self.kind {
            TokenKind::Static(token) => return Ok(token.clone()),
            TokenKind::ServiceAccount { key, cache } => (key, cache),
        };

        {
            let cached = cache.read().await;
            if let Some(ref entry) = *cached
                && entry.expires_at > Instant::now()
            {
                return Ok(entry.token.clone());
            }
        }

        let mut cached = cache.write().await;
        // Another task may have refreshed while we waited for the lock.
        if let Some(ref entry) = *cached
            && entry.expires_at > Instant::now()
        {
            return Ok(entry.token.clone());
        }

        let (token, lifetime) = exchange_assertion(key, http).await?;
        *cached = Some(CachedToken {
            token: token.clone(),
            expires_at: Instant::now() + lifetime.saturating_sub(EXPIRY_MARGIN),
        });
        Ok(token)
    }
}

/// Sign an RS256 assertion for the key's service account.
pub fn sign_assertion(key: &ServiceAccountKey) -> AppResult<String> {
    let now = Utc::now().timestamp();
    let claims = AssertionClaims {
        iss: key.client_email.clone(),
        scope: SHEETS_SCOPE.to_string(),
        aud: key.token_uri.clone(),
        iat: now,
        exp: now + ASSERTION_TTL_SECS,
    };

    let encoding_key = EncodingKey::from_rsa_pem(key.private_key.expose_secret().as_bytes())
        .map_err(|e| AppError::Sync(format!("Invalid service account private key: {}", e)))?;

    encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
        .map_err(|e| AppError::Sync(format!("Failed to sign token assertion: {}", e)))
}

async fn exchange_assertion(
    key: &ServiceAccountKey,
    http: &reqwest::Client,
) -> AppResult<(SecretString, Duration)> {
    let assertion = sign_assertion(key)?;
    let body = format!(
        "grant_type={}&assertion={}",
        urlencoding::encode("urn:ietf:params:oauth:grant-type:jwt-bearer"),
        urlencoding::encode(&assertion)
    );

    debug!("Requesting Sheets access token from {}", key.token_uri);
    let response = http
        .post(&key.token_uri)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(body)
        .send()
        .await?;

    let status = response.status();
    let token_response: TokenResponse = response.json().await?;

    if let Some(err) = token_response.error {
        return Err(AppError::Sync(format!("Token endpoint returned error: {}", err)));
    }
    if !status.is_success() {
        return Err(AppError::Sync(format!(
            "Token endpoint returned status {}",
            status
        )));
    }

    let token = token_response
        .access_token
        .map(SecretString::from)
        .ok_or_else(|| AppError::Sync("Token response has no access_token".to_string()))?;
    let lifetime = Duration::from_secs(token_response.expires_in.unwrap_or(3600));

    info!("Obtained Sheets access token for {}", key.client_email);
    Ok((token, lifetime))
}
