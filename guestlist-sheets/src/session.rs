//! Service account session: exchanges a signed JWT for an access token and
//! keeps it until shortly before it expires.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use crate::credentials::ServiceAccountKey;

pub const SCOPES: &[&str] = &["https://www.googleapis.com/auth/spreadsheets"];

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Lifetime requested for each assertion (Google's maximum).
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Refresh this long before the token actually expires.
const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: String,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Clone)]
struct SessionData {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl SessionData {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_MARGIN_SECS) >= self.expires_at
    }
}

pub struct Session {
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    http: reqwest::Client,
    data: Mutex<Option<SessionData>>,
}

impl Session {
    pub fn new(key: ServiceAccountKey, http: reqwest::Client) -> Result<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .context("Service account private key is not a valid RSA PEM key")?;

        Ok(Session {
            key,
            encoding_key,
            http,
            data: Mutex::new(None),
        })
    }

    /// A valid access token, fetching a new one if the cached one expired.
    pub async fn access_token(&self) -> Result<String> {
        let mut data = self.data.lock().await;

        if let Some(session) = data.as_ref().filter(|s| !s.is_expired(Utc::now())) {
            return Ok(session.access_token.clone());
        }

        debug!(account = %self.key.client_email, "requesting Google access token");
        let session = self.refresh().await?;
        let token = session.access_token.clone();
        *data = Some(session);

        Ok(token)
    }

    fn assertion(&self, now: DateTime<Utc>) -> Result<String> {
        let iat = now.timestamp();
        let claims = Claims {
            iss: &self.key.client_email,
            scope: SCOPES.join(" "),
            aud: &self.key.token_uri,
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };

        jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)
            .context("Failed to sign service account assertion")
    }

    async fn refresh(&self) -> Result<SessionData> {
        let now = Utc::now();
        let assertion = self.assertion(now)?;

        let response = self
            .http
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .with_context(|| format!("Failed to send token request to {}", self.key.token_uri))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Token request failed ({}): {}", status, error_text);
        }

        #[derive(Deserialize)]
        struct TokenResponse {
            access_token: String,
            expires_in: i64,
        }

        let tokens: TokenResponse = response
            .json()
            .await
            .context("Failed to parse token response")?;

        Ok(SessionData {
            access_token: tokens.access_token,
            expires_at: now + Duration::seconds(tokens.expires_in),
        })
    }
}
