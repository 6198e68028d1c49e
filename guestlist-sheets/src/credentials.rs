//! Service account key as downloaded from the Google Cloud console.

use anyhow::{Context, Result};
use serde::Deserialize;

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    #[serde(rename = "type", default)]
    pub key_type: Option<String>,

    pub client_email: String,

    /// PEM-encoded RSA private key.
    pub private_key: String,

    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl ServiceAccountKey {
    /// Parse the JSON key file contents.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut key: ServiceAccountKey =
            serde_json::from_str(json).context("Failed to parse service account key JSON")?;

        if let Some(key_type) = key.key_type.as_deref() {
            if key_type != "service_account" {
                anyhow::bail!(
                    "Expected a service account key, got key of type '{}'",
                    key_type
                );
            }
        }

        // Keys pasted into env files often keep their newlines escaped
        if key.private_key.contains("\\n") {
            key.private_key = key.private_key.replace("\\n", "\n");
        }

        Ok(key)
    }
}
