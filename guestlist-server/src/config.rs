//! Server configuration from the environment.

use ::config::{Config, Environment};
use guestlist_core::{GuestListError, GuestListResult};
use guestlist_sheets::DEFAULT_API_URL;
use serde::Deserialize;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_SHEET_NAME: &str = "Test";

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_sheet_name() -> String {
    DEFAULT_SHEET_NAME.to_string()
}

fn default_sheets_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

/// Read from `GOOGLE_SERVICE_ACCOUNT_KEY`, `SPREADSHEET_ID`, `SHEET_NAME`,
/// `PORT` and `SHEETS_API_URL`.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
    /// Service account key JSON, inline.
    pub google_service_account_key: String,

    pub spreadsheet_id: String,

    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_sheets_api_url")]
    pub sheets_api_url: String,
}

impl ServerConfig {
    pub fn load() -> GuestListResult<Self> {
        Self::from_environment(Environment::default())
    }

    fn from_environment(env: Environment) -> GuestListResult<Self> {
        Config::builder()
            .add_source(env.try_parsing(true))
            .build()
            .map_err(|e| GuestListError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| GuestListError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::default().source(Some(vars))
    }

    #[test]
    fn required_values_with_defaults() {
        let config = ServerConfig::from_environment(env(&[
            ("GOOGLE_SERVICE_ACCOUNT_KEY", r#"{"client_email":"a"}"#),
            ("SPREADSHEET_ID", "sheet-123"),
        ]))
        .unwrap();

        assert_eq!(config.spreadsheet_id, "sheet-123");
        assert_eq!(config.google_service_account_key, r#"{"client_email":"a"}"#);
        assert_eq!(config.sheet_name, "Test");
        assert_eq!(config.port, 3000);
        assert_eq!(config.sheets_api_url, DEFAULT_API_URL);
    }

    #[test]
    fn overrides_are_applied() {
        let config = ServerConfig::from_environment(env(&[
            ("GOOGLE_SERVICE_ACCOUNT_KEY", "{}"),
            ("SPREADSHEET_ID", "sheet-123"),
            ("SHEET_NAME", "Invitados"),
            ("PORT", "8080"),
            ("SHEETS_API_URL", "http://localhost:9000"),
        ]))
        .unwrap();

        assert_eq!(config.sheet_name, "Invitados");
        assert_eq!(config.port, 8080);
        assert_eq!(config.sheets_api_url, "http://localhost:9000");
    }

    #[test]
    fn missing_spreadsheet_id_is_a_config_error() {
        let err = ServerConfig::from_environment(env(&[("GOOGLE_SERVICE_ACCOUNT_KEY", "{}")]))
            .err()
            .unwrap();

        assert!(matches!(err, GuestListError::Config(_)));
        assert!(err.to_string().contains("spreadsheet_id"));
    }
}
