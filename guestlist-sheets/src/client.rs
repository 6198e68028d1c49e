//! Sheets v4 `values` endpoints.

use std::sync::Arc;

use anyhow::{Context, Result};
use guestlist_core::{CellRange, GuestListError, GuestListResult, SheetStore};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::credentials::ServiceAccountKey;
use crate::session::Session;

pub const DEFAULT_API_URL: &str = "https://sheets.googleapis.com";

/// Values are stored exactly as sent, never parsed as formulas or dates.
const VALUE_INPUT_OPTION: &str = "RAW";

/// Authenticated client for one spreadsheet.
#[derive(Clone)]
pub struct SheetsClient {
    http: reqwest::Client,
    base_url: Url,
    spreadsheet_id: String,
    session: Arc<Session>,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

impl SheetsClient {
    pub fn with_base_url(
        key: ServiceAccountKey,
        spreadsheet_id: impl Into<String>,
        base_url: &str,
    ) -> Result<Self> {
        let base_url: Url = base_url
            .parse()
            .with_context(|| format!("Invalid Sheets API URL: {}", base_url))?;

        let http = reqwest::Client::new();
        let session = Session::new(key, http.clone())?;

        Ok(SheetsClient {
            http,
            base_url,
            spreadsheet_id: spreadsheet_id.into(),
            session: Arc::new(session),
        })
    }

    async fn get_values(&self, sheet: &str, range: CellRange) -> Result<Vec<Vec<String>>> {
        let a1 = a1_range(sheet, range);
        let url = values_url(&self.base_url, &self.spreadsheet_id, &a1)?;
        let token = self.session.access_token().await?;

        debug!(range = %a1, "reading values");
        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .with_context(|| format!("Failed to read {}", a1))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Reading {} failed ({}): {}", a1, status, error_text);
        }

        let body: ValueRange = response
            .json()
            .await
            .with_context(|| format!("Failed to parse values of {}", a1))?;

        Ok(into_rows(body))
    }

    async fn put_values(
        &self,
        sheet: &str,
        range: CellRange,
        values: Vec<Vec<String>>,
    ) -> Result<()> {
        let a1 = a1_range(sheet, range);
        let url = values_url(&self.base_url, &self.spreadsheet_id, &a1)?;
        let token = self.session.access_token().await?;

        debug!(range = %a1, "writing values");
        let response = self
            .http
            .put(url)
            .query(&[("valueInputOption", VALUE_INPUT_OPTION)])
            .bearer_auth(token)
            .json(&serde_json::json!({
                "range": a1,
                "majorDimension": "ROWS",
                "values": values,
            }))
            .send()
            .await
            .with_context(|| format!("Failed to write {}", a1))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Writing {} failed ({}): {}", a1, status, error_text);
        }

        Ok(())
    }
}

impl SheetStore for SheetsClient {
    async fn fetch(&self, sheet: &str, range: CellRange) -> GuestListResult<Vec<Vec<String>>> {
        self.get_values(sheet, range).await.map_err(store_error)
    }

    async fn write(
        &self,
        sheet: &str,
        range: CellRange,
        values: Vec<Vec<String>>,
    ) -> GuestListResult<()> {
        self.put_values(sheet, range, values)
            .await
            .map_err(store_error)
    }
}

fn store_error(e: anyhow::Error) -> GuestListError {
    GuestListError::Store(format!("{:#}", e))
}

/// Sheet-qualified A1 notation, e.g. `'Test'!A2:E`.
///
/// The sheet name is always quoted so names like `A1` or `R1C1` cannot be
/// read as cell references.
pub fn a1_range(sheet: &str, range: CellRange) -> String {
    format!("'{}'!{}", sheet.replace('\'', "''"), range)
}

fn values_url(base_url: &Url, spreadsheet_id: &str, a1: &str) -> Result<Url> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|_| anyhow::anyhow!("Sheets API URL cannot have a path: {}", base_url))?
        .pop_if_empty()
        .extend(["v4", "spreadsheets", spreadsheet_id, "values", a1]);
    Ok(url)
}

/// The API renders cells as strings by default; anything else is stringified.
fn into_rows(body: ValueRange) -> Vec<Vec<String>> {
    body.values
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|cell| match cell {
                    Value::String(s) => s,
                    Value::Null => String::new(),
                    other => other.to_string(),
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use guestlist_core::{Column, RowPosition};

    #[test]
    fn sheet_names_are_always_quoted() {
        assert_eq!(a1_range("Test", CellRange::ALL_GUESTS), "'Test'!A2:E");
        assert_eq!(
            a1_range("Invitados_2025", CellRange::column(Column::Name)),
            "'Invitados_2025'!C2:C"
        );

        let cell = CellRange::cell(Column::Confirmation, RowPosition::from_scan_index(0));
        assert_eq!(a1_range("Guest List", cell), "'Guest List'!D2");
        assert_eq!(a1_range("Ana's", cell), "'Ana''s'!D2");
    }

    #[test]
    fn cell_like_sheet_names_stay_unambiguous() {
        let cell = CellRange::cell(Column::Preferences, RowPosition::from_scan_index(1));
        assert_eq!(a1_range("A1", cell), "'A1'!E3");
        assert_eq!(a1_range("R1C1", CellRange::ALL_GUESTS), "'R1C1'!A2:E");
    }

    #[test]
    fn values_url_encodes_range_segment() {
        let base: Url = DEFAULT_API_URL.parse().unwrap();

        let url = values_url(&base, "abc123", "'Test'!A2:E").unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/abc123/values/'Test'!A2:E"
        );

        let url = values_url(&base, "abc123", "'Guest List'!D5").unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/abc123/values/'Guest%20List'!D5"
        );
    }

    #[test]
    fn values_url_keeps_base_path() {
        let base: Url = "http://localhost:8080/proxy/".parse().unwrap();
        let url = values_url(&base, "id", "'Test'!C2:C").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/proxy/v4/spreadsheets/id/values/'Test'!C2:C"
        );
    }

    #[test]
    fn missing_values_decode_as_empty() {
        let body: ValueRange =
            serde_json::from_str(r#"{"range": "Test!A2:E", "majorDimension": "ROWS"}"#).unwrap();
        assert!(into_rows(body).is_empty());
    }

    #[test]
    fn ragged_rows_are_kept_as_sent() {
        let body: ValueRange = serde_json::from_str(
            r#"{
                "range": "Test!A2:E1000",
                "majorDimension": "ROWS",
                "values": [["G1", "2", "Ana", "SI"], [], ["G2", 3, "Luis"]]
            }"#,
        )
        .unwrap();

        assert_eq!(
            into_rows(body),
            vec![
                vec!["G1".to_string(), "2".into(), "Ana".into(), "SI".into()],
                vec![],
                vec!["G2".to_string(), "3".into(), "Luis".into()],
            ]
        );
    }
}
