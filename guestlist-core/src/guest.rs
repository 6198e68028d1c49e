//! Guest records and RSVP payloads.

use serde::{Deserialize, Deserializer, Serialize};

use crate::layout::Column;

/// Written to the confirmation cell when the caller supplies no value.
pub const DEFAULT_CONFIRMATION: &str = "CONFIRMADO ✅";

/// One row of the guest sheet.
///
/// Rebuilt from the store on every read; never persisted as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestRecord {
    #[serde(rename = "idGrupo", skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,

    #[serde(rename = "cantidad", skip_serializing_if = "Option::is_none")]
    pub party_size: Option<String>,

    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Empty until the guest responds.
    #[serde(rename = "confirmacion", default)]
    pub confirmation: String,

    #[serde(rename = "preferencias", default)]
    pub preferences: String,
}

impl GuestRecord {
    /// Map a positional row into a record.
    ///
    /// Rows may be shorter than the layout. Only the confirmation and
    /// preferences cells get an empty-string default; the identifying cells
    /// stay absent so callers can tell "blank" from "missing".
    pub fn from_row(row: &[String]) -> Self {
        let cell = |column: Column| row.get(column.index()).cloned();

        GuestRecord {
            group_id: cell(Column::Group),
            party_size: cell(Column::PartySize),
            name: cell(Column::Name),
            confirmation: cell(Column::Confirmation).unwrap_or_default(),
            preferences: cell(Column::Preferences).unwrap_or_default(),
        }
    }
}

/// Map every fetched row, preserving order.
pub fn guests_from_rows(rows: &[Vec<String>]) -> Vec<GuestRecord> {
    rows.iter().map(|row| GuestRecord::from_row(row)).collect()
}

/// Any JSON value a caller might send for a free-text RSVP field.
#[derive(Deserialize)]
#[serde(untagged)]
enum LooseText {
    Text(String),
    Flag(bool),
    Int(i64),
    Float(f64),
    Other(serde::de::IgnoredAny),
}

/// Accept scalars of any type as text. `null`, `false`, `0`, `""` and
/// non-scalar values count as not supplied.
fn loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match Option::<LooseText>::deserialize(deserializer)? {
        Some(LooseText::Text(s)) if !s.is_empty() => Some(s),
        Some(LooseText::Flag(true)) => Some("true".to_string()),
        Some(LooseText::Int(n)) if n != 0 => Some(n.to_string()),
        Some(LooseText::Float(f)) if f != 0.0 && !f.is_nan() => Some(f.to_string()),
        _ => None,
    };
    Ok(text)
}

/// The cells an RSVP may change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsvpUpdate {
    #[serde(rename = "confirmacion", default, deserialize_with = "loose_text")]
    pub confirmation: Option<String>,

    #[serde(rename = "preferencias", default, deserialize_with = "loose_text")]
    pub preferences: Option<String>,
}

impl RsvpUpdate {
    pub fn new(confirmation: Option<String>, preferences: Option<String>) -> Self {
        RsvpUpdate {
            confirmation,
            preferences,
        }
    }

    /// Text for the confirmation cell. Never empty.
    pub fn confirmation_text(&self) -> &str {
        match self.confirmation.as_deref() {
            Some(text) if !text.is_empty() => text,
            _ => DEFAULT_CONFIRMATION,
        }
    }

    /// Text for the preferences cell, or `None` to leave the cell alone.
    pub fn preferences_text(&self) -> Option<&str> {
        self.preferences.as_deref().filter(|text| !text.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn full_row_maps_in_column_order() {
        let guest = GuestRecord::from_row(&row(&["G1", "2", "Ana", "SI", "vegan"]));

        assert_eq!(guest.group_id.as_deref(), Some("G1"));
        assert_eq!(guest.party_size.as_deref(), Some("2"));
        assert_eq!(guest.name.as_deref(), Some("Ana"));
        assert_eq!(guest.confirmation, "SI");
        assert_eq!(guest.preferences, "vegan");
    }

    #[test]
    fn short_row_defaults_only_rsvp_cells() {
        let guest = GuestRecord::from_row(&row(&["G1", "2", "Ana"]));
        assert_eq!(guest.name.as_deref(), Some("Ana"));
        assert_eq!(guest.confirmation, "");
        assert_eq!(guest.preferences, "");

        let empty = GuestRecord::from_row(&[]);
        assert_eq!(empty.group_id, None);
        assert_eq!(empty.party_size, None);
        assert_eq!(empty.name, None);
        assert_eq!(empty.confirmation, "");
        assert_eq!(empty.preferences, "");
    }

    #[test]
    fn blank_cells_pass_through_unchanged() {
        let guest = GuestRecord::from_row(&row(&["", "", "Luis", "", "sin gluten"]));
        assert_eq!(guest.group_id.as_deref(), Some(""));
        assert_eq!(guest.party_size.as_deref(), Some(""));
        assert_eq!(guest.preferences, "sin gluten");
    }

    #[test]
    fn mapping_preserves_row_order() {
        let rows = vec![row(&["G1", "1", "Ana"]), row(&["G2", "3", "Luis", "SI"])];
        let names: Vec<_> = guests_from_rows(&rows)
            .into_iter()
            .map(|g| g.name.unwrap_or_default())
            .collect();
        assert_eq!(names, vec!["Ana", "Luis"]);
    }

    #[test]
    fn json_uses_sheet_field_names_and_omits_missing_ids() {
        let guest = GuestRecord::from_row(&row(&["G1"]));
        let json = serde_json::to_value(&guest).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "idGrupo": "G1",
                "confirmacion": "",
                "preferencias": ""
            })
        );
    }

    #[test]
    fn missing_or_empty_confirmation_uses_default() {
        assert_eq!(RsvpUpdate::default().confirmation_text(), DEFAULT_CONFIRMATION);

        let empty = RsvpUpdate::new(Some(String::new()), None);
        assert_eq!(empty.confirmation_text(), DEFAULT_CONFIRMATION);

        let explicit = RsvpUpdate::new(Some("NO".into()), None);
        assert_eq!(explicit.confirmation_text(), "NO");
    }

    #[test]
    fn empty_preferences_are_skipped() {
        assert_eq!(RsvpUpdate::default().preferences_text(), None);
        assert_eq!(
            RsvpUpdate::new(None, Some(String::new())).preferences_text(),
            None
        );
        assert_eq!(
            RsvpUpdate::new(None, Some("vegan".into())).preferences_text(),
            Some("vegan")
        );
    }

    #[test]
    fn update_deserializes_from_request_fields() {
        let update: RsvpUpdate =
            serde_json::from_str(r#"{"confirmacion":"SI","nombre":"Ana"}"#).unwrap();
        assert_eq!(update.confirmation.as_deref(), Some("SI"));
        assert_eq!(update.preferences, None);
    }

    #[test]
    fn update_accepts_any_scalar_type() {
        let update: RsvpUpdate =
            serde_json::from_str(r#"{"confirmacion":true,"preferencias":2}"#).unwrap();
        assert_eq!(update.confirmation.as_deref(), Some("true"));
        assert_eq!(update.preferences.as_deref(), Some("2"));

        let update: RsvpUpdate =
            serde_json::from_str(r#"{"confirmacion":1.5,"preferencias":-3}"#).unwrap();
        assert_eq!(update.confirmation.as_deref(), Some("1.5"));
        assert_eq!(update.preferences.as_deref(), Some("-3"));
    }

    #[test]
    fn falsy_and_structured_values_count_as_absent() {
        for body in [
            r#"{"confirmacion":null,"preferencias":false}"#,
            r#"{"confirmacion":0,"preferencias":""}"#,
            r#"{"confirmacion":[1],"preferencias":{"a":1}}"#,
        ] {
            let update: RsvpUpdate = serde_json::from_str(body).unwrap();
            assert_eq!(update, RsvpUpdate::default(), "{}", body);
            assert_eq!(update.confirmation_text(), DEFAULT_CONFIRMATION);
            assert_eq!(update.preferences_text(), None);
        }
    }
}
