//! Wire types for the variant API.
//!
//! Record fields are kept as the JSON values the server sent. Nothing is
//! parsed or validated: a VAF of `0.34` is displayed as `0.34`, a missing
//! field is displayed as an empty cell.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{MutationBrowserError, Result};

/// Default address of the local variant API.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// A single table cell, holding the server's JSON value verbatim.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct Cell(pub Value);

impl Cell {
    /// Borrow the raw JSON value.
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::Null => Ok(()),
            Value::String(s) => f.write_str(s),
            Value::Number(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
            other => write!(f, "{}", other),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell(Value::String(s.to_string()))
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell(serde_json::Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null))
    }
}

/// One variant row as returned by `GET /variants`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct VariantRecord {
    /// Sample identifier
    pub sample_id: Cell,
    /// Gene symbol
    pub gene: Cell,
    /// Variant notation (e.g. HGVS cDNA change)
    pub variant: Cell,
    /// Variant allele fraction, as given
    pub vaf: Cell,
    /// Tumor type code (e.g. LUAD)
    pub tumor_type: Cell,
}

impl VariantRecord {
    /// Build a record from an arbitrary JSON element.
    ///
    /// Objects contribute the fields they have; anything else becomes a row
    /// of empty cells.
    pub fn from_value(value: &Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }
        serde_json::from_value(value.clone()).unwrap_or_default()
    }

    /// Cells in table column order.
    pub fn cells(&self) -> [&Cell; 5] {
        [
            &self.sample_id,
            &self.gene,
            &self.variant,
            &self.vaf,
            &self.tumor_type,
        ]
    }
}

/// Successful body of `GET /variants`.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct VariantsResponse {
    /// Matching records in server order
    pub results: Vec<VariantRecord>,
    /// Trace token echoed by the server, if any
    pub request_id: Option<String>,
}

impl VariantsResponse {
    /// Decode a `/variants` response body.
    ///
    /// `results` defaults to empty when absent or null and `request_id`
    /// defaults to none when absent, null or empty.
    ///
    /// # Errors
    /// Returns `Decode` if the body is not JSON, is JSON `null`, or carries a
    /// `results` value that is not an array.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| MutationBrowserError::Decode(format!("Invalid JSON body: {}", e)))?;

        if value.is_null() {
            return Err(MutationBrowserError::Decode(
                "Response body is null".to_string(),
            ));
        }

        let results = match value.get("results") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items.iter().map(VariantRecord::from_value).collect(),
            Some(other) => {
                return Err(MutationBrowserError::Decode(format!(
                    "Expected `results` to be an array, got {}",
                    json_kind(other)
                )))
            }
        };

        let request_id = match value.get("request_id") {
            Some(Value::String(id)) if !id.is_empty() => Some(id.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };

        Ok(Self {
            results,
            request_id,
        })
    }
}

/// Body of `GET /health`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    /// Whether the service reports itself healthy.
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Body of `GET /status/<request_id>`: the logged query event.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RequestStatus {
    pub request_id: String,
    pub gene: String,
    /// When the service received the query
    pub requested_at: DateTime<FixedOffset>,
    /// Processing state reported by the event log (e.g. "received")
    pub status: String,
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_response() {
        let body = br#"{"results":[{"sample_id":"S1","gene":"TP53","variant":"c.215C>G","vaf":0.34,"tumor_type":"LUAD"}],"request_id":"req-123"}"#;
        let response = VariantsResponse::from_slice(body).unwrap();

        assert_eq!(response.results.len(), 1);
        let row = &response.results[0];
        assert_eq!(row.sample_id.to_string(), "S1");
        assert_eq!(row.gene.to_string(), "TP53");
        assert_eq!(row.variant.to_string(), "c.215C>G");
        assert_eq!(row.vaf.to_string(), "0.34");
        assert_eq!(row.tumor_type.to_string(), "LUAD");
        assert_eq!(response.request_id.as_deref(), Some("req-123"));
    }

    #[test]
    fn test_decode_empty_object() {
        let response = VariantsResponse::from_slice(b"{}").unwrap();
        assert!(response.results.is_empty());
        assert_eq!(response.request_id, None);
    }

    #[test]
    fn test_decode_null_fields_default() {
        let response =
            VariantsResponse::from_slice(br#"{"results":null,"request_id":""}"#).unwrap();
        assert!(response.results.is_empty());
        assert_eq!(response.request_id, None);
    }

    #[test]
    fn test_decode_bare_array_has_no_results() {
        let response = VariantsResponse::from_slice(br#"[{"gene":"TP53"}]"#).unwrap();
        assert!(response.results.is_empty());
    }

    #[test]
    fn test_decode_rejects_invalid_bodies() {
        assert!(matches!(
            VariantsResponse::from_slice(b"<html>oops</html>"),
            Err(MutationBrowserError::Decode(_))
        ));
        assert!(matches!(
            VariantsResponse::from_slice(b"null"),
            Err(MutationBrowserError::Decode(_))
        ));
        assert!(matches!(
            VariantsResponse::from_slice(br#"{"results":"TP53"}"#),
            Err(MutationBrowserError::Decode(_))
        ));
    }

    #[test]
    fn test_records_are_not_validated() {
        let body = br#"{"results":[{"gene":"KRAS","vaf":"high","extra":1},42]}"#;
        let response = VariantsResponse::from_slice(body).unwrap();

        assert_eq!(response.results.len(), 2);
        assert_eq!(response.results[0].gene.to_string(), "KRAS");
        assert_eq!(response.results[0].vaf.to_string(), "high");
        assert_eq!(response.results[0].sample_id.to_string(), "");
        assert_eq!(response.results[1], VariantRecord::default());
    }

    #[test]
    fn test_cell_display_keeps_numbers_verbatim() {
        assert_eq!(Cell(serde_json::json!(1)).to_string(), "1");
        assert_eq!(Cell(serde_json::json!(0.5)).to_string(), "0.5");
        assert_eq!(Cell(Value::Null).to_string(), "");
        assert_eq!(Cell::from("c.35G>A").to_string(), "c.35G>A");
    }

    #[test]
    fn test_status_deserialization() {
        let json = r#"{"request_id":"abc","gene":"EGFR","requested_at":"2026-10-18T09:30:00.123456+00:00","status":"received"}"#;
        let status: RequestStatus = serde_json::from_str(json).unwrap();

        assert_eq!(status.request_id, "abc");
        assert_eq!(status.gene, "EGFR");
        assert_eq!(status.status, "received");
        assert_eq!(status.requested_at.timestamp(), 1792315800);
    }

    #[test]
    fn test_health_is_ok() {
        let health: HealthResponse = serde_json::from_str(r#"{"status":"ok"}"#).unwrap();
        assert!(health.is_ok());
        let degraded = HealthResponse {
            status: "degraded".to_string(),
        };
        assert!(!degraded.is_ok());
    }
}
