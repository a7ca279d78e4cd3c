//! Service health and request status lines.

use chrono::{DateTime, FixedOffset, Local};

use crate::api::protocol::{HealthResponse, RequestStatus};
use crate::{MutationBrowserError, Result};

/// Last known state of the variant API, shown in the status bar.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiHealth {
    /// Startup check still running
    Checking,
    Ok,
    /// Reachable but reporting something other than "ok"
    Degraded(String),
    Unreachable,
}

impl ApiHealth {
    pub fn from_result(result: &Result<HealthResponse>) -> Self {
        match result {
            Ok(health) if health.is_ok() => ApiHealth::Ok,
            Ok(health) => ApiHealth::Degraded(health.status.clone()),
            Err(_) => ApiHealth::Unreachable,
        }
    }

    pub fn label(&self) -> String {
        match self {
            ApiHealth::Checking => "API: checking…".to_string(),
            ApiHealth::Ok => "API: ok".to_string(),
            ApiHealth::Degraded(status) => format!("API: {}", status),
            ApiHealth::Unreachable => "API: unreachable".to_string(),
        }
    }
}

/// Outcome of a "Check status" click for one request id.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusLookup {
    Pending,
    Found(RequestStatus),
    NotFound,
    Failed,
}

impl StatusLookup {
    pub fn from_result(result: Result<RequestStatus>) -> Self {
        match result {
            Ok(status) => StatusLookup::Found(status),
            Err(MutationBrowserError::HttpStatus(404)) => StatusLookup::NotFound,
            Err(_) => StatusLookup::Failed,
        }
    }

    pub fn line(&self) -> String {
        match self {
            StatusLookup::Pending => "Status: checking…".to_string(),
            StatusLookup::Found(status) => format!(
                "Status: {} (requested {})",
                status.status,
                format_requested_at(&status.requested_at)
            ),
            StatusLookup::NotFound => "Status: unknown request id".to_string(),
            StatusLookup::Failed => "Status: lookup failed".to_string(),
        }
    }
}

/// Format a server timestamp in local time.
///
/// Format: "2024-01-15 14:30:05"
pub fn format_requested_at(timestamp: &DateTime<FixedOffset>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status() -> RequestStatus {
        RequestStatus {
            request_id: "req-1".to_string(),
            gene: "TP53".to_string(),
            requested_at: DateTime::parse_from_rfc3339("2026-10-18T09:30:00+00:00").unwrap(),
            status: "received".to_string(),
        }
    }

    #[test]
    fn test_health_labels() {
        let ok = Ok(HealthResponse {
            status: "ok".to_string(),
        });
        assert_eq!(ApiHealth::from_result(&ok), ApiHealth::Ok);
        assert_eq!(ApiHealth::Ok.label(), "API: ok");

        let down = Err(MutationBrowserError::Transport("refused".to_string()));
        assert_eq!(ApiHealth::from_result(&down), ApiHealth::Unreachable);
        assert_eq!(ApiHealth::Unreachable.label(), "API: unreachable");

        let degraded = Ok(HealthResponse {
            status: "draining".to_string(),
        });
        assert_eq!(ApiHealth::from_result(&degraded).label(), "API: draining");
    }

    #[test]
    fn test_status_lookup_lines() {
        let found = StatusLookup::from_result(Ok(status()));
        let line = found.line();
        assert!(line.starts_with("Status: received (requested 2026-10-1"));

        assert_eq!(
            StatusLookup::from_result(Err(MutationBrowserError::HttpStatus(404))),
            StatusLookup::NotFound
        );
        assert_eq!(
            StatusLookup::from_result(Err(MutationBrowserError::HttpStatus(500))).line(),
            "Status: lookup failed"
        );
    }

    #[test]
    fn test_format_requested_at() {
        let formatted = format_requested_at(&status().requested_at);
        // Exact output depends on the local timezone
        assert_eq!(formatted.len(), "2026-10-18 09:30:00".len());
        assert!(formatted.starts_with("2026-10-1"));
    }
}
