//! Commissions service client
//!
//! One GET per query, no retry, transport default timeout. Failures are
//! classified so the UI can tell a rejecting server apart from one that
//! never answered.

use crate::model::commission::CommissionRecord;
use crate::model::query::QueryError;
use crate::model::range::ValidRange;
use log::{debug, info, warn};
use reqwest::blocking::Client;
use reqwest::Url;
use serde_json::Value;

/// Something that can answer a range query
///
/// Called from the query worker thread, hence `Send + Sync`.
pub trait CommissionSource: Send + Sync {
    fn fetch_commissions(&self, range: &ValidRange) -> Result<Vec<CommissionRecord>, QueryError>;
}

/// HTTP client for the commissions endpoint
pub struct HttpCommissionSource {
    client: Client,
    url: String,
}

impl HttpCommissionSource {
    pub fn new(url: impl Into<String>) -> Result<Self, QueryError> {
        let client = Client::builder()
            .build()
            .map_err(|e| QueryError::Request(e.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl CommissionSource for HttpCommissionSource {
    fn fetch_commissions(&self, range: &ValidRange) -> Result<Vec<CommissionRecord>, QueryError> {
        let url = Url::parse(&self.url)
            .map_err(|e| QueryError::Request(format!("invalid URL '{}': {}", self.url, e)))?;

        info!("GET {} for {}", url, range);

        let response = self
            .client
            .get(url)
            .query(&range.query_params()[..])
            .send()
            .map_err(classify_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            let message = server_message(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("").to_string());
            warn!("commissions service answered {}: {}", status.as_u16(), message);
            return Err(QueryError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().map_err(classify_transport_error)?;
        let records: Vec<CommissionRecord> =
            serde_json::from_str(&body).map_err(|e| QueryError::Decode(e.to_string()))?;

        debug!("received {} commission records", records.len());
        Ok(records)
    }
}

/// Split reqwest failures into "never sent" and "sent, no answer"
fn classify_transport_error(err: reqwest::Error) -> QueryError {
    if err.is_builder() {
        warn!("could not build commissions request: {}", err);
        QueryError::Request(err.to_string())
    } else {
        warn!("no response from commissions service: {}", err);
        QueryError::NoResponse(err.to_string())
    }
}

/// Pull a displayable message out of an error body.
///
/// Prefers a non-blank JSON `message` field (a string, or a list of
/// strings), otherwise the raw body. `None` for an empty body.
fn server_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        match map.get("message") {
            Some(Value::String(msg)) if !msg.trim().is_empty() => return Some(msg.clone()),
            Some(Value::Array(items)) => {
                let parts: Vec<&str> = items
                    .iter()
                    .filter_map(Value::as_str)
                    .filter(|s| !s.trim().is_empty())
                    .collect();
                if !parts.is_empty() {
                    return Some(parts.join("; "));
                }
            }
            _ => {}
        }
    }

    Some(body.to_string())
}
