//! Commission records as returned by the commissions service
//!
//! Numeric fields are taken as-is from the service. Nothing here assumes an
//! amount is non-negative or that a rate lies in [0, 1]; formatting has to
//! cope with whatever arrives.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::range::DATE_FORMAT;

/// Column headers of the results table, in row order
pub const TABLE_HEADERS: [&str; 6] = [
    "Sale ID",
    "Sale Date",
    "Salesperson",
    "Amount",
    "Rate Applied",
    "Commission",
];

/// One row of the commissions report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionRecord {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    #[serde(rename = "fechaVenta", alias = "saleDate")]
    pub sale_date: String,

    #[serde(rename = "vendedor", alias = "salesperson")]
    pub salesperson: String,

    #[serde(rename = "monto", alias = "amount")]
    pub amount: f64,

    /// Fraction of the amount paid out, e.g. 0.1 for 10%
    #[serde(rename = "reglaAplicada", alias = "appliedRate")]
    pub applied_rate: f64,

    #[serde(rename = "comision", alias = "commission")]
    pub commission: f64,
}

impl CommissionRecord {
    /// Display cells for the results table, matching `TABLE_HEADERS`
    pub fn table_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            format_sale_date(&self.sale_date),
            self.salesperson.clone(),
            format_money(self.amount),
            format_rate(self.applied_rate),
            format_money(self.commission),
        ]
    }
}

/// Sums shown under the results table
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ReportTotals {
    pub records: usize,
    pub amount: f64,
    pub commission: f64,
}

impl ReportTotals {
    pub fn from_records(records: &[CommissionRecord]) -> Self {
        records.iter().fold(Self::default(), |acc, r| Self {
            records: acc.records + 1,
            amount: acc.amount + r.amount,
            commission: acc.commission + r.commission,
        })
    }
}

/// Format a monetary value as `$1234.50`
pub fn format_money(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    if value < 0.0 {
        format!("-${:.2}", value.abs())
    } else {
        format!("${:.2}", value)
    }
}

/// Format a rate fraction as a percentage: `0.1` -> `10.00%`
pub fn format_rate(rate: f64) -> String {
    let pct = rate * 100.0;
    if !pct.is_finite() {
        return "-".to_string();
    }
    format!("{:.2}%", pct)
}

/// Render a sale timestamp as a plain date.
///
/// Timestamps with an offset keep the calendar date of that offset.
/// Anything unparseable is shown verbatim.
pub fn format_sale_date(raw: &str) -> String {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.date_naive().format(DATE_FORMAT).to_string();
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return dt.date().format(DATE_FORMAT).to_string();
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return date.format(DATE_FORMAT).to_string();
    }

    raw.to_string()
}
