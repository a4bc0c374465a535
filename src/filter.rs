//! Filter Module
//!
//! Client-side filtering of fetched records: text search, status and
//! submission date range. Every function is pure and returns a new list.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::services::Record;

/// Status value that disables the status filter
pub const STATUS_ALL: &str = "all";

/// Record fields the filters look at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterFields {
    pub search: Vec<String>,
    pub status: String,
    pub timestamp: String,
}

impl Default for FilterFields {
    fn default() -> Self {
        Self {
            search: vec!["customerName".into(), "email".into(), "id".into()],
            status: "status".into(),
            timestamp: "submittedDate".into(),
        }
    }
}

/// Criteria held by a list view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    pub search_text: Option<String>,
    pub status: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl FilterCriteria {
    /// Apply search, then status, then date range
    pub fn apply(&self, records: &[Record], fields: &FilterFields) -> Vec<Record> {
        let mut out = records.to_vec();
        if let Some(query) = &self.search_text {
            out = search(&out, query, &fields.search);
        }
        if let Some(status) = &self.status {
            out = filter_status(&out, status, &fields.status);
        }
        filter_date_range(&out, self.date_from, self.date_to, &fields.timestamp)
    }
}

/// Case-insensitive substring match over `fields`.
///
/// A blank query returns the input unchanged.
pub fn search<S: AsRef<str>>(records: &[Record], query: &str, fields: &[S]) -> Vec<Record> {
    if query.trim().is_empty() {
        return records.to_vec();
    }

    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|record| {
            fields.iter().any(|field| {
                field_text(record, field.as_ref())
                    .map(|text| text.to_lowercase().contains(&needle))
                    .unwrap_or(false)
            })
        })
        .cloned()
        .collect()
}

/// Exact match on the status field; [`STATUS_ALL`] keeps everything
pub fn filter_status(records: &[Record], status: &str, field: &str) -> Vec<Record> {
    if status == STATUS_ALL {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|record| record.get(field).and_then(Value::as_str) == Some(status))
        .cloned()
        .collect()
}

/// Keep records whose timestamp lies in `[from 00:00:00.000, to 23:59:59.999]` UTC.
///
/// Without `from` the filter is a no-op; without `to` there is no upper bound.
pub fn filter_date_range(
    records: &[Record],
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    field: &str,
) -> Vec<Record> {
    let Some(from) = from else {
        return records.to_vec();
    };

    let start = start_of_day(from);
    let end = to.map(end_of_day);

    records
        .iter()
        .filter(|record| {
            let Some(at) = record
                .get(field)
                .and_then(Value::as_str)
                .and_then(parse_timestamp)
            else {
                return false;
            };
            at >= start && end.map_or(true, |end| at <= end)
        })
        .cloned()
        .collect()
}

fn field_text(record: &Record, field: &str) -> Option<String> {
    match record.get(field)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_milli_opt(23, 59, 59, 999)
        .map(|at| at.and_utc())
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Parse RFC 3339, a zone-less date-time (UTC) or a bare date (UTC midnight)
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    if let Ok(at) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(at.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(start_of_day)
}
