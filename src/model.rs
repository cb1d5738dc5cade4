//! Shared log record type, the delimited-payload parser, and the pure
//! derivation layer (filtering, facets, pagination) used by the UI.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const ITEMS_PER_PAGE_OPTIONS: [usize; 4] = [10, 25, 50, 100];

/// One log entry as produced by the upstream payload. Fields are optional
/// because a short chunk leaves its tail positions absent; absent fields
/// are omitted from the JSON, never defaulted or rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

// ---------------------------------------------------------------------------
// Payload parsing
// ---------------------------------------------------------------------------

/// Strip at most one leading and one trailing double quote.
fn unquote(s: &str) -> &str {
    let s = s.strip_prefix('"').unwrap_or(s);
    s.strip_suffix('"').unwrap_or(s)
}

/// Parse the upstream payload: a bracketed, quoted, comma-separated list of
/// `|=|`-delimited entries, e.g. `["a|=|b|=|c|=|d|=|e","f|=|g|=|h|=|i|=|j"]`.
///
/// The grammar is fixed and naive on purpose: the outer `["` / `"]` markers
/// are stripped once (anchored), entries are split on bare commas (a comma
/// inside a message corrupts that record), and only the timestamp and id
/// positions are unquoted, because only they touch the `","` entry
/// boundaries. Upstream compatibility depends on this exact behavior.
pub fn parse_delimited_payload(data: &str) -> Vec<LogRecord> {
    let clean = data.strip_prefix("[\"").unwrap_or(data);
    let clean = clean.strip_suffix("\"]").unwrap_or(clean);

    clean
        .split(',')
        .map(|item| {
            let mut fields = item.split("|=|");
            let timestamp = fields.next().map(|f| unquote(f).to_string());
            let event = fields.next().map(str::to_string);
            let kind = fields.next().map(str::to_string);
            let message = fields.next().map(str::to_string);
            let id = fields.next().map(|f| unquote(f).to_string());

            LogRecord {
                timestamp,
                event,
                kind,
                message,
                id,
            }
        })
        .collect()
}

/// Parse a record timestamp for ordering. RFC 3339 only; anything else
/// sorts as "no timestamp".
pub fn parse_timestamp(timestamp: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(timestamp)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Sort newest-first by parsed timestamp. Records without a parseable
/// timestamp go last; ties keep their input order.
pub fn sort_newest_first(records: &mut [LogRecord]) {
    records.sort_by(|a, b| {
        let a_ts = a.timestamp.as_deref().and_then(parse_timestamp);
        let b_ts = b.timestamp.as_deref().and_then(parse_timestamp);
        b_ts.cmp(&a_ts)
    });
}

// ---------------------------------------------------------------------------
// View derivations
// ---------------------------------------------------------------------------

/// Active filter values; empty string means "no constraint".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogFilter {
    pub event: String,
    pub kind: String,
    pub search: String,
    pub day: String,
}

/// Types compare case-insensitively everywhere (facets and filtering).
pub fn standardize_type(kind: &str) -> String {
    kind.to_uppercase()
}

/// Render a timestamp as its calendar day, fixed en-UK `dd/mm/yyyy` form.
/// Day filtering is equality on this string, not a timestamp range.
pub fn format_day(timestamp: Option<&str>) -> String {
    match timestamp.and_then(parse_timestamp) {
        Some(dt) => dt.format("%d/%m/%Y").to_string(),
        None => "Invalid Date".to_string(),
    }
}

fn matches_filter(record: &LogRecord, filter: &LogFilter) -> bool {
    let matches_event = filter.event.is_empty() || record.event.as_deref() == Some(&*filter.event);
    let matches_kind = filter.kind.is_empty()
        || record
            .kind
            .as_deref()
            .is_some_and(|k| standardize_type(k) == standardize_type(&filter.kind));
    let matches_search = filter.search.is_empty()
        || record
            .message
            .as_deref()
            .is_some_and(|m| m.to_lowercase().contains(&filter.search.to_lowercase()));
    let matches_day =
        filter.day.is_empty() || format_day(record.timestamp.as_deref()) == filter.day;

    matches_event && matches_kind && matches_search && matches_day
}

/// All four constraints ANDed; surviving records keep their relative order.
pub fn filter_records(records: &[LogRecord], filter: &LogFilter) -> Vec<LogRecord> {
    records
        .iter()
        .filter(|r| matches_filter(r, filter))
        .cloned()
        .collect()
}

fn dedup_first_seen(values: impl Iterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for v in values {
        if !out.contains(&v) {
            out.push(v);
        }
    }
    out
}

/// Distinct event names in first-seen order. Facets always come from the
/// unfiltered set, so options never shrink as other filters apply.
pub fn unique_events(records: &[LogRecord]) -> Vec<String> {
    dedup_first_seen(records.iter().filter_map(|r| r.event.clone()))
}

/// Distinct standardized types, sorted lexicographically.
pub fn unique_types(records: &[LogRecord]) -> Vec<String> {
    let mut types = dedup_first_seen(
        records
            .iter()
            .filter_map(|r| r.kind.as_deref().map(standardize_type)),
    );
    types.sort();
    types
}

/// Distinct formatted days, newest day first (sorted by date value, not
/// string). Unparseable days go last.
pub fn unique_days(records: &[LogRecord]) -> Vec<String> {
    let mut days = dedup_first_seen(records.iter().map(|r| format_day(r.timestamp.as_deref())));
    days.sort_by(|a, b| {
        let a_date = NaiveDate::parse_from_str(a, "%d/%m/%Y").ok();
        let b_date = NaiveDate::parse_from_str(b, "%d/%m/%Y").ok();
        b_date.cmp(&a_date)
    });
    days
}

pub fn page_count(filtered_len: usize, items_per_page: usize) -> usize {
    filtered_len.div_ceil(items_per_page)
}

/// The slice of `records` for a 1-based page. An out-of-range page yields
/// an empty slice rather than panicking.
pub fn paginate(
    records: &[LogRecord],
    current_page: usize,
    items_per_page: usize,
) -> Vec<LogRecord> {
    let start = current_page.saturating_sub(1) * items_per_page;
    let end = (start + items_per_page).min(records.len());
    records.get(start..end).unwrap_or(&[]).to_vec()
}
