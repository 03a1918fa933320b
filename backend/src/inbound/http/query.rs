//! Log-query parameter decoding under an explicit parsing policy.
//!
//! The historical wire contract silently ignored a `from`, `to`, or `limit`
//! value that failed to parse. That behaviour is preserved as the default
//! [`QueryPolicy::Lenient`] mode; [`QueryPolicy::Strict`] turns the same
//! failures into `400` responses. The policy governs only these query
//! parameters; request body fields are always strict.

use chrono::{DateTime, NaiveDate};
use serde::Deserialize;

use crate::domain::{Error, LogWindow};

/// How malformed `from`/`to`/`limit` values are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, serde::Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum QueryPolicy {
    /// Treat unparseable values as absent. Wire-compatible default.
    #[default]
    Lenient,
    /// Reject unparseable values with `InvalidInput` before touching storage.
    Strict,
}

/// Raw query parameters of `GET /api/users/{_id}/logs`.
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
pub struct LogQuery {
    /// Exclusive lower date bound, `YYYY-MM-DD` or RFC 3339.
    pub from: Option<String>,
    /// Exclusive upper date bound, `YYYY-MM-DD` or RFC 3339.
    pub to: Option<String>,
    /// Maximum number of log entries to return.
    pub limit: Option<String>,
}

/// Parse a calendar date from `YYYY-MM-DD` or an RFC 3339 timestamp.
///
/// The time portion of a timestamp is discarded; the tracker works at day
/// granularity.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|instant| instant.date_naive())
        })
}

fn parse_limit(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok()
}

fn strict_failure(parameter: &str, value: &str) -> Error {
    Error::invalid_input(format!("query parameter '{parameter}' is malformed: '{value}'"))
}

fn decode<T>(
    raw: Option<&str>,
    parse: impl Fn(&str) -> Option<T>,
    parameter: &str,
    policy: QueryPolicy,
) -> Result<Option<T>, Error> {
    let Some(value) = raw else { return Ok(None) };
    match (parse(value), policy) {
        (Some(parsed), _) => Ok(Some(parsed)),
        (None, QueryPolicy::Lenient) => Ok(None),
        (None, QueryPolicy::Strict) => Err(strict_failure(parameter, value)),
    }
}

/// Decode the raw query into a [`LogWindow`] under the given policy.
pub fn decode_log_window(query: &LogQuery, policy: QueryPolicy) -> Result<LogWindow, Error> {
    let after = decode(query.from.as_deref(), parse_calendar_date, "from", policy)?;
    let before = decode(query.to.as_deref(), parse_calendar_date, "to", policy)?;
    let limit = decode(query.limit.as_deref(), parse_limit, "limit", policy)?;
    Ok(LogWindow::new(after, before, limit))
}
