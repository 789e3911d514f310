//! Status rules for departments, incidents and tasks
//!
//! None of the status fields is a strict state machine: an operator may move
//! a department, incident or task from any value to any other. The rules
//! enforced here are domain membership (a value outside the enumerated set
//! is a caller error) and timestamping of incident/task writes.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

use crate::core::error::{HosconError, Result};

/// An enumerated column value with a fixed, closed domain
pub trait DomainValue: Copy + Sized + 'static {
    /// Field name used in validation messages
    const FIELD: &'static str;

    /// Every member of the domain, in display order
    const ALL: &'static [Self];

    /// Canonical spelling, as stored and displayed
    fn as_str(&self) -> &'static str;
}

/// Comma-separated list of the allowed spellings
pub fn allowed_values<T: DomainValue>() -> String {
    T::ALL
        .iter()
        .map(|v| v.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a domain value, accepting any case and `-`/`_` in place of spaces
pub fn parse_domain<T: DomainValue>(input: &str) -> Result<T> {
    let wanted = normalize(input);
    T::ALL
        .iter()
        .copied()
        .find(|v| normalize(v.as_str()) == wanted)
        .ok_or_else(|| {
            HosconError::validation(
                T::FIELD,
                format!("'{}' is not one of {}", input.trim(), allowed_values::<T>()),
            )
        })
}

fn normalize(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .replace(['-', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Current instant at the precision the store keeps (microseconds)
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Fixed-width RFC 3339 text, e.g. `2024-05-01T12:00:00.123456+00:00`.
/// Lexical order of these strings equals chronological order.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// Parse any RFC 3339 timestamp into UTC
pub fn parse_timestamp(s: &str) -> std::result::Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc))
}

/// Read a timestamp column written by [`format_timestamp`]
pub fn timestamp_column(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let text: String = row.get(idx)?;
    parse_timestamp(&text).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Serde adapter so exported timestamps use the stored spelling
pub mod timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let text = String::deserialize(deserializer)?;
        super::parse_timestamp(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::{DepartmentStatus, IncidentStatus, Priority, TaskStatus};
    use chrono::TimeZone;

    #[test]
    fn test_parse_domain_normalizes() {
        assert_eq!(
            parse_domain::<TaskStatus>("  IN_progress ").unwrap(),
            TaskStatus::InProgress
        );
        assert_eq!(
            parse_domain::<IncidentStatus>("resolved").unwrap(),
            IncidentStatus::Resolved
        );
    }

    #[test]
    fn test_parse_domain_error_lists_allowed() {
        let err = parse_domain::<Priority>("Urgent").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid priority: 'Urgent' is not one of Low, Medium, High, Critical"
        );
    }

    #[test]
    fn test_every_spelling_parses_back() {
        for v in DepartmentStatus::ALL {
            assert_eq!(parse_domain::<DepartmentStatus>(v.as_str()).unwrap(), *v);
        }
        for v in TaskStatus::ALL {
            assert_eq!(parse_domain::<TaskStatus>(v.as_str()).unwrap(), *v);
        }
    }

    #[test]
    fn test_timestamp_format_is_fixed_width() {
        let a = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let b = Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap();
        let fa = format_timestamp(&a);
        let fb = format_timestamp(&b);
        assert_eq!(fa, "2024-05-01T09:00:00.000000+00:00");
        assert_eq!(fa.len(), fb.len());
        assert!(fa < fb);
        assert_eq!(parse_timestamp(&fa).unwrap(), a);
    }

    #[test]
    fn test_parse_timestamp_accepts_offsets() {
        let ts = parse_timestamp("2024-05-01T12:00:00+02:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_now_is_microsecond_precision() {
        let ts = now();
        assert_eq!(ts.timestamp_subsec_nanos() % 1_000, 0);
        assert_eq!(parse_timestamp(&format_timestamp(&ts)).unwrap(), ts);
    }
}
