//! Predicate filtering over fetched records.
//!
//! Every function here is pure: the result keeps the surviving records in input order
//! and never allocates copies of them.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use shared::domain::Record;

use crate::store::FieldSet;

/// A single filter condition. Inactive predicates (empty needle, no bounds) match
/// every record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterPredicate {
    /// Case-insensitive substring match on one field; a missing value reads as "".
    Contains { field: String, needle: String },
    /// Exact match on one field.
    Equals { field: String, value: String },
    /// Case-insensitive substring match against any table column of the record.
    Search { needle: String },
    /// Inclusive day range on a date-valued field. Records whose value is missing or
    /// unparseable are excluded whenever a bound is set.
    DateRange {
        field: String,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
}

impl FilterPredicate {
    pub fn contains(field: impl Into<String>, needle: impl Into<String>) -> Self {
        Self::Contains {
            field: field.into(),
            needle: needle.into(),
        }
    }

    pub fn equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn search(needle: impl Into<String>) -> Self {
        Self::Search {
            needle: needle.into(),
        }
    }

    pub fn date_range(
        field: impl Into<String>,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Self {
        Self::DateRange {
            field: field.into(),
            start,
            end,
        }
    }

    pub fn is_active(&self) -> bool {
        match self {
            Self::Contains { needle, .. } | Self::Search { needle } => !needle.is_empty(),
            Self::Equals { value, .. } => !value.is_empty(),
            Self::DateRange { start, end, .. } => start.is_some() || end.is_some(),
        }
    }

    /// `columns` scopes [`FilterPredicate::Search`]; keys outside it are never searched.
    pub fn matches(&self, record: &Record, columns: &FieldSet) -> bool {
        if !self.is_active() {
            return true;
        }
        match self {
            Self::Contains { field, needle } => {
                let value = record.text(field).unwrap_or_default();
                contains_ignore_case(&value, needle)
            }
            Self::Equals { field, value } => record.text(field).is_some_and(|v| v == *value),
            Self::Search { needle } => columns.iter().any(|column| {
                record
                    .text(column)
                    .is_some_and(|value| contains_ignore_case(&value, needle))
            }),
            Self::DateRange { field, start, end } => {
                let Some(parsed) = record.text(field).and_then(|v| parse_timestamp(&v)) else {
                    return false;
                };
                let day = parsed.date();
                start.map_or(true, |s| day >= s) && end.map_or(true, |e| day <= e)
            }
        }
    }
}

/// Keeps the records that satisfy every predicate.
pub fn filter<'a>(
    records: &'a [Record],
    columns: &FieldSet,
    predicates: &[FilterPredicate],
) -> Vec<&'a Record> {
    let active: Vec<&FilterPredicate> = predicates.iter().filter(|p| p.is_active()).collect();
    records
        .iter()
        .filter(|record| active.iter().all(|p| p.matches(record, columns)))
        .collect()
}

/// Unique non-empty values of `field`, in first-seen order.
pub fn distinct_values(records: &[Record], field: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter_map(|r| r.text(field))
        .filter(|v| !v.is_empty())
        .filter(|v| seen.insert(v.to_string()))
        .map(|v| v.into_owned())
        .collect()
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

const DATE_TIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parses the ISO-8601 shapes the service emits: full RFC 3339 timestamps, naive
/// date-times and bare dates. Offsets are normalized to UTC.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.naive_utc());
    }
    for format in DATE_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
#[path = "tests/filter_tests.rs"]
mod tests;
