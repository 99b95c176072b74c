use std::{borrow::Borrow, cmp::Ordering};

use shared::domain::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

/// Column the table is ordered by; `None` keeps fetch order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState(Option<SortKey>);

impl SortState {
    pub fn key(&self) -> Option<&SortKey> {
        self.0.as_ref()
    }

    pub fn field(&self) -> Option<&str> {
        self.0.as_ref().map(|k| k.field.as_str())
    }

    pub fn direction(&self) -> SortDirection {
        self.0.as_ref().map(|k| k.direction).unwrap_or_default()
    }

    /// Same column flips the direction; a new column starts ascending.
    pub fn toggle(&mut self, field: &str) {
        self.0 = Some(match self.0.take() {
            Some(key) if key.field == field => SortKey {
                direction: key.direction.flipped(),
                ..key
            },
            _ => SortKey {
                field: field.to_string(),
                direction: SortDirection::Ascending,
            },
        });
    }

    pub fn set(&mut self, field: impl Into<String>, direction: SortDirection) {
        self.0 = Some(SortKey {
            field: field.into(),
            direction,
        });
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }
}

/// Stable sort of `rows` by the text of `key`.
///
/// Values that both parse as finite numbers compare numerically; anything else compares
/// as strings. Missing values read as "", so blank cells lead an ascending column. Where
/// a column mixes numbers and text, the order is blanks, then numbers, then other text.
pub fn sort<R>(mut rows: Vec<R>, key: Option<&str>, direction: SortDirection) -> Vec<R>
where
    R: Borrow<Record>,
{
    let Some(key) = key else {
        return rows;
    };
    rows.sort_by(|a, b| {
        let (a, b): (&Record, &Record) = (a.borrow(), b.borrow());
        let ordering = compare_field(a, b, key);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    rows
}

pub fn compare_field(a: &Record, b: &Record, field: &str) -> Ordering {
    let left = a.text(field).unwrap_or_default();
    let right = b.text(field).unwrap_or_default();
    match (is_blank(&left), is_blank(&right)) {
        (true, true) => return left.cmp(&right),
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        (false, false) => {}
    }
    match (as_number(&left), as_number(&right)) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => left.cmp(&right),
    }
}

fn is_blank(raw: &str) -> bool {
    raw.trim().is_empty()
}

fn as_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
#[path = "tests/sort_tests.rs"]
mod tests;
