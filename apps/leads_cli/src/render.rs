//! Plain-text rendering of the lead table.

use leads_core::{FieldSet, SortDirection, SortState};
use shared::domain::Record;

pub const NO_DATA: &str = "No data available";
const MAX_CELL_WIDTH: usize = 32;

/// Renders the visible rows; `total` is the number of records before filtering.
pub fn render_table(fields: &FieldSet, rows: &[&Record], total: usize, sort: &SortState) -> String {
    if fields.is_empty() {
        return format!("{NO_DATA}\n");
    }

    let headers: Vec<String> = fields
        .iter()
        .map(|field| match sort.key() {
            Some(key) if key.field == field => {
                let arrow = match key.direction {
                    SortDirection::Ascending => "^",
                    SortDirection::Descending => "v",
                };
                format!("{field} {arrow}")
            }
            _ => field.to_string(),
        })
        .collect();
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| fields.iter().map(|field| cell(row, field)).collect())
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &cells {
        for (width, value) in widths.iter_mut().zip(row) {
            *width = (*width).max(value.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &headers, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);
    for row in &cells {
        push_line(&mut out, row, &widths);
    }
    out.push_str(&format!("{} of {} shown\n", rows.len(), row_word(total)));
    out
}

fn row_word(count: usize) -> String {
    if count == 1 {
        "1 row".to_string()
    } else {
        format!("{count} rows")
    }
}

fn push_line(out: &mut String, values: &[String], widths: &[usize]) {
    let line: Vec<String> = values
        .iter()
        .zip(widths)
        .map(|(value, width)| format!("{value:<width$}"))
        .collect();
    out.push_str(line.join(" | ").trim_end());
    out.push('\n');
}

fn cell(record: &Record, field: &str) -> String {
    let value = record.text(field).unwrap_or_default();
    let value = value.replace(['\n', '\r'], " ");
    if value.chars().count() > MAX_CELL_WIDTH {
        let cut: String = value.chars().take(MAX_CELL_WIDTH - 3).collect();
        format!("{cut}...")
    } else {
        value
    }
}

/// One `field: value` line per field, in record order.
pub fn render_record(record: &Record) -> String {
    let mut out = String::new();
    for field in record.field_names() {
        let value = record.text(field).unwrap_or_default();
        out.push_str(&format!("{field}: {value}\n"));
    }
    out
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
