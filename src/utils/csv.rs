//! CSV encoding of result records.

use indexmap::IndexSet;
use serde_json::Value;

use crate::domain::entities::FilteredJobRecord;

/// Encodes records as CSV with a header row.
///
/// Columns are the union of all record keys in first-seen order, with
/// `source` always last. Missing and `null` values are empty cells; nested
/// arrays and objects are written as compact JSON. Cells containing a comma,
/// quote or line break are quoted with inner quotes doubled.
///
/// An empty slice yields an empty string.
pub fn records_to_csv(records: &[FilteredJobRecord]) -> String {
    if records.is_empty() {
        return String::new();
    }

    let rows: Vec<Value> = records.iter().map(FilteredJobRecord::to_json).collect();

    let mut columns: IndexSet<&str> = IndexSet::new();
    for row in &rows {
        if let Some(map) = row.as_object() {
            columns.extend(map.keys().map(String::as_str).filter(|k| *k != "source"));
        }
    }
    columns.insert("source");

    let mut out = String::new();
    write_line(&mut out, columns.iter().map(|c| escape(c)));

    for row in &rows {
        write_line(
            &mut out,
            columns.iter().map(|column| escape(&cell(row.get(*column)))),
        );
    }

    out
}

fn write_line(out: &mut String, cells: impl Iterator<Item = String>) {
    let line = cells.collect::<Vec<_>>().join(",");
    out.push_str(&line);
    out.push('\n');
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(nested) => nested.to_string(),
    }
}

fn escape(text: &str) -> String {
    if text.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}
