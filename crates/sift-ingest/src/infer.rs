//! Column type inference for delimited text.

use std::collections::HashSet;

use sift_core::{Column, ColumnData};

/// Field values read as missing.
pub const MISSING_MARKERS: &[&str] = &[
    "", "NA", "N/A", "NaN", "nan", "null", "NULL", "None", "<NA>", "#N/A", "n/a", "-NaN", "-nan",
];

#[must_use]
pub fn is_missing_marker(field: &str) -> bool {
    MISSING_MARKERS.contains(&field)
}

fn parse_bool(field: &str) -> Option<bool> {
    match field {
        "True" | "true" | "TRUE" => Some(true),
        "False" | "false" | "FALSE" => Some(false),
        _ => None,
    }
}

/// Parse every present cell with `parse`, or give up on the first failure.
fn parse_all<T>(raw: &[Option<String>], parse: impl Fn(&str) -> Option<T>) -> Option<Vec<Option<T>>> {
    raw.iter()
        .map(|cell| match cell {
            None => Some(None),
            Some(text) => parse(text).map(Some),
        })
        .collect()
}

/// Build a typed column from raw string fields.
///
/// Tries integer, float, boolean in that order; falls back to text with the
/// original strings. A column with no present values is a float column.
#[must_use]
pub fn column_from_text(name: String, fields: Vec<String>) -> Column {
    let raw: Vec<Option<String>> = fields
        .into_iter()
        .map(|field| (!is_missing_marker(&field)).then_some(field))
        .collect();

    if raw.iter().all(Option::is_none) {
        return Column::new(name, ColumnData::Float(vec![None; raw.len()]));
    }
    if let Some(values) = parse_all(&raw, |s| s.trim().parse::<i64>().ok()) {
        return Column::new(name, ColumnData::Integer(values));
    }
    if let Some(values) = parse_all(&raw, |s| s.trim().parse::<f64>().ok()) {
        return Column::new(name, ColumnData::Float(values));
    }
    if let Some(values) = parse_all(&raw, parse_bool) {
        return Column::new(name, ColumnData::Boolean(values));
    }
    Column::new(name, ColumnData::Text(raw))
}

/// Make header names unique: blanks become `Unnamed: <index>`, repeats get
/// `.1`, `.2`, ... appended.
#[must_use]
pub fn dedupe_headers<I, S>(headers: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for (index, header) in headers.into_iter().enumerate() {
        let base = match header.as_ref() {
            "" => format!("Unnamed: {index}"),
            other => other.to_string(),
        };
        let mut name = base.clone();
        let mut suffix = 1;
        while seen.contains(&name) {
            name = format!("{base}.{suffix}");
            suffix += 1;
        }
        seen.insert(name.clone());
        names.push(name);
    }
    names
}
