use serde::Serialize;
use serde_json::Value;
use sift_core::responses::TablePreview;

use crate::cli::OutputFormat;

pub mod table;

use table::{TableOptions, render_aligned};

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => Ok(render_table(&serde_json::to_value(value)?)),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Print table rows. In table format the rows are laid out as a grid under
/// their column names instead of as nested JSON.
pub fn output_preview(preview: &TablePreview, format: OutputFormat) -> anyhow::Result<()> {
    if format != OutputFormat::Table {
        return output(preview, format);
    }
    println!("{}", render_preview(preview));
    Ok(())
}

fn render_preview(preview: &TablePreview) -> String {
    let headers = preview.columns.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = preview
        .rows
        .iter()
        .map(|row| row.iter().map(ToString::to_string).collect())
        .collect::<Vec<Vec<String>>>();
    let grid = render_aligned(&headers, &rows, TableOptions::from_env());
    format!(
        "{grid}\n({} of {} rows)",
        preview.rows.len(),
        preview.total_rows
    )
}

fn render_table(value: &Value) -> String {
    let options = TableOptions::from_env();
    match value {
        Value::Array(items) => render_array_table(items, options),
        Value::Object(map) => {
            let headers = ["key", "value"];
            let rows = map
                .iter()
                .map(|(key, value)| vec![key.clone(), value_to_cell(value)])
                .collect::<Vec<_>>();
            render_aligned(&headers, &rows, options)
        }
        scalar => render_aligned(&["value"], &[vec![value_to_cell(scalar)]], options),
    }
}

fn render_array_table(items: &[Value], options: TableOptions) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return render_aligned(&["value"], &rows, options);
    }

    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    if headers.is_empty() {
        return String::from("(no columns)");
    }

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(header).map_or_else(|| String::from("-"), value_to_cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    render_aligned(&header_refs, &rows, options)
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}
