use std::io;

use serde_json::Value;

use super::format::key_value_rows;

pub fn render_extract(data: &Value) -> io::Result<String> {
    let mut lines = vec![value_string(data, "message"), String::new()];

    let summary = &data["summary"];
    lines.extend(key_value_rows(
        &[
            ("Entries scanned:", count(summary, "entries_total")),
            ("Entries matched:", count(summary, "entries_matched")),
            ("Entries skipped:", count(summary, "entries_skipped")),
            ("Records collected:", count(summary, "records_collected")),
            ("Items missing data:", count(summary, "items_missing_fields")),
            ("New cache entries:", count(summary, "cache_inserts")),
            ("Type cache:", value_string(data, "cache_path")),
        ],
        2,
    ));

    if let Some(skipped) = data["skipped_entries"].as_array()
        && !skipped.is_empty()
    {
        lines.push(String::new());
        lines.push("Skipped entries:".to_string());
        for (index, entry) in skipped.iter().enumerate() {
            let url = value_string(entry, "url");
            let reason = value_string(entry, "reason");
            lines.push(format!("  {}. {url} ({reason})", index + 1));
        }
    }

    if let Some(warnings) = data["title_date_warnings"].as_array()
        && !warnings.is_empty()
    {
        lines.push(String::new());
        lines.push("Titles without a date:".to_string());
        for (index, warning) in warnings.iter().enumerate() {
            let order_id = value_string(warning, "order_id");
            let title = value_string(warning, "title");
            lines.push(format!("  {}. order {order_id}: {title}", index + 1));
        }
    }

    Ok(lines.join("\n"))
}

fn value_string(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}

fn count(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_i64)
        .unwrap_or(0)
        .to_string()
}
