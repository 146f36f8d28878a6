use std::io;

use serde_json::Value;

use super::format::key_value_rows;

pub fn render_history(data: &Value) -> io::Result<String> {
    let mut lines = vec![value_string(data, "message"), String::new()];

    let summary = &data["summary"];
    lines.extend(key_value_rows(
        &[
            ("Files read:", count(summary, "files_read")),
            ("Files skipped:", count(summary, "files_skipped")),
            ("Rows read:", count(summary, "rows_read")),
            ("Rows skipped:", count(summary, "rows_skipped")),
            ("Items seen:", count(summary, "items_seen")),
            ("Items reported:", count(summary, "items_reported")),
            ("Points written:", count(summary, "points_reported")),
        ],
        2,
    ));

    if let Some(skipped) = data["skipped_files"].as_array()
        && !skipped.is_empty()
    {
        lines.push(String::new());
        lines.push("Skipped files:".to_string());
        for (index, file) in skipped.iter().enumerate() {
            let name = value_string(file, "file");
            let reason = value_string(file, "reason");
            lines.push(format!("  {}. {name}: {reason}", index + 1));
        }
    }

    if let Some(skipped) = data["skipped_rows"].as_array()
        && !skipped.is_empty()
    {
        lines.push(String::new());
        lines.push("Skipped rows:".to_string());
        for (index, row) in skipped.iter().enumerate() {
            let file = value_string(row, "file");
            let row_number = count(row, "row");
            let detail = value_string(row, "detail");
            lines.push(format!("  {}. {file} row {row_number}: {detail}", index + 1));
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
