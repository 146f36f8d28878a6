use std::io;

use serde_json::Value;

use super::format::key_value_rows;

pub fn render_filter(data: &Value) -> io::Result<String> {
    let mut lines = vec![
        data.get("message")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string(),
        String::new(),
    ];

    let kept = data.get("entries_kept").and_then(Value::as_i64).unwrap_or(0);
    let dropped = data
        .get("entries_dropped")
        .and_then(Value::as_i64)
        .unwrap_or(0);
    lines.extend(key_value_rows(
        &[
            ("Entries kept:", kept.to_string()),
            ("Entries dropped:", dropped.to_string()),
        ],
        2,
    ));

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::render_filter;

    #[test]
    fn renders_kept_and_dropped_counts() {
        let data = json!({
            "message": "Kept 3 order-detail entries in `slim.har`.",
            "entries_kept": 3,
            "entries_dropped": 41
        });

        let rendered = render_filter(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("Entries kept:     3"));
            assert!(text.contains("Entries dropped:  41"));
        }
    }
}
