use std::path::Path;

use chrono::NaiveDate;

use crate::contracts::types::SkippedRow;
use crate::dates;

/// One observation parsed out of an item CSV row.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PricePoint {
    pub(crate) date: NaiveDate,
    pub(crate) cost: f64,
    pub(crate) quantity: f64,
    pub(crate) normalized_cost: f64,
}

#[derive(Debug)]
pub(crate) struct FileRows {
    pub(crate) points: Vec<(String, PricePoint)>,
    pub(crate) rows_read: i64,
}

/// The fixed item-record layout: order id, date, item name, classification
/// (ignored here), quantity, cost.
const PRICE_ROW_FIELDS: usize = 6;

/// Parses one delimited price file, header row skipped. Bad rows are
/// reported into `skipped_rows` and dropped; the rest of the file still
/// parses. A file that cannot be opened at all is returned as Err for the
/// caller to report.
pub(crate) fn read_price_file(
    path: &Path,
    file_label: &str,
    skipped_rows: &mut Vec<SkippedRow>,
) -> Result<FileRows, String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|error| error.to_string())?;

    let mut points = Vec::new();
    let mut rows_read = 0i64;

    for (index, result_row) in reader.records().enumerate() {
        let row = (index as i64) + 1;
        rows_read += 1;

        let record = match result_row {
            Ok(value) => value,
            Err(error) => {
                push_skip(skipped_rows, file_label, row, "row_unreadable", error.to_string());
                continue;
            }
        };

        if record.len() != PRICE_ROW_FIELDS {
            push_skip(
                skipped_rows,
                file_label,
                row,
                "wrong_column_count",
                format!("expected {PRICE_ROW_FIELDS} fields, got {}", record.len()),
            );
            continue;
        }

        let (Some(date_text), Some(item_name), Some(quantity_text), Some(cost_text)) =
            (record.get(1), record.get(2), record.get(4), record.get(5))
        else {
            continue;
        };

        let Ok(cost) = cost_text.trim().parse::<f64>() else {
            push_skip(
                skipped_rows,
                file_label,
                row,
                "value_not_numeric",
                format!("cost `{cost_text}` is not a number"),
            );
            continue;
        };
        let Ok(quantity) = quantity_text.trim().parse::<f64>() else {
            push_skip(
                skipped_rows,
                file_label,
                row,
                "value_not_numeric",
                format!("quantity `{quantity_text}` is not a number"),
            );
            continue;
        };
        let Some(date) = dates::parse_human_date(date_text.trim()) else {
            push_skip(
                skipped_rows,
                file_label,
                row,
                "date_unparseable",
                format!("date `{date_text}` does not match `Mon D, YYYY`"),
            );
            continue;
        };

        let normalized_cost = if quantity == 0.0 { 0.0 } else { cost / quantity };
        points.push((
            item_name.to_string(),
            PricePoint {
                date,
                cost,
                quantity,
                normalized_cost,
            },
        ));
    }

    Ok(FileRows { points, rows_read })
}

fn push_skip(
    skipped_rows: &mut Vec<SkippedRow>,
    file_label: &str,
    row: i64,
    reason: &str,
    detail: String,
) {
    skipped_rows.push(SkippedRow {
        file: file_label.to_string(),
        row,
        reason: reason.to_string(),
        detail,
    });
}
