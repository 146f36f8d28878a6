pub(crate) mod parse;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::contracts::types::{HistorySummary, PricePointRow, SkippedFile, SkippedRow};
use crate::dates;
use crate::{CoreError, CoreResult};

#[derive(Debug)]
pub(crate) struct HistoryExecution {
    pub(crate) output_path: PathBuf,
    pub(crate) message: String,
    pub(crate) summary: HistorySummary,
    pub(crate) skipped_files: Vec<SkippedFile>,
    pub(crate) skipped_rows: Vec<SkippedRow>,
}

pub(crate) fn execute(input_dir: &Path, output_path: &Path) -> CoreResult<HistoryExecution> {
    let listing =
        fs::read_dir(input_dir).map_err(|_| CoreError::input_dir_not_found(input_dir))?;

    let mut csv_files = listing
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "csv"))
        .collect::<Vec<PathBuf>>();
    // Directory listing order is platform-dependent; sort so merge order
    // (and therefore tie-breaking) is reproducible.
    csv_files.sort();

    if csv_files.is_empty() {
        return Err(CoreError::no_price_files(input_dir));
    }

    let mut skipped_files: Vec<SkippedFile> = Vec::new();
    let mut skipped_rows: Vec<SkippedRow> = Vec::new();
    let mut files_read = 0i64;
    let mut rows_read = 0i64;

    // Merge preserving first-seen item order so delta ties rank stably.
    let mut series: Vec<(String, Vec<parse::PricePoint>)> = Vec::new();
    let mut index_by_item: HashMap<String, usize> = HashMap::new();

    for file in &csv_files {
        let label = file
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| file.display().to_string());

        match parse::read_price_file(file, &label, &mut skipped_rows) {
            Ok(rows) => {
                files_read += 1;
                rows_read += rows.rows_read;
                for (item_name, point) in rows.points {
                    match index_by_item.get(&item_name) {
                        Some(index) => series[*index].1.push(point),
                        None => {
                            index_by_item.insert(item_name.clone(), series.len());
                            series.push((item_name, vec![point]));
                        }
                    }
                }
            }
            Err(reason) => skipped_files.push(SkippedFile { file: label, reason }),
        }
    }

    let items_seen = series.len() as i64;

    // A single observation cannot show a price change.
    series.retain(|(_, points)| points.len() >= 2);
    for (_, points) in &mut series {
        points.sort_by_key(|point| point.date);
    }
    series.sort_by(|left, right| price_delta(&right.1).total_cmp(&price_delta(&left.1)));

    let points_reported = series
        .iter()
        .map(|(_, points)| points.len() as i64)
        .sum::<i64>();

    let mut mapping = Map::new();
    for (item_name, points) in &series {
        let rows = points
            .iter()
            .map(|point| {
                serde_json::to_value(PricePointRow {
                    date: dates::format_iso_timestamp(point.date),
                    cost: point.cost,
                    quantity: point.quantity,
                    normalized_cost: point.normalized_cost,
                })
                .map_err(|error| CoreError::internal_serialization(&error.to_string()))
            })
            .collect::<CoreResult<Vec<Value>>>()?;
        mapping.insert(item_name.clone(), Value::Array(rows));
    }

    let body = serde_json::to_string_pretty(&Value::Object(mapping))
        .map_err(|error| CoreError::internal_serialization(&error.to_string()))?;
    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .map_err(|error| CoreError::output_write_failed(output_path, &error.to_string()))?;
    }
    fs::write(output_path, body)
        .map_err(|error| CoreError::output_write_failed(output_path, &error.to_string()))?;

    let summary = HistorySummary {
        files_read,
        files_skipped: skipped_files.len() as i64,
        rows_read,
        rows_skipped: skipped_rows.len() as i64,
        items_seen,
        items_reported: series.len() as i64,
        points_reported,
    };
    let message = format!(
        "Saved price history for {} items to `{}`.",
        series.len(),
        output_path.display()
    );

    Ok(HistoryExecution {
        output_path: output_path.to_path_buf(),
        message,
        summary,
        skipped_files,
        skipped_rows,
    })
}

fn price_delta(points: &[parse::PricePoint]) -> f64 {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) => (last.cost - first.cost).abs(),
        _ => 0.0,
    }
}
