use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::contracts::types::ItemRecord;
use crate::dates;
use crate::{CoreError, CoreResult};

pub(crate) const OUTPUT_FILE_SUFFIX: &str = "walmart_order_items.csv";

/// `<min>_<max>_walmart_order_items.csv` from the collected order dates,
/// or the bare suffix when no title carried a parseable date.
pub(crate) fn output_file_name(order_dates: &[NaiveDate]) -> String {
    let start = order_dates.iter().copied().min();
    let end = order_dates.iter().copied().max();
    match (start, end) {
        (Some(start), Some(end)) => format!(
            "{}_{}_{}",
            dates::format_iso_date(start),
            dates::format_iso_date(end),
            OUTPUT_FILE_SUFFIX
        ),
        _ => OUTPUT_FILE_SUFFIX.to_string(),
    }
}

pub(crate) fn write_records(
    out_dir: &Path,
    file_name: &str,
    records: &[ItemRecord],
) -> CoreResult<PathBuf> {
    fs::create_dir_all(out_dir)
        .map_err(|error| CoreError::output_write_failed(out_dir, &error.to_string()))?;

    let path = out_dir.join(file_name);
    let mut writer = csv::Writer::from_path(&path)
        .map_err(|error| CoreError::output_write_failed(&path, &error.to_string()))?;
    for record in records {
        writer
            .serialize(record)
            .map_err(|error| CoreError::output_write_failed(&path, &error.to_string()))?;
    }
    writer
        .flush()
        .map_err(|error| CoreError::output_write_failed(&path, &error.to_string()))?;
    Ok(path)
}
