pub(crate) mod capture;
pub(crate) mod order;
pub(crate) mod output;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde_json::Value;

use crate::CoreResult;
use crate::classify::{TypeCache, TypeCacheStore};
use crate::contracts::types::{ExtractSummary, ItemRecord, SkippedEntry, TitleDateWarning};
use crate::dates;

#[derive(Debug)]
pub(crate) struct ExtractExecution {
    pub(crate) output_path: Option<PathBuf>,
    pub(crate) written: bool,
    pub(crate) message: String,
    pub(crate) summary: ExtractSummary,
    pub(crate) skipped_entries: Vec<SkippedEntry>,
    pub(crate) title_date_warnings: Vec<TitleDateWarning>,
}

pub(crate) fn execute(
    capture_path: &Path,
    out_dir: &Path,
    store: &dyn TypeCacheStore,
) -> CoreResult<ExtractExecution> {
    let mut capture_doc = capture::load_capture(capture_path)?;
    let entries = capture::take_entries(&mut capture_doc, capture_path)?;

    let mut cache = TypeCache::load(store)?;
    let mut records: Vec<ItemRecord> = Vec::new();
    let mut order_dates: Vec<NaiveDate> = Vec::new();
    let mut skipped_entries: Vec<SkippedEntry> = Vec::new();
    let mut title_date_warnings: Vec<TitleDateWarning> = Vec::new();
    let mut entries_matched = 0i64;
    let mut items_missing_fields = 0i64;

    for entry in &entries {
        if !capture::entry_matches(entry) {
            continue;
        }
        entries_matched += 1;
        let url = capture::entry_url(entry).unwrap_or_default().to_string();

        let Some(body_text) = capture::response_body(entry) else {
            skipped_entries.push(skip(url, "body_missing", None));
            continue;
        };
        let body: Value = match serde_json::from_str(body_text) {
            Ok(value) => value,
            Err(error) => {
                skipped_entries.push(skip(url, "body_not_json", Some(error.to_string())));
                continue;
            }
        };
        let Some(parsed) = order::parse_order(&body) else {
            skipped_entries.push(skip(url, "order_fields_missing", None));
            continue;
        };
        items_missing_fields += parsed.items_missing_fields;

        // A title without the date pattern still labels its records, but
        // cannot contribute to the filename range.
        let order_date = match dates::find_human_date(&parsed.title) {
            Some(span) => {
                if let Some(date) = dates::parse_human_date(span) {
                    order_dates.push(date);
                }
                span.to_string()
            }
            None => {
                title_date_warnings.push(TitleDateWarning {
                    order_id: parsed.order_id.clone(),
                    title: parsed.title.clone(),
                });
                parsed.title.clone()
            }
        };

        for item in parsed.items {
            let is_food = cache.lookup_or_insert(&item.name);
            records.push(ItemRecord {
                order_id: parsed.order_id.clone(),
                order_date: order_date.clone(),
                item_name: item.name,
                is_food,
                quantity: item.quantity,
                price: item.price,
            });
        }
    }

    cache.persist_if_dirty(store)?;

    let summary = ExtractSummary {
        entries_total: entries.len() as i64,
        entries_matched,
        entries_skipped: skipped_entries.len() as i64,
        records_collected: records.len() as i64,
        items_missing_fields,
        cache_inserts: cache.inserts(),
    };

    if records.is_empty() {
        return Ok(ExtractExecution {
            output_path: None,
            written: false,
            message: "No item data was collected. No CSV file was created.".to_string(),
            summary,
            skipped_entries,
            title_date_warnings,
        });
    }

    let file_name = output::output_file_name(&order_dates);
    let written_path = output::write_records(out_dir, &file_name, &records)?;
    let message = format!(
        "Saved {} item records to `{}`.",
        records.len(),
        written_path.display()
    );

    Ok(ExtractExecution {
        output_path: Some(written_path),
        written: true,
        message,
        summary,
        skipped_entries,
        title_date_warnings,
    })
}

fn skip(url: String, reason: &str, detail: Option<String>) -> SkippedEntry {
    SkippedEntry {
        url,
        reason: reason.to_string(),
        detail,
    }
}
