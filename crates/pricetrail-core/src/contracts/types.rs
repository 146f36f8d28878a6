use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Classification of an extracted item, persisted in the item-type cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Food,
    NonFood,
    Unknown,
}

impl ItemType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::NonFood => "nonfood",
            Self::Unknown => "unknown",
        }
    }
}

/// One flattened purchased item. Field order matches the CSV column order.
#[derive(Debug, Clone, Serialize)]
pub struct ItemRecord {
    pub order_id: String,
    pub order_date: String,
    pub item_name: String,
    pub is_food: ItemType,
    pub quantity: Number,
    pub price: Number,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedEntry {
    pub url: String,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Raised when an order title carries no `Month Day, Year` date. The raw
/// title still feeds the record's order_date, but is excluded from the
/// output filename range.
#[derive(Debug, Clone, Serialize)]
pub struct TitleDateWarning {
    pub order_id: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractSummary {
    pub entries_total: i64,
    pub entries_matched: i64,
    pub entries_skipped: i64,
    pub records_collected: i64,
    pub items_missing_fields: i64,
    pub cache_inserts: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractData {
    pub capture_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
    pub written: bool,
    pub message: String,
    pub summary: ExtractSummary,
    pub skipped_entries: Vec<SkippedEntry>,
    pub title_date_warnings: Vec<TitleDateWarning>,
    pub cache_path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    pub file: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedRow {
    pub file: String,
    pub row: i64,
    pub reason: String,
    pub detail: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistorySummary {
    pub files_read: i64,
    pub files_skipped: i64,
    pub rows_read: i64,
    pub rows_skipped: i64,
    pub items_seen: i64,
    pub items_reported: i64,
    pub points_reported: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryData {
    pub input_dir: String,
    pub output_path: String,
    pub message: String,
    pub summary: HistorySummary,
    pub skipped_files: Vec<SkippedFile>,
    pub skipped_rows: Vec<SkippedRow>,
}

/// One observation in an item's price history, as serialized to the
/// history artifact. `date` is an ISO-8601 midnight timestamp.
#[derive(Debug, Clone, Serialize)]
pub struct PricePointRow {
    pub date: String,
    pub cost: f64,
    pub quantity: f64,
    pub normalized_cost: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterData {
    pub input_path: String,
    pub output_path: String,
    pub message: String,
    pub entries_kept: i64,
    pub entries_dropped: i64,
}
