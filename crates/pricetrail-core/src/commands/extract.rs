use std::path::{Path, PathBuf};

use crate::CoreResult;
use crate::classify::{self, JsonFileStore, TypeCacheStore};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::ExtractData;
use crate::extract;

pub const DEFAULT_OUTPUT_DIR: &str = "output";

#[derive(Debug, Default)]
pub struct ExtractOptions<'a> {
    pub capture_path: String,
    pub out_dir: Option<String>,
    pub cache_path: Option<String>,
    pub home_override: Option<&'a Path>,
}

pub fn run(
    capture_path: &str,
    out_dir: Option<String>,
    cache_path: Option<String>,
) -> CoreResult<SuccessEnvelope> {
    run_with_options(ExtractOptions {
        capture_path: capture_path.to_string(),
        out_dir,
        cache_path,
        home_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: ExtractOptions<'_>) -> CoreResult<SuccessEnvelope> {
    let cache_file = match options.cache_path {
        Some(path) => PathBuf::from(path),
        None => classify::default_cache_path(options.home_override)?,
    };
    let store = JsonFileStore::new(cache_file);
    let out_dir = PathBuf::from(
        options
            .out_dir
            .unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string()),
    );

    let execution = extract::execute(Path::new(&options.capture_path), &out_dir, &store)?;

    let data = ExtractData {
        capture_path: options.capture_path,
        output_path: execution
            .output_path
            .map(|path| path.display().to_string()),
        written: execution.written,
        message: execution.message,
        summary: execution.summary,
        skipped_entries: execution.skipped_entries,
        title_date_warnings: execution.title_date_warnings,
        cache_path: store.describe(),
    };

    success("extract", data)
}
