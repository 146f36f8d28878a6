use std::path::Path;

use crate::CoreResult;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::HistoryData;
use crate::history;

pub const DEFAULT_OUTPUT_FILE: &str = "historical_prices.json";

pub fn run(input_dir: &str, out_path: Option<String>) -> CoreResult<SuccessEnvelope> {
    let out_path = out_path.unwrap_or_else(|| DEFAULT_OUTPUT_FILE.to_string());
    let execution = history::execute(Path::new(input_dir), Path::new(&out_path))?;

    let data = HistoryData {
        input_dir: input_dir.to_string(),
        output_path: execution.output_path.display().to_string(),
        message: execution.message,
        summary: execution.summary,
        skipped_files: execution.skipped_files,
        skipped_rows: execution.skipped_rows,
    };

    success("history", data)
}
