use std::path::Path;

use crate::CoreResult;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::FilterData;
use crate::filter;

pub fn run(input_path: &str, output_path: &str) -> CoreResult<SuccessEnvelope> {
    let execution = filter::execute(Path::new(input_path), Path::new(output_path))?;

    let data = FilterData {
        input_path: input_path.to_string(),
        output_path: output_path.to_string(),
        message: format!(
            "Kept {} order-detail entries in `{output_path}`.",
            execution.entries_kept
        ),
        entries_kept: execution.entries_kept,
        entries_dropped: execution.entries_dropped,
    };

    success("filter", data)
}
