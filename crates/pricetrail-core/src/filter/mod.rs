use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::extract::capture;
use crate::prune;
use crate::{CoreError, CoreResult};

#[derive(Debug)]
pub(crate) struct FilterExecution {
    pub(crate) entries_kept: i64,
    pub(crate) entries_dropped: i64,
}

/// Narrows a capture to its order-detail entries, stripping request and
/// response headers plus initiator call frames, and writes the slimmed
/// capture as indented JSON.
pub(crate) fn execute(input_path: &Path, output_path: &Path) -> CoreResult<FilterExecution> {
    let mut capture_doc = capture::load_capture(input_path)?;
    let entries = capture::take_entries(&mut capture_doc, input_path)?;
    let entries_total = entries.len() as i64;

    let mut kept = Vec::new();
    for mut entry in entries {
        if !capture::entry_matches(&entry) {
            continue;
        }
        if let Some(request) = entry.get_mut("request").and_then(Value::as_object_mut) {
            request.remove("headers");
        }
        if let Some(response) = entry.get_mut("response").and_then(Value::as_object_mut) {
            response.remove("headers");
        }
        if let Some(initiator) = entry.get_mut("_initiator") {
            prune::remove_keys(initiator, &["callFrames"]);
        }
        kept.push(entry);
    }

    let entries_kept = kept.len() as i64;
    capture::restore_entries(&mut capture_doc, kept);

    let body = serde_json::to_string_pretty(&capture_doc)
        .map_err(|error| CoreError::internal_serialization(&error.to_string()))?;
    fs::write(output_path, body)
        .map_err(|error| CoreError::output_write_failed(output_path, &error.to_string()))?;

    Ok(FilterExecution {
        entries_kept,
        entries_dropped: entries_total - entries_kept,
    })
}
