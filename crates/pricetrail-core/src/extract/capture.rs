use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::{CoreError, CoreResult};

/// Path fragment identifying the order-detail API inside a capture.
pub(crate) const ORDER_URL_MARKER: &str = "/orchestra/orders/graphql/getOrder/";

/// Resource types the order-detail responses arrive under.
pub(crate) const ALLOWED_RESOURCE_TYPES: [&str; 2] = ["xhr", "fetch"];

pub(crate) fn load_capture(path: &Path) -> CoreResult<Value> {
    let body = fs::read_to_string(path)
        .map_err(|error| CoreError::capture_not_found(path, &error.to_string()))?;
    serde_json::from_str(&body).map_err(|_| CoreError::capture_invalid_json(path))
}

/// Takes the `log.entries` array out of a parsed capture, leaving a null
/// slot behind so `restore_entries` can put a filtered list back.
pub(crate) fn take_entries(capture: &mut Value, path: &Path) -> CoreResult<Vec<Value>> {
    let Some(slot) = capture.pointer_mut("/log/entries") else {
        return Err(CoreError::capture_missing_entries(path));
    };
    match slot.take() {
        Value::Array(entries) => Ok(entries),
        _ => Err(CoreError::capture_missing_entries(path)),
    }
}

pub(crate) fn restore_entries(capture: &mut Value, entries: Vec<Value>) {
    if let Some(slot) = capture.pointer_mut("/log/entries") {
        *slot = Value::Array(entries);
    }
}

pub(crate) fn entry_url(entry: &Value) -> Option<&str> {
    entry.pointer("/request/url").and_then(Value::as_str)
}

pub(crate) fn entry_matches(entry: &Value) -> bool {
    let Some(url) = entry_url(entry) else {
        return false;
    };
    if !url.contains(ORDER_URL_MARKER) {
        return false;
    }
    entry
        .get("_resourceType")
        .and_then(Value::as_str)
        .is_some_and(|kind| ALLOWED_RESOURCE_TYPES.contains(&kind))
}

pub(crate) fn response_body(entry: &Value) -> Option<&str> {
    entry.pointer("/response/content/text").and_then(Value::as_str)
}
