use std::path::Path;

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct CoreError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl CoreError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `pricetrail {cmd} --help` for usage."),
            None => "Run `pricetrail --help` for usage.".to_string(),
        };
        Self::new("invalid_argument", message, vec![help_hint])
    }

    pub fn capture_not_found(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "capture_not_found",
            &format!("Could not read capture file `{location}`: {detail}"),
            vec![
                "Verify the path points at an exported .har file.".to_string(),
                "Export the capture again from your browser's network panel.".to_string(),
            ],
        )
    }

    pub fn capture_invalid_json(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "capture_invalid_json",
            &format!("Could not decode JSON from `{location}`. Is it a valid HAR file?"),
            vec![
                "Re-export the capture; partial saves produce truncated JSON.".to_string(),
            ],
        )
    }

    pub fn capture_missing_entries(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "capture_missing_entries",
            &format!("Capture `{location}` has no `log.entries` sequence."),
            vec![
                "Export the full HAR from the network panel, not a single request.".to_string(),
            ],
        )
    }

    pub fn input_dir_not_found(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "input_dir_not_found",
            &format!("Input directory `{location}` was not found."),
            vec![
                "Run `pricetrail extract <har>` first to produce item CSV files.".to_string(),
                "Pass the directory that holds those CSV files.".to_string(),
            ],
        )
    }

    pub fn no_price_files(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "no_price_files",
            &format!("No CSV files found in `{location}`."),
            vec![
                "Run `pricetrail extract <har>` to produce item CSV files.".to_string(),
            ],
        )
    }

    pub fn output_write_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "output_write_failed",
            &format!("Could not write output to `{location}`: {detail}"),
            vec![format!("Grant write access to `{location}` or pass a writable location.")],
        )
    }

    pub fn cache_read_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "cache_read_failed",
            &format!("Could not read the item-type cache at `{location}`: {detail}"),
            vec![
                format!("Fix or delete `{location}`; a fresh cache is rebuilt on the next run."),
                "Or pass a different location with `--cache`.".to_string(),
            ],
        )
    }

    pub fn cache_write_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "cache_write_failed",
            &format!("Could not write the item-type cache at `{location}`: {detail}"),
            vec![format!(
                "Grant write access to `{location}` or pass a writable `--cache` path."
            )],
        )
    }

    pub fn home_not_resolvable() -> Self {
        Self::new(
            "home_not_resolvable",
            "Could not resolve a home directory for the item-type cache.",
            vec![
                "Set `PRICETRAIL_HOME` to a writable directory.".to_string(),
                "Or pass an explicit `--cache` path.".to_string(),
            ],
        )
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
