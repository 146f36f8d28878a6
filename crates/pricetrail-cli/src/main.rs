mod cli;
mod dispatch;
mod output;
mod stdout_io;

use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};
use pricetrail_core::CoreError;
use stdout_io::write_stdout_text;

const ROOT_HELP: &str = "Pricetrail - order-capture price tracking

Usage:
  pricetrail <command>

Start here:
  pricetrail extract --help
  pricetrail extract <capture.har>
  pricetrail history output
";

const TOP_LEVEL_HELP: &str = "Pricetrail - order-capture price tracking

USAGE: pricetrail <command>

Extract order items from a browser capture:
  1. pricetrail extract --help                 Read the capture workflow
  2. pricetrail extract <capture.har>          Write item rows to output/

Build a ranked price history:
  pricetrail history output                    Aggregate extracted CSVs
  pricetrail history output --out prices.json  Pick the artifact path

Share a capture without the noise:
  pricetrail filter <raw.har> <slim.har>       Keep only order entries

Run `pricetrail <command> --help` for command usage.
";

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(code) => code,
    }
}

fn run() -> Result<ExitCode, ExitCode> {
    let raw_args = std::env::args().collect::<Vec<String>>();
    if raw_args.len() == 1 {
        if write_stdout_text(ROOT_HELP).is_err() {
            return Err(ExitCode::from(2));
        }
        return Ok(ExitCode::SUCCESS);
    }

    let parsed = cli::Cli::try_parse();
    let cli = match parsed {
        Ok(value) => value,
        Err(err) => {
            if matches!(
                err.kind(),
                ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                if is_top_level_help_request(&raw_args) {
                    if write_stdout_text(TOP_LEVEL_HELP).is_err() {
                        return Err(ExitCode::from(2));
                    }
                } else if write_stdout_text(&err.to_string()).is_err() {
                    return Err(ExitCode::from(2));
                }
                return Ok(ExitCode::SUCCESS);
            }

            let command_hint = if matches!(
                err.kind(),
                ErrorKind::MissingRequiredArgument
                    | ErrorKind::InvalidValue
                    | ErrorKind::ValueValidation
                    | ErrorKind::WrongNumberOfValues
                    | ErrorKind::UnknownArgument
                    | ErrorKind::InvalidSubcommand
            ) {
                command_path_from_args(&raw_args)
            } else {
                None
            };
            let clean_message = strip_clap_boilerplate(&err.to_string());
            let parse_error =
                CoreError::invalid_argument_for_command(&clean_message, command_hint.as_deref());
            let mode = infer_requested_output_mode(&raw_args);
            if output::print_failure(&parse_error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            return Err(ExitCode::from(1));
        }
    };
    let mode = output::mode_for_command(&cli.command);

    match dispatch::dispatch(&cli) {
        Ok(success) => {
            if output::print_success(&success, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            if output::print_failure(&error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Err(exit_code_for_error(&error))
        }
    }
}

fn is_top_level_help_request(raw_args: &[String]) -> bool {
    raw_args.len() == 2 && matches!(raw_args[1].as_str(), "--help" | "-h")
}

/// Strips clap's trailing boilerplate (Usage line, "For more information"
/// hint) so the recovery steps are the single source of guidance.
fn strip_clap_boilerplate(message: &str) -> String {
    let trimmed = if let Some(pos) = message.find("\n\nUsage:") {
        &message[..pos]
    } else if let Some(pos) = message.find("\nFor more information") {
        &message[..pos]
    } else {
        message
    };
    trimmed.trim_end().to_string()
}

fn command_path_from_args(raw_args: &[String]) -> Option<String> {
    let non_flags: Vec<&str> = raw_args
        .iter()
        .skip(1)
        .filter(|value| !value.starts_with('-'))
        .map(String::as_str)
        .collect();

    let hint = match non_flags.as_slice() {
        ["extract", ..] => Some("extract"),
        ["history", ..] => Some("history"),
        ["filter", ..] => Some("filter"),
        _ => None,
    };
    hint.map(std::string::ToString::to_string)
}

fn infer_requested_output_mode(raw_args: &[String]) -> output::OutputMode {
    if raw_args.iter().skip(1).any(|value| value == "--json") {
        return output::OutputMode::Json;
    }
    output::OutputMode::Text
}

fn exit_code_for_error(error: &CoreError) -> ExitCode {
    if is_internal_error(error) {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    }
}

fn is_internal_error(error: &CoreError) -> bool {
    error.code.starts_with("internal_")
        || matches!(
            error.code.as_str(),
            "output_write_failed" | "cache_write_failed"
        )
}

#[cfg(test)]
mod tests {
    use super::{command_path_from_args, is_top_level_help_request, strip_clap_boilerplate};

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn top_level_help_only_matches_bare_flags() {
        assert!(is_top_level_help_request(&args(&["pricetrail", "--help"])));
        assert!(is_top_level_help_request(&args(&["pricetrail", "-h"])));
        assert!(!is_top_level_help_request(&args(&[
            "pricetrail",
            "extract",
            "--help"
        ])));
    }

    #[test]
    fn boilerplate_is_stripped_from_clap_errors() {
        let message = "error: missing argument\n\nUsage: pricetrail extract <CAPTURE_PATH>";
        assert_eq!(strip_clap_boilerplate(message), "error: missing argument");
    }

    #[test]
    fn command_hints_come_from_the_first_word() {
        assert_eq!(
            command_path_from_args(&args(&["pricetrail", "extract"])),
            Some("extract".to_string())
        );
        assert_eq!(
            command_path_from_args(&args(&["pricetrail", "--json", "history"])),
            Some("history".to_string())
        );
        assert_eq!(command_path_from_args(&args(&["pricetrail"])), None);
    }
}
