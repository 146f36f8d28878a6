use clap::{Parser, Subcommand};

/// Extended help shown after `pricetrail extract --help`.
pub const EXTRACT_AFTER_HELP: &str = "\
How extraction works:
  Pricetrail reads a HAR capture exported from your browser's network
  panel and pulls item rows out of the order-detail API responses.

  1. Open your orders page with the network panel recording.
  2. Open each order you want captured, then export the log as HAR.
  3. Run `pricetrail extract <capture.har>`.

  Each run writes one CSV named after the order-date range it saw,
  e.g. `2024-01-01_2024-03-05_walmart_order_items.csv`.

Item classification:
  Every item name is looked up in a local type cache and recorded as
  food, nonfood, or unknown. First-seen names are stored as unknown;
  edit the cache file to classify them for later runs.

What to do next:
  Run `pricetrail history <out-dir>` once you have two or more
  extracted CSVs to build a ranked price history.
";

#[derive(Debug, Parser)]
#[command(
    name = "pricetrail",
    version,
    about = "order-capture extraction and price-history tracking",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Extract order item records from a browser HAR capture into CSV
    #[command(after_help = EXTRACT_AFTER_HELP)]
    Extract {
        /// Path to the exported .har capture
        capture_path: String,
        /// Directory the item CSV is written into
        #[arg(long = "out-dir")]
        out_dir: Option<String>,
        /// Item-type cache file (default: $PRICETRAIL_HOME/food_or_non_food.json)
        #[arg(long)]
        cache: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Aggregate extracted item CSVs into a ranked price-history artifact
    History {
        /// Directory holding extracted item CSV files
        input_dir: String,
        /// Output artifact path (default: historical_prices.json)
        #[arg(long)]
        out: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Slim a HAR capture down to its order-detail entries
    Filter {
        /// Path to the raw .har capture
        input_path: String,
        /// Path for the filtered capture
        output_path: String,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

pub fn parse_from<I, T>(iter: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(iter)
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;

    use super::{Commands, parse_from};

    #[test]
    fn extract_parses_path_and_flags() {
        let parsed = parse_from([
            "pricetrail",
            "extract",
            "orders.har",
            "--out-dir",
            "rows",
            "--cache",
            "types.json",
            "--json",
        ]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert!(matches!(
                cli.command,
                Commands::Extract {
                    json: true,
                    ..
                }
            ));
            if let Commands::Extract {
                capture_path,
                out_dir,
                cache,
                ..
            } = cli.command
            {
                assert_eq!(capture_path, "orders.har");
                assert_eq!(out_dir.as_deref(), Some("rows"));
                assert_eq!(cache.as_deref(), Some("types.json"));
            }
        }
    }

    #[test]
    fn extract_requires_a_capture_path() {
        let parsed = parse_from(["pricetrail", "extract"]);
        assert!(parsed.is_err());
        if let Err(err) = parsed {
            assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        }
    }

    #[test]
    fn history_parses_dir_and_out() {
        let parsed = parse_from(["pricetrail", "history", "output", "--out", "prices.json"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            if let Commands::History {
                input_dir,
                out,
                json,
            } = cli.command
            {
                assert_eq!(input_dir, "output");
                assert_eq!(out.as_deref(), Some("prices.json"));
                assert!(!json);
            }
        }
    }

    #[test]
    fn filter_takes_two_positional_paths() {
        let parsed = parse_from(["pricetrail", "filter", "raw.har", "slim.har"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert!(matches!(cli.command, Commands::Filter { .. }));
        }

        let missing = parse_from(["pricetrail", "filter", "raw.har"]);
        assert!(missing.is_err());
    }

    #[test]
    fn unknown_command_is_rejected() {
        let parsed = parse_from(["pricetrail", "scrape"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn subcommand_help_uses_clap_display_help() {
        let parsed = parse_from(["pricetrail", "extract", "--help"]);
        assert!(parsed.is_err());
        if let Err(err) = parsed {
            assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        }
    }
}
