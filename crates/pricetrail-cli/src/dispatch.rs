use pricetrail_core::commands;
use pricetrail_core::{CoreResult, SuccessEnvelope};

use crate::cli::{Cli, Commands};

pub fn dispatch(cli: &Cli) -> CoreResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Extract {
            capture_path,
            out_dir,
            cache,
            json: _,
        } => commands::extract::run(capture_path, out_dir.clone(), cache.clone()),
        Commands::History {
            input_dir,
            out,
            json: _,
        } => commands::history::run(input_dir, out.clone()),
        Commands::Filter {
            input_path,
            output_path,
            json: _,
        } => commands::filter::run(input_path, output_path),
    }
}
