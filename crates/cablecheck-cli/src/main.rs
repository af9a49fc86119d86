//! Cablecheck CLI: the `cablecheck` command.

mod cli;
mod commands;
mod support;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let config = support::load_config_or_exit(cli.config.as_deref());
    support::init_tracing(&config);
    let catalogue = support::catalogue_or_exit(&config);

    match cli.command {
        Commands::Tables { json } => commands::tables::run(&catalogue, json),

        Commands::Select {
            requirement,
            explain,
            json,
        } => commands::select::run(&catalogue, requirement, explain, json),

        Commands::Validate {
            family,
            size,
            claimed,
            device_rating,
            json,
        } => commands::validate::run(
            &catalogue,
            commands::validate::Args {
                family,
                size,
                claimed,
                device_rating,
                json,
            },
        ),

        Commands::ValidateBatch { input, json } => {
            commands::validate_batch::run(&catalogue, input, json)
        }

        Commands::MinSize {
            family,
            rating,
            json,
        } => commands::min_size::run(&catalogue, family, rating, json),

        Commands::Alternatives {
            family,
            size,
            length,
            budget,
            json,
        } => commands::alternatives::run(
            &catalogue,
            commands::alternatives::Args {
                family,
                size,
                length,
                budget,
                json,
            },
        ),
    }
}
