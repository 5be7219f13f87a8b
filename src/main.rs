//! TV Guide CLI
//!
//! Search and describe programme guide data from a guide snapshot.

use clap::Parser;
use tvguide::cli::{
    args::{Cli, Commands},
    commands::{filters, schedule, search, show},
};

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    let guide_file = cli.guide.as_deref();

    // Run the appropriate command
    match cli.command {
        Commands::Search {
            queries,
            field,
            include_hidden,
            format,
        } => {
            search::execute_search(guide_file, &queries, field.into(), include_hidden, &format)?;
        }

        Commands::Show {
            channel,
            start,
            long,
            facets,
        } => {
            show::show_programme(guide_file, &channel, start, long, &facets)?;
        }

        Commands::Schedule { channel, from } => {
            schedule::print_schedule(guide_file, &channel, from)?;
        }

        Commands::Filters { credits } => {
            filters::list_filters(guide_file, credits)?;
        }
    }

    Ok(())
}

/// Initialize the logging system.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("tvguide=debug")
    } else {
        EnvFilter::new("tvguide=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}
