//! Command-line interface for the Folio recommendation engine.
//!
//! Every subcommand reads a SQLite catalogue and prints its result as
//! pretty-printed JSON. Options layer from CLI flags, `FOLIO_CMDS_*`
//! environment variables, and configuration files.
#![forbid(unsafe_code)]

use std::io::Write;

use clap::{Parser, Subcommand};
use serde::Serialize;

mod catalog;
mod error;
mod favourite;
mod init;
mod logging;
mod output;
mod rank;
mod recommend;
mod suggest;

pub use error::CliError;
pub use logging::{DEFAULT_LOG_LEVEL, ENV_LOG_LEVEL};

use favourite::{FavouriteCommand, run_favourite};
use init::{InitArgs, run_init};
use rank::{RankArgs, run_rank};
use recommend::{RecommendArgs, run_recommend};
use suggest::{SuggestArgs, run_suggest};

const ARG_CATALOG_DB: &str = "catalog-db";
const ARG_DATA_DIR: &str = "data-dir";
const ARG_OUTPUT: &str = "output";
const ARG_LIMIT: &str = "limit";
const ARG_VOTE_PERCENTILE: &str = "vote-percentile";
const ARG_BOOK_ID: &str = "book-id";
const ARG_USER_ID: &str = "user-id";

/// Run the Folio CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when argument parsing, configuration merging, the
/// catalogue, or the recommendation engine fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let directive = logging::log_directive(
        cli.log_level.as_deref(),
        std::env::var(ENV_LOG_LEVEL).ok(),
    );
    logging::init_logging(&directive)?;
    let mut stdout = std::io::stdout().lock();
    run_command(cli.command, &mut stdout)
}

fn run_command(command: Command, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Rank(args) => run_rank(args, writer),
        Command::Recommend(args) => run_recommend(args, writer),
        Command::Suggest(args) => run_suggest(args, writer),
        Command::Favourite { action } => run_favourite(action, writer),
        Command::Init(args) => {
            let catalog_db = run_init(args)?;
            output::write_json(writer, None, &Created { catalog_db })
        }
    }
}

#[derive(Debug, Serialize)]
struct Created {
    catalog_db: camino::Utf8PathBuf,
}

#[derive(Debug, Parser)]
#[command(
    name = "folio",
    about = "Book recommendations from a SQLite catalogue",
    version
)]
struct Cli {
    /// Log filter directive, e.g. `debug` or `folio_scorer=trace`.
    #[arg(long, global = true, value_name = "filter")]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank the catalogue by weighted rating.
    Rank(RankArgs),
    /// Recommend books for a book's detail page.
    Recommend(RecommendArgs),
    /// Suggest books similar to a reader's favourites.
    Suggest(SuggestArgs),
    /// Change a reader's favourite books.
    Favourite {
        #[command(subcommand)]
        action: FavouriteCommand,
    },
    /// Create an empty catalogue.
    Init(InitArgs),
}

#[cfg(test)]
mod tests;
