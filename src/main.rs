//! # NYT Corpus
//!
//! A two-stage pipeline that retrieves the New York Times Archive API month
//! by month and distills the result into a cleaned per-date text corpus
//! suitable for downstream modeling (sentiment, topics, joins against market
//! data).
//!
//! ## Usage
//!
//! ```sh
//! export NYT_API_KEY=...
//! nyt_corpus fetch --from-year 2019 --from-month 1 --to-year 2019 --to-month 2
//! nyt_corpus preprocess -i datasets/nyt_archive_2019_1_2019_2.csv
//! ```
//!
//! ## Architecture
//!
//! 1. **Fetch**: one request per calendar month, parsed into the fixed
//!    `[date, headline, snippet, keywords]` table, consolidated in fetch
//!    order with optional 12-month checkpoints
//! 2. **Preprocess**: merge the text columns, run the cleaning and
//!    lemmatization chain, and collapse to one row per date

use chrono::Local;
use clap::Parser;
use std::error::Error;
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod archive;
mod cli;
mod error;
mod lemma;
mod models;
mod normalize;
mod table;
mod text;
mod utils;

use archive::MonthRange;
use cli::{Cli, Command, FetchArgs};
use models::ArchiveTable;
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("nyt_corpus starting up");

    let args = Cli::parse();
    debug!(?args.command, "Parsed CLI arguments");

    match args.command {
        Command::Fetch(fetch) => {
            fetch_and_store(&fetch).await?;
        }
        Command::Preprocess(preprocess) => {
            let archive = table::read_archive(&preprocess.input)?;
            info!(
                rows = archive.len(),
                path = %preprocess.input.display(),
                "Loaded archive table"
            );
            ensure_writable_dir(&preprocess.output_dir).await?;
            normalize::normalize(
                &archive,
                true,
                &preprocess.output_dir,
                preprocess.filename.as_deref(),
            )?;
        }
        Command::Run(run) => {
            let archive = fetch_and_store(&run.fetch).await?;
            normalize::normalize(
                &archive,
                true,
                &run.fetch.output_dir,
                run.filename.as_deref(),
            )?;
        }
        Command::Combine(combine) => {
            let range = MonthRange::new(
                combine.from_year,
                combine.from_month,
                combine.to_year,
                combine.to_month,
            );
            ensure_writable_dir(&combine.output_dir).await?;
            table::combine_archives(&combine.first, &combine.second, &combine.output_dir, range)?;
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}

/// Fetch the requested range and persist the consolidated table under its
/// range-encoded filename.
async fn fetch_and_store(args: &FetchArgs) -> Result<ArchiveTable, Box<dyn Error>> {
    let range = MonthRange::new(args.from_year, args.from_month, args.to_year, args.to_month);
    range.validate(Local::now().date_naive())?;
    ensure_writable_dir(&args.output_dir).await?;

    let archive = archive::load_from_archive(
        &args.api_key,
        range,
        args.store_intermediate,
        &args.output_dir,
    )
    .await?;

    let path = args.output_dir.join(table::archive_filename(range));
    table::write_archive(&archive, &path)?;
    info!(path = %path.display(), rows = archive.len(), "Wrote consolidated archive");

    Ok(archive)
}
