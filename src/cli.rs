//! Command-line interface definitions for the archive corpus pipeline.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! The API key can be provided via a flag or the `NYT_API_KEY` environment
//! variable.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments for the archive corpus pipeline.
///
/// # Examples
///
/// ```sh
/// # Fetch two months of 2019 and write nyt_archive_2019_1_2019_2.csv
/// nyt_corpus fetch --from-year 2019 --from-month 1 --to-year 2019 --to-month 2
///
/// # Normalize a previously fetched archive
/// nyt_corpus preprocess -i datasets/nyt_archive_2019_1_2019_2.csv
///
/// # Fetch and normalize in one go, checkpointing every 12 months
/// nyt_corpus run --from-year 2015 --from-month 1 --to-year 2019 --to-month 12 \
///     --store-intermediate
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch the archive for an inclusive month range and persist it as CSV
    Fetch(FetchArgs),
    /// Normalize a previously fetched archive into the per-date corpus
    Preprocess(PreprocessArgs),
    /// Fetch a range and normalize it in one invocation
    Run(RunArgs),
    /// Combine two archive CSVs into one, dropping duplicate rows
    Combine(CombineArgs),
}

#[derive(Args, Debug)]
pub struct FetchArgs {
    /// First year of the range, inclusive
    #[arg(long)]
    pub from_year: i32,

    /// First month of the range, inclusive
    #[arg(long)]
    pub from_month: u32,

    /// Last year of the range, inclusive
    #[arg(long)]
    pub to_year: i32,

    /// Last month of the range, inclusive
    #[arg(long)]
    pub to_month: u32,

    /// Write an intermediate snapshot of the table every 12 months
    #[arg(long)]
    pub store_intermediate: bool,

    /// Directory for the consolidated CSV and any intermediate snapshots
    #[arg(short, long, default_value = "datasets")]
    pub output_dir: PathBuf,

    /// NYT API key
    #[arg(long, env = "NYT_API_KEY")]
    pub api_key: String,
}

#[derive(Args, Debug)]
pub struct PreprocessArgs {
    /// Archive CSV to normalize
    #[arg(short, long)]
    pub input: PathBuf,

    /// Directory for the normalized corpus
    #[arg(short, long, default_value = "datasets")]
    pub output_dir: PathBuf,

    /// Output filename (defaults to preprocessed_nyt_data.csv)
    #[arg(long)]
    pub filename: Option<String>,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub fetch: FetchArgs,

    /// Output filename for the normalized corpus
    #[arg(long)]
    pub filename: Option<String>,
}

#[derive(Args, Debug)]
pub struct CombineArgs {
    /// First archive CSV
    pub first: PathBuf,

    /// Second archive CSV
    pub second: PathBuf,

    /// First year covered by the combined file
    #[arg(long)]
    pub from_year: i32,

    /// First month covered by the combined file
    #[arg(long)]
    pub from_month: u32,

    /// Last year covered by the combined file
    #[arg(long)]
    pub to_year: i32,

    /// Last month covered by the combined file
    #[arg(long)]
    pub to_month: u32,

    /// Directory for the combined CSV
    #[arg(short, long, default_value = "datasets")]
    pub output_dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_parsing() {
        let cli = Cli::parse_from([
            "nyt_corpus",
            "fetch",
            "--from-year",
            "2019",
            "--from-month",
            "1",
            "--to-year",
            "2019",
            "--to-month",
            "2",
            "--api-key",
            "k",
        ]);

        let Command::Fetch(args) = cli.command else {
            panic!("expected fetch");
        };
        assert_eq!(args.from_year, 2019);
        assert_eq!(args.to_month, 2);
        assert!(!args.store_intermediate);
        assert_eq!(args.output_dir, PathBuf::from("datasets"));
    }

    #[test]
    fn test_preprocess_short_flags() {
        let cli = Cli::parse_from([
            "nyt_corpus",
            "preprocess",
            "-i",
            "datasets/nyt_archive_2019_1_2019_2.csv",
            "-o",
            "/tmp/out",
        ]);

        let Command::Preprocess(args) = cli.command else {
            panic!("expected preprocess");
        };
        assert_eq!(
            args.input,
            PathBuf::from("datasets/nyt_archive_2019_1_2019_2.csv")
        );
        assert_eq!(args.output_dir, PathBuf::from("/tmp/out"));
        assert!(args.filename.is_none());
    }

    #[test]
    fn test_combine_positional_inputs() {
        let cli = Cli::parse_from([
            "nyt_corpus",
            "combine",
            "a.csv",
            "b.csv",
            "--from-year",
            "2018",
            "--from-month",
            "11",
            "--to-year",
            "2019",
            "--to-month",
            "2",
        ]);

        let Command::Combine(args) = cli.command else {
            panic!("expected combine");
        };
        assert_eq!(args.first, PathBuf::from("a.csv"));
        assert_eq!(args.second, PathBuf::from("b.csv"));
        assert_eq!(args.to_year, 2019);
    }
}
