//! CSV persistence for archive tables and the normalized corpus.
//!
//! Files are plain CSV with a header row. Writing never emits an index
//! column; reading resolves columns by header name, so a pandas-style
//! leading unnamed index column in older files is discarded without fuss.
//! Cells are read verbatim (no trimming) because the single-space
//! placeholder is a meaningful value; an empty cell reads back as a missing
//! (`None`) cell.

use crate::archive::MonthRange;
use crate::error::ArchiveError;
use crate::models::{ArchiveRecord, ArchiveTable, COLUMNS, NormalizedRecord};
use itertools::Itertools;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Default filename for the normalizer's persisted output.
pub const DEFAULT_PREPROCESSED_FILENAME: &str = "preprocessed_nyt_data.csv";

/// `nyt_archive_<fromY>_<fromM>_<toY>_<toM>.csv`
pub fn archive_filename(range: MonthRange) -> String {
    format!(
        "nyt_archive_{}_{}_{}_{}.csv",
        range.from_year, range.from_month, range.to_year, range.to_month
    )
}

/// `intermediate_nyt_archive_<fromY>_<fromM>_<toY>_<toM>.csv`, named for the
/// sub-range a checkpoint actually covers.
pub fn intermediate_filename(from_year: i32, from_month: u32, to_year: i32, to_month: u32) -> String {
    format!("intermediate_nyt_archive_{from_year}_{from_month}_{to_year}_{to_month}.csv")
}

/// Write an archive table as CSV with the fixed four-column header.
///
/// The header is written explicitly so an empty table still produces a
/// readable file.
#[instrument(level = "debug", skip(table), fields(path = %path.display()))]
pub fn write_archive(table: &ArchiveTable, path: &Path) -> Result<(), ArchiveError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(COLUMNS)?;
    for row in &table.rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read an archive table from CSV.
///
/// Columns are located by header name; anything else in the file (including
/// a leading unnamed index column) is ignored. Empty cells become `None`.
#[instrument(level = "debug", fields(path = %path.display()))]
pub fn read_archive(path: &Path) -> Result<ArchiveTable, ArchiveError> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);

    let headers = reader.headers()?.clone();
    let date_ix = column_index(&headers, "date")?;
    let headline_ix = column_index(&headers, "headline")?;
    let snippet_ix = column_index(&headers, "snippet")?;
    let keywords_ix = column_index(&headers, "keywords")?;

    let mut table = ArchiveTable::new();
    for result in reader.records() {
        let record = result?;
        table.rows.push(ArchiveRecord {
            date: cell(&record, date_ix),
            headline: cell(&record, headline_ix),
            snippet: cell(&record, snippet_ix),
            keywords: cell(&record, keywords_ix),
        });
    }
    Ok(table)
}

/// Write the normalized per-date corpus as CSV.
pub fn write_normalized(rows: &[NormalizedRecord], path: &Path) -> Result<(), ArchiveError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(["date", "all_text"])?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Combine two persisted archives into one file covering `range`.
///
/// Rows are concatenated in argument order and duplicate rows dropped, first
/// occurrence winning. Returns the path of the combined file.
#[instrument(level = "info", skip_all, fields(first = %first.display(), second = %second.display()))]
pub fn combine_archives(
    first: &Path,
    second: &Path,
    destination: &Path,
    range: MonthRange,
) -> Result<PathBuf, ArchiveError> {
    let a = read_archive(first)?;
    let b = read_archive(second)?;

    let rows: Vec<ArchiveRecord> = a.rows.into_iter().chain(b.rows).unique().collect();
    let combined = ArchiveTable { rows };

    let path = destination.join(archive_filename(range));
    write_archive(&combined, &path)?;
    info!(path = %path.display(), rows = combined.len(), "Wrote combined archive");
    Ok(path)
}

fn column_index(headers: &csv::StringRecord, name: &'static str) -> Result<usize, ArchiveError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or(ArchiveError::MissingColumn { name })
}

fn cell(record: &csv::StringRecord, ix: usize) -> Option<String> {
    match record.get(ix) {
        None | Some("") => None,
        Some(value) => Some(value.to_string()),
    }
}
