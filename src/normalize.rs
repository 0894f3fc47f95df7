//! Text Normalizer: turns a consolidated archive table into the per-date
//! corpus.
//!
//! The steps run in a fixed order; later steps assume the earlier cleanup:
//!
//! 1. Drop every row with a missing cell
//! 2. Build one `all_text` per row from `[headline, snippet, keywords]`,
//!    substituting the placeholder for empty cells, joined by single spaces
//! 3. Run the cleaning chain from [`crate::text`] over each `all_text`
//! 4. Merge rows sharing a date by concatenating their cleaned text in row
//!    order, keeping one row per date (first appearance decides output
//!    position)
//!
//! The result guarantees at most one row per distinct date. A date whose
//! every contributor was nothing but placeholders ends up with an empty
//! `all_text`.

use crate::error::ArchiveError;
use crate::models::{ArchiveTable, COLUMNS, NormalizedRecord, PLACEHOLDER};
use crate::table;
use crate::text;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, instrument};

/// Normalize `archive` into the per-date corpus, optionally persisting it.
///
/// With `persist`, the result is written to `destination` under `filename`
/// (or [`table::DEFAULT_PREPROCESSED_FILENAME`] when none is given).
#[instrument(level = "info", skip_all, fields(rows = archive.len()))]
pub fn normalize(
    archive: &ArchiveTable,
    persist: bool,
    destination: &Path,
    filename: Option<&str>,
) -> Result<Vec<NormalizedRecord>, ArchiveError> {
    // Rows with a missing cell carry no usable text; combine the survivors'
    // text columns in column order, empty cells rendered as the placeholder.
    let mut combined: Vec<(String, String)> = Vec::new();
    for row in &archive.rows {
        let (Some(date), Some(headline), Some(snippet), Some(keywords)) =
            (&row.date, &row.headline, &row.snippet, &row.keywords)
        else {
            continue;
        };
        let all_text = [headline, snippet, keywords]
            .iter()
            .map(|cell| if cell.is_empty() { PLACEHOLDER } else { cell.as_str() })
            .collect::<Vec<_>>()
            .join(" ");
        combined.push((date.clone(), all_text));
    }
    info!(
        rows = combined.len(),
        cols = COLUMNS.len(),
        "Archive shape after dropping rows with missing values"
    );

    info!("Normalizing text");
    for (_, all_text) in combined.iter_mut() {
        *all_text = text::clean_text(all_text);
    }

    info!("Combining rows for the same date");
    let mut corpus: Vec<NormalizedRecord> = Vec::new();
    let mut by_date: HashMap<String, usize> = HashMap::new();
    for (date, all_text) in combined {
        match by_date.get(&date) {
            Some(&ix) => {
                corpus[ix].all_text.push(' ');
                corpus[ix].all_text.push_str(&all_text);
            }
            None => {
                by_date.insert(date.clone(), corpus.len());
                corpus.push(NormalizedRecord { date, all_text });
            }
        }
    }

    info!(rows = corpus.len(), cols = 2, "Preprocessed corpus shape");

    if persist {
        let filename = filename.unwrap_or(table::DEFAULT_PREPROCESSED_FILENAME);
        let path = destination.join(filename);
        table::write_normalized(&corpus, &path)?;
        info!(path = %path.display(), "Wrote preprocessed corpus");
    }

    Ok(corpus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ArchiveRecord;
    use std::fs;
    use std::path::PathBuf;

    fn row(date: &str, headline: &str, snippet: &str, keywords: &str) -> ArchiveRecord {
        ArchiveRecord {
            date: Some(date.to_string()),
            headline: Some(headline.to_string()),
            snippet: Some(snippet.to_string()),
            keywords: Some(keywords.to_string()),
        }
    }

    fn normalize_only(table: &ArchiveTable) -> Vec<NormalizedRecord> {
        normalize(table, false, Path::new("."), None).unwrap()
    }

    #[test]
    fn test_rows_with_missing_cells_are_dropped() {
        let mut incomplete = row("2019-01-01", "kept", "s", "k ");
        incomplete.headline = None;

        let table = ArchiveTable {
            rows: vec![incomplete, row("2019-01-02", "Market rally", "Stocks rose.", "Economy ")],
        };

        let corpus = normalize_only(&table);
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus[0].date, "2019-01-02");
    }

    #[test]
    fn test_all_text_is_cleaned_and_lowercased() {
        let table = ArchiveTable {
            rows: vec![row(
                "2019-01-02",
                "Hello World!",
                "A B test.",
                "tag1 tag2 ",
            )],
        };

        let corpus = normalize_only(&table);
        assert_eq!(corpus[0].all_text, "hello world test tag1 tag2");
    }

    #[test]
    fn test_rows_sharing_a_date_are_merged_in_row_order() {
        let table = ArchiveTable {
            rows: vec![
                row("2019-01-02", "alpha", "beta", ""),
                row("2019-01-02", "gamma", " ", ""),
            ],
        };

        let corpus = normalize_only(&table);
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus[0].date, "2019-01-02");
        assert_eq!(corpus[0].all_text, "alpha beta gamma");
    }

    #[test]
    fn test_output_preserves_first_appearance_order_of_dates() {
        let table = ArchiveTable {
            rows: vec![
                row("2019-01-02", "alpha", " ", ""),
                row("2019-01-01", "beta", " ", ""),
                row("2019-01-02", "gamma", " ", ""),
            ],
        };

        let corpus = normalize_only(&table);
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus[0].date, "2019-01-02");
        assert_eq!(corpus[0].all_text, "alpha gamma");
        assert_eq!(corpus[1].date, "2019-01-01");
        assert_eq!(corpus[1].all_text, "beta");
    }

    #[test]
    fn test_placeholder_only_rows_yield_empty_text() {
        let table = ArchiveTable {
            rows: vec![row(" ", " ", " ", "")],
        };

        let corpus = normalize_only(&table);
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus[0].date, " ");
        assert_eq!(corpus[0].all_text, "");
    }

    #[test]
    fn test_persisted_corpus_uses_default_filename() {
        let dir: PathBuf =
            std::env::temp_dir().join(format!("nyt_corpus_{}_normalize", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let table = ArchiveTable {
            rows: vec![row("2019-01-02", "Market rally", "Stocks rose.", "Economy ")],
        };
        normalize(&table, true, &dir, None).unwrap();

        let written = fs::read_to_string(dir.join(table::DEFAULT_PREPROCESSED_FILENAME)).unwrap();
        assert!(written.starts_with("date,all_text\n"));
        assert!(written.contains("2019-01-02"));

        fs::remove_dir_all(&dir).ok();
    }
}
