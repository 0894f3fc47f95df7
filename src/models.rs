//! Data models for the archive table and its normalized form.
//!
//! This module defines the core data structures used throughout the pipeline:
//! - [`ArchiveRecord`]: one news item with the four fixed columns
//! - [`ArchiveTable`]: the consolidated, insertion-ordered table of records
//! - [`NormalizedRecord`]: one row of the final per-date corpus
//! - Wire types ([`ArchiveResponse`] and friends) matching the NYT Archive
//!   API JSON shape
//!
//! Missing cells are modeled as `None`. Wherever a value is rendered for a
//! consumer (CSV cells, merged text), an absent field that the parser chose
//! to default shows up as the exact single-space [`PLACEHOLDER`] so that
//! downstream readers of the files see the same bytes the original corpus
//! carried.

use serde::{Deserialize, Serialize};

/// The substitute written for an absent `pub_date`, `headline.main`, or
/// `snippet` field. Downstream consumers expect this exact value.
pub const PLACEHOLDER: &str = " ";

/// The fixed column set of an [`ArchiveTable`], in column order.
pub const COLUMNS: [&str; 4] = ["date", "headline", "snippet", "keywords"];

/// One news item extracted from an archive response document.
///
/// Each field holds `Some` cell text or `None` for a missing cell. The
/// parser never produces `None` itself (absent fields become [`PLACEHOLDER`]
/// or, for `keywords`, an empty string); `None` only appears when a persisted
/// table with empty cells is read back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArchiveRecord {
    /// Publication date as `YYYY-MM-DD`, or the placeholder when absent.
    pub date: Option<String>,
    /// The headline's main text.
    pub headline: Option<String>,
    /// The article snippet.
    pub snippet: Option<String>,
    /// All keyword values concatenated, each followed by a single space.
    /// Empty string when the document's keyword list is empty.
    pub keywords: Option<String>,
}

/// The consolidated archive table: an insertion-ordered sequence of records
/// with the fixed [`COLUMNS`] column set.
///
/// Built incrementally month by month by the fetcher, optionally snapshotted
/// every 12 elapsed months, and finally persisted in full. Rows are not
/// deduplicated across fetches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArchiveTable {
    /// Rows in fetch order.
    pub rows: Vec<ArchiveRecord>,
}

impl ArchiveTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a month's worth of records, preserving their order.
    pub fn append(&mut self, rows: Vec<ArchiveRecord>) {
        self.rows.extend(rows);
    }

    /// `(rows, columns)`, for shape diagnostics.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), COLUMNS.len())
    }
}

/// One row of the final output: all cleaned text for a single date.
///
/// The normalizer guarantees at most one `NormalizedRecord` per distinct
/// `date` value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    /// The date key, verbatim from the archive table (may be the placeholder).
    pub date: String,
    /// Cleaned, lemmatized, whitespace-joined text of every row that shared
    /// this date.
    pub all_text: String,
}

/// Top-level NYT Archive API response document.
#[derive(Debug, Deserialize)]
pub struct ArchiveResponse {
    pub response: ArchiveResponseBody,
}

/// The `response` object wrapping the month's documents.
#[derive(Debug, Deserialize)]
pub struct ArchiveResponseBody {
    pub docs: Vec<ArchiveDoc>,
}

/// One document of a month's archive listing.
///
/// Every field the parser consumes is optional at the wire level; the
/// parsing rules in [`crate::archive`] decide which absences are defaulted
/// and which are structural errors.
#[derive(Debug, Deserialize)]
pub struct ArchiveDoc {
    pub pub_date: Option<String>,
    pub headline: Option<Headline>,
    pub snippet: Option<String>,
    pub keywords: Option<Vec<Keyword>>,
}

/// The nested headline object; only `main` is consumed.
#[derive(Debug, Deserialize)]
pub struct Headline {
    pub main: Option<String>,
}

/// One keyword entry; only `value` is consumed.
#[derive(Debug, Deserialize)]
pub struct Keyword {
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, headline: &str) -> ArchiveRecord {
        ArchiveRecord {
            date: Some(date.to_string()),
            headline: Some(headline.to_string()),
            snippet: Some(PLACEHOLDER.to_string()),
            keywords: Some(String::new()),
        }
    }

    #[test]
    fn test_table_append_preserves_order() {
        let mut table = ArchiveTable::new();
        table.append(vec![record("2019-01-01", "first")]);
        table.append(vec![record("2019-02-01", "second"), record("2019-02-02", "third")]);

        assert_eq!(table.len(), 3);
        assert_eq!(table.rows[0].headline.as_deref(), Some("first"));
        assert_eq!(table.rows[2].headline.as_deref(), Some("third"));
    }

    #[test]
    fn test_table_shape() {
        let mut table = ArchiveTable::new();
        assert_eq!(table.shape(), (0, 4));
        table.append(vec![record("2019-01-01", "a")]);
        assert_eq!(table.shape(), (1, 4));
    }

    #[test]
    fn test_archive_doc_deserialization() {
        let json = r#"{
            "pub_date": "2019-01-15T10:30:00+0000",
            "headline": {"main": "A headline", "kicker": "ignored"},
            "snippet": "A snippet",
            "keywords": [{"value": "Economy", "rank": 1}]
        }"#;

        let doc: ArchiveDoc = serde_json::from_str(json).unwrap();
        assert_eq!(doc.pub_date.as_deref(), Some("2019-01-15T10:30:00+0000"));
        assert_eq!(doc.headline.unwrap().main.as_deref(), Some("A headline"));
        assert_eq!(doc.keywords.unwrap()[0].value, "Economy");
    }

    #[test]
    fn test_archive_doc_missing_fields_deserialize_to_none() {
        let doc: ArchiveDoc = serde_json::from_str("{}").unwrap();
        assert!(doc.pub_date.is_none());
        assert!(doc.headline.is_none());
        assert!(doc.snippet.is_none());
        assert!(doc.keywords.is_none());
    }

    #[test]
    fn test_normalized_record_serialization() {
        let row = NormalizedRecord {
            date: "2019-01-15".to_string(),
            all_text: "economy market".to_string(),
        };

        let json = serde_json::to_string(&row).unwrap();
        let back: NormalizedRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, row);
    }
}
