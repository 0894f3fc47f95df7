//! NYT Archive API fetcher.
//!
//! Walks an inclusive month range in chronological order, issues one request
//! per month, and accumulates the parsed rows into a single
//! [`ArchiveTable`]. A month whose request comes back with a non-success
//! status is logged and skipped; the rest of the range still runs. When
//! checkpointing is enabled, the accumulator-so-far is written out after
//! every 12 elapsed months (elapsed, not successfully fetched).
//!
//! # Request Pattern
//!
//! One GET per month at
//! `https://api.nytimes.com/svc/archive/v1/{year}/{month}.json?api-key=…`,
//! awaited before the next month starts. The loop is deliberately
//! sequential: requests are serialized and checkpoint writes happen inline.

use crate::error::{ArchiveError, ValidationError};
use crate::models::{ArchiveDoc, ArchiveRecord, ArchiveResponse, ArchiveTable, PLACEHOLDER};
use crate::table;
use chrono::{DateTime, Datelike, Local, NaiveDate};
use std::path::Path;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Base endpoint of the archive API.
pub const API_URL: &str = "https://api.nytimes.com/svc/archive/v1/";

/// The archive has no data before this year.
pub const EARLIEST_ARCHIVE_YEAR: i32 = 1851;

/// An inclusive range of archive months, `(from_year, from_month)` through
/// `(to_year, to_month)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    pub from_year: i32,
    pub from_month: u32,
    pub to_year: i32,
    pub to_month: u32,
}

impl MonthRange {
    pub fn new(from_year: i32, from_month: u32, to_year: i32, to_month: u32) -> Self {
        Self {
            from_year,
            from_month,
            to_year,
            to_month,
        }
    }

    /// Inclusive count of calendar months the range spans.
    pub fn len(&self) -> usize {
        let months = (self.to_year - self.from_year) * 12 + self.to_month as i32 + 1
            - self.from_month as i32;
        months.max(0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check every range precondition against `today`.
    ///
    /// Violations are reported before any request is issued; the first one
    /// found wins.
    pub fn validate(&self, today: NaiveDate) -> Result<(), ValidationError> {
        if self.from_year > self.to_year {
            return Err(ValidationError::FromYearAfterToYear {
                from_year: self.from_year,
                to_year: self.to_year,
            });
        }
        if self.from_year == self.to_year && self.from_month > self.to_month {
            return Err(ValidationError::FromMonthAfterToMonth {
                from_month: self.from_month,
                to_month: self.to_month,
                year: self.from_year,
            });
        }
        if self.from_year < EARLIEST_ARCHIVE_YEAR {
            return Err(ValidationError::BeforeArchiveStart {
                from_year: self.from_year,
            });
        }
        let current_year = today.year();
        let current_month = today.month();
        if self.from_year > current_year || self.to_year > current_year {
            return Err(ValidationError::YearInFuture {
                year: self.to_year.max(self.from_year),
                current_year,
            });
        }
        if self.to_year == current_year && self.to_month > current_month {
            return Err(ValidationError::MonthInFuture {
                to_month: self.to_month,
                current_year,
                current_month,
            });
        }
        Ok(())
    }

    /// Iterate the range's `(year, month)` keys in chronological order.
    pub fn months(&self) -> Months {
        Months {
            year: self.from_year,
            month: self.from_month,
            remaining: self.len(),
        }
    }
}

/// Iterator over the month keys of a [`MonthRange`], December rolling into
/// January of the next year.
#[derive(Debug, Clone)]
pub struct Months {
    year: i32,
    month: u32,
    remaining: usize,
}

impl Iterator for Months {
    type Item = (i32, u32);

    fn next(&mut self) -> Option<(i32, u32)> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let current = (self.year, self.month);
        if self.month == 12 {
            self.month = 1;
            self.year += 1;
        } else {
            self.month += 1;
        }
        Some(current)
    }
}

/// Fetch the archive for `range` into one consolidated table.
///
/// Validates the range against the current local date before any request.
/// Each month is fetched and parsed in order; failed months are skipped with
/// a warning. With `store_intermediate`, a snapshot of the accumulator is
/// written into `intermediate_dir` after every 12 elapsed months.
///
/// # Errors
///
/// Range violations, transport failures, and malformed response documents
/// abort the fetch. A non-success HTTP status does not: that month simply
/// contributes no rows.
#[instrument(level = "info", skip_all, fields(range = ?range))]
pub async fn load_from_archive(
    api_key: &str,
    range: MonthRange,
    store_intermediate: bool,
    intermediate_dir: &Path,
) -> Result<ArchiveTable, ArchiveError> {
    range.validate(Local::now().date_naive())?;

    let requested = range.len();
    let mut table = ArchiveTable::new();
    let mut fetched = 0usize;
    let mut elapsed = 0usize;

    for (year, month) in range.months() {
        info!(year, month, "Fetching archive month");
        if let Some(rows) = fetch_month(api_key, year, month).await? {
            info!(year, month, rows = rows.len(), "Fetched archive month");
            table.append(rows);
            fetched += 1;
        }
        elapsed += 1;

        if store_intermediate && elapsed % 12 == 0 {
            let filename =
                table::intermediate_filename(range.from_year, range.from_month, year, month);
            let path = intermediate_dir.join(filename);
            table::write_archive(&table, &path)?;
            info!(path = %path.display(), rows = table.len(), "Wrote intermediate archive");
        }
    }

    let (rows, cols) = table.shape();
    info!(requested, fetched, rows, cols, "Archive fetch complete");
    Ok(table)
}

/// Fetch and parse a single archive month.
///
/// Returns `Ok(None)` on a non-success status, which the caller treats as
/// "no data for this month".
#[instrument(level = "debug", skip(api_key))]
async fn fetch_month(
    api_key: &str,
    year: i32,
    month: u32,
) -> Result<Option<Vec<ArchiveRecord>>, ArchiveError> {
    let url = month_url(api_key, year, month)?;
    let resp = reqwest::get(url).await?;
    let status = resp.status();
    if !status.is_success() {
        warn!(
            year,
            month,
            status = status.as_u16(),
            "Archive request failed; skipping month"
        );
        return Ok(None);
    }

    let body = resp.text().await?;
    let parsed: ArchiveResponse = serde_json::from_str(&body)?;
    let rows = parse_docs(&parsed)?;
    debug!(year, month, docs = rows.len(), "Parsed archive response");
    Ok(Some(rows))
}

fn month_url(api_key: &str, year: i32, month: u32) -> Result<Url, ArchiveError> {
    let mut url = Url::parse(API_URL)?.join(&format!("{year}/{month}.json"))?;
    url.query_pairs_mut().append_pair("api-key", api_key);
    Ok(url)
}

/// Convert a month's response documents into archive records, in document
/// order.
pub fn parse_docs(response: &ArchiveResponse) -> Result<Vec<ArchiveRecord>, ArchiveError> {
    response.response.docs.iter().map(parse_doc).collect()
}

/// Extract the four columns from one document.
///
/// `pub_date`, `headline.main`, and `snippet` default to the placeholder
/// when absent. The `keywords` field must exist (an empty list is fine and
/// yields an empty string); its absence is a structural error.
fn parse_doc(doc: &ArchiveDoc) -> Result<ArchiveRecord, ArchiveError> {
    let date = match &doc.pub_date {
        Some(raw) => parse_pub_date(raw)?.to_string(),
        None => PLACEHOLDER.to_string(),
    };
    let headline = doc
        .headline
        .as_ref()
        .and_then(|h| h.main.clone())
        .unwrap_or_else(|| PLACEHOLDER.to_string());
    let snippet = doc
        .snippet
        .clone()
        .unwrap_or_else(|| PLACEHOLDER.to_string());
    let keywords = match &doc.keywords {
        Some(entries) => {
            let mut joined = String::new();
            for keyword in entries {
                joined.push_str(&keyword.value);
                joined.push(' ');
            }
            joined
        }
        None => return Err(ArchiveError::MalformedDocument { field: "keywords" }),
    };

    Ok(ArchiveRecord {
        date: Some(date),
        headline: Some(headline),
        snippet: Some(snippet),
        keywords: Some(keywords),
    })
}

/// Parse a `pub_date` value down to its calendar date.
///
/// The archive serves `2019-01-15T10:30:00+0000`; RFC 3339 and a bare
/// leading date are accepted too.
fn parse_pub_date(raw: &str) -> Result<NaiveDate, ArchiveError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z") {
        return Ok(dt.date_naive());
    }
    if let Some(prefix) = raw.get(..10) {
        if let Ok(date) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
            return Ok(date);
        }
    }
    Err(ArchiveError::MalformedDocument { field: "pub_date" })
}
