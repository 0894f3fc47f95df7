//! Error taxonomy for the fetch and normalize stages.
//!
//! Three failure classes with different propagation policies:
//! - [`ValidationError`]: a bad date range, raised before any I/O. Fatal to
//!   the whole operation.
//! - [`ArchiveError::MalformedDocument`]: a response document missing a
//!   structural field the parser cannot safely default. Fatal to that fetch
//!   call.
//! - Non-success HTTP statuses are not represented here at all: the fetch
//!   loop recovers locally by logging and skipping the month. Only
//!   transport-level failures surface as [`ArchiveError::Request`].

use thiserror::Error;

/// A date-range precondition violation, one variant per constraint.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("from_year {from_year} is after to_year {to_year}")]
    FromYearAfterToYear { from_year: i32, to_year: i32 },

    #[error("from_month {from_month} is after to_month {to_month} within {year}")]
    FromMonthAfterToMonth {
        from_month: u32,
        to_month: u32,
        year: i32,
    },

    #[error("the archive only goes back to 1851 (got from_year {from_year})")]
    BeforeArchiveStart { from_year: i32 },

    #[error("cannot read articles from the future ({year} is after {current_year})")]
    YearInFuture { year: i32, current_year: i32 },

    #[error(
        "cannot read articles from the future ({current_year}-{to_month} is after the current month {current_month})"
    )]
    MonthInFuture {
        to_month: u32,
        current_year: i32,
        current_month: u32,
    },
}

/// Any failure of the archive pipeline surfaced to the caller.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("archive document is missing the {field} field")]
    MalformedDocument { field: &'static str },

    #[error("CSV is missing the {name} column")]
    MissingColumn { name: &'static str },

    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}
