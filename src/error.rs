use chrono::NaiveDate;
use thiserror::Error;

/// Coarse grouping of [`Error`] variants, used for logging only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Fetch,
    Parse,
    Format,
    Stale,
    Storage,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Can't download {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Can't download {url}: status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Table not found (class \"{0}\")")]
    TableNotFound(String),

    #[error("No headers found in table")]
    NoHeaders,

    #[error("Expected columns not found ({date}, {currency})")]
    MissingColumns { date: String, currency: String },

    #[error("Incomplete data row: {found} cells, need {needed}")]
    IncompleteRow { found: usize, needed: usize },

    #[error("Invalid date {0:?}")]
    InvalidDate(String),

    #[error("Invalid value {text:?}: {source}")]
    InvalidValue {
        text: String,
        #[source]
        source: rust_decimal::Error,
    },

    #[error("Negative value {0}")]
    NegativeValue(String),

    #[error("Rate for {date} is out of range (today is {today}, max age {max_age_days} days)")]
    Stale {
        date: NaiveDate,
        today: NaiveDate,
        max_age_days: u32,
    },

    #[error("Can't encode CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Can't upload {key} to bucket {bucket}: {source}")]
    Storage {
        bucket: String,
        key: String,
        #[source]
        source: object_store::Error,
    },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Request { .. } | Error::Status { .. } => ErrorKind::Fetch,
            Error::TableNotFound(_)
            | Error::NoHeaders
            | Error::MissingColumns { .. }
            | Error::IncompleteRow { .. } => ErrorKind::Parse,
            Error::InvalidDate(_) | Error::InvalidValue { .. } | Error::NegativeValue(_) => {
                ErrorKind::Format
            }
            Error::Stale { .. } => ErrorKind::Stale,
            Error::Csv(_) | Error::Storage { .. } => ErrorKind::Storage,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
