use std::fmt::{self, Display};
use std::io;

use chrono::NaiveDate;

/// Provides `DatagenError` and maps other errors to
/// convert to a `DatagenError`
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub enum DatagenError {
    IoError(io::Error),
    JsonError(serde_json::Error),
    CsvError(csv::Error),
    /// An invalid generator configuration, detected before any generation
    /// work starts. The message names the offending parameter.
    ConfigError(String),
    /// A table state the consistency pass cannot repair. This indicates a
    /// defect in an upstream model, not a runtime condition to recover from.
    InvariantViolation {
        table: &'static str,
        key: String,
        date: NaiveDate,
        message: String,
    },
}

impl From<io::Error> for DatagenError {
    fn from(error: io::Error) -> Self {
        DatagenError::IoError(error)
    }
}

impl From<serde_json::Error> for DatagenError {
    fn from(error: serde_json::Error) -> Self {
        DatagenError::JsonError(error)
    }
}

impl From<csv::Error> for DatagenError {
    fn from(error: csv::Error) -> Self {
        DatagenError::CsvError(error)
    }
}

impl From<String> for DatagenError {
    fn from(error: String) -> Self {
        DatagenError::ConfigError(error)
    }
}

impl From<&str> for DatagenError {
    fn from(error: &str) -> Self {
        DatagenError::ConfigError(error.to_string())
    }
}

impl std::error::Error for DatagenError {}

impl Display for DatagenError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DatagenError::IoError(e) => write!(f, "IO error: {e}"),
            DatagenError::JsonError(e) => write!(f, "JSON error: {e}"),
            DatagenError::CsvError(e) => write!(f, "CSV error: {e}"),
            DatagenError::ConfigError(msg) => write!(f, "configuration error: {msg}"),
            DatagenError::InvariantViolation {
                table,
                key,
                date,
                message,
            } => write!(f, "invariant violation in {table} ({key}, {date}): {message}"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn config_error_from_str() {
        let e: DatagenError = "end_date precedes start_date".into();
        assert!(matches!(e, DatagenError::ConfigError(_)));
        assert_eq!(
            e.to_string(),
            "configuration error: end_date precedes start_date"
        );
    }

    #[test]
    fn invariant_violation_names_key_and_date() {
        let e = DatagenError::InvariantViolation {
            table: "covid_cases",
            key: "India".to_string(),
            date: NaiveDate::from_ymd_opt(2020, 3, 1).unwrap(),
            message: "negative daily_cases".to_string(),
        };
        let msg = e.to_string();
        assert!(msg.contains("covid_cases"));
        assert!(msg.contains("India"));
        assert!(msg.contains("2020-03-01"));
    }
}
