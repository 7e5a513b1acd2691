//! Error types for caldate.

use thiserror::Error;

/// Errors that can occur in caldate operations.
#[derive(Error, Debug)]
pub enum CalDateError {
    #[error("failed to parse {value:?} with layout {layout:?}: {reason}")]
    Parse {
        value: String,
        layout: String,
        reason: String,
    },

    #[error("The start date TimeZone and the end date TimeZone did not match")]
    DifferentTimeZone,

    #[error("Only one side cannot be zero")]
    OnlyOneSideIsZero,

    #[error("The end date is before the start date")]
    EndBeforeStart,

    #[error("The end month is before the start month")]
    EndMonthBeforeStartMonth,

    #[error("This range and the target range don't overlap")]
    RangesDontOverlap,

    #[error("The collection is empty")]
    EmptyCollection,

    #[error("NullDate is null")]
    NullValue,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CalDateError {
    pub(crate) fn parse(value: &str, layout: &str, reason: impl ToString) -> Self {
        let err = CalDateError::Parse {
            value: value.to_string(),
            layout: layout.to_string(),
            reason: reason.to_string(),
        };
        tracing::trace!(%err, "parse failure");
        err
    }

    /// True for the three ways a `DateRange` construction can be rejected.
    pub fn is_invalid_range(&self) -> bool {
        matches!(
            self,
            CalDateError::DifferentTimeZone
                | CalDateError::OnlyOneSideIsZero
                | CalDateError::EndBeforeStart
        )
    }
}

/// Result type alias for caldate operations.
pub type CalDateResult<T> = Result<T, CalDateError>;
