use crate::models::{Month, Series};
use thiserror::Error;

/// Errors raised when input data cannot be turned into a diagram.
///
/// The geometry itself never fails; everything here is about malformed input
/// reaching the data store.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClimographError {
    #[error("expected {expected} monthly values, found {found}")]
    SeriesLength { expected: usize, found: usize },

    #[error("{series} value for {month} is not a finite number")]
    NonFiniteValue { series: Series, month: Month },

    #[error("unknown month: {0:?}")]
    UnknownMonth(String),

    #[error("invalid elevation: {0:?}")]
    InvalidElevation(String),
}
