use crate::FieldKind;
use thiserror::Error;

/// Crate specific Errors implementation.
///
/// Every error is raised while a [`Schedule`](crate::Schedule) is constructed,
/// queries on a constructed schedule never fail.
#[derive(Debug, Error, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CronError {
    /// Expression doesn't consist of exactly five whitespace-separated fields.
    #[error("malformed cron expression, five fields expected: {0}")]
    MalformedExpression(String),
    /// Field text doesn't follow the field grammar or contains a value outside of the field's domain.
    #[error("invalid {kind} field: {value}")]
    InvalidField {
        /// Field which failed to parse.
        kind: FieldKind,
        /// Text of the failed field.
        value: String,
    },
    /// Expression is well-formed but can never match.
    #[error("cron expression never matches: {0}")]
    UnsatisfiableExpression(String),
}
