use thiserror::Error;

/// Why a single line could not be parsed as `frame;frame;... <count>`.
///
/// These are recoverable: the line is logged and skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    #[error("the line does not end in a sample count")]
    MissingWeight,

    #[error("the sample count is not separated from the stack by whitespace")]
    WeightNotSeparated,

    #[error("the sample count {0} is too large")]
    WeightOverflow(String),

    #[error("the sample count {0} would exceed the sample limit")]
    WeightTooLarge(u64),

    #[error("the line has no stack before the sample count")]
    EmptyStack,

    #[error("frame {} of the stack is empty", .0 + 1)]
    EmptyFrame(usize),
}

/// A fatal conversion error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The assembled tables are not structurally sound. This indicates a bug
    /// in the interning code, and no profile is emitted.
    #[error("Inconsistent {table} table at row {row}: {reason}")]
    InvariantViolation {
        table: &'static str,
        row: usize,
        reason: String,
    },
}
