use thiserror::Error;

/// Unified error type for the klima workspace.
///
/// The time-series transformations themselves are total over any input and do
/// not produce errors; this type covers the fallible edges of the crate:
/// serialization, formatting, and argument validation in the export pipeline.
#[derive(Debug, Error)]
pub enum KlimaError {
    /// Issues with the data itself (inconsistent series, missing fields, etc.).
    #[error("data issue: {0}")]
    Data(String),

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// Failure while producing CSV or JSON output.
    #[error("format error: {0}")]
    Format(String),
}

impl KlimaError {
    /// Helper: build a `Data` error from any displayable message.
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    /// Helper: build an `InvalidArg` error from any displayable message.
    pub fn invalid_arg(msg: impl Into<String>) -> Self {
        Self::InvalidArg(msg.into())
    }
}

impl From<csv::Error> for KlimaError {
    fn from(e: csv::Error) -> Self {
        Self::Format(e.to_string())
    }
}

impl From<serde_json::Error> for KlimaError {
    fn from(e: serde_json::Error) -> Self {
        Self::Format(e.to_string())
    }
}

impl From<std::string::FromUtf8Error> for KlimaError {
    fn from(e: std::string::FromUtf8Error) -> Self {
        Self::Format(e.to_string())
    }
}
