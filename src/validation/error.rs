use std::fmt;
use std::io;

use crate::processing::parser::ParseError;
use crate::utils::config::ConfigError;

/// Fatal errors that abort a batch run.
///
/// Numeric degeneracy inside a single solve is not an error; it is reported
/// through [`crate::core::SolveStatus`] and NaN coordinates instead.
#[derive(Debug)]
pub enum TrilatError {
    /// Opening, reading or writing a file failed
    Io { path: Option<String>, source: io::Error },
    /// The tabular reader or writer failed
    Csv { source: csv::Error },
    /// A row could not be turned into a sample record
    Parse { line: u64, source: ParseError },
    /// Configuration could not be loaded or is invalid
    Config { source: ConfigError },
}

impl TrilatError {
    pub fn io(path: impl Into<String>, source: io::Error) -> Self {
        TrilatError::Io { path: Some(path.into()), source }
    }
}

impl fmt::Display for TrilatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrilatError::Io { path: Some(path), source } => write!(f, "I/O error on '{}': {}", path, source),
            TrilatError::Io { path: None, source } => write!(f, "I/O error: {}", source),
            TrilatError::Csv { source } => write!(f, "Tabular data error: {}", source),
            TrilatError::Parse { line, source } => write!(f, "Malformed input on line {}: {}", line, source),
            TrilatError::Config { source } => write!(f, "Configuration error: {}", source),
        }
    }
}

impl std::error::Error for TrilatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TrilatError::Io { source, .. } => Some(source),
            TrilatError::Csv { source } => Some(source),
            TrilatError::Parse { source, .. } => Some(source),
            TrilatError::Config { source } => Some(source),
        }
    }
}

impl From<io::Error> for TrilatError {
    fn from(source: io::Error) -> Self {
        TrilatError::Io { path: None, source }
    }
}

impl From<csv::Error> for TrilatError {
    fn from(source: csv::Error) -> Self {
        TrilatError::Csv { source }
    }
}

impl From<ConfigError> for TrilatError {
    fn from(source: ConfigError) -> Self {
        TrilatError::Config { source }
    }
}

pub type TrilatResult<T> = Result<T, TrilatError>;
