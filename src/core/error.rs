use thiserror::Error;

/// Error type definitions
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error")]
    Io(#[source] std::io::Error),

    #[error("CSV error")]
    Csv(#[source] csv::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    /// An operation is not defined for the dtypes involved
    #[error("Type error: {0}")]
    Type(String),

    #[error("Duplicate label: {0}")]
    DuplicateLabel(String),

    #[error("Length mismatch: expected {expected}, actual {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// A selection that must contain values selected none
    #[error("Empty selection: {0}")]
    EmptySelection(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Duplicate column name: {0}")]
    DuplicateColumnName(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl Error {
    /// Whether this error reports an undefined operation between dtypes
    pub fn is_type_error(&self) -> bool {
        matches!(self, Error::Type(_))
    }
}
