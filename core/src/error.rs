use thiserror::Error;

/// Result type for adrenal assessment operations
pub type Result<T> = std::result::Result<T, AdrenalError>;

/// Error types for adrenal assessment operations
#[derive(Error, Debug)]
pub enum AdrenalError {
    /// Lesion size or imaging modality was not provided
    #[error("Missing input: {0}")]
    MissingRequiredInput(String),

    /// A required field was left empty
    #[error("Missing value for {field}")]
    MissingValue { field: &'static str },

    /// A field could not be parsed as a number
    #[error("Invalid numeric value for {field}: '{value}'")]
    InvalidNumericInput { field: &'static str, value: String },

    /// Washout denominator was zero
    #[error("Division by zero in {0} washout calculation")]
    DivisionByZero(String),

    /// Unrecognized categorical value
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

// Helper conversions
impl From<String> for AdrenalError {
    fn from(s: String) -> Self {
        AdrenalError::InvalidValue(s)
    }
}
