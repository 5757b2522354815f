use thiserror::Error;

#[derive(Debug, Error)]
pub enum PropertyReturnsError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Could not parse '{input}': {reason}")]
    ParseError { input: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl PropertyReturnsError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        PropertyReturnsError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for PropertyReturnsError {
    fn from(e: serde_json::Error) -> Self {
        PropertyReturnsError::SerializationError(e.to_string())
    }
}
