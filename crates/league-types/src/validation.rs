use std::fmt;

/// Field-level validation errors raised by draft checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Required,
    Other(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Required => write!(f, "This field is required"),
            ValidationError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

/// Check a text field is present once surrounding whitespace is removed.
pub fn require(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required)
    } else {
        Ok(())
    }
}
