use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ItofError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Correlation signal of channel {channel} is identically zero")]
    NumericDegeneracy { channel: usize },

    #[error("Shape mismatch in {context}: expected {expected} samples, got {actual}")]
    ShapeMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },
}

pub type Result<T> = std::result::Result<T, ItofError>;
