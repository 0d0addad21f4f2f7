//! Errors raised while validating a calculation request

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalculatorError {
    #[error("invalid {argument}: {reason}")]
    InvalidArgument {
        argument: &'static str,
        reason: String,
    },
}

impl CalculatorError {
    pub fn invalid(argument: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument,
            reason: reason.into(),
        }
    }

    /// Name of the request field that failed validation
    pub fn argument(&self) -> &'static str {
        match self {
            Self::InvalidArgument { argument, .. } => argument,
        }
    }
}
