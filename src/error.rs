//! Crate-level error type.

use crate::validation::ValidationError;

/// Errors returned by the fallible simulation entry points.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimulationError {
    /// Input failed boundary validation.
    #[error("invalid simulation input: {}", join_messages(.0))]
    InvalidInput(Vec<ValidationError>),
    /// Records were handed to the engine in a state it cannot start from.
    #[error("engine precondition violated: {0}")]
    PreconditionViolated(String),
}

impl SimulationError {
    /// The validation errors, if this is an input error.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::InvalidInput(errors) => errors,
            Self::PreconditionViolated(_) => &[],
        }
    }
}

impl From<Vec<ValidationError>> for SimulationError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::InvalidInput(errors)
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
