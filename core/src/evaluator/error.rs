//! Runtime evaluation errors.
//!
//! Most trigger mistakes are not errors: unknown names, missing redirect
//! targets and division by zero all degrade to a value (false or bottom)
//! with a warning. What remains here are operations with no sensible value
//! and resource limits.

use core::fmt;

/// Runtime evaluation error.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Evaluation recursion depth exceeded.
    StackOverflow { depth: usize, max_depth: usize },

    /// An operator applied to operands it has no meaning for, such as `%`
    /// on floats.
    UnsupportedOperands {
        op: &'static str,
        left: String,
        right: String,
    },

    /// `:=` with something other than a variable slot on its left.
    InvalidAssignment { target: String },
}

impl EvalError {
    /// Whether the error is a resource limit rather than a faulty
    /// expression.
    pub fn is_resource_exceeded(&self) -> bool {
        matches!(self, EvalError::StackOverflow { .. })
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::StackOverflow { depth, max_depth } => write!(
                f,
                "Evaluation stack overflow: depth {} exceeds maximum of {}",
                depth, max_depth
            ),
            EvalError::UnsupportedOperands { op, left, right } => write!(
                f,
                "Operator '{}' does not apply to '{}' and '{}'",
                op, left, right
            ),
            EvalError::InvalidAssignment { target } => {
                write!(f, "Cannot assign to '{}'", target)
            }
        }
    }
}

impl std::error::Error for EvalError {}
