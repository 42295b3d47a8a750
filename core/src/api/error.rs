//! Public error types for the trigger API.
//!
//! Parser and evaluator errors are converted to these types at the API
//! boundary.

use std::fmt;

use crate::evaluator::EvalError;
use crate::parser::{ParseError, Span};

/// Public error type for all trigger operations.
#[derive(Debug)]
pub enum Error {
    /// The trigger text is malformed.
    ///
    /// Contains one or more diagnostics with source locations, and the
    /// source they point into.
    Parse {
        diagnostics: Vec<Diagnostic>,
        source: String,
    },

    /// Evaluation failed (unsupported operands, invalid assignment).
    Runtime(String),

    /// Resource limits exceeded (evaluation depth).
    ResourceExceeded(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Parse { diagnostics, .. } => {
                let error_count = diagnostics
                    .iter()
                    .filter(|d| d.severity == Severity::Error)
                    .count();
                write!(f, "Parsing failed with {} error(s)", error_count)
            }
            Error::Runtime(msg) => write!(f, "Runtime error: {}", msg),
            Error::ResourceExceeded(msg) => write!(f, "Resource limit exceeded: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// A diagnostic message with source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Severity level (error, warning, info).
    pub severity: Severity,

    /// Primary diagnostic message.
    pub message: String,

    /// Source location of the primary issue.
    pub span: Span,

    /// Optional help text suggesting how to fix the issue.
    pub help: Option<String>,

    /// Optional error code (e.g., "P001").
    pub code: Option<String>,
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

// ============================================================================
// Conversion from internal errors
// ============================================================================

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::Parse {
            diagnostics: vec![err.to_diagnostic()],
            source: err.source,
        }
    }
}

impl From<EvalError> for Error {
    fn from(err: EvalError) -> Self {
        if err.is_resource_exceeded() {
            Error::ResourceExceeded(err.to_string())
        } else {
            Error::Runtime(err.to_string())
        }
    }
}
