use core::fmt;

use crate::api::{Diagnostic, Severity};
use crate::parser::Span;

/// Parser error with the offending source.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub source: String,
    pub span: Span,
}

/// Specific kinds of parse errors
#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    /// A bracket without its partner
    UnbalancedBrackets { bracket: char },
    /// A `"` with no closing quote
    UnterminatedString,
    /// An operator with nothing on one side
    MissingOperand { operator: String },
    /// Digits and dots that do not form a number
    InvalidNumber { text: String },
    /// Maximum nesting depth exceeded
    MaxDepthExceeded { depth: usize, max_depth: usize },
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, source: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            source: source.into(),
            span,
        }
    }

    /// Convert to a Diagnostic for API boundary
    pub fn to_diagnostic(&self) -> Diagnostic {
        let (message, code, help) = match &self.kind {
            ParseErrorKind::UnbalancedBrackets { bracket } => (
                format!("Unbalanced bracket '{}'", bracket),
                "P001",
                Some("Add the missing bracket or remove the extra one".to_string()),
            ),
            ParseErrorKind::UnterminatedString => (
                "Unterminated string literal".to_string(),
                "P002",
                Some("Add the closing '\"'".to_string()),
            ),
            ParseErrorKind::MissingOperand { operator } => (
                format!("Operator '{}' is missing an operand", operator),
                "P003",
                None,
            ),
            ParseErrorKind::InvalidNumber { text } => (
                format!("Invalid number literal '{}'", text),
                "P004",
                Some("A number may contain at most one '.'".to_string()),
            ),
            ParseErrorKind::MaxDepthExceeded { max_depth, .. } => (
                format!(
                    "Expression nesting depth exceeds maximum of {} levels",
                    max_depth
                ),
                "P005",
                Some("Reduce nesting or simplify the expression".to_string()),
            ),
        };

        Diagnostic {
            severity: Severity::Error,
            message,
            span: self.span.clone(),
            help,
            code: Some(code.to_string()),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let diagnostic = self.to_diagnostic();
        write!(f, "{}: {}", diagnostic.severity, diagnostic.message)?;

        if let Some(ref code) = diagnostic.code {
            write!(f, " [{}]", code)?;
        }

        if let Some(ref help) = diagnostic.help {
            write!(f, "\nhelp: {}", help)?;
        }

        Ok(())
    }
}

impl std::error::Error for ParseError {}
