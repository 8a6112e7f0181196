//! The error returned when a document cannot be loaded.

use std::fmt;

use crate::error::{Diagnostic, ErrorCode};

/// Error type for reading a Structurizr document.
///
/// Wraps every diagnostic found in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentError {
    diagnostics: Vec<Diagnostic>,
}

impl DocumentError {
    /// Create a new document error from diagnostics.
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// Get all diagnostics in this error.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Returns `true` if any diagnostic carries the given code.
    pub fn has_code(&self, code: ErrorCode) -> bool {
        self.diagnostics
            .iter()
            .any(|diagnostic| diagnostic.code() == Some(code))
    }

    /// Returns `true` if the document failed because of an unresolved
    /// reference.
    pub fn is_not_found(&self) -> bool {
        self.has_code(ErrorCode::E300)
    }

    /// Render every diagnostic with its labels, separated by blank lines.
    pub fn report(&self) -> String {
        self.diagnostics
            .iter()
            .map(Diagnostic::report)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(first) = self.diagnostics.first() {
            write!(f, "{}", first)?;
            if self.diagnostics.len() > 1 {
                write!(f, " (+{} more)", self.diagnostics.len() - 1)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for DocumentError {}

impl From<Diagnostic> for DocumentError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
        }
    }
}

impl From<Vec<Diagnostic>> for DocumentError {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_error_from_diagnostic() {
        let diag = Diagnostic::error("test error").with_code(ErrorCode::E300);
        let err: DocumentError = diag.into();

        assert_eq!(err.diagnostics().len(), 1);
        assert!(err.is_not_found());
    }

    #[test]
    fn test_document_error_display_single() {
        let err: DocumentError = Diagnostic::error("missing field").into();
        assert_eq!(err.to_string(), "error: missing field");
    }

    #[test]
    fn test_document_error_display_multiple() {
        let diags = vec![
            Diagnostic::error("first error"),
            Diagnostic::error("second error"),
            Diagnostic::error("third error"),
        ];
        let err: DocumentError = diags.into();

        assert_eq!(err.to_string(), "error: first error (+2 more)");
        assert!(!err.has_code(ErrorCode::E001));
    }

    #[test]
    fn test_document_error_report() {
        let err: DocumentError = vec![
            Diagnostic::error("first error").with_help("fix it"),
            Diagnostic::error("second error"),
        ]
        .into();

        assert_eq!(
            err.report(),
            "error: first error\n   = help: fix it\n\nerror: second error"
        );
    }
}
