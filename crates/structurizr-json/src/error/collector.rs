//! Collector for accumulating diagnostics while reading a document.

use crate::error::{Diagnostic, DocumentError};

/// Accumulates every problem found in a document instead of stopping at the
/// first one.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Returns `true` if an error has been emitted.
    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// Finish collection.
    ///
    /// Returns `Err(DocumentError)` with all diagnostics if any of them is an
    /// error. Warnings alone are returned in the `Ok` case.
    pub fn finish(self) -> Result<Vec<Diagnostic>, DocumentError> {
        if self.has_errors {
            Err(DocumentError::new(self.diagnostics))
        } else {
            Ok(self.diagnostics)
        }
    }
}
