//! The core diagnostic type for the document error system.
//!
//! A [`Diagnostic`] represents a single error or warning with optional
//! error code, labeled document locations, and help text.

use std::fmt;

use crate::{
    error::{Severity, error_code::ErrorCode, label::Label},
    path::JsonPath,
};

/// A diagnostic message pointing into a Structurizr document.
///
/// # Example
///
/// ```text
/// error[E200]: missing required field `id` on person `Customer`
///   --> $.model.people[1]: this person has no `id`
///    = help: every element needs an ID that is unique within the model
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use structurizr_json::error::{Diagnostic, ErrorCode};
    /// # use structurizr_json::JsonPath;
    ///
    /// let diag = Diagnostic::error("unknown element `9`")
    ///     .with_code(ErrorCode::E300)
    ///     .with_label(JsonPath::root().key("views"), "referenced here")
    ///     .with_help("add the element to the model or remove the reference");
    /// assert_eq!(diag.to_string(), "error[E300]: unknown element `9`");
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// The one-line summary, without severity or code.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Labels in the order they were attached.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// The location of the first primary label, if any.
    pub fn primary_path(&self) -> Option<&JsonPath> {
        self.labels
            .iter()
            .find(|label| label.is_primary())
            .map(Label::path)
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Point at the offending value.
    pub fn with_label(mut self, path: JsonPath, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(path, message));
        self
    }

    /// Point at a related value, such as the first use of a duplicated ID.
    pub fn with_secondary_label(mut self, path: JsonPath, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(path, message));
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Render the diagnostic with every label and the help text.
    ///
    /// Primary labels are shown with `-->`, secondary labels with `:::`.
    ///
    /// ```
    /// # use structurizr_json::{Diagnostic, ErrorCode, JsonPath};
    /// let diag = Diagnostic::error("missing required field `id` on person `Customer`")
    ///     .with_code(ErrorCode::E200)
    ///     .with_label(JsonPath::root().key("model").key("people").index(1), "this person has no `id`")
    ///     .with_help("every element needs an ID that is unique within the model");
    ///
    /// assert_eq!(
    ///     diag.report(),
    ///     "error[E200]: missing required field `id` on person `Customer`\n  \
    ///      --> $.model.people[1]: this person has no `id`\n   \
    ///      = help: every element needs an ID that is unique within the model"
    /// );
    /// ```
    pub fn report(&self) -> String {
        let mut report = self.to_string();
        for label in &self.labels {
            let marker = if label.is_primary() { "-->" } else { ":::" };
            report.push_str(&format!("\n  {marker} {}", label.path()));
            if !label.message().is_empty() {
                report.push_str(&format!(": {}", label.message()));
            }
        }
        if let Some(help) = &self.help {
            report.push_str(&format!("\n   = help: {help}"));
        }
        report
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "error[E200]: message" or "error: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_new() {
        let diag = Diagnostic::new(Severity::Error, "test error");

        assert!(diag.severity().is_error());
        assert_eq!(diag.message(), "test error");
        assert!(diag.code().is_none());
        assert!(diag.labels().is_empty());
        assert!(diag.help().is_none());
        assert!(diag.primary_path().is_none());
    }

    #[test]
    fn test_diagnostic_labels() {
        let diag = Diagnostic::error("duplicate ID")
            .with_secondary_label(JsonPath::root().key("a"), "first used here")
            .with_label(JsonPath::root().key("b"), "used again here");

        assert_eq!(diag.labels().len(), 2);
        assert_eq!(diag.primary_path().map(ToString::to_string).as_deref(), Some("$.b"));
    }

    #[test]
    fn test_report_lists_labels_in_order() {
        let diag = Diagnostic::error("the ID `3` is used twice")
            .with_code(ErrorCode::E202)
            .with_secondary_label(JsonPath::root().key("first"), "first used here")
            .with_label(JsonPath::root().key("second"), "");

        assert_eq!(
            diag.report(),
            "error[E202]: the ID `3` is used twice\n  ::: $.first: first used here\n  --> $.second"
        );
    }

    #[test]
    fn test_report_without_labels_is_display() {
        let diag = Diagnostic::warning("empty tags");
        assert_eq!(diag.report(), diag.to_string());
    }

    #[test]
    fn test_diagnostic_display_with_code() {
        let diag = Diagnostic::error("missing required field `id`").with_code(ErrorCode::E200);
        assert_eq!(diag.to_string(), "error[E200]: missing required field `id`");
    }

    #[test]
    fn test_diagnostic_display_without_code() {
        let diag = Diagnostic::warning("unknown field `colour`");
        assert_eq!(diag.to_string(), "warning: unknown field `colour`");
    }
}
