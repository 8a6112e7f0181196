//! Labeled document locations for diagnostic messages.

use crate::path::JsonPath;

/// A message attached to a location in the document.
///
/// # Primary vs Secondary Labels
///
/// - **Primary labels** mark the value that is wrong.
/// - **Secondary labels** provide context, such as "first used here".
///
/// # Example
///
/// ```text
/// error[E202]: the ID `1` is used more than once
///   --> $.model.softwareSystems[0].id: duplicate ID
///   --> $.model.people[0].id: first used here
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    path: JsonPath,
    message: String,
    is_primary: bool,
}

impl Label {
    /// Create a new primary label.
    pub fn primary(path: JsonPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
            is_primary: true,
        }
    }

    /// Create a new secondary label.
    pub fn secondary(path: JsonPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
            is_primary: false,
        }
    }

    /// Get the location this label applies to.
    pub fn path(&self) -> &JsonPath {
        &self.path
    }

    /// Get the label message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Check if this is a primary label.
    pub fn is_primary(&self) -> bool {
        self.is_primary
    }

    /// Check if this is a secondary label.
    pub fn is_secondary(&self) -> bool {
        !self.is_primary
    }
}
