//! Error codes for the Structurizr document diagnostics.
//!
//! Error codes are organized by phase:
//! - `E0xx` - JSON syntax errors
//! - `E1xx` - Document shape errors
//! - `E2xx` - Field validation errors
//! - `E3xx` - Reference resolution errors

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Syntax Errors (E0xx)
    // =========================================================================
    /// Invalid JSON.
    ///
    /// The text is not well-formed JSON.
    E001,

    // =========================================================================
    // Shape Errors (E1xx)
    // =========================================================================
    /// Unexpected JSON type.
    ///
    /// A value has the wrong JSON type, e.g. a number where a string is
    /// expected or an array where an object is expected.
    E100,

    /// Unrecognised value.
    ///
    /// A string field holds a value outside its fixed set, such as an
    /// unknown paper size or interaction style.
    E101,

    // =========================================================================
    // Validation Errors (E2xx)
    // =========================================================================
    /// Missing required field.
    E200,

    /// Invalid field value.
    ///
    /// A field is present but its value is not acceptable, such as a blank
    /// element name.
    E201,

    /// Duplicate ID.
    ///
    /// Two elements or relationships share an ID.
    E202,

    /// Duplicate view key.
    E203,

    // =========================================================================
    // Reference Errors (E3xx)
    // =========================================================================
    /// Unresolved reference.
    ///
    /// An ID refers to an element or relationship that is not in the model.
    E300,

    /// Reference to the wrong kind of element.
    ///
    /// The referenced element exists but has a different type than required,
    /// e.g. a container instance whose `containerId` names a person.
    E301,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "invalid JSON",
            ErrorCode::E100 => "unexpected JSON type",
            ErrorCode::E101 => "unrecognised value",
            ErrorCode::E200 => "missing required field",
            ErrorCode::E201 => "invalid field value",
            ErrorCode::E202 => "duplicate ID",
            ErrorCode::E203 => "duplicate view key",
            ErrorCode::E300 => "unresolved reference",
            ErrorCode::E301 => "reference to wrong element type",
        }
    }

    /// Returns `true` for reference resolution errors.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ErrorCode::E300)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
