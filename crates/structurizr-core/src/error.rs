//! Error types for model and view operations.
//!
//! This module provides [`ModelError`], returned whenever a mutation of a
//! [`Model`](crate::model::Model) or [`ViewSet`](crate::view::ViewSet) would
//! leave the workspace inconsistent, or when an ID reference cannot be
//! resolved.

use thiserror::Error;

use crate::identifier::Id;

/// The error type for model and view operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A referenced element or relationship does not exist in the model.
    #[error("no element or relationship with ID `{id}` exists in the model")]
    NotFound { id: Id },

    /// An element or relationship was inserted with an ID already in use.
    #[error("the ID `{id}` is already used by another element or relationship")]
    DuplicateId { id: Id },

    /// A sibling element with the same name already exists.
    #[error("a {kind} named `{name}` already exists")]
    DuplicateName { kind: &'static str, name: String },

    /// A model item was constructed with a missing or invalid field.
    #[error("invalid {kind}: field `{field}` {message}")]
    Validation {
        kind: &'static str,
        field: &'static str,
        message: String,
    },

    /// A parent or target reference points at an element of the wrong kind.
    #[error("{kind} `{id}` cannot reference element `{target}`: expected a {expected}")]
    InvalidReference {
        kind: &'static str,
        id: Id,
        target: Id,
        expected: &'static str,
    },

    /// The element cannot be shown in the given view.
    #[error("element `{id}` cannot be added to view `{view}`")]
    ElementNotAllowed { view: String, id: Id },

    /// A view with the same key already exists in the view set.
    #[error("a view with the key `{key}` already exists")]
    DuplicateViewKey { key: String },

    /// A filtered view names a base view that does not exist.
    #[error("no view with the key `{key}` exists")]
    UnknownView { key: String },

    /// A dynamic view interaction has no matching relationship in the model.
    #[error("no relationship between `{source_id}` and `{destination_id}` exists in the model")]
    NoRelationship { source_id: Id, destination_id: Id },
}

impl ModelError {
    /// Create a new `Validation` error.
    pub fn validation(kind: &'static str, field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            kind,
            field,
            message: message.into(),
        }
    }

    /// Returns `true` if this error reports an unresolved reference.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        let err = ModelError::validation("person", "name", "must not be blank");
        assert_eq!(err.to_string(), "invalid person: field `name` must not be blank");
    }

    #[test]
    fn test_no_relationship_display() {
        let err = ModelError::NoRelationship {
            source_id: Id::new("1"),
            destination_id: Id::new("2"),
        };
        assert_eq!(
            err.to_string(),
            "no relationship between `1` and `2` exists in the model"
        );
    }

    #[test]
    fn test_not_found_display() {
        let err = ModelError::NotFound { id: Id::new("99") };
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "no element or relationship with ID `99` exists in the model"
        );
    }
}
