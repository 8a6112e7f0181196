//! Error types for Structurizr operations.
//!
//! This module provides the main error type [`StructurizrError`] which wraps
//! the errors of the document codec, the model, configuration loading and the
//! synchronisation client.

use std::io;

use thiserror::Error;

use structurizr_core::ModelError;
use structurizr_json::DocumentError;

use crate::{client::TransportError, config::ConfigError};

/// The main error type for Structurizr operations.
///
/// # Diagnostic Variants
///
/// The `Document` variant carries every [`structurizr_json::Diagnostic`]
/// found while reading a document, each labelled with the JSON path of the
/// offending value.
#[derive(Debug, Error)]
pub enum StructurizrError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Document(#[from] DocumentError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Workspace ID mismatch: the client is configured for workspace {expected}, got {found}")]
    WorkspaceMismatch { expected: i64, found: i64 },
}

impl StructurizrError {
    /// Returns `true` if the error was caused by a reference to an element,
    /// relationship or workspace that does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Document(err) => err.is_not_found(),
            Self::Model(err) => err.is_not_found(),
            Self::Transport(TransportError::NotFound(_)) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use structurizr_core::Id;
    use structurizr_json::{Diagnostic, ErrorCode};

    use super::*;

    #[test]
    fn test_not_found_classification() {
        let document: StructurizrError =
            DocumentError::from(Diagnostic::error("dangling").with_code(ErrorCode::E300)).into();
        assert!(document.is_not_found());

        let model: StructurizrError = ModelError::NotFound { id: Id::new("7") }.into();
        assert!(model.is_not_found());

        let transport: StructurizrError = TransportError::NotFound(3).into();
        assert!(transport.is_not_found());

        let io: StructurizrError = io::Error::other("disk full").into();
        assert!(!io.is_not_found());
    }

    #[test]
    fn test_workspace_mismatch_display() {
        let err = StructurizrError::WorkspaceMismatch {
            expected: 1,
            found: 2,
        };
        assert_eq!(
            err.to_string(),
            "Workspace ID mismatch: the client is configured for workspace 1, got 2"
        );
    }
}
