//! Structurizr - software architecture models as code.
//!
//! Reads and writes Structurizr workspace documents, and keeps a local
//! workspace in sync with a Structurizr service through a pluggable
//! [`Transport`].
//!
//! # Examples
//!
//! ```
//! use structurizr::{Workspace, dumps, loads};
//!
//! let mut workspace = Workspace::new(1, "Shop", "An online shop");
//! let model = workspace.model_mut();
//! let customer = model.add_person("Customer", "").unwrap();
//! let shop = model.add_software_system("Shop", "").unwrap();
//! model.uses(customer, shop, "Buys from").unwrap();
//!
//! let text = dumps(&workspace).unwrap();
//! assert_eq!(loads(&text).unwrap(), workspace);
//! ```

pub mod config;

mod archive;
mod client;
mod error;

pub use structurizr_core::{Id, ModelError, Workspace, identifier, model, view};
pub use structurizr_json::{Diagnostic, DocumentError, ErrorCode, JsonPath};

pub use client::{Transport, TransportError, WorkspaceClient, WorkspaceLock};
pub use config::{ArchiveLocation, ClientConfig};
pub use error::StructurizrError;

use std::{fs, path::Path};

use log::{debug, info};

/// Parses a workspace from its JSON document.
///
/// # Errors
///
/// Returns [`StructurizrError::Document`] with every problem found in the
/// document.
pub fn loads(text: &str) -> Result<Workspace, StructurizrError> {
    Ok(structurizr_json::read_workspace(text)?)
}

/// Serialises a workspace to compact JSON.
pub fn dumps(workspace: &Workspace) -> Result<String, StructurizrError> {
    Ok(structurizr_json::write_workspace(workspace)?)
}

/// Serialises a workspace to indented JSON.
pub fn dumps_pretty(workspace: &Workspace) -> Result<String, StructurizrError> {
    Ok(structurizr_json::write_workspace_pretty(workspace)?)
}

/// Reads a workspace from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid document.
pub fn load(path: impl AsRef<Path>) -> Result<Workspace, StructurizrError> {
    let path = path.as_ref();
    info!(path = path.display().to_string(); "Loading workspace");
    let text = fs::read_to_string(path)?;
    loads(&text)
}

/// Writes a workspace to a file as indented JSON, replacing any existing
/// content.
pub fn dump(workspace: &Workspace, path: impl AsRef<Path>) -> Result<(), StructurizrError> {
    let path = path.as_ref();
    let text = dumps_pretty(workspace)?;
    fs::write(path, &text)?;
    debug!(path = path.display().to_string(), bytes = text.len(); "Workspace written");
    Ok(())
}
