//! Structurizr Core Types and Definitions
//!
//! This crate provides the in-memory representation of a Structurizr
//! workspace. It includes:
//!
//! - **Identifiers**: String-interned identifiers shared by elements and
//!   relationships ([`identifier::Id`])
//! - **Model**: Elements, relationships, deployment topology and implied
//!   relationship derivation ([`model`] module)
//! - **Views**: Typed projections of model elements ([`view`] module)
//! - **Workspace**: The root aggregate tying model and views together
//!   ([`workspace::Workspace`])
//!
//! References between items are always expressed as [`identifier::Id`]s that
//! are resolved against the owning [`model::Model`]; no item holds a pointer
//! to another.

pub mod error;
pub mod identifier;
pub mod model;
pub mod view;
pub mod workspace;

pub use error::ModelError;
pub use identifier::Id;
pub use workspace::Workspace;
