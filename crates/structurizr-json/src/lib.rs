//! # Structurizr JSON
//!
//! Reader and writer for the Structurizr workspace JSON document format.
//!
//! ## Usage
//!
//! ```
//! # use structurizr_json::{read_workspace, write_workspace, DocumentError};
//!
//! fn main() -> Result<(), DocumentError> {
//!     let text = r#"{
//!         "id": 1,
//!         "name": "Shop",
//!         "model": {
//!             "people": [{
//!                 "id": "1",
//!                 "name": "Customer",
//!                 "relationships": [{"id": "3", "destinationId": "2", "description": "Buys from"}]
//!             }],
//!             "softwareSystems": [{"id": "2", "name": "Shop"}]
//!         }
//!     }"#;
//!
//!     let workspace = read_workspace(text)?;
//!     assert_eq!(workspace.model().relationships().count(), 1);
//!
//!     let written = write_workspace(&workspace).expect("workspace serialises");
//!     assert_eq!(read_workspace(&written)?, workspace);
//!     Ok(())
//! }
//! ```

pub mod error;
mod path;
mod reader;
mod writer;

pub use error::{Diagnostic, DocumentError, ErrorCode};
pub use path::JsonPath;
pub use reader::read_workspace;
pub use writer::{write_workspace, write_workspace_pretty};
