//! Adapter for the legacy WSO2 packaging convention.
//!
//! Legacy projects arrive either as a tree already extracted into the
//! workspace or as an export archive sitting at the root. Both entry
//! points produce the same canonical
//! [`ProjectMetadata`](crate::metadata::ProjectMetadata) the rest of the
//! pipeline works with.

pub mod archive;
pub mod directory;
mod scan;

pub use archive::{from_archive, from_archive_in};
pub use directory::from_directory;

/// Descriptor file expected directly inside each legacy API directory.
pub const LEGACY_API_DESCRIPTOR: &str = "api.yaml";

/// Fixed-name subdirectory holding an API's definition documents.
pub const LEGACY_DEFINITIONS_DIR: &str = "Definitions";

/// Primary definition document inside the definitions directory.
pub const LEGACY_DEFINITION_FILE: &str = "swagger.yaml";
