pub mod archive;
pub mod cancel;
pub mod error;
pub mod layout;
pub mod legacy;
pub mod metadata;
pub mod pipeline;
pub mod probe;
pub mod report;
pub mod submit;

pub use cancel::Cancellation;
pub use error::CertifyError;
pub use pipeline::{certify, Certification, CertifyRequest};

pub const TOOL_NAME: &str = "apiscore";

/// Canonical metadata document expected at the root of a scoring-ready project.
pub const METADATA_FILE_NAME: &str = "metadata.yml";

/// Directory that WSO2 API Manager exports are unpacked into when a legacy
/// project has already been extracted in place.
pub const LEGACY_EXTRACTION_DIR: &str = "wso2_extracted";

/// Companion metadata file shipped next to extracted legacy projects.
pub const LEGACY_COMPANION_FILE: &str = "__metadata.yml";
