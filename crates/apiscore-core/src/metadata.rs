pub mod model;
pub mod normalize;

pub use model::{ApiDescriptor, ProjectMetadata, SourceKind, SpecType};
