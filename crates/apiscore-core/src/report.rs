pub mod model;
pub mod render;

pub use model::{parse_results, ValidationResult};
pub use render::render_text;
