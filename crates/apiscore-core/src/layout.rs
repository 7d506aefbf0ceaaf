pub mod detect;
pub mod rules;

pub use detect::detect;
pub use rules::LayoutKind;
