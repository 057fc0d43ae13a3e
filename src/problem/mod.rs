//! Problem identity, file locations and template rendering

pub mod paths;
pub mod slug;
pub mod template;

pub use paths::ProblemPaths;
pub use slug::slug;
pub use template::{Renderer, Substitutions};
