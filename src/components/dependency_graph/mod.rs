mod component;
mod figure;
mod layout;
mod render;
pub mod scale;

pub use component::{DEFAULT_TITLE, DependencyGraphCanvas};
