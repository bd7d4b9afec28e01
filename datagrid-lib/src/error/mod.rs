//! Error types

mod grid;
mod settings;

pub use grid::*;
pub use settings::*;
