pub mod loader;
pub mod tables;

pub use loader::*;
pub use tables::*;
