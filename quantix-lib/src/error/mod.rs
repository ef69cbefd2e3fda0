//! Error types

mod dataset;
mod field;
mod select;

pub use dataset::*;
pub use field::*;
pub use select::*;
