//! Percentile rankings: bar colors and widths, and per-asset ranking tables.

mod color;
mod table;

pub use color::*;
pub use table::*;
