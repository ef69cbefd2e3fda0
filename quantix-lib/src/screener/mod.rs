//! Screener presets and the stateful asset and portfolio screeners.
//!
//! Each control of a screener (a range select, the sector or tag pills, the
//! style grid) maps onto one [`Filter`](crate::table::Filter) of the result
//! table, keyed by the control's id.

mod assets;
mod grid;
mod options;
mod portfolio;

pub use assets::*;
pub use grid::*;
pub use options::*;
pub use portfolio::*;
