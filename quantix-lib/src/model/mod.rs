//! Row model: dynamic records, typed asset rows and the cell view the table engine compares.

mod asset;
mod cell;
mod dataset;
mod metric;
mod portfolio;
mod record;
mod record_serde;
mod row;
mod value;

pub use asset::*;
pub use cell::*;
pub use dataset::*;
pub use metric::*;
pub use portfolio::*;
pub use record::*;
pub use row::*;
pub use value::*;
