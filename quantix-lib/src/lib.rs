//! Quantix screening library
//!
//! In-memory tables over exported asset and portfolio rows: filter, sort and
//! paginate them, render percentile ranks as colored bars, and drive the asset
//! and portfolio screeners. The crate performs no I/O.

pub mod error;
pub mod format;
pub mod model;
pub mod ranking;
pub mod screener;
pub mod search;
pub mod table;
