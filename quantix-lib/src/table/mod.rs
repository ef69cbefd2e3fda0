//! Client-side tables: filter, sort and paginate rows in memory.
//!
//! The free functions ([`filter_rows`], [`sort_rows`], [`paginate`],
//! [`total_pages`], [`clamp_page`]) are the pipeline steps on their own;
//! [`TableEngine`] strings them together and keeps the page in range as the
//! filtered row count changes.

mod column;
mod engine;
mod filter;
mod page;
mod sort;

pub use column::*;
pub use engine::*;
pub use filter::*;
pub use page::*;
pub use sort::*;
