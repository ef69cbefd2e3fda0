//! The row abstraction the table engine is generic over.

use std::fmt::Debug;

use super::Cell;

/// Trait for rows that can be filtered, sorted and paginated.
///
/// Each table picks its own column type, so a call site asking for a column
/// the row does not have fails to compile instead of silently rendering
/// nothing. Dynamic [`Record`](super::Record)s use `String` columns.
///
/// # Example
///
/// ```
/// use quantix_lib::model::{Cell, TableRow};
///
/// #[derive(Clone, Debug, PartialEq)]
/// enum HoldingColumn {
///     Ticker,
///     Weight,
/// }
///
/// struct Holding {
///     ticker: String,
///     weight: f64,
/// }
///
/// impl TableRow for Holding {
///     type Column = HoldingColumn;
///
///     fn cell(&self, column: &HoldingColumn) -> Cell<'_> {
///         match column {
///             HoldingColumn::Ticker => Cell::Text(&self.ticker),
///             HoldingColumn::Weight => Cell::Number(self.weight),
///         }
///     }
/// }
/// ```
pub trait TableRow {
    /// The column identifier type for this row.
    type Column: Clone + PartialEq + Debug;

    /// Returns the value of this row in `column`.
    ///
    /// Absent values are reported as [`Cell::Null`].
    fn cell(&self, column: &Self::Column) -> Cell<'_>;
}

impl<T: TableRow> TableRow for &T {
    type Column = T::Column;

    fn cell(&self, column: &Self::Column) -> Cell<'_> {
        (**self).cell(column)
    }
}
