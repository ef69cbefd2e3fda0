//! Borrowed cell view used for sorting, filtering and formatting.

use std::cmp::Ordering;

use chrono::DateTime;
use chrono::Utc;

use super::Value;

/// A borrowed view of one row value in one column.
///
/// Typed rows and dynamic [`Record`](super::Record)s both hand the table
/// engine a `Cell`, so the comparator and the formatters only deal with a
/// handful of shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    /// Absent column or null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Any numeric value.
    Number(f64),
    /// Text value.
    Text(&'a str),
    /// Timestamp.
    DateTime(DateTime<Utc>),
    /// List value (tags, holdings).
    List(&'a [Value]),
    /// Nested object with no scalar interpretation.
    Json(&'a serde_json::Value),
}

impl<'a> Cell<'a> {
    /// Returns `true` when the value counts as missing for sorting.
    ///
    /// Null, `false`, `0`, `NaN` and the empty string are all missing. A
    /// legitimate zero therefore sinks with absent data.
    pub fn is_missing(&self) -> bool {
        match self {
            Cell::Null => true,
            Cell::Bool(b) => !b,
            Cell::Number(n) => *n == 0.0 || n.is_nan(),
            Cell::Text(s) => s.is_empty(),
            Cell::DateTime(_) | Cell::List(_) | Cell::Json(_) => false,
        }
    }

    /// Returns `true` when the value is not missing.
    pub fn is_present(&self) -> bool {
        !self.is_missing()
    }

    /// Returns the numeric value, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the text, if this is a text cell.
    pub fn as_text(&self) -> Option<&'a str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Rank used to order present values of different kinds.
    fn kind_rank(&self) -> u8 {
        match self {
            Cell::Null => 0,
            Cell::Bool(_) => 1,
            Cell::Number(_) => 2,
            Cell::DateTime(_) => 3,
            Cell::Text(_) => 4,
            Cell::List(_) => 5,
            Cell::Json(_) => 6,
        }
    }

    /// Natural ascending order between two present values.
    ///
    /// Numbers compare numerically, text lexicographically, timestamps
    /// chronologically. Mixed kinds order by kind so the result is a total
    /// order; lists and nested objects compare equal among themselves.
    pub fn natural_cmp(&self, other: &Cell<'_>) -> Ordering {
        match (self, other) {
            (Cell::Bool(a), Cell::Bool(b)) => a.cmp(b),
            (Cell::Number(a), Cell::Number(b)) => a.total_cmp(b),
            (Cell::Text(a), Cell::Text(b)) => a.cmp(b),
            (Cell::DateTime(a), Cell::DateTime(b)) => a.cmp(b),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }
}

impl From<Option<f64>> for Cell<'_> {
    fn from(v: Option<f64>) -> Self {
        v.map(Cell::Number).unwrap_or(Cell::Null)
    }
}

impl<'a> From<&'a str> for Cell<'a> {
    fn from(v: &'a str) -> Self {
        Cell::Text(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_falsy_values_are_missing() {
        assert!(Cell::Null.is_missing());
        assert!(Cell::Bool(false).is_missing());
        assert!(Cell::Number(0.0).is_missing());
        assert!(Cell::Number(f64::NAN).is_missing());
        assert!(Cell::Text("").is_missing());
    }

    #[test]
    fn test_truthy_values_are_present() {
        assert!(Cell::Bool(true).is_present());
        assert!(Cell::Number(-0.3).is_present());
        assert!(Cell::Text("0").is_present());
        assert!(Cell::List(&[]).is_present());
    }

    #[test]
    fn test_natural_cmp_numbers_and_text() {
        assert_eq!(Cell::Number(2.0).natural_cmp(&Cell::Number(5.0)), Ordering::Less);
        assert_eq!(Cell::Text("b").natural_cmp(&Cell::Text("a")), Ordering::Greater);
    }

    #[test]
    fn test_natural_cmp_mixed_kinds_is_consistent() {
        let number = Cell::Number(100.0);
        let text = Cell::Text("abc");
        assert_eq!(number.natural_cmp(&text), Ordering::Less);
        assert_eq!(text.natural_cmp(&number), Ordering::Greater);
    }
}
