//! Value enum for dynamic field values

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::Cell;

/// One field of an exported document.
///
/// # Type Mapping
///
/// | JSON / Firestore | Rust Variant |
/// |------------------|--------------|
/// | null | `Null` |
/// | boolean | `Bool` |
/// | integer | `Int` |
/// | non-integer number | `Float` |
/// | string | `String` |
/// | timestamp object | `DateTime` |
/// | array | `List` |
/// | any other object | `Json` |
///
/// # Example
///
/// ```
/// use quantix_lib::model::Value;
///
/// let ticker = Value::from("AAPL");
/// let volume = Value::from(52_000_000i64);
/// let sharpe = Value::from(0.42);
/// let empty = Value::Null;
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null or absent.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// String value.
    String(String),
    /// Date and time (from Firestore timestamps).
    DateTime(DateTime<Utc>),
    /// Ordered collection (tags, holdings).
    List(Vec<Value>),
    /// Fallback for nested objects.
    Json(serde_json::Value),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::DateTime(_) => "datetime",
            Value::List(_) => "list",
            Value::Json(_) => "json",
        }
    }

    /// Returns the numeric value for `Int` and `Float`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the string slice for `String` values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrows this value as a [`Cell`] for comparison and formatting.
    pub fn as_cell(&self) -> Cell<'_> {
        match self {
            Value::Null => Cell::Null,
            Value::Bool(b) => Cell::Bool(*b),
            Value::Int(n) => Cell::Number(*n as f64),
            Value::Float(n) => Cell::Number(*n),
            Value::String(s) => Cell::Text(s),
            Value::DateTime(dt) => Cell::DateTime(*dt),
            Value::List(items) => Cell::List(items),
            Value::Json(json) => match json {
                serde_json::Value::Null => Cell::Null,
                serde_json::Value::Bool(b) => Cell::Bool(*b),
                serde_json::Value::Number(n) => n.as_f64().map(Cell::Number).unwrap_or(Cell::Null),
                serde_json::Value::String(s) => Cell::Text(s),
                other => Cell::Json(other),
            },
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v.into())
                }
            }
        )*
    };
}

value_from! {
    bool => Bool,
    i32 => Int,
    i64 => Int,
    f64 => Float,
    String => String,
    &str => String,
    DateTime<Utc> => DateTime,
    Vec<Value> => List,
    serde_json::Value => Json,
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}
