//! Dynamic exported document

use std::collections::HashMap;

use chrono::DateTime;
use chrono::Utc;

use super::Cell;
use super::TableRow;
use super::Value;
use crate::error::FieldError;

/// One exported document: an optional id plus loosely typed fields.
///
/// Typed rows ([`Asset`](super::Asset), [`Portfolio`](super::Portfolio)) are
/// converted from records, and records can be tabled directly with `String`
/// column keys.
///
/// # Example
///
/// ```
/// use quantix_lib::model::Record;
///
/// let record = Record::new()
///     .set("ticker", "AAPL")
///     .set("size", 3.4e12);
///
/// assert_eq!(record.get_string("ticker").unwrap(), Some("AAPL"));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    pub(crate) id: Option<String>,
    pub(crate) fields: HashMap<String, Value>,
}

impl Record {
    /// Creates a new empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new record with the given document ID.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            fields: HashMap::new(),
        }
    }

    /// Returns the document ID, if set.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Sets the document ID.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    /// Returns the raw value of `field`, if present.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `true` if the record carries `field`, even as null.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Inserts a field value, replacing any previous one.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    // =========================================================================
    // Typed getters
    //
    // Absent field => Err(Missing), null => Ok(None), other type => Err(TypeMismatch).
    // =========================================================================

    fn typed<'a, T>(
        &'a self,
        field: &str,
        expected: &'static str,
        extract: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Result<Option<T>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(value) => extract(value)
                .map(Some)
                .ok_or_else(|| FieldError::type_mismatch(field, expected, value.type_name())),
        }
    }

    /// Gets a string field.
    pub fn get_string(&self, field: &str) -> Result<Option<&str>, FieldError> {
        self.typed(field, "string", Value::as_str)
    }

    /// Gets an integer field.
    pub fn get_int(&self, field: &str) -> Result<Option<i64>, FieldError> {
        self.typed(field, "int", |value| match value {
            Value::Int(n) => Some(*n),
            _ => None,
        })
    }

    /// Gets a numeric field; integers widen to `f64`.
    pub fn get_float(&self, field: &str) -> Result<Option<f64>, FieldError> {
        self.typed(field, "float", Value::as_f64)
    }

    /// Gets a timestamp field.
    pub fn get_datetime(&self, field: &str) -> Result<Option<DateTime<Utc>>, FieldError> {
        self.typed(field, "datetime", |value| match value {
            Value::DateTime(dt) => Some(*dt),
            _ => None,
        })
    }

    /// Gets a list field.
    pub fn get_list(&self, field: &str) -> Result<Option<&[Value]>, FieldError> {
        self.typed(field, "list", |value| match value {
            Value::List(items) => Some(items.as_slice()),
            _ => None,
        })
    }

    /// Gets a list of strings, skipping non-string entries.
    pub fn get_string_list(&self, field: &str) -> Result<Option<Vec<&str>>, FieldError> {
        Ok(self
            .get_list(field)?
            .map(|items| items.iter().filter_map(Value::as_str).collect()))
    }

    // =========================================================================
    // Sparse getters
    //
    // Most metrics are simply absent for some assets, so these read a missing
    // field like a null one.
    // =========================================================================

    /// Gets an optional numeric field.
    pub fn float_or_none(&self, field: &str) -> Result<Option<f64>, FieldError> {
        absent_as_none(self.get_float(field))
    }

    /// Gets an optional string field.
    pub fn string_or_none(&self, field: &str) -> Result<Option<&str>, FieldError> {
        absent_as_none(self.get_string(field))
    }
}

fn absent_as_none<T>(result: Result<Option<T>, FieldError>) -> Result<Option<T>, FieldError> {
    match result {
        Err(FieldError::Missing { .. }) => Ok(None),
        other => other,
    }
}

impl TableRow for Record {
    type Column = String;

    fn cell(&self, column: &String) -> Cell<'_> {
        if column == "id"
            && let Some(id) = &self.id
        {
            return Cell::Text(id);
        }
        self.fields
            .get(column)
            .map(Value::as_cell)
            .unwrap_or(Cell::Null)
    }
}
