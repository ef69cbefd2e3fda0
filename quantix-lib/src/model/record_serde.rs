//! Serde for [`Record`] in the export document shape.
//!
//! ## Read Format (Deserialization)
//!
//! - The `id` key becomes the document id rather than a field
//! - Integers stay `Int`, other numbers become `Float`
//! - Timestamps come as `{"_seconds": .., "_nanoseconds": ..}` (admin SDK)
//!   or `{"seconds": .., "nanoseconds": ..}` (client SDK) and become `DateTime`
//! - Arrays become `List`, other objects are kept as `Json`
//!
//! ## Write Format (Serialization)
//!
//! - The document id is written back as `"id"`
//! - Null fields are skipped
//! - Timestamps serialize as RFC 3339 strings

use std::fmt;

use chrono::DateTime;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::MapAccess;
use serde::de::Visitor;
use serde::ser::SerializeMap;

use super::Record;
use super::Value;

// =============================================================================
// Serialization
// =============================================================================

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;

        if let Some(id) = &self.id {
            map.serialize_entry("id", id)?;
        }

        for (key, value) in self.fields.iter().filter(|(_, value)| !value.is_null()) {
            map.serialize_entry(key, value)?;
        }

        map.end()
    }
}

// =============================================================================
// Deserialization
// =============================================================================

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RecordVisitor)
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map representing an exported document")
    }

    fn visit_map<M>(self, mut map: M) -> Result<Record, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut record = Record::new();

        while let Some(key) = map.next_key::<String>()? {
            let value: serde_json::Value = map.next_value()?;

            if key == "id" {
                match value {
                    serde_json::Value::String(s) => record.id = Some(s),
                    serde_json::Value::Number(n) => record.id = Some(n.to_string()),
                    other => {
                        record.fields.insert(key, json_to_value(other));
                    }
                }
            } else {
                record.fields.insert(key, json_to_value(value));
            }
        }

        Ok(record)
    }
}

/// Convert a JSON value to a typed Value.
pub(crate) fn json_to_value(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                Value::Json(serde_json::Value::Number(n))
            }
        }
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(items) => {
            Value::List(items.into_iter().map(json_to_value).collect())
        }
        serde_json::Value::Object(object) => match timestamp(&object) {
            Some(dt) => Value::DateTime(dt),
            None => Value::Json(serde_json::Value::Object(object)),
        },
    }
}

/// Recognise a Firestore timestamp object.
fn timestamp(
    object: &serde_json::Map<String, serde_json::Value>,
) -> Option<DateTime<chrono::Utc>> {
    if object.len() != 2 {
        return None;
    }
    let seconds = object
        .get("_seconds")
        .or_else(|| object.get("seconds"))?
        .as_i64()?;
    let nanos = object
        .get("_nanoseconds")
        .or_else(|| object.get("nanoseconds"))?
        .as_u64()?;
    DateTime::from_timestamp(seconds, u32::try_from(nanos).ok()?)
}
