//! Parsing exported datasets into rows.
//!
//! Exports come in two shapes: a JSON array of documents, or an object keyed
//! by document id (the shape a collection dump produces). Both parse into the
//! same `Vec<Record>`; in the keyed shape the key becomes the record id unless
//! the document carries its own `id`.

use super::Asset;
use super::Portfolio;
use super::Record;
use crate::error::DatasetError;
use crate::error::FieldError;

/// Parses an exported dataset into dynamic records.
pub fn parse_records(json: &str) -> Result<Vec<Record>, DatasetError> {
    let value: serde_json::Value = serde_json::from_str(json)?;

    let records = match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(document)
            .collect::<Result<Vec<_>, _>>()?,
        serde_json::Value::Object(map) => {
            let mut records = Vec::with_capacity(map.len());
            for (key, item) in map {
                let mut record = document(item)?;
                if record.id().is_none() {
                    record.set_id(key);
                }
                records.push(record);
            }
            records
        }
        other => return Err(DatasetError::UnexpectedShape(shape_name(&other))),
    };

    log::debug!("Parsed {} records", records.len());
    Ok(records)
}

/// Parses an exported dataset into typed assets.
pub fn parse_assets(json: &str) -> Result<Vec<Asset>, DatasetError> {
    parse_typed(json)
}

/// Parses an exported dataset into typed portfolios.
pub fn parse_portfolios(json: &str) -> Result<Vec<Portfolio>, DatasetError> {
    parse_typed(json)
}

/// Parses assets, skipping rows that do not convert instead of failing.
///
/// Malformed JSON still fails; each skipped row is logged as a warning.
pub fn parse_assets_lenient(json: &str) -> Result<Vec<Asset>, DatasetError> {
    parse_lenient(json)
}

/// Parses portfolios, skipping rows that do not convert instead of failing.
pub fn parse_portfolios_lenient(json: &str) -> Result<Vec<Portfolio>, DatasetError> {
    parse_lenient(json)
}

fn parse_lenient<T>(json: &str) -> Result<Vec<T>, DatasetError>
where
    T: for<'r> TryFrom<&'r Record, Error = FieldError>,
{
    let records = parse_records(json)?;
    let total = records.len();
    let rows: Vec<T> = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| match T::try_from(record) {
            Ok(row) => Some(row),
            Err(e) => {
                log::warn!("Skipping row {}: {}", index, e);
                None
            }
        })
        .collect();
    if rows.len() < total {
        log::warn!("Skipped {} of {} rows", total - rows.len(), total);
    }
    Ok(rows)
}

fn parse_typed<T>(json: &str) -> Result<Vec<T>, DatasetError>
where
    T: for<'r> TryFrom<&'r Record, Error = FieldError>,
{
    parse_records(json)?
        .iter()
        .enumerate()
        .map(|(index, record)| T::try_from(record).map_err(|e| DatasetError::row(index, e)))
        .collect()
}

fn document(value: serde_json::Value) -> Result<Record, DatasetError> {
    match value {
        serde_json::Value::Object(_) => Ok(serde_json::from_value(value)?),
        other => Err(DatasetError::UnexpectedShape(shape_name(&other))),
    }
}

fn shape_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Metric;

    #[test]
    fn test_parse_array() {
        let json = r#"[{"ticker": "AAPL", "size": 3.4e12}, {"ticker": "MSFT"}]"#;
        let records = parse_records(json).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get_string("ticker").unwrap(), Some("AAPL"));
    }

    #[test]
    fn test_parse_keyed_object_sets_ids() {
        let json = r#"{"p-1": {"title": "Core"}, "p-2": {"id": "own", "title": "Tilt"}}"#;
        let mut ids: Vec<_> = parse_records(json)
            .unwrap()
            .iter()
            .filter_map(|r| r.id().map(str::to_string))
            .collect();
        ids.sort();

        assert_eq!(ids, vec!["own", "p-1"]);
    }

    #[test]
    fn test_non_object_rows_are_rejected() {
        let err = parse_records("[1, 2]").unwrap_err();
        assert!(matches!(err, DatasetError::UnexpectedShape("number")));

        let err = parse_records("\"rows\"").unwrap_err();
        assert!(matches!(err, DatasetError::UnexpectedShape("string")));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            parse_records("[{").unwrap_err(),
            DatasetError::Json(_)
        ));
    }

    #[test]
    fn test_parse_assets_reports_row_index() {
        let json = r#"[{"ticker": "A", "beta": 1.1}, {"ticker": "B", "beta": "x"}]"#;
        let err = parse_assets(json).unwrap_err();
        assert!(matches!(err, DatasetError::Row { index: 1, .. }));

        let assets = parse_assets(r#"[{"ticker": "A", "beta": 1.1}]"#).unwrap();
        assert_eq!(assets[0].metric(Metric::Beta), Some(1.1));
    }

    #[test]
    fn test_lenient_parse_skips_bad_rows() {
        let json = r#"[{"ticker": "A", "beta": 1.1}, {"ticker": "B", "beta": "x"}, {"ticker": "C"}]"#;
        let tickers: Vec<_> = parse_assets_lenient(json)
            .unwrap()
            .into_iter()
            .map(|a| a.ticker)
            .collect();
        assert_eq!(tickers, vec!["A", "C"]);

        assert!(parse_portfolios_lenient("[{").is_err());
    }
}
