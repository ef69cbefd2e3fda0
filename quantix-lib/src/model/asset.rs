//! Typed screener row for equities and ETFs.

use std::collections::HashMap;

use serde::Deserialize;

use super::AssetClass;
use super::Cell;
use super::Metric;
use super::Record;
use super::TableRow;
use crate::error::FieldError;

/// Columns of an [`Asset`] table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetColumn {
    Ticker,
    Name,
    Sector,
    Metric(Metric),
}

impl AssetColumn {
    /// Parses a column key (`ticker`, `name`, `sector` or a metric key).
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "ticker" => Some(AssetColumn::Ticker),
            "name" => Some(AssetColumn::Name),
            "sector" | "category" => Some(AssetColumn::Sector),
            other => other.parse().ok().map(AssetColumn::Metric),
        }
    }

    /// The exported column key.
    pub const fn key(self) -> &'static str {
        match self {
            AssetColumn::Ticker => "ticker",
            AssetColumn::Name => "name",
            AssetColumn::Sector => "sector",
            AssetColumn::Metric(metric) => metric.key(),
        }
    }
}

impl From<Metric> for AssetColumn {
    fn from(metric: Metric) -> Self {
        AssetColumn::Metric(metric)
    }
}

/// An equity or ETF with its precomputed metrics and percentile ranks.
///
/// Built from an exported [`Record`]; metrics the backend did not publish are
/// simply absent from the maps.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Record")]
pub struct Asset {
    pub ticker: String,
    pub name: String,
    pub sector: Option<String>,
    pub asset_class: AssetClass,
    pub metrics: HashMap<Metric, f64>,
    /// Percentile rank within the asset's sector (`{key}PS`).
    pub sector_percentiles: HashMap<Metric, f64>,
    /// Percentile rank across the whole universe (`{key}PO`).
    pub overall_percentiles: HashMap<Metric, f64>,
}

impl Asset {
    /// Creates an asset with no metrics.
    pub fn new(ticker: impl Into<String>, name: impl Into<String>, asset_class: AssetClass) -> Self {
        Self {
            ticker: ticker.into(),
            name: name.into(),
            sector: None,
            asset_class,
            metrics: HashMap::new(),
            sector_percentiles: HashMap::new(),
            overall_percentiles: HashMap::new(),
        }
    }

    /// Sets the sector (builder pattern).
    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    /// Sets a metric value (builder pattern).
    pub fn with_metric(mut self, metric: Metric, value: f64) -> Self {
        self.metrics.insert(metric, value);
        self
    }

    /// Sets both percentile ranks of a metric (builder pattern).
    pub fn with_percentiles(mut self, metric: Metric, sector: f64, overall: f64) -> Self {
        self.sector_percentiles.insert(metric, sector);
        self.overall_percentiles.insert(metric, overall);
        self
    }

    /// Returns a metric value, if published.
    pub fn metric(&self, metric: Metric) -> Option<f64> {
        self.metrics.get(&metric).copied()
    }

    /// Market cap for equities, net assets for funds.
    pub fn size(&self) -> Option<f64> {
        self.metric(Metric::Size)
    }
}

impl TryFrom<&Record> for Asset {
    type Error = FieldError;

    fn try_from(record: &Record) -> Result<Self, Self::Error> {
        let ticker = match record.string_or_none("ticker")? {
            Some(ticker) => ticker.to_string(),
            None => record
                .id()
                .map(str::to_string)
                .ok_or_else(|| FieldError::missing("ticker"))?,
        };
        let name = record.string_or_none("name")?.unwrap_or_default().to_string();
        let sector = match record.string_or_none("sector")? {
            Some(sector) => Some(sector.to_string()),
            None => record.string_or_none("category")?.map(str::to_string),
        };
        let asset_class = match record.string_or_none("assetClass")? {
            Some(class) => class
                .parse()
                .map_err(|_| FieldError::type_mismatch("assetClass", "asset class", "string"))?,
            None => AssetClass::default(),
        };

        let mut asset = Asset::new(ticker, name, asset_class);
        asset.sector = sector;

        for metric in Metric::ALL {
            if let Some(value) = record.float_or_none(metric.key())? {
                asset.metrics.insert(metric, value);
            }
            if let Some(value) = record.float_or_none(&metric.sector_percentile_key())? {
                asset.sector_percentiles.insert(metric, value);
            }
            if let Some(value) = record.float_or_none(&metric.overall_percentile_key())? {
                asset.overall_percentiles.insert(metric, value);
            }
        }

        Ok(asset)
    }
}

impl TryFrom<Record> for Asset {
    type Error = FieldError;

    fn try_from(record: Record) -> Result<Self, Self::Error> {
        Asset::try_from(&record)
    }
}

impl TableRow for Asset {
    type Column = AssetColumn;

    fn cell(&self, column: &AssetColumn) -> Cell<'_> {
        match column {
            AssetColumn::Ticker => Cell::Text(&self.ticker),
            AssetColumn::Name => Cell::Text(&self.name),
            AssetColumn::Sector => self.sector.as_deref().map(Cell::Text).unwrap_or(Cell::Null),
            AssetColumn::Metric(metric) => self.metric(*metric).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_record() {
        let json = r#"{
            "ticker": "VTI",
            "name": "Vanguard Total Stock Market ETF",
            "category": "Diversified",
            "assetClass": "ETF",
            "size": 1.8e12,
            "sharpe": 0.21,
            "sharpePS": 0.64,
            "sharpePO": 0.71
        }"#;
        let record: Record = serde_json::from_str(json).unwrap();
        let asset = Asset::try_from(&record).unwrap();

        assert_eq!(asset.ticker, "VTI");
        assert_eq!(asset.sector.as_deref(), Some("Diversified"));
        assert_eq!(asset.asset_class, AssetClass::Etf);
        assert_eq!(asset.size(), Some(1.8e12));
        assert_eq!(asset.sector_percentiles.get(&Metric::Sharpe), Some(&0.64));
        assert_eq!(asset.overall_percentiles.get(&Metric::Sharpe), Some(&0.71));
        assert_eq!(asset.metric(Metric::Beta), None);
    }

    #[test]
    fn test_ticker_falls_back_to_id() {
        let record = Record::with_id("NVDA").set("name", "NVIDIA");
        let asset = Asset::try_from(record).unwrap();
        assert_eq!(asset.ticker, "NVDA");
    }

    #[test]
    fn test_metric_type_mismatch_is_an_error() {
        let record = Record::new().set("ticker", "X").set("beta", "high");
        assert_eq!(
            Asset::try_from(&record).unwrap_err(),
            FieldError::type_mismatch("beta", "float", "string")
        );
    }

    #[test]
    fn test_cells() {
        let asset = Asset::new("AAPL", "Apple", AssetClass::Equity).with_metric(Metric::Beta, 1.2);
        assert_eq!(asset.cell(&AssetColumn::Ticker), Cell::Text("AAPL"));
        assert_eq!(asset.cell(&Metric::Beta.into()), Cell::Number(1.2));
        assert_eq!(asset.cell(&AssetColumn::Sector), Cell::Null);
    }

    #[test]
    fn test_column_parse() {
        assert_eq!(AssetColumn::parse("ticker"), Some(AssetColumn::Ticker));
        assert_eq!(
            AssetColumn::parse("qOverall"),
            Some(AssetColumn::Metric(Metric::QOverall))
        );
        assert_eq!(AssetColumn::parse("nope"), None);
    }
}
