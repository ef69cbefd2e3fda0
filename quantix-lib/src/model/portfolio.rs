//! Typed row for simulated portfolios.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::Cell;
use super::Metric;
use super::Record;
use super::TableRow;
use super::Value;
use crate::error::FieldError;
use crate::error::SelectError;

/// Tags a portfolio author can attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortfolioTag {
    Growth,
    Value,
    Dividend,
    Balanced,
    Aggressive,
    Conservative,
    EmergingMarkets,
    EmergingTech,
    SmallCap,
    LargeCap,
    Diversified,
    ShortTerm,
    LongTerm,
}

impl PortfolioTag {
    /// Every tag, in the order exports index them.
    pub const ALL: [PortfolioTag; 13] = [
        PortfolioTag::Growth,
        PortfolioTag::Value,
        PortfolioTag::Dividend,
        PortfolioTag::Balanced,
        PortfolioTag::Aggressive,
        PortfolioTag::Conservative,
        PortfolioTag::EmergingMarkets,
        PortfolioTag::EmergingTech,
        PortfolioTag::SmallCap,
        PortfolioTag::LargeCap,
        PortfolioTag::Diversified,
        PortfolioTag::ShortTerm,
        PortfolioTag::LongTerm,
    ];

    /// Display label.
    pub const fn label(self) -> &'static str {
        match self {
            PortfolioTag::Growth => "Growth",
            PortfolioTag::Value => "Value",
            PortfolioTag::Dividend => "Dividend",
            PortfolioTag::Balanced => "Balanced",
            PortfolioTag::Aggressive => "Aggressive",
            PortfolioTag::Conservative => "Conservative",
            PortfolioTag::EmergingMarkets => "Emerging Markets",
            PortfolioTag::EmergingTech => "Emerging Tech",
            PortfolioTag::SmallCap => "Small Cap",
            PortfolioTag::LargeCap => "Large Cap",
            PortfolioTag::Diversified => "Diversified",
            PortfolioTag::ShortTerm => "Short-term",
            PortfolioTag::LongTerm => "Long-term",
        }
    }

    /// Looks a tag up by its export index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(i) => usize::try_from(*i).ok().and_then(Self::from_index),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for PortfolioTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PortfolioTag {
    type Err = SelectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.replace(['-', '_', ' '], "");
        Self::ALL
            .iter()
            .copied()
            .find(|tag| tag.label().replace(['-', ' '], "").eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| SelectError::unknown_name("tag", s))
    }
}

/// Columns of a [`Portfolio`] table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortfolioColumn {
    Title,
    PrimaryAssetClass,
    Favourites,
    Metric(Metric),
}

impl PortfolioColumn {
    /// Parses a column key.
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "title" => Some(PortfolioColumn::Title),
            "primaryAssetClass" | "primaryClass" => Some(PortfolioColumn::PrimaryAssetClass),
            "favourites" => Some(PortfolioColumn::Favourites),
            other => other.parse().ok().map(PortfolioColumn::Metric),
        }
    }

    /// The exported column key.
    pub const fn key(self) -> &'static str {
        match self {
            PortfolioColumn::Title => "title",
            PortfolioColumn::PrimaryAssetClass => "primaryAssetClass",
            PortfolioColumn::Favourites => "favourites",
            PortfolioColumn::Metric(metric) => metric.key(),
        }
    }
}

impl From<Metric> for PortfolioColumn {
    fn from(metric: Metric) -> Self {
        PortfolioColumn::Metric(metric)
    }
}

/// A published portfolio with its simulated performance metrics.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Record")]
pub struct Portfolio {
    pub id: String,
    pub title: String,
    /// `Equity`, `ETF` or `Mixed`.
    pub primary_asset_class: Option<String>,
    pub tags: Vec<PortfolioTag>,
    pub favourites: i64,
    pub metrics: HashMap<Metric, f64>,
}

impl Portfolio {
    /// Creates a portfolio with no metrics.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            primary_asset_class: None,
            tags: Vec::new(),
            favourites: 0,
            metrics: HashMap::new(),
        }
    }

    /// Sets the primary asset class (builder pattern).
    pub fn with_asset_class(mut self, class: impl Into<String>) -> Self {
        self.primary_asset_class = Some(class.into());
        self
    }

    /// Sets the tags (builder pattern).
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = PortfolioTag>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Sets the favourite count (builder pattern).
    pub fn with_favourites(mut self, favourites: i64) -> Self {
        self.favourites = favourites;
        self
    }

    /// Sets a metric value (builder pattern).
    pub fn with_metric(mut self, metric: Metric, value: f64) -> Self {
        self.metrics.insert(metric, value);
        self
    }

    /// Returns a metric value, if published.
    pub fn metric(&self, metric: Metric) -> Option<f64> {
        self.metrics.get(&metric).copied()
    }
}

impl TryFrom<&Record> for Portfolio {
    type Error = FieldError;

    fn try_from(record: &Record) -> Result<Self, Self::Error> {
        let id = record
            .id()
            .map(str::to_string)
            .ok_or_else(|| FieldError::missing("id"))?;
        let title = record.string_or_none("title")?.unwrap_or_default().to_string();
        let primary_asset_class = match record.string_or_none("primaryAssetClass")? {
            Some(class) => Some(class.to_string()),
            None => record.string_or_none("primaryClass")?.map(str::to_string),
        };
        let tags = match record.get("tags") {
            Some(Value::List(items)) => items.iter().filter_map(PortfolioTag::from_value).collect(),
            Some(Value::Null) | None => Vec::new(),
            Some(other) => {
                return Err(FieldError::type_mismatch("tags", "list", other.type_name()));
            }
        };
        let favourites = match record.get_int("favourites") {
            Ok(count) => count.unwrap_or(0),
            Err(FieldError::Missing { .. }) => 0,
            Err(e) => return Err(e),
        };

        let mut portfolio = Portfolio::new(id, title).with_favourites(favourites).with_tags(tags);
        portfolio.primary_asset_class = primary_asset_class;

        for metric in Metric::ALL {
            if let Some(value) = record.float_or_none(metric.key())? {
                portfolio.metrics.insert(metric, value);
            }
        }

        Ok(portfolio)
    }
}

impl TryFrom<Record> for Portfolio {
    type Error = FieldError;

    fn try_from(record: Record) -> Result<Self, Self::Error> {
        Portfolio::try_from(&record)
    }
}

impl TableRow for Portfolio {
    type Column = PortfolioColumn;

    fn cell(&self, column: &PortfolioColumn) -> Cell<'_> {
        match column {
            PortfolioColumn::Title => Cell::Text(&self.title),
            PortfolioColumn::PrimaryAssetClass => self
                .primary_asset_class
                .as_deref()
                .map(Cell::Text)
                .unwrap_or(Cell::Null),
            PortfolioColumn::Favourites => Cell::Number(self.favourites as f64),
            PortfolioColumn::Metric(metric) => self.metric(*metric).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_record_with_index_and_label_tags() {
        let json = r#"{
            "id": "abc",
            "title": "Steady Income",
            "primaryAssetClass": "ETF",
            "tags": [2, "Conservative", 99],
            "favourites": 12,
            "cagr": 0.07
        }"#;
        let record: Record = serde_json::from_str(json).unwrap();
        let portfolio = Portfolio::try_from(&record).unwrap();

        assert_eq!(portfolio.id, "abc");
        assert_eq!(portfolio.primary_asset_class.as_deref(), Some("ETF"));
        assert_eq!(
            portfolio.tags,
            vec![PortfolioTag::Dividend, PortfolioTag::Conservative]
        );
        assert_eq!(portfolio.favourites, 12);
        assert_eq!(portfolio.metric(Metric::Cagr), Some(0.07));
    }

    #[test]
    fn test_missing_id_is_an_error() {
        let record = Record::new().set("title", "No id");
        assert_eq!(
            Portfolio::try_from(&record).unwrap_err(),
            FieldError::missing("id")
        );
    }

    #[test]
    fn test_tag_parsing() {
        assert_eq!("short-term".parse::<PortfolioTag>().unwrap(), PortfolioTag::ShortTerm);
        assert_eq!("emerging_tech".parse::<PortfolioTag>().unwrap(), PortfolioTag::EmergingTech);
        assert!("Crypto".parse::<PortfolioTag>().is_err());
    }
}
