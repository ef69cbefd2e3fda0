//! Column vocabulary shared by screeners, ranking tables and typed rows.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::SelectError;

/// A precomputed numeric metric column.
///
/// The backend publishes every metric under a camelCase key, and the
/// percentile rank of the metric within the asset's sector and across the
/// whole universe under the same key suffixed with `PS` and `PO`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Metric {
    // Profile
    Size,
    Volume,
    DividendYield,
    MarketCorrelation,
    Expenses,
    Turnover,
    HoldingsDiversity,
    SectorDiversity,
    Yield,
    // Growth
    ThreeMonthGrowth,
    SixMonthGrowth,
    OneYearGrowth,
    ThreeYearGrowth,
    Cagr,
    DividendGrowth,
    // Risk
    AvgDrawdown,
    MaxDrawdown,
    Beta,
    StandardDeviationReturns,
    Var1,
    Var5,
    Var10,
    // Performance
    Alpha,
    Sharpe,
    Sortino,
    MSquared,
    Calmar,
    Martin,
    Omega,
    // Profitability
    EarningsGrowth,
    RevenueGrowth,
    ProfitMargin,
    ReturnOnEquity,
    ReturnOnAssets,
    // Leverage
    Wacc,
    AltmanZ,
    AssetsToLiabilities,
    DebtToAssets,
    DebtToEquity,
    DebtToEbit,
    // Valuation
    PriceToEarnings,
    PriceToSales,
    PriceToBook,
    PriceToEarningsToGrowth,
    // Q-scores
    QOverall,
    QGrowth,
    QRisk,
    QPerformance,
    QLeverage,
    QValuation,
    QProfitability,
}

impl Metric {
    /// Every metric, in catalog order.
    pub const ALL: [Metric; 51] = [
        Metric::Size,
        Metric::Volume,
        Metric::DividendYield,
        Metric::MarketCorrelation,
        Metric::Expenses,
        Metric::Turnover,
        Metric::HoldingsDiversity,
        Metric::SectorDiversity,
        Metric::Yield,
        Metric::ThreeMonthGrowth,
        Metric::SixMonthGrowth,
        Metric::OneYearGrowth,
        Metric::ThreeYearGrowth,
        Metric::Cagr,
        Metric::DividendGrowth,
        Metric::AvgDrawdown,
        Metric::MaxDrawdown,
        Metric::Beta,
        Metric::StandardDeviationReturns,
        Metric::Var1,
        Metric::Var5,
        Metric::Var10,
        Metric::Alpha,
        Metric::Sharpe,
        Metric::Sortino,
        Metric::MSquared,
        Metric::Calmar,
        Metric::Martin,
        Metric::Omega,
        Metric::EarningsGrowth,
        Metric::RevenueGrowth,
        Metric::ProfitMargin,
        Metric::ReturnOnEquity,
        Metric::ReturnOnAssets,
        Metric::Wacc,
        Metric::AltmanZ,
        Metric::AssetsToLiabilities,
        Metric::DebtToAssets,
        Metric::DebtToEquity,
        Metric::DebtToEbit,
        Metric::PriceToEarnings,
        Metric::PriceToSales,
        Metric::PriceToBook,
        Metric::PriceToEarningsToGrowth,
        Metric::QOverall,
        Metric::QGrowth,
        Metric::QRisk,
        Metric::QPerformance,
        Metric::QLeverage,
        Metric::QValuation,
        Metric::QProfitability,
    ];

    /// The exported column key.
    pub const fn key(self) -> &'static str {
        match self {
            Metric::Size => "size",
            Metric::Volume => "volume",
            Metric::DividendYield => "dividendYield",
            Metric::MarketCorrelation => "marketCorrelation",
            Metric::Expenses => "expenses",
            Metric::Turnover => "turnover",
            Metric::HoldingsDiversity => "holdingsDiversity",
            Metric::SectorDiversity => "sectorDiversity",
            Metric::Yield => "yield",
            Metric::ThreeMonthGrowth => "threeMonthGrowth",
            Metric::SixMonthGrowth => "sixMonthGrowth",
            Metric::OneYearGrowth => "oneYearGrowth",
            Metric::ThreeYearGrowth => "threeYearGrowth",
            Metric::Cagr => "cagr",
            Metric::DividendGrowth => "dividendGrowth",
            Metric::AvgDrawdown => "avgDrawdown",
            Metric::MaxDrawdown => "maxDrawdown",
            Metric::Beta => "beta",
            Metric::StandardDeviationReturns => "standardDeviationReturns",
            Metric::Var1 => "var1",
            Metric::Var5 => "var5",
            Metric::Var10 => "var10",
            Metric::Alpha => "alpha",
            Metric::Sharpe => "sharpe",
            Metric::Sortino => "sortino",
            Metric::MSquared => "mSquared",
            Metric::Calmar => "calmar",
            Metric::Martin => "martin",
            Metric::Omega => "omega",
            Metric::EarningsGrowth => "earningsGrowth",
            Metric::RevenueGrowth => "revenueGrowth",
            Metric::ProfitMargin => "profitMargin",
            Metric::ReturnOnEquity => "returnOnEquity",
            Metric::ReturnOnAssets => "returnOnAssets",
            Metric::Wacc => "wacc",
            Metric::AltmanZ => "altmanZ",
            Metric::AssetsToLiabilities => "assetsToLiabilities",
            Metric::DebtToAssets => "debtToAssets",
            Metric::DebtToEquity => "debtToEquity",
            Metric::DebtToEbit => "debtToEBIT",
            Metric::PriceToEarnings => "priceToEarnings",
            Metric::PriceToSales => "priceToSales",
            Metric::PriceToBook => "priceToBook",
            Metric::PriceToEarningsToGrowth => "priceToEarningsToGrowth",
            Metric::QOverall => "qOverall",
            Metric::QGrowth => "qGrowth",
            Metric::QRisk => "qRisk",
            Metric::QPerformance => "qPerformance",
            Metric::QLeverage => "qLeverage",
            Metric::QValuation => "qValuation",
            Metric::QProfitability => "qProfitability",
        }
    }

    /// Key of the within-sector percentile column.
    pub fn sector_percentile_key(self) -> String {
        format!("{}PS", self.key())
    }

    /// Key of the universe-wide percentile column.
    pub fn overall_percentile_key(self) -> String {
        format!("{}PO", self.key())
    }

    /// Returns `true` for Q-score columns, which are themselves percentiles.
    pub fn is_q_score(self) -> bool {
        matches!(
            self,
            Metric::QOverall
                | Metric::QGrowth
                | Metric::QRisk
                | Metric::QPerformance
                | Metric::QLeverage
                | Metric::QValuation
                | Metric::QProfitability
        )
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Metric {
    type Err = SelectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .iter()
            .copied()
            .find(|m| m.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| SelectError::UnknownColumn(s.to_string()))
    }
}

/// Asset class of a screened instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AssetClass {
    #[default]
    Equity,
    #[serde(rename = "ETF")]
    Etf,
}

impl AssetClass {
    /// Display name as published by the backend.
    pub const fn as_str(self) -> &'static str {
        match self {
            AssetClass::Equity => "Equity",
            AssetClass::Etf => "ETF",
        }
    }

    /// Label of the [`Metric::Size`] column for this class.
    pub const fn size_label(self) -> &'static str {
        match self {
            AssetClass::Equity => "Market Cap",
            AssetClass::Etf => "Net Assets",
        }
    }

    /// Tabs available for this class, in display order.
    pub fn tabs(self) -> &'static [AssetTab] {
        match self {
            AssetClass::Equity => &AssetTab::ALL,
            AssetClass::Etf => &AssetTab::FUND,
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetClass {
    type Err = SelectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "equity" | "stock" | "stocks" => Ok(AssetClass::Equity),
            "etf" | "etfs" => Ok(AssetClass::Etf),
            _ => Err(SelectError::unknown_name("asset class", s)),
        }
    }
}

/// Screener and ranking tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AssetTab {
    Profile,
    QScores,
    Growth,
    Performance,
    Risk,
    Valuation,
    Profitability,
    Leverage,
}

impl AssetTab {
    /// Every tab, in display order.
    pub const ALL: [AssetTab; 8] = [
        AssetTab::Profile,
        AssetTab::QScores,
        AssetTab::Growth,
        AssetTab::Performance,
        AssetTab::Risk,
        AssetTab::Valuation,
        AssetTab::Profitability,
        AssetTab::Leverage,
    ];

    /// Tabs shown for funds, which publish no fundamentals.
    pub const FUND: [AssetTab; 5] = [
        AssetTab::Profile,
        AssetTab::QScores,
        AssetTab::Growth,
        AssetTab::Performance,
        AssetTab::Risk,
    ];

    /// Display name.
    pub const fn as_str(self) -> &'static str {
        match self {
            AssetTab::Profile => "Profile",
            AssetTab::QScores => "Q-Scores",
            AssetTab::Growth => "Growth",
            AssetTab::Performance => "Performance",
            AssetTab::Risk => "Risk",
            AssetTab::Valuation => "Valuation",
            AssetTab::Profitability => "Profitability",
            AssetTab::Leverage => "Leverage",
        }
    }
}

impl fmt::Display for AssetTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetTab {
    type Err = SelectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
        AssetTab::ALL
            .iter()
            .copied()
            .find(|tab| {
                let name: String = tab
                    .as_str()
                    .chars()
                    .filter(|c| c.is_ascii_alphanumeric())
                    .collect();
                name.eq_ignore_ascii_case(&wanted)
            })
            .ok_or_else(|| SelectError::unknown_name("tab", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_keys_round_trip() {
        for metric in Metric::ALL {
            assert_eq!(metric.key().parse::<Metric>().unwrap(), metric);
        }
    }

    #[test]
    fn test_percentile_keys() {
        assert_eq!(Metric::Sharpe.sector_percentile_key(), "sharpePS");
        assert_eq!(Metric::DebtToEbit.overall_percentile_key(), "debtToEBITPO");
    }

    #[test]
    fn test_tab_parsing() {
        assert_eq!("q-scores".parse::<AssetTab>().unwrap(), AssetTab::QScores);
        assert_eq!("QScores".parse::<AssetTab>().unwrap(), AssetTab::QScores);
        assert!("Macro".parse::<AssetTab>().is_err());
    }

    #[test]
    fn test_etf_tabs() {
        assert_eq!(
            AssetClass::Etf.tabs(),
            &[
                AssetTab::Profile,
                AssetTab::QScores,
                AssetTab::Growth,
                AssetTab::Performance,
                AssetTab::Risk
            ]
        );
    }
}
