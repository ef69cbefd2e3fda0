//! Per-asset ranking tables: one row per metric with sector and overall bars.

use super::ColorScheme;
use super::RankingDisplay;
use super::Score;
use super::ranking;
use crate::format::format_large_number;
use crate::format::format_percent;
use crate::model::Asset;
use crate::model::AssetClass;
use crate::model::AssetTab;
use crate::model::Metric;
use crate::model::Metric as M;

/// One metric row of a ranking table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingOption {
    pub display: &'static str,
    pub metric: Metric,
    /// Render the value as a percentage.
    pub percent: bool,
    /// Higher is better; picks the bar's color scheme.
    pub good_bad: bool,
}

impl RankingOption {
    const fn new(display: &'static str, metric: Metric, percent: bool, good_bad: bool) -> Self {
        Self {
            display,
            metric,
            percent,
            good_bad,
        }
    }

    /// Color scheme for this row's bars.
    pub fn scheme(&self) -> ColorScheme {
        ColorScheme::from_good_bad(self.good_bad)
    }
}

const PROFILE_STOCK: &[RankingOption] = &[
    RankingOption::new("Market Correlation", M::MarketCorrelation, true, false),
    RankingOption::new("Market Cap", M::Size, false, false),
    RankingOption::new("Dividend Yield", M::DividendYield, true, false),
    RankingOption::new("Volume", M::Volume, false, false),
];

const PROFILE_ETF: &[RankingOption] = &[
    RankingOption::new("Market Correlation", M::MarketCorrelation, true, false),
    RankingOption::new("Net Assets", M::Size, false, false),
    RankingOption::new("Dividend Yield", M::DividendYield, true, false),
    RankingOption::new("Expense Ratio", M::Expenses, true, false),
    RankingOption::new("Turnover Ratio", M::Turnover, true, false),
    RankingOption::new("Holding Diversity", M::HoldingsDiversity, true, false),
    RankingOption::new("Sector Diversity", M::SectorDiversity, true, false),
    RankingOption::new("Volume", M::Volume, false, false),
];

const GROWTH: &[RankingOption] = &[
    RankingOption::new("5y CAGR", M::Cagr, true, true),
    RankingOption::new("3y CAGR", M::ThreeYearGrowth, true, true),
    RankingOption::new("1y Return", M::OneYearGrowth, true, true),
    RankingOption::new("6mo CAGR", M::SixMonthGrowth, true, true),
    RankingOption::new("Dividend Growth", M::DividendGrowth, true, true),
];

const PERFORMANCE: &[RankingOption] = &[
    RankingOption::new("Alpha", M::Alpha, true, true),
    RankingOption::new("Sharpe", M::Sharpe, false, true),
    RankingOption::new("Sortino", M::Sortino, false, true),
    RankingOption::new("M-Squared", M::MSquared, false, true),
    RankingOption::new("Omega", M::Omega, false, true),
    RankingOption::new("Calmar", M::Calmar, false, true),
    RankingOption::new("Martin", M::Martin, false, true),
];

const RISK: &[RankingOption] = &[
    RankingOption::new("Beta", M::Beta, false, false),
    RankingOption::new("Std. Returns", M::StandardDeviationReturns, true, true),
    RankingOption::new("Max Drawdown", M::MaxDrawdown, true, true),
    RankingOption::new("Avg Drawdown", M::AvgDrawdown, true, true),
    RankingOption::new("VaR 1%", M::Var1, true, true),
    RankingOption::new("VaR 5%", M::Var5, true, true),
    RankingOption::new("VaR 10%", M::Var10, true, true),
];

const VALUATION: &[RankingOption] = &[
    RankingOption::new("WACC", M::Wacc, false, true),
    RankingOption::new("Price to Earnings", M::PriceToEarnings, false, true),
    RankingOption::new("Price to Book", M::PriceToBook, false, true),
    RankingOption::new("Price to Sales", M::PriceToSales, false, true),
    RankingOption::new("PE to Growth", M::PriceToEarningsToGrowth, false, true),
];

const PROFITABILITY: &[RankingOption] = &[
    RankingOption::new("Profit Margin", M::ProfitMargin, true, true),
    RankingOption::new("ROE", M::ReturnOnEquity, true, true),
    RankingOption::new("ROA", M::ReturnOnAssets, true, true),
    RankingOption::new("Earnings Growth", M::EarningsGrowth, true, true),
    RankingOption::new("Revenue Growth", M::RevenueGrowth, true, true),
];

const LEVERAGE: &[RankingOption] = &[
    RankingOption::new("Debt to Equity", M::DebtToEquity, false, true),
    RankingOption::new("Debt to Assets", M::DebtToAssets, false, true),
    RankingOption::new("Debt to EBITDA", M::DebtToEbit, false, true),
    RankingOption::new("Current Ratio", M::AssetsToLiabilities, false, true),
    RankingOption::new("Altman Z-Score", M::AltmanZ, false, true),
];

const Q_STOCK: &[RankingOption] = &[
    RankingOption::new("Overall", M::QOverall, true, true),
    RankingOption::new("Growth", M::QGrowth, true, true),
    RankingOption::new("Risk", M::QRisk, true, true),
    RankingOption::new("Performance", M::QPerformance, false, true),
    RankingOption::new("Valuation", M::QValuation, false, true),
    RankingOption::new("Profitability", M::QProfitability, false, true),
    RankingOption::new("Leverage", M::QLeverage, false, true),
];

const Q_ETF: &[RankingOption] = &[
    RankingOption::new("Overall", M::QOverall, true, true),
    RankingOption::new("Growth", M::QGrowth, true, true),
    RankingOption::new("Risk", M::QRisk, true, true),
    RankingOption::new("Performance", M::QPerformance, false, true),
];

/// The ranking rows shown for `class` on `tab`.
///
/// Funds have no fundamentals, so their valuation, profitability and leverage
/// tabs are empty.
pub fn ranking_options(class: AssetClass, tab: AssetTab) -> &'static [RankingOption] {
    match (class, tab) {
        (AssetClass::Equity, AssetTab::Profile) => PROFILE_STOCK,
        (AssetClass::Etf, AssetTab::Profile) => PROFILE_ETF,
        (AssetClass::Equity, AssetTab::QScores) => Q_STOCK,
        (AssetClass::Etf, AssetTab::QScores) => Q_ETF,
        (_, AssetTab::Growth) => GROWTH,
        (_, AssetTab::Performance) => PERFORMANCE,
        (_, AssetTab::Risk) => RISK,
        (AssetClass::Equity, AssetTab::Valuation) => VALUATION,
        (AssetClass::Equity, AssetTab::Profitability) => PROFITABILITY,
        (AssetClass::Equity, AssetTab::Leverage) => LEVERAGE,
        (AssetClass::Etf, _) => &[],
    }
}

/// Heading of the within-peers column.
pub fn peer_heading(class: AssetClass) -> &'static str {
    match class {
        AssetClass::Equity => "Sector",
        AssetClass::Etf => "Category",
    }
}

/// One rendered ranking row.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingRow {
    pub display: &'static str,
    pub metric: Metric,
    /// Formatted metric value. Q-score rows have none since the score is the
    /// percentile itself.
    pub value: Option<String>,
    /// Rank among sector (or category) peers.
    pub sector: RankingDisplay,
    /// Rank across the whole universe.
    pub overall: RankingDisplay,
}

/// Builds the ranking rows of `asset` for `options`.
///
/// Metrics the asset does not publish are skipped.
pub fn ranking_rows(asset: &Asset, options: &[RankingOption]) -> Vec<RankingRow> {
    options
        .iter()
        .filter_map(|option| {
            let metric = option.metric;
            let value = asset.metric(metric)?;
            let scheme = option.scheme();
            let sector = Score::from(asset.sector_percentiles.get(&metric).copied());

            let (text, overall) = if metric.is_q_score() {
                (None, Score::Value(value))
            } else {
                let text = if option.percent {
                    format_percent(value)
                } else {
                    format_large_number(value, 1)
                };
                (
                    Some(text),
                    Score::from(asset.overall_percentiles.get(&metric).copied()),
                )
            };

            Some(RankingRow {
                display: option.display,
                metric,
                value: text,
                sector: ranking(sector, scheme, None),
                overall: ranking(overall, scheme, None),
            })
        })
        .collect()
}
