//! Preset range choices for every screener select.

use crate::model::AssetClass;
use crate::model::AssetTab;
use crate::model::Cell;
use crate::model::Metric;
use crate::model::PortfolioColumn;

/// One choice of a screener select.
///
/// The first choice of every select is `Any`, which has no bound and removes
/// the select's filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Choice {
    pub label: &'static str,
    /// Inclusive lower bound.
    pub lower: Option<f64>,
    /// Exclusive upper bound.
    pub upper: Option<f64>,
    /// Exact text match.
    pub eq: Option<&'static str>,
}

impl Choice {
    /// The `Any` choice.
    pub const ANY: Choice = Choice {
        label: "Any",
        lower: None,
        upper: None,
        eq: None,
    };

    /// Values at or above `lower`.
    pub const fn above(label: &'static str, lower: f64) -> Self {
        Self {
            label,
            lower: Some(lower),
            upper: None,
            eq: None,
        }
    }

    /// Values below `upper`.
    pub const fn below(label: &'static str, upper: f64) -> Self {
        Self {
            label,
            lower: None,
            upper: Some(upper),
            eq: None,
        }
    }

    /// Values in `[lower, upper)`.
    pub const fn between(label: &'static str, lower: f64, upper: f64) -> Self {
        Self {
            label,
            lower: Some(lower),
            upper: Some(upper),
            eq: None,
        }
    }

    /// Text cells equal to `eq`.
    pub const fn equals(label: &'static str, eq: &'static str) -> Self {
        Self {
            label,
            lower: None,
            upper: None,
            eq: Some(eq),
        }
    }

    /// Returns `true` for the `Any` choice.
    pub fn is_any(&self) -> bool {
        self.lower.is_none() && self.upper.is_none() && self.eq.is_none()
    }

    /// Asset screener rule.
    ///
    /// Zero bounds count as unset, and a missing value fails any set bound.
    pub fn fits_value(&self, value: Option<f64>) -> bool {
        let lower = self.lower.filter(|b| *b != 0.0);
        let upper = self.upper.filter(|b| *b != 0.0);
        within(value, lower, upper)
    }

    /// Portfolio screener rule.
    ///
    /// The cell must be non-null, every set bound applies (zero included), and
    /// `eq` must match the text exactly.
    pub fn fits_cell(&self, cell: &Cell<'_>) -> bool {
        if *cell == Cell::Null {
            return false;
        }
        if let Some(eq) = self.eq {
            if cell.as_text() != Some(eq) {
                return false;
            }
        }
        if self.lower.is_none() && self.upper.is_none() {
            return true;
        }
        within(cell.as_number(), self.lower, self.upper)
    }
}

/// `lower <= value < upper`, with unset bounds ignored and a missing value
/// failing any set bound.
pub(crate) fn within(value: Option<f64>, lower: Option<f64>, upper: Option<f64>) -> bool {
    let above = match lower {
        Some(lower) => value.is_some_and(|v| v >= lower),
        None => true,
    };
    let below = match upper {
        Some(upper) => value.is_some_and(|v| v < upper),
        None => true,
    };
    above && below
}

/// A screener select: a column, its heading and the preset choices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectOption<C> {
    pub column: C,
    pub label: &'static str,
    pub choices: &'static [Choice],
}

impl<C> SelectOption<C> {
    const fn new(column: C, label: &'static str, choices: &'static [Choice]) -> Self {
        Self {
            column,
            label,
            choices,
        }
    }

    /// Finds a choice by label, ignoring case and surrounding whitespace.
    pub fn choice_index(&self, label: &str) -> Option<usize> {
        let label = label.trim();
        self.choices
            .iter()
            .position(|choice| choice.label.eq_ignore_ascii_case(label))
    }
}

// =============================================================================
// Shared choice lists
// =============================================================================

const GROWTH_CHOICES: &[Choice] = &[
    Choice::ANY,
    Choice::above("> 5%", 0.05),
    Choice::above("> 10%", 0.1),
    Choice::above("> 20%", 0.2),
    Choice::above("> 40%", 0.4),
];

const Q_CHOICES: &[Choice] = &[
    Choice::ANY,
    Choice::above("Fair", 0.4),
    Choice::above("Good", 0.6),
    Choice::above("Great", 0.75),
    Choice::above("Excellent", 0.9),
];

const DIVIDEND_YIELD_CHOICES: &[Choice] = &[
    Choice::ANY,
    Choice::above("> 0.5%", 0.005),
    Choice::above("> 1%", 0.01),
    Choice::above("> 2%", 0.02),
    Choice::above("> 4%", 0.04),
];

// =============================================================================
// Asset screener
// =============================================================================

const SIZE_EQUITY: &[Choice] = &[
    Choice::ANY,
    Choice::below("Small", 1e9),
    Choice::between("Mid", 1e9, 100e9),
    Choice::between("Large", 100e9, 500e9),
    Choice::above("Mega", 500e9),
];

const SIZE_ETF: &[Choice] = &[
    Choice::ANY,
    Choice::below("Small", 200e6),
    Choice::between("Mid", 200e6, 1e9),
    Choice::between("Large", 1e9, 50e9),
    Choice::above("Mega", 50e9),
];

const VOLUME_EQUITY: &[Choice] = &[
    Choice::ANY,
    Choice::below("Low", 200e3),
    Choice::between("Med", 200e3, 1e6),
    Choice::between("High", 1e6, 20e6),
    Choice::above("Peak", 20e6),
];

const VOLUME_ETF: &[Choice] = &[
    Choice::ANY,
    Choice::below("Low", 10e3),
    Choice::between("Med", 10e3, 100e3),
    Choice::between("High", 100e3, 10e6),
    Choice::above("Peak", 10e6),
];

const FUND_PROFILE: [SelectOption<Metric>; 4] = [
    SelectOption::new(
        Metric::HoldingsDiversity,
        "Holding Diversity",
        &[
            Choice::ANY,
            Choice::below("Low", 0.78),
            Choice::between("Moderate", 0.78, 0.8),
            Choice::above("High", 0.8),
        ],
    ),
    SelectOption::new(
        Metric::SectorDiversity,
        "Sector Diversity",
        &[
            Choice::ANY,
            Choice::below("Low", 0.6),
            Choice::between("Moderate", 0.6, 0.72),
            Choice::above("High", 0.72),
        ],
    ),
    SelectOption::new(
        Metric::Expenses,
        "Expense Ratio",
        &[
            Choice::ANY,
            Choice::below("< 0.05%", 0.0005),
            Choice::below("< 0.1%", 0.001),
            Choice::below("< 0.2%", 0.002),
            Choice::below("< 0.5%", 0.005),
        ],
    ),
    SelectOption::new(
        Metric::Turnover,
        "Turnover Ratio",
        &[
            Choice::ANY,
            Choice::below("Low", 0.2),
            Choice::between("Moderate", 0.2, 0.4),
            Choice::above("High", 0.4),
        ],
    ),
];

const GROWTH: &[SelectOption<Metric>] = &[
    SelectOption::new(Metric::SixMonthGrowth, "6mo CAGR", GROWTH_CHOICES),
    SelectOption::new(Metric::OneYearGrowth, "YoY Growth", GROWTH_CHOICES),
    SelectOption::new(Metric::ThreeYearGrowth, "3y CAGR", GROWTH_CHOICES),
    SelectOption::new(Metric::Cagr, "5y CAGR", GROWTH_CHOICES),
];

const RISK: &[SelectOption<Metric>] = &[
    SelectOption::new(
        Metric::AvgDrawdown,
        "Avg. Drawdown",
        &[
            Choice::ANY,
            Choice::below("< 3%", 0.03),
            Choice::below("< 5%", 0.05),
            Choice::below("< 10%", 0.1),
            Choice::below("< 15%", 0.15),
        ],
    ),
    SelectOption::new(
        Metric::MaxDrawdown,
        "Max. Drawdown",
        &[
            Choice::ANY,
            Choice::below("< 10%", 0.1),
            Choice::below("< 20%", 0.2),
            Choice::below("< 35%", 0.35),
            Choice::below("< 50%", 0.5),
        ],
    ),
    SelectOption::new(
        Metric::Beta,
        "Beta",
        &[
            Choice::ANY,
            Choice::below("Negative", 0.001),
            Choice::between("Weak", 0.001, 0.8),
            Choice::between("Average", 0.8, 1.4),
            Choice::above("High", 1.4),
        ],
    ),
    SelectOption::new(
        Metric::StandardDeviationReturns,
        "Std. Returns",
        &[
            Choice::ANY,
            Choice::below("< 5%", 0.05),
            Choice::below("< 8%", 0.08),
            Choice::below("< 12%", 0.12),
            Choice::below("< 20%", 0.2),
        ],
    ),
    SelectOption::new(
        Metric::Var1,
        "VaR 1%",
        &[
            Choice::ANY,
            Choice::below("< 5%", 0.05),
            Choice::below("< 10%", 0.1),
            Choice::below("< 15%", 0.15),
            Choice::below("< 25%", 0.25),
        ],
    ),
    SelectOption::new(
        Metric::Var5,
        "VaR 5%",
        &[
            Choice::ANY,
            Choice::below("< 3%", 0.03),
            Choice::below("< 8%", 0.08),
            Choice::below("< 12%", 0.12),
            Choice::below("< 20%", 0.2),
        ],
    ),
    SelectOption::new(
        Metric::Var10,
        "VaR 10%",
        &[
            Choice::ANY,
            Choice::below("< 3%", 0.03),
            Choice::below("< 8%", 0.08),
            Choice::below("< 12%", 0.12),
            Choice::below("< 20%", 0.2),
        ],
    ),
];

const PERFORMANCE: &[SelectOption<Metric>] = &[
    SelectOption::new(
        Metric::Alpha,
        "Alpha",
        &[
            Choice::ANY,
            Choice::above("> -0.5%", -0.005),
            Choice::above("> 0.5%", 0.005),
            Choice::above("> 1%", 0.01),
            Choice::above("> 2%", 0.02),
        ],
    ),
    SelectOption::new(
        Metric::Sharpe,
        "Sharpe",
        &[
            Choice::ANY,
            Choice::above("Fair", 0.05),
            Choice::above("Good", 0.12),
            Choice::above("Great", 0.2),
            Choice::above("Excellent", 0.3),
        ],
    ),
    SelectOption::new(
        Metric::Sortino,
        "Sortino",
        &[
            Choice::ANY,
            Choice::above("Fair", 0.1),
            Choice::above("Good", 0.2),
            Choice::above("Great", 0.35),
            Choice::above("Excellent", 0.5),
        ],
    ),
    SelectOption::new(
        Metric::MSquared,
        "M Squared",
        &[
            Choice::ANY,
            Choice::above("Fair", 0.005),
            Choice::above("Good", 0.008),
            Choice::above("Great", 0.012),
            Choice::above("Excellent", 0.015),
        ],
    ),
    SelectOption::new(
        Metric::Calmar,
        "Calmar",
        &[
            Choice::ANY,
            Choice::above("Fair", 0.1),
            Choice::above("Good", 0.3),
            Choice::above("Great", 0.5),
            Choice::above("Excellent", 1.0),
        ],
    ),
    SelectOption::new(
        Metric::Martin,
        "Martin",
        &[
            Choice::ANY,
            Choice::above("Fair", 1.0),
            Choice::above("Good", 1.5),
            Choice::above("Great", 2.0),
            Choice::above("Excellent", 3.0),
        ],
    ),
    SelectOption::new(
        Metric::Omega,
        "Omega",
        &[
            Choice::ANY,
            Choice::above("Fair", 1.2),
            Choice::above("Good", 1.6),
            Choice::above("Great", 2.0),
            Choice::above("Excellent", 2.4),
        ],
    ),
];

const PROFITABILITY: &[SelectOption<Metric>] = &[
    SelectOption::new(
        Metric::DividendGrowth,
        "Div. Growth",
        &[
            Choice::ANY,
            Choice::above("> 3%", 0.03),
            Choice::above("> 5%", 0.05),
            Choice::above("> 10%", 0.1),
            Choice::above("> 15%", 0.15),
        ],
    ),
    SelectOption::new(
        Metric::EarningsGrowth,
        "Earnings Growth",
        &[
            Choice::ANY,
            Choice::above("> 5%", 0.05),
            Choice::above("> 10%", 0.1),
            Choice::above("> 30%", 0.3),
            Choice::above("> 60%", 0.6),
        ],
    ),
    SelectOption::new(
        Metric::RevenueGrowth,
        "Sales Growth",
        &[
            Choice::ANY,
            Choice::above("> 5%", 0.05),
            Choice::above("> 10%", 0.1),
            Choice::above("> 15%", 0.15),
            Choice::above("> 25%", 0.25),
        ],
    ),
    SelectOption::new(
        Metric::ProfitMargin,
        "Profit Margin",
        &[
            Choice::ANY,
            Choice::above("> 5%", 0.05),
            Choice::above("> 10%", 0.1),
            Choice::above("> 15%", 0.15),
            Choice::above("> 25%", 0.25),
        ],
    ),
    SelectOption::new(
        Metric::ReturnOnEquity,
        "RoE",
        &[
            Choice::ANY,
            Choice::above("> 5%", 0.05),
            Choice::above("> 10%", 0.1),
            Choice::above("> 15%", 0.15),
            Choice::above("> 25%", 0.25),
        ],
    ),
    SelectOption::new(
        Metric::ReturnOnAssets,
        "RoA",
        &[
            Choice::ANY,
            Choice::above("> 3%", 0.03),
            Choice::above("> 5%", 0.05),
            Choice::above("> 10%", 0.1),
            Choice::above("> 15%", 0.15),
        ],
    ),
];

const LEVERAGE: &[SelectOption<Metric>] = &[
    SelectOption::new(
        Metric::Wacc,
        "WACC",
        &[
            Choice::ANY,
            Choice::below("Fair", 0.2),
            Choice::below("Good", 0.15),
            Choice::below("Great", 0.1),
            Choice::below("Excellent", 0.05),
        ],
    ),
    SelectOption::new(
        Metric::AltmanZ,
        "Altman-Z",
        &[
            Choice::ANY,
            Choice::above("Fair", 2.0),
            Choice::above("Good", 3.0),
            Choice::above("Great", 5.0),
            Choice::above("Excellent", 8.0),
        ],
    ),
    SelectOption::new(
        Metric::AssetsToLiabilities,
        "Assets / Liabilities",
        &[
            Choice::ANY,
            Choice::above("Fair", 1.0),
            Choice::above("Good", 2.0),
            Choice::above("Great", 3.0),
            Choice::above("Excellent", 4.0),
        ],
    ),
    SelectOption::new(
        Metric::DebtToAssets,
        "Debt / Assets",
        &[
            Choice::ANY,
            Choice::below("Fair", 0.2),
            Choice::below("Good", 0.1),
            Choice::below("Great", 0.05),
            Choice::below("Excellent", 0.01),
        ],
    ),
    SelectOption::new(
        Metric::DebtToEquity,
        "Debt / Equity",
        &[
            Choice::ANY,
            Choice::below("Fair", 0.3),
            Choice::below("Good", 0.15),
            Choice::below("Great", 0.05),
            Choice::below("Excellent", 0.01),
        ],
    ),
];

const VALUATION: &[SelectOption<Metric>] = &[
    SelectOption::new(
        Metric::PriceToEarnings,
        "Price / Earnings",
        &[
            Choice::ANY,
            Choice::below("< 5", 5.0),
            Choice::below("< 10", 10.0),
            Choice::below("< 15", 15.0),
            Choice::below("< 20", 20.0),
        ],
    ),
    SelectOption::new(
        Metric::PriceToSales,
        "Price / Sales",
        &[
            Choice::ANY,
            Choice::below("< 0.3", 0.3),
            Choice::below("< 0.8", 0.8),
            Choice::below("< 1.5", 1.5),
            Choice::below("< 3", 3.0),
        ],
    ),
    SelectOption::new(
        Metric::PriceToBook,
        "Price / Book",
        &[
            Choice::ANY,
            Choice::below("< 0.3", 0.3),
            Choice::below("< 0.8", 0.8),
            Choice::below("< 1.5", 1.5),
            Choice::below("< 3", 3.0),
        ],
    ),
    SelectOption::new(
        Metric::PriceToEarningsToGrowth,
        "PEG",
        &[
            Choice::ANY,
            Choice::below("< 0.5", 0.5),
            Choice::below("< 0.8", 0.8),
            Choice::below("< 1.2", 1.2),
            Choice::below("< 2", 2.0),
        ],
    ),
];

const Q_SCORES: &[SelectOption<Metric>] = &[
    SelectOption::new(Metric::QOverall, "Overall", Q_CHOICES),
    SelectOption::new(Metric::QLeverage, "Leverage", Q_CHOICES),
    SelectOption::new(Metric::QValuation, "Valuation", Q_CHOICES),
    SelectOption::new(Metric::QProfitability, "Profitability", Q_CHOICES),
    SelectOption::new(Metric::QGrowth, "Growth", Q_CHOICES),
    SelectOption::new(Metric::QRisk, "Risk", Q_CHOICES),
    SelectOption::new(Metric::QPerformance, "Performance", Q_CHOICES),
];

/// The selects shown for `class` on `tab`, in display order.
pub fn select_options(class: AssetClass, tab: AssetTab) -> Vec<SelectOption<Metric>> {
    match tab {
        AssetTab::Profile => {
            let (size, volume) = match class {
                AssetClass::Equity => (SIZE_EQUITY, VOLUME_EQUITY),
                AssetClass::Etf => (SIZE_ETF, VOLUME_ETF),
            };
            let mut options = vec![
                SelectOption::new(Metric::Size, class.size_label(), size),
                SelectOption::new(Metric::Volume, "Daily Volume", volume),
                SelectOption::new(Metric::DividendYield, "Div. Yield", DIVIDEND_YIELD_CHOICES),
            ];
            if class == AssetClass::Etf {
                options.extend(FUND_PROFILE);
            }
            options
        }
        AssetTab::QScores => Q_SCORES.to_vec(),
        AssetTab::Growth => GROWTH.to_vec(),
        AssetTab::Performance => PERFORMANCE.to_vec(),
        AssetTab::Risk => RISK.to_vec(),
        AssetTab::Valuation => VALUATION.to_vec(),
        AssetTab::Profitability => PROFITABILITY.to_vec(),
        AssetTab::Leverage => LEVERAGE.to_vec(),
    }
}

// =============================================================================
// Portfolio screener
// =============================================================================

const PORTFOLIO_OPTIONS: &[SelectOption<PortfolioColumn>] = &[
    SelectOption::new(PortfolioColumn::Metric(Metric::Cagr), "CAGR (%)", GROWTH_CHOICES),
    SelectOption::new(
        PortfolioColumn::Metric(Metric::OneYearGrowth),
        "YoY Growth",
        GROWTH_CHOICES,
    ),
    SelectOption::new(
        PortfolioColumn::Metric(Metric::Alpha),
        "Alpha",
        &[
            Choice::ANY,
            Choice::above("> 0%", 0.0001),
            Choice::above("> 0.5%", 0.005),
            Choice::above("> 1%", 0.01),
            Choice::above("> 2%", 0.02),
        ],
    ),
    SelectOption::new(
        PortfolioColumn::Metric(Metric::Sharpe),
        "Sharpe",
        &[
            Choice::ANY,
            Choice::above("> 10%", 0.1),
            Choice::above("> 20%", 0.2),
            Choice::above("> 30%", 0.3),
            Choice::above("> 40%", 0.4),
        ],
    ),
    SelectOption::new(
        PortfolioColumn::Metric(Metric::MaxDrawdown),
        "Max. DD",
        &[
            Choice::ANY,
            Choice::below("< 5%", 0.05),
            Choice::below("< 10%", 0.1),
            Choice::below("< 20%", 0.2),
            Choice::below("< 40%", 0.4),
        ],
    ),
    SelectOption::new(
        PortfolioColumn::Metric(Metric::Yield),
        "Yield (%)",
        DIVIDEND_YIELD_CHOICES,
    ),
    SelectOption::new(
        PortfolioColumn::PrimaryAssetClass,
        "Asset Class",
        &[
            Choice::ANY,
            Choice::equals("Equity", "Equity"),
            Choice::equals("ETF", "ETF"),
            Choice::equals("Mixed", "Mixed"),
        ],
    ),
];

/// The portfolio screener's selects, in display order.
pub fn portfolio_select_options() -> &'static [SelectOption<PortfolioColumn>] {
    PORTFOLIO_OPTIONS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_select_starts_with_any() {
        for class in [AssetClass::Equity, AssetClass::Etf] {
            for tab in AssetTab::ALL {
                for option in select_options(class, tab) {
                    assert!(option.choices[0].is_any(), "{} {}", tab, option.label);
                }
            }
        }
        assert!(portfolio_select_options().iter().all(|o| o.choices[0].is_any()));
    }

    #[test]
    fn test_profile_depends_on_class() {
        let equity = select_options(AssetClass::Equity, AssetTab::Profile);
        let etf = select_options(AssetClass::Etf, AssetTab::Profile);

        assert_eq!(equity.len(), 3);
        assert_eq!(etf.len(), 7);
        assert_eq!(equity[0].label, "Market Cap");
        assert_eq!(etf[0].label, "Net Assets");
        assert_eq!(etf[0].choices[1].upper, Some(200e6));
    }

    #[test]
    fn test_fits_value_semantics() {
        let mid = Choice::between("Mid", 1e9, 100e9);
        assert!(mid.fits_value(Some(1e9)));
        assert!(!mid.fits_value(Some(100e9)));
        assert!(!mid.fits_value(None));

        let negative = Choice::below("Negative", 0.001);
        assert!(negative.fits_value(Some(-0.3)));
        assert!(!negative.fits_value(None));
    }

    #[test]
    fn test_fits_cell_semantics() {
        let equity = Choice::equals("Equity", "Equity");
        assert!(equity.fits_cell(&Cell::Text("Equity")));
        assert!(!equity.fits_cell(&Cell::Text("ETF")));
        assert!(!equity.fits_cell(&Cell::Null));

        let above_zero = Choice::above("> 0%", 0.0001);
        assert!(above_zero.fits_cell(&Cell::Number(0.01)));
        assert!(!above_zero.fits_cell(&Cell::Number(0.0)));
    }

    #[test]
    fn test_choice_index() {
        let options = select_options(AssetClass::Equity, AssetTab::Risk);
        let beta = options.iter().find(|o| o.column == Metric::Beta).unwrap();
        assert_eq!(beta.choice_index("average"), Some(3));
        assert_eq!(beta.choice_index("Extreme"), None);
    }
}
