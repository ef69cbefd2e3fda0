use quantix_lib::model::{AssetClass, AssetColumn, Metric, PortfolioTag, parse_assets, parse_portfolios};
use quantix_lib::screener::{
    GRID_FILTER, PortfolioScreener, SECTOR_FILTER, Screener, TAG_FILTER, select_options,
};
use quantix_lib::table::{SortOrder, TableState};

const ASSETS: &str = r#"[
    {"ticker": "AAPL", "name": "Apple Inc.", "sector": "Technology", "assetClass": "Equity",
     "size": 3.4e12, "volume": 5.2e7, "priceToEarnings": 29.0, "beta": 1.2, "qOverall": 0.81},
    {"ticker": "JPM", "name": "JPMorgan Chase", "sector": "Financial Services", "assetClass": "Equity",
     "size": 5.6e11, "volume": 9.0e6, "priceToEarnings": 12.0, "beta": 1.1, "qOverall": 0.64},
    {"ticker": "XOM", "name": "Exxon Mobil", "sector": "Energy", "assetClass": "Equity",
     "size": 4.6e11, "volume": 1.6e7, "priceToEarnings": 13.5, "beta": 0.9, "qOverall": 0.0},
    {"ticker": "SMOL", "name": "Small Co", "sector": "Industrials", "assetClass": "Equity",
     "size": 4.0e8, "volume": 1.5e5, "priceToEarnings": 45.0},
    {"ticker": "VTI", "name": "Vanguard Total Stock Market", "category": "Diversified",
     "assetClass": "ETF", "size": 1.8e12, "volume": 3.5e6, "priceToEarnings": 22.0},
    {"ticker": "XLE", "name": "Energy Select Sector SPDR", "category": "Energy",
     "assetClass": "ETF", "size": 3.5e10, "volume": 1.5e7, "priceToEarnings": 14.0}
]"#;

const PORTFOLIOS: &str = r#"{
    "p1": {"title": "All Weather", "primaryAssetClass": "ETF", "tags": [3, 5], "favourites": 120,
           "cagr": 0.07, "oneYearGrowth": 0.09, "alpha": 0.001, "sharpe": 0.45, "maxDrawdown": 0.12},
    "p2": {"title": "Mag Seven", "primaryAssetClass": "Equity", "tags": ["Growth", "Large Cap"],
           "favourites": 340, "cagr": 0.31, "oneYearGrowth": 0.42, "alpha": 0.06, "sharpe": 1.1,
           "maxDrawdown": 0.35},
    "p3": {"title": "Dividend Mix", "primaryClass": "Mixed", "tags": [2], "favourites": 57,
           "cagr": 0.0, "alpha": 0.0}
}"#;

fn tickers(screener: &Screener) -> Vec<String> {
    screener
        .table()
        .sorted_rows()
        .map(|asset| asset.ticker.clone())
        .collect()
}

fn titles(screener: &PortfolioScreener) -> Vec<String> {
    screener
        .table()
        .sorted_rows()
        .map(|p| p.title.clone())
        .collect()
}

// ============================================================================
// Asset screener
// ============================================================================

#[test]
fn test_screener_defaults() {
    let screener = Screener::new(parse_assets(ASSETS).unwrap());
    assert_eq!(tickers(&screener), vec!["AAPL", "JPM", "XOM", "SMOL"]);

    let sort = screener.table().sort();
    assert_eq!(sort.order_for(&AssetColumn::Metric(Metric::Size)), SortOrder::Desc);
    assert_eq!(screener.table().config().rows_per_page, 25);
}

#[test]
fn test_controls_combine_with_and() {
    let mut screener = Screener::new(parse_assets(ASSETS).unwrap());
    screener.select_by_name("beta", "Average").unwrap();
    assert_eq!(tickers(&screener), vec!["AAPL", "JPM", "XOM"]);

    screener.select_by_name("size", "Mega").unwrap();
    assert_eq!(tickers(&screener), vec!["AAPL", "JPM"]);

    screener.set_sectors(["Energy", "Technology"]).unwrap();
    assert_eq!(tickers(&screener), vec!["AAPL"]);

    let ids: Vec<&str> = screener.table().filters().iter().map(|f| f.id()).collect();
    assert_eq!(ids, vec!["beta", "size", SECTOR_FILTER]);
}

#[test]
fn test_grid_label_and_dismiss() {
    let mut screener = Screener::new(parse_assets(ASSETS).unwrap());
    screener.set_grid(&[0, 1, 2, 4]).unwrap();

    let filter = screener.table().filters().get(GRID_FILTER).unwrap();
    assert_eq!(filter.label(), Some("Large or Mid – Core"));
    assert_eq!(tickers(&screener), vec!["AAPL", "JPM", "XOM"]);

    assert!(screener.dismiss(GRID_FILTER));
    assert!(screener.grid().is_empty());
    assert_eq!(screener.table().filtered_len(), 4);
}

#[test]
fn test_zero_q_score_sorts_last() {
    let mut screener = Screener::new(parse_assets(ASSETS).unwrap());
    screener
        .table_mut()
        .toggle_sort(AssetColumn::Metric(Metric::QOverall));
    assert_eq!(tickers(&screener), vec!["JPM", "AAPL", "XOM", "SMOL"]);
}

#[test]
fn test_switching_class() {
    let mut screener = Screener::new(parse_assets(ASSETS).unwrap());
    screener.select_by_name("size", "Mega").unwrap();
    screener.table_mut().go_to(3);

    screener.set_class(AssetClass::Etf);
    assert_eq!(tickers(&screener), vec!["VTI", "XLE"]);
    assert!(screener.table().filters().is_empty());
    assert_eq!(screener.table().current_page(), 1);
    assert!(screener.sectors().contains(&"Diversified"));

    screener.set_grid_by_name(["large-value"]).unwrap();
    assert_eq!(tickers(&screener), vec!["XLE"]);
}

#[test]
fn test_every_choice_label_resolves() {
    for class in [AssetClass::Equity, AssetClass::Etf] {
        let mut screener = Screener::with_class(Vec::new(), class);
        for tab in class.tabs() {
            for option in select_options(class, *tab) {
                for choice in option.choices {
                    screener
                        .select_by_name(option.column.key(), choice.label)
                        .unwrap();
                }
            }
        }
        assert_eq!(screener.table().view().state, TableState::NoResults);
    }
}

// ============================================================================
// Portfolio screener
// ============================================================================

#[test]
fn test_portfolio_defaults() {
    let screener = PortfolioScreener::new(parse_portfolios(PORTFOLIOS).unwrap());
    assert_eq!(titles(&screener), vec!["Mag Seven", "All Weather", "Dividend Mix"]);
}

#[test]
fn test_portfolio_selects_are_strict() {
    let mut screener = PortfolioScreener::new(parse_portfolios(PORTFOLIOS).unwrap());
    screener.select_by_name("alpha", "> 0%").unwrap();
    assert_eq!(titles(&screener), vec!["Mag Seven", "All Weather"]);

    screener.select_by_name("primaryAssetClass", "Equity").unwrap();
    assert_eq!(titles(&screener), vec!["Mag Seven"]);

    screener.select_by_name("primaryAssetClass", "Any").unwrap();
    screener.select_by_name("alpha", "Any").unwrap();
    screener.select_by_name("primaryAssetClass", "Mixed").unwrap();
    assert_eq!(titles(&screener), vec!["Dividend Mix"]);
}

#[test]
fn test_portfolio_tags() {
    let mut screener = PortfolioScreener::new(parse_portfolios(PORTFOLIOS).unwrap());
    screener.set_tags([PortfolioTag::Dividend, PortfolioTag::Balanced]);
    assert_eq!(titles(&screener), vec!["All Weather", "Dividend Mix"]);
    assert_eq!(
        screener.table().filters().get(TAG_FILTER).unwrap().label(),
        Some("Dividend or Balanced")
    );

    screener.set_tags([]);
    assert_eq!(screener.table().filtered_len(), 3);
}
