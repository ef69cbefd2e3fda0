//! The equity and ETF screener.

use std::collections::HashMap;

use crate::error::SelectError;
use crate::model::Asset;
use crate::model::AssetClass;
use crate::model::AssetColumn;
use crate::model::AssetTab;
use crate::model::Metric;
use crate::ranking::peer_heading;
use crate::table::ColumnKind;
use crate::table::ColumnSpec;
use crate::table::Filter;
use crate::table::TableConfig;
use crate::table::TableEngine;

use super::SelectOption;
use super::build_grid_label;
use super::grid;
use super::select_options;

/// Filter id of the sector tags.
pub const SECTOR_FILTER: &str = "sector";

/// Filter id of the style grid.
pub const GRID_FILTER: &str = "grid";

const SECTORS: [&str; 10] = [
    "Technology",
    "Financial Services",
    "Consumer Cyclical",
    "Healthcare",
    "Communication Services",
    "Energy",
    "Utilities",
    "Industrials",
    "Consumer Defensive",
    "Basic Materials",
];

/// Sector (equity) or category (ETF) names offered as tags.
pub fn sector_names(class: AssetClass) -> Vec<&'static str> {
    let mut names = SECTORS.to_vec();
    names.push(match class {
        AssetClass::Equity => "Real Estate",
        AssetClass::Etf => "Diversified",
    });
    names
}

/// Default asset table: ticker, name, sector, size, volume and overall Q-score,
/// 25 rows per page, largest first.
pub fn asset_table_config(class: AssetClass) -> TableConfig<AssetColumn> {
    TableConfig::new(vec![
        ColumnSpec::new(AssetColumn::Ticker, "Ticker").with_kind(ColumnKind::Ticker),
        ColumnSpec::new(AssetColumn::Name, "Name"),
        ColumnSpec::new(AssetColumn::Sector, peer_heading(class)),
        ColumnSpec::new(AssetColumn::Metric(Metric::Size), class.size_label())
            .with_kind(ColumnKind::Number),
        ColumnSpec::new(AssetColumn::Metric(Metric::Volume), "Volume")
            .with_kind(ColumnKind::Number),
        ColumnSpec::new(AssetColumn::Metric(Metric::QOverall), "Q-Score")
            .with_kind(ColumnKind::Ranking),
    ])
    .with_rows_per_page(25)
    .with_default_sort(AssetColumn::Metric(Metric::Size))
    .with_hints(true)
}

/// Screens one asset class at a time.
///
/// Every control (select, sector tags, style grid) owns exactly one filter in
/// the table, keyed by the control's id. Choosing `Any`, clearing the tags or
/// selecting none or all grid cells removes the filter again, and
/// [`Screener::dismiss`] resets the control behind a filter.
///
/// # Example
///
/// ```
/// use quantix_lib::model::{Asset, AssetClass, Metric};
/// use quantix_lib::screener::Screener;
///
/// let assets = vec![
///     Asset::new("AAPL", "Apple", AssetClass::Equity).with_metric(Metric::Size, 3e12),
///     Asset::new("ACME", "Acme", AssetClass::Equity).with_metric(Metric::Size, 4e8),
///     Asset::new("VTI", "Total Market", AssetClass::Etf).with_metric(Metric::Size, 4e11),
/// ];
/// let mut screener = Screener::new(assets);
/// assert_eq!(screener.table().filtered_len(), 2);
///
/// screener.select_by_name("size", "Mega").unwrap();
/// assert_eq!(screener.table().view().rows[0].ticker, "AAPL");
/// assert_eq!(screener.table().filtered_len(), 1);
/// ```
pub struct Screener {
    class: AssetClass,
    tab: AssetTab,
    universe: HashMap<AssetClass, Vec<Asset>>,
    table: TableEngine<Asset>,
    selects: HashMap<Metric, usize>,
    sectors: Vec<String>,
    grid: Vec<usize>,
}

impl Screener {
    /// Creates a screener over `assets`, showing equities.
    pub fn new(assets: Vec<Asset>) -> Self {
        Self::with_class(assets, AssetClass::Equity)
    }

    /// Creates a screener over `assets`, showing `class`.
    pub fn with_class(assets: Vec<Asset>, class: AssetClass) -> Self {
        let mut universe: HashMap<AssetClass, Vec<Asset>> = HashMap::new();
        for asset in assets {
            universe.entry(asset.asset_class).or_default().push(asset);
        }
        let rows = universe.get(&class).cloned().unwrap_or_default();
        log::debug!("Screening {} {} assets", rows.len(), class);

        Self {
            class,
            tab: AssetTab::Profile,
            universe,
            table: TableEngine::new(rows, asset_table_config(class)),
            selects: HashMap::new(),
            sectors: Vec::new(),
            grid: Vec::new(),
        }
    }

    // =========================================================================
    // Class and tab
    // =========================================================================

    /// Returns the screened asset class.
    pub fn class(&self) -> AssetClass {
        self.class
    }

    /// Switches asset class, resetting every control, the sort and the page.
    pub fn set_class(&mut self, class: AssetClass) {
        if class == self.class {
            return;
        }
        log::debug!("Switching screener from {} to {}", self.class, class);
        self.class = class;
        self.tab = AssetTab::Profile;
        self.selects.clear();
        self.sectors.clear();
        self.grid.clear();
        let rows = self.universe.get(&class).cloned().unwrap_or_default();
        self.table = TableEngine::new(rows, asset_table_config(class));
    }

    /// Returns the selected tab.
    pub fn tab(&self) -> AssetTab {
        self.tab
    }

    /// Selects a tab. Funds have no fundamentals tabs.
    pub fn set_tab(&mut self, tab: AssetTab) -> Result<(), SelectError> {
        if !self.class.tabs().contains(&tab) {
            return Err(SelectError::unknown_name("tab", tab.as_str()));
        }
        self.tab = tab;
        Ok(())
    }

    // =========================================================================
    // Selects
    // =========================================================================

    /// Selects shown on the current tab.
    pub fn options(&self) -> Vec<SelectOption<Metric>> {
        select_options(self.class, self.tab)
    }

    /// Finds the select for `metric` on any tab of the current class.
    pub fn option(&self, metric: Metric) -> Result<SelectOption<Metric>, SelectError> {
        self.class
            .tabs()
            .iter()
            .flat_map(|tab| select_options(self.class, *tab))
            .find(|option| option.column == metric)
            .ok_or_else(|| SelectError::UnknownColumn(metric.key().to_string()))
    }

    /// Returns the chosen index of a select; 0 is `Any`.
    pub fn selection(&self, metric: Metric) -> usize {
        self.selects.get(&metric).copied().unwrap_or(0)
    }

    /// Chooses `index` on the select for `metric`.
    ///
    /// Index 0 (`Any`) removes the filter.
    pub fn select(&mut self, metric: Metric, index: usize) -> Result<(), SelectError> {
        let option = self.option(metric)?;
        let Some(&choice) = option.choices.get(index) else {
            return Err(SelectError::unknown_choice(metric.key(), index.to_string()));
        };

        if choice.is_any() {
            self.selects.remove(&metric);
            self.table.remove_filter(metric.key());
            return Ok(());
        }

        self.selects.insert(metric, index);
        self.table.insert_filter(
            Filter::new(metric.key(), move |asset: &Asset| {
                choice.fits_value(asset.metric(metric))
            })
            .with_display(option.label)
            .with_label(choice.label),
        );
        Ok(())
    }

    /// Chooses a select by column key and choice label, e.g. `("beta", "Weak")`.
    pub fn select_by_name(&mut self, key: &str, label: &str) -> Result<(), SelectError> {
        let metric: Metric = key.parse()?;
        let option = self.option(metric)?;
        let index = option
            .choice_index(label)
            .ok_or_else(|| SelectError::unknown_choice(key, label))?;
        self.select(metric, index)
    }

    // =========================================================================
    // Sector tags
    // =========================================================================

    /// Sector (or category) names available for the current class.
    pub fn sectors(&self) -> Vec<&'static str> {
        sector_names(self.class)
    }

    /// Returns the selected sectors.
    pub fn selected_sectors(&self) -> &[String] {
        &self.sectors
    }

    /// Keeps only assets in one of `names`. An empty list removes the filter.
    ///
    /// Names match case-insensitively against [`Screener::sectors`].
    pub fn set_sectors<I, S>(&mut self, names: I) -> Result<(), SelectError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let available = self.sectors();
        let mut selected: Vec<String> = Vec::new();
        for name in names {
            let name = name.as_ref().trim();
            let canonical = available
                .iter()
                .find(|sector| sector.eq_ignore_ascii_case(name))
                .ok_or_else(|| SelectError::unknown_name("sector", name))?;
            if !selected.iter().any(|s| s == canonical) {
                selected.push((*canonical).to_string());
            }
        }

        self.sectors = selected;
        if self.sectors.is_empty() {
            self.table.remove_filter(SECTOR_FILTER);
            return Ok(());
        }

        let wanted = self.sectors.clone();
        self.table.insert_filter(
            Filter::new(SECTOR_FILTER, move |asset: &Asset| {
                asset
                    .sector
                    .as_deref()
                    .is_some_and(|sector| wanted.iter().any(|w| w == sector))
            })
            .with_display(peer_heading(self.class))
            .with_label(self.sectors.join(" or ")),
        );
        Ok(())
    }

    // =========================================================================
    // Style grid
    // =========================================================================

    /// Returns the selected grid cells, row-major.
    pub fn grid(&self) -> &[usize] {
        &self.grid
    }

    /// Keeps only assets in one of the selected grid cells.
    ///
    /// Selecting no cell or all nine removes the filter.
    pub fn set_grid(&mut self, cells: &[usize]) -> Result<(), SelectError> {
        if let Some(bad) = cells.iter().find(|&&cell| cell >= grid::GRID_CELLS) {
            return Err(SelectError::unknown_name("grid cell", bad.to_string()));
        }
        let mut cells = cells.to_vec();
        cells.sort_unstable();
        cells.dedup();
        self.grid = cells;

        if !grid::grid_is_active(&self.grid) {
            self.table.remove_filter(GRID_FILTER);
            return Ok(());
        }

        let class = self.class;
        let selected = self.grid.clone();
        self.table.insert_filter(
            Filter::new(GRID_FILTER, move |asset: &Asset| {
                selected
                    .iter()
                    .any(|&cell| grid::fits_grid_cell(class, cell, asset))
            })
            .with_display("Category")
            .with_label(build_grid_label(class, &self.grid)),
        );
        Ok(())
    }

    /// Selects grid cells by name, e.g. `["large-value", "mid-core"]`.
    pub fn set_grid_by_name<I, S>(&mut self, names: I) -> Result<(), SelectError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let cells = names
            .into_iter()
            .map(|name| grid::parse_cell(self.class, name.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        self.set_grid(&cells)
    }

    // =========================================================================
    // Filters
    // =========================================================================

    /// Removes the filter `id` and resets the control that created it.
    ///
    /// Returns `false` if no such filter is active.
    pub fn dismiss(&mut self, id: &str) -> bool {
        if self.table.remove_filter(id).is_none() {
            return false;
        }
        match id {
            SECTOR_FILTER => self.sectors.clear(),
            GRID_FILTER => self.grid.clear(),
            key => {
                if let Ok(metric) = key.parse::<Metric>() {
                    self.selects.remove(&metric);
                }
            }
        }
        true
    }

    /// Resets every control.
    pub fn reset(&mut self) {
        self.selects.clear();
        self.sectors.clear();
        self.grid.clear();
        self.table.clear_filters();
    }

    /// Returns the result table.
    pub fn table(&self) -> &TableEngine<Asset> {
        &self.table
    }

    /// Returns the result table for sorting and paging.
    pub fn table_mut(&mut self) -> &mut TableEngine<Asset> {
        &mut self.table
    }
}
