//! The portfolio screener.

use std::collections::HashMap;

use crate::error::SelectError;
use crate::model::Metric;
use crate::model::Portfolio;
use crate::model::PortfolioColumn;
use crate::model::PortfolioTag;
use crate::model::TableRow;
use crate::table::ColumnKind;
use crate::table::ColumnSpec;
use crate::table::Filter;
use crate::table::TableConfig;
use crate::table::TableEngine;

use super::SelectOption;
use super::portfolio_select_options;

/// Filter id of the tag pills.
pub const TAG_FILTER: &str = "tags";

/// Default portfolio table: 50 indexed rows, most favourited first.
pub fn portfolio_table_config() -> TableConfig<PortfolioColumn> {
    let metric = |metric: Metric, header: &str, kind: ColumnKind| {
        ColumnSpec::new(PortfolioColumn::Metric(metric), header).with_kind(kind)
    };
    TableConfig::new(vec![
        ColumnSpec::new(PortfolioColumn::Title, "Name"),
        ColumnSpec::new(PortfolioColumn::PrimaryAssetClass, "Asset Class"),
        metric(Metric::OneYearGrowth, "YoY Return", ColumnKind::Percent),
        metric(Metric::ThreeMonthGrowth, "3mo Return", ColumnKind::Percent),
        metric(Metric::Cagr, "CAGR", ColumnKind::Percent),
        metric(Metric::Sharpe, "Sharpe", ColumnKind::Percent),
        metric(Metric::Alpha, "Alpha", ColumnKind::Percent),
        metric(Metric::MaxDrawdown, "Max Drawdown", ColumnKind::NeutralPercent),
    ])
    .with_rows_per_page(50)
    .with_default_sort(PortfolioColumn::Favourites)
    .with_empty_message("No portfolios found...")
    .with_hints(true)
    .with_indexed(true)
}

/// Screens published portfolios by metric ranges, asset class and tags.
pub struct PortfolioScreener {
    table: TableEngine<Portfolio>,
    selects: HashMap<PortfolioColumn, usize>,
    tags: Vec<PortfolioTag>,
}

impl PortfolioScreener {
    /// Creates a screener over `portfolios`.
    pub fn new(portfolios: Vec<Portfolio>) -> Self {
        log::debug!("Screening {} portfolios", portfolios.len());
        Self {
            table: TableEngine::new(portfolios, portfolio_table_config()),
            selects: HashMap::new(),
            tags: Vec::new(),
        }
    }

    /// The selects, in display order.
    pub fn options(&self) -> &'static [SelectOption<PortfolioColumn>] {
        portfolio_select_options()
    }

    fn option(&self, column: PortfolioColumn) -> Result<SelectOption<PortfolioColumn>, SelectError> {
        self.options()
            .iter()
            .find(|option| option.column == column)
            .copied()
            .ok_or_else(|| SelectError::UnknownColumn(column.key().to_string()))
    }

    /// Returns the chosen index of a select; 0 is `Any`.
    pub fn selection(&self, column: PortfolioColumn) -> usize {
        self.selects.get(&column).copied().unwrap_or(0)
    }

    /// Chooses `index` on the select for `column`. Index 0 removes the filter.
    pub fn select(&mut self, column: PortfolioColumn, index: usize) -> Result<(), SelectError> {
        let option = self.option(column)?;
        let Some(&choice) = option.choices.get(index) else {
            return Err(SelectError::unknown_choice(column.key(), index.to_string()));
        };

        if choice.is_any() {
            self.selects.remove(&column);
            self.table.remove_filter(column.key());
            return Ok(());
        }

        self.selects.insert(column, index);
        self.table.insert_filter(
            Filter::new(column.key(), move |portfolio: &Portfolio| {
                choice.fits_cell(&portfolio.cell(&column))
            })
            .with_display(option.label)
            .with_label(choice.label),
        );
        Ok(())
    }

    /// Chooses a select by column key and choice label, e.g. `("cagr", "> 10%")`.
    pub fn select_by_name(&mut self, key: &str, label: &str) -> Result<(), SelectError> {
        let column =
            PortfolioColumn::parse(key).ok_or_else(|| SelectError::UnknownColumn(key.to_string()))?;
        let option = self.option(column)?;
        let index = option
            .choice_index(label)
            .ok_or_else(|| SelectError::unknown_choice(key, label))?;
        self.select(column, index)
    }

    /// Returns the selected tags.
    pub fn tags(&self) -> &[PortfolioTag] {
        &self.tags
    }

    /// Keeps portfolios carrying any of `tags`. An empty list removes the filter.
    pub fn set_tags(&mut self, tags: impl IntoIterator<Item = PortfolioTag>) {
        self.tags.clear();
        for tag in tags {
            if !self.tags.contains(&tag) {
                self.tags.push(tag);
            }
        }

        if self.tags.is_empty() {
            self.table.remove_filter(TAG_FILTER);
            return;
        }

        let wanted = self.tags.clone();
        let label = self
            .tags
            .iter()
            .map(|tag| tag.label())
            .collect::<Vec<_>>()
            .join(" or ");
        self.table.insert_filter(
            Filter::new(TAG_FILTER, move |portfolio: &Portfolio| {
                portfolio.tags.iter().any(|tag| wanted.contains(tag))
            })
            .with_display("Tags")
            .with_label(label),
        );
    }

    /// Parses tag names and applies them with [`PortfolioScreener::set_tags`].
    pub fn set_tags_by_name<I, S>(&mut self, names: I) -> Result<(), SelectError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tags = names
            .into_iter()
            .map(|name| name.as_ref().parse::<PortfolioTag>())
            .collect::<Result<Vec<_>, _>>()?;
        self.set_tags(tags);
        Ok(())
    }

    /// Removes the filter `id` and resets the control that created it.
    pub fn dismiss(&mut self, id: &str) -> bool {
        if self.table.remove_filter(id).is_none() {
            return false;
        }
        if id == TAG_FILTER {
            self.tags.clear();
        } else if let Some(column) = PortfolioColumn::parse(id) {
            self.selects.remove(&column);
        }
        true
    }

    /// Returns the result table.
    pub fn table(&self) -> &TableEngine<Portfolio> {
        &self.table
    }

    /// Returns the result table for sorting and paging.
    pub fn table_mut(&mut self) -> &mut TableEngine<Portfolio> {
        &mut self.table
    }
}
