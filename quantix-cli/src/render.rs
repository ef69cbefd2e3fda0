//! Terminal output: tables, filter pills and ranking bars.

use std::io;
use std::io::Write;

use crossterm::queue;
use crossterm::style::Attribute;
use crossterm::style::Color;
use crossterm::style::Print;
use crossterm::style::ResetColor;
use crossterm::style::SetAttribute;
use crossterm::style::SetForegroundColor;
use quantix_lib::format::FormattedCell;
use quantix_lib::format::Tone;
use quantix_lib::format::format_cell;
use quantix_lib::format::format_large_number;
use quantix_lib::model::Asset;
use quantix_lib::model::AssetTab;
use quantix_lib::model::TableRow;
use quantix_lib::ranking::RankingDisplay;
use quantix_lib::ranking::RankingRow;
use quantix_lib::ranking::peer_heading;
use quantix_lib::table::ColumnKind;
use quantix_lib::table::FilterSet;
use quantix_lib::table::PageItem;
use quantix_lib::table::SortOrder;
use quantix_lib::table::TableView;

const GOOD: Color = Color::Rgb { r: 0, g: 150, b: 80 };
const BAD: Color = Color::Rgb { r: 200, g: 30, b: 30 };
const MUTED: Color = Color::DarkGrey;
const COLUMN_GAP: &str = "  ";

/// Renders tables and ranking bars to any writer.
pub struct Renderer {
    bar_width: usize,
}

impl Renderer {
    pub fn new(bar_width: usize) -> Self {
        Self {
            bar_width: bar_width.max(1),
        }
    }

    // =========================================================================
    // Pieces
    // =========================================================================

    /// Draws a ranking bar: a colored block run followed by the label.
    pub fn bar(&self, out: &mut impl Write, display: &RankingDisplay) -> io::Result<()> {
        let filled = display.filled_cells(self.bar_width);
        let color = Color::Rgb {
            r: display.color.red,
            g: display.color.green,
            b: display.color.blue,
        };
        queue!(
            out,
            SetForegroundColor(color),
            Print("█".repeat(filled)),
            ResetColor,
            Print(" ".repeat(self.bar_width - filled)),
            Print(format!(" {:>3}", display.label)),
        )
    }

    fn bar_column_width(&self) -> usize {
        self.bar_width + 4
    }

    fn cell(&self, out: &mut impl Write, cell: &FormattedCell, width: usize) -> io::Result<()> {
        if let Some(display) = &cell.ranking {
            self.bar(out, display)?;
            return pad(out, self.bar_column_width(), width);
        }

        let text = fit(&cell.text, width);
        match cell.tone {
            Tone::Plain => queue!(out, Print(&text))?,
            Tone::Good => queue!(out, SetForegroundColor(GOOD), Print(&text), ResetColor)?,
            Tone::Bad => queue!(out, SetForegroundColor(BAD), Print(&text), ResetColor)?,
        }
        pad(out, text.chars().count(), width)
    }

    /// Active filters as `Display: label` pills.
    pub fn filters<R>(&self, out: &mut impl Write, filters: &FilterSet<R>) -> io::Result<()> {
        if filters.is_empty() {
            return Ok(());
        }
        for filter in filters.iter() {
            let display = filter.display().unwrap_or(filter.id());
            let label = filter.label().unwrap_or("");
            queue!(
                out,
                SetAttribute(Attribute::Reverse),
                Print(format!(" {}: {} ", display, label)),
                SetAttribute(Attribute::Reset),
                Print(" "),
            )?;
        }
        queue!(out, Print("\n\n"))
    }

    // =========================================================================
    // Tables
    // =========================================================================

    /// Renders one frame of a table, its summary and pager.
    pub fn table<R: TableRow>(&self, out: &mut impl Write, view: &TableView<'_, R>) -> io::Result<()> {
        if let Some(message) = view.state.message() {
            queue!(out, SetForegroundColor(MUTED), Print(message), ResetColor, Print("\n"))?;
            return out.flush();
        }

        let cells: Vec<Vec<FormattedCell>> = view
            .rows
            .iter()
            .map(|row| {
                view.columns
                    .iter()
                    .map(|spec| format_cell(&row.cell(&spec.column), spec.kind))
                    .collect()
            })
            .collect();

        let headers: Vec<String> = view
            .columns
            .iter()
            .map(|spec| match view.sort.column() {
                Some(column) if *column == spec.column => {
                    format!("{} {}", spec.header, arrow(view.sort.order()))
                }
                _ => spec.header.clone(),
            })
            .collect();

        let widths: Vec<usize> = view
            .columns
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                let content = if spec.kind == ColumnKind::Ranking {
                    self.bar_column_width()
                } else {
                    cells.iter().map(|row| row[i].text.chars().count()).max().unwrap_or(0)
                };
                content.max(headers[i].chars().count())
            })
            .collect();
        let index_width = view.range.end.to_string().len().max(1);

        // Header
        queue!(out, SetAttribute(Attribute::Bold))?;
        if view.indexed {
            queue!(out, Print(format!("{:>w$}", "#", w = index_width)), Print(COLUMN_GAP))?;
        }
        for (header, width) in headers.iter().zip(&widths) {
            queue!(out, Print(format!("{:<w$}", header, w = *width)), Print(COLUMN_GAP))?;
        }
        queue!(out, SetAttribute(Attribute::Reset), Print("\n"))?;

        // Rows
        for (offset, row) in cells.iter().enumerate() {
            if view.indexed {
                let index = view.range.start + offset + 1;
                queue!(
                    out,
                    SetForegroundColor(MUTED),
                    Print(format!("{:>w$}", index, w = index_width)),
                    ResetColor,
                    Print(COLUMN_GAP),
                )?;
            }
            for (cell, width) in row.iter().zip(&widths) {
                self.cell(out, cell, *width)?;
                queue!(out, Print(COLUMN_GAP))?;
            }
            queue!(out, Print("\n"))?;
        }

        if let Some(summary) = view.summary() {
            queue!(out, Print("\n"), SetForegroundColor(MUTED), Print(summary), ResetColor, Print("\n"))?;
        }
        if !view.pages.is_empty() {
            self.pager(out, &view.pages, view.current_page)?;
        }
        if view.hints {
            queue!(
                out,
                SetForegroundColor(MUTED),
                Print("Sort with --sort <column>, page with --page <n>\n"),
                ResetColor,
            )?;
        }
        out.flush()
    }

    fn pager(&self, out: &mut impl Write, pages: &[PageItem], current: usize) -> io::Result<()> {
        let items: Vec<String> = pages
            .iter()
            .map(|item| match item {
                PageItem::Page(page) if *page == current => format!("[{}]", page),
                other => other.to_string(),
            })
            .collect();
        queue!(out, Print(items.join(" ")), Print("\n"))
    }

    // =========================================================================
    // Rankings
    // =========================================================================

    /// Renders the ranking rows of one tab for `asset`.
    pub fn ranking(
        &self,
        out: &mut impl Write,
        asset: &Asset,
        tab: AssetTab,
        rows: &[RankingRow],
    ) -> io::Result<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let label_width = rows.iter().map(|row| row.display.len()).max().unwrap_or(0);
        let value_width = rows
            .iter()
            .filter_map(|row| row.value.as_ref().map(|v| v.chars().count()))
            .max()
            .unwrap_or(0)
            .max("Value".len());

        queue!(
            out,
            SetAttribute(Attribute::Bold),
            Print(format!("{}\n", tab)),
            Print(format!(
                "{:<lw$}{gap}{:<vw$}{gap}{:<bw$}{gap}{}",
                "Metric",
                "Value",
                peer_heading(asset.asset_class),
                "Overall",
                lw = label_width,
                vw = value_width,
                bw = self.bar_column_width(),
                gap = COLUMN_GAP,
            )),
            SetAttribute(Attribute::Reset),
            Print("\n"),
        )?;

        for row in rows {
            let value = row.value.as_deref().unwrap_or("");
            queue!(
                out,
                Print(format!("{:<w$}", row.display, w = label_width)),
                Print(COLUMN_GAP),
                Print(format!("{:<w$}", value, w = value_width)),
                Print(COLUMN_GAP),
            )?;
            self.bar(out, &row.sector)?;
            queue!(out, Print(COLUMN_GAP))?;
            self.bar(out, &row.overall)?;
            queue!(out, Print("\n"))?;
        }
        queue!(out, Print("\n"))?;
        out.flush()
    }

    /// One search suggestion per line: ticker, name and size.
    pub fn suggestions(&self, out: &mut impl Write, assets: &[&Asset]) -> io::Result<()> {
        if assets.is_empty() {
            queue!(out, SetForegroundColor(MUTED), Print("No matches\n"), ResetColor)?;
            return out.flush();
        }
        let ticker_width = assets.iter().map(|a| a.ticker.len()).max().unwrap_or(0);
        for asset in assets {
            let size = asset
                .size()
                .map(|size| format_large_number(size, 2))
                .unwrap_or_default();
            queue!(
                out,
                SetAttribute(Attribute::Bold),
                Print(format!("{:<w$}", asset.ticker, w = ticker_width)),
                SetAttribute(Attribute::Reset),
                Print(COLUMN_GAP),
                Print(&asset.name),
                SetForegroundColor(MUTED),
                Print(format!("  {} {}", asset.asset_class, size)),
                ResetColor,
                Print("\n"),
            )?;
        }
        out.flush()
    }
}

fn arrow(order: SortOrder) -> &'static str {
    match order {
        SortOrder::Asc => "▲",
        SortOrder::Desc => "▼",
        SortOrder::Unsorted => "",
    }
}

fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

fn pad(out: &mut impl Write, used: usize, width: usize) -> io::Result<()> {
    if width > used {
        queue!(out, Print(" ".repeat(width - used)))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quantix_lib::model::AssetClass;
    use quantix_lib::model::Metric;
    use quantix_lib::ranking::ColorScheme;
    use quantix_lib::ranking::ranking;
    use quantix_lib::ranking::ranking_options;
    use quantix_lib::ranking::ranking_rows;
    use quantix_lib::screener::Screener;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn assets() -> Vec<Asset> {
        vec![
            Asset::new("AAPL", "Apple", AssetClass::Equity)
                .with_sector("Technology")
                .with_metric(Metric::Size, 3.4e12)
                .with_metric(Metric::QOverall, 0.81),
            Asset::new("ACME", "Acme", AssetClass::Equity)
                .with_sector("Industrials")
                .with_metric(Metric::Size, 4.0e8),
        ]
    }

    #[test]
    fn test_bar_fills_proportionally() {
        let renderer = Renderer::new(10);
        let text = render(|out| renderer.bar(out, &ranking(1.0, ColorScheme::GoodBad, None)));
        assert!(text.contains(&"█".repeat(10)));
        assert!(text.contains("100"));

        let text = render(|out| renderer.bar(out, &ranking(None::<f64>, ColorScheme::GoodBad, None)));
        assert!(text.contains("N/A"));
    }

    #[test]
    fn test_table_shows_rows_and_sort_arrow() {
        let screener = Screener::new(assets());
        let renderer = Renderer::new(10);
        let text = render(|out| renderer.table(out, &screener.table().view()));

        assert!(text.contains("Market Cap ▼"));
        assert!(text.contains("3.40T"));
        assert!(text.contains("Displaying results 1-2 of 2"));
        assert!(text.contains("N/A"));
    }

    #[test]
    fn test_empty_states_render_messages() {
        let mut screener = Screener::new(assets());
        screener.set_sectors(["Energy"]).unwrap();
        let renderer = Renderer::new(10);

        let text = render(|out| renderer.table(out, &screener.table().view()));
        assert!(text.contains("No results"));
        assert!(!text.contains("Displaying"));

        let text = render(|out| renderer.filters(out, screener.table().filters()));
        assert!(text.contains("Sector: Energy"));
    }

    #[test]
    fn test_ranking_rows_render_both_bars() {
        let asset = Asset::new("MSFT", "Microsoft", AssetClass::Equity)
            .with_metric(Metric::Beta, 0.91)
            .with_percentiles(Metric::Beta, 0.4, 0.55);
        let rows = ranking_rows(&asset, ranking_options(AssetClass::Equity, AssetTab::Risk));
        let renderer = Renderer::new(8);

        let text = render(|out| renderer.ranking(out, &asset, AssetTab::Risk, &rows));
        assert!(text.contains("Beta"));
        assert!(text.contains("0.91"));
        assert!(text.contains("Sector"));
        assert!(text.contains(" 40"));
        assert!(text.contains(" 55"));
    }

    #[test]
    fn test_fit_truncates() {
        assert_eq!(fit("Microsoft", 5), "Micr…");
        assert_eq!(fit("KO", 5), "KO");
    }
}
