//! Subcommand handlers.
//!
//! Each handler builds library state from the parsed arguments and the stored
//! preferences, then hands it to the [`Renderer`].

use std::io::Write;
use std::path::Path;

use quantix_lib::error::SelectError;
use quantix_lib::model::Asset;
use quantix_lib::model::AssetClass;
use quantix_lib::model::AssetColumn;
use quantix_lib::model::AssetTab;
use quantix_lib::model::Metric;
use quantix_lib::model::Portfolio;
use quantix_lib::model::PortfolioColumn;
use quantix_lib::model::TableRow;
use quantix_lib::model::parse_assets_lenient;
use quantix_lib::model::parse_portfolios_lenient;
use quantix_lib::ranking::ColorScheme;
use quantix_lib::ranking::RankingOption;
use quantix_lib::ranking::ranking_options;
use quantix_lib::ranking::ranking_rows;
use quantix_lib::screener::PortfolioScreener;
use quantix_lib::screener::Screener;
use quantix_lib::screener::SelectOption;
use quantix_lib::search::lookup;
use quantix_lib::table::SortSpec;
use quantix_lib::table::TableEngine;

use crate::cli::Command;
use crate::cli::ConfigAction;
use crate::cli::PortfolioArgs;
use crate::cli::RankArgs;
use crate::cli::ScreenArgs;
use crate::cli::SearchArgs;
use crate::cli::TableArgs;
use crate::cli::split_select;
use crate::error::CliError;
use crate::render::Renderer;
use crate::settings::Preferences;
use crate::settings::Setting;
use crate::settings::SettingsProvider;

/// Everything a command needs besides its arguments.
pub struct Context {
    pub settings: SettingsProvider,
    pub prefs: Preferences,
}

impl Context {
    fn renderer(&self) -> Renderer {
        Renderer::new(self.prefs.bar_width)
    }
}

/// Runs one subcommand, writing its output to `out`.
pub async fn run(command: Command, ctx: &Context, out: &mut impl Write) -> Result<(), CliError> {
    match command {
        Command::Screen(args) => {
            let assets = parse_assets_lenient(&read_dataset(&args.file).await?)?;
            let screener = screen(assets, &args, &ctx.prefs)?;
            let renderer = ctx.renderer();
            if args.options {
                write_options(out, &screener.options())?;
            } else {
                renderer.filters(out, screener.table().filters())?;
                renderer.table(out, &screener.table().view())?;
            }
        }
        Command::Portfolios(args) => {
            let portfolios = parse_portfolios_lenient(&read_dataset(&args.file).await?)?;
            let screener = screen_portfolios(portfolios, &args, &ctx.prefs)?;
            let renderer = ctx.renderer();
            if args.options {
                write_options(out, screener.options())?;
            } else {
                renderer.filters(out, screener.table().filters())?;
                renderer.table(out, &screener.table().view())?;
            }
        }
        Command::Rank(args) => {
            let assets = parse_assets_lenient(&read_dataset(&args.file).await?)?;
            rank(out, &assets, &args, ctx)?;
        }
        Command::Search(args) => {
            let assets = parse_assets_lenient(&read_dataset(&args.file).await?)?;
            search(out, &assets, &args, ctx)?;
        }
        Command::Config { action } => config(out, action, &ctx.settings).await?,
    }
    Ok(())
}

async fn read_dataset(path: &Path) -> Result<String, CliError> {
    log::info!("Loading {}", path.display());
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| CliError::io(path, e))
}

// =============================================================================
// Screeners
// =============================================================================

/// Builds an asset screener with every control from `args` applied.
pub fn screen(assets: Vec<Asset>, args: &ScreenArgs, prefs: &Preferences) -> Result<Screener, CliError> {
    let class: AssetClass = args.class.parse()?;
    let mut screener = Screener::with_class(assets, class);
    screener.set_tab(args.tab.parse()?)?;

    for select in &args.selects {
        let (key, label) = split_select(select).ok_or_else(|| CliError::InvalidSelect(select.clone()))?;
        screener.select_by_name(key, label)?;
    }
    if !args.sectors.is_empty() {
        screener.set_sectors(&args.sectors)?;
    }
    if !args.grid.is_empty() {
        screener.set_grid_by_name(&args.grid)?;
    }

    apply_table_args(screener.table_mut(), &args.table, prefs, AssetColumn::parse)?;
    Ok(screener)
}

/// Builds a portfolio screener with every control from `args` applied.
pub fn screen_portfolios(
    portfolios: Vec<Portfolio>,
    args: &PortfolioArgs,
    prefs: &Preferences,
) -> Result<PortfolioScreener, CliError> {
    let mut screener = PortfolioScreener::new(portfolios);

    for select in &args.selects {
        let (key, label) = split_select(select).ok_or_else(|| CliError::InvalidSelect(select.clone()))?;
        screener.select_by_name(key, label)?;
    }
    if !args.tags.is_empty() {
        screener.set_tags_by_name(&args.tags)?;
    }

    apply_table_args(screener.table_mut(), &args.table, prefs, PortfolioColumn::parse)?;
    Ok(screener)
}

/// Applies rows per page, sort and page, in that order so the page is clamped
/// against the final layout.
fn apply_table_args<R: TableRow>(
    table: &mut TableEngine<R>,
    args: &TableArgs,
    prefs: &Preferences,
    parse_column: impl Fn(&str) -> Option<R::Column>,
) -> Result<(), CliError> {
    let rows = args.rows.map(|n| n as usize).or(prefs.rows_per_page);
    if let Some(rows) = rows {
        table.set_rows_per_page(rows);
    }

    if let Some(key) = &args.sort {
        let column = parse_column(key).ok_or_else(|| SelectError::UnknownColumn(key.clone()))?;
        table.set_sort(if args.asc {
            SortSpec::asc(column)
        } else {
            SortSpec::desc(column)
        });
    }

    if !table.go_to_input(&args.page) {
        log::warn!("Ignoring page '{}'", args.page);
    }
    Ok(())
}

fn write_options<C: Copy + Into<OptionKey>>(out: &mut impl Write, options: &[SelectOption<C>]) -> Result<(), CliError> {
    for option in options {
        let key: OptionKey = option.column.into();
        let labels: Vec<&str> = option.choices.iter().map(|choice| choice.label).collect();
        writeln!(out, "{} ({}): {}", option.label, key.0, labels.join(" | "))?;
    }
    Ok(())
}

/// Column key of a select, for listing.
struct OptionKey(&'static str);

impl From<Metric> for OptionKey {
    fn from(metric: Metric) -> Self {
        OptionKey(metric.key())
    }
}

impl From<PortfolioColumn> for OptionKey {
    fn from(column: PortfolioColumn) -> Self {
        OptionKey(column.key())
    }
}

// =============================================================================
// Rankings and search
// =============================================================================

fn rank(out: &mut impl Write, assets: &[Asset], args: &RankArgs, ctx: &Context) -> Result<(), CliError> {
    let asset = assets
        .iter()
        .find(|asset| asset.ticker.eq_ignore_ascii_case(&args.ticker))
        .ok_or_else(|| CliError::UnknownTicker(args.ticker.clone()))?;

    let tabs: Vec<AssetTab> = match &args.tab {
        Some(tab) => vec![tab.parse()?],
        None => asset.asset_class.tabs().to_vec(),
    };

    writeln!(out, "{} - {} ({})\n", asset.ticker, asset.name, asset.asset_class)?;
    let renderer = ctx.renderer();
    for tab in tabs {
        let options = scheme_options(ranking_options(asset.asset_class, tab), ctx.prefs.scheme);
        let rows = ranking_rows(asset, &options);
        renderer.ranking(out, asset, tab, &rows)?;
    }
    Ok(())
}

/// Forces every option onto `scheme` when one is set.
fn scheme_options(options: &[RankingOption], scheme: Option<ColorScheme>) -> Vec<RankingOption> {
    options
        .iter()
        .map(|option| match scheme {
            Some(scheme) => RankingOption {
                good_bad: scheme == ColorScheme::GoodBad,
                ..*option
            },
            None => *option,
        })
        .collect()
}

fn search(out: &mut impl Write, assets: &[Asset], args: &SearchArgs, ctx: &Context) -> Result<(), CliError> {
    let hits: Vec<&Asset> = lookup(&args.query, assets).into_iter().take(args.limit).collect();
    log::debug!("Search '{}' matched {} assets", args.query, hits.len());
    ctx.renderer().suggestions(out, &hits)?;
    Ok(())
}

// =============================================================================
// Preferences
// =============================================================================

async fn config(out: &mut impl Write, action: ConfigAction, settings: &SettingsProvider) -> Result<(), CliError> {
    match action {
        ConfigAction::Get { key: Some(key) } => {
            let setting: Setting = key.parse()?;
            write_setting(out, setting, settings).await?;
        }
        ConfigAction::Get { key: None } => {
            for setting in Setting::ALL {
                write_setting(out, setting, settings).await?;
            }
            for key in settings.keys_with_prefix("").await? {
                if key.parse::<Setting>().is_err() {
                    log::warn!("Unrecognized preference '{}' in {}", key, settings.location());
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let setting: Setting = key.parse()?;
            setting.store(settings, &value).await?;
            log::info!("Set {} to {}", setting, value);
            write_setting(out, setting, settings).await?;
        }
        ConfigAction::Unset { key } => {
            let setting: Setting = key.parse()?;
            settings.delete(setting.key()).await?;
            log::info!("Unset {}", setting);
        }
    }
    Ok(())
}

async fn write_setting(out: &mut impl Write, setting: Setting, settings: &SettingsProvider) -> Result<(), CliError> {
    match setting.load(settings).await? {
        Some(value) => writeln!(out, "{} = {}", setting, value)?,
        None => writeln!(out, "{} (not set)", setting)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::settings::MemoryBackend;
    use clap::Parser;
    use quantix_lib::model::parse_assets;

    const ASSETS: &str = r#"[
        {"ticker": "AAPL", "name": "Apple Inc.", "sector": "Technology", "assetClass": "Equity",
         "size": 3.4e12, "volume": 5.2e7, "beta": 1.2, "betaPS": 0.7, "betaPO": 0.8, "qOverall": 0.81},
        {"ticker": "XOM", "name": "Exxon Mobil", "sector": "Energy", "assetClass": "Equity",
         "size": 5.6e11, "volume": 1.6e7, "beta": 0.9, "qOverall": 0.4},
        {"ticker": "SMOL", "name": "Small Co", "sector": "Industrials", "assetClass": "Equity",
         "size": 4.0e8, "volume": 1.5e5},
        {"ticker": "XLE", "name": "Energy Select Sector SPDR", "category": "Energy",
         "assetClass": "ETF", "size": 3.5e10, "volume": 1.5e7}
    ]"#;

    fn context() -> Context {
        Context {
            settings: SettingsProvider::new(MemoryBackend::new()),
            prefs: Preferences::default(),
        }
    }

    fn parse(args: &[&str]) -> Command {
        let mut argv = vec!["quantix"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().command
    }

    fn screen_args(args: &[&str]) -> ScreenArgs {
        match parse(args) {
            Command::Screen(args) => args,
            other => panic!("expected screen, got {:?}", other),
        }
    }

    fn tickers(screener: &Screener) -> Vec<String> {
        screener
            .table()
            .sorted_rows()
            .map(|asset| asset.ticker.clone())
            .collect()
    }

    #[test]
    fn test_screen_applies_controls() {
        let args = screen_args(&["screen", "a.json", "-s", "size=Mega", "--sort", "volume", "--asc"]);
        let screener = screen(parse_assets(ASSETS).unwrap(), &args, &Preferences::default()).unwrap();
        assert_eq!(tickers(&screener), vec!["XOM", "AAPL"]);
    }

    #[test]
    fn test_rows_flag_overrides_preference() {
        let prefs = Preferences {
            rows_per_page: Some(2),
            ..Preferences::default()
        };
        let args = screen_args(&["screen", "a.json", "--page", "9"]);
        let screener = screen(parse_assets(ASSETS).unwrap(), &args, &prefs).unwrap();
        assert_eq!(screener.table().config().rows_per_page, 2);
        assert_eq!(screener.table().total_pages(), 2);
        assert_eq!(screener.table().current_page(), 2);

        let args = screen_args(&["screen", "a.json", "--rows", "1"]);
        let screener = screen(parse_assets(ASSETS).unwrap(), &args, &prefs).unwrap();
        assert_eq!(screener.table().total_pages(), 3);
    }

    #[test]
    fn test_bad_select_is_reported() {
        let args = screen_args(&["screen", "a.json", "-s", "size"]);
        assert!(matches!(
            screen(parse_assets(ASSETS).unwrap(), &args, &Preferences::default()),
            Err(CliError::InvalidSelect(_))
        ));

        let args = screen_args(&["screen", "a.json", "--sort", "nope"]);
        assert!(matches!(
            screen(parse_assets(ASSETS).unwrap(), &args, &Preferences::default()),
            Err(CliError::Select(SelectError::UnknownColumn(_)))
        ));
    }

    #[test]
    fn test_scheme_override() {
        let options = ranking_options(AssetClass::Equity, AssetTab::Growth);
        assert!(scheme_options(options, Some(ColorScheme::Neutral))
            .iter()
            .all(|option| !option.good_bad));
        assert_eq!(scheme_options(options, None), options.to_vec());
    }

    #[tokio::test]
    async fn test_run_reads_dataset_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assets.json");
        std::fs::write(&path, ASSETS).unwrap();
        let file = path.to_string_lossy().to_string();

        let mut out = Vec::new();
        run(parse(&["rank", &file, "aapl", "--tab", "risk"]), &context(), &mut out)
            .await
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("AAPL - Apple Inc."));
        assert!(text.contains("Beta"));

        let mut out = Vec::new();
        run(parse(&["search", &file, "exxon"]), &context(), &mut out)
            .await
            .unwrap();
        assert!(String::from_utf8(out).unwrap().contains("XOM"));
    }

    #[tokio::test]
    async fn test_missing_file_and_ticker() {
        let mut out = Vec::new();
        let result = run(parse(&["search", "/no/such/file.json", "x"]), &context(), &mut out).await;
        assert!(matches!(result, Err(CliError::Io { .. })));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assets.json");
        std::fs::write(&path, ASSETS).unwrap();
        let file = path.to_string_lossy().to_string();
        let result = run(parse(&["rank", &file, "MSFT"]), &context(), &mut out).await;
        assert!(matches!(result, Err(CliError::UnknownTicker(_))));
    }

    #[tokio::test]
    async fn test_config_round_trip() {
        let ctx = context();
        let mut out = Vec::new();
        run(parse(&["config", "set", "rows-per-page", "10"]), &ctx, &mut out)
            .await
            .unwrap();
        run(parse(&["config", "get"]), &ctx, &mut out).await.unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("rows-per-page = 10"));
        assert!(text.contains("scheme (not set)"));

        let mut out = Vec::new();
        run(parse(&["config", "unset", "rows-per-page"]), &ctx, &mut out)
            .await
            .unwrap();
        run(parse(&["config", "get", "rows-per-page"]), &ctx, &mut out)
            .await
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "rows-per-page (not set)\n");
    }
}
