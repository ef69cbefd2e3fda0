//! Command-line arguments.

use std::path::PathBuf;

use clap::Args;
use clap::Parser;
use clap::Subcommand;

/// Screen equities, ETFs and portfolios from exported datasets.
#[derive(Parser, Debug)]
#[command(name = "quantix", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log debug output to the log file
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Filter, sort and page an asset export
    Screen(ScreenArgs),
    /// Filter, sort and page a portfolio export
    Portfolios(PortfolioArgs),
    /// Show the percentile rankings of one asset
    Rank(RankArgs),
    /// Find assets by ticker or name
    Search(SearchArgs),
    /// Read or change stored preferences
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sorting and paging shared by both screeners.
#[derive(Args, Debug)]
pub struct TableArgs {
    /// Column key to sort by, descending unless --asc is given
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort ascending instead of descending
    #[arg(long, requires = "sort")]
    pub asc: bool,

    /// Page to show; out-of-range numbers are clamped
    #[arg(long, default_value = "1")]
    pub page: String,

    /// Rows per page, overriding the stored preference
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub rows: Option<u32>,
}

#[derive(Args, Debug)]
pub struct ScreenArgs {
    /// JSON array of exported asset rows
    pub file: PathBuf,

    /// Asset class to screen
    #[arg(long, default_value = "equity")]
    pub class: String,

    /// Option tab whose selects `--options` lists
    #[arg(long, default_value = "profile")]
    pub tab: String,

    /// Preset select, as KEY=LABEL (e.g. size=Mega)
    #[arg(short, long = "select", value_name = "KEY=LABEL")]
    pub selects: Vec<String>,

    /// Keep only these sectors (or ETF categories)
    #[arg(long = "sector")]
    pub sectors: Vec<String>,

    /// Keep only these style-grid cells (e.g. large-value)
    #[arg(long = "grid")]
    pub grid: Vec<String>,

    /// List the selects available on the tab instead of the table
    #[arg(long)]
    pub options: bool,

    #[command(flatten)]
    pub table: TableArgs,
}

#[derive(Args, Debug)]
pub struct PortfolioArgs {
    /// JSON object of exported portfolios keyed by id
    pub file: PathBuf,

    /// Preset select, as KEY=LABEL (e.g. alpha=">0%")
    #[arg(short, long = "select", value_name = "KEY=LABEL")]
    pub selects: Vec<String>,

    /// Keep portfolios carrying any of these tags
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// List the available selects instead of the table
    #[arg(long)]
    pub options: bool,

    #[command(flatten)]
    pub table: TableArgs,
}

#[derive(Args, Debug)]
pub struct RankArgs {
    /// JSON array of exported asset rows
    pub file: PathBuf,

    /// Ticker to rank
    pub ticker: String,

    /// Only show this tab
    #[arg(long)]
    pub tab: Option<String>,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// JSON array of exported asset rows
    pub file: PathBuf,

    /// Ticker or company name
    pub query: String,

    /// Maximum number of suggestions
    #[arg(long, default_value_t = quantix_lib::search::SUGGESTION_LIMIT)]
    pub limit: usize,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print one preference, or all of them
    Get { key: Option<String> },
    /// Store a preference
    Set { key: String, value: String },
    /// Remove a stored preference
    Unset { key: String },
}

/// Splits `KEY=LABEL`.
pub fn split_select(select: &str) -> Option<(&str, &str)> {
    let (key, label) = select.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, label.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_arguments() {
        let cli = Cli::try_parse_from([
            "quantix", "screen", "assets.json", "--class", "etf", "-s", "size=Mega", "--select",
            "beta=Low", "--sector", "Energy", "--sort", "qOverall", "--asc", "--rows", "10",
        ])
        .unwrap();

        let Command::Screen(args) = cli.command else {
            panic!("expected screen");
        };
        assert_eq!(args.class, "etf");
        assert_eq!(args.selects, vec!["size=Mega", "beta=Low"]);
        assert_eq!(args.sectors, vec!["Energy"]);
        assert_eq!(args.table.sort.as_deref(), Some("qOverall"));
        assert!(args.table.asc);
        assert_eq!(args.table.rows, Some(10));
        assert_eq!(args.table.page, "1");
    }

    #[test]
    fn test_zero_rows_rejected() {
        assert!(Cli::try_parse_from(["quantix", "screen", "a.json", "--rows", "0"]).is_err());
    }

    #[test]
    fn test_asc_requires_sort() {
        assert!(Cli::try_parse_from(["quantix", "portfolios", "p.json", "--asc"]).is_err());
    }

    #[test]
    fn test_config_set() {
        let cli = Cli::try_parse_from(["quantix", "config", "set", "scheme", "neutral"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config {
                action: ConfigAction::Set { .. }
            }
        ));
    }

    #[test]
    fn test_search_default_limit() {
        let cli = Cli::try_parse_from(["quantix", "search", "a.json", "apple"]).unwrap();
        let Command::Search(args) = cli.command else {
            panic!("expected search");
        };
        assert_eq!(args.limit, 5);
    }

    #[test]
    fn test_split_select() {
        assert_eq!(split_select("size = Mega"), Some(("size", "Mega")));
        assert_eq!(split_select("alpha=> 0%"), Some(("alpha", "> 0%")));
        assert_eq!(split_select("size"), None);
        assert_eq!(split_select("=Mega"), None);
    }
}
