//! The 3x3 size by valuation style box.

use crate::error::SelectError;
use crate::model::Asset;
use crate::model::AssetClass;
use crate::model::Metric;

use super::options::within;

/// Number of cells in the grid.
pub const GRID_CELLS: usize = 9;

/// Row names, largest first.
pub const GRID_ROWS: [&str; 3] = ["Large", "Mid", "Small"];

type Bounds = [(Option<f64>, Option<f64>); 3];

const SIZE_EQUITY: Bounds = [(Some(100e9), None), (Some(1e9), Some(100e9)), (None, Some(1e9))];
const SIZE_ETF: Bounds = [(Some(1e9), None), (Some(200e6), Some(1e9)), (None, Some(200e6))];
const PE_EQUITY: Bounds = [(None, Some(15.0)), (Some(15.0), Some(30.0)), (Some(30.0), None)];
const PE_ETF: Bounds = [(None, Some(15.0)), (Some(15.0), Some(24.0)), (Some(24.0), None)];

/// Column names for `class`, cheapest first.
pub const fn grid_columns(class: AssetClass) -> [&'static str; 3] {
    match class {
        AssetClass::Equity => ["Value", "Core", "Growth"],
        AssetClass::Etf => ["Value", "Blend", "Growth"],
    }
}

/// Name of cell `index` (row-major), e.g. `Large – Value`.
pub fn cell_name(class: AssetClass, index: usize) -> String {
    format!(
        "{} – {}",
        GRID_ROWS[index / 3 % 3],
        grid_columns(class)[index % 3]
    )
}

/// Parses a cell name such as `mid-value` or `Large – Growth`.
pub fn parse_cell(class: AssetClass, name: &str) -> Result<usize, SelectError> {
    let mut parts = name
        .split(|c: char| c == '-' || c == '–' || c == ':' || c == '/' || c.is_whitespace())
        .filter(|part| !part.is_empty());
    let (Some(row), Some(col), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(SelectError::unknown_name("grid cell", name));
    };
    let row = GRID_ROWS.iter().position(|r| r.eq_ignore_ascii_case(row));
    let col = grid_columns(class)
        .iter()
        .position(|c| c.eq_ignore_ascii_case(col));
    match (row, col) {
        (Some(row), Some(col)) => Ok(row * 3 + col),
        _ => Err(SelectError::unknown_name("grid cell", name)),
    }
}

/// Returns `true` when `asset` falls into grid cell `index`.
///
/// Rows bound the asset's size, columns its price to earnings ratio. A
/// missing value fails any set bound.
pub fn fits_grid_cell(class: AssetClass, index: usize, asset: &Asset) -> bool {
    let (size, pe) = match class {
        AssetClass::Equity => (SIZE_EQUITY, PE_EQUITY),
        AssetClass::Etf => (SIZE_ETF, PE_ETF),
    };
    let (size_lower, size_upper) = size[index / 3 % 3];
    let (pe_lower, pe_upper) = pe[index % 3];
    within(asset.size(), size_lower, size_upper)
        && within(asset.metric(Metric::PriceToEarnings), pe_lower, pe_upper)
}

/// Whether a selection restricts anything: none and all nine cells do not.
pub fn grid_is_active(selected: &[usize]) -> bool {
    !selected.is_empty() && selected.len() < GRID_CELLS
}

/// Summarizes a grid selection.
///
/// Full rows come first (`Large`), then full columns (`Value`), then the
/// remaining cells by name, joined with ` or `. An empty selection is `None`.
///
/// ```
/// use quantix_lib::model::AssetClass;
/// use quantix_lib::screener::build_grid_label;
///
/// assert_eq!(build_grid_label(AssetClass::Equity, &[0, 1, 2, 5]), "Large or Mid – Growth");
/// assert_eq!(build_grid_label(AssetClass::Equity, &[]), "None");
/// ```
pub fn build_grid_label(class: AssetClass, selected: &[usize]) -> String {
    let mut chosen = [false; GRID_CELLS];
    for &index in selected {
        if index < GRID_CELLS {
            chosen[index] = true;
        }
    }
    let columns = grid_columns(class);
    let mut covered = [false; GRID_CELLS];
    let mut parts: Vec<String> = Vec::new();

    for (row, name) in GRID_ROWS.iter().enumerate() {
        if (0..3).all(|col| chosen[row * 3 + col]) {
            parts.push((*name).to_string());
            (0..3).for_each(|col| covered[row * 3 + col] = true);
        }
    }
    for (col, name) in columns.iter().enumerate() {
        if (0..3).all(|row| chosen[row * 3 + col]) {
            parts.push((*name).to_string());
            (0..3).for_each(|row| covered[row * 3 + col] = true);
        }
    }
    for index in 0..GRID_CELLS {
        if chosen[index] && !covered[index] {
            let name = cell_name(class, index);
            if !parts.contains(&name) {
                parts.push(name);
            }
        }
    }

    if parts.is_empty() {
        "None".to_string()
    } else {
        parts.join(" or ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_rows_columns_cells() {
        assert_eq!(build_grid_label(AssetClass::Equity, &[0, 3, 6]), "Value");
        assert_eq!(
            build_grid_label(AssetClass::Equity, &[0, 1, 2, 3, 6]),
            "Large or Value"
        );
        assert_eq!(
            build_grid_label(AssetClass::Etf, &[4, 8]),
            "Mid – Blend or Small – Growth"
        );
    }

    #[test]
    fn test_parse_cell() {
        assert_eq!(parse_cell(AssetClass::Equity, "large-value").unwrap(), 0);
        assert_eq!(parse_cell(AssetClass::Equity, "Small – Growth").unwrap(), 8);
        assert_eq!(parse_cell(AssetClass::Etf, "mid blend").unwrap(), 4);
        assert!(parse_cell(AssetClass::Equity, "mid blend").is_err());
        assert!(parse_cell(AssetClass::Equity, "huge-value").is_err());
    }

    #[test]
    fn test_fits_cell() {
        let apple = Asset::new("AAPL", "Apple", AssetClass::Equity)
            .with_metric(Metric::Size, 3e12)
            .with_metric(Metric::PriceToEarnings, 28.0);
        assert!(fits_grid_cell(AssetClass::Equity, 1, &apple));
        assert!(!fits_grid_cell(AssetClass::Equity, 0, &apple));
        assert!(!fits_grid_cell(AssetClass::Equity, 4, &apple));

        let no_pe = Asset::new("X", "X", AssetClass::Equity).with_metric(Metric::Size, 3e12);
        assert!(!fits_grid_cell(AssetClass::Equity, 0, &no_pe));
    }

    #[test]
    fn test_grid_activity() {
        assert!(!grid_is_active(&[]));
        assert!(grid_is_active(&[3]));
        assert!(!grid_is_active(&[0, 1, 2, 3, 4, 5, 6, 7, 8]));
    }
}
