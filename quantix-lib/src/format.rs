//! Number and cell formatting shared by tables and ranking views.

use crate::model::Cell;
use crate::ranking::ColorScheme;
use crate::ranking::RankingDisplay;
use crate::ranking::Score;
use crate::ranking::ranking;
use crate::table::ColumnKind;

/// Text shown for a cell with no usable value.
pub const MISSING_TEXT: &str = "NaN";

/// Formats a number with a T/B/M/K suffix.
///
/// Suffixed values use `decimals` decimals; values below a thousand,
/// including all negative values, always use two.
///
/// ```
/// use quantix_lib::format::format_large_number;
///
/// assert_eq!(format_large_number(3.41e12, 2), "3.41T");
/// assert_eq!(format_large_number(52_300_000.0, 1), "52.3M");
/// assert_eq!(format_large_number(999.0, 1), "999.00");
/// ```
pub fn format_large_number(n: f64, decimals: usize) -> String {
    const SUFFIXES: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];

    for (scale, suffix) in SUFFIXES {
        if n >= scale {
            return format!("{:.*}{}", decimals, n / scale, suffix);
        }
    }
    format!("{:.2}", n)
}

/// Formats a fraction as a percentage with two decimals: `0.0523` is `5.23%`.
pub fn format_percent(x: f64) -> String {
    format!("{:.2}%", 100.0 * x)
}

/// Formats a dollar price: `$12.50`.
pub fn format_price(x: f64) -> String {
    format!("${:.2}", x)
}

/// Prefixes non-negative numbers with `+`.
pub fn format_signed(x: f64) -> String {
    if x >= 0.0 {
        format!("+{}", x)
    } else {
        x.to_string()
    }
}

/// Color hint for a formatted cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Plain,
    Good,
    Bad,
}

impl Tone {
    /// Good for non-negative values, bad otherwise.
    pub fn of(x: f64) -> Self {
        if x >= 0.0 { Tone::Good } else { Tone::Bad }
    }
}

/// A cell ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedCell {
    pub text: String,
    pub tone: Tone,
    /// Bar to draw instead of text, for ranking columns.
    pub ranking: Option<RankingDisplay>,
}

impl FormattedCell {
    fn text(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
            ranking: None,
        }
    }
}

/// Formats one table cell for its column kind.
///
/// Missing values (see [`Cell::is_missing`]) in percent and price columns
/// render as `NaN`. Ranking columns round the score to two decimals and draw
/// a bar; a missing score draws the full-width gray bar.
pub fn format_cell(cell: &Cell<'_>, kind: ColumnKind) -> FormattedCell {
    match kind {
        ColumnKind::Ranking => {
            let score = match cell.as_number() {
                Some(n) if cell.is_present() => Score::Value((n * 100.0).round() / 100.0),
                _ => Score::None,
            };
            let display = ranking(score, ColorScheme::GoodBad, None);
            FormattedCell {
                text: display.label.clone(),
                tone: Tone::Plain,
                ranking: Some(display),
            }
        }
        ColumnKind::Percent | ColumnKind::NeutralPercent => match cell.as_number() {
            Some(n) if cell.is_present() => {
                let tone = if kind == ColumnKind::Percent {
                    Tone::of(n)
                } else {
                    Tone::Plain
                };
                FormattedCell::text(format_percent(n), tone)
            }
            _ => FormattedCell::text(MISSING_TEXT, Tone::Plain),
        },
        ColumnKind::Price => match cell
            .as_number()
            .or_else(|| cell.as_text().and_then(|text| text.trim().parse().ok()))
        {
            Some(n) if cell.is_present() => FormattedCell::text(format_price(n), Tone::Plain),
            _ => FormattedCell::text(MISSING_TEXT, Tone::Plain),
        },
        ColumnKind::Baseline => match cell {
            Cell::Number(n) if !n.is_nan() => FormattedCell::text(format_signed(*n), Tone::of(*n)),
            other => plain(other),
        },
        ColumnKind::Text | ColumnKind::Ticker | ColumnKind::Number => match cell {
            Cell::Number(n) if !n.is_nan() => {
                FormattedCell::text(format_large_number(*n, 2), Tone::Plain)
            }
            other => plain(other),
        },
    }
}

fn plain(cell: &Cell<'_>) -> FormattedCell {
    let text = match cell {
        Cell::Text(s) if !s.is_empty() => (*s).to_string(),
        Cell::Bool(true) => "true".to_string(),
        Cell::DateTime(dt) => dt.format("%Y-%m-%d").to_string(),
        Cell::List(items) if !items.is_empty() => items
            .iter()
            .filter_map(|item| item.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        Cell::Json(value) => value.to_string(),
        _ => MISSING_TEXT.to_string(),
    };
    FormattedCell::text(text, Tone::Plain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::MISSING_COLOR;

    #[test]
    fn test_large_number_suffixes() {
        assert_eq!(format_large_number(1.5e12, 2), "1.50T");
        assert_eq!(format_large_number(2.25e9, 2), "2.25B");
        assert_eq!(format_large_number(7.0e6, 2), "7.00M");
        assert_eq!(format_large_number(1234.0, 2), "1.23K");
        assert_eq!(format_large_number(12.346, 2), "12.35");
        assert_eq!(format_large_number(-5.0e9, 2), "-5000000000.00");
    }

    #[test]
    fn test_percent_and_price() {
        assert_eq!(format_percent(0.0523), "5.23%");
        assert_eq!(format_percent(-0.1), "-10.00%");
        assert_eq!(format_price(12.5), "$12.50");
    }

    #[test]
    fn test_signed() {
        assert_eq!(format_signed(1.5), "+1.5");
        assert_eq!(format_signed(0.0), "+0");
        assert_eq!(format_signed(-2.0), "-2");
    }

    #[test]
    fn test_percent_cell_tone() {
        let good = format_cell(&Cell::Number(0.12), ColumnKind::Percent);
        assert_eq!(good.text, "12.00%");
        assert_eq!(good.tone, Tone::Good);

        let bad = format_cell(&Cell::Number(-0.12), ColumnKind::Percent);
        assert_eq!(bad.tone, Tone::Bad);

        let neutral = format_cell(&Cell::Number(-0.12), ColumnKind::NeutralPercent);
        assert_eq!(neutral.tone, Tone::Plain);
    }

    #[test]
    fn test_falsy_percent_and_price_are_nan() {
        assert_eq!(format_cell(&Cell::Number(0.0), ColumnKind::Percent).text, "NaN");
        assert_eq!(format_cell(&Cell::Null, ColumnKind::Price).text, "NaN");
        assert_eq!(format_cell(&Cell::Null, ColumnKind::Text).text, "NaN");
    }

    #[test]
    fn test_numeric_text_price() {
        assert_eq!(format_cell(&Cell::Text("12"), ColumnKind::Price).text, "$12.00");
        assert_eq!(format_cell(&Cell::Text("n/a"), ColumnKind::Price).text, "NaN");
    }

    #[test]
    fn test_ranking_cell() {
        let cell = format_cell(&Cell::Number(0.756), ColumnKind::Ranking);
        let bar = cell.ranking.unwrap();
        assert_eq!(bar.label, "76");

        let missing = format_cell(&Cell::Null, ColumnKind::Ranking).ranking.unwrap();
        assert_eq!(missing.color, MISSING_COLOR);
        assert_eq!(missing.width, 100.0);
    }

    #[test]
    fn test_number_and_baseline_cells() {
        assert_eq!(format_cell(&Cell::Number(2.5e9), ColumnKind::Number).text, "2.50B");
        let base = format_cell(&Cell::Number(3.0), ColumnKind::Baseline);
        assert_eq!(base.text, "+3");
        assert_eq!(base.tone, Tone::Good);
        assert_eq!(format_cell(&Cell::Text("Tech"), ColumnKind::Text).text, "Tech");
    }
}
