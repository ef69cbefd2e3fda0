//! Percentile to color and bar width.

use std::fmt;
use std::str::FromStr;

use palette::Srgb;

use crate::error::SelectError;

/// A percentile rank in `[0, 1]`, or no ranking data.
///
/// Every absence form (`None`, a missing column, the string `"none"`)
/// collapses to [`Score::None`], so they all render the same.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Score {
    /// No ranking data.
    #[default]
    None,
    /// A percentile rank.
    Value(f64),
}

impl Score {
    /// Wraps an optional percentile.
    pub fn from_option(value: Option<f64>) -> Self {
        value.map(Score::Value).unwrap_or(Score::None)
    }

    /// Parses a pre-formatted score such as `"0.73"`.
    ///
    /// `"none"`, the empty string and anything that is not a number are all
    /// [`Score::None`].
    pub fn parse(text: &str) -> Self {
        match text.trim() {
            "" | "none" => Score::None,
            other => other.parse().map(Score::Value).unwrap_or(Score::None),
        }
    }

    /// Returns the percentile, if any.
    pub fn value(self) -> Option<f64> {
        match self {
            Score::None => None,
            Score::Value(v) => Some(v),
        }
    }
}

impl From<Option<f64>> for Score {
    fn from(value: Option<f64>) -> Self {
        Score::from_option(value)
    }
}

impl From<f64> for Score {
    fn from(value: f64) -> Self {
        Score::Value(value)
    }
}

/// Three-stop color scale for ranking bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorScheme {
    /// Red, yellow, green: higher is better.
    #[default]
    GoodBad,
    /// Pink to magenta: higher is neither better nor worse.
    Neutral,
}

impl ColorScheme {
    /// Picks the scheme from a good/bad flag.
    pub fn from_good_bad(good_bad: bool) -> Self {
        if good_bad {
            ColorScheme::GoodBad
        } else {
            ColorScheme::Neutral
        }
    }

    /// The low, middle and high stops.
    pub const fn stops(self) -> [Srgb<u8>; 3] {
        match self {
            ColorScheme::GoodBad => [
                Srgb::new(190, 15, 15),
                Srgb::new(230, 180, 50),
                Srgb::new(0, 90, 50),
            ],
            ColorScheme::Neutral => [
                Srgb::new(240, 130, 200),
                Srgb::new(200, 80, 160),
                Srgb::new(160, 30, 120),
            ],
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorScheme::GoodBad => f.write_str("good-bad"),
            ColorScheme::Neutral => f.write_str("neutral"),
        }
    }
}

impl FromStr for ColorScheme {
    type Err = SelectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "good-bad" | "goodbad" | "good_bad" => Ok(ColorScheme::GoodBad),
            "neutral" => Ok(ColorScheme::Neutral),
            _ => Err(SelectError::unknown_name("color scheme", s)),
        }
    }
}

/// Color for missing ranking data.
pub const MISSING_COLOR: Srgb<u8> = Srgb::new(200, 200, 200);

/// Label for missing ranking data.
pub const MISSING_LABEL: &str = "N/A";

/// Interpolates the scheme's stops at `score`.
///
/// Scores up to 0.5 blend the low and middle stops, higher scores the middle
/// and high stops. Each channel is rounded to the nearest integer.
pub fn interpolate(score: f64, scheme: ColorScheme) -> Srgb<u8> {
    let [low, mid, high] = scheme.stops();
    if score <= 0.5 {
        lerp(low, mid, score / 0.5)
    } else {
        lerp(mid, high, (score - 0.5) / 0.5)
    }
}

fn lerp(from: Srgb<u8>, to: Srgb<u8>, factor: f64) -> Srgb<u8> {
    let channel = |a: u8, b: u8| {
        let (a, b) = (f64::from(a), f64::from(b));
        (a + factor * (b - a)).round().clamp(0.0, 255.0) as u8
    };
    Srgb::new(
        channel(from.red, to.red),
        channel(from.green, to.green),
        channel(from.blue, to.blue),
    )
}

/// Bar width in percent: `(100 * score + 10) / 1.1`.
///
/// A zero score still draws a bar of about 9.09%; a full score draws exactly
/// 100%, which dividing by the literal 1.1 would miss by one ulp.
pub fn bar_width(score: f64) -> f64 {
    (100.0 * score + 10.0) * 10.0 / 11.0
}

/// Color, width and label of one ranking bar.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingDisplay {
    pub color: Srgb<u8>,
    /// Bar width in percent.
    pub width: f64,
    pub label: String,
}

impl RankingDisplay {
    /// The color as `rgb(r, g, b)`.
    pub fn css_color(&self) -> String {
        format!(
            "rgb({}, {}, {})",
            self.color.red, self.color.green, self.color.blue
        )
    }

    /// Number of filled cells for a bar `cells` wide.
    pub fn filled_cells(&self, cells: usize) -> usize {
        let filled = (self.width / 100.0 * cells as f64).round();
        (filled.max(0.0) as usize).min(cells)
    }
}

/// Builds the ranking bar for a score.
///
/// Missing scores render gray, full width and labelled `N/A`. Otherwise the
/// label is the rounded percentage unless `label` overrides it.
pub fn ranking(score: impl Into<Score>, scheme: ColorScheme, label: Option<&str>) -> RankingDisplay {
    match score.into() {
        Score::None => RankingDisplay {
            color: MISSING_COLOR,
            width: 100.0,
            label: MISSING_LABEL.to_string(),
        },
        Score::Value(score) => RankingDisplay {
            color: interpolate(score, scheme),
            width: bar_width(score),
            label: match label {
                Some(label) => label.to_string(),
                None => format!("{:.0}", (100.0 * score).round()),
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stops_are_exact() {
        let [low, mid, high] = ColorScheme::GoodBad.stops();
        assert_eq!(interpolate(0.0, ColorScheme::GoodBad), low);
        assert_eq!(interpolate(0.5, ColorScheme::GoodBad), mid);
        assert_eq!(interpolate(1.0, ColorScheme::GoodBad), high);
    }

    #[test]
    fn test_interpolation_rounds_channels() {
        // 0.25 is halfway from red to yellow.
        assert_eq!(
            interpolate(0.25, ColorScheme::GoodBad),
            Srgb::new(210, 98, 33)
        );
        // 0.75 is halfway from mid to high magenta.
        assert_eq!(
            interpolate(0.75, ColorScheme::Neutral),
            Srgb::new(180, 55, 140)
        );
    }

    #[test]
    fn test_bar_width_floor() {
        assert!((bar_width(0.0) - 9.090909).abs() < 1e-5);
        assert_eq!(bar_width(1.0), 100.0);
    }

    #[test]
    fn test_label_and_override() {
        assert_eq!(ranking(0.736, ColorScheme::GoodBad, None).label, "74");
        assert_eq!(ranking(0.5, ColorScheme::GoodBad, Some("1.2B")).label, "1.2B");
    }

    #[test]
    fn test_absence_forms_are_identical() {
        let from_none = ranking(None::<f64>, ColorScheme::GoodBad, None);
        let from_text = ranking(Score::parse("none"), ColorScheme::GoodBad, None);
        let from_default = ranking(Score::default(), ColorScheme::Neutral, None);

        assert_eq!(from_none, from_text);
        assert_eq!(from_none, from_default);
        assert_eq!(from_none.width, 100.0);
        assert_eq!(from_none.label, "N/A");
        assert_eq!(from_none.color, MISSING_COLOR);
    }

    #[test]
    fn test_scheme_names_round_trip() {
        for scheme in [ColorScheme::GoodBad, ColorScheme::Neutral] {
            assert_eq!(scheme.to_string().parse::<ColorScheme>().unwrap(), scheme);
        }
        assert!("rainbow".parse::<ColorScheme>().is_err());
    }

    #[test]
    fn test_css_color() {
        let display = ranking(0.0, ColorScheme::GoodBad, None);
        assert_eq!(display.css_color(), "rgb(190, 15, 15)");
    }

    #[test]
    fn test_filled_cells() {
        let display = ranking(1.0, ColorScheme::GoodBad, None);
        assert_eq!(display.filled_cells(20), 20);
        let display = ranking(0.0, ColorScheme::GoodBad, None);
        assert_eq!(display.filled_cells(22), 2);
    }
}
