//! Ticker and company name lookup.

use std::cmp::Ordering;
use std::sync::LazyLock;

use nucleo_matcher::Config;
use nucleo_matcher::Matcher;
use nucleo_matcher::Utf32Str;
use nucleo_matcher::pattern::AtomKind;
use nucleo_matcher::pattern::CaseMatching;
use nucleo_matcher::pattern::Normalization;
use nucleo_matcher::pattern::Pattern;
use regex::Regex;

use crate::model::Asset;

/// Number of suggestions a search box shows.
pub const SUGGESTION_LIMIT: usize = 5;

static FILLER_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:the|company|corporation)\b|\binc\.").expect("Invalid filler word pattern")
});

/// Lowercases a company name and strips filler words such as `The` and `Inc.`.
///
/// ```
/// use quantix_lib::search::clean_name;
///
/// assert_eq!(clean_name("The Coca-Cola Company"), "coca-cola");
/// assert_eq!(clean_name("Theravance Inc."), "theravance");
/// ```
pub fn clean_name(name: &str) -> String {
    let lower = name.to_lowercase();
    FILLER_WORDS
        .replace_all(&lower, "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Finds assets whose ticker or cleaned name starts with `query`.
///
/// Matching ignores case. Assets whose ticker or full name starts with the
/// query come first; ties go to the larger asset, with unknown sizes last. An
/// empty query matches nothing.
pub fn search_assets<'a>(query: &str, assets: &'a [Asset]) -> Vec<&'a Asset> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let starts = |asset: &Asset| {
        asset.ticker.to_lowercase().starts_with(&query)
            || asset.name.to_lowercase().starts_with(&query)
    };

    let mut hits: Vec<(&Asset, bool)> = assets
        .iter()
        .filter(|asset| starts(*asset) || clean_name(&asset.name).starts_with(&query))
        .map(|asset| (asset, starts(asset)))
        .collect();

    hits.sort_by(|(a, a_starts), (b, b_starts)| {
        b_starts
            .cmp(a_starts)
            .then_with(|| compare_size_desc(a.size(), b.size()))
    });

    log::debug!("Search '{}' matched {} assets", query, hits.len());
    hits.into_iter().map(|(asset, _)| asset).collect()
}

fn compare_size_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// A fuzzy match of one label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuzzyMatch {
    /// Index of the label in the searched list.
    pub index: usize,
    /// Match score; higher is better.
    pub score: u32,
}

/// Fuzzy-matches `query` against `labels`, best match first.
///
/// Used as a fallback when no prefix hit exists. An empty query matches every
/// label with score 0.
pub fn fuzzy_search<S: AsRef<str>>(query: &str, labels: &[S]) -> Vec<FuzzyMatch> {
    if query.is_empty() {
        return (0..labels.len())
            .map(|index| FuzzyMatch { index, score: 0 })
            .collect();
    }

    let mut matcher = Matcher::new(Config::DEFAULT);
    let pattern = Pattern::new(
        query,
        CaseMatching::Ignore,
        Normalization::Smart,
        AtomKind::Fuzzy,
    );

    let mut buf = Vec::new();
    let mut matches: Vec<FuzzyMatch> = labels
        .iter()
        .enumerate()
        .filter_map(|(index, label)| {
            let haystack = Utf32Str::new(label.as_ref(), &mut buf);
            pattern
                .score(haystack, &mut matcher)
                .map(|score| FuzzyMatch { index, score })
        })
        .collect();

    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches
}

/// Prefix search with a fuzzy fallback over `TICKER - Name` labels.
pub fn lookup<'a>(query: &str, assets: &'a [Asset]) -> Vec<&'a Asset> {
    let hits = search_assets(query, assets);
    if !hits.is_empty() {
        return hits;
    }
    let labels: Vec<String> = assets
        .iter()
        .map(|asset| format!("{} - {}", asset.ticker, asset.name))
        .collect();
    fuzzy_search(query, &labels)
        .into_iter()
        .map(|m| &assets[m.index])
        .collect()
}
