//! # Season/Episode Extractor
//!
//! Recovers a `(season, episode)` pair from a filename and, for the season,
//! its folder path. Each stage is a ranked ladder of named matchers tried in
//! order; the first one that yields a number wins.

use regex::Regex;
use tracing::trace;

use super::numeral::{NUMERAL_CLASS, parse_chinese_numeral};
use crate::config::RenameConfig;
use crate::error::Result;
use crate::types::SeasonEpisode;

type Matcher = fn(&SeasonEpisodeExtractor, &str) -> Option<u32>;

/// Season matchers, highest precedence first.
const SEASON_LADDER: &[(&str, Matcher)] = &[
    ("season-marker", SeasonEpisodeExtractor::season_marker),
    ("cross", SeasonEpisodeExtractor::season_cross),
    ("cjk-numeral-season", SeasonEpisodeExtractor::season_cjk_numeral),
    ("cjk-decimal-season", SeasonEpisodeExtractor::season_cjk_decimal),
    ("season-word", SeasonEpisodeExtractor::season_word),
];

/// Episode matchers, highest precedence first.
const EPISODE_LADDER: &[(&str, Matcher)] = &[
    ("sxxexx", SeasonEpisodeExtractor::episode_sxxexx),
    ("cross", SeasonEpisodeExtractor::episode_cross),
    ("cjk-decimal-episode", SeasonEpisodeExtractor::episode_cjk_decimal),
    ("cjk-numeral-episode", SeasonEpisodeExtractor::episode_cjk_numeral),
    ("ep-prefix", SeasonEpisodeExtractor::episode_prefixed),
    ("anime-dash", SeasonEpisodeExtractor::episode_dash),
    ("anime-dash-before-ext", SeasonEpisodeExtractor::episode_dash_loose),
    ("bracket-scan", SeasonEpisodeExtractor::episode_bracketed),
];

/// Ordered-heuristic season/episode extractor.
#[derive(Debug, Clone)]
pub struct SeasonEpisodeExtractor {
    re_season_marker: Regex,
    re_season_cross: Regex,
    re_season_cjk_numeral: Regex,
    re_season_cjk_decimal: Regex,
    re_season_word: Regex,
    re_episode_sxxexx: Regex,
    re_episode_cross: Regex,
    re_episode_cjk_decimal: Regex,
    re_episode_cjk_numeral: Regex,
    re_episode_prefixed: Regex,
    re_episode_dash: Regex,
    re_episode_dash_loose: Regex,
    re_episode_bracket: Regex,
    re_special: Regex,
    config: RenameConfig,
}

impl SeasonEpisodeExtractor {
    /// Compiles the matcher patterns and captures the bracket-scan policy of `config`.
    ///
    /// # Errors
    ///
    /// Returns `NazukeError::RegexError` if any pattern fails to compile
    /// (should never happen with the static patterns defined here).
    pub fn new(config: &RenameConfig) -> Result<Self> {
        Ok(Self {
            re_season_marker: Regex::new(r"(?i)S(\d+)")?,
            re_season_cross: Regex::new(r"(?i)(\d+)x\d+")?,
            re_season_cjk_numeral: Regex::new(&format!("第({NUMERAL_CLASS}+)季"))?,
            re_season_cjk_decimal: Regex::new(r"第(\d+)季")?,
            re_season_word: Regex::new(r"(?i)Season\s*(\d+)")?,
            re_episode_sxxexx: Regex::new(r"(?i)S\d+E(\d+)")?,
            re_episode_cross: Regex::new(r"(?i)\d+x(\d+)")?,
            re_episode_cjk_decimal: Regex::new(r"第(\d+)[话集話]")?,
            re_episode_cjk_numeral: Regex::new(&format!("第({NUMERAL_CLASS}+)[话集話]"))?,
            re_episode_prefixed: Regex::new(r"(?i)(?-u:\b)EP?\.?(\d+)(?-u:\b)")?,
            re_episode_dash: Regex::new(r"(?i)\s-\s(\d+)\s*(?:[\[\(v]|$)")?,
            re_episode_dash_loose: Regex::new(r"\s-\s(\d+)\.")?,
            re_episode_bracket: Regex::new(r"\[(\d{1,4})\]")?,
            re_special: Regex::new(r"(?i)(?-u:\b)(?:OVA|OAD|SP|Special)(?-u:\b)|特别篇|特別篇")?,
            config: config.clone(),
        })
    }

    /// Resolves season and episode for a file.
    ///
    /// The season is looked up in `folder_path` first, then in `filename`;
    /// the episode only in `filename`. When an episode is found without a
    /// season, the season defaults to `1`, or `0` for specials.
    #[must_use]
    pub fn extract(&self, filename: &str, folder_path: Option<&str>) -> Option<SeasonEpisode> {
        let episode = self.extract_episode(filename)?;
        let season = folder_path
            .filter(|p| !p.is_empty())
            .and_then(|p| self.extract_season(p))
            .or_else(|| self.extract_season(filename))
            .unwrap_or_else(|| if self.is_special(filename) { 0 } else { 1 });
        Some(SeasonEpisode::new(season, episode))
    }

    /// Runs the season ladder over `text`.
    #[must_use]
    pub fn extract_season(&self, text: &str) -> Option<u32> {
        run_ladder(self, SEASON_LADDER, text, "season")
    }

    /// Runs the episode ladder over `filename`.
    #[must_use]
    pub fn extract_episode(&self, filename: &str) -> Option<u32> {
        run_ladder(self, EPISODE_LADDER, filename, "episode")
    }

    /// Returns `true` if the filename carries an OVA / OAD / SP / special marker.
    #[must_use]
    pub fn is_special(&self, filename: &str) -> bool {
        self.re_special.is_match(filename)
    }

    fn season_marker(&self, text: &str) -> Option<u32> {
        first_number(&self.re_season_marker, text)
    }

    fn season_cross(&self, text: &str) -> Option<u32> {
        first_number(&self.re_season_cross, text)
    }

    fn season_cjk_numeral(&self, text: &str) -> Option<u32> {
        self.re_season_cjk_numeral
            .captures(text)
            .and_then(|c| parse_chinese_numeral(&c[1]))
    }

    fn season_cjk_decimal(&self, text: &str) -> Option<u32> {
        first_number(&self.re_season_cjk_decimal, text)
    }

    fn season_word(&self, text: &str) -> Option<u32> {
        first_number(&self.re_season_word, text)
    }

    fn episode_sxxexx(&self, text: &str) -> Option<u32> {
        first_number(&self.re_episode_sxxexx, text)
    }

    fn episode_cross(&self, text: &str) -> Option<u32> {
        first_number(&self.re_episode_cross, text)
    }

    fn episode_cjk_decimal(&self, text: &str) -> Option<u32> {
        first_number(&self.re_episode_cjk_decimal, text)
    }

    fn episode_cjk_numeral(&self, text: &str) -> Option<u32> {
        self.re_episode_cjk_numeral
            .captures(text)
            .and_then(|c| parse_chinese_numeral(&c[1]))
    }

    /// `E01`, `EP01`, `Ep.01` that are not the tail of an `S01E01` token.
    fn episode_prefixed(&self, text: &str) -> Option<u32> {
        let caps = self
            .re_episode_prefixed
            .captures_iter(text)
            .find(|c| c.get(0).is_some_and(|m| !follows_season_marker(text, m.start())))?;
        saturating_number(&caps[1])
    }

    fn episode_dash(&self, text: &str) -> Option<u32> {
        first_number(&self.re_episode_dash, text)
    }

    fn episode_dash_loose(&self, text: &str) -> Option<u32> {
        first_number(&self.re_episode_dash_loose, text)
    }

    /// First `[n]` group that is not a resolution, a year, or at/above the ceiling.
    fn episode_bracketed(&self, text: &str) -> Option<u32> {
        self.re_episode_bracket
            .captures_iter(text)
            .filter_map(|c| saturating_number(&c[1]))
            .find(|n| {
                !self.config.resolution_markers.contains(n)
                    && !self.config.is_plausible_year(*n)
                    && *n < self.config.bracket_episode_ceiling
            })
    }
}

fn run_ladder(
    extractor: &SeasonEpisodeExtractor,
    ladder: &[(&str, Matcher)],
    text: &str,
    stage: &str,
) -> Option<u32> {
    ladder.iter().find_map(|(name, matcher)| {
        let found = matcher(extractor, text)?;
        trace!(stage, matcher = *name, value = found, input = text, "heuristic matched");
        Some(found)
    })
}

fn first_number(re: &Regex, text: &str) -> Option<u32> {
    re.captures(text).and_then(|c| saturating_number(&c[1]))
}

/// Parses an ASCII digit run, clamping to `u32::MAX` on overflow.
///
/// `None` for non-ASCII digits, which `\d` also matches.
fn saturating_number(digits: &str) -> Option<u32> {
    digits.bytes().try_fold(0u32, |acc, b| {
        b.is_ascii_digit()
            .then(|| acc.saturating_mul(10).saturating_add(u32::from(b - b'0')))
    })
}

/// Whether `text[..pos]` ends in `S` followed by one to four digits.
fn follows_season_marker(text: &str, pos: usize) -> bool {
    let before = text[..pos].as_bytes();
    let digits = before.iter().rev().take_while(|b| b.is_ascii_digit()).count();
    (1..=4).contains(&digits)
        && before
            .len()
            .checked_sub(digits + 1)
            .is_some_and(|i| matches!(before[i], b'S' | b's'))
}
