//! # Subtitle-Language Extractor
//!
//! Recovers language tags such as `[CHT]`, `[简日]`, `.JPSC.ass` and renders
//! them as a `" - CHT+EN"` style suffix so multi-language subtitle files of
//! the same episode do not collide.

use regex::Regex;

use crate::config::RenameConfig;
use crate::error::Result;

/// Raw token (upper-cased) to canonical language code.
const SYNONYMS: &[(&str, &str)] = &[
    ("CHT", "CHT"),
    ("TC", "CHT"),
    ("BIG5", "CHT"),
    ("繁中", "CHT"),
    ("繁体", "CHT"),
    ("繁體", "CHT"),
    ("CHS", "CHS"),
    ("SC", "CHS"),
    ("GB", "CHS"),
    ("简中", "CHS"),
    ("简体", "CHS"),
    ("簡體", "CHS"),
    ("JP", "JP"),
    ("JPN", "JP"),
    ("日", "JP"),
    ("日文", "JP"),
    ("EN", "EN"),
    ("ENG", "EN"),
    ("英", "EN"),
    ("英文", "EN"),
    ("KO", "KO"),
    ("KOR", "KO"),
    ("韩", "KO"),
    ("韩文", "KO"),
];

/// Fused tokens to their canonical codes, in order. Parts are canonical
/// codes and are never looked up here again.
const COMPOUNDS: &[(&str, &[&str])] = &[
    ("JPSC", &["JP", "CHS"]),
    ("JPTC", &["JP", "CHT"]),
    ("SCJP", &["CHS", "JP"]),
    ("TCJP", &["CHT", "JP"]),
    ("CHTEN", &["CHT", "EN"]),
    ("CHSEN", &["CHS", "EN"]),
    ("ENCHT", &["EN", "CHT"]),
    ("ENCHS", &["EN", "CHS"]),
    ("JPEN", &["JP", "EN"]),
    ("ENJP", &["EN", "JP"]),
    ("KOJP", &["KO", "JP"]),
    ("JPKO", &["JP", "KO"]),
    ("简日", &["CHS", "JP"]),
    ("繁日", &["CHT", "JP"]),
    ("简繁", &["CHS", "CHT"]),
    ("简繁日", &["CHS", "CHT", "JP"]),
];

/// Unknown tokens up to this many characters are kept verbatim (upper-cased).
const MAX_RAW_CODE_CHARS: usize = 4;

fn synonym(token: &str) -> Option<&'static str> {
    SYNONYMS
        .iter()
        .find(|(raw, _)| *raw == token)
        .map(|(_, code)| *code)
}

fn compound(token: &str) -> Option<&'static [&'static str]> {
    COMPOUNDS
        .iter()
        .find(|(raw, _)| *raw == token)
        .map(|(_, parts)| *parts)
}

/// Formats codes as a filename suffix: `" - JP+CHS"`, or empty.
#[must_use]
pub fn format_suffix(codes: &[String]) -> String {
    if codes.is_empty() {
        String::new()
    } else {
        format!(" - {}", codes.join("+"))
    }
}

/// Extracts subtitle language tags from filenames.
#[derive(Debug, Clone)]
pub struct SubtitleLanguageExtractor {
    re_token: Regex,
    re_code_before_ext: Regex,
    subtitle_extensions: Vec<String>,
}

impl SubtitleLanguageExtractor {
    /// # Errors
    ///
    /// Returns `NazukeError::RegexError` if a pattern fails to compile.
    pub fn new(config: &RenameConfig) -> Result<Self> {
        let sub_exts = config
            .subtitle_extensions
            .iter()
            .map(|ext| regex::escape(ext))
            .collect::<Vec<_>>()
            .join("|");

        Ok(Self {
            re_token: Regex::new(
                r"(?i)\[([A-Za-z\x{4e00}-\x{9fa5}]{2,6}(?:\+[A-Za-z\x{4e00}-\x{9fa5}]{2,6})*)\]|\.(cht|chs|sc|tc|jp|jpn|en|eng|ko|kor|jpsc|jptc|scjp|tcjp)(?-u:\b)",
            )?,
            re_code_before_ext: Regex::new(&format!(r"(?i)\.([A-Z]{{2,6}})(?:{sub_exts})$"))?,
            subtitle_extensions: config.subtitle_extensions.clone(),
        })
    }

    /// Returns the language suffix for a subtitle file, e.g. `" - CHT+EN"`.
    ///
    /// Empty for non-subtitle extensions and when no language was identified.
    ///
    /// ```
    /// use nazuke_core::analyzer::language::SubtitleLanguageExtractor;
    /// use nazuke_core::RenameConfig;
    ///
    /// let langs = SubtitleLanguageExtractor::new(&RenameConfig::default()).unwrap();
    /// assert_eq!(langs.extract("Title.JPSC.ass", ".ass"), " - JP+CHS");
    /// assert_eq!(langs.extract("Title.JPSC.mkv", ".mkv"), "");
    /// ```
    #[must_use]
    pub fn extract(&self, filename: &str, ext: &str) -> String {
        if !self.subtitle_extensions.iter().any(|s| s == ext) {
            return String::new();
        }
        format_suffix(&self.languages(filename))
    }

    /// Ordered, deduplicated language codes found in `filename`.
    ///
    /// Unknown tokens of up to four characters are kept upper-cased.
    #[must_use]
    pub fn languages(&self, filename: &str) -> Vec<String> {
        let mut codes = Vec::new();

        for caps in self.re_token.captures_iter(filename) {
            let token = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map_or("", |m| m.as_str().trim());
            add_tokens(token, false, &mut codes);
        }

        // .CHTEN.ass / .FR.srt style codes the token pattern does not list
        if let Some(caps) = self.re_code_before_ext.captures(filename) {
            add_token(&caps[1], false, &mut codes);
        }

        codes
    }

    /// Codes from bracketed tokens only, keeping table hits and nothing else.
    ///
    /// Dotted markers are ignored, so release tags such as `.TC.` (telecine)
    /// or `.SC.` never read as languages.
    #[must_use]
    pub fn bracketed_languages(&self, filename: &str) -> Vec<String> {
        let mut codes = Vec::new();
        for token in self
            .re_token
            .captures_iter(filename)
            .filter_map(|caps| caps.get(1))
        {
            add_tokens(token.as_str().trim(), true, &mut codes);
        }
        codes
    }
}

fn add_tokens(token: &str, strict: bool, codes: &mut Vec<String>) {
    for part in token.split('+') {
        add_token(part, strict, codes);
    }
}

fn add_token(raw: &str, strict: bool, codes: &mut Vec<String>) {
    let token = raw.replace('.', "");
    let token = token.trim();
    if token.is_empty() {
        return;
    }
    let upper = token.to_uppercase();

    if let Some(parts) = compound(&upper) {
        for part in parts {
            push_code(part, codes);
        }
    } else if let Some(code) = synonym(&upper) {
        push_code(code, codes);
    } else if !strict && token.chars().count() <= MAX_RAW_CODE_CHARS {
        push_code(&upper, codes);
    }
}

fn push_code(code: &str, codes: &mut Vec<String>) {
    if !codes.iter().any(|c| c == code) {
        codes.push(code.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> SubtitleLanguageExtractor {
        SubtitleLanguageExtractor::new(&RenameConfig::default()).unwrap()
    }

    #[test]
    fn compound_dot_code() {
        assert_eq!(extractor().extract("Title.JPSC.ass", ".ass"), " - JP+CHS");
        assert_eq!(extractor().extract("Title.tcjp.srt", ".srt"), " - CHT+JP");
    }

    #[test]
    fn compound_outside_token_list() {
        assert_eq!(extractor().extract("Title.CHTEN.ass", ".ass"), " - CHT+EN");
    }

    #[test]
    fn no_token_is_empty() {
        assert_eq!(extractor().extract("Title.srt", ".srt"), "");
        assert_eq!(extractor().extract("Show.S01E03.ass", ".ass"), "");
    }

    #[test]
    fn bracketed_codes_in_order_without_duplicates() {
        let e = extractor();
        assert_eq!(e.extract("[CHT][EN]Title.srt", ".srt"), " - CHT+EN");
        assert_eq!(e.extract("[CHT][EN][CHT]Title.srt", ".srt"), " - CHT+EN");
        assert_eq!(e.extract("[TC][繁中]Title.srt", ".srt"), " - CHT");
    }

    #[test]
    fn chained_bracket_tokens() {
        assert_eq!(
            extractor().extract("[Group] Title - 01 [CHS+JP].ass", ".ass"),
            " - CHS+JP"
        );
    }

    #[test]
    fn cjk_synonyms_and_compounds() {
        let e = extractor();
        assert_eq!(e.extract("[Group] Title [简体].ass", ".ass"), " - CHS");
        assert_eq!(e.extract("[Group] Title [简日].ass", ".ass"), " - CHS+JP");
        assert_eq!(e.extract("[Group] Title [简繁日].ass", ".ass"), " - CHS+CHT+JP");
    }

    #[test]
    fn synonyms_are_case_insensitive() {
        let e = extractor();
        assert_eq!(e.extract("Title.chs.ass", ".ass"), " - CHS");
        assert_eq!(e.extract("[eng]Title.srt", ".srt"), " - EN");
        assert_eq!(e.extract("Title.Kor.srt", ".srt"), " - KO");
    }

    #[test]
    fn short_unknown_tokens_are_kept() {
        assert_eq!(extractor().extract("[FR]Title.srt", ".srt"), " - FR");
    }

    #[test]
    fn long_unknown_tokens_are_dropped() {
        assert_eq!(extractor().extract("[Group] Title.srt", ".srt"), "");
    }

    #[test]
    fn unlisted_code_before_extension_is_kept() {
        let e = extractor();
        assert_eq!(e.extract("Title.FR.srt", ".srt"), " - FR");
        assert_eq!(e.extract("Movie.2019.POR.srt", ".srt"), " - POR");
        assert_eq!(e.extract("The.Show.ass", ".ass"), " - SHOW");
        assert_eq!(e.extract("Some.Title.ass", ".ass"), "");
    }

    #[test]
    fn video_extensions_are_ignored() {
        assert_eq!(extractor().extract("[CHT]Title.mkv", ".mkv"), "");
    }

    #[test]
    fn bracketed_languages_skip_unknown_short_tokens() {
        let e = extractor();
        assert_eq!(
            e.bracketed_languages("[Group] Title [NCOP][HEVC][CHT].mkv"),
            vec!["CHT".to_string()]
        );
        assert_eq!(
            e.languages("[Group] Title [NCOP][HEVC][CHT].mkv"),
            vec!["NCOP".to_string(), "HEVC".to_string(), "CHT".to_string()]
        );
    }

    #[test]
    fn bracketed_languages_ignore_dotted_markers() {
        let e = extractor();
        assert!(e.bracketed_languages("Movie.2019.TC.x264.mkv").is_empty());
        assert!(e.bracketed_languages("Movie.2019.SC.1080p.mp4").is_empty());
        assert!(e.bracketed_languages("Some.Movie.EN.Cut.mkv").is_empty());
        assert_eq!(
            e.bracketed_languages("[Group] Anime - 05 [CHS+JP].mkv"),
            vec!["CHS".to_string(), "JP".to_string()]
        );
    }

    #[test]
    fn format_suffix_joins_with_plus() {
        assert_eq!(format_suffix(&[]), "");
        assert_eq!(
            format_suffix(&["JP".to_string(), "CHS".to_string()]),
            " - JP+CHS"
        );
    }
}
