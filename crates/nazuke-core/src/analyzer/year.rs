//! # Year Extractor
//!
//! Pulls a release year out of a filename or a whole batch.

use regex::Regex;

use crate::config::RenameConfig;
use crate::error::Result;
use crate::types::MediaFile;

/// Finds a plausible release year in free text.
#[derive(Debug, Clone)]
pub struct YearExtractor {
    re_year: Regex,
    config: RenameConfig,
}

impl YearExtractor {
    /// # Errors
    ///
    /// Returns `NazukeError::RegexError` if the year pattern fails to compile.
    pub fn new(config: &RenameConfig) -> Result<Self> {
        Ok(Self {
            re_year: Regex::new(r"(?:^|[.\s\-_(\[{])([0-9]{4})(?:[.\s\-_)\]}]|$)")?,
            config: config.clone(),
        })
    }

    /// Returns the first delimited four-digit run if it is a plausible year.
    ///
    /// Only the first delimited run is considered: `"Show.1080.2020"` yields
    /// nothing. Empty when no year was found.
    #[must_use]
    pub fn extract(&self, text: &str) -> String {
        let Some(caps) = self.re_year.captures(text) else {
            return String::new();
        };
        match caps[1].parse::<u32>() {
            Ok(year) if self.config.is_plausible_year(year) => caps[1].to_string(),
            _ => String::new(),
        }
    }

    /// Scans `"{path} {name}"` of every file in order and returns the first year found.
    #[must_use]
    pub fn extract_from_files(&self, files: &[MediaFile]) -> String {
        files
            .iter()
            .map(|f| self.extract(&format!("{} {}", f.path, f.name)))
            .find(|year| !year.is_empty())
            .unwrap_or_default()
    }
}
