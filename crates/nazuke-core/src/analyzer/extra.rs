//! # Extra-Content Detector
//!
//! Tags previews, menus, clean OP/ED and other bonus files so they do not
//! claim a main-episode name.

use regex::Regex;

use crate::error::Result;

/// Flags non-main-program files (previews, menus, clean OP/ED, specials).
#[derive(Debug, Clone)]
pub struct ExtraContentDetector {
    re_extra: Regex,
}

impl ExtraContentDetector {
    /// # Errors
    ///
    /// Returns `NazukeError::RegexError` if the marker pattern fails to compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_extra: Regex::new(
                r"(?i)\[(PV\d*|Menu|NCOP|NCED|SP\d*|CM|Trailer|Preview|OP\d*|ED\d*|OVA|OAD)\]",
            )?,
        })
    }

    /// Returns the first bracketed marker as `" - <Marker>"`, or an empty string.
    ///
    /// The marker keeps the casing it has in the filename.
    #[must_use]
    pub fn detect(&self, filename: &str) -> String {
        self.marker(filename)
            .map(|m| format!(" - {m}"))
            .unwrap_or_default()
    }

    /// The first bracketed marker without its brackets.
    #[must_use]
    pub fn marker<'a>(&self, filename: &'a str) -> Option<&'a str> {
        self.re_extra
            .captures(filename)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
    }
}
