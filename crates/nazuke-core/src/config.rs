//! # Rename Configuration
//!
//! Policy constants used by the analyzers, gathered into a tunable
//! [`RenameConfig`]. The defaults reproduce the stock behavior exactly.

use serde::{Deserialize, Serialize};

use crate::error::{NazukeError, Result};

/// Extensions treated as video files.
pub const VIDEO_EXTENSIONS: &[&str] = &[
    ".mp4", ".mkv", ".avi", ".mov", ".flv", ".wmv", ".m4v", ".webm", ".ts", ".rmvb", ".mpg",
    ".mpeg",
];

/// Extensions treated as subtitle files.
pub const SUBTITLE_EXTENSIONS: &[&str] = &[".srt", ".ass", ".ssa", ".vtt", ".sub", ".idx"];

/// Bracketed numbers that are resolutions, never episodes.
pub const RESOLUTION_MARKERS: &[u32] = &[240, 360, 480, 720, 1080, 1440, 2160];

/// Inclusive range of plausible release years.
pub const YEAR_RANGE: (u16, u16) = (1900, 2099);

/// Bracketed numbers at or above this value are never taken as episodes.
pub const BRACKET_EPISODE_CEILING: u32 = 1920;

/// Configuration for a [`Renamer`](crate::Renamer).
///
/// ```
/// use nazuke_core::RenameConfig;
///
/// let config = RenameConfig::new()
///     .with_year_range(1950, 2040)
///     .with_tag_video_languages(false);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenameConfig {
    /// Inclusive `(min, max)` range for year extraction and the bracket scan.
    pub year_range: (u16, u16),

    /// Bracketed values skipped as resolution markers.
    pub resolution_markers: Vec<u32>,

    /// Bracketed values at or above this are skipped.
    pub bracket_episode_ceiling: u32,

    /// Lower-cased dotted video extensions.
    pub video_extensions: Vec<String>,

    /// Lower-cased dotted subtitle extensions.
    pub subtitle_extensions: Vec<String>,

    /// Tag video files with bracketed known language codes (hard-subbed releases). On by default.
    pub tag_video_languages: bool,
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            year_range: YEAR_RANGE,
            resolution_markers: RESOLUTION_MARKERS.to_vec(),
            bracket_episode_ceiling: BRACKET_EPISODE_CEILING,
            video_extensions: VIDEO_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            subtitle_extensions: SUBTITLE_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            tag_video_languages: true,
        }
    }
}

impl RenameConfig {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a JSON document and validates it. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns `NazukeError::ConfigParse` for malformed JSON and
    /// `NazukeError::InvalidConfig` when validation fails.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut config: Self = serde_json::from_str(json)?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Set the inclusive year range.
    pub fn with_year_range(mut self, min: u16, max: u16) -> Self {
        self.year_range = (min, max);
        self
    }

    /// Set the resolution markers skipped by the bracket scan.
    pub fn with_resolution_markers(mut self, markers: impl IntoIterator<Item = u32>) -> Self {
        self.resolution_markers = markers.into_iter().collect();
        self
    }

    /// Set the bracket-scan ceiling.
    pub fn with_bracket_episode_ceiling(mut self, ceiling: u32) -> Self {
        self.bracket_episode_ceiling = ceiling;
        self
    }

    /// Enable or disable language tagging of video files.
    pub fn with_tag_video_languages(mut self, enabled: bool) -> Self {
        self.tag_video_languages = enabled;
        self
    }

    /// Returns `true` if `year` lies in the configured range.
    #[must_use]
    pub fn is_plausible_year(&self, year: u32) -> bool {
        let (min, max) = self.year_range;
        (u32::from(min)..=u32::from(max)).contains(&year)
    }

    /// Lower-cases extension lists so lookups can compare directly.
    fn normalize(&mut self) {
        for ext in self
            .video_extensions
            .iter_mut()
            .chain(self.subtitle_extensions.iter_mut())
        {
            *ext = ext.trim().to_lowercase();
        }
    }

    /// Checks the invariants the analyzers rely on.
    ///
    /// # Errors
    ///
    /// Returns `NazukeError::InvalidConfig` describing the first violation.
    pub fn validate(&self) -> Result<()> {
        let (min, max) = self.year_range;
        if min > max {
            return Err(NazukeError::InvalidConfig(format!(
                "year range {min}..={max} is inverted"
            )));
        }
        if self.video_extensions.is_empty() || self.subtitle_extensions.is_empty() {
            return Err(NazukeError::InvalidConfig(
                "extension sets must not be empty".into(),
            ));
        }
        for ext in self.video_extensions.iter().chain(&self.subtitle_extensions) {
            if !ext.starts_with('.') || ext.len() < 2 {
                return Err(NazukeError::InvalidConfig(format!(
                    "extension {ext:?} must be dotted"
                )));
            }
        }
        if let Some(shared) = self
            .video_extensions
            .iter()
            .find(|ext| self.subtitle_extensions.contains(*ext))
        {
            return Err(NazukeError::InvalidConfig(format!(
                "extension {shared:?} is both video and subtitle"
            )));
        }
        Ok(())
    }
}
