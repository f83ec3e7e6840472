//! # Extension Classifier
//!
//! Gates every rename: only video and subtitle files are touched.

use crate::config::{RenameConfig, SUBTITLE_EXTENSIONS, VIDEO_EXTENSIONS};
use crate::types::{FileClass, FileKind};

/// Extracts the trailing `.[A-Za-z0-9]+` token, lower-cased with its dot.
///
/// Returns an empty string when the name has no such suffix.
///
/// ```
/// use nazuke_core::analyzer::extension::extension_of;
///
/// assert_eq!(extension_of("Show.S01E01.MKV"), ".mkv");
/// assert_eq!(extension_of("README"), "");
/// assert_eq!(extension_of("archive.tar-gz"), "");
/// ```
#[must_use]
pub fn extension_of(filename: &str) -> String {
    let tail = filename
        .bytes()
        .rev()
        .take_while(|b| b.is_ascii_alphanumeric())
        .count();
    if tail == 0 || tail >= filename.len() {
        return String::new();
    }
    let dot = filename.len() - tail - 1;
    match filename.as_bytes()[dot] {
        b'.' => filename[dot..].to_ascii_lowercase(),
        _ => String::new(),
    }
}

/// Classifies files against configurable video and subtitle extension sets.
#[derive(Debug, Clone)]
pub struct ExtensionClassifier {
    video: Vec<String>,
    subtitle: Vec<String>,
}

impl Default for ExtensionClassifier {
    fn default() -> Self {
        Self {
            video: VIDEO_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            subtitle: SUBTITLE_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ExtensionClassifier {
    /// Builds a classifier from the extension sets of `config`.
    #[must_use]
    pub fn new(config: &RenameConfig) -> Self {
        Self {
            video: config.video_extensions.clone(),
            subtitle: config.subtitle_extensions.clone(),
        }
    }

    /// Classifies a file by name.
    #[must_use]
    pub fn classify(&self, filename: &str) -> FileClass {
        let ext = extension_of(filename);
        let kind = self.kind_of(&ext);
        FileClass { ext, kind }
    }

    /// Classifies a lower-cased dotted extension.
    #[must_use]
    pub fn kind_of(&self, ext: &str) -> FileKind {
        if ext.is_empty() {
            FileKind::Other
        } else if self.video.iter().any(|v| v == ext) {
            FileKind::Video
        } else if self.subtitle.iter().any(|s| s == ext) {
            FileKind::Subtitle
        } else {
            FileKind::Other
        }
    }
}

/// Classifies a file name against the default extension sets.
#[must_use]
pub fn classify(filename: &str) -> FileClass {
    ExtensionClassifier::default().classify(filename)
}

/// Returns `true` if `ext` (dotted, lower-case) is a default video or subtitle extension.
#[must_use]
pub fn is_media_file(ext: &str) -> bool {
    VIDEO_EXTENSIONS.contains(&ext) || SUBTITLE_EXTENSIONS.contains(&ext)
}

/// Returns `true` if `ext` (dotted, lower-case) is a default subtitle extension.
#[must_use]
pub fn is_subtitle_file(ext: &str) -> bool {
    SUBTITLE_EXTENSIONS.contains(&ext)
}
