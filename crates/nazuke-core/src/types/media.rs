use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NazukeError;

/// Which naming layout a batch should be synthesized into.
///
/// Supplied by the caller; the engine never infers it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// `Title (Year)/Title (Year).ext`
    Movie,
    /// `Title/Season N/Title SxxEyy.ext`
    Tv,
    /// Same layout as [`MediaKind::Tv`].
    Anime,
    /// `Title/original-name.ext`
    #[default]
    Default,
}

impl MediaKind {
    /// Returns `true` for kinds that are laid out by season and episode.
    #[must_use]
    pub fn is_episodic(self) -> bool {
        matches!(self, Self::Tv | Self::Anime)
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Movie => write!(f, "movie"),
            Self::Tv => write!(f, "tv"),
            Self::Anime => write!(f, "anime"),
            Self::Default => write!(f, "default"),
        }
    }
}

impl FromStr for MediaKind {
    type Err = NazukeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "movie" => Ok(Self::Movie),
            "tv" => Ok(Self::Tv),
            "anime" => Ok(Self::Anime),
            "default" => Ok(Self::Default),
            _ => Err(NazukeError::UnknownMediaKind(s.to_string())),
        }
    }
}

/// One file of a caller-supplied batch, e.g. an entry of a torrent file list.
///
/// `target_name` is the only field the engine writes. `selected` belongs to
/// the caller and is carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaFile {
    /// File name as listed by the source.
    pub name: String,

    /// Path relative to the release root, `/` or `\` separated.
    #[serde(default)]
    pub path: String,

    /// Size in bytes.
    #[serde(default)]
    pub size: u64,

    /// Synthesized target path, empty until a rename pass fills it.
    #[serde(default, alias = "targetName", alias = "newName")]
    pub target_name: String,

    /// Caller-owned selection state.
    #[serde(default, alias = "checked")]
    pub selected: bool,
}

impl MediaFile {
    /// Creates a descriptor from a name and a path.
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            size,
            target_name: String::new(),
            selected: false,
        }
    }

    /// Creates a descriptor from a relative path, taking the last segment as the name.
    #[must_use]
    pub fn from_path(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = path
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default()
            .to_string();
        Self::new(name, path, 0)
    }

    /// The name analyzers run against: `name`, or `path` when the name is empty.
    #[must_use]
    pub fn source_name(&self) -> &str {
        if self.name.is_empty() {
            &self.path
        } else {
            &self.name
        }
    }

    /// Every path segment but the last, with `\` normalized to `/`.
    ///
    /// Empty when the path has a single segment.
    #[must_use]
    pub fn folder_path(&self) -> String {
        let normalized = self.path.replace('\\', "/");
        match normalized.rfind('/') {
            Some(pos) => normalized[..pos].to_string(),
            None => String::new(),
        }
    }
}

/// Broad classification of a file by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileKind {
    Video,
    Subtitle,
    Other,
}

/// Output of the extension classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileClass {
    /// Lower-cased dotted extension (`".mkv"`), empty when the name has none.
    pub ext: String,
    /// What the extension denotes.
    pub kind: FileKind,
}

impl FileClass {
    /// Video or subtitle.
    #[must_use]
    pub fn is_media(&self) -> bool {
        matches!(self.kind, FileKind::Video | FileKind::Subtitle)
    }

    #[must_use]
    pub fn is_subtitle(&self) -> bool {
        self.kind == FileKind::Subtitle
    }
}
