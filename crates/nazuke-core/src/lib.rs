//! # Nazuke Core
//!
//! Filename inference for media libraries. Given the raw file names of a
//! downloaded release and a canonical title, Nazuke works out season and
//! episode numbers, extra-content markers and subtitle languages, then
//! synthesizes Plex/Jellyfin-style target paths.
//!
//! ## Quick Start
//!
//! ```rust
//! use nazuke_core::{MediaFile, MediaKind, RenameRequest, Renamer};
//!
//! let renamer = Renamer::default().unwrap();
//! let mut files = vec![
//!     MediaFile::new("[Group] Anime - 05 [1080p][CHT].mp4", "[Group] Anime - 05 [1080p][CHT].mp4", 0),
//!     MediaFile::new("readme.txt", "readme.txt", 0),
//! ];
//!
//! let written = renamer.rename(&mut files, &RenameRequest::new(MediaKind::Anime, "Anime"));
//!
//! assert_eq!(written, 1);
//! assert_eq!(files[0].target_name, "Anime/Season 1/Anime S01E05 - CHT.mp4");
//! assert!(files[1].target_name.is_empty());
//! ```
pub mod analyzer;
pub mod config;
pub mod error;
pub mod renamer;
pub mod types;

// Re-export primary API
pub use analyzer::{
    ExtensionClassifier, ExtraContentDetector, SeasonEpisodeExtractor, SubtitleLanguageExtractor,
    YearExtractor, classify, extension_of, is_media_file, is_subtitle_file, parse_chinese_numeral,
    render_chinese_numeral,
};
pub use config::RenameConfig;
pub use error::{NazukeError, Result};
pub use renamer::{RenameRequest, Renamer, apply, extract_year, extract_year_from_files, rename};
pub use types::{FileClass, FileKind, MediaFile, MediaKind, RenameOutcome, SeasonEpisode};
