//! Independent filename analyzers composed by the [`Renamer`](crate::Renamer).

pub mod episode;
pub mod extension;
pub mod extra;
pub mod language;
pub mod numeral;
pub mod year;

pub use episode::SeasonEpisodeExtractor;
pub use extension::{ExtensionClassifier, classify, extension_of, is_media_file, is_subtitle_file};
pub use extra::ExtraContentDetector;
pub use language::SubtitleLanguageExtractor;
pub use numeral::{parse_chinese_numeral, render_chinese_numeral};
pub use year::YearExtractor;
