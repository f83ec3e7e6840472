pub mod episode;
pub mod media;
pub mod result;

pub use episode::SeasonEpisode;
pub use media::{FileClass, FileKind, MediaFile, MediaKind};
pub use result::RenameOutcome;
