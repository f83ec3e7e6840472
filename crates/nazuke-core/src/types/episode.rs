use std::fmt;

use serde::{Deserialize, Serialize};

/// A resolved season/episode pair.
///
/// Season `0` holds specials and OVAs. Episodes are 1-based in practice but
/// the value is taken verbatim from the filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeasonEpisode {
    /// Season number (`0` for specials).
    pub season: u32,
    /// Episode number within the season.
    pub episode: u32,
}

impl SeasonEpisode {
    /// Creates a new pair.
    #[must_use]
    pub fn new(season: u32, episode: u32) -> Self {
        Self { season, episode }
    }
}

impl fmt::Display for SeasonEpisode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{:02}E{:02}", self.season, self.episode)
    }
}
