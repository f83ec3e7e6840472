use serde::{Deserialize, Serialize};

use super::episode::SeasonEpisode;

/// The result of planning one file of a batch.
///
/// Outcomes are keyed by the descriptor's position in the input batch, so a
/// plan can be applied back onto the same slice or joined with any other
/// per-file data the caller keeps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameOutcome {
    /// Position of the descriptor in the input batch.
    pub index: usize,

    /// The name the analyzers ran against.
    pub name: String,

    /// Synthesized target path. `None` when the file was skipped.
    pub target: Option<String>,

    /// Season/episode resolved for episodic kinds.
    pub episode: Option<SeasonEpisode>,
}

impl RenameOutcome {
    /// Creates an outcome for a skipped file.
    #[must_use]
    pub fn skipped(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
            target: None,
            episode: None,
        }
    }

    /// Returns `true` if a target was synthesized.
    #[must_use]
    pub fn is_renamed(&self) -> bool {
        self.target.is_some()
    }
}

impl std::fmt::Display for RenameOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.target {
            Some(ref target) => write!(f, "#{} {:?} -> {:?}", self.index, self.name, target)?,
            None => write!(f, "#{} {:?} (skipped)", self.index, self.name)?,
        }
        if let Some(ep) = self.episode {
            write!(f, " [{ep}]")?;
        }
        Ok(())
    }
}
