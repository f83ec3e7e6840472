//! # Path Synthesizer
//!
//! Combines the analyzers with a caller-supplied canonical title and year
//! into per-kind target paths:
//!
//! | Kind | Layout |
//! |------|--------|
//! | Movie | `Title (Year)/Title (Year)[ - Extra][ - Lang].ext` |
//! | TV / Anime | `Title/Season N/Title SxxEyy[ - Extra][ - Lang].ext` |
//! | Default | `Title/original-name.ext` |

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analyzer::language::format_suffix;
use crate::analyzer::{
    ExtensionClassifier, ExtraContentDetector, SeasonEpisodeExtractor, SubtitleLanguageExtractor,
    YearExtractor,
};
use crate::config::RenameConfig;
use crate::error::Result;
use crate::types::{FileClass, FileKind, MediaFile, MediaKind, RenameOutcome, SeasonEpisode};

/// What to rename a batch into.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameRequest {
    /// Layout to synthesize.
    pub kind: MediaKind,
    /// Canonical title from an external catalog.
    pub title: String,
    /// Canonical release year, used by the movie layout.
    #[serde(default)]
    pub year: Option<String>,
}

impl RenameRequest {
    /// Create a request without a year.
    pub fn new(kind: MediaKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            year: None,
        }
    }

    /// Set the release year.
    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }
}

/// Trimmed title and year of a request that passed the empty-title guard.
struct Label<'a> {
    title: &'a str,
    year: &'a str,
}

/// Renaming engine: owns the compiled analyzers and applies them per file.
///
/// A `Renamer` is immutable once built and can be shared across threads.
#[derive(Debug, Clone)]
pub struct Renamer {
    config: RenameConfig,
    classifier: ExtensionClassifier,
    episodes: SeasonEpisodeExtractor,
    extras: ExtraContentDetector,
    languages: SubtitleLanguageExtractor,
    years: YearExtractor,
}

impl Renamer {
    /// Create a renamer with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `NazukeError::InvalidConfig` if the configuration is invalid
    /// and `NazukeError::RegexError` if a pattern fails to compile.
    pub fn new(config: RenameConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            classifier: ExtensionClassifier::new(&config),
            episodes: SeasonEpisodeExtractor::new(&config)?,
            extras: ExtraContentDetector::new()?,
            languages: SubtitleLanguageExtractor::new(&config)?,
            years: YearExtractor::new(&config)?,
            config,
        })
    }

    /// Create a renamer with default configuration.
    pub fn default() -> Result<Self> {
        Self::new(RenameConfig::default())
    }

    /// Get the renamer configuration.
    pub fn config(&self) -> &RenameConfig {
        &self.config
    }

    /// Classifies a file by extension.
    #[must_use]
    pub fn classify(&self, filename: &str) -> FileClass {
        self.classifier.classify(filename)
    }

    /// Resolves season and episode; see [`SeasonEpisodeExtractor::extract`].
    #[must_use]
    pub fn season_episode(&self, filename: &str, folder_path: Option<&str>) -> Option<SeasonEpisode> {
        self.episodes.extract(filename, folder_path)
    }

    /// Extra-content suffix such as `" - NCOP"`.
    #[must_use]
    pub fn extra_suffix(&self, filename: &str) -> String {
        self.extras.detect(filename)
    }

    /// Language suffix such as `" - CHT+EN"` for a file of the given class.
    ///
    /// Subtitles use every recognized token. Video files are tagged only when
    /// `tag_video_languages` is set, and only from bracketed known codes.
    #[must_use]
    pub fn language_suffix(&self, filename: &str, class: &FileClass) -> String {
        match class.kind {
            FileKind::Subtitle => self.languages.extract(filename, &class.ext),
            FileKind::Video if self.config.tag_video_languages => {
                format_suffix(&self.languages.bracketed_languages(filename))
            }
            _ => String::new(),
        }
    }

    /// Release year found in `text`, or empty.
    #[must_use]
    pub fn extract_year(&self, text: &str) -> String {
        self.years.extract(text)
    }

    /// First release year found anywhere in the batch, or empty.
    #[must_use]
    pub fn extract_year_from_files(&self, files: &[MediaFile]) -> String {
        self.years.extract_from_files(files)
    }

    /// Plans target paths for a batch without touching it.
    ///
    /// Returns one outcome per input file, in input order. Every outcome is
    /// skipped when the title is blank.
    ///
    /// ```
    /// use nazuke_core::{MediaFile, MediaKind, RenameRequest, Renamer};
    ///
    /// let renamer = Renamer::default().unwrap();
    /// let files = vec![MediaFile::new("Show.S01E03.mkv", "Show.S01E03.mkv", 0)];
    /// let plan = renamer.plan(&files, &RenameRequest::new(MediaKind::Tv, "Show"));
    ///
    /// assert_eq!(plan[0].target.as_deref(), Some("Show/Season 1/Show S01E03.mkv"));
    /// ```
    #[must_use]
    pub fn plan(&self, files: &[MediaFile], request: &RenameRequest) -> Vec<RenameOutcome> {
        match self.label(request) {
            Some(label) => files
                .iter()
                .enumerate()
                .map(|(index, file)| self.plan_file(index, file, request.kind, &label))
                .collect(),
            None => skip_all(files),
        }
    }

    /// Same as [`plan`](Self::plan), computed across the rayon thread pool.
    #[cfg(feature = "parallel")]
    #[must_use]
    pub fn plan_parallel(&self, files: &[MediaFile], request: &RenameRequest) -> Vec<RenameOutcome> {
        use rayon::prelude::*;

        match self.label(request) {
            Some(label) => files
                .par_iter()
                .enumerate()
                .map(|(index, file)| self.plan_file(index, file, request.kind, &label))
                .collect(),
            None => skip_all(files),
        }
    }

    /// Renames a batch in place by writing each media file's `target_name`.
    ///
    /// Skipped files keep whatever target they had. Returns how many
    /// descriptors were written.
    pub fn rename(&self, files: &mut [MediaFile], request: &RenameRequest) -> usize {
        let plan = self.plan(files, request);
        apply(files, plan)
    }

    fn label<'a>(&self, request: &'a RenameRequest) -> Option<Label<'a>> {
        let title = request.title.trim();
        if title.is_empty() {
            debug!(kind = %request.kind, "blank title, skipping rename pass");
            return None;
        }
        let year = request.year.as_deref().map_or("", str::trim);
        Some(Label { title, year })
    }

    fn plan_file(
        &self,
        index: usize,
        file: &MediaFile,
        kind: MediaKind,
        label: &Label<'_>,
    ) -> RenameOutcome {
        let original = file.source_name();
        let class = self.classify(original);
        if !class.is_media() {
            return RenameOutcome::skipped(index, original);
        }

        let title = label.title;
        let ext = &class.ext;
        let mut episode = None;
        let target = match kind {
            MediaKind::Movie => {
                let stem = if label.year.is_empty() {
                    title.to_string()
                } else {
                    format!("{title} ({})", label.year)
                };
                format!(
                    "{stem}/{stem}{}{}{ext}",
                    self.extra_suffix(original),
                    self.language_suffix(original, &class)
                )
            }
            _ if kind.is_episodic() => {
                let folder = file.folder_path();
                episode = self.season_episode(original, Some(&folder));
                match episode {
                    Some(se) => format!(
                        "{title}/Season {}/{title} {se}{}{}{ext}",
                        se.season,
                        self.extra_suffix(original),
                        self.language_suffix(original, &class)
                    ),
                    None => format!("{title}/{original}"),
                }
            }
            _ => format!("{title}/{original}"),
        };

        debug!(index, name = original, target = %target, "planned rename");
        RenameOutcome {
            index,
            name: original.to_string(),
            target: Some(target),
            episode,
        }
    }
}

fn skip_all(files: &[MediaFile]) -> Vec<RenameOutcome> {
    files
        .iter()
        .enumerate()
        .map(|(index, file)| RenameOutcome::skipped(index, file.source_name()))
        .collect()
}

/// Writes planned targets back onto the batch they were planned from.
///
/// Outcomes whose index is out of range are ignored. Returns how many
/// descriptors were written.
pub fn apply(files: &mut [MediaFile], plan: Vec<RenameOutcome>) -> usize {
    let mut written = 0;
    for outcome in plan {
        if let (Some(target), Some(file)) = (outcome.target, files.get_mut(outcome.index)) {
            file.target_name = target;
            written += 1;
        }
    }
    written
}

/// Convenience function to rename a batch in place with default settings.
///
/// # Errors
///
/// Returns an error only if the default renamer cannot be built.
pub fn rename(
    files: &mut [MediaFile],
    kind: MediaKind,
    title: &str,
    year: Option<&str>,
) -> Result<usize> {
    let renamer = Renamer::default()?;
    let mut request = RenameRequest::new(kind, title);
    request.year = year.map(str::to_string);
    Ok(renamer.rename(files, &request))
}

/// Convenience function to extract a year with default settings.
///
/// # Errors
///
/// Returns an error only if the year pattern cannot be compiled.
pub fn extract_year(text: &str) -> Result<String> {
    Ok(YearExtractor::new(&RenameConfig::default())?.extract(text))
}

/// Convenience function to extract the first year of a batch with default settings.
///
/// # Errors
///
/// Returns an error only if the year pattern cannot be compiled.
pub fn extract_year_from_files(files: &[MediaFile]) -> Result<String> {
    Ok(YearExtractor::new(&RenameConfig::default())?.extract_from_files(files))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renamer() -> Renamer {
        Renamer::default().unwrap()
    }

    fn file(name: &str) -> MediaFile {
        MediaFile::new(name, name, 0)
    }

    fn target_of(kind: MediaKind, title: &str, year: Option<&str>, f: MediaFile) -> Option<String> {
        let mut request = RenameRequest::new(kind, title);
        request.year = year.map(str::to_string);
        renamer().plan(&[f], &request).remove(0).target
    }

    #[test]
    fn movie_with_year() {
        assert_eq!(
            target_of(MediaKind::Movie, "Interstellar", Some("2014"), file("movie.mkv")).as_deref(),
            Some("Interstellar (2014)/Interstellar (2014).mkv")
        );
    }

    #[test]
    fn movie_without_year() {
        assert_eq!(
            target_of(MediaKind::Movie, "Interstellar", Some("  "), file("movie.mkv")).as_deref(),
            Some("Interstellar/Interstellar.mkv")
        );
    }

    #[test]
    fn movie_extra_and_subtitle_language() {
        assert_eq!(
            target_of(MediaKind::Movie, "Your Name", Some("2016"), file("[Group][PV01].mp4"))
                .as_deref(),
            Some("Your Name (2016)/Your Name (2016) - PV01.mp4")
        );
        assert_eq!(
            target_of(MediaKind::Movie, "Your Name", Some("2016"), file("Kimi.no.Na.wa.JPSC.ass"))
                .as_deref(),
            Some("Your Name (2016)/Your Name (2016) - JP+CHS.ass")
        );
    }

    #[test]
    fn tv_layout() {
        assert_eq!(
            target_of(MediaKind::Tv, "Show", None, file("Show.S01E03.mkv")).as_deref(),
            Some("Show/Season 1/Show S01E03.mkv")
        );
    }

    #[test]
    fn season_folder_is_unpadded() {
        assert_eq!(
            target_of(MediaKind::Tv, "Show", None, file("Show.S12E101.mkv")).as_deref(),
            Some("Show/Season 12/Show S12E101.mkv")
        );
    }

    #[test]
    fn anime_layout_with_video_language_tag() {
        assert_eq!(
            target_of(
                MediaKind::Anime,
                "Anime",
                None,
                file("[Group] Anime - 05 [1080p][CHT].mp4")
            )
            .as_deref(),
            Some("Anime/Season 1/Anime S01E05 - CHT.mp4")
        );
    }

    #[test]
    fn dotted_release_markers_do_not_tag_videos() {
        let files = [
            file("Movie.2019.TC.x264.mkv"),
            file("Movie.2019.SC.1080p.mp4"),
            file("Some.Movie.EN.Cut.mkv"),
        ];
        let request = RenameRequest::new(MediaKind::Movie, "Movie").with_year("2019");
        let targets: Vec<_> = renamer()
            .plan(&files, &request)
            .into_iter()
            .map(|o| o.target)
            .collect();

        assert_eq!(
            targets,
            vec![
                Some("Movie (2019)/Movie (2019).mkv".to_string()),
                Some("Movie (2019)/Movie (2019).mp4".to_string()),
                Some("Movie (2019)/Movie (2019).mkv".to_string()),
            ]
        );
    }

    #[test]
    fn dotted_codes_still_tag_subtitles() {
        assert_eq!(
            target_of(MediaKind::Movie, "Movie", Some("2019"), file("Movie.2019.FR.srt")).as_deref(),
            Some("Movie (2019)/Movie (2019) - FR.srt")
        );
    }

    #[test]
    fn video_language_tagging_can_be_disabled() {
        let config = RenameConfig::new().with_tag_video_languages(false);
        let renamer = Renamer::new(config).unwrap();
        let plan = renamer.plan(
            &[file("[Group] Anime - 05 [1080p][CHT].mp4")],
            &RenameRequest::new(MediaKind::Anime, "Anime"),
        );
        assert_eq!(plan[0].target.as_deref(), Some("Anime/Season 1/Anime S01E05.mp4"));
    }

    #[test]
    fn anime_extra_and_subtitle() {
        assert_eq!(
            target_of(
                MediaKind::Anime,
                "Anime",
                None,
                file("[Group] Anime - 05 [1080p][CHS+JP].ass")
            )
            .as_deref(),
            Some("Anime/Season 1/Anime S01E05 - CHS+JP.ass")
        );
    }

    #[test]
    fn folder_path_supplies_season() {
        let f = MediaFile::new(
            "[Group] Anime - 05 [1080p].mkv",
            r"Anime\Season 2\[Group] Anime - 05 [1080p].mkv",
            0,
        );
        assert_eq!(
            target_of(MediaKind::Anime, "Anime", None, f).as_deref(),
            Some("Anime/Season 2/Anime S02E05.mkv")
        );
    }

    #[test]
    fn unresolved_episode_passes_name_through() {
        assert_eq!(
            target_of(MediaKind::Tv, "Show", None, file("Behind the Scenes.mkv")).as_deref(),
            Some("Show/Behind the Scenes.mkv")
        );
    }

    #[test]
    fn default_kind_passes_name_through() {
        assert_eq!(
            target_of(MediaKind::Default, "Stuff", None, file("Show.S01E03.mkv")).as_deref(),
            Some("Stuff/Show.S01E03.mkv")
        );
    }

    #[test]
    fn non_media_files_are_skipped() {
        assert_eq!(target_of(MediaKind::Tv, "Show", None, file("notes.txt")), None);
        assert_eq!(target_of(MediaKind::Movie, "Film", None, file("poster.jpg")), None);
    }

    #[test]
    fn name_falls_back_to_path() {
        let f = MediaFile::new("", "Show.S02E01.mkv", 0);
        assert_eq!(
            target_of(MediaKind::Tv, "Show", None, f).as_deref(),
            Some("Show/Season 2/Show S02E01.mkv")
        );
    }

    #[test]
    fn title_is_trimmed() {
        assert_eq!(
            target_of(MediaKind::Default, "  Show  ", None, file("a.mkv")).as_deref(),
            Some("Show/a.mkv")
        );
    }

    #[test]
    fn blank_title_is_a_no_op() {
        let mut files = vec![file("Show.S01E03.mkv")];
        files[0].target_name = "previous".into();
        let written = renamer().rename(&mut files, &RenameRequest::new(MediaKind::Tv, "   "));
        assert_eq!(written, 0);
        assert_eq!(files[0].target_name, "previous");
    }

    #[test]
    fn rename_leaves_skipped_targets_and_selection_alone() {
        let mut files = vec![file("Show.S01E03.mkv"), file("notes.txt")];
        files[1].target_name = "keep".into();
        files[1].selected = true;

        let written = renamer().rename(&mut files, &RenameRequest::new(MediaKind::Tv, "Show"));

        assert_eq!(written, 1);
        assert_eq!(files[0].target_name, "Show/Season 1/Show S01E03.mkv");
        assert_eq!(files[1].target_name, "keep");
        assert!(files[1].selected);
        assert!(!files[0].selected);
    }

    #[test]
    fn plan_records_episode() {
        let plan = renamer().plan(
            &[file("OVA - 01.mkv")],
            &RenameRequest::new(MediaKind::Anime, "Anime"),
        );
        assert_eq!(plan[0].episode, Some(SeasonEpisode::new(0, 1)));
        assert_eq!(plan[0].target.as_deref(), Some("Anime/Season 0/Anime S00E01.mkv"));
    }

    #[test]
    fn apply_ignores_out_of_range_outcomes() {
        let mut files = vec![file("a.mkv")];
        let plan = vec![RenameOutcome {
            index: 5,
            name: "x".into(),
            target: Some("y".into()),
            episode: None,
        }];
        assert_eq!(apply(&mut files, plan), 0);
        assert!(files[0].target_name.is_empty());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = RenameConfig::new().with_year_range(2000, 1990);
        assert!(Renamer::new(config).is_err());
    }

    #[test]
    fn convenience_functions() {
        let mut files = vec![file("movie.mkv")];
        let written = rename(&mut files, MediaKind::Movie, "Interstellar", Some("2014")).unwrap();
        assert_eq!(written, 1);
        assert_eq!(files[0].target_name, "Interstellar (2014)/Interstellar (2014).mkv");

        assert_eq!(extract_year("Movie.Title.2023.mkv").unwrap(), "2023");
        assert_eq!(
            extract_year_from_files(&[MediaFile::new("a.mkv", "Title.2001.BD/a.mkv", 0)]).unwrap(),
            "2001"
        );
        assert_eq!(
            extract_year_from_files(&[MediaFile::new("a.mkv", "Title.2001/a.mkv", 0)]).unwrap(),
            ""
        );
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_plan_matches_sequential() {
        let files: Vec<MediaFile> = (1..=40)
            .map(|n| file(&format!("[Group] Anime - {n:02} [1080p].mkv")))
            .collect();
        let request = RenameRequest::new(MediaKind::Anime, "Anime");
        let r = renamer();
        assert_eq!(r.plan_parallel(&files, &request), r.plan(&files, &request));
    }
}
