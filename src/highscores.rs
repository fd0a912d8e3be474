use crate::options::Options;
use crate::util::{load_json, save_json, LoadError, SaveError};
use serde::{de::Deserializer, ser::Serializer, Deserialize, Serialize};
use std::collections::HashMap;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

/// The best score achieved for each set of gameplay options
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct HighScores(HashMap<Options, NonZeroU32>);

impl HighScores {
    /// Return the default path at which high scores are saved between runs
    pub(crate) fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("fruitsnake").join("highscores.json"))
    }

    /// Read the high score table from the given file.  A missing file yields
    /// an empty table.
    pub(crate) fn load(path: &Path) -> Result<HighScores, LoadError> {
        load_json(path, "high scores").map(Option::unwrap_or_default)
    }

    pub(crate) fn save(&self, path: &Path) -> Result<(), SaveError> {
        save_json(self, path, "high scores")
    }

    pub(crate) fn get(&self, opts: Options) -> Option<NonZeroU32> {
        self.0.get(&opts).copied()
    }

    pub(crate) fn set(&mut self, opts: Options, score: NonZeroU32) {
        self.0.insert(opts, score);
    }

    /// Record `score` for `opts` if it beats the current high score.  Returns
    /// `true` if the table changed.
    pub(crate) fn submit(&mut self, opts: Options, score: u32) -> bool {
        let Some(score) = NonZeroU32::new(score) else {
            return false;
        };
        if self.get(opts).is_some_and(|best| best >= score) {
            return false;
        }
        self.set(opts, score);
        true
    }

    fn to_json_array(&self) -> Vec<HighScoreEntry> {
        self.0
            .iter()
            .map(|(&options, &score)| HighScoreEntry { options, score })
            .collect()
    }

    fn from_json_array(array: Vec<HighScoreEntry>) -> HighScores {
        HighScores(
            array
                .into_iter()
                .map(|hse| (hse.options, hse.score))
                .collect(),
        )
    }
}

impl Serialize for HighScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json_array().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for HighScores {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<HighScoreEntry>::deserialize(deserializer).map(HighScores::from_json_array)
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
struct HighScoreEntry {
    options: Options,
    score: NonZeroU32,
}
