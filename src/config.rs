use crate::highscores::HighScores;
use crate::options::Options;
use crate::util::{LoadError, SaveError};
use serde::Deserialize;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Default options when no options file is present
    #[serde(default)]
    pub(crate) options: Options,

    /// Settings about data files
    #[serde(default)]
    pub(crate) files: FileConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("fruitsnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Return the filepath at which gameplay options should be stored: the
    /// file given in the configuration or, if that is not set, the default
    /// options file path.  Return `None` if no path is present in the
    /// configuration and the default path could not be computed.
    fn options_file(&self) -> Option<Cow<'_, Path>> {
        self.files
            .options_file
            .as_deref()
            .map(Cow::from)
            .or_else(|| Options::default_path().map(Cow::from))
    }

    /// Likewise for the high scores file
    fn high_scores_file(&self) -> Option<Cow<'_, Path>> {
        self.files
            .high_scores_file
            .as_deref()
            .map(Cow::from)
            .or_else(|| HighScores::default_path().map(Cow::from))
    }

    /// The file to write log messages to, if any
    pub(crate) fn log_file(&self) -> Option<&Path> {
        self.files.log_file.as_deref()
    }

    /// Load gameplay options from a file.  If the file does not exist, `self.options`
    /// is returned.
    ///
    /// If `self.files.save_options` is `false`, `self.options` is returned
    /// without reading anything from disk.
    pub(crate) fn load_options(&self) -> Result<Options, LoadError> {
        let r = if !self.files.save_options {
            Ok(None)
        } else if let Some(p) = self.options_file() {
            Options::load(&p)
        } else {
            Err(LoadError::no_path("options"))
        };
        match r {
            Ok(Some(opts)) => Ok(opts),
            Ok(None) => Ok(self.options),
            Err(e) => Err(e),
        }
    }

    /// Save the given gameplay options to a file.
    ///
    /// If `self.files.save_options` is `false`, nothing is saved.
    pub(crate) fn save_options(&self, options: Options) -> Result<(), SaveError> {
        if !self.files.save_options {
            return Ok(());
        }
        if let Some(p) = self.options_file() {
            options.save(&p)?;
            tracing::debug!(path = %p.display(), "saved options");
            Ok(())
        } else {
            Err(SaveError::no_path("options"))
        }
    }

    /// Load the high score table.  A missing file, or high-score saving
    /// being turned off, yields an empty table.
    pub(crate) fn load_high_scores(&self) -> Result<HighScores, LoadError> {
        if !self.files.save_high_scores {
            return Ok(HighScores::default());
        }
        if let Some(p) = self.high_scores_file() {
            HighScores::load(&p)
        } else {
            Err(LoadError::no_path("high scores"))
        }
    }

    /// Save the high score table.
    ///
    /// If `self.files.save_high_scores` is `false`, nothing is saved.
    pub(crate) fn save_high_scores(&self, high_scores: &HighScores) -> Result<(), SaveError> {
        if !self.files.save_high_scores {
            return Ok(());
        }
        if let Some(p) = self.high_scores_file() {
            high_scores.save(&p)?;
            tracing::debug!(path = %p.display(), "saved high scores");
            Ok(())
        } else {
            Err(SaveError::no_path("high scores"))
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(try_from = "RawFileConfig")]
pub(crate) struct FileConfig {
    /// Path at which gameplay options should be stored
    options_file: Option<PathBuf>,

    /// Whether to load & save gameplay options in a file
    save_options: bool,

    /// Path at which high scores should be stored
    high_scores_file: Option<PathBuf>,

    /// Whether to load & save high scores in a file
    save_high_scores: bool,

    /// Path to append log messages to
    log_file: Option<PathBuf>,
}

impl FileConfig {
    /// Override the log file path, as with the `--log-file` command-line
    /// option
    pub(crate) fn set_log_file(&mut self, path: PathBuf) {
        self.log_file = Some(path);
    }
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig {
            options_file: None,
            save_options: true,
            high_scores_file: None,
            save_high_scores: true,
            log_file: None,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawFileConfig {
    options_file: Option<String>,
    save_options: bool,
    high_scores_file: Option<String>,
    save_high_scores: bool,
    log_file: Option<String>,
}

impl Default for RawFileConfig {
    fn default() -> RawFileConfig {
        RawFileConfig {
            options_file: None,
            save_options: true,
            high_scores_file: None,
            save_high_scores: true,
            log_file: None,
        }
    }
}

impl TryFrom<RawFileConfig> for FileConfig {
    type Error = std::io::Error;

    fn try_from(value: RawFileConfig) -> Result<FileConfig, std::io::Error> {
        Ok(FileConfig {
            options_file: value.options_file.map(expanduser::expanduser).transpose()?,
            save_options: value.save_options,
            high_scores_file: value
                .high_scores_file
                .map(expanduser::expanduser)
                .transpose()?,
            save_high_scores: value.save_high_scores,
            log_file: value.log_file.map(expanduser::expanduser).transpose()?,
        })
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::GridSize;
    use pretty_assertions::assert_eq;
    use std::num::NonZeroU32;

    #[test]
    fn parse_empty() {
        let cfg = toml::from_str::<Config>("").unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn parse_full() {
        let cfg = toml::from_str::<Config>(concat!(
            "[options]\n",
            "wraparound = true\n",
            "specials = false\n",
            "grid-size = \"small\"\n",
            "\n",
            "[files]\n",
            "options-file = \"/tmp/fs/options.json\"\n",
            "save-options = false\n",
            "high-scores-file = \"/tmp/fs/scores.json\"\n",
            "save-high-scores = false\n",
            "log-file = \"/tmp/fs/fruitsnake.log\"\n",
        ))
        .unwrap();
        assert_eq!(
            cfg,
            Config {
                options: Options {
                    wraparound: true,
                    specials: false,
                    grid_size: GridSize::Small,
                },
                files: FileConfig {
                    options_file: Some(PathBuf::from("/tmp/fs/options.json")),
                    save_options: false,
                    high_scores_file: Some(PathBuf::from("/tmp/fs/scores.json")),
                    save_high_scores: false,
                    log_file: Some(PathBuf::from("/tmp/fs/fruitsnake.log")),
                },
            }
        );
        assert_eq!(cfg.log_file(), Some(Path::new("/tmp/fs/fruitsnake.log")));
    }

    #[test]
    fn load_missing() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join("config.toml");
        assert_eq!(Config::load(&path, true).unwrap(), Config::default());
        assert!(matches!(
            Config::load(&path, false),
            Err(ConfigError::Read(_))
        ));
    }

    #[test]
    fn load_invalid() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join("config.toml");
        fs_err::write(&path, "[options]\ngrid-size = \"enormous\"\n").unwrap();
        assert!(matches!(
            Config::load(&path, true),
            Err(ConfigError::Parse(_))
        ));
    }

    fn tmp_config(dir: &Path) -> Config {
        Config {
            options: Options {
                wraparound: true,
                ..Options::default()
            },
            files: FileConfig {
                options_file: Some(dir.join("options.json")),
                high_scores_file: Some(dir.join("scores.json")),
                ..FileConfig::default()
            },
        }
    }

    #[test]
    fn options_fall_back_to_config() {
        let tmpdir = tempfile::tempdir().unwrap();
        let cfg = tmp_config(tmpdir.path());
        assert_eq!(cfg.load_options().unwrap(), cfg.options);
        let opts = Options {
            grid_size: GridSize::Medium,
            ..Options::default()
        };
        cfg.save_options(opts).unwrap();
        assert_eq!(cfg.load_options().unwrap(), opts);
    }

    #[test]
    fn options_not_saved() {
        let tmpdir = tempfile::tempdir().unwrap();
        let mut cfg = tmp_config(tmpdir.path());
        cfg.files.save_options = false;
        cfg.save_options(Options::default()).unwrap();
        assert!(!tmpdir.path().join("options.json").exists());
        assert_eq!(cfg.load_options().unwrap(), cfg.options);
    }

    #[test]
    fn high_scores_roundtrip() {
        let tmpdir = tempfile::tempdir().unwrap();
        let cfg = tmp_config(tmpdir.path());
        let mut scores = cfg.load_high_scores().unwrap();
        assert_eq!(scores, HighScores::default());
        scores.set(Options::default(), NonZeroU32::new(42).unwrap());
        cfg.save_high_scores(&scores).unwrap();
        assert_eq!(cfg.load_high_scores().unwrap(), scores);
    }
}
