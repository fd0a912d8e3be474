use crate::config::Config;
use crate::consts;
use crate::highscores::HighScores;
use crate::options::Options;
use enum_map::Enum;
use ratatui::layout::{Flex, Layout, Rect, Size};
use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;
use thiserror::Error;

/// State shared by every screen of the application
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Globals {
    /// The gameplay options most recently chosen in the main menu
    pub(crate) options: Options,

    /// Program configuration
    pub(crate) config: Config,

    /// The best scores achieved so far, per set of options
    pub(crate) high_scores: HighScores,
}

pub(crate) fn get_display_area(buffer_area: Rect) -> Rect {
    center_rect(buffer_area, consts::DISPLAY_SIZE)
}

/// Return a `Rect` of the given size centered within `area`.  If `area` is
/// too small, the result is clipped to fit.
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [area] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(area);
    area
}

/// Ordered traversal of fieldless enums
pub(crate) trait EnumExt: Enum + Sized {
    fn iter() -> impl Iterator<Item = Self> {
        (0..Self::LENGTH).map(Self::from_usize)
    }

    fn min() -> Self {
        Self::from_usize(0)
    }

    fn max() -> Self {
        Self::from_usize(Self::LENGTH - 1)
    }

    fn next(self) -> Option<Self> {
        let i = self.into_usize() + 1;
        (i < Self::LENGTH).then(|| Self::from_usize(i))
    }

    fn prev(self) -> Option<Self> {
        self.into_usize().checked_sub(1).map(Self::from_usize)
    }
}

impl<T: Enum> EnumExt for T {}

/// Read & deserialize a JSON file.  Returns `Ok(None)` if the file does not
/// exist.
pub(crate) fn load_json<T: DeserializeOwned>(
    path: &Path,
    what: &'static str,
) -> Result<Option<T>, LoadError> {
    let src = match fs_err::read(path) {
        Ok(src) => src,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(LoadError::read(what, e)),
    };
    serde_json::from_slice(&src)
        .map(Some)
        .map_err(|e| LoadError::deserialize(what, e))
}

/// Serialize a value as JSON and write it to a file, creating any missing
/// parent directories
pub(crate) fn save_json<T: Serialize>(
    value: &T,
    path: &Path,
    what: &'static str,
) -> Result<(), SaveError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent).map_err(|e| SaveError::mkdir(what, e))?;
    }
    let mut src = serde_json::to_string(value).map_err(|e| SaveError::serialize(what, e))?;
    src.push('\n');
    fs_err::write(path, &src).map_err(|e| SaveError::write(what, e))?;
    Ok(())
}

#[derive(Debug, Error)]
#[error("Failed to save {what} to disk")]
pub(crate) struct SaveError {
    what: &'static str,
    #[source]
    source: SaveErrorSource,
}

impl SaveError {
    pub(crate) fn no_path(what: &'static str) -> Self {
        SaveError {
            what,
            source: SaveErrorSource::NoPath,
        }
    }

    fn mkdir(what: &'static str, e: std::io::Error) -> Self {
        SaveError {
            what,
            source: SaveErrorSource::Mkdir(e),
        }
    }

    fn serialize(what: &'static str, e: serde_json::Error) -> Self {
        SaveError {
            what,
            source: SaveErrorSource::Serialize(e),
        }
    }

    fn write(what: &'static str, e: std::io::Error) -> Self {
        SaveError {
            what,
            source: SaveErrorSource::Write(e),
        }
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to determine path to local data directory")]
    NoPath,
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize data")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write file")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("Failed to read {what} from disk")]
pub(crate) struct LoadError {
    what: &'static str,
    #[source]
    source: LoadErrorSource,
}

impl LoadError {
    pub(crate) fn no_path(what: &'static str) -> Self {
        LoadError {
            what,
            source: LoadErrorSource::NoPath,
        }
    }

    fn read(what: &'static str, e: std::io::Error) -> Self {
        LoadError {
            what,
            source: LoadErrorSource::Read(e),
        }
    }

    fn deserialize(what: &'static str, e: serde_json::Error) -> Self {
        LoadError {
            what,
            source: LoadErrorSource::Deserialize(e),
        }
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to determine path to local data directory")]
    NoPath,
    #[error("failed to read file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize file contents")]
    Deserialize(#[source] serde_json::Error),
}
