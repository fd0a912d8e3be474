use crate::util::{load_json, save_json, EnumExt, LoadError, SaveError};
use enum_dispatch::enum_dispatch;
use enum_map::Enum;
use ratatui::layout::Size;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Gameplay options chosen in the main menu.  High scores are tracked
/// separately for each distinct set of options.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct Options {
    /// Does the snake pass through the edges of the grid?
    pub(crate) wraparound: bool,

    /// Can special, fugitive, and mirror fruit spawn?  If not, all fruit is
    /// normal.
    pub(crate) specials: bool,

    pub(crate) grid_size: GridSize,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            wraparound: false,
            specials: true,
            grid_size: GridSize::default(),
        }
    }
}

impl Options {
    /// Return the default path at which options are saved between runs
    pub(crate) fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("fruitsnake").join("options.json"))
    }

    /// Read options from the given file.  Returns `Ok(None)` if the file does
    /// not exist.
    pub(crate) fn load(path: &Path) -> Result<Option<Options>, LoadError> {
        load_json(path, "options")
    }

    pub(crate) fn save(&self, path: &Path) -> Result<(), SaveError> {
        save_json(self, path, "options")
    }

    pub(crate) fn get(&self, key: OptKey) -> OptValue {
        match key {
            OptKey::Wraparound => self.wraparound.into(),
            OptKey::Specials => self.specials.into(),
            OptKey::GridSize => self.grid_size.into(),
        }
    }

    pub(crate) fn set(&mut self, key: OptKey, value: OptValue) {
        match key {
            OptKey::Wraparound => {
                self.wraparound = value
                    .try_into()
                    .expect("Options::set(Wraparound, value) called with non-Bool value");
            }
            OptKey::Specials => {
                self.specials = value
                    .try_into()
                    .expect("Options::set(Specials, value) called with non-Bool value");
            }
            OptKey::GridSize => {
                self.grid_size = value
                    .try_into()
                    .expect("Options::set(GridSize, value) called with non-GridSize value");
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(crate) enum OptKey {
    Wraparound,
    Specials,
    GridSize,
}

impl OptKey {
    pub(crate) const DISPLAY_WIDTH: u16 = 10;

    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            OptKey::Wraparound => "Wraparound",
            OptKey::Specials => "Specials",
            OptKey::GridSize => "Grid Size",
        }
    }
}

impl fmt::Display for OptKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[enum_dispatch]
pub(crate) trait Adjustable {
    fn increase(&mut self);
    fn decrease(&mut self);
    fn toggle(&mut self);
    fn can_increase(&self) -> bool;
    fn can_decrease(&self) -> bool;
}

#[enum_dispatch(Adjustable)] // This also gives us From and TryInto
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum OptValue {
    Bool(bool),
    GridSize,
}

impl OptValue {
    pub(crate) const DISPLAY_WIDTH: u16 = 10;
}

// This is needed for EnumMap to be convenient to construct.
impl Default for OptValue {
    fn default() -> OptValue {
        OptValue::Bool(false)
    }
}

impl fmt::Display for OptValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            OptValue::Bool(false) => write!(f, "   [ ]    "),
            OptValue::Bool(true) => write!(f, "   [✓]    "),
            OptValue::GridSize(sz) => {
                write!(
                    f,
                    "{left} {sz:6} {right}",
                    left = if sz.can_decrease() { '◀' } else { '◁' },
                    right = if sz.can_increase() { '▶' } else { '▷' }
                )
            }
        }
    }
}

impl Adjustable for bool {
    fn increase(&mut self) {
        *self = true;
    }

    fn decrease(&mut self) {
        *self = false;
    }

    fn toggle(&mut self) {
        *self = !*self;
    }

    fn can_increase(&self) -> bool {
        !*self
    }

    fn can_decrease(&self) -> bool {
        *self
    }
}

/// Dimensions of the playing grid
#[derive(Clone, Copy, Debug, Default, Deserialize, Enum, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum GridSize {
    Small,
    Medium,
    /// The classic 40×30 grid
    #[default]
    Large,
}

impl GridSize {
    pub(crate) fn as_size(self) -> Size {
        match self {
            GridSize::Small => Size {
                width: 20,
                height: 10,
            },
            GridSize::Medium => Size {
                width: 30,
                height: 20,
            },
            GridSize::Large => Size {
                width: 40,
                height: 30,
            },
        }
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GridSize::Small => "Small",
            GridSize::Medium => "Medium",
            GridSize::Large => "Large",
        };
        f.pad(name)
    }
}

impl Adjustable for GridSize {
    fn increase(&mut self) {
        if let Some(sz) = self.next() {
            *self = sz;
        }
    }

    fn decrease(&mut self) {
        if let Some(sz) = self.prev() {
            *self = sz;
        }
    }

    fn toggle(&mut self) {}

    fn can_increase(&self) -> bool {
        *self != GridSize::max()
    }

    fn can_decrease(&self) -> bool {
        *self != GridSize::min()
    }
}
