//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.  The height leaves room for the score bar, a bordered
/// 40×30 grid, and two message lines.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 35,
};

/// Snake length (head included) at the start of a game
pub(crate) const INITIAL_SNAKE_LENGTH: usize = 1;

/// How many cells the snake's length increases by upon eating food
pub(crate) const SNAKE_GROWTH: usize = 1;

/// Score needed to advance one level
pub(crate) const POINTS_PER_LEVEL: u32 = 10;

/// Ticks per second at level 1
pub(crate) const BASE_TPS: f64 = 8.0;

/// Ticks per second never exceed this, no matter the level
pub(crate) const MAX_TPS: f64 = 20.0;

/// Factor applied to the tick rate for each level above the first
pub(crate) const LEVEL_SPEEDUP: f64 = 1.2;

/// Points for eating a normal fruit
pub(crate) const NORMAL_FOOD_POINTS: u32 = 1;

/// Points for eating a special fruit
pub(crate) const SPECIAL_FOOD_POINTS: u32 = 5;

/// Points for catching a fugitive fruit
pub(crate) const FUGITIVE_FOOD_POINTS: u32 = 3;

/// Points for eating a mirror fruit
pub(crate) const MIRROR_FOOD_POINTS: u32 = 2;

/// Relative spawn weights for normal, special, fugitive, and mirror fruit, in
/// that order
pub(crate) const FOOD_SPAWN_WEIGHTS: [u32; 4] = [67, 15, 10, 8];

/// Random placement attempts before falling back to scanning every free cell
pub(crate) const MAX_SPAWN_ATTEMPTS: usize = 100;

/// A fugitive fruit tries to flee when any part of the snake is within this
/// Manhattan distance
pub(crate) const FUGITIVE_DANGER_RADIUS: u32 = 2;

/// Candidate cells sampled when a fugitive fruit flees
pub(crate) const FUGITIVE_ESCAPE_ATTEMPTS: usize = 50;

/// A fugitive fruit only relocates to a cell at least this far from the snake
pub(crate) const FUGITIVE_MIN_ESCAPE_DISTANCE: u32 = 3;

/// Ticks a fugitive fruit must wait between escapes
pub(crate) const FUGITIVE_COOLDOWN_TICKS: u32 = 8;

/// Ticks the board stays mirrored after eating a mirror fruit
pub(crate) const MIRROR_DURATION_TICKS: u32 = 40;

/// Ticks the "LEVEL UP!" banner stays on screen
pub(crate) const LEVEL_UP_BANNER_TICKS: u32 = 20;

/// Glyph for the snake's head when it is moving north/up
pub(crate) const SNAKE_HEAD_NORTH_SYMBOL: char = 'v';

/// Glyph for the snake's head when it is moving south/down
pub(crate) const SNAKE_HEAD_SOUTH_SYMBOL: char = '^';

/// Glyph for the snake's head when it is moving east/right
pub(crate) const SNAKE_HEAD_EAST_SYMBOL: char = '<';

/// Glyph for the snake's head when it is moving west/left
pub(crate) const SNAKE_HEAD_WEST_SYMBOL: char = '>';

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '⚬';

/// Glyph for normal fruit
pub(crate) const FRUIT_SYMBOL: char = '●';

/// Glyph for special fruit
pub(crate) const SPECIAL_FRUIT_SYMBOL: char = '★';

/// Glyph for fugitive fruit
pub(crate) const FUGITIVE_FRUIT_SYMBOL: char = '✦';

/// Glyph for mirror fruit
pub(crate) const MIRROR_FRUIT_SYMBOL: char = '◐';

/// Glyph for the snake's head when it's collided with a wall or itself
pub(crate) const COLLISION_SYMBOL: char = '×';

/// Style for the snake's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for normal fruit
pub(crate) const FRUIT_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for special fruit
pub(crate) const SPECIAL_FRUIT_STYLE: Style = Style::new()
    .fg(Color::Yellow)
    .add_modifier(Modifier::BOLD);

/// Style for fugitive fruit
pub(crate) const FUGITIVE_FRUIT_STYLE: Style = Style::new().fg(Color::Magenta);

/// Style for mirror fruit
pub(crate) const MIRROR_FRUIT_STYLE: Style = Style::new().fg(Color::LightCyan);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the level-up banner
pub(crate) const BANNER_STYLE: Style = Style::new()
    .fg(Color::LightYellow)
    .add_modifier(Modifier::BOLD);

/// Style for the currently-selected menu item
pub(crate) const MENU_SELECTION_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);
