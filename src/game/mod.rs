mod bounds;
mod direction;
mod food;
mod levels;
mod paused;
mod snake;
mod world;
use self::direction::Direction;
pub(crate) use self::food::FoodKind;
use self::paused::{PauseOpt, Paused};
use self::world::{Collision, Status, World};
use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::menu::MainMenu;
use crate::util::{center_rect, get_display_area, EnumExt, Globals};
use crate::warning::Warning;
use crossterm::event::{poll, read, Event};
use rand::{rngs::ThreadRng, Rng};
use ratatui::{
    buffer::{Buffer, Cell},
    layout::{Constraint, Layout, Margin, Position, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
    Frame,
};
use std::num::NonZeroU32;
use std::time::Instant;

/// The game screen: a running [`World`] plus pausing, messages, and
/// high-score bookkeeping
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Game<R = ThreadRng> {
    world: World<R>,
    state: GameState,
    globals: Globals,
    next_tick: Option<Instant>,

    /// Ticks left to show the "LEVEL UP!" banner for
    banner_ticks: u32,

    /// Did the finished game set a new high score?
    new_high_score: bool,

    /// An error to show once the app gets around to it
    warning: Option<Warning>,
}

impl Game<ThreadRng> {
    pub(crate) fn new(globals: Globals) -> Self {
        Game::new_with_rng(globals, rand::rng())
    }
}

impl<R: Rng> Game<R> {
    pub(crate) fn new_with_rng(globals: Globals, rng: R) -> Game<R> {
        tracing::info!(options = ?globals.options, "starting new game");
        let world = World::new(globals.options, rng);
        let mut game = Game {
            world,
            state: GameState::Running,
            globals,
            next_tick: None,
            banner_ticks: 0,
            new_high_score: false,
            warning: None,
        };
        if game.world.status() == Status::Exhausted {
            game.finish(GameState::Exhausted);
        }
        game
    }

    /// Wait for either the next tick or an input event, whichever comes
    /// first, and handle it
    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        if self.state == GameState::Running {
            let period = levels::tick_period(self.world.level());
            let when = *self.next_tick.get_or_insert_with(|| Instant::now() + period);
            let wait = when.saturating_duration_since(Instant::now());
            if wait.is_zero() || !poll(wait)? {
                self.advance();
                self.next_tick = None;
                return Ok(None);
            }
        }
        Ok(self.handle_event(read()?))
    }

    fn advance(&mut self) {
        let report = self.world.tick();
        self.banner_ticks = self.banner_ticks.saturating_sub(1);
        if report.level_up.is_some() {
            self.banner_ticks = consts::LEVEL_UP_BANNER_TICKS;
        }
        match self.world.status() {
            Status::Alive => (),
            Status::Dead(collision) => self.finish(GameState::Dead(collision)),
            Status::Exhausted => self.finish(GameState::Exhausted),
        }
    }
}

impl<R> Game<R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    /// Attach an error raised while setting up the game so that it's shown
    /// over the board
    pub(crate) fn with_warning(mut self, warning: Option<Warning>) -> Self {
        if warning.is_some() {
            self.warning = warning;
        }
        self
    }

    pub(crate) fn take_warning(&mut self) -> Option<Warning> {
        self.warning.take()
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        if self.state == GameState::Running && event == Event::FocusLost {
            self.pause();
            return None;
        }
        let cmd = Command::from_key_event(event.as_key_press_event()?)?;
        match self.state {
            GameState::Running => match cmd {
                Command::Quit => return Some(Screen::Quit),
                Command::Up => self.world.turn(Direction::North),
                Command::Left => self.world.turn(Direction::West),
                Command::Down => self.world.turn(Direction::South),
                Command::Right => self.world.turn(Direction::East),
                Command::Esc | Command::Space | Command::P => self.pause(),
                _ => (),
            },
            GameState::Paused(ref mut paused) => match paused.handle_command(cmd)? {
                PauseOpt::Resume => {
                    self.state = GameState::Running;
                    self.next_tick = None;
                }
                PauseOpt::Restart => return Some(self.restart()),
                PauseOpt::MainMenu => return Some(self.main_menu()),
                PauseOpt::Quit => return Some(Screen::Quit),
            },
            GameState::Dead(_) | GameState::Exhausted => match cmd {
                Command::R => return Some(self.restart()),
                Command::M => return Some(self.main_menu()),
                Command::Q | Command::Quit => return Some(Screen::Quit),
                _ => (),
            },
        }
        None
    }

    fn restart(&self) -> Screen {
        Screen::Game(Game::new(self.globals.clone()))
    }

    fn main_menu(&self) -> Screen {
        Screen::Main(MainMenu::new(self.globals.clone()))
    }

    fn pause(&mut self) {
        self.state = GameState::Paused(Paused::new());
    }

    /// End the game, recording the score if it's a new best
    fn finish(&mut self, state: GameState) {
        self.state = state;
        let score = self.world.score();
        let stats = self.world.stats();
        tracing::info!(
            score,
            level = self.world.level(),
            length = self.world.snake().len(),
            eaten = stats.total_eaten(),
            escapes = stats.escapes,
            outcome = ?state,
            "game over"
        );
        if self.globals.high_scores.submit(self.globals.options, score) {
            self.new_high_score = true;
            if let Err(e) = self
                .globals
                .config
                .save_high_scores(&self.globals.high_scores)
            {
                self.warning = Some(Warning::from_error(&e));
            }
        }
    }

    fn best_score(&self) -> u32 {
        self.globals
            .high_scores
            .get(self.globals.options)
            .map_or(0, NonZeroU32::get)
    }

    fn hud(&self) -> Line<'static> {
        let score = self.world.score();
        let level = self.world.level();
        let speed = levels::speed_multiplier(level);
        let length = self.world.snake().len();
        let best = self.best_score();
        Line::styled(
            format!(
                " Score: {score} │ Level: {level} │ Speed: {speed:.1}x │ Length: {length} │ Best: {best}"
            ),
            consts::SCORE_BAR_STYLE,
        )
    }

    /// Food kinds that can show up in this game
    fn food_kinds(&self) -> impl Iterator<Item = FoodKind> {
        let specials = self.globals.options.specials;
        FoodKind::iter().filter(move |&k| specials || k == FoodKind::Normal)
    }

    fn food_tally<F: Fn(FoodKind) -> u32>(&self, label: &'static str, value: F) -> Vec<Span<'static>> {
        let mut spans = vec![Span::raw(label)];
        for kind in self.food_kinds() {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(String::from(kind.symbol()), kind.style()));
            spans.push(Span::raw(format!(" {} ", value(kind))));
        }
        spans
    }

    fn status_line(&self) -> Line<'static> {
        if self.banner_ticks > 0 {
            Line::from(Span::styled(
                format!(" LEVEL UP!  Welcome to level {}", self.world.level()),
                consts::BANNER_STYLE,
            ))
        } else if self.world.mirrored() {
            Line::from_iter([
                Span::raw(" "),
                Span::styled(
                    String::from(consts::MIRROR_FRUIT_SYMBOL),
                    consts::MIRROR_FRUIT_STYLE,
                ),
                Span::raw(format!(
                    " Mirrored for {} more ticks",
                    self.world.mirror_ticks()
                )),
            ])
        } else {
            Line::raw(format!(
                " Points to next level: {}",
                levels::points_to_next_level(self.world.score())
            ))
        }
    }

    fn game_over_line(&self) -> Line<'static> {
        let heading = if self.state == GameState::Exhausted {
            " — BOARD CLEARED —"
        } else {
            " — GAME OVER —"
        };
        let stats = self.world.stats();
        let mut spans = vec![Span::raw(heading)];
        spans.extend(self.food_tally("  Eaten:", |kind| stats.eaten[kind]));
        if self.new_high_score {
            spans.push(Span::raw(" "));
            spans.push(Span::styled("New high score!", consts::BANNER_STYLE));
        }
        Line::from(spans)
    }

    fn draw_board(&self, area: Rect, buf: &mut Buffer) {
        let bounds = self.world.bounds();
        let block_area = center_rect(
            area,
            Size {
                width: bounds.width.saturating_add(2),
                height: bounds.height.saturating_add(2),
            },
        );
        if bounds.wrap {
            DottedBorder.render(block_area, buf);
        } else {
            Block::bordered().render(block_area, buf);
        }
        let mirrored = self.world.mirrored();
        let mut canvas = Canvas {
            area: block_area.inner(Margin::new(1, 1)),
            buf,
            mirrored,
        };
        let snake = self.world.snake();
        for &p in snake.body() {
            canvas.draw_cell(p, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_STYLE);
        }
        if let Some(food) = self.world.food() {
            canvas.draw_cell(food.pos, food.kind.symbol(), food.kind.style());
        }
        // The head goes last so that a collision overwrites whatever it hit.
        if matches!(self.state, GameState::Dead(_)) {
            canvas.draw_cell(
                snake.head(),
                consts::COLLISION_SYMBOL,
                consts::COLLISION_STYLE,
            );
        } else {
            canvas.draw_cell(snake.head(), snake.head_symbol(mirrored), consts::SNAKE_STYLE);
        }
    }
}

impl<R> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [hud_area, board_area, msg1_area, msg2_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(display);
        self.hud().render(hud_area, buf);
        self.draw_board(board_area, buf);
        match self.state {
            GameState::Running | GameState::Paused(_) => {
                self.status_line().render(msg1_area, buf);
                Line::from(self.food_tally(" Points:", FoodKind::points)).render(msg2_area, buf);
            }
            GameState::Dead(_) | GameState::Exhausted => {
                self.game_over_line().render(msg1_area, buf);
                Line::from_iter([
                    Span::raw(" Choose One: Restart ("),
                    Span::styled("r", consts::KEY_STYLE),
                    Span::raw(") — Main Menu ("),
                    Span::styled("m", consts::KEY_STYLE),
                    Span::raw(") — Quit ("),
                    Span::styled("q", consts::KEY_STYLE),
                    Span::raw(")"),
                ])
                .render(msg2_area, buf);
            }
        }
        if let GameState::Paused(paused) = self.state {
            let pause_area = center_rect(
                display,
                Size {
                    width: Paused::WIDTH,
                    height: Paused::HEIGHT,
                },
            );
            paused.render(pause_area, buf);
        }
    }
}

/// Draws glyphs at grid positions within `area`, optionally flipped
/// left-to-right
#[derive(Debug)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
    mirrored: bool,
}

impl Canvas<'_> {
    fn cell_at(&mut self, pos: Position) -> Option<&mut Cell> {
        let col = if self.mirrored {
            self.area.width.checked_sub(pos.x.saturating_add(1))?
        } else {
            pos.x
        };
        let x = self.area.x.checked_add(col)?;
        let y = self.area.y.checked_add(pos.y)?;
        self.buf.cell_mut((x, y))
    }

    fn draw_char(&mut self, pos: Position, symbol: char) {
        if let Some(cell) = self.cell_at(pos) {
            cell.set_char(symbol);
        }
    }

    fn draw_cell(&mut self, pos: Position, symbol: char, style: Style) {
        if let Some(cell) = self.cell_at(pos) {
            cell.set_char(symbol);
            cell.set_style(Style::reset().patch(style));
        }
    }
}

/// Border drawn around the grid when the snake can wrap around its edges
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct DottedBorder;

impl Widget for DottedBorder {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let max_x = area.width.saturating_sub(1);
        let max_y = area.height.saturating_sub(1);
        let mut canvas = Canvas {
            area,
            buf,
            mirrored: false,
        };
        for corner in [
            Position::ORIGIN,
            Position::new(max_x, 0),
            Position::new(max_x, max_y),
            Position::new(0, max_y),
        ] {
            canvas.draw_char(corner, '·');
        }
        for x in 1..max_x {
            canvas.draw_char(Position::new(x, 0), '⋯');
            canvas.draw_char(Position::new(x, max_y), '⋯');
        }
        for y in 1..max_y {
            canvas.draw_char(Position::new(0, y), '⋮');
            canvas.draw_char(Position::new(max_x, y), '⋮');
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum GameState {
    Running,
    Paused(Paused),
    Dead(Collision),
    /// The snake has filled the grid and there is nowhere left to place
    /// food.
    Exhausted,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::options::{GridSize, Options};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use std::path::Path;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn small_globals() -> Globals {
        Globals {
            options: Options {
                grid_size: GridSize::Small,
                ..Options::default()
            },
            ..Globals::default()
        }
    }

    fn small_game() -> Game<ChaCha12Rng> {
        let mut game = Game::new_with_rng(small_globals(), ChaCha12Rng::seed_from_u64(RNG_SEED));
        game.world.set_food(FoodKind::Normal, Position::new(3, 2));
        game
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(code.into())
    }

    fn config_with_scores_file(path: &Path) -> Config {
        toml::from_str(&format!(
            "[files]\nhigh-scores-file = {:?}\nsave-options = false\n",
            path.display().to_string()
        ))
        .unwrap()
    }

    fn legend_styles(expected: &mut Buffer, row: u16) {
        expected.set_style(Rect::new(9, row, 1, 1), consts::FRUIT_STYLE);
        expected.set_style(Rect::new(14, row, 1, 1), consts::SPECIAL_FRUIT_STYLE);
        expected.set_style(Rect::new(19, row, 1, 1), consts::FUGITIVE_FRUIT_STYLE);
        expected.set_style(Rect::new(24, row, 1, 1), consts::MIRROR_FRUIT_STYLE);
    }

    #[test]
    fn new_game() {
        let game = small_game();
        let area = Rect::new(0, 0, 80, 35);
        let mut buffer = Buffer::empty(area);
        game.render(area, &mut buffer);
        let mut expected = Buffer::with_lines([
            " Score: 0 │ Level: 1 │ Speed: 1.0x │ Length: 1 │ Best: 0",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "                             ┌────────────────────┐                             ",
            "                             │                    │                             ",
            "                             │                    │                             ",
            "                             │   ●                │                             ",
            "                             │                    │                             ",
            "                             │                    │                             ",
            "                             │          <         │                             ",
            "                             │                    │                             ",
            "                             │                    │                             ",
            "                             │                    │                             ",
            "                             │                    │                             ",
            "                             └────────────────────┘                             ",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            " Points to next level: 10",
            " Points: ● 1  ★ 5  ✦ 3  ◐ 2 ",
        ]);
        expected.set_style(Rect::new(0, 0, 80, 1), consts::SCORE_BAR_STYLE);
        expected.set_style(Rect::new(40, 17, 1, 1), consts::SNAKE_STYLE);
        expected.set_style(Rect::new(33, 14, 1, 1), consts::FRUIT_STYLE);
        legend_styles(&mut expected, 34);
        assert_eq!(buffer, expected);
    }

    #[test]
    fn mirrored_board() {
        let mut game = small_game();
        game.world.set_food(FoodKind::Mirror, Position::new(11, 5));
        game.advance();
        game.world.set_food(FoodKind::Normal, Position::new(3, 2));
        let area = Rect::new(0, 0, 80, 35);
        let mut buffer = Buffer::empty(area);
        game.render(area, &mut buffer);
        let mut expected = Buffer::with_lines([
            " Score: 2 │ Level: 1 │ Speed: 1.0x │ Length: 1 │ Best: 0",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "                             ┌────────────────────┐                             ",
            "                             │                    │                             ",
            "                             │                    │                             ",
            "                             │                ●   │                             ",
            "                             │                    │                             ",
            "                             │                    │                             ",
            "                             │        >           │                             ",
            "                             │                    │                             ",
            "                             │                    │                             ",
            "                             │                    │                             ",
            "                             │                    │                             ",
            "                             └────────────────────┘                             ",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            " ◐ Mirrored for 40 more ticks",
            " Points: ● 1  ★ 5  ✦ 3  ◐ 2 ",
        ]);
        expected.set_style(Rect::new(0, 0, 80, 1), consts::SCORE_BAR_STYLE);
        expected.set_style(Rect::new(38, 17, 1, 1), consts::SNAKE_STYLE);
        expected.set_style(Rect::new(46, 14, 1, 1), consts::FRUIT_STYLE);
        expected.set_style(Rect::new(1, 33, 1, 1), consts::MIRROR_FRUIT_STYLE);
        legend_styles(&mut expected, 34);
        assert_eq!(buffer, expected);
    }

    #[test]
    fn wall_collision() {
        let mut game = small_game();
        game.world.snake_mut().head = Position::new(19, 5);
        game.advance();
        assert_eq!(game.state, GameState::Dead(Collision::Wall));
        assert!(!game.new_high_score);
        assert_eq!(game.take_warning(), None);
        let area = Rect::new(0, 0, 80, 35);
        let mut buffer = Buffer::empty(area);
        game.render(area, &mut buffer);
        let mut expected = Buffer::with_lines([
            " Score: 0 │ Level: 1 │ Speed: 1.0x │ Length: 1 │ Best: 0",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "                             ┌────────────────────┐                             ",
            "                             │                    │                             ",
            "                             │                    │                             ",
            "                             │   ●                │                             ",
            "                             │                    │                             ",
            "                             │                    │                             ",
            "                             │                   ×│                             ",
            "                             │                    │                             ",
            "                             │                    │                             ",
            "                             │                    │                             ",
            "                             │                    │                             ",
            "                             └────────────────────┘                             ",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            " — GAME OVER —  Eaten: ● 0  ★ 0  ✦ 0  ◐ 0 ",
            " Choose One: Restart (r) — Main Menu (m) — Quit (q)",
        ]);
        expected.set_style(Rect::new(0, 0, 80, 1), consts::SCORE_BAR_STYLE);
        expected.set_style(Rect::new(49, 17, 1, 1), consts::COLLISION_STYLE);
        expected.set_style(Rect::new(33, 14, 1, 1), consts::FRUIT_STYLE);
        expected.set_style(Rect::new(23, 33, 1, 1), consts::FRUIT_STYLE);
        expected.set_style(Rect::new(28, 33, 1, 1), consts::SPECIAL_FRUIT_STYLE);
        expected.set_style(Rect::new(33, 33, 1, 1), consts::FUGITIVE_FRUIT_STYLE);
        expected.set_style(Rect::new(38, 33, 1, 1), consts::MIRROR_FRUIT_STYLE);
        expected.set_style(Rect::new(22, 34, 1, 1), consts::KEY_STYLE);
        expected.set_style(Rect::new(38, 34, 1, 1), consts::KEY_STYLE);
        expected.set_style(Rect::new(49, 34, 1, 1), consts::KEY_STYLE);
        assert_eq!(buffer, expected);
    }

    #[test]
    fn pause_and_resume() {
        let mut game = small_game();
        assert!(game.handle_event(key(KeyCode::Esc)).is_none());
        assert!(matches!(game.state, GameState::Paused(_)));
        assert!(game.handle_event(key(KeyCode::Char(' '))).is_none());
        assert_eq!(game.state, GameState::Running);
        assert!(game.handle_event(Event::FocusLost).is_none());
        assert!(matches!(game.state, GameState::Paused(_)));
        assert!(matches!(
            game.handle_event(key(KeyCode::Char('q'))),
            Some(Screen::Quit)
        ));
    }

    #[test]
    fn steering() {
        let mut game = small_game();
        assert!(game.handle_event(key(KeyCode::Char('k'))).is_none());
        game.advance();
        assert_eq!(game.world.snake().head(), Position::new(10, 4));
        assert!(game.handle_event(key(KeyCode::Left)).is_none());
        game.advance();
        assert_eq!(game.world.snake().head(), Position::new(9, 4));
        assert!(matches!(
            game.handle_event(Event::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL
            ))),
            Some(Screen::Quit)
        ));
    }

    #[test]
    fn game_over_choices() {
        let mut game = small_game();
        game.world.snake_mut().head = Position::new(19, 5);
        game.advance();
        assert!(game.handle_event(key(KeyCode::Up)).is_none());
        assert!(matches!(
            game.handle_event(key(KeyCode::Char('r'))),
            Some(Screen::Game(_))
        ));
        assert!(matches!(
            game.handle_event(key(KeyCode::Char('m'))),
            Some(Screen::Main(_))
        ));
    }

    #[test]
    fn level_up_banner() {
        let mut game = small_game();
        game.world.set_score(9);
        game.world.set_food(FoodKind::Normal, Position::new(11, 5));
        game.advance();
        assert_eq!(game.banner_ticks, consts::LEVEL_UP_BANNER_TICKS);
        assert_eq!(
            game.status_line(),
            Line::from(Span::styled(
                " LEVEL UP!  Welcome to level 2",
                consts::BANNER_STYLE
            ))
        );
        game.advance();
        assert_eq!(game.banner_ticks, consts::LEVEL_UP_BANNER_TICKS - 1);
    }

    #[test]
    fn high_score_saved() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join("scores.json");
        let mut globals = small_globals();
        globals.config = config_with_scores_file(&path);
        let mut game = Game::new_with_rng(globals, ChaCha12Rng::seed_from_u64(RNG_SEED));
        game.world.set_score(15);
        game.world.snake_mut().head = Position::new(19, 5);
        game.advance();
        assert!(game.new_high_score);
        assert_eq!(game.take_warning(), None);
        assert_eq!(game.best_score(), 15);
        let saved = crate::highscores::HighScores::load(&path).unwrap();
        assert_eq!(saved.get(game.globals.options), NonZeroU32::new(15));
    }

    #[test]
    fn high_score_save_failure() {
        let tmpdir = tempfile::tempdir().unwrap();
        let blocker = tmpdir.path().join("not-a-dir");
        fs_err::write(&blocker, "").unwrap();
        let mut globals = small_globals();
        globals.config = config_with_scores_file(&blocker.join("scores.json"));
        let mut game = Game::new_with_rng(globals, ChaCha12Rng::seed_from_u64(RNG_SEED));
        game.world.set_score(3);
        game.world.snake_mut().head = Position::new(19, 5);
        game.advance();
        assert!(game.new_high_score);
        assert!(game.take_warning().is_some());
        assert_eq!(game.take_warning(), None);
    }
}
