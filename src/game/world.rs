use super::bounds::Bounds;
use super::direction::Direction;
use super::food::{Food, FoodKind};
use super::levels;
use super::snake::Snake;
use crate::consts;
use crate::options::Options;
use enum_map::EnumMap;
use rand::Rng;
#[cfg(test)]
use ratatui::layout::Position;

/// The game simulation, independent of any display or input handling
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct World<R> {
    rng: R,
    bounds: Bounds,

    /// Can food other than `Normal` spawn?
    specials: bool,

    snake: Snake,

    /// The food currently on the grid.  This is only `None` once the snake
    /// has filled the grid.
    food: Option<Food>,

    score: u32,
    level: u32,

    /// Ticks left before the board stops being mirrored
    mirror_ticks: u32,

    stats: FoodStats,
    status: Status,
}

impl<R: Rng> World<R> {
    pub(crate) fn new(options: Options, mut rng: R) -> World<R> {
        let bounds = Bounds::from((options.grid_size.as_size(), options.wraparound));
        let snake = Snake::new(bounds.center(), Direction::East);
        let food = Food::place(&mut rng, FoodKind::Normal, bounds, |p| snake.occupies(p));
        World {
            rng,
            bounds,
            specials: options.specials,
            snake,
            food,
            score: 0,
            level: 1,
            mirror_ticks: 0,
            stats: FoodStats::default(),
            status: if food.is_some() {
                Status::Alive
            } else {
                Status::Exhausted
            },
        }
    }

    /// Advance the simulation by one step
    pub(crate) fn tick(&mut self) -> TickReport {
        let mut report = TickReport::default();
        if self.status != Status::Alive {
            return report;
        }
        self.mirror_ticks = self.mirror_ticks.saturating_sub(1);
        if !self.snake.advance(self.bounds) {
            self.status = Status::Dead(Collision::Wall);
            return report;
        }
        if self.snake.bites_itself() {
            self.status = Status::Dead(Collision::SelfBite);
            return report;
        }
        let head = self.snake.head();
        if let Some(food) = self.food.filter(|f| f.pos == head) {
            report.eaten = Some(food.kind);
            report.level_up = self.eat(food.kind);
        } else if let Some(food) = self.food.as_mut() {
            let cells = self.snake.cells().collect::<Vec<_>>();
            if food.evade(&mut self.rng, self.bounds, &cells) {
                self.stats.escapes += 1;
                report.escaped = true;
                tracing::debug!(to = ?food.pos, "fugitive food escaped");
            }
        }
        report
    }

    /// Consume food of the given kind at the snake's head and spawn the next
    /// one.  Returns the new level if it went up.
    fn eat(&mut self, kind: FoodKind) -> Option<u32> {
        self.score += kind.points();
        self.snake.grow();
        self.stats.eaten[kind] += 1;
        if kind == FoodKind::Mirror {
            self.mirror_ticks = consts::MIRROR_DURATION_TICKS;
        }
        tracing::debug!(?kind, score = self.score, "food eaten");
        let snake = &self.snake;
        let next_kind = FoodKind::draw(&mut self.rng, self.specials);
        self.food = Food::place(&mut self.rng, next_kind, self.bounds, |p| snake.occupies(p));
        if self.food.is_none() {
            tracing::info!(score = self.score, "snake filled the grid");
            self.status = Status::Exhausted;
        }
        let level = levels::level_for_score(self.score);
        (level > self.level).then(|| {
            self.level = level;
            tracing::info!(level, score = self.score, "level up");
            level
        })
    }
}

impl<R> World<R> {
    /// Steer the snake.  While the board is mirrored, east and west are
    /// swapped so that the controls match what is on screen.
    pub(crate) fn turn(&mut self, direction: Direction) {
        if self.status == Status::Alive {
            let direction = if self.mirrored() {
                direction.mirror()
            } else {
                direction
            };
            self.snake.turn(direction);
        }
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn level(&self) -> u32 {
        self.level
    }

    pub(crate) fn snake(&self) -> &Snake {
        &self.snake
    }

    pub(crate) fn food(&self) -> Option<Food> {
        self.food
    }

    pub(crate) fn status(&self) -> Status {
        self.status
    }

    pub(crate) fn stats(&self) -> &FoodStats {
        &self.stats
    }

    pub(crate) fn mirrored(&self) -> bool {
        self.mirror_ticks > 0
    }

    pub(crate) fn mirror_ticks(&self) -> u32 {
        self.mirror_ticks
    }

    pub(crate) fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[cfg(test)]
    pub(super) fn set_food(&mut self, kind: FoodKind, pos: Position) {
        self.food = Some(Food::new(kind, pos));
    }

    #[cfg(test)]
    pub(super) fn snake_mut(&mut self) -> &mut Snake {
        &mut self.snake
    }

    #[cfg(test)]
    pub(super) fn set_score(&mut self, score: u32) {
        self.score = score;
        self.level = levels::level_for_score(score);
    }

    #[cfg(test)]
    pub(super) fn set_status(&mut self, status: Status) {
        self.status = status;
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Status {
    Alive,
    Dead(Collision),
    /// The snake has filled the grid and there is nowhere left to put food
    Exhausted,
}

/// What killed the snake
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Collision {
    Wall,
    SelfBite,
}

/// Tallies of food eaten and fugitive escapes over a game
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct FoodStats {
    pub(crate) eaten: EnumMap<FoodKind, u32>,
    pub(crate) escapes: u32,
}

impl FoodStats {
    pub(crate) fn total_eaten(&self) -> u32 {
        self.eaten.values().sum()
    }
}

/// Things that happened during a tick that the display may want to react to
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct TickReport {
    pub(crate) eaten: Option<FoodKind>,
    pub(crate) level_up: Option<u32>,
    pub(crate) escaped: bool,
}
